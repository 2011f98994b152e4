//! One game from first piece to game over.

use blockfall_core::{Board, Geometry, GridError, PieceFactory, ScoreKeeper};
use blockfall_types::{GameAction, BASE_FALL_MS, FALL_SPEEDUP_MS, INCOMING_QUEUE_SIZE};

/// Drives one game: the board, the piece supply, the score, and the
/// fall timer.
///
/// Call [`on_tick`](Gameplay::on_tick) once per frame with the elapsed
/// milliseconds and the player's action for that frame, if any. The
/// fall timer counts real time; the piece takes one natural fall each
/// time the accumulated time passes the current fall interval.
#[derive(Debug)]
pub struct Gameplay {
    board: Board,
    factory: PieceFactory,
    score_keeper: ScoreKeeper,
    fall_interval_ms: u32,
    accumulated_ms: u32,
    // Natural falls taken by the piece in play, for the placement and
    // drop bonuses
    fall_steps: u32,
    game_over: bool,
}

impl Gameplay {
    /// Start a game on a fresh board. `drop_pos` and `queue_panel_pos`
    /// are grid positions handed to the board; `seed` fixes the piece
    /// sequence.
    pub fn new(
        geometry: Geometry,
        drop_pos: (i32, i32),
        queue_panel_pos: (i32, i32),
        seed: u32,
    ) -> Self {
        let mut board = Board::new(geometry, drop_pos, queue_panel_pos);
        let mut factory = PieceFactory::new(seed, geometry);

        let starting_queue: [_; INCOMING_QUEUE_SIZE] =
            std::array::from_fn(|_| factory.random_piece());
        let active = factory.random_piece();
        board.set_starting_pieces(starting_queue, active);

        let score_keeper = ScoreKeeper::new();
        let fall_interval_ms = Self::fall_interval(score_keeper.difficulty());
        Self {
            board,
            factory,
            score_keeper,
            fall_interval_ms,
            accumulated_ms: 0,
            fall_steps: 0,
            game_over: false,
        }
    }

    /// Advance the session by one frame.
    ///
    /// The fall interval is refreshed from the current difficulty each
    /// frame, so clearing rows speeds the game up immediately. Returns
    /// false once the game is over.
    pub fn on_tick(
        &mut self,
        elapsed_ms: u32,
        action: Option<GameAction>,
    ) -> Result<bool, GridError> {
        if self.game_over {
            return Ok(false);
        }

        self.accumulated_ms = self.accumulated_ms.saturating_add(elapsed_ms);
        self.fall_interval_ms = Self::fall_interval(self.score_keeper.difficulty());
        // Decided before the action so a keypress cannot postpone
        // gravity within its own frame.
        let fall_due = self.accumulated_ms > self.fall_interval_ms;

        if let Some(action) = action {
            self.apply_action(action)?;
        }

        if fall_due && !self.game_over {
            self.accumulated_ms = 0;
            self.fall_steps += 1;
            self.move_down()?;
        }

        Ok(!self.game_over)
    }

    /// Apply one player action
    pub fn apply_action(&mut self, action: GameAction) -> Result<(), GridError> {
        match action {
            GameAction::MoveLeft => self.board.move_left(),
            GameAction::MoveRight => self.board.move_right(),
            GameAction::MoveDown => {
                self.move_down()?;
            }
            GameAction::RotateLeft => self.board.rotate_left(),
            GameAction::RotateRight => self.board.rotate_right(),
            GameAction::Drop => self.drop_piece()?,
        }
        Ok(())
    }

    /// Move the active piece down one row, landing it when it cannot
    /// fall further. Returns whether the piece actually moved.
    pub fn move_down(&mut self) -> Result<bool, GridError> {
        if self.board.advance_piece() {
            return Ok(true);
        }

        let outcome = self.board.on_piece_landed()?;
        if !outcome.still_playing {
            self.game_over = true;
        } else {
            self.score_keeper
                .on_move_complete(outcome.rows_cleared, self.fall_steps);
            self.board.play_next_piece(&mut self.factory);
        }
        self.fall_steps = 0;
        Ok(false)
    }

    /// Send the piece straight down to where it lands, then award the
    /// drop bonus for the height it was dropped from.
    pub fn drop_piece(&mut self) -> Result<(), GridError> {
        let fall_steps = self.fall_steps;
        while self.move_down()? {}
        self.score_keeper.on_drop(fall_steps);
        Ok(())
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn score_keeper(&self) -> &ScoreKeeper {
        &self.score_keeper
    }

    pub fn score(&self) -> u32 {
        self.score_keeper.score()
    }

    pub fn rows(&self) -> u32 {
        self.score_keeper.rows()
    }

    pub fn difficulty(&self) -> u32 {
        self.score_keeper.difficulty()
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    // Higher difficulty shortens the wait between natural falls; from
    // difficulty 12 onward the piece falls every frame.
    fn fall_interval(difficulty: u32) -> u32 {
        BASE_FALL_MS.saturating_sub(difficulty.saturating_mul(FALL_SPEEDUP_MS))
    }
}
