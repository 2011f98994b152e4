//! Terminal blockfall runner (default binary).
//!
//! This is the primary gameplay entrypoint.
//! It uses crossterm for input and a custom framebuffer-based renderer
//! (no ratatui widgets/layout).

use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use blockfall::core::{Geometry, PixelRect};
use blockfall::engine::Gameplay;
use blockfall::term::{GameView, TerminalRenderer};
use blockfall::types::{GameAction, TICK_MS};

/// Side length of one block in pixel units.
const BLOCK_SIZE_PX: i32 = 25;

/// Playing field rectangle in pixel units (the classic desktop window layout,
/// which the grid math still derives its cell counts from).
const FIELD_PX: PixelRect = PixelRect {
    left: 125,
    top: 75,
    right: 475,
    bottom: 500,
};

/// Spawn position for new pieces, in grid coordinates.
const DROP_POS: (i32, i32) = (12, 3);

/// Top-left corner of the incoming-queue panel, in grid coordinates.
const QUEUE_PANEL_POS: (i32, i32) = (22, 2);

fn main() -> Result<()> {
    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

fn run(term: &mut TerminalRenderer) -> Result<()> {
    let geometry = Geometry::new(BLOCK_SIZE_PX, BLOCK_SIZE_PX, FIELD_PX);
    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos())
        .unwrap_or(1);

    let mut session = Gameplay::new(geometry, DROP_POS, QUEUE_PANEL_POS, seed);
    let mut view = GameView::new(geometry, QUEUE_PANEL_POS);

    let mut last_tick = Instant::now();
    let tick_duration = Duration::from_millis(TICK_MS as u64);
    let mut paused = false;
    let mut game_over = false;
    let mut pending_action: Option<GameAction> = None;

    loop {
        // Render.
        let overlay = if game_over {
            Some("GAME OVER")
        } else if paused {
            Some("PAUSED")
        } else {
            None
        };
        let fb = view.render(session.board(), session.score_keeper(), overlay);
        term.draw(fb)?;

        // Input with timeout until next tick.
        let timeout = tick_duration
            .checked_sub(last_tick.elapsed())
            .unwrap_or_else(|| Duration::from_secs(0));

        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                // Terminal auto-repeat stands in for held-key movement.
                if matches!(key.kind, KeyEventKind::Press | KeyEventKind::Repeat) {
                    if should_quit(key) {
                        return Ok(());
                    }

                    if matches!(key.code, KeyCode::Char('p') | KeyCode::Char('P')) {
                        paused = !paused;
                    } else if let Some(action) = handle_key_event(key) {
                        // Newest key wins within a frame.
                        pending_action = Some(action);
                    }
                }
            }
        }

        // Tick.
        if last_tick.elapsed() >= tick_duration {
            last_tick = Instant::now();

            if paused || game_over {
                pending_action = None;
            } else {
                game_over = !session.on_tick(TICK_MS, pending_action.take())?;
            }
        }
    }
}

/// Map keyboard input to game actions
fn handle_key_event(key: KeyEvent) -> Option<GameAction> {
    match key.code {
        // Movement
        KeyCode::Left => Some(GameAction::MoveLeft),
        KeyCode::Right => Some(GameAction::MoveRight),
        KeyCode::Down => Some(GameAction::MoveDown),

        // Rotation
        KeyCode::Char('z') | KeyCode::Char('Z') => Some(GameAction::RotateLeft),
        KeyCode::Char('x') | KeyCode::Char('X') => Some(GameAction::RotateRight),
        KeyCode::Up => Some(GameAction::RotateRight),

        // Actions
        KeyCode::Char(' ') => Some(GameAction::Drop),

        _ => None,
    }
}

/// Check if key should quit the game
fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc)
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}
