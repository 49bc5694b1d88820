//! Input handling: key mapping and state-aware dispatch.
//!
//! The engine keeps `start` and `impulse` separate; the same key means
//! "start" on the title screen and "flap" in flight, so the choice is made
//! here by looking at the session state.

use crate::engine::{Engine, SessionState};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};
use rand::Rng;

/// UI-agnostic actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    /// Space, Up or Enter.
    Flap,
    /// `r` on the game-over screen.
    Restart,
    /// Esc or `q`.
    Close,
    Other,
}

/// What the caller should do after dispatching an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputResult {
    Continue,
    Quit,
}

pub fn map_key(key: KeyEvent) -> GameAction {
    // Release and repeat events would double-flap on terminals that report them.
    if key.kind != KeyEventKind::Press {
        return GameAction::Other;
    }
    match key.code {
        KeyCode::Char(' ') | KeyCode::Up | KeyCode::Enter => GameAction::Flap,
        KeyCode::Char('r') | KeyCode::Char('R') => GameAction::Restart,
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q') => GameAction::Close,
        _ => GameAction::Other,
    }
}

/// Route an action to the engine operation that fits the current state.
pub fn dispatch<R: Rng>(engine: &mut Engine<R>, action: GameAction) -> InputResult {
    match action {
        GameAction::Flap => match engine.state() {
            SessionState::Idle => engine.start(),
            SessionState::Running => engine.impulse(),
            SessionState::Over => engine.restart(),
        },
        GameAction::Restart => engine.restart(),
        GameAction::Close => return InputResult::Quit,
        GameAction::Other => {}
    }
    InputResult::Continue
}
