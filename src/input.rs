//! Maps keyboard events onto game input. Any click on the board activates.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Input {
    /// Flap, or restart when the game is over.
    Activate,
    Ignored,
}

/// Keyboard mapping by `KeyboardEvent.code` (layout independent).
pub fn key_input(code: &str) -> Input {
    match code {
        "Space" | "ArrowUp" | "KeyX" => Input::Activate,
        _ => Input::Ignored,
    }
}

/// Keys whose browser default (page scroll) must be suppressed while playing.
pub fn suppresses_default(code: &str) -> bool {
    matches!(code, "Space" | "ArrowUp")
}
