/// Keyboard decisions for the frame loop.
///
/// The binary owns the terminal and the event channel; everything it decides
/// about a key lives here so the rules can be exercised without a terminal.

use std::collections::HashMap;

use crossterm::event::{KeyCode, KeyModifiers};

use crate::entities::GameStatus;

/// A key is considered "held" if its last press/repeat event arrived within
/// this many frames.  Covers terminals that don't emit key-release events:
/// 8 frames @ 60 FPS ≈ 133 ms, shorter than the OS key-repeat interval.
///
/// On such terminals a single tap of W/S reads as held from the press frame
/// through `HOLD_WINDOW` frames later, i.e. `HOLD_WINDOW + 1` = 9 movement
/// steps (45 units at the default speed).  Terminals that report releases
/// stop the movement on the release event instead.
pub const HOLD_WINDOW: u64 = 8;

/// Frames a modal screen ignores key presses after it appears, so a key
/// held through the last kill doesn't dismiss it unseen.
pub const MODAL_GRACE: u64 = 30;

/// What a key press does in the current frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyAction {
    Quit,
    Shoot,
    Acknowledge,
    Ignore,
}

/// Esc, Q and Ctrl-C end the game from any screen.
pub fn is_quit(code: KeyCode, modifiers: KeyModifiers) -> bool {
    match code {
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => true,
        KeyCode::Char('c') => modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}

/// Frame on which the current modal screen appeared, or `None` while playing.
pub fn track_modal(status: GameStatus, modal_since: Option<u64>, frame: u64) -> Option<u64> {
    match status {
        GameStatus::Playing => None,
        GameStatus::WaveComplete | GameStatus::GameOver => modal_since.or(Some(frame)),
    }
}

/// True once a modal screen has been up for `MODAL_GRACE` frames.
pub fn modal_ready(modal_since: Option<u64>, frame: u64) -> bool {
    modal_since.is_some_and(|since| frame.saturating_sub(since) >= MODAL_GRACE)
}

/// Decide what a key press does.
///
/// `acknowledged` is set once a modal screen has already been dismissed this
/// frame; further presses in the same frame are dropped so one burst of input
/// can't skip the next wave's banner.
pub fn press_action(
    status: GameStatus,
    code: KeyCode,
    modifiers: KeyModifiers,
    frame: u64,
    modal_since: Option<u64>,
    acknowledged: bool,
) -> KeyAction {
    if is_quit(code, modifiers) {
        return KeyAction::Quit;
    }
    match status {
        GameStatus::Playing if code == KeyCode::Char(' ') => KeyAction::Shoot,
        GameStatus::Playing => KeyAction::Ignore,
        GameStatus::WaveComplete | GameStatus::GameOver => {
            if modal_ready(modal_since, frame) && !acknowledged {
                KeyAction::Acknowledge
            } else {
                KeyAction::Ignore
            }
        }
    }
}

/// Returns true if `key` was seen within the last `HOLD_WINDOW` frames.
pub fn is_held(key_frame: &HashMap<KeyCode, u64>, key: &KeyCode, frame: u64) -> bool {
    key_frame
        .get(key)
        .map(|&last| frame.saturating_sub(last) <= HOLD_WINDOW)
        .unwrap_or(false)
}

pub fn any_held(key_frame: &HashMap<KeyCode, u64>, keys: &[KeyCode], frame: u64) -> bool {
    keys.iter().any(|k| is_held(key_frame, k, frame))
}
