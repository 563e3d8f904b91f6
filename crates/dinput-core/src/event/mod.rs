//! Input event value types.
//!
//! An [`InputEvent`] describes exactly one OS-level injected event.  Events
//! are built by the [`sequence::SequenceBuilder`], handed to an injection
//! gateway, and discarded.

pub mod sequence;

use std::str::FromStr;

use serde::Serialize;
use thiserror::Error;

/// Wheel movement of one notch, as defined by Windows (`WHEEL_DELTA`).
pub const WHEEL_DELTA: i32 = 120;

// ── Keys ──────────────────────────────────────────────────────────────────────

/// An injectable key: a single-byte Set 1 scan code plus the extended flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct KeyCode {
    /// Scan code placed in `KEYBDINPUT::wScan`.
    pub scan_code: u16,
    /// Whether `KEYEVENTF_EXTENDEDKEY` must be set.
    pub extended: bool,
}

impl KeyCode {
    /// Creates a key code.
    pub const fn new(scan_code: u16, extended: bool) -> Self {
        Self {
            scan_code,
            extended,
        }
    }

    /// Returns the two-byte raw form (`0xE0xx` for extended keys).
    pub fn raw(&self) -> u16 {
        if self.extended {
            0xE000 | self.scan_code
        } else {
            self.scan_code
        }
    }
}

// ── Mouse buttons ─────────────────────────────────────────────────────────────

/// A mouse button as named by a caller.
///
/// `Primary` and `Secondary` are resolved to a physical button at build time
/// according to the button-swap setting; the other variants are literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum MouseButton {
    #[default]
    Primary,
    Secondary,
    Left,
    Right,
    Middle,
    X1,
    X2,
}

impl MouseButton {
    /// Resolves this button to the physical button to inject.
    pub fn resolve(self, primary_swapped: bool) -> PhysicalButton {
        match (self, primary_swapped) {
            (MouseButton::Primary, false) | (MouseButton::Secondary, true) => PhysicalButton::Left,
            (MouseButton::Primary, true) | (MouseButton::Secondary, false) => PhysicalButton::Right,
            (MouseButton::Left, _) => PhysicalButton::Left,
            (MouseButton::Right, _) => PhysicalButton::Right,
            (MouseButton::Middle, _) => PhysicalButton::Middle,
            (MouseButton::X1, _) => PhysicalButton::X1,
            (MouseButton::X2, _) => PhysicalButton::X2,
        }
    }
}

/// Error returned when a button name cannot be parsed.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown mouse button {0:?}; expected left, middle, right, primary, secondary, x1 or x2")]
pub struct ParseButtonError(pub String);

impl FromStr for MouseButton {
    type Err = ParseButtonError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "primary" => Ok(MouseButton::Primary),
            "secondary" => Ok(MouseButton::Secondary),
            "left" => Ok(MouseButton::Left),
            "right" => Ok(MouseButton::Right),
            "middle" => Ok(MouseButton::Middle),
            "x1" => Ok(MouseButton::X1),
            "x2" => Ok(MouseButton::X2),
            _ => Err(ParseButtonError(s.to_string())),
        }
    }
}

/// A physical mouse button, after primary/secondary resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum PhysicalButton {
    Left,
    Right,
    Middle,
    X1,
    X2,
}

// ── Events ────────────────────────────────────────────────────────────────────

/// One OS-level input event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InputEvent {
    /// Pointer movement.
    ///
    /// When `absolute` is set, `x` and `y` are in the `[0, 65535]` normalized
    /// range, relative to the whole virtual desktop if `virtual_desk` is set
    /// and to the primary monitor otherwise.  When `absolute` is clear they
    /// are raw pixel deltas, subject to OS pointer acceleration.
    MouseMove {
        x: i32,
        y: i32,
        absolute: bool,
        virtual_desk: bool,
    },
    /// Mouse button press (`down = true`) or release.
    MouseButton { button: PhysicalButton, down: bool },
    /// Wheel rotation in `WHEEL_DELTA` units; positive is up / right.
    /// Only one axis is non-zero in events built by this crate.
    MouseWheel { delta_x: i32, delta_y: i32 },
    /// Scan-code key press or release.
    Key { key: KeyCode, down: bool },
    /// Unicode character press or release, bypassing the scan-code table.
    Unicode { ch: char, down: bool },
}

impl InputEvent {
    /// Returns `true` for key, unicode and button press events.
    pub fn is_down(&self) -> bool {
        match self {
            InputEvent::MouseButton { down, .. }
            | InputEvent::Key { down, .. }
            | InputEvent::Unicode { down, .. } => *down,
            InputEvent::MouseMove { .. } | InputEvent::MouseWheel { .. } => false,
        }
    }

    /// Returns the matching release event for a press, or `None` otherwise.
    pub fn release(&self) -> Option<InputEvent> {
        match *self {
            InputEvent::MouseButton { button, down: true } => {
                Some(InputEvent::MouseButton { button, down: false })
            }
            InputEvent::Key { key, down: true } => Some(InputEvent::Key { key, down: false }),
            InputEvent::Unicode { ch, down: true } => Some(InputEvent::Unicode { ch, down: false }),
            _ => None,
        }
    }
}
