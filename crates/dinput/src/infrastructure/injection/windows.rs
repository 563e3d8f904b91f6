//! Windows input injection via the `SendInput` API.
//!
//! Keys are sent as scan codes (`KEYEVENTF_SCANCODE`), never as virtual key
//! codes, so DirectInput and Raw Input consumers see them.  Unicode events
//! use `KEYEVENTF_UNICODE`; characters outside the BMP become two inputs,
//! one per UTF-16 surrogate.

#![cfg(target_os = "windows")]

use dinput_core::{InputEvent, KeyCode, PhysicalButton};
use tracing::trace;
use windows::Win32::UI::Input::KeyboardAndMouse::{
    SendInput, INPUT, INPUT_0, INPUT_KEYBOARD, INPUT_MOUSE, KEYBDINPUT, KEYBD_EVENT_FLAGS,
    KEYEVENTF_EXTENDEDKEY, KEYEVENTF_KEYUP, KEYEVENTF_SCANCODE, KEYEVENTF_UNICODE,
    MOUSEEVENTF_ABSOLUTE, MOUSEEVENTF_HWHEEL, MOUSEEVENTF_LEFTDOWN, MOUSEEVENTF_LEFTUP,
    MOUSEEVENTF_MIDDLEDOWN, MOUSEEVENTF_MIDDLEUP, MOUSEEVENTF_MOVE, MOUSEEVENTF_RIGHTDOWN,
    MOUSEEVENTF_RIGHTUP, MOUSEEVENTF_VIRTUALDESK, MOUSEEVENTF_WHEEL, MOUSEEVENTF_XDOWN,
    MOUSEEVENTF_XUP, MOUSEINPUT, MOUSE_EVENT_FLAGS, VIRTUAL_KEY,
};
use windows::Win32::UI::WindowsAndMessaging::{XBUTTON1, XBUTTON2};

use crate::application::inject::{InjectionError, InputGateway};

/// Windows implementation of [`InputGateway`] using `SendInput`.
pub struct SendInputGateway;

impl SendInputGateway {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SendInputGateway {
    fn default() -> Self {
        Self::new()
    }
}

impl InputGateway for SendInputGateway {
    fn inject(&self, events: &[InputEvent]) -> Result<(), InjectionError> {
        let mut inputs = Vec::with_capacity(events.len());
        for event in events {
            push_inputs(event, &mut inputs);
        }
        if inputs.is_empty() {
            return Ok(());
        }

        // SAFETY: every element is a fully initialised INPUT and cbsize
        // matches the element type.
        let inserted = unsafe { SendInput(&inputs, std::mem::size_of::<INPUT>() as i32) } as usize;
        trace!(submitted = inputs.len(), inserted, "SendInput");

        if inserted == 0 {
            let err = windows::core::Error::from_win32();
            return Err(InjectionError::Platform(format!(
                "SendInput inserted no events: {err}"
            )));
        }
        if inserted < inputs.len() {
            return Err(InjectionError::Partial {
                submitted: inputs.len(),
                inserted,
            });
        }
        Ok(())
    }
}

// ── Translation ───────────────────────────────────────────────────────────────

fn push_inputs(event: &InputEvent, out: &mut Vec<INPUT>) {
    match *event {
        InputEvent::MouseMove {
            x,
            y,
            absolute,
            virtual_desk,
        } => out.push(mouse_input(x, y, 0, move_flags(absolute, virtual_desk))),
        InputEvent::MouseButton { button, down } => {
            let (flags, data) = button_flags(button, down);
            out.push(mouse_input(0, 0, data, flags));
        }
        InputEvent::MouseWheel { delta_x, delta_y } => {
            if delta_y != 0 {
                out.push(mouse_input(0, 0, delta_y as u32, MOUSEEVENTF_WHEEL));
            }
            if delta_x != 0 {
                out.push(mouse_input(0, 0, delta_x as u32, MOUSEEVENTF_HWHEEL));
            }
        }
        InputEvent::Key { key, down } => out.push(keyboard_input(key.scan_code, key_flags(key, down))),
        InputEvent::Unicode { ch, down } => {
            let mut units = [0u16; 2];
            for unit in ch.encode_utf16(&mut units).iter() {
                out.push(keyboard_input(*unit, unicode_flags(down)));
            }
        }
    }
}

fn move_flags(absolute: bool, virtual_desk: bool) -> MOUSE_EVENT_FLAGS {
    let mut flags = MOUSEEVENTF_MOVE;
    if absolute {
        flags |= MOUSEEVENTF_ABSOLUTE;
        if virtual_desk {
            flags |= MOUSEEVENTF_VIRTUALDESK;
        }
    }
    flags
}

fn button_flags(button: PhysicalButton, down: bool) -> (MOUSE_EVENT_FLAGS, u32) {
    match (button, down) {
        (PhysicalButton::Left, true) => (MOUSEEVENTF_LEFTDOWN, 0),
        (PhysicalButton::Left, false) => (MOUSEEVENTF_LEFTUP, 0),
        (PhysicalButton::Right, true) => (MOUSEEVENTF_RIGHTDOWN, 0),
        (PhysicalButton::Right, false) => (MOUSEEVENTF_RIGHTUP, 0),
        (PhysicalButton::Middle, true) => (MOUSEEVENTF_MIDDLEDOWN, 0),
        (PhysicalButton::Middle, false) => (MOUSEEVENTF_MIDDLEUP, 0),
        (PhysicalButton::X1, true) => (MOUSEEVENTF_XDOWN, XBUTTON1 as u32),
        (PhysicalButton::X1, false) => (MOUSEEVENTF_XUP, XBUTTON1 as u32),
        (PhysicalButton::X2, true) => (MOUSEEVENTF_XDOWN, XBUTTON2 as u32),
        (PhysicalButton::X2, false) => (MOUSEEVENTF_XUP, XBUTTON2 as u32),
    }
}

fn key_flags(key: KeyCode, down: bool) -> KEYBD_EVENT_FLAGS {
    let mut flags = KEYEVENTF_SCANCODE;
    if key.extended {
        flags |= KEYEVENTF_EXTENDEDKEY;
    }
    if !down {
        flags |= KEYEVENTF_KEYUP;
    }
    flags
}

fn unicode_flags(down: bool) -> KEYBD_EVENT_FLAGS {
    if down {
        KEYEVENTF_UNICODE
    } else {
        KEYEVENTF_UNICODE | KEYEVENTF_KEYUP
    }
}

fn mouse_input(dx: i32, dy: i32, mouse_data: u32, flags: MOUSE_EVENT_FLAGS) -> INPUT {
    INPUT {
        r#type: INPUT_MOUSE,
        Anonymous: INPUT_0 {
            mi: MOUSEINPUT {
                dx,
                dy,
                mouseData: mouse_data,
                dwFlags: flags,
                time: 0,
                dwExtraInfo: 0,
            },
        },
    }
}

fn keyboard_input(scan: u16, flags: KEYBD_EVENT_FLAGS) -> INPUT {
    INPUT {
        r#type: INPUT_KEYBOARD,
        Anonymous: INPUT_0 {
            ki: KEYBDINPUT {
                wVk: VIRTUAL_KEY(0),
                wScan: scan,
                dwFlags: flags,
                time: 0,
                dwExtraInfo: 0,
            },
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extended_key_up_sets_all_three_flags() {
        let flags = key_flags(KeyCode::new(0x4B, true), false);
        assert_eq!(
            flags,
            KEYEVENTF_SCANCODE | KEYEVENTF_EXTENDEDKEY | KEYEVENTF_KEYUP
        );
    }

    #[test]
    fn test_plain_key_down_is_scancode_only() {
        assert_eq!(key_flags(KeyCode::new(0x1E, false), true), KEYEVENTF_SCANCODE);
    }

    #[test]
    fn test_virtual_desk_only_applies_to_absolute_moves() {
        assert_eq!(
            move_flags(true, true),
            MOUSEEVENTF_MOVE | MOUSEEVENTF_ABSOLUTE | MOUSEEVENTF_VIRTUALDESK
        );
        assert_eq!(move_flags(false, true), MOUSEEVENTF_MOVE);
    }

    #[test]
    fn test_astral_char_becomes_two_inputs() {
        let mut inputs = Vec::new();
        push_inputs(&InputEvent::Unicode { ch: '😀', down: true }, &mut inputs);
        assert_eq!(inputs.len(), 2);
    }

    #[test]
    fn test_wheel_with_both_axes_becomes_two_inputs() {
        let mut inputs = Vec::new();
        push_inputs(
            &InputEvent::MouseWheel {
                delta_x: 120,
                delta_y: -120,
            },
            &mut inputs,
        );
        assert_eq!(inputs.len(), 2);
    }

    #[test]
    fn test_x_buttons_carry_button_number() {
        assert_eq!(button_flags(PhysicalButton::X2, true), (MOUSEEVENTF_XDOWN, 2));
    }
}
