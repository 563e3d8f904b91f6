//! Scoped key holds.
//!
//! [`InputController::hold`] presses a set of keys and returns a [`KeyHold`]
//! guard.  The keys are released in reverse order when the guard is released
//! explicitly or dropped, including during unwinding, so a failure inside the
//! held region never leaves a key stuck down.

use dinput_core::{InputEvent, KeyMapper, SequenceError};
use tracing::{debug, warn};

use super::controller::{InputController, InputError};

/// Keys held down until this guard is released or dropped.
#[must_use = "the keys are released as soon as the hold is dropped"]
pub struct KeyHold<'a> {
    controller: &'a InputController,
    held: Vec<InputEvent>,
}

impl KeyHold<'_> {
    /// The press events currently held, in press order.
    pub fn held(&self) -> &[InputEvent] {
        &self.held
    }

    /// Releases every held key in reverse order.
    ///
    /// Every release is attempted even if an earlier one fails; the first
    /// error is returned.
    pub fn release(mut self) -> Result<(), InputError> {
        let result = release_all(self.controller, &mut self.held);
        self.controller.pause();
        result
    }
}

impl Drop for KeyHold<'_> {
    fn drop(&mut self) {
        if self.held.is_empty() {
            return;
        }
        if let Err(e) = release_all(self.controller, &mut self.held) {
            warn!("failed to release held keys: {e}");
        }
    }
}

fn release_all(controller: &InputController, held: &mut Vec<InputEvent>) -> Result<(), InputError> {
    let mut first_error = None;
    while let Some(down) = held.pop() {
        let Some(up) = down.release() else { continue };
        if let Err(e) = controller.gateway.inject(&[up]) {
            first_error.get_or_insert(InputError::from(e));
        }
    }
    debug!("held keys released");
    first_error.map_or(Ok(()), Err)
}

impl InputController {
    /// Presses `names` in order and keeps them down until the returned guard
    /// is released or dropped.
    ///
    /// ```ignore
    /// let shift = input.hold(&["shift"])?;
    /// input.press("left", 3, Duration::ZERO)?;
    /// shift.release()?;
    /// ```
    ///
    /// # Errors
    ///
    /// Fails before pressing anything on a fail-safe trigger, an unknown key
    /// or an empty list.  If a press fails part way, the keys already down
    /// are released before the error is returned.
    pub fn hold(&self, names: &[&str]) -> Result<KeyHold<'_>, InputError> {
        self.fail_safe_check()?;
        let downs = names
            .iter()
            .map(|name| {
                KeyMapper::lookup(name).map(|k| InputEvent::Key {
                    key: k.key_code(),
                    down: true,
                })
            })
            .collect::<Result<Vec<_>, _>>()
            .map_err(SequenceError::from)?;
        self.acquire(downs)
    }

    /// [`InputController::hold`] for raw scan codes.
    pub fn scancode_hold(&self, codes: &[u16]) -> Result<KeyHold<'_>, InputError> {
        self.fail_safe_check()?;
        let downs = codes
            .iter()
            .map(|&raw| {
                KeyMapper::from_raw_scan_code(raw).map(|key| InputEvent::Key { key, down: true })
            })
            .collect::<Result<Vec<_>, _>>()
            .map_err(SequenceError::from)?;
        self.acquire(downs)
    }

    /// [`InputController::hold`] for unicode characters.
    pub fn unicode_hold(&self, chars: &[char]) -> Result<KeyHold<'_>, InputError> {
        self.fail_safe_check()?;
        let downs = chars
            .iter()
            .map(|&ch| InputEvent::Unicode { ch, down: true })
            .collect();
        self.acquire(downs)
    }

    fn acquire(&self, downs: Vec<InputEvent>) -> Result<KeyHold<'_>, InputError> {
        if downs.is_empty() {
            return Err(InputError::InvalidArgument(
                "at least one key is required to hold".to_string(),
            ));
        }
        let mut hold = KeyHold {
            controller: self,
            held: Vec::with_capacity(downs.len()),
        };
        for down in downs {
            // On error `hold` drops here and releases what is already down.
            self.gateway.inject(&[down])?;
            hold.held.push(down);
        }
        debug!(keys = hold.held.len(), "keys held");
        self.pause();
        Ok(hold)
    }
}
