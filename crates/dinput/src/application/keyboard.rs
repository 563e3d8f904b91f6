//! Keyboard operations on [`InputController`].
//!
//! Three families share the same shapes:
//!
//! | Family     | Keys given as               | Injected as                 |
//! |------------|-----------------------------|-----------------------------|
//! | (plain)    | names (`"ctrl"`, `"f5"`)    | scan codes from the table   |
//! | `scancode_`| raw codes (`0x1D`, `0xE04B`)| scan codes as given         |
//! | `unicode_` | characters                  | `KEYEVENTF_UNICODE` events  |
//!
//! Names and raw codes are resolved inside the build step, after the
//! fail-safe check and before anything is injected.  Raw codes must be a
//! single byte or carry the `0xE0` extended prefix; anything else is
//! rejected as an invalid argument.
//!
//! Single-character names given to `press` and `hotkey` follow auto-shift
//! like `write` does: `press("A")` and `press("@")` hold shift around the
//! tap.

use std::time::Duration;

use dinput_core::{KeyCode, KeyError, KeyMapper};

use super::controller::{InputController, InputError};

fn resolve_raw(codes: &[u16]) -> Result<Vec<KeyCode>, KeyError> {
    codes
        .iter()
        .map(|&raw| KeyMapper::from_raw_scan_code(raw))
        .collect()
}

impl InputController {
    // ── Named keys ────────────────────────────────────────────────────────────

    pub fn key_down(&self, name: &str) -> Result<(), InputError> {
        self.perform("key_down", |b| {
            b.key(KeyMapper::lookup(name)?.key_code(), true);
            Ok(())
        })
    }

    pub fn key_up(&self, name: &str) -> Result<(), InputError> {
        self.perform("key_up", |b| {
            b.key(KeyMapper::lookup(name)?.key_code(), false);
            Ok(())
        })
    }

    /// Taps `name` `presses` times, sleeping `interval` after each tap.
    ///
    /// With auto-shift enabled, a single character that needs shift is
    /// wrapped in a shift press.
    pub fn press(&self, name: &str, presses: u32, interval: Duration) -> Result<(), InputError> {
        self.press_keys(&[name], presses, interval)
    }

    /// Taps every key of `names` in order, `presses` rounds.
    pub fn press_keys(
        &self,
        names: &[&str],
        presses: u32,
        interval: Duration,
    ) -> Result<(), InputError> {
        self.perform("press", |b| b.press_names(names, presses, interval))
    }

    /// Types `text` with scan codes, `interval` after each character.
    ///
    /// With auto-shift enabled, upper-case letters and shifted symbols are
    /// wrapped in a shift press.  Characters with no key on the US layout fail
    /// the whole call before anything is typed; use
    /// [`InputController::unicode_write`] for those.
    pub fn write(&self, text: &str, interval: Duration) -> Result<(), InputError> {
        self.perform("write", |b| b.type_text(text, interval))
    }

    /// Presses `names` in order and releases them in reverse.
    ///
    /// Keys are pressed `minimum_sleep` apart and released immediately.
    pub fn hotkey(&self, names: &[&str]) -> Result<(), InputError> {
        self.hotkey_timed(names, self.settings.minimum_sleep, Duration::ZERO)
    }

    /// [`InputController::hotkey`] with an explicit gap between keys and a
    /// hold time between the last press and the first release.
    pub fn hotkey_timed(
        &self,
        names: &[&str],
        interval: Duration,
        wait: Duration,
    ) -> Result<(), InputError> {
        self.perform("hotkey", |b| b.chord_names(names, interval, wait))
    }

    // ── Raw scan codes ────────────────────────────────────────────────────────

    /// Presses a raw scan code.  `0xE0xx` codes are sent as extended keys.
    pub fn scancode_key_down(&self, raw: u16) -> Result<(), InputError> {
        self.perform("scancode_key_down", |b| {
            b.key(KeyMapper::from_raw_scan_code(raw)?, true);
            Ok(())
        })
    }

    pub fn scancode_key_up(&self, raw: u16) -> Result<(), InputError> {
        self.perform("scancode_key_up", |b| {
            b.key(KeyMapper::from_raw_scan_code(raw)?, false);
            Ok(())
        })
    }

    pub fn scancode_press(
        &self,
        codes: &[u16],
        presses: u32,
        interval: Duration,
    ) -> Result<(), InputError> {
        self.perform("scancode_press", |b| {
            b.press(&resolve_raw(codes)?, presses, interval)
        })
    }

    pub fn scancode_hotkey(&self, codes: &[u16]) -> Result<(), InputError> {
        let interval = self.settings.minimum_sleep;
        self.perform("scancode_hotkey", |b| {
            b.chord(&resolve_raw(codes)?, interval, Duration::ZERO)
        })
    }

    // ── Unicode ───────────────────────────────────────────────────────────────

    pub fn unicode_key_down(&self, ch: char) -> Result<(), InputError> {
        self.perform("unicode_key_down", |b| {
            b.unicode(ch, true);
            Ok(())
        })
    }

    pub fn unicode_key_up(&self, ch: char) -> Result<(), InputError> {
        self.perform("unicode_key_up", |b| {
            b.unicode(ch, false);
            Ok(())
        })
    }

    pub fn unicode_press(
        &self,
        chars: &[char],
        presses: u32,
        interval: Duration,
    ) -> Result<(), InputError> {
        self.perform("unicode_press", |b| b.unicode_press(chars, presses, interval))
    }

    /// Types any text, independent of the keyboard layout.
    pub fn unicode_write(&self, text: &str, interval: Duration) -> Result<(), InputError> {
        self.perform("unicode_write", |b| {
            b.unicode_text(text, interval);
            Ok(())
        })
    }

    pub fn unicode_hotkey(&self, chars: &[char]) -> Result<(), InputError> {
        let interval = self.settings.minimum_sleep;
        self.perform("unicode_hotkey", |b| {
            b.unicode_chord(chars, interval, Duration::ZERO)
        })
    }
}
