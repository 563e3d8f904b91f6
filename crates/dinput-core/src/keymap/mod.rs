//! Key name and character translation to hardware scan codes.
//!
//! The canonical representation injected by DInput is the Set 1 scan code
//! plus the extended-key flag ([`KeyCode`]).  Human-readable names and typed
//! characters are translated to that form here, before any event is built.

pub mod scancode;
pub mod us_layout;

use std::collections::HashMap;
use std::sync::OnceLock;

use serde::Serialize;
use thiserror::Error;

use crate::event::KeyCode;
use scancode::SCANCODE_TABLE;

/// Prefix byte that marks an extended key in raw two-byte scan codes.
const EXTENDED_PREFIX: u16 = 0xE0;

/// Error type for key resolution.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum KeyError {
    /// The name is not in the scan-code table.
    #[error("unknown key name: {0:?}")]
    UnknownKey(String),

    /// The character has no key on the US layout.
    #[error("character {0:?} has no scan code on the US keyboard layout")]
    UnmappedChar(char),

    /// A raw scan code is outside the single-byte or `0xE0xx` extended range.
    #[error("invalid raw scan code: {0:#06x}")]
    InvalidScanCode(u16),
}

/// One entry of the key table: a name and the physical key it presses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct KeyDescriptor {
    /// Lower-case key name as accepted by [`KeyMapper::lookup`].
    pub name: &'static str,
    /// Single-byte Set 1 scan code.
    pub scan_code: u16,
    /// Whether the key sends the `0xE0` prefix (`KEYEVENTF_EXTENDEDKEY`).
    pub extended: bool,
}

impl KeyDescriptor {
    /// Returns the injectable form of this key.
    pub fn key_code(&self) -> KeyCode {
        KeyCode::new(self.scan_code, self.extended)
    }
}

/// Unified key mapper providing all translation directions.
pub struct KeyMapper;

impl KeyMapper {
    /// Resolves a key name to its descriptor.
    ///
    /// Matching is case-insensitive: `"Enter"`, `"ENTER"` and `"enter"` all
    /// resolve to the same descriptor.  Single characters follow the same rule,
    /// so `"A"` resolves to the `a` key (use [`KeyMapper::char_to_key`] to
    /// learn whether a character needs shift).
    ///
    /// # Errors
    ///
    /// Returns [`KeyError::UnknownKey`] if the name is not in the table.
    pub fn lookup(name: &str) -> Result<KeyDescriptor, KeyError> {
        let table = name_index();
        if let Some(found) = table.get(name) {
            return Ok(*found);
        }
        table
            .get(name.to_lowercase().as_str())
            .copied()
            .ok_or_else(|| KeyError::UnknownKey(name.to_string()))
    }

    /// Returns `true` if `name` resolves to a key.  Never fails.
    pub fn is_valid_key(name: &str) -> bool {
        Self::lookup(name).is_ok()
    }

    /// Resolves a typed character to its key and whether shift must be held.
    ///
    /// # Errors
    ///
    /// Returns [`KeyError::UnmappedChar`] for characters with no key on the US
    /// layout.
    pub fn char_to_key(c: char) -> Result<(KeyDescriptor, bool), KeyError> {
        let (name, shift) = us_layout::char_to_key_name(c).ok_or(KeyError::UnmappedChar(c))?;
        let descriptor = Self::lookup(name).map_err(|_| KeyError::UnmappedChar(c))?;
        Ok((descriptor, shift))
    }

    /// Resolves a key name given to a press or hotkey call.
    ///
    /// A single typeable character resolves like [`KeyMapper::char_to_key`],
    /// so `"A"` and `"@"` report that shift is needed.  Every other name goes
    /// through [`KeyMapper::lookup`] and never needs shift.
    ///
    /// # Errors
    ///
    /// Returns [`KeyError::UnknownKey`] if the name resolves to no key.
    pub fn resolve_press(name: &str) -> Result<(KeyDescriptor, bool), KeyError> {
        let mut chars = name.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            if let Ok(found) = Self::char_to_key(c) {
                return Ok(found);
            }
        }
        Self::lookup(name).map(|descriptor| (descriptor, false))
    }

    /// Returns `true` if typing `c` requires shift on the US layout.
    pub fn needs_shift(c: char) -> bool {
        us_layout::needs_shift(c)
    }

    /// Converts a raw scan code into a [`KeyCode`].
    ///
    /// Single-byte codes (`0x00..=0xFF`) are plain keys.  Two-byte codes with
    /// the `0xE0` prefix (`0xE04B` for the left arrow) are extended keys.
    ///
    /// # Errors
    ///
    /// Returns [`KeyError::InvalidScanCode`] for any other two-byte value.
    pub fn from_raw_scan_code(raw: u16) -> Result<KeyCode, KeyError> {
        match raw >> 8 {
            0 => Ok(KeyCode::new(raw, false)),
            EXTENDED_PREFIX => Ok(KeyCode::new(raw & 0xFF, true)),
            _ => Err(KeyError::InvalidScanCode(raw)),
        }
    }

    /// Returns every supported key name, in table order.
    pub fn key_names() -> impl Iterator<Item = &'static str> {
        SCANCODE_TABLE.iter().map(|k| k.name)
    }
}

/// Name → descriptor index, built from [`SCANCODE_TABLE`] on first use.
fn name_index() -> &'static HashMap<&'static str, KeyDescriptor> {
    static INDEX: OnceLock<HashMap<&'static str, KeyDescriptor>> = OnceLock::new();
    INDEX.get_or_init(|| SCANCODE_TABLE.iter().map(|k| (k.name, *k)).collect())
}
