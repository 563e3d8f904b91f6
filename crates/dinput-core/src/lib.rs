//! # dinput-core
//!
//! Shared library for DInput containing the scan-code key table, the
//! coordinate normalizer, the input event model, and the event sequence
//! builder that turns high-level automation calls into ordered low-level
//! input events.
//!
//! It has zero dependencies on OS APIs: nothing in this crate injects input
//! or queries the screen.  The `dinput` crate supplies those collaborators
//! and drives the sequences built here.
//!
//! # Architecture overview (for beginners)
//!
//! DirectX games usually read the keyboard through DirectInput or Raw Input,
//! which look at *hardware scan codes* rather than the *virtual key codes*
//! most automation libraries synthesize.  Injecting scan codes through
//! `SendInput` makes simulated key presses visible to those games.
//!
//! - **`keymap`** – Key names (`"ctrl"`, `"f5"`, `"numpad7"`) to Set 1 scan
//!   codes, plus the US-layout table that tells `write` which characters need
//!   shift held.
//!
//! - **`domain`** – The desktop coordinate space.  `SendInput` expects
//!   absolute mouse positions as fractions of the screen in `[0, 65535]`;
//!   `ScreenRegion::normalize` performs that conversion.
//!
//! - **`event`** – The `InputEvent` value type and the `SequenceBuilder`,
//!   which expands one call such as "click twice" or "type `Hi!`" into the
//!   exact ordered list of events and sleeps to inject.
//!
//! - **`settings`** – The configuration block read by every call (fail-safe
//!   points, pause interval, button swap, and so on).

pub mod domain;
pub mod event;
pub mod keymap;
pub mod settings;

// Re-export the most-used types at the crate root so callers can write
// `dinput_core::InputEvent` instead of `dinput_core::event::InputEvent`.
pub use domain::desktop::{CoordinateError, ScreenRegion, ABSOLUTE_MAX};
pub use event::sequence::{EventSequence, SequenceBuilder, SequenceError, Step};
pub use event::{InputEvent, KeyCode, MouseButton, PhysicalButton, WHEEL_DELTA};
pub use keymap::{KeyDescriptor, KeyError, KeyMapper};
pub use settings::Settings;
