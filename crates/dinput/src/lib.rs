//! dinput library entry point.
//!
//! Re-exports all public modules so that integration tests in `tests/`
//! and the binary entry point in `main.rs` share the same module tree.
//!
//! # What does dinput do? (for beginners)
//!
//! dinput drives the mouse and keyboard programmatically (move, click,
//! scroll, press, type, hotkeys) the way GUI-automation libraries do, but it
//! injects keys as *hardware scan codes* through `SendInput`.  Games built on
//! DirectInput or Raw Input ignore the virtual-key events most automation
//! tools produce; scan codes look like a physical keyboard to them.
//!
//! Every call goes through the same pipeline:
//!
//! 1. Check the fail-safe: if the cursor sits on a fail-safe point (the
//!    top-left corner by default) the call fails and nothing is injected.
//! 2. Resolve key names and validate coordinates, building the complete
//!    event sequence with `dinput_core::SequenceBuilder`.
//! 3. Inject the events in order, sleeping between batches where the
//!    sequence asks for it.
//! 4. Sleep the configured pause.
//!
//! # Example
//!
//! ```ignore
//! let mut input = dinput::infrastructure::native_controller();
//! input.set_pause(Duration::from_millis(20));
//! input.move_to(100, 150, Duration::ZERO)?;
//! input.left_click(None)?;
//! input.hotkey(&["ctrl", "s"])?;
//! ```

/// Application layer: the controller and its pacing logic.
pub mod application;

/// Infrastructure layer: OS adapters and config storage.
pub mod infrastructure;

pub use application::controller::{InputController, InputError};
pub use application::hold::KeyHold;
