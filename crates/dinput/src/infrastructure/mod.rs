//! Infrastructure layer for dinput.
//!
//! Contains the OS-facing adapters and configuration storage.
//!
//! **Dependency rule**: this layer may depend on `application` and
//! `dinput_core`, but MUST NOT be imported by the `application` layer.
//!
//! # Sub-modules
//!
//! - **`injection`** – `InputGateway` implementations: `SendInputGateway`
//!   on Windows and the in-memory `RecordingGateway` everywhere.
//!
//! - **`desktop`** – `Desktop` implementations: `WindowsDesktop` on Windows
//!   and the configurable `FixedDesktop` everywhere.
//!
//! - **`storage`** – TOML configuration file loading and saving.

pub mod desktop;
pub mod injection;
pub mod storage;

#[cfg(target_os = "windows")]
use std::sync::Arc;

#[cfg(target_os = "windows")]
use crate::application::controller::InputController;

/// Builds a controller wired to the real Windows input and desktop APIs.
#[cfg(target_os = "windows")]
pub fn native_controller() -> InputController {
    InputController::new(
        Arc::new(injection::windows::SendInputGateway::new()),
        Arc::new(desktop::windows::WindowsDesktop::new()),
    )
}
