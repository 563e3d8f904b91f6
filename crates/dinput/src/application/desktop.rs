//! Desktop queries used by the controller.
//!
//! The controller never caches screen geometry: monitors can be attached or
//! rearranged at any time, so the coordinate space and the cursor position
//! are read from a [`Desktop`] at the start of every call.

use dinput_core::ScreenRegion;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, warn};

/// Error type for desktop queries.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DesktopError {
    #[error("platform error: {0}")]
    Platform(String),
}

/// The OS pointer-acceleration parameters (`SPI_GETMOUSE`).
///
/// Windows applies acceleration to relative moves when `acceleration` is
/// non-zero, using the two thresholds to decide the multiplier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct MouseAcceleration {
    pub threshold1: i32,
    pub threshold2: i32,
    pub acceleration: i32,
}

impl MouseAcceleration {
    /// Parameters with acceleration switched off.
    pub const DISABLED: MouseAcceleration = MouseAcceleration {
        threshold1: 0,
        threshold2: 0,
        acceleration: 0,
    };

    pub fn is_enabled(&self) -> bool {
        self.acceleration != 0
    }
}

/// Read access to screen metrics and the cursor, plus the one OS setting
/// dinput may change temporarily.
#[cfg_attr(test, mockall::automock)]
pub trait Desktop: Send + Sync {
    /// Size of the primary monitor in pixels.  Its origin is always `(0, 0)`.
    fn primary_size(&self) -> Result<(u32, u32), DesktopError>;

    /// Bounding box of every monitor.  The origin can be negative.
    fn virtual_bounds(&self) -> Result<ScreenRegion, DesktopError>;

    /// Current cursor position in desktop pixels.
    fn cursor_position(&self) -> Result<(i32, i32), DesktopError>;

    fn mouse_acceleration(&self) -> Result<MouseAcceleration, DesktopError>;

    fn set_mouse_acceleration(&self, params: MouseAcceleration) -> Result<(), DesktopError>;
}

/// Turns pointer acceleration off and restores the previous parameters when
/// dropped.
///
/// If acceleration is already off the guard does nothing.
pub struct AccelerationGuard<'a> {
    desktop: &'a dyn Desktop,
    previous: Option<MouseAcceleration>,
}

impl<'a> AccelerationGuard<'a> {
    /// Disables acceleration on `desktop`.
    ///
    /// # Errors
    ///
    /// Returns [`DesktopError`] if the parameters cannot be read or written.
    pub fn engage(desktop: &'a dyn Desktop) -> Result<Self, DesktopError> {
        let current = desktop.mouse_acceleration()?;
        if !current.is_enabled() {
            return Ok(Self {
                desktop,
                previous: None,
            });
        }
        desktop.set_mouse_acceleration(MouseAcceleration::DISABLED)?;
        debug!(?current, "mouse acceleration disabled");
        Ok(Self {
            desktop,
            previous: Some(current),
        })
    }
}

impl Drop for AccelerationGuard<'_> {
    fn drop(&mut self) {
        if let Some(previous) = self.previous.take() {
            match self.desktop.set_mouse_acceleration(previous) {
                Ok(()) => debug!(?previous, "mouse acceleration restored"),
                Err(e) => warn!("failed to restore mouse acceleration: {e}"),
            }
        }
    }
}
