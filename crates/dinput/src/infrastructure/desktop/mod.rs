//! [`Desktop`] implementations.
//!
//! | Type             | Platform | Source of truth                              |
//! |------------------|----------|----------------------------------------------|
//! | `WindowsDesktop` | Windows  | `GetSystemMetrics`, `GetCursorPos`, `SystemParametersInfoW` |
//! | `FixedDesktop`   | any      | values given at construction                 |
//!
//! `FixedDesktop` is always compiled (not guarded by `#[cfg]`) so tests and
//! dry runs on any platform can use it without a physical display.

#[cfg(target_os = "windows")]
pub mod windows;

use std::sync::{Mutex, PoisonError};

use dinput_core::ScreenRegion;

use crate::application::desktop::{Desktop, DesktopError, MouseAcceleration};

/// A desktop with fixed geometry and a settable cursor.
///
/// Writes to the acceleration parameters are recorded in order so tests can
/// check that a change was undone.
#[derive(Debug)]
pub struct FixedDesktop {
    primary: (u32, u32),
    bounds: ScreenRegion,
    cursor: Mutex<(i32, i32)>,
    acceleration: Mutex<MouseAcceleration>,
    acceleration_writes: Mutex<Vec<MouseAcceleration>>,
}

impl FixedDesktop {
    /// Creates a desktop with the given primary monitor size and virtual bounds.
    pub fn new(primary: (u32, u32), bounds: ScreenRegion) -> Self {
        Self {
            primary,
            bounds,
            cursor: Mutex::new((primary.0 as i32 / 2, primary.1 as i32 / 2)),
            acceleration: Mutex::new(MouseAcceleration::DISABLED),
            acceleration_writes: Mutex::new(Vec::new()),
        }
    }

    /// A single 1920×1080 monitor with the cursor at its centre.
    pub fn single_1080p() -> Self {
        Self::new((1920, 1080), ScreenRegion::at_origin(1920, 1080))
    }

    /// A 2560×1440 primary monitor with a second 2560×1440 monitor to its left.
    pub fn dual_1440p() -> Self {
        Self::new((2560, 1440), ScreenRegion::new(-2560, 0, 5120, 1440))
    }

    /// Builder-style cursor override.
    pub fn with_cursor(self, x: i32, y: i32) -> Self {
        self.set_cursor(x, y);
        self
    }

    /// Builder-style acceleration override.
    pub fn with_acceleration(self, params: MouseAcceleration) -> Self {
        *self
            .acceleration
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = params;
        self
    }

    pub fn set_cursor(&self, x: i32, y: i32) {
        *self.cursor.lock().unwrap_or_else(PoisonError::into_inner) = (x, y);
    }

    /// Every value passed to `set_mouse_acceleration`, in order.
    pub fn acceleration_writes(&self) -> Vec<MouseAcceleration> {
        self.acceleration_writes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl Desktop for FixedDesktop {
    fn primary_size(&self) -> Result<(u32, u32), DesktopError> {
        Ok(self.primary)
    }

    fn virtual_bounds(&self) -> Result<ScreenRegion, DesktopError> {
        Ok(self.bounds)
    }

    fn cursor_position(&self) -> Result<(i32, i32), DesktopError> {
        Ok(*self.cursor.lock().unwrap_or_else(PoisonError::into_inner))
    }

    fn mouse_acceleration(&self) -> Result<MouseAcceleration, DesktopError> {
        Ok(*self
            .acceleration
            .lock()
            .unwrap_or_else(PoisonError::into_inner))
    }

    fn set_mouse_acceleration(&self, params: MouseAcceleration) -> Result<(), DesktopError> {
        *self
            .acceleration
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = params;
        self.acceleration_writes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(params);
        Ok(())
    }
}
