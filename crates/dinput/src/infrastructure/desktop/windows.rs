//! Windows desktop queries via `GetSystemMetrics`, `GetCursorPos` and
//! `SystemParametersInfoW`.

#![cfg(target_os = "windows")]

use std::ffi::c_void;

use dinput_core::ScreenRegion;
use windows::Win32::Foundation::POINT;
use windows::Win32::UI::WindowsAndMessaging::{
    GetCursorPos, GetSystemMetrics, SystemParametersInfoW, SM_CXSCREEN, SM_CXVIRTUALSCREEN,
    SM_CYSCREEN, SM_CYVIRTUALSCREEN, SM_XVIRTUALSCREEN, SM_YVIRTUALSCREEN, SPIF_SENDCHANGE,
    SPI_GETMOUSE, SPI_SETMOUSE, SYSTEM_PARAMETERS_INFO_UPDATE_FLAGS,
};

use crate::application::desktop::{Desktop, DesktopError, MouseAcceleration};

/// Windows implementation of [`Desktop`].
pub struct WindowsDesktop;

impl WindowsDesktop {
    pub fn new() -> Self {
        Self
    }
}

impl Default for WindowsDesktop {
    fn default() -> Self {
        Self::new()
    }
}

impl Desktop for WindowsDesktop {
    fn primary_size(&self) -> Result<(u32, u32), DesktopError> {
        // SAFETY: GetSystemMetrics has no preconditions.
        let (w, h) = unsafe { (GetSystemMetrics(SM_CXSCREEN), GetSystemMetrics(SM_CYSCREEN)) };
        Ok((w.max(0) as u32, h.max(0) as u32))
    }

    fn virtual_bounds(&self) -> Result<ScreenRegion, DesktopError> {
        // SAFETY: GetSystemMetrics has no preconditions.
        let (x, y, w, h) = unsafe {
            (
                GetSystemMetrics(SM_XVIRTUALSCREEN),
                GetSystemMetrics(SM_YVIRTUALSCREEN),
                GetSystemMetrics(SM_CXVIRTUALSCREEN),
                GetSystemMetrics(SM_CYVIRTUALSCREEN),
            )
        };
        Ok(ScreenRegion::new(x, y, w.max(0) as u32, h.max(0) as u32))
    }

    fn cursor_position(&self) -> Result<(i32, i32), DesktopError> {
        let mut point = POINT::default();
        // SAFETY: `point` is a valid, writable POINT on the stack.
        unsafe { GetCursorPos(&mut point) }
            .map_err(|e| DesktopError::Platform(format!("GetCursorPos failed: {e}")))?;
        Ok((point.x, point.y))
    }

    fn mouse_acceleration(&self) -> Result<MouseAcceleration, DesktopError> {
        let mut params = [0i32; 3];
        // SAFETY: SPI_GETMOUSE writes exactly three i32 values into pvParam.
        unsafe {
            SystemParametersInfoW(
                SPI_GETMOUSE,
                0,
                Some(params.as_mut_ptr() as *mut c_void),
                SYSTEM_PARAMETERS_INFO_UPDATE_FLAGS(0),
            )
        }
        .map_err(|e| DesktopError::Platform(format!("SPI_GETMOUSE failed: {e}")))?;
        Ok(MouseAcceleration {
            threshold1: params[0],
            threshold2: params[1],
            acceleration: params[2],
        })
    }

    fn set_mouse_acceleration(&self, params: MouseAcceleration) -> Result<(), DesktopError> {
        let mut raw = [params.threshold1, params.threshold2, params.acceleration];
        // SAFETY: SPI_SETMOUSE reads exactly three i32 values from pvParam.
        unsafe {
            SystemParametersInfoW(
                SPI_SETMOUSE,
                0,
                Some(raw.as_mut_ptr() as *mut c_void),
                SPIF_SENDCHANGE,
            )
        }
        .map_err(|e| DesktopError::Platform(format!("SPI_SETMOUSE failed: {e}")))
    }
}
