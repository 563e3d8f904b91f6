//! Desktop coordinate space and absolute-coordinate normalization.
//!
//! `SendInput` does not take pixel positions for absolute mouse moves.  It
//! takes each axis as a fraction of the target area scaled to `[0, 65535]`.
//! The target area is either the primary monitor (origin `(0, 0)`) or, with
//! `MOUSEEVENTF_VIRTUALDESK`, the bounding box of every connected monitor,
//! whose origin can be negative when a monitor sits left of or above the
//! primary one.
//!
//! A [`ScreenRegion`] describes that area.  It is recomputed from the OS on
//! every call because monitors can be attached, removed or rearranged while
//! the process runs.

use serde::Serialize;
use thiserror::Error;

/// Largest value of the absolute coordinate range (inclusive).
pub const ABSOLUTE_MAX: i32 = 65535;

/// Size of the absolute coordinate range.
const ABSOLUTE_SPAN: f64 = 65536.0;

/// Errors raised while mapping pixel coordinates.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CoordinateError {
    /// The point is outside the region and on-screen positions are required.
    #[error("point ({x}, {y}) is outside the screen")]
    OutOfBounds { x: i32, y: i32 },

    /// The region has zero width or height, so nothing can be normalized.
    #[error("screen region is empty ({width}x{height})")]
    EmptyRegion { width: u32, height: u32 },
}

/// A rectangular region in desktop pixel coordinates.
///
/// `x` and `y` are the top-left corner (may be negative on a virtual desktop).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ScreenRegion {
    /// X coordinate of the top-left corner.
    pub x: i32,
    /// Y coordinate of the top-left corner.
    pub y: i32,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl ScreenRegion {
    /// Creates a region with its top-left corner at `(x, y)`.
    pub fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Creates a region anchored at `(0, 0)`, such as the primary monitor.
    pub fn at_origin(width: u32, height: u32) -> Self {
        Self::new(0, 0, width, height)
    }

    /// Returns the rightmost X coordinate (exclusive).
    pub fn right(&self) -> i32 {
        self.x + self.width as i32
    }

    /// Returns the bottommost Y coordinate (exclusive).
    pub fn bottom(&self) -> i32 {
        self.y + self.height as i32
    }

    /// Returns `true` if the region has no area.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Returns `true` if the pixel `(x, y)` lies inside this region.
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    /// Fails with [`CoordinateError::OutOfBounds`] unless `(x, y)` is inside.
    pub fn require_contains(&self, x: i32, y: i32) -> Result<(), CoordinateError> {
        if self.contains(x, y) {
            Ok(())
        } else {
            Err(CoordinateError::OutOfBounds { x, y })
        }
    }

    /// Converts a pixel position to the `[0, 65535]` absolute range.
    ///
    /// Each axis is `round((p - origin) * 65536 / extent)` clamped to the
    /// range, so points outside the region pin to the nearest edge.
    ///
    /// # Errors
    ///
    /// Returns [`CoordinateError::EmptyRegion`] if the region has no area.
    pub fn normalize(&self, x: i32, y: i32) -> Result<(i32, i32), CoordinateError> {
        self.ensure_not_empty()?;
        Ok((
            normalize_axis(x, self.x, self.width),
            normalize_axis(y, self.y, self.height),
        ))
    }

    /// Converts an absolute `[0, 65535]` position back to pixels.
    ///
    /// For every pixel inside the region, `denormalize(normalize(p))` is
    /// within one pixel of `p`.
    ///
    /// # Errors
    ///
    /// Returns [`CoordinateError::EmptyRegion`] if the region has no area.
    pub fn denormalize(&self, nx: i32, ny: i32) -> Result<(i32, i32), CoordinateError> {
        self.ensure_not_empty()?;
        Ok((
            denormalize_axis(nx, self.x, self.width),
            denormalize_axis(ny, self.y, self.height),
        ))
    }

    fn ensure_not_empty(&self) -> Result<(), CoordinateError> {
        if self.is_empty() {
            return Err(CoordinateError::EmptyRegion {
                width: self.width,
                height: self.height,
            });
        }
        Ok(())
    }
}

fn normalize_axis(p: i32, origin: i32, extent: u32) -> i32 {
    let offset = f64::from(p) - f64::from(origin);
    let scaled = (offset * ABSOLUTE_SPAN / f64::from(extent)).round();
    scaled.clamp(0.0, f64::from(ABSOLUTE_MAX)) as i32
}

fn denormalize_axis(n: i32, origin: i32, extent: u32) -> i32 {
    let n = n.clamp(0, ABSOLUTE_MAX);
    let offset = (f64::from(n) * f64::from(extent) / ABSOLUTE_SPAN).round();
    origin + offset as i32
}

// ── Tests ─────────────────────────────────────────────────────────────────────
