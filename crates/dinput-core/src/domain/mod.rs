//! Domain entities for DInput.
//!
//! This module contains pure logic with no infrastructure dependencies.  It
//! can be compiled and tested on any platform without a display attached.

/// The desktop coordinate space and the absolute-coordinate normalizer.
///
/// See [`desktop::ScreenRegion`] for the main type.
pub mod desktop;
