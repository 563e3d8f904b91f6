//! The public call surface.
//!
//! [`InputController`] owns the [`Settings`] and the three collaborators every
//! call needs: the injection gateway, the desktop, and the sleeper.  Mouse and
//! keyboard operations are defined in `mouse.rs` and `keyboard.rs`; they all
//! funnel through [`InputController::perform`], which enforces the same
//! order for every call:
//!
//! 1. read the cursor and apply the fail-safe,
//! 2. compute the coordinate space,
//! 3. build and validate the whole event sequence,
//! 4. inject it batch by batch,
//! 5. sleep the configured pause.

use std::sync::Arc;
use std::time::Duration;

use dinput_core::{KeyMapper, ScreenRegion, SequenceBuilder, SequenceError, Settings};
use thiserror::Error;
use tracing::{debug, warn};

use super::desktop::{Desktop, DesktopError};
use super::inject::{InjectionError, InputGateway};
use super::pacing::{Pacer, Sleeper, ThreadSleeper};

/// Error type for every public input call.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum InputError {
    #[error("unknown key: {0}")]
    UnknownKey(String),

    #[error("point ({x}, {y}) is outside the screen")]
    OutOfBounds { x: i32, y: i32 },

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The cursor was on a fail-safe point when the call started.
    #[error("fail-safe triggered: cursor is at ({x}, {y})")]
    FailSafeTriggered { x: i32, y: i32 },

    #[error("injection failed: {0}")]
    Injection(#[from] InjectionError),

    #[error("desktop query failed: {0}")]
    Desktop(#[from] DesktopError),

    /// The OS reported a screen with no area.
    #[error("the desktop has no usable screen area")]
    EmptyDesktop,
}

impl From<SequenceError> for InputError {
    fn from(err: SequenceError) -> Self {
        match err {
            SequenceError::UnknownKey(name) => InputError::UnknownKey(name),
            SequenceError::UnmappedChar(c) => InputError::UnknownKey(format!("{c:?}")),
            SequenceError::InvalidScanCode(raw) => {
                InputError::InvalidArgument(format!("invalid raw scan code {raw:#06x}"))
            }
            SequenceError::OutOfBounds { x, y } => InputError::OutOfBounds { x, y },
            SequenceError::EmptyRegion { .. } => InputError::EmptyDesktop,
            SequenceError::InvalidArgument(msg) => InputError::InvalidArgument(msg),
        }
    }
}

/// Scan-code mouse and keyboard automation.
///
/// Operations take `&self`; settings change through `&mut self` setters.
pub struct InputController {
    pub(crate) settings: Settings,
    pub(crate) gateway: Arc<dyn InputGateway>,
    pub(crate) desktop: Arc<dyn Desktop>,
    pub(crate) sleeper: Arc<dyn Sleeper>,
}

impl InputController {
    /// Creates a controller with default settings that really sleeps.
    pub fn new(gateway: Arc<dyn InputGateway>, desktop: Arc<dyn Desktop>) -> Self {
        Self {
            settings: Settings::default(),
            gateway,
            desktop,
            sleeper: Arc::new(ThreadSleeper),
        }
    }

    pub fn with_settings(mut self, settings: Settings) -> Self {
        self.settings = settings;
        self
    }

    pub fn with_sleeper(mut self, sleeper: Arc<dyn Sleeper>) -> Self {
        self.sleeper = sleeper;
        self
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    // ── Setters ───────────────────────────────────────────────────────────────

    pub fn set_fail_safe(&mut self, enabled: bool) {
        self.settings.fail_safe = enabled;
    }

    /// Replaces every fail-safe point with the single point `(x, y)`.
    pub fn set_fail_safe_corner(&mut self, x: i32, y: i32) {
        self.settings.fail_safe_points = vec![(x, y)];
    }

    pub fn set_fail_safe_points(&mut self, points: Vec<(i32, i32)>) {
        self.settings.fail_safe_points = points;
    }

    pub fn set_pause(&mut self, pause: Duration) {
        self.settings.pause = pause;
    }

    pub fn set_minimum_sleep(&mut self, minimum_sleep: Duration) {
        self.settings.minimum_sleep = minimum_sleep;
    }

    pub fn set_minimum_duration(&mut self, minimum_duration: Duration) {
        self.settings.minimum_duration = minimum_duration;
    }

    pub fn set_virtual_resolution(&mut self, enabled: bool) {
        self.settings.virtual_resolution = enabled;
    }

    pub fn set_primary_button_swapped(&mut self, swapped: bool) {
        self.settings.primary_button_swapped = swapped;
    }

    pub fn set_require_on_screen(&mut self, required: bool) {
        self.settings.require_on_screen = required;
    }

    pub fn set_auto_shift(&mut self, enabled: bool) {
        self.settings.auto_shift = enabled;
    }

    pub fn set_disable_mouse_acceleration(&mut self, disabled: bool) {
        self.settings.disable_mouse_acceleration = disabled;
    }

    // ── Queries ───────────────────────────────────────────────────────────────

    /// Current cursor position in desktop pixels.
    pub fn position(&self) -> Result<(i32, i32), InputError> {
        Ok(self.desktop.cursor_position()?)
    }

    /// Size of the primary monitor in pixels.
    pub fn size(&self) -> Result<(u32, u32), InputError> {
        Ok(self.desktop.primary_size()?)
    }

    /// Returns `true` if `(x, y)` lies inside the current coordinate space.
    pub fn on_screen(&self, x: i32, y: i32) -> Result<bool, InputError> {
        Ok(self.coordinate_space()?.contains(x, y))
    }

    /// Returns `true` if `name` is a supported key name.  Never fails.
    pub fn is_valid_key(&self, name: &str) -> bool {
        KeyMapper::is_valid_key(name)
    }

    // ── Pipeline ──────────────────────────────────────────────────────────────

    /// Runs one public call: fail-safe, build, inject, pause.
    ///
    /// `build` receives a builder positioned at the current cursor.  Nothing
    /// is injected unless it returns `Ok`.
    pub(crate) fn perform<F>(&self, operation: &'static str, build: F) -> Result<(), InputError>
    where
        F: FnOnce(&mut SequenceBuilder<'_>) -> Result<(), SequenceError>,
    {
        let cursor = self.fail_safe_check()?;
        let space = self.coordinate_space()?;

        let mut builder = SequenceBuilder::new(&self.settings, space, cursor);
        build(&mut builder)?;
        let sequence = builder.finish();

        debug!(
            operation,
            events = sequence.event_count(),
            sleep_ms = sequence.total_sleep().as_millis() as u64,
            "performing"
        );
        Pacer::new(self.gateway.as_ref(), self.sleeper.as_ref()).play(&sequence)?;
        self.pause();
        Ok(())
    }

    /// Reads the cursor and fails if it sits on a fail-safe point.
    ///
    /// Returns the cursor position so callers need not read it twice.
    pub(crate) fn fail_safe_check(&self) -> Result<(i32, i32), InputError> {
        let (x, y) = self.desktop.cursor_position()?;
        if self.settings.is_fail_safe_point((x, y)) {
            warn!(x, y, "fail-safe triggered");
            return Err(InputError::FailSafeTriggered { x, y });
        }
        Ok((x, y))
    }

    pub(crate) fn pause(&self) {
        if !self.settings.pause.is_zero() {
            self.sleeper.sleep(self.settings.pause);
        }
    }

    /// The region absolute moves are normalized over for this call.
    fn coordinate_space(&self) -> Result<ScreenRegion, InputError> {
        let region = if self.settings.virtual_resolution {
            self.desktop.virtual_bounds()?
        } else {
            let (width, height) = self.desktop.primary_size()?;
            ScreenRegion::at_origin(width, height)
        };
        if region.is_empty() {
            return Err(InputError::EmptyDesktop);
        }
        Ok(region)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::desktop::MockDesktop;
    use crate::application::pacing::RecordingSleeper;
    use crate::infrastructure::desktop::FixedDesktop;
    use crate::infrastructure::injection::mock::RecordingGateway;

    fn controller(desktop: FixedDesktop) -> (InputController, Arc<RecordingGateway>) {
        let gateway = Arc::new(RecordingGateway::new());
        let controller = InputController::new(gateway.clone(), Arc::new(desktop))
            .with_sleeper(Arc::new(RecordingSleeper::new()));
        (controller, gateway)
    }

    #[test]
    fn test_size_reports_primary_monitor() {
        let (controller, _) = controller(FixedDesktop::dual_1440p());
        assert_eq!(controller.size().unwrap(), (2560, 1440));
    }

    #[test]
    fn test_position_reports_cursor() {
        let (controller, _) = controller(FixedDesktop::single_1080p().with_cursor(12, 34));
        assert_eq!(controller.position().unwrap(), (12, 34));
    }

    #[test]
    fn test_on_screen_uses_primary_monitor_by_default() {
        let (controller, _) = controller(FixedDesktop::dual_1440p());
        assert!(controller.on_screen(0, 0).unwrap());
        assert!(!controller.on_screen(-10, 0).unwrap());
    }

    #[test]
    fn test_on_screen_uses_virtual_bounds_when_enabled() {
        let (mut controller, _) = controller(FixedDesktop::dual_1440p());
        controller.set_virtual_resolution(true);
        assert!(controller.on_screen(-10, 0).unwrap());
    }

    #[test]
    fn test_is_valid_key_never_fails() {
        let (controller, _) = controller(FixedDesktop::single_1080p());
        assert!(controller.is_valid_key("Enter"));
        assert!(!controller.is_valid_key("not-a-key"));
    }

    #[test]
    fn test_set_fail_safe_corner_replaces_points() {
        let (mut controller, _) = controller(FixedDesktop::single_1080p());
        controller.set_fail_safe_points(vec![(0, 0), (5, 5)]);
        controller.set_fail_safe_corner(1919, 0);
        assert_eq!(controller.settings().fail_safe_points, vec![(1919, 0)]);
    }

    #[test]
    fn test_perform_fails_on_fail_safe_point_and_injects_nothing() {
        // Arrange
        let (controller, gateway) = controller(FixedDesktop::single_1080p().with_cursor(0, 0));

        // Act
        let result = controller.perform("test", |b| {
            b.move_to(10, 10, Duration::ZERO)?;
            Ok(())
        });

        // Assert
        assert_eq!(result, Err(InputError::FailSafeTriggered { x: 0, y: 0 }));
        assert!(gateway.events().is_empty());
    }

    #[test]
    fn test_perform_ignores_fail_safe_point_when_disabled() {
        let (mut controller, gateway) = controller(FixedDesktop::single_1080p().with_cursor(0, 0));
        controller.set_fail_safe(false);

        controller
            .perform("test", |b| b.move_to(10, 10, Duration::ZERO))
            .unwrap();

        assert_eq!(gateway.events().len(), 1);
    }

    #[test]
    fn test_perform_sleeps_pause_after_call() {
        // Arrange
        let gateway = Arc::new(RecordingGateway::new());
        let sleeper = Arc::new(RecordingSleeper::new());
        let mut controller =
            InputController::new(gateway, Arc::new(FixedDesktop::single_1080p()))
                .with_sleeper(sleeper.clone());
        controller.set_pause(Duration::from_millis(40));

        // Act
        controller
            .perform("test", |b| b.move_to(10, 10, Duration::ZERO))
            .unwrap();

        // Assert
        assert_eq!(
            *sleeper.sleeps.lock().unwrap(),
            vec![Duration::from_millis(40)]
        );
    }

    #[test]
    fn test_perform_maps_cursor_query_failure_to_desktop_error() {
        // Arrange
        let mut desktop = MockDesktop::new();
        desktop
            .expect_cursor_position()
            .returning(|| Err(DesktopError::Platform("no session".into())));
        let gateway = Arc::new(RecordingGateway::new());
        let controller = InputController::new(gateway.clone(), Arc::new(desktop))
            .with_sleeper(Arc::new(RecordingSleeper::new()));

        // Act
        let result = controller.perform("test", |b| b.move_to(1, 1, Duration::ZERO));

        // Assert
        assert!(matches!(result, Err(InputError::Desktop(_))));
        assert!(gateway.events().is_empty());
    }

    #[test]
    fn test_perform_rejects_empty_desktop() {
        let mut desktop = MockDesktop::new();
        desktop.expect_cursor_position().returning(|| Ok((5, 5)));
        desktop.expect_primary_size().returning(|| Ok((0, 0)));
        let controller = InputController::new(
            Arc::new(RecordingGateway::new()),
            Arc::new(desktop),
        )
        .with_sleeper(Arc::new(RecordingSleeper::new()));

        let result = controller.perform("test", |b| b.move_to(1, 1, Duration::ZERO));

        assert_eq!(result, Err(InputError::EmptyDesktop));
    }

    #[test]
    fn test_sequence_errors_map_to_input_errors() {
        assert_eq!(
            InputError::from(SequenceError::UnknownKey("hyper".into())),
            InputError::UnknownKey("hyper".into())
        );
        assert_eq!(
            InputError::from(SequenceError::OutOfBounds { x: -1, y: 2 }),
            InputError::OutOfBounds { x: -1, y: 2 }
        );
        assert!(matches!(
            InputError::from(SequenceError::InvalidScanCode(0x1234)),
            InputError::InvalidArgument(_)
        ));
    }
}
