//! Mouse operations on [`InputController`].
//!
//! Targets are desktop pixels.  Absolute moves are normalized over the
//! primary monitor, or the whole virtual desktop when virtual resolution is
//! enabled.  `move_raw` is the only relative move: it sends raw mickeys and is
//! subject to pointer acceleration unless that is disabled in the settings.

use std::time::Duration;

use dinput_core::MouseButton;

use super::controller::{InputController, InputError};
use super::desktop::AccelerationGuard;

impl InputController {
    /// Moves the cursor to `(x, y)` over `duration`.
    ///
    /// Durations shorter than the minimum duration move instantly.
    pub fn move_to(&self, x: i32, y: i32, duration: Duration) -> Result<(), InputError> {
        self.perform("move_to", |b| b.move_to(x, y, duration))
    }

    /// Moves along whichever axes are given; an omitted axis keeps the
    /// cursor's current coordinate.
    ///
    /// The cursor is read once, for the fail-safe check, and that same
    /// reading fills the missing axis.
    pub fn move_to_axes(
        &self,
        x: Option<i32>,
        y: Option<i32>,
        duration: Duration,
    ) -> Result<(), InputError> {
        self.perform("move_to", |b| b.move_to_axes(x, y, duration))
    }

    /// Moves horizontally to `x`, keeping the current `y`.
    pub fn move_to_x(&self, x: i32, duration: Duration) -> Result<(), InputError> {
        self.perform("move_to_x", |b| b.move_to_axes(Some(x), None, duration))
    }

    /// Moves vertically to `y`, keeping the current `x`.
    pub fn move_to_y(&self, y: i32, duration: Duration) -> Result<(), InputError> {
        self.perform("move_to_y", |b| b.move_to_axes(None, Some(y), duration))
    }

    /// Moves the cursor by `(dx, dy)` pixels from its current position.
    pub fn move_rel(&self, dx: i32, dy: i32, duration: Duration) -> Result<(), InputError> {
        self.perform("move_rel", |b| b.move_rel(dx, dy, duration))
    }

    /// Sends one relative move of `(dx, dy)` raw mickeys.
    ///
    /// Games that read raw mouse input see this as physical movement.  When
    /// `disable_mouse_acceleration` is set, OS acceleration is turned off for
    /// the duration of the call so the distance is exact.
    pub fn move_raw(&self, dx: i32, dy: i32) -> Result<(), InputError> {
        // Checked here as well as in `perform` so a fail-safe trigger never
        // touches the acceleration setting.
        self.fail_safe_check()?;
        let _guard = if self.settings.disable_mouse_acceleration {
            Some(AccelerationGuard::engage(self.desktop.as_ref())?)
        } else {
            None
        };
        self.perform("move_raw", |b| {
            b.move_raw(dx, dy);
            Ok(())
        })
    }

    /// Presses `button`, moving to `target` first if given.
    pub fn mouse_down(
        &self,
        target: Option<(i32, i32)>,
        button: MouseButton,
    ) -> Result<(), InputError> {
        self.perform("mouse_down", |b| b.button_at(target, button, true))
    }

    /// Releases `button`, moving to `target` first if given.
    pub fn mouse_up(
        &self,
        target: Option<(i32, i32)>,
        button: MouseButton,
    ) -> Result<(), InputError> {
        self.perform("mouse_up", |b| b.button_at(target, button, false))
    }

    /// Clicks `button` `clicks` times, `interval` apart, optionally moving to
    /// `target` first.
    ///
    /// # Errors
    ///
    /// [`InputError::InvalidArgument`] if `clicks` is zero.
    pub fn click(
        &self,
        target: Option<(i32, i32)>,
        button: MouseButton,
        clicks: u32,
        interval: Duration,
    ) -> Result<(), InputError> {
        self.perform("click", |b| b.click(target, button, clicks, interval))
    }

    pub fn left_click(&self, target: Option<(i32, i32)>) -> Result<(), InputError> {
        self.click(target, MouseButton::Left, 1, Duration::ZERO)
    }

    pub fn right_click(&self, target: Option<(i32, i32)>) -> Result<(), InputError> {
        self.click(target, MouseButton::Right, 1, Duration::ZERO)
    }

    pub fn middle_click(&self, target: Option<(i32, i32)>) -> Result<(), InputError> {
        self.click(target, MouseButton::Middle, 1, Duration::ZERO)
    }

    pub fn double_click(
        &self,
        target: Option<(i32, i32)>,
        button: MouseButton,
    ) -> Result<(), InputError> {
        self.click(target, button, 2, Duration::ZERO)
    }

    pub fn triple_click(
        &self,
        target: Option<(i32, i32)>,
        button: MouseButton,
    ) -> Result<(), InputError> {
        self.click(target, button, 3, Duration::ZERO)
    }

    /// Scrolls the vertical wheel `amount` notches; positive is up.
    pub fn scroll(&self, amount: i32, target: Option<(i32, i32)>) -> Result<(), InputError> {
        self.perform("scroll", |b| b.scroll(amount, target))
    }

    /// Scrolls the horizontal wheel `amount` notches; positive is right.
    pub fn hscroll(&self, amount: i32, target: Option<(i32, i32)>) -> Result<(), InputError> {
        self.perform("hscroll", |b| b.hscroll(amount, target))
    }

    /// Presses `button`, moves to `(x, y)` over `duration`, and releases.
    pub fn drag_to(
        &self,
        x: i32,
        y: i32,
        button: MouseButton,
        duration: Duration,
    ) -> Result<(), InputError> {
        self.perform("drag_to", |b| b.drag_to(x, y, button, duration))
    }

    /// Drags by `(dx, dy)` pixels from the current position.
    pub fn drag_rel(
        &self,
        dx: i32,
        dy: i32,
        button: MouseButton,
        duration: Duration,
    ) -> Result<(), InputError> {
        self.perform("drag_rel", |b| {
            let (x, y) = b.cursor();
            b.drag_to(x.saturating_add(dx), y.saturating_add(dy), button, duration)
        })
    }
}
