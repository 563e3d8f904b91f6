//! Translation of high-level input calls into ordered event sequences.
//!
//! A call such as "double-click at (100, 150)" becomes a list of [`Step`]s:
//! one absolute move, then button down/up pairs separated by sleeps.  The
//! [`SequenceBuilder`] produces that list without touching the OS, so every
//! key name and coordinate is validated before the first event is injected.

use std::time::Duration;

use thiserror::Error;

use super::{InputEvent, KeyCode, MouseButton, WHEEL_DELTA};
use crate::domain::desktop::{CoordinateError, ScreenRegion};
use crate::keymap::{KeyError, KeyMapper};
use crate::settings::Settings;

/// Error type for sequence building.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SequenceError {
    #[error("unknown key name: {0:?}")]
    UnknownKey(String),

    #[error("character {0:?} cannot be typed with a scan code")]
    UnmappedChar(char),

    #[error("invalid raw scan code: {0:#06x}")]
    InvalidScanCode(u16),

    #[error("point ({x}, {y}) is outside the screen")]
    OutOfBounds { x: i32, y: i32 },

    #[error("screen region is empty ({width}x{height})")]
    EmptyRegion { width: u32, height: u32 },

    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

impl From<KeyError> for SequenceError {
    fn from(err: KeyError) -> Self {
        match err {
            KeyError::UnknownKey(name) => SequenceError::UnknownKey(name),
            KeyError::UnmappedChar(c) => SequenceError::UnmappedChar(c),
            KeyError::InvalidScanCode(raw) => SequenceError::InvalidScanCode(raw),
        }
    }
}

impl From<CoordinateError> for SequenceError {
    fn from(err: CoordinateError) -> Self {
        match err {
            CoordinateError::OutOfBounds { x, y } => SequenceError::OutOfBounds { x, y },
            CoordinateError::EmptyRegion { width, height } => {
                SequenceError::EmptyRegion { width, height }
            }
        }
    }
}

// ── EventSequence ─────────────────────────────────────────────────────────────

/// One element of an [`EventSequence`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Event(InputEvent),
    Sleep(Duration),
}

/// An ordered list of events and the sleeps between them.
///
/// Zero-length sleeps are dropped and adjacent sleeps are merged, so a
/// sequence never contains two consecutive [`Step::Sleep`]s.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventSequence {
    steps: Vec<Step>,
}

impl EventSequence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an event.
    pub fn push_event(&mut self, event: InputEvent) {
        self.steps.push(Step::Event(event));
    }

    /// Appends a sleep, merging it into a preceding sleep if there is one.
    pub fn sleep(&mut self, duration: Duration) {
        if duration.is_zero() {
            return;
        }
        if let Some(Step::Sleep(previous)) = self.steps.last_mut() {
            *previous += duration;
            return;
        }
        self.steps.push(Step::Sleep(duration));
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// Returns only the events, in order.
    pub fn events(&self) -> impl Iterator<Item = &InputEvent> + '_ {
        self.steps.iter().filter_map(|step| match step {
            Step::Event(event) => Some(event),
            Step::Sleep(_) => None,
        })
    }

    pub fn event_count(&self) -> usize {
        self.events().count()
    }

    /// Sum of every sleep in the sequence.
    pub fn total_sleep(&self) -> Duration {
        self.steps
            .iter()
            .filter_map(|step| match step {
                Step::Sleep(d) => Some(*d),
                Step::Event(_) => None,
            })
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

// ── SequenceBuilder ───────────────────────────────────────────────────────────

/// One key tap, optionally wrapped in a shift press.
#[derive(Debug, Clone, Copy)]
struct Tap {
    down: InputEvent,
    shift: Option<KeyCode>,
}

impl Tap {
    fn plain(down: InputEvent) -> Self {
        Self { down, shift: None }
    }
}

/// Builds the [`EventSequence`] for one public call.
///
/// The builder tracks where the cursor will be after each move so that
/// chained operations (move, then click, then drag) interpolate from the
/// right place.  It never reads the real cursor; the caller supplies the
/// starting position.
pub struct SequenceBuilder<'a> {
    settings: &'a Settings,
    space: ScreenRegion,
    cursor: (i32, i32),
    seq: EventSequence,
}

impl<'a> SequenceBuilder<'a> {
    /// Creates a builder over `space` with the cursor starting at `cursor`.
    pub fn new(settings: &'a Settings, space: ScreenRegion, cursor: (i32, i32)) -> Self {
        Self {
            settings,
            space,
            cursor,
            seq: EventSequence::new(),
        }
    }

    /// Position the cursor will have once the steps built so far have run.
    pub fn cursor(&self) -> (i32, i32) {
        self.cursor
    }

    /// Consumes the builder and returns the sequence.
    pub fn finish(self) -> EventSequence {
        tracing::trace!(
            events = self.seq.event_count(),
            sleep_ms = self.seq.total_sleep().as_millis() as u64,
            "sequence built"
        );
        self.seq
    }

    // ── Mouse ─────────────────────────────────────────────────────────────────

    /// Moves the pointer to the pixel `(x, y)`.
    ///
    /// Durations shorter than `minimum_duration` produce a single absolute
    /// move.  Longer durations interpolate linearly, one step per pixel of the
    /// longer axis, reduced so that no step sleeps less than `minimum_sleep`.
    ///
    /// # Errors
    ///
    /// [`SequenceError::OutOfBounds`] when `require_on_screen` is set and the
    /// target is outside the coordinate space, or
    /// [`SequenceError::EmptyRegion`] if the space has no area.
    pub fn move_to(&mut self, x: i32, y: i32, duration: Duration) -> Result<(), SequenceError> {
        let target = self.on_screen_target(x, y)?;
        let (cx, cy) = self.cursor;
        let (dx, dy) = (target.0 - cx, target.1 - cy);
        let distance = dx.unsigned_abs().max(dy.unsigned_abs());

        if duration.is_zero() || duration < self.settings.minimum_duration || distance == 0 {
            self.push_absolute_move(target)?;
            self.cursor = target;
            return Ok(());
        }

        let steps = self.interpolation_steps(distance, duration);
        let step_sleep = duration / steps;
        let mut last = self.cursor;
        let mut emitted = false;
        for i in 1..=steps {
            let t = f64::from(i) / f64::from(steps);
            let point = (
                cx + (f64::from(dx) * t).round() as i32,
                cy + (f64::from(dy) * t).round() as i32,
            );
            if point == last {
                continue;
            }
            if emitted {
                self.seq.sleep(step_sleep);
            }
            self.push_absolute_move(point)?;
            last = point;
            emitted = true;
        }
        self.cursor = target;
        Ok(())
    }

    /// [`SequenceBuilder::move_to`] where an omitted axis keeps the tracked
    /// cursor coordinate.
    pub fn move_to_axes(
        &mut self,
        x: Option<i32>,
        y: Option<i32>,
        duration: Duration,
    ) -> Result<(), SequenceError> {
        let (cx, cy) = self.cursor;
        self.move_to(x.unwrap_or(cx), y.unwrap_or(cy), duration)
    }

    /// Moves the pointer by `(dx, dy)` pixels from its tracked position.
    pub fn move_rel(&mut self, dx: i32, dy: i32, duration: Duration) -> Result<(), SequenceError> {
        let (cx, cy) = self.cursor;
        self.move_to(cx.saturating_add(dx), cy.saturating_add(dy), duration)
    }

    /// Emits one relative move of `(dx, dy)` raw mickeys.
    ///
    /// The OS applies pointer acceleration to relative moves, so the tracked
    /// cursor is only an estimate afterwards.
    pub fn move_raw(&mut self, dx: i32, dy: i32) {
        self.seq.push_event(InputEvent::MouseMove {
            x: dx,
            y: dy,
            absolute: false,
            virtual_desk: false,
        });
        self.cursor = (
            self.cursor.0.saturating_add(dx),
            self.cursor.1.saturating_add(dy),
        );
    }

    /// Emits a single button press or release.
    pub fn button(&mut self, button: MouseButton, down: bool) {
        let button = button.resolve(self.settings.primary_button_swapped);
        self.seq.push_event(InputEvent::MouseButton { button, down });
    }

    /// [`SequenceBuilder::button`] after an instant move to `target`, if given.
    pub fn button_at(
        &mut self,
        target: Option<(i32, i32)>,
        button: MouseButton,
        down: bool,
    ) -> Result<(), SequenceError> {
        if let Some((x, y)) = target {
            self.move_to(x, y, Duration::ZERO)?;
        }
        self.button(button, down);
        Ok(())
    }

    /// Clicks `button` `clicks` times, optionally moving to `target` first.
    ///
    /// # Errors
    ///
    /// [`SequenceError::InvalidArgument`] if `clicks` is zero, plus any error
    /// from [`SequenceBuilder::move_to`].
    pub fn click(
        &mut self,
        target: Option<(i32, i32)>,
        button: MouseButton,
        clicks: u32,
        interval: Duration,
    ) -> Result<(), SequenceError> {
        if clicks == 0 {
            return Err(SequenceError::InvalidArgument(
                "clicks must be at least 1".to_string(),
            ));
        }
        if let Some((x, y)) = target {
            self.move_to(x, y, Duration::ZERO)?;
        }
        for i in 0..clicks {
            if i > 0 {
                self.seq.sleep(interval);
            }
            self.button(button, true);
            self.seq.sleep(self.settings.minimum_sleep);
            self.button(button, false);
        }
        Ok(())
    }

    /// Rotates the vertical wheel by `amount` notches; positive scrolls up.
    pub fn scroll(&mut self, amount: i32, target: Option<(i32, i32)>) -> Result<(), SequenceError> {
        self.wheel(0, amount, target)
    }

    /// Rotates the horizontal wheel by `amount` notches; positive scrolls right.
    pub fn hscroll(&mut self, amount: i32, target: Option<(i32, i32)>) -> Result<(), SequenceError> {
        self.wheel(amount, 0, target)
    }

    fn wheel(
        &mut self,
        notches_x: i32,
        notches_y: i32,
        target: Option<(i32, i32)>,
    ) -> Result<(), SequenceError> {
        if let Some((x, y)) = target {
            self.move_to(x, y, Duration::ZERO)?;
        }
        if notches_x == 0 && notches_y == 0 {
            return Ok(());
        }
        self.seq.push_event(InputEvent::MouseWheel {
            delta_x: notches_x.saturating_mul(WHEEL_DELTA),
            delta_y: notches_y.saturating_mul(WHEEL_DELTA),
        });
        Ok(())
    }

    /// Presses `button`, moves to `(x, y)` over `duration`, and releases it.
    pub fn drag_to(
        &mut self,
        x: i32,
        y: i32,
        button: MouseButton,
        duration: Duration,
    ) -> Result<(), SequenceError> {
        // Validate the target before emitting the press.
        self.on_screen_target(x, y)?;
        self.button(button, true);
        self.move_to(x, y, duration)?;
        self.button(button, false);
        Ok(())
    }

    // ── Keyboard ──────────────────────────────────────────────────────────────

    /// Emits a single scan-code key press or release.
    pub fn key(&mut self, key: KeyCode, down: bool) {
        self.seq.push_event(InputEvent::Key { key, down });
    }

    /// Taps every key in `keys`, `presses` times, sleeping `interval` after
    /// each round.
    pub fn press(
        &mut self,
        keys: &[KeyCode],
        presses: u32,
        interval: Duration,
    ) -> Result<(), SequenceError> {
        let taps: Vec<Tap> = keys
            .iter()
            .map(|&key| Tap::plain(InputEvent::Key { key, down: true }))
            .collect();
        self.tap_rounds(&taps, presses, interval)
    }

    /// [`SequenceBuilder::press`] for key names.
    ///
    /// Single characters that need shift (`"A"`, `"@"`) are wrapped in a
    /// shift press when `auto_shift` is set; otherwise they tap their
    /// unshifted key.
    pub fn press_names(
        &mut self,
        names: &[&str],
        presses: u32,
        interval: Duration,
    ) -> Result<(), SequenceError> {
        let shift = self.shift_key()?;
        let taps = names
            .iter()
            .map(|name| -> Result<Tap, SequenceError> {
                let (descriptor, needs_shift) = KeyMapper::resolve_press(name)?;
                Ok(Tap {
                    down: InputEvent::Key {
                        key: descriptor.key_code(),
                        down: true,
                    },
                    shift: (needs_shift && self.settings.auto_shift).then_some(shift),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        self.tap_rounds(&taps, presses, interval)
    }

    /// Presses `keys` in order, waits `wait`, then releases them in reverse.
    ///
    /// `interval` is slept between consecutive presses and between
    /// consecutive releases.
    pub fn chord(
        &mut self,
        keys: &[KeyCode],
        interval: Duration,
        wait: Duration,
    ) -> Result<(), SequenceError> {
        let downs: Vec<InputEvent> = keys
            .iter()
            .map(|&key| InputEvent::Key { key, down: true })
            .collect();
        self.chord_events(&downs, interval, wait)
    }

    /// [`SequenceBuilder::chord`] for key names.
    ///
    /// With `auto_shift` set, shift is pressed right before a single
    /// character that needs it (`"ctrl", "A"` is ctrl, shift, a) unless shift
    /// is already part of the chord.  Releases stay in reverse order.
    pub fn chord_names(
        &mut self,
        names: &[&str],
        interval: Duration,
        wait: Duration,
    ) -> Result<(), SequenceError> {
        let shift = self.shift_key()?;
        let mut keys: Vec<KeyCode> = Vec::with_capacity(names.len() + 1);
        for name in names {
            let (descriptor, needs_shift) = KeyMapper::resolve_press(name)?;
            let key = descriptor.key_code();
            if needs_shift && self.settings.auto_shift && !keys.contains(&shift) {
                keys.push(shift);
            }
            keys.push(key);
        }
        self.chord(&keys, interval, wait)
    }

    /// Types `text` through the US-layout scan-code table.
    ///
    /// With `auto_shift` set, characters that need shift are wrapped in a
    /// shift press and release.  Without it they type their unshifted key.
    ///
    /// # Errors
    ///
    /// [`SequenceError::UnmappedChar`] for the first character with no key;
    /// nothing is emitted in that case.
    pub fn type_text(&mut self, text: &str, interval: Duration) -> Result<(), SequenceError> {
        let shift = self.shift_key()?;
        let mut taps = Vec::with_capacity(text.len());
        for c in text.chars() {
            let (descriptor, needs_shift) = KeyMapper::char_to_key(c)?;
            taps.push(Tap {
                down: InputEvent::Key {
                    key: descriptor.key_code(),
                    down: true,
                },
                shift: (needs_shift && self.settings.auto_shift).then_some(shift),
            });
        }
        for tap in &taps {
            self.push_tap(tap);
            self.seq.sleep(interval);
        }
        Ok(())
    }

    // ── Unicode ───────────────────────────────────────────────────────────────

    /// Emits a single unicode character press or release.
    pub fn unicode(&mut self, ch: char, down: bool) {
        self.seq.push_event(InputEvent::Unicode { ch, down });
    }

    /// Unicode counterpart of [`SequenceBuilder::press`].
    pub fn unicode_press(
        &mut self,
        chars: &[char],
        presses: u32,
        interval: Duration,
    ) -> Result<(), SequenceError> {
        let taps: Vec<Tap> = chars
            .iter()
            .map(|&ch| Tap::plain(InputEvent::Unicode { ch, down: true }))
            .collect();
        self.tap_rounds(&taps, presses, interval)
    }

    /// Unicode counterpart of [`SequenceBuilder::chord`].
    pub fn unicode_chord(
        &mut self,
        chars: &[char],
        interval: Duration,
        wait: Duration,
    ) -> Result<(), SequenceError> {
        let downs: Vec<InputEvent> = chars
            .iter()
            .map(|&ch| InputEvent::Unicode { ch, down: true })
            .collect();
        self.chord_events(&downs, interval, wait)
    }

    /// Types every character of `text` as a unicode press, `interval` apart.
    /// Works for any character, independent of the keyboard layout.
    pub fn unicode_text(&mut self, text: &str, interval: Duration) {
        for ch in text.chars() {
            self.unicode(ch, true);
            self.seq.sleep(self.settings.minimum_sleep);
            self.unicode(ch, false);
            self.seq.sleep(interval);
        }
    }

    // ── Internals ─────────────────────────────────────────────────────────────

    fn shift_key(&self) -> Result<KeyCode, SequenceError> {
        Ok(KeyMapper::lookup("shift")?.key_code())
    }

    /// Optional shift down, press, `minimum_sleep`, release, shift up.
    fn push_tap(&mut self, tap: &Tap) {
        if let Some(key) = tap.shift {
            self.seq.push_event(InputEvent::Key { key, down: true });
        }
        self.seq.push_event(tap.down);
        self.seq.sleep(self.settings.minimum_sleep);
        if let Some(up) = tap.down.release() {
            self.seq.push_event(up);
        }
        if let Some(key) = tap.shift {
            self.seq.push_event(InputEvent::Key { key, down: false });
        }
    }

    fn tap_rounds(
        &mut self,
        taps: &[Tap],
        presses: u32,
        interval: Duration,
    ) -> Result<(), SequenceError> {
        if taps.is_empty() {
            return Err(SequenceError::InvalidArgument(
                "at least one key is required".to_string(),
            ));
        }
        if presses == 0 {
            return Err(SequenceError::InvalidArgument(
                "presses must be at least 1".to_string(),
            ));
        }
        for _ in 0..presses {
            for tap in taps {
                self.push_tap(tap);
            }
            self.seq.sleep(interval);
        }
        Ok(())
    }

    fn chord_events(
        &mut self,
        downs: &[InputEvent],
        interval: Duration,
        wait: Duration,
    ) -> Result<(), SequenceError> {
        if downs.is_empty() {
            return Err(SequenceError::InvalidArgument(
                "a hotkey needs at least one key".to_string(),
            ));
        }
        for (i, down) in downs.iter().enumerate() {
            if i > 0 {
                self.seq.sleep(interval);
            }
            self.seq.push_event(*down);
        }
        self.seq.sleep(wait);
        for (i, down) in downs.iter().rev().enumerate() {
            if i > 0 {
                self.seq.sleep(interval);
            }
            if let Some(up) = down.release() {
                self.seq.push_event(up);
            }
        }
        Ok(())
    }

    /// Applies the on-screen policy: strict mode rejects, otherwise clamp.
    fn on_screen_target(&self, x: i32, y: i32) -> Result<(i32, i32), SequenceError> {
        if self.space.is_empty() {
            return Err(SequenceError::EmptyRegion {
                width: self.space.width,
                height: self.space.height,
            });
        }
        if self.settings.require_on_screen {
            self.space.require_contains(x, y)?;
            return Ok((x, y));
        }
        Ok((
            x.clamp(self.space.x, self.space.right() - 1),
            y.clamp(self.space.y, self.space.bottom() - 1),
        ))
    }

    fn push_absolute_move(&mut self, (x, y): (i32, i32)) -> Result<(), SequenceError> {
        let (nx, ny) = self.space.normalize(x, y)?;
        self.seq.push_event(InputEvent::MouseMove {
            x: nx,
            y: ny,
            absolute: true,
            virtual_desk: self.settings.virtual_resolution,
        });
        Ok(())
    }

    fn interpolation_steps(&self, distance: u32, duration: Duration) -> u32 {
        let minimum_sleep = self.settings.minimum_sleep;
        if minimum_sleep.is_zero() || duration / distance >= minimum_sleep {
            return distance;
        }
        let fitting = duration.as_nanos() / minimum_sleep.as_nanos();
        u32::try_from(fitting).unwrap_or(u32::MAX).clamp(1, distance)
    }

}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::PhysicalButton;

    fn screen() -> ScreenRegion {
        ScreenRegion::at_origin(1920, 1080)
    }

    fn key(name: &str) -> KeyCode {
        KeyMapper::lookup(name).unwrap().key_code()
    }

    fn key_events(seq: &EventSequence) -> Vec<(KeyCode, bool)> {
        seq.events()
            .filter_map(|e| match *e {
                InputEvent::Key { key, down } => Some((key, down)),
                _ => None,
            })
            .collect()
    }

    fn moves(seq: &EventSequence) -> Vec<(i32, i32)> {
        seq.events()
            .filter_map(|e| match *e {
                InputEvent::MouseMove { x, y, .. } => Some((x, y)),
                _ => None,
            })
            .collect()
    }

    // ── EventSequence ─────────────────────────────────────────────────────────

    #[test]
    fn test_sequence_drops_zero_sleeps_and_merges_adjacent() {
        let mut seq = EventSequence::new();
        seq.sleep(Duration::ZERO);
        assert!(seq.is_empty());

        seq.sleep(Duration::from_millis(10));
        seq.sleep(Duration::from_millis(5));
        assert_eq!(seq.steps(), &[Step::Sleep(Duration::from_millis(15))]);
    }

    // ── Moves ─────────────────────────────────────────────────────────────────

    #[test]
    fn test_move_to_with_zero_duration_emits_one_absolute_move() {
        // Arrange
        let settings = Settings::default();
        let mut builder = SequenceBuilder::new(&settings, screen(), (500, 500));

        // Act
        builder.move_to(100, 150, Duration::ZERO).unwrap();
        let seq = builder.finish();

        // Assert
        assert_eq!(seq.event_count(), 1);
        assert_eq!(
            seq.events().next(),
            Some(&InputEvent::MouseMove {
                x: 3413,
                y: 9102,
                absolute: true,
                virtual_desk: false
            })
        );
    }

    #[test]
    fn test_move_to_below_minimum_duration_is_instant() {
        let settings = Settings::default();
        let mut builder = SequenceBuilder::new(&settings, screen(), (0, 0));
        builder.move_to(800, 600, Duration::from_millis(99)).unwrap();
        assert_eq!(builder.finish().event_count(), 1);
    }

    #[test]
    fn test_move_to_interpolates_one_step_per_pixel_when_slow_enough() {
        // Arrange: 10 pixels over one second leaves 100 ms per step.
        let settings = Settings::default();
        let mut builder = SequenceBuilder::new(&settings, screen(), (100, 100));

        // Act
        builder.move_to(110, 100, Duration::from_secs(1)).unwrap();
        let seq = builder.finish();

        // Assert
        assert_eq!(seq.event_count(), 10);
        assert_eq!(seq.total_sleep(), Duration::from_millis(900));
        assert_eq!(moves(&seq).last(), Some(&screen().normalize(110, 100).unwrap()));
    }

    #[test]
    fn test_move_to_reduces_steps_to_respect_minimum_sleep() {
        // Arrange: 1000 pixels in one second with a 50 ms floor.
        let settings = Settings::default();
        let mut builder = SequenceBuilder::new(&settings, screen(), (0, 500));

        // Act
        builder.move_to(1000, 500, Duration::from_secs(1)).unwrap();
        let seq = builder.finish();

        // Assert
        assert_eq!(seq.event_count(), 20);
        for step in seq.steps() {
            if let Step::Sleep(d) = step {
                assert!(*d >= settings.minimum_sleep);
            }
        }
        assert_eq!(moves(&seq).last(), Some(&screen().normalize(1000, 500).unwrap()));
    }

    #[test]
    fn test_move_to_interpolation_has_no_consecutive_duplicates() {
        let settings = Settings {
            minimum_sleep: Duration::ZERO,
            ..Settings::default()
        };
        let mut builder = SequenceBuilder::new(&settings, screen(), (0, 0));
        builder.move_to(3, 40, Duration::from_secs(1)).unwrap();
        let points = moves(&builder.finish());
        for pair in points.windows(2) {
            assert_ne!(pair[0], pair[1]);
        }
    }

    #[test]
    fn test_move_to_clamps_off_screen_target_by_default() {
        let settings = Settings::default();
        let mut builder = SequenceBuilder::new(&settings, screen(), (0, 0));
        builder.move_to(5000, -20, Duration::ZERO).unwrap();
        assert_eq!(builder.cursor(), (1919, 0));
    }

    #[test]
    fn test_move_to_rejects_off_screen_target_in_strict_mode() {
        let settings = Settings {
            require_on_screen: true,
            ..Settings::default()
        };
        let mut builder = SequenceBuilder::new(&settings, screen(), (0, 0));
        let err = builder.move_to(5000, 10, Duration::ZERO).unwrap_err();
        assert_eq!(err, SequenceError::OutOfBounds { x: 5000, y: 10 });
        assert!(builder.finish().is_empty());
    }

    #[test]
    fn test_move_to_marks_virtual_desk_when_configured() {
        let settings = Settings {
            virtual_resolution: true,
            ..Settings::default()
        };
        let space = ScreenRegion::new(-1280, 0, 3200, 1080);
        let mut builder = SequenceBuilder::new(&settings, space, (0, 0));
        builder.move_to(-1280, 0, Duration::ZERO).unwrap();
        assert_eq!(
            builder.finish().events().next(),
            Some(&InputEvent::MouseMove {
                x: 0,
                y: 0,
                absolute: true,
                virtual_desk: true
            })
        );
    }

    #[test]
    fn test_move_raw_emits_relative_pixels() {
        let settings = Settings::default();
        let mut builder = SequenceBuilder::new(&settings, screen(), (10, 10));
        builder.move_raw(-5, 7);
        assert_eq!(builder.cursor(), (5, 17));
        assert_eq!(
            builder.finish().events().next(),
            Some(&InputEvent::MouseMove {
                x: -5,
                y: 7,
                absolute: false,
                virtual_desk: false
            })
        );
    }

    #[test]
    fn test_move_to_axes_keeps_omitted_axis() {
        let settings = Settings::default();
        let mut builder = SequenceBuilder::new(&settings, screen(), (300, 400));

        builder.move_to_axes(Some(900), None, Duration::ZERO).unwrap();
        assert_eq!(builder.cursor(), (900, 400));

        builder.move_to_axes(None, Some(20), Duration::ZERO).unwrap();
        assert_eq!(builder.cursor(), (900, 20));
    }

    // ── Clicks / wheel / drag ─────────────────────────────────────────────────

    #[test]
    fn test_button_at_target_moves_then_presses() {
        // Arrange
        let settings = Settings::default();
        let mut builder = SequenceBuilder::new(&settings, screen(), (0, 0));
        let target = screen().normalize(100, 150).unwrap();

        // Act
        builder
            .button_at(Some((100, 150)), MouseButton::Left, true)
            .unwrap();

        // Assert
        assert_eq!(
            builder.finish().steps(),
            &[
                Step::Event(InputEvent::MouseMove {
                    x: target.0,
                    y: target.1,
                    absolute: true,
                    virtual_desk: false
                }),
                Step::Event(InputEvent::MouseButton {
                    button: PhysicalButton::Left,
                    down: true
                }),
            ]
        );
    }

    #[test]
    fn test_button_at_off_screen_in_strict_mode_emits_nothing() {
        let settings = Settings {
            require_on_screen: true,
            ..Settings::default()
        };
        let mut builder = SequenceBuilder::new(&settings, screen(), (0, 0));
        assert!(builder
            .button_at(Some((-1, 0)), MouseButton::Left, false)
            .is_err());
        assert!(builder.finish().is_empty());
    }

    #[test]
    fn test_click_emits_down_then_up() {
        // Arrange
        let settings = Settings::default();
        let mut builder = SequenceBuilder::new(&settings, screen(), (0, 0));

        // Act
        builder
            .click(None, MouseButton::Primary, 1, Duration::ZERO)
            .unwrap();
        let seq = builder.finish();

        // Assert
        assert_eq!(
            seq.steps(),
            &[
                Step::Event(InputEvent::MouseButton {
                    button: PhysicalButton::Left,
                    down: true
                }),
                Step::Sleep(settings.minimum_sleep),
                Step::Event(InputEvent::MouseButton {
                    button: PhysicalButton::Left,
                    down: false
                }),
            ]
        );
    }

    #[test]
    fn test_click_with_swapped_buttons_uses_right() {
        let settings = Settings {
            primary_button_swapped: true,
            ..Settings::default()
        };
        let mut builder = SequenceBuilder::new(&settings, screen(), (0, 0));
        builder
            .click(None, MouseButton::Primary, 1, Duration::ZERO)
            .unwrap();
        assert!(builder.finish().events().all(|e| matches!(
            e,
            InputEvent::MouseButton {
                button: PhysicalButton::Right,
                ..
            }
        )));
    }

    #[test]
    fn test_double_click_at_target_moves_then_clicks_twice() {
        let settings = Settings::default();
        let mut builder = SequenceBuilder::new(&settings, screen(), (0, 0));
        builder
            .click(Some((200, 300)), MouseButton::Left, 2, Duration::from_millis(30))
            .unwrap();
        let seq = builder.finish();
        let events: Vec<_> = seq.events().copied().collect();
        assert_eq!(events.len(), 5);
        assert!(matches!(events[0], InputEvent::MouseMove { .. }));
        assert_eq!(events.iter().filter(|e| e.is_down()).count(), 2);
    }

    #[test]
    fn test_click_zero_times_is_invalid() {
        let settings = Settings::default();
        let mut builder = SequenceBuilder::new(&settings, screen(), (0, 0));
        let err = builder
            .click(None, MouseButton::Left, 0, Duration::ZERO)
            .unwrap_err();
        assert!(matches!(err, SequenceError::InvalidArgument(_)));
    }

    #[test]
    fn test_scroll_emits_single_wheel_event_in_notches() {
        let settings = Settings::default();
        let mut builder = SequenceBuilder::new(&settings, screen(), (0, 0));
        builder.scroll(-3, None).unwrap();
        assert_eq!(
            builder.finish().events().collect::<Vec<_>>(),
            vec![&InputEvent::MouseWheel {
                delta_x: 0,
                delta_y: -360
            }]
        );
    }

    #[test]
    fn test_hscroll_uses_horizontal_axis() {
        let settings = Settings::default();
        let mut builder = SequenceBuilder::new(&settings, screen(), (0, 0));
        builder.hscroll(2, None).unwrap();
        assert_eq!(
            builder.finish().events().next(),
            Some(&InputEvent::MouseWheel {
                delta_x: 240,
                delta_y: 0
            })
        );
    }

    #[test]
    fn test_scroll_zero_emits_no_wheel_event() {
        let settings = Settings::default();
        let mut builder = SequenceBuilder::new(&settings, screen(), (0, 0));
        builder.scroll(0, None).unwrap();
        assert!(builder.finish().is_empty());
    }

    #[test]
    fn test_drag_to_presses_moves_and_releases() {
        let settings = Settings::default();
        let mut builder = SequenceBuilder::new(&settings, screen(), (10, 10));
        builder
            .drag_to(400, 10, MouseButton::Left, Duration::ZERO)
            .unwrap();
        let events: Vec<_> = builder.finish().events().copied().collect();
        assert_eq!(events.len(), 3);
        assert!(events[0].is_down());
        assert!(matches!(events[1], InputEvent::MouseMove { .. }));
        assert_eq!(events[0].release(), Some(events[2]));
    }

    #[test]
    fn test_drag_to_off_screen_in_strict_mode_emits_nothing() {
        let settings = Settings {
            require_on_screen: true,
            ..Settings::default()
        };
        let mut builder = SequenceBuilder::new(&settings, screen(), (10, 10));
        assert!(builder
            .drag_to(4000, 10, MouseButton::Left, Duration::ZERO)
            .is_err());
        assert!(builder.finish().is_empty());
    }

    // ── Keyboard ──────────────────────────────────────────────────────────────

    #[test]
    fn test_press_repeats_each_key_per_round() {
        let settings = Settings::default();
        let mut builder = SequenceBuilder::new(&settings, screen(), (0, 0));
        builder
            .press(&[key("a"), key("b")], 2, Duration::from_millis(20))
            .unwrap();
        let a = key("a");
        let b = key("b");
        assert_eq!(
            key_events(&builder.finish()),
            vec![
                (a, true),
                (a, false),
                (b, true),
                (b, false),
                (a, true),
                (a, false),
                (b, true),
                (b, false),
            ]
        );
    }

    #[test]
    fn test_press_with_no_keys_is_invalid() {
        let settings = Settings::default();
        let mut builder = SequenceBuilder::new(&settings, screen(), (0, 0));
        assert!(matches!(
            builder.press(&[], 1, Duration::ZERO),
            Err(SequenceError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_chord_releases_in_reverse_order() {
        // Arrange
        let settings = Settings::default();
        let mut builder = SequenceBuilder::new(&settings, screen(), (0, 0));
        let ctrl = key("ctrl");
        let c = key("c");

        // Act
        builder
            .chord(&[ctrl, c], settings.minimum_sleep, Duration::ZERO)
            .unwrap();

        // Assert
        assert_eq!(
            key_events(&builder.finish()),
            vec![(ctrl, true), (c, true), (c, false), (ctrl, false)]
        );
    }

    #[test]
    fn test_press_names_wraps_uppercase_in_shift() {
        // Arrange
        let settings = Settings::default();
        let mut builder = SequenceBuilder::new(&settings, screen(), (0, 0));
        let shift = key("shift");
        let a = key("a");

        // Act
        builder.press_names(&["A"], 1, Duration::ZERO).unwrap();

        // Assert
        assert_eq!(
            key_events(&builder.finish()),
            vec![(shift, true), (a, true), (a, false), (shift, false)]
        );
    }

    #[test]
    fn test_press_names_types_shifted_symbol() {
        let settings = Settings::default();
        let mut builder = SequenceBuilder::new(&settings, screen(), (0, 0));
        let shift = key("shift");
        let two = key("2");

        builder.press_names(&["@"], 1, Duration::ZERO).unwrap();

        assert_eq!(
            key_events(&builder.finish()),
            vec![(shift, true), (two, true), (two, false), (shift, false)]
        );
    }

    #[test]
    fn test_press_names_without_auto_shift_taps_base_key() {
        let settings = Settings {
            auto_shift: false,
            ..Settings::default()
        };
        let mut builder = SequenceBuilder::new(&settings, screen(), (0, 0));
        let a = key("a");

        builder.press_names(&["A"], 1, Duration::ZERO).unwrap();

        assert_eq!(key_events(&builder.finish()), vec![(a, true), (a, false)]);
    }

    #[test]
    fn test_press_names_unknown_name_emits_nothing() {
        let settings = Settings::default();
        let mut builder = SequenceBuilder::new(&settings, screen(), (0, 0));
        let err = builder
            .press_names(&["a", "hyper"], 1, Duration::ZERO)
            .unwrap_err();
        assert_eq!(err, SequenceError::UnknownKey("hyper".to_string()));
        assert!(builder.finish().is_empty());
    }

    #[test]
    fn test_chord_names_inserts_shift_before_shifted_char() {
        // Arrange
        let settings = Settings::default();
        let mut builder = SequenceBuilder::new(&settings, screen(), (0, 0));
        let ctrl = key("ctrl");
        let shift = key("shift");
        let a = key("a");

        // Act
        builder
            .chord_names(&["ctrl", "A"], Duration::ZERO, Duration::ZERO)
            .unwrap();

        // Assert
        assert_eq!(
            key_events(&builder.finish()),
            vec![
                (ctrl, true),
                (shift, true),
                (a, true),
                (a, false),
                (shift, false),
                (ctrl, false),
            ]
        );
    }

    #[test]
    fn test_chord_names_does_not_press_shift_twice() {
        let settings = Settings::default();
        let mut builder = SequenceBuilder::new(&settings, screen(), (0, 0));
        let shift = key("shift");
        let a = key("a");

        builder
            .chord_names(&["shift", "A"], Duration::ZERO, Duration::ZERO)
            .unwrap();

        assert_eq!(
            key_events(&builder.finish()),
            vec![(shift, true), (a, true), (a, false), (shift, false)]
        );
    }

    #[test]
    fn test_chord_with_no_keys_is_invalid() {
        let settings = Settings::default();
        let mut builder = SequenceBuilder::new(&settings, screen(), (0, 0));
        assert!(builder.chord(&[], Duration::ZERO, Duration::ZERO).is_err());
    }

    #[test]
    fn test_type_text_wraps_uppercase_in_shift() {
        // Arrange
        let settings = Settings::default();
        let mut builder = SequenceBuilder::new(&settings, screen(), (0, 0));
        let shift = key("shift");
        let a = key("a");

        // Act
        builder.type_text("A", Duration::ZERO).unwrap();

        // Assert
        assert_eq!(
            key_events(&builder.finish()),
            vec![(shift, true), (a, true), (a, false), (shift, false)]
        );
    }

    #[test]
    fn test_type_text_without_auto_shift_types_base_key() {
        let settings = Settings {
            auto_shift: false,
            ..Settings::default()
        };
        let mut builder = SequenceBuilder::new(&settings, screen(), (0, 0));
        builder.type_text("!", Duration::ZERO).unwrap();
        let one = key("1");
        assert_eq!(key_events(&builder.finish()), vec![(one, true), (one, false)]);
    }

    #[test]
    fn test_type_text_unmapped_char_emits_nothing() {
        let settings = Settings::default();
        let mut builder = SequenceBuilder::new(&settings, screen(), (0, 0));
        let err = builder.type_text("ok é", Duration::ZERO).unwrap_err();
        assert_eq!(err, SequenceError::UnmappedChar('é'));
        assert!(builder.finish().is_empty());
    }

    #[test]
    fn test_type_text_sleeps_interval_after_each_char() {
        let settings = Settings {
            minimum_sleep: Duration::ZERO,
            ..Settings::default()
        };
        let mut builder = SequenceBuilder::new(&settings, screen(), (0, 0));
        builder.type_text("abc", Duration::from_millis(25)).unwrap();
        assert_eq!(builder.finish().total_sleep(), Duration::from_millis(75));
    }

    // ── Unicode ───────────────────────────────────────────────────────────────

    #[test]
    fn test_unicode_text_emits_down_up_per_char() {
        let settings = Settings::default();
        let mut builder = SequenceBuilder::new(&settings, screen(), (0, 0));
        builder.unicode_text("é€", Duration::ZERO);
        let events: Vec<_> = builder.finish().events().copied().collect();
        assert_eq!(
            events,
            vec![
                InputEvent::Unicode { ch: 'é', down: true },
                InputEvent::Unicode { ch: 'é', down: false },
                InputEvent::Unicode { ch: '€', down: true },
                InputEvent::Unicode { ch: '€', down: false },
            ]
        );
    }

    #[test]
    fn test_unicode_chord_releases_in_reverse_order() {
        let settings = Settings::default();
        let mut builder = SequenceBuilder::new(&settings, screen(), (0, 0));
        builder
            .unicode_chord(&['x', 'y'], Duration::ZERO, Duration::ZERO)
            .unwrap();
        let events: Vec<_> = builder.finish().events().copied().collect();
        assert_eq!(
            events,
            vec![
                InputEvent::Unicode { ch: 'x', down: true },
                InputEvent::Unicode { ch: 'y', down: true },
                InputEvent::Unicode { ch: 'y', down: false },
                InputEvent::Unicode { ch: 'x', down: false },
            ]
        );
    }
}
