//! Plays an [`EventSequence`] against an [`InputGateway`].
//!
//! Consecutive events with no sleep between them are submitted as a single
//! batch, so `SendInput` inserts them atomically with respect to other input.
//! Sleeps run between batches on the calling thread.

use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use dinput_core::{EventSequence, InputEvent, Step};
use tracing::trace;

use super::inject::{InjectionError, InputGateway};

/// Blocks the calling thread between batches.
pub trait Sleeper: Send + Sync {
    fn sleep(&self, duration: Duration);
}

/// The real sleeper: `std::thread::sleep`.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadSleeper;

impl Sleeper for ThreadSleeper {
    fn sleep(&self, duration: Duration) {
        if !duration.is_zero() {
            std::thread::sleep(duration);
        }
    }
}

/// A sleeper that records requested durations instead of blocking.
///
/// Used by tests to observe the schedule and by `--dry-run`.
#[derive(Debug, Default)]
pub struct RecordingSleeper {
    pub sleeps: Mutex<Vec<Duration>>,
}

impl RecordingSleeper {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sum of every recorded sleep.
    pub fn total(&self) -> Duration {
        self.sleeps
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .sum()
    }
}

impl Sleeper for RecordingSleeper {
    fn sleep(&self, duration: Duration) {
        self.sleeps
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(duration);
    }
}

/// Submits a sequence batch by batch.
pub struct Pacer<'a> {
    gateway: &'a dyn InputGateway,
    sleeper: &'a dyn Sleeper,
}

impl<'a> Pacer<'a> {
    pub fn new(gateway: &'a dyn InputGateway, sleeper: &'a dyn Sleeper) -> Self {
        Self { gateway, sleeper }
    }

    /// Injects every event of `sequence` in order.
    ///
    /// Returns the number of events injected.  Stops at the first failed
    /// batch; events already injected stay injected.
    ///
    /// # Errors
    ///
    /// Propagates the gateway's [`InjectionError`].
    pub fn play(&self, sequence: &EventSequence) -> Result<usize, InjectionError> {
        let mut batch: Vec<InputEvent> = Vec::new();
        let mut injected = 0;
        for step in sequence.steps() {
            match step {
                Step::Event(event) => batch.push(*event),
                Step::Sleep(duration) => {
                    injected += self.flush(&mut batch)?;
                    self.sleeper.sleep(*duration);
                }
            }
        }
        injected += self.flush(&mut batch)?;
        Ok(injected)
    }

    fn flush(&self, batch: &mut Vec<InputEvent>) -> Result<usize, InjectionError> {
        if batch.is_empty() {
            return Ok(0);
        }
        trace!(events = batch.len(), "injecting batch");
        self.gateway.inject(batch)?;
        let count = batch.len();
        batch.clear();
        Ok(count)
    }
}
