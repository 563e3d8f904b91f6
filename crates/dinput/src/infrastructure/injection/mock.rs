//! Recording gateway for tests and dry runs.
//!
//! The `RecordingGateway` replaces `SendInput` with in-memory recording.
//! Every batch passed to `inject` is pushed into a `Mutex<Vec<...>>` so that
//! test assertions can inspect exactly what was injected, in what order and
//! in which batch.
//!
//! # Failure simulation
//!
//! - `should_fail` makes every call return `InjectionError::Platform`.
//! - `accept_limit` makes the gateway insert at most that many events per
//!   call and report `InjectionError::Partial` for the rest, mirroring a
//!   `SendInput` that returns less than it was given.

use std::sync::{Mutex, PoisonError};

use dinput_core::InputEvent;

use crate::application::inject::{InjectionError, InputGateway};

/// A gateway that records batches without performing OS calls.
#[derive(Debug, Default)]
pub struct RecordingGateway {
    recorded: Mutex<Vec<Vec<InputEvent>>>,
    /// When `true`, every call fails and records nothing.
    pub should_fail: bool,
    /// Maximum events inserted per call; `None` accepts everything.
    pub accept_limit: Option<usize>,
}

impl RecordingGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// A gateway whose every call fails with `InjectionError::Platform`.
    pub fn failing() -> Self {
        Self {
            should_fail: true,
            ..Self::default()
        }
    }

    /// A gateway that inserts at most `limit` events per call.
    pub fn partial(limit: usize) -> Self {
        Self {
            accept_limit: Some(limit),
            ..Self::default()
        }
    }

    /// Every recorded batch, in submission order.
    pub fn batches(&self) -> Vec<Vec<InputEvent>> {
        self.recorded
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Every recorded event, flattened across batches.
    pub fn events(&self) -> Vec<InputEvent> {
        self.batches().into_iter().flatten().collect()
    }

    /// Forgets everything recorded so far.
    pub fn clear(&self) {
        self.recorded
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

impl InputGateway for RecordingGateway {
    fn inject(&self, events: &[InputEvent]) -> Result<(), InjectionError> {
        if self.should_fail {
            return Err(InjectionError::Platform("mock failure".into()));
        }
        if events.is_empty() {
            return Ok(());
        }
        let inserted = self
            .accept_limit
            .map_or(events.len(), |limit| limit.min(events.len()));
        if inserted > 0 {
            self.recorded
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .push(events[..inserted].to_vec());
        }
        if inserted < events.len() {
            return Err(InjectionError::Partial {
                submitted: events.len(),
                inserted,
            });
        }
        Ok(())
    }
}
