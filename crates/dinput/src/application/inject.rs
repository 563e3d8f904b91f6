//! The injection gateway seam.
//!
//! The application layer hands finished batches of [`InputEvent`]s to an
//! [`InputGateway`].  On Windows the gateway is `SendInputGateway`; tests and
//! dry runs use `RecordingGateway`.

use dinput_core::InputEvent;
use thiserror::Error;

/// Error type for event injection.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum InjectionError {
    /// The OS rejected the batch outright.
    #[error("platform error: {0}")]
    Platform(String),

    /// The OS inserted fewer events than were submitted, typically because
    /// another thread's input or UIPI blocked the rest.
    #[error("only {inserted} of {submitted} events were injected")]
    Partial { submitted: usize, inserted: usize },
}

/// Submits input events to the OS.
pub trait InputGateway: Send + Sync {
    /// Injects `events` in order as one batch.
    ///
    /// An empty slice is a no-op.  A partial insert is reported as
    /// [`InjectionError::Partial`] and never retried.
    fn inject(&self, events: &[InputEvent]) -> Result<(), InjectionError>;
}
