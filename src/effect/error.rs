//! Error types for deferred execution.
//!
//! Two kinds of failure live here, and neither is a domain failure:
//!
//! - [`Fault`]: a panic caught by [`TaskEither::from_try`](super::TaskEither::from_try)
//!   and turned into ordinary failure data.
//! - [`ExecutionError`]: the substrate could not deliver a scheduled
//!   computation's value, because the job panicked or was dropped unrun.
//!
//! Domain failures are plain `E` values carried in
//! [`Either::Left`](crate::control::Either::Left).

use std::any::Any;
use std::error::Error;
use std::fmt;

/// A panic captured and converted into a value.
///
/// Only the panic message survives; payloads that are neither `&str` nor
/// `String` are reported as `"Unknown panic"`. To keep such a payload, use
/// [`TaskEither::from_try_with`](super::TaskEither::from_try_with).
///
/// # Examples
///
/// ```rust
/// use taskwell::effect::Fault;
///
/// let fault = Fault::new("division by zero");
/// assert_eq!(fault.to_string(), "fault: division by zero");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Fault {
    message: String,
}

impl Fault {
    /// Creates a fault with the given message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Extracts the message from a panic payload.
    pub fn from_panic(payload: &(dyn Any + Send)) -> Self {
        let message = if let Some(message) = payload.downcast_ref::<&str>() {
            (*message).to_string()
        } else if let Some(message) = payload.downcast_ref::<String>() {
            message.clone()
        } else {
            "Unknown panic".to_string()
        };
        Self { message }
    }

    /// The panic message.
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for Fault {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "fault: {}", self.message)
    }
}

impl Error for Fault {}

/// A scheduled computation did not hand back its value.
pub enum ExecutionError {
    /// The scheduler dropped the job before it ran to completion.
    Cancelled,

    /// The job panicked; the original payload is kept so it can be
    /// re-raised with [`std::panic::resume_unwind`].
    Panicked(Box<dyn Any + Send + 'static>),
}

impl ExecutionError {
    /// Returns `true` for [`ExecutionError::Cancelled`].
    pub const fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }

    /// Converts a captured panic into a [`Fault`].
    ///
    /// Returns `None` for [`ExecutionError::Cancelled`].
    pub fn fault(&self) -> Option<Fault> {
        match self {
            Self::Cancelled => None,
            Self::Panicked(payload) => Some(Fault::from_panic(payload.as_ref())),
        }
    }
}

impl fmt::Debug for ExecutionError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cancelled => formatter.write_str("Cancelled"),
            Self::Panicked(payload) => formatter
                .debug_tuple("Panicked")
                .field(&Fault::from_panic(payload.as_ref()).message)
                .finish(),
        }
    }
}

impl fmt::Display for ExecutionError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cancelled => write!(
                formatter,
                "scheduled task was dropped by its scheduler before completion"
            ),
            Self::Panicked(payload) => write!(
                formatter,
                "scheduled task panicked: {}",
                Fault::from_panic(payload.as_ref()).message
            ),
        }
    }
}

impl Error for ExecutionError {}
