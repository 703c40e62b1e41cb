//! Error types shared across the XPay crates.

use std::fmt;

use crate::proto::Status;

/// The gateway answered with a non-success status.
///
/// Carries the envelope's `status` block verbatim so callers can show the
/// server-provided message and field errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusError {
    /// Status code reported inside the envelope.
    pub code: u32,
    /// Human-readable message from the gateway.
    pub message: String,
    /// Individual error strings, in the order the gateway sent them.
    pub errors: Vec<String>,
}

impl StatusError {
    /// Creates a new status error.
    #[must_use]
    pub fn new(code: u32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            errors: Vec::new(),
        }
    }

    /// Sets the individual error strings.
    #[must_use]
    pub fn with_errors(mut self, errors: Vec<String>) -> Self {
        self.errors = errors;
        self
    }
}

impl From<Status> for StatusError {
    fn from(status: Status) -> Self {
        Self {
            code: status.code,
            message: status.message,
            errors: status.errors,
        }
    }
}

impl fmt::Display for StatusError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "gateway returned status {}: {}", self.code, self.message)?;
        if !self.errors.is_empty() {
            write!(f, " ({})", self.errors.join("; "))?;
        }
        Ok(())
    }
}

impl std::error::Error for StatusError {}

/// A string did not name a known variant of an SDK enum (mode, currency,
/// payment method).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownValueError {
    /// What was being parsed (e.g. `"SDK mode"`).
    pub kind: &'static str,
    /// The rejected input.
    pub input: String,
    /// Human-readable list of accepted values.
    pub expected: &'static str,
}

impl UnknownValueError {
    /// Creates a new unknown-value error.
    #[must_use]
    pub fn new(kind: &'static str, input: impl Into<String>, expected: &'static str) -> Self {
        Self {
            kind,
            input: input.into(),
            expected,
        }
    }
}

impl fmt::Display for UnknownValueError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown {} '{}' (expected {})",
            self.kind, self.input, self.expected
        )
    }
}

impl std::error::Error for UnknownValueError {}
