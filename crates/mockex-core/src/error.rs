//! Shared error type across mockex crates.

use thiserror::Error;

/// How far an error is allowed to propagate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    /// Startup cannot continue (bad config, listener failure).
    Fatal,
    /// Affects a single descriptor; the rest of the simulation continues.
    Recoverable,
}

impl ErrorClass {
    /// String representation used in log fields.
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorClass::Fatal => "FATAL",
            ErrorClass::Recoverable => "RECOVERABLE",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, MockexError>;

/// Unified error type used by core and exporter.
#[derive(Debug, Error)]
pub enum MockexError {
    #[error("config: {0}")]
    Config(String),
    #[error("unsupported series kind: {0}")]
    UnsupportedKind(String),
    #[error("invalid name: {0}")]
    InvalidName(String),
    #[error("invalid value for {name}: {value}")]
    InvalidValue { name: String, value: f64 },
    #[error("series {name} already registered as {existing}, cannot register as {requested}")]
    KindConflict {
        name: String,
        existing: &'static str,
        requested: &'static str,
    },
    #[error("duplicate series: {0}")]
    DuplicateSeries(String),
    #[error("internal: {0}")]
    Internal(String),
}

impl MockexError {
    /// Classify the error for propagation decisions.
    pub fn class(&self) -> ErrorClass {
        match self {
            MockexError::Config(_) | MockexError::Internal(_) => ErrorClass::Fatal,
            MockexError::UnsupportedKind(_)
            | MockexError::InvalidName(_)
            | MockexError::InvalidValue { .. }
            | MockexError::KindConflict { .. }
            | MockexError::DuplicateSeries(_) => ErrorClass::Recoverable,
        }
    }
}
