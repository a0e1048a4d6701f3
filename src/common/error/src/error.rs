//! Core error types for tabula.

use thiserror::Error;

/// Result type alias using `TabulaError`.
pub type TabulaResult<T> = std::result::Result<T, TabulaError>;

/// Error type for expression building, evaluation, and axis selection.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum TabulaError {
    /// Type mismatch or an argument that cannot be converted.
    #[error("TypeError: {0}")]
    TypeError(String),

    /// Invalid value provided.
    #[error("ValueError: {0}")]
    ValueError(String),

    /// Label or key lookup failed.
    #[error("KeyError: {0}")]
    KeyError(String),

    /// Target object has no such attribute or method.
    #[error("AttributeError: {0}")]
    AttributeError(String),

    /// Legal call used in a context it does not support.
    #[error("UsageError: {0}")]
    UsageError(String),

    /// Internal error (bug in tabula).
    #[error("InternalError: {0}")]
    InternalError(String),

    /// Invalid regular expression in a label predicate.
    #[error("RegexError: {0}")]
    RegexError(#[from] regex::Error),
}

impl TabulaError {
    /// Create a new `TypeError`.
    pub fn type_error<S: Into<String>>(msg: S) -> Self {
        Self::TypeError(msg.into())
    }

    /// Create a new `ValueError`.
    pub fn value_error<S: Into<String>>(msg: S) -> Self {
        Self::ValueError(msg.into())
    }

    /// Create a new `KeyError`.
    pub fn key_error<S: Into<String>>(msg: S) -> Self {
        Self::KeyError(msg.into())
    }

    /// Create a new `AttributeError`.
    pub fn attribute_error<S: Into<String>>(msg: S) -> Self {
        Self::AttributeError(msg.into())
    }

    /// Create a new `UsageError`.
    pub fn usage<S: Into<String>>(msg: S) -> Self {
        Self::UsageError(msg.into())
    }

    /// Create a new `InternalError`.
    pub fn internal<S: Into<String>>(msg: S) -> Self {
        Self::InternalError(msg.into())
    }

    /// Whether this error came from a failed label or key lookup.
    pub const fn is_key_error(&self) -> bool {
        matches!(self, Self::KeyError(_))
    }
}

/// Ensure a condition holds, returning the named variant (a `ValueError`
/// by default) if not.
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $variant:ident: $($msg:tt)*) => {
        if !$cond {
            return Err($crate::TabulaError::$variant(format!($($msg)*)));
        }
    };
    ($cond:expr, $msg:expr) => {
        if !$cond {
            return Err($crate::TabulaError::ValueError($msg.to_string()));
        }
    };
}

/// Return early with a `ValueError`.
#[macro_export]
macro_rules! value_err {
    ($($arg:tt)*) => {
        return Err($crate::TabulaError::ValueError(format!($($arg)*)))
    };
}

/// Return early with a `TypeError`.
#[macro_export]
macro_rules! type_err {
    ($($arg:tt)*) => {
        return Err($crate::TabulaError::TypeError(format!($($arg)*)))
    };
}
