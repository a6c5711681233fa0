//! Unified error types for the termbridge workspace.
//!
//! The layer has exactly two failure kinds. Platform failures keep the
//! original [`std::io::Error`] so the OS error code and message reach the
//! caller untouched; caller mistakes are reported before any OS call is made.

use std::io;

use thiserror::Error;

/// Top-level error type shared across the workspace.
#[derive(Debug, Error)]
pub enum TermError {
    /// An underlying OS call failed or is not available on this backend.
    #[error("{call} failed: {source}")]
    Device {
        /// Name of the platform primitive that failed.
        call: &'static str,
        /// Underlying OS error, carried verbatim.
        source: io::Error,
    },

    /// A caller-supplied value is outside its documented domain.
    #[error("invalid argument: {message}")]
    InvalidArgument {
        /// Description of the rejected value.
        message: String,
    },
}

impl TermError {
    /// Wraps a failed OS call.
    #[must_use]
    pub const fn device(call: &'static str, source: io::Error) -> Self {
        Self::Device { call, source }
    }

    /// Builds an [`TermError::InvalidArgument`] from a message.
    #[must_use]
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Reports a primitive the current backend does not provide.
    #[must_use]
    pub fn unsupported(call: &'static str) -> Self {
        Self::Device {
            call,
            source: io::Error::new(
                io::ErrorKind::Unsupported,
                format!("{call} is not available on this platform"),
            ),
        }
    }

    /// Returns the raw OS error code, if this is a device error carrying one.
    #[must_use]
    pub fn raw_os_error(&self) -> Option<i32> {
        match self {
            Self::Device { source, .. } => source.raw_os_error(),
            Self::InvalidArgument { .. } => None,
        }
    }

    /// Returns whether this error reports a primitive missing on this backend.
    #[must_use]
    pub fn is_unsupported(&self) -> bool {
        matches!(self, Self::Device { source, .. } if source.kind() == io::ErrorKind::Unsupported)
    }
}

/// Convenience alias used throughout the workspace.
pub type Result<T> = std::result::Result<T, TermError>;
