//! Error types for the non-realtime plugin surface.
//!
//! The realtime paths never produce errors: invalid indices no-op, malformed
//! payloads are dropped at emission time, and sink backpressure is absorbed
//! by the still-dirty/retry-next-block design.

use std::fmt;

/// Errors from the non-realtime lifecycle surface.
#[derive(Debug)]
pub enum PluginError {
    /// State blob serialization/deserialization error.
    StateError(String),
}

impl fmt::Display for PluginError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::StateError(msg) => write!(f, "State error: {}", msg),
        }
    }
}

impl std::error::Error for PluginError {}

/// Result type for plugin operations.
pub type PluginResult<T> = Result<T, PluginError>;
