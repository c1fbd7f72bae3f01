//! Error types for the scanning engine.

use thiserror::Error;

/// Result type alias for scan operations.
pub type Result<T> = std::result::Result<T, ScanError>;

/// Fatal errors raised before any network activity starts.
///
/// Per-connection failures are never reported through this type; they are
/// recorded on the [`ScanOutcome`](crate::types::ScanOutcome) instead.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScanError {
    /// A port token could not be parsed or is out of range.
    #[error("Invalid port {token:?}: {reason}")]
    InvalidPortSpec { token: String, reason: String },

    /// Any other invalid configuration value.
    #[error("Configuration error: {0}")]
    InvalidConfig(String),
}
