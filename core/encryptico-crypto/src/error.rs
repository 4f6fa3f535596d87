//! Error types for the key derivation layer.

use thiserror::Error;

/// Result type for crypto operations.
pub type CryptoResult<T> = Result<T, CryptoError>;

/// Errors that can occur while deriving key material.
#[derive(Debug, Error)]
pub enum CryptoError {
    /// The iteration count was zero.
    #[error("invalid iteration count: {0} (must be at least 1)")]
    InvalidIterations(u32),
}
