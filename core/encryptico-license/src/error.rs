//! Error types for the licensing module.

use encryptico_crypto::CryptoError;
use thiserror::Error;

/// Licensing-specific errors.
#[derive(Debug, Error)]
pub enum LicenseError {
    /// A constructor or operation received an unusable argument.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Invalid license key format.
    #[error("invalid license key format: {0}")]
    InvalidKeyFormat(String),

    /// Key derivation failed.
    #[error(transparent)]
    Crypto(#[from] CryptoError),

    /// License file written by an unknown format version.
    #[error("unsupported license file version {found} (expected {expected})")]
    UnsupportedVersion {
        /// Version found in the file.
        found: u32,
        /// Version this build understands.
        expected: u32,
    },

    /// Storage error.
    #[error("storage error: {0}")]
    Storage(String),

    /// I/O error while reading or writing a license file.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for license operations.
pub type LicenseResult<T> = Result<T, LicenseError>;
