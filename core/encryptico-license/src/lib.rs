//! Offline licensing for Encryptico.
//!
//! This module handles:
//! - License key generation from a vendor password
//! - Offline verification of standalone key strings
//! - Issuing and verifying local license files
//!
//! # License Key Format
//!
//! Keys are formatted as: `base64(salt || hash)`
//! where `hash` is PBKDF2-HMAC-SHA1 of the password over `salt`. The
//! iteration count and salt length are not part of the key and must be
//! supplied by the verifier.
//!
//! # Example
//!
//! ```
//! use encryptico_license::{generate_key, is_valid};
//!
//! let key = generate_key("correct-horse", 1_000, 16).unwrap();
//! assert!(is_valid(&key, "correct-horse", 1_000, 16));
//! assert!(!is_valid(&key, "wrong-password", 1_000, 16));
//! ```

mod error;
mod key;
mod license;
mod store;
mod validator;

pub use error::{LicenseError, LicenseResult};
pub use key::{
    generate_key, generate_key_with, is_valid, is_valid_with, KeyBlob, KeyParams,
    DEFAULT_ITERATIONS, DEFAULT_SALT_LENGTH,
};
pub use license::License;
pub use store::{
    default_license_path, resolve_license_path, FileLicenseStore, LicenseFile, LicenseStore,
    DEFAULT_LICENSE_FILE_NAME,
};
pub use validator::{Validator, ValidatorMode};
