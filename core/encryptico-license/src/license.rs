//! The license value object.

use crate::error::{LicenseError, LicenseResult};
use crate::key::{self, KeyParams};
use serde::{Deserialize, Serialize};

/// A generated license key together with everything needed to re-verify it.
///
/// Immutable once constructed. Deserialization goes through [`License::new`],
/// so a loaded record upholds the same invariants as a freshly built one.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawLicense")]
pub struct License {
    key: String,
    password: String,
    iterations: u32,
    #[serde(rename = "random_salt_length")]
    salt_length: usize,
}

/// Unchecked license fields as they appear on disk.
#[derive(Deserialize)]
pub(crate) struct RawLicense {
    key: String,
    password: String,
    iterations: u32,
    random_salt_length: usize,
}

impl TryFrom<RawLicense> for License {
    type Error = LicenseError;

    fn try_from(raw: RawLicense) -> LicenseResult<Self> {
        Self::new(raw.key, raw.password, raw.iterations, raw.random_salt_length)
    }
}

impl License {
    /// Creates a license from its fields.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if the key or password is empty, or if
    /// `iterations` or `salt_length` is zero.
    pub fn new(
        key: impl Into<String>,
        password: impl Into<String>,
        iterations: u32,
        salt_length: usize,
    ) -> LicenseResult<Self> {
        let key = key.into();
        let password = password.into();

        if key.is_empty() {
            return Err(LicenseError::InvalidArgument(
                "license key must not be empty".to_string(),
            ));
        }
        if password.is_empty() {
            return Err(LicenseError::InvalidArgument(
                "password must not be empty".to_string(),
            ));
        }
        KeyParams {
            iterations,
            salt_length,
        }
        .validate()?;

        Ok(Self {
            key,
            password,
            iterations,
            salt_length,
        })
    }

    /// Generates a fresh key for `password` and wraps it in a license.
    ///
    /// # Errors
    ///
    /// Same as [`key::generate_key`].
    pub fn generate(password: impl Into<String>, params: KeyParams) -> LicenseResult<Self> {
        let password = password.into();
        let key = key::generate_key(&password, params.iterations, params.salt_length)?;
        Self::new(key, password, params.iterations, params.salt_length)
    }

    /// Returns the Base64 license key.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Returns the password the key was derived from.
    #[must_use]
    pub fn password(&self) -> &str {
        &self.password
    }

    /// Returns the PBKDF2 iteration count.
    #[must_use]
    pub fn iterations(&self) -> u32 {
        self.iterations
    }

    /// Returns the salt length in bytes.
    #[must_use]
    pub fn salt_length(&self) -> usize {
        self.salt_length
    }

    /// Returns the key parameters.
    #[must_use]
    pub fn params(&self) -> KeyParams {
        KeyParams {
            iterations: self.iterations,
            salt_length: self.salt_length,
        }
    }

    /// Verifies the key against the stored password and parameters.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        key::is_valid(&self.key, &self.password, self.iterations, self.salt_length)
    }
}

impl std::fmt::Debug for License {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("License")
            .field("key", &self.key)
            .field("password", &"[REDACTED]")
            .field("iterations", &self.iterations)
            .field("salt_length", &self.salt_length)
            .finish()
    }
}
