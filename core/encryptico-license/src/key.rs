//! License key generation and verification.
//!
//! License keys use the format: `base64(salt || hash)`
//!
//! - `salt`: `salt_length` random bytes, fresh for every key
//! - `hash`: PBKDF2-HMAC-SHA1 of the vendor password over `salt`
//!
//! Neither the iteration count nor the salt length is embedded in the key;
//! the verifier supplies both out of band. At generation time the hash is
//! `salt_length` bytes long, but verification accepts any hash length, so
//! keys issued with a different hash size still check out.

use crate::error::{LicenseError, LicenseResult};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use encryptico_crypto::{KeyDeriver, Pbkdf2Sha1, Salt};
use tracing::debug;

/// Default PBKDF2 work factor.
pub const DEFAULT_ITERATIONS: u32 = 10_000;

/// Default salt length in bytes.
pub const DEFAULT_SALT_LENGTH: usize = 16;

/// Parameters shared between the issuer and the verifier of a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyParams {
    /// PBKDF2 iteration count.
    pub iterations: u32,
    /// Salt length in bytes (also the generated hash length).
    pub salt_length: usize,
}

impl Default for KeyParams {
    fn default() -> Self {
        Self {
            iterations: DEFAULT_ITERATIONS,
            salt_length: DEFAULT_SALT_LENGTH,
        }
    }
}

impl KeyParams {
    /// Checks that both parameters are at least 1.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` naming the offending field.
    pub fn validate(&self) -> LicenseResult<()> {
        if self.iterations < 1 {
            return Err(LicenseError::InvalidArgument(
                "iterations must be at least 1".to_string(),
            ));
        }
        if self.salt_length < 1 {
            return Err(LicenseError::InvalidArgument(
                "salt length must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// A decoded license key: the salt followed by the derived hash.
#[derive(Clone, PartialEq, Eq)]
pub struct KeyBlob {
    salt: Vec<u8>,
    hash: Vec<u8>,
}

impl KeyBlob {
    /// Creates a blob from its two halves.
    pub fn new(salt: Vec<u8>, hash: Vec<u8>) -> Self {
        Self { salt, hash }
    }

    /// Decodes a key string and splits it after `salt_length` bytes.
    ///
    /// # Errors
    ///
    /// Returns `InvalidKeyFormat` if the key is not valid Base64 or decodes
    /// to fewer than `salt_length` bytes.
    pub fn decode(key: &str, salt_length: usize) -> LicenseResult<Self> {
        let mut bytes = BASE64
            .decode(key.trim())
            .map_err(|e| LicenseError::InvalidKeyFormat(format!("invalid base64: {e}")))?;

        if bytes.len() < salt_length {
            return Err(LicenseError::InvalidKeyFormat(format!(
                "key decodes to {} bytes, shorter than the {salt_length}-byte salt",
                bytes.len()
            )));
        }

        let hash = bytes.split_off(salt_length);
        Ok(Self { salt: bytes, hash })
    }

    /// Encodes `salt || hash` as standard padded Base64.
    pub fn encode(&self) -> String {
        let mut bytes = Vec::with_capacity(self.salt.len() + self.hash.len());
        bytes.extend_from_slice(&self.salt);
        bytes.extend_from_slice(&self.hash);
        BASE64.encode(&bytes)
    }

    /// Returns the salt half.
    pub fn salt(&self) -> &[u8] {
        &self.salt
    }

    /// Returns the hash half.
    pub fn hash(&self) -> &[u8] {
        &self.hash
    }

    /// Re-derives the hash from `password` and checks it in constant time.
    ///
    /// An empty hash never verifies.
    ///
    /// # Errors
    ///
    /// Propagates derivation failures (e.g. zero iterations).
    pub fn verify_with(
        &self,
        deriver: &dyn KeyDeriver,
        password: &str,
        iterations: u32,
    ) -> LicenseResult<bool> {
        if self.hash.is_empty() {
            return Ok(false);
        }
        let actual = deriver.derive(password, &self.salt, iterations, self.hash.len())?;
        Ok(actual.ct_eq(&self.hash))
    }
}

impl std::fmt::Debug for KeyBlob {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyBlob")
            .field("salt_len", &self.salt.len())
            .field("hash_len", &self.hash.len())
            .finish()
    }
}

/// Generates a new license key for `password`.
///
/// # Errors
///
/// Returns `InvalidArgument` if the password is empty, or if `iterations`
/// or `salt_length` is zero.
pub fn generate_key(password: &str, iterations: u32, salt_length: usize) -> LicenseResult<String> {
    generate_key_with(&Pbkdf2Sha1, password, iterations, salt_length)
}

/// Generates a new license key using a caller-supplied deriver.
///
/// # Errors
///
/// Same as [`generate_key`], plus any derivation failure.
pub fn generate_key_with(
    deriver: &dyn KeyDeriver,
    password: &str,
    iterations: u32,
    salt_length: usize,
) -> LicenseResult<String> {
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

    let salt = Salt::random(salt_length);
    let hash = deriver.derive(password, salt.as_bytes(), iterations, salt_length)?;
    let blob = KeyBlob::new(salt.as_bytes().to_vec(), hash.as_bytes().to_vec());

    debug!(iterations, salt_length, "Generated license key");
    Ok(blob.encode())
}

/// Returns true if `key` was generated from `password` with these parameters.
///
/// Never fails: malformed keys, keys shorter than the salt, and unusable
/// parameters all verify as `false`.
#[must_use]
pub fn is_valid(key: &str, password: &str, iterations: u32, salt_length: usize) -> bool {
    is_valid_with(&Pbkdf2Sha1, key, password, iterations, salt_length)
}

/// [`is_valid`] with a caller-supplied deriver.
#[must_use]
pub fn is_valid_with(
    deriver: &dyn KeyDeriver,
    key: &str,
    password: &str,
    iterations: u32,
    salt_length: usize,
) -> bool {
    let params = KeyParams {
        iterations,
        salt_length,
    };
    if params.validate().is_err() {
        debug!(iterations, salt_length, "Rejected key: unusable parameters");
        return false;
    }

    let blob = match KeyBlob::decode(key, salt_length) {
        Ok(blob) => blob,
        Err(e) => {
            debug!(error = %e, "Rejected key: malformed");
            return false;
        }
    };

    match blob.verify_with(deriver, password, iterations) {
        Ok(valid) => {
            debug!(valid, hash_len = blob.hash().len(), "Verified license key");
            valid
        }
        Err(e) => {
            debug!(error = %e, "Rejected key: derivation failed");
            false
        }
    }
}
