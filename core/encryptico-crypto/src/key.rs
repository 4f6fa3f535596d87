//! Key derivation and salt management.
//!
//! Uses PBKDF2 with HMAC-SHA1 for deriving license hashes from passwords.
//! SHA-1 is kept for compatibility with keys issued by earlier releases; the
//! iteration count is the caller's work factor.

use crate::error::{CryptoError, CryptoResult};
use rand::RngCore;
use sha1::Sha1;
use subtle::ConstantTimeEq;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Size of the SHA-1 digest, and the natural PBKDF2 block size, in bytes.
pub const SHA1_OUTPUT_SIZE: usize = 20;

/// Derived key material with automatic zeroization on drop.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct DerivedBytes {
    bytes: Vec<u8>,
}

impl DerivedBytes {
    /// Wraps raw derived bytes.
    pub fn from_vec(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }

    /// Returns the derived bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Number of derived bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Returns true if no bytes were derived.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Compares against `other` without a data-dependent early exit.
    pub fn ct_eq(&self, other: &[u8]) -> bool {
        constant_time_eq(&self.bytes, other)
    }
}

impl std::fmt::Debug for DerivedBytes {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DerivedBytes")
            .field("len", &self.bytes.len())
            .field("bytes", &"[REDACTED]")
            .finish()
    }
}

/// Salt for key derivation.
///
/// Unlike a fixed-size encryption salt, license salts are sized by the
/// issuer, so the length is carried at runtime.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Salt {
    bytes: Vec<u8>,
}

impl Salt {
    /// Generates `len` random bytes from the operating system CSPRNG.
    pub fn random(len: usize) -> Self {
        let mut bytes = vec![0u8; len];
        rand::rngs::OsRng.fill_bytes(&mut bytes);
        Self { bytes }
    }

    /// Creates a salt from raw bytes.
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            bytes: bytes.into(),
        }
    }

    /// Returns the salt bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Salt length in bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Returns true if the salt is empty.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// A password-based key derivation function.
///
/// Implementations must be deterministic: identical inputs always yield
/// identical output. License verification depends on it.
pub trait KeyDeriver: Send + Sync {
    /// Derives exactly `output_len` bytes from `password` and `salt`.
    fn derive(
        &self,
        password: &str,
        salt: &[u8],
        iterations: u32,
        output_len: usize,
    ) -> CryptoResult<DerivedBytes>;
}

/// PBKDF2 with HMAC-SHA1 (RFC 2898 / RFC 8018).
#[derive(Clone, Copy, Debug, Default)]
pub struct Pbkdf2Sha1;

impl KeyDeriver for Pbkdf2Sha1 {
    fn derive(
        &self,
        password: &str,
        salt: &[u8],
        iterations: u32,
        output_len: usize,
    ) -> CryptoResult<DerivedBytes> {
        if iterations == 0 {
            return Err(CryptoError::InvalidIterations(iterations));
        }

        let mut out = vec![0u8; output_len];
        pbkdf2::pbkdf2_hmac::<Sha1>(password.as_bytes(), salt, iterations, &mut out);
        Ok(DerivedBytes::from_vec(out))
    }
}

/// Derives `output_len` bytes with the default deriver ([`Pbkdf2Sha1`]).
///
/// # Arguments
/// * `password` - The secret password
/// * `salt` - Salt mixed into the derivation
/// * `iterations` - Work factor, at least 1
/// * `output_len` - Number of bytes to produce
pub fn derive_key(
    password: &str,
    salt: &Salt,
    iterations: u32,
    output_len: usize,
) -> CryptoResult<DerivedBytes> {
    Pbkdf2Sha1.derive(password, salt.as_bytes(), iterations, output_len)
}

/// Constant-time byte comparison.
///
/// Slices of different lengths compare unequal; the length itself is not
/// treated as secret.
pub fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    a.len() == b.len() && bool::from(a.ct_eq(b))
}
