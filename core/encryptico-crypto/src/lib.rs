//! Key derivation layer for Encryptico license keys.
//!
//! License hashes are derived from a vendor password with PBKDF2-HMAC-SHA1
//! over a random per-key salt. Derived bytes are zeroized on drop and are
//! only ever compared in constant time.

mod error;
mod key;

pub use error::{CryptoError, CryptoResult};
pub use key::{
    constant_time_eq, derive_key, DerivedBytes, KeyDeriver, Pbkdf2Sha1, Salt, SHA1_OUTPUT_SIZE,
};
