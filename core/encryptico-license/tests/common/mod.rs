//! Shared test helpers for license tests.

#![allow(dead_code)]

use base64::{engine::general_purpose::STANDARD, Engine};
use encryptico_crypto::{KeyDeriver, Pbkdf2Sha1};
use encryptico_license::License;

/// Low work factor so tests stay fast in debug builds.
pub const TEST_ITERATIONS: u32 = 1_000;

/// Salt length used throughout the tests.
pub const TEST_SALT_LENGTH: usize = 16;

/// Password used for test licenses.
pub const TEST_PASSWORD: &str = "correct-horse";

/// Builds a key by hand: `base64(salt || pbkdf2(password, salt, iterations, hash_len))`.
pub fn make_key(password: &str, salt: &[u8], iterations: u32, hash_len: usize) -> String {
    let hash = Pbkdf2Sha1
        .derive(password, salt, iterations, hash_len)
        .unwrap();
    let mut bytes = salt.to_vec();
    bytes.extend_from_slice(hash.as_bytes());
    STANDARD.encode(bytes)
}

/// Decodes a key to its raw bytes.
pub fn decode_key(key: &str) -> Vec<u8> {
    STANDARD.decode(key).unwrap()
}

/// Re-encodes raw key bytes.
pub fn encode_key(bytes: &[u8]) -> String {
    STANDARD.encode(bytes)
}

/// Generates a valid license with the test parameters.
pub fn make_license() -> License {
    let key =
        encryptico_license::generate_key(TEST_PASSWORD, TEST_ITERATIONS, TEST_SALT_LENGTH).unwrap();
    License::new(key, TEST_PASSWORD, TEST_ITERATIONS, TEST_SALT_LENGTH).unwrap()
}

/// Writes a license file by hand with the given version and license body.
pub fn license_file_json(version: u32, key: &str, password: &str, iterations: u32, salt: usize) -> String {
    format!(
        r#"{{"version":{version},"issued_at":"2026-01-01T00:00:00Z","license":{{"key":"{key}","password":"{password}","iterations":{iterations},"random_salt_length":{salt}}}}}"#
    )
}
