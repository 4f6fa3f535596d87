mod common;

use common::{make_license, TEST_ITERATIONS, TEST_PASSWORD, TEST_SALT_LENGTH};
use encryptico_license::{KeyParams, License, LicenseError};

#[test]
fn license_accessors_return_fields() {
    let license = License::new("a2V5", "pw", 42, 8).unwrap();
    assert_eq!(license.key(), "a2V5");
    assert_eq!(license.password(), "pw");
    assert_eq!(license.iterations(), 42);
    assert_eq!(license.salt_length(), 8);
    assert_eq!(
        license.params(),
        KeyParams {
            iterations: 42,
            salt_length: 8
        }
    );
}

#[test]
fn license_rejects_empty_key() {
    let err = License::new("", "pw", 1, 1).unwrap_err();
    assert!(matches!(err, LicenseError::InvalidArgument(_)));
}

#[test]
fn license_rejects_empty_password() {
    let err = License::new("a2V5", "", 1, 1).unwrap_err();
    assert!(matches!(err, LicenseError::InvalidArgument(_)));
}

#[test]
fn license_rejects_zero_parameters() {
    assert!(License::new("a2V5", "pw", 0, 1).is_err());
    assert!(License::new("a2V5", "pw", 1, 0).is_err());
}

#[test]
fn generated_license_is_valid() {
    let license = make_license();
    assert!(license.is_valid());
}

#[test]
fn license_generate_uses_params() {
    let params = KeyParams {
        iterations: 50,
        salt_length: 4,
    };
    let license = License::generate("secret", params).unwrap();
    assert_eq!(license.params(), params);
    assert_eq!(license.password(), "secret");
    assert!(license.is_valid());
}

#[test]
fn license_with_wrong_password_is_invalid() {
    let valid = make_license();
    let license = License::new(valid.key(), "not-it", TEST_ITERATIONS, TEST_SALT_LENGTH).unwrap();
    assert!(!license.is_valid());
}

#[test]
fn license_with_garbage_key_is_invalid() {
    let license = License::new("%%%", TEST_PASSWORD, TEST_ITERATIONS, TEST_SALT_LENGTH).unwrap();
    assert!(!license.is_valid());
}

#[test]
fn license_debug_redacts_password() {
    let license = make_license();
    let debug = format!("{license:?}");
    assert!(debug.contains("REDACTED"));
    assert!(!debug.contains(TEST_PASSWORD));
}

#[test]
fn license_serializes_with_legacy_field_name() {
    let license = License::new("a2V5", "pw", 3, 2).unwrap();
    let json = serde_json::to_value(&license).unwrap();
    assert_eq!(json["random_salt_length"], 2);
    assert_eq!(json["iterations"], 3);
    assert!(json.get("salt_length").is_none());
}

#[test]
fn license_deserialize_enforces_invariants() {
    let json = r#"{"key":"a2V5","password":"","iterations":3,"random_salt_length":2}"#;
    assert!(serde_json::from_str::<License>(json).is_err());

    let json = r#"{"key":"a2V5","password":"pw","iterations":0,"random_salt_length":2}"#;
    assert!(serde_json::from_str::<License>(json).is_err());

    let json = r#"{"key":"a2V5","password":"pw","iterations":3,"random_salt_length":2}"#;
    let license: License = serde_json::from_str(json).unwrap();
    assert_eq!(license.salt_length(), 2);
}
