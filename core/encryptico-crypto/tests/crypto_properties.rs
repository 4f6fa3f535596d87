//! Property-based tests for the key derivation layer.
//!
//! These tests verify properties that must always hold:
//! - Derivation is deterministic
//! - Password, salt and work factor all influence the output
//! - Output length is exactly what was requested
//! - Constant-time comparison agrees with ordinary equality

use encryptico_crypto::{constant_time_eq, derive_key, Salt};
use proptest::prelude::*;

// =============================================================================
// HELPER STRATEGIES
// =============================================================================

fn salt_strategy() -> impl Strategy<Value = Salt> {
    prop::collection::vec(any::<u8>(), 1..64).prop_map(|bytes| Salt::from_bytes(bytes))
}

fn password_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-zA-Z0-9!@#$%^&*()]{1,100}").unwrap()
}

/// Low work factor so each case stays cheap.
fn iterations_strategy() -> impl Strategy<Value = u32> {
    1u32..50
}

// =============================================================================
// KEY DERIVATION PROPERTIES
// =============================================================================

mod key_derivation_properties {
    use super::*;

    proptest! {
        /// Same password + salt + iterations produces same output
        #[test]
        fn derivation_is_deterministic(
            password in password_strategy(),
            salt in salt_strategy(),
            iterations in iterations_strategy(),
            len in 0usize..64,
        ) {
            let out1 = derive_key(&password, &salt, iterations, len).unwrap();
            let out2 = derive_key(&password, &salt, iterations, len).unwrap();

            prop_assert_eq!(out1.as_bytes(), out2.as_bytes());
        }

        /// Different passwords produce different output
        #[test]
        fn different_passwords_different_output(
            password1 in password_strategy(),
            password2 in password_strategy(),
            salt in salt_strategy(),
        ) {
            prop_assume!(password1 != password2);

            let out1 = derive_key(&password1, &salt, 10, 16).unwrap();
            let out2 = derive_key(&password2, &salt, 10, 16).unwrap();

            prop_assert_ne!(out1.as_bytes(), out2.as_bytes());
        }

        /// Different salts produce different output
        #[test]
        fn different_salts_different_output(
            password in password_strategy(),
            salt1 in salt_strategy(),
            salt2 in salt_strategy(),
        ) {
            prop_assume!(salt1.as_bytes() != salt2.as_bytes());

            let out1 = derive_key(&password, &salt1, 10, 16).unwrap();
            let out2 = derive_key(&password, &salt2, 10, 16).unwrap();

            prop_assert_ne!(out1.as_bytes(), out2.as_bytes());
        }

        /// Different iteration counts produce different output
        #[test]
        fn different_iterations_different_output(
            password in password_strategy(),
            salt in salt_strategy(),
            it1 in iterations_strategy(),
            it2 in iterations_strategy(),
        ) {
            prop_assume!(it1 != it2);

            let out1 = derive_key(&password, &salt, it1, 16).unwrap();
            let out2 = derive_key(&password, &salt, it2, 16).unwrap();

            prop_assert_ne!(out1.as_bytes(), out2.as_bytes());
        }

        /// Derived output has the requested length
        #[test]
        fn derived_output_has_requested_length(
            password in password_strategy(),
            salt in salt_strategy(),
            len in 0usize..128,
        ) {
            let out = derive_key(&password, &salt, 2, len).unwrap();
            prop_assert_eq!(out.len(), len);
        }

        /// Random salts have the requested length
        #[test]
        fn random_salt_has_requested_length(len in 1usize..256) {
            prop_assert_eq!(Salt::random(len).len(), len);
        }
    }
}

// =============================================================================
// COMPARISON PROPERTIES
// =============================================================================

mod comparison_properties {
    use super::*;

    proptest! {
        /// constant_time_eq agrees with slice equality
        #[test]
        fn constant_time_eq_agrees_with_eq(
            a in prop::collection::vec(any::<u8>(), 0..64),
            b in prop::collection::vec(any::<u8>(), 0..64),
        ) {
            prop_assert_eq!(constant_time_eq(&a, &b), a == b);
            prop_assert!(constant_time_eq(&a, &a));
        }
    }
}
