//! Property-based tests for credential verification
//!
//! Uses proptest to generate passwords and check the hashing contract.
//! bcrypt is slow even at cost 4, so case counts stay small.

#![cfg(feature = "server")]

use std::sync::Arc;

use docauth::backend::auth::{AccountService, CredentialVerifier};
use docauth::backend::store::MemoryDocumentStore;
use proptest::prelude::*;

const TEST_COST: u32 = 4;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(8))]

    #[test]
    fn test_hash_then_verify_accepts(password in "[ -~]{1,64}") {
        let verifier = CredentialVerifier::new(TEST_COST);
        let hash = verifier.hash(&password).unwrap();

        prop_assert!(verifier.verify(&hash, &password));
        prop_assert_ne!(hash, password);
    }

    #[test]
    fn test_other_password_rejected(
        password in "[a-zA-Z0-9]{1,32}",
        other in "[a-zA-Z0-9]{1,32}",
    ) {
        prop_assume!(password != other);
        let verifier = CredentialVerifier::new(TEST_COST);
        let hash = verifier.hash(&password).unwrap();

        prop_assert!(!verifier.verify(&hash, &other));
    }

    #[test]
    fn test_passwords_past_72_bytes_never_alias(
        prefix in "[a-zA-Z0-9]{72}",
        suffix in "[a-zA-Z0-9]{1,16}",
    ) {
        let verifier = CredentialVerifier::new(TEST_COST);
        let long = format!("{}{}", prefix, suffix);

        prop_assert!(verifier.hash(&long).is_err());

        let hash = verifier.hash(&prefix).unwrap();
        prop_assert!(verifier.verify(&hash, &prefix));
        prop_assert!(!verifier.verify(&hash, &long));
    }

    #[test]
    fn test_hashes_are_salted(password in "[a-zA-Z0-9]{1,32}") {
        let verifier = CredentialVerifier::new(TEST_COST);
        let first = verifier.hash(&password).unwrap();
        let second = verifier.hash(&password).unwrap();

        prop_assert_ne!(&first, &second);
        prop_assert!(verifier.verify(&first, &password));
        prop_assert!(verifier.verify(&second, &password));
    }

    #[test]
    fn test_register_then_authenticate(
        username in "[a-z][a-z0-9_]{0,15}",
        password in "[a-zA-Z0-9]{1,32}",
    ) {
        tokio_test::block_on(async {
            let accounts = AccountService::new(
                Arc::new(MemoryDocumentStore::new()),
                CredentialVerifier::new(TEST_COST),
            );
            accounts.register(&username, "", &password).await.unwrap();

            let accepted = accounts.authenticate(&username, &password).await.unwrap();
            assert_eq!(accepted.principal(), Some(username.as_str()));

            let wrong = format!("{}!", password);
            let rejected = accounts.authenticate(&username, &wrong).await.unwrap();
            assert!(!rejected.is_accepted());
        });
    }
}
