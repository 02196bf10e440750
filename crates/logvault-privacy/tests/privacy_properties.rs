use logvault_privacy::{hash_identifier, MessageCipher};
use proptest::prelude::*;

proptest! {
    #[test]
    fn decrypt_inverts_encrypt(message in ".*") {
        let cipher = MessageCipher::ephemeral();
        let ct = cipher.encrypt(&message).unwrap();
        prop_assert_eq!(cipher.decrypt(&ct).unwrap(), message);
    }

    #[test]
    fn hashing_is_deterministic(raw in ".*") {
        prop_assert_eq!(hash_identifier(&raw), hash_identifier(&raw));
    }

    #[test]
    fn digest_never_contains_raw_value(raw in "[g-z]{4,32}") {
        // Hex digests only use 0-9a-f, so a raw value outside that alphabet
        // can never appear inside one.
        let digest = hash_identifier(&raw);
        prop_assert!(!digest.contains(&raw));
        prop_assert_eq!(digest.len(), 64);
    }
}
