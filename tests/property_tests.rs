//! Property-based tests for paymentcodes
//!
//! Uses proptest to verify invariants across randomized seeds, indices and outpoints

use paymentcodes::{
    blinding::{blind, unblind, BlindedPayload},
    derive_shared_index_key, Outpoint, PaymentCode, PaymentCodeNode, Role, SecretPoint,
    SharedSecret, MAINNET, TESTNET,
};
use proptest::prelude::*;
use secp256k1::{Secp256k1, SecretKey};

// ============================================================================
// Property Test Strategies
// ============================================================================

/// Generate a 32 byte BIP32 seed
fn seed_strategy() -> impl Strategy<Value = [u8; 32]> {
    prop::array::uniform32(any::<u8>())
}

/// Generate a non-hardened payment index
fn index_strategy() -> impl Strategy<Value = u32> {
    0u32..1_000
}

/// Generate an arbitrary outpoint
fn outpoint_strategy() -> impl Strategy<Value = Outpoint> {
    (prop::array::uniform32(any::<u8>()), any::<u32>())
        .prop_map(|(txid, vout)| Outpoint::new(txid, vout))
}

fn node(seed: &[u8; 32]) -> PaymentCodeNode {
    PaymentCodeNode::from_seed(seed, &MAINNET).expect("Valid seed")
}

// ============================================================================
// Payment Code Properties
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    /// Property: text form decodes back to the same payload
    #[test]
    fn prop_payment_code_text_round_trip(seed in seed_strategy()) {
        let code = node(&seed).payment_code();
        let text = code.to_string();

        prop_assert!(text.starts_with("PM8T"));
        prop_assert_eq!(PaymentCode::try_from(text.as_str()).unwrap(), code);
        prop_assert_eq!(PaymentCode::from_bytes(&code.to_bytes()).unwrap(), code);
    }

    /// Property: public nodes derive the same children as private ones
    #[test]
    fn prop_public_node_matches_private(seed in seed_strategy(), index in index_strategy()) {
        let private = node(&seed);
        let public = PaymentCodeNode::from_payment_code(&private.payment_code(), &MAINNET);

        prop_assert_eq!(
            private.child_at(index).unwrap().public_key(),
            public.child_at(index).unwrap().public_key()
        );
        prop_assert_eq!(
            private.notification_address(&MAINNET).unwrap(),
            public.notification_address(&MAINNET).unwrap()
        );
    }

    /// Property: same seed = same node, different profile = different node
    #[test]
    fn prop_deterministic_derivation(seed in seed_strategy()) {
        prop_assert_eq!(node(&seed), node(&seed));

        let testnet = PaymentCodeNode::from_seed(&seed, &TESTNET).unwrap();
        prop_assert_ne!(node(&seed).payment_code(), testnet.payment_code());
    }
}

// ============================================================================
// Shared Secret Properties
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    /// Property: both parties compute the same secret
    #[test]
    fn prop_shared_secret_symmetry(
        a in seed_strategy(),
        b in seed_strategy()
    ) {
        let secp = Secp256k1::new();
        let (Ok(a), Ok(b)) = (SecretKey::from_slice(&a), SecretKey::from_slice(&b)) else {
            return Ok(());
        };

        prop_assert_eq!(
            SharedSecret::compute(&b.public_key(&secp), &a).unwrap(),
            SharedSecret::compute(&a.public_key(&secp), &b).unwrap()
        );
    }

    /// Property: the key Alice pays to is the key Bob can spend
    #[test]
    fn prop_payment_keys_agree(
        alice_seed in seed_strategy(),
        bob_seed in seed_strategy(),
        index in index_strategy()
    ) {
        prop_assume!(alice_seed != bob_seed);

        let alice = node(&alice_seed);
        let bob = node(&bob_seed);
        let alice_public = alice.to_public();
        let bob_public = bob.to_public();

        let sent = derive_shared_index_key(&alice, &bob_public, index, Role::Sending).unwrap();
        let received = derive_shared_index_key(&bob, &alice_public, index, Role::Receiving).unwrap();

        prop_assert!(sent.private_key().is_none());
        prop_assert_eq!(sent.public_key(), received.public_key());
    }
}

// ============================================================================
// Blinding Properties
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    /// Property: unblinding with the same inputs restores the payment code
    #[test]
    fn prop_blinding_round_trip(
        sender_seed in seed_strategy(),
        receiver_seed in seed_strategy(),
        designated in seed_strategy(),
        outpoint in outpoint_strategy()
    ) {
        let Ok(designated) = SecretKey::from_slice(&designated) else {
            return Ok(());
        };
        let secp = Secp256k1::new();
        let code = node(&sender_seed).payment_code();
        let receiver = node(&receiver_seed);

        let sender_point = SecretPoint::compute(
            &receiver.notification_public_key().unwrap(),
            &designated,
        ).unwrap();
        let blinded = blind(&code, &sender_point, &outpoint);

        let receiver_point = SecretPoint::compute(
            &designated.public_key(&secp),
            &receiver.notification_private_key().unwrap(),
        ).unwrap();
        prop_assert_eq!(sender_point, receiver_point);

        let parsed = BlindedPayload::from_bytes(blinded.as_bytes()).unwrap();
        prop_assert_eq!(unblind(&parsed, &receiver_point, &outpoint).unwrap(), code);
        let plain = code.to_bytes();
        let masked = blinded.as_bytes();
        prop_assert_eq!(&masked[..3], &plain[..3]);
        prop_assert_eq!(&masked[67..], &plain[67..]);
    }

    /// Property: outpoints survive their text forms
    #[test]
    fn prop_outpoint_text_forms(outpoint in outpoint_strategy()) {
        prop_assert_eq!(outpoint.to_string().parse::<Outpoint>().unwrap(), outpoint);
        prop_assert_eq!(
            hex::encode(outpoint.to_bytes()).parse::<Outpoint>().unwrap(),
            outpoint
        );
    }
}
