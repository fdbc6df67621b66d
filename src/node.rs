//! Payment code key derivation.
//!
//! Every payment code lives at `m/47'/coin_type'/0'`. The node at that depth is
//! the root of all payment code operations: its public key and chain code form
//! the payment code, child 0 is the notification key, and child `i` is the key
//! used for the `i`-th payment between two parties.
use std::str::FromStr;

use bitcoin::bip32::{ChainCode, ChildNumber, DerivationPath, Fingerprint, Xpriv, Xpub};
use bip39::Mnemonic;
use log::{debug, trace};
use secp256k1::{PublicKey, Secp256k1, SecretKey};

use crate::{
    code::PaymentCode,
    network::NetworkProfile,
    utils::common::p2pkh_address,
    Error, Result,
};

/// BIP43 purpose reserved for payment codes.
pub const PURPOSE: u32 = 47;

/// Depth of a payment code node below the master key.
pub const PAYMENT_CODE_DEPTH: u8 = 3;

/// Child index of the notification key.
pub const NOTIFICATION_INDEX: u32 = 0;

const MIN_SEED_LEN: usize = 16;
const MAX_SEED_LEN: usize = 64;

#[derive(Clone, Debug, PartialEq, Eq)]
enum NodeKey {
    Private(Xpriv),
    Public(Xpub),
}

/// An extended key at the payment code depth, or one of its children.
///
/// Nodes built from a seed carry the private key and can derive spendable
/// one-time keys. Nodes built from a payment code are public only, and keep
/// the decoded code so its version, features and reserved bytes survive.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PaymentCodeNode {
    key: NodeKey,
    code: Option<PaymentCode>,
}

/// The hardened path `m/47'/coin_type'/0'` for a profile.
pub fn derivation_path(network: &NetworkProfile) -> Result<DerivationPath> {
    let path = vec![
        ChildNumber::from_hardened_idx(PURPOSE)?,
        ChildNumber::from_hardened_idx(network.coin_type)?,
        ChildNumber::from_hardened_idx(0)?,
    ];

    Ok(DerivationPath::from(path))
}

impl PaymentCodeNode {
    /// Derive the payment code root node from a BIP32 seed.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Derivation`] if the seed is not between 16 and 64 bytes
    /// long or if derivation along the hardened path fails.
    pub fn from_seed(seed: &[u8], network: &NetworkProfile) -> Result<Self> {
        if !(MIN_SEED_LEN..=MAX_SEED_LEN).contains(&seed.len()) {
            return Err(Error::Derivation(format!(
                "seed must be between {} and {} bytes, got {}",
                MIN_SEED_LEN,
                MAX_SEED_LEN,
                seed.len()
            )));
        }

        let secp = Secp256k1::new();
        let master = Xpriv::new_master(network.chain.bip32_network, seed)?;
        let path = derivation_path(network)?;
        let root = master.derive_priv(&secp, &path)?;

        debug!("derived payment code root at {}", path);

        Ok(PaymentCodeNode {
            key: NodeKey::Private(root),
            code: None,
        })
    }

    /// Derive the payment code root node from a BIP39 mnemonic and optional passphrase.
    pub fn from_mnemonic(phrase: &str, passphrase: &str, network: &NetworkProfile) -> Result<Self> {
        let mnemonic = Mnemonic::parse(phrase)?;

        PaymentCodeNode::from_seed(&mnemonic.to_seed(passphrase), network)
    }

    /// Build a public node from a decoded payment code.
    pub fn from_payment_code(code: &PaymentCode, network: &NetworkProfile) -> Self {
        let xpub = Xpub {
            network: network.chain.bip32_network,
            depth: PAYMENT_CODE_DEPTH,
            parent_fingerprint: Fingerprint::default(),
            child_number: ChildNumber::Normal { index: 0 },
            public_key: code.public_key(),
            chain_code: ChainCode::from(code.chain_code()),
        };

        PaymentCodeNode {
            key: NodeKey::Public(xpub),
            code: Some(*code),
        }
    }

    /// Decode a text payment code and build its public node.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPaymentCode`] on a bad checksum, prefix, version or features byte.
    pub fn from_payment_code_str(code: &str, network: &NetworkProfile) -> Result<Self> {
        let code = PaymentCode::from_str(code)?;

        Ok(PaymentCodeNode::from_payment_code(&code, network))
    }

    /// Non-hardened child derivation.
    pub fn child_at(&self, index: u32) -> Result<PaymentCodeNode> {
        let secp = Secp256k1::new();
        let child_number = ChildNumber::from_normal_idx(index)?;

        let key = match &self.key {
            NodeKey::Private(xpriv) => NodeKey::Private(xpriv.derive_priv(&secp, &[child_number])?),
            NodeKey::Public(xpub) => NodeKey::Public(xpub.ckd_pub(&secp, child_number)?),
        };

        trace!("derived child {} of payment code node", index);

        Ok(PaymentCodeNode { key, code: None })
    }

    pub fn is_private(&self) -> bool {
        matches!(self.key, NodeKey::Private(_))
    }

    pub fn public_key(&self) -> PublicKey {
        match &self.key {
            NodeKey::Private(xpriv) => xpriv.private_key.public_key(&Secp256k1::signing_only()),
            NodeKey::Public(xpub) => xpub.public_key,
        }
    }

    pub fn private_key(&self) -> Option<SecretKey> {
        match &self.key {
            NodeKey::Private(xpriv) => Some(xpriv.private_key),
            NodeKey::Public(_) => None,
        }
    }

    pub fn chain_code(&self) -> [u8; 32] {
        let chain_code = match &self.key {
            NodeKey::Private(xpriv) => xpriv.chain_code,
            NodeKey::Public(xpub) => xpub.chain_code,
        };

        let bytes: &[u8; 32] = chain_code.as_ref();
        *bytes
    }

    /// Drop the private key, if any.
    pub fn to_public(&self) -> PaymentCodeNode {
        match &self.key {
            NodeKey::Private(xpriv) => PaymentCodeNode {
                key: NodeKey::Public(Xpub::from_priv(&Secp256k1::new(), xpriv)),
                code: self.code,
            },
            NodeKey::Public(_) => self.clone(),
        }
    }

    /// The payment code this node was decoded from, or a version 1 code for
    /// nodes derived from a seed.
    pub fn payment_code(&self) -> PaymentCode {
        self.code
            .unwrap_or_else(|| PaymentCode::new(self.public_key(), self.chain_code()))
    }

    pub(crate) fn child_public_key(&self, index: u32) -> Result<PublicKey> {
        Ok(self.child_at(index)?.public_key())
    }

    pub(crate) fn child_private_key(&self, index: u32) -> Result<SecretKey> {
        self.child_at(index)?.private_key().ok_or_else(|| {
            Error::Derivation("a private payment code node is required".to_owned())
        })
    }

    /// Public key of the notification child.
    pub fn notification_public_key(&self) -> Result<PublicKey> {
        self.child_public_key(NOTIFICATION_INDEX)
    }

    /// Private key of the notification child, needed to spend from the notification address
    /// and to unblind incoming notifications.
    pub fn notification_private_key(&self) -> Result<SecretKey> {
        self.child_private_key(NOTIFICATION_INDEX)
    }

    /// The address counterparties send notification transactions to.
    pub fn notification_address(&self, network: &NetworkProfile) -> Result<String> {
        Ok(p2pkh_address(&self.notification_public_key()?, network))
    }
}

/// Derive the payment code root node from a BIP32 seed.
pub fn root_node_from_seed(seed: &[u8], network: &NetworkProfile) -> Result<PaymentCodeNode> {
    PaymentCodeNode::from_seed(seed, network)
}

/// Derive the payment code root node from a BIP39 mnemonic.
pub fn root_node_from_mnemonic(
    phrase: &str,
    passphrase: &str,
    network: &NetworkProfile,
) -> Result<PaymentCodeNode> {
    PaymentCodeNode::from_mnemonic(phrase, passphrase, network)
}

/// Build the public node of a text payment code.
pub fn public_node_from_payment_code(
    code: &str,
    network: &NetworkProfile,
) -> Result<PaymentCodeNode> {
    PaymentCodeNode::from_payment_code_str(code, network)
}

/// Derive the child node at `index`.
pub fn child_at(node: &PaymentCodeNode, index: u32) -> Result<PaymentCodeNode> {
    node.child_at(index)
}

/// The notification address of a node: child 0 encoded as P2PKH.
pub fn notification_address(node: &PaymentCodeNode, network: &NetworkProfile) -> Result<String> {
    node.notification_address(network)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::{MAINNET, TESTNET};

    const ALICE_SEED: &str = "64dca76abc9c6f0cf3d212d248c380c4622c8f93b2c425ec6a5567fd5db57e10d3e6f94a2f6af4ac2edb8998072aad92098db73558c323777abf5bd1082d970a";
    const ALICE_PAYMENT_CODE: &str = "PM8TJWomLDXEx1n3vqw3ucNwCqemi2pfsiKQsXpaRh3YvLMnnyt6ifGDcLGQQkMfHna1ByvtRzhbSFpunx9BpGJ441xSGCc784ypNySAHMKURHxdVzhj";

    #[test]
    fn path_uses_coin_type() {
        assert_eq!(derivation_path(&MAINNET).unwrap().to_string(), "m/47'/17'/0'");
        assert_eq!(derivation_path(&TESTNET).unwrap().to_string(), "m/47'/1'/0'");
    }

    #[test]
    fn seed_length_is_checked() {
        match PaymentCodeNode::from_seed(&[0u8; 15], &MAINNET) {
            Err(Error::Derivation(_)) => (),
            other => panic!("unexpected result {:?}", other),
        }
        PaymentCodeNode::from_seed(&[0u8; 65], &MAINNET).unwrap_err();
        PaymentCodeNode::from_seed(&[0u8; 16], &MAINNET).unwrap();
    }

    #[test]
    fn private_and_public_nodes_agree() {
        let seed = hex::decode(ALICE_SEED).unwrap();
        let private = PaymentCodeNode::from_seed(&seed, &MAINNET).unwrap();
        let public = PaymentCodeNode::from_payment_code_str(ALICE_PAYMENT_CODE, &MAINNET).unwrap();

        assert!(private.is_private());
        assert!(!public.is_private());
        assert_eq!(private.payment_code().to_string(), ALICE_PAYMENT_CODE);
        assert_eq!(private.public_key(), public.public_key());
        assert_eq!(private.chain_code(), public.chain_code());

        for i in 0..3 {
            assert_eq!(
                private.child_at(i).unwrap().public_key(),
                public.child_at(i).unwrap().public_key()
            );
        }
        assert_eq!(
            private.notification_address(&MAINNET).unwrap(),
            public.notification_address(&MAINNET).unwrap()
        );
    }

    #[test]
    fn public_node_has_no_private_keys() {
        let public = PaymentCodeNode::from_payment_code_str(ALICE_PAYMENT_CODE, &MAINNET).unwrap();
        public.notification_private_key().unwrap_err();
        assert_eq!(public.to_public(), public);
    }

    #[test]
    fn decoded_code_keeps_its_flags() {
        let mut payload = PaymentCode::from_str(ALICE_PAYMENT_CODE).unwrap().to_bytes();
        payload[1] = crate::code::FEATURES_BITMESSAGE;
        payload[70] = 0xaa;
        let flagged = PaymentCode::from_bytes(&payload).unwrap().to_string();
        assert_ne!(flagged, ALICE_PAYMENT_CODE);

        let public = PaymentCodeNode::from_payment_code_str(&flagged, &MAINNET).unwrap();
        assert_eq!(public.payment_code().to_string(), flagged);
        assert_eq!(public.to_public().payment_code().to_string(), flagged);

        // children are plain keys, the flags belong to the root only
        let child = public.child_at(0).unwrap();
        assert_eq!(child.payment_code().features(), crate::code::FEATURES_NONE);

        // the keys are the same as the plain code's
        let plain = PaymentCodeNode::from_payment_code_str(ALICE_PAYMENT_CODE, &MAINNET).unwrap();
        assert_eq!(
            public.notification_address(&MAINNET).unwrap(),
            plain.notification_address(&MAINNET).unwrap()
        );
    }

    #[test]
    fn hardened_index_is_rejected() {
        let public = PaymentCodeNode::from_payment_code_str(ALICE_PAYMENT_CODE, &MAINNET).unwrap();
        public.child_at(1 << 31).unwrap_err();
    }

    #[test]
    fn derivation_is_deterministic() {
        let seed = hex::decode(ALICE_SEED).unwrap();
        let first = root_node_from_seed(&seed, &MAINNET).unwrap();
        let second = root_node_from_seed(&seed, &MAINNET).unwrap();
        assert_eq!(first, second);
        assert_ne!(first, root_node_from_seed(&seed, &TESTNET).unwrap());
    }
}
