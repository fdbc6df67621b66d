//! A payment code bound to a network, with the operations a wallet needs.
//!
//! ```
//! use paymentcodes::{account::PaymentCodeAccount, MAINNET};
//!
//! let bob = PaymentCodeAccount::from_payment_code(
//!     "PM8TJJsC1EW1Fa1KquT9UDrnFfXxUjA4ZhRsoVFg72XXPUcjc5sC1Gp9D32NgpKMGa6RjQKPthBZAuCvXncSLf4v91dEwuc7n5aKB9VUyZh684NUaXVv",
//!     MAINNET,
//! )
//! .unwrap();
//!
//! assert_eq!(bob.notification_address().unwrap(), "FbDERRx7sE5pzFcENr3p43anc2DsDK4mpW");
//! ```
use secp256k1::{PublicKey, Secp256k1, SecretKey};

use crate::{network::NetworkProfile, node::PaymentCodeNode, utils::common::p2pkh_address, Result};

#[cfg(feature = "receiving")]
use crate::receiving;
#[cfg(feature = "sending")]
use crate::{blinding::BlindedPayload, sending, structs::Outpoint};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PaymentCodeAccount {
    node: PaymentCodeNode,
    network: NetworkProfile,
}

impl PaymentCodeAccount {
    pub fn new(node: PaymentCodeNode, network: NetworkProfile) -> Self {
        PaymentCodeAccount { node, network }
    }

    /// Private account from a BIP39 mnemonic and passphrase.
    pub fn from_mnemonic(phrase: &str, passphrase: &str, network: NetworkProfile) -> Result<Self> {
        let node = PaymentCodeNode::from_mnemonic(phrase, passphrase, &network)?;

        Ok(PaymentCodeAccount::new(node, network))
    }

    /// Private account from a raw BIP32 seed.
    pub fn from_seed(seed: &[u8], network: NetworkProfile) -> Result<Self> {
        let node = PaymentCodeNode::from_seed(seed, &network)?;

        Ok(PaymentCodeAccount::new(node, network))
    }

    pub fn from_seed_hex(seed_hex: &str, network: NetworkProfile) -> Result<Self> {
        PaymentCodeAccount::from_seed(&hex::decode(seed_hex)?, network)
    }

    /// Public account for a counterparty's payment code.
    pub fn from_payment_code(code: &str, network: NetworkProfile) -> Result<Self> {
        let node = PaymentCodeNode::from_payment_code_str(code, &network)?;

        Ok(PaymentCodeAccount::new(node, network))
    }

    pub fn node(&self) -> &PaymentCodeNode {
        &self.node
    }

    pub fn network(&self) -> &NetworkProfile {
        &self.network
    }

    pub fn serialized_payment_code(&self) -> String {
        self.node.payment_code().to_string()
    }

    pub fn notification_address(&self) -> Result<String> {
        self.node.notification_address(&self.network)
    }

    /// Address for the `index`-th payment from this account to `receiver`.
    #[cfg(feature = "sending")]
    pub fn payment_address(&self, receiver: &PaymentCodeNode, index: u32) -> Result<String> {
        sending::payment_address(&self.node, receiver, index, &self.network)
    }

    /// Private key for the `index`-th payment `sender` made to this account.
    #[cfg(feature = "receiving")]
    pub fn payment_wallet(&self, sender: &PaymentCodeNode, index: u32) -> Result<SecretKey> {
        receiving::payment_private_key(&self.node, sender, index)
    }

    /// P2PKH address of a public key on this account's network.
    pub fn address_from_key(&self, pubkey: &PublicKey) -> String {
        p2pkh_address(pubkey, &self.network)
    }

    /// P2PKH address of the public key of `secret_key`, e.g. one from [`Self::payment_wallet`].
    pub fn address_from_secret_key(&self, secret_key: &SecretKey) -> String {
        self.address_from_key(&secret_key.public_key(&Secp256k1::signing_only()))
    }

    #[cfg(feature = "sending")]
    pub fn blinded_payment_code(
        &self,
        receiver: &PaymentCodeNode,
        designated_key: &SecretKey,
        outpoint: &Outpoint,
    ) -> Result<BlindedPayload> {
        sending::blinded_payment_code(&self.node, receiver, designated_key, outpoint)
    }

    #[cfg(feature = "receiving")]
    pub fn payment_code_from_raw_notification_transaction(&self, raw_tx_hex: &str) -> Result<String> {
        receiving::payment_code_from_raw_notification_transaction(raw_tx_hex, &self.node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::{MAINNET, TESTNET};

    const ALICE_MNEMONIC: &str =
        "response seminar brave tip suit recall often sound stick owner lottery motion";
    const ALICE_SEED: &str = "64dca76abc9c6f0cf3d212d248c380c4622c8f93b2c425ec6a5567fd5db57e10d3e6f94a2f6af4ac2edb8998072aad92098db73558c323777abf5bd1082d970a";
    const ALICE_PAYMENT_CODE: &str = "PM8TJWomLDXEx1n3vqw3ucNwCqemi2pfsiKQsXpaRh3YvLMnnyt6ifGDcLGQQkMfHna1ByvtRzhbSFpunx9BpGJ441xSGCc784ypNySAHMKURHxdVzhj";

    #[test]
    fn mnemonic_and_seed_agree() {
        let from_mnemonic = PaymentCodeAccount::from_mnemonic(ALICE_MNEMONIC, "", MAINNET).unwrap();
        let from_seed = PaymentCodeAccount::from_seed_hex(ALICE_SEED, MAINNET).unwrap();

        assert_eq!(from_mnemonic, from_seed);
        assert_eq!(from_seed.serialized_payment_code(), ALICE_PAYMENT_CODE);
        assert_eq!(
            from_seed.notification_address().unwrap(),
            "FiF33hy7E5C2ee5dxicrq6oWJmNth8EigV"
        );
    }

    #[test]
    fn public_account_round_trips_code() {
        let alice = PaymentCodeAccount::from_payment_code(ALICE_PAYMENT_CODE, MAINNET).unwrap();
        assert!(!alice.node().is_private());
        assert_eq!(alice.serialized_payment_code(), ALICE_PAYMENT_CODE);
    }

    #[test]
    fn public_account_keeps_features_and_reserved_bytes() {
        let mut payload = crate::PaymentCode::try_from(ALICE_PAYMENT_CODE).unwrap().to_bytes();
        payload[0] = crate::code::VERSION_2;
        payload[1] = crate::code::FEATURES_BITMESSAGE;
        payload[70] = 0xaa;
        let flagged = crate::PaymentCode::from_bytes(&payload).unwrap().to_string();

        let account = PaymentCodeAccount::from_payment_code(&flagged, MAINNET).unwrap();
        assert_eq!(account.serialized_payment_code(), flagged);
    }

    #[test]
    fn testnet_uses_its_own_path() {
        let main = PaymentCodeAccount::from_seed_hex(ALICE_SEED, MAINNET).unwrap();
        let test = PaymentCodeAccount::from_seed_hex(ALICE_SEED, TESTNET).unwrap();

        assert_ne!(main.serialized_payment_code(), test.serialized_payment_code());
        assert!(test.notification_address().unwrap().starts_with(&['m', 'n'][..]));
    }

    #[test]
    fn bad_seed_hex() {
        PaymentCodeAccount::from_seed_hex("not hex", MAINNET).unwrap_err();
    }
}
