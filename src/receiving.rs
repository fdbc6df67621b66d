//! The receiving side of payment codes.
//!
//! A receiver watches its notification address. For every transaction paying to it,
//! [`extract_payment_code`] recovers the sender's payment code. From then on,
//! [`payment_private_key`] gives the key that spends the sender's `i`-th payment.
use bitcoin::{consensus::encode::deserialize, Transaction};
use log::{debug, trace, warn};
use secp256k1::SecretKey;

use crate::{
    blinding::unblind,
    code::PaymentCode,
    common::{derive_shared_index_key, OneTimeKey, Role, SecretPoint},
    network::NetworkProfile,
    node::PaymentCodeNode,
    structs::Outpoint,
    utils::{
        common::p2pkh_address,
        receiving::{find_blinded_payload, get_pubkey_from_input},
    },
    Error, Result,
};

/// Get the private key for the `index`-th payment received from `sender`.
///
/// # Arguments
///
/// * `own_root` - The receiver's private payment code node.
/// * `sender` - The sender's node, usually built from the payment code found
///   in its notification transaction.
/// * `index` - The payment index, starting at 0.
///
/// # Returns
///
/// `b_i + SHA256(x(b_i·A0))`, where `b_i` is the receiver's child at `index` and
/// `A0` is the sender's notification key.
///
/// # Errors
///
/// This function will return an error if:
///
/// * `own_root` is a public node.
/// * `index` is hardened.
/// * The shared secret is not a valid scalar. The sender skips such indices too.
pub fn payment_private_key(
    own_root: &PaymentCodeNode,
    sender: &PaymentCodeNode,
    index: u32,
) -> Result<SecretKey> {
    trace!("deriving incoming payment key {}", index);

    derive_shared_index_key(own_root, sender, index, Role::Receiving)?
        .private_key()
        .ok_or_else(|| Error::GenericError("receiving role must produce a private key".to_owned()))
}

/// The P2PKH address of [`payment_private_key`].
pub fn payment_address(
    own_root: &PaymentCodeNode,
    sender: &PaymentCodeNode,
    index: u32,
    network: &NetworkProfile,
) -> Result<String> {
    let key = OneTimeKey::Private(payment_private_key(own_root, sender, index)?);

    Ok(p2pkh_address(&key.public_key(), network))
}

/// Recover the sender's payment code from a notification transaction.
///
/// # Arguments
///
/// * `tx` - The notification transaction.
/// * `own_root` - The receiver's private payment code node.
///
/// # Errors
///
/// This function will return an error if:
///
/// * The transaction has no inputs, or the first input has no compressed public key
///   ([`Error::MalformedNotification`]).
/// * There isn't exactly one `OP_RETURN` output carrying 80 bytes
///   ([`Error::MalformedNotification`]).
/// * `own_root` is a public node.
/// * The unblinded payload is not a valid payment code ([`Error::InvalidPaymentCode`]).
///   This is what happens when the notification was meant for someone else.
pub fn payment_code_from_notification(
    tx: &Transaction,
    own_root: &PaymentCodeNode,
) -> Result<PaymentCode> {
    let blinded = find_blinded_payload(tx)?;

    let first_input = tx.input.first().ok_or_else(|| {
        Error::MalformedNotification("transaction has no inputs".to_owned())
    })?;
    let designated_pubkey = get_pubkey_from_input(first_input).ok_or_else(|| {
        Error::MalformedNotification("first input has no compressed public key".to_owned())
    })?;
    let outpoint = Outpoint::from(first_input.previous_output);

    let secret_point =
        SecretPoint::compute(&designated_pubkey, &own_root.notification_private_key()?)?;

    let code = unblind(&blinded, &secret_point, &outpoint)?;
    debug!("recovered payment code from notification spending {}", outpoint);

    Ok(code)
}

/// Deserialize a raw transaction and recover the sender's payment code from it.
///
/// See [`payment_code_from_notification`] for the possible errors. A transaction that
/// does not decode is reported as [`Error::MalformedNotification`].
pub fn extract_payment_code(raw_tx: &[u8], own_root: &PaymentCodeNode) -> Result<PaymentCode> {
    let tx: Transaction = deserialize(raw_tx)?;

    payment_code_from_notification(&tx, own_root).map_err(|e| {
        warn!("rejected notification transaction {}: {}", tx.txid(), e);
        e
    })
}

/// Like [`extract_payment_code`], for a hex encoded transaction. Returns the
/// payment code in its text form.
pub fn payment_code_from_raw_notification_transaction(
    raw_tx_hex: &str,
    own_root: &PaymentCodeNode,
) -> Result<String> {
    let raw_tx = hex::decode(raw_tx_hex)
        .map_err(|e| Error::MalformedNotification(format!("transaction hex: {}", e)))?;

    Ok(extract_payment_code(&raw_tx, own_root)?.to_string())
}
