//! The sending side of payment codes.
//!
//! A sender first announces its payment code to the receiver with a notification
//! transaction, built around [`blinded_payment_code`] and [`notification_script`].
//! After that, [`payment_address`] gives the `i`-th address to pay the receiver to.
//! The receiver finds the matching private key with
//! [`crate::receiving::payment_private_key`].
use log::trace;
use secp256k1::{PublicKey, SecretKey};

use crate::{
    blinding::{blind, BlindedPayload},
    common::{derive_shared_index_key, OneTimeKey, Role, SecretPoint},
    network::NetworkProfile,
    node::PaymentCodeNode,
    structs::Outpoint,
    utils::common::p2pkh_address,
    Error, Result,
};

pub use crate::utils::sending::notification_script;

/// Get the one-time public key for the `index`-th payment to `receiver`.
///
/// # Arguments
///
/// * `own_root` - The sender's private payment code node.
/// * `receiver` - The receiver's node, usually built from its payment code.
/// * `index` - The payment index, starting at 0.
///
/// # Returns
///
/// `B_i + SHA256(x(a0·B_i))·G`, where `a0` is the sender's notification key and
/// `B_i` is the receiver's child at `index`.
///
/// # Errors
///
/// This function will return an error if:
///
/// * `own_root` is a public node.
/// * `index` is hardened.
/// * The shared secret is not a valid scalar. Callers should skip to the next index.
pub fn payment_pubkey(
    own_root: &PaymentCodeNode,
    receiver: &PaymentCodeNode,
    index: u32,
) -> Result<PublicKey> {
    trace!("deriving outgoing payment key {}", index);

    match derive_shared_index_key(own_root, receiver, index, Role::Sending)? {
        OneTimeKey::Public(pubkey) => Ok(pubkey),
        OneTimeKey::Private(_) => Err(Error::GenericError(
            "sending role must produce a public key".to_owned(),
        )),
    }
}

/// The P2PKH address of [`payment_pubkey`].
pub fn payment_address(
    own_root: &PaymentCodeNode,
    receiver: &PaymentCodeNode,
    index: u32,
    network: &NetworkProfile,
) -> Result<String> {
    Ok(p2pkh_address(
        &payment_pubkey(own_root, receiver, index)?,
        network,
    ))
}

/// Blind the sender's payment code for a notification transaction to `receiver`.
///
/// # Arguments
///
/// * `own_root` - The sender's payment code node. Only its payment code is used.
/// * `receiver` - The receiver's node.
/// * `designated_key` - The private key that will sign the first input of the
///   notification transaction.
/// * `outpoint` - The output spent by that first input.
///
/// # Returns
///
/// The 80 byte payload to place behind `OP_RETURN`, see [`notification_script`].
///
/// # Errors
///
/// This function will return an error if the receiver's notification key can't be
/// derived or the ECDH multiplication fails.
pub fn blinded_payment_code(
    own_root: &PaymentCodeNode,
    receiver: &PaymentCodeNode,
    designated_key: &SecretKey,
    outpoint: &Outpoint,
) -> Result<BlindedPayload> {
    let secret_point = SecretPoint::compute(&receiver.notification_public_key()?, designated_key)?;

    Ok(blind(&own_root.payment_code(), &secret_point, outpoint))
}
