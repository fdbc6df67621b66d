//! Receiving utility functions.
use bitcoin::{script::Instruction, Transaction, TxIn, TxOut};
use secp256k1::PublicKey;

use crate::{blinding::BlindedPayload, code::PAYMENT_CODE_LEN, Error, Result};

use super::{COMPRESSED_PUBKEY_SIZE, OP_PUSHDATA1, OP_RETURN};

/// Get the script body after `OP_RETURN`, if the output is a data carrier.
fn data_carrier_body(output: &TxOut) -> Option<&[u8]> {
    match output.script_pubkey.as_bytes().split_first() {
        Some((&OP_RETURN, body)) => Some(body),
        _ => None,
    }
}

/// Get the payload of a body matching `OP_PUSHDATA1 0x50 <80 bytes>`.
fn notification_payload(body: &[u8]) -> Option<&[u8]> {
    match body {
        [OP_PUSHDATA1, len, payload @ ..]
            if *len as usize == PAYMENT_CODE_LEN && payload.len() == PAYMENT_CODE_LEN =>
        {
            Some(payload)
        }
        _ => None,
    }
}

/// Find the blinded payment code of a notification transaction.
///
/// # Errors
///
/// This function will return [`Error::MalformedNotification`] if:
///
/// * The transaction has no `OP_RETURN` output.
/// * No `OP_RETURN` output is exactly `OP_PUSHDATA1 0x50 <80 bytes>`.
/// * More than one output carries such a payload.
pub fn find_blinded_payload(tx: &Transaction) -> Result<BlindedPayload> {
    let bodies: Vec<&[u8]> = tx.output.iter().filter_map(data_carrier_body).collect();

    if bodies.is_empty() {
        return Err(Error::MalformedNotification(
            "no OP_RETURN output found".to_owned(),
        ));
    }

    let mut candidates = bodies.iter().copied().filter_map(notification_payload);

    match (candidates.next(), candidates.next()) {
        (Some(payload), None) => BlindedPayload::from_bytes(payload),
        (Some(_), Some(_)) => Err(Error::MalformedNotification(
            "more than one OP_RETURN output carries a payment code".to_owned(),
        )),
        (None, _) => Err(Error::MalformedNotification(format!(
            "OP_RETURN output must push {} bytes with OP_PUSHDATA1, got script body {}",
            PAYMENT_CODE_LEN,
            hex::encode(bodies[0])
        ))),
    }
}

/// Get the public key that signed a transaction input.
///
/// For P2PKH spends this is the last push of the script_sig, for P2WPKH spends
/// the last witness element. Only compressed keys are accepted.
pub fn get_pubkey_from_input(txin: &TxIn) -> Option<PublicKey> {
    let from_script_sig = txin
        .script_sig
        .instructions()
        .filter_map(|ins| match ins {
            Ok(Instruction::PushBytes(bytes)) if bytes.len() == COMPRESSED_PUBKEY_SIZE => {
                PublicKey::from_slice(bytes.as_bytes()).ok()
            }
            _ => None,
        })
        .last();

    from_script_sig.or_else(|| {
        txin.witness
            .last()
            .filter(|item| item.len() == COMPRESSED_PUBKEY_SIZE)
            .and_then(|item| PublicKey::from_slice(item).ok())
    })
}
