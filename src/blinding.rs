//! Blinding of payment codes carried in notification transactions.
//!
//! The x-coordinate and chain code of the sender's payment code are XORed with
//! `HMAC-SHA512(outpoint, x(a·B))`, where the outpoint is the first input of the
//! notification transaction and `a·B` is the ECDH point between the key that
//! signs that input and the receiver's notification key. Version, features,
//! sign and reserved bytes are sent in the clear.
use core::fmt;
use std::str::FromStr;

use crate::{
    code::{PaymentCode, CHAIN_CODE_OFFSET, PAYMENT_CODE_LEN, X_OFFSET},
    common::SecretPoint,
    structs::Outpoint,
    utils::hash::blinding_mask,
    Error, Result,
};

const MASKED_LEN: usize = 64;

/// A payment code payload with its x-coordinate and chain code masked.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct BlindedPayload([u8; PAYMENT_CODE_LEN]);

impl BlindedPayload {
    /// Wrap the 80 bytes found in a notification output.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let payload: [u8; PAYMENT_CODE_LEN] = bytes.try_into().map_err(|_| {
            Error::MalformedNotification(format!(
                "blinded payload must be {} bytes, got {}",
                PAYMENT_CODE_LEN,
                bytes.len()
            ))
        })?;

        Ok(BlindedPayload(payload))
    }

    pub fn as_bytes(&self) -> &[u8; PAYMENT_CODE_LEN] {
        &self.0
    }
}

impl fmt::Debug for BlindedPayload {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "BlindedPayload({})", self)
    }
}

impl fmt::Display for BlindedPayload {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}

impl FromStr for BlindedPayload {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        BlindedPayload::from_bytes(&hex::decode(s)?)
    }
}

/// XOR the mask over bytes 3..67 of the payload. Applying it twice is the identity.
fn apply_mask(
    payload: &[u8; PAYMENT_CODE_LEN],
    mask: &[u8; MASKED_LEN],
) -> [u8; PAYMENT_CODE_LEN] {
    let mut out = *payload;
    out[X_OFFSET..CHAIN_CODE_OFFSET + 32]
        .iter_mut()
        .zip(mask.iter())
        .for_each(|(byte, m)| *byte ^= m);
    out
}

/// Blind a payment code for a notification spending `outpoint`.
pub fn blind(payload: &PaymentCode, secret_point: &SecretPoint, outpoint: &Outpoint) -> BlindedPayload {
    let mask = blinding_mask(&outpoint.to_bytes(), secret_point.as_bytes());

    BlindedPayload(apply_mask(&payload.to_bytes(), &mask))
}

/// Recover a payment code from a blinded payload.
///
/// # Errors
///
/// Returns [`Error::InvalidPaymentCode`] if the unmasked payload is not a valid
/// payment code, which means the wrong key or outpoint was used, or the data is corrupt.
pub fn unblind(
    blinded: &BlindedPayload,
    secret_point: &SecretPoint,
    outpoint: &Outpoint,
) -> Result<PaymentCode> {
    let mask = blinding_mask(&outpoint.to_bytes(), secret_point.as_bytes());

    PaymentCode::from_bytes(&apply_mask(blinded.as_bytes(), &mask))
}
