//! Sending utility functions.
use crate::{blinding::BlindedPayload, code::PAYMENT_CODE_LEN};

use super::{OP_PUSHDATA1, OP_RETURN};

/// The script of the data-carrier output of a notification transaction:
/// `OP_RETURN OP_PUSHDATA1 0x50 <blinded payment code>`.
///
/// A direct push only covers 75 bytes, so the 80 byte payload needs `OP_PUSHDATA1`.
pub fn notification_script(blinded: &BlindedPayload) -> Vec<u8> {
    let mut script = Vec::with_capacity(3 + PAYMENT_CODE_LEN);
    script.extend_from_slice(&[OP_RETURN, OP_PUSHDATA1, PAYMENT_CODE_LEN as u8]);
    script.extend_from_slice(blinded.as_bytes());
    script
}
