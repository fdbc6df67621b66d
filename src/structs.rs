use std::{fmt, str::FromStr};

use bitcoin_hashes::Hash;

use crate::{Error, Result};

/// Reverse a byte sequence, converting a displayed transaction id into the
/// order used when the transaction is serialized and hashed.
pub fn to_internal_byte_order(data: &[u8]) -> Vec<u8> {
    data.iter().rev().copied().collect()
}

/// The output spent by a notification transaction.
///
/// `txid` is kept in internal byte order, i.e. exactly as it appears inside a
/// serialized transaction input. This is the order the blinding mask is keyed with.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Outpoint {
    pub txid: [u8; 32],
    pub vout: u32,
}

impl Outpoint {
    pub fn new(txid: [u8; 32], vout: u32) -> Self {
        Outpoint { txid, vout }
    }

    /// Build an outpoint from a txid in display (reversed) hex and an output index.
    pub fn from_display_txid(txid: &str, vout: u32) -> Result<Self> {
        let bytes = hex::decode(txid)?;

        let txid: [u8; 32] = to_internal_byte_order(&bytes).try_into().map_err(|_| {
            Error::GenericError(format!("Invalid outpoint hex representation: {}", txid))
        })?;

        Ok(Outpoint { txid, vout })
    }

    /// Parse the 36-byte serialized form, `txid || vout` with a little-endian index.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != 36 {
            return Err(Error::GenericError(format!(
                "Serialized outpoint must be 36 bytes, got {}",
                bytes.len()
            )));
        }

        let mut txid = [0u8; 32];
        txid.copy_from_slice(&bytes[..32]);
        let mut vout = [0u8; 4];
        vout.copy_from_slice(&bytes[32..]);

        Ok(Outpoint {
            txid,
            vout: u32::from_le_bytes(vout),
        })
    }

    pub fn to_bytes(&self) -> [u8; 36] {
        let mut buffer = [0u8; 36];
        buffer[..32].copy_from_slice(&self.txid);
        buffer[32..].copy_from_slice(&self.vout.to_le_bytes());
        buffer
    }
}

impl From<bitcoin::OutPoint> for Outpoint {
    fn from(outpoint: bitcoin::OutPoint) -> Self {
        Outpoint {
            txid: outpoint.txid.to_byte_array(),
            vout: outpoint.vout,
        }
    }
}

/// Displays as `<display txid>:<vout>`, the form used by block explorers.
impl fmt::Display for Outpoint {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{}:{}",
            hex::encode(to_internal_byte_order(&self.txid)),
            self.vout
        )
    }
}

/// Accepts either `<display txid>:<vout>` or the 72 hex character serialized form.
impl FromStr for Outpoint {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.split_once(':') {
            Some((txid, vout)) => {
                let vout = vout
                    .parse::<u32>()
                    .map_err(|e| Error::GenericError(format!("Invalid output index: {}", e)))?;
                Outpoint::from_display_txid(txid, vout)
            }
            None => Outpoint::from_bytes(&hex::decode(s)?),
        }
    }
}
