//! Base58 with a Groestlcoin checksum.
//!
//! Payment codes, addresses and WIF keys all append the first four bytes of
//! `Groestl512(Groestl512(payload))` before base58 encoding.
use crate::{utils::hash::double_groestl512, Error, Result};

const CHECKSUM_LEN: usize = 4;

/// Encode `data` with an appended checksum.
pub fn encode_check(data: &[u8]) -> String {
    let checksum = double_groestl512(data);

    let mut buf = Vec::with_capacity(data.len() + CHECKSUM_LEN);
    buf.extend_from_slice(data);
    buf.extend_from_slice(&checksum[..CHECKSUM_LEN]);

    bs58::encode(buf).into_string()
}

/// Decode a base58 string and verify its checksum, returning the payload without it.
pub fn decode_check(s: &str) -> Result<Vec<u8>> {
    let mut data = bs58::decode(s)
        .into_vec()
        .map_err(|e| Error::GenericError(format!("Invalid base58: {}", e)))?;

    if data.len() < CHECKSUM_LEN {
        return Err(Error::GenericError(format!(
            "Base58 data too short for a checksum: {} bytes",
            data.len()
        )));
    }

    let payload_len = data.len() - CHECKSUM_LEN;
    let expected = double_groestl512(&data[..payload_len]);
    if data[payload_len..] != expected[..CHECKSUM_LEN] {
        return Err(Error::GenericError("Base58 checksum mismatch".to_owned()));
    }

    data.truncate(payload_len);
    Ok(data)
}
