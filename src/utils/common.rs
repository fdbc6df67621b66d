//! Address and private key encoding for a [`NetworkProfile`].
use secp256k1::{PublicKey, SecretKey};

use crate::{
    network::NetworkProfile,
    utils::{base58, hash::hash160},
    Error, Result,
};

const WIF_COMPRESSED_FLAG: u8 = 0x01;

/// Encode the P2PKH address of a compressed public key.
pub fn p2pkh_address(pubkey: &PublicKey, network: &NetworkProfile) -> String {
    let mut data = Vec::with_capacity(21);
    data.push(network.chain.pubkey_hash);
    data.extend_from_slice(&hash160(&pubkey.serialize()));

    base58::encode_check(&data)
}

/// Decode a P2PKH address into its profile and public key hash.
pub fn decode_p2pkh_address(address: &str) -> Result<(NetworkProfile, [u8; 20])> {
    let data = base58::decode_check(address).map_err(|e| Error::InvalidAddress(e.to_string()))?;

    let (version, hash) = match data.split_first() {
        Some((version, hash)) if hash.len() == 20 => (*version, hash),
        _ => {
            return Err(Error::InvalidAddress(format!(
                "Address payload must be 21 bytes, got {}",
                data.len()
            )))
        }
    };

    let network = NetworkProfile::from_pubkey_hash_byte(version).ok_or_else(|| {
        Error::InvalidAddress(format!("Unknown address version byte 0x{:02x}", version))
    })?;

    let mut pubkey_hash = [0u8; 20];
    pubkey_hash.copy_from_slice(hash);

    Ok((network, pubkey_hash))
}

/// Encode a private key in compressed WIF form.
pub fn encode_wif(secret_key: &SecretKey, network: &NetworkProfile) -> String {
    let mut data = Vec::with_capacity(34);
    data.push(network.chain.wif);
    data.extend_from_slice(&secret_key.secret_bytes());
    data.push(WIF_COMPRESSED_FLAG);

    base58::encode_check(&data)
}

/// Decode a WIF private key. Only keys flagged for compressed public keys are accepted.
pub fn decode_wif(wif: &str) -> Result<(SecretKey, NetworkProfile)> {
    let data = base58::decode_check(wif)?;

    if data.len() != 34 || data[33] != WIF_COMPRESSED_FLAG {
        return Err(Error::GenericError(
            "WIF key must encode a compressed private key".to_owned(),
        ));
    }

    let network = NetworkProfile::from_wif_byte(data[0]).ok_or_else(|| {
        Error::InvalidNetwork(format!("Unknown WIF version byte 0x{:02x}", data[0]))
    })?;
    let secret_key = SecretKey::from_slice(&data[1..33])?;

    Ok((secret_key, network))
}
