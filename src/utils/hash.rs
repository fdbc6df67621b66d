use bitcoin_hashes::{hash160, hmac, sha256, sha512, Hash, HashEngine};
use groestl::{Digest, Groestl512};

/// `Groestl512(Groestl512(data))`, the Groestlcoin base58 checksum hash.
pub(crate) fn double_groestl512(data: &[u8]) -> [u8; 64] {
    let first = Groestl512::digest(data);
    let second = Groestl512::digest(first);

    let mut out = [0u8; 64];
    out.copy_from_slice(&second);
    out
}

pub(crate) fn sha256(data: &[u8]) -> [u8; 32] {
    sha256::Hash::hash(data).to_byte_array()
}

pub(crate) fn hash160(data: &[u8]) -> [u8; 20] {
    hash160::Hash::hash(data).to_byte_array()
}

/// HMAC-SHA512 keyed by the serialized outpoint over the ECDH x-coordinate.
pub(crate) fn blinding_mask(outpoint: &[u8; 36], secret_point: &[u8; 32]) -> [u8; 64] {
    let mut eng = hmac::HmacEngine::<sha512::Hash>::new(outpoint);
    eng.input(secret_point);
    hmac::Hmac::<sha512::Hash>::from_engine(eng).to_byte_array()
}
