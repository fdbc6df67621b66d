//! Network profiles.
//!
//! A [`NetworkProfile`] pairs the chain parameters needed to encode addresses and keys
//! with the BIP44 coin type that selects the payment code derivation subtree.
//! Profiles are plain values and are passed explicitly to every derivation.
use serde::{Deserialize, Serialize};

use crate::Error;

/// The Groestlcoin network a profile belongs to.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    Mainnet,
    Testnet,
}

impl TryFrom<&str> for Network {
    type Error = crate::Error;

    fn try_from(value: &str) -> std::result::Result<Self, Self::Error> {
        let res = match value {
            "groestlcoin" | "main" | "mainnet" => Self::Mainnet,
            "testnet" | "test" => Self::Testnet,
            _ => return Err(Error::InvalidNetwork(value.to_string())),
        };
        Ok(res)
    }
}

/// Version bytes used when encoding keys and addresses for a chain.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub struct ChainParams {
    /// Leading byte of a P2PKH address.
    pub pubkey_hash: u8,
    /// Leading byte of a WIF-encoded private key.
    pub wif: u8,
    /// Network tag carried by BIP32 extended keys.
    pub bip32_network: bitcoin::Network,
}

#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub struct NetworkProfile {
    pub network: Network,
    pub chain: ChainParams,
    /// Hardened coin type used in `m/47'/coin_type'/0'`.
    pub coin_type: u32,
}

pub const MAINNET: NetworkProfile = NetworkProfile {
    network: Network::Mainnet,
    chain: ChainParams {
        pubkey_hash: 0x24,
        wif: 0x80,
        bip32_network: bitcoin::Network::Bitcoin,
    },
    coin_type: 17,
};

pub const TESTNET: NetworkProfile = NetworkProfile {
    network: Network::Testnet,
    chain: ChainParams {
        pubkey_hash: 0x6f,
        wif: 0xef,
        bip32_network: bitcoin::Network::Testnet,
    },
    coin_type: 1,
};

impl From<Network> for NetworkProfile {
    fn from(network: Network) -> Self {
        match network {
            Network::Mainnet => MAINNET,
            Network::Testnet => TESTNET,
        }
    }
}

impl NetworkProfile {
    /// Look up a profile by its WIF version byte.
    pub fn from_wif_byte(byte: u8) -> Option<Self> {
        [MAINNET, TESTNET].into_iter().find(|p| p.chain.wif == byte)
    }

    /// Look up a profile by its P2PKH version byte.
    pub fn from_pubkey_hash_byte(byte: u8) -> Option<Self> {
        [MAINNET, TESTNET]
            .into_iter()
            .find(|p| p.chain.pubkey_hash == byte)
    }
}
