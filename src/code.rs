//! Payment code payloads and their text representation.
//!
//! A payment code is an 80 byte payload:
//!
//! | bytes  | field                                 |
//! |--------|---------------------------------------|
//! | 0      | version                               |
//! | 1      | features bitfield                     |
//! | 2      | sign of the public key (0x02 or 0x03) |
//! | 3..35  | x-coordinate of the public key        |
//! | 35..67 | chain code                            |
//! | 67..80 | reserved                              |
//!
//! The text form is the base58-check encoding of `0x47 || payload`, which makes
//! every payment code start with `PM8T`.
use core::fmt;
use std::str::FromStr;

use secp256k1::PublicKey;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use crate::{utils::base58, Error, Result};

pub const PAYMENT_CODE_LEN: usize = 80;

/// Leading byte of the base58 payload, the letter 'P'.
const TEXT_VERSION_BYTE: u8 = 0x47;

const SIGN_OFFSET: usize = 2;
pub(crate) const X_OFFSET: usize = 3;
pub(crate) const CHAIN_CODE_OFFSET: usize = 35;
const RESERVED_OFFSET: usize = 67;

pub const VERSION_1: u8 = 0x01;
pub const VERSION_2: u8 = 0x02;

pub const FEATURES_NONE: u8 = 0x00;
/// Bitmessage notification is signalled with the most significant bit.
pub const FEATURES_BITMESSAGE: u8 = 0x80;

/// A decoded payment code.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct PaymentCode {
    version: u8,
    features: u8,
    public_key: PublicKey,
    chain_code: [u8; 32],
    reserved: [u8; 13],
}

impl PaymentCode {
    /// Construct a version 1 payment code with no features and zeroed reserved bytes.
    pub fn new(public_key: PublicKey, chain_code: [u8; 32]) -> Self {
        PaymentCode {
            version: VERSION_1,
            features: FEATURES_NONE,
            public_key,
            chain_code,
            reserved: [0u8; 13],
        }
    }

    /// Parse and validate an 80 byte payload.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPaymentCode`] if:
    ///
    /// * The payload is not 80 bytes long.
    /// * The version or features byte is not recognized.
    /// * The sign byte is not 0x02 or 0x03, or the x-coordinate is not on the curve.
    pub fn from_bytes(payload: &[u8]) -> Result<Self> {
        if payload.len() != PAYMENT_CODE_LEN {
            return Err(Error::InvalidPaymentCode(format!(
                "payload must be {} bytes, got {}",
                PAYMENT_CODE_LEN,
                payload.len()
            )));
        }

        let version = payload[0];
        if version != VERSION_1 && version != VERSION_2 {
            return Err(Error::InvalidPaymentCode(format!(
                "unsupported version 0x{:02x}",
                version
            )));
        }

        let features = payload[1];
        if features != FEATURES_NONE && features != FEATURES_BITMESSAGE {
            return Err(Error::InvalidPaymentCode(format!(
                "unsupported features 0x{:02x}",
                features
            )));
        }

        let sign = payload[SIGN_OFFSET];
        if sign != 0x02 && sign != 0x03 {
            return Err(Error::InvalidPaymentCode(format!(
                "invalid public key sign byte 0x{:02x}",
                sign
            )));
        }

        let public_key = PublicKey::from_slice(&payload[SIGN_OFFSET..CHAIN_CODE_OFFSET])
            .map_err(|e| Error::InvalidPaymentCode(format!("public key: {}", e)))?;

        let mut chain_code = [0u8; 32];
        chain_code.copy_from_slice(&payload[CHAIN_CODE_OFFSET..RESERVED_OFFSET]);
        let mut reserved = [0u8; 13];
        reserved.copy_from_slice(&payload[RESERVED_OFFSET..]);

        Ok(PaymentCode {
            version,
            features,
            public_key,
            chain_code,
            reserved,
        })
    }

    pub fn to_bytes(&self) -> [u8; PAYMENT_CODE_LEN] {
        let mut payload = [0u8; PAYMENT_CODE_LEN];

        payload[0] = self.version;
        payload[1] = self.features;
        payload[SIGN_OFFSET..CHAIN_CODE_OFFSET].copy_from_slice(&self.public_key.serialize());
        payload[CHAIN_CODE_OFFSET..RESERVED_OFFSET].copy_from_slice(&self.chain_code);
        payload[RESERVED_OFFSET..].copy_from_slice(&self.reserved);

        payload
    }

    pub fn version(&self) -> u8 {
        self.version
    }

    pub fn features(&self) -> u8 {
        self.features
    }

    pub fn public_key(&self) -> PublicKey {
        self.public_key
    }

    pub fn chain_code(&self) -> [u8; 32] {
        self.chain_code
    }

    pub fn reserved(&self) -> [u8; 13] {
        self.reserved
    }
}

impl fmt::Debug for PaymentCode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "PaymentCode({})", self)
    }
}

impl fmt::Display for PaymentCode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut data = Vec::with_capacity(1 + PAYMENT_CODE_LEN);
        data.push(TEXT_VERSION_BYTE);
        data.extend_from_slice(&self.to_bytes());

        write!(f, "{}", base58::encode_check(&data))
    }
}

impl TryFrom<&str> for PaymentCode {
    type Error = Error;

    fn try_from(code: &str) -> Result<Self> {
        let data = base58::decode_check(code).map_err(|e| Error::InvalidPaymentCode(e.to_string()))?;

        match data.split_first() {
            Some((&TEXT_VERSION_BYTE, payload)) => PaymentCode::from_bytes(payload),
            Some((other, _)) => Err(Error::InvalidPaymentCode(format!(
                "wrong prefix byte, expected 0x{:02x}, got 0x{:02x}",
                TEXT_VERSION_BYTE, other
            ))),
            None => Err(Error::InvalidPaymentCode("empty payment code".to_owned())),
        }
    }
}

impl TryFrom<String> for PaymentCode {
    type Error = Error;

    fn try_from(code: String) -> Result<Self> {
        code.as_str().try_into()
    }
}

impl FromStr for PaymentCode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        s.try_into()
    }
}

impl From<PaymentCode> for String {
    fn from(val: PaymentCode) -> Self {
        val.to_string()
    }
}

impl Serialize for PaymentCode {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for PaymentCode {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let code: String = Deserialize::deserialize(deserializer)?;

        PaymentCode::try_from(code.as_str()).map_err(de::Error::custom)
    }
}
