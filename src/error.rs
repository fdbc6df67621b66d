use std::fmt;

#[derive(Debug)]
pub enum Error {
    GenericError(String),
    Derivation(String),
    InvalidPaymentCode(String),
    InvalidSharedSecret(String),
    MalformedNotification(String),
    InvalidAddress(String),
    InvalidNetwork(String),
    Secp256k1Error(secp256k1::Error),
    OutOfRangeError(secp256k1::scalar::OutOfRangeError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::GenericError(msg) => write!(f, "{}", msg),
            Error::Derivation(msg) => write!(f, "Derivation error: {}", msg),
            Error::InvalidPaymentCode(msg) => write!(f, "Invalid payment code: {}", msg),
            Error::InvalidSharedSecret(msg) => write!(f, "Invalid shared secret: {}", msg),
            Error::MalformedNotification(msg) => write!(f, "Malformed notification: {}", msg),
            Error::InvalidAddress(msg) => write!(f, "{}", msg),
            Error::InvalidNetwork(msg) => write!(f, "Invalid network: {}", msg),
            Error::Secp256k1Error(e) => e.fmt(f),
            Error::OutOfRangeError(e) => e.fmt(f),
        }
    }
}

impl std::error::Error for Error {}

impl From<hex::FromHexError> for Error {
    fn from(e: hex::FromHexError) -> Self {
        Error::GenericError(e.to_string())
    }
}

impl From<bitcoin::bip32::Error> for Error {
    fn from(e: bitcoin::bip32::Error) -> Self {
        Error::Derivation(e.to_string())
    }
}

impl From<bip39::Error> for Error {
    fn from(e: bip39::Error) -> Self {
        Error::Derivation(format!("mnemonic: {}", e))
    }
}

impl From<bitcoin::consensus::encode::Error> for Error {
    fn from(e: bitcoin::consensus::encode::Error) -> Self {
        Error::MalformedNotification(format!("transaction does not decode: {}", e))
    }
}

impl From<secp256k1::Error> for Error {
    fn from(e: secp256k1::Error) -> Self {
        Error::Secp256k1Error(e)
    }
}

impl From<secp256k1::scalar::OutOfRangeError> for Error {
    fn from(e: secp256k1::scalar::OutOfRangeError) -> Self {
        Error::OutOfRangeError(e)
    }
}
