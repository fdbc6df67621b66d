//! BIP47 reusable payment codes for Groestlcoin.
//!
//! A payment code is a static identifier that two parties combine to derive an
//! unbounded sequence of one-time addresses, without those addresses ever
//! appearing on chain before they are paid to. The sender announces its own
//! code once, blinded, in a notification transaction.
//!
//! The [`sending`] and [`receiving`] modules hold the two halves of the protocol.
//! [`account::PaymentCodeAccount`] wraps both behind a single type.
#![allow(non_snake_case)]
pub mod account;
pub mod blinding;
pub mod code;
mod common;
mod error;
pub mod network;
pub mod node;
mod structs;

#[cfg(feature = "receiving")]
pub mod receiving;
#[cfg(feature = "sending")]
pub mod sending;
pub mod utils;

pub use bitcoin;
pub use bitcoin_hashes;
pub use secp256k1;

pub use crate::blinding::BlindedPayload;
pub use crate::code::PaymentCode;
pub use crate::common::{derive_shared_index_key, OneTimeKey, Role, SecretPoint, SharedSecret};
pub use crate::error::Error;
pub use crate::network::{Network, NetworkProfile, MAINNET, TESTNET};
pub use crate::node::PaymentCodeNode;
pub use crate::structs::{to_internal_byte_order, Outpoint};

pub type Result<T> = std::result::Result<T, Error>;
