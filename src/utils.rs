//! Utility functions for both sending and receiving.
//!
//! This module contains the byte-level building blocks (hashing, base58 and
//! address encoding) that the payment code logic is built on.
pub mod base58;
pub mod common;
pub(crate) mod hash;
#[cfg(feature = "receiving")]
pub mod receiving;
#[cfg(feature = "sending")]
pub mod sending;

// Define OP_CODES used in script template matching for readability
#[cfg(any(feature = "sending", feature = "receiving"))]
const OP_RETURN: u8 = 0x6a;
#[cfg(any(feature = "sending", feature = "receiving"))]
const OP_PUSHDATA1: u8 = 0x4c;

// Only compressed pubkeys are supported for payment codes
#[cfg(feature = "receiving")]
const COMPRESSED_PUBKEY_SIZE: usize = 33;
