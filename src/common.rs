use core::fmt;

use secp256k1::{PublicKey, Scalar, Secp256k1, SecretKey};

use crate::node::{PaymentCodeNode, NOTIFICATION_INDEX};
use crate::utils::hash::sha256;
use crate::{Error, Result};

/// The x-coordinate of the ECDH point `a·B`.
///
/// Used directly as the message when blinding a payment code.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct SecretPoint([u8; 32]);

impl SecretPoint {
    /// Multiply the counterparty's public key by our private key and keep the x-coordinate.
    pub fn compute(counterparty: &PublicKey, own: &SecretKey) -> Result<SecretPoint> {
        let secp = Secp256k1::verification_only();

        let point = counterparty.mul_tweak(&secp, &Scalar::from(*own))?.serialize();

        let mut x = [0u8; 32];
        x.copy_from_slice(&point[1..]);
        Ok(SecretPoint(x))
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl fmt::Debug for SecretPoint {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("SecretPoint(..)")
    }
}

/// `SHA256` of a [`SecretPoint`], guaranteed to be a valid secp256k1 scalar.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct SharedSecret(SecretKey);

impl SharedSecret {
    /// Compute the shared secret between our private key and the counterparty's public key.
    /// `compute(B, a) == compute(A, b)` for any two key pairs.
    ///
    /// # Errors
    ///
    /// This function will return an error if:
    ///
    /// * The point multiplication fails.
    /// * The hash is not a valid private key ([`Error::InvalidSharedSecret`]). The same inputs
    ///   always reproduce this, so callers should move on to another index instead of retrying.
    pub fn compute(counterparty: &PublicKey, own: &SecretKey) -> Result<SharedSecret> {
        SharedSecret::from_secret_point(&SecretPoint::compute(counterparty, own)?)
    }

    pub fn from_secret_point(point: &SecretPoint) -> Result<SharedSecret> {
        let hash = sha256(point.as_bytes());
        let s = SecretKey::from_slice(&hash).map_err(|_| {
            Error::InvalidSharedSecret("hash of secret point is not a valid private key".to_owned())
        })?;

        Ok(SharedSecret(s))
    }

    pub fn to_bytes(&self) -> [u8; 32] {
        self.0.secret_bytes()
    }

    pub fn to_scalar(&self) -> Scalar {
        Scalar::from(self.0)
    }
}

impl fmt::Debug for SharedSecret {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("SharedSecret(..)")
    }
}

/// `B + s·G`, the one-time public key a sender pays to.
pub(crate) fn calculate_payment_pubkey(B: &PublicKey, s: &SharedSecret) -> Result<PublicKey> {
    let secp = Secp256k1::verification_only();

    Ok(B.add_exp_tweak(&secp, &s.to_scalar())?)
}

/// `b + s`, the private key that spends from [`calculate_payment_pubkey`].
pub(crate) fn calculate_payment_seckey(b: &SecretKey, s: &SharedSecret) -> Result<SecretKey> {
    Ok(b.add_tweak(&s.to_scalar())?)
}

/// Which side of a payment the caller is on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Role {
    /// Derive the public key to pay to.
    Sending,
    /// Derive the private key that spends the payment.
    Receiving,
}

/// The one-time key for a payment index.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OneTimeKey {
    Public(PublicKey),
    Private(SecretKey),
}

impl OneTimeKey {
    pub fn public_key(&self) -> PublicKey {
        match self {
            OneTimeKey::Public(pk) => *pk,
            OneTimeKey::Private(sk) => sk.public_key(&Secp256k1::signing_only()),
        }
    }

    pub fn private_key(&self) -> Option<SecretKey> {
        match self {
            OneTimeKey::Public(_) => None,
            OneTimeKey::Private(sk) => Some(*sk),
        }
    }
}

/// Derive the one-time key shared between two payment codes for payment `index`.
///
/// The sender combines its notification key `a0` with the receiver's child `B_i`
/// and pays to `B_i + SHA256(x(a0·B_i))·G`. The receiver combines its child `b_i`
/// with the sender's notification key `A0` and spends with `b_i + SHA256(x(b_i·A0))`.
/// Both sides therefore arrive at the same point.
///
/// # Errors
///
/// This function will return an error if:
///
/// * `own_root` is a public node.
/// * `index` is a hardened index, or child derivation fails.
/// * The shared secret is not a valid scalar ([`Error::InvalidSharedSecret`]).
pub fn derive_shared_index_key(
    own_root: &PaymentCodeNode,
    counterparty: &PaymentCodeNode,
    index: u32,
    role: Role,
) -> Result<OneTimeKey> {
    match role {
        Role::Sending => {
            let a0 = own_root.child_private_key(NOTIFICATION_INDEX)?;
            let B_i = counterparty.child_public_key(index)?;
            let s = SharedSecret::compute(&B_i, &a0)?;

            Ok(OneTimeKey::Public(calculate_payment_pubkey(&B_i, &s)?))
        }
        Role::Receiving => {
            let b_i = own_root.child_private_key(index)?;
            let A0 = counterparty.child_public_key(NOTIFICATION_INDEX)?;
            let s = SharedSecret::compute(&A0, &b_i)?;

            Ok(OneTimeKey::Private(calculate_payment_seckey(&b_i, &s)?))
        }
    }
}
