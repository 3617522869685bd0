//! # Addresses
//!
//! The blockchain-style address attached to every key bundle. It is the
//! Ethereum construction:
//!
//! ```text
//! public_key (64 bytes, X || Y, no 0x04 marker)
//!     -> Keccak-256 -> 32 bytes
//!     -> last 20 bytes -> "0x" + lowercase hex
//! ```
//!
//! The hash is applied to whatever bytes the caller passes in. Feeding it a
//! compressed or 0x04-tagged key gives a perfectly deterministic but
//! different (and wallet-incompatible) address; picking the right encoding
//! is the caller's job.

use crate::config::{ADDRESS_LENGTH, ADDRESS_PREFIX};
use crate::crypto::hash::keccak256;
use crate::crypto::keys::KeyError;
use std::fmt;

/// A 20-byte address derived from a public key.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Address {
    bytes: [u8; ADDRESS_LENGTH],
}

impl Address {
    /// Hash the public key bytes and keep the low 20 bytes of the digest.
    pub fn from_public_key_bytes(public_key: &[u8]) -> Self {
        let digest = keccak256(public_key);
        let mut bytes = [0u8; ADDRESS_LENGTH];
        bytes.copy_from_slice(&digest[digest.len() - ADDRESS_LENGTH..]);
        Self { bytes }
    }

    /// Hex-decode the public key, then behave like
    /// [`from_public_key_bytes`](Self::from_public_key_bytes).
    pub fn from_public_key_hex(public_key_hex: &str) -> Result<Self, KeyError> {
        let public_key = hex::decode(public_key_hex)?;
        Ok(Self::from_public_key_bytes(&public_key))
    }

    /// Raw address bytes.
    pub fn as_bytes(&self) -> &[u8; ADDRESS_LENGTH] {
        &self.bytes
    }

    /// `0x`-prefixed lowercase hex. Always 42 characters.
    pub fn to_hex(&self) -> String {
        format!("{}{}", ADDRESS_PREFIX, hex::encode(self.bytes))
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({})", self.to_hex())
    }
}

/// Derive the `0x`-prefixed address for a hex-encoded public key.
///
/// Fails only on malformed hex. Any byte length is accepted.
pub fn derive_address(public_key_hex: &str) -> Result<String, KeyError> {
    Address::from_public_key_hex(public_key_hex).map(|address| address.to_hex())
}
