//! # Hashing Utilities
//!
//! The only hash this crate needs is Keccak-256, the pre-standard variant of
//! SHA-3 that Ethereum adopted. It differs from NIST SHA3-256 only in the
//! padding byte, which is enough to make every digest different. Address
//! derivation must use this one or the addresses won't match any wallet.

use sha3::{Digest, Keccak256};

/// Compute the Keccak-256 digest of the input data.
///
/// # Example
///
/// ```
/// use webdid_protocol::crypto::keccak256;
///
/// let digest = keccak256(b"did:web");
/// assert_eq!(digest.len(), 32);
/// ```
pub fn keccak256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Keccak256::new();
    hasher.update(data);
    hasher.finalize().into()
}
