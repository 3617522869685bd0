//! # Cryptographic Primitives
//!
//! Two collaborators do all the real work here and we treat both as black
//! boxes:
//!
//! - **secp256k1** via `k256` for scalar validation and point multiplication.
//! - **Keccak-256** via `sha3` for address hashing.
//!
//! Everything in this module is a thin, typed wrapper around those crates.
//! No curve math is reimplemented.

pub mod hash;
pub mod keys;

pub use hash::keccak256;
pub use keys::{
    decode_scalar, derive_public_key, scalar_is_valid, KeyError, PrivateKey, PublicKey,
    PublicKeyFormat,
};
