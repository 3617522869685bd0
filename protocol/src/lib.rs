// Copyright (c) 2026 ALAS Technology. MIT License.
// See LICENSE for details.

//! # webdid: did:web Identities from secp256k1 Keys
//!
//! Turns a domain name and a secp256k1 private key into everything a
//! did:web deployment needs: the public key in both SEC1 encodings, the
//! Keccak-derived account address and a DID document listing both
//! verification methods.
//!
//! ## Architecture
//!
//! - **config**: fixed identifiers, type tags and lengths.
//! - **crypto**: scalar validation, public key derivation and Keccak-256.
//! - **identity**: addresses, DIDs, verification methods, documents and the
//!   [`WebMethod`](identity::WebMethod) service that ties them together.
//!
//! ## Quick Start
//!
//! ```
//! use webdid_protocol::identity::{ExtendedKey, WebMethod};
//!
//! let node = ExtendedKey::from_hex(
//!     "e22f5526ce620ec69441c3453d7a0acbc26c3fc7543023f338123fd45c7d44b3",
//! )
//! .unwrap();
//!
//! let bundle = WebMethod::new("radicalledger.com").get_keys(&node).unwrap();
//! assert_eq!(bundle.did, "did:web:radicalledger.com");
//! assert_eq!(
//!     bundle.address.as_deref(),
//!     Some("0x022b971dff0c43305e691ded7a14367af19d6407")
//! );
//! ```
//!
//! ## Design Philosophy
//!
//! 1. No curve math of our own. `k256` and `sha3` do the arithmetic.
//! 2. Everything is a pure function of its inputs. No I/O, no global state.
//! 3. Private key material never reaches a log line or a `Debug` string.

pub mod config;
pub mod crypto;
pub mod identity;
