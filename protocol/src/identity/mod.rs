//! # Identity Module
//!
//! did:web identities derived from secp256k1 key material. A domain plus a
//! private key is all it takes; everything else is computed.
//!
//! The stack is layered:
//!
//! 1. **Extended key**: the wallet's node record (private key, chain code,
//!    public key), all optional.
//! 2. **Address**: Keccak-256 of the raw public key, last 20 bytes, the
//!    familiar `0x…` account string.
//! 3. **DID**: `did:web:<domain>`, with `#owner` and `#ecdsa` fragments.
//! 4. **Verification methods**: the same key twice, uncompressed under the
//!    2018 type tag and compressed under the 2019 one.
//! 5. **Document**: the DID document tying the methods together.
//! 6. **Web method**: the service that runs the whole pipeline for a domain.
//!
//! ## Design Decisions
//!
//! - Hierarchical derivation happens upstream. A node arrives here already
//!   derived and its chain code is passed through untouched.
//! - The address is always recomputed from the private key. A public key
//!   supplied alongside is echoed back, never trusted.
//! - Out-of-range scalars produce placeholder methods, not errors, so the
//!   JSON stays shape-compatible with existing consumers. The strict entry
//!   points exist for callers that want a hard failure.

pub mod address;
pub mod did;
pub mod document;
pub mod extended_key;
pub mod verification;
pub mod web_method;

pub use address::{derive_address, Address};
pub use did::WebDid;
pub use document::{CreatedDocument, DidDocument, DidError, Service};
pub use extended_key::ExtendedKey;
pub use verification::{MethodOutcome, VerificationKind, VerificationMethod};
pub use web_method::{IdentityError, KeyBundle, WebMethod};
