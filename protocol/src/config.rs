//! # Protocol Configuration & Constants
//!
//! Every magic string and byte length used by the DID derivation pipeline
//! lives here. Consumers of the generated documents match on these values
//! literally, so changing any of them is a breaking change to the output
//! format.

// ---------------------------------------------------------------------------
// DID Identifiers
// ---------------------------------------------------------------------------

/// The DID method this crate produces identifiers for.
pub const DID_METHOD: &str = "web";

/// JSON-LD context placed in every generated DID document.
pub const DID_CONTEXT: &str = "https://w3id.org/did/v1";

/// Fragment appended to the controller for the owner verification method.
pub const OWNER_FRAGMENT: &str = "owner";

/// Fragment appended to the controller for the ECDSA verification method.
pub const ECDSA_FRAGMENT: &str = "ecdsa";

// ---------------------------------------------------------------------------
// Verification Method Types
// ---------------------------------------------------------------------------

/// Type tag of the owner method. Carries the uncompressed public key.
pub const OWNER_KEY_TYPE: &str = "Secp256k1VerificationKey2018";

/// Type tag of the ECDSA method. Carries the compressed public key.
pub const ECDSA_KEY_TYPE: &str = "EcdsaSecp256k1VerificationKey2019";

// ---------------------------------------------------------------------------
// Cryptographic Parameters
// ---------------------------------------------------------------------------

/// The only curve we derive keys on.
pub const CURVE: &str = "secp256k1";

/// Secret scalar length in bytes.
pub const PRIVATE_KEY_LENGTH: usize = 32;

/// Chain code length in bytes (BIP-32 extended keys).
pub const CHAIN_CODE_LENGTH: usize = 32;

/// SEC1 compressed point: parity byte + X coordinate.
pub const COMPRESSED_PUBLIC_KEY_LENGTH: usize = 33;

/// SEC1 uncompressed point: 0x04 marker + X + Y.
pub const UNCOMPRESSED_PUBLIC_KEY_LENGTH: usize = 65;

/// Uncompressed point with the 0x04 marker removed.
pub const RAW_PUBLIC_KEY_LENGTH: usize = 64;

/// Leading byte of an SEC1 uncompressed point.
pub const UNCOMPRESSED_POINT_TAG: u8 = 0x04;

/// Hash used for address derivation. Keccak-256 as used by Ethereum, which
/// is not the same function as NIST SHA3-256 (different padding).
pub const ADDRESS_HASH_FUNCTION: &str = "Keccak-256";

/// Address length in bytes: the low 20 bytes of the Keccak-256 digest.
pub const ADDRESS_LENGTH: usize = 20;

/// Prefix prepended to the hex-encoded address.
pub const ADDRESS_PREFIX: &str = "0x";

// ---------------------------------------------------------------------------
// Versioning
// ---------------------------------------------------------------------------

/// Version of the output format. Bumped whenever the JSON shape of a key
/// bundle or DID document changes.
pub const FORMAT_VERSION: &str = "0.1.0";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn public_key_lengths_are_consistent() {
        assert_eq!(COMPRESSED_PUBLIC_KEY_LENGTH, 1 + PRIVATE_KEY_LENGTH);
        assert_eq!(UNCOMPRESSED_PUBLIC_KEY_LENGTH, 1 + RAW_PUBLIC_KEY_LENGTH);
        assert_eq!(RAW_PUBLIC_KEY_LENGTH, 2 * PRIVATE_KEY_LENGTH);
    }

    #[test]
    fn key_types_are_distinct() {
        assert_ne!(OWNER_KEY_TYPE, ECDSA_KEY_TYPE);
        assert_ne!(OWNER_FRAGMENT, ECDSA_FRAGMENT);
    }
}
