//! # Key Management
//!
//! secp256k1 private/public key handling for did:web identities.
//!
//! Keys usually arrive here already derived by a hierarchical wallet, as
//! hex strings. This module decodes them, checks that the scalar is usable,
//! and produces the public key in whichever SEC1 encoding the caller wants.
//! The curve arithmetic itself is `k256`; nothing in here touches field
//! elements directly.
//!
//! ## Public key encodings
//!
//! | Format | Length | Layout |
//! |--------|--------|--------|
//! | [`PublicKeyFormat::Compressed`] | 33 bytes | `02`/`03` parity byte + X |
//! | [`PublicKeyFormat::Uncompressed`] | 65 bytes | `04` + X + Y |
//! | [`PublicKeyFormat::Raw`] | 64 bytes | X + Y (Ethereum address input) |
//!
//! ## Security considerations
//!
//! - `k256::SecretKey` zeroizes its scalar on drop.
//! - Key bytes are never logged, and `PrivateKey`'s `Debug` impl only shows
//!   the public half.

use crate::config::{
    COMPRESSED_PUBLIC_KEY_LENGTH, PRIVATE_KEY_LENGTH, UNCOMPRESSED_POINT_TAG,
    UNCOMPRESSED_PUBLIC_KEY_LENGTH,
};
use k256::elliptic_curve::sec1::ToEncodedPoint;
use k256::{FieldBytes, SecretKey};
use std::fmt;
use thiserror::Error;

/// Errors that can occur during key operations.
///
/// These never echo the offending key material back, only its shape.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum KeyError {
    #[error("malformed hex input: {0}")]
    MalformedHex(#[from] hex::FromHexError),

    #[error("invalid key length: expected {expected} bytes, got {got}")]
    InvalidLength { expected: usize, got: usize },

    #[error("invalid secret key: scalar is zero or not below the curve order")]
    InvalidScalar,

    #[error("invalid public key bytes: not a valid secp256k1 point")]
    InvalidPublicKey,
}

/// SEC1 encoding to use when serializing a public key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PublicKeyFormat {
    /// 33 bytes, leading parity byte.
    Compressed,
    /// 65 bytes, leading `0x04` marker.
    Uncompressed,
    /// 64 bytes, the uncompressed point with its marker stripped.
    Raw,
}

impl PublicKeyFormat {
    /// Map the two boolean switches callers traditionally pass around
    /// (`compressed`, `strip_prefix`) onto a format. `strip_prefix` only
    /// matters for uncompressed output.
    pub fn from_flags(compressed: bool, strip_prefix: bool) -> Self {
        match (compressed, strip_prefix) {
            (true, _) => PublicKeyFormat::Compressed,
            (false, true) => PublicKeyFormat::Raw,
            (false, false) => PublicKeyFormat::Uncompressed,
        }
    }

    /// Encoded length in bytes.
    pub fn byte_len(self) -> usize {
        match self {
            PublicKeyFormat::Compressed => crate::config::COMPRESSED_PUBLIC_KEY_LENGTH,
            PublicKeyFormat::Uncompressed => crate::config::UNCOMPRESSED_PUBLIC_KEY_LENGTH,
            PublicKeyFormat::Raw => crate::config::RAW_PUBLIC_KEY_LENGTH,
        }
    }
}

// ---------------------------------------------------------------------------
// Scalar helpers
// ---------------------------------------------------------------------------

/// Decode a hex-encoded private key into its 32 raw bytes.
///
/// Only checks the encoding and the length. Whether the bytes form a usable
/// scalar is a separate question, answered by [`scalar_is_valid`].
pub fn decode_scalar(private_key_hex: &str) -> Result<[u8; PRIVATE_KEY_LENGTH], KeyError> {
    let bytes = hex::decode(private_key_hex)?;
    scalar_from_slice(&bytes)
}

fn scalar_from_slice(bytes: &[u8]) -> Result<[u8; PRIVATE_KEY_LENGTH], KeyError> {
    bytes.try_into().map_err(|_| KeyError::InvalidLength {
        expected: PRIVATE_KEY_LENGTH,
        got: bytes.len(),
    })
}

/// The curve's validity predicate: non-zero and strictly below the order.
pub fn scalar_is_valid(scalar: &[u8; PRIVATE_KEY_LENGTH]) -> bool {
    SecretKey::from_bytes(&FieldBytes::from(*scalar)).is_ok()
}

/// Derive the hex-encoded public key for a hex-encoded private key.
///
/// `compressed` selects the 33-byte encoding. For uncompressed output,
/// `strip_prefix` drops the leading `0x04`, leaving the raw 64-byte X||Y
/// pair that Ethereum hashes into addresses.
///
/// Malformed hex, a wrong length or an out-of-range scalar all come back as
/// errors; this function does no other validation.
pub fn derive_public_key(
    private_key_hex: &str,
    compressed: bool,
    strip_prefix: bool,
) -> Result<String, KeyError> {
    let private_key = PrivateKey::from_hex(private_key_hex)?;
    let format = PublicKeyFormat::from_flags(compressed, strip_prefix);
    Ok(private_key.public_key().to_hex(format))
}

// ---------------------------------------------------------------------------
// PrivateKey
// ---------------------------------------------------------------------------

/// A validated secp256k1 private key.
///
/// Construction fails for the zero scalar and for anything at or above the
/// curve order, so holding one of these means the public key exists.
#[derive(Clone)]
pub struct PrivateKey {
    secret: SecretKey,
}

impl PrivateKey {
    /// Build a key from its 32 raw bytes.
    pub fn from_bytes(bytes: &[u8; PRIVATE_KEY_LENGTH]) -> Result<Self, KeyError> {
        let secret =
            SecretKey::from_bytes(&FieldBytes::from(*bytes)).map_err(|_| KeyError::InvalidScalar)?;
        Ok(Self { secret })
    }

    /// Build a key from a byte slice, rejecting anything that isn't exactly
    /// 32 bytes. `k256` itself would left-pad short input, which we don't want.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, KeyError> {
        Self::from_bytes(&scalar_from_slice(bytes)?)
    }

    /// Build a key from its hex encoding.
    pub fn from_hex(private_key_hex: &str) -> Result<Self, KeyError> {
        Self::from_bytes(&decode_scalar(private_key_hex)?)
    }

    /// Raw scalar bytes. Handle with care.
    pub fn to_bytes(&self) -> [u8; PRIVATE_KEY_LENGTH] {
        self.secret.to_bytes().into()
    }

    /// Lowercase hex encoding of the scalar.
    pub fn to_hex(&self) -> String {
        hex::encode(self.secret.to_bytes())
    }

    /// The public key, i.e. the base point multiplied by this scalar.
    pub fn public_key(&self) -> PublicKey {
        PublicKey {
            point: self.secret.public_key(),
        }
    }
}

impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "PrivateKey(pub={})",
            self.public_key().to_hex(PublicKeyFormat::Compressed)
        )
    }
}

impl PartialEq for PrivateKey {
    /// Compared through the public key so secret bytes never go through a
    /// non-constant-time comparison.
    fn eq(&self, other: &Self) -> bool {
        self.public_key() == other.public_key()
    }
}

impl Eq for PrivateKey {}

// ---------------------------------------------------------------------------
// PublicKey
// ---------------------------------------------------------------------------

/// A secp256k1 public key. The encoding is chosen when serializing, not
/// stored.
#[derive(Clone, PartialEq, Eq)]
pub struct PublicKey {
    point: k256::PublicKey,
}

impl PublicKey {
    /// Parse an SEC1-encoded point (compressed or uncompressed).
    ///
    /// Only the `02`/`03` tags at 33 bytes and `04` at 65 bytes are
    /// accepted. `k256` also takes the compact and hybrid encodings, which
    /// never appear in a document.
    pub fn from_sec1_bytes(bytes: &[u8]) -> Result<Self, KeyError> {
        let tag_ok = match bytes.len() {
            COMPRESSED_PUBLIC_KEY_LENGTH => matches!(bytes[0], 0x02 | 0x03),
            UNCOMPRESSED_PUBLIC_KEY_LENGTH => bytes[0] == UNCOMPRESSED_POINT_TAG,
            _ => false,
        };
        if !tag_ok {
            return Err(KeyError::InvalidPublicKey);
        }

        let point = k256::PublicKey::from_sec1_bytes(bytes).map_err(|_| KeyError::InvalidPublicKey)?;
        Ok(Self { point })
    }

    /// Parse a public key in any of the three [`PublicKeyFormat`]s. The raw
    /// 64-byte form gets its `0x04` marker put back before parsing.
    pub fn from_hex(public_key_hex: &str) -> Result<Self, KeyError> {
        let bytes = hex::decode(public_key_hex)?;
        if bytes.len() == PublicKeyFormat::Raw.byte_len() {
            let mut tagged = Vec::with_capacity(bytes.len() + 1);
            tagged.push(UNCOMPRESSED_POINT_TAG);
            tagged.extend_from_slice(&bytes);
            return Self::from_sec1_bytes(&tagged);
        }
        Self::from_sec1_bytes(&bytes)
    }

    /// Encode the point.
    pub fn to_bytes(&self, format: PublicKeyFormat) -> Vec<u8> {
        let compressed = format == PublicKeyFormat::Compressed;
        let encoded = self.point.to_encoded_point(compressed);
        let bytes = encoded.as_bytes();
        match format {
            PublicKeyFormat::Raw => bytes[1..].to_vec(),
            PublicKeyFormat::Compressed | PublicKeyFormat::Uncompressed => bytes.to_vec(),
        }
    }

    /// Lowercase hex of [`to_bytes`](Self::to_bytes).
    pub fn to_hex(&self, format: PublicKeyFormat) -> String {
        hex::encode(self.to_bytes(format))
    }
}

impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex(PublicKeyFormat::Compressed))
    }
}

impl fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PublicKey({})", self.to_hex(PublicKeyFormat::Compressed))
    }
}
