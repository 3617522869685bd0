//! # Extended Keys
//!
//! The input record handed over by a hierarchical wallet: a private key,
//! the matching public key and the chain code of the derivation node. Every
//! field is optional because neutered (public-only) nodes exist and callers
//! sometimes hand over partial records. Absent fields flow through to the
//! key bundle as absent; nothing here fails because something is missing.
//!
//! The chain code is never interpreted. It is copied to the output and
//! that's it.
//!
//! JSON form (all hex, all optional):
//!
//! ```json
//! { "privateKey": "e22f…", "chainCode": "dac0…", "publicKey": "0384…" }
//! ```

use crate::crypto::keys::KeyError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Key material of one hierarchical derivation node.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtendedKey {
    #[serde(default, skip_serializing_if = "Option::is_none", with = "hex_bytes")]
    private_key: Option<Vec<u8>>,

    #[serde(default, skip_serializing_if = "Option::is_none", with = "hex_bytes")]
    chain_code: Option<Vec<u8>>,

    #[serde(default, skip_serializing_if = "Option::is_none", with = "hex_bytes")]
    public_key: Option<Vec<u8>>,
}

impl ExtendedKey {
    /// An empty record. Useful as a starting point for the `with_*` builders.
    pub fn new() -> Self {
        Self::default()
    }

    /// A record holding only a private key.
    pub fn from_private_key(private_key: impl Into<Vec<u8>>) -> Self {
        Self {
            private_key: Some(private_key.into()),
            ..Self::default()
        }
    }

    /// A record holding only a hex-encoded private key.
    pub fn from_hex(private_key_hex: &str) -> Result<Self, KeyError> {
        Ok(Self::from_private_key(hex::decode(private_key_hex)?))
    }

    /// Attach a chain code.
    pub fn with_chain_code(mut self, chain_code: impl Into<Vec<u8>>) -> Self {
        self.chain_code = Some(chain_code.into());
        self
    }

    /// Attach a public key, in whatever encoding the wallet produced.
    pub fn with_public_key(mut self, public_key: impl Into<Vec<u8>>) -> Self {
        self.public_key = Some(public_key.into());
        self
    }

    /// Attach a hex-encoded chain code.
    pub fn with_chain_code_hex(self, chain_code_hex: &str) -> Result<Self, KeyError> {
        Ok(self.with_chain_code(hex::decode(chain_code_hex)?))
    }

    /// Attach a hex-encoded public key.
    pub fn with_public_key_hex(self, public_key_hex: &str) -> Result<Self, KeyError> {
        Ok(self.with_public_key(hex::decode(public_key_hex)?))
    }

    /// Parse the JSON form shown in the module docs.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn private_key(&self) -> Option<&[u8]> {
        self.private_key.as_deref()
    }

    pub fn chain_code(&self) -> Option<&[u8]> {
        self.chain_code.as_deref()
    }

    pub fn public_key(&self) -> Option<&[u8]> {
        self.public_key.as_deref()
    }

    pub fn private_key_hex(&self) -> Option<String> {
        self.private_key.as_ref().map(hex::encode)
    }

    pub fn chain_code_hex(&self) -> Option<String> {
        self.chain_code.as_ref().map(hex::encode)
    }

    pub fn public_key_hex(&self) -> Option<String> {
        self.public_key.as_ref().map(hex::encode)
    }
}

impl fmt::Debug for ExtendedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // The private key is reported by presence only.
        f.debug_struct("ExtendedKey")
            .field("private_key", &self.private_key.as_ref().map(|_| "<redacted>"))
            .field("chain_code", &self.chain_code_hex())
            .field("public_key", &self.public_key_hex())
            .finish()
    }
}

/// Serde adapter: `Option<Vec<u8>>` <-> optional hex string.
mod hex_bytes {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Option<Vec<u8>>, s: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(bytes) => s.serialize_some(&hex::encode(bytes)),
            None => s.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<Vec<u8>>, D::Error> {
        let value: Option<String> = Option::deserialize(d)?;
        value
            .map(|s| hex::decode(s).map_err(serde::de::Error::custom))
            .transpose()
    }
}
