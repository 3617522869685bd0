//! # The did:web Method
//!
//! [`WebMethod`] turns key material into a did:web identity for one domain.
//! It holds nothing but the domain and every call is a pure function of its
//! arguments, so one instance can be shared freely across threads.
//!
//! ```text
//! get_keys ─┬─> derive_address ─> derive_public_key (raw)
//!           └─> get_document ─┬─> create_verification_method ───────> derive_public_key (uncompressed)
//!                             └─> create_ecdsa_verification_method ─> derive_public_key (compressed)
//! ```
//!
//! ## Invalid keys
//!
//! A private key that decodes to 32 bytes but is zero or not below the
//! curve order is not an error for the method builders. They report
//! [`MethodOutcome::Invalid`], and documents render that as a placeholder
//! method with empty `id`, `controller` and `publicKeyHex`. The resulting
//! document looks well-formed but references nothing, so callers that
//! need a guarantee should use [`WebMethod::strict_document`] or
//! [`DidDocument::validate`].

use crate::crypto::keys::{
    decode_scalar, derive_public_key, scalar_is_valid, KeyError, PublicKeyFormat,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::address::derive_address;
use super::did::WebDid;
use super::document::{CreatedDocument, DidDocument, DidError};
use super::extended_key::ExtendedKey;
use super::verification::{MethodOutcome, VerificationKind, VerificationMethod};

/// Errors surfaced by [`WebMethod`].
#[derive(Debug, Error)]
pub enum IdentityError {
    /// The key material itself is unusable: bad hex or wrong length.
    #[error("key error: {0}")]
    Key(#[from] KeyError),

    /// Only from the strict entry points: the scalar is zero or not below
    /// the curve order.
    #[error("private key is not a valid secp256k1 scalar")]
    InvalidPrivateKey,

    #[error(transparent)]
    Did(#[from] DidError),
}

/// Everything derived for one extended key.
///
/// `privateKey`, `publicKey` and `chainCode` are copied from the input as
/// hex and are absent when the input lacked them. `address` is recomputed
/// from the private key and is absent without one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyBundle {
    pub did: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub private_key: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public_key: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chain_code: Option<String>,

    pub did_document: DidDocument,
}

impl KeyBundle {
    /// Serialize to pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, DidError> {
        serde_json::to_string_pretty(self).map_err(|e| DidError::Serialization(e.to_string()))
    }
}

/// The did:web identity service for one domain.
///
/// # Examples
///
/// ```
/// use webdid_protocol::identity::WebMethod;
///
/// let method = WebMethod::new("radicalledger.com");
/// let created = method
///     .get_document("e22f5526ce620ec69441c3453d7a0acbc26c3fc7543023f338123fd45c7d44b3")
///     .unwrap();
/// assert_eq!(created.did_document.id, "did:web:radicalledger.com");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct WebMethod {
    domain: String,
}

impl WebMethod {
    /// Create a method for a domain. The domain is used verbatim.
    pub fn new(domain: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
        }
    }

    pub fn domain(&self) -> &str {
        &self.domain
    }

    /// The DID every document from this method is about.
    pub fn did(&self) -> WebDid {
        WebDid::new(self.domain.as_str())
    }

    /// Derive the full bundle for an extended key.
    ///
    /// The address is always recomputed from the private key, never taken
    /// from the extended key's own public key, so a bundle can't end up
    /// with an address that belongs to some other key.
    pub fn get_keys(&self, node: &ExtendedKey) -> Result<KeyBundle, IdentityError> {
        let private_key = node.private_key_hex();
        let chain_code = node.chain_code_hex();
        let public_key = node.public_key_hex();

        let (address, did_document) = match private_key.as_deref() {
            Some(private_key) => {
                let raw_public_key = derive_public_key(private_key, false, true)?;
                let address = derive_address(&raw_public_key)?;
                let created = self.get_document(private_key)?;
                (Some(address), created.did_document)
            }
            None => {
                tracing::warn!(domain = %self.domain, "extended key has no private key");
                let document = DidDocument::from_methods(
                    VerificationMethod::placeholder(VerificationKind::Owner),
                    VerificationMethod::placeholder(VerificationKind::Ecdsa),
                );
                (None, document)
            }
        };

        tracing::debug!(
            domain = %self.domain,
            address = address.as_deref().unwrap_or("-"),
            has_chain_code = chain_code.is_some(),
            "derived key bundle"
        );

        Ok(KeyBundle {
            did: self.did().to_did_string(),
            address,
            private_key,
            public_key,
            chain_code,
            did_document,
        })
    }

    /// Build the DID document for a hex-encoded private key.
    pub fn get_document(&self, private_key_hex: &str) -> Result<CreatedDocument, IdentityError> {
        let owner = self.create_verification_method(private_key_hex, false)?;
        let ecdsa = self.create_ecdsa_verification_method(private_key_hex)?;

        let did_document = DidDocument::from_methods(owner.into_method(), ecdsa.into_method());
        Ok(CreatedDocument { did_document })
    }

    /// Like [`get_document`](Self::get_document), but an invalid scalar is
    /// an error instead of a document full of placeholders.
    pub fn strict_document(&self, private_key_hex: &str) -> Result<DidDocument, IdentityError> {
        let owner = self
            .create_verification_method(private_key_hex, false)?
            .valid()
            .ok_or(IdentityError::InvalidPrivateKey)?;
        let ecdsa = self
            .create_ecdsa_verification_method(private_key_hex)?
            .valid()
            .ok_or(IdentityError::InvalidPrivateKey)?;

        let document = DidDocument::from_methods(owner, ecdsa);
        document.validate()?;
        Ok(document)
    }

    /// Build the owner method: uncompressed key, `#owner` fragment.
    ///
    /// With `include_private_key`, the scalar is attached as lowercase hex
    /// under `privateKeyHex`.
    pub fn create_verification_method(
        &self,
        private_key_hex: &str,
        include_private_key: bool,
    ) -> Result<MethodOutcome, IdentityError> {
        let outcome = self.build_method(VerificationKind::Owner, private_key_hex)?;
        if !include_private_key {
            return Ok(outcome);
        }

        Ok(match outcome {
            MethodOutcome::Valid(mut method) => {
                method.private_key_hex = Some(hex::encode(decode_scalar(private_key_hex)?));
                MethodOutcome::Valid(method)
            }
            invalid => invalid,
        })
    }

    /// Build the ECDSA method: compressed key, `#ecdsa` fragment.
    pub fn create_ecdsa_verification_method(
        &self,
        private_key_hex: &str,
    ) -> Result<MethodOutcome, IdentityError> {
        self.build_method(VerificationKind::Ecdsa, private_key_hex)
    }

    fn build_method(
        &self,
        kind: VerificationKind,
        private_key_hex: &str,
    ) -> Result<MethodOutcome, IdentityError> {
        let scalar = decode_scalar(private_key_hex)?;
        if !scalar_is_valid(&scalar) {
            tracing::warn!(
                domain = %self.domain,
                method = kind.fragment(),
                "private key is not a valid secp256k1 scalar, emitting placeholder method"
            );
            return Ok(MethodOutcome::Invalid(kind));
        }

        let format = kind.key_format();
        let compressed = format == PublicKeyFormat::Compressed;
        let public_key_hex = derive_public_key(private_key_hex, compressed, false)?;

        let did = self.did();
        Ok(MethodOutcome::Valid(VerificationMethod {
            id: did.fragment(kind.fragment()),
            controller: did.to_did_string(),
            type_: kind.key_type().to_string(),
            public_key_hex,
            private_key_hex: None,
        }))
    }
}
