//! # DID Documents
//!
//! The document produced for a domain always has the same skeleton:
//!
//! - `@context`: `https://w3id.org/did/v1`
//! - `id`: the owner method's controller, `did:web:<domain>`
//! - `publicKey`: exactly one owner method
//! - `verificationMethod`: exactly one ECDSA method
//! - `authentication` / `assertionMethod`: both `[owner id, ecdsa id]`,
//!   in that order
//! - `service`: empty
//!
//! Field names and ordering are part of the output contract. Downstream
//! consumers compare these documents literally.

use crate::config::DID_CONTEXT;
use crate::crypto::keys::PublicKey;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::did::WebDid;
use super::verification::{VerificationKind, VerificationMethod};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors that can occur when parsing identifiers or checking documents.
#[derive(Debug, Error)]
pub enum DidError {
    /// The DID or document does not match the expected format.
    #[error("invalid DID format: {0}")]
    InvalidFormat(String),

    /// The DID method is not "web".
    #[error("unsupported DID method: expected 'web', got '{0}'")]
    UnsupportedMethod(String),

    /// A verification method is missing, malformed or inconsistent.
    #[error("invalid verification method: {0}")]
    InvalidMethod(String),

    /// Serialization error during document generation or parsing.
    #[error("serialization error: {0}")]
    Serialization(String),
}

// ---------------------------------------------------------------------------
// Document Types
// ---------------------------------------------------------------------------

/// A service endpoint entry. Documents built here never carry any, but
/// documents read back from JSON may.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Service {
    pub id: String,

    #[serde(rename = "type")]
    pub type_: String,

    #[serde(rename = "serviceEndpoint")]
    pub service_endpoint: String,
}

/// A DID document for a did:web identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DidDocument {
    /// JSON-LD context URI.
    #[serde(rename = "@context")]
    pub context: String,

    /// The DID string this document describes.
    pub id: String,

    /// The owner method (uncompressed key).
    #[serde(rename = "publicKey")]
    pub public_key: Vec<VerificationMethod>,

    /// The ECDSA method (compressed key).
    #[serde(rename = "verificationMethod")]
    pub verification_method: Vec<VerificationMethod>,

    /// Method ids usable for authentication.
    pub authentication: Vec<String>,

    /// Method ids usable for issuing assertions.
    #[serde(rename = "assertionMethod")]
    pub assertion_method: Vec<String>,

    pub service: Vec<Service>,
}

/// Single-field wrapper returned by document construction, serialized as
/// `{"didDocument": {...}}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedDocument {
    #[serde(rename = "didDocument")]
    pub did_document: DidDocument,
}

impl DidDocument {
    /// Assemble a document from its two methods.
    ///
    /// The document id is taken from the owner method's controller, so a
    /// placeholder owner yields an empty id. That is the compatibility
    /// behavior; use [`validate`](Self::validate) to catch it.
    pub fn from_methods(owner: VerificationMethod, ecdsa: VerificationMethod) -> Self {
        let authentication = vec![owner.id.clone(), ecdsa.id.clone()];

        DidDocument {
            context: DID_CONTEXT.to_string(),
            id: owner.controller.clone(),
            public_key: vec![owner],
            verification_method: vec![ecdsa],
            assertion_method: authentication.clone(),
            authentication,
            service: Vec::new(),
        }
    }

    /// The owner method, if present.
    pub fn owner_method(&self) -> Option<&VerificationMethod> {
        self.public_key.first()
    }

    /// The ECDSA method, if present.
    pub fn ecdsa_method(&self) -> Option<&VerificationMethod> {
        self.verification_method.first()
    }

    /// Serialize this document to a pretty-printed JSON string.
    pub fn to_json(&self) -> Result<String, DidError> {
        serde_json::to_string_pretty(self).map_err(|e| DidError::Serialization(e.to_string()))
    }

    /// Parse a DID Document from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, DidError> {
        serde_json::from_str(json).map_err(|e| DidError::Serialization(e.to_string()))
    }

    /// Check every structural invariant a freshly built document satisfies.
    ///
    /// Checks:
    /// - the context is the DID v1 context
    /// - the id is a did:web DID
    /// - exactly one owner and one ECDSA method, each with the right type,
    ///   controller and id
    /// - the owner key is a 65-byte uncompressed point, the ECDSA key a
    ///   33-byte compressed point, and both encode the same point
    /// - `authentication` and `assertionMethod` are both `[owner, ecdsa]`
    /// - no services
    pub fn validate(&self) -> Result<(), DidError> {
        if self.context != DID_CONTEXT {
            return Err(DidError::InvalidFormat(format!(
                "unexpected context '{}'",
                self.context
            )));
        }

        let did = WebDid::from_did_string(&self.id)?;

        let [owner] = self.public_key.as_slice() else {
            return Err(DidError::InvalidMethod(
                "document must have exactly one owner method".into(),
            ));
        };
        let [ecdsa] = self.verification_method.as_slice() else {
            return Err(DidError::InvalidMethod(
                "document must have exactly one ecdsa method".into(),
            ));
        };

        let owner_key = check_method(owner, &did, VerificationKind::Owner)?;
        let ecdsa_key = check_method(ecdsa, &did, VerificationKind::Ecdsa)?;
        if owner_key != ecdsa_key {
            return Err(DidError::InvalidMethod(
                "owner and ecdsa methods carry different keys".into(),
            ));
        }

        let expected = [owner.id.clone(), ecdsa.id.clone()];
        if self.authentication != expected {
            return Err(DidError::InvalidFormat(
                "authentication must list [owner, ecdsa]".into(),
            ));
        }
        if self.assertion_method != self.authentication {
            return Err(DidError::InvalidFormat(
                "assertionMethod must equal authentication".into(),
            ));
        }

        if !self.service.is_empty() {
            return Err(DidError::InvalidFormat("unexpected service entries".into()));
        }

        Ok(())
    }
}

fn check_method(
    method: &VerificationMethod,
    did: &WebDid,
    kind: VerificationKind,
) -> Result<PublicKey, DidError> {
    if method.kind() != Some(kind) {
        return Err(DidError::InvalidMethod(format!(
            "expected type '{}', got '{}'",
            kind.key_type(),
            method.type_
        )));
    }
    if method.controller != did.to_did_string() {
        return Err(DidError::InvalidMethod(format!(
            "controller '{}' does not match document id",
            method.controller
        )));
    }
    if method.id != did.fragment(kind.fragment()) {
        return Err(DidError::InvalidMethod(format!(
            "unexpected method id '{}'",
            method.id
        )));
    }

    let expected_len = kind.key_format().byte_len() * 2;
    if method.public_key_hex.len() != expected_len {
        return Err(DidError::InvalidMethod(format!(
            "{} key must be {} hex chars, got {}",
            kind.fragment(),
            expected_len,
            method.public_key_hex.len()
        )));
    }
    PublicKey::from_hex(&method.public_key_hex)
        .map_err(|e| DidError::InvalidMethod(format!("{} key: {}", kind.fragment(), e)))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::keys::{PrivateKey, PublicKeyFormat};

    const DOMAIN: &str = "radicalledger.com";

    fn method(kind: VerificationKind, key: &PrivateKey) -> VerificationMethod {
        let did = WebDid::new(DOMAIN);
        VerificationMethod {
            id: did.fragment(kind.fragment()),
            controller: did.to_did_string(),
            type_: kind.key_type().to_string(),
            public_key_hex: key.public_key().to_hex(kind.key_format()),
            private_key_hex: None,
        }
    }

    fn sample() -> DidDocument {
        let key = PrivateKey::from_hex(&"11".repeat(32)).unwrap();
        DidDocument::from_methods(
            method(VerificationKind::Owner, &key),
            method(VerificationKind::Ecdsa, &key),
        )
    }

    #[test]
    fn assembled_document_shape() {
        let doc = sample();
        assert_eq!(doc.context, "https://w3id.org/did/v1");
        assert_eq!(doc.id, "did:web:radicalledger.com");
        assert_eq!(doc.public_key.len(), 1);
        assert_eq!(doc.verification_method.len(), 1);
        assert_eq!(
            doc.authentication,
            vec![
                "did:web:radicalledger.com#owner".to_string(),
                "did:web:radicalledger.com#ecdsa".to_string()
            ]
        );
        assert_eq!(doc.assertion_method, doc.authentication);
        assert!(doc.service.is_empty());
        assert!(doc.validate().is_ok());
    }

    #[test]
    fn json_field_order() {
        let json = serde_json::to_string(&sample()).unwrap();
        let positions: Vec<usize> = [
            "\"@context\"",
            "\"id\"",
            "\"publicKey\"",
            "\"verificationMethod\"",
            "\"authentication\"",
            "\"assertionMethod\"",
            "\"service\"",
        ]
        .iter()
        .map(|key| json.find(key).unwrap())
        .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]), "got: {}", json);
    }

    #[test]
    fn json_roundtrip() {
        let doc = sample();
        let parsed = DidDocument::from_json(&doc.to_json().unwrap()).unwrap();
        assert_eq!(parsed, doc);
    }

    #[test]
    fn created_document_wrapper_key() {
        let wrapped = CreatedDocument {
            did_document: sample(),
        };
        let value = serde_json::to_value(&wrapped).unwrap();
        assert!(value.get("didDocument").is_some());
    }

    #[test]
    fn placeholder_document_fails_validation() {
        let doc = DidDocument::from_methods(
            VerificationMethod::placeholder(VerificationKind::Owner),
            VerificationMethod::placeholder(VerificationKind::Ecdsa),
        );
        assert_eq!(doc.id, "");
        assert_eq!(doc.authentication, vec![String::new(), String::new()]);
        assert!(doc.validate().is_err());
    }

    #[test]
    fn swapped_methods_rejected() {
        let mut doc = sample();
        std::mem::swap(&mut doc.public_key, &mut doc.verification_method);
        assert!(matches!(doc.validate(), Err(DidError::InvalidMethod(_))));
    }

    #[test]
    fn mismatched_keys_rejected() {
        let other = PrivateKey::from_hex(&"22".repeat(32)).unwrap();
        let mut doc = sample();
        doc.verification_method[0].public_key_hex =
            other.public_key().to_hex(PublicKeyFormat::Compressed);
        assert!(matches!(doc.validate(), Err(DidError::InvalidMethod(_))));
    }

    #[test]
    fn non_standard_key_tags_rejected() {
        for seed in ["22", "33", "55"] {
            let key = PrivateKey::from_hex(&seed.repeat(32)).unwrap();
            let mut doc = DidDocument::from_methods(
                method(VerificationKind::Owner, &key),
                method(VerificationKind::Ecdsa, &key),
            );
            assert!(doc.validate().is_ok());

            let compressed = doc.verification_method[0].public_key_hex.clone();
            doc.verification_method[0].public_key_hex = format!("05{}", &compressed[2..]);
            assert!(matches!(doc.validate(), Err(DidError::InvalidMethod(_))));
        }

        let mut doc = sample();
        let uncompressed = doc.public_key[0].public_key_hex.clone();
        doc.public_key[0].public_key_hex = format!("06{}", &uncompressed[2..]);
        assert!(matches!(doc.validate(), Err(DidError::InvalidMethod(_))));
    }

    #[test]
    fn reordered_authentication_rejected() {
        let mut doc = sample();
        doc.authentication.reverse();
        assert!(matches!(doc.validate(), Err(DidError::InvalidFormat(_))));
    }

    #[test]
    fn diverging_assertion_method_rejected() {
        let mut doc = sample();
        doc.assertion_method.pop();
        assert!(doc.validate().is_err());
    }

    #[test]
    fn services_rejected() {
        let mut doc = sample();
        doc.service.push(Service {
            id: format!("{}#linked-domain", doc.id),
            type_: "LinkedDomains".into(),
            service_endpoint: "https://radicalledger.com".into(),
        });
        assert!(doc.validate().is_err());
    }

    #[test]
    fn wrong_context_rejected() {
        let mut doc = sample();
        doc.context = "https://www.w3.org/ns/did/v1".into();
        assert!(matches!(doc.validate(), Err(DidError::InvalidFormat(_))));
    }
}
