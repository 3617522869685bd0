//! # Verification Methods
//!
//! A did:web document produced by this crate always lists the same key
//! twice, in two conventions:
//!
//! | Kind | `type` | Key encoding | Fragment |
//! |------|--------|--------------|----------|
//! | Owner | `Secp256k1VerificationKey2018` | uncompressed, `04` + X + Y | `#owner` |
//! | Ecdsa | `EcdsaSecp256k1VerificationKey2019` | compressed, `02`/`03` + X | `#ecdsa` |
//!
//! Building a method can fail softly: when the private key is not a usable
//! scalar, the builders return [`MethodOutcome::Invalid`] instead of an
//! error. Rust callers can match on that. Documents still render it, as the
//! empty placeholder that existing consumers of the JSON format expect.

use crate::config::{ECDSA_FRAGMENT, ECDSA_KEY_TYPE, OWNER_FRAGMENT, OWNER_KEY_TYPE};
use crate::crypto::keys::PublicKeyFormat;
use serde::{Deserialize, Serialize};

/// Which of the two verification method conventions a method follows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VerificationKind {
    Owner,
    Ecdsa,
}

impl VerificationKind {
    /// The `type` tag written into the document.
    pub fn key_type(self) -> &'static str {
        match self {
            VerificationKind::Owner => OWNER_KEY_TYPE,
            VerificationKind::Ecdsa => ECDSA_KEY_TYPE,
        }
    }

    /// The DID URL fragment, without the `#`.
    pub fn fragment(self) -> &'static str {
        match self {
            VerificationKind::Owner => OWNER_FRAGMENT,
            VerificationKind::Ecdsa => ECDSA_FRAGMENT,
        }
    }

    /// Public key encoding embedded in `publicKeyHex`.
    pub fn key_format(self) -> PublicKeyFormat {
        match self {
            VerificationKind::Owner => PublicKeyFormat::Uncompressed,
            VerificationKind::Ecdsa => PublicKeyFormat::Compressed,
        }
    }

    /// Reverse lookup from a `type` tag.
    pub fn from_key_type(key_type: &str) -> Option<Self> {
        match key_type {
            OWNER_KEY_TYPE => Some(VerificationKind::Owner),
            ECDSA_KEY_TYPE => Some(VerificationKind::Ecdsa),
            _ => None,
        }
    }
}

/// A verification method entry in a DID Document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationMethod {
    /// DID URL of this method: `<controller>#<fragment>`.
    pub id: String,

    /// The DID that controls this method.
    pub controller: String,

    /// One of the two key type tags.
    #[serde(rename = "type")]
    pub type_: String,

    /// The public key, hex-encoded in the encoding the type calls for.
    #[serde(rename = "publicKeyHex")]
    pub public_key_hex: String,

    /// The private scalar as lowercase hex. Only set on request, and only
    /// on owner methods.
    #[serde(rename = "privateKeyHex", default, skip_serializing_if = "Option::is_none")]
    pub private_key_hex: Option<String>,
}

impl VerificationMethod {
    /// The placeholder rendered for a key that failed validation: every
    /// identity field empty, the type tag still set.
    pub fn placeholder(kind: VerificationKind) -> Self {
        Self {
            id: String::new(),
            controller: String::new(),
            type_: kind.key_type().to_string(),
            public_key_hex: String::new(),
            private_key_hex: None,
        }
    }

    /// Whether this is the empty placeholder.
    pub fn is_placeholder(&self) -> bool {
        self.id.is_empty() && self.controller.is_empty() && self.public_key_hex.is_empty()
    }

    /// Kind implied by the `type` tag, if it is one we know.
    pub fn kind(&self) -> Option<VerificationKind> {
        VerificationKind::from_key_type(&self.type_)
    }
}

/// Result of building a verification method from a private key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MethodOutcome {
    /// The key was a valid scalar and the method is fully populated.
    Valid(VerificationMethod),
    /// The key decoded fine but is zero or not below the curve order.
    Invalid(VerificationKind),
}

impl MethodOutcome {
    pub fn is_valid(&self) -> bool {
        matches!(self, MethodOutcome::Valid(_))
    }

    pub fn kind(&self) -> Option<VerificationKind> {
        match self {
            MethodOutcome::Valid(method) => method.kind(),
            MethodOutcome::Invalid(kind) => Some(*kind),
        }
    }

    /// The populated method, if any.
    pub fn valid(self) -> Option<VerificationMethod> {
        match self {
            MethodOutcome::Valid(method) => Some(method),
            MethodOutcome::Invalid(_) => None,
        }
    }

    /// Render for serialization, turning `Invalid` into the placeholder.
    pub fn into_method(self) -> VerificationMethod {
        match self {
            MethodOutcome::Valid(method) => method,
            MethodOutcome::Invalid(kind) => VerificationMethod::placeholder(kind),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_tables() {
        assert_eq!(VerificationKind::Owner.key_type(), "Secp256k1VerificationKey2018");
        assert_eq!(VerificationKind::Ecdsa.key_type(), "EcdsaSecp256k1VerificationKey2019");
        assert_eq!(VerificationKind::Owner.fragment(), "owner");
        assert_eq!(VerificationKind::Ecdsa.fragment(), "ecdsa");
        assert_eq!(VerificationKind::Owner.key_format(), PublicKeyFormat::Uncompressed);
        assert_eq!(VerificationKind::Ecdsa.key_format(), PublicKeyFormat::Compressed);
    }

    #[test]
    fn key_type_reverse_lookup() {
        for kind in [VerificationKind::Owner, VerificationKind::Ecdsa] {
            assert_eq!(VerificationKind::from_key_type(kind.key_type()), Some(kind));
        }
        assert_eq!(VerificationKind::from_key_type("Ed25519VerificationKey2020"), None);
    }

    #[test]
    fn invalid_outcome_renders_placeholder() {
        let method = MethodOutcome::Invalid(VerificationKind::Ecdsa).into_method();
        assert_eq!(method.id, "");
        assert_eq!(method.controller, "");
        assert_eq!(method.public_key_hex, "");
        assert_eq!(method.type_, "EcdsaSecp256k1VerificationKey2019");
        assert!(method.is_placeholder());
    }

    #[test]
    fn placeholder_json_shape() {
        let method = VerificationMethod::placeholder(VerificationKind::Owner);
        let value = serde_json::to_value(&method).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "id": "",
                "controller": "",
                "type": "Secp256k1VerificationKey2018",
                "publicKeyHex": ""
            })
        );
    }

    #[test]
    fn private_key_field_serialized_only_when_set() {
        let mut method = VerificationMethod::placeholder(VerificationKind::Owner);
        method.private_key_hex = Some("01".repeat(32));
        let value = serde_json::to_value(&method).unwrap();
        assert_eq!(value["privateKeyHex"], "01".repeat(32));
    }

    #[test]
    fn outcome_accessors() {
        let valid = MethodOutcome::Valid(VerificationMethod::placeholder(VerificationKind::Owner));
        assert!(valid.is_valid());
        assert_eq!(valid.kind(), Some(VerificationKind::Owner));
        assert!(valid.valid().is_some());

        let invalid = MethodOutcome::Invalid(VerificationKind::Ecdsa);
        assert!(!invalid.is_valid());
        assert_eq!(invalid.kind(), Some(VerificationKind::Ecdsa));
        assert!(invalid.valid().is_none());
    }
}
