//! # did:web Identifiers
//!
//! A did:web identifier is just the domain name hanging off the method
//! prefix:
//!
//! ```text
//! did:web:<domain>
//! ```
//!
//! Example: `did:web:radicalledger.com`
//!
//! The domain is taken verbatim. No normalization, no percent-encoding of
//! ports: whatever the caller configured is what ends up in the document.
//!
//! ## Standards References
//!
//! - [DID Core v1.0](https://www.w3.org/TR/did-core/)
//! - [did:web Method Specification](https://w3c-ccg.github.io/did-method-web/)

use crate::config::DID_METHOD;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::document::DidError;

/// A did:web identifier.
///
/// # Examples
///
/// ```
/// use webdid_protocol::identity::WebDid;
///
/// let did = WebDid::new("radicalledger.com");
/// assert_eq!(did.to_string(), "did:web:radicalledger.com");
/// assert_eq!(did.fragment("owner"), "did:web:radicalledger.com#owner");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WebDid {
    domain: String,
}

impl WebDid {
    /// Wrap a domain. Accepted as-is.
    pub fn new(domain: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
        }
    }

    /// The domain this DID points at.
    pub fn domain(&self) -> &str {
        &self.domain
    }

    /// Return the full DID string: `did:web:<domain>`.
    pub fn to_did_string(&self) -> String {
        format!("did:{}:{}", DID_METHOD, self.domain)
    }

    /// DID URL for a fragment, e.g. `did:web:example.com#owner`.
    pub fn fragment(&self, fragment: &str) -> String {
        format!("{}#{}", self.to_did_string(), fragment)
    }

    /// Parse a DID string back into a [`WebDid`].
    pub fn from_did_string(did: &str) -> Result<Self, DidError> {
        let parts: Vec<&str> = did.splitn(3, ':').collect();
        if parts.len() != 3 {
            return Err(DidError::InvalidFormat(
                "DID must have format 'did:<method>:<identifier>'".into(),
            ));
        }

        if parts[0] != "did" {
            return Err(DidError::InvalidFormat(format!(
                "expected 'did' prefix, got '{}'",
                parts[0]
            )));
        }

        if parts[1] != DID_METHOD {
            return Err(DidError::UnsupportedMethod(parts[1].to_string()));
        }

        if parts[2].is_empty() {
            return Err(DidError::InvalidFormat("empty domain".into()));
        }

        Ok(Self::new(parts[2]))
    }
}

impl fmt::Display for WebDid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_did_string())
    }
}

impl FromStr for WebDid {
    type Err = DidError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_did_string(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn did_string_format() {
        let did = WebDid::new("radicalledger.com");
        assert_eq!(did.to_did_string(), "did:web:radicalledger.com");
        assert_eq!(did.to_string(), did.to_did_string());
    }

    #[test]
    fn fragments() {
        let did = WebDid::new("radicalledger.com");
        assert_eq!(did.fragment("ecdsa"), "did:web:radicalledger.com#ecdsa");
    }

    #[test]
    fn roundtrip_via_string() {
        let did = WebDid::new("example.org");
        let parsed: WebDid = did.to_did_string().parse().unwrap();
        assert_eq!(parsed, did);
        assert_eq!(parsed.domain(), "example.org");
    }

    #[test]
    fn domain_with_path_segments_kept_whole() {
        let did = WebDid::from_did_string("did:web:example.org:user:alice").unwrap();
        assert_eq!(did.domain(), "example.org:user:alice");
    }

    #[test]
    fn invalid_prefix_rejected() {
        let result = WebDid::from_did_string("notadid:web:example.org");
        assert!(matches!(result, Err(DidError::InvalidFormat(_))));
    }

    #[test]
    fn wrong_method_rejected() {
        let result = WebDid::from_did_string("did:ethr:0xabc123");
        assert!(matches!(result, Err(DidError::UnsupportedMethod(_))));
    }

    #[test]
    fn missing_parts_rejected() {
        assert!(WebDid::from_did_string("did:web").is_err());
        assert!(WebDid::from_did_string("did:web:").is_err());
    }
}
