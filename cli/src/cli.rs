//! # CLI Interface
//!
//! Defines the command-line argument structure for `webdid` using `clap`
//! derive. Supports five subcommands: `keys`, `document`, `method`,
//! `address`, and `version`.

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::logging::LogFormat;

/// did:web identities from secp256k1 keys.
///
/// Derives public keys, the Keccak account address and the DID document
/// for a domain. JSON goes to stdout, logs go to stderr.
#[derive(Parser, Debug)]
#[command(
    name = "webdid",
    about = "did:web key and DID document derivation",
    version,
    propagate_version = true
)]
pub struct WebDidCli {
    /// Log output format.
    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Pretty)]
    pub log_format: LogFormat,

    /// Level (`debug`) or filter directives when `RUST_LOG` is not set.
    #[arg(long, global = true, default_value = "warn")]
    pub log_level: String,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level subcommands for the `webdid` binary.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Derive the full key bundle (DID, address, keys, document) for a
    /// wallet node.
    Keys(KeysArgs),
    /// Print the DID document for a private key.
    Document(DocumentArgs),
    /// Print a single verification method.
    Method(MethodArgs),
    /// Derive the account address of a public key.
    Address(AddressArgs),
    /// Print version information and exit.
    Version,
}

/// The domain and key every derivation starts from.
#[derive(Args, Debug)]
pub struct IdentityArgs {
    /// Domain the did:web identifier points at, e.g. `example.com`.
    #[arg(long, env = "WEBDID_DOMAIN")]
    pub domain: String,

    /// Hex-encoded 32-byte secp256k1 private key.
    ///
    /// **Prefer the environment variable over the flag**: flags end up in
    /// shell history and process listings.
    #[arg(long, env = "WEBDID_PRIVATE_KEY", hide_env_values = true)]
    pub private_key: String,
}

/// Arguments for the `keys` subcommand.
#[derive(Parser, Debug)]
pub struct KeysArgs {
    /// Domain the did:web identifier points at.
    #[arg(long, env = "WEBDID_DOMAIN")]
    pub domain: String,

    /// Hex-encoded private key of the node. Without one, the bundle has no
    /// address and the document holds placeholder methods.
    #[arg(long, env = "WEBDID_PRIVATE_KEY", hide_env_values = true)]
    pub private_key: Option<String>,

    /// Hex-encoded chain code, passed through untouched.
    #[arg(long)]
    pub chain_code: Option<String>,

    /// Hex-encoded public key, passed through untouched.
    #[arg(long)]
    pub public_key: Option<String>,

    /// Read the node from a JSON file (`privateKey`, `chainCode`,
    /// `publicKey`, all hex) instead of the key flags. `-` reads stdin.
    ///
    /// Takes precedence over `--private-key` and `WEBDID_PRIVATE_KEY`.
    #[arg(long, short = 'i', conflicts_with_all = ["chain_code", "public_key"])]
    pub input: Option<PathBuf>,
}

/// Arguments for the `document` subcommand.
#[derive(Parser, Debug)]
pub struct DocumentArgs {
    #[command(flatten)]
    pub identity: IdentityArgs,

    /// Fail on a private key outside the curve's scalar range instead of
    /// printing a document with placeholder methods.
    #[arg(long)]
    pub strict: bool,
}

/// Which verification method to build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum MethodKind {
    /// Uncompressed key, `#owner`.
    Owner,
    /// Compressed key, `#ecdsa`.
    Ecdsa,
}

/// Arguments for the `method` subcommand.
#[derive(Parser, Debug)]
pub struct MethodArgs {
    /// Method to build.
    #[arg(value_enum)]
    pub kind: MethodKind,

    #[command(flatten)]
    pub identity: IdentityArgs,

    /// Attach the private key as `privateKeyHex`. Owner method only.
    #[arg(long)]
    pub include_private_key: bool,
}

/// Arguments for the `address` subcommand.
#[derive(Parser, Debug)]
pub struct AddressArgs {
    /// Hex-encoded public key: 64-byte raw, or 65-byte uncompressed with
    /// the `04` tag.
    #[arg(long)]
    pub public_key: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    const KEY: &str = "e22f5526ce620ec69441c3453d7a0acbc26c3fc7543023f338123fd45c7d44b3";

    #[test]
    fn verify_cli_structure() {
        // Ensures the derive macros produce a valid CLI definition.
        WebDidCli::command().debug_assert();
    }

    #[test]
    fn parse_document() {
        let cli = WebDidCli::try_parse_from([
            "webdid",
            "document",
            "--domain",
            "example.com",
            "--private-key",
            KEY,
            "--strict",
        ])
        .unwrap();
        match cli.command {
            Commands::Document(args) => {
                assert_eq!(args.identity.domain, "example.com");
                assert_eq!(args.identity.private_key, KEY);
                assert!(args.strict);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn parse_method_kind() {
        let cli = WebDidCli::try_parse_from([
            "webdid",
            "method",
            "ecdsa",
            "--domain",
            "example.com",
            "--private-key",
            KEY,
        ])
        .unwrap();
        match cli.command {
            Commands::Method(args) => {
                assert_eq!(args.kind, MethodKind::Ecdsa);
                assert!(!args.include_private_key);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn global_log_flags_after_subcommand() {
        let cli = WebDidCli::try_parse_from([
            "webdid",
            "address",
            "--public-key",
            "00",
            "--log-format",
            "json",
            "--log-level",
            "debug",
        ])
        .unwrap();
        assert_eq!(cli.log_format, LogFormat::Json);
        assert_eq!(cli.log_level, "debug");
    }

    #[test]
    fn input_accepted_alongside_private_key_env() {
        std::env::set_var("WEBDID_PRIVATE_KEY", KEY);
        let result = WebDidCli::try_parse_from([
            "webdid",
            "keys",
            "--domain",
            "example.com",
            "--input",
            "node.json",
        ]);
        std::env::remove_var("WEBDID_PRIVATE_KEY");

        match result.unwrap().command {
            Commands::Keys(args) => {
                assert_eq!(args.input, Some(PathBuf::from("node.json")));
                assert_eq!(args.private_key.as_deref(), Some(KEY));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn input_conflicts_with_key_flags() {
        let result = WebDidCli::try_parse_from([
            "webdid",
            "keys",
            "--domain",
            "example.com",
            "--input",
            "node.json",
            "--chain-code",
            "00",
        ]);
        assert!(result.is_err());
    }
}
