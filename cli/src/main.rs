// Copyright (c) 2026 ALAS Technology. MIT License.
// See LICENSE for details.

//! # webdid
//!
//! Entry point for the `webdid` binary. Parses CLI arguments, initializes
//! logging, runs one derivation and prints the result as JSON.
//!
//! The binary supports five subcommands:
//!
//! - `keys`:     full key bundle for a wallet node
//! - `document`: DID document for a private key
//! - `method`:   a single owner or ECDSA verification method
//! - `address`:  account address of a public key
//! - `version`:  print build version information

mod cli;
mod logging;

use anyhow::{bail, Context, Result};
use clap::Parser;
use serde::Serialize;
use std::io::Read;
use std::path::Path;

use webdid_protocol::config::{ADDRESS_HASH_FUNCTION, CHAIN_CODE_LENGTH, CURVE, FORMAT_VERSION};
use webdid_protocol::identity::{derive_address, CreatedDocument, ExtendedKey, WebMethod};

use cli::{Commands, MethodKind, WebDidCli};

fn main() -> Result<()> {
    let cli = WebDidCli::parse();

    if let Commands::Version = cli.command {
        print_version();
        return Ok(());
    }

    logging::init_logging(&cli.log_level, cli.log_format)
        .context("failed to initialize logging")?;

    match cli.command {
        Commands::Keys(args) => derive_keys(args),
        Commands::Document(args) => derive_document(args),
        Commands::Method(args) => derive_method(args),
        Commands::Address(args) => derive_account_address(args),
        Commands::Version => Ok(()),
    }
}

/// Derives and prints the full key bundle.
fn derive_keys(args: cli::KeysArgs) -> Result<()> {
    let node = load_node(&args)?;

    if let Some(chain_code) = node.chain_code() {
        if chain_code.len() != CHAIN_CODE_LENGTH {
            tracing::warn!(
                expected = CHAIN_CODE_LENGTH,
                got = chain_code.len(),
                "chain code has unusual length, passing it through anyway"
            );
        }
    }

    let bundle = WebMethod::new(args.domain.as_str())
        .get_keys(&node)
        .with_context(|| format!("failed to derive keys for {}", args.domain))?;

    tracing::info!(did = %bundle.did, "key bundle derived");
    emit(&bundle)
}

/// Prints the DID document, optionally refusing placeholder output.
fn derive_document(args: cli::DocumentArgs) -> Result<()> {
    let method = WebMethod::new(args.identity.domain.as_str());

    let created = if args.strict {
        let did_document = method
            .strict_document(&args.identity.private_key)
            .context("refusing to build document")?;
        CreatedDocument { did_document }
    } else {
        method
            .get_document(&args.identity.private_key)
            .with_context(|| format!("failed to build document for {}", method.domain()))?
    };

    emit(&created)
}

/// Prints a single verification method.
fn derive_method(args: cli::MethodArgs) -> Result<()> {
    let method = WebMethod::new(args.identity.domain.as_str());
    let private_key = &args.identity.private_key;

    let outcome = match args.kind {
        MethodKind::Owner => method.create_verification_method(private_key, args.include_private_key),
        MethodKind::Ecdsa => {
            if args.include_private_key {
                bail!("--include-private-key only applies to the owner method");
            }
            method.create_ecdsa_verification_method(private_key)
        }
    }
    .context("failed to build verification method")?;

    if !outcome.is_valid() {
        tracing::warn!("private key is outside the secp256k1 scalar range, printing placeholder");
    }

    emit(&outcome.into_method())
}

fn derive_account_address(args: cli::AddressArgs) -> Result<()> {
    let address = derive_address(&args.public_key).context("invalid --public-key")?;
    emit(&serde_json::json!({ "address": address }))
}

/// Picks the node source. `--input` wins over the key flags, since the
/// private key may have come from the environment.
fn load_node(args: &cli::KeysArgs) -> Result<ExtendedKey> {
    match &args.input {
        Some(path) => {
            if args.private_key.is_some() {
                tracing::debug!("private key flag ignored, reading node from input");
            }
            read_node(path)
        }
        None => node_from_flags(args),
    }
}

/// Loads an extended key from a JSON file, or stdin for `-`.
fn read_node(path: &Path) -> Result<ExtendedKey> {
    let json = if path.as_os_str() == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("failed to read extended key from stdin")?;
        buf
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?
    };

    ExtendedKey::from_json(&json)
        .with_context(|| format!("failed to parse extended key from {}", path.display()))
}

/// Builds an extended key from the individual hex flags.
fn node_from_flags(args: &cli::KeysArgs) -> Result<ExtendedKey> {
    let mut node = match &args.private_key {
        Some(private_key) => ExtendedKey::from_hex(private_key).context("invalid --private-key")?,
        None => ExtendedKey::new(),
    };
    if let Some(chain_code) = &args.chain_code {
        node = node
            .with_chain_code_hex(chain_code)
            .context("invalid --chain-code")?;
    }
    if let Some(public_key) = &args.public_key {
        node = node
            .with_public_key_hex(public_key)
            .context("invalid --public-key")?;
    }
    Ok(node)
}

/// Writes a value to stdout as pretty JSON.
fn emit<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("failed to serialize output")?;
    println!("{}", json);
    Ok(())
}

/// Prints version and format information.
fn print_version() {
    println!("webdid   {}", env!("CARGO_PKG_VERSION"));
    println!("format   {}", FORMAT_VERSION);
    println!("curve    {}", CURVE);
    println!("address  {}", ADDRESS_HASH_FUNCTION);
    println!("rustc    {}", rustc_version());
}

/// Returns the Rust compiler version used to build this binary.
fn rustc_version() -> &'static str {
    option_env!("RUSTC_VERSION").unwrap_or("unknown")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const PRIVATE_KEY: &str = "e22f5526ce620ec69441c3453d7a0acbc26c3fc7543023f338123fd45c7d44b3";
    const CHAIN_CODE: &str = "dac0c414d5006b7350e3b7750e5b535af7ecd9b5a2ad00648d427349885f4358";

    fn keys_args() -> cli::KeysArgs {
        cli::KeysArgs {
            domain: "radicalledger.com".into(),
            private_key: Some(PRIVATE_KEY.into()),
            chain_code: Some(CHAIN_CODE.into()),
            public_key: None,
            input: None,
        }
    }

    #[test]
    fn node_from_hex_flags() {
        let node = node_from_flags(&keys_args()).unwrap();
        assert_eq!(node.private_key_hex().as_deref(), Some(PRIVATE_KEY));
        assert_eq!(node.chain_code_hex().as_deref(), Some(CHAIN_CODE));
        assert!(node.public_key().is_none());
    }

    #[test]
    fn node_from_flags_rejects_bad_hex() {
        let mut args = keys_args();
        args.chain_code = Some("xyz".into());
        let err = node_from_flags(&args).unwrap_err();
        assert!(err.to_string().contains("--chain-code"));
    }

    #[test]
    fn node_from_json_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"privateKey":"{}","chainCode":"{}"}}"#,
            PRIVATE_KEY, CHAIN_CODE
        )
        .unwrap();

        let node = read_node(file.path()).unwrap();
        assert_eq!(node, node_from_flags(&keys_args()).unwrap());
    }

    #[test]
    fn input_file_takes_precedence_over_private_key() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"chainCode":"{}"}}"#, CHAIN_CODE).unwrap();

        let mut args = keys_args();
        args.chain_code = None;
        args.input = Some(file.path().to_path_buf());

        let node = load_node(&args).unwrap();
        assert!(node.private_key().is_none());
        assert_eq!(node.chain_code_hex().as_deref(), Some(CHAIN_CODE));
    }

    #[test]
    fn missing_input_file_is_reported() {
        let err = read_node(Path::new("/nonexistent/node.json")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/node.json"));
    }
}
