//! # CLI Interface
//!
//! Defines the command-line argument structure for `catapult-tx` using
//! `clap` derive. Every subcommand is offline: it derives, encodes, or
//! signs, and prints the result as JSON on stdout.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use catapult_protocol::account::NetworkType;

use crate::logging::LogFormat;

/// Offline transaction tool for Catapult-style networks.
///
/// Derives namespace and mosaic identifiers, inspects addresses, and
/// builds and signs transactions without contacting a node.
#[derive(Parser, Debug)]
#[command(
    name = "catapult-tx",
    about = "Build and sign Catapult transactions offline",
    version,
    propagate_version = true
)]
pub struct CatapultCli {
    /// Default log filter when `RUST_LOG` is not set.
    #[arg(long, global = true, env = "CATAPULT_LOG_LEVEL", default_value = "warn")]
    pub log_level: String,

    /// Log output format.
    #[arg(long, global = true, value_enum, env = "CATAPULT_LOG_FORMAT", default_value_t = LogFormat::Pretty)]
    pub log_format: LogFormat,

    /// Engine configuration file (JSON).
    #[arg(long, short = 'c', global = true, env = "CATAPULT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Network override: `mijin_test`, `main_net`, ... or a raw byte like `0x90`.
    #[arg(long, short = 'n', global = true, env = "CATAPULT_NETWORK")]
    pub network: Option<NetworkType>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the ids of every level of a dotted namespace name.
    NamespaceId(NamespaceIdArgs),
    /// Derive a mosaic id from a nonce and its owner's public key.
    MosaicId(MosaicIdArgs),
    /// Derive an address from a key, or validate an encoded one.
    Address(AddressArgs),
    /// Build and sign a transfer.
    Transfer(TransferArgs),
    /// Cosign an announced aggregate by its hash.
    Cosign(CosignArgs),
}

#[derive(Args, Debug)]
pub struct NamespaceIdArgs {
    /// Dotted namespace name, e.g. `nem.xem`.
    pub name: String,
}

#[derive(Args, Debug)]
pub struct MosaicIdArgs {
    #[arg(long)]
    pub nonce: u32,

    /// Owner public key, hex.
    #[arg(long)]
    pub owner: String,
}

#[derive(Args, Debug)]
#[group(required = true, multiple = false)]
pub struct AddressArgs {
    /// Public key, hex. The derived address is printed.
    #[arg(long)]
    pub public_key: Option<String>,

    /// Private key, hex. The derived public key and address are printed.
    #[arg(long)]
    pub private_key: Option<String>,

    /// An encoded address to validate and print as raw hex.
    #[arg(long)]
    pub decode: Option<String>,
}

#[derive(Args, Debug)]
pub struct TransferArgs {
    /// Signer private key, hex.
    ///
    /// Prefer the environment variable over the flag so the key stays out
    /// of shell history.
    #[arg(long, env = "CATAPULT_PRIVATE_KEY", hide_env_values = true)]
    pub private_key: String,

    /// Recipient address, or `@namespace.name` for an alias.
    #[arg(long)]
    pub recipient: String,

    /// `id:amount`, repeatable. The id is a hex mosaic id or a namespace
    /// name such as `nem.xem`.
    #[arg(long = "mosaic", value_name = "ID:AMOUNT")]
    pub mosaics: Vec<String>,

    /// Plain text message.
    #[arg(long, default_value = "")]
    pub message: String,

    /// Fixed max fee. Overrides the configured fee strategy.
    #[arg(long)]
    pub max_fee: Option<u64>,

    /// Fixed deadline in ms since the network epoch. Overrides the clock.
    #[arg(long)]
    pub deadline: Option<u64>,
}

#[derive(Args, Debug)]
pub struct CosignArgs {
    /// Cosigner private key, hex.
    #[arg(long, env = "CATAPULT_PRIVATE_KEY", hide_env_values = true)]
    pub private_key: String,

    /// Hash of the announced aggregate, hex.
    #[arg(long)]
    pub hash: String,
}
