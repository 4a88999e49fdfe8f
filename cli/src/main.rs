// Copyright (c) 2026 ALAS Technology. MIT License.
// See LICENSE for details.

//! # catapult-tx
//!
//! Entry point for the `catapult-tx` binary. Parses CLI arguments,
//! initializes logging, loads the engine configuration, and runs one
//! offline subcommand:
//!
//! - `namespace-id`: ids of every level of a namespace name
//! - `mosaic-id`:    mosaic id from nonce and owner
//! - `address`:      address derivation and validation
//! - `transfer`:     build and sign a transfer
//! - `cosign`:       cosign an aggregate hash
//!
//! Results go to stdout as JSON; logs go to stderr.

mod cli;
mod logging;

use anyhow::{Context, Result};
use clap::Parser;
use serde_json::json;

use catapult_protocol::account::{Account, Address, NetworkType, PublicAccount};
use catapult_protocol::config::EngineConfig;
use catapult_protocol::crypto::PublicKey;
use catapult_protocol::id::{generate_namespace_path, Mosaic, MosaicId, MosaicNonce, MosaicRef, NamespaceId};
use catapult_protocol::transaction::{
    CosignatureTransaction, Deadline, Message, Recipient, TransactionBuilder, TransferBody,
};

use cli::{
    AddressArgs, CatapultCli, CosignArgs, Commands, MosaicIdArgs, NamespaceIdArgs, TransferArgs,
};

fn main() -> Result<()> {
    let cli = CatapultCli::parse();
    logging::init_logging(&cli.log_level, cli.log_format);

    let mut config = match &cli.config {
        Some(path) => EngineConfig::from_file(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => EngineConfig::default(),
    };
    if let Some(network) = cli.network {
        config.network = network;
    }
    tracing::debug!(network = %config.network, deadline_secs = config.deadline_secs, "engine config");

    let output = match cli.command {
        Commands::NamespaceId(args) => namespace_id(args)?,
        Commands::MosaicId(args) => mosaic_id(args)?,
        Commands::Address(args) => address(args, config.network)?,
        Commands::Transfer(args) => transfer(args, &config)?,
        Commands::Cosign(args) => cosign(args, config.network)?,
    };
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn namespace_id(args: NamespaceIdArgs) -> Result<serde_json::Value> {
    let path = generate_namespace_path(&args.name)
        .with_context(|| format!("invalid namespace name '{}'", args.name))?;
    let levels: Vec<_> = args
        .name
        .split('.')
        .zip(path)
        .map(|(segment, id)| {
            json!({
                "name": segment,
                "id": id,
                "hex": NamespaceId::new(id).to_hex(),
            })
        })
        .collect();
    Ok(json!({ "name": args.name, "path": levels }))
}

fn mosaic_id(args: MosaicIdArgs) -> Result<serde_json::Value> {
    let owner = PublicKey::from_hex(&args.owner).context("invalid owner public key")?;
    let id = MosaicId::from_nonce(MosaicNonce::from_u32(args.nonce), &owner);
    Ok(json!({
        "nonce": args.nonce,
        "owner": owner.to_hex(),
        "id": id.id(),
        "hex": id.to_hex(),
    }))
}

fn address(args: AddressArgs, network: NetworkType) -> Result<serde_json::Value> {
    if let Some(encoded) = args.decode {
        let address = Address::from_raw(&encoded)
            .with_context(|| format!("invalid address '{}'", encoded))?;
        return Ok(json!({
            "address": address.plain(),
            "pretty": address.pretty(),
            "network": address.network(),
            "raw": hex::encode_upper(address.to_bytes()),
        }));
    }

    let public = match (args.public_key, args.private_key) {
        (Some(public_key), _) => {
            PublicAccount::from_public_key_hex(&public_key, network).context("invalid public key")?
        }
        (None, Some(private_key)) => Account::from_private_key_hex(&private_key, network)
            .context("invalid private key")?
            .public_account(),
        (None, None) => anyhow::bail!("one of --public-key, --private-key or --decode is required"),
    };
    let address = public.address();
    Ok(json!({
        "public_key": public.public_key.to_hex(),
        "network": public.network,
        "address": address.plain(),
        "pretty": address.pretty(),
    }))
}

fn transfer(args: TransferArgs, config: &EngineConfig) -> Result<serde_json::Value> {
    let account =
        Account::from_private_key_hex(&args.private_key, config.network).context("invalid private key")?;
    let recipient = parse_recipient(&args.recipient)?;
    let mosaics = args
        .mosaics
        .iter()
        .map(|m| parse_mosaic(m))
        .collect::<Result<Vec<_>>>()?;

    let mut builder = TransactionBuilder::from_config(config);
    if let Some(max_fee) = args.max_fee {
        builder = builder.max_fee(max_fee);
    }
    if let Some(deadline) = args.deadline {
        builder = builder.deadline(Deadline::new(deadline));
    }

    let tx = builder
        .build(TransferBody::new(recipient, mosaics, Message::plain(&args.message)))
        .context("failed to build transfer")?;
    let signed = tx.sign(&account).context("failed to sign transfer")?;
    tracing::info!(hash = %signed.hash, max_fee = tx.max_fee(), deadline = %tx.deadline(), "transfer signed");
    Ok(serde_json::to_value(&signed)?)
}

fn cosign(args: CosignArgs, network: NetworkType) -> Result<serde_json::Value> {
    let account =
        Account::from_private_key_hex(&args.private_key, network).context("invalid private key")?;
    let cosignature = CosignatureTransaction::from_hash_hex(&args.hash)
        .context("invalid aggregate hash")?
        .sign_with(&account);
    Ok(serde_json::to_value(&cosignature)?)
}

/// `@name` is a namespace alias; anything else is an encoded address.
fn parse_recipient(raw: &str) -> Result<Recipient> {
    match raw.strip_prefix('@') {
        Some(name) => Ok(NamespaceId::from_name(name)
            .with_context(|| format!("invalid recipient namespace '{}'", name))?
            .into()),
        None => Ok(Address::from_raw(raw)
            .with_context(|| format!("invalid recipient address '{}'", raw))?
            .into()),
    }
}

/// `id:amount`, where the id is hex or a namespace name.
fn parse_mosaic(raw: &str) -> Result<Mosaic> {
    let (id, amount) = raw
        .rsplit_once(':')
        .with_context(|| format!("mosaic '{}' is not of the form id:amount", raw))?;
    let amount: u64 = amount
        .parse()
        .with_context(|| format!("invalid amount in mosaic '{}'", raw))?;
    let id: MosaicRef = match MosaicId::from_hex(id) {
        Ok(mosaic_id) => mosaic_id.into(),
        Err(_) => NamespaceId::from_name(id)
            .with_context(|| format!("mosaic id '{}' is neither hex nor a namespace name", id))?
            .into(),
    };
    Ok(Mosaic::new(id, amount))
}
