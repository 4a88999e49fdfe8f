// Copyright (c) 2026 ALAS Technology. MIT License.
// See LICENSE for details.

//! # Catapult Protocol: Client-Side Transaction Engine
//!
//! Everything a wallet needs to talk to a Catapult-style ledger without
//! talking to it: derive identifiers, encode transactions byte for byte the
//! way nodes expect, sign them, and bundle them into aggregates. Nothing in
//! here opens a socket. Announcing, fee estimation against live chain state,
//! and reading transactions back are somebody else's problem.
//!
//! ## Architecture
//!
//! - **crypto**: SHA3/Keccak digests and Ed25519 over SHA3-512.
//! - **account**: network types, addresses, signing accounts.
//! - **id**: namespace and mosaic identifier derivation.
//! - **codec**: the schema-driven table builder and its flattener.
//! - **transaction**: headers, per-kind bodies, signing, aggregates.
//! - **fee**: fee strategies.
//! - **config**: wire constants and the small runtime configuration.
//!
//! ## Quick Start
//!
//! ```rust
//! use catapult_protocol::account::{Account, Address, NetworkType};
//! use catapult_protocol::id::{Mosaic, MosaicId};
//! use catapult_protocol::transaction::{Deadline, Message, TransactionBuilder, TransferBody};
//!
//! let account = Account::from_private_key_hex(
//!     "787225AAFF3D2C71F4FFA32D4F19EC4922F3CD869747F267378F81F8E3FCB12D",
//!     NetworkType::MijinTest,
//! )?;
//! let tx = TransactionBuilder::new(NetworkType::MijinTest)
//!     .deadline(Deadline::new(1))
//!     .build(TransferBody::new(
//!         Address::from_raw("SDUP5PLHDXKBX3UU5Q52LAY4WYEKGEWC6IB3VBFM")?,
//!         vec![Mosaic::new(MosaicId::new(95442763262823), 100)],
//!         Message::empty(),
//!     ))?;
//! let signed = tx.sign(&account)?;
//! assert_eq!(
//!     signed.hash,
//!     "350AE56BC97DB805E2098AB2C596FA4C6B37EF974BF24DFD61CD9F77C7687424"
//! );
//! # Ok::<(), catapult_protocol::Error>(())
//! ```
//!
//! ## Ground Rules
//!
//! 1. Byte compatibility beats elegance. Where the network has a quirk, we
//!    reproduce it.
//! 2. Everything is a value. Signing and embedding return new values and
//!    never mutate what they were given.
//! 3. No panics on caller input; every failure is a typed error.

pub mod account;
pub mod codec;
pub mod config;
pub mod crypto;
pub mod fee;
pub mod id;
pub mod transaction;

/// The crate-wide error. Every module error converts into it.
pub use transaction::TransactionError as Error;

pub type Result<T> = std::result::Result<T, Error>;
