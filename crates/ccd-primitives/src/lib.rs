//! # ccd-primitives
//!
//! Primitive types for the CCD client SDK.
//!
//! This crate provides the fixed-size identifiers and numeric newtypes that
//! every transaction and query is built from:
//!
//! - [`AccountAddress`] - 32-byte account identifier with base58-check text form
//! - [`CredentialRegistrationId`] - 48-byte alternative account identifier
//! - [`Hash256`] - 32-byte hashes (block hashes, transaction hashes, module references)
//! - [`Amount`], [`Energy`], [`Nonce`], [`TransactionExpiry`] and friends

#![warn(missing_docs)]
#![warn(clippy::all)]

mod address;
mod amount;
mod cred_id;
mod hash;

pub use address::{AccountAddress, AddressError};
pub use amount::{
    AccountIndex, Amount, ContractAddress, Energy, Nonce, Timestamp, TransactionExpiry,
};
pub use cred_id::{CredentialRegistrationId, CredIdError};
pub use hash::{BlockHash, Hash256, HashError, ModuleReference, TransactionHash};

/// Index of a credential on an account
pub type CredentialIndex = u8;

/// Index of a key within a credential
pub type KeyIndex = u8;
