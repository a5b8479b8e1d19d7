//! # ccd-types
//!
//! Account transactions and their exact wire encoding.
//!
//! This crate provides:
//! - [`Payload`](payload::Payload) - every account transaction payload and its encoding
//! - [`AccountTransactionSignature`](signature::AccountTransactionSignature) - the
//!   credential/key signature map and its encoding
//! - [`energy`] - the node's energy cost schedule
//! - [`AccountTransaction`](transaction::AccountTransaction) - header assembly,
//!   signing digest and submission bytes
//! - [`credential`] - credential deployment values and the credential
//!   deployment block item

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod block_item;
pub mod credential;
pub mod energy;
mod error;
pub mod payload;
pub mod signature;
pub mod transaction;

// Re-export commonly used types
pub use block_item::BlockItemKind;
pub use credential::{
    CredentialDeploymentInfo, CredentialDeploymentValues, CredentialPublicKeys,
    SignedCredentialDeployment, UnsignedCredentialDeployment,
};
pub use energy::{calculate_energy_cost, EnergyCost};
pub use error::TransactionError;
pub use payload::{Payload, RawPayload, TransactionType};
pub use signature::{count_signatures, AccountTransactionSignature, RawSignature};
pub use transaction::{
    compute_signing_digest, serialize_for_submission, AccountTransaction,
    AccountTransactionHeader, PreparedAccountTransaction, RawHeader, SignedAccountTransaction,
};
