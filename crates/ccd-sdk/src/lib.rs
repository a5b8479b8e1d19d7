//! # ccd-sdk
//!
//! Rust client SDK for CCD nodes.
//!
//! ## Features
//!
//! - **NodeClient**: gRPC client for the node's query and submission API
//! - **AccountKeys**: Account keys, wallet export loading and signing
//! - **TransactionBuilder**: Fluent API for building account transactions
//! - **ClientConfig**: TOML client configuration
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use ccd_sdk::{AccountKeys, Amount, ClientConfig, NodeClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = NodeClient::connect(ClientConfig::new("http://localhost:20000")).await?;
//!
//!     // Load keys exported from a wallet
//!     let keys = AccountKeys::load("my-account.export")?;
//!     let nonce = client.get_next_account_sequence_number(keys.address()).await?;
//!
//!     // Build, sign and submit a transfer
//!     let to = "3VwCfvVskERFAJ3GeJy2mNFrzfChqUymSJJCvoLAP9rtAwMGYt".parse()?;
//!     let tx = client
//!         .transaction_builder()
//!         .nonce(nonce.nonce)
//!         .transfer(to, Amount::from_micro_ccd(1_000_000))
//!         .sign(&keys)?;
//!     let hash = client.send_account_transaction(&tx).await?;
//!
//!     println!("Submitted: {}", hash);
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

mod client;
pub mod config;
mod error;
#[allow(missing_docs)]
pub mod proto;
mod transport;
mod tx_builder;
pub mod types;
mod wallet;

// Re-export main types
pub use client::{signature_to_proto, NodeClient};
pub use config::ClientConfig;
pub use error::SdkError;
pub use transport::{GrpcTransport, MockTransport};

/// Re-export Transport trait for custom implementations
pub use transport::Transport;
pub use tx_builder::TransactionBuilder;
pub use wallet::AccountKeys;

// Re-export primitives for convenience
pub use ccd_crypto::KeyPair;
pub use ccd_primitives::{
    AccountAddress, Amount, BlockHash, ContractAddress, Energy, Nonce, TransactionExpiry,
    TransactionHash,
};
pub use ccd_types::{
    AccountTransaction, AccountTransactionSignature, Payload, SignedAccountTransaction,
    SignedCredentialDeployment,
};
