//! Cryptographic errors

use thiserror::Error;

/// Cryptographic operation error
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CryptoError {
    /// Invalid signature bytes or failed verification
    #[error("invalid signature: {0}")]
    InvalidSignature(String),

    /// Invalid public key
    #[error("invalid public key: {0}")]
    InvalidPublicKey(String),

    /// Invalid private key
    #[error("invalid private key: {0}")]
    InvalidPrivateKey(String),
}
