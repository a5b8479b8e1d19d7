//! Transaction encoding errors

use ccd_codec::CodecError;
use ccd_crypto::CryptoError;
use ccd_primitives::{AddressError, CredIdError, HashError};
use thiserror::Error;

/// Error raised while building or encoding a transaction.
///
/// Encoding is all-or-nothing: when any of these is returned no bytes were
/// produced.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TransactionError {
    /// Malformed textual input (address, hash, key, reference)
    #[error("format error: {0}")]
    Format(String),

    /// Numeric field or length outside its encoding width
    #[error("range error: {0}")]
    Range(#[from] CodecError),

    /// Structurally invalid transaction
    #[error("validation error: {0}")]
    Validation(String),
}

impl From<AddressError> for TransactionError {
    fn from(e: AddressError) -> Self {
        TransactionError::Format(e.to_string())
    }
}

impl From<HashError> for TransactionError {
    fn from(e: HashError) -> Self {
        TransactionError::Format(e.to_string())
    }
}

impl From<CredIdError> for TransactionError {
    fn from(e: CredIdError) -> Self {
        TransactionError::Format(e.to_string())
    }
}

impl From<CryptoError> for TransactionError {
    fn from(e: CryptoError) -> Self {
        TransactionError::Format(e.to_string())
    }
}

impl From<hex::FromHexError> for TransactionError {
    fn from(e: hex::FromHexError) -> Self {
        TransactionError::Format(e.to_string())
    }
}
