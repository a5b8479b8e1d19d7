//! SDK error types

use ccd_types::TransactionError;
use thiserror::Error;

/// SDK error type
#[derive(Debug, Error)]
pub enum SdkError {
    /// Connection or channel failure
    #[error("Transport error: {0}")]
    Transport(String),

    /// Status returned by the node, passed through unchanged
    #[error("Node returned {code}: {message}")]
    Status {
        /// gRPC status code
        code: i32,
        /// Status message, including the node's rejection reason
        message: String,
    },

    /// Response could not be decoded or lacked a required field
    #[error("Decode error: {0}")]
    Decode(String),

    /// Invalid client configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Transaction could not be built or encoded
    #[error(transparent)]
    Transaction(#[from] TransactionError),

    /// Malformed caller input (hash, address, key)
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl SdkError {
    /// gRPC status code, if the node answered with an error status
    pub fn status_code(&self) -> Option<tonic::Code> {
        match self {
            SdkError::Status { code, .. } => Some(tonic::Code::from_i32(*code)),
            _ => None,
        }
    }
}

impl From<tonic::Status> for SdkError {
    fn from(status: tonic::Status) -> Self {
        SdkError::Status {
            code: status.code() as i32,
            message: status.message().to_string(),
        }
    }
}

impl From<tonic::transport::Error> for SdkError {
    fn from(e: tonic::transport::Error) -> Self {
        SdkError::Transport(e.to_string())
    }
}

impl From<prost::DecodeError> for SdkError {
    fn from(e: prost::DecodeError) -> Self {
        SdkError::Decode(e.to_string())
    }
}

impl From<toml::de::Error> for SdkError {
    fn from(e: toml::de::Error) -> Self {
        SdkError::Config(e.to_string())
    }
}

impl From<ccd_primitives::AddressError> for SdkError {
    fn from(e: ccd_primitives::AddressError) -> Self {
        SdkError::InvalidInput(e.to_string())
    }
}

impl From<ccd_primitives::HashError> for SdkError {
    fn from(e: ccd_primitives::HashError) -> Self {
        SdkError::InvalidInput(e.to_string())
    }
}

impl From<ccd_crypto::CryptoError> for SdkError {
    fn from(e: ccd_crypto::CryptoError) -> Self {
        SdkError::InvalidInput(e.to_string())
    }
}

impl From<serde_json::Error> for SdkError {
    fn from(e: serde_json::Error) -> Self {
        SdkError::InvalidInput(e.to_string())
    }
}
