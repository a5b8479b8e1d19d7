//! Credential registration id (48 bytes, hex text form)

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Credential registration id parsing error
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CredIdError {
    /// Invalid hex string
    #[error("invalid hex string: {0}")]
    InvalidHex(String),
    /// Invalid length
    #[error("invalid credential registration id length: expected 48 bytes, got {0}")]
    InvalidLength(usize),
}

/// Registration id of a deployed credential
///
/// Usable in place of an [`AccountAddress`](crate::AccountAddress) when
/// looking up the account the credential belongs to.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CredentialRegistrationId([u8; 48]);

impl CredentialRegistrationId {
    /// Size in bytes
    pub const LEN: usize = 48;

    /// Create from bytes
    pub const fn from_bytes(bytes: [u8; 48]) -> Self {
        CredentialRegistrationId(bytes)
    }

    /// Create from slice
    pub fn from_slice(slice: &[u8]) -> Result<Self, CredIdError> {
        if slice.len() != Self::LEN {
            return Err(CredIdError::InvalidLength(slice.len()));
        }
        let mut bytes = [0u8; 48];
        bytes.copy_from_slice(slice);
        Ok(CredentialRegistrationId(bytes))
    }

    /// Parse from a 96-character hex string
    pub fn from_hex(s: &str) -> Result<Self, CredIdError> {
        let bytes = hex::decode(s).map_err(|e| CredIdError::InvalidHex(e.to_string()))?;
        Self::from_slice(&bytes)
    }

    /// Get as bytes
    pub fn as_bytes(&self) -> &[u8; 48] {
        &self.0
    }

    /// Convert to hex string
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Debug for CredentialRegistrationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CredentialRegistrationId({})", self.to_hex())
    }
}

impl fmt::Display for CredentialRegistrationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for CredentialRegistrationId {
    type Err = CredIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl AsRef<[u8]> for CredentialRegistrationId {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

#[cfg(feature = "serde")]
mod serde_impl {
    use super::*;
    use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

    impl Serialize for CredentialRegistrationId {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            serializer.serialize_str(&self.to_hex())
        }
    }

    impl<'de> Deserialize<'de> for CredentialRegistrationId {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            let s = String::deserialize(deserializer)?;
            CredentialRegistrationId::from_hex(&s).map_err(de::Error::custom)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cred_id_hex_round_trip() {
        let hex_str = "aa".repeat(48);
        let id = CredentialRegistrationId::from_hex(&hex_str).unwrap();
        assert_eq!(id.as_bytes(), &[0xaa; 48]);
        assert_eq!(id.to_hex(), hex_str);
    }

    #[test]
    fn test_cred_id_wrong_length() {
        let result = CredentialRegistrationId::from_hex(&"aa".repeat(32));
        assert_eq!(result, Err(CredIdError::InvalidLength(32)));
    }

    #[test]
    fn test_cred_id_invalid_hex() {
        let result = CredentialRegistrationId::from_hex(&"zz".repeat(48));
        assert!(matches!(result, Err(CredIdError::InvalidHex(_))));
    }
}
