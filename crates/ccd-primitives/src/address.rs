//! Account address type (32 bytes, base58-check text form)

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Address parsing error
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AddressError {
    /// Not a valid base58 string
    #[error("invalid base58 string: {0}")]
    InvalidBase58(String),
    /// Checksum bytes do not match the payload
    #[error("invalid base58 checksum")]
    InvalidChecksum,
    /// Version byte is not the account address version
    #[error("invalid address version: expected {expected}, got {got}")]
    InvalidVersion {
        /// Expected version byte
        expected: u8,
        /// Decoded version byte
        got: u8,
    },
    /// Invalid hex string
    #[error("invalid hex string: {0}")]
    InvalidHex(String),
    /// Invalid length
    #[error("invalid address length: expected 32 bytes, got {0}")]
    InvalidLength(usize),
}

/// 32-byte account address
///
/// The canonical text form is base58-check over `0x01 || bytes`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct AccountAddress([u8; 32]);

impl AccountAddress {
    /// Size of address in bytes
    pub const LEN: usize = 32;

    /// Version byte prepended before base58-check encoding
    pub const VERSION: u8 = 1;

    /// Create address from bytes
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        AccountAddress(bytes)
    }

    /// Create address from slice
    pub fn from_slice(slice: &[u8]) -> Result<Self, AddressError> {
        if slice.len() != Self::LEN {
            return Err(AddressError::InvalidLength(slice.len()));
        }
        let mut bytes = [0u8; 32];
        bytes.copy_from_slice(slice);
        Ok(AccountAddress(bytes))
    }

    /// Parse address from its base58-check text form
    pub fn from_base58(s: &str) -> Result<Self, AddressError> {
        let decoded = bs58::decode(s)
            .with_check(None)
            .into_vec()
            .map_err(|e| match e {
                bs58::decode::Error::InvalidChecksum { .. } => AddressError::InvalidChecksum,
                other => AddressError::InvalidBase58(other.to_string()),
            })?;

        // decoded = version || payload, checksum already stripped
        let (version, payload) = match decoded.split_first() {
            Some(parts) => parts,
            None => return Err(AddressError::InvalidLength(0)),
        };
        if *version != Self::VERSION {
            return Err(AddressError::InvalidVersion {
                expected: Self::VERSION,
                got: *version,
            });
        }
        Self::from_slice(payload)
    }

    /// Encode as base58-check text
    pub fn to_base58(&self) -> String {
        bs58::encode(self.0)
            .with_check_version(Self::VERSION)
            .into_string()
    }

    /// Parse address from raw hex (with or without 0x prefix)
    pub fn from_hex(s: &str) -> Result<Self, AddressError> {
        let s = s.strip_prefix("0x").unwrap_or(s);
        let bytes = hex::decode(s).map_err(|e| AddressError::InvalidHex(e.to_string()))?;
        Self::from_slice(&bytes)
    }

    /// Get as byte array
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Convert to raw hex string (no prefix)
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Whether two addresses refer to the same account.
    ///
    /// Addresses sharing their first 29 bytes are aliases of one account.
    pub fn is_alias(&self, other: &AccountAddress) -> bool {
        self.0[..29] == other.0[..29]
    }
}

impl fmt::Debug for AccountAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AccountAddress({})", self.to_base58())
    }
}

impl fmt::Display for AccountAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_base58())
    }
}

impl FromStr for AccountAddress {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_base58(s)
    }
}

impl From<[u8; 32]> for AccountAddress {
    fn from(bytes: [u8; 32]) -> Self {
        AccountAddress(bytes)
    }
}

impl AsRef<[u8]> for AccountAddress {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

#[cfg(feature = "serde")]
mod serde_impl {
    use super::*;
    use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

    impl Serialize for AccountAddress {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            serializer.serialize_str(&self.to_base58())
        }
    }

    impl<'de> Deserialize<'de> for AccountAddress {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            let s = String::deserialize(deserializer)?;
            AccountAddress::from_base58(&s).map_err(de::Error::custom)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const KNOWN: &str = "3VwCfvVskERFAJ3GeJy2mNFrzfChqUymSJJCvoLAP9rtAwMGYt";
    const KNOWN_HEX: &str = "49176df18432686c93c61ca89dafbe1cb383bfe6eb3a301ef8907f852643d98d";

    #[test]
    fn test_address_from_base58() {
        let addr = AccountAddress::from_base58(KNOWN).unwrap();
        assert_eq!(addr.to_hex(), KNOWN_HEX);
    }

    #[test]
    fn test_address_to_base58() {
        let addr = AccountAddress::from_hex(KNOWN_HEX).unwrap();
        assert_eq!(addr.to_base58(), KNOWN);
        assert_eq!(addr.to_string(), KNOWN);
    }

    #[test]
    fn test_zero_address_base58() {
        let zero = AccountAddress::default();
        assert_eq!(
            zero.to_base58(),
            "2wkBET2rRgE8pahuaczxKbmv7ciehqsne57F9gtzf1PVdr2VP3"
        );
    }

    #[test]
    fn test_address_from_str() {
        let addr: AccountAddress = KNOWN.parse().unwrap();
        assert_eq!(addr, AccountAddress::from_hex(KNOWN_HEX).unwrap());
    }

    // ==================== Malformed input ====================

    #[test]
    fn test_address_bad_checksum() {
        // last character changed
        let result = AccountAddress::from_base58("3VwCfvVskERFAJ3GeJy2mNFrzfChqUymSJJCvoLAP9rtAwMGYu");
        assert_eq!(result, Err(AddressError::InvalidChecksum));
    }

    #[test]
    fn test_address_wrong_version() {
        // 0x02 || [0x2a; 32]
        let result = AccountAddress::from_base58("5D4PqDgVXDatjGeNhi5gEekKmM16CJn7gJmDtZTaNYYdmkdLMh");
        assert_eq!(
            result,
            Err(AddressError::InvalidVersion { expected: 1, got: 2 })
        );
    }

    #[test]
    fn test_address_invalid_characters() {
        let result = AccountAddress::from_base58("0OIl");
        assert!(matches!(result, Err(AddressError::InvalidBase58(_))));
    }

    #[test]
    fn test_address_wrong_length() {
        let short = bs58::encode([0u8; 31]).with_check_version(1).into_string();
        assert_eq!(
            AccountAddress::from_base58(&short),
            Err(AddressError::InvalidLength(31))
        );
    }

    #[test]
    fn test_address_empty() {
        assert!(AccountAddress::from_base58("").is_err());
    }

    #[test]
    fn test_address_from_slice_wrong_length() {
        assert_eq!(
            AccountAddress::from_slice(&[0u8; 33]),
            Err(AddressError::InvalidLength(33))
        );
    }

    #[test]
    fn test_address_alias() {
        let base = AccountAddress::from_bytes([0x2a; 32]);
        let mut alias_bytes = [0x2a; 32];
        alias_bytes[31] = 0x01;
        let alias = AccountAddress::from_bytes(alias_bytes);
        assert!(base.is_alias(&alias));

        let mut other_bytes = [0x2a; 32];
        other_bytes[0] = 0x00;
        assert!(!base.is_alias(&AccountAddress::from_bytes(other_bytes)));
    }

    proptest! {
        #[test]
        fn prop_base58_round_trip(bytes in proptest::array::uniform32(any::<u8>())) {
            let addr = AccountAddress::from_bytes(bytes);
            let text = addr.to_base58();
            prop_assert_eq!(AccountAddress::from_base58(&text).unwrap(), addr);
        }
    }
}
