//! Account transaction signatures
//!
//! An account is controlled by one or more credentials, each holding one or
//! more keys. A transaction signature is therefore a two-level map
//! credential index → key index → signature. Both levels are sparse and are
//! encoded in ascending index order:
//!
//! ```text
//! u8 credential count
//! per credential: u8 index, u8 signature count
//!     per key:    u8 index, u16 length (64), 64 signature bytes
//! ```

use bytes::Bytes;
use ccd_codec::Serializer;
use ccd_crypto::Signature;
use ccd_primitives::{CredentialIndex, KeyIndex};
use std::collections::BTreeMap;

use crate::TransactionError;

/// Signatures of a single credential, by key index
pub type CredentialSignatures = BTreeMap<KeyIndex, Signature>;

/// Signatures on an account transaction, by credential and key index
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AccountTransactionSignature {
    signatures: BTreeMap<CredentialIndex, CredentialSignatures>,
}

/// Encoded signature map, ready to prefix a transaction
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawSignature(Bytes);

impl RawSignature {
    /// Encoded bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Encoded length
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Never true for a successfully encoded signature
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl AccountTransactionSignature {
    /// Create an empty signature map
    pub fn new() -> Self {
        Self::default()
    }

    /// Signature map with one signature at credential 0, key 0
    pub fn single(signature: Signature) -> Self {
        let mut sig = Self::new();
        sig.insert(0, 0, signature);
        sig
    }

    /// Add a signature, returning the one it replaced
    pub fn insert(
        &mut self,
        credential: CredentialIndex,
        key: KeyIndex,
        signature: Signature,
    ) -> Option<Signature> {
        self.signatures
            .entry(credential)
            .or_default()
            .insert(key, signature)
    }

    /// Look up a signature
    pub fn get(&self, credential: CredentialIndex, key: KeyIndex) -> Option<&Signature> {
        self.signatures.get(&credential)?.get(&key)
    }

    /// Credentials in ascending index order
    pub fn credentials(&self) -> impl Iterator<Item = (&CredentialIndex, &CredentialSignatures)> {
        self.signatures.iter()
    }

    /// Total number of signatures across all credentials
    pub fn count(&self) -> u32 {
        self.signatures.values().map(|keys| keys.len() as u32).sum()
    }

    /// Whether no credential has signed
    pub fn is_empty(&self) -> bool {
        self.signatures.is_empty()
    }

    /// Encode the signature map.
    ///
    /// Fails if the map is empty or any credential has no signatures.
    pub fn encode(&self) -> Result<RawSignature, TransactionError> {
        if self.signatures.is_empty() {
            return Err(TransactionError::Validation(
                "signature must contain at least one credential".to_string(),
            ));
        }

        let mut out = Serializer::with_capacity(1 + self.count() as usize * 69);
        out.put_count_u8("credential count", self.signatures.len())?;
        for (credential, keys) in &self.signatures {
            if keys.is_empty() {
                return Err(TransactionError::Validation(format!(
                    "credential {} has no signatures",
                    credential
                )));
            }
            out.put_u8(*credential);
            out.put_count_u8("signature count", keys.len())?;
            for (key, signature) in keys {
                out.put_u8(*key);
                out.put_bytes_u16("signature", signature.as_bytes())?;
            }
        }
        Ok(RawSignature(out.finish()))
    }
}

impl FromIterator<(CredentialIndex, KeyIndex, Signature)> for AccountTransactionSignature {
    fn from_iter<I: IntoIterator<Item = (CredentialIndex, KeyIndex, Signature)>>(iter: I) -> Self {
        let mut sig = Self::new();
        for (credential, key, signature) in iter {
            sig.insert(credential, key, signature);
        }
        sig
    }
}

impl From<BTreeMap<CredentialIndex, CredentialSignatures>> for AccountTransactionSignature {
    fn from(signatures: BTreeMap<CredentialIndex, CredentialSignatures>) -> Self {
        Self { signatures }
    }
}

/// Total number of signatures, as charged by the energy model
pub fn count_signatures(signature: &AccountTransactionSignature) -> u32 {
    signature.count()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sig(byte: u8) -> Signature {
        Signature::from_bytes([byte; 64])
    }

    #[test]
    fn test_single_signature_layout() {
        let raw = AccountTransactionSignature::single(sig(0xaa)).encode().unwrap();
        let bytes = raw.as_bytes();
        assert_eq!(bytes.len(), 1 + 1 + 1 + 1 + 2 + 64);
        assert_eq!(&bytes[..6], &[1, 0, 1, 0, 0x00, 0x40]);
        assert_eq!(&bytes[6..], &[0xaa; 64][..]);
    }

    #[test]
    fn test_indices_encoded_in_ascending_order() {
        let signature: AccountTransactionSignature =
            vec![(5, 2, sig(3)), (1, 7, sig(2)), (5, 0, sig(1))]
                .into_iter()
                .collect();
        let raw = signature.encode().unwrap();
        let b = raw.as_bytes();
        // 2 credentials: credential 1 first
        assert_eq!(b[0], 2);
        assert_eq!(&b[1..4], &[1, 1, 7]);
        let second = 1 + 2 + 1 + 2 + 64;
        assert_eq!(&b[second..second + 3], &[5, 2, 0]);
        let next_key = second + 2 + 1 + 2 + 64;
        assert_eq!(b[next_key], 2);
    }

    #[test]
    fn test_count_signatures() {
        let signature: AccountTransactionSignature =
            vec![(0, 0, sig(1)), (0, 1, sig(2)), (3, 0, sig(3))]
                .into_iter()
                .collect();
        assert_eq!(count_signatures(&signature), 3);
        assert_eq!(count_signatures(&AccountTransactionSignature::new()), 0);
    }

    #[test]
    fn test_empty_signature_rejected() {
        let err = AccountTransactionSignature::new().encode().unwrap_err();
        assert!(matches!(err, TransactionError::Validation(_)));
    }

    #[test]
    fn test_empty_credential_rejected() {
        let mut map = BTreeMap::new();
        map.insert(0u8, CredentialSignatures::new());
        let err = AccountTransactionSignature::from(map).encode().unwrap_err();
        assert!(matches!(err, TransactionError::Validation(_)));
    }

    #[test]
    fn test_insert_replaces() {
        let mut signature = AccountTransactionSignature::new();
        assert!(signature.insert(0, 0, sig(1)).is_none());
        assert_eq!(signature.insert(0, 0, sig(2)), Some(sig(1)));
        assert_eq!(signature.get(0, 0), Some(&sig(2)));
        assert_eq!(signature.count(), 1);
    }

    #[test]
    fn test_full_credential_range_overflows_count() {
        let signature: AccountTransactionSignature =
            (0..=255u8).map(|i| (i, 0, sig(i))).collect();
        let err = signature.encode().unwrap_err();
        assert!(matches!(err, TransactionError::Range(_)));
    }
}
