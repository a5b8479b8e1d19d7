//! Account keys and transaction signing

use ccd_crypto::KeyPair;
use ccd_primitives::{AccountAddress, CredentialIndex, Hash256, KeyIndex};
use ccd_types::AccountTransactionSignature;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;
use zeroize::Zeroize;

use crate::SdkError;

/// Signing keys of an account, by credential and key index
///
/// Clone is intentionally not implemented to prevent accidental key duplication.
pub struct AccountKeys {
    address: AccountAddress,
    keys: BTreeMap<CredentialIndex, BTreeMap<KeyIndex, KeyPair>>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum KeysExport {
    Wrapped { value: KeysFile },
    Plain(KeysFile),
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct KeysFile {
    account_keys: AccountKeysJson,
    address: AccountAddress,
}

#[derive(Deserialize)]
struct AccountKeysJson {
    keys: BTreeMap<CredentialIndex, CredentialKeysJson>,
}

#[derive(Deserialize)]
struct CredentialKeysJson {
    keys: BTreeMap<KeyIndex, KeyPairJson>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct KeyPairJson {
    sign_key: String,
    verify_key: String,
}

impl AccountKeys {
    /// Account with no keys yet
    pub fn new(address: AccountAddress) -> Self {
        Self {
            address,
            keys: BTreeMap::new(),
        }
    }

    /// Account controlled by one key at credential 0, key 0
    pub fn single(address: AccountAddress, key: KeyPair) -> Self {
        let mut keys = Self::new(address);
        keys.insert(0, 0, key);
        keys
    }

    /// Add a key, replacing any key at the same indices
    pub fn insert(&mut self, credential: CredentialIndex, index: KeyIndex, key: KeyPair) {
        self.keys.entry(credential).or_default().insert(index, key);
    }

    /// Parse a wallet key export.
    ///
    /// Accepts both the bare `{"accountKeys": .., "address": ..}` form and
    /// the browser wallet form that nests it under `"value"`.
    pub fn from_json(json: &str) -> Result<Self, SdkError> {
        let file = match serde_json::from_str::<KeysExport>(json)? {
            KeysExport::Wrapped { value } => value,
            KeysExport::Plain(file) => file,
        };

        let mut keys = Self::new(file.address);
        for (credential, credential_keys) in file.account_keys.keys {
            for (index, pair) in credential_keys.keys {
                let KeyPairJson {
                    mut sign_key,
                    verify_key,
                } = pair;
                let key = KeyPair::from_secret_hex(&sign_key);
                sign_key.zeroize();
                let key = key?;
                if hex::encode(key.public_key().as_bytes()) != verify_key.to_lowercase() {
                    return Err(SdkError::InvalidInput(format!(
                        "verify key of credential {} key {} does not match its sign key",
                        credential, index
                    )));
                }
                keys.insert(credential, index, key);
            }
        }

        if keys.signature_count() == 0 {
            return Err(SdkError::InvalidInput("key export contains no keys".to_string()));
        }
        Ok(keys)
    }

    /// Read a wallet key export from a file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SdkError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .map_err(|e| SdkError::InvalidInput(format!("{}: {}", path.display(), e)))?;
        Self::from_json(&json)
    }

    /// Account the keys belong to
    pub fn address(&self) -> &AccountAddress {
        &self.address
    }

    /// Number of signatures [`sign_digest`](Self::sign_digest) produces
    pub fn signature_count(&self) -> u32 {
        self.keys.values().map(|keys| keys.len() as u32).sum()
    }

    /// Sign a transaction digest with every key
    pub fn sign_digest(&self, digest: &Hash256) -> AccountTransactionSignature {
        self.keys
            .iter()
            .flat_map(|(credential, keys)| {
                keys.iter()
                    .map(move |(index, key)| (*credential, *index, key.sign(digest)))
            })
            .collect()
    }
}

impl std::fmt::Debug for AccountKeys {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccountKeys")
            .field("address", &self.address)
            .field("signature_count", &self.signature_count())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ccd_crypto::verify;

    const ADDRESS: &str = "3VwCfvVskERFAJ3GeJy2mNFrzfChqUymSJJCvoLAP9rtAwMGYt";
    const SIGN_KEY: &str = "0101010101010101010101010101010101010101010101010101010101010101";
    const VERIFY_KEY: &str = "8a88e3dd7409f195fd52db2d3cba5d72ca6709bf1d94121bf3748801b40f6f5c";

    fn export(verify_key: &str) -> String {
        format!(
            r#"{{
                "accountKeys": {{
                    "keys": {{
                        "0": {{ "keys": {{ "0": {{ "signKey": "{SIGN_KEY}", "verifyKey": "{verify_key}" }} }}, "threshold": 1 }}
                    }},
                    "threshold": 1
                }},
                "address": "{ADDRESS}"
            }}"#
        )
    }

    #[test]
    fn test_from_json_plain() {
        let keys = AccountKeys::from_json(&export(VERIFY_KEY)).unwrap();
        assert_eq!(keys.address().to_base58(), ADDRESS);
        assert_eq!(keys.signature_count(), 1);
    }

    #[test]
    fn test_from_json_wrapped() {
        let json = format!(
            r#"{{ "type": "concordium-browser-wallet-account", "v": 0, "value": {} }}"#,
            export(VERIFY_KEY)
        );
        let keys = AccountKeys::from_json(&json).unwrap();
        assert_eq!(keys.signature_count(), 1);
    }

    #[test]
    fn test_from_json_mismatched_verify_key() {
        let err = AccountKeys::from_json(&export(&"00".repeat(32))).unwrap_err();
        assert!(matches!(err, SdkError::InvalidInput(_)));
    }

    #[test]
    fn test_from_json_malformed() {
        assert!(AccountKeys::from_json("{}").is_err());
        assert!(AccountKeys::from_json("not json").is_err());
    }

    #[test]
    fn test_sign_digest_covers_every_key() {
        let address: AccountAddress = ADDRESS.parse().unwrap();
        let mut keys = AccountKeys::new(address);
        keys.insert(0, 0, KeyPair::from_secret_bytes(&[1; 32]));
        keys.insert(0, 1, KeyPair::from_secret_bytes(&[2; 32]));
        keys.insert(1, 0, KeyPair::from_secret_bytes(&[3; 32]));

        let digest = Hash256::from_bytes([9; 32]);
        let signature = keys.sign_digest(&digest);
        assert_eq!(signature.count(), 3);

        let public = KeyPair::from_secret_bytes(&[2; 32]).public_key();
        verify(&digest, signature.get(0, 1).unwrap(), &public).unwrap();
    }

    #[test]
    fn test_debug_hides_keys() {
        let keys = AccountKeys::from_json(&export(VERIFY_KEY)).unwrap();
        let debug = format!("{:?}", keys);
        assert!(!debug.contains(SIGN_KEY));
    }
}
