//! Transaction builder

use ccd_primitives::{AccountAddress, Amount, Nonce, TransactionExpiry};
use ccd_types::{
    AccountTransaction, Payload, PreparedAccountTransaction, SignedAccountTransaction,
};
use std::time::Duration;

use crate::config::DEFAULT_EXPIRY_SECS;
use crate::{AccountKeys, SdkError};

/// Account transaction builder with fluent API
#[derive(Debug, Clone, Default)]
pub struct TransactionBuilder {
    sender: Option<AccountAddress>,
    nonce: Option<Nonce>,
    expiry: Option<TransactionExpiry>,
    default_expiry: Option<Duration>,
    payload: Option<Payload>,
}

impl TransactionBuilder {
    /// Create an empty builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Time to live used when no expiry is set
    pub fn default_expiry(mut self, ttl: Duration) -> Self {
        self.default_expiry = Some(ttl);
        self
    }

    /// Set the sending account
    pub fn sender(mut self, sender: AccountAddress) -> Self {
        self.sender = Some(sender);
        self
    }

    /// Set the account sequence number
    pub fn nonce(mut self, nonce: Nonce) -> Self {
        self.nonce = Some(nonce);
        self
    }

    /// Set an absolute expiry
    pub fn expiry(mut self, expiry: TransactionExpiry) -> Self {
        self.expiry = Some(expiry);
        self
    }

    /// Expire `ttl` from now
    pub fn expires_in(mut self, ttl: Duration) -> Self {
        self.expiry = Some(TransactionExpiry::from_now(ttl));
        self
    }

    /// Set the payload
    pub fn payload(mut self, payload: Payload) -> Self {
        self.payload = Some(payload);
        self
    }

    /// Shorthand for a simple transfer payload
    pub fn transfer(self, to: AccountAddress, amount: Amount) -> Self {
        self.payload(Payload::transfer(to, amount))
    }

    /// Build the unsigned transaction
    pub fn build(&self) -> Result<AccountTransaction, SdkError> {
        let sender = self.sender.ok_or_else(|| missing("sender"))?;
        self.build_for(sender)
    }

    fn build_for(&self, sender: AccountAddress) -> Result<AccountTransaction, SdkError> {
        let nonce = self.nonce.ok_or_else(|| missing("nonce"))?;
        let payload = self.payload.clone().ok_or_else(|| missing("payload"))?;
        let expiry = self.expiry.unwrap_or_else(|| {
            TransactionExpiry::from_now(
                self.default_expiry
                    .unwrap_or(Duration::from_secs(DEFAULT_EXPIRY_SECS)),
            )
        });
        Ok(AccountTransaction::new(sender, nonce, expiry, payload))
    }

    /// Build and fix the energy for `signature_count` signatures
    pub fn prepare(&self, signature_count: u32) -> Result<PreparedAccountTransaction, SdkError> {
        Ok(self.build()?.prepare(signature_count)?)
    }

    /// Build and sign with every key in `keys`.
    ///
    /// The sender defaults to the account the keys belong to.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The nonce or payload is missing
    /// - `keys` holds no keys
    /// - The payload cannot be encoded
    pub fn sign(&self, keys: &AccountKeys) -> Result<SignedAccountTransaction, SdkError> {
        let sender = self.sender.unwrap_or(*keys.address());
        let prepared = self.build_for(sender)?.prepare(keys.signature_count())?;
        let signature = keys.sign_digest(&prepared.digest());
        Ok(prepared.sign(signature)?)
    }
}

fn missing(field: &str) -> SdkError {
    SdkError::InvalidInput(format!("missing field: {}", field))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ccd_crypto::{verify, KeyPair};
    use ccd_primitives::Energy;

    fn address(byte: u8) -> AccountAddress {
        AccountAddress::from([byte; 32])
    }

    // ==================== Build Tests ====================

    #[test]
    fn test_build_requires_fields() {
        let err = TransactionBuilder::new().build().unwrap_err();
        assert!(err.to_string().contains("sender"));

        let err = TransactionBuilder::new()
            .sender(address(1))
            .build()
            .unwrap_err();
        assert!(err.to_string().contains("nonce"));

        let err = TransactionBuilder::new()
            .sender(address(1))
            .nonce(Nonce::new(1))
            .build()
            .unwrap_err();
        assert!(err.to_string().contains("payload"));
    }

    #[test]
    fn test_build_default_expiry() {
        let before = TransactionExpiry::from_now(Duration::from_secs(60));
        let tx = TransactionBuilder::new()
            .default_expiry(Duration::from_secs(60))
            .sender(address(1))
            .nonce(Nonce::new(1))
            .transfer(address(2), Amount::from_micro_ccd(10))
            .build()
            .unwrap();
        let after = TransactionExpiry::from_now(Duration::from_secs(60));
        assert!(tx.expiry >= before && tx.expiry <= after);
    }

    #[test]
    fn test_build_explicit_expiry_wins() {
        let tx = TransactionBuilder::new()
            .default_expiry(Duration::from_secs(60))
            .expiry(TransactionExpiry::from_seconds(1_700_000_000))
            .sender(address(1))
            .nonce(Nonce::new(1))
            .transfer(address(2), Amount::from_micro_ccd(10))
            .build()
            .unwrap();
        assert_eq!(tx.expiry.seconds(), 1_700_000_000);
    }

    // ==================== Signing Tests ====================

    #[test]
    fn test_prepare_transfer_energy() {
        let prepared = TransactionBuilder::new()
            .sender(address(1))
            .nonce(Nonce::new(1))
            .expiry(TransactionExpiry::from_seconds(1_700_000_000))
            .transfer(address(2), Amount::from_micro_ccd(10))
            .prepare(1)
            .unwrap();
        // 300 base + 100 per signature + 60 header + 41 payload bytes
        assert_eq!(prepared.energy(), Energy::new(501));
    }

    #[test]
    fn test_sign_defaults_sender_to_keys() {
        let keys = AccountKeys::single(address(7), KeyPair::from_secret_bytes(&[1; 32]));
        let signed = TransactionBuilder::new()
            .nonce(Nonce::new(3))
            .expiry(TransactionExpiry::from_seconds(1_700_000_000))
            .transfer(address(2), Amount::from_micro_ccd(10))
            .sign(&keys)
            .unwrap();
        assert_eq!(signed.header().sender, address(7));
        assert_eq!(signed.signature().count(), 1);

        let public = KeyPair::from_secret_bytes(&[1; 32]).public_key();
        verify(&signed.digest(), signed.signature().get(0, 0).unwrap(), &public).unwrap();
    }

    #[test]
    fn test_sign_without_keys_fails() {
        let keys = AccountKeys::new(address(7));
        let err = TransactionBuilder::new()
            .nonce(Nonce::new(3))
            .transfer(address(2), Amount::from_micro_ccd(10))
            .sign(&keys)
            .unwrap_err();
        assert!(matches!(err, SdkError::Transaction(_)));
    }
}
