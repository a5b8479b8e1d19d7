//! Credentials and the credential deployment block item
//!
//! A credential deployment creates a new account. It is not an account
//! transaction: there is no sender, nonce or energy, only the credential
//! values issued by an identity provider, an expiry and proofs. The new
//! account's own keys sign it.

use bytes::Bytes;
use ccd_codec::{Serial, Serializer};
use ccd_crypto::{sha256_concat, PublicKey, Signature};
use ccd_primitives::{CredentialRegistrationId, Hash256, KeyIndex, TransactionExpiry, TransactionHash};
use std::collections::BTreeMap;
use std::fmt;

use crate::block_item::{block_item_hash, versioned_block_item, BlockItemKind};
use crate::TransactionError;

/// Signature scheme tag of Ed25519 verify keys
const ED25519_SCHEME: u8 = 0;

/// Maximum length of a revealed attribute value
pub const MAX_ATTRIBUTE_VALUE_LEN: usize = 31;

/// Tag written before the expiry when a credential opens a new account
const NEW_ACCOUNT_TAG: u8 = 0;

/// Tag of a normal (non-initial) account credential in a deployment payload
pub const NORMAL_CREDENTIAL_TAG: u8 = 1;

/// Public keys of a credential and the number of them required to sign
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CredentialPublicKeys {
    /// Keys by index
    pub keys: BTreeMap<KeyIndex, PublicKey>,
    /// Signature threshold
    pub threshold: u8,
}

impl CredentialPublicKeys {
    /// Encode as `u8 count, (u8 index, u8 scheme, 32 key)*, u8 threshold`
    pub fn serial(&self, out: &mut Serializer) -> Result<(), TransactionError> {
        if self.threshold == 0 || self.threshold as usize > self.keys.len() {
            return Err(TransactionError::Validation(format!(
                "threshold {} invalid for {} keys",
                self.threshold,
                self.keys.len()
            )));
        }
        out.put_count_u8("key count", self.keys.len())?;
        for (index, key) in &self.keys {
            out.put_u8(*index);
            out.put_u8(ED25519_SCHEME);
            out.put_slice(key.as_bytes());
        }
        out.put_u8(self.threshold);
        Ok(())
    }
}

/// Year and month, as used in credential policies
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct YearMonth {
    /// Year
    pub year: u16,
    /// Month, 1-12
    pub month: u8,
}

impl YearMonth {
    /// Create, validating the month
    pub fn new(year: u16, month: u8) -> Result<Self, TransactionError> {
        if !(1..=12).contains(&month) {
            return Err(TransactionError::Format(format!("invalid month: {}", month)));
        }
        Ok(Self { year, month })
    }

    /// Parse the `YYYYMM` form
    pub fn parse(s: &str) -> Result<Self, TransactionError> {
        if s.len() != 6 || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(TransactionError::Format(format!("expected YYYYMM, got {:?}", s)));
        }
        let year = s[..4]
            .parse()
            .map_err(|_| TransactionError::Format(format!("invalid year in {:?}", s)))?;
        let month = s[4..]
            .parse()
            .map_err(|_| TransactionError::Format(format!("invalid month in {:?}", s)))?;
        Self::new(year, month)
    }
}

impl Serial for YearMonth {
    fn serial(&self, out: &mut Serializer) {
        out.put_u16(self.year);
        out.put_u8(self.month);
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}{:02}", self.year, self.month)
    }
}

/// Identity attributes a credential may reveal
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum AttributeTag {
    /// First name
    FirstName = 0,
    /// Last name
    LastName = 1,
    /// Sex
    Sex = 2,
    /// Date of birth
    DateOfBirth = 3,
    /// Country of residence
    CountryOfResidence = 4,
    /// Nationality
    Nationality = 5,
    /// Identity document type
    IdDocType = 6,
    /// Identity document number
    IdDocNo = 7,
    /// Identity document issuer
    IdDocIssuer = 8,
    /// Identity document issue date
    IdDocIssuedAt = 9,
    /// Identity document expiry date
    IdDocExpiresAt = 10,
    /// National id number
    NationalIdNo = 11,
    /// Tax id number
    TaxIdNo = 12,
}

/// Validity window and revealed attributes of a credential
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Policy {
    /// Last month the credential is valid
    pub valid_to: YearMonth,
    /// Month the credential was created
    pub created_at: YearMonth,
    /// Attributes revealed on chain
    pub revealed_attributes: BTreeMap<AttributeTag, String>,
}

impl Policy {
    fn serial(&self, out: &mut Serializer) -> Result<(), TransactionError> {
        out.put(&self.valid_to);
        out.put(&self.created_at);
        out.put_count_u16("revealed attribute count", self.revealed_attributes.len())?;
        for (tag, value) in &self.revealed_attributes {
            if value.len() > MAX_ATTRIBUTE_VALUE_LEN {
                return Err(ccd_codec::CodecError::TooLong {
                    what: "attribute value",
                    len: value.len(),
                    max: MAX_ATTRIBUTE_VALUE_LEN,
                }
                .into());
            }
            out.put_u8(*tag as u8);
            out.put_bytes_u8("attribute value", value.as_bytes())?;
        }
        Ok(())
    }
}

/// Encrypted share of the credential holder's id, for one anonymity revoker
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct ChainArData {
    /// Encrypted id credential public share (96 bytes)
    pub enc_id_cred_pub_share: [u8; 96],
}

impl ChainArData {
    /// Parse from the 192-character hex form
    pub fn from_hex(s: &str) -> Result<Self, TransactionError> {
        let bytes = hex::decode(s)?;
        let enc_id_cred_pub_share = bytes.as_slice().try_into().map_err(|_| {
            TransactionError::Format(format!("expected 96 bytes of ar data, got {}", bytes.len()))
        })?;
        Ok(Self { enc_id_cred_pub_share })
    }
}

impl fmt::Debug for ChainArData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ChainArData({})", hex::encode(self.enc_id_cred_pub_share))
    }
}

/// Values of a credential, as issued by an identity provider
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CredentialDeploymentValues {
    /// Keys that will control the credential
    pub credential_public_keys: CredentialPublicKeys,
    /// Registration id of the credential
    pub cred_id: CredentialRegistrationId,
    /// Identity provider that issued the identity
    pub ip_identity: u32,
    /// Number of anonymity revokers needed to revoke anonymity
    pub revocation_threshold: u8,
    /// Encrypted id shares, by anonymity revoker identity
    pub ar_data: BTreeMap<u32, ChainArData>,
    /// Policy
    pub policy: Policy,
}

impl CredentialDeploymentValues {
    /// Encode the values
    pub fn serial(&self, out: &mut Serializer) -> Result<(), TransactionError> {
        if self.revocation_threshold == 0 || self.revocation_threshold as usize > self.ar_data.len() {
            return Err(TransactionError::Validation(format!(
                "revocation threshold {} invalid for {} anonymity revokers",
                self.revocation_threshold,
                self.ar_data.len()
            )));
        }
        self.credential_public_keys.serial(out)?;
        out.put(&self.cred_id);
        out.put_u32(self.ip_identity);
        out.put_u8(self.revocation_threshold);
        out.put_count_u16("ar data count", self.ar_data.len())?;
        for (ar_identity, data) in &self.ar_data {
            out.put_u32(*ar_identity);
            out.put_slice(&data.enc_id_cred_pub_share);
        }
        self.policy.serial(out)
    }

    /// Number of keys on the credential, as charged by the energy model
    pub fn key_count(&self) -> u64 {
        self.credential_public_keys.keys.len() as u64
    }
}

/// Credential values together with their proofs
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CredentialDeploymentInfo {
    /// Credential values
    pub values: CredentialDeploymentValues,
    /// Proofs, already in the node's encoding
    pub proofs: Bytes,
}

impl CredentialDeploymentInfo {
    /// Encode as `values, u32 proof length, proofs`
    pub fn serial(&self, out: &mut Serializer) -> Result<(), TransactionError> {
        self.values.serial(out)?;
        out.put_bytes_u32("credential proofs", &self.proofs)?;
        Ok(())
    }
}

/// A credential deployment that has not been signed by the new account's keys
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnsignedCredentialDeployment {
    /// Credential values
    pub values: CredentialDeploymentValues,
    /// Identity ownership proofs, already in the node's encoding
    pub id_proofs: Bytes,
    /// Expiry of the block item
    pub expiry: TransactionExpiry,
}

impl UnsignedCredentialDeployment {
    /// Digest the new account's keys sign.
    ///
    /// `sha256(values || id_proofs || 0x00 || expiry)`, where `0x00` marks a
    /// credential that opens a new account.
    pub fn signing_digest(&self) -> Result<Hash256, TransactionError> {
        let mut values = Serializer::new();
        self.values.serial(&mut values)?;
        let values = values.finish();
        let expiry = self.expiry.seconds().to_be_bytes();
        Ok(sha256_concat(&[
            &values,
            &self.id_proofs,
            &[NEW_ACCOUNT_TAG],
            &expiry,
        ]))
    }

    /// Attach the account-ownership signatures.
    ///
    /// The signatures are over [`signing_digest`](Self::signing_digest) and
    /// are keyed like the credential's public keys.
    pub fn sign(
        self,
        signatures: BTreeMap<KeyIndex, Signature>,
    ) -> Result<SignedCredentialDeployment, TransactionError> {
        if signatures.is_empty() {
            return Err(TransactionError::Validation(
                "credential deployment needs at least one signature".to_string(),
            ));
        }
        if let Some(index) = signatures
            .keys()
            .find(|index| !self.values.credential_public_keys.keys.contains_key(index))
        {
            return Err(TransactionError::Validation(format!(
                "signature for unknown key index {}",
                index
            )));
        }

        let mut proofs = Serializer::new();
        proofs.put_slice(&self.id_proofs);
        proofs.put_count_u8("ownership signature count", signatures.len())?;
        for (index, signature) in &signatures {
            proofs.put_u8(*index);
            proofs.put_slice(signature.as_bytes());
        }

        let mut payload = Serializer::new();
        payload.put_u8(NORMAL_CREDENTIAL_TAG);
        self.values.serial(&mut payload)?;
        payload.put_bytes_u32("credential proofs", &proofs.finish())?;

        Ok(SignedCredentialDeployment {
            expiry: self.expiry,
            payload: payload.finish(),
        })
    }
}

/// A credential deployment ready for submission
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SignedCredentialDeployment {
    expiry: TransactionExpiry,
    payload: Bytes,
}

impl SignedCredentialDeployment {
    /// Expiry of the block item
    pub fn expiry(&self) -> TransactionExpiry {
        self.expiry
    }

    /// Encoded credential with proofs and signatures:
    /// `0x01 || values || u32 len || id_proofs || signatures`
    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    /// Block item body: `expiry || payload`
    pub fn to_bytes(&self) -> Bytes {
        let mut out = Serializer::with_capacity(8 + self.payload.len());
        out.put(&self.expiry);
        out.put_slice(&self.payload);
        out.finish()
    }

    /// Versioned block item as the node accepts it
    pub fn block_item_bytes(&self) -> Bytes {
        versioned_block_item(BlockItemKind::CredentialDeployment, &self.to_bytes())
    }

    /// Hash the node will report for this block item
    pub fn hash(&self) -> TransactionHash {
        block_item_hash(BlockItemKind::CredentialDeployment, &self.to_bytes())
    }
}
