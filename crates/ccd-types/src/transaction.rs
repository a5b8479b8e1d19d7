//! Account transactions
//!
//! A transaction moves through three stages, each a distinct type:
//!
//! 1. [`AccountTransaction`]: sender, nonce, expiry and payload.
//! 2. [`PreparedAccountTransaction`]: payload encoded, energy computed for a
//!    fixed number of signatures, header finalized, signing digest ready.
//! 3. [`SignedAccountTransaction`]: signatures attached, ready to submit.
//!
//! The header is `sender(32) || nonce(8) || energy(8) || payload size(4) ||
//! expiry(8)`. The digest the keys sign is `SHA-256(header || payload)`; the
//! signature itself is never part of it.

use bytes::Bytes;
use ccd_codec::{Serial, Serializer};
use ccd_crypto::sha256_concat;
use ccd_primitives::{AccountAddress, Energy, Hash256, Nonce, TransactionExpiry, TransactionHash};

use crate::block_item::{block_item_hash, versioned_block_item, BlockItemKind};
use crate::energy::{calculate_energy_cost, EnergyCost};
use crate::payload::{Payload, RawPayload};
use crate::signature::{AccountTransactionSignature, RawSignature};
use crate::TransactionError;

/// Encoded header length
pub const HEADER_SIZE: usize = 60;

/// Header of an account transaction; the payload size is derived when the
/// header is encoded
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AccountTransactionHeader {
    /// Sending account
    pub sender: AccountAddress,
    /// Account sequence number
    pub nonce: Nonce,
    /// Energy the sender pays for
    pub energy_amount: Energy,
    /// Expiry
    pub expiry: TransactionExpiry,
}

/// Encoded header
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawHeader(Bytes);

impl RawHeader {
    /// Encoded bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl AccountTransactionHeader {
    /// Encode the header for a payload of `payload_size` bytes
    pub fn encode(&self, payload_size: usize) -> Result<RawHeader, TransactionError> {
        let size = u32::try_from(payload_size).map_err(|_| ccd_codec::CodecError::Range {
            what: "payload size",
            value: payload_size as i128,
            width: 4,
        })?;
        let mut out = Serializer::with_capacity(HEADER_SIZE);
        out.put(&self.sender);
        out.put(&self.nonce);
        out.put(&self.energy_amount);
        out.put_u32(size);
        out.put(&self.expiry);
        Ok(RawHeader(out.finish()))
    }
}

impl Serial for RawHeader {
    fn serial(&self, out: &mut Serializer) {
        out.put_slice(&self.0);
    }
}

/// Digest the sender's keys sign: `SHA-256(header || payload)`
pub fn compute_signing_digest(
    header: &AccountTransactionHeader,
    payload: &RawPayload,
) -> Result<Hash256, TransactionError> {
    let raw_header = header.encode(payload.len())?;
    Ok(sha256_concat(&[raw_header.as_bytes(), payload.as_bytes()]))
}

/// Submission body: `signature || header || payload`.
///
/// Fails if the signature map is empty.
pub fn serialize_for_submission(
    header: &AccountTransactionHeader,
    payload: &RawPayload,
    signature: &AccountTransactionSignature,
) -> Result<Bytes, TransactionError> {
    let raw_signature = signature.encode()?;
    let raw_header = header.encode(payload.len())?;
    Ok(assemble(&raw_signature, &raw_header, payload))
}

fn assemble(signature: &RawSignature, header: &RawHeader, payload: &RawPayload) -> Bytes {
    let mut out = Serializer::with_capacity(signature.len() + HEADER_SIZE + payload.len());
    out.put_slice(signature.as_bytes());
    out.put(header);
    out.put_slice(payload.as_bytes());
    out.finish()
}

/// Unsigned account transaction
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AccountTransaction {
    /// Sending account
    pub sender: AccountAddress,
    /// Account sequence number
    pub nonce: Nonce,
    /// Expiry
    pub expiry: TransactionExpiry,
    /// Payload
    pub payload: Payload,
}

impl AccountTransaction {
    /// Create a transaction
    pub fn new(
        sender: AccountAddress,
        nonce: Nonce,
        expiry: TransactionExpiry,
        payload: Payload,
    ) -> Self {
        Self {
            sender,
            nonce,
            expiry,
            payload,
        }
    }

    /// Encode the payload and fix the energy for `signature_count`
    /// signatures.
    ///
    /// The resulting transaction only accepts signature maps with exactly
    /// that many signatures.
    pub fn prepare(self, signature_count: u32) -> Result<PreparedAccountTransaction, TransactionError> {
        if signature_count == 0 {
            return Err(TransactionError::Validation(
                "a transaction needs at least one signature".to_string(),
            ));
        }
        let raw_payload = self.payload.encode()?;
        let energy_amount = calculate_energy_cost(
            signature_count,
            raw_payload.len() as u64,
            self.payload.base_energy_cost()?,
        )?;
        let header = AccountTransactionHeader {
            sender: self.sender,
            nonce: self.nonce,
            energy_amount,
            expiry: self.expiry,
        };
        let raw_header = header.encode(raw_payload.len())?;
        let digest = sha256_concat(&[raw_header.as_bytes(), raw_payload.as_bytes()]);

        Ok(PreparedAccountTransaction {
            header,
            raw_header,
            payload: self.payload,
            raw_payload,
            signature_count,
            digest,
        })
    }
}

/// Transaction with a finalized header, waiting for signatures
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PreparedAccountTransaction {
    header: AccountTransactionHeader,
    raw_header: RawHeader,
    payload: Payload,
    raw_payload: RawPayload,
    signature_count: u32,
    digest: Hash256,
}

impl PreparedAccountTransaction {
    /// Finalized header
    pub fn header(&self) -> &AccountTransactionHeader {
        &self.header
    }

    /// Payload
    pub fn payload(&self) -> &Payload {
        &self.payload
    }

    /// Encoded payload
    pub fn raw_payload(&self) -> &RawPayload {
        &self.raw_payload
    }

    /// Encoded header
    pub fn raw_header(&self) -> &RawHeader {
        &self.raw_header
    }

    /// Energy declared in the header
    pub fn energy(&self) -> Energy {
        self.header.energy_amount
    }

    /// Number of signatures the energy was computed for
    pub fn signature_count(&self) -> u32 {
        self.signature_count
    }

    /// Digest to sign
    pub fn digest(&self) -> Hash256 {
        self.digest
    }

    /// Attach signatures.
    ///
    /// The number of signatures must equal the count the transaction was
    /// prepared for, since the energy in the header depends on it.
    pub fn sign(
        self,
        signature: AccountTransactionSignature,
    ) -> Result<SignedAccountTransaction, TransactionError> {
        let count = signature.count();
        if count != self.signature_count {
            return Err(TransactionError::Validation(format!(
                "prepared for {} signatures, got {}",
                self.signature_count, count
            )));
        }
        let raw_signature = signature.encode()?;
        let body = assemble(&raw_signature, &self.raw_header, &self.raw_payload);
        Ok(SignedAccountTransaction {
            header: self.header,
            raw_payload: self.raw_payload,
            signature,
            digest: self.digest,
            body,
        })
    }
}

/// Signed transaction, ready to submit
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SignedAccountTransaction {
    header: AccountTransactionHeader,
    raw_payload: RawPayload,
    signature: AccountTransactionSignature,
    digest: Hash256,
    body: Bytes,
}

impl SignedAccountTransaction {
    /// Header
    pub fn header(&self) -> &AccountTransactionHeader {
        &self.header
    }

    /// Encoded payload
    pub fn raw_payload(&self) -> &RawPayload {
        &self.raw_payload
    }

    /// Signatures
    pub fn signature(&self) -> &AccountTransactionSignature {
        &self.signature
    }

    /// Digest that was signed
    pub fn digest(&self) -> Hash256 {
        self.digest
    }

    /// Submission body: `signature || header || payload`
    pub fn to_bytes(&self) -> Bytes {
        self.body.clone()
    }

    /// Versioned block item as the node accepts it
    pub fn block_item_bytes(&self) -> Bytes {
        versioned_block_item(BlockItemKind::AccountTransaction, &self.body)
    }

    /// Hash the node will report for this transaction
    pub fn hash(&self) -> TransactionHash {
        block_item_hash(BlockItemKind::AccountTransaction, &self.body)
    }
}
