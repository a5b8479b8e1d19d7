//! Account transaction payloads
//!
//! Every payload encodes as its transaction-type byte followed by the
//! variant's fields. The type byte belongs to the payload encoding; nothing
//! else writes it.

use bytes::Bytes;
use ccd_codec::{CodecError, Serial, Serializer};
use ccd_primitives::{
    AccountAddress, Amount, ContractAddress, CredentialIndex, CredentialRegistrationId, Energy,
    ModuleReference, Timestamp,
};
use std::fmt;

use crate::credential::{CredentialDeploymentInfo, CredentialPublicKeys};
use crate::TransactionError;

/// Maximum length of a memo or registered data
pub const MAX_MEMO_LEN: usize = 256;

/// Maximum length of a contract init or receive name
pub const MAX_FUNC_NAME_LEN: usize = 100;

/// Maximum length of a contract invocation parameter
pub const MAX_PARAMETER_LEN: usize = u16::MAX as usize;

/// Length of an encrypted amount
pub const ENCRYPTED_AMOUNT_LEN: usize = 192;

/// Transaction type discriminant, the first byte of every payload
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum TransactionType {
    /// Deploy a smart contract module
    DeployModule = 0,
    /// Initialize a contract instance
    InitContract = 1,
    /// Invoke a contract entrypoint
    Update = 2,
    /// Plain transfer
    Transfer = 3,
    /// Register as a baker
    AddBaker = 4,
    /// Stop baking
    RemoveBaker = 5,
    /// Change baker stake
    UpdateBakerStake = 6,
    /// Change whether baker earnings are restaked
    UpdateBakerRestakeEarnings = 7,
    /// Rotate baker keys
    UpdateBakerKeys = 8,
    /// Replace the keys of one credential
    UpdateCredentialKeys = 13,
    /// Shielded transfer
    EncryptedAmountTransfer = 16,
    /// Move public balance to the shielded balance
    TransferToEncrypted = 17,
    /// Move shielded balance to the public balance
    TransferToPublic = 18,
    /// Transfer released over time
    TransferWithSchedule = 19,
    /// Add and remove credentials on an account
    UpdateCredentials = 20,
    /// Put data on chain
    RegisterData = 21,
    /// Plain transfer with memo
    TransferWithMemo = 22,
    /// Shielded transfer with memo
    EncryptedAmountTransferWithMemo = 23,
    /// Scheduled transfer with memo
    TransferWithScheduleAndMemo = 24,
}

impl TransactionType {
    /// The discriminant byte
    pub const fn as_u8(self) -> u8 {
        self as u8
    }
}

impl TryFrom<u8> for TransactionType {
    type Error = TransactionError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        use TransactionType::*;
        Ok(match value {
            0 => DeployModule,
            1 => InitContract,
            2 => Update,
            3 => Transfer,
            4 => AddBaker,
            5 => RemoveBaker,
            6 => UpdateBakerStake,
            7 => UpdateBakerRestakeEarnings,
            8 => UpdateBakerKeys,
            13 => UpdateCredentialKeys,
            16 => EncryptedAmountTransfer,
            17 => TransferToEncrypted,
            18 => TransferToPublic,
            19 => TransferWithSchedule,
            20 => UpdateCredentials,
            21 => RegisterData,
            22 => TransferWithMemo,
            23 => EncryptedAmountTransferWithMemo,
            24 => TransferWithScheduleAndMemo,
            other => {
                return Err(TransactionError::Format(format!(
                    "unknown transaction type: {}",
                    other
                )))
            }
        })
    }
}

/// Byte string of at most [`MAX_MEMO_LEN`] bytes
fn bounded(what: &'static str, bytes: Vec<u8>) -> Result<Bytes, TransactionError> {
    if bytes.len() > MAX_MEMO_LEN {
        return Err(CodecError::TooLong {
            what,
            len: bytes.len(),
            max: MAX_MEMO_LEN,
        }
        .into());
    }
    Ok(Bytes::from(bytes))
}

/// Memo attached to a transfer.
///
/// The bytes are written as given. Callers that want the memo to display
/// in wallets encode it as CBOR first.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Memo(Bytes);

impl Memo {
    /// Create a memo, at most 256 bytes
    pub fn new(bytes: impl Into<Vec<u8>>) -> Result<Self, TransactionError> {
        bounded("memo", bytes.into()).map(Memo)
    }

    /// Memo bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl Serial for Memo {
    fn serial(&self, out: &mut Serializer) {
        out.put_u16(self.0.len() as u16);
        out.put_slice(&self.0);
    }
}

/// Data registered on chain, at most 256 bytes
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RegisteredData(Bytes);

impl RegisteredData {
    /// Create, at most 256 bytes
    pub fn new(bytes: impl Into<Vec<u8>>) -> Result<Self, TransactionError> {
        bounded("registered data", bytes.into()).map(RegisteredData)
    }

    /// Data bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl Serial for RegisteredData {
    fn serial(&self, out: &mut Serializer) {
        out.put_u16(self.0.len() as u16);
        out.put_slice(&self.0);
    }
}

/// ElGamal-encrypted amount (192 bytes)
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct EncryptedAmount([u8; ENCRYPTED_AMOUNT_LEN]);

impl EncryptedAmount {
    /// Wrap raw bytes
    pub const fn from_bytes(bytes: [u8; ENCRYPTED_AMOUNT_LEN]) -> Self {
        Self(bytes)
    }

    /// Parse from hex
    pub fn from_hex(s: &str) -> Result<Self, TransactionError> {
        Ok(Self(fixed_from_hex("encrypted amount", s)?))
    }

    /// Raw bytes
    pub fn as_bytes(&self) -> &[u8; ENCRYPTED_AMOUNT_LEN] {
        &self.0
    }
}

impl fmt::Debug for EncryptedAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EncryptedAmount({})", hex::encode(self.0))
    }
}

impl Serial for EncryptedAmount {
    fn serial(&self, out: &mut Serializer) {
        out.put_slice(&self.0);
    }
}

fn fixed_from_hex<const N: usize>(what: &str, s: &str) -> Result<[u8; N], TransactionError> {
    let bytes = hex::decode(s)?;
    bytes.as_slice().try_into().map_err(|_| {
        TransactionError::Format(format!("{} must be {} bytes, got {}", what, N, bytes.len()))
    })
}

/// Shielded transfer body shared by both encrypted transfer variants
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EncryptedTransferData {
    /// Shielded balance left after the transfer
    pub remaining_amount: EncryptedAmount,
    /// Amount sent
    pub transfer_amount: EncryptedAmount,
    /// Index up to which incoming amounts were combined
    pub index: u64,
    /// Transfer proof, already in the node's encoding
    pub proof: Bytes,
}

impl Serial for EncryptedTransferData {
    fn serial(&self, out: &mut Serializer) {
        out.put(&self.remaining_amount);
        out.put(&self.transfer_amount);
        out.put_u64(self.index);
        out.put_slice(&self.proof);
    }
}

/// One release of a scheduled transfer
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SchedulePoint {
    /// Release time
    pub timestamp: Timestamp,
    /// Amount released
    pub amount: Amount,
}

/// Baker verify keys with proofs of knowledge of the matching secrets
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BakerKeysWithProofs {
    /// Election verify key
    pub election_verify_key: [u8; 32],
    /// Signature verify key
    pub signature_verify_key: [u8; 32],
    /// Aggregation verify key
    pub aggregation_verify_key: [u8; 96],
    /// Proof for the signature key
    pub proof_signature: [u8; 64],
    /// Proof for the election key
    pub proof_election: [u8; 64],
    /// Proof for the aggregation key
    pub proof_aggregation: [u8; 64],
}

impl BakerKeysWithProofs {
    /// Parse the hex form the node and wallets export
    pub fn from_hex(
        election_verify_key: &str,
        signature_verify_key: &str,
        aggregation_verify_key: &str,
        proof_signature: &str,
        proof_election: &str,
        proof_aggregation: &str,
    ) -> Result<Self, TransactionError> {
        Ok(Self {
            election_verify_key: fixed_from_hex("election verify key", election_verify_key)?,
            signature_verify_key: fixed_from_hex("signature verify key", signature_verify_key)?,
            aggregation_verify_key: fixed_from_hex("aggregation verify key", aggregation_verify_key)?,
            proof_signature: fixed_from_hex("signature key proof", proof_signature)?,
            proof_election: fixed_from_hex("election key proof", proof_election)?,
            proof_aggregation: fixed_from_hex("aggregation key proof", proof_aggregation)?,
        })
    }
}

impl Serial for BakerKeysWithProofs {
    fn serial(&self, out: &mut Serializer) {
        out.put_slice(&self.election_verify_key);
        out.put_slice(&self.signature_verify_key);
        out.put_slice(&self.aggregation_verify_key);
        out.put_slice(&self.proof_signature);
        out.put_slice(&self.proof_election);
        out.put_slice(&self.proof_aggregation);
    }
}

/// Smart contract module version
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u32)]
pub enum WasmVersion {
    /// Version 0 modules
    V0 = 0,
    /// Version 1 modules
    V1 = 1,
}

/// A new credential added by [`Payload::UpdateCredentials`]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IndexedCredential {
    /// Index the credential gets on the account
    pub index: CredentialIndex,
    /// Credential with proofs
    pub credential: CredentialDeploymentInfo,
}

/// Account transaction payload
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Payload {
    /// Deploy a Wasm module
    DeployModule {
        /// Module version
        version: WasmVersion,
        /// Module source
        source: Bytes,
    },
    /// Initialize a contract instance
    InitContract {
        /// Amount sent to the instance
        amount: Amount,
        /// Module holding the contract
        module_ref: ModuleReference,
        /// Contract name, without the `init_` prefix
        contract_name: String,
        /// Serialized init parameter
        parameter: Bytes,
        /// Energy allowed for contract execution
        max_energy: Energy,
    },
    /// Invoke a contract entrypoint
    Update {
        /// Amount sent to the instance
        amount: Amount,
        /// Instance address
        address: ContractAddress,
        /// Contract name
        contract_name: String,
        /// Entrypoint name
        entrypoint: String,
        /// Serialized parameter
        parameter: Bytes,
        /// Energy allowed for contract execution
        max_energy: Energy,
    },
    /// Plain transfer
    Transfer {
        /// Recipient
        to_address: AccountAddress,
        /// Amount
        amount: Amount,
    },
    /// Register as a baker
    AddBaker {
        /// Baker keys and proofs
        keys: BakerKeysWithProofs,
        /// Initial stake
        baking_stake: Amount,
        /// Whether earnings are added to the stake
        restake_earnings: bool,
    },
    /// Stop baking
    RemoveBaker,
    /// Change baker stake
    UpdateBakerStake {
        /// New stake
        stake: Amount,
    },
    /// Change whether earnings are restaked
    UpdateBakerRestakeEarnings {
        /// New flag
        restake_earnings: bool,
    },
    /// Rotate baker keys
    UpdateBakerKeys {
        /// New keys and proofs
        keys: BakerKeysWithProofs,
    },
    /// Replace the keys of a credential
    UpdateCredentialKeys {
        /// Credential to update
        cred_id: CredentialRegistrationId,
        /// New keys
        keys: CredentialPublicKeys,
        /// Credentials on the account now, charged by the node
        current_credential_count: u64,
    },
    /// Shielded transfer
    EncryptedAmountTransfer {
        /// Recipient
        to_address: AccountAddress,
        /// Encrypted amounts and proof
        data: EncryptedTransferData,
    },
    /// Move public balance to the shielded balance
    TransferToEncrypted {
        /// Amount
        amount: Amount,
    },
    /// Move shielded balance to the public balance
    TransferToPublic {
        /// Shielded balance left afterwards
        remaining_amount: EncryptedAmount,
        /// Amount made public
        amount: Amount,
        /// Index up to which incoming amounts were combined
        index: u64,
        /// Proof, already in the node's encoding
        proof: Bytes,
    },
    /// Transfer released over time
    TransferWithSchedule {
        /// Recipient
        to_address: AccountAddress,
        /// Releases, in time order
        schedule: Vec<SchedulePoint>,
    },
    /// Add and remove credentials
    UpdateCredentials {
        /// Credentials to add
        new_credentials: Vec<IndexedCredential>,
        /// Credentials to remove
        remove_credential_ids: Vec<CredentialRegistrationId>,
        /// New account threshold
        threshold: u8,
        /// Credentials on the account now, charged by the node
        current_credential_count: u64,
    },
    /// Put data on chain
    RegisterData {
        /// Data
        data: RegisteredData,
    },
    /// Plain transfer with memo
    TransferWithMemo {
        /// Recipient
        to_address: AccountAddress,
        /// Memo
        memo: Memo,
        /// Amount
        amount: Amount,
    },
    /// Shielded transfer with memo
    EncryptedAmountTransferWithMemo {
        /// Recipient
        to_address: AccountAddress,
        /// Memo
        memo: Memo,
        /// Encrypted amounts and proof
        data: EncryptedTransferData,
    },
    /// Scheduled transfer with memo
    TransferWithScheduleAndMemo {
        /// Recipient
        to_address: AccountAddress,
        /// Memo
        memo: Memo,
        /// Releases, in time order
        schedule: Vec<SchedulePoint>,
    },
}

/// Encoded payload, type byte included
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawPayload(Bytes);

impl RawPayload {
    /// Wrap bytes that are already a payload encoding
    pub fn from_bytes(bytes: impl Into<Bytes>) -> Self {
        Self(bytes.into())
    }

    /// Encoded bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Encoded length
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the payload is empty; never true for an encoded [`Payload`]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Transaction type from the leading byte
    pub fn transaction_type(&self) -> Result<TransactionType, TransactionError> {
        let tag = self
            .0
            .first()
            .ok_or_else(|| TransactionError::Format("empty payload".to_string()))?;
        TransactionType::try_from(*tag)
    }

    /// Shared handle to the bytes
    pub fn bytes(&self) -> Bytes {
        self.0.clone()
    }
}

impl AsRef<[u8]> for RawPayload {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl Payload {
    /// Simple transfer
    pub fn transfer(to_address: AccountAddress, amount: Amount) -> Self {
        Payload::Transfer { to_address, amount }
    }

    /// Transaction type of this payload
    pub fn transaction_type(&self) -> TransactionType {
        match self {
            Payload::DeployModule { .. } => TransactionType::DeployModule,
            Payload::InitContract { .. } => TransactionType::InitContract,
            Payload::Update { .. } => TransactionType::Update,
            Payload::Transfer { .. } => TransactionType::Transfer,
            Payload::AddBaker { .. } => TransactionType::AddBaker,
            Payload::RemoveBaker => TransactionType::RemoveBaker,
            Payload::UpdateBakerStake { .. } => TransactionType::UpdateBakerStake,
            Payload::UpdateBakerRestakeEarnings { .. } => {
                TransactionType::UpdateBakerRestakeEarnings
            }
            Payload::UpdateBakerKeys { .. } => TransactionType::UpdateBakerKeys,
            Payload::UpdateCredentialKeys { .. } => TransactionType::UpdateCredentialKeys,
            Payload::EncryptedAmountTransfer { .. } => TransactionType::EncryptedAmountTransfer,
            Payload::TransferToEncrypted { .. } => TransactionType::TransferToEncrypted,
            Payload::TransferToPublic { .. } => TransactionType::TransferToPublic,
            Payload::TransferWithSchedule { .. } => TransactionType::TransferWithSchedule,
            Payload::UpdateCredentials { .. } => TransactionType::UpdateCredentials,
            Payload::RegisterData { .. } => TransactionType::RegisterData,
            Payload::TransferWithMemo { .. } => TransactionType::TransferWithMemo,
            Payload::EncryptedAmountTransferWithMemo { .. } => {
                TransactionType::EncryptedAmountTransferWithMemo
            }
            Payload::TransferWithScheduleAndMemo { .. } => {
                TransactionType::TransferWithScheduleAndMemo
            }
        }
    }

    /// Encode the payload, type byte first
    pub fn encode(&self) -> Result<RawPayload, TransactionError> {
        let mut out = Serializer::new();
        out.put_u8(self.transaction_type().as_u8());

        match self {
            Payload::DeployModule { version, source } => {
                out.put_u32(*version as u32);
                out.put_bytes_u32("module source", source)?;
            }
            Payload::InitContract {
                amount,
                module_ref,
                contract_name,
                parameter,
                ..
            } => {
                check_contract_name(contract_name)?;
                out.put(amount);
                out.put(module_ref);
                let init_name = format!("init_{}", contract_name);
                check_func_name_len(&init_name)?;
                out.put_bytes_u16("init name", init_name.as_bytes())?;
                out.put_bytes_u16("parameter", parameter)?;
            }
            Payload::Update {
                amount,
                address,
                contract_name,
                entrypoint,
                parameter,
                ..
            } => {
                check_contract_name(contract_name)?;
                check_entrypoint(entrypoint)?;
                out.put(amount);
                out.put(address);
                let receive_name = format!("{}.{}", contract_name, entrypoint);
                check_func_name_len(&receive_name)?;
                out.put_bytes_u16("receive name", receive_name.as_bytes())?;
                out.put_bytes_u16("parameter", parameter)?;
            }
            Payload::Transfer { to_address, amount } => {
                out.put(to_address);
                out.put(amount);
            }
            Payload::AddBaker {
                keys,
                baking_stake,
                restake_earnings,
            } => {
                out.put(keys);
                out.put(baking_stake);
                out.put_bool(*restake_earnings);
            }
            Payload::RemoveBaker => {}
            Payload::UpdateBakerStake { stake } => out.put(stake),
            Payload::UpdateBakerRestakeEarnings { restake_earnings } => {
                out.put_bool(*restake_earnings)
            }
            Payload::UpdateBakerKeys { keys } => out.put(keys),
            Payload::UpdateCredentialKeys { cred_id, keys, .. } => {
                out.put(cred_id);
                keys.serial(&mut out)?;
            }
            Payload::EncryptedAmountTransfer { to_address, data } => {
                out.put(to_address);
                out.put(data);
            }
            Payload::TransferToEncrypted { amount } => out.put(amount),
            Payload::TransferToPublic {
                remaining_amount,
                amount,
                index,
                proof,
            } => {
                out.put(remaining_amount);
                out.put(amount);
                out.put_u64(*index);
                out.put_slice(proof);
            }
            Payload::TransferWithSchedule {
                to_address,
                schedule,
            } => {
                out.put(to_address);
                put_schedule(&mut out, schedule)?;
            }
            Payload::UpdateCredentials {
                new_credentials,
                remove_credential_ids,
                threshold,
                ..
            } => {
                if *threshold == 0 {
                    return Err(TransactionError::Validation(
                        "account threshold must be at least 1".to_string(),
                    ));
                }
                out.put_count_u8("new credential count", new_credentials.len())?;
                for new in new_credentials {
                    out.put_u8(new.index);
                    new.credential.serial(&mut out)?;
                }
                out.put_count_u8("removed credential count", remove_credential_ids.len())?;
                for cred_id in remove_credential_ids {
                    out.put(cred_id);
                }
                out.put_u8(*threshold);
            }
            Payload::RegisterData { data } => out.put(data),
            Payload::TransferWithMemo {
                to_address,
                memo,
                amount,
            } => {
                out.put(to_address);
                out.put(memo);
                out.put(amount);
            }
            Payload::EncryptedAmountTransferWithMemo {
                to_address,
                memo,
                data,
            } => {
                out.put(to_address);
                out.put(memo);
                out.put(data);
            }
            Payload::TransferWithScheduleAndMemo {
                to_address,
                memo,
                schedule,
            } => {
                out.put(to_address);
                out.put(memo);
                put_schedule(&mut out, schedule)?;
            }
        }

        Ok(RawPayload(out.finish()))
    }
}

fn put_schedule(out: &mut Serializer, schedule: &[SchedulePoint]) -> Result<(), TransactionError> {
    if schedule.is_empty() {
        return Err(TransactionError::Validation(
            "schedule must have at least one release".to_string(),
        ));
    }
    out.put_count_u8("schedule length", schedule.len())?;
    for point in schedule {
        out.put(&point.timestamp);
        out.put(&point.amount);
    }
    Ok(())
}

fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c.is_ascii_punctuation()
}

fn check_contract_name(name: &str) -> Result<(), TransactionError> {
    if name.is_empty() || name.contains('.') || !name.chars().all(is_name_char) {
        return Err(TransactionError::Validation(format!(
            "invalid contract name: {:?}",
            name
        )));
    }
    Ok(())
}

// An empty entrypoint names the contract's fallback receive function.
fn check_entrypoint(name: &str) -> Result<(), TransactionError> {
    if !name.chars().all(is_name_char) {
        return Err(TransactionError::Validation(format!(
            "invalid entrypoint name: {:?}",
            name
        )));
    }
    Ok(())
}

fn check_func_name_len(name: &str) -> Result<(), TransactionError> {
    if name.len() > MAX_FUNC_NAME_LEN {
        return Err(CodecError::TooLong {
            what: "contract function name",
            len: name.len(),
            max: MAX_FUNC_NAME_LEN,
        }
        .into());
    }
    Ok(())
}
