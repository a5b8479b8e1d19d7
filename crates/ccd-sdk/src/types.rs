//! Request inputs and response types of the node client

use bytes::Bytes;
use ccd_primitives::{
    AccountAddress, AccountIndex, Amount, BlockHash, ContractAddress, CredentialRegistrationId,
    Energy, Hash256, ModuleReference, Nonce,
};
use ccd_types::payload::WasmVersion;

use crate::proto;
use crate::SdkError;

/// Block a query is evaluated in
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BlockHashInput {
    /// Best block
    Best,
    /// Last finalized block
    #[default]
    LastFinal,
    /// A specific block
    Given(BlockHash),
}

impl BlockHashInput {
    /// A specific block, from its 32 raw bytes
    pub fn given(hash: &[u8]) -> Result<Self, SdkError> {
        let hash = Hash256::from_slice(hash).map_err(|_| {
            SdkError::InvalidInput(format!(
                "the input was not a valid hash, must be 32 bytes: {}",
                hex::encode(hash)
            ))
        })?;
        Ok(BlockHashInput::Given(hash))
    }
}

impl From<BlockHash> for BlockHashInput {
    fn from(hash: BlockHash) -> Self {
        BlockHashInput::Given(hash)
    }
}

impl From<BlockHashInput> for proto::BlockHashInput {
    fn from(input: BlockHashInput) -> Self {
        use proto::block_hash_input::BlockHashInput as Input;
        let input = match input {
            BlockHashInput::Best => Input::Best(proto::Empty {}),
            BlockHashInput::LastFinal => Input::LastFinal(proto::Empty {}),
            BlockHashInput::Given(hash) => Input::Given(proto::BlockHash {
                value: hash.as_bytes().to_vec(),
            }),
        };
        proto::BlockHashInput {
            block_hash_input: Some(input),
        }
    }
}

/// Ways to name an account in a query
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AccountIdentifier {
    /// Account address
    Address(AccountAddress),
    /// Registration id of any credential ever deployed to the account
    CredId(CredentialRegistrationId),
    /// Account index
    Index(AccountIndex),
}

impl From<AccountAddress> for AccountIdentifier {
    fn from(address: AccountAddress) -> Self {
        AccountIdentifier::Address(address)
    }
}

impl From<CredentialRegistrationId> for AccountIdentifier {
    fn from(cred_id: CredentialRegistrationId) -> Self {
        AccountIdentifier::CredId(cred_id)
    }
}

impl From<AccountIndex> for AccountIdentifier {
    fn from(index: AccountIndex) -> Self {
        AccountIdentifier::Index(index)
    }
}

impl From<AccountIdentifier> for proto::AccountIdentifierInput {
    fn from(identifier: AccountIdentifier) -> Self {
        use proto::account_identifier_input::AccountIdentifierInput as Input;
        let input = match identifier {
            AccountIdentifier::Address(address) => Input::Address(address.into()),
            AccountIdentifier::CredId(cred_id) => {
                Input::CredId(proto::CredentialRegistrationId {
                    value: cred_id.as_bytes().to_vec(),
                })
            }
            AccountIdentifier::Index(index) => Input::AccountIndex(proto::AccountIndex {
                value: index.0,
            }),
        };
        proto::AccountIdentifierInput {
            account_identifier_input: Some(input),
        }
    }
}

impl From<AccountAddress> for proto::AccountAddress {
    fn from(address: AccountAddress) -> Self {
        proto::AccountAddress {
            value: address.as_bytes().to_vec(),
        }
    }
}

impl From<ContractAddress> for proto::ContractAddress {
    fn from(address: ContractAddress) -> Self {
        proto::ContractAddress {
            index: address.index,
            subindex: address.subindex,
        }
    }
}

pub(crate) fn require<T>(field: Option<T>, name: &str) -> Result<T, SdkError> {
    field.ok_or_else(|| SdkError::Decode(format!("missing field: {}", name)))
}

pub(crate) fn hash_from(bytes: &[u8], name: &str) -> Result<Hash256, SdkError> {
    Hash256::from_slice(bytes).map_err(|e| SdkError::Decode(format!("{}: {}", name, e)))
}

fn address_from(address: proto::AccountAddress) -> Result<AccountAddress, SdkError> {
    AccountAddress::from_slice(&address.value)
        .map_err(|e| SdkError::Decode(format!("account address: {}", e)))
}

/// Next nonce to use for an account
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NextAccountSequenceNumber {
    /// Next nonce
    pub nonce: Nonce,
    /// Whether every transaction of the account is finalized, so the nonce
    /// is reliable
    pub all_final: bool,
}

impl TryFrom<proto::NextAccountSequenceNumber> for NextAccountSequenceNumber {
    type Error = SdkError;

    fn try_from(value: proto::NextAccountSequenceNumber) -> Result<Self, SdkError> {
        Ok(Self {
            nonce: Nonce::new(require(value.sequence_number, "sequence_number")?.value),
            all_final: value.all_final,
        })
    }
}

/// Global cryptographic parameters
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CryptographicParameters {
    /// Genesis string
    pub genesis_string: String,
    /// Bulletproof generators
    pub bulletproof_generators: Bytes,
    /// Commitment key for on-chain commitments
    pub on_chain_commitment_key: Bytes,
}

impl From<proto::CryptographicParameters> for CryptographicParameters {
    fn from(value: proto::CryptographicParameters) -> Self {
        Self {
            genesis_string: value.genesis_string,
            bulletproof_generators: value.bulletproof_generators.into(),
            on_chain_commitment_key: value.on_chain_commitment_key.into(),
        }
    }
}

/// Account state
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AccountInfo {
    /// Canonical address
    pub address: AccountAddress,
    /// Account index
    pub index: AccountIndex,
    /// Next nonce
    pub nonce: Nonce,
    /// Public balance
    pub amount: Amount,
    /// Number of credentials that must sign a transaction
    pub threshold: u32,
}

impl TryFrom<proto::AccountInfo> for AccountInfo {
    type Error = SdkError;

    fn try_from(value: proto::AccountInfo) -> Result<Self, SdkError> {
        Ok(Self {
            address: address_from(require(value.address, "address")?)?,
            index: AccountIndex(require(value.index, "index")?.value),
            nonce: Nonce::new(require(value.sequence_number, "sequence_number")?.value),
            amount: Amount::from_micro_ccd(require(value.amount, "amount")?.value),
            threshold: require(value.threshold, "threshold")?.value,
        })
    }
}

/// Status of a submitted block item
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BlockItemStatus {
    /// Received but not yet in any block
    Received,
    /// In one or more non-finalized blocks
    Committed(Vec<BlockHash>),
    /// In a finalized block
    Finalized(BlockHash),
}

impl BlockItemStatus {
    /// Whether the item is finalized
    pub fn is_finalized(&self) -> bool {
        matches!(self, BlockItemStatus::Finalized(_))
    }
}

impl TryFrom<proto::BlockItemStatus> for BlockItemStatus {
    type Error = SdkError;

    fn try_from(value: proto::BlockItemStatus) -> Result<Self, SdkError> {
        use proto::block_item_status::Status;
        let block_of = |outcome: proto::BlockItemSummaryInBlock| {
            hash_from(&require(outcome.block_hash, "block_hash")?.value, "block hash")
        };
        match require(value.status, "status")? {
            Status::Received(_) => Ok(BlockItemStatus::Received),
            Status::Committed(committed) => Ok(BlockItemStatus::Committed(
                committed
                    .outcomes
                    .into_iter()
                    .map(block_of)
                    .collect::<Result<_, _>>()?,
            )),
            Status::Finalized(finalized) => Ok(BlockItemStatus::Finalized(block_of(require(
                finalized.outcome,
                "outcome",
            )?)?)),
        }
    }
}

/// Consensus state summary
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ConsensusInfo {
    /// Best block
    pub best_block: BlockHash,
    /// Genesis block
    pub genesis_block: BlockHash,
    /// Last finalized block
    pub last_finalized_block: BlockHash,
    /// Height of the best block
    pub best_block_height: u64,
    /// Height of the last finalized block
    pub last_finalized_block_height: u64,
}

impl TryFrom<proto::ConsensusInfo> for ConsensusInfo {
    type Error = SdkError;

    fn try_from(value: proto::ConsensusInfo) -> Result<Self, SdkError> {
        Ok(Self {
            best_block: hash_from(&require(value.best_block, "best_block")?.value, "best block")?,
            genesis_block: hash_from(
                &require(value.genesis_block, "genesis_block")?.value,
                "genesis block",
            )?,
            last_finalized_block: hash_from(
                &require(value.last_finalized_block, "last_finalized_block")?.value,
                "last finalized block",
            )?,
            best_block_height: require(value.best_block_height, "best_block_height")?.value,
            last_finalized_block_height: require(
                value.last_finalized_block_height,
                "last_finalized_block_height",
            )?
            .value,
        })
    }
}

/// Source of a deployed module
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VersionedModuleSource {
    /// Module version
    pub version: WasmVersion,
    /// Wasm bytes
    pub source: Bytes,
}

impl TryFrom<proto::VersionedModuleSource> for VersionedModuleSource {
    type Error = SdkError;

    fn try_from(value: proto::VersionedModuleSource) -> Result<Self, SdkError> {
        use proto::versioned_module_source::Module;
        Ok(match require(value.module, "module")? {
            Module::V0(source) => Self {
                version: WasmVersion::V0,
                source: source.value.into(),
            },
            Module::V1(source) => Self {
                version: WasmVersion::V1,
                source: source.value.into(),
            },
        })
    }
}

/// Smart contract instance
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InstanceInfo {
    /// Version of the instance's module
    pub version: WasmVersion,
    /// Account that created the instance
    pub owner: AccountAddress,
    /// Balance of the instance
    pub amount: Amount,
    /// Receive functions, as `contract.entrypoint`
    pub methods: Vec<String>,
    /// Init function name
    pub name: String,
    /// Module the instance was created from
    pub source_module: ModuleReference,
}

impl TryFrom<proto::InstanceInfo> for InstanceInfo {
    type Error = SdkError;

    fn try_from(value: proto::InstanceInfo) -> Result<Self, SdkError> {
        use proto::instance_info::Version;
        let (version, details) = match require(value.version, "version")? {
            Version::V0(details) => (WasmVersion::V0, details),
            Version::V1(details) => (WasmVersion::V1, details),
        };
        Ok(Self {
            version,
            owner: address_from(require(details.owner, "owner")?)?,
            amount: Amount::from_micro_ccd(require(details.amount, "amount")?.value),
            methods: details.methods.into_iter().map(|m| m.value).collect(),
            name: require(details.name, "name")?.value,
            source_module: hash_from(
                &require(details.source_module, "source_module")?.value,
                "source module",
            )?,
        })
    }
}

/// Who invokes a contract in a dry run
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Invoker {
    /// An account
    Account(AccountAddress),
    /// Another contract
    Contract(ContractAddress),
}

/// Contract invocation evaluated by the node without creating a transaction
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContractInvocation {
    /// Instance to invoke
    pub instance: ContractAddress,
    /// Amount sent along
    pub amount: Amount,
    /// Receive function, as `contract.entrypoint`
    pub entrypoint: String,
    /// Serialized parameter
    pub parameter: Bytes,
    /// Energy limit
    pub energy: Energy,
    /// Invoker; the node uses the zero account when absent
    pub invoker: Option<Invoker>,
}

impl ContractInvocation {
    pub(crate) fn into_proto(self, block: BlockHashInput) -> proto::InvokeInstanceRequest {
        let invoker = self.invoker.map(|invoker| proto::Address {
            r#type: Some(match invoker {
                Invoker::Account(address) => proto::address::Type::Account(address.into()),
                Invoker::Contract(address) => proto::address::Type::Contract(address.into()),
            }),
        });
        proto::InvokeInstanceRequest {
            block_hash: Some(block.into()),
            invoker,
            instance: Some(self.instance.into()),
            amount: Some(proto::Amount {
                value: self.amount.micro_ccd(),
            }),
            entrypoint: Some(proto::ReceiveName {
                value: self.entrypoint,
            }),
            parameter: Some(proto::Parameter {
                value: self.parameter.to_vec(),
            }),
            energy: Some(proto::Energy {
                value: self.energy.get(),
            }),
        }
    }
}

/// Outcome of a contract dry run
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InvokeInstanceResult {
    /// The invocation would succeed
    Success {
        /// Return value of a V1 contract
        return_value: Option<Bytes>,
        /// Energy used
        used_energy: Energy,
    },
    /// The invocation would be rejected
    Failure {
        /// Return value of a V1 contract
        return_value: Option<Bytes>,
        /// Energy used
        used_energy: Energy,
    },
}

impl InvokeInstanceResult {
    /// Energy used, whatever the outcome
    pub fn used_energy(&self) -> Energy {
        match self {
            InvokeInstanceResult::Success { used_energy, .. }
            | InvokeInstanceResult::Failure { used_energy, .. } => *used_energy,
        }
    }
}

impl TryFrom<proto::InvokeInstanceResponse> for InvokeInstanceResult {
    type Error = SdkError;

    fn try_from(value: proto::InvokeInstanceResponse) -> Result<Self, SdkError> {
        use proto::invoke_instance_response::Result as Outcome;
        Ok(match require(value.result, "result")? {
            Outcome::Success(outcome) => InvokeInstanceResult::Success {
                return_value: outcome.return_value.map(Bytes::from),
                used_energy: Energy::new(require(outcome.used_energy, "used_energy")?.value),
            },
            Outcome::Failure(outcome) => InvokeInstanceResult::Failure {
                return_value: outcome.return_value.map(Bytes::from),
                used_energy: Energy::new(require(outcome.used_energy, "used_energy")?.value),
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_hash_input_default_is_last_final() {
        assert_eq!(BlockHashInput::default(), BlockHashInput::LastFinal);
        let proto: proto::BlockHashInput = BlockHashInput::default().into();
        assert!(matches!(
            proto.block_hash_input,
            Some(proto::block_hash_input::BlockHashInput::LastFinal(_))
        ));
    }

    #[test]
    fn test_block_hash_input_given_validates_length() {
        assert!(BlockHashInput::given(&[1; 32]).is_ok());
        let err = BlockHashInput::given(&[1; 31]).unwrap_err();
        assert!(matches!(err, SdkError::InvalidInput(_)));
    }

    #[test]
    fn test_account_identifier_variants() {
        use proto::account_identifier_input::AccountIdentifierInput as Input;
        let cred = CredentialRegistrationId::from_bytes([3; 48]);
        let proto: proto::AccountIdentifierInput = AccountIdentifier::from(cred).into();
        assert_eq!(
            proto.account_identifier_input,
            Some(Input::CredId(proto::CredentialRegistrationId {
                value: vec![3; 48]
            }))
        );
        let proto: proto::AccountIdentifierInput = AccountIdentifier::from(AccountIndex(9)).into();
        assert_eq!(
            proto.account_identifier_input,
            Some(Input::AccountIndex(proto::AccountIndex { value: 9 }))
        );
    }

    #[test]
    fn test_account_info_missing_field() {
        let info = proto::AccountInfo {
            sequence_number: Some(proto::SequenceNumber { value: 1 }),
            ..Default::default()
        };
        let err = AccountInfo::try_from(info).unwrap_err();
        assert!(matches!(err, SdkError::Decode(_)));
    }

    #[test]
    fn test_block_item_status_committed() {
        use proto::block_item_status::{Committed, Status};
        let status = proto::BlockItemStatus {
            status: Some(Status::Committed(Committed {
                outcomes: vec![proto::BlockItemSummaryInBlock {
                    block_hash: Some(proto::BlockHash { value: vec![4; 32] }),
                }],
            })),
        };
        assert_eq!(
            BlockItemStatus::try_from(status).unwrap(),
            BlockItemStatus::Committed(vec![Hash256::from_bytes([4; 32])])
        );
    }

    #[test]
    fn test_invocation_to_proto() {
        let invocation = ContractInvocation {
            instance: ContractAddress::new(5, 0),
            amount: Amount::ZERO,
            entrypoint: "counter.view".to_string(),
            parameter: Bytes::new(),
            energy: Energy::new(30_000),
            invoker: None,
        };
        let request = invocation.into_proto(BlockHashInput::Best);
        assert_eq!(request.instance, Some(proto::ContractAddress { index: 5, subindex: 0 }));
        assert_eq!(request.energy, Some(proto::Energy { value: 30_000 }));
        assert!(request.invoker.is_none());
    }
}
