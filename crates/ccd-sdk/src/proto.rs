//! Protobuf messages of the node's `concordium.v2.Queries` service.
//!
//! Only the messages and fields this client reads or writes are declared.
//! Unknown fields in responses are skipped by the decoder, so partial
//! declarations decode full node responses.

use std::collections::BTreeMap;

/// Fully qualified RPC paths
pub mod methods {
    /// `GetNextAccountSequenceNumber`
    pub const GET_NEXT_ACCOUNT_SEQUENCE_NUMBER: &str =
        "/concordium.v2.Queries/GetNextAccountSequenceNumber";
    /// `GetCryptographicParameters`
    pub const GET_CRYPTOGRAPHIC_PARAMETERS: &str =
        "/concordium.v2.Queries/GetCryptographicParameters";
    /// `GetAccountInfo`
    pub const GET_ACCOUNT_INFO: &str = "/concordium.v2.Queries/GetAccountInfo";
    /// `GetBlockItemStatus`
    pub const GET_BLOCK_ITEM_STATUS: &str = "/concordium.v2.Queries/GetBlockItemStatus";
    /// `GetConsensusInfo`
    pub const GET_CONSENSUS_INFO: &str = "/concordium.v2.Queries/GetConsensusInfo";
    /// `GetModuleSource`
    pub const GET_MODULE_SOURCE: &str = "/concordium.v2.Queries/GetModuleSource";
    /// `GetInstanceInfo`
    pub const GET_INSTANCE_INFO: &str = "/concordium.v2.Queries/GetInstanceInfo";
    /// `InvokeInstance`
    pub const INVOKE_INSTANCE: &str = "/concordium.v2.Queries/InvokeInstance";
    /// `GetAccountTransactionSignHash`
    pub const GET_ACCOUNT_TRANSACTION_SIGN_HASH: &str =
        "/concordium.v2.Queries/GetAccountTransactionSignHash";
    /// `SendBlockItem`
    pub const SEND_BLOCK_ITEM: &str = "/concordium.v2.Queries/SendBlockItem";
}

#[derive(Clone, Copy, PartialEq, ::prost::Message)]
pub struct Empty {}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct BlockHash {
    #[prost(bytes = "vec", tag = "1")]
    pub value: Vec<u8>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct TransactionHash {
    #[prost(bytes = "vec", tag = "1")]
    pub value: Vec<u8>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ModuleRef {
    #[prost(bytes = "vec", tag = "1")]
    pub value: Vec<u8>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct AccountAddress {
    #[prost(bytes = "vec", tag = "1")]
    pub value: Vec<u8>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct CredentialRegistrationId {
    #[prost(bytes = "vec", tag = "1")]
    pub value: Vec<u8>,
}

#[derive(Clone, Copy, PartialEq, ::prost::Message)]
pub struct AccountIndex {
    #[prost(uint64, tag = "1")]
    pub value: u64,
}

#[derive(Clone, Copy, PartialEq, ::prost::Message)]
pub struct SequenceNumber {
    #[prost(uint64, tag = "1")]
    pub value: u64,
}

#[derive(Clone, Copy, PartialEq, ::prost::Message)]
pub struct Amount {
    #[prost(uint64, tag = "1")]
    pub value: u64,
}

#[derive(Clone, Copy, PartialEq, ::prost::Message)]
pub struct Energy {
    #[prost(uint64, tag = "1")]
    pub value: u64,
}

#[derive(Clone, Copy, PartialEq, ::prost::Message)]
pub struct TransactionTime {
    #[prost(uint64, tag = "1")]
    pub value: u64,
}

#[derive(Clone, Copy, PartialEq, ::prost::Message)]
pub struct AccountThreshold {
    #[prost(uint32, tag = "1")]
    pub value: u32,
}

#[derive(Clone, Copy, PartialEq, ::prost::Message)]
pub struct AbsoluteBlockHeight {
    #[prost(uint64, tag = "1")]
    pub value: u64,
}

#[derive(Clone, Copy, PartialEq, ::prost::Message)]
pub struct ContractAddress {
    #[prost(uint64, tag = "1")]
    pub index: u64,
    #[prost(uint64, tag = "2")]
    pub subindex: u64,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ReceiveName {
    #[prost(string, tag = "1")]
    pub value: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct InitName {
    #[prost(string, tag = "1")]
    pub value: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Parameter {
    #[prost(bytes = "vec", tag = "1")]
    pub value: Vec<u8>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct BlockHashInput {
    #[prost(oneof = "block_hash_input::BlockHashInput", tags = "1, 2, 3")]
    pub block_hash_input: Option<block_hash_input::BlockHashInput>,
}

pub mod block_hash_input {
    #[derive(Clone, PartialEq, ::prost::Oneof)]
    pub enum BlockHashInput {
        #[prost(message, tag = "1")]
        Best(super::Empty),
        #[prost(message, tag = "2")]
        LastFinal(super::Empty),
        #[prost(message, tag = "3")]
        Given(super::BlockHash),
    }
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct AccountIdentifierInput {
    #[prost(oneof = "account_identifier_input::AccountIdentifierInput", tags = "1, 2, 3")]
    pub account_identifier_input: Option<account_identifier_input::AccountIdentifierInput>,
}

pub mod account_identifier_input {
    #[derive(Clone, PartialEq, ::prost::Oneof)]
    pub enum AccountIdentifierInput {
        #[prost(message, tag = "1")]
        Address(super::AccountAddress),
        #[prost(message, tag = "2")]
        CredId(super::CredentialRegistrationId),
        #[prost(message, tag = "3")]
        AccountIndex(super::AccountIndex),
    }
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct NextAccountSequenceNumber {
    #[prost(message, optional, tag = "1")]
    pub sequence_number: Option<SequenceNumber>,
    #[prost(bool, tag = "2")]
    pub all_final: bool,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct CryptographicParameters {
    #[prost(string, tag = "1")]
    pub genesis_string: String,
    #[prost(bytes = "vec", tag = "2")]
    pub bulletproof_generators: Vec<u8>,
    #[prost(bytes = "vec", tag = "3")]
    pub on_chain_commitment_key: Vec<u8>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct AccountInfoRequest {
    #[prost(message, optional, tag = "1")]
    pub block_hash: Option<BlockHashInput>,
    #[prost(message, optional, tag = "2")]
    pub account_identifier: Option<AccountIdentifierInput>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct AccountInfo {
    #[prost(message, optional, tag = "1")]
    pub sequence_number: Option<SequenceNumber>,
    #[prost(message, optional, tag = "2")]
    pub amount: Option<Amount>,
    #[prost(message, optional, tag = "5")]
    pub threshold: Option<AccountThreshold>,
    #[prost(message, optional, tag = "8")]
    pub index: Option<AccountIndex>,
    #[prost(message, optional, tag = "10")]
    pub address: Option<AccountAddress>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct BlockItemSummaryInBlock {
    #[prost(message, optional, tag = "1")]
    pub block_hash: Option<BlockHash>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct BlockItemStatus {
    #[prost(oneof = "block_item_status::Status", tags = "1, 2, 3")]
    pub status: Option<block_item_status::Status>,
}

pub mod block_item_status {
    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct Committed {
        #[prost(message, repeated, tag = "1")]
        pub outcomes: Vec<super::BlockItemSummaryInBlock>,
    }

    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct Finalized {
        #[prost(message, optional, tag = "1")]
        pub outcome: Option<super::BlockItemSummaryInBlock>,
    }

    #[derive(Clone, PartialEq, ::prost::Oneof)]
    pub enum Status {
        #[prost(message, tag = "1")]
        Received(super::Empty),
        #[prost(message, tag = "2")]
        Committed(Committed),
        #[prost(message, tag = "3")]
        Finalized(Finalized),
    }
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ConsensusInfo {
    #[prost(message, optional, tag = "1")]
    pub best_block: Option<BlockHash>,
    #[prost(message, optional, tag = "2")]
    pub genesis_block: Option<BlockHash>,
    #[prost(message, optional, tag = "6")]
    pub last_finalized_block: Option<BlockHash>,
    #[prost(message, optional, tag = "7")]
    pub best_block_height: Option<AbsoluteBlockHeight>,
    #[prost(message, optional, tag = "8")]
    pub last_finalized_block_height: Option<AbsoluteBlockHeight>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ModuleSourceRequest {
    #[prost(message, optional, tag = "1")]
    pub block_hash: Option<BlockHashInput>,
    #[prost(message, optional, tag = "2")]
    pub module_ref: Option<ModuleRef>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ModuleSource {
    #[prost(bytes = "vec", tag = "1")]
    pub value: Vec<u8>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct VersionedModuleSource {
    #[prost(oneof = "versioned_module_source::Module", tags = "1, 2")]
    pub module: Option<versioned_module_source::Module>,
}

pub mod versioned_module_source {
    #[derive(Clone, PartialEq, ::prost::Oneof)]
    pub enum Module {
        #[prost(message, tag = "1")]
        V0(super::ModuleSource),
        #[prost(message, tag = "2")]
        V1(super::ModuleSource),
    }
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct InstanceInfoRequest {
    #[prost(message, optional, tag = "1")]
    pub block_hash: Option<BlockHashInput>,
    #[prost(message, optional, tag = "2")]
    pub address: Option<ContractAddress>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct InstanceInfo {
    #[prost(oneof = "instance_info::Version", tags = "1, 2")]
    pub version: Option<instance_info::Version>,
}

pub mod instance_info {
    /// Fields shared by both instance versions
    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct Details {
        #[prost(message, optional, tag = "2")]
        pub owner: Option<super::AccountAddress>,
        #[prost(message, optional, tag = "3")]
        pub amount: Option<super::Amount>,
        #[prost(message, repeated, tag = "4")]
        pub methods: Vec<super::ReceiveName>,
        #[prost(message, optional, tag = "5")]
        pub name: Option<super::InitName>,
        #[prost(message, optional, tag = "6")]
        pub source_module: Option<super::ModuleRef>,
    }

    #[derive(Clone, PartialEq, ::prost::Oneof)]
    pub enum Version {
        #[prost(message, tag = "1")]
        V0(Details),
        #[prost(message, tag = "2")]
        V1(Details),
    }
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Address {
    #[prost(oneof = "address::Type", tags = "1, 2")]
    pub r#type: Option<address::Type>,
}

pub mod address {
    #[derive(Clone, PartialEq, ::prost::Oneof)]
    pub enum Type {
        #[prost(message, tag = "1")]
        Account(super::AccountAddress),
        #[prost(message, tag = "2")]
        Contract(super::ContractAddress),
    }
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct InvokeInstanceRequest {
    #[prost(message, optional, tag = "1")]
    pub block_hash: Option<BlockHashInput>,
    #[prost(message, optional, tag = "2")]
    pub invoker: Option<Address>,
    #[prost(message, optional, tag = "3")]
    pub instance: Option<ContractAddress>,
    #[prost(message, optional, tag = "4")]
    pub amount: Option<Amount>,
    #[prost(message, optional, tag = "5")]
    pub entrypoint: Option<ReceiveName>,
    #[prost(message, optional, tag = "6")]
    pub parameter: Option<Parameter>,
    #[prost(message, optional, tag = "7")]
    pub energy: Option<Energy>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct InvokeInstanceResponse {
    #[prost(oneof = "invoke_instance_response::Result", tags = "1, 2")]
    pub result: Option<invoke_instance_response::Result>,
}

pub mod invoke_instance_response {
    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct Outcome {
        #[prost(bytes = "vec", optional, tag = "1")]
        pub return_value: Option<Vec<u8>>,
        #[prost(message, optional, tag = "2")]
        pub used_energy: Option<super::Energy>,
    }

    #[derive(Clone, PartialEq, ::prost::Oneof)]
    pub enum Result {
        #[prost(message, tag = "1")]
        Failure(Outcome),
        #[prost(message, tag = "2")]
        Success(Outcome),
    }
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Signature {
    #[prost(bytes = "vec", tag = "1")]
    pub value: Vec<u8>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct AccountSignatureMap {
    #[prost(btree_map = "uint32, message", tag = "1")]
    pub signatures: BTreeMap<u32, Signature>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct AccountTransactionSignature {
    #[prost(btree_map = "uint32, message", tag = "1")]
    pub signatures: BTreeMap<u32, AccountSignatureMap>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct AccountTransactionHeader {
    #[prost(message, optional, tag = "1")]
    pub sender: Option<AccountAddress>,
    #[prost(message, optional, tag = "2")]
    pub sequence_number: Option<SequenceNumber>,
    #[prost(message, optional, tag = "3")]
    pub energy_amount: Option<Energy>,
    #[prost(message, optional, tag = "5")]
    pub expiry: Option<TransactionTime>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct AccountTransactionPayload {
    #[prost(oneof = "account_transaction_payload::Payload", tags = "1")]
    pub payload: Option<account_transaction_payload::Payload>,
}

pub mod account_transaction_payload {
    #[derive(Clone, PartialEq, ::prost::Oneof)]
    pub enum Payload {
        #[prost(bytes, tag = "1")]
        RawPayload(Vec<u8>),
    }
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct PreAccountTransaction {
    #[prost(message, optional, tag = "1")]
    pub header: Option<AccountTransactionHeader>,
    #[prost(message, optional, tag = "2")]
    pub payload: Option<AccountTransactionPayload>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct AccountTransactionSignHash {
    #[prost(bytes = "vec", tag = "1")]
    pub value: Vec<u8>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct AccountTransaction {
    #[prost(message, optional, tag = "1")]
    pub signature: Option<AccountTransactionSignature>,
    #[prost(message, optional, tag = "2")]
    pub header: Option<AccountTransactionHeader>,
    #[prost(message, optional, tag = "3")]
    pub payload: Option<AccountTransactionPayload>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct CredentialDeployment {
    #[prost(message, optional, tag = "1")]
    pub message_expiry: Option<TransactionTime>,
    #[prost(oneof = "credential_deployment::Payload", tags = "2")]
    pub payload: Option<credential_deployment::Payload>,
}

pub mod credential_deployment {
    #[derive(Clone, PartialEq, ::prost::Oneof)]
    pub enum Payload {
        #[prost(bytes, tag = "2")]
        RawPayload(Vec<u8>),
    }
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct SendBlockItemRequest {
    #[prost(oneof = "send_block_item_request::BlockItem", tags = "1, 2")]
    pub block_item: Option<send_block_item_request::BlockItem>,
}

pub mod send_block_item_request {
    #[derive(Clone, PartialEq, ::prost::Oneof)]
    pub enum BlockItem {
        #[prost(message, tag = "1")]
        AccountTransaction(super::AccountTransaction),
        #[prost(message, tag = "2")]
        CredentialDeployment(super::CredentialDeployment),
    }
}
