//! NodeClient - thin wrapper over the node's gRPC queries

use bytes::Bytes;
use ccd_primitives::{AccountAddress, ContractAddress, Hash256, ModuleReference, TransactionHash};
use ccd_types::{
    AccountTransactionHeader, AccountTransactionSignature, RawPayload, SignedAccountTransaction,
    SignedCredentialDeployment,
};
use prost::Message;
use tracing::{debug, info, warn};

use crate::proto::{self, methods};
use crate::transport::{GrpcTransport, MockTransport, Transport};
use crate::types::{
    hash_from, AccountIdentifier, AccountInfo, BlockHashInput, BlockItemStatus,
    ConsensusInfo, ContractInvocation, CryptographicParameters, InstanceInfo,
    InvokeInstanceResult, NextAccountSequenceNumber, VersionedModuleSource,
};
use crate::{ClientConfig, SdkError, TransactionBuilder};

/// Client for a CCD node
pub struct NodeClient {
    transport: Box<dyn Transport>,
    config: ClientConfig,
}

impl NodeClient {
    /// Connect to the node named in `config`
    pub async fn connect(config: ClientConfig) -> Result<Self, SdkError> {
        let transport = GrpcTransport::connect(&config).await?;
        Ok(Self {
            transport: Box::new(transport),
            config,
        })
    }

    /// Create a client that connects on first request
    pub fn connect_lazy(config: ClientConfig) -> Result<Self, SdkError> {
        let transport = GrpcTransport::connect_lazy(&config)?;
        Ok(Self {
            transport: Box::new(transport),
            config,
        })
    }

    /// Create a client with an empty mock transport (for testing)
    pub fn new_mock() -> Self {
        Self::with_transport(MockTransport::new())
    }

    /// Create a client with a custom transport and default config
    pub fn with_transport(transport: impl Transport + 'static) -> Self {
        Self {
            transport: Box::new(transport),
            config: ClientConfig::default(),
        }
    }

    /// Replace the config
    pub fn with_config(mut self, config: ClientConfig) -> Self {
        self.config = config;
        self
    }

    /// Client config
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Transaction builder using this client's default expiry
    pub fn transaction_builder(&self) -> TransactionBuilder {
        TransactionBuilder::new().default_expiry(self.config.default_expiry())
    }

    /// Encode, send and decode one unary call
    async fn request<Req, Resp>(&self, method: &'static str, request: Req) -> Result<Resp, SdkError>
    where
        Req: Message,
        Resp: Message + Default,
    {
        debug!(method, "node request");
        let response = self
            .transport
            .unary(method, Bytes::from(request.encode_to_vec()))
            .await?;
        Ok(Resp::decode(response)?)
    }

    // ==================== Account Queries ====================

    /// Next nonce of an account
    pub async fn get_next_account_sequence_number(
        &self,
        address: &AccountAddress,
    ) -> Result<NextAccountSequenceNumber, SdkError> {
        let response: proto::NextAccountSequenceNumber = self
            .request(
                methods::GET_NEXT_ACCOUNT_SEQUENCE_NUMBER,
                proto::AccountAddress::from(*address),
            )
            .await?;
        response.try_into()
    }

    /// Account state at a block
    pub async fn get_account_info(
        &self,
        account: impl Into<AccountIdentifier>,
        block: BlockHashInput,
    ) -> Result<AccountInfo, SdkError> {
        let request = proto::AccountInfoRequest {
            block_hash: Some(block.into()),
            account_identifier: Some(account.into().into()),
        };
        let response: proto::AccountInfo = self.request(methods::GET_ACCOUNT_INFO, request).await?;
        response.try_into()
    }

    // ==================== Chain Queries ====================

    /// Global cryptographic parameters at a block
    pub async fn get_cryptographic_parameters(
        &self,
        block: BlockHashInput,
    ) -> Result<CryptographicParameters, SdkError> {
        let response: proto::CryptographicParameters = self
            .request(
                methods::GET_CRYPTOGRAPHIC_PARAMETERS,
                proto::BlockHashInput::from(block),
            )
            .await?;
        Ok(response.into())
    }

    /// Consensus state summary
    pub async fn get_consensus_info(&self) -> Result<ConsensusInfo, SdkError> {
        let response: proto::ConsensusInfo = self
            .request(methods::GET_CONSENSUS_INFO, proto::Empty {})
            .await?;
        response.try_into()
    }

    /// Status of a submitted block item
    pub async fn get_block_item_status(
        &self,
        hash: &TransactionHash,
    ) -> Result<BlockItemStatus, SdkError> {
        let response: proto::BlockItemStatus = self
            .request(
                methods::GET_BLOCK_ITEM_STATUS,
                proto::TransactionHash {
                    value: hash.as_bytes().to_vec(),
                },
            )
            .await?;
        response.try_into()
    }

    // ==================== Smart Contracts ====================

    /// Source of a deployed module
    pub async fn get_module_source(
        &self,
        module_ref: &ModuleReference,
        block: BlockHashInput,
    ) -> Result<VersionedModuleSource, SdkError> {
        let request = proto::ModuleSourceRequest {
            block_hash: Some(block.into()),
            module_ref: Some(proto::ModuleRef {
                value: module_ref.as_bytes().to_vec(),
            }),
        };
        let response: proto::VersionedModuleSource =
            self.request(methods::GET_MODULE_SOURCE, request).await?;
        response.try_into()
    }

    /// Contract instance state
    pub async fn get_instance_info(
        &self,
        address: ContractAddress,
        block: BlockHashInput,
    ) -> Result<InstanceInfo, SdkError> {
        let request = proto::InstanceInfoRequest {
            block_hash: Some(block.into()),
            address: Some(address.into()),
        };
        let response: proto::InstanceInfo =
            self.request(methods::GET_INSTANCE_INFO, request).await?;
        response.try_into()
    }

    /// Dry-run a contract invocation
    pub async fn invoke_instance(
        &self,
        invocation: ContractInvocation,
        block: BlockHashInput,
    ) -> Result<InvokeInstanceResult, SdkError> {
        let response: proto::InvokeInstanceResponse = self
            .request(methods::INVOKE_INSTANCE, invocation.into_proto(block))
            .await?;
        response.try_into()
    }

    // ==================== Transactions ====================

    /// Signing digest computed by the node.
    ///
    /// Prefer [`PreparedAccountTransaction::digest`](ccd_types::PreparedAccountTransaction::digest);
    /// this exists to cross-check it.
    pub async fn get_account_transaction_sign_hash(
        &self,
        header: &AccountTransactionHeader,
        payload: &RawPayload,
    ) -> Result<Hash256, SdkError> {
        let request = proto::PreAccountTransaction {
            header: Some(header_to_proto(header)),
            payload: Some(payload_to_proto(payload)),
        };
        let response: proto::AccountTransactionSignHash = self
            .request(methods::GET_ACCOUNT_TRANSACTION_SIGN_HASH, request)
            .await?;
        hash_from(&response.value, "sign hash")
    }

    /// Submit a signed account transaction.
    ///
    /// Acceptance only means the node will try to put the transaction in a
    /// block; track it with [`get_block_item_status`](Self::get_block_item_status).
    pub async fn send_account_transaction(
        &self,
        transaction: &SignedAccountTransaction,
    ) -> Result<TransactionHash, SdkError> {
        let header = transaction.header();
        let request = proto::SendBlockItemRequest {
            block_item: Some(proto::send_block_item_request::BlockItem::AccountTransaction(
                proto::AccountTransaction {
                    signature: Some(signature_to_proto(transaction.signature())),
                    header: Some(header_to_proto(header)),
                    payload: Some(payload_to_proto(transaction.raw_payload())),
                },
            )),
        };
        let hash = self.send_block_item(request, transaction.hash()).await?;
        info!(
            hash = %hash,
            sender = %header.sender,
            nonce = header.nonce.get(),
            energy = header.energy_amount.get(),
            "account transaction submitted"
        );
        Ok(hash)
    }

    /// Submit a signed credential deployment
    pub async fn send_credential_deployment(
        &self,
        deployment: &SignedCredentialDeployment,
    ) -> Result<TransactionHash, SdkError> {
        let request = proto::SendBlockItemRequest {
            block_item: Some(
                proto::send_block_item_request::BlockItem::CredentialDeployment(
                    proto::CredentialDeployment {
                        message_expiry: Some(proto::TransactionTime {
                            value: deployment.expiry().seconds(),
                        }),
                        payload: Some(proto::credential_deployment::Payload::RawPayload(
                            deployment.payload().to_vec(),
                        )),
                    },
                ),
            ),
        };
        let hash = self.send_block_item(request, deployment.hash()).await?;
        info!(hash = %hash, "credential deployment submitted");
        Ok(hash)
    }

    async fn send_block_item(
        &self,
        request: proto::SendBlockItemRequest,
        expected: TransactionHash,
    ) -> Result<TransactionHash, SdkError> {
        let response: proto::TransactionHash =
            self.request(methods::SEND_BLOCK_ITEM, request).await?;
        let hash = hash_from(&response.value, "transaction hash")?;
        if hash != expected {
            warn!(node = %hash, local = %expected, "node reported a different transaction hash");
        }
        Ok(hash)
    }
}

impl std::fmt::Debug for NodeClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NodeClient")
            .field("endpoint", &self.config.endpoint)
            .finish_non_exhaustive()
    }
}

/// Signature map in the node's protobuf shape
pub fn signature_to_proto(signature: &AccountTransactionSignature) -> proto::AccountTransactionSignature {
    proto::AccountTransactionSignature {
        signatures: signature
            .credentials()
            .map(|(credential, keys)| {
                let keys = keys
                    .iter()
                    .map(|(key, sig)| {
                        (
                            u32::from(*key),
                            proto::Signature {
                                value: sig.as_bytes().to_vec(),
                            },
                        )
                    })
                    .collect();
                (u32::from(*credential), proto::AccountSignatureMap { signatures: keys })
            })
            .collect(),
    }
}

fn header_to_proto(header: &AccountTransactionHeader) -> proto::AccountTransactionHeader {
    proto::AccountTransactionHeader {
        sender: Some(header.sender.into()),
        sequence_number: Some(proto::SequenceNumber {
            value: header.nonce.get(),
        }),
        energy_amount: Some(proto::Energy {
            value: header.energy_amount.get(),
        }),
        expiry: Some(proto::TransactionTime {
            value: header.expiry.seconds(),
        }),
    }
}

fn payload_to_proto(payload: &RawPayload) -> proto::AccountTransactionPayload {
    proto::AccountTransactionPayload {
        payload: Some(proto::account_transaction_payload::Payload::RawPayload(
            payload.as_bytes().to_vec(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ccd_crypto::Signature;

    #[test]
    fn test_signature_to_proto_keys_by_key_index() {
        let signature: AccountTransactionSignature = vec![
            (0, 0, Signature::from_bytes([1; 64])),
            (0, 3, Signature::from_bytes([2; 64])),
            (2, 1, Signature::from_bytes([3; 64])),
        ]
        .into_iter()
        .collect();
        let proto = signature_to_proto(&signature);
        assert_eq!(proto.signatures.len(), 2);
        let first = &proto.signatures[&0].signatures;
        assert_eq!(first.len(), 2);
        assert_eq!(first[&3].value, vec![2; 64]);
        assert_eq!(proto.signatures[&2].signatures[&1].value, vec![3; 64]);
    }

    #[test]
    fn test_require_reports_field() {
        let err = crate::types::require::<u8>(None, "sequence_number").unwrap_err();
        assert!(err.to_string().contains("sequence_number"));
    }
}
