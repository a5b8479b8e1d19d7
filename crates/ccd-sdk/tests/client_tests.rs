//! Client integration tests for ccd-sdk
//!
//! Every RPC wrapper runs against a MockTransport: requests are decoded back
//! from the captured bytes and responses are canned protobuf messages.

use ccd_sdk::proto::{self, methods};
use ccd_sdk::types::{
    AccountIdentifier, BlockHashInput, BlockItemStatus, ContractInvocation, InvokeInstanceResult,
    Invoker,
};
use ccd_sdk::{
    AccountAddress, Amount, ClientConfig, ContractAddress, Energy, MockTransport, NodeClient,
    Nonce, SdkError,
};
use ccd_types::payload::WasmVersion;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn account(byte: u8) -> AccountAddress {
    AccountAddress::from([byte; 32])
}

fn mock_client() -> (NodeClient, MockTransport) {
    init_tracing();
    let transport = MockTransport::new();
    (NodeClient::with_transport(transport.clone()), transport)
}

// ==================== Client Creation Tests ====================

#[tokio::test]
async fn test_new_mock_answers_unimplemented() {
    let client = NodeClient::new_mock();
    let err = client.get_consensus_info().await.unwrap_err();
    assert_eq!(err.status_code(), Some(tonic::Code::Unimplemented));
}

#[test]
fn test_with_config() {
    let client = NodeClient::new_mock().with_config(ClientConfig::new("https://node:20000"));
    assert_eq!(client.config().endpoint, "https://node:20000");
    assert!(format!("{:?}", client).contains("https://node:20000"));
}

#[tokio::test]
async fn test_connect_lazy_rejects_bad_endpoint() {
    let err = NodeClient::connect_lazy(ClientConfig::new("ftp://node")).unwrap_err();
    assert!(matches!(err, SdkError::Config(_)));
}

// ==================== Account Query Tests ====================

#[tokio::test]
async fn test_get_next_account_sequence_number() {
    let (client, transport) = mock_client();
    transport.set_response(
        methods::GET_NEXT_ACCOUNT_SEQUENCE_NUMBER,
        &proto::NextAccountSequenceNumber {
            sequence_number: Some(proto::SequenceNumber { value: 42 }),
            all_final: true,
        },
    );

    let next = client
        .get_next_account_sequence_number(&account(1))
        .await
        .unwrap();
    assert_eq!(next.nonce, Nonce::new(42));
    assert!(next.all_final);

    let request: proto::AccountAddress = transport
        .last_request(methods::GET_NEXT_ACCOUNT_SEQUENCE_NUMBER)
        .unwrap();
    assert_eq!(request.value, vec![1; 32]);
}

#[tokio::test]
async fn test_get_next_account_sequence_number_missing_field() {
    let (client, transport) = mock_client();
    transport.set_response(
        methods::GET_NEXT_ACCOUNT_SEQUENCE_NUMBER,
        &proto::NextAccountSequenceNumber {
            sequence_number: None,
            all_final: false,
        },
    );
    let err = client
        .get_next_account_sequence_number(&account(1))
        .await
        .unwrap_err();
    assert!(matches!(err, SdkError::Decode(_)));
}

#[tokio::test]
async fn test_get_account_info_by_index() {
    let (client, transport) = mock_client();
    transport.set_response(
        methods::GET_ACCOUNT_INFO,
        &proto::AccountInfo {
            sequence_number: Some(proto::SequenceNumber { value: 7 }),
            amount: Some(proto::Amount { value: 1_000_000 }),
            threshold: Some(proto::AccountThreshold { value: 1 }),
            index: Some(proto::AccountIndex { value: 5 }),
            address: Some(proto::AccountAddress { value: vec![3; 32] }),
        },
    );

    let info = client
        .get_account_info(
            AccountIdentifier::Index(ccd_primitives::AccountIndex(5)),
            BlockHashInput::Best,
        )
        .await
        .unwrap();
    assert_eq!(info.address, account(3));
    assert_eq!(info.nonce, Nonce::new(7));
    assert_eq!(info.amount, Amount::from_micro_ccd(1_000_000));

    let request: proto::AccountInfoRequest =
        transport.last_request(methods::GET_ACCOUNT_INFO).unwrap();
    assert_eq!(
        request.block_hash,
        Some(proto::BlockHashInput {
            block_hash_input: Some(proto::block_hash_input::BlockHashInput::Best(
                proto::Empty {}
            )),
        })
    );
    assert_eq!(
        request.account_identifier,
        Some(proto::AccountIdentifierInput {
            account_identifier_input: Some(
                proto::account_identifier_input::AccountIdentifierInput::AccountIndex(
                    proto::AccountIndex { value: 5 }
                )
            ),
        })
    );
}

#[tokio::test]
async fn test_get_account_info_bad_address_length() {
    let (client, transport) = mock_client();
    transport.set_response(
        methods::GET_ACCOUNT_INFO,
        &proto::AccountInfo {
            sequence_number: Some(proto::SequenceNumber { value: 7 }),
            amount: Some(proto::Amount { value: 0 }),
            threshold: Some(proto::AccountThreshold { value: 1 }),
            index: Some(proto::AccountIndex { value: 5 }),
            address: Some(proto::AccountAddress { value: vec![3; 31] }),
        },
    );
    let err = client
        .get_account_info(account(3), BlockHashInput::LastFinal)
        .await
        .unwrap_err();
    assert!(matches!(err, SdkError::Decode(_)));
}

// ==================== Chain Query Tests ====================

#[tokio::test]
async fn test_get_cryptographic_parameters() {
    let (client, transport) = mock_client();
    transport.set_response(
        methods::GET_CRYPTOGRAPHIC_PARAMETERS,
        &proto::CryptographicParameters {
            genesis_string: "Concordium Testnet Version 5".to_string(),
            bulletproof_generators: vec![1, 2, 3],
            on_chain_commitment_key: vec![4, 5],
        },
    );
    let block = BlockHashInput::given(&[9; 32]).unwrap();
    let params = client.get_cryptographic_parameters(block).await.unwrap();
    assert_eq!(params.genesis_string, "Concordium Testnet Version 5");
    assert_eq!(&params.on_chain_commitment_key[..], &[4, 5]);

    let request: proto::BlockHashInput = transport
        .last_request(methods::GET_CRYPTOGRAPHIC_PARAMETERS)
        .unwrap();
    assert_eq!(
        request.block_hash_input,
        Some(proto::block_hash_input::BlockHashInput::Given(
            proto::BlockHash { value: vec![9; 32] }
        ))
    );
}

#[test]
fn test_block_hash_input_rejects_short_hash() {
    let err = BlockHashInput::given(&[9; 31]).unwrap_err();
    assert!(err.to_string().contains("32 bytes"));
}

#[tokio::test]
async fn test_get_consensus_info() {
    let (client, transport) = mock_client();
    transport.set_response(
        methods::GET_CONSENSUS_INFO,
        &proto::ConsensusInfo {
            best_block: Some(proto::BlockHash { value: vec![1; 32] }),
            genesis_block: Some(proto::BlockHash { value: vec![2; 32] }),
            last_finalized_block: Some(proto::BlockHash { value: vec![3; 32] }),
            best_block_height: Some(proto::AbsoluteBlockHeight { value: 100 }),
            last_finalized_block_height: Some(proto::AbsoluteBlockHeight { value: 98 }),
        },
    );
    let info = client.get_consensus_info().await.unwrap();
    assert_eq!(info.best_block_height, 100);
    assert_eq!(info.last_finalized_block.as_bytes(), &[3; 32]);
}

#[tokio::test]
async fn test_get_block_item_status() {
    let (client, transport) = mock_client();
    transport.set_response(
        methods::GET_BLOCK_ITEM_STATUS,
        &proto::BlockItemStatus {
            status: Some(proto::block_item_status::Status::Finalized(
                proto::block_item_status::Finalized {
                    outcome: Some(proto::BlockItemSummaryInBlock {
                        block_hash: Some(proto::BlockHash { value: vec![4; 32] }),
                    }),
                },
            )),
        },
    );
    let hash = ccd_sdk::TransactionHash::from_bytes([8; 32]);
    let status = client.get_block_item_status(&hash).await.unwrap();
    assert!(status.is_finalized());
    assert_eq!(
        status,
        BlockItemStatus::Finalized(ccd_sdk::BlockHash::from_bytes([4; 32]))
    );

    let request: proto::TransactionHash = transport
        .last_request(methods::GET_BLOCK_ITEM_STATUS)
        .unwrap();
    assert_eq!(request.value, vec![8; 32]);
}

// ==================== Smart Contract Tests ====================

#[tokio::test]
async fn test_get_module_source() {
    let (client, transport) = mock_client();
    transport.set_response(
        methods::GET_MODULE_SOURCE,
        &proto::VersionedModuleSource {
            module: Some(proto::versioned_module_source::Module::V1(
                proto::ModuleSource {
                    value: b"\0asm".to_vec(),
                },
            )),
        },
    );
    let module_ref = ccd_primitives::ModuleReference::from_bytes([5; 32]);
    let source = client
        .get_module_source(&module_ref, BlockHashInput::LastFinal)
        .await
        .unwrap();
    assert_eq!(source.version, WasmVersion::V1);
    assert_eq!(&source.source[..], b"\0asm");
}

#[tokio::test]
async fn test_get_instance_info() {
    let (client, transport) = mock_client();
    transport.set_response(
        methods::GET_INSTANCE_INFO,
        &proto::InstanceInfo {
            version: Some(proto::instance_info::Version::V0(
                proto::instance_info::Details {
                    owner: Some(proto::AccountAddress { value: vec![6; 32] }),
                    amount: Some(proto::Amount { value: 10 }),
                    methods: vec![proto::ReceiveName {
                        value: "piggy.insert".to_string(),
                    }],
                    name: Some(proto::InitName {
                        value: "init_piggy".to_string(),
                    }),
                    source_module: Some(proto::ModuleRef { value: vec![5; 32] }),
                },
            )),
        },
    );
    let info = client
        .get_instance_info(ContractAddress::new(12, 0), BlockHashInput::LastFinal)
        .await
        .unwrap();
    assert_eq!(info.version, WasmVersion::V0);
    assert_eq!(info.owner, account(6));
    assert_eq!(info.methods, vec!["piggy.insert".to_string()]);

    let request: proto::InstanceInfoRequest =
        transport.last_request(methods::GET_INSTANCE_INFO).unwrap();
    assert_eq!(
        request.address,
        Some(proto::ContractAddress {
            index: 12,
            subindex: 0
        })
    );
}

#[tokio::test]
async fn test_invoke_instance() {
    let (client, transport) = mock_client();
    transport.set_response(
        methods::INVOKE_INSTANCE,
        &proto::InvokeInstanceResponse {
            result: Some(proto::invoke_instance_response::Result::Success(
                proto::invoke_instance_response::Outcome {
                    return_value: Some(vec![1, 0]),
                    used_energy: Some(proto::Energy { value: 812 }),
                },
            )),
        },
    );
    let invocation = ContractInvocation {
        instance: ContractAddress::new(12, 0),
        amount: Amount::from_micro_ccd(0),
        entrypoint: "piggy.view".to_string(),
        parameter: bytes::Bytes::new(),
        energy: Energy::new(30_000),
        invoker: Some(Invoker::Account(account(2))),
    };
    let result = client
        .invoke_instance(invocation, BlockHashInput::LastFinal)
        .await
        .unwrap();
    assert_eq!(result.used_energy(), Energy::new(812));
    assert!(matches!(result, InvokeInstanceResult::Success { .. }));

    let request: proto::InvokeInstanceRequest =
        transport.last_request(methods::INVOKE_INSTANCE).unwrap();
    assert_eq!(request.entrypoint.unwrap().value, "piggy.view");
    assert_eq!(request.energy.unwrap().value, 30_000);
    assert_eq!(
        request.invoker,
        Some(proto::Address {
            r#type: Some(proto::address::Type::Account(proto::AccountAddress {
                value: vec![2; 32]
            })),
        })
    );
}

// ==================== Error Tests ====================

#[tokio::test]
async fn test_status_passes_through() {
    let (client, transport) = mock_client();
    transport.set_error(
        methods::GET_ACCOUNT_INFO,
        tonic::Code::NotFound,
        "account or block not found.",
    );
    let err = client
        .get_account_info(account(1), BlockHashInput::LastFinal)
        .await
        .unwrap_err();
    assert_eq!(err.status_code(), Some(tonic::Code::NotFound));
    assert!(err.to_string().contains("account or block not found."));
}

#[tokio::test]
async fn test_undecodable_response() {
    let (client, transport) = mock_client();
    transport.set_raw_response(methods::GET_CONSENSUS_INFO, vec![0xff, 0xff, 0xff]);
    let err = client.get_consensus_info().await.unwrap_err();
    assert!(matches!(err, SdkError::Decode(_)));
}
