//! Transport layer for node RPCs
//!
//! A transport carries one encoded protobuf request to a fully qualified
//! method path and returns the encoded response. Message types stay in the
//! client; transports only move bytes.

use async_trait::async_trait;
use bytes::{Buf, BufMut, Bytes};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tonic::codec::{Codec, DecodeBuf, Decoder, EncodeBuf, Encoder};
use tonic::codegen::http::uri::PathAndQuery;
use tonic::metadata::{AsciiMetadataKey, AsciiMetadataValue};
use tonic::transport::{Channel, ClientTlsConfig, Endpoint};
use tracing::debug;

use crate::{ClientConfig, SdkError};

/// Transport trait for unary RPCs (object-safe)
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send an encoded request to `method` and return the encoded response
    async fn unary(&self, method: &'static str, request: Bytes) -> Result<Bytes, SdkError>;
}

/// Codec that passes already-encoded protobuf bytes through
#[derive(Debug, Clone, Copy, Default)]
struct RawCodec;

#[derive(Debug, Clone, Copy, Default)]
struct RawEncoder;

#[derive(Debug, Clone, Copy, Default)]
struct RawDecoder;

impl Codec for RawCodec {
    type Encode = Bytes;
    type Decode = Bytes;
    type Encoder = RawEncoder;
    type Decoder = RawDecoder;

    fn encoder(&mut self) -> Self::Encoder {
        RawEncoder
    }

    fn decoder(&mut self) -> Self::Decoder {
        RawDecoder
    }
}

impl Encoder for RawEncoder {
    type Item = Bytes;
    type Error = tonic::Status;

    fn encode(&mut self, item: Bytes, dst: &mut EncodeBuf<'_>) -> Result<(), Self::Error> {
        dst.put(item);
        Ok(())
    }
}

impl Decoder for RawDecoder {
    type Item = Bytes;
    type Error = tonic::Status;

    fn decode(&mut self, src: &mut DecodeBuf<'_>) -> Result<Option<Bytes>, Self::Error> {
        Ok(Some(src.copy_to_bytes(src.remaining())))
    }
}

/// gRPC transport over a tonic channel
#[derive(Debug, Clone)]
pub struct GrpcTransport {
    channel: Channel,
    metadata: Vec<(AsciiMetadataKey, AsciiMetadataValue)>,
}

impl GrpcTransport {
    /// Connect to the node named in `config`
    pub async fn connect(config: &ClientConfig) -> Result<Self, SdkError> {
        let endpoint = Self::endpoint(config)?;
        let metadata = Self::metadata(config)?;
        debug!(endpoint = %config.endpoint, "connecting to node");
        let channel = endpoint.connect().await?;
        Ok(Self { channel, metadata })
    }

    /// Create a transport that connects on first use
    pub fn connect_lazy(config: &ClientConfig) -> Result<Self, SdkError> {
        let endpoint = Self::endpoint(config)?;
        let metadata = Self::metadata(config)?;
        Ok(Self {
            channel: endpoint.connect_lazy(),
            metadata,
        })
    }

    fn endpoint(config: &ClientConfig) -> Result<Endpoint, SdkError> {
        config.validate()?;
        let mut endpoint = Endpoint::from_shared(config.endpoint.clone())
            .map_err(|e| SdkError::Config(format!("invalid endpoint: {}", e)))?
            .timeout(config.timeout());
        if let Some(timeout) = config.connect_timeout() {
            endpoint = endpoint.connect_timeout(timeout);
        }
        if config.use_tls() {
            endpoint = endpoint.tls_config(ClientTlsConfig::new())?;
        }
        Ok(endpoint)
    }

    fn metadata(
        config: &ClientConfig,
    ) -> Result<Vec<(AsciiMetadataKey, AsciiMetadataValue)>, SdkError> {
        config
            .headers
            .iter()
            .map(|(key, value)| {
                let key = AsciiMetadataKey::from_bytes(key.as_bytes())
                    .map_err(|e| SdkError::Config(format!("invalid header {:?}: {}", key, e)))?;
                let value = value
                    .parse::<AsciiMetadataValue>()
                    .map_err(|e| SdkError::Config(format!("invalid header value: {}", e)))?;
                Ok((key, value))
            })
            .collect()
    }
}

#[async_trait]
impl Transport for GrpcTransport {
    async fn unary(&self, method: &'static str, request: Bytes) -> Result<Bytes, SdkError> {
        let mut grpc = tonic::client::Grpc::new(self.channel.clone());
        grpc.ready()
            .await
            .map_err(|e| SdkError::Transport(format!("channel not ready: {}", e)))?;

        let mut request = tonic::Request::new(request);
        for (key, value) in &self.metadata {
            request.metadata_mut().insert(key.clone(), value.clone());
        }

        let response = grpc
            .unary(request, PathAndQuery::from_static(method), RawCodec)
            .await?;
        Ok(response.into_inner())
    }
}

/// Mock transport for testing
///
/// Answers each method with a canned response and records every request.
/// Methods without a response fail with status `UNIMPLEMENTED`.
#[derive(Clone, Default)]
pub struct MockTransport {
    responses: Arc<Mutex<HashMap<String, Result<Bytes, (tonic::Code, String)>>>>,
    requests: Arc<Mutex<Vec<(String, Bytes)>>>,
}

impl MockTransport {
    /// Create a mock transport with no responses
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer `method` with `response`
    ///
    /// # Panics
    ///
    /// Panics if the mutex is poisoned.
    pub fn set_response<M: prost::Message>(&self, method: &str, response: &M) {
        self.responses
            .lock()
            .expect("MockTransport mutex poisoned")
            .insert(method.to_string(), Ok(Bytes::from(response.encode_to_vec())));
    }

    /// Answer `method` with raw bytes
    ///
    /// # Panics
    ///
    /// Panics if the mutex is poisoned.
    pub fn set_raw_response(&self, method: &str, response: impl Into<Bytes>) {
        self.responses
            .lock()
            .expect("MockTransport mutex poisoned")
            .insert(method.to_string(), Ok(response.into()));
    }

    /// Fail `method` with a gRPC status
    ///
    /// # Panics
    ///
    /// Panics if the mutex is poisoned.
    pub fn set_error(&self, method: &str, code: tonic::Code, message: &str) {
        self.responses
            .lock()
            .expect("MockTransport mutex poisoned")
            .insert(method.to_string(), Err((code, message.to_string())));
    }

    /// Every request sent so far, in order
    ///
    /// # Panics
    ///
    /// Panics if the mutex is poisoned.
    pub fn requests(&self) -> Vec<(String, Bytes)> {
        self.requests
            .lock()
            .expect("MockTransport mutex poisoned")
            .clone()
    }

    /// Decode the most recent request sent to `method`
    ///
    /// # Panics
    ///
    /// Panics if the mutex is poisoned or the request does not decode as `M`.
    pub fn last_request<M: prost::Message + Default>(&self, method: &str) -> Option<M> {
        self.requests()
            .into_iter()
            .rev()
            .find(|(m, _)| m == method)
            .map(|(_, bytes)| M::decode(bytes).expect("request decodes"))
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn unary(&self, method: &'static str, request: Bytes) -> Result<Bytes, SdkError> {
        self.requests
            .lock()
            .map_err(|_| SdkError::Transport("MockTransport mutex poisoned".to_string()))?
            .push((method.to_string(), request));

        let response = self
            .responses
            .lock()
            .map_err(|_| SdkError::Transport("MockTransport mutex poisoned".to_string()))?
            .get(method)
            .cloned();

        match response {
            Some(Ok(bytes)) => Ok(bytes),
            Some(Err((code, message))) => Err(tonic::Status::new(code, message).into()),
            None => Err(tonic::Status::unimplemented(format!("no mock response for {}", method)).into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::proto;

    #[tokio::test]
    async fn test_mock_transport_canned_response() {
        let transport = MockTransport::new();
        let hash = proto::TransactionHash { value: vec![7; 32] };
        transport.set_response(proto::methods::SEND_BLOCK_ITEM, &hash);

        let response = transport
            .unary(proto::methods::SEND_BLOCK_ITEM, Bytes::from_static(b"req"))
            .await
            .unwrap();
        assert_eq!(response, Bytes::from(prost::Message::encode_to_vec(&hash)));
        assert_eq!(
            transport.requests(),
            vec![(
                proto::methods::SEND_BLOCK_ITEM.to_string(),
                Bytes::from_static(b"req")
            )]
        );
    }

    #[tokio::test]
    async fn test_mock_transport_unknown_method() {
        let transport = MockTransport::new();
        let err = transport
            .unary(proto::methods::GET_CONSENSUS_INFO, Bytes::new())
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), Some(tonic::Code::Unimplemented));
    }

    #[tokio::test]
    async fn test_mock_transport_error_status() {
        let transport = MockTransport::new();
        transport.set_error(
            proto::methods::SEND_BLOCK_ITEM,
            tonic::Code::InvalidArgument,
            "duplicate nonce",
        );
        let err = transport
            .unary(proto::methods::SEND_BLOCK_ITEM, Bytes::new())
            .await
            .unwrap_err();
        match err {
            SdkError::Status { code, message } => {
                assert_eq!(code, tonic::Code::InvalidArgument as i32);
                assert_eq!(message, "duplicate nonce");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_grpc_transport_rejects_bad_header() {
        let mut config = ClientConfig::default();
        config
            .headers
            .insert("bad header".to_string(), "x".to_string());
        assert!(matches!(
            GrpcTransport::connect_lazy(&config),
            Err(SdkError::Config(_))
        ));
    }

    #[tokio::test]
    async fn test_grpc_transport_lazy_connect() {
        let mut config = ClientConfig::default();
        config
            .headers
            .insert("authentication".to_string(), "rpcadmin".to_string());
        let transport = GrpcTransport::connect_lazy(&config).unwrap();
        assert_eq!(transport.metadata.len(), 1);
    }
}
