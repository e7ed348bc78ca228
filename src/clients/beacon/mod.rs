use std::fmt::Debug;

use anyhow::Context as AnyhowContext;
use async_trait::async_trait;
use backon::ExponentialBuilder;
use reqwest::{Client, Url};

#[cfg(test)]
use mockall::automock;

use crate::{clients::common::ClientResult, json_get, json_post};

use self::types::{
    BlockId, BlockMessage, BlockResponse, SyncCommittee, SyncCommitteeResponse, SyncDutiesResponse,
    SyncDuty,
};

pub mod types;

#[derive(Debug, Clone)]
pub struct BeaconClient {
    base_url: Url,
    client: Client,
    retry: ExponentialBuilder,
}

pub struct Config {
    pub base_url: String,
    pub max_retries: usize,
}

#[cfg_attr(test, automock)]
#[async_trait]
pub trait CommonBeaconClient: Send + Sync + Debug {
    async fn get_block(&self, block_id: BlockId) -> ClientResult<Option<BlockMessage>>;
    async fn get_sync_committee(&self, slot: u64) -> ClientResult<Option<SyncCommittee>>;
    async fn get_sync_duties(
        &self,
        epoch: u64,
        validator_indices: &[String],
    ) -> ClientResult<Option<Vec<SyncDuty>>>;
}

impl BeaconClient {
    pub fn try_with_client(client: Client, config: Config) -> ClientResult<Self> {
        let base_url = Url::parse(&format!(
            "{}/eth/",
            config.base_url.trim_end_matches('/')
        ))
        .with_context(|| "Failed to parse base URL")?;
        let retry = ExponentialBuilder::default().with_max_times(config.max_retries);

        Ok(Self {
            base_url,
            client,
            retry,
        })
    }
}

#[async_trait]
impl CommonBeaconClient for BeaconClient {
    async fn get_block(&self, block_id: BlockId) -> ClientResult<Option<BlockMessage>> {
        let path = format!("v2/beacon/blocks/{block_id}");
        let url = self.base_url.join(path.as_str())?;

        json_get!(&self.client, url, BlockResponse, self.retry).map(|res| res.map(|r| r.data.message))
    }

    async fn get_sync_committee(&self, slot: u64) -> ClientResult<Option<SyncCommittee>> {
        let path = format!("v1/beacon/states/{slot}/sync_committees");
        let url = self.base_url.join(path.as_str())?;

        json_get!(&self.client, url, SyncCommitteeResponse, self.retry).map(|res| res.map(|r| r.data))
    }

    async fn get_sync_duties(
        &self,
        epoch: u64,
        validator_indices: &[String],
    ) -> ClientResult<Option<Vec<SyncDuty>>> {
        let path = format!("v1/validator/duties/sync/{epoch}");
        let url = self.base_url.join(path.as_str())?;

        json_post!(&self.client, url, validator_indices, SyncDutiesResponse, self.retry)
            .map(|res| res.map(|r| r.data))
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use mockito::{Matcher, Server};
    use tokio::{
        io::{AsyncReadExt, AsyncWriteExt},
        net::TcpListener,
        task::JoinHandle,
    };

    use super::*;
    use crate::{clients::common::ClientError, error::ResolutionError};

    const HEAD_BLOCK: &str =
        r#"{"data":{"message":{"slot":"200","body":{"execution_payload":{"block_number":"655"}}}}}"#;

    fn build_client(base_url: String) -> BeaconClient {
        BeaconClient::try_with_client(
            Client::new(),
            Config {
                base_url,
                max_retries: 0,
            },
        )
        .unwrap()
    }

    fn build_retrying_client(base_url: String, max_retries: usize) -> BeaconClient {
        BeaconClient {
            retry: ExponentialBuilder::default()
                .with_min_delay(Duration::from_millis(10))
                .with_max_times(max_retries),
            ..build_client(base_url)
        }
    }

    /// Serves `body` on the second connection after resetting the first one.
    async fn serve_after_dropped_connection(body: &'static str) -> (String, JoinHandle<()>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let address = listener.local_addr().unwrap();

        let handle = tokio::spawn(async move {
            let (dropped, _) = listener.accept().await.unwrap();
            drop(dropped);

            let (mut stream, _) = listener.accept().await.unwrap();
            let mut request: Vec<u8> = Vec::new();
            let mut buf = [0u8; 1024];

            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                let read = stream.read(&mut buf).await.unwrap();
                if read == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..read]);
            }

            let response = format!(
                "HTTP/1.1 200 OK\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
                body.len()
            );
            stream.write_all(response.as_bytes()).await.unwrap();
            stream.shutdown().await.unwrap();
        });

        (format!("http://{address}"), handle)
    }

    #[tokio::test]
    async fn test_get_head_block() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/eth/v2/beacon/blocks/head")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(HEAD_BLOCK)
            .create_async()
            .await;

        let block = build_client(server.url())
            .get_block(BlockId::Head)
            .await
            .unwrap()
            .unwrap();

        mock.assert_async().await;
        assert_eq!(block.slot, "200");
        assert_eq!(block.body.execution_payload.unwrap().block_number, "655");
    }

    #[tokio::test]
    async fn test_get_missing_block_returns_none() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/eth/v2/beacon/blocks/100")
            .with_status(404)
            .with_body(r#"{"code":404,"message":"NOT_FOUND: beacon block at slot 100"}"#)
            .create_async()
            .await;

        let block = build_client(server.url())
            .get_block(BlockId::Slot(100))
            .await
            .unwrap();

        assert!(block.is_none());
    }

    #[tokio::test]
    async fn test_get_block_with_unexpected_shape_is_decode_error() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/eth/v2/beacon/blocks/100")
            .with_status(200)
            .with_body(r#"{"data":{"unexpected":true}}"#)
            .create_async()
            .await;

        let err = build_client(server.url())
            .get_block(BlockId::Slot(100))
            .await
            .unwrap_err();

        assert!(err.is_decode());
    }

    #[tokio::test]
    async fn test_server_error_is_api_error() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/eth/v1/beacon/states/100/sync_committees")
            .with_status(500)
            .with_body(r#"{"code":500,"message":"Internal server error"}"#)
            .create_async()
            .await;

        let err = build_client(server.url())
            .get_sync_committee(100)
            .await
            .unwrap_err();

        assert!(matches!(err, ClientError::ApiError(_)));
        assert!(!err.is_decode());
    }

    #[tokio::test]
    async fn test_get_sync_duties_posts_validator_indices() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/eth/v1/validator/duties/sync/3")
            .match_header("content-type", "application/json")
            .match_body(Matcher::Json(serde_json::json!(["12", "7"])))
            .with_status(200)
            .with_body(
                r#"{"execution_optimistic":false,"data":[{"pubkey":"0xb2","validator_index":"12","validator_sync_committee_indices":["0"]},{"pubkey":"0xa1","validator_index":"7","validator_sync_committee_indices":["1"]}]}"#,
            )
            .create_async()
            .await;

        let duties = build_client(format!("{}/", server.url()))
            .get_sync_duties(3, &["12".to_string(), "7".to_string()])
            .await
            .unwrap()
            .unwrap();

        mock.assert_async().await;
        assert_eq!(
            duties.iter().map(|d| d.pubkey.as_str()).collect::<Vec<_>>(),
            vec!["0xb2", "0xa1"]
        );
    }

    #[tokio::test]
    async fn test_empty_success_body_is_decode_error() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/eth/v2/beacon/blocks/100")
            .with_status(200)
            .with_body("")
            .create_async()
            .await;

        let err = build_client(server.url())
            .get_block(BlockId::Slot(100))
            .await
            .unwrap_err();

        assert!(err.is_decode());
        assert!(matches!(
            ResolutionError::from(err),
            ResolutionError::Decode(_)
        ));
    }

    #[tokio::test]
    async fn test_null_success_body_is_decode_error() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/eth/v1/beacon/states/100/sync_committees")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body("null")
            .create_async()
            .await;

        let err = build_client(server.url())
            .get_sync_committee(100)
            .await
            .unwrap_err();

        assert!(err.is_decode());
    }

    #[tokio::test]
    async fn test_transport_failure_is_retried() {
        let (url, server) = serve_after_dropped_connection(HEAD_BLOCK).await;

        let block = build_retrying_client(url, 2)
            .get_block(BlockId::Head)
            .await
            .unwrap()
            .unwrap();

        server.await.unwrap();
        assert_eq!(block.slot, "200");
    }

    #[tokio::test]
    async fn test_transport_failure_without_retries_fails() {
        let (url, server) = serve_after_dropped_connection(HEAD_BLOCK).await;

        let err = build_retrying_client(url, 0)
            .get_block(BlockId::Head)
            .await
            .unwrap_err();

        server.abort();
        assert!(matches!(err, ClientError::Reqwest(_)));
        assert!(matches!(
            ResolutionError::from(err),
            ResolutionError::UpstreamUnavailable(_)
        ));
    }

    #[tokio::test]
    async fn test_error_status_is_not_retried() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/eth/v2/beacon/blocks/100")
            .with_status(503)
            .with_body("syncing")
            .expect(1)
            .create_async()
            .await;

        let err = build_retrying_client(server.url(), 3)
            .get_block(BlockId::Slot(100))
            .await
            .unwrap_err();

        mock.assert_async().await;
        assert!(matches!(
            err,
            ClientError::UnexpectedStatus { status: 503, .. }
        ));
    }
}
