use std::{fmt::Debug, time::Duration};

use alloy::{
    eips::{BlockId, BlockNumberOrTag},
    primitives::B256,
    providers::{Provider, RootProvider},
    rpc::client::RpcClient,
    transports::http::{reqwest as http, Http},
};
use anyhow::anyhow;
use async_trait::async_trait;
use tracing::debug;
use url::Url;

#[cfg(test)]
use mockall::automock;

use crate::clients::common::ClientResult;

use self::types::{ExecutionBlock, Receipt};

pub mod types;

#[derive(Debug, Clone)]
pub struct ExecutionClient {
    provider: RootProvider,
}

pub struct Config {
    pub endpoint: String,
    pub timeout: Option<Duration>,
}

#[cfg_attr(test, automock)]
#[async_trait]
pub trait CommonExecutionClient: Send + Sync + Debug {
    async fn get_block(&self, number: u64) -> ClientResult<Option<ExecutionBlock>>;
    async fn get_block_receipts(&self, block_hash: B256) -> ClientResult<Option<Vec<Receipt>>>;
}

impl ExecutionClient {
    pub fn try_new(config: Config) -> ClientResult<Self> {
        let url = Url::parse(&config.endpoint)?;
        let mut client_builder = http::Client::builder();

        if let Some(timeout) = config.timeout {
            client_builder = client_builder.timeout(timeout);
        }

        let client = client_builder
            .build()
            .map_err(|err| anyhow!("Failed to build execution node HTTP client: {err}"))?;
        let rpc_client = RpcClient::new(Http::with_client(client, url), false);

        Ok(Self {
            provider: RootProvider::new(rpc_client),
        })
    }
}

#[async_trait]
impl CommonExecutionClient for ExecutionClient {
    async fn get_block(&self, number: u64) -> ClientResult<Option<ExecutionBlock>> {
        debug!(block_number = number, method = "eth_getBlockByNumber", "Dispatching RPC request");

        let block = self
            .provider
            .get_block_by_number(BlockNumberOrTag::Number(number))
            .full()
            .await?;

        match block {
            Some(block) => Ok(Some(ExecutionBlock::try_from(&block)?)),
            None => Ok(None),
        }
    }

    async fn get_block_receipts(&self, block_hash: B256) -> ClientResult<Option<Vec<Receipt>>> {
        debug!(%block_hash, method = "eth_getBlockReceipts", "Dispatching RPC request");

        let receipts = self
            .provider
            .get_block_receipts(BlockId::hash(block_hash))
            .await?;

        Ok(receipts.map(|receipts| receipts.iter().map(Receipt::from).collect()))
    }
}
