use std::{fmt::Debug, sync::Arc, time::Duration};

use anyhow::Result as AnyhowResult;
use dyn_clone::DynClone;

use crate::{
    clients::{
        beacon::{BeaconClient, CommonBeaconClient, Config as BeaconClientConfig},
        execution::{CommonExecutionClient, Config as ExecutionClientConfig, ExecutionClient},
    },
    env::Environment,
    rewards::units::RewardUnits,
};

dyn_clone::clone_trait_object!(CommonContext);

pub trait CommonContext: Send + Sync + Debug + DynClone {
    fn beacon_client(&self) -> &Box<dyn CommonBeaconClient>;
    fn execution_client(&self) -> &Box<dyn CommonExecutionClient>;
    fn reward_units(&self) -> RewardUnits;
}

pub struct Config {
    pub beacon_node_url: String,
    pub execution_node_endpoint: String,
    pub request_timeout: Duration,
    pub max_retries: usize,
    pub reward_units: RewardUnits,
}

#[derive(Debug)]
struct ContextRef {
    pub beacon_client: Box<dyn CommonBeaconClient>,
    pub execution_client: Box<dyn CommonExecutionClient>,
    pub reward_units: RewardUnits,
}

#[derive(Debug, Clone)]
pub struct Context {
    inner: Arc<ContextRef>,
}

impl Context {
    pub fn try_new(config: Config) -> AnyhowResult<Self> {
        let Config {
            beacon_node_url,
            execution_node_endpoint,
            request_timeout,
            max_retries,
            reward_units,
        } = config;

        let client = reqwest::Client::builder()
            .timeout(request_timeout)
            .build()?;

        Ok(Self::with_clients(
            Box::new(BeaconClient::try_with_client(
                client,
                BeaconClientConfig {
                    base_url: beacon_node_url,
                    max_retries,
                },
            )?),
            Box::new(ExecutionClient::try_new(ExecutionClientConfig {
                endpoint: execution_node_endpoint,
                timeout: Some(request_timeout),
            })?),
            reward_units,
        ))
    }

    pub fn with_clients(
        beacon_client: Box<dyn CommonBeaconClient>,
        execution_client: Box<dyn CommonExecutionClient>,
        reward_units: RewardUnits,
    ) -> Self {
        Self {
            inner: Arc::new(ContextRef {
                beacon_client,
                execution_client,
                reward_units,
            }),
        }
    }
}

impl CommonContext for Context {
    fn beacon_client(&self) -> &Box<dyn CommonBeaconClient> {
        &self.inner.beacon_client
    }

    fn execution_client(&self) -> &Box<dyn CommonExecutionClient> {
        &self.inner.execution_client
    }

    fn reward_units(&self) -> RewardUnits {
        self.inner.reward_units
    }
}

impl From<&Environment> for Config {
    fn from(env: &Environment) -> Self {
        Self {
            beacon_node_url: env.beacon_node_endpoint.clone(),
            execution_node_endpoint: env.execution_node_endpoint.clone(),
            request_timeout: Duration::from_secs(env.request_timeout_secs),
            max_retries: env.upstream_max_retries,
            reward_units: env.reward_units,
        }
    }
}
