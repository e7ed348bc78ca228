use envy::Error::MissingValue;
use serde::Deserialize;

use crate::rewards::units::RewardUnits;

#[derive(Deserialize, Debug)]
pub struct Environment {
    #[serde(default = "default_beacon_node_endpoint")]
    pub beacon_node_endpoint: String,
    #[serde(default = "default_execution_node_endpoint")]
    pub execution_node_endpoint: String,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    #[serde(default)]
    pub upstream_max_retries: usize,
    #[serde(default)]
    pub reward_units: RewardUnits,
    pub sentry_dsn: Option<String>,
}

fn default_beacon_node_endpoint() -> String {
    "http://localhost:3500".into()
}

fn default_execution_node_endpoint() -> String {
    "http://localhost:8545".into()
}

fn default_request_timeout_secs() -> u64 {
    8
}

impl Environment {
    pub fn from_env() -> Result<Self, envy::Error> {
        Self::validate(envy::from_env::<Environment>()?)
    }

    fn validate(config: Environment) -> Result<Self, envy::Error> {
        if config.beacon_node_endpoint.is_empty() {
            return Err(MissingValue("BEACON_NODE_ENDPOINT"));
        } else if config.execution_node_endpoint.is_empty() {
            return Err(MissingValue("EXECUTION_NODE_ENDPOINT"));
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect()
    }

    #[test]
    fn test_defaults() {
        let env = Environment::validate(envy::from_iter::<_, Environment>(vars(&[])).unwrap())
            .unwrap();

        assert_eq!(env.beacon_node_endpoint, "http://localhost:3500");
        assert_eq!(env.execution_node_endpoint, "http://localhost:8545");
        assert_eq!(env.request_timeout_secs, 8);
        assert_eq!(env.upstream_max_retries, 0);
        assert_eq!(env.reward_units, RewardUnits::Observed);
        assert!(env.sentry_dsn.is_none());
    }

    #[test]
    fn test_overrides() {
        let env = envy::from_iter::<_, Environment>(vars(&[
            ("BEACON_NODE_ENDPOINT", "http://beacon:5052"),
            ("REQUEST_TIMEOUT_SECS", "30"),
            ("UPSTREAM_MAX_RETRIES", "3"),
            ("REWARD_UNITS", "ether"),
        ]))
        .unwrap();

        assert_eq!(env.beacon_node_endpoint, "http://beacon:5052");
        assert_eq!(env.request_timeout_secs, 30);
        assert_eq!(env.upstream_max_retries, 3);
        assert_eq!(env.reward_units, RewardUnits::Ether);
    }

    #[test]
    fn test_empty_endpoint_is_rejected() {
        let env = envy::from_iter::<_, Environment>(vars(&[("EXECUTION_NODE_ENDPOINT", "")]))
            .unwrap();

        assert!(matches!(
            Environment::validate(env),
            Err(MissingValue("EXECUTION_NODE_ENDPOINT"))
        ));
    }
}
