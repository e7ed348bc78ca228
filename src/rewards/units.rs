use alloy::primitives::{utils::format_units, U256};
use serde::Deserialize;

use crate::error::{ResolutionError, ResolutionResult};

use super::RewardClassification;

pub const GWEI_DECIMALS: u8 = 9;
pub const ETHER_DECIMALS: u8 = 18;

/// Unit policy applied when rendering a reward amount.
///
/// `Observed` keeps the historical output of the service: builder payments are
/// rendered in wei while fee-based rewards are rendered in Gwei. `Ether` renders
/// every amount in ether.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RewardUnits {
    #[default]
    Observed,
    Ether,
}

impl RewardUnits {
    pub fn decimals(&self, classification: RewardClassification) -> u8 {
        match (self, classification) {
            (RewardUnits::Observed, RewardClassification::Mev) => 0,
            (RewardUnits::Observed, RewardClassification::Vanilla) => GWEI_DECIMALS,
            (RewardUnits::Ether, _) => ETHER_DECIMALS,
        }
    }

    pub fn render(
        &self,
        classification: RewardClassification,
        amount_wei: U256,
    ) -> ResolutionResult<String> {
        render_decimal(amount_wei, self.decimals(classification))
    }
}

/// Renders `amount / 10^decimals` as a fixed-point string without trailing zeros.
pub fn render_decimal(amount: U256, decimals: u8) -> ResolutionResult<String> {
    let formatted = format_units(amount, decimals).map_err(|err| {
        ResolutionError::DataIntegrity(format!("failed to render amount {amount}: {err}"))
    })?;

    if !formatted.contains('.') {
        return Ok(formatted);
    }

    Ok(formatted
        .trim_end_matches('0')
        .trim_end_matches('.')
        .to_string())
}
