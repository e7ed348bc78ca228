use alloy::primitives::U256;
use anyhow::anyhow;
use serde::Serialize;
use tracing::debug;

use crate::{
    clients::{
        common::ClientError,
        execution::{
            types::{ExecutionBlock, Receipt},
            CommonExecutionClient,
        },
    },
    error::{ResolutionError, ResolutionResult},
};

use self::units::RewardUnits;

pub mod units;

/// Tag builder clients leave in the extra-data of the blocks they build.
pub const BUILDER_MARKER: &[u8] = b"build";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RewardClassification {
    Mev,
    Vanilla,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockReward {
    pub classification: RewardClassification,
    pub amount: String,
}

/// Whether the block was produced by an external builder, judged by its extra-data.
pub fn is_builder_block(extra_data: &[u8]) -> bool {
    extra_data
        .windows(BUILDER_MARKER.len())
        .any(|window| window == BUILDER_MARKER)
}

/// Builder payment carried by the last transaction of the block.
pub fn mev_reward(block: &ExecutionBlock) -> ResolutionResult<U256> {
    block.transaction_values.last().copied().ok_or_else(|| {
        ResolutionError::DataIntegrity(format!(
            "builder block {} has no transactions to carry the proposer payment",
            block.number
        ))
    })
}

/// Priority fees kept by the proposer: fees paid by senders minus the burned base fee.
pub fn vanilla_reward(block: &ExecutionBlock, receipts: &[Receipt]) -> ResolutionResult<U256> {
    if receipts.len() != block.transaction_values.len() {
        return Err(ResolutionError::DataIntegrity(format!(
            "block {} has {} transactions but {} receipts were returned",
            block.number,
            block.transaction_values.len(),
            receipts.len()
        )));
    }

    let fees = receipts.iter().fold(U256::ZERO, |total, receipt| {
        total + U256::from(receipt.effective_gas_price) * U256::from(receipt.gas_used)
    });
    let burned =
        U256::from(block.gas_used) * U256::from(block.base_fee_per_gas.unwrap_or_default());

    fees.checked_sub(burned).ok_or_else(|| {
        ResolutionError::DataIntegrity(format!(
            "block {} burned {burned} wei but its transactions only paid {fees} wei",
            block.number
        ))
    })
}

pub async fn classify(
    execution_client: &dyn CommonExecutionClient,
    block_number: u64,
    units: RewardUnits,
) -> ResolutionResult<BlockReward> {
    let block = execution_client
        .get_block(block_number)
        .await?
        .ok_or_else(|| {
            ResolutionError::NotFound(format!("execution block {block_number} not found"))
        })?;

    let (classification, reward) = if is_builder_block(&block.extra_data) {
        (RewardClassification::Mev, mev_reward(&block)?)
    } else {
        let receipts = execution_client
            .get_block_receipts(block.hash)
            .await?
            .ok_or_else(|| {
                ResolutionError::UpstreamUnavailable(ClientError::Other(anyhow!(
                    "execution node returned no receipts for block {block_number}"
                )))
            })?;

        (
            RewardClassification::Vanilla,
            vanilla_reward(&block, &receipts)?,
        )
    };

    debug!(block_number, ?classification, %reward, "Block reward computed");

    Ok(BlockReward {
        classification,
        amount: units.render(classification, reward)?,
    })
}
