use tracing::info;

use crate::{
    context::CommonContext,
    error::ResolutionResult,
    rewards::{self, BlockReward},
    slots::{current_slot, resolve_execution_block_number, validate_slot_bound},
    sync_duties,
};

pub async fn block_reward(context: &dyn CommonContext, slot: u64) -> ResolutionResult<BlockReward> {
    let beacon_client = context.beacon_client().as_ref();

    let head_slot = current_slot(beacon_client).await?;
    validate_slot_bound(slot, head_slot)?;

    let block_number = resolve_execution_block_number(beacon_client, slot).await?;
    let reward = rewards::classify(
        context.execution_client().as_ref(),
        block_number,
        context.reward_units(),
    )
    .await?;

    info!(
        slot,
        block_number,
        classification = ?reward.classification,
        reward = reward.amount.as_str(),
        "Block reward resolved"
    );

    Ok(reward)
}

pub async fn sync_duties(context: &dyn CommonContext, slot: u64) -> ResolutionResult<Vec<String>> {
    let beacon_client = context.beacon_client().as_ref();

    let head_slot = current_slot(beacon_client).await?;
    validate_slot_bound(slot, head_slot)?;

    let validators = sync_duties::resolve(beacon_client, slot).await?;

    info!(slot, validators = validators.len(), "Sync duties resolved");

    Ok(validators)
}
