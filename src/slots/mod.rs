use tracing::debug;

use crate::{
    clients::beacon::{
        types::{BlockId, BlockMessage},
        CommonBeaconClient,
    },
    error::{ResolutionError, ResolutionResult},
};

pub const SLOTS_PER_EPOCH: u64 = 32;

pub fn epoch_of(slot: u64) -> u64 {
    slot / SLOTS_PER_EPOCH
}

pub async fn fetch_envelope(
    beacon_client: &dyn CommonBeaconClient,
    block_id: BlockId,
) -> ResolutionResult<BlockMessage> {
    match beacon_client.get_block(block_id).await? {
        Some(block) => Ok(block),
        None => Err(ResolutionError::NotFound(format!(
            "no beacon block found for block ID {block_id}"
        ))),
    }
}

/// Resolves the slot of the chain's current head. Never cached.
pub async fn current_slot(beacon_client: &dyn CommonBeaconClient) -> ResolutionResult<u64> {
    let head = fetch_envelope(beacon_client, BlockId::Head).await?;

    head.slot.parse::<u64>().map_err(|err| {
        ResolutionError::Decode(format!("invalid head slot \"{}\": {err}", head.slot))
    })
}

pub fn validate_slot_bound(requested: u64, current: u64) -> ResolutionResult<()> {
    if requested > current {
        return Err(ResolutionError::InvalidRequest(format!(
            "slot {requested} is ahead of the current head slot {current}"
        )));
    }

    Ok(())
}

pub fn execution_block_number(envelope: &BlockMessage) -> ResolutionResult<u64> {
    let execution_payload = envelope.body.execution_payload.as_ref().ok_or_else(|| {
        ResolutionError::NotFound(format!(
            "beacon block at slot {} has no execution payload",
            envelope.slot
        ))
    })?;

    execution_payload.block_number.parse::<u64>().map_err(|err| {
        ResolutionError::Decode(format!(
            "invalid execution block number \"{}\": {err}",
            execution_payload.block_number
        ))
    })
}

pub async fn resolve_execution_block_number(
    beacon_client: &dyn CommonBeaconClient,
    slot: u64,
) -> ResolutionResult<u64> {
    let envelope = fetch_envelope(beacon_client, BlockId::Slot(slot)).await?;
    let block_number = execution_block_number(&envelope)?;

    debug!(slot, block_number, "Resolved execution block");

    Ok(block_number)
}
