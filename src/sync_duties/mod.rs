use tracing::debug;

use crate::{
    clients::beacon::CommonBeaconClient,
    error::{ResolutionError, ResolutionResult},
    slots::epoch_of,
};

/// Public keys of the validators on sync committee duty for the epoch of `slot`,
/// in the order the duty endpoint returns them.
pub async fn resolve(
    beacon_client: &dyn CommonBeaconClient,
    slot: u64,
) -> ResolutionResult<Vec<String>> {
    let sync_committee = beacon_client
        .get_sync_committee(slot)
        .await?
        .ok_or_else(|| {
            ResolutionError::NotFound(format!("no sync committee found for slot {slot}"))
        })?;

    let epoch = epoch_of(slot);

    let duties = beacon_client
        .get_sync_duties(epoch, &sync_committee.validators)
        .await?
        .ok_or_else(|| {
            ResolutionError::NotFound(format!("no sync duties found for epoch {epoch}"))
        })?;

    debug!(
        slot,
        epoch,
        committee_size = sync_committee.validators.len(),
        duties = duties.len(),
        committee_positions = duties
            .iter()
            .map(|duty| duty.validator_sync_committee_indices.len())
            .sum::<usize>(),
        "Sync duties resolved"
    );

    Ok(duties.into_iter().map(|duty| duty.pubkey).collect())
}
