use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::{context::CommonContext, service};

use super::{
    error::ApiError,
    types::{BlockRewardResponse, SyncDutiesResponse},
};

fn parse_slot(slot: &str) -> Result<u64, ApiError> {
    slot.parse::<u64>()
        .map_err(|_| ApiError::InvalidSlot(slot.to_string()))
}

pub async fn healthz() -> StatusCode {
    StatusCode::OK
}

pub async fn get_block_reward(
    Path(slot): Path<String>,
    State(context): State<Box<dyn CommonContext>>,
) -> Result<Json<BlockRewardResponse>, ApiError> {
    let slot = parse_slot(&slot)?;
    let reward = service::block_reward(context.as_ref(), slot).await?;

    Ok(Json(reward.into()))
}

pub async fn get_sync_duties(
    Path(slot): Path<String>,
    State(context): State<Box<dyn CommonContext>>,
) -> Result<Json<SyncDutiesResponse>, ApiError> {
    let slot = parse_slot(&slot)?;
    let validators = service::sync_duties(context.as_ref(), slot).await?;

    Ok(Json(SyncDutiesResponse { validators }))
}
