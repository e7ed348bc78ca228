use serde::Serialize;

use crate::rewards::{BlockReward, RewardClassification};

#[derive(Serialize, Debug)]
pub struct BlockRewardResponse {
    pub status: RewardClassification,
    pub reward: String,
}

#[derive(Serialize, Debug)]
pub struct SyncDutiesResponse {
    pub validators: Vec<String>,
}

impl From<BlockReward> for BlockRewardResponse {
    fn from(reward: BlockReward) -> Self {
        Self {
            status: reward.classification,
            reward: reward.amount,
        }
    }
}
