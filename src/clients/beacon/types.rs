use std::fmt;

use serde::Deserialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockId {
    Head,
    Slot(u64),
}

#[derive(Deserialize, Debug)]
pub struct ExecutionPayload {
    pub block_number: String,
}

#[derive(Deserialize, Debug)]
pub struct BlockBody {
    pub execution_payload: Option<ExecutionPayload>,
}

#[derive(Deserialize, Debug)]
pub struct BlockMessage {
    pub slot: String,
    pub body: BlockBody,
}

#[derive(Deserialize, Debug)]
pub struct Block {
    pub message: BlockMessage,
}

#[derive(Deserialize, Debug)]
pub struct BlockResponse {
    pub data: Block,
}

#[derive(Deserialize, Debug)]
pub struct SyncCommittee {
    pub validators: Vec<String>,
}

#[derive(Deserialize, Debug)]
pub struct SyncCommitteeResponse {
    pub data: SyncCommittee,
}

#[derive(Deserialize, Debug, Clone)]
pub struct SyncDuty {
    pub pubkey: String,
    #[serde(default)]
    pub validator_sync_committee_indices: Vec<String>,
}

#[derive(Deserialize, Debug)]
pub struct SyncDutiesResponse {
    pub data: Vec<SyncDuty>,
}

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BlockId::Head => write!(f, "head"),
            BlockId::Slot(slot) => write!(f, "{}", slot),
        }
    }
}
