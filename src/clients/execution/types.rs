use alloy::{
    consensus::Transaction as ConsensusTx,
    primitives::{Bytes, B256, U256},
    rpc::types::{Block as RpcBlock, TransactionReceipt},
};
use anyhow::anyhow;

/// Execution layer block reduced to the fields needed to price its proposal.
#[derive(Debug, Clone, Default)]
pub struct ExecutionBlock {
    pub number: u64,
    pub hash: B256,
    pub extra_data: Bytes,
    pub base_fee_per_gas: Option<u64>,
    pub gas_used: u64,
    /// Transferred value of every transaction, in inclusion order.
    pub transaction_values: Vec<U256>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Receipt {
    pub effective_gas_price: u128,
    pub gas_used: u64,
}

impl TryFrom<&RpcBlock> for ExecutionBlock {
    type Error = anyhow::Error;

    fn try_from(block: &RpcBlock) -> Result<Self, Self::Error> {
        let number = block.header.number;
        let transactions = block.transactions.as_transactions().ok_or_else(|| {
            anyhow!("Execution block {number} was returned without full transactions")
        })?;

        Ok(Self {
            number,
            hash: block.header.hash,
            extra_data: block.header.extra_data.clone(),
            base_fee_per_gas: block.header.base_fee_per_gas,
            gas_used: block.header.gas_used,
            transaction_values: transactions.iter().map(|tx| tx.value()).collect(),
        })
    }
}

impl From<&TransactionReceipt> for Receipt {
    fn from(receipt: &TransactionReceipt) -> Self {
        Self {
            effective_gas_price: receipt.effective_gas_price,
            gas_used: receipt.gas_used,
        }
    }
}
