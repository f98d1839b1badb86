use serde::{Deserialize, Serialize};

use crate::blockchain::Block;
use crate::error::{NodeError, Result};
use crate::transaction::Transaction;

/* ---------- Transaction API Models ---------- */

/// Fields are optional so a missing one is reported by name.
#[derive(Debug, Deserialize)]
pub struct NewTransactionRequest {
    pub sender: Option<String>,
    pub recipient: Option<String>,
    pub amount: Option<f64>,
}

impl NewTransactionRequest {
    pub fn into_transaction(self) -> Result<Transaction> {
        Ok(Transaction {
            sender: self.sender.ok_or(NodeError::MissingField("sender"))?,
            recipient: self.recipient.ok_or(NodeError::MissingField("recipient"))?,
            amount: self.amount.ok_or(NodeError::MissingField("amount"))?,
        })
    }
}

#[derive(Serialize)]
pub struct NewTransactionResponse {
    pub message: String,
    pub position: u64,
    pub pending: usize,
}

#[derive(Serialize)]
pub struct PendingResponse {
    pub size: usize,
    pub transactions: Vec<Transaction>,
}

/* ---------- Block / Chain API Models ---------- */

#[derive(Debug, Deserialize)]
pub struct NewBlockRequest {
    pub index: Option<u64>,
    pub timestamp: Option<f64>,
    pub transactions: Option<Vec<Transaction>>,
    pub proof: Option<u64>,
    pub previous_hash: Option<String>,
}

impl NewBlockRequest {
    pub fn into_block(self) -> Result<Block> {
        Ok(Block {
            index: self.index.ok_or(NodeError::MissingField("index"))?,
            timestamp: self.timestamp.ok_or(NodeError::MissingField("timestamp"))?,
            transactions: self
                .transactions
                .ok_or(NodeError::MissingField("transactions"))?,
            proof: self.proof.ok_or(NodeError::MissingField("proof"))?,
            previous_hash: self
                .previous_hash
                .ok_or(NodeError::MissingField("previous_hash"))?,
        })
    }
}

#[derive(Serialize)]
pub struct MineResponse {
    pub message: String,
    pub node: String,
    pub index: u64,
    pub timestamp: f64,
    pub transactions: Vec<Transaction>,
    pub proof: u64,
    pub previous_hash: String,
}

#[derive(Serialize)]
pub struct ValidateResponse {
    pub valid: bool,
    pub length: usize,
}

#[derive(Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/* ---------- Peer API Models ---------- */

#[derive(Debug, Deserialize)]
pub struct RegisterNodesRequest {
    pub nodes: Option<Vec<String>>,
}

#[derive(Serialize)]
pub struct RegisterNodesResponse {
    pub message: String,
    pub total_nodes: Vec<String>,
}

#[derive(Serialize)]
pub struct NodesResponse {
    pub nodes: Vec<String>,
}

#[derive(Serialize)]
pub struct ResolveResponse {
    pub message: String,
    pub replaced: bool,
    pub length: usize,
    pub chain: Vec<Block>,
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
