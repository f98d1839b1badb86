use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use sha2::{Digest, Sha256};

use super::{GENESIS_PREVIOUS_HASH, GENESIS_PROOF};
use crate::transaction::Transaction;

/// A single block in the chain holding the transactions it committed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    pub index: u64,
    pub timestamp: f64, // seconds since the Unix epoch (UTC)
    pub transactions: Vec<Transaction>,
    pub proof: u64,
    pub previous_hash: String,
}

/// SHA-256 of `data` as 64 lowercase hex characters.
pub fn sha256_hex(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hex::encode(hasher.finalize())
}

/// Current wall-clock time in fractional seconds.
pub fn now_secs() -> f64 {
    Utc::now().timestamp_micros() as f64 / 1_000_000.0
}

impl Block {
    /// The fixed first block every chain starts from.
    pub fn genesis() -> Self {
        Self {
            index: 1,
            timestamp: now_secs(),
            transactions: Vec::new(),
            proof: GENESIS_PROOF,
            previous_hash: GENESIS_PREVIOUS_HASH.to_string(),
        }
    }

    /// Build the block that follows a chain of `chain_len` blocks.
    pub fn new(
        chain_len: usize,
        transactions: Vec<Transaction>,
        proof: u64,
        previous_hash: String,
    ) -> Self {
        Self {
            index: chain_len as u64 + 1,
            timestamp: now_secs(),
            transactions,
            proof,
            previous_hash,
        }
    }

    /// The block as a JSON value with every object's keys held in sorted
    /// order, so the encoding never depends on field declaration order.
    pub fn canonical_value(&self) -> Value {
        let transactions = self
            .transactions
            .iter()
            .map(|tx| {
                let mut m = Map::new();
                m.insert("sender".into(), Value::from(tx.sender.as_str()));
                m.insert("recipient".into(), Value::from(tx.recipient.as_str()));
                m.insert("amount".into(), Value::from(tx.amount));
                Value::Object(m)
            })
            .collect();

        let mut m = Map::new();
        m.insert("index".into(), Value::from(self.index));
        m.insert("timestamp".into(), Value::from(self.timestamp));
        m.insert("transactions".into(), Value::Array(transactions));
        m.insert("proof".into(), Value::from(self.proof));
        m.insert("previous_hash".into(), Value::from(self.previous_hash.as_str()));
        Value::Object(m)
    }

    /// Compact canonical JSON encoding of the block.
    pub fn canonical_json(&self) -> String {
        self.canonical_value().to_string()
    }

    /// SHA-256 over the canonical encoding, hex encoded.
    pub fn hash(&self) -> String {
        sha256_hex(self.canonical_json().as_bytes())
    }
}
