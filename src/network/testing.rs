//! In-memory peer transport used by unit tests.

use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::Mutex;

use super::transport::{ChainSnapshot, PeerTransport};
use crate::blockchain::{Block, Ledger, pow};
use crate::error::{NodeError, Result};
use crate::transaction::Transaction;

/// Peers are reachable only if a chain was set for them.
#[derive(Default)]
pub struct MemoryTransport {
    chains: Mutex<HashMap<String, ChainSnapshot>>,
    sent_txs: Mutex<Vec<(String, Transaction)>>,
    sent_blocks: Mutex<Vec<(String, Block)>>,
}

impl MemoryTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_chain(&self, peer: &str, chain: Vec<Block>) {
        let length = chain.len();
        self.set_snapshot(peer, ChainSnapshot { chain, length });
    }

    /// Serve a snapshot verbatim, even one whose `length` lies.
    pub fn set_snapshot(&self, peer: &str, snapshot: ChainSnapshot) {
        self.chains.lock().insert(peer.to_string(), snapshot);
    }

    pub fn sent_transactions(&self) -> Vec<(String, Transaction)> {
        self.sent_txs.lock().clone()
    }

    pub fn sent_blocks(&self) -> Vec<(String, Block)> {
        self.sent_blocks.lock().clone()
    }

    fn reachable(&self, peer: &str) -> Result<()> {
        if self.chains.lock().contains_key(peer) {
            Ok(())
        } else {
            Err(NodeError::peer(peer, "connection refused"))
        }
    }
}

#[async_trait]
impl PeerTransport for MemoryTransport {
    async fn fetch_chain(&self, peer: &str) -> Result<ChainSnapshot> {
        self.chains
            .lock()
            .get(peer)
            .cloned()
            .ok_or_else(|| NodeError::peer(peer, "connection refused"))
    }

    async fn send_transaction(&self, peer: &str, tx: &Transaction) -> Result<()> {
        self.reachable(peer)?;
        self.sent_txs.lock().push((peer.to_string(), tx.clone()));
        Ok(())
    }

    async fn send_block(&self, peer: &str, block: &Block) -> Result<()> {
        self.reachable(peer)?;
        self.sent_blocks.lock().push((peer.to_string(), block.clone()));
        Ok(())
    }
}

/// A valid chain of `len` blocks, the first being genesis.
pub fn mined_chain(len: usize) -> Vec<Block> {
    let mut ledger = Ledger::new();
    while ledger.len() < len {
        ledger.add_transaction(Transaction::new("miner", "peer", ledger.len() as f64));
        let head = ledger.head();
        let proof = pow::solve(head.last_proof);
        ledger.seal_block(&head, proof).unwrap();
    }
    ledger.chain().to_vec()
}
