use std::sync::Arc;

use log::{info, warn};
use parking_lot::RwLock;
use uuid::Uuid;

use crate::blockchain::{Block, Ledger, pow};
use crate::error::{NodeError, Result};
use crate::network::broadcast::{broadcast_block, broadcast_transaction};
use crate::network::consensus::find_longer_chain;
use crate::network::{PeerRegistry, PeerTransport};
use crate::transaction::Transaction;

/// Proof searches `mine` runs before giving up on a tip that keeps moving.
pub const MAX_MINE_ATTEMPTS: usize = 3;

/// One ledger participant: its chain, pending pool, known peers and the
/// transport used to reach them.
///
/// Ledger writes happen under a short write lock; proof search and peer I/O
/// run with no lock held, so readers always see a complete chain.
pub struct Node {
    id: String,
    ledger: RwLock<Ledger>,
    peers: RwLock<PeerRegistry>,
    transport: Arc<dyn PeerTransport>,
}

impl Node {
    pub fn new(transport: Arc<dyn PeerTransport>) -> Self {
        Self {
            id: Uuid::new_v4().simple().to_string(),
            ledger: RwLock::new(Ledger::new()),
            peers: RwLock::new(PeerRegistry::new()),
            transport,
        }
    }

    /// Random identifier assigned at startup.
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn chain(&self) -> Vec<Block> {
        self.ledger.read().chain().to_vec()
    }

    pub fn last_block(&self) -> Block {
        self.ledger.read().last_block().clone()
    }

    pub fn chain_len(&self) -> usize {
        self.ledger.read().len()
    }

    pub fn pending_transactions(&self) -> Vec<Transaction> {
        self.ledger.read().pool().iter().cloned().collect()
    }

    pub fn is_chain_valid(&self) -> bool {
        self.ledger.read().is_valid()
    }

    pub fn peers(&self) -> Vec<String> {
        self.peers.read().addresses()
    }

    /// Normalize and store every address; returns the full peer set.
    pub fn register_peers<I, S>(&self, raws: I) -> Result<Vec<String>>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut peers = self.peers.write();
        peers.register_all(raws)?;
        Ok(peers.addresses())
    }

    /// Mine a block from the pending pool, announce it, then reconcile
    /// with peers. Returns the block this node appended.
    ///
    /// The proof search runs on the blocking pool with no lock held. If the
    /// tip changes before the block is sealed, the search restarts on the
    /// new tip, at most `MAX_MINE_ATTEMPTS` times in total.
    pub async fn mine(&self) -> Result<Block> {
        self.mine_with(pow::solve).await
    }

    async fn mine_with<F>(&self, solve: F) -> Result<Block>
    where
        F: Fn(u64) -> u64 + Clone + Send + 'static,
    {
        let mut attempt = 1;
        let block = loop {
            let head = self.ledger.read().head();
            let last_proof = head.last_proof;
            let search = solve.clone();
            let proof = tokio::task::spawn_blocking(move || search(last_proof))
                .await
                .map_err(|e| NodeError::Task(e.to_string()))?;

            let sealed = self.ledger.write().seal_block(&head, proof);
            match sealed {
                Ok(block) => break block,
                Err(e @ NodeError::StaleHead { .. }) if attempt >= MAX_MINE_ATTEMPTS => {
                    warn!("chain head moved during {attempt} proof searches, giving up");
                    return Err(e);
                }
                Err(NodeError::StaleHead { .. }) => {
                    warn!("chain head moved during proof search {attempt}, mining again");
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        };

        let peers = self.peers();
        broadcast_block(self.transport.as_ref(), &peers, &block).await;
        self.resolve().await;
        Ok(block)
    }

    /// Queue a transaction and, unless it was relayed by a peer, pass it on
    /// to every peer. Returns the index of the block expected to carry it.
    pub async fn submit_transaction(&self, tx: Transaction, relayed: bool) -> u64 {
        let position = self.ledger.write().add_transaction(tx.clone());
        info!(
            "tx {} -> {} ({}) queued for block #{}",
            tx.sender, tx.recipient, tx.amount, position
        );

        if !relayed {
            let peers = self.peers();
            broadcast_transaction(self.transport.as_ref(), &peers, &tx).await;
        }
        position
    }

    /// Append a peer's block without checking it, then reconcile. Returns
    /// whether reconciliation replaced the chain.
    pub async fn append_external_block(&self, block: Block) -> bool {
        self.ledger.write().append_block(block);
        self.resolve().await
    }

    /// Adopt the longest valid chain among peers if it beats ours.
    /// Returns true iff the local chain was replaced.
    pub async fn resolve(&self) -> bool {
        let peers = self.peers();
        let local_len = self.chain_len();

        let Some(winner) = find_longer_chain(self.transport.as_ref(), &peers, local_len).await
        else {
            return false;
        };

        let length = winner.length;
        let replaced = self.ledger.write().replace_if_longer(winner.chain);
        if replaced {
            info!("chain replaced by a longer valid chain (length {length})");
        } else {
            info!("local chain grew while resolving; keeping it");
        }
        replaced
    }
}
