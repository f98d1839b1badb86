use log::{debug, info};

use super::{Block, is_valid_chain};
use crate::error::{NodeError, Result};
use crate::transaction::{Transaction, TransactionPool};

/// What a miner needs to know about the chain tip before searching for a proof.
#[derive(Debug, Clone, PartialEq)]
pub struct MiningHead {
    pub last_proof: u64,
    pub last_hash: String,
}

/// In-memory chain plus the pool of transactions waiting for the next block.
#[derive(Debug)]
pub struct Ledger {
    chain: Vec<Block>,
    pool: TransactionPool,
}

impl Default for Ledger {
    fn default() -> Self {
        Self::new()
    }
}

impl Ledger {
    /// Initialize a new ledger holding only the genesis block.
    pub fn new() -> Self {
        Self {
            chain: vec![Block::genesis()],
            pool: TransactionPool::new(),
        }
    }

    pub fn chain(&self) -> &[Block] {
        &self.chain
    }

    /// Return the last block in the chain.
    pub fn last_block(&self) -> &Block {
        self.chain
            .last()
            .expect("ledger always holds at least the genesis block")
    }

    pub fn len(&self) -> usize {
        self.chain.len()
    }

    pub fn pool(&self) -> &TransactionPool {
        &self.pool
    }

    /// Snapshot of the tip a proof has to be solved against.
    pub fn head(&self) -> MiningHead {
        let last = self.last_block();
        MiningHead {
            last_proof: last.proof,
            last_hash: last.hash(),
        }
    }

    /// Queue a transaction; returns the index of the block expected to hold it.
    pub fn add_transaction(&mut self, tx: Transaction) -> u64 {
        let position = self.pool.add(tx, self.chain.len());
        debug!(
            "pool: queued tx for block #{} (pending={})",
            position,
            self.pool.len()
        );
        position
    }

    /// Append a block carrying every pending transaction and `proof`.
    ///
    /// Fails without touching the ledger if the tip is no longer the one the
    /// proof was solved against.
    pub fn seal_block(&mut self, head: &MiningHead, proof: u64) -> Result<Block> {
        let current = self.head();
        if current.last_hash != head.last_hash {
            return Err(NodeError::StaleHead {
                expected: head.last_hash.clone(),
                found: current.last_hash,
            });
        }

        let transactions = self.pool.drain();
        let block = Block::new(self.chain.len(), transactions, proof, current.last_hash);
        self.chain.push(block.clone());
        info!(
            "sealed block #{} (proof={}, txs={})",
            block.index,
            block.proof,
            block.transactions.len()
        );
        Ok(block)
    }

    /// Append a block received from a peer as-is. Linkage is not checked
    /// here; the following consensus pass is what discards bad data.
    pub fn append_block(&mut self, block: Block) {
        debug!(
            "appending external block #{} on top of height {}",
            block.index,
            self.chain.len()
        );
        self.chain.push(block);
    }

    /// Swap in `candidate` when it is strictly longer than the local chain.
    pub fn replace_if_longer(&mut self, candidate: Vec<Block>) -> bool {
        if candidate.len() <= self.chain.len() {
            return false;
        }
        self.chain = candidate;
        true
    }

    /// Validate the local chain.
    pub fn is_valid(&self) -> bool {
        is_valid_chain(&self.chain)
    }
}

#[cfg(test)]
mod tests {
    use super::Ledger;
    use crate::blockchain::{Block, pow};
    use crate::error::NodeError;
    use crate::transaction::Transaction;

    fn mine(ledger: &mut Ledger) -> Block {
        let head = ledger.head();
        let proof = pow::solve(head.last_proof);
        ledger.seal_block(&head, proof).unwrap()
    }

    #[test]
    fn starts_with_genesis() {
        let ledger = Ledger::new();
        assert_eq!(ledger.len(), 1);
        assert_eq!(ledger.last_block().previous_hash, "1");
        assert!(ledger.is_valid());
    }

    #[test]
    fn submit_then_mine_commits_transaction() {
        let mut ledger = Ledger::new();
        let position = ledger.add_transaction(Transaction::new("A", "B", 10.0));
        assert_eq!(position, 2);
        assert_eq!(ledger.pool().len(), 1);

        let block = mine(&mut ledger);
        assert_eq!(ledger.len(), 2);
        assert_eq!(block.index, 2);
        assert_eq!(block.transactions, vec![Transaction::new("A", "B", 10.0)]);
        assert!(ledger.pool().is_empty());
        assert!(ledger.is_valid());
    }

    #[test]
    fn mining_with_empty_pool_yields_empty_block() {
        let mut ledger = Ledger::new();
        let block = mine(&mut ledger);
        assert!(block.transactions.is_empty());
        assert!(ledger.pool().is_empty());
    }

    #[test]
    fn repeated_mining_keeps_chain_valid() {
        let mut ledger = Ledger::new();
        for i in 0..3 {
            ledger.add_transaction(Transaction::new("A", "B", i as f64));
            mine(&mut ledger);
        }
        assert_eq!(ledger.len(), 4);
        assert!(ledger.is_valid());
        let indexes: Vec<u64> = ledger.chain().iter().map(|b| b.index).collect();
        assert_eq!(indexes, vec![1, 2, 3, 4]);
    }

    #[test]
    fn seal_rejects_stale_head() {
        let mut ledger = Ledger::new();
        let stale = ledger.head();
        mine(&mut ledger);
        ledger.add_transaction(Transaction::new("A", "B", 1.0));

        let err = ledger.seal_block(&stale, 35293).unwrap_err();
        assert!(matches!(err, NodeError::StaleHead { .. }));
        assert_eq!(ledger.len(), 2);
        assert_eq!(ledger.pool().len(), 1);
    }

    #[test]
    fn external_block_is_appended_unchecked() {
        let mut ledger = Ledger::new();
        ledger.append_block(Block::new(1, vec![], 0, "bogus".into()));
        assert_eq!(ledger.len(), 2);
        assert!(!ledger.is_valid());
    }

    #[test]
    fn replace_requires_strictly_longer() {
        let mut ledger = Ledger::new();
        let same = ledger.chain().to_vec();
        assert!(!ledger.replace_if_longer(same));

        let mut other = Ledger::new();
        mine(&mut other);
        assert!(ledger.replace_if_longer(other.chain().to_vec()));
        assert_eq!(ledger.chain(), other.chain());
    }
}
