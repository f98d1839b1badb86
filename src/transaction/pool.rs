use super::model::Transaction;

/// Ordered buffer of transactions not yet committed to a block.
#[derive(Debug, Default, Clone)]
pub struct TransactionPool {
    pending: Vec<Transaction>,
}

impl TransactionPool {
    pub fn new() -> Self {
        Self {
            pending: Vec::new(),
        }
    }

    /// Queue a transaction. `chain_len` is the current chain length; the
    /// returned value is the index of the block expected to carry it.
    pub fn add(&mut self, tx: Transaction, chain_len: usize) -> u64 {
        self.pending.push(tx);
        chain_len as u64 + 1
    }

    /// Take everything queued so far, leaving the pool empty.
    pub fn drain(&mut self) -> Vec<Transaction> {
        std::mem::take(&mut self.pending)
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Transaction> {
        self.pending.iter()
    }
}
