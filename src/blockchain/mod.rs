pub mod block;
pub mod ledger;
pub mod pow;
pub mod validation;

pub use block::Block;
pub use ledger::{Ledger, MiningHead};
pub use validation::is_valid_chain;

/// Proof-of-Work difficulty (number of leading zero hex characters).
pub const DIFFICULTY: usize = 4;

/// Proof carried by the genesis block.
pub const GENESIS_PROOF: u64 = 100;

/// Sentinel `previous_hash` of the genesis block.
pub const GENESIS_PREVIOUS_HASH: &str = "1";
