//! A single node of a proof-of-work ledger: chain, pending pool, mining,
//! longest-valid-chain consensus and the HTTP surface peers talk to.

pub mod api;
pub mod blockchain;
pub mod config;
pub mod error;
pub mod network;
pub mod node;
pub mod transaction;

pub use error::{NodeError, Result};
pub use node::Node;
