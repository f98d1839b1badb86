use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::blockchain::Block;
use crate::error::{NodeError, Result};
use crate::transaction::Transaction;

/// Header marking a transaction as relayed by another node rather than
/// submitted by a client. Relayed transactions are not broadcast again.
pub const RELAY_HEADER: &str = "x-ledger-relay";

/// A peer's chain as reported over the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChainSnapshot {
    pub chain: Vec<Block>,
    pub length: usize,
}

/// Raw `/chain` body; both fields must be present for it to be usable.
#[derive(Debug, Deserialize)]
pub struct ChainResponseBody {
    pub chain: Option<Vec<Block>>,
    pub length: Option<usize>,
}

impl ChainResponseBody {
    /// Check the body carries both fields and a non-empty chain.
    pub fn into_snapshot(self, peer: &str) -> Result<ChainSnapshot> {
        let chain = self
            .chain
            .ok_or_else(|| NodeError::unusable(peer, "missing `chain`"))?;
        let length = self
            .length
            .ok_or_else(|| NodeError::unusable(peer, "missing `length`"))?;

        if chain.is_empty() {
            return Err(NodeError::unusable(peer, "empty chain"));
        }
        Ok(ChainSnapshot { chain, length })
    }
}

/// Outbound calls a node makes to its peers.
#[async_trait]
pub trait PeerTransport: Send + Sync {
    /// Fetch the peer's full chain.
    async fn fetch_chain(&self, peer: &str) -> Result<ChainSnapshot>;

    /// Relay a pending transaction.
    async fn send_transaction(&self, peer: &str, tx: &Transaction) -> Result<()>;

    /// Announce a freshly mined block.
    async fn send_block(&self, peer: &str, block: &Block) -> Result<()>;
}

/// JSON-over-HTTP transport talking to other instances of this node.
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    /// Every call made through this transport is bounded by `timeout`.
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .connect_timeout(timeout)
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl PeerTransport for HttpTransport {
    async fn fetch_chain(&self, peer: &str) -> Result<ChainSnapshot> {
        let url = format!("{peer}/chain");
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| NodeError::peer(peer, e))?
            .error_for_status()
            .map_err(|e| NodeError::peer(peer, e))?;

        let body: ChainResponseBody = response
            .json()
            .await
            .map_err(|e| NodeError::unusable(peer, e))?;
        body.into_snapshot(peer)
    }

    async fn send_transaction(&self, peer: &str, tx: &Transaction) -> Result<()> {
        let url = format!("{peer}/transactions/new");
        self.client
            .post(&url)
            .header(RELAY_HEADER, "1")
            .json(tx)
            .send()
            .await
            .map_err(|e| NodeError::peer(peer, e))?
            .error_for_status()
            .map_err(|e| NodeError::peer(peer, e))?;
        Ok(())
    }

    async fn send_block(&self, peer: &str, block: &Block) -> Result<()> {
        let url = format!("{peer}/blocks/new");
        self.client
            .post(&url)
            .json(block)
            .send()
            .await
            .map_err(|e| NodeError::peer(peer, e))?
            .error_for_status()
            .map_err(|e| NodeError::peer(peer, e))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::ChainResponseBody;
    use crate::blockchain::Block;
    use crate::error::NodeError;

    fn body(json: &str) -> ChainResponseBody {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn body_with_both_fields_is_usable() {
        let genesis = Block::genesis();
        let json = serde_json::json!({ "chain": [genesis.clone()], "length": 1 }).to_string();
        let snapshot = body(&json).into_snapshot("http://a").unwrap();
        assert_eq!(snapshot.length, 1);
        assert_eq!(snapshot.chain, vec![genesis]);
    }

    #[test]
    fn missing_fields_are_unusable() {
        let err = body(r#"{"length": 3}"#).into_snapshot("http://a").unwrap_err();
        assert!(matches!(err, NodeError::UnusableResponse { .. }));

        let genesis = serde_json::to_string(&Block::genesis()).unwrap();
        let err = body(&format!(r#"{{"chain": [{genesis}]}}"#))
            .into_snapshot("http://a")
            .unwrap_err();
        assert!(matches!(err, NodeError::UnusableResponse { .. }));
    }

    #[test]
    fn empty_chain_is_unusable() {
        assert!(body(r#"{"chain": [], "length": 0}"#)
            .into_snapshot("http://a")
            .is_err());
    }
}
