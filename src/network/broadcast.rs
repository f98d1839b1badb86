use futures::future::join_all;
use log::{debug, warn};

use super::transport::PeerTransport;
use crate::blockchain::Block;
use crate::transaction::Transaction;

/// Relay a transaction to every peer concurrently. Failures are logged and
/// dropped; returns how many peers accepted it.
pub async fn broadcast_transaction(
    transport: &dyn PeerTransport,
    peers: &[String],
    tx: &Transaction,
) -> usize {
    let results = join_all(peers.iter().map(|peer| async move {
        (peer, transport.send_transaction(peer, tx).await)
    }))
    .await;

    let mut delivered = 0;
    for (peer, result) in results {
        match result {
            Ok(()) => delivered += 1,
            Err(e) => warn!("broadcast tx to {peer} failed: {e}"),
        }
    }
    debug!("tx relayed to {}/{} peers", delivered, peers.len());
    delivered
}

/// Announce a block to every peer concurrently. Failures are logged and
/// dropped; returns how many peers accepted it.
pub async fn broadcast_block(
    transport: &dyn PeerTransport,
    peers: &[String],
    block: &Block,
) -> usize {
    let results = join_all(
        peers
            .iter()
            .map(|peer| async move { (peer, transport.send_block(peer, block).await) }),
    )
    .await;

    let mut delivered = 0;
    for (peer, result) in results {
        match result {
            Ok(()) => delivered += 1,
            Err(e) => warn!("broadcast block #{} to {peer} failed: {e}", block.index),
        }
    }
    debug!(
        "block #{} announced to {}/{} peers",
        block.index,
        delivered,
        peers.len()
    );
    delivered
}
