use futures::future::join_all;
use log::{debug, info, warn};

use super::transport::{ChainSnapshot, PeerTransport};
use crate::blockchain::is_valid_chain;
use crate::error::Result;

/// Query every peer concurrently, one request each, and return the replies
/// in peer order.
pub async fn fetch_chains(
    transport: &dyn PeerTransport,
    peers: &[String],
) -> Vec<(String, Result<ChainSnapshot>)> {
    join_all(peers.iter().map(|peer| async move {
        debug!("fetching chain from {peer}");
        (peer.clone(), transport.fetch_chain(peer).await)
    }))
    .await
}

/// Longest-valid-chain rule: pick the reply whose length strictly exceeds
/// both `local_len` and every earlier winner, and that validates.
/// Failed or invalid replies are skipped.
pub fn select_longest(
    replies: Vec<(String, Result<ChainSnapshot>)>,
    local_len: usize,
) -> Option<ChainSnapshot> {
    let mut best: Option<ChainSnapshot> = None;
    let mut max_length = local_len;

    for (peer, reply) in replies {
        let snapshot = match reply {
            Ok(snapshot) => snapshot,
            Err(e) => {
                warn!("skipping peer {peer}: {e}");
                continue;
            }
        };

        if snapshot.length != snapshot.chain.len() {
            warn!(
                "skipping peer {peer}: reported length {} but sent {} blocks",
                snapshot.length,
                snapshot.chain.len()
            );
            continue;
        }
        if snapshot.length <= max_length {
            debug!(
                "peer {peer} chain length {} does not beat {max_length}",
                snapshot.length
            );
            continue;
        }
        if !is_valid_chain(&snapshot.chain) {
            debug!("peer {peer} sent an invalid chain of length {}", snapshot.length);
            continue;
        }

        max_length = snapshot.length;
        best = Some(snapshot);
    }

    best
}

/// Ask all peers for their chains and return the winning one, if any peer
/// has a valid chain longer than `local_len`.
pub async fn find_longer_chain(
    transport: &dyn PeerTransport,
    peers: &[String],
    local_len: usize,
) -> Option<ChainSnapshot> {
    let replies = fetch_chains(transport, peers).await;
    let winner = select_longest(replies, local_len);
    match &winner {
        Some(snapshot) => info!(
            "found longer valid chain (length {} > {local_len})",
            snapshot.length
        ),
        None => info!("no longer valid chain among {} peers", peers.len()),
    }
    winner
}
