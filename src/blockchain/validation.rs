use log::debug;

use super::Block;
use super::pow::valid_proof;

/// Validate a candidate chain: every block must link to the hash of its
/// predecessor and carry a proof that solves the predecessor's puzzle.
///
/// The first block is taken as given; an empty chain is never valid.
pub fn is_valid_chain(chain: &[Block]) -> bool {
    if chain.is_empty() {
        return false;
    }

    for pair in chain.windows(2) {
        let (prev, current) = (&pair[0], &pair[1]);

        // Check linkage
        let expected = prev.hash();
        if current.previous_hash != expected {
            debug!(
                "chain invalid at block #{}: previous_hash {} != {}",
                current.index, current.previous_hash, expected
            );
            return false;
        }

        // Check proof of work
        if !valid_proof(prev.proof, current.proof) {
            debug!(
                "chain invalid at block #{}: proof {} does not follow {}",
                current.index, current.proof, prev.proof
            );
            return false;
        }
    }

    true
}
