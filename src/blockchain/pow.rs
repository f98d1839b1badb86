use super::DIFFICULTY;
use super::block::sha256_hex;

/// Check whether `proof` solves the puzzle posed by `last_proof`: the hex
/// SHA-256 of the two numbers written back to back must start with
/// `DIFFICULTY` zeros.
pub fn valid_proof(last_proof: u64, proof: u64) -> bool {
    let guess = format!("{last_proof}{proof}");
    sha256_hex(guess.as_bytes())
        .chars()
        .take(DIFFICULTY)
        .all(|c| c == '0')
}

/// Find the smallest proof that satisfies `valid_proof(last_proof, _)`.
///
/// Exhaustive search with no upper bound; blocks the calling thread until
/// a solution is found. Run it off the async executor.
pub fn solve(last_proof: u64) -> u64 {
    let mut proof = 0u64;
    while !valid_proof(last_proof, proof) {
        proof = proof.wrapping_add(1);
    }
    proof
}
