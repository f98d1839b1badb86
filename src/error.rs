use thiserror::Error;

/// Errors raised by the ledger engine and its peer plumbing.
#[derive(Debug, Error)]
pub enum NodeError {
    /// A required field was absent from caller input.
    #[error("missing required field `{0}`")]
    MissingField(&'static str),

    #[error("invalid peer address: {0:?}")]
    InvalidPeerAddress(String),

    /// The peer could not be reached or answered with a non-success status.
    #[error("peer {peer} request failed: {reason}")]
    Peer { peer: String, reason: String },

    /// The peer answered, but not with a usable `{length, chain}` body.
    #[error("peer {peer} sent an unusable response: {reason}")]
    UnusableResponse { peer: String, reason: String },

    /// The chain head moved between solving a proof and sealing the block.
    #[error("chain head moved while mining (expected {expected}, found {found})")]
    StaleHead { expected: String, found: String },

    #[error("background task failed: {0}")]
    Task(String),

    #[error("http client setup failed: {0}")]
    Client(#[from] reqwest::Error),
}

impl NodeError {
    pub fn peer(peer: &str, reason: impl ToString) -> Self {
        NodeError::Peer {
            peer: peer.to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn unusable(peer: &str, reason: impl ToString) -> Self {
        NodeError::UnusableResponse {
            peer: peer.to_string(),
            reason: reason.to_string(),
        }
    }

    /// True for failures caused by the caller's input rather than the node.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            NodeError::MissingField(_) | NodeError::InvalidPeerAddress(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, NodeError>;
