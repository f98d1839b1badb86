use std::time::Duration;

use clap::Parser;

/// Runtime settings for a node; every flag can also come from the
/// environment (or a `.env` file).
#[derive(Debug, Clone, Parser)]
#[command(name = "ledger-node", about = "Proof-of-work ledger node")]
pub struct NodeConfig {
    /// Interface to bind the HTTP API on
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port to listen on
    #[arg(short, long, env = "PORT", default_value_t = 5000)]
    pub port: u16,

    /// Timeout applied to every call made to a peer
    #[arg(long, env = "PEER_TIMEOUT_SECS", default_value_t = 5)]
    pub peer_timeout_secs: u64,

    /// Peers to register at startup, comma separated
    #[arg(long, env = "PEERS", value_delimiter = ',')]
    pub peers: Vec<String>,
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
            peer_timeout_secs: 5,
            peers: Vec::new(),
        }
    }
}

impl NodeConfig {
    pub fn peer_timeout(&self) -> Duration {
        Duration::from_secs(self.peer_timeout_secs)
    }
}
