use std::collections::BTreeSet;

use log::info;

use crate::error::{NodeError, Result};

/// Normalize a peer address: trim whitespace, drop trailing slashes and
/// default the scheme to `http://`.
pub fn normalize_address(raw: &str) -> Result<String> {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        return Err(NodeError::InvalidPeerAddress(raw.to_string()));
    }
    if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        Ok(trimmed.to_string())
    } else {
        Ok(format!("http://{trimmed}"))
    }
}

/// Known peer base addresses.
#[derive(Debug, Default, Clone)]
pub struct PeerRegistry {
    nodes: BTreeSet<String>,
}

impl PeerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Normalize and add `raw`. Returns the stored form.
    pub fn register(&mut self, raw: &str) -> Result<String> {
        let address = normalize_address(raw)?;
        if self.nodes.insert(address.clone()) {
            info!("peer registered: {address}");
        }
        Ok(address)
    }

    /// Register every address, or none of them if any is malformed.
    pub fn register_all<I, S>(&mut self, raws: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let addresses = raws
            .into_iter()
            .map(|raw| normalize_address(raw.as_ref()))
            .collect::<Result<Vec<_>>>()?;
        for address in addresses {
            if self.nodes.insert(address.clone()) {
                info!("peer registered: {address}");
            }
        }
        Ok(())
    }

    pub fn contains(&self, address: &str) -> bool {
        self.nodes.contains(address)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Sorted list of addresses.
    pub fn addresses(&self) -> Vec<String> {
        self.nodes.iter().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::{PeerRegistry, normalize_address};

    #[test]
    fn normalizes_scheme_and_trailing_slash() {
        assert_eq!(normalize_address("example.com").unwrap(), "http://example.com");
        assert_eq!(
            normalize_address("  http://other.com/ ").unwrap(),
            "http://other.com"
        );
        assert_eq!(
            normalize_address("https://secure.io//").unwrap(),
            "https://secure.io"
        );
        assert_eq!(
            normalize_address("127.0.0.1:5001").unwrap(),
            "http://127.0.0.1:5001"
        );
    }

    #[test]
    fn blank_address_is_rejected() {
        assert!(normalize_address("   ").is_err());
        assert!(normalize_address("/").is_err());
    }

    #[test]
    fn registry_stores_normalized_set() {
        let mut peers = PeerRegistry::new();
        peers
            .register_all(["example.com", "http://other.com/", "example.com/"])
            .unwrap();
        assert_eq!(
            peers.addresses(),
            vec!["http://example.com".to_string(), "http://other.com".to_string()]
        );
        assert!(peers.contains("http://example.com"));
    }

    #[test]
    fn malformed_entry_rejects_the_whole_batch() {
        let mut peers = PeerRegistry::new();
        assert!(peers.register_all(["good.com", "  ", "later.com"]).is_err());
        assert!(peers.is_empty());

        peers.register("kept.com").unwrap();
        assert!(peers.register_all(["new.com", ""]).is_err());
        assert_eq!(peers.addresses(), vec!["http://kept.com".to_string()]);
    }
}
