pub mod broadcast;
pub mod consensus;
pub mod peers;
pub mod transport;

#[cfg(test)]
pub(crate) mod testing;

pub use peers::{PeerRegistry, normalize_address};
pub use transport::{ChainSnapshot, HttpTransport, PeerTransport, RELAY_HEADER};
