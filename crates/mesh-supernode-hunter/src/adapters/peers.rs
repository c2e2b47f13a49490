//! Peer list shared between the link layer and the hunter.

use std::sync::Arc;

use parking_lot::RwLock;

use crate::domain::{AddrSet, Address};
use crate::ports::PeerSource;

/// Cloneable handle to a peer list.
///
/// The link layer mutates it as peers come and go; the hunter takes a
/// snapshot each cycle.
#[derive(Debug, Clone, Default)]
pub struct SharedPeers {
    inner: Arc<RwLock<AddrSet>>,
}

impl SharedPeers {
    /// Create an empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a peer. Returns `false` if it was already listed.
    pub fn add(&self, peer: Address) -> bool {
        self.inner.write().add(peer)
    }

    /// Drop a peer. Returns `false` if it was not listed.
    pub fn remove(&self, peer: &Address) -> bool {
        self.inner.write().remove(peer)
    }

    /// Replace the whole list.
    pub fn replace(&self, peers: AddrSet) {
        *self.inner.write() = peers;
    }

    /// Number of peers.
    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    /// True when no peer is listed.
    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }
}

impl PeerSource for SharedPeers {
    fn peers(&self) -> AddrSet {
        self.inner.read().clone()
    }
}
