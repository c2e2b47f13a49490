//! Test utilities for supernode discovery.
//!
//! Deterministic fixtures and mock port implementations. Enable with the
//! `test-utils` feature flag.
//!
//! # Example
//!
//! ```rust,ignore
//! use mesh_supernode_hunter::test_utils::{overlay_addr, RecordingCorrelator};
//!
//! let peer = overlay_addr(0, 0x13);
//! assert_eq!(peer.ip6[0], 0xfc);
//!
//! let correlator = RecordingCorrelator::new();
//! assert!(correlator.issued().is_empty());
//! ```

use std::net::{IpAddr, Ipv6Addr};
use std::sync::OnceLock;

use parking_lot::Mutex;

use crate::domain::reply::serialize_node_list;
use crate::domain::services::{derive_ip6, format_label};
use crate::domain::{AddrSet, Address, Dict, OutboundQuery, PublicKey};
use crate::ports::{PeerSource, QueryCorrelator};

/// Number of precomputed overlay keys.
const FIXTURE_KEYS: usize = 64;

fn fixture_keys() -> &'static [PublicKey] {
    static KEYS: OnceLock<Vec<PublicKey>> = OnceLock::new();
    KEYS.get_or_init(|| {
        (0u32..)
            .map(|seed| {
                let mut bytes = [0u8; 32];
                bytes[..4].copy_from_slice(&seed.to_le_bytes());
                PublicKey::new(bytes)
            })
            .filter(|key| derive_ip6(key).is_some())
            .take(FIXTURE_KEYS)
            .collect()
    })
}

/// The `n`-th deterministic key that maps into `fc00::/8`.
///
/// # Panics
///
/// If `n` is not below the number of precomputed keys (64).
pub fn overlay_key(n: usize) -> PublicKey {
    fixture_keys()[n]
}

/// Address of the `n`-th fixture key, reached via `path`.
pub fn overlay_addr(n: usize, path: u64) -> Address {
    let key = overlay_key(n);
    match derive_ip6(&key) {
        Some(ip6) => Address::new(key, ip6, path),
        None => unreachable!("fixture keys are filtered for overlay addresses"),
    }
}

/// Raw address of the `n`-th fixture key, as a supernode registry entry.
pub fn overlay_ip(n: usize) -> IpAddr {
    IpAddr::V6(Ipv6Addr::from(overlay_addr(n, 1).ip6))
}

/// Reply carrying `nodes` as its node list.
pub fn nodes_reply(nodes: &[Address]) -> Dict {
    let mut reply = Dict::new();
    reply.put_bytes("n", serialize_node_list(nodes));
    reply
}

/// getRoute reply reporting `label`.
pub fn route_reply(label: u64) -> Dict {
    let mut reply = Dict::new();
    let mut raw = format_label(label).into_bytes();
    raw.push(0);
    reply.put_bytes("label", raw);
    reply
}

/// Correlator that records issued queries instead of sending them.
#[derive(Debug, Default)]
pub struct RecordingCorrelator {
    issued: Mutex<Vec<OutboundQuery>>,
}

impl RecordingCorrelator {
    /// Create an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queries issued so far, oldest first.
    pub fn issued(&self) -> Vec<OutboundQuery> {
        self.issued.lock().clone()
    }

    /// Remove and return the oldest recorded query.
    pub fn take_next(&self) -> Option<OutboundQuery> {
        let mut issued = self.issued.lock();
        (!issued.is_empty()).then(|| issued.remove(0))
    }
}

impl QueryCorrelator for RecordingCorrelator {
    fn issue(&self, query: OutboundQuery) {
        self.issued.lock().push(query);
    }
}

/// Peer source returning a fixed list.
#[derive(Debug, Clone, Default)]
pub struct StaticPeerSource {
    peers: AddrSet,
}

impl StaticPeerSource {
    /// Serve `peers` on every call.
    pub fn new(peers: impl IntoIterator<Item = Address>) -> Self {
        Self {
            peers: peers.into_iter().collect(),
        }
    }
}

impl PeerSource for StaticPeerSource {
    fn peers(&self) -> AddrSet {
        self.peers.clone()
    }
}
