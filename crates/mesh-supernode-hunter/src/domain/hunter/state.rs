//! Engine state and accessors.

use std::net::{IpAddr, Ipv6Addr};
use std::sync::atomic::{AtomicU64, Ordering};

use crate::domain::{
    AddrSet, Address, AuthorizedSupernodeRegistry, HunterConfig, HunterStats, SupernodeError,
    TraversalCursor,
};

/// Source of engine instance ids.
static NEXT_ENGINE_ID: AtomicU64 = AtomicU64::new(1);

/// Discovery engine owning every pool the hunter mutates.
///
/// # Pools
///
/// - `nodes`: addresses learned from getPeers replies, flushed when full
/// - `candidates`: findNode hits on an authorized supernode, not yet path-confirmed
/// - `confirmed`: supernodes whose path was confirmed by getRoute
///
/// `confirmed` is the hunter's result. Other components may read it through
/// [`SupernodeHunter::confirmed_supernodes`]; only the engine writes it.
#[derive(Debug)]
pub struct SupernodeHunter {
    /// Distinguishes completions of this engine from any earlier one
    pub(super) id: u64,
    pub(super) config: HunterConfig,
    /// Our own address (self-filtering, getRoute `src`)
    pub(super) my_address: Address,
    pub(super) registry: AuthorizedSupernodeRegistry,
    pub(super) nodes: AddrSet,
    pub(super) candidates: AddrSet,
    pub(super) confirmed: AddrSet,
    pub(super) cursor: TraversalCursor,
    pub(super) stats: HunterStats,
}

impl SupernodeHunter {
    /// Create an engine with empty pools.
    ///
    /// # Arguments
    ///
    /// * `my_address` - Our own overlay address
    /// * `config` - Pool bounds and timing
    pub fn new(my_address: Address, config: HunterConfig) -> Self {
        Self {
            id: NEXT_ENGINE_ID.fetch_add(1, Ordering::Relaxed),
            config,
            my_address,
            registry: AuthorizedSupernodeRegistry::new(),
            nodes: AddrSet::new(),
            candidates: AddrSet::new(),
            confirmed: AddrSet::new(),
            cursor: TraversalCursor::new(),
            stats: HunterStats::default(),
        }
    }

    /// Instance id stamped on every query this engine issues.
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Get the configuration
    pub fn config(&self) -> &HunterConfig {
        &self.config
    }

    /// Our own address.
    pub fn my_address(&self) -> &Address {
        &self.my_address
    }

    /// Authorize a supernode.
    pub fn add_supernode(&mut self, addr: IpAddr) -> Result<(), SupernodeError> {
        self.registry.add(addr)
    }

    /// Revoke a supernode.
    pub fn remove_supernode(&mut self, addr: IpAddr) -> Result<(), SupernodeError> {
        self.registry.remove(addr)
    }

    /// Authorized supernodes in insertion order.
    pub fn list_supernodes(&self) -> Vec<Ipv6Addr> {
        self.registry.list()
    }

    /// The authorized supernode registry.
    pub fn registry(&self) -> &AuthorizedSupernodeRegistry {
        &self.registry
    }

    /// Supernodes with a confirmed path. Read-only.
    pub fn confirmed_supernodes(&self) -> &AddrSet {
        &self.confirmed
    }

    /// Supernode candidates awaiting route confirmation.
    pub fn candidates(&self) -> &AddrSet {
        &self.candidates
    }

    /// Nodes learned through getPeers.
    pub fn discovered_nodes(&self) -> &AddrSet {
        &self.nodes
    }

    /// True once more than one supernode is confirmed; cycles become no-ops.
    pub fn is_satisfied(&self) -> bool {
        self.confirmed.len() > 1
    }

    /// Activity counters and pool sizes.
    pub fn stats(&self) -> HunterStats {
        HunterStats {
            discovered_nodes: self.nodes.len(),
            candidates: self.candidates.len(),
            confirmed: self.confirmed.len(),
            authorized: self.registry.len(),
            ..self.stats
        }
    }
}

/// Append to a flush-on-overflow pool: a full pool is cleared first.
///
/// Returns `true` if `addr` was inserted. A zero bound keeps the pool empty.
pub(super) fn add_bounded(pool: &mut AddrSet, addr: Address, max: usize) -> bool {
    if max == 0 {
        return false;
    }
    if pool.len() >= max {
        pool.flush();
    }
    pool.add(addr)
}
