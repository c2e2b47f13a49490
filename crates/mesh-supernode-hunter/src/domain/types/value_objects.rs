//! Value Objects for Supernode Discovery

use std::time::Duration;

use super::errors::InvalidConfig;

/// Tuning for the supernode hunter.
///
/// The pool bounds are flush-on-overflow limits, not LRU sizes: reaching the
/// limit clears the whole pool before the next insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HunterConfig {
    /// Period of the discovery cycle in milliseconds (default: 3000)
    pub cycle_ms: u64,
    /// How long the correlator waits for a reply (default: 10000)
    pub query_timeout_ms: u64,
    /// Capacity of the discovered-nodes pool (default: 64)
    pub max_discovered_nodes: usize,
    /// Capacity of the supernode candidate pool (default: 8)
    pub max_candidates: usize,
}

impl Default for HunterConfig {
    fn default() -> Self {
        Self {
            cycle_ms: 3000,
            query_timeout_ms: 10_000,
            max_discovered_nodes: 64,
            max_candidates: 8,
        }
    }
}

impl HunterConfig {
    /// Create a config suitable for testing (small pools, fast cycle)
    pub fn for_testing() -> Self {
        Self {
            cycle_ms: 100,
            query_timeout_ms: 50,
            max_discovered_nodes: 4,
            max_candidates: 2,
        }
    }

    /// Cycle period as a `Duration`.
    pub fn cycle_period(&self) -> Duration {
        Duration::from_millis(self.cycle_ms)
    }

    /// Query timeout as a `Duration`.
    pub fn query_timeout(&self) -> Duration {
        Duration::from_millis(self.query_timeout_ms)
    }

    /// Check that every period, timeout and pool bound is non-zero.
    ///
    /// # Errors
    ///
    /// `InvalidConfig::Zero` naming the first offending field.
    pub fn validate(&self) -> Result<(), InvalidConfig> {
        let fields = [
            ("cycle_ms", self.cycle_ms == 0),
            ("query_timeout_ms", self.query_timeout_ms == 0),
            ("max_discovered_nodes", self.max_discovered_nodes == 0),
            ("max_candidates", self.max_candidates == 0),
        ];
        match fields.iter().find(|(_, zero)| *zero) {
            Some((name, _)) => Err(InvalidConfig::Zero(*name)),
            None => Ok(()),
        }
    }
}

/// Snapshot of hunter activity and pool sizes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HunterStats {
    /// Cycles run, including ones that did nothing
    pub cycles: u64,
    /// Queries handed to the correlator
    pub queries_issued: u64,
    /// Replies received from a responder
    pub replies: u64,
    /// Queries that completed without a responder
    pub timeouts: u64,
    /// Replies discarded as malformed or remote errors
    pub malformed_replies: u64,
    /// Current size of the discovered-nodes pool
    pub discovered_nodes: usize,
    /// Current size of the candidate pool
    pub candidates: usize,
    /// Current number of confirmed supernodes
    pub confirmed: usize,
    /// Number of authorized supernodes
    pub authorized: usize,
}
