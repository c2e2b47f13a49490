//! # Driven Ports (Outbound SPI)
//!
//! These are the interfaces the hunter **requires** the host to implement.

use std::net::IpAddr;

use crate::domain::{AddrSet, HunterConfig, OutboundQuery};

/// Sends queries and later reports each one's outcome.
///
/// `issue` must not block. The implementation owns the query context until
/// it hands a [`QueryCompletion`](crate::domain::QueryCompletion) back to the
/// service, exactly once, either with the reply or with a timeout.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync`; the driver issues queries from its
/// own task.
pub trait QueryCorrelator: Send + Sync {
    /// Send `query` to `query.target()`.
    fn issue(&self, query: OutboundQuery);
}

/// Read-only view of our directly connected peers.
///
/// Owned by the link layer; the hunter only takes snapshots.
pub trait PeerSource: Send + Sync {
    /// Current peers, in a stable order between calls when nothing changed.
    fn peers(&self) -> AddrSet;
}

/// Abstract interface for configuration loading.
///
/// Allows different configuration sources (file, static, etc.)
pub trait ConfigProvider: Send + Sync {
    /// Timing and pool bounds.
    fn get_hunter_config(&self) -> HunterConfig;

    /// Supernodes to authorize at startup.
    fn get_authorized_supernodes(&self) -> Vec<IpAddr>;
}
