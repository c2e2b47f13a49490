//! # Driving Ports (Inbound API)
//!
//! The operator-facing registry API and the completion entry point used by
//! the query correlator.

use std::net::{IpAddr, Ipv6Addr};

use crate::domain::{AddrSet, HunterStats, QueryCompletion, ReplyError, ReplyOutcome, SupernodeError};

/// Operator and host API of the supernode hunter.
///
/// # Example
///
/// ```rust,ignore
/// use mesh_supernode_hunter::ports::SupernodeHunterApi;
///
/// fn authorize<T: SupernodeHunterApi>(api: &mut T) {
///     api.add_supernode("fc00::1".parse().unwrap()).unwrap();
///     println!("{} authorized", api.list_supernodes().len());
/// }
/// ```
pub trait SupernodeHunterApi {
    /// Authorize a supernode by raw address.
    ///
    /// # Errors
    ///
    /// - `InvalidFamily` for anything but IPv6
    /// - `AlreadyExists` if the address is already authorized
    fn add_supernode(&mut self, addr: IpAddr) -> Result<(), SupernodeError>;

    /// Revoke a supernode. Discovery state is left alone.
    ///
    /// # Errors
    ///
    /// - `NotFound` if the address is not authorized (IPv4 never is)
    fn remove_supernode(&mut self, addr: IpAddr) -> Result<(), SupernodeError>;

    /// Snapshot of authorized supernodes, in insertion order.
    fn list_supernodes(&self) -> Vec<Ipv6Addr>;

    /// Snapshot of supernodes whose path has been confirmed.
    fn confirmed_supernodes(&self) -> AddrSet;

    /// Activity counters and pool sizes.
    fn stats(&self) -> HunterStats;
}

/// Receives finished queries from the correlator.
///
/// Called once per issued query, with either the reply or a timeout.
pub trait CompletionHandler {
    /// Fold a completion into discovery state.
    ///
    /// Errors are informational: the engine has already logged and
    /// discarded the reply.
    fn on_completion(&mut self, completion: QueryCompletion) -> Result<ReplyOutcome, ReplyError>;
}
