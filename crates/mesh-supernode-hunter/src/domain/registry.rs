//! Operator-authorized supernodes.
//!
//! The registry is independent of discovery state: it only records which
//! raw addresses we are allowed to search for and confirm as supernodes.

use std::net::{IpAddr, Ipv6Addr};

use tracing::info;

use crate::domain::SupernodeError;

/// Durable list of supernode addresses the operator has authorized.
///
/// # Invariant
///
/// No two entries share a raw address.
#[derive(Debug, Clone, Default)]
pub struct AuthorizedSupernodeRegistry {
    entries: Vec<Ipv6Addr>,
}

impl AuthorizedSupernodeRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Authorize a supernode.
    ///
    /// # Errors
    ///
    /// - `InvalidFamily` if `addr` is not IPv6
    /// - `AlreadyExists` if the raw address is already authorized
    pub fn add(&mut self, addr: IpAddr) -> Result<(), SupernodeError> {
        let IpAddr::V6(ip) = addr else {
            return Err(SupernodeError::InvalidFamily);
        };
        if self.index_of(&ip).is_some() {
            return Err(SupernodeError::AlreadyExists);
        }
        self.entries.push(ip);
        info!(supernode = %ip, "Supernode authorized");
        Ok(())
    }

    /// Revoke a supernode.
    ///
    /// # Errors
    ///
    /// - `NotFound` if no entry has this raw address
    pub fn remove(&mut self, addr: IpAddr) -> Result<(), SupernodeError> {
        let idx = match addr {
            IpAddr::V6(ip) => self.index_of(&ip),
            IpAddr::V4(_) => None,
        }
        .ok_or(SupernodeError::NotFound)?;

        let removed = self.entries.remove(idx);
        info!(supernode = %removed, "Supernode authorization removed");
        Ok(())
    }

    /// Snapshot of all authorized addresses in insertion order.
    pub fn list(&self) -> Vec<Ipv6Addr> {
        self.entries.clone()
    }

    /// Entry at `index`, if any.
    pub fn get(&self, index: usize) -> Option<&Ipv6Addr> {
        self.entries.get(index)
    }

    /// Number of authorized supernodes.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if nothing is authorized.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn index_of(&self, ip: &Ipv6Addr) -> Option<usize> {
        self.entries.iter().position(|e| e.octets() == ip.octets())
    }
}
