//! Order-preserving address pool.
//!
//! Backs the peer list, the discovered-nodes pool, the candidate pool and
//! the confirmed supernodes. Capacity is not enforced here; owners decide
//! when to [`AddrSet::flush`].

use crate::domain::Address;

/// Insertion-ordered set of overlay addresses.
///
/// Membership is by full identity ([`Address::is_same`]): the same key seen
/// through a different path is a distinct entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddrSet {
    entries: Vec<Address>,
}

impl AddrSet {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `addr` at the end unless an identical entry exists.
    ///
    /// Returns `true` if the address was inserted.
    pub fn add(&mut self, addr: Address) -> bool {
        if self.index_of(&addr).is_some() {
            return false;
        }
        self.entries.push(addr);
        true
    }

    /// Entry at `index`, in insertion order.
    pub fn get(&self, index: usize) -> Option<&Address> {
        self.entries.get(index)
    }

    /// Most recently inserted entry.
    pub fn last(&self) -> Option<&Address> {
        self.entries.last()
    }

    /// Position of the entry identical to `addr`.
    pub fn index_of(&self, addr: &Address) -> Option<usize> {
        self.entries.iter().position(|a| a.is_same(addr))
    }

    /// Remove the entry identical to `addr`.
    pub fn remove(&mut self, addr: &Address) -> bool {
        match self.index_of(addr) {
            Some(idx) => {
                self.entries.remove(idx);
                true
            }
            None => false,
        }
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if the set has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop every entry.
    pub fn flush(&mut self) {
        self.entries.clear();
    }

    /// Iterate in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Address> {
        self.entries.iter()
    }

    /// Copy of the entries in insertion order.
    pub fn to_vec(&self) -> Vec<Address> {
        self.entries.clone()
    }
}

impl FromIterator<Address> for AddrSet {
    fn from_iter<I: IntoIterator<Item = Address>>(iter: I) -> Self {
        let mut set = AddrSet::new();
        for addr in iter {
            set.add(addr);
        }
        set
    }
}
