//! Core Domain Entities for Supernode Discovery
//!
//! An overlay [`Address`] binds three things together: the node's public key,
//! the raw IPv6 address derived from that key, and the switch path (label)
//! through which we currently reach it.

use std::fmt;
use std::net::Ipv6Addr;
use std::str::FromStr;

use super::errors::AddressError;
use crate::domain::services::{derive_ip6, format_label};

/// Base32 alphabet used for the textual form of keys.
const BASE32_ALPHABET: &[u8; 32] = b"0123456789bcdfghjklmnpqrstuvwxyz";

/// Number of base32 characters needed to encode a 32-byte key.
const KEY_TEXT_LEN: usize = 52;

/// Suffix carried by every textual key.
const KEY_SUFFIX: &str = ".k";

/// 256-bit public key of an overlay node.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct PublicKey(pub [u8; 32]);

impl PublicKey {
    /// Create a key from raw bytes.
    pub fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Get the underlying bytes.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Textual form: base32 (low bits first) followed by `.k`.
    pub fn stringify(&self) -> String {
        let mut out = String::with_capacity(KEY_TEXT_LEN + KEY_SUFFIX.len());
        let mut work: u32 = 0;
        let mut bits = 0;
        for &byte in &self.0 {
            work |= u32::from(byte) << bits;
            bits += 8;
            while bits >= 5 {
                out.push(BASE32_ALPHABET[(work & 31) as usize] as char);
                work >>= 5;
                bits -= 5;
            }
        }
        if bits > 0 {
            out.push(BASE32_ALPHABET[(work & 31) as usize] as char);
        }
        out.push_str(KEY_SUFFIX);
        out
    }
}

impl fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PublicKey({})", self.stringify())
    }
}

impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.stringify())
    }
}

impl FromStr for PublicKey {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let body = s
            .strip_suffix(KEY_SUFFIX)
            .ok_or_else(|| AddressError::InvalidKey(s.to_string()))?;
        if body.len() != KEY_TEXT_LEN {
            return Err(AddressError::InvalidKey(s.to_string()));
        }

        let mut out = [0u8; 32];
        let mut written = 0;
        let mut work: u32 = 0;
        let mut bits = 0;
        for c in body.bytes() {
            let digit = BASE32_ALPHABET
                .iter()
                .position(|&a| a == c)
                .ok_or_else(|| AddressError::InvalidKey(s.to_string()))?;
            work |= (digit as u32) << bits;
            bits += 5;
            if bits >= 8 {
                if written == out.len() {
                    return Err(AddressError::InvalidKey(s.to_string()));
                }
                out[written] = (work & 0xff) as u8;
                written += 1;
                work >>= 8;
                bits -= 8;
            }
        }
        // Leftover padding bits must be zero and every byte must be filled.
        if written != out.len() || work != 0 {
            return Err(AddressError::InvalidKey(s.to_string()));
        }
        Ok(Self(out))
    }
}

/// An overlay network address.
///
/// Two notions of equality exist and are never mixed:
/// - [`Address::is_same_ip`] compares the raw 16-byte address only ("same host").
/// - [`Address::is_same`] compares key and path ("same confirmed node").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Address {
    /// Node public key.
    pub key: PublicKey,
    /// Raw network-layer address, derived from `key`.
    pub ip6: [u8; 16],
    /// Switch label used to reach the node.
    pub path: u64,
}

impl Address {
    /// Build an address from its parts without validation.
    pub fn new(key: PublicKey, ip6: [u8; 16], path: u64) -> Self {
        Self { key, ip6, path }
    }

    /// Build an address whose raw address is derived from the key.
    ///
    /// Fails if the key does not map into the overlay's `fc00::/8` range.
    pub fn from_key(key: PublicKey, path: u64) -> Result<Self, AddressError> {
        let ip6 = derive_ip6(&key).ok_or(AddressError::NotOverlayKey)?;
        Ok(Self { key, ip6, path })
    }

    /// Raw address as a std IPv6 address.
    pub fn ip(&self) -> Ipv6Addr {
        Ipv6Addr::from(self.ip6)
    }

    /// Same host: raw address bytes match.
    pub fn is_same_ip(&self, other: &Address) -> bool {
        self.ip6 == other.ip6
    }

    /// Same confirmed node: key and path both match.
    pub fn is_same(&self, other: &Address) -> bool {
        self.key == other.key && self.path == other.path
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{} [{}]", format_label(self.path), self.key, self.ip())
    }
}
