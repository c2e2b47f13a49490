//! Key to raw-address derivation.

use sha2::{Digest, Sha512};

use crate::domain::PublicKey;

/// First byte of every overlay address.
const OVERLAY_PREFIX: u8 = 0xfc;

/// Derive the raw IPv6 address owned by `key`.
///
/// The address is the first 16 bytes of `SHA-512(SHA-512(key))`. Keys whose
/// address falls outside `fc00::/8` are not valid overlay identities and
/// yield `None`.
pub fn derive_ip6(key: &PublicKey) -> Option<[u8; 16]> {
    let first = Sha512::digest(key.as_bytes());
    let second = Sha512::digest(first);

    let mut ip6 = [0u8; 16];
    ip6.copy_from_slice(&second[..16]);
    is_overlay_ip(&ip6).then_some(ip6)
}

/// Check whether a raw address lies in the overlay range.
pub fn is_overlay_ip(ip6: &[u8; 16]) -> bool {
    ip6[0] == OVERLAY_PREFIX
}
