//! Decoding of the reply fields the hunter consumes.

use tracing::debug;

use crate::domain::services::{parse_label, splice, LABEL_TEXT_LEN};
use crate::domain::{Address, Dict, PublicKey, ReplyError};

/// Size of one serialized address in a node list: key (32) + path (8, BE).
pub const SERIALIZED_ADDRESS_LEN: usize = 40;

/// Exact size of the `label` field in a getRoute reply: the printed label
/// plus a terminator byte.
pub const LABEL_WIRE_LEN: usize = 20;

/// Reply field holding the serialized node list.
const NODES_FIELD: &str = "n";

/// Parse the `label` field of a getRoute reply.
pub fn parse_wire_label(raw: &[u8]) -> Result<u64, ReplyError> {
    let shown = || String::from_utf8_lossy(raw).into_owned();
    if raw.len() != LABEL_WIRE_LEN {
        return Err(ReplyError::MalformedLabel(shown()));
    }
    let text = std::str::from_utf8(&raw[..LABEL_TEXT_LEN]).map_err(|_| ReplyError::MalformedLabel(shown()))?;
    parse_label(text).map_err(|_| ReplyError::MalformedLabel(shown()))
}

/// Decode the node list carried in `reply`.
///
/// Entries whose key is not a valid overlay key are skipped. With
/// `splice_paths`, each path is reported relative to `from` and is spliced
/// onto `from.path`; entries that cannot be spliced are skipped.
///
/// A missing field, a length that is not a whole number of entries, or a
/// list with no usable entries all yield `ReplyError::NoNodes`.
pub fn parse_node_list(
    from: &Address,
    reply: &Dict,
    splice_paths: bool,
) -> Result<Vec<Address>, ReplyError> {
    let raw = reply.get_bytes(NODES_FIELD).ok_or(ReplyError::NoNodes)?;
    if raw.is_empty() || raw.len() % SERIALIZED_ADDRESS_LEN != 0 {
        debug!(len = raw.len(), from = %from, "Node list has a partial entry");
        return Err(ReplyError::NoNodes);
    }

    let mut out = Vec::with_capacity(raw.len() / SERIALIZED_ADDRESS_LEN);
    for entry in raw.chunks_exact(SERIALIZED_ADDRESS_LEN) {
        let mut key = [0u8; 32];
        key.copy_from_slice(&entry[..32]);
        let mut path_bytes = [0u8; 8];
        path_bytes.copy_from_slice(&entry[32..]);
        let mut path = u64::from_be_bytes(path_bytes);

        if splice_paths {
            match splice(path, from.path) {
                Some(spliced) => path = spliced,
                None => {
                    debug!(from = %from, path, "Dropping node with unspliceable path");
                    continue;
                }
            }
        }

        match Address::from_key(PublicKey::new(key), path) {
            Ok(addr) => out.push(addr),
            Err(e) => debug!(from = %from, error = %e, "Dropping node with invalid key"),
        }
    }

    if out.is_empty() {
        return Err(ReplyError::NoNodes);
    }
    Ok(out)
}

/// Serialize addresses into node-list form, as a responder would.
pub fn serialize_node_list(nodes: &[Address]) -> Vec<u8> {
    let mut out = Vec::with_capacity(nodes.len() * SERIALIZED_ADDRESS_LEN);
    for node in nodes {
        out.extend_from_slice(node.key.as_bytes());
        out.extend_from_slice(&node.path.to_be_bytes());
    }
    out
}
