//! Outgoing discovery queries and their completions.

use std::fmt;
use std::net::Ipv6Addr;

use crate::domain::{Address, Dict, PublicKey};

/// getPeers search target: a reserved key, all zero except the last byte.
pub const GET_PEERS_TARGET: [u8; 8] = [0, 0, 0, 0, 0, 0, 0, 1];

/// The three discovery query types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueryKind {
    /// List the target's peers (`gp`).
    GetPeers,
    /// Search the target for a raw address (`fn`).
    FindNode,
    /// Confirm the current path to a node (`gr`).
    GetRoute,
}

impl QueryKind {
    /// Value of the `q` field.
    pub fn wire_name(&self) -> &'static str {
        match self {
            Self::GetPeers => "gp",
            Self::FindNode => "fn",
            Self::GetRoute => "gr",
        }
    }
}

impl fmt::Display for QueryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}

/// Per-request context, carried by the correlator and handed back with the
/// completion. Dropped once the completion is processed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingQuery {
    /// Id of the engine that issued the query.
    pub engine_id: u64,
    /// Which query was sent.
    pub kind: QueryKind,
    /// Node the query was sent to.
    pub target: Address,
    /// Raw address searched for; only set for findNode.
    pub search_target: Option<Ipv6Addr>,
}

impl PendingQuery {
    /// True for route-confirmation queries.
    pub fn is_get_route(&self) -> bool {
        self.kind == QueryKind::GetRoute
    }
}

/// A query ready to hand to the correlator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundQuery {
    /// Message body.
    pub message: Dict,
    /// Context returned with the completion.
    pub context: PendingQuery,
}

impl OutboundQuery {
    /// Node the query is addressed to.
    pub fn target(&self) -> &Address {
        &self.context.target
    }

    /// Kind of query.
    pub fn kind(&self) -> QueryKind {
        self.context.kind
    }
}

/// What the correlator observed for one query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryReply {
    /// A reply arrived from `responder`.
    Reply {
        /// Reply body.
        message: Dict,
        /// Address the reply came from.
        responder: Address,
    },
    /// No reply within the timeout.
    Timeout,
}

/// A finished query, delivered exactly once per issued query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryCompletion {
    /// Context of the issued query.
    pub context: PendingQuery,
    /// Outcome.
    pub reply: QueryReply,
}

/// `{q: "gp", tar: 00..01}`
pub fn get_peers_message() -> Dict {
    let mut msg = Dict::new();
    msg.put_str("q", QueryKind::GetPeers.wire_name());
    msg.put_bytes("tar", GET_PEERS_TARGET.to_vec());
    msg
}

/// `{q: "fn", tar: <16 raw bytes>}`
pub fn find_node_message(search: &Ipv6Addr) -> Dict {
    let mut msg = Dict::new();
    msg.put_str("q", QueryKind::FindNode.wire_name());
    msg.put_bytes("tar", search.octets().to_vec());
    msg
}

/// `{q: "gr", src: <own key>, tar: <target key>}`
pub fn get_route_message(own_key: &PublicKey, target_key: &PublicKey) -> Dict {
    let mut msg = Dict::new();
    msg.put_str("q", QueryKind::GetRoute.wire_name());
    msg.put_str("src", &own_key.stringify());
    msg.put_str("tar", &target_key.stringify());
    msg
}
