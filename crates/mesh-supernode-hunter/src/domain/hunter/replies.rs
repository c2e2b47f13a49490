//! Completion handling.

use std::net::Ipv6Addr;

use tracing::{debug, info};

use super::state::{add_bounded, SupernodeHunter};
use crate::domain::reply::{parse_node_list, parse_wire_label};
use crate::domain::{Address, Dict, PendingQuery, QueryCompletion, QueryKind, QueryReply, ReplyError};

/// Result of checking a getRoute reply against the candidate it was sent to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteCheck {
    /// Path and identity matched; added to the confirmed supernodes.
    Confirmed(Address),
    /// Path differed; the responder went back into the candidates with
    /// the reported label.
    Recandidate(Address),
}

/// What one reply changed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReplyOutcome {
    /// Route confirmation result, for getRoute replies.
    pub route: Option<RouteCheck>,
    /// Addresses added to the discovered-nodes pool.
    pub discovered: usize,
    /// Addresses added to the candidate pool from a findNode reply.
    pub candidates: usize,
}

impl SupernodeHunter {
    /// Fold one completion into the pools.
    ///
    /// Every problem (timeout, remote error, bad label, empty node list,
    /// completion from another engine) is logged and returned; pool state is
    /// left as it was. The next cycle retries naturally.
    pub fn on_reply(&mut self, completion: QueryCompletion) -> Result<ReplyOutcome, ReplyError> {
        let QueryCompletion { context, reply } = completion;
        let result = self.handle_reply(&context, reply);

        match &result {
            Ok(_) => {}
            Err(ReplyError::Timeout) => {
                self.stats.timeouts += 1;
                debug!(target = %context.target, kind = %context.kind, "Query timed out");
            }
            Err(ReplyError::StaleEngine { .. }) => {
                debug!(kind = %context.kind, "Dropping completion for a previous engine");
            }
            Err(e) => {
                self.stats.malformed_replies += 1;
                debug!(target = %context.target, kind = %context.kind, error = %e, "Discarding reply");
            }
        }
        result
    }

    fn handle_reply(
        &mut self,
        query: &PendingQuery,
        reply: QueryReply,
    ) -> Result<ReplyOutcome, ReplyError> {
        if query.engine_id != self.id {
            return Err(ReplyError::StaleEngine {
                got: query.engine_id,
                expected: self.id,
            });
        }
        let (message, responder) = match reply {
            QueryReply::Reply { message, responder } => (message, responder),
            QueryReply::Timeout => return Err(ReplyError::Timeout),
        };
        self.stats.replies += 1;
        debug!(from = %responder, kind = %query.kind, "Reply");

        let mut outcome = ReplyOutcome::default();

        if query.kind == QueryKind::GetRoute {
            outcome.route = Some(self.check_route(query, &message, responder)?);
            // A route reply rarely carries nodes; when it does they are
            // treated like getPeers results.
            if let Ok(nodes) = parse_node_list(&responder, &message, true) {
                outcome.discovered = self.absorb_peers(nodes);
            }
            return Ok(outcome);
        }

        let nodes = parse_node_list(&responder, &message, true)?;
        match query.search_target {
            None => outcome.discovered = self.absorb_peers(nodes),
            Some(sought) => outcome.candidates = self.absorb_find_node(nodes, &sought),
        }
        Ok(outcome)
    }

    fn check_route(
        &mut self,
        query: &PendingQuery,
        message: &Dict,
        responder: Address,
    ) -> Result<RouteCheck, ReplyError> {
        if let Some(error) = message.get_bytes("error") {
            return Err(ReplyError::Remote(String::from_utf8_lossy(error).into_owned()));
        }
        let raw_label = message.get_bytes("label").ok_or(ReplyError::MissingLabel)?;
        let label = parse_wire_label(raw_label)?;

        if responder.path == label && responder.is_same(&query.target) {
            info!(supernode = %responder, "Supernode location confirmed");
            self.confirmed.add(responder);
            Ok(RouteCheck::Confirmed(responder))
        } else {
            let moved = Address { path: label, ..responder };
            debug!(supernode = %moved, "Supernode path changed, confirming again");
            add_bounded(&mut self.candidates, moved, self.config.max_candidates);
            Ok(RouteCheck::Recandidate(moved))
        }
    }

    fn absorb_peers(&mut self, nodes: Vec<Address>) -> usize {
        let mut added = 0;
        for node in nodes {
            if node.is_same_ip(&self.my_address) {
                continue;
            }
            if add_bounded(&mut self.nodes, node, self.config.max_discovered_nodes) {
                added += 1;
            }
        }
        added
    }

    fn absorb_find_node(&mut self, nodes: Vec<Address>, sought: &Ipv6Addr) -> usize {
        let mut added = 0;
        for node in nodes {
            if node.ip6 != sought.octets() {
                continue;
            }
            info!(supernode = %node, "Found supernode candidate");
            if add_bounded(&mut self.candidates, node, self.config.max_candidates) {
                added += 1;
            }
        }
        added
    }
}
