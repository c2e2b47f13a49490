//! Per-cycle query selection.

use tracing::{debug, trace};

use super::state::SupernodeHunter;
use crate::domain::query::{find_node_message, get_peers_message, get_route_message};
use crate::domain::{AddrSet, OutboundQuery, PendingQuery, QueryKind, QueryPhase};

impl SupernodeHunter {
    /// Run one discovery cycle.
    ///
    /// At most one query is produced:
    /// 1. nothing once more than one supernode is confirmed
    /// 2. nothing while no supernode is authorized
    /// 3. getRoute to the newest candidate, if any (preempts discovery)
    /// 4. otherwise findNode / getPeers to the next node of `[peers, nodes]`
    ///
    /// # Arguments
    ///
    /// * `peers` - Directly connected peers; read-only here
    pub fn on_cycle(&mut self, peers: &AddrSet) -> Option<OutboundQuery> {
        self.stats.cycles += 1;

        if self.is_satisfied() {
            trace!(confirmed = self.confirmed.len(), "Enough supernodes confirmed");
            return None;
        }
        if self.registry.is_empty() {
            trace!("No authorized supernodes to search for");
            return None;
        }

        let query = match self.candidates.last() {
            Some(candidate) => {
                let candidate = *candidate;
                debug!(target = %candidate, "Sending getRoute to supernode candidate");
                OutboundQuery {
                    message: get_route_message(&self.my_address.key, &candidate.key),
                    context: PendingQuery {
                        engine_id: self.id,
                        kind: QueryKind::GetRoute,
                        target: candidate,
                        search_target: None,
                    },
                }
            }
            None => self.discovery_query(peers)?,
        };

        self.stats.queries_issued += 1;
        Some(query)
    }

    fn discovery_query(&mut self, peers: &AddrSet) -> Option<OutboundQuery> {
        let Some(step) = self.cursor.next_step(peers.len() + self.nodes.len()) else {
            debug!("No peers or discovered nodes to query");
            return None;
        };

        let target = if step.index < peers.len() {
            peers.get(step.index)
        } else {
            self.nodes.get(step.index - peers.len())
        }
        .copied()?;

        match step.phase {
            QueryPhase::GetPeers => {
                debug!(target = %target, "Sending getPeers");
                Some(OutboundQuery {
                    message: get_peers_message(),
                    context: PendingQuery {
                        engine_id: self.id,
                        kind: QueryKind::GetPeers,
                        target,
                        search_target: None,
                    },
                })
            }
            QueryPhase::FindNode => {
                let desired = *self.registry.get(step.supernode % self.registry.len())?;
                debug!(target = %target, supernode = %desired, "Sending findNode");
                Some(OutboundQuery {
                    message: find_node_message(&desired),
                    context: PendingQuery {
                        engine_id: self.id,
                        kind: QueryKind::FindNode,
                        target,
                        search_target: Some(desired),
                    },
                })
            }
        }
    }
}
