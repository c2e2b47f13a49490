//! Simulated overlay mesh.
//!
//! A static graph of fixture nodes answering `gp`, `fn` and `gr` the way
//! real nodes would. Every reply goes through the bencode codec.

use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use mesh_supernode_hunter::test_utils::{nodes_reply, overlay_addr, route_reply};
use mesh_supernode_hunter::{Address, Dict, QueryTransport, TransportError};

/// One query observed by the mesh.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeenQuery {
    /// Value of the `q` field.
    pub q: String,
    /// Address the query was sent to.
    pub target: Address,
}

/// Static graph of fixture nodes, indexed like `overlay_addr(n, _)`.
#[derive(Default)]
pub struct SimulatedMesh {
    /// Per node: its peers, with paths relative to that node.
    links: HashMap<[u8; 16], Vec<Address>>,
    /// Route labels reported by getRoute, when different from the query path.
    routes: Mutex<HashMap<[u8; 16], u64>>,
    /// Nodes that never answer.
    silent: Mutex<Vec<[u8; 16]>>,
    /// Random request loss.
    loss: Option<Mutex<(StdRng, f64)>>,
    seen: Mutex<Vec<SeenQuery>>,
}

impl SimulatedMesh {
    /// Empty mesh.
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `to` a peer of `from`, reached from `from` via `path`.
    pub fn link(&mut self, from: usize, to: usize, path: u64) -> &mut Self {
        self.links
            .entry(overlay_addr(from, 0).ip6)
            .or_default()
            .push(overlay_addr(to, path));
        self.links.entry(overlay_addr(to, 0).ip6).or_default();
        self
    }

    /// Drop each request with probability `rate`, reproducibly.
    pub fn with_loss(mut self, rate: f64, seed: u64) -> Self {
        self.loss = Some(Mutex::new((StdRng::seed_from_u64(seed), rate)));
        self
    }

    /// Report `label` as the route to `node` from now on.
    pub fn reroute(&self, node: usize, label: u64) {
        self.routes.lock().insert(overlay_addr(node, 0).ip6, label);
    }

    /// Stop `node` from answering.
    pub fn silence(&self, node: usize) {
        self.silent.lock().push(overlay_addr(node, 0).ip6);
    }

    /// Every query seen so far.
    pub fn seen(&self) -> Vec<SeenQuery> {
        self.seen.lock().clone()
    }

    /// Number of queries of kind `q` seen so far.
    pub fn count(&self, q: &str) -> usize {
        self.seen.lock().iter().filter(|s| s.q == q).count()
    }

    fn drops_request(&self, target: &Address) -> bool {
        if self.silent.lock().contains(&target.ip6) {
            return true;
        }
        match &self.loss {
            Some(loss) => {
                let mut guard = loss.lock();
                let rate = guard.1;
                guard.0.gen_bool(rate)
            }
            None => false,
        }
    }

    fn answer(&self, target: &Address, message: &Dict) -> Result<Dict, TransportError> {
        let links = self
            .links
            .get(&target.ip6)
            .ok_or(TransportError::Unreachable(*target))?;

        let reply = match message.get_str("q") {
            Some("gp") => nodes_reply(links),
            Some("fn") => {
                let sought = message.get_bytes("tar");
                match links.iter().find(|peer| Some(&peer.ip6[..]) == sought) {
                    Some(hit) => nodes_reply(&[*hit]),
                    None => nodes_reply(links),
                }
            }
            Some("gr") => {
                let label = self.routes.lock().get(&target.ip6).copied();
                route_reply(label.unwrap_or(target.path))
            }
            _ => {
                let mut error = Dict::new();
                error.put_str("error", "unknown query");
                error
            }
        };
        Ok(Dict::decode(&reply.encode())?)
    }
}

#[async_trait]
impl QueryTransport for SimulatedMesh {
    async fn request(&self, target: Address, message: Dict) -> Result<(Dict, Address), TransportError> {
        self.seen.lock().push(SeenQuery {
            q: message.get_str("q").unwrap_or_default().to_owned(),
            target,
        });
        if self.drops_request(&target) {
            return std::future::pending().await;
        }
        let reply = self.answer(&target, &Dict::decode(&message.encode())?)?;
        Ok((reply, target))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_get_peers_lists_links() {
        let mut mesh = SimulatedMesh::new();
        mesh.link(1, 2, 0x15).link(1, 3, 0x17);

        let mut gp = Dict::new();
        gp.put_str("q", "gp");
        let (reply, from) = mesh.request(overlay_addr(1, 0x13), gp).await.unwrap();

        assert_eq!(from, overlay_addr(1, 0x13));
        assert_eq!(reply.get_bytes("n").map(<[u8]>::len), Some(80));
        assert_eq!(mesh.count("gp"), 1);
    }

    #[tokio::test]
    async fn test_unknown_node_is_unreachable() {
        let mesh = SimulatedMesh::new();
        let target = overlay_addr(9, 0x13);

        let err = mesh.request(target, Dict::new()).await.unwrap_err();
        assert_eq!(err, TransportError::Unreachable(target));
    }
}
