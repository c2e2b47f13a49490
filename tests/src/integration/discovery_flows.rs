//! # Discovery Flows
//!
//! End-to-end supernode discovery over `SimulatedMesh` with paused Tokio time.
//!
//! Topology used by most flows (fixture indices):
//!
//! ```text
//! me(0) --0x13--> A(1) --0x15--> B(2) --0x17--> S(10)
//! ```

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use mesh_supernode_hunter::test_utils::{overlay_addr, overlay_ip};
    use mesh_supernode_hunter::{
        ConfigProvider, DriverHandle, HunterConfig, HunterDriver, SharedPeers,
        SupernodeHunterApi, SupernodeHunterService, TokioCorrelator, TomlConfigProvider,
    };

    use crate::init_tracing;
    use crate::mesh::SimulatedMesh;

    const ME: usize = 0;
    const A: usize = 1;
    const B: usize = 2;
    const S: usize = 10;

    // =============================================================================
    // TEST FIXTURES
    // =============================================================================

    /// me -> A -> B -> S, with back links.
    fn chain_mesh() -> SimulatedMesh {
        let mut mesh = SimulatedMesh::new();
        mesh.link(A, ME, 0x19)
            .link(A, B, 0x15)
            .link(B, A, 0x1b)
            .link(B, S, 0x17)
            .link(S, B, 0x1d);
        mesh
    }

    fn start(mesh: Arc<SimulatedMesh>, supernodes: &[usize]) -> DriverHandle {
        init_tracing();
        let config = HunterConfig::for_testing();
        let peers = SharedPeers::new();
        peers.add(overlay_addr(A, 0x13));

        let (correlator, completions) = TokioCorrelator::new(mesh, config.query_timeout());
        let mut service = SupernodeHunterService::new(
            overlay_addr(ME, 1),
            config,
            Arc::new(correlator),
            Arc::new(peers),
        );
        for &n in supernodes {
            service.add_supernode(overlay_ip(n)).unwrap();
        }
        HunterDriver::new(service, completions).spawn()
    }

    async fn run_for(ms: u64) {
        tokio::time::sleep(Duration::from_millis(ms)).await;
    }

    // =============================================================================
    // INTEGRATION TESTS: DISCOVERY
    // =============================================================================

    /// A supernode two hops behind our only peer is found and confirmed.
    #[tokio::test(start_paused = true)]
    async fn test_supernode_behind_two_hops_is_confirmed() {
        let mesh = Arc::new(chain_mesh());
        let handle = start(mesh.clone(), &[S]);

        run_for(3_000).await;

        let confirmed = handle.with_service(|s| s.confirmed_supernodes());
        assert_eq!(confirmed.len(), 1);
        let snode = *confirmed.get(0).unwrap();
        assert_eq!(snode.key, overlay_addr(S, 0).key);

        // The confirmed path leads me -> A -> B -> S
        let via_a = mesh_supernode_hunter::splice(0x15, 0x13).unwrap();
        assert_eq!(mesh_supernode_hunter::splice(0x17, via_a), Some(snode.path));

        assert!(mesh.count("gp") >= 1);
        assert!(mesh.seen().iter().any(|q| q.q == "gr" && q.target.key == snode.key));
        handle.shutdown().await;
    }

    /// A confirmed supernode keeps being re-validated; when its route moves
    /// the new path is confirmed too and the hunter goes quiet.
    #[tokio::test(start_paused = true)]
    async fn test_hunter_goes_quiet_after_two_confirmations() {
        let mesh = Arc::new(chain_mesh());
        let handle = start(mesh.clone(), &[S]);

        run_for(3_000).await;
        assert_eq!(handle.with_service(|s| s.stats()).confirmed, 1);
        let before = mesh.count("gr");
        run_for(500).await;
        assert!(mesh.count("gr") > before);

        mesh.reroute(S, 0x0fff);
        run_for(2_000).await;

        let stats = handle.with_service(|s| s.stats());
        assert_eq!(stats.confirmed, 2);
        let sent = mesh.seen().len();

        run_for(2_000).await;

        assert_eq!(mesh.seen().len(), sent);
        let confirmed = handle.with_service(|s| s.confirmed_supernodes());
        assert!(confirmed.iter().any(|snode| snode.path == 0x0fff));
        handle.shutdown().await;
    }

    /// A getRoute answer with a new label re-queues the supernode on that path.
    #[tokio::test(start_paused = true)]
    async fn test_moved_supernode_confirmed_on_reported_path() {
        let mesh = Arc::new(chain_mesh());
        mesh.reroute(S, 0x0fff);
        let handle = start(mesh.clone(), &[S]);

        run_for(3_000).await;

        let confirmed = handle.with_service(|s| s.confirmed_supernodes());
        assert_eq!(confirmed.len(), 1);
        assert_eq!(confirmed.get(0).unwrap().path, 0x0fff);
        handle.shutdown().await;
    }

    /// A supernode that never answers getRoute is never confirmed.
    #[tokio::test(start_paused = true)]
    async fn test_silent_supernode_stays_candidate() {
        let mesh = Arc::new(chain_mesh());
        mesh.silence(S);
        let handle = start(mesh.clone(), &[S]);

        run_for(3_000).await;

        let stats = handle.with_service(|s| s.stats());
        assert_eq!(stats.confirmed, 0);
        assert_eq!(stats.candidates, 1);
        assert!(stats.timeouts >= 1);
        assert!(mesh.count("gr") >= 2);
        handle.shutdown().await;
    }

    /// Random request loss only slows discovery down.
    #[tokio::test(start_paused = true)]
    async fn test_lossy_mesh_still_converges() {
        let mesh = Arc::new(chain_mesh().with_loss(0.3, 7));
        let handle = start(mesh.clone(), &[S]);

        run_for(20_000).await;

        let stats = handle.with_service(|s| s.stats());
        assert_eq!(stats.confirmed, 1);
        assert!(stats.discovered_nodes <= HunterConfig::for_testing().max_discovered_nodes);
        handle.shutdown().await;
    }

    // =============================================================================
    // INTEGRATION TESTS: OPERATOR CONTROL
    // =============================================================================

    /// Nothing is sent until a supernode is authorized at runtime.
    #[tokio::test(start_paused = true)]
    async fn test_authorizing_while_running_starts_search() {
        let mesh = Arc::new(chain_mesh());
        let handle = start(mesh.clone(), &[]);

        run_for(1_000).await;
        assert!(mesh.seen().is_empty());

        handle.with_service(|s| s.add_supernode(overlay_ip(S))).unwrap();
        run_for(3_000).await;

        assert_eq!(handle.with_service(|s| s.stats()).confirmed, 1);
        handle.shutdown().await;
    }

    /// A hunter built from a TOML file behaves like a hand-built one.
    #[tokio::test(start_paused = true)]
    async fn test_toml_configured_hunter() {
        init_tracing();
        let toml = format!(
            "[hunter]\ncycle_ms = 100\nquery_timeout_ms = 50\n\n[supernodes]\naddresses = [\"{}\", \"10.1.1.1\"]\n",
            overlay_addr(S, 0).ip()
        );
        let provider = TomlConfigProvider::parse(&toml).unwrap();
        let config = provider.get_hunter_config();

        let mesh = Arc::new(chain_mesh());
        let peers = SharedPeers::new();
        peers.add(overlay_addr(A, 0x13));
        let (correlator, completions) = TokioCorrelator::new(mesh, config.query_timeout());
        let service = SupernodeHunterService::from_config(
            overlay_addr(ME, 1),
            &provider,
            Arc::new(correlator),
            Arc::new(peers),
        )
        .unwrap();
        // The IPv4 entry is refused by the registry
        assert_eq!(service.list_supernodes().len(), 1);

        let handle = HunterDriver::new(service, completions).spawn();
        run_for(3_000).await;

        assert_eq!(handle.with_service(|s| s.stats()).confirmed, 1);
        handle.shutdown().await;
    }

    /// Completions arriving after shutdown are dropped.
    #[tokio::test(start_paused = true)]
    async fn test_shutdown_discards_in_flight_queries() {
        let mesh = Arc::new(chain_mesh());
        mesh.silence(A);
        let handle = start(mesh.clone(), &[S]);

        run_for(120).await;
        assert_eq!(mesh.seen().len(), 1);
        let service = Arc::clone(handle.service());

        handle.shutdown().await;
        run_for(1_000).await;

        assert_eq!(service.lock().stats().timeouts, 0);
        assert_eq!(mesh.seen().len(), 1);
    }
}
