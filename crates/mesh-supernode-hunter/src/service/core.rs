use std::sync::Arc;

use tracing::{info, warn};

use crate::domain::{Address, HunterConfig, InvalidConfig, SupernodeHunter};
use crate::ports::{ConfigProvider, PeerSource, QueryCorrelator};

/// Supernode hunter service implementing the driving ports.
///
/// # Example
///
/// ```rust,ignore
/// use mesh_supernode_hunter::service::SupernodeHunterService;
///
/// let mut service = SupernodeHunterService::new(my_address, config, correlator, peers);
/// service.add_supernode("fc00::1".parse()?)?;
///
/// // Driven by a periodic timer
/// service.ping_cycle();
/// ```
pub struct SupernodeHunterService {
    /// The discovery engine (domain layer)
    pub(crate) hunter: SupernodeHunter,
    /// Sends queries and reports completions
    pub(crate) correlator: Arc<dyn QueryCorrelator>,
    /// Directly connected peers
    pub(crate) peers: Arc<dyn PeerSource>,
}

impl SupernodeHunterService {
    /// Create a new service with an empty registry.
    ///
    /// `config` is expected to pass [`HunterConfig::validate`]; providers
    /// go through [`SupernodeHunterService::from_config`], which checks it.
    ///
    /// # Arguments
    ///
    /// * `my_address` - Our own overlay address
    /// * `config` - Timing and pool bounds
    /// * `correlator` - Where queries are sent
    /// * `peers` - Source of directly connected peers
    pub fn new(
        my_address: Address,
        config: HunterConfig,
        correlator: Arc<dyn QueryCorrelator>,
        peers: Arc<dyn PeerSource>,
    ) -> Self {
        Self {
            hunter: SupernodeHunter::new(my_address, config),
            correlator,
            peers,
        }
    }

    /// Create a service from a config provider, authorizing its supernodes.
    ///
    /// Invalid or duplicate supernode entries are logged and skipped.
    ///
    /// # Errors
    ///
    /// `InvalidConfig` if the provider's `HunterConfig` has a zero period,
    /// timeout or pool bound.
    pub fn from_config(
        my_address: Address,
        provider: &dyn ConfigProvider,
        correlator: Arc<dyn QueryCorrelator>,
        peers: Arc<dyn PeerSource>,
    ) -> Result<Self, InvalidConfig> {
        let config = provider.get_hunter_config();
        config.validate()?;
        let mut service = Self::new(my_address, config, correlator, peers);
        for addr in provider.get_authorized_supernodes() {
            if let Err(e) = service.hunter.add_supernode(addr) {
                warn!(supernode = %addr, error = %e, "Skipping configured supernode");
            }
        }
        info!(
            me = %my_address,
            authorized = service.hunter.registry().len(),
            "Supernode hunter ready"
        );
        Ok(service)
    }

    /// Run one discovery cycle.
    ///
    /// Returns `true` if a query was handed to the correlator.
    pub fn ping_cycle(&mut self) -> bool {
        let peers = self.peers.peers();
        match self.hunter.on_cycle(&peers) {
            Some(query) => {
                self.correlator.issue(query);
                true
            }
            None => false,
        }
    }

    /// Get the underlying engine (for advanced inspection).
    pub fn hunter(&self) -> &SupernodeHunter {
        &self.hunter
    }

    /// Get mutable access to the engine.
    pub fn hunter_mut(&mut self) -> &mut SupernodeHunter {
        &mut self.hunter
    }
}

impl std::fmt::Debug for SupernodeHunterService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SupernodeHunterService")
            .field("hunter", &self.hunter)
            .finish_non_exhaustive()
    }
}
