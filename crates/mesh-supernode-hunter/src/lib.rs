//! # Mesh Supernode Hunter
//!
//! Finds and confirms the location of operator-authorized supernodes in a
//! key-addressed overlay mesh.
//!
//! Every cycle the hunter either confirms the path to a supernode candidate
//! (`gr`, getRoute) or advances discovery through directly connected peers
//! and learned nodes, alternating `fn` (findNode for an authorized supernode)
//! and `gp` (getPeers). It stops issuing queries once more than one supernode
//! has a confirmed path.
//!
//! ## Architecture
//!
//! The crate follows Hexagonal Architecture with:
//! - **Domain Layer:** Pure discovery logic (addresses, pools, cursor, engine)
//! - **Ports Layer:** Trait definitions for external dependencies
//! - **Service Layer:** Wires the engine to ports
//! - **Adapters Layer:** Concrete implementations; the async ones are behind
//!   the `network` feature (tokio, async-trait, serde, toml)
//!
//! ## Example
//!
//! ```rust,ignore
//! use mesh_supernode_hunter::{AddrSet, HunterConfig, QueryKind, SupernodeHunter};
//! use mesh_supernode_hunter::test_utils::{overlay_addr, overlay_ip};
//!
//! let mut hunter = SupernodeHunter::new(overlay_addr(0, 1), HunterConfig::default());
//! hunter.add_supernode(overlay_ip(10)).unwrap();
//!
//! let peers: AddrSet = [overlay_addr(1, 0x13)].into_iter().collect();
//! let query = hunter.on_cycle(&peers).unwrap();
//! assert_eq!(query.kind(), QueryKind::FindNode);
//! ```

// =============================================================================
// CORE MODULES
// =============================================================================

pub mod domain;
pub mod ports;
pub mod service;

/// Adapters for external integrations.
/// Async adapters require feature: `network`
pub mod adapters;

/// Test utilities (fixtures, RecordingCorrelator)
/// Requires feature: `test-utils`
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

// =============================================================================
// CORE RE-EXPORTS (Always Available)
// =============================================================================

// Domain entities
pub use domain::{
    AddrSet, Address, AddressError, AuthorizedSupernodeRegistry, Dict, HunterConfig, HunterStats,
    InvalidConfig, MessageError, PublicKey, ReplyError, SupernodeError, Value,
};

// Discovery engine
pub use domain::{
    OutboundQuery, PendingQuery, QueryCompletion, QueryKind, QueryReply, ReplyOutcome, RouteCheck,
    SupernodeHunter,
};

// Domain services
pub use domain::{derive_ip6, format_label, parse_label, splice};

// Port traits
pub use ports::{CompletionHandler, ConfigProvider, PeerSource, QueryCorrelator, SupernodeHunterApi};

// Service
pub use service::SupernodeHunterService;

// =============================================================================
// ADAPTER RE-EXPORTS
// =============================================================================

pub use adapters::{SharedPeers, StaticConfigProvider};

#[cfg(feature = "network")]
pub use adapters::{
    ConfigError, DriverHandle, HunterDriver, QueryTransport, TokioCorrelator, TomlConfigProvider,
    TransportError,
};
