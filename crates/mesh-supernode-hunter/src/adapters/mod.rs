//! # Adapters
//!
//! Concrete implementations of the outbound ports.
//!
//! ## Adapters Provided
//!
//! - `StaticConfigProvider` - Hardcoded config for testing/development
//! - `SharedPeers` - Peer list shared with the link layer
//! - `TomlConfigProvider` - Config file loading (requires "network" feature)
//! - `TokioCorrelator` - Async query dispatch with timeouts (requires "network" feature)
//! - `HunterDriver` - Periodic cycle scheduling (requires "network" feature)

pub mod config;
pub mod peers;

#[cfg(feature = "network")]
pub mod correlator;
#[cfg(feature = "network")]
pub mod driver;

pub use config::StaticConfigProvider;
#[cfg(feature = "network")]
pub use config::{ConfigError, TomlConfigProvider};
pub use peers::SharedPeers;

#[cfg(feature = "network")]
pub use correlator::{QueryTransport, TokioCorrelator, TransportError};
#[cfg(feature = "network")]
pub use driver::{DriverHandle, HunterDriver};
