//! Configuration providers.

use std::net::IpAddr;

use crate::domain::HunterConfig;
use crate::ports::ConfigProvider;

// ============================================================================
// StaticConfigProvider - Hardcoded config for testing/development
// ============================================================================

/// Static configuration provider with hardcoded values.
///
/// Useful for testing and development. For production, use `TomlConfigProvider`.
#[derive(Debug, Clone, Default)]
pub struct StaticConfigProvider {
    config: HunterConfig,
    supernodes: Vec<IpAddr>,
}

impl StaticConfigProvider {
    /// Create with default config and no supernodes.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the hunter configuration.
    #[must_use]
    pub fn with_config(mut self, config: HunterConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the supernodes to authorize.
    #[must_use]
    pub fn with_supernodes(mut self, supernodes: Vec<IpAddr>) -> Self {
        self.supernodes = supernodes;
        self
    }
}

impl ConfigProvider for StaticConfigProvider {
    fn get_hunter_config(&self) -> HunterConfig {
        self.config.clone()
    }

    fn get_authorized_supernodes(&self) -> Vec<IpAddr> {
        self.supernodes.clone()
    }
}

// ============================================================================
// TomlConfigProvider - Production Config Loading (requires "network" feature)
// ============================================================================

#[cfg(feature = "network")]
mod toml_config {
    use super::*;
    use crate::domain::InvalidConfig;
    use serde::Deserialize;
    use std::fs;
    use std::path::Path;
    use thiserror::Error;
    use tracing::warn;

    /// Configuration file structure.
    #[derive(Debug, Deserialize)]
    struct ConfigFile {
        #[serde(default)]
        hunter: HunterSection,
        #[serde(default)]
        supernodes: SupernodesSection,
    }

    #[derive(Debug, Deserialize, Default)]
    struct HunterSection {
        cycle_ms: Option<u64>,
        query_timeout_ms: Option<u64>,
        max_discovered_nodes: Option<usize>,
        max_candidates: Option<usize>,
    }

    #[derive(Debug, Deserialize, Default)]
    struct SupernodesSection {
        #[serde(default)]
        addresses: Vec<String>,
    }

    /// TOML-based configuration provider.
    ///
    /// # Config File Format
    ///
    /// ```toml
    /// [hunter]
    /// cycle_ms = 3000
    /// query_timeout_ms = 10000
    /// max_discovered_nodes = 64
    /// max_candidates = 8
    ///
    /// [supernodes]
    /// addresses = ["fc00::1"]
    /// ```
    #[derive(Debug, Clone)]
    pub struct TomlConfigProvider {
        config: HunterConfig,
        supernodes: Vec<IpAddr>,
    }

    impl TomlConfigProvider {
        /// Load configuration from a TOML file.
        ///
        /// # Errors
        ///
        /// Returns error if file cannot be read or parsed.
        pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
            let content = fs::read_to_string(path.as_ref()).map_err(|e| ConfigError::Io {
                path: path.as_ref().display().to_string(),
                error: e.to_string(),
            })?;

            Self::parse(&content)
        }

        /// Parse configuration from a TOML string.
        ///
        /// # Errors
        ///
        /// `Parse` for malformed TOML, `Invalid` for zero periods or bounds.
        pub fn parse(content: &str) -> Result<Self, ConfigError> {
            let file: ConfigFile =
                toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;

            let mut supernodes = Vec::new();
            for entry in &file.supernodes.addresses {
                let Ok(addr) = entry.parse::<IpAddr>() else {
                    warn!(entry = %entry, "Ignoring unparsable supernode address");
                    continue;
                };
                supernodes.push(addr);
            }

            let defaults = HunterConfig::default();
            let hc = file.hunter;
            let config = HunterConfig {
                cycle_ms: hc.cycle_ms.unwrap_or(defaults.cycle_ms),
                query_timeout_ms: hc.query_timeout_ms.unwrap_or(defaults.query_timeout_ms),
                max_discovered_nodes: hc
                    .max_discovered_nodes
                    .unwrap_or(defaults.max_discovered_nodes),
                max_candidates: hc.max_candidates.unwrap_or(defaults.max_candidates),
            };
            config.validate()?;

            Ok(Self { config, supernodes })
        }
    }

    impl ConfigProvider for TomlConfigProvider {
        fn get_hunter_config(&self) -> HunterConfig {
            self.config.clone()
        }

        fn get_authorized_supernodes(&self) -> Vec<IpAddr> {
            self.supernodes.clone()
        }
    }

    /// Errors that can occur during config loading.
    #[derive(Debug, Clone, PartialEq, Eq, Error)]
    pub enum ConfigError {
        /// File I/O error.
        #[error("Failed to read {path}: {error}")]
        Io { path: String, error: String },
        /// TOML parsing error.
        #[error("Failed to parse config: {0}")]
        Parse(String),
        /// Values the hunter cannot run with.
        #[error("Invalid config: {0}")]
        Invalid(#[from] InvalidConfig),
    }
}

#[cfg(feature = "network")]
pub use toml_config::{ConfigError, TomlConfigProvider};

// ============================================================================
// Tests
// ============================================================================
