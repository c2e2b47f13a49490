//! # Integration Flows
//!
//! Driver, correlator and engine running together over a simulated mesh.

pub mod discovery_flows;
