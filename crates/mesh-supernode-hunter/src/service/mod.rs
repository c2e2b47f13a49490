//! # Supernode Hunter Service
//!
//! High-level service implementing the `SupernodeHunterApi` and
//! `CompletionHandler` ports.
//!
//! The service wraps the domain `SupernodeHunter` and binds it to a
//! `PeerSource` and a `QueryCorrelator`: each `ping_cycle` takes a peer
//! snapshot, asks the engine for at most one query and hands it to the
//! correlator.

// Semantic submodules
mod api;
mod core;

// Re-export public API
pub use core::SupernodeHunterService;
