//! # Ports Layer - Hexagonal Architecture Boundaries
//!
//! This module defines the port interfaces (traits) for supernode discovery.
//!
//! ## Architecture
//!
//! - **Driving Ports (Inbound):** APIs the hunter exposes to the operator and the host
//! - **Driven Ports (Outbound):** SPIs the hunter requires from adapters
//!
//! The engine never blocks on a port: queries are handed to the
//! [`QueryCorrelator`] and their completions come back later through
//! [`CompletionHandler`].

pub mod inbound;
pub mod outbound;

pub use inbound::{CompletionHandler, SupernodeHunterApi};
pub use outbound::{ConfigProvider, PeerSource, QueryCorrelator};
