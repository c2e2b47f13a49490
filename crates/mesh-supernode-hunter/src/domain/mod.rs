//! Domain Layer - Pure discovery logic with no I/O
//!
//! This module contains the supernode search including:
//! - Overlay addresses, key text and switch labels
//! - The authorized supernode registry
//! - Bounded address pools
//! - The peers/nodes traversal cursor
//! - Query construction and reply parsing (bencoded dictionaries)
//! - The `SupernodeHunter` engine

pub mod address_set;
pub mod cursor;
pub mod hunter;
pub mod message;
pub mod query;
pub mod registry;
pub mod reply;
pub mod services;
/// Core domain types (entities, values, errors)
pub mod types;

pub use address_set::*;
pub use cursor::*;
pub use hunter::*;
pub use message::*;
pub use query::*;
pub use registry::*;
pub use reply::*;
pub use services::*;
pub use types::*;
