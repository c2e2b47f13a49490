//! Supernode Hunter
//!
//! The discovery state machine. Each `on_cycle` either confirms the route
//! to the newest supernode candidate (getRoute) or queries the next node of
//! `[peers, discovered nodes]` with findNode / getPeers. Each `on_reply`
//! folds one completion back into the pools.
//!
//! The engine is `&mut self` throughout and performs no I/O: `on_cycle`
//! returns the query to send and the caller routes the completion back.

// Semantic submodules
mod cycle;
mod replies;
mod state;

// Re-export public API
pub use replies::{ReplyOutcome, RouteCheck};
pub use state::SupernodeHunter;
