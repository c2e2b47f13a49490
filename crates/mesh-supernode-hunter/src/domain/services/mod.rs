//! Domain Services - Pure functions over keys, addresses and labels
//!
//! All functions in this module are pure (no I/O, no state mutation)
//! and deterministic (same inputs → same outputs).

// Semantic submodules
mod address_calc;
mod label;

// Re-export public API
pub use address_calc::{derive_ip6, is_overlay_ip};
pub use label::{format_label, parse_label, splice, LABEL_TEXT_LEN};
