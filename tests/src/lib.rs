//! # Supernode Hunter Test Suite
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! ├── mesh.rs           # Simulated overlay: QueryTransport over a static graph
//! └── integration/      # Driver + correlator + engine flows
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p mesh-tests
//!
//! # Benchmarks
//! cargo bench -p mesh-tests
//! ```

#![allow(dead_code)]

pub mod integration;
pub mod mesh;

/// Install a `tracing` subscriber once; filter with `RUST_LOG`.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
