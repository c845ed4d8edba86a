//! # SigAuth Test Suite
//!
//! Unified test crate containing:
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! ├── benchmarks/       # Criterion groups, driven by benches/auth_benchmarks.rs
//! │   ├── signature.rs
//! │   └── token.rs
//! │
//! └── integration/      # Cross-crate flows
//!     ├── http_flows.rs   # Node router end to end
//!     └── broker_flows.rs # Two identities handshaking over one broker
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! # All tests
//! cargo test -p sigauth-tests
//!
//! # By category
//! cargo test -p sigauth-tests integration::
//!
//! # Benchmarks
//! cargo bench -p sigauth-tests
//! ```

pub mod benchmarks;
pub mod integration;
