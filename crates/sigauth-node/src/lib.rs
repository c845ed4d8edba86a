//! # SigAuth Node
//!
//! Library half of the node binary: environment configuration and the HTTP
//! router. Kept separate from `main.rs` so integration tests can drive the
//! router without a socket.
//!
//! ## Startup Sequence
//!
//! 1. Install the tracing subscriber
//! 2. Load configuration from the environment (fatal if a value does not parse)
//! 3. Validate the session secret (fatal if absent or weak)
//! 4. Create the broker identity (fatal if the OS RNG fails)
//! 5. Serve HTTP until Ctrl+C

pub mod config;
pub mod routes;

pub use config::{load_config, load_config_from, NodeConfig};
pub use routes::{router, AppState};
