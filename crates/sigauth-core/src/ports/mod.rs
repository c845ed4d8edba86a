//! # Ports Layer
//!
//! Trait definitions for the hexagonal architecture.
//! - **Inbound (Driving)**: API that HTTP and bus adapters call
//! - **Outbound (Driven)**: Clock and broker transport this crate needs

pub mod inbound;
pub mod outbound;
