//! # Adapters Module
//!
//! Infrastructure adapters implementing the ports.
//! - `http`: tower layer and axum extractor for the request boundary
//! - `bus`: broker handshake over the `BrokerGateway` port, plus an
//!   in-memory gateway

pub mod bus;
pub mod http;
