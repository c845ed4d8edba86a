//! # Domain Layer
//!
//! Pure cryptographic and parsing logic with no I/O dependencies.
//! This is the inner layer of the hexagonal architecture.

pub mod broker;
pub mod entities;
pub mod errors;
pub mod keypair;
pub mod replay;
pub mod session;
pub mod signature;
pub mod token;
