//! # Shared Types Crate
//!
//! Value types every SigAuth crate agrees on.
//!
//! ## Design Principles
//!
//! - **Single Identity String**: a recovered signer is always carried as a
//!   [`PublicKeyHex`], the lowercase hex of a compressed secp256k1 point.
//! - **Injected Time**: nothing reads the wall clock directly; components take
//!   a [`Clock`] so replay windows and expiries are testable at the boundary.

pub mod clock;
pub mod entities;
pub mod errors;

pub use clock::{Clock, FixedClock, SystemClock};
pub use entities::*;
pub use errors::*;
