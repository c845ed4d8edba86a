//! # SigAuth Benchmarks
//!
//! Every request pays for one key recovery, so recovery and token decode are
//! the numbers that matter.

pub mod signature;
pub mod token;
