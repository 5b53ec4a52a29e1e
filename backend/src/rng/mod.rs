//! Deterministic random number generation
//!
//! Uses xorshift64* algorithm for fast, deterministic random number generation.
//! CRITICAL: All randomness in the simulator MUST go through this module.
//! That includes agent exploration bids and the market threshold fluctuation
//! term, so a seeded run is exactly reproducible.

mod xorshift;

pub use xorshift::RngManager;
