//! Configuration types
//!
//! Static face configuration handed to the engine once at start-up.

pub mod types;

pub use types::*;
