//! Infrastructure Layer
//!
//! In-memory catalog and the sample mods it starts with.

pub mod memory;
pub mod seed;

pub use memory::InMemoryModRepository;
