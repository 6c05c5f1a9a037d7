//! Infrastructure Layer
//!
//! In-memory stores and the sample accounts they start with.

pub mod memory;
pub mod seed;

pub use memory::InMemoryAuthRepository;
