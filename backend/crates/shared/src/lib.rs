//! Shared Kernel - Domain-crossing minimal core
//!
//! This crate contains the "smallest core" of storefront vocabulary:
//! - Common error types and result aliases
//! - Typed ID wrappers for users, mods and purchases
//!
//! **Design Principle**: Only include things that are "hard to change"
//! and have consistent meaning across all domains.

pub mod error {
    pub mod app_error;
    pub mod kind;
}
pub mod id;
