//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations for the storefront:
//! - Per-key rate limiting with an injectable clock
//! - Password strength policy and Argon2id hashing
//! - Pattern-based input sanitization
//! - Mod archive upload validation
//! - CSRF tokens and secure IDs

pub mod crypto;
pub mod password;
pub mod rate_limit;
pub mod sanitize;
pub mod upload;
