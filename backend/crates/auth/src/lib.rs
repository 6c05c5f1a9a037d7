//! Auth (Authentication) Module
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, value objects, repository traits
//! - `application/` - Use cases and their configuration
//! - `infra/` - In-memory store and sample accounts
//!
//! ## Features
//! - Sign up with user name, email and a strong password
//! - Sign in by email with per-client throttling (5 attempts / 15 minutes)
//! - Server-side sessions carrying a CSRF token
//! - Roles: User, Admin
//!
//! ## Security Model
//! - Passwords hashed with Argon2id, optional application pepper
//! - Unknown email and wrong password return the same error
//! - Banned or pending accounts cannot sign in and lose live sessions

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;

// Re-exports for convenience
pub use application::config::AuthConfig;
pub use error::{AuthError, AuthResult};
pub use infra::memory::InMemoryAuthRepository;

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

pub mod models {
    pub use crate::domain::entity::*;
    pub use crate::domain::value_object::*;
}

#[cfg(test)]
mod tests;
