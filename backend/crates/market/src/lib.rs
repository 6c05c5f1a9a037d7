//! Market Module
//!
//! Clean Architecture structure:
//! - `domain/` - Mods, purchases, pricing and the payment split
//! - `application/` - Catalog, purchase, top-up, upload and admin use cases
//! - `infra/` - In-memory catalog and sample mods
//!
//! ## Money
//! - Amounts are `rust_decimal::Decimal` in rubles
//! - Every sale is split 10% platform / 90% author
//! - Donations start at 50 ₽
//!
//! Payment audit events are emitted on the `audit` tracing target.

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;

// Re-exports for convenience
pub use application::config::MarketConfig;
pub use error::{MarketError, MarketResult};
pub use infra::memory::InMemoryModRepository;

pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

pub mod models {
    pub use crate::domain::entity::*;
    pub use crate::domain::value_object::*;
}
