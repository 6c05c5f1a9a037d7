//! Domain Layer
//!
//! Contains entities, value objects, repository traits and the payment
//! split service.

pub mod entity;
pub mod repository;
pub mod services;
pub mod value_object;

// Re-exports
pub use entity::{mod_item::ModItem, purchase::PurchaseRecord};
pub use repository::ModRepository;
pub use services::payment::{PaymentDistribution, PlatformConfig, compute_distribution};
