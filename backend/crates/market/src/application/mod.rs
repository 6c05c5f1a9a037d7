//! Application Layer
//!
//! Use cases and application services.

mod account;
pub mod admin;
pub mod browse_catalog;
pub mod config;
pub mod process_purchase;
pub mod top_up;
pub mod upload_mod;

// Re-exports
pub use admin::{AdminUseCase, ModAction, RevenueStats, SystemStats, UserAction};
pub use browse_catalog::{BrowseCatalogUseCase, CatalogQuery, SortOrder};
pub use config::MarketConfig;
pub use process_purchase::{ProcessPurchaseUseCase, PurchaseInput, Quote, Receipt};
pub use top_up::{PaymentMethod, TopUpInput, TopUpOutcome, TopUpUseCase};
pub use upload_mod::{UploadModInput, UploadModUseCase};
