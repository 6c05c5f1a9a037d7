//! Storefront Entry Point
//!
//! Wires the in-memory stores to the auth and market use cases and runs a
//! scripted storefront session. Uses `anyhow` for startup errors, but
//! application-level errors are reported through `kernel::error::AppError`.

mod config;
mod session;

use std::sync::Arc;

use auth::InMemoryAuthRepository;
use market::InMemoryModRepository;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::StorefrontConfig;
use crate::session::Storefront;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "storefront=info,auth=info,market=info,audit=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = StorefrontConfig::from_env()?;
    tracing::info!(
        payout_phone = %config.market.platform.display_phone(),
        latency_ms = config.market.payment_latency.as_millis() as u64,
        peppered = config.auth.password_pepper.is_some(),
        "Configuration loaded"
    );

    let users = Arc::new(InMemoryAuthRepository::seeded(config.auth.pepper())?);
    let mods = Arc::new(InMemoryModRepository::seeded());
    tracing::info!("Sample stores ready");

    let storefront = Storefront::new(users.clone(), mods, config);
    storefront.run().await?;

    let expired = users.cleanup_expired().await;
    tracing::info!(sessions_deleted = expired, "Auth session cleanup completed");

    Ok(())
}
