//! Environment overlay for the storefront configuration

use std::env;
use std::time::Duration;

use anyhow::Context;
use auth::AuthConfig;
use market::MarketConfig;

/// Typed settings read once at startup
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    pub auth: AuthConfig,
    pub market: MarketConfig,
}

impl StorefrontConfig {
    /// Development defaults overlaid with `PASSWORD_PEPPER`,
    /// `PLATFORM_PAYOUT_PHONE` and `SIMULATED_LATENCY_MS`
    pub fn from_env() -> anyhow::Result<Self> {
        let pepper = non_empty_var("PASSWORD_PEPPER").map(String::into_bytes);
        let payout_phone = non_empty_var("PLATFORM_PAYOUT_PHONE");

        let mut auth = AuthConfig::development(pepper);
        let mut market = MarketConfig::development(payout_phone);

        if let Some(raw) = non_empty_var("SIMULATED_LATENCY_MS") {
            let millis: u64 = raw
                .trim()
                .parse()
                .with_context(|| format!("SIMULATED_LATENCY_MS must be an integer, got {raw:?}"))?;
            let latency = Duration::from_millis(millis);
            auth = auth.with_latency(latency);
            market = market.with_latency(latency);
        }

        Ok(Self { auth, market })
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}
