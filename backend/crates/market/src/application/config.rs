//! Application Configuration
//!
//! Configuration for the Market application layer.

use std::time::Duration;

use rust_decimal::Decimal;

use crate::domain::services::payment::PlatformConfig;

/// Smallest donation accepted (50 ₽)
pub const MIN_DONATION: Decimal = Decimal::from_parts(50, 0, 0, false, 0);

/// Market application configuration
#[derive(Debug, Clone)]
pub struct MarketConfig {
    pub platform: PlatformConfig,
    pub min_donation: Decimal,
    /// Simulated transfer time for a purchase
    pub payment_latency: Duration,
    /// Simulated processing time for card / wallet top-ups
    pub top_up_latency: Duration,
    /// Simulated time to prepare bank transfer instructions
    pub instructions_latency: Duration,
    /// Simulated time per upload progress step
    pub upload_step: Duration,
    /// Progress added per upload step, in percent
    pub upload_step_percent: u8,
}

impl Default for MarketConfig {
    fn default() -> Self {
        Self {
            platform: PlatformConfig::default(),
            min_donation: MIN_DONATION,
            payment_latency: Duration::from_secs(1),
            top_up_latency: Duration::from_secs(2),
            instructions_latency: Duration::from_secs(1),
            upload_step: Duration::from_millis(200),
            upload_step_percent: 10,
        }
    }
}

impl MarketConfig {
    /// Development defaults with an overridable payout phone
    pub fn development(owner_phone: Option<String>) -> Self {
        let mut config = Self::default();
        if let Some(phone) = owner_phone {
            config.platform = config.platform.with_owner_phone(phone);
        }
        config
    }

    /// No artificial latency, for tests
    pub fn testing() -> Self {
        Self::default().with_latency(Duration::ZERO)
    }

    /// Use one latency for every simulated step
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.payment_latency = latency;
        self.top_up_latency = latency;
        self.instructions_latency = latency;
        self.upload_step = latency;
        self
    }
}

/// Sleep unless the configured latency is zero
pub(crate) async fn simulate(latency: Duration) {
    if !latency.is_zero() {
        tokio::time::sleep(latency).await;
    }
}
