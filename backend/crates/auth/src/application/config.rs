//! Application Configuration
//!
//! Configuration for the Auth application layer.

use std::time::Duration;

use platform::rate_limit::RateLimitConfig;

/// Auth application configuration
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Login throttling per client key
    pub login_rate_limit: RateLimitConfig,
    /// Session TTL without "Remember Me" (12 hours)
    pub session_ttl_short: Duration,
    /// Session TTL with "Remember Me" (1 week)
    pub session_ttl_long: Duration,
    /// Password pepper (optional, application-wide secret)
    pub password_pepper: Option<Vec<u8>>,
    /// Artificial delay before answering a sign-in / sign-up
    pub simulated_latency: Duration,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            login_rate_limit: RateLimitConfig::default(),
            session_ttl_short: Duration::from_secs(12 * 3600), // 12 hours
            session_ttl_long: Duration::from_secs(7 * 24 * 3600), // 1 week
            password_pepper: None,
            simulated_latency: Duration::from_secs(1),
        }
    }
}

impl AuthConfig {
    /// Development defaults with an explicit pepper
    pub fn development(pepper: Option<Vec<u8>>) -> Self {
        Self {
            password_pepper: pepper,
            ..Self::default()
        }
    }

    /// No artificial latency, for tests
    pub fn testing() -> Self {
        Self {
            simulated_latency: Duration::ZERO,
            ..Self::default()
        }
    }

    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.simulated_latency = latency;
        self
    }

    pub fn session_ttl(&self, remember_me: bool) -> chrono::Duration {
        let ttl = if remember_me {
            self.session_ttl_long
        } else {
            self.session_ttl_short
        };
        chrono::Duration::from_std(ttl).unwrap_or(chrono::Duration::hours(12))
    }

    /// Get password pepper as slice
    pub fn pepper(&self) -> Option<&[u8]> {
        self.password_pepper.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AuthConfig::default();
        assert_eq!(config.login_rate_limit.max_requests, 5);
        assert_eq!(config.simulated_latency, Duration::from_secs(1));
        assert!(config.pepper().is_none());
    }

    #[test]
    fn test_testing_has_no_latency() {
        assert_eq!(AuthConfig::testing().simulated_latency, Duration::ZERO);
    }

    #[test]
    fn test_session_ttl() {
        let config = AuthConfig::default();
        assert_eq!(config.session_ttl(false), chrono::Duration::hours(12));
        assert_eq!(config.session_ttl(true), chrono::Duration::days(7));
    }
}
