//! Rate Limiting Infrastructure
//!
//! Per-key attempt counting over a rolling window.
//!
//! ## Behaviour
//! - First attempt for a key is recorded with count 1 and allowed
//! - While the count is below the limit, each attempt is counted and allowed
//! - Once the count reaches the limit, attempts are denied (and not recorded)
//! - When more than one window has passed since the last recorded attempt,
//!   the key starts over at count 1
//!
//! ## Known limitations
//! - Entries are never evicted; the map grows with every distinct key
//! - [`RateLimiter`] has no internal locking. Callers that share it across
//!   tasks wrap it themselves.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};
use std::time::Duration;

use chrono::Utc;

/// Login throttling: attempts allowed per window
pub const LOGIN_MAX_ATTEMPTS: u32 = 5;

/// Login throttling window (15 minutes)
pub const LOGIN_WINDOW: Duration = Duration::from_secs(15 * 60);

/// Rate limit configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RateLimitConfig {
    /// Maximum attempts allowed in the window
    pub max_requests: u32,
    /// Time window duration
    pub window: Duration,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            max_requests: LOGIN_MAX_ATTEMPTS,
            window: LOGIN_WINDOW,
        }
    }
}

impl RateLimitConfig {
    pub fn new(max_requests: u32, window_secs: u64) -> Self {
        Self {
            max_requests,
            window: Duration::from_secs(window_secs),
        }
    }

    pub fn window_ms(&self) -> i64 {
        self.window.as_millis() as i64
    }
}

/// Rate limit check result
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RateLimitResult {
    pub allowed: bool,
    /// Attempts left in the current window
    pub remaining: u32,
    /// Once the clock is past this instant the key starts a fresh window
    pub reset_at_ms: i64,
}

/// Attempt bookkeeping for one key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitEntry {
    pub attempt_count: u32,
    /// Last attempt that was allowed (Unix ms)
    pub last_attempt_ms: i64,
}

// ============================================================================
// Clock
// ============================================================================

/// Millisecond time source
pub trait Clock: Send + Sync {
    fn now_ms(&self) -> i64;
}

/// Wall clock (UTC)
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ms(&self) -> i64 {
        Utc::now().timestamp_millis()
    }
}

/// Manually driven clock for tests and simulations
#[derive(Debug, Default)]
pub struct ManualClock {
    now_ms: AtomicI64,
}

impl ManualClock {
    pub fn new(start_ms: i64) -> Self {
        Self {
            now_ms: AtomicI64::new(start_ms),
        }
    }

    pub fn advance(&self, by: Duration) {
        self.now_ms
            .fetch_add(by.as_millis() as i64, Ordering::SeqCst);
    }

    pub fn set(&self, now_ms: i64) {
        self.now_ms.store(now_ms, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> i64 {
        self.now_ms.load(Ordering::SeqCst)
    }
}

impl<C: Clock + ?Sized> Clock for Arc<C> {
    fn now_ms(&self) -> i64 {
        (**self).now_ms()
    }
}

// ============================================================================
// Rate limiter
// ============================================================================

/// In-memory per-key rate limiter
///
/// Owned by the service that needs it (e.g. the sign-in use case) rather
/// than living in a process-wide static, so tests can build a fresh one or
/// [`clear`](Self::clear) it.
#[derive(Debug)]
pub struct RateLimiter<C = SystemClock> {
    config: RateLimitConfig,
    clock: C,
    attempts: HashMap<String, RateLimitEntry>,
}

impl RateLimiter<SystemClock> {
    pub fn new(config: RateLimitConfig) -> Self {
        Self::with_clock(config, SystemClock)
    }
}

impl Default for RateLimiter<SystemClock> {
    fn default() -> Self {
        Self::new(RateLimitConfig::default())
    }
}

impl<C: Clock> RateLimiter<C> {
    pub fn with_clock(config: RateLimitConfig, clock: C) -> Self {
        Self {
            config,
            clock,
            attempts: HashMap::new(),
        }
    }

    /// Check an attempt for `key` and record it if allowed
    pub fn check(&mut self, key: &str) -> RateLimitResult {
        let now = self.clock.now_ms();
        let window_ms = self.config.window_ms();
        let max = self.config.max_requests;

        let Some(entry) = self.attempts.get_mut(key) else {
            self.attempts.insert(
                key.to_string(),
                RateLimitEntry {
                    attempt_count: 1,
                    last_attempt_ms: now,
                },
            );
            return allowed(1, max, now + window_ms);
        };

        // Window elapsed since the last recorded attempt: start over
        if now - entry.last_attempt_ms > window_ms {
            *entry = RateLimitEntry {
                attempt_count: 1,
                last_attempt_ms: now,
            };
            return allowed(1, max, now + window_ms);
        }

        if entry.attempt_count >= max {
            return RateLimitResult {
                allowed: false,
                remaining: 0,
                reset_at_ms: entry.last_attempt_ms + window_ms,
            };
        }

        entry.attempt_count += 1;
        entry.last_attempt_ms = now;
        allowed(entry.attempt_count, max, now + window_ms)
    }

    /// `true` if the attempt is allowed (and recorded)
    pub fn is_allowed(&mut self, key: &str) -> bool {
        self.check(key).allowed
    }

    /// Forget a single key, e.g. after a successful login
    pub fn reset(&mut self, key: &str) -> bool {
        self.attempts.remove(key).is_some()
    }

    pub fn clear(&mut self) {
        self.attempts.clear();
    }

    pub fn entry(&self, key: &str) -> Option<&RateLimitEntry> {
        self.attempts.get(key)
    }

    pub fn tracked_keys(&self) -> usize {
        self.attempts.len()
    }

    pub fn config(&self) -> &RateLimitConfig {
        &self.config
    }
}

fn allowed(count: u32, max: u32, reset_at_ms: i64) -> RateLimitResult {
    RateLimitResult {
        allowed: true,
        remaining: max.saturating_sub(count),
        reset_at_ms,
    }
}
