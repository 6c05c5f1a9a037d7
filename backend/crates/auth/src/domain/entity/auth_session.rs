//! Auth Session Entity
//!
//! A signed-in browser. The session token identifies it; the CSRF token
//! must accompany state-changing actions.

use chrono::{DateTime, Duration, Utc};
use kernel::id::UserId;
use platform::crypto::{constant_time_eq, generate_secure_id, generate_token};

use crate::domain::value_object::user_role::UserRole;

#[derive(Debug, Clone)]
pub struct AuthSession {
    /// Opaque session token
    pub token: String,
    pub user_id: UserId,
    /// User role at session creation
    pub user_role: UserRole,
    pub csrf_token: String,
    /// Whether "Remember Me" was checked
    pub remember_me: bool,
    /// Session expiration (Unix timestamp ms)
    pub expires_at_ms: i64,
    pub created_at: DateTime<Utc>,
}

impl AuthSession {
    /// TTL is provided by the application layer (config), not hard-coded here.
    pub fn new(user_id: UserId, user_role: UserRole, remember_me: bool, ttl: Duration) -> Self {
        let now = Utc::now();

        Self {
            token: generate_secure_id(),
            user_id,
            user_role,
            csrf_token: generate_token(),
            remember_me,
            expires_at_ms: (now + ttl).timestamp_millis(),
            created_at: now,
        }
    }

    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp_millis() > self.expires_at_ms
    }

    pub fn remaining_ms(&self) -> i64 {
        (self.expires_at_ms - Utc::now().timestamp_millis()).max(0)
    }

    /// Constant-time CSRF token comparison
    pub fn verify_csrf(&self, presented: &str) -> bool {
        constant_time_eq(self.csrf_token.as_bytes(), presented.as_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(ttl: Duration) -> AuthSession {
        AuthSession::new(UserId::new(), UserRole::User, false, ttl)
    }

    #[test]
    fn test_new_session_has_distinct_tokens() {
        let a = session(Duration::hours(12));
        let b = session(Duration::hours(12));
        assert_ne!(a.token, b.token);
        assert_ne!(a.csrf_token, b.csrf_token);
        assert!(!a.is_expired());
        assert!(a.remaining_ms() > 0);
    }

    #[test]
    fn test_expired_session() {
        let s = session(Duration::milliseconds(-1));
        assert!(s.is_expired());
        assert_eq!(s.remaining_ms(), 0);
    }

    #[test]
    fn test_verify_csrf() {
        let s = session(Duration::hours(1));
        let csrf = s.csrf_token.clone();
        assert!(s.verify_csrf(&csrf));
        assert!(!s.verify_csrf("forged"));
        assert!(!s.verify_csrf(""));
    }
}
