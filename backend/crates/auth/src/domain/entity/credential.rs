//! Credential Entity
//!
//! Password hash for a user, kept apart from the profile so that
//! profile reads never touch secrets.

use chrono::{DateTime, Utc};
use kernel::id::UserId;
use platform::password::HashedPassword;

#[derive(Debug, Clone)]
pub struct Credential {
    pub user_id: UserId,
    pub password_hash: HashedPassword,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Credential {
    pub fn new(user_id: UserId, password_hash: HashedPassword) -> Self {
        let now = Utc::now();
        Self {
            user_id,
            password_hash,
            created_at: now,
            updated_at: now,
        }
    }
}
