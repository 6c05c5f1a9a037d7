//! User Entity
//!
//! Public profile and wallet of a storefront account.
//! The password hash lives in [`Credential`](super::credential::Credential).

use chrono::{DateTime, Utc};
use kernel::id::UserId;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::domain::value_object::{
    email::Email, user_name::UserName, user_role::UserRole, user_status::UserStatus,
};

/// User entity
///
/// `balance` is never negative; every mutation goes through [`credit`] or
/// [`set_balance`], whose callers validate the amount first.
///
/// [`credit`]: User::credit
/// [`set_balance`]: User::set_balance
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct User {
    pub user_id: UserId,
    pub user_name: UserName,
    pub email: Email,
    pub user_role: UserRole,
    pub user_status: UserStatus,
    /// Wallet balance in rubles
    pub balance: Decimal,
    pub avatar_url: Option<String>,
    pub total_downloads: u32,
    pub total_uploads: u32,
    pub premium: bool,
    pub joined_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new active user with an empty wallet
    pub fn new(user_name: UserName, email: Email) -> Self {
        let now = Utc::now();

        Self {
            user_id: UserId::new(),
            user_name,
            email,
            user_role: UserRole::default(),
            user_status: UserStatus::default(),
            balance: Decimal::ZERO,
            avatar_url: None,
            total_downloads: 0,
            total_uploads: 0,
            premium: false,
            joined_at: now,
            updated_at: now,
        }
    }

    pub fn can_login(&self) -> bool {
        self.user_status.can_login()
    }

    pub fn is_admin(&self) -> bool {
        self.user_role.is_admin()
    }

    /// Add a positive amount to the wallet
    pub fn credit(&mut self, amount: Decimal) {
        debug_assert!(amount > Decimal::ZERO);
        self.balance += amount;
        self.updated_at = Utc::now();
    }

    /// Overwrite the wallet (admin correction)
    pub fn set_balance(&mut self, balance: Decimal) {
        debug_assert!(balance >= Decimal::ZERO);
        self.balance = balance;
        self.updated_at = Utc::now();
    }

    pub fn set_role(&mut self, role: UserRole) {
        self.user_role = role;
        self.updated_at = Utc::now();
    }

    pub fn set_status(&mut self, status: UserStatus) {
        self.user_status = status;
        self.updated_at = Utc::now();
    }

    pub fn record_download(&mut self) {
        self.total_downloads = self.total_downloads.saturating_add(1);
        self.updated_at = Utc::now();
    }

    pub fn record_upload(&mut self) {
        self.total_uploads = self.total_uploads.saturating_add(1);
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rider() -> User {
        User::new(
            UserName::new("MXRider_Pro").unwrap(),
            Email::new("rider@example.com").unwrap(),
        )
    }

    #[test]
    fn test_new_user_defaults() {
        let user = rider();
        assert_eq!(user.balance, Decimal::ZERO);
        assert_eq!(user.user_role, UserRole::User);
        assert!(user.can_login());
        assert!(!user.is_admin());
        assert!(!user.premium);
    }

    #[test]
    fn test_credit_accumulates() {
        let mut user = rider();
        user.credit(Decimal::new(85050, 2));
        user.credit(Decimal::new(100, 0));
        assert_eq!(user.balance, Decimal::new(95050, 2));
    }

    #[test]
    fn test_banned_cannot_login() {
        let mut user = rider();
        user.set_status(UserStatus::Banned);
        assert!(!user.can_login());
    }

    #[test]
    fn test_counters() {
        let mut user = rider();
        user.record_upload();
        user.record_download();
        user.record_download();
        assert_eq!(user.total_uploads, 1);
        assert_eq!(user.total_downloads, 2);
    }
}
