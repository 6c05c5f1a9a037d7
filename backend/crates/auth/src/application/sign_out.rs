//! Sign Out Use Case
//!
//! Invalidates a user session.

use std::sync::Arc;

use crate::domain::repository::AuthSessionRepository;
use crate::error::{AuthError, AuthResult};

/// Sign out use case
pub struct SignOutUseCase<S>
where
    S: AuthSessionRepository,
{
    session_repo: Arc<S>,
}

impl<S> SignOutUseCase<S>
where
    S: AuthSessionRepository,
{
    pub fn new(session_repo: Arc<S>) -> Self {
        Self { session_repo }
    }

    /// Sign out from the current session; unknown tokens are not an error
    pub async fn execute(&self, session_token: &str) -> AuthResult<bool> {
        let existed = self.session_repo.delete(session_token).await?;
        if existed {
            tracing::info!("User signed out");
        }
        Ok(existed)
    }

    /// Sign out from every session of the token's owner
    pub async fn execute_all(&self, session_token: &str) -> AuthResult<u64> {
        let session = self
            .session_repo
            .find_by_token(session_token)
            .await?
            .ok_or(AuthError::SessionInvalid)?;

        let deleted = self
            .session_repo
            .delete_all_for_user(&session.user_id)
            .await?;

        tracing::info!(
            user_id = %session.user_id,
            deleted = deleted,
            "User signed out from all sessions"
        );

        Ok(deleted)
    }
}
