//! Check Session Use Case
//!
//! Resolves a session token to the signed-in user.

use std::sync::Arc;

use crate::domain::entity::{auth_session::AuthSession, user::User};
use crate::domain::repository::{AuthSessionRepository, UserRepository};
use crate::error::{AuthError, AuthResult};

/// A live session and its current user record
#[derive(Debug, Clone)]
pub struct Authenticated {
    pub session: AuthSession,
    pub user: User,
}

/// Check session use case
pub struct CheckSessionUseCase<S, U>
where
    S: AuthSessionRepository,
    U: UserRepository,
{
    session_repo: Arc<S>,
    user_repo: Arc<U>,
}

impl<S, U> CheckSessionUseCase<S, U>
where
    S: AuthSessionRepository,
    U: UserRepository,
{
    pub fn new(session_repo: Arc<S>, user_repo: Arc<U>) -> Self {
        Self {
            session_repo,
            user_repo,
        }
    }

    pub async fn execute(&self, session_token: &str) -> AuthResult<Authenticated> {
        let session = self
            .session_repo
            .find_by_token(session_token)
            .await?
            .ok_or(AuthError::SessionInvalid)?;

        if session.is_expired() {
            self.session_repo.delete(session_token).await?;
            return Err(AuthError::SessionInvalid);
        }

        let user = self
            .user_repo
            .find_by_id(&session.user_id)
            .await?
            .ok_or(AuthError::SessionInvalid)?;

        // A ban takes effect on the next request
        if !user.can_login() {
            self.session_repo.delete(session_token).await?;
            return Err(AuthError::AccountDisabled);
        }

        Ok(Authenticated { session, user })
    }

    /// Resolve the session and require a matching CSRF token
    pub async fn execute_with_csrf(
        &self,
        session_token: &str,
        csrf_token: &str,
    ) -> AuthResult<Authenticated> {
        let authenticated = self.execute(session_token).await?;
        if !authenticated.session.verify_csrf(csrf_token) {
            return Err(AuthError::CsrfMismatch);
        }
        Ok(authenticated)
    }

    /// Just check if session is valid (returns bool)
    pub async fn is_valid(&self, session_token: &str) -> bool {
        self.execute(session_token).await.is_ok()
    }
}
