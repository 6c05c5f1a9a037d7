//! In-Memory Repository Implementations
//!
//! Process-local maps behind `tokio::sync::RwLock`. Nothing survives a
//! restart.

use std::collections::HashMap;

use kernel::id::UserId;
use platform::password::ClearTextPassword;
use tokio::sync::RwLock;

use crate::domain::entity::{auth_session::AuthSession, credential::Credential, user::User};
use crate::domain::repository::{AuthSessionRepository, CredentialRepository, UserRepository};
use crate::domain::value_object::{email::Email, user_name::UserName};
use crate::error::{AuthError, AuthResult};
use crate::infra::seed;

/// In-memory account store
#[derive(Debug, Default)]
pub struct InMemoryAuthRepository {
    users: RwLock<HashMap<UserId, User>>,
    credentials: RwLock<HashMap<UserId, Credential>>,
    sessions: RwLock<HashMap<String, AuthSession>>,
}

impl InMemoryAuthRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-filled with the sample accounts, hashed with `pepper`
    pub fn seeded(pepper: Option<&[u8]>) -> AuthResult<Self> {
        let mut users = HashMap::new();
        let mut credentials = HashMap::new();

        for (user, password) in seed::sample_users()? {
            let hash = ClearTextPassword::new(password.to_string()).hash(pepper)?;
            credentials.insert(user.user_id, Credential::new(user.user_id, hash));
            users.insert(user.user_id, user);
        }

        tracing::debug!(users = users.len(), "Seeded account store");

        Ok(Self {
            users: RwLock::new(users),
            credentials: RwLock::new(credentials),
            sessions: RwLock::new(HashMap::new()),
        })
    }

    /// Drop sessions that are past their expiry
    pub async fn cleanup_expired(&self) -> u64 {
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, s| !s.is_expired());
        let deleted = (before - sessions.len()) as u64;

        if deleted > 0 {
            tracing::info!(sessions_deleted = deleted, "Cleaned up expired auth sessions");
        }
        deleted
    }
}

// ============================================================================
// User Repository Implementation
// ============================================================================

impl UserRepository for InMemoryAuthRepository {
    async fn create(&self, user: &User) -> AuthResult<()> {
        let mut users = self.users.write().await;
        if users.contains_key(&user.user_id) {
            return Err(AuthError::Internal(format!(
                "Duplicate user id {}",
                user.user_id
            )));
        }
        users.insert(user.user_id, user.clone());
        Ok(())
    }

    async fn find_by_id(&self, user_id: &UserId) -> AuthResult<Option<User>> {
        Ok(self.users.read().await.get(user_id).cloned())
    }

    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<User>> {
        Ok(self
            .users
            .read()
            .await
            .values()
            .find(|u| &u.email == email)
            .cloned())
    }

    async fn exists_by_email(&self, email: &Email) -> AuthResult<bool> {
        Ok(self.users.read().await.values().any(|u| &u.email == email))
    }

    async fn exists_by_user_name(&self, user_name: &UserName) -> AuthResult<bool> {
        let canonical = user_name.canonical();
        Ok(self
            .users
            .read()
            .await
            .values()
            .any(|u| u.user_name.canonical() == canonical))
    }

    async fn list(&self) -> AuthResult<Vec<User>> {
        let mut users: Vec<User> = self.users.read().await.values().cloned().collect();
        users.sort_by(|a, b| b.joined_at.cmp(&a.joined_at));
        Ok(users)
    }

    async fn update(&self, user: &User) -> AuthResult<()> {
        let mut users = self.users.write().await;
        let slot = users.get_mut(&user.user_id).ok_or(AuthError::UserNotFound)?;
        *slot = user.clone();
        Ok(())
    }
}

// ============================================================================
// Credential Repository Implementation
// ============================================================================

impl CredentialRepository for InMemoryAuthRepository {
    async fn create(&self, credential: &Credential) -> AuthResult<()> {
        self.credentials
            .write()
            .await
            .insert(credential.user_id, credential.clone());
        Ok(())
    }

    async fn find_by_user_id(&self, user_id: &UserId) -> AuthResult<Option<Credential>> {
        Ok(self.credentials.read().await.get(user_id).cloned())
    }
}

// ============================================================================
// Auth Session Repository Implementation
// ============================================================================

impl AuthSessionRepository for InMemoryAuthRepository {
    async fn create(&self, session: &AuthSession) -> AuthResult<()> {
        self.sessions
            .write()
            .await
            .insert(session.token.clone(), session.clone());
        Ok(())
    }

    async fn find_by_token(&self, token: &str) -> AuthResult<Option<AuthSession>> {
        Ok(self.sessions.read().await.get(token).cloned())
    }

    async fn delete(&self, token: &str) -> AuthResult<bool> {
        Ok(self.sessions.write().await.remove(token).is_some())
    }

    async fn delete_all_for_user(&self, user_id: &UserId) -> AuthResult<u64> {
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, s| &s.user_id != user_id);
        Ok((before - sessions.len()) as u64)
    }
}
