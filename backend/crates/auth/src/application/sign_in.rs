//! Sign In Use Case
//!
//! Authenticates a user by email and password and creates a session.
//! Attempts are throttled per client key (IP or device id) before any
//! lookup happens.

use std::sync::{Arc, Mutex};

use platform::password::ClearTextPassword;
use platform::rate_limit::{Clock, RateLimiter, SystemClock};
use platform::sanitize::sanitize_input;

use crate::application::config::AuthConfig;
use crate::domain::entity::{auth_session::AuthSession, user::User};
use crate::domain::repository::{AuthSessionRepository, CredentialRepository, UserRepository};
use crate::domain::value_object::email::Email;
use crate::error::{AuthError, AuthResult};

/// Sign in input
pub struct SignInInput {
    pub email: String,
    pub password: String,
    /// Remember me flag
    pub remember_me: bool,
    /// Throttling key, usually the client IP
    pub client_key: String,
}

/// Sign in output
#[derive(Debug, Clone)]
pub struct SignInOutput {
    pub session_token: String,
    pub csrf_token: String,
    pub expires_at_ms: i64,
    pub user: User,
}

/// Sign in use case
pub struct SignInUseCase<U, C, S, K = SystemClock>
where
    U: UserRepository,
    C: CredentialRepository,
    S: AuthSessionRepository,
    K: Clock,
{
    user_repo: Arc<U>,
    credential_repo: Arc<C>,
    session_repo: Arc<S>,
    config: Arc<AuthConfig>,
    limiter: Mutex<RateLimiter<K>>,
}

impl<U, C, S> SignInUseCase<U, C, S>
where
    U: UserRepository,
    C: CredentialRepository,
    S: AuthSessionRepository,
{
    pub fn new(
        user_repo: Arc<U>,
        credential_repo: Arc<C>,
        session_repo: Arc<S>,
        config: Arc<AuthConfig>,
    ) -> Self {
        Self::with_clock(user_repo, credential_repo, session_repo, config, SystemClock)
    }
}

impl<U, C, S, K> SignInUseCase<U, C, S, K>
where
    U: UserRepository,
    C: CredentialRepository,
    S: AuthSessionRepository,
    K: Clock,
{
    pub fn with_clock(
        user_repo: Arc<U>,
        credential_repo: Arc<C>,
        session_repo: Arc<S>,
        config: Arc<AuthConfig>,
        clock: K,
    ) -> Self {
        let limiter = RateLimiter::with_clock(config.login_rate_limit.clone(), clock);
        Self {
            user_repo,
            credential_repo,
            session_repo,
            config,
            limiter: Mutex::new(limiter),
        }
    }

    pub async fn execute(&self, input: SignInInput) -> AuthResult<SignInOutput> {
        self.throttle(&input.client_key)?;

        if !self.config.simulated_latency.is_zero() {
            tokio::time::sleep(self.config.simulated_latency).await;
        }

        let email = Email::new(sanitize_input(&input.email))
            .map_err(|_| AuthError::InvalidCredentials)?;

        let user = self
            .user_repo
            .find_by_email(&email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        let credential = self
            .credential_repo
            .find_by_user_id(&user.user_id)
            .await?
            .ok_or_else(|| AuthError::Internal("Credential not found".to_string()))?;

        let password = ClearTextPassword::new(input.password);
        if !credential
            .password_hash
            .verify(&password, self.config.pepper())
        {
            return Err(AuthError::InvalidCredentials);
        }

        // Status is only revealed to someone who knows the password
        if !user.can_login() {
            return Err(AuthError::AccountDisabled);
        }

        let session = AuthSession::new(
            user.user_id,
            user.user_role,
            input.remember_me,
            self.config.session_ttl(input.remember_me),
        );
        self.session_repo.create(&session).await?;

        tracing::info!(
            user_id = %user.user_id,
            user_name = %user.user_name,
            remember_me = input.remember_me,
            "User signed in"
        );

        Ok(SignInOutput {
            session_token: session.token,
            csrf_token: session.csrf_token,
            expires_at_ms: session.expires_at_ms,
            user,
        })
    }

    /// Forget the attempts recorded for a client key
    pub fn reset_attempts(&self, client_key: &str) -> AuthResult<bool> {
        let mut limiter = self.lock_limiter()?;
        Ok(limiter.reset(client_key))
    }

    fn throttle(&self, client_key: &str) -> AuthResult<()> {
        let result = self.lock_limiter()?.check(client_key);

        if !result.allowed {
            tracing::warn!(client_key, retry_at_ms = result.reset_at_ms, "Sign-in throttled");
            return Err(AuthError::TooManyAttempts {
                retry_at_ms: result.reset_at_ms,
            });
        }
        Ok(())
    }

    fn lock_limiter(&self) -> AuthResult<std::sync::MutexGuard<'_, RateLimiter<K>>> {
        self.limiter
            .lock()
            .map_err(|_| AuthError::Internal("Rate limiter lock poisoned".to_string()))
    }
}
