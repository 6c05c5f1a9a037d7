//! Sign Up Use Case
//!
//! Creates a new user account with an empty wallet.

use std::sync::Arc;

use platform::password::ClearTextPassword;
use platform::sanitize::{is_valid_input, sanitize_input};

use crate::application::config::AuthConfig;
use crate::domain::entity::{credential::Credential, user::User};
use crate::domain::repository::{CredentialRepository, UserRepository};
use crate::domain::value_object::{email::Email, user_name::UserName};
use crate::error::{AuthError, AuthResult};

/// Sign up input
#[derive(Clone)]
pub struct SignUpInput {
    pub user_name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub accept_terms: bool,
}

/// Sign up use case
pub struct SignUpUseCase<U, C>
where
    U: UserRepository,
    C: CredentialRepository,
{
    user_repo: Arc<U>,
    credential_repo: Arc<C>,
    config: Arc<AuthConfig>,
}

impl<U, C> SignUpUseCase<U, C>
where
    U: UserRepository,
    C: CredentialRepository,
{
    pub fn new(user_repo: Arc<U>, credential_repo: Arc<C>, config: Arc<AuthConfig>) -> Self {
        Self {
            user_repo,
            credential_repo,
            config,
        }
    }

    pub async fn execute(&self, input: SignUpInput) -> AuthResult<User> {
        if !input.accept_terms {
            return Err(AuthError::TermsNotAccepted);
        }

        if !is_valid_input(&input.user_name) {
            return Err(AuthError::InvalidInput(
                "User name contains forbidden characters".to_string(),
            ));
        }
        let user_name = UserName::new(sanitize_input(&input.user_name))?;
        let email = Email::new(sanitize_input(&input.email))?;

        if input.password != input.confirm_password {
            return Err(AuthError::PasswordMismatch);
        }
        let password = ClearTextPassword::new(input.password);
        password.check_strength()?;

        if !self.config.simulated_latency.is_zero() {
            tokio::time::sleep(self.config.simulated_latency).await;
        }

        if self.user_repo.exists_by_email(&email).await? {
            return Err(AuthError::EmailTaken);
        }
        if self.user_repo.exists_by_user_name(&user_name).await? {
            return Err(AuthError::UserNameTaken);
        }

        let password_hash = password.hash(self.config.pepper())?;
        let user = User::new(user_name, email);
        let credential = Credential::new(user.user_id, password_hash);

        self.user_repo.create(&user).await?;
        self.credential_repo.create(&credential).await?;

        tracing::info!(
            user_id = %user.user_id,
            user_name = %user.user_name,
            "User signed up"
        );

        Ok(user)
    }
}
