//! Auth Error Types
//!
//! Auth-specific error variants that integrate with the unified
//! `kernel::error::AppError` system.

use kernel::error::{app_error::AppError, kind::ErrorKind};
use platform::password::{PasswordHashError, PasswordStrengthError};
use thiserror::Error;

/// Auth-specific result type alias
pub type AuthResult<T> = Result<T, AuthError>;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("User not found")]
    UserNotFound,

    #[error("User name already exists")]
    UserNameTaken,

    #[error("Email is already registered")]
    EmailTaken,

    /// Unknown email or wrong password (indistinguishable on purpose)
    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Too many attempts. Try again later")]
    TooManyAttempts {
        /// Once the clock passes this instant the client may retry
        retry_at_ms: i64,
    },

    /// Account is banned or not yet confirmed
    #[error("Account is disabled")]
    AccountDisabled,

    #[error("Session not found or expired")]
    SessionInvalid,

    #[error("Security token mismatch")]
    CsrfMismatch,

    #[error("Administrator role required")]
    Forbidden,

    #[error("{0}")]
    WeakPassword(#[from] PasswordStrengthError),

    #[error("Passwords do not match")]
    PasswordMismatch,

    #[error("Terms of service must be accepted")]
    TermsNotAccepted,

    #[error("{0}")]
    InvalidInput(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::UserNotFound => ErrorKind::NotFound,
            AuthError::UserNameTaken | AuthError::EmailTaken => ErrorKind::Conflict,
            AuthError::InvalidCredentials
            | AuthError::SessionInvalid
            | AuthError::CsrfMismatch => ErrorKind::Unauthorized,
            AuthError::TooManyAttempts { .. } => ErrorKind::TooManyAttempts,
            AuthError::AccountDisabled | AuthError::Forbidden => ErrorKind::Forbidden,
            AuthError::WeakPassword(_)
            | AuthError::PasswordMismatch
            | AuthError::TermsNotAccepted
            | AuthError::InvalidInput(_) => ErrorKind::InvalidInput,
            AuthError::Internal(_) => ErrorKind::Internal,
        }
    }

    /// Convert to AppError, with a hint where the user can act on it
    pub fn to_app_error(&self) -> AppError {
        let err = AppError::new(self.kind(), self.to_string());
        match self {
            AuthError::TooManyAttempts { .. } => err.with_action("Wait 15 minutes and try again"),
            AuthError::WeakPassword(_) => err.with_action(
                "Use 8+ characters with upper and lower case letters, a digit and a symbol",
            ),
            AuthError::SessionInvalid => err.with_action("Sign in again"),
            AuthError::TermsNotAccepted => err.with_action("Accept the terms to continue"),
            _ => err,
        }
    }

    /// Log the error with appropriate level
    pub fn log(&self) {
        match self {
            AuthError::Internal(msg) => {
                tracing::error!(error = %msg, "Auth internal error");
            }
            AuthError::InvalidCredentials => {
                tracing::warn!("Invalid login attempt");
            }
            AuthError::TooManyAttempts { retry_at_ms } => {
                tracing::warn!(retry_at_ms, "Login throttled");
            }
            AuthError::CsrfMismatch => {
                tracing::warn!("CSRF token mismatch detected");
            }
            _ => {
                tracing::debug!(error = %self, "Auth error");
            }
        }
    }
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        err.log();
        let app = err.to_app_error();
        match err {
            AuthError::WeakPassword(reason) => app.with_source(reason),
            _ => app,
        }
    }
}

/// Validation failures from value objects
impl From<AppError> for AuthError {
    fn from(err: AppError) -> Self {
        if err.is_internal() {
            AuthError::Internal(err.to_string())
        } else {
            AuthError::InvalidInput(err.message().to_string())
        }
    }
}

impl From<PasswordHashError> for AuthError {
    fn from(err: PasswordHashError) -> Self {
        AuthError::Internal(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kinds() {
        assert_eq!(AuthError::InvalidCredentials.kind(), ErrorKind::Unauthorized);
        assert_eq!(
            AuthError::TooManyAttempts { retry_at_ms: 0 }.kind(),
            ErrorKind::TooManyAttempts
        );
        assert_eq!(AuthError::EmailTaken.kind(), ErrorKind::Conflict);
        assert_eq!(
            AuthError::WeakPassword(PasswordStrengthError::MissingDigit).kind(),
            ErrorKind::InvalidInput
        );
        assert_eq!(AuthError::Forbidden.kind(), ErrorKind::Forbidden);
    }

    #[test]
    fn test_to_app_error_carries_hint() {
        let app = AuthError::TooManyAttempts { retry_at_ms: 1 }.to_app_error();
        assert_eq!(app.kind(), ErrorKind::TooManyAttempts);
        assert!(app.action().is_some());

        let app = AuthError::InvalidCredentials.to_app_error();
        assert_eq!(app.message(), "Invalid email or password");
        assert!(app.action().is_none());
    }

    #[test]
    fn test_weak_password_keeps_reason_as_source() {
        use std::error::Error as _;

        let app: AppError = AuthError::WeakPassword(PasswordStrengthError::MissingSymbol).into();
        let source = app.source().unwrap();
        assert_eq!(
            source.to_string(),
            PasswordStrengthError::MissingSymbol.to_string()
        );

        let app: AppError = AuthError::EmailTaken.into();
        assert!(app.source().is_none());
    }

    #[test]
    fn test_from_app_error() {
        let err: AuthError = AppError::invalid_input("Invalid email format").into();
        assert!(matches!(err, AuthError::InvalidInput(ref m) if m == "Invalid email format"));

        let err: AuthError = AppError::internal("boom").into();
        assert!(matches!(err, AuthError::Internal(_)));
    }
}
