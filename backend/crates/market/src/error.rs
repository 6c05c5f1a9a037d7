//! Market Error Types
//!
//! Market-specific error variants that integrate with the unified
//! `kernel::error::AppError` system.

use auth::AuthError;
use kernel::error::{app_error::AppError, kind::ErrorKind};
use platform::upload::UploadRejection;
use rust_decimal::Decimal;
use thiserror::Error;

pub type MarketResult<T> = Result<T, MarketError>;

#[derive(Debug, Error)]
pub enum MarketError {
    #[error("Mod not found")]
    ModNotFound,

    #[error("User not found")]
    UserNotFound,

    /// Free mods have nothing to pay for
    #[error("This mod is free")]
    NotForSale,

    #[error("Minimum donation is {minimum} ₽")]
    DonationBelowMinimum { minimum: Decimal },

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Unknown payment method: {0}")]
    UnknownPaymentMethod(String),

    #[error("Required fields are missing: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),

    #[error("Terms of service must be accepted")]
    TermsNotAccepted,

    #[error("{0} contains forbidden characters")]
    UnsafeInput(&'static str),

    #[error("Unknown category: {0}")]
    UnknownCategory(String),

    #[error("{0}")]
    UploadRejected(#[from] UploadRejection),

    #[error("Preview must be an image")]
    InvalidPreview,

    #[error("Administrator role required")]
    Forbidden,

    #[error("Administrators cannot apply this action to themselves")]
    CannotTargetSelf,

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl MarketError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            MarketError::ModNotFound | MarketError::UserNotFound => ErrorKind::NotFound,
            MarketError::NotForSale
            | MarketError::DonationBelowMinimum { .. }
            | MarketError::InvalidAmount(_)
            | MarketError::UnknownPaymentMethod(_)
            | MarketError::MissingFields(_)
            | MarketError::TermsNotAccepted
            | MarketError::UnsafeInput(_)
            | MarketError::UnknownCategory(_)
            | MarketError::UploadRejected(_)
            | MarketError::InvalidPreview
            | MarketError::CannotTargetSelf => ErrorKind::InvalidInput,
            MarketError::Forbidden => ErrorKind::Forbidden,
            MarketError::Auth(e) => e.kind(),
            MarketError::Internal(_) => ErrorKind::Internal,
        }
    }

    /// Convert to AppError, with a hint where the user can act on it
    pub fn to_app_error(&self) -> AppError {
        if let MarketError::Auth(e) = self {
            return e.to_app_error();
        }

        let err = AppError::new(self.kind(), self.to_string());
        match self {
            MarketError::DonationBelowMinimum { .. } => err.with_action("Enter a larger amount"),
            MarketError::MissingFields(_) | MarketError::TermsNotAccepted => {
                err.with_action("Fill in all required fields and accept the terms")
            }
            MarketError::UploadRejected(_) => {
                err.with_action("Upload a .zip, .rar or .7z archive up to 100 MB")
            }
            _ => err,
        }
    }

    /// Log the error with appropriate level
    pub fn log(&self) {
        match self {
            MarketError::Internal(msg) => {
                tracing::error!(error = %msg, "Market internal error");
            }
            MarketError::Forbidden => {
                tracing::warn!("Admin action attempted without admin role");
            }
            MarketError::UnsafeInput(field) => {
                tracing::warn!(field, "Rejected unsafe input");
            }
            MarketError::Auth(e) => e.log(),
            _ => {
                tracing::debug!(error = %self, "Market error");
            }
        }
    }
}

impl From<MarketError> for AppError {
    fn from(err: MarketError) -> Self {
        err.log();
        let app = err.to_app_error();
        match err {
            MarketError::UploadRejected(reason) => app.with_source(reason),
            _ => app,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kinds() {
        assert_eq!(MarketError::ModNotFound.kind(), ErrorKind::NotFound);
        assert_eq!(
            MarketError::DonationBelowMinimum { minimum: Decimal::new(50, 0) }.kind(),
            ErrorKind::InvalidInput
        );
        assert_eq!(MarketError::Forbidden.kind(), ErrorKind::Forbidden);
        assert_eq!(
            MarketError::Auth(AuthError::SessionInvalid).kind(),
            ErrorKind::Unauthorized
        );
    }

    #[test]
    fn test_messages() {
        assert_eq!(
            MarketError::DonationBelowMinimum { minimum: Decimal::new(50, 0) }.to_string(),
            "Minimum donation is 50 ₽"
        );
        assert_eq!(
            MarketError::MissingFields(vec!["title", "preview"]).to_string(),
            "Required fields are missing: title, preview"
        );
    }

    #[test]
    fn test_upload_rejection_kept_as_source() {
        use std::error::Error as _;

        let app: AppError = MarketError::UploadRejected(UploadRejection::UnsupportedExtension(
            ".exe".to_string(),
        ))
        .into();
        assert_eq!(app.kind(), ErrorKind::InvalidInput);
        assert_eq!(
            app.source().map(|s| s.to_string()),
            Some("Unsupported file extension: .exe".to_string())
        );
    }

    #[test]
    fn test_to_app_error() {
        let app = MarketError::DonationBelowMinimum { minimum: Decimal::new(50, 0) }.to_app_error();
        assert_eq!(app.kind(), ErrorKind::InvalidInput);
        assert_eq!(app.action(), Some("Enter a larger amount"));

        let app = MarketError::Auth(AuthError::InvalidCredentials).to_app_error();
        assert_eq!(app.message(), "Invalid email or password");
    }
}
