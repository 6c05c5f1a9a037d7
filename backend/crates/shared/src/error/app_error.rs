//! Application Error - Unified error type for the storefront
//!
//! Defines [`AppError`] struct and [`AppResult<T>`] type alias.

use std::borrow::Cow;
use std::error::Error;
use std::fmt;

use serde::Serialize;

use super::kind::ErrorKind;

/// Unified storefront error
///
/// Carries everything a UI needs to show a failure notice: a kind (the
/// notice title), a message, and an optional hint telling the user what to
/// do next. The optional source is kept for logs only and never shown.
///
/// ## Examples
/// ```rust
/// use kernel::error::{app_error::AppError, kind::ErrorKind};
///
/// let err = AppError::new(ErrorKind::NotFound, "Mod not found");
///
/// let err = AppError::invalid_input("Minimum donation is 50")
///     .with_action("Enter a larger amount");
/// ```
pub struct AppError {
    kind: ErrorKind,
    message: Cow<'static, str>,
    action: Option<Cow<'static, str>>,
    source: Option<Box<dyn Error + Send + Sync + 'static>>,
}

/// `Result<T, AppError>`
///
/// ## Examples
/// ```rust
/// use kernel::error::app_error::{AppError, AppResult};
///
/// fn find_mod(id: u32) -> AppResult<String> {
///     if id == 0 {
///         return Err(AppError::not_found("Mod not found"));
///     }
///     Ok("Supercross Arena 2024".to_string())
/// }
/// ```
pub type AppResult<T> = Result<T, AppError>;

/// What a UI shows for a failed action
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub title: &'static str,
    pub code: &'static str,
    pub description: String,
}

impl AppError {
    // ========================================================================
    // Constructors
    // ========================================================================

    #[inline]
    pub fn new(kind: ErrorKind, message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            kind,
            message: message.into(),
            action: None,
            source: None,
        }
    }

    #[inline]
    pub fn invalid_input(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::InvalidInput, message)
    }

    #[inline]
    pub fn unauthorized(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::Unauthorized, message)
    }

    #[inline]
    pub fn forbidden(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::Forbidden, message)
    }

    #[inline]
    pub fn not_found(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::NotFound, message)
    }

    #[inline]
    pub fn conflict(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::Conflict, message)
    }

    #[inline]
    pub fn too_many_attempts(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::TooManyAttempts, message)
    }

    #[inline]
    pub fn internal(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::Internal, message)
    }

    // ========================================================================
    // Builder methods
    // ========================================================================

    /// Attach a hint telling the user what to do next.
    #[inline]
    pub fn with_action(mut self, action: impl Into<Cow<'static, str>>) -> Self {
        self.action = Some(action.into());
        self
    }

    /// Attach the underlying error (logged, never displayed).
    ///
    /// ```rust
    /// use kernel::error::app_error::{AppError, AppResult};
    ///
    /// fn parse_amount(raw: &str) -> AppResult<f64> {
    ///     raw.parse::<f64>()
    ///         .map_err(|e| AppError::invalid_input("Amount must be a number").with_source(e))
    /// }
    /// ```
    #[inline]
    pub fn with_source<E>(mut self, source: E) -> Self
    where
        E: Error + Send + Sync + 'static,
    {
        self.source = Some(Box::new(source));
        self
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    #[inline]
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    #[inline]
    pub fn message(&self) -> &str {
        &self.message
    }

    #[inline]
    pub fn action(&self) -> Option<&str> {
        self.action.as_deref()
    }

    #[inline]
    pub fn is_internal(&self) -> bool {
        self.kind.is_internal()
    }

    /// Build the notice a UI displays for this error.
    ///
    /// Internal errors never leak their message; the user gets a generic
    /// description instead.
    pub fn notice(&self) -> Notice {
        let description = if self.is_internal() {
            "Something went wrong while processing your request".to_string()
        } else {
            match &self.action {
                Some(action) => format!("{} {}", self.message, action),
                None => self.message.to_string(),
            }
        };

        Notice {
            title: self.kind.as_str(),
            code: self.kind.code(),
            description,
        }
    }
}

impl fmt::Debug for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut builder = f.debug_struct("AppError");
        builder.field("kind", &self.kind);
        builder.field("message", &self.message);
        if let Some(action) = &self.action {
            builder.field("action", action);
        }
        if let Some(source) = &self.source {
            builder.field("source", source);
        }
        builder.finish()
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.kind, self.message)?;
        if let Some(action) = &self.action {
            write!(f, " (Action: {})", action)?;
        }
        Ok(())
    }
}

impl Error for AppError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn Error + 'static))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_error() {
        let err = AppError::new(ErrorKind::NotFound, "Mod not found");
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert_eq!(err.message(), "Mod not found");
        assert!(err.action().is_none());
    }

    #[test]
    fn test_convenience_constructors() {
        assert_eq!(AppError::invalid_input("x").kind(), ErrorKind::InvalidInput);
        assert_eq!(AppError::unauthorized("x").kind(), ErrorKind::Unauthorized);
        assert_eq!(AppError::forbidden("x").kind(), ErrorKind::Forbidden);
        assert_eq!(AppError::not_found("x").kind(), ErrorKind::NotFound);
        assert_eq!(AppError::conflict("x").kind(), ErrorKind::Conflict);
        assert_eq!(
            AppError::too_many_attempts("x").kind(),
            ErrorKind::TooManyAttempts
        );
        assert_eq!(AppError::internal("x").kind(), ErrorKind::Internal);
    }

    #[test]
    fn test_with_source() {
        let parse_err = "abc".parse::<i32>().unwrap_err();
        let err = AppError::invalid_input("Not a number").with_source(parse_err);
        assert!(err.source().is_some());
    }

    #[test]
    fn test_display() {
        let err = AppError::not_found("Mod not found");
        assert_eq!(err.to_string(), "[Not Found] Mod not found");

        let err = AppError::invalid_input("Minimum donation is 50").with_action("Enter more");
        assert!(err.to_string().contains("Action: Enter more"));
    }

    #[test]
    fn test_notice_includes_action() {
        let notice = AppError::invalid_input("Minimum donation is 50 RUB.")
            .with_action("Enter a larger amount.")
            .notice();
        assert_eq!(notice.title, "Invalid Input");
        assert_eq!(notice.code, "invalid_input");
        assert_eq!(
            notice.description,
            "Minimum donation is 50 RUB. Enter a larger amount."
        );
    }

    #[test]
    fn test_notice_hides_internal_message() {
        let notice = AppError::internal("lock poisoned in catalog store").notice();
        assert!(!notice.description.contains("poisoned"));
        assert_eq!(notice.title, "Internal Error");
    }
}
