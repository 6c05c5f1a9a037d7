//! Error Kind - Classification of errors
//!
//! Defines the [`ErrorKind`] enum used to categorise every failure that is
//! surfaced to a storefront user.

use serde::Serialize;

/// Error classification
///
/// Every failed storefront action aborts and shows a message; the kind only
/// decides how that message is titled and whether it is worth logging loudly.
///
/// ## Examples
/// ```rust
/// use kernel::error::kind::ErrorKind;
///
/// let kind = ErrorKind::TooManyAttempts;
/// assert_eq!(kind.as_str(), "Too Many Attempts");
/// assert!(kind.is_user_error());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[non_exhaustive]
pub enum ErrorKind {
    /// Input failed validation (empty field, unsafe text, weak password)
    InvalidInput,
    /// Credentials missing or wrong
    Unauthorized,
    /// Authenticated, but the role or account status forbids the action
    Forbidden,
    /// Referenced user, mod or session does not exist
    NotFound,
    /// Action conflicts with current state (duplicate email, not for sale)
    Conflict,
    /// Rate limit hit
    TooManyAttempts,
    /// Anything the user cannot fix
    Internal,
}

impl ErrorKind {
    /// Title shown to the user
    #[inline]
    pub const fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::InvalidInput => "Invalid Input",
            ErrorKind::Unauthorized => "Unauthorized",
            ErrorKind::Forbidden => "Forbidden",
            ErrorKind::NotFound => "Not Found",
            ErrorKind::Conflict => "Conflict",
            ErrorKind::TooManyAttempts => "Too Many Attempts",
            ErrorKind::Internal => "Internal Error",
        }
    }

    /// Stable machine-readable code
    #[inline]
    pub const fn code(&self) -> &'static str {
        match self {
            ErrorKind::InvalidInput => "invalid_input",
            ErrorKind::Unauthorized => "unauthorized",
            ErrorKind::Forbidden => "forbidden",
            ErrorKind::NotFound => "not_found",
            ErrorKind::Conflict => "conflict",
            ErrorKind::TooManyAttempts => "too_many_attempts",
            ErrorKind::Internal => "internal",
        }
    }

    /// Internal failures should be logged at error level.
    #[inline]
    pub const fn is_internal(&self) -> bool {
        matches!(self, ErrorKind::Internal)
    }

    /// The user can correct the input (or wait) and try again.
    #[inline]
    pub const fn is_user_error(&self) -> bool {
        !self.is_internal()
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_titles() {
        assert_eq!(ErrorKind::InvalidInput.as_str(), "Invalid Input");
        assert_eq!(ErrorKind::NotFound.to_string(), "Not Found");
        assert_eq!(ErrorKind::Internal.as_str(), "Internal Error");
    }

    #[test]
    fn test_codes_are_snake_case() {
        assert_eq!(ErrorKind::TooManyAttempts.code(), "too_many_attempts");
        assert_eq!(ErrorKind::InvalidInput.code(), "invalid_input");
    }

    #[test]
    fn test_internal_vs_user() {
        assert!(ErrorKind::Internal.is_internal());
        assert!(!ErrorKind::Internal.is_user_error());
        assert!(ErrorKind::Forbidden.is_user_error());
        assert!(ErrorKind::Conflict.is_user_error());
    }

    #[test]
    fn test_serialize() {
        let json = serde_json::to_string(&ErrorKind::TooManyAttempts).unwrap();
        assert_eq!(json, r#""TOO_MANY_ATTEMPTS""#);
    }
}
