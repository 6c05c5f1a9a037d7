//! User Name Value Object
//!
//! The public handle shown next to mods, reviews and in the admin list.
//!
//! ## Rules
//! - NFKC normalization, then surrounding whitespace is trimmed
//! - Length: 3..=30 characters
//! - Letters, digits and `_ - .` only (so nothing the input filter rejects)
//! - Must start with a letter or digit
//! - Display form keeps its case; uniqueness uses the lower-cased
//!   [`canonical`](UserName::canonical) form

use kernel::error::app_error::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use unicode_normalization::UnicodeNormalization;

/// Minimum length for user name (in characters)
pub const USER_NAME_MIN_LENGTH: usize = 3;

/// Maximum length for user name (in characters)
pub const USER_NAME_MAX_LENGTH: usize = 30;

const ALLOWED_SPECIAL_CHARS: &[char] = &['_', '-', '.'];

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserName(String);

impl UserName {
    pub fn new(raw: impl AsRef<str>) -> AppResult<Self> {
        let normalized: String = raw.as_ref().nfkc().collect();
        let name = normalized.trim();

        let length = name.chars().count();
        if !(USER_NAME_MIN_LENGTH..=USER_NAME_MAX_LENGTH).contains(&length) {
            return Err(AppError::invalid_input(format!(
                "User name must be {}-{} characters",
                USER_NAME_MIN_LENGTH, USER_NAME_MAX_LENGTH
            )));
        }

        if !name.chars().next().is_some_and(char::is_alphanumeric) {
            return Err(AppError::invalid_input(
                "User name must start with a letter or digit",
            ));
        }

        if let Some(bad) = name
            .chars()
            .find(|c| !c.is_alphanumeric() && !ALLOWED_SPECIAL_CHARS.contains(c))
        {
            return Err(AppError::invalid_input(format!(
                "User name cannot contain '{}'",
                bad
            ))
            .with_action("Use letters, digits, '_', '-' or '.'"));
        }

        Ok(Self(name.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Case-folded form used for uniqueness checks and lookups
    pub fn canonical(&self) -> String {
        self.0.to_lowercase()
    }
}

impl TryFrom<String> for UserName {
    type Error = AppError;

    fn try_from(value: String) -> AppResult<Self> {
        UserName::new(value)
    }
}

impl From<UserName> for String {
    fn from(name: UserName) -> Self {
        name.0
    }
}

impl fmt::Display for UserName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for UserName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
