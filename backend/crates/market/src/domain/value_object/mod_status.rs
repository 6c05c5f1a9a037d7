//! Moderation status of a mod
//!
//! Uploads start as `Pending`; an administrator moves them to `Active`
//! (listed in the catalog) or `Rejected`.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModStatus {
    Active,
    #[default]
    Pending,
    Rejected,
}

impl ModStatus {
    #[inline]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Pending => "pending",
            Self::Rejected => "rejected",
        }
    }

    /// Visible in the public catalog
    #[inline]
    pub const fn is_listed(&self) -> bool {
        matches!(self, Self::Active)
    }
}

impl fmt::Display for ModStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
