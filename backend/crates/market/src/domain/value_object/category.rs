use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModCategory {
    Bikes,
    Gear,
    Tracks,
    Sounds,
    Riders,
    Other,
}

impl ModCategory {
    pub const ALL: [ModCategory; 6] = [
        ModCategory::Bikes,
        ModCategory::Gear,
        ModCategory::Tracks,
        ModCategory::Sounds,
        ModCategory::Riders,
        ModCategory::Other,
    ];

    #[inline]
    pub const fn code(&self) -> &'static str {
        use ModCategory::*;
        match self {
            Bikes => "bikes",
            Gear => "gear",
            Tracks => "tracks",
            Sounds => "sounds",
            Riders => "riders",
            Other => "other",
        }
    }

    #[inline]
    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|c| c.code().eq_ignore_ascii_case(code.trim()))
    }
}

impl fmt::Display for ModCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_code() {
        assert_eq!(ModCategory::from_code("tracks"), Some(ModCategory::Tracks));
        assert_eq!(ModCategory::from_code(" Bikes "), Some(ModCategory::Bikes));
        assert_eq!(ModCategory::from_code("cars"), None);
        assert_eq!(ModCategory::from_code(""), None);
    }

    #[test]
    fn test_codes_are_unique() {
        for category in ModCategory::ALL {
            assert_eq!(ModCategory::from_code(category.code()), Some(category));
        }
    }
}
