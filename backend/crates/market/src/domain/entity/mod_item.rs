//! Mod Entity
//!
//! A downloadable add-on (bike, gear, track, sound pack) published by an
//! author.

use chrono::{DateTime, Utc};
use kernel::id::{ModId, UserId};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::domain::value_object::{category::ModCategory, mod_status::ModStatus, pricing::Pricing};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModItem {
    pub mod_id: ModId,
    pub title: String,
    pub description: String,
    pub author_id: UserId,
    pub author_name: String,
    pub category: ModCategory,
    /// Lower-case, de-duplicated
    pub tags: Vec<String>,
    pub pricing: Pricing,
    pub downloads: u32,
    /// Average user rating, 0.0..=5.0
    pub rating: f32,
    /// Author's share of all sales so far
    pub earnings: Decimal,
    pub status: ModStatus,
    pub archive_name: String,
    pub archive_size_bytes: u64,
    pub preview_name: String,
    pub uploaded_at: DateTime<Utc>,
}

/// Everything the author supplies for a new mod
#[derive(Debug, Clone)]
pub struct NewMod {
    pub title: String,
    pub description: String,
    pub category: ModCategory,
    pub tags: Vec<String>,
    pub pricing: Pricing,
    pub archive_name: String,
    pub archive_size_bytes: u64,
    pub preview_name: String,
}

impl ModItem {
    /// A fresh upload awaiting moderation
    pub fn pending(author_id: UserId, author_name: impl Into<String>, new: NewMod) -> Self {
        Self {
            mod_id: ModId::new(),
            title: new.title,
            description: new.description,
            author_id,
            author_name: author_name.into(),
            category: new.category,
            tags: new.tags,
            pricing: new.pricing,
            downloads: 0,
            rating: 0.0,
            earnings: Decimal::ZERO,
            status: ModStatus::Pending,
            archive_name: new.archive_name,
            archive_size_bytes: new.archive_size_bytes,
            preview_name: new.preview_name,
            uploaded_at: Utc::now(),
        }
    }

    pub fn is_listed(&self) -> bool {
        self.status.is_listed()
    }

    pub fn approve(&mut self) {
        self.status = ModStatus::Active;
    }

    pub fn reject(&mut self) {
        self.status = ModStatus::Rejected;
    }

    /// Count a completed purchase and the author's share of it
    pub fn record_sale(&mut self, author_earnings: Decimal) {
        self.downloads = self.downloads.saturating_add(1);
        self.earnings += author_earnings;
    }

    /// Case-insensitive match on title, description or any tag.
    /// `needle` must already be lower-cased.
    pub fn matches(&self, needle: &str) -> bool {
        self.title.to_lowercase().contains(needle)
            || self.description.to_lowercase().contains(needle)
            || self.tags.iter().any(|t| t.contains(needle))
    }
}

/// Split a comma-separated tag list: trimmed, lower-cased, empty entries
/// dropped, first occurrence kept
pub fn parse_tags(raw: &str) -> Vec<String> {
    let mut tags: Vec<String> = Vec::new();
    for tag in raw.split(',').map(|t| t.trim().to_lowercase()) {
        if !tag.is_empty() && !tags.contains(&tag) {
            tags.push(tag);
        }
    }
    tags
}
