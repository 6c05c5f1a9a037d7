//! Browse Catalog Use Case
//!
//! Lists the mods visible to everyone (status `active`).

use std::sync::Arc;

use kernel::id::ModId;
use platform::sanitize::sanitize_input;

use crate::domain::entity::mod_item::ModItem;
use crate::domain::repository::ModRepository;
use crate::domain::value_object::category::ModCategory;
use crate::error::{MarketError, MarketResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Downloads,
    Rating,
    Newest,
}

#[derive(Debug, Clone, Default)]
pub struct CatalogQuery {
    pub category: Option<ModCategory>,
    /// Free text, matched against title, description and tags
    pub search: Option<String>,
    pub sort: SortOrder,
}

pub struct BrowseCatalogUseCase<M>
where
    M: ModRepository,
{
    mod_repo: Arc<M>,
}

impl<M> BrowseCatalogUseCase<M>
where
    M: ModRepository,
{
    pub fn new(mod_repo: Arc<M>) -> Self {
        Self { mod_repo }
    }

    pub async fn execute(&self, query: CatalogQuery) -> MarketResult<Vec<ModItem>> {
        let needle = query
            .search
            .as_deref()
            .map(|s| sanitize_input(s).to_lowercase())
            .filter(|s| !s.is_empty());

        let mut items: Vec<ModItem> = self
            .mod_repo
            .list()
            .await?
            .into_iter()
            .filter(ModItem::is_listed)
            .filter(|m| query.category.is_none_or(|c| m.category == c))
            .filter(|m| needle.as_deref().is_none_or(|n| m.matches(n)))
            .collect();

        match query.sort {
            SortOrder::Downloads => items.sort_by(|a, b| b.downloads.cmp(&a.downloads)),
            SortOrder::Rating => items.sort_by(|a, b| b.rating.total_cmp(&a.rating)),
            SortOrder::Newest => items.sort_by(|a, b| b.uploaded_at.cmp(&a.uploaded_at)),
        }

        tracing::debug!(
            results = items.len(),
            category = ?query.category,
            search = ?needle,
            "Catalog browsed"
        );

        Ok(items)
    }

    /// A single listed mod
    pub async fn find(&self, mod_id: &ModId) -> MarketResult<ModItem> {
        self.mod_repo
            .find_by_id(mod_id)
            .await?
            .filter(ModItem::is_listed)
            .ok_or(MarketError::ModNotFound)
    }
}
