//! Repository Traits

use kernel::id::ModId;

use crate::domain::entity::mod_item::ModItem;
use crate::error::MarketResult;

/// Mod catalog repository trait
#[trait_variant::make(ModRepository: Send)]
pub trait LocalModRepository {
    async fn create(&self, item: &ModItem) -> MarketResult<()>;

    async fn find_by_id(&self, mod_id: &ModId) -> MarketResult<Option<ModItem>>;

    /// Every mod regardless of status, newest upload first
    async fn list(&self) -> MarketResult<Vec<ModItem>>;

    async fn update(&self, item: &ModItem) -> MarketResult<()>;

    /// Delete a mod, returning whether it existed
    async fn delete(&self, mod_id: &ModId) -> MarketResult<bool>;
}
