//! In-Memory Mod Repository

use std::collections::HashMap;

use kernel::id::ModId;
use tokio::sync::RwLock;

use crate::domain::entity::mod_item::ModItem;
use crate::domain::repository::ModRepository;
use crate::error::{MarketError, MarketResult};
use crate::infra::seed;

#[derive(Debug, Default)]
pub struct InMemoryModRepository {
    mods: RwLock<HashMap<ModId, ModItem>>,
}

impl InMemoryModRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Catalog pre-filled with the sample mods
    pub fn seeded() -> Self {
        let mods: HashMap<ModId, ModItem> = seed::sample_mods()
            .into_iter()
            .map(|m| (m.mod_id, m))
            .collect();

        tracing::debug!(mods = mods.len(), "Seeded mod catalog");

        Self {
            mods: RwLock::new(mods),
        }
    }
}

impl ModRepository for InMemoryModRepository {
    async fn create(&self, item: &ModItem) -> MarketResult<()> {
        let mut mods = self.mods.write().await;
        if mods.contains_key(&item.mod_id) {
            return Err(MarketError::Internal(format!(
                "Duplicate mod id {}",
                item.mod_id
            )));
        }
        mods.insert(item.mod_id, item.clone());
        Ok(())
    }

    async fn find_by_id(&self, mod_id: &ModId) -> MarketResult<Option<ModItem>> {
        Ok(self.mods.read().await.get(mod_id).cloned())
    }

    async fn list(&self) -> MarketResult<Vec<ModItem>> {
        let mut mods: Vec<ModItem> = self.mods.read().await.values().cloned().collect();
        mods.sort_by(|a, b| b.uploaded_at.cmp(&a.uploaded_at));
        Ok(mods)
    }

    async fn update(&self, item: &ModItem) -> MarketResult<()> {
        let mut mods = self.mods.write().await;
        let slot = mods.get_mut(&item.mod_id).ok_or(MarketError::ModNotFound)?;
        *slot = item.clone();
        Ok(())
    }

    async fn delete(&self, mod_id: &ModId) -> MarketResult<bool> {
        Ok(self.mods.write().await.remove(mod_id).is_some())
    }
}
