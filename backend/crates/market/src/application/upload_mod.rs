//! Upload Mod Use Case
//!
//! Validates an upload form, simulates the transfer in progress steps and
//! stores the mod as `pending` until an administrator reviews it.

use std::sync::Arc;

use auth::domain::entity::user::User;
use auth::domain::repository::UserRepository;
use platform::sanitize::{is_valid_input, sanitize_input};
use platform::upload::{UploadCandidate, validate_file_upload};

use crate::application::account::active_account;
use crate::application::config::{MarketConfig, simulate};
use crate::domain::entity::mod_item::{ModItem, NewMod, parse_tags};
use crate::domain::repository::ModRepository;
use crate::domain::value_object::{category::ModCategory, pricing::Pricing};
use crate::error::{MarketError, MarketResult};

/// Upload form as submitted
#[derive(Debug, Clone, Default)]
pub struct UploadModInput {
    pub title: String,
    pub description: String,
    /// Category code, e.g. `tracks`
    pub category: String,
    /// Comma-separated
    pub tags: String,
    pub pricing: Pricing,
    pub file: Option<UploadCandidate>,
    pub preview: Option<UploadCandidate>,
    pub accept_terms: bool,
}

pub struct UploadModUseCase<M, U>
where
    M: ModRepository,
    U: UserRepository,
{
    mod_repo: Arc<M>,
    user_repo: Arc<U>,
    config: Arc<MarketConfig>,
}

impl<M, U> UploadModUseCase<M, U>
where
    M: ModRepository,
    U: UserRepository,
{
    pub fn new(mod_repo: Arc<M>, user_repo: Arc<U>, config: Arc<MarketConfig>) -> Self {
        Self {
            mod_repo,
            user_repo,
            config,
        }
    }

    pub async fn execute(&self, author: &User, input: UploadModInput) -> MarketResult<ModItem> {
        self.execute_with_progress(author, input, |_| {}).await
    }

    /// Same as [`execute`](Self::execute), reporting progress (0..=100)
    /// after every simulated step
    pub async fn execute_with_progress<F>(
        &self,
        author: &User,
        input: UploadModInput,
        mut on_progress: F,
    ) -> MarketResult<ModItem>
    where
        F: FnMut(u8) + Send,
    {
        let author = active_account(self.user_repo.as_ref(), author).await?;
        let new_mod = self.validate(input)?;

        let step = self.config.upload_step_percent.clamp(1, 100);
        let mut progress = 0u8;
        on_progress(progress);
        while progress < 100 {
            simulate(self.config.upload_step).await;
            progress = progress.saturating_add(step).min(100);
            on_progress(progress);
        }

        let item = ModItem::pending(author.user_id, author.user_name.as_str(), new_mod);
        self.mod_repo.create(&item).await?;

        if let Some(mut current) = self.user_repo.find_by_id(&author.user_id).await? {
            current.record_upload();
            self.user_repo.update(&current).await?;
        }

        tracing::info!(
            mod_id = %item.mod_id,
            author_id = %item.author_id,
            title = %item.title,
            category = %item.category,
            "Mod uploaded and sent to moderation"
        );

        Ok(item)
    }

    fn validate(&self, input: UploadModInput) -> MarketResult<NewMod> {
        let title = sanitize_input(&input.title);
        let description = sanitize_input(&input.description);

        let mut missing = Vec::new();
        if title.is_empty() {
            missing.push("title");
        }
        if description.is_empty() {
            missing.push("description");
        }
        if input.category.trim().is_empty() {
            missing.push("category");
        }
        if input.file.is_none() {
            missing.push("file");
        }
        if input.preview.is_none() {
            missing.push("preview");
        }
        let (Some(file), Some(preview)) = (input.file, input.preview) else {
            return Err(MarketError::MissingFields(missing));
        };
        if !missing.is_empty() {
            return Err(MarketError::MissingFields(missing));
        }
        if !input.accept_terms {
            return Err(MarketError::TermsNotAccepted);
        }

        if !is_valid_input(&title) {
            return Err(MarketError::UnsafeInput("title"));
        }

        let category = ModCategory::from_code(&input.category)
            .ok_or_else(|| MarketError::UnknownCategory(input.category.trim().to_string()))?;

        validate_file_upload(&file)?;
        if !preview.media_type.starts_with("image/") {
            return Err(MarketError::InvalidPreview);
        }

        if let Pricing::Paid { price } = input.pricing {
            if price <= rust_decimal::Decimal::ZERO {
                return Err(MarketError::InvalidAmount(price.to_string()));
            }
        }

        Ok(NewMod {
            title,
            description,
            category,
            tags: parse_tags(&sanitize_input(&input.tags)),
            pricing: input.pricing,
            archive_name: file.file_name,
            archive_size_bytes: file.size_bytes,
            preview_name: preview.file_name,
        })
    }
}
