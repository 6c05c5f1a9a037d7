//! Process Purchase Use Case
//!
//! Buys a paid mod or sends a donation to its author. The split is
//! computed, written to the audit log and "transferred" after a simulated
//! delay. No balances change; the mod's sales counters do.

use std::str::FromStr;
use std::sync::Arc;

use auth::domain::entity::user::User;
use auth::domain::repository::UserRepository;
use chrono::Utc;
use kernel::id::{ModId, PurchaseId};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::application::account::active_account;
use crate::application::config::{MarketConfig, simulate};
use crate::domain::entity::{mod_item::ModItem, purchase::PurchaseRecord};
use crate::domain::repository::ModRepository;
use crate::domain::services::payment::{PaymentDistribution, log_transaction};
use crate::domain::value_object::pricing::{Pricing, PurchaseKind};
use crate::error::{MarketError, MarketResult};

pub struct PurchaseInput {
    pub mod_id: ModId,
    /// Donation amount as typed by the buyer; ignored for paid mods
    pub donation_amount: Option<String>,
}

/// Preview of a purchase, shown before the buyer confirms
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Quote {
    pub kind: PurchaseKind,
    pub amount: Decimal,
    pub distribution: PaymentDistribution,
}

#[derive(Debug, Clone, Serialize)]
pub struct Receipt {
    pub record: PurchaseRecord,
    pub distribution: PaymentDistribution,
    /// Confirmation shown to the buyer
    pub message: String,
}

pub struct ProcessPurchaseUseCase<M, U>
where
    M: ModRepository,
    U: UserRepository,
{
    mod_repo: Arc<M>,
    user_repo: Arc<U>,
    config: Arc<MarketConfig>,
}

impl<M, U> ProcessPurchaseUseCase<M, U>
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

    /// Split preview. Unparseable donation input counts as zero.
    pub async fn quote(&self, mod_id: &ModId, donation_input: &str) -> MarketResult<Quote> {
        let item = self.listed_mod(mod_id).await?;
        let (kind, amount) = match item.pricing {
            Pricing::Free => return Err(MarketError::NotForSale),
            Pricing::Paid { price } => (PurchaseKind::Paid, price),
            Pricing::Donation => (
                PurchaseKind::Donation,
                parse_amount(donation_input).unwrap_or(Decimal::ZERO),
            ),
        };

        Ok(Quote {
            kind,
            amount,
            distribution: self.config.platform.distribution(amount, kind),
        })
    }

    pub async fn execute(&self, buyer: &User, input: PurchaseInput) -> MarketResult<Receipt> {
        let buyer = active_account(self.user_repo.as_ref(), buyer).await?;
        let mut item = self.listed_mod(&input.mod_id).await?;

        let (kind, amount) = match item.pricing {
            Pricing::Free => return Err(MarketError::NotForSale),
            Pricing::Paid { price } => (PurchaseKind::Paid, price),
            Pricing::Donation => {
                let amount = input
                    .donation_amount
                    .as_deref()
                    .and_then(parse_amount)
                    .filter(|a| *a >= self.config.min_donation)
                    .ok_or(MarketError::DonationBelowMinimum {
                        minimum: self.config.min_donation,
                    })?;
                (PurchaseKind::Donation, amount)
            }
        };

        let record = PurchaseRecord {
            purchase_id: PurchaseId::new(),
            mod_id: item.mod_id,
            mod_title: item.title.clone(),
            author_id: item.author_id,
            author_name: item.author_name.clone(),
            buyer_id: buyer.user_id,
            buyer_name: buyer.user_name.to_string(),
            amount,
            kind,
            timestamp: Utc::now(),
        };

        let distribution = self.config.platform.distribution(amount, kind);
        log_transaction(&record, &distribution, &self.config.platform);

        simulate(self.config.payment_latency).await;

        item.record_sale(distribution.author_earnings);
        self.mod_repo.update(&item).await?;

        tracing::info!(
            purchase_id = %record.purchase_id,
            mod_id = %record.mod_id,
            buyer_id = %record.buyer_id,
            kind = %kind,
            "Purchase completed"
        );

        let message = format!(
            "Mod \"{}\" was added to your library. The author receives {} ₽",
            record.mod_title,
            distribution.author_earnings.round_dp(2)
        );

        Ok(Receipt {
            record,
            distribution,
            message,
        })
    }

    async fn listed_mod(&self, mod_id: &ModId) -> MarketResult<ModItem> {
        self.mod_repo
            .find_by_id(mod_id)
            .await?
            .filter(ModItem::is_listed)
            .ok_or(MarketError::ModNotFound)
    }
}

/// Parse a user-typed amount; `None` unless it is a non-negative number
pub fn parse_amount(input: &str) -> Option<Decimal> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }
    Decimal::from_str(input)
        .ok()
        .filter(|a| !a.is_sign_negative())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("50"), Some(Decimal::new(50, 0)));
        assert_eq!(parse_amount(" 75.5 "), Some(Decimal::new(755, 1)));
        assert_eq!(parse_amount(""), None);
        assert_eq!(parse_amount("abc"), None);
        assert_eq!(parse_amount("-10"), None);
    }
}
