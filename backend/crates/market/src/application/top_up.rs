//! Top Up Use Case
//!
//! Adds money to the signed-in user's wallet. A bank transfer by phone
//! number cannot be confirmed automatically, so `tbank` only returns the
//! transfer instructions; every other method is simulated and credited.

use std::fmt;
use std::sync::Arc;

use auth::domain::entity::user::User;
use auth::domain::repository::UserRepository;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::application::account::active_account;
use crate::application::config::{MarketConfig, simulate};
use crate::application::process_purchase::parse_amount;
use crate::error::{MarketError, MarketResult};

/// Amounts offered as one-click presets
pub const PRESET_AMOUNTS: [u32; 4] = [500, 1000, 2000, 5000];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    /// Manual transfer to the platform phone number
    Tbank,
    Card,
    Paypal,
    Crypto,
    Qiwi,
}

impl PaymentMethod {
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Tbank => "tbank",
            Self::Card => "card",
            Self::Paypal => "paypal",
            Self::Crypto => "crypto",
            Self::Qiwi => "qiwi",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim() {
            "tbank" => Some(Self::Tbank),
            "card" => Some(Self::Card),
            "paypal" => Some(Self::Paypal),
            "crypto" => Some(Self::Crypto),
            "qiwi" => Some(Self::Qiwi),
            _ => None,
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Top-up form as submitted
pub struct TopUpInput {
    pub amount: String,
    pub method: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum TopUpOutcome {
    /// Nothing credited yet; the user completes the transfer themselves
    Instructions {
        amount: Decimal,
        phone: String,
        comment: String,
    },
    Credited {
        amount: Decimal,
        method: PaymentMethod,
        new_balance: Decimal,
    },
}

pub struct TopUpUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
    config: Arc<MarketConfig>,
}

impl<U> TopUpUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>, config: Arc<MarketConfig>) -> Self {
        Self { user_repo, config }
    }

    pub async fn execute(&self, user: &User, input: TopUpInput) -> MarketResult<TopUpOutcome> {
        let mut missing = Vec::new();
        if input.amount.trim().is_empty() {
            missing.push("amount");
        }
        if input.method.trim().is_empty() {
            missing.push("method");
        }
        if !missing.is_empty() {
            return Err(MarketError::MissingFields(missing));
        }

        let amount = parse_amount(&input.amount)
            .filter(|a| *a > Decimal::ZERO)
            .ok_or_else(|| MarketError::InvalidAmount(input.amount.trim().to_string()))?;
        let method = PaymentMethod::from_code(&input.method)
            .ok_or_else(|| MarketError::UnknownPaymentMethod(input.method.trim().to_string()))?;

        active_account(self.user_repo.as_ref(), user).await?;

        if method == PaymentMethod::Tbank {
            simulate(self.config.instructions_latency).await;
            let outcome = TopUpOutcome::Instructions {
                amount,
                phone: self.config.platform.display_phone(),
                comment: top_up_comment(user),
            };
            tracing::info!(user_id = %user.user_id, %amount, "Bank transfer instructions issued");
            return Ok(outcome);
        }

        simulate(self.config.top_up_latency).await;

        // Re-read so concurrent admin changes are not overwritten
        let mut current = active_account(self.user_repo.as_ref(), user).await?;
        current.credit(amount);
        self.user_repo.update(&current).await?;

        tracing::info!(
            user_id = %current.user_id,
            %amount,
            %method,
            new_balance = %current.balance,
            "Balance topped up"
        );

        Ok(TopUpOutcome::Credited {
            amount,
            method,
            new_balance: current.balance,
        })
    }
}

/// Comment the user must put on a manual transfer
pub fn top_up_comment(user: &User) -> String {
    format!("Balance top-up #{}", user.user_id)
}
