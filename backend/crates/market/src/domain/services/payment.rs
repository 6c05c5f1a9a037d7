//! Payment Split
//!
//! Every purchase is split between the platform and the author with a flat
//! commission. Amounts are `Decimal`, so `platform_fee + author_earnings`
//! equals the purchase amount exactly.
//!
//! Nothing here moves money: [`log_transaction`] writes the split to the
//! `audit` log target and that is the whole "payout".

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::domain::entity::purchase::PurchaseRecord;
use crate::domain::value_object::pricing::PurchaseKind;

/// Platform commission on every purchase (10%)
pub const COMMISSION_RATE: Decimal = Decimal::from_parts(10, 0, 0, false, 2);

/// Phone number the platform commission is sent to
pub const DEFAULT_PAYOUT_PHONE: &str = "+79126647918";

/// Log target for purchase summaries
pub const AUDIT_TARGET: &str = "audit";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PaymentDistribution {
    pub platform_fee: Decimal,
    pub author_earnings: Decimal,
    /// Always zero; kept so receipts have a stable shape
    pub service_fee: Decimal,
}

impl PaymentDistribution {
    pub fn total(&self) -> Decimal {
        self.platform_fee + self.author_earnings + self.service_fee
    }
}

/// Split `amount` with the flat commission.
///
/// The kind does not change the rate. Callers are responsible for rejecting
/// negative amounts and donations under the minimum.
pub fn compute_distribution(amount: Decimal, _kind: PurchaseKind) -> PaymentDistribution {
    split(amount, COMMISSION_RATE)
}

fn split(amount: Decimal, rate: Decimal) -> PaymentDistribution {
    let platform_fee = amount * rate;
    PaymentDistribution {
        platform_fee,
        author_earnings: amount - platform_fee,
        service_fee: Decimal::ZERO,
    }
}

/// Payout details shown to users and written to the audit log
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformConfig {
    /// E.164 phone number receiving the commission
    pub owner_phone: String,
    /// Rate actually applied to every purchase
    pub commission_rate: Decimal,
    /// Advertised author share for paid mods (display only)
    pub author_commission_rate: Decimal,
    /// Advertised author share for donations (display only)
    pub donation_commission_rate: Decimal,
}

impl Default for PlatformConfig {
    fn default() -> Self {
        Self {
            owner_phone: DEFAULT_PAYOUT_PHONE.to_string(),
            commission_rate: COMMISSION_RATE,
            author_commission_rate: Decimal::new(70, 2),
            donation_commission_rate: Decimal::new(85, 2),
        }
    }
}

impl PlatformConfig {
    /// Split with this config's commission rate
    pub fn distribution(&self, amount: Decimal, _kind: PurchaseKind) -> PaymentDistribution {
        split(amount, self.commission_rate)
    }

    pub fn with_owner_phone(mut self, phone: impl Into<String>) -> Self {
        self.owner_phone = phone.into();
        self
    }

    /// `+79126647918` → `+7 (912) 664-79-18`; other formats are returned as is
    pub fn display_phone(&self) -> String {
        let digits: String = self.owner_phone.chars().filter(char::is_ascii_digit).collect();
        if self.owner_phone.starts_with("+7") && digits.len() == 11 {
            format!(
                "+7 ({}) {}-{}-{}",
                &digits[1..4],
                &digits[4..7],
                &digits[7..9],
                &digits[9..11]
            )
        } else {
            self.owner_phone.clone()
        }
    }
}

/// Who a payout comment is addressed to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Payee {
    Platform,
    Author,
}

/// Transfer comment for a payout
pub fn payment_comment(mod_title: &str, payee: Payee, at: DateTime<Utc>) -> String {
    let timestamp = at.format("%d.%m.%Y, %H:%M:%S");
    match payee {
        Payee::Platform => format!("MX Bikes commission: \"{mod_title}\" - {timestamp}"),
        Payee::Author => format!("Mod sale: \"{mod_title}\" - {timestamp}"),
    }
}

/// Write the purchase and its split to the audit log
pub fn log_transaction(
    record: &PurchaseRecord,
    distribution: &PaymentDistribution,
    config: &PlatformConfig,
) {
    tracing::info!(
        target: AUDIT_TARGET,
        purchase_id = %record.purchase_id,
        mod_id = %record.mod_id,
        mod_title = %record.mod_title,
        author = %record.author_name,
        buyer = %record.buyer_name,
        amount = %record.amount,
        kind = %record.kind,
        "Processing purchase"
    );
    tracing::info!(
        target: AUDIT_TARGET,
        purchase_id = %record.purchase_id,
        payee = %config.owner_phone,
        amount = %distribution.platform_fee,
        comment = %payment_comment(&record.mod_title, Payee::Platform, record.timestamp),
        "Platform commission"
    );
    tracing::info!(
        target: AUDIT_TARGET,
        purchase_id = %record.purchase_id,
        payee = %record.author_name,
        amount = %distribution.author_earnings,
        comment = %payment_comment(&record.mod_title, Payee::Author, record.timestamp),
        "Author payout"
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_ten_percent_split() {
        let d = compute_distribution(dec("100"), PurchaseKind::Paid);
        assert_eq!(d.platform_fee, dec("10"));
        assert_eq!(d.author_earnings, dec("90"));
        assert_eq!(d.service_fee, Decimal::ZERO);
    }

    #[test]
    fn test_rate_does_not_depend_on_kind() {
        let paid = compute_distribution(dec("250"), PurchaseKind::Paid);
        let donation = compute_distribution(dec("250"), PurchaseKind::Donation);
        assert_eq!(paid, donation);
    }

    #[test]
    fn test_split_sums_exactly() {
        for amount in ["0", "0.01", "50", "99.99", "149.5", "1234.567", "999999"] {
            let amount = dec(amount);
            let d = compute_distribution(amount, PurchaseKind::Donation);
            assert_eq!(d.platform_fee + d.author_earnings, amount);
            assert_eq!(d.total(), amount);
            assert_eq!(d.platform_fee, amount * dec("0.1"));
        }
    }

    #[test]
    fn test_zero_amount() {
        let d = compute_distribution(Decimal::ZERO, PurchaseKind::Donation);
        assert!(d.platform_fee.is_zero());
        assert!(d.author_earnings.is_zero());
    }

    #[test]
    fn test_platform_config_defaults() {
        let config = PlatformConfig::default();
        assert_eq!(config.owner_phone, "+79126647918");
        assert_eq!(config.commission_rate, dec("0.1"));
        assert_eq!(config.author_commission_rate, dec("0.7"));
        assert_eq!(config.donation_commission_rate, dec("0.85"));
    }

    #[test]
    fn test_config_distribution_matches_default_split() {
        let config = PlatformConfig::default();
        let amount = dec("773.50");
        assert_eq!(
            config.distribution(amount, PurchaseKind::Paid),
            compute_distribution(amount, PurchaseKind::Paid)
        );
    }

    #[test]
    fn test_display_phone() {
        assert_eq!(PlatformConfig::default().display_phone(), "+7 (912) 664-79-18");
        let other = PlatformConfig::default().with_owner_phone("+441234567890");
        assert_eq!(other.display_phone(), "+441234567890");
    }

    #[test]
    fn test_payment_comment() {
        let at = Utc.with_ymd_and_hms(2024, 1, 10, 15, 4, 5).unwrap();
        assert_eq!(
            payment_comment("KTM 450 SX-F 2024", Payee::Platform, at),
            "MX Bikes commission: \"KTM 450 SX-F 2024\" - 10.01.2024, 15:04:05"
        );
        assert_eq!(
            payment_comment("Desert Trail", Payee::Author, at),
            "Mod sale: \"Desert Trail\" - 10.01.2024, 15:04:05"
        );
    }
}
