//! How a mod is paid for

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of payment for one purchase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PurchaseKind {
    /// Fixed price set by the author
    Paid,
    /// Amount chosen by the buyer
    Donation,
}

impl PurchaseKind {
    #[inline]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Paid => "paid",
            Self::Donation => "donation",
        }
    }
}

impl fmt::Display for PurchaseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Pricing {
    /// Free download, nothing to pay
    #[default]
    Free,
    Paid {
        price: Decimal,
    },
    /// Free download with optional support for the author
    Donation,
}

impl Pricing {
    /// `None` for free mods
    pub const fn purchase_kind(&self) -> Option<PurchaseKind> {
        match self {
            Pricing::Free => None,
            Pricing::Paid { .. } => Some(PurchaseKind::Paid),
            Pricing::Donation => Some(PurchaseKind::Donation),
        }
    }

    pub const fn price(&self) -> Option<Decimal> {
        match self {
            Pricing::Paid { price } => Some(*price),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_purchase_kind() {
        assert_eq!(Pricing::Free.purchase_kind(), None);
        assert_eq!(
            Pricing::Paid { price: Decimal::new(150, 0) }.purchase_kind(),
            Some(PurchaseKind::Paid)
        );
        assert_eq!(Pricing::Donation.purchase_kind(), Some(PurchaseKind::Donation));
    }

    #[test]
    fn test_pricing_serialization() {
        let json = serde_json::to_string(&Pricing::Paid { price: Decimal::new(9950, 2) }).unwrap();
        assert_eq!(json, r#"{"type":"paid","price":"99.50"}"#);
        let json = serde_json::to_string(&Pricing::Donation).unwrap();
        assert_eq!(json, r#"{"type":"donation"}"#);
    }
}
