//! Purchase Record
//!
//! Built for a single purchase, handed to the audit log and then dropped.

use chrono::{DateTime, Utc};
use kernel::id::{ModId, PurchaseId, UserId};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::domain::value_object::pricing::PurchaseKind;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PurchaseRecord {
    pub purchase_id: PurchaseId,
    pub mod_id: ModId,
    pub mod_title: String,
    pub author_id: UserId,
    pub author_name: String,
    pub buyer_id: UserId,
    pub buyer_name: String,
    pub amount: Decimal,
    pub kind: PurchaseKind,
    pub timestamp: DateTime<Utc>,
}
