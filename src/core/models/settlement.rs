use super::address::Address;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single payment that would settle one member's share of one expense.
/// Produced by `request_settlement`; nothing is stored until it is confirmed.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct SettlementInstruction {
    pub expense_id: String,
    pub from: Address,
    pub to: Address,
    pub amount: f64,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct SettlementReceipt {
    pub expense_id: String,
    pub from: Address,
    pub to: Address,
    pub amount: f64,
    /// Transaction hash returned by the payment gateway.
    pub reference: String,
    #[serde(with = "chrono::serde::ts_seconds")]
    pub settled_at: DateTime<Utc>,
}
