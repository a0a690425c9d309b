pub mod simulated;

use crate::core::models::Address;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PaymentError {
    #[error("payment rejected: {0}")]
    Rejected(String),
    #[error("payment network unavailable: {0}")]
    Unavailable(String),
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct PaymentRecord {
    pub to: Address,
    pub amount: f64,
    pub reference: String,
    pub timestamp: DateTime<Utc>,
}

/// Executes transfers on the token network. `send` returns the transaction
/// hash of the submitted transfer.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    async fn send(&self, to: &Address, amount: f64) -> Result<String, PaymentError>;
    async fn history(&self) -> Vec<PaymentRecord>;
}
