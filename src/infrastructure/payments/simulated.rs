use super::{PaymentError, PaymentGateway, PaymentRecord};
use crate::core::models::Address;
use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

/// Gateway that never touches a network. Every successful call gets a fresh
/// `0x`-prefixed 64 hex digit reference and is kept in the history.
#[derive(Clone, Default)]
pub struct SimulatedPayments {
    history: Arc<RwLock<Vec<PaymentRecord>>>,
    failures_remaining: Arc<RwLock<u32>>,
    calls: Arc<RwLock<usize>>,
}

impl SimulatedPayments {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes the next `count` calls to `send` fail.
    pub async fn fail_next(&self, count: u32) {
        *self.failures_remaining.write().await = count;
    }

    /// Number of `send` calls, failed ones included.
    pub async fn call_count(&self) -> usize {
        *self.calls.read().await
    }
}

#[async_trait]
impl PaymentGateway for SimulatedPayments {
    async fn send(&self, to: &Address, amount: f64) -> Result<String, PaymentError> {
        *self.calls.write().await += 1;
        {
            let mut failures = self.failures_remaining.write().await;
            if *failures > 0 {
                *failures -= 1;
                return Err(PaymentError::Unavailable("simulated outage".to_string()));
            }
        }
        if !(amount.is_finite() && amount > 0.0) {
            return Err(PaymentError::Rejected(format!("invalid amount {}", amount)));
        }

        let reference = format!(
            "0x{}{}",
            Uuid::new_v4().simple(),
            Uuid::new_v4().simple()
        );
        self.history.write().await.push(PaymentRecord {
            to: to.clone(),
            amount,
            reference: reference.clone(),
            timestamp: Utc::now(),
        });
        Ok(reference)
    }

    async fn history(&self) -> Vec<PaymentRecord> {
        self.history.read().await.clone()
    }
}
