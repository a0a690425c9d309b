pub mod in_memory;

use crate::core::errors::LedgerError;
use crate::core::models::AuditEntry;
use async_trait::async_trait;

#[async_trait]
pub trait AuditLog: Send + Sync {
    async fn log_action(
        &self,
        group_id: Option<&str>,
        action: &str,
        details: serde_json::Value,
        actor: Option<&str>,
    ) -> Result<(), LedgerError>;
    async fn get_group_logs(&self, group_id: &str) -> Result<Vec<AuditEntry>, LedgerError>;
}
