use crate::core::errors::LedgerError;
use crate::core::models::AuditEntry;
use crate::infrastructure::logging::AuditLog;
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

#[derive(Clone, Default)]
pub struct InMemoryAuditLog {
    logs: Arc<RwLock<Vec<AuditEntry>>>,
}

impl InMemoryAuditLog {
    pub fn new() -> Self {
        InMemoryAuditLog {
            logs: Arc::new(RwLock::new(Vec::new())),
        }
    }
}

#[async_trait]
impl AuditLog for InMemoryAuditLog {
    async fn log_action(
        &self,
        group_id: Option<&str>,
        action: &str,
        details: serde_json::Value,
        actor: Option<&str>,
    ) -> Result<(), LedgerError> {
        let details = serde_json::from_value(details)
            .map_err(|e| LedgerError::LoggingError(format!("Failed to serialize log details: {}", e)))?;
        let mut logs = self.logs.write().await;
        logs.push(AuditEntry {
            id: Uuid::new_v4().to_string(),
            group_id: group_id.map(String::from),
            action: action.to_string(),
            actor: actor.map(String::from),
            details,
            timestamp: chrono::Utc::now(),
        });
        Ok(())
    }

    async fn get_group_logs(&self, group_id: &str) -> Result<Vec<AuditEntry>, LedgerError> {
        let logs = self.logs.read().await;
        Ok(logs
            .iter()
            .filter(|l| l.group_id.as_deref() == Some(group_id))
            .cloned()
            .collect())
    }
}
