use crate::core::errors::LedgerError;
use crate::core::models::{Address, Group};
use crate::infrastructure::storage::GroupStore;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Clone, Default)]
pub struct InMemoryStore {
    groups: Arc<RwLock<HashMap<String, Group>>>,
    // Creation order, so listings come back stable.
    order: Arc<RwLock<Vec<String>>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        InMemoryStore {
            groups: Arc::new(RwLock::new(HashMap::new())),
            order: Arc::new(RwLock::new(Vec::new())),
        }
    }
}

#[async_trait]
impl GroupStore for InMemoryStore {
    async fn insert_group(&self, group: Group) -> Result<Group, LedgerError> {
        let mut groups = self.groups.write().await;
        if groups.contains_key(&group.id) {
            return Err(LedgerError::StorageError(format!(
                "group {} already exists",
                group.id
            )));
        }
        let mut order = self.order.write().await;
        order.push(group.id.clone());
        groups.insert(group.id.clone(), group.clone());
        Ok(group)
    }

    async fn get_group(&self, group_id: &str) -> Result<Option<Group>, LedgerError> {
        let groups = self.groups.read().await;
        Ok(groups.get(group_id).cloned())
    }

    async fn save_group(&self, mut group: Group, expected_version: u64) -> Result<Group, LedgerError> {
        let mut groups = self.groups.write().await;
        let stored = groups
            .get(&group.id)
            .ok_or_else(|| LedgerError::GroupNotFound(group.id.clone()))?;
        if stored.version != expected_version {
            return Err(LedgerError::VersionConflict {
                expected: expected_version,
                found: stored.version,
            });
        }
        group.version = expected_version + 1;
        groups.insert(group.id.clone(), group.clone());
        Ok(group)
    }

    async fn get_member_groups(&self, address: &Address) -> Result<Vec<Group>, LedgerError> {
        let groups = self.groups.read().await;
        let order = self.order.read().await;
        Ok(order
            .iter()
            .filter_map(|id| groups.get(id))
            .filter(|g| g.is_member(address))
            .cloned()
            .collect())
    }
}
