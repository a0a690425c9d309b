use crate::core::errors::LedgerError;
use crate::core::models::{Address, Group};
use async_trait::async_trait;

/// Durable home of group graphs.
///
/// `save_group` is a compare-and-swap on `Group::version`: it fails with
/// `VersionConflict` unless the stored version equals `expected_version`, and
/// returns the group with its version bumped on success.
#[async_trait]
pub trait GroupStore: Send + Sync {
    async fn insert_group(&self, group: Group) -> Result<Group, LedgerError>;
    async fn get_group(&self, group_id: &str) -> Result<Option<Group>, LedgerError>;
    async fn save_group(&self, group: Group, expected_version: u64) -> Result<Group, LedgerError>;
    async fn get_member_groups(&self, address: &Address) -> Result<Vec<Group>, LedgerError>;
}

pub mod in_memory;
