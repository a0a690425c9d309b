mod address_tests;
mod balance_tests;
mod storage_tests;

use crate::config::LedgerSettings;
use crate::core::errors::LedgerError;
use crate::core::models::{
    Address, AuditEntry, ExpenseDraft, Group, GroupDraft, MemberDraft, ShareBasis, SplitType,
};
use crate::core::services::LedgerService;
use crate::core::validation::validate_group;
use crate::infrastructure::logging::AuditLog;
use crate::infrastructure::logging::in_memory::InMemoryAuditLog;
use crate::infrastructure::payments::simulated::SimulatedPayments;
use crate::infrastructure::storage::in_memory::InMemoryStore;
use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;

pub const ALICE: &str = "0xA11cE00000000000000000000000000000000001";
pub const BOB: &str = "0xB0B0000000000000000000000000000000000001";
pub const CAROL: &str = "0xCa70170000000000000000000000000000000001";
pub const DAVE: &str = "0xDa7e000000000000000000000000000000000001";

pub type TestService = LedgerService<InMemoryAuditLog, InMemoryStore, SimulatedPayments>;

pub fn addr(raw: &str) -> Address {
    Address::canonical(raw)
}

pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {} but got {}",
        expected,
        actual
    );
}

pub fn settings(share_basis: ShareBasis) -> LedgerSettings {
    LedgerSettings {
        share_basis,
        ..LedgerSettings::default()
    }
}

/// Service plus a handle on its payment gateway, which shares state with the
/// one inside the service.
pub fn create_test_service() -> (TestService, SimulatedPayments) {
    create_test_service_with(LedgerSettings::default())
}

pub fn create_test_service_with(settings: LedgerSettings) -> (TestService, SimulatedPayments) {
    let payments = SimulatedPayments::new();
    let service = LedgerService::new(
        InMemoryStore::new(),
        InMemoryAuditLog::new(),
        payments.clone(),
        settings,
    );
    (service, payments)
}

/// Audit log whose writes always fail.
pub struct FailingAuditLog;

#[async_trait]
impl AuditLog for FailingAuditLog {
    async fn log_action(
        &self,
        _group_id: Option<&str>,
        _action: &str,
        _details: serde_json::Value,
        _actor: Option<&str>,
    ) -> Result<(), LedgerError> {
        Err(LedgerError::LoggingError("audit store offline".to_string()))
    }

    async fn get_group_logs(&self, _group_id: &str) -> Result<Vec<AuditEntry>, LedgerError> {
        Ok(Vec::new())
    }
}

pub fn create_failing_audit_service() -> (
    LedgerService<FailingAuditLog, InMemoryStore, SimulatedPayments>,
    SimulatedPayments,
) {
    let payments = SimulatedPayments::new();
    let service = LedgerService::new(
        InMemoryStore::new(),
        FailingAuditLog,
        payments.clone(),
        LedgerSettings::default(),
    );
    (service, payments)
}

/// Alice (owner), Bob and Carol.
pub fn trip_draft() -> GroupDraft {
    GroupDraft {
        name: "Trip".to_string(),
        description: None,
        creator_address: ALICE.to_string(),
        creator_name: "Alice".to_string(),
        members: vec![MemberDraft::new("Bob", BOB), MemberDraft::new("Carol", CAROL)],
    }
}

pub fn trip_group() -> Group {
    validate_group(&trip_draft(), Utc::now()).unwrap()
}

pub fn equal_draft(description: &str, amount: f64, paid_by: &str, split_between: &[&str]) -> ExpenseDraft {
    ExpenseDraft {
        description: description.to_string(),
        amount,
        paid_by: paid_by.to_string(),
        split_between: split_between.iter().map(|s| s.to_string()).collect(),
        split_type: SplitType::Equal,
        custom_amounts: HashMap::new(),
    }
}

pub fn custom_draft(
    description: &str,
    amount: f64,
    paid_by: &str,
    shares: &[(&str, f64)],
) -> ExpenseDraft {
    ExpenseDraft {
        description: description.to_string(),
        amount,
        paid_by: paid_by.to_string(),
        split_between: shares.iter().map(|(a, _)| a.to_string()).collect(),
        split_type: SplitType::Custom,
        custom_amounts: shares.iter().map(|(a, v)| (a.to_string(), *v)).collect(),
    }
}

/// Validates `draft` against `group` and appends it, as the service would.
pub fn push_expense(group: &mut Group, draft: &ExpenseDraft) -> String {
    let validated = crate::core::validation::validate_expense(draft, group).unwrap();
    let expense = crate::core::models::Expense::from_validated(validated, Utc::now());
    let id = expense.id.clone();
    group.expenses.push(expense);
    id
}
