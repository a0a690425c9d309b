pub mod config;
pub mod constants;
pub mod core;
pub mod infrastructure;

pub use crate::config::{CONFIG, Config, LedgerSettings};
pub use crate::core::errors::{ErrorKind, LedgerError};
pub use crate::core::ledger::Balances;
pub use crate::core::models::{
    Address, Expense, ExpenseDraft, Group, GroupDraft, Member, MemberDraft, SettlementInstruction,
    SettlementReceipt, ShareBasis, SplitType,
};
pub use crate::core::services::LedgerService;
pub use crate::infrastructure::logging::in_memory::InMemoryAuditLog;
pub use crate::infrastructure::payments::simulated::SimulatedPayments;
pub use crate::infrastructure::storage::in_memory::InMemoryStore;

#[cfg(test)]
mod tests;
