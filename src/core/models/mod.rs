pub mod address;
pub mod audit;
pub mod expense;
pub mod group;
pub mod settlement;

pub use address::Address;
pub use audit::AuditEntry;
pub use expense::{Expense, ExpenseDraft, ShareBasis, SplitType, ValidatedExpense};
pub use group::{Group, GroupDraft, Member, MemberDraft};
pub use settlement::{SettlementInstruction, SettlementReceipt};
