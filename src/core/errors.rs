use serde::Serialize;
use thiserror::Error;

/// Broad classes of failure, used by callers to decide how to present an error.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum ErrorKind {
    Validation,
    Settlement,
    Collaborator,
    Lookup,
    /// Someone else changed the group first; reload and re-submit.
    Conflict,
}

#[derive(Error, Debug, Serialize, PartialEq)]
pub enum LedgerError {
    /// A required draft field is empty or absent
    #[error("Missing required field `{0}`")]
    MissingField(String),

    /// Amount is not a finite number greater than zero
    #[error("Amount must be a finite number greater than 0")]
    InvalidAmount,

    /// A split was requested over zero participants
    #[error("Split requires at least one participant")]
    InvalidSplit,

    /// Custom split amounts don't add up to the expense amount
    #[error("Split amounts total {actual} but expense amount is {expected}")]
    SplitMismatch { expected: f64, actual: f64 },

    #[error("Invalid wallet address: {0}")]
    InvalidAddress(String),

    #[error("Address {0} is already a group member")]
    DuplicateMember(String),

    /// Two custom amounts name the same address in different letter case
    #[error("Address {0} has more than one custom amount")]
    DuplicateSplitEntry(String),

    #[error("Address {0} is not a group member")]
    NotGroupMember(String),

    /// Group has an invalid number of owners (must be exactly 1)
    #[error("Invalid owner count: {0}")]
    InvalidOwnerCount(usize),

    #[error("Expense {0} is already settled")]
    AlreadySettled(String),

    #[error("Address {0} is not a participant of this expense")]
    NotAParticipant(String),

    #[error("The payer cannot settle their own expense")]
    PayerCannotSettleOwnExpense,

    #[error("Nothing is owed on this expense")]
    NothingOwed,

    /// Instruction no longer matches the expense it was issued for
    #[error("Settlement instruction does not match the expense")]
    InstructionMismatch,

    #[error("Settlement of expense {0} is already in progress")]
    SettlementInProgress(String),

    #[error("Payment failed: {0}")]
    PaymentFailed(String),

    /// Payment went out but the settled flag could not be saved. Confirming
    /// the same expense again records it without paying a second time.
    #[error("Payment {reference} for expense {expense_id} sent but not recorded")]
    SettlementNotRecorded { expense_id: String, reference: String },

    #[error("Storage error: {0}")]
    StorageError(String),

    #[error("Logging error: {0}")]
    LoggingError(String),

    #[error("Group {0} not found")]
    GroupNotFound(String),

    #[error("Expense {0} not found")]
    ExpenseNotFound(String),

    /// Group was modified by someone else since it was read
    #[error("Version conflict: expected {expected}, found {found}")]
    VersionConflict { expected: u64, found: u64 },
}

impl LedgerError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            LedgerError::MissingField(_)
            | LedgerError::InvalidAmount
            | LedgerError::InvalidSplit
            | LedgerError::SplitMismatch { .. }
            | LedgerError::InvalidAddress(_)
            | LedgerError::DuplicateMember(_)
            | LedgerError::DuplicateSplitEntry(_)
            | LedgerError::NotGroupMember(_)
            | LedgerError::InvalidOwnerCount(_) => ErrorKind::Validation,
            LedgerError::AlreadySettled(_)
            | LedgerError::NotAParticipant(_)
            | LedgerError::PayerCannotSettleOwnExpense
            | LedgerError::NothingOwed
            | LedgerError::InstructionMismatch
            | LedgerError::SettlementInProgress(_) => ErrorKind::Settlement,
            LedgerError::PaymentFailed(_)
            | LedgerError::SettlementNotRecorded { .. }
            | LedgerError::StorageError(_)
            | LedgerError::LoggingError(_) => ErrorKind::Collaborator,
            LedgerError::GroupNotFound(_) | LedgerError::ExpenseNotFound(_) => ErrorKind::Lookup,
            LedgerError::VersionConflict { .. } => ErrorKind::Conflict,
        }
    }

    pub fn missing(field: &str) -> Self {
        LedgerError::MissingField(field.to_string())
    }
}
