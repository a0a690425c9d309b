/// Absolute tolerance when comparing a custom split total to the expense amount.
pub const SPLIT_TOLERANCE: f64 = 0.01;

pub const DEFAULT_COMMIT_ATTEMPTS: u32 = 3;

// Audit actions
pub const GROUP_CREATED: &str = "GROUP_CREATED";
pub const EXPENSE_ADDED: &str = "EXPENSE_ADDED";
pub const SETTLEMENT_CONFIRMED: &str = "SETTLEMENT_CONFIRMED";
pub const SETTLEMENT_FAILED: &str = "SETTLEMENT_FAILED";
