use crate::constants::SPLIT_TOLERANCE;
use crate::core::errors::LedgerError;
use crate::core::models::{
    Address, Expense, Group, SettlementInstruction, SettlementReceipt, ShareBasis,
};
use crate::infrastructure::payments::PaymentGateway;
use chrono::Utc;
use tracing::{debug, info, warn};

/// First phase of settling one member's share of one expense.
///
/// Returns the payment that would settle it without touching any state, so
/// the caller is free to drop it.
pub fn request_settlement(
    expense: &Expense,
    settling_member: &Address,
    basis: ShareBasis,
) -> Result<SettlementInstruction, LedgerError> {
    if expense.settled {
        return Err(LedgerError::AlreadySettled(expense.id.clone()));
    }
    if !expense.is_participant(settling_member) {
        return Err(LedgerError::NotAParticipant(settling_member.to_string()));
    }
    if *settling_member == expense.paid_by {
        return Err(LedgerError::PayerCannotSettleOwnExpense);
    }

    let amount = expense.share_of(settling_member, basis);
    if !(amount.is_finite() && amount > 0.0) {
        return Err(LedgerError::NothingOwed);
    }

    debug!(
        "Settlement of {} requested by {} for {}",
        expense.id, settling_member, amount
    );
    Ok(SettlementInstruction {
        expense_id: expense.id.clone(),
        from: settling_member.clone(),
        to: expense.paid_by.clone(),
        amount,
    })
}

/// Second phase: pays through `payments` and, only once the payment went
/// through, marks the expense settled.
///
/// The instruction must still match what `request_settlement` would issue
/// under `basis`, amount included. A failed payment leaves the group
/// untouched so the member can retry.
pub async fn confirm_settlement<P>(
    group: &mut Group,
    instruction: &SettlementInstruction,
    basis: ShareBasis,
    payments: &P,
) -> Result<SettlementReceipt, LedgerError>
where
    P: PaymentGateway + ?Sized,
{
    let expense = group
        .expense(&instruction.expense_id)
        .ok_or_else(|| LedgerError::ExpenseNotFound(instruction.expense_id.clone()))?;

    if expense.settled {
        return Err(LedgerError::AlreadySettled(expense.id.clone()));
    }
    if expense.paid_by != instruction.to
        || instruction.from == instruction.to
        || !expense.is_participant(&instruction.from)
        || !(instruction.amount.is_finite() && instruction.amount > 0.0)
        || (instruction.amount - expense.share_of(&instruction.from, basis)).abs() > SPLIT_TOLERANCE
    {
        return Err(LedgerError::InstructionMismatch);
    }

    info!(
        "Sending {} to {} to settle expense {}",
        instruction.amount, instruction.to, instruction.expense_id
    );
    let reference = payments
        .send(&instruction.to, instruction.amount)
        .await
        .map_err(|e| {
            warn!("Payment for expense {} failed: {}", instruction.expense_id, e);
            LedgerError::PaymentFailed(e.to_string())
        })?;

    let settled_at = Utc::now();
    let expense = group
        .expense_mut(&instruction.expense_id)
        .ok_or_else(|| LedgerError::ExpenseNotFound(instruction.expense_id.clone()))?;
    expense.mark_settled(settled_at);

    info!("Expense {} settled with payment {}", expense.id, reference);
    Ok(SettlementReceipt {
        expense_id: instruction.expense_id.clone(),
        from: instruction.from.clone(),
        to: instruction.to.clone(),
        amount: instruction.amount,
        reference,
        settled_at,
    })
}

/// Unsettled expenses `me` still owes a share of, in group order.
pub fn settleable_expenses<'a>(group: &'a Group, me: &Address) -> Vec<&'a Expense> {
    group
        .unsettled_expenses()
        .filter(|e| e.is_participant(me) && e.paid_by != *me)
        .collect()
}
