use crate::config::LedgerSettings;
use crate::constants::{EXPENSE_ADDED, GROUP_CREATED, SETTLEMENT_CONFIRMED, SETTLEMENT_FAILED};
use crate::core::aggregate::{self, GroupStats, MemberBalanceView, PortfolioStats};
use crate::core::errors::LedgerError;
use crate::core::ledger::{self, Balances};
use crate::core::models::{
    Address, AuditEntry, Expense, ExpenseDraft, Group, GroupDraft, SettlementInstruction,
    SettlementReceipt,
};
use crate::core::settlement;
use crate::core::validation::{validate_expense, validate_group};
use crate::infrastructure::logging::AuditLog;
use crate::infrastructure::payments::{PaymentGateway, PaymentRecord};
use crate::infrastructure::storage::GroupStore;
use chrono::Utc;
use serde_json::json;
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use tracing::{debug, error, info, warn};

pub struct LedgerService<L: AuditLog, S: GroupStore, P: PaymentGateway> {
    storage: S,
    logging: L,
    payments: P,
    settings: LedgerSettings,
    in_flight: Mutex<HashSet<String>>,
    // Receipts for payments that went out but whose settled flag was never saved.
    unrecorded: Mutex<HashMap<String, SettlementReceipt>>,
}

// Releases an expense id from the in-flight set when the settlement attempt ends.
struct InFlightGuard<'a> {
    in_flight: &'a Mutex<HashSet<String>>,
    expense_id: String,
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        let mut set = self.in_flight.lock().unwrap_or_else(|e| e.into_inner());
        set.remove(&self.expense_id);
    }
}

impl<L: AuditLog, S: GroupStore, P: PaymentGateway> LedgerService<L, S, P> {
    pub fn new(storage: S, logging: L, payments: P, settings: LedgerSettings) -> Self {
        info!("Initializing LedgerService with {:?}", settings);
        LedgerService {
            storage,
            logging,
            payments,
            settings,
            in_flight: Mutex::new(HashSet::new()),
            unrecorded: Mutex::new(HashMap::new()),
        }
    }

    pub fn settings(&self) -> LedgerSettings {
        self.settings
    }

    async fn load_group(&self, group_id: &str) -> Result<Group, LedgerError> {
        self.storage
            .get_group(group_id)
            .await?
            .ok_or_else(|| LedgerError::GroupNotFound(group_id.to_string()))
    }

    async fn validate_group_membership(&self, group_id: &str, address: &Address) -> Result<Group, LedgerError> {
        let group = self.load_group(group_id).await?;
        if !group.is_member(address) {
            return Err(LedgerError::NotGroupMember(address.to_string()));
        }
        Ok(group)
    }

    async fn log_and_audit(
        &self,
        group_id: Option<&str>,
        action: &str,
        details: serde_json::Value,
        actor: Option<&Address>,
    ) -> Result<(), LedgerError> {
        self.logging
            .log_action(group_id, action, details, actor.map(Address::as_str))
            .await
    }

    fn begin_settlement(&self, expense_id: &str) -> Result<InFlightGuard<'_>, LedgerError> {
        let mut set = self.in_flight.lock().unwrap_or_else(|e| e.into_inner());
        if !set.insert(expense_id.to_string()) {
            return Err(LedgerError::SettlementInProgress(expense_id.to_string()));
        }
        Ok(InFlightGuard {
            in_flight: &self.in_flight,
            expense_id: expense_id.to_string(),
        })
    }

    pub async fn create_group(&self, draft: &GroupDraft) -> Result<Group, LedgerError> {
        info!("Creating group '{}' for {}", draft.name.trim(), draft.creator_address);
        let group = validate_group(draft, Utc::now())?;
        let group = self.storage.insert_group(group).await?;

        if let Err(e) = self
            .log_and_audit(
                Some(&group.id),
                GROUP_CREATED,
                json!({
                    "group_id": group.id,
                    "name": group.name,
                    "member_addresses": group.members.iter().map(|m| m.address.to_string()).collect::<Vec<_>>()
                }),
                Some(&group.creator),
            )
            .await
        {
            warn!("Group {} created but not audited: {}", group.id, e);
        }

        debug!("Group created with ID: {}", group.id);
        Ok(group)
    }

    pub async fn get_group(&self, group_id: &str) -> Result<Group, LedgerError> {
        self.load_group(group_id).await
    }

    pub async fn groups_for(&self, address: &Address) -> Result<Vec<Group>, LedgerError> {
        self.storage.get_member_groups(address).await
    }

    /// Validates `draft`, appends the resulting expense and saves the group.
    /// A concurrent modification surfaces as `VersionConflict`; the caller
    /// re-submits.
    pub async fn add_expense(
        &self,
        group_id: &str,
        draft: &ExpenseDraft,
        added_by: &Address,
    ) -> Result<Expense, LedgerError> {
        let mut group = self.validate_group_membership(group_id, added_by).await?;
        let validated = validate_expense(draft, &group)?;
        let expense = Expense::from_validated(validated, Utc::now());

        let expected_version = group.version;
        group.expenses.push(expense.clone());
        self.storage.save_group(group, expected_version).await?;

        if let Err(e) = self
            .log_and_audit(
                Some(group_id),
                EXPENSE_ADDED,
                json!({
                    "expense_id": expense.id,
                    "description": expense.description,
                    "amount": expense.amount,
                    "paid_by": expense.paid_by,
                    "split_type": expense.split_type,
                    "split_between": expense.split_between
                }),
                Some(added_by),
            )
            .await
        {
            warn!("Expense {} saved but not audited: {}", expense.id, e);
        }

        info!(
            "Expense {} ({}) added to group {}",
            expense.id, expense.amount, group_id
        );
        Ok(expense)
    }

    pub async fn group_balances(&self, group_id: &str) -> Result<Balances, LedgerError> {
        let group = self.load_group(group_id).await?;
        Ok(ledger::compute_balances(&group, self.settings.share_basis))
    }

    pub async fn member_balances(&self, group_id: &str, me: &Address) -> Result<Vec<MemberBalanceView>, LedgerError> {
        let group = self.load_group(group_id).await?;
        Ok(aggregate::member_balances(&group, Some(me), self.settings.share_basis))
    }

    pub async fn group_stats(&self, group_id: &str) -> Result<GroupStats, LedgerError> {
        let group = self.load_group(group_id).await?;
        Ok(aggregate::group_stats(&group))
    }

    pub async fn portfolio_stats(&self, address: &Address) -> Result<PortfolioStats, LedgerError> {
        let groups = self.groups_for(address).await?;
        Ok(aggregate::portfolio_stats(&groups))
    }

    pub async fn settleable_expenses(&self, group_id: &str, me: &Address) -> Result<Vec<Expense>, LedgerError> {
        let group = self.load_group(group_id).await?;
        Ok(settlement::settleable_expenses(&group, me)
            .into_iter()
            .cloned()
            .collect())
    }

    /// Works out what `me` has to pay to settle their share of an expense.
    /// Nothing is recorded.
    pub async fn request_settlement(
        &self,
        group_id: &str,
        expense_id: &str,
        me: &Address,
    ) -> Result<SettlementInstruction, LedgerError> {
        let group = self.load_group(group_id).await?;
        let expense = group
            .expense(expense_id)
            .ok_or_else(|| LedgerError::ExpenseNotFound(expense_id.to_string()))?;
        settlement::request_settlement(expense, me, self.settings.share_basis)
    }

    /// Pays `instruction` and records the expense as settled.
    ///
    /// Only one confirmation per expense may be in flight. If the group moved
    /// on while the payment was out, the settled flag is re-applied to the
    /// latest version, up to `commit_attempts` times. When every attempt fails
    /// the receipt is held back and `SettlementNotRecorded` is returned;
    /// confirming the same expense again saves that receipt without paying.
    pub async fn confirm_settlement(
        &self,
        group_id: &str,
        instruction: &SettlementInstruction,
    ) -> Result<SettlementReceipt, LedgerError> {
        let _guard = self.begin_settlement(&instruction.expense_id)?;

        if let Some(receipt) = self.unrecorded_receipt(&instruction.expense_id) {
            return self.record_unrecorded(group_id, instruction, receipt).await;
        }

        let mut group = self.load_group(group_id).await?;
        let receipt = match settlement::confirm_settlement(
            &mut group,
            instruction,
            self.settings.share_basis,
            &self.payments,
        )
        .await
        {
            Ok(receipt) => receipt,
            Err(e @ LedgerError::PaymentFailed(_)) => {
                if let Err(audit_err) = self
                    .log_and_audit(
                        Some(group_id),
                        SETTLEMENT_FAILED,
                        json!({
                            "expense_id": instruction.expense_id,
                            "to": instruction.to,
                            "amount": instruction.amount,
                            "reason": e.to_string()
                        }),
                        Some(&instruction.from),
                    )
                    .await
                {
                    warn!(
                        "Failed settlement of {} not audited: {}",
                        instruction.expense_id, audit_err
                    );
                }
                return Err(e);
            }
            Err(e) => return Err(e),
        };

        match self.commit_settled(group_id, group, &receipt).await {
            Ok(()) => {}
            Err(e @ LedgerError::AlreadySettled(_)) => return Err(e),
            Err(e) => return Err(self.hold_unrecorded(receipt, e)),
        }

        self.audit_confirmed(group_id, &receipt).await;
        Ok(receipt)
    }

    fn unrecorded_receipt(&self, expense_id: &str) -> Option<SettlementReceipt> {
        let held = self.unrecorded.lock().unwrap_or_else(|e| e.into_inner());
        held.get(expense_id).cloned()
    }

    fn forget_unrecorded(&self, expense_id: &str) {
        let mut held = self.unrecorded.lock().unwrap_or_else(|e| e.into_inner());
        held.remove(expense_id);
    }

    fn hold_unrecorded(&self, receipt: SettlementReceipt, cause: LedgerError) -> LedgerError {
        error!(
            "Payment {} went out but settlement of {} was not recorded: {}",
            receipt.reference, receipt.expense_id, cause
        );
        let err = LedgerError::SettlementNotRecorded {
            expense_id: receipt.expense_id.clone(),
            reference: receipt.reference.clone(),
        };
        let mut held = self.unrecorded.lock().unwrap_or_else(|e| e.into_inner());
        held.insert(receipt.expense_id.clone(), receipt);
        err
    }

    // Saves a receipt whose payment already went out. Never calls the gateway.
    async fn record_unrecorded(
        &self,
        group_id: &str,
        instruction: &SettlementInstruction,
        receipt: SettlementReceipt,
    ) -> Result<SettlementReceipt, LedgerError> {
        if receipt.from != instruction.from || receipt.to != instruction.to {
            return Err(LedgerError::InstructionMismatch);
        }
        info!(
            "Recording earlier payment {} for expense {}",
            receipt.reference, receipt.expense_id
        );

        let mut group = self.load_group(group_id).await?;
        if let Err(e) = Self::apply_settled(&mut group, &receipt) {
            self.forget_unrecorded(&receipt.expense_id);
            return Err(e);
        }
        match self.commit_settled(group_id, group, &receipt).await {
            Ok(()) => {}
            Err(e @ LedgerError::AlreadySettled(_)) => {
                self.forget_unrecorded(&receipt.expense_id);
                return Err(e);
            }
            Err(e) => return Err(self.hold_unrecorded(receipt, e)),
        }

        self.forget_unrecorded(&receipt.expense_id);
        self.audit_confirmed(group_id, &receipt).await;
        Ok(receipt)
    }

    fn apply_settled(group: &mut Group, receipt: &SettlementReceipt) -> Result<(), LedgerError> {
        let expense = group
            .expense_mut(&receipt.expense_id)
            .ok_or_else(|| LedgerError::ExpenseNotFound(receipt.expense_id.clone()))?;
        if !expense.mark_settled(receipt.settled_at) {
            error!(
                "Expense {} was settled elsewhere after payment {} went out",
                receipt.expense_id, receipt.reference
            );
            return Err(LedgerError::AlreadySettled(receipt.expense_id.clone()));
        }
        Ok(())
    }

    // `pending` already carries the settled flag.
    async fn commit_settled(
        &self,
        group_id: &str,
        mut pending: Group,
        receipt: &SettlementReceipt,
    ) -> Result<(), LedgerError> {
        let mut attempt = 1;
        loop {
            let expected_version = pending.version;
            match self.storage.save_group(pending, expected_version).await {
                Ok(_) => return Ok(()),
                Err(LedgerError::VersionConflict { found, .. }) if attempt < self.settings.commit_attempts => {
                    warn!(
                        "Group {} moved from version {} to {} during settlement, retrying commit",
                        group_id, expected_version, found
                    );
                    attempt += 1;
                    pending = self.load_group(group_id).await?;
                    Self::apply_settled(&mut pending, receipt)?;
                }
                Err(e) => return Err(e),
            }
        }
    }

    async fn audit_confirmed(&self, group_id: &str, receipt: &SettlementReceipt) {
        if let Err(e) = self
            .log_and_audit(
                Some(group_id),
                SETTLEMENT_CONFIRMED,
                json!({
                    "expense_id": receipt.expense_id,
                    "to": receipt.to,
                    "amount": receipt.amount,
                    "reference": receipt.reference
                }),
                Some(&receipt.from),
            )
            .await
        {
            warn!("Settlement of {} recorded but not audited: {}", receipt.expense_id, e);
        }
    }

    pub async fn payment_history(&self) -> Vec<PaymentRecord> {
        self.payments.history().await
    }

    pub async fn audit_trail(&self, group_id: &str) -> Result<Vec<AuditEntry>, LedgerError> {
        self.load_group(group_id).await?;
        self.logging.get_group_logs(group_id).await
    }
}
