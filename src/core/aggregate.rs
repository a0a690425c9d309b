use crate::core::ledger::compute_balances;
use crate::core::models::{Address, Expense, Group, ShareBasis};
use serde::Serialize;

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct GroupStats {
    pub total_amount: f64,
    pub total_count: usize,
    pub settled_count: usize,
    pub pending_count: usize,
    /// Settled share of expenses in `[0, 1]`; 0 for a group without expenses.
    pub settlement_progress: f64,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct PortfolioStats {
    pub group_count: usize,
    pub total_amount: f64,
    pub total_count: usize,
    pub settled_count: usize,
    pub pending_count: usize,
    pub settlement_progress: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MemberBalanceView {
    pub address: Address,
    pub label: String,
    pub is_owner: bool,
    pub is_you: bool,
    pub balance: f64,
}

fn progress(settled: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        settled as f64 / total as f64
    }
}

pub fn group_stats(group: &Group) -> GroupStats {
    let total_amount = group.expenses.iter().map(|e| e.amount).sum();
    let total_count = group.expenses.len();
    let settled_count = group.expenses.iter().filter(|e| e.settled).count();

    GroupStats {
        total_amount,
        total_count,
        settled_count,
        pending_count: total_count - settled_count,
        settlement_progress: progress(settled_count, total_count),
    }
}

pub fn portfolio_stats(groups: &[Group]) -> PortfolioStats {
    let mut stats = groups.iter().map(group_stats).fold(
        PortfolioStats {
            group_count: groups.len(),
            ..PortfolioStats::default()
        },
        |mut acc, g| {
            acc.total_amount += g.total_amount;
            acc.total_count += g.total_count;
            acc.settled_count += g.settled_count;
            acc.pending_count += g.pending_count;
            acc
        },
    );
    stats.settlement_progress = progress(stats.settled_count, stats.total_count);
    stats
}

/// "You" for the current identity, otherwise the member's name, otherwise the
/// shortened address.
pub fn label_for(group: &Group, address: &Address, me: Option<&Address>) -> String {
    if me == Some(address) {
        return "You".to_string();
    }
    group
        .member(address)
        .map(|m| m.name.clone())
        .unwrap_or_else(|| address.short())
}

pub fn member_balances(group: &Group, me: Option<&Address>, basis: ShareBasis) -> Vec<MemberBalanceView> {
    let balances = compute_balances(group, basis);
    group
        .members
        .iter()
        .map(|m| MemberBalanceView {
            address: m.address.clone(),
            label: label_for(group, &m.address, me),
            is_owner: m.is_owner,
            is_you: me == Some(&m.address),
            balance: balances.get(&m.address).unwrap_or(0.0),
        })
        .collect()
}

/// Even share shown next to an expense ("per person").
pub fn per_person_share(expense: &Expense) -> f64 {
    if expense.split_between.is_empty() {
        return 0.0;
    }
    expense.amount / expense.split_between.len() as f64
}
