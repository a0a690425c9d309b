use crate::core::models::{Address, Group, ShareBasis};
use serde::Serialize;

/// Net position of every member of a group, in member order.
/// Positive means the member is owed money, negative means they owe.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Balances {
    entries: Vec<(Address, f64)>,
}

impl Balances {
    pub fn get(&self, address: &Address) -> Option<f64> {
        self.entries
            .iter()
            .find(|(a, _)| a == address)
            .map(|(_, balance)| *balance)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Address, f64)> {
        self.entries.iter().map(|(a, b)| (a, *b))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum over all members; zero for groups whose unsettled expenses split evenly.
    pub fn total(&self) -> f64 {
        self.entries.iter().map(|(_, b)| b).sum()
    }

    fn adjust(&mut self, address: &Address, delta: f64) {
        match self.entries.iter_mut().find(|(a, _)| a == address) {
            Some((_, balance)) => *balance += delta,
            None => self.entries.push((address.clone(), delta)),
        }
    }
}

/// Derives every member's net balance from the group's unsettled expenses.
///
/// The payer is credited with the full amount and each participant debited
/// with their share under `basis`. Settled expenses are skipped. Nothing is
/// cached on the group; call this again after any mutation.
pub fn compute_balances(group: &Group, basis: ShareBasis) -> Balances {
    let mut balances = Balances {
        entries: group.members.iter().map(|m| (m.address.clone(), 0.0)).collect(),
    };

    for expense in group.unsettled_expenses() {
        balances.adjust(&expense.paid_by, expense.amount);
        for participant in &expense.split_between {
            balances.adjust(participant, -expense.share_of(participant, basis));
        }
    }

    balances
}
