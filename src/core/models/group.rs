use super::address::Address;
use super::expense::Expense;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Member {
    pub address: Address,
    pub name: String,
    pub is_owner: bool,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Group {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub creator: Address,
    pub created_at: DateTime<Utc>,
    pub members: Vec<Member>,
    pub expenses: Vec<Expense>,
    /// Bumped by the store on every successful save.
    pub version: u64,
}

impl Group {
    pub fn member(&self, address: &Address) -> Option<&Member> {
        self.members.iter().find(|m| m.address == *address)
    }

    pub fn is_member(&self, address: &Address) -> bool {
        self.member(address).is_some()
    }

    pub fn owner(&self) -> Option<&Member> {
        self.members.iter().find(|m| m.is_owner)
    }

    pub fn expense(&self, expense_id: &str) -> Option<&Expense> {
        self.expenses.iter().find(|e| e.id == expense_id)
    }

    pub fn expense_mut(&mut self, expense_id: &str) -> Option<&mut Expense> {
        self.expenses.iter_mut().find(|e| e.id == expense_id)
    }

    pub fn unsettled_expenses(&self) -> impl Iterator<Item = &Expense> {
        self.expenses.iter().filter(|e| !e.settled)
    }
}

/// Input for group creation. The creator is added as owner implicitly and
/// must not appear in `members`.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct GroupDraft {
    pub name: String,
    pub description: Option<String>,
    pub creator_address: String,
    pub creator_name: String,
    pub members: Vec<MemberDraft>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct MemberDraft {
    pub name: String,
    pub address: String,
}

impl MemberDraft {
    pub fn new(name: &str, address: &str) -> Self {
        MemberDraft {
            name: name.to_string(),
            address: address.to_string(),
        }
    }
}
