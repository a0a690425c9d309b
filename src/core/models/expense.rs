use super::address::Address;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SplitType {
    Equal,
    Custom,
}

impl std::fmt::Display for SplitType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            SplitType::Equal => "equal",
            SplitType::Custom => "custom",
        };
        write!(f, "{}", s)
    }
}

/// Which owed amount the ledger and the settlement flow charge a participant.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ShareBasis {
    /// `amount / |split_between|`, whatever the recorded split type.
    Equal,
    /// `split_amounts[participant]` as recorded at creation.
    #[default]
    Recorded,
}

impl std::str::FromStr for ShareBasis {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "equal" => Ok(ShareBasis::Equal),
            "recorded" => Ok(ShareBasis::Recorded),
            other => Err(format!("unknown share basis `{}`", other)),
        }
    }
}

/// Raw expense input as collected from the caller, before validation.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ExpenseDraft {
    pub description: String,
    pub amount: f64,
    pub paid_by: String,
    pub split_between: Vec<String>,
    pub split_type: SplitType,
    #[serde(default)]
    pub custom_amounts: HashMap<String, f64>,
}

/// Normalized output of expense validation.
#[derive(Clone, Debug, PartialEq)]
pub struct ValidatedExpense {
    pub description: String,
    pub amount: f64,
    pub paid_by: Address,
    pub split_type: SplitType,
    pub split_between: Vec<Address>,
    pub split_amounts: HashMap<Address, f64>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Expense {
    pub id: String,
    pub description: String,
    pub amount: f64,
    pub paid_by: Address,
    pub split_type: SplitType,
    pub split_between: Vec<Address>,
    pub split_amounts: HashMap<Address, f64>,
    pub settled: bool,
    pub created_at: DateTime<Utc>,
    pub settled_at: Option<DateTime<Utc>>,
}

impl Expense {
    pub fn from_validated(validated: ValidatedExpense, created_at: DateTime<Utc>) -> Self {
        Expense {
            id: Uuid::new_v4().to_string(),
            description: validated.description,
            amount: validated.amount,
            paid_by: validated.paid_by,
            split_type: validated.split_type,
            split_between: validated.split_between,
            split_amounts: validated.split_amounts,
            settled: false,
            created_at,
            settled_at: None,
        }
    }

    pub fn is_participant(&self, address: &Address) -> bool {
        self.split_between.contains(address)
    }

    /// Owed amount for `participant` under `basis`. Zero for non-participants.
    pub fn share_of(&self, participant: &Address, basis: ShareBasis) -> f64 {
        if !self.is_participant(participant) {
            return 0.0;
        }
        match basis {
            ShareBasis::Equal => self.amount / self.split_between.len() as f64,
            ShareBasis::Recorded => self.split_amounts.get(participant).copied().unwrap_or(0.0),
        }
    }

    /// The only state transition an expense has. Returns false if it was
    /// already settled.
    pub fn mark_settled(&mut self, at: DateTime<Utc>) -> bool {
        if self.settled {
            return false;
        }
        self.settled = true;
        self.settled_at = Some(at);
        true
    }
}
