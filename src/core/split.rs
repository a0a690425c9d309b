use crate::constants::SPLIT_TOLERANCE;
use crate::core::errors::LedgerError;
use crate::core::models::{Address, SplitType};
use std::collections::HashMap;

/// Computes what each participant owes for an expense of `amount`.
///
/// * `Equal` gives every participant `amount / n`.
/// * `Custom` returns `custom_amounts` restricted to `participants`, once their
///   total is within [`SPLIT_TOLERANCE`] of `amount`. Participants without an
///   entry count as zero towards the total and are left out of the result.
pub fn compute_split(
    amount: f64,
    participants: &[Address],
    split_type: SplitType,
    custom_amounts: Option<&HashMap<Address, f64>>,
) -> Result<HashMap<Address, f64>, LedgerError> {
    if participants.is_empty() {
        return Err(LedgerError::InvalidSplit);
    }

    match split_type {
        SplitType::Equal => {
            let share = amount / participants.len() as f64;
            Ok(participants.iter().map(|p| (p.clone(), share)).collect())
        }
        SplitType::Custom => {
            let restricted: HashMap<Address, f64> = match custom_amounts {
                Some(amounts) => participants
                    .iter()
                    .filter_map(|p| amounts.get(p).map(|v| (p.clone(), *v)))
                    .collect(),
                None => HashMap::new(),
            };
            let total: f64 = participants
                .iter()
                .map(|p| restricted.get(p).copied().unwrap_or(0.0))
                .sum();
            if (total - amount).abs() > SPLIT_TOLERANCE {
                return Err(LedgerError::SplitMismatch {
                    expected: amount,
                    actual: total,
                });
            }
            Ok(restricted)
        }
    }
}
