use crate::core::errors::LedgerError;
use crate::core::models::{
    Address, ExpenseDraft, Group, GroupDraft, Member, SplitType, ValidatedExpense,
};
use crate::core::split::compute_split;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use uuid::Uuid;

/// Validates an expense draft against `group` and normalizes it.
///
/// Checks run in a fixed order and stop at the first failure: description,
/// amount, payer, participants, then the split itself.
pub fn validate_expense(draft: &ExpenseDraft, group: &Group) -> Result<ValidatedExpense, LedgerError> {
    let description = draft.description.trim();
    if description.is_empty() {
        return Err(LedgerError::missing("description"));
    }

    if !draft.amount.is_finite() || draft.amount <= 0.0 {
        return Err(LedgerError::InvalidAmount);
    }

    let paid_by = Address::canonical(&draft.paid_by);
    if paid_by.is_empty() || !group.is_member(&paid_by) {
        return Err(LedgerError::missing("paidBy"));
    }

    let split_between = normalize_participants(&draft.split_between);
    if split_between.is_empty() {
        return Err(LedgerError::missing("splitBetween"));
    }
    if let Some(stranger) = split_between.iter().find(|p| !group.is_member(p)) {
        return Err(LedgerError::NotGroupMember(stranger.to_string()));
    }

    let mut custom_amounts: HashMap<Address, f64> = HashMap::with_capacity(draft.custom_amounts.len());
    for (raw, amount) in &draft.custom_amounts {
        let address = Address::canonical(raw);
        if custom_amounts.insert(address.clone(), *amount).is_some() {
            return Err(LedgerError::DuplicateSplitEntry(address.to_string()));
        }
    }
    let custom = match draft.split_type {
        SplitType::Custom => Some(&custom_amounts),
        SplitType::Equal => None,
    };
    let split_amounts = compute_split(draft.amount, &split_between, draft.split_type, custom)?;

    Ok(ValidatedExpense {
        description: description.to_string(),
        amount: draft.amount,
        paid_by,
        split_type: draft.split_type,
        split_between,
        split_amounts,
    })
}

// Canonicalizes, drops blanks and keeps the first occurrence of duplicates.
fn normalize_participants(raw: &[String]) -> Vec<Address> {
    let mut participants: Vec<Address> = Vec::with_capacity(raw.len());
    for address in raw.iter().map(|a| Address::canonical(a)) {
        if !address.is_empty() && !participants.contains(&address) {
            participants.push(address);
        }
    }
    participants
}

/// Builds a new group from a draft. The creator becomes the first member and
/// the only owner.
pub fn validate_group(draft: &GroupDraft, created_at: DateTime<Utc>) -> Result<Group, LedgerError> {
    let name = draft.name.trim();
    if name.is_empty() {
        return Err(LedgerError::missing("name"));
    }

    let creator = Address::parse(&draft.creator_address)?;
    if draft.members.is_empty() {
        return Err(LedgerError::missing("members"));
    }

    let creator_name = match draft.creator_name.trim() {
        "" => creator.short(),
        n => n.to_string(),
    };
    let mut members = vec![Member {
        address: creator.clone(),
        name: creator_name,
        is_owner: true,
    }];

    for candidate in &draft.members {
        let member_name = candidate.name.trim();
        if member_name.is_empty() || candidate.address.trim().is_empty() {
            return Err(LedgerError::missing("memberName"));
        }
        let address = Address::parse(&candidate.address)?;
        if members.iter().any(|m| m.address == address) {
            return Err(LedgerError::DuplicateMember(address.to_string()));
        }
        members.push(Member {
            address,
            name: member_name.to_string(),
            is_owner: false,
        });
    }

    let group = Group {
        id: Uuid::new_v4().to_string(),
        name: name.to_string(),
        description: draft
            .description
            .as_deref()
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .map(String::from),
        creator,
        created_at,
        members,
        expenses: Vec::new(),
        version: 0,
    };
    validate_group_roles(&group)?;
    Ok(group)
}

pub fn validate_group_roles(group: &Group) -> Result<(), LedgerError> {
    let owners: Vec<&Member> = group.members.iter().filter(|m| m.is_owner).collect();
    if owners.len() != 1 {
        return Err(LedgerError::InvalidOwnerCount(owners.len()));
    }
    if owners[0].address != group.creator {
        return Err(LedgerError::InvalidOwnerCount(0));
    }
    Ok(())
}
