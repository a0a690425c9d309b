use crate::core::ledger::compute_balances;
use crate::core::models::{ShareBasis, SplitType};
use crate::tests::{
    ALICE, BOB, CAROL, addr, assert_close, custom_draft, equal_draft, push_expense, trip_group,
};
use chrono::Utc;

#[test]
fn test_scenario_equal_dinner_balances() {
    let mut group = trip_group();
    push_expense(&mut group, &equal_draft("Dinner", 30.0, ALICE, &[ALICE, BOB, CAROL]));

    for basis in [ShareBasis::Equal, ShareBasis::Recorded] {
        let balances = compute_balances(&group, basis);
        assert_close(balances.get(&addr(ALICE)).unwrap(), 20.0);
        assert_close(balances.get(&addr(BOB)).unwrap(), -10.0);
        assert_close(balances.get(&addr(CAROL)).unwrap(), -10.0);
    }
}

#[test]
fn test_empty_group_has_zero_balance_for_every_member() {
    let group = trip_group();
    let balances = compute_balances(&group, ShareBasis::Recorded);
    assert_eq!(balances.len(), 3);
    assert!(balances.iter().all(|(_, b)| b == 0.0));
    let order: Vec<_> = balances.iter().map(|(a, _)| a.clone()).collect();
    assert_eq!(order, vec![addr(ALICE), addr(BOB), addr(CAROL)]);
}

#[test]
fn test_equal_split_balances_are_conserved() {
    let mut group = trip_group();
    push_expense(&mut group, &equal_draft("Fuel", 47.13, BOB, &[ALICE, BOB, CAROL]));
    push_expense(&mut group, &equal_draft("Snacks", 9.99, CAROL, &[BOB, CAROL]));
    push_expense(&mut group, &equal_draft("Museum", 100.0, ALICE, &[BOB]));
    let settled = push_expense(&mut group, &equal_draft("Parking", 7.0, BOB, &[ALICE, CAROL]));
    group.expense_mut(&settled).unwrap().mark_settled(Utc::now());

    for basis in [ShareBasis::Equal, ShareBasis::Recorded] {
        let balances = compute_balances(&group, basis);
        assert!(balances.total().abs() < 1e-9, "total was {}", balances.total());
    }
}

#[test]
fn test_settled_expenses_contribute_nothing() {
    let mut group = trip_group();
    let id = push_expense(&mut group, &equal_draft("Dinner", 30.0, ALICE, &[ALICE, BOB, CAROL]));
    group.expense_mut(&id).unwrap().mark_settled(Utc::now());

    let balances = compute_balances(&group, ShareBasis::Recorded);
    assert!(balances.iter().all(|(_, b)| b == 0.0));
}

#[test]
fn test_compute_balances_is_pure() {
    let mut group = trip_group();
    push_expense(&mut group, &equal_draft("Dinner", 30.0, ALICE, &[ALICE, BOB, CAROL]));
    push_expense(&mut group, &custom_draft("Hotel", 90.0, BOB, &[(ALICE, 30.0), (CAROL, 60.0)]));
    let snapshot = group.clone();

    let first = compute_balances(&group, ShareBasis::Recorded);
    let second = compute_balances(&group, ShareBasis::Recorded);
    assert_eq!(first, second);
    assert_eq!(group, snapshot);
}

// Custom splits are charged at their recorded amounts under `Recorded` and
// evenly under `Equal`.
#[test]
fn test_custom_split_balance_follows_share_basis() {
    let mut group = trip_group();
    push_expense(&mut group, &custom_draft("Hotel", 100.0, ALICE, &[(ALICE, 30.0), (BOB, 70.0)]));
    assert_eq!(group.expenses[0].split_type, SplitType::Custom);

    let recorded = compute_balances(&group, ShareBasis::Recorded);
    assert_close(recorded.get(&addr(ALICE)).unwrap(), 70.0);
    assert_close(recorded.get(&addr(BOB)).unwrap(), -70.0);
    assert_close(recorded.get(&addr(CAROL)).unwrap(), 0.0);

    let equal = compute_balances(&group, ShareBasis::Equal);
    assert_close(equal.get(&addr(ALICE)).unwrap(), 50.0);
    assert_close(equal.get(&addr(BOB)).unwrap(), -50.0);
}

#[test]
fn test_recorded_basis_conserves_up_to_split_tolerance() {
    let mut group = trip_group();
    let draft = custom_draft("Tickets", 60.0, CAROL, &[(ALICE, 20.0), (BOB, 20.0), (CAROL, 20.005)]);
    push_expense(&mut group, &draft);

    let balances = compute_balances(&group, ShareBasis::Recorded);
    assert!(balances.total().abs() <= 0.01);
}
