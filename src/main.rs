use serde_json::json;
use splitledger::core::aggregate::per_person_share;
use splitledger::{
    Address, CONFIG, ExpenseDraft, GroupDraft, InMemoryAuditLog, InMemoryStore, LedgerService, MemberDraft,
    SimulatedPayments, SplitType,
};
use std::collections::HashMap;
use tracing::info;
use tracing_subscriber::EnvFilter;

const ALICE: &str = "0xA11cE00000000000000000000000000000000001";
const BOB: &str = "0xB0B0000000000000000000000000000000000002";
const CAROL: &str = "0xCa7017000000000000000000000000000000003a";

// Walks one group through expense, balance and settlement using the in-memory
// collaborators and prints each step as JSON.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(&CONFIG.log_level).unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let service = LedgerService::new(
        InMemoryStore::new(),
        InMemoryAuditLog::new(),
        SimulatedPayments::new(),
        CONFIG.settings(),
    );

    let group = service
        .create_group(&GroupDraft {
            name: "Weekend trip".to_string(),
            description: Some("Cabin and groceries".to_string()),
            creator_address: ALICE.to_string(),
            creator_name: "Alice".to_string(),
            members: vec![MemberDraft::new("Bob", BOB), MemberDraft::new("Carol", CAROL)],
        })
        .await?;
    info!("Created group {}", group.id);

    let alice = Address::parse(ALICE)?;
    let bob = Address::parse(BOB)?;

    let cabin = service
        .add_expense(
            &group.id,
            &ExpenseDraft {
                description: "Cabin".to_string(),
                amount: 30.0,
                paid_by: ALICE.to_string(),
                split_between: vec![ALICE.to_string(), BOB.to_string(), CAROL.to_string()],
                split_type: SplitType::Equal,
                custom_amounts: HashMap::new(),
            },
            &alice,
        )
        .await?;
    service
        .add_expense(
            &group.id,
            &ExpenseDraft {
                description: "Groceries".to_string(),
                amount: 12.5,
                paid_by: BOB.to_string(),
                split_between: vec![ALICE.to_string(), BOB.to_string()],
                split_type: SplitType::Custom,
                custom_amounts: HashMap::from([(ALICE.to_string(), 5.0), (BOB.to_string(), 7.5)]),
            },
            &bob,
        )
        .await?;

    let balances = service.member_balances(&group.id, &bob).await?;
    let stats = service.group_stats(&group.id).await?;
    println!(
        "{}",
        serde_json::to_string_pretty(&json!({
            "balances": balances,
            "stats": stats,
            "cabin_per_person": per_person_share(&cabin),
        }))?
    );

    let instruction = service.request_settlement(&group.id, &cabin.id, &bob).await?;
    let receipt = service.confirm_settlement(&group.id, &instruction).await?;

    let balances = service.member_balances(&group.id, &bob).await?;
    let portfolio = service.portfolio_stats(&bob).await?;
    let audit = service.audit_trail(&group.id).await?;
    println!(
        "{}",
        serde_json::to_string_pretty(&json!({
            "receipt": receipt,
            "balances": balances,
            "portfolio": portfolio,
            "audit": audit,
        }))?
    );

    Ok(())
}
