use crate::core::errors::LedgerError;
use crate::core::models::Address;
use crate::tests::{ALICE, addr};

#[test]
fn test_parse_accepts_mixed_case_and_canonicalizes() {
    let parsed = Address::parse(&format!("  {}  ", ALICE)).unwrap();
    assert_eq!(parsed.as_str(), ALICE.to_ascii_lowercase());
    assert_eq!(parsed, addr(&ALICE.to_ascii_uppercase().replacen("0X", "0x", 1)));
}

#[test]
fn test_parse_rejects_malformed_addresses() {
    for raw in [
        "",
        "0x1234",
        "A11cE000000000000000000000000000000000001",
        "0xZ11cE00000000000000000000000000000000001",
        "0xA11cE000000000000000000000000000000000012",
    ] {
        assert_eq!(
            Address::parse(raw),
            Err(LedgerError::InvalidAddress(raw.to_string())),
            "{} should be rejected",
            raw
        );
    }
}

#[test]
fn test_short_form() {
    assert_eq!(addr(ALICE).short(), "0xa11c...");
}
