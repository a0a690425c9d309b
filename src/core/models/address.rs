use crate::core::errors::LedgerError;
use serde::{Deserialize, Serialize};

const ADDRESS_HEX_LEN: usize = 40;

/// Wallet address in canonical (trimmed, lower-case) form.
///
/// Addresses are hexadecimal strings, so equality, hashing and ordering are
/// all case-insensitive by construction.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Address(String);

impl Address {
    /// Parses a `0x`-prefixed, 40 hex digit wallet address.
    pub fn parse(raw: &str) -> Result<Self, LedgerError> {
        let trimmed = raw.trim();
        let valid = trimmed.len() == ADDRESS_HEX_LEN + 2
            && (trimmed.starts_with("0x") || trimmed.starts_with("0X"))
            && trimmed[2..].chars().all(|c| c.is_ascii_hexdigit());
        if !valid {
            return Err(LedgerError::InvalidAddress(raw.to_string()));
        }
        Ok(Address::canonical(trimmed))
    }

    /// Canonicalizes without format validation. Used for comparing user input
    /// against known members.
    pub fn canonical(raw: &str) -> Self {
        Address(raw.trim().to_ascii_lowercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// `0x1234...`
    pub fn short(&self) -> String {
        let head: String = self.0.chars().take(6).collect();
        format!("{}...", head)
    }
}

impl std::fmt::Display for Address {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
