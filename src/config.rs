use crate::constants::DEFAULT_COMMIT_ATTEMPTS;
use crate::core::models::ShareBasis;
use dotenv::dotenv;
use once_cell::sync::Lazy;
use std::env;

/// Knobs the ledger service needs. Passed in explicitly; the core reads no
/// global state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LedgerSettings {
    pub share_basis: ShareBasis,
    /// How many times a settled flag is re-applied after a version conflict.
    pub commit_attempts: u32,
}

impl Default for LedgerSettings {
    fn default() -> Self {
        LedgerSettings {
            share_basis: ShareBasis::default(),
            commit_attempts: DEFAULT_COMMIT_ATTEMPTS,
        }
    }
}

#[derive(Debug)]
pub struct Config {
    pub share_basis: ShareBasis,
    pub commit_attempts: u32,
    pub log_level: String,
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();

        Self {
            share_basis: env::var("SPLIT_SHARE_BASIS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or_default(),
            commit_attempts: env::var("COMMIT_ATTEMPTS")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|n| *n > 0)
                .unwrap_or(DEFAULT_COMMIT_ATTEMPTS),
            log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
        }
    }

    pub fn settings(&self) -> LedgerSettings {
        LedgerSettings {
            share_basis: self.share_basis,
            commit_attempts: self.commit_attempts,
        }
    }
}

pub static CONFIG: Lazy<Config> = Lazy::new(Config::from_env);
