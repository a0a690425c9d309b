pub mod aggregate;
pub mod errors;
pub mod ledger;
pub mod models;
pub mod services;
pub mod settlement;
pub mod split;
pub mod validation;
