pub mod logging;
pub mod payments;
pub mod storage;
