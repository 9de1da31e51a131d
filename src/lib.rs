pub mod api;
pub mod audit;
pub mod config;
pub mod display;
pub mod error;
pub mod health;
pub mod logging;
pub mod models;
pub mod utils;
pub mod wallet;

pub use audit::{AuditOutcome, Auditor, ReportGenerator, RiskScorer};
pub use config::Config;
pub use error::{AuditError, FetchError};
