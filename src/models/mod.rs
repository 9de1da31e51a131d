pub mod market;
pub mod security;
pub mod verdict;

// Re-export commonly used types
pub use market::MarketSnapshot;
pub use security::{Risk, RiskLevel, Score, SecurityReport, TopHolder};
pub use verdict::{Assessment, Verdict};
