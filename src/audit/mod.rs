pub mod auditor;
pub mod report;
pub mod scorer;
pub mod sources;

pub use auditor::{AuditOutcome, Auditor};
pub use report::{ReportGenerator, ReportGrade, WrittenReport};
pub use scorer::{RiskScorer, ScoringThresholds};
pub use sources::{MarketSnapshotSource, SecurityReportSource};
