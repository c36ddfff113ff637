pub mod aggregate;
pub mod error;
pub mod log;
pub mod performance;
pub mod reader;
pub mod report;
pub mod types;
pub mod visitor;

pub use aggregate::{AggregateOutcome, GameClassification, MatchResult, PlayerQuery, aggregate};
pub use error::{ErrorAccumulator, PerformanceError};
pub use performance::{exact_estimate, expected_score, table_estimate};
pub use reader::{CompressionMode, expand_sources, read_games};
pub use report::PerformanceReport;
pub use types::{ColorFilter, GameLocation, GameRecord, GameResult};
