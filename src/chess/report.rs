use super::aggregate::AggregateOutcome;
use super::error::Result;
use super::performance::{exact_estimate, score_percentage, table_estimate};
use super::types::ColorFilter;

use std::fmt;

/// Final numbers for one player over one set of games.
#[derive(Debug, Clone, PartialEq)]
pub struct PerformanceReport {
    pub scored_points: f64,
    pub game_count: usize,
    pub percentage: u8,
    pub fide_performance: i32,
    pub perfect_performance: i32,
    pub unrated_games: usize,
    pub missing_results: usize,
}

impl PerformanceReport {
    /// Runs both estimators. Fails with `InsufficientData` when no game counts.
    pub fn evaluate(outcome: &AggregateOutcome) -> Result<Self> {
        Ok(Self {
            scored_points: outcome.total_score,
            game_count: outcome.game_count(),
            percentage: score_percentage(outcome)?,
            fide_performance: table_estimate(outcome)?,
            perfect_performance: exact_estimate(outcome)?,
            unrated_games: outcome.unrated_games,
            missing_results: outcome.missing_results.len(),
        })
    }

    pub fn to_json(&self, player: &str, color: ColorFilter) -> String {
        serde_json::json!({
            "player": player,
            "color": color.label(),
            "scored": self.scored_points,
            "games": self.game_count,
            "percentage": self.percentage,
            "fide_performance": self.fide_performance,
            "perfect_performance": self.perfect_performance,
            "unrated_games": self.unrated_games,
            "missing_results": self.missing_results,
        })
        .to_string()
    }
}

impl fmt::Display for PerformanceReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Scored {} out of {} games ({}%)",
            self.scored_points, self.game_count, self.percentage
        )?;
        writeln!(f, "FIDE performance: {}", self.fide_performance)?;
        write!(f, "Perfect performance: {}", self.perfect_performance)
    }
}
