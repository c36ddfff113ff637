//! Performance rating estimators.
//!
//! Two independent estimates from the same [`AggregateOutcome`]:
//! - the FIDE table method: mean opponent rating plus a tabulated offset for the score
//!   percentage;
//! - the exact method: the rating at which the logistic expected score against the same
//!   opponents equals the actual score, found by bisection.

use super::aggregate::AggregateOutcome;
use super::error::{PerformanceError, Result};

pub const SEARCH_FLOOR: f64 = 0.0;
pub const SEARCH_CEILING: f64 = 4000.0;
pub const SEARCH_PRECISION: f64 = 0.001;

/// FIDE rating offset (dp) indexed by score percentage 0..=100.
#[rustfmt::skip]
pub const FIDE_PERFORMANCE_TABLE: [i32; 101] = [
    -800, -677, -589, -538, -501, -470, -444, -422, -401, -383, // 0-9
    -366, -351, -336, -322, -309, -296, -284, -273, -262, -251, // 10-19
    -240, -230, -220, -211, -202, -193, -184, -175, -166, -158, // 20-29
    -149, -141, -133, -125, -117, -110, -102,  -95,  -87,  -80, // 30-39
     -72,  -65,  -57,  -50,  -43,  -36,  -29,  -21,  -14,   -7, // 40-49
       0,    7,   14,   21,   29,   36,   43,   50,   57,   65, // 50-59
      72,   80,   87,   95,  102,  110,  117,  125,  133,  141, // 60-69
     149,  158,  166,  175,  184,  193,  202,  211,  220,  230, // 70-79
     240,  251,  262,  273,  284,  296,  309,  322,  336,  351, // 80-89
     366,  383,  401,  422,  444,  470,  501,  538,  589,  677, // 90-99
     800,                                                       // 100
];

pub fn fide_adjustment(percentage: u8) -> i32 {
    FIDE_PERFORMANCE_TABLE[usize::from(percentage.min(100))]
}

fn require_games(outcome: &AggregateOutcome) -> Result<()> {
    if outcome.is_empty() {
        Err(PerformanceError::InsufficientData)
    } else {
        Ok(())
    }
}

/// Score percentage, rounded half-up.
pub fn score_percentage(outcome: &AggregateOutcome) -> Result<u8> {
    require_games(outcome)?;
    let percent = (100.0 * outcome.total_score / outcome.game_count() as f64).round();
    Ok(percent.clamp(0.0, 100.0) as u8)
}

/// Arithmetic mean of the opponent ratings, rounded half-up.
pub fn mean_opponent_rating(outcome: &AggregateOutcome) -> Result<i32> {
    require_games(outcome)?;
    let sum: u64 = outcome.opponent_ratings.iter().map(|&r| u64::from(r)).sum();
    Ok((sum as f64 / outcome.game_count() as f64).round() as i32)
}

/// Mean opponent rating plus the FIDE offset. Saturates instead of overflowing on
/// out-of-range ratings.
pub fn table_estimate(outcome: &AggregateOutcome) -> Result<i32> {
    let percentage = score_percentage(outcome)?;
    Ok(mean_opponent_rating(outcome)?.saturating_add(fide_adjustment(percentage)))
}

/// Points a player rated `own_rating` is expected to score against `opponent_ratings`.
pub fn expected_score(opponent_ratings: &[u32], own_rating: f64) -> f64 {
    opponent_ratings
        .iter()
        .map(|&opponent| 1.0 / (1.0 + 10f64.powf((f64::from(opponent) - own_rating) / 400.0)))
        .sum()
}

/// Bisection for the rating whose expected score equals `score`.
///
/// Perfect and zero scores have no finite solution; the search then settles against
/// `SEARCH_CEILING` or `SEARCH_FLOOR`.
pub fn solve_performance(opponent_ratings: &[u32], score: f64) -> f64 {
    let (mut lo, mut hi) = (SEARCH_FLOOR, SEARCH_CEILING);
    let mut mid = (lo + hi) / 2.0;

    while hi - lo > SEARCH_PRECISION {
        mid = (lo + hi) / 2.0;
        if expected_score(opponent_ratings, mid) < score {
            lo = mid;
        } else {
            hi = mid;
        }
    }

    mid
}

pub fn exact_estimate(outcome: &AggregateOutcome) -> Result<i32> {
    require_games(outcome)?;
    Ok(solve_performance(&outcome.opponent_ratings, outcome.total_score).round() as i32)
}
