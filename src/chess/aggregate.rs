//! Game filtering and score aggregation for one target player.
//!
//! Every game is classified exactly once into a [`GameClassification`]; only `Matched` games
//! feed the aggregate. A query found on both sides of a game aborts the whole run.

use super::error::{PerformanceError, Result};
use super::types::{ColorFilter, GameLocation, GameRecord};

use shakmaty::Color;
use tracing::{debug, info, warn};

/// One game that counts: the opponent's rating and the point the player earned.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchResult {
    pub side: Color,
    pub opponent_rating: u32,
    pub point: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum GameClassification {
    /// The query occurs in neither player name.
    Unrelated,
    /// The query occurs in both player names.
    Ambiguous { white: String, black: String },
    /// The player took part, but on the side the color filter rejects.
    FilteredByColor,
    /// The player took part, but the game has no result.
    MissingResult { side: Color },
    /// The opponent has no usable rating.
    Unrated { side: Color },
    Matched(MatchResult),
}

/// Case-sensitive substring match against a game's player names.
#[derive(Debug, Clone)]
pub struct PlayerQuery {
    needle: String,
}

impl PlayerQuery {
    pub fn new(needle: impl Into<String>) -> Self {
        Self {
            needle: needle.into(),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.needle
    }

    fn matches(&self, name: Option<&str>) -> bool {
        name.is_some_and(|name| name.contains(self.needle.as_str()))
    }

    pub fn classify(&self, game: &GameRecord, filter: ColorFilter) -> GameClassification {
        let side = match (
            self.matches(game.name(Color::White)),
            self.matches(game.name(Color::Black)),
        ) {
            (true, true) => {
                return GameClassification::Ambiguous {
                    white: game.white.clone().unwrap_or_default(),
                    black: game.black.clone().unwrap_or_default(),
                };
            }
            (true, false) => Color::White,
            (false, true) => Color::Black,
            (false, false) => return GameClassification::Unrelated,
        };

        if !filter.admits(side) {
            return GameClassification::FilteredByColor;
        }

        let Some(result) = game.result else {
            return GameClassification::MissingResult { side };
        };

        match game.elo(side.other()) {
            Some(opponent_rating) => GameClassification::Matched(MatchResult {
                side,
                opponent_rating,
                point: result.points_for(side),
            }),
            None => GameClassification::Unrated { side },
        }
    }
}

/// Score and opponent list for the games that count.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AggregateOutcome {
    /// Opponent ratings in encounter order.
    pub opponent_ratings: Vec<u32>,
    pub total_score: f64,
    /// Player games dropped because the opponent had no usable rating.
    pub unrated_games: usize,
    /// Player games dropped because they carry no result.
    pub missing_results: Vec<GameLocation>,
}

impl AggregateOutcome {
    pub fn game_count(&self) -> usize {
        self.opponent_ratings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.opponent_ratings.is_empty()
    }

    fn record(&mut self, matched: MatchResult) {
        self.opponent_ratings.push(matched.opponent_rating);
        self.total_score += matched.point;
    }
}

fn describe(game: &GameRecord) -> String {
    format!(
        "{} - {} ({}, {}, {}, round {})",
        game.white.as_deref().unwrap_or("?"),
        game.black.as_deref().unwrap_or("?"),
        game.event.as_deref().unwrap_or("?"),
        game.site.as_deref().unwrap_or("?"),
        game.date.as_deref().unwrap_or("????.??.??"),
        game.round.as_deref().unwrap_or("?"),
    )
}

/// Folds `games` into the target player's score and opponent list.
///
/// Fails on the first ambiguous game; no partial outcome is returned in that case.
pub fn aggregate<'a, I>(games: I, query: &PlayerQuery, filter: ColorFilter) -> Result<AggregateOutcome>
where
    I: IntoIterator<Item = &'a GameRecord>,
{
    let mut outcome = AggregateOutcome::default();
    let mut seen = 0usize;

    for game in games {
        seen += 1;
        match query.classify(game, filter) {
            GameClassification::Unrelated | GameClassification::FilteredByColor => {}
            GameClassification::Ambiguous { white, black } => {
                return Err(PerformanceError::AmbiguousPlayerMatch {
                    query: query.as_str().to_string(),
                    white,
                    black,
                    location: game.location.clone(),
                });
            }
            GameClassification::MissingResult { .. } => {
                warn!("{}: game without result: {}", game.location, describe(game));
                outcome.missing_results.push(game.location.clone());
            }
            GameClassification::Unrated { side } => {
                debug!(
                    "{}: skipping game, {} opponent is unrated",
                    game.location,
                    if side == Color::White { "black" } else { "white" },
                );
                outcome.unrated_games += 1;
            }
            GameClassification::Matched(matched) => outcome.record(matched),
        }
    }

    info!(
        "Matched {} of {} games for {:?} ({} unrated, {} without result)",
        outcome.game_count(),
        seen,
        query.as_str(),
        outcome.unrated_games,
        outcome.missing_results.len(),
    );

    Ok(outcome)
}
