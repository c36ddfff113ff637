//! Performance rating of a chess player from PGN game records.
//!
//! Games are read with pgn-reader, filtered down to one player's rated games, and turned
//! into a FIDE table estimate and an exact logistic estimate.

pub mod chess;

pub use chess::{
    AggregateOutcome, ColorFilter, CompressionMode, GameRecord, GameResult, PerformanceError,
    PerformanceReport, PlayerQuery,
};

#[cfg(test)]
mod tests {
    use super::chess::{self, PerformanceReport};
    use super::*;
    use crate::chess::reader::{PgnInput, PgnReaderState};
    use std::io::Cursor;

    const EVENT: &str = r#"[Event "Open"]
[Round "1"]
[White "Rubinstein, Akiba"]
[Black "Opponent, A"]
[Result "1-0"]
[WhiteElo "2300"]
[BlackElo "2100"]

1. d4 d5 2. c4 1-0

[Event "Open"]
[Round "2"]
[White "Opponent, B"]
[Black "Rubinstein, Akiba"]
[Result "1/2-1/2"]
[WhiteElo "1950"]
[BlackElo "2300"]

1. e4 c5 1/2-1/2

[Event "Open"]
[Round "3"]
[White "Rubinstein, Akiba"]
[Black "Opponent, C"]
[Result "0-1"]
[WhiteElo "2300"]
[BlackElo "-"]

1. d4 f5 0-1

[Event "Open"]
[Round "4"]
[White "Opponent, D"]
[Black "Rubinstein, Akiba"]
[Result "0-1"]
[WhiteElo "2050"]
[BlackElo "2300"]

1. f3 e5 2. g4 Qh4# 0-1

[Event "Open"]
[Round "5"]
[White "Opponent, E"]
[Black "Rubinstein, Akiba"]
[WhiteElo "2000"]
[BlackElo "2300"]

1. e4 e5
"#;

    fn games() -> Vec<GameRecord> {
        let input: PgnInput = Box::new(Cursor::new(EVENT.as_bytes().to_vec()));
        PgnReaderState::new(input, "open.pgn").collect()
    }

    #[test]
    fn test_pgn_to_report() {
        let games = games();
        assert_eq!(games.len(), 5);

        let outcome =
            chess::aggregate(&games, &PlayerQuery::new("Rubinstein"), ColorFilter::Any).unwrap();

        // round 3 opponent unrated, round 5 has no result
        assert_eq!(outcome.opponent_ratings, vec![2100, 1950, 2050]);
        assert_eq!(outcome.total_score, 2.5);
        assert_eq!(outcome.unrated_games, 1);
        assert_eq!(outcome.missing_results.len(), 1);
        assert_eq!(outcome.missing_results[0].index, 5);

        let report = PerformanceReport::evaluate(&outcome).unwrap();
        assert_eq!(report.percentage, 83);
        assert_eq!(report.fide_performance, 2033 + 273);
        assert_eq!(report, PerformanceReport::evaluate(&outcome).unwrap());
    }

    #[test]
    fn test_color_restriction_end_to_end() {
        let games = games();

        let outcome =
            chess::aggregate(&games, &PlayerQuery::new("Rubinstein"), ColorFilter::Black).unwrap();

        assert_eq!(outcome.opponent_ratings, vec![1950, 2050]);
        assert_eq!(outcome.total_score, 1.5);
    }

    #[test]
    fn test_unknown_player_has_insufficient_data() {
        let games = games();

        let outcome =
            chess::aggregate(&games, &PlayerQuery::new("Lasker"), ColorFilter::Any).unwrap();

        assert!(matches!(
            PerformanceReport::evaluate(&outcome),
            Err(PerformanceError::InsufficientData)
        ));
    }

    #[test]
    fn test_corrupt_opponent_rating_is_excluded_not_fatal() {
        let pgn = r#"[White "Rubinstein, Akiba"]
[Black "Opponent, Z"]
[Result "1-0"]
[WhiteElo "2300"]
[BlackElo "3000000000"]

1. d4 d5 1-0

[White "Opponent, Y"]
[Black "Rubinstein, Akiba"]
[Result "1/2-1/2"]
[WhiteElo "2000"]
[BlackElo "2300"]

1. e4 e5 1/2-1/2
"#;
        let input: PgnInput = Box::new(Cursor::new(pgn.as_bytes().to_vec()));
        let games: Vec<GameRecord> = PgnReaderState::new(input, "corrupt.pgn").collect();

        assert_eq!(
            games[0].parse_error.as_deref(),
            Some("Conversion error: BlackElo='3000000000'")
        );

        let outcome =
            chess::aggregate(&games, &PlayerQuery::new("Rubinstein"), ColorFilter::Any).unwrap();
        assert_eq!(outcome.opponent_ratings, vec![2000]);
        assert_eq!(outcome.unrated_games, 1);
        assert_eq!(chess::table_estimate(&outcome).unwrap(), 2000);

        let only_corrupt = chess::aggregate(
            &games[..1],
            &PlayerQuery::new("Rubinstein"),
            ColorFilter::Any,
        )
        .unwrap();
        assert!(matches!(
            chess::table_estimate(&only_corrupt),
            Err(PerformanceError::InsufficientData)
        ));
    }

    #[test]
    fn test_opponent_query_is_ambiguous_only_when_both_sides_match() {
        let games = games();

        let err =
            chess::aggregate(&games, &PlayerQuery::new("n"), ColorFilter::Any).unwrap_err();

        match err {
            PerformanceError::AmbiguousPlayerMatch { location, .. } => {
                assert_eq!(location.source, "open.pgn");
                assert_eq!(location.index, 1);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
