use super::error::ErrorAccumulator;
use super::types::{GameLocation, GameRecord, GameResult};

use pgn_reader::{Outcome, RawTag, Skip, Visitor};
use std::mem;
use std::ops::ControlFlow;

/// Streaming PGN visitor (pgn-reader).
///
/// Captures the tag pairs a performance calculation needs and skips the movetext. The result
/// comes from the `Result` tag, falling back to the movetext termination marker reported
/// through `outcome()`.
pub struct GameVisitor {
    headers: HeaderFields,
    result_marker: Option<String>,
    parse_error: ErrorAccumulator,
    location: GameLocation,
    pub current_game: Option<GameRecord>,
}

#[derive(Default)]
struct HeaderFields {
    event: String,
    site: String,
    date: String,
    round: String,
    white: String,
    black: String,
    result: String,
    white_elo: String,
    black_elo: String,
}

impl HeaderFields {
    fn clear(&mut self) {
        *self = Self::default();
    }

    fn opt_take(field: &mut String) -> Option<String> {
        if field.is_empty() {
            None
        } else {
            Some(mem::take(field))
        }
    }

    fn set_known_tag(&mut self, key: &[u8], value: RawTag<'_>) {
        let slot: &mut String = match key {
            b"Event" => &mut self.event,
            b"Site" => &mut self.site,
            b"Date" => &mut self.date,
            b"Round" => &mut self.round,
            b"White" => &mut self.white,
            b"Black" => &mut self.black,
            b"Result" => &mut self.result,
            b"WhiteElo" => &mut self.white_elo,
            b"BlackElo" => &mut self.black_elo,
            _ => return,
        };

        if !slot.is_empty() {
            return;
        }

        let bytes = value.as_bytes();
        if bytes.is_empty() {
            return;
        }

        *slot = String::from_utf8_lossy(bytes).into_owned();
    }
}

/// Highest rating accepted from a tag; larger values are treated as corrupt.
pub const MAX_RATING: u32 = 4000;

/// Parses a rating tag. Unrated placeholders map to `None` without complaint; anything else
/// that is not an unsigned integer up to `MAX_RATING` is recorded as a conversion error.
pub(crate) fn parse_rating_field(
    raw: &str,
    label: &str,
    parse_error: &mut ErrorAccumulator,
) -> Option<u32> {
    let s = raw.trim();
    if matches!(s, "" | "-" | "?") {
        return None;
    }
    match s.parse::<u32>() {
        Ok(0) => None,
        Ok(v) if v <= MAX_RATING => Some(v),
        Ok(_) | Err(_) => {
            parse_error.push(&format!("Conversion error: {label}='{s}'"));
            None
        }
    }
}

impl GameVisitor {
    pub fn new() -> Self {
        Self {
            headers: HeaderFields::default(),
            result_marker: None,
            parse_error: ErrorAccumulator::default(),
            location: GameLocation::default(),
            current_game: None,
        }
    }

    /// Sets the location stamped onto the next finalized record.
    pub fn set_location(&mut self, location: GameLocation) {
        self.location = location;
    }

    fn build_game_record(&mut self) {
        let white_elo = parse_rating_field(
            &self.headers.white_elo,
            "WhiteElo",
            &mut self.parse_error,
        );
        let black_elo = parse_rating_field(
            &self.headers.black_elo,
            "BlackElo",
            &mut self.parse_error,
        );

        let result = HeaderFields::opt_take(&mut self.headers.result)
            .or_else(|| self.result_marker.take())
            .and_then(|raw| GameResult::from_pgn(&raw));

        self.current_game = Some(GameRecord {
            white: HeaderFields::opt_take(&mut self.headers.white),
            black: HeaderFields::opt_take(&mut self.headers.black),
            result,
            white_elo,
            black_elo,
            event: HeaderFields::opt_take(&mut self.headers.event),
            site: HeaderFields::opt_take(&mut self.headers.site),
            date: HeaderFields::opt_take(&mut self.headers.date),
            round: HeaderFields::opt_take(&mut self.headers.round),
            location: self.location.clone(),
            parse_error: self.parse_error.take(),
        });
    }

    /// Builds a partial record from the headers seen so far, carrying `error_msg`.
    pub fn finalize_game_with_error(&mut self, error_msg: String) {
        self.parse_error.push(&error_msg);
        self.build_game_record();
    }
}

impl Default for GameVisitor {
    fn default() -> Self {
        Self::new()
    }
}

impl Visitor for GameVisitor {
    type Tags = ();
    type Movetext = ();
    type Output = ();

    fn begin_tags(&mut self) -> ControlFlow<Self::Output, Self::Tags> {
        self.headers.clear();
        self.result_marker = None;
        self.parse_error = ErrorAccumulator::default();
        self.current_game = None;
        ControlFlow::Continue(())
    }

    fn tag(
        &mut self,
        _: &mut Self::Tags,
        key: &[u8],
        value: RawTag<'_>,
    ) -> ControlFlow<Self::Output> {
        self.headers.set_known_tag(key, value);
        ControlFlow::Continue(())
    }

    fn begin_movetext(&mut self, _: Self::Tags) -> ControlFlow<Self::Output, Self::Movetext> {
        ControlFlow::Continue(())
    }

    fn begin_variation(&mut self, _: &mut Self::Movetext) -> ControlFlow<Self::Output, Skip> {
        ControlFlow::Continue(Skip(true))
    }

    fn outcome(&mut self, _: &mut Self::Movetext, outcome: Outcome) -> ControlFlow<Self::Output> {
        self.result_marker = Some(outcome.to_string());
        ControlFlow::Continue(())
    }

    fn end_game(&mut self, _: Self::Movetext) -> Self::Output {
        self.build_game_record();
    }
}
