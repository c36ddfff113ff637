use shakmaty::Color;
use std::fmt;

/// Where a game came from: the source it was read from and its 1-based position inside it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GameLocation {
    pub source: String,
    pub index: usize,
}

impl GameLocation {
    pub fn new(source: impl Into<String>, index: usize) -> Self {
        Self {
            source: source.into(),
            index,
        }
    }
}

impl fmt::Display for GameLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} game #{}", self.source, self.index)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameResult {
    WhiteWin,
    Draw,
    BlackWin,
}

impl GameResult {
    /// Parses a PGN result token. `*` (game in progress or unknown) is not a result.
    pub fn from_pgn(raw: &str) -> Option<Self> {
        match raw.trim() {
            "1-0" => Some(Self::WhiteWin),
            "1/2-1/2" => Some(Self::Draw),
            "0-1" => Some(Self::BlackWin),
            _ => None,
        }
    }

    /// Points awarded to the player on `side`.
    pub fn points_for(self, side: Color) -> f64 {
        match (self, side) {
            (Self::Draw, _) => 0.5,
            (Self::WhiteWin, Color::White) | (Self::BlackWin, Color::Black) => 1.0,
            (Self::WhiteWin, Color::Black) | (Self::BlackWin, Color::White) => 0.0,
        }
    }
}

/// Side the target player must occupy for a game to count.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum ColorFilter {
    #[default]
    #[value(skip)]
    Any,
    White,
    Black,
}

impl ColorFilter {
    pub fn admits(self, side: Color) -> bool {
        match self {
            Self::Any => true,
            Self::White => side == Color::White,
            Self::Black => side == Color::Black,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Any => "any",
            Self::White => "white",
            Self::Black => "black",
        }
    }
}

/// Parsed game data from PGN, reduced to what a performance calculation needs.
#[derive(Debug, Clone, Default)]
pub struct GameRecord {
    // Players and outcome
    pub white: Option<String>,
    pub black: Option<String>,
    pub result: Option<GameResult>,
    pub white_elo: Option<u32>,
    pub black_elo: Option<u32>,

    // Context for diagnostics
    pub event: Option<String>,
    pub site: Option<String>,
    pub date: Option<String>,
    pub round: Option<String>,
    pub location: GameLocation,

    // Parse diagnostics
    /// NULL-equivalent (`None`) for cleanly parsed games, otherwise every conversion or
    /// parser problem seen for this game.
    pub parse_error: Option<String>,
}

impl GameRecord {
    pub fn name(&self, side: Color) -> Option<&str> {
        match side {
            Color::White => self.white.as_deref(),
            Color::Black => self.black.as_deref(),
        }
    }

    pub fn elo(&self, side: Color) -> Option<u32> {
        match side {
            Color::White => self.white_elo,
            Color::Black => self.black_elo,
        }
    }
}
