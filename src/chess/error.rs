use super::types::GameLocation;
use std::io;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum PerformanceError {
    #[error(
        "found player search {query:?} in both white {white:?} and black {black:?} ({location})"
    )]
    AmbiguousPlayerMatch {
        query: String,
        white: String,
        black: String,
        location: GameLocation,
    },

    #[error("no rated games left to evaluate")]
    InsufficientData,

    #[error("failed to open file '{}': {source}", .path.display())]
    OpenFile { path: PathBuf, source: io::Error },

    #[error("failed to initialize zstd decoder for '{}': {source}", .path.display())]
    Decoder { path: PathBuf, source: io::Error },

    #[error("invalid glob pattern '{pattern}': {source}")]
    Pattern {
        pattern: String,
        source: glob::PatternError,
    },
}

pub type Result<T> = std::result::Result<T, PerformanceError>;

/// Collects non-fatal problems for one game as a single `"; "`-joined message.
#[derive(Debug, Clone, Default)]
pub struct ErrorAccumulator(Option<String>);

impl ErrorAccumulator {
    pub fn push(&mut self, msg: &str) {
        match &mut self.0 {
            Some(existing) => {
                existing.push_str("; ");
                existing.push_str(msg);
            }
            None => {
                self.0 = Some(msg.to_string());
            }
        }
    }

    pub fn take(&mut self) -> Option<String> {
        self.0.take()
    }
}
