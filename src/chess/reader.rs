use super::error::{PerformanceError, Result};
use super::types::{GameLocation, GameRecord};
use super::visitor::GameVisitor;

use pgn_reader::Reader;
use std::ffi::OsStr;
use std::fs::File;
use std::io::{ErrorKind, Read};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use zstd::stream::read::Decoder as ZstdDecoder;

pub type PgnInput = Box<dyn Read + Send>;

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, clap::ValueEnum)]
pub enum CompressionMode {
    /// Pick per file: zstd for `.zst`, plain otherwise.
    #[default]
    Auto,
    Plain,
    Zstd,
}

impl CompressionMode {
    fn resolve(self, path: &Path) -> Self {
        match self {
            Self::Auto if path.extension() == Some(OsStr::new("zst")) => Self::Zstd,
            Self::Auto => Self::Plain,
            explicit => explicit,
        }
    }
}

/// Expands each argument into concrete paths: glob patterns (`*` or `?`) are expanded,
/// anything else is taken as a literal path.
pub fn expand_sources<S: AsRef<str>>(patterns: &[S]) -> Result<Vec<PathBuf>> {
    let mut paths = Vec::new();

    for pattern in patterns {
        let pattern = pattern.as_ref();
        if pattern.contains('*') || pattern.contains('?') {
            let matched: Vec<PathBuf> = glob::glob(pattern)
                .map_err(|source| PerformanceError::Pattern {
                    pattern: pattern.to_string(),
                    source,
                })?
                .filter_map(|entry| match entry {
                    Ok(path) => Some(path),
                    Err(err) => {
                        warn!("Skipping unreadable match for '{}': {}", pattern, err);
                        None
                    }
                })
                .collect();

            if matched.is_empty() {
                warn!("No files matched pattern '{}'", pattern);
            }
            paths.extend(matched);
        } else {
            paths.push(PathBuf::from(pattern));
        }
    }

    Ok(paths)
}

pub fn open_input_stream(path: &Path, compression: CompressionMode) -> Result<PgnInput> {
    let file = File::open(path).map_err(|source| PerformanceError::OpenFile {
        path: path.to_path_buf(),
        source,
    })?;

    match compression.resolve(path) {
        CompressionMode::Zstd => ZstdDecoder::new(file)
            .map(|decoder| Box::new(decoder) as PgnInput)
            .map_err(|source| PerformanceError::Decoder {
                path: path.to_path_buf(),
                source,
            }),
        CompressionMode::Plain | CompressionMode::Auto => Ok(Box::new(file)),
    }
}

/// Reader over one PGN source, yielding a `GameRecord` per game.
///
/// Parser errors do not end the stream: the failing game is returned as a partial record
/// with `parse_error` set. An I/O failure other than malformed data ends the source after
/// that partial record.
pub struct PgnReaderState {
    pgn_reader: Reader<PgnInput>,
    source: String,
    next_game_index: usize,
    visitor: GameVisitor,
    exhausted: bool,
}

impl PgnReaderState {
    pub fn new(input: PgnInput, source: impl Into<String>) -> Self {
        Self {
            // pgn-reader buffers internally; no extra BufReader layer.
            pgn_reader: Reader::new(input),
            source: source.into(),
            next_game_index: 1,
            visitor: GameVisitor::new(),
            exhausted: false,
        }
    }

    fn read_next_game(&mut self) -> Option<GameRecord> {
        if self.exhausted {
            return None;
        }

        let game_index = self.next_game_index;
        self.visitor
            .set_location(GameLocation::new(self.source.clone(), game_index));

        match self.pgn_reader.read_game(&mut self.visitor) {
            Ok(Some(())) => {
                self.next_game_index += 1;
                self.visitor.current_game.take()
            }
            Ok(None) => {
                self.exhausted = true;
                None
            }
            Err(error) => {
                self.next_game_index += 1;
                self.exhausted = error.kind() != ErrorKind::InvalidData;
                let error_msg = format!(
                    "Parser-stage error: stage=read_game; file='{}'; game_index={}; error={}",
                    self.source, game_index, error
                );
                warn!("{}", error_msg);
                self.visitor.finalize_game_with_error(error_msg);
                self.visitor.current_game.take()
            }
        }
    }
}

impl Iterator for PgnReaderState {
    type Item = GameRecord;

    fn next(&mut self) -> Option<Self::Item> {
        self.read_next_game()
    }
}

/// Reads every game from `paths`, in order.
///
/// A single unreadable source is fatal; with several sources an unreadable one is skipped
/// with a warning.
pub fn read_games(paths: &[PathBuf], compression: CompressionMode) -> Result<Vec<GameRecord>> {
    let mut games = Vec::new();

    for path in paths {
        let input = match open_input_stream(path, compression) {
            Ok(input) => input,
            Err(err) if paths.len() == 1 => return Err(err),
            Err(err) => {
                warn!("{}", err);
                continue;
            }
        };

        let before = games.len();
        for game in PgnReaderState::new(input, path.display().to_string()) {
            if let Some(parse_error) = game.parse_error.as_deref() {
                debug!("{}: {}", game.location, parse_error);
            }
            games.push(game);
        }
        debug!("Read {} games from '{}'", games.len() - before, path.display());
    }

    Ok(games)
}
