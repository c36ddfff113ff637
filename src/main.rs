use anyhow::{Context, Result};
use chess_performance::chess::{self, log};
use chess_performance::{ColorFilter, CompressionMode, PerformanceReport, PlayerQuery};
use clap::Parser;
use tracing::debug;

/// Output the performance of a player (optionally with one color) over PGN files
#[derive(Parser)]
#[command(name = "chess-performance", version)]
struct Args {
    /// Player name to search for (case-sensitive substring)
    #[arg(short, long, value_name = "NAME")]
    player: String,

    /// Only count games played with this color
    #[arg(short, long, value_enum)]
    color: Option<ColorFilter>,

    /// Input compression; auto treats `.zst` files as zstd
    #[arg(long, value_enum, default_value_t = CompressionMode::Auto)]
    compression: CompressionMode,

    /// Print the report as a JSON object
    #[arg(long)]
    json: bool,

    /// Log level (trace, debug, info, warn, error); CHESS_LOG takes precedence
    #[arg(short, long, value_name = "LEVEL", default_value = log::DEFAULT_LEVEL)]
    log_level: String,

    /// PGN files or glob patterns to read
    #[arg(value_name = "PGNS", required = true)]
    pgns: Vec<String>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    log::init(&args.log_level).map_err(anyhow::Error::msg)?;

    let color = args.color.unwrap_or_default();
    let paths = chess::expand_sources(&args.pgns)?;
    debug!("Reading {} PGN sources", paths.len());

    let games = chess::read_games(&paths, args.compression)?;
    let query = PlayerQuery::new(args.player.as_str());
    let outcome = chess::aggregate(&games, &query, color)?;

    let report = PerformanceReport::evaluate(&outcome)
        .with_context(|| format!("Could not find any games for player {:?}", args.player))?;

    if args.json {
        println!("{}", report.to_json(&args.player, color));
    } else {
        println!("{report}");
    }

    Ok(())
}
