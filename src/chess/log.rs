use tracing_subscriber::EnvFilter;

/// Environment variable holding a tracing filter directive; overrides the CLI level.
pub const LOG_ENV: &str = "CHESS_LOG";

pub const DEFAULT_LEVEL: &str = "warn";

fn env_filter(fallback_level: &str) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(fallback_level))
}

/// Installs the global stderr subscriber. Stdout is reserved for the report.
pub fn init(fallback_level: &str) -> Result<(), String> {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(env_filter(fallback_level))
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| format!("Failed to initialize logging: {e}"))
}
