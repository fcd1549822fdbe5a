use gamehub::ConfigError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DaemonError {
    #[error("Could not determine config directory")]
    NoConfigDir,
    #[error("Failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse {path:?}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("Invalid game timing: {0}")]
    Timing(#[from] ConfigError),
    #[error("tick_ms must be between 1 and 100 (got {0})")]
    TickRate(u64),
}
