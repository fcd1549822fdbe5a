use thiserror::Error;

/// A control-surface command that was rejected before touching any state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("invalid game id {0} (expected 0..=5)")]
    InvalidGame(i64),
    #[error("invalid led index {0} (expected 0..=5)")]
    InvalidLed(i64),
    #[error("invalid button index {0} (expected 0..=5)")]
    InvalidButton(i64),
    #[error("invalid led state {0} (expected 0 or 1)")]
    InvalidLedState(i64),
    #[error("{0} is not supported by this board")]
    Unsupported(&'static str),
}

/// Timing configuration that breaks the required ordering of thresholds.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("{0} must be greater than zero")]
    Zero(&'static str),
    #[error("{lower} ({lower_ms} ms) must be below {upper} ({upper_ms} ms)")]
    Ordering {
        lower: &'static str,
        lower_ms: u64,
        upper: &'static str,
        upper_ms: u64,
    },
    #[error("reaction points must not increase with latency (fast {fast}, medium {medium}, slow {slow})")]
    Points { fast: u32, medium: u32, slow: u32 },
}
