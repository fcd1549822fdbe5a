//! Daemon configuration.
//!
//! Read once at startup from `config.json` in the app config directory. Every
//! field is optional; a missing file means all defaults.

use crate::error::DaemonError;
use gamehub::GameTiming;
use serde::{Deserialize, Serialize};
use std::path::Path;

fn default_bind() -> String {
    "0.0.0.0:9876".to_string()
}

fn default_tick_ms() -> u64 {
    10
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DaemonConfig {
    /// Address the control surface listens on.
    #[serde(default = "default_bind")]
    pub bind: String,
    /// Scheduler period. Also bounds how long a request waits for service.
    #[serde(default = "default_tick_ms")]
    pub tick_ms: u64,
    /// Fixed RNG seed; unset means seeded from the clock.
    #[serde(default)]
    pub seed: Option<u64>,
    /// Play the LED sweep at boot.
    #[serde(default = "default_true")]
    pub intro: bool,
    #[serde(default)]
    pub timing: GameTiming,
}

impl Default for DaemonConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            tick_ms: default_tick_ms(),
            seed: None,
            intro: true,
            timing: GameTiming::default(),
        }
    }
}

impl DaemonConfig {
    pub fn load(path: &Path) -> Result<Self, DaemonError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(path).map_err(|source| DaemonError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::parse(&text).map_err(|source| DaemonError::Json {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    fn parse(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    pub fn validate(&self) -> Result<(), DaemonError> {
        if !(1..=100).contains(&self.tick_ms) {
            return Err(DaemonError::TickRate(self.tick_ms));
        }
        self.timing.validate()?;
        Ok(())
    }
}
