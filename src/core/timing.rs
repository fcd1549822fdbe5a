//! Timing thresholds for every game.
//!
//! Defaults reproduce the feel of the original board firmware. Values may be
//! tuned, but [`GameTiming::validate`] keeps their relative ordering intact.

use crate::error::ConfigError;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GameTiming {
    // Simon Says
    pub simon_lead_in_ms: u64,
    pub simon_on_ms: u64,
    pub simon_off_ms: u64,
    pub simon_echo_ms: u64,
    pub error_flash_ms: u64,
    pub error_flashes: u8,

    // Whack-a-Mole
    pub mole_interval_ms: u64,

    // Memory Match
    pub memory_reveal_ms: u64,

    // Reaction Test
    pub reaction_delay_min_ms: u64,
    pub reaction_delay_max_ms: u64,
    pub reaction_window_ms: u64,
    pub reaction_fast_ms: u64,
    pub reaction_medium_ms: u64,
    pub reaction_fast_points: u32,
    pub reaction_medium_points: u32,
    pub reaction_slow_points: u32,

    // Pattern Race
    pub pattern_interval_ms: u64,
    pub pattern_window_ms: u64,

    // LED Chase
    pub chase_step_ms: u64,

    // Boot animation
    pub intro_step_ms: u64,
    pub intro_hold_ms: u64,
}

impl Default for GameTiming {
    fn default() -> Self {
        Self {
            simon_lead_in_ms: 1000,
            simon_on_ms: 500,
            simon_off_ms: 300,
            simon_echo_ms: 200,
            error_flash_ms: 100,
            error_flashes: 3,
            mole_interval_ms: 1500,
            memory_reveal_ms: 1000,
            reaction_delay_min_ms: 2000,
            reaction_delay_max_ms: 5000,
            reaction_window_ms: 3000,
            reaction_fast_ms: 500,
            reaction_medium_ms: 1000,
            reaction_fast_points: 10,
            reaction_medium_points: 5,
            reaction_slow_points: 1,
            pattern_interval_ms: 2000,
            pattern_window_ms: 8000,
            chase_step_ms: 300,
            intro_step_ms: 100,
            intro_hold_ms: 200,
        }
    }
}

#[inline]
pub(crate) fn ms(v: u64) -> Duration {
    Duration::from_millis(v)
}

fn non_zero(name: &'static str, v: u64) -> Result<(), ConfigError> {
    if v == 0 {
        Err(ConfigError::Zero(name))
    } else {
        Ok(())
    }
}

fn below(
    lower: &'static str,
    lower_ms: u64,
    upper: &'static str,
    upper_ms: u64,
    strict: bool,
) -> Result<(), ConfigError> {
    let ok = if strict {
        lower_ms < upper_ms
    } else {
        lower_ms <= upper_ms
    };
    if ok {
        Ok(())
    } else {
        Err(ConfigError::Ordering {
            lower,
            lower_ms,
            upper,
            upper_ms,
        })
    }
}

impl GameTiming {
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, v) in [
            ("simon_lead_in_ms", self.simon_lead_in_ms),
            ("simon_on_ms", self.simon_on_ms),
            ("simon_off_ms", self.simon_off_ms),
            ("simon_echo_ms", self.simon_echo_ms),
            ("error_flash_ms", self.error_flash_ms),
            ("error_flashes", u64::from(self.error_flashes)),
            ("mole_interval_ms", self.mole_interval_ms),
            ("memory_reveal_ms", self.memory_reveal_ms),
            ("reaction_delay_min_ms", self.reaction_delay_min_ms),
            ("reaction_window_ms", self.reaction_window_ms),
            ("reaction_fast_ms", self.reaction_fast_ms),
            ("pattern_interval_ms", self.pattern_interval_ms),
            ("pattern_window_ms", self.pattern_window_ms),
            ("chase_step_ms", self.chase_step_ms),
            ("intro_step_ms", self.intro_step_ms),
        ] {
            non_zero(name, v)?;
        }

        below(
            "reaction_delay_min_ms",
            self.reaction_delay_min_ms,
            "reaction_delay_max_ms",
            self.reaction_delay_max_ms,
            true,
        )?;
        below(
            "reaction_fast_ms",
            self.reaction_fast_ms,
            "reaction_medium_ms",
            self.reaction_medium_ms,
            true,
        )?;
        below(
            "reaction_medium_ms",
            self.reaction_medium_ms,
            "reaction_window_ms",
            self.reaction_window_ms,
            false,
        )?;
        // The echo of the last correct press must be gone before replay starts.
        below(
            "simon_echo_ms",
            self.simon_echo_ms,
            "simon_lead_in_ms",
            self.simon_lead_in_ms,
            false,
        )?;

        let (fast, medium, slow) = (
            self.reaction_fast_points,
            self.reaction_medium_points,
            self.reaction_slow_points,
        );
        if fast < medium || medium < slow || slow == 0 {
            return Err(ConfigError::Points { fast, medium, slow });
        }
        Ok(())
    }

    /// Points for a correct reaction after `latency`.
    pub fn reaction_points(&self, latency: Duration) -> u32 {
        if latency < ms(self.reaction_fast_ms) {
            self.reaction_fast_points
        } else if latency < ms(self.reaction_medium_ms) {
            self.reaction_medium_points
        } else {
            self.reaction_slow_points
        }
    }
}
