//! gamehub: six button-and-LED mini-games on one board, driven by a
//! non-blocking engine and remotely controllable over a line protocol.

#[path = "core/error.rs"]
pub mod error;

#[path = "core/hardware.rs"]
pub mod hardware;

#[path = "core/input.rs"]
pub mod input;

#[path = "core/prng.rs"]
pub mod prng;

#[path = "core/scoreboard.rs"]
pub mod scoreboard;

#[path = "core/timing.rs"]
pub mod timing;

#[path = "core/variant.rs"]
pub mod variant;

#[path = "core/engine.rs"]
pub mod engine;

#[path = "core/scheduler.rs"]
pub mod scheduler;

pub mod control;
pub mod games;
pub mod protocol;

pub use engine::{GameEngine, GameSession, Status};
pub use error::{CommandError, ConfigError};
pub use hardware::{HardwarePort, LedState, MemoryPort, NUM_BUTTONS, NUM_LEDS};
pub use input::{ButtonState, InputSampler};
pub use prng::{Prng, RandomSource};
pub use scheduler::Scheduler;
pub use timing::GameTiming;
pub use variant::GameVariant;
