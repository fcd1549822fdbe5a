//! The six games. Each one is a small state machine advanced by the engine
//! on every tick; none of them ever waits. Timed behavior stores a timestamp
//! and compares it against `now` on the next update.

use std::time::Instant;

use crate::engine::Cx;
use crate::hardware::HardwarePort;
use crate::input::ButtonState;
use crate::prng::RandomSource;
use crate::variant::GameVariant;

pub mod chase;
pub mod memory;
pub mod pattern;
pub mod reaction;
pub mod simon;
pub mod whack;

pub use chase::LedChase;
pub use memory::MemoryMatch;
pub use pattern::PatternRace;
pub use reaction::ReactionTest;
pub use simon::SimonSays;
pub use whack::WhackAMole;

/// What the engine should do after an update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    /// The game ended itself; the engine stops the session.
    GameOver,
}

/// Per-game substate of the running session.
#[derive(Debug, Clone)]
pub enum Game {
    SimonSays(SimonSays),
    WhackAMole(WhackAMole),
    MemoryMatch(MemoryMatch),
    ReactionTest(ReactionTest),
    PatternRace(PatternRace),
    LedChase(LedChase),
}

impl Game {
    /// Seed a fresh game. `None` for [`GameVariant::Idle`].
    pub(crate) fn new<P: HardwarePort, R: RandomSource>(
        variant: GameVariant,
        now: Instant,
        cx: &mut Cx<'_, P, R>,
    ) -> Option<Self> {
        let game = match variant {
            GameVariant::Idle => return None,
            GameVariant::SimonSays => Game::SimonSays(SimonSays::new(now, cx)),
            GameVariant::WhackAMole => Game::WhackAMole(WhackAMole::new(now)),
            GameVariant::MemoryMatch => Game::MemoryMatch(MemoryMatch::new(now)),
            GameVariant::ReactionTest => Game::ReactionTest(ReactionTest::new(now, cx)),
            GameVariant::PatternRace => Game::PatternRace(PatternRace::new(now)),
            GameVariant::LedChase => Game::LedChase(LedChase::new(now)),
        };
        Some(game)
    }

    pub fn variant(&self) -> GameVariant {
        match self {
            Game::SimonSays(_) => GameVariant::SimonSays,
            Game::WhackAMole(_) => GameVariant::WhackAMole,
            Game::MemoryMatch(_) => GameVariant::MemoryMatch,
            Game::ReactionTest(_) => GameVariant::ReactionTest,
            Game::PatternRace(_) => GameVariant::PatternRace,
            Game::LedChase(_) => GameVariant::LedChase,
        }
    }

    pub(crate) fn update<P: HardwarePort, R: RandomSource>(
        &mut self,
        now: Instant,
        buttons: &ButtonState,
        cx: &mut Cx<'_, P, R>,
    ) -> Flow {
        match self {
            Game::SimonSays(g) => g.update(now, buttons, cx),
            Game::WhackAMole(g) => g.update(now, buttons, cx),
            Game::MemoryMatch(g) => g.update(now, buttons, cx),
            Game::ReactionTest(g) => g.update(now, buttons, cx),
            Game::PatternRace(g) => g.update(now, buttons, cx),
            Game::LedChase(g) => g.update(now, buttons, cx),
        }
    }
}
