//! Game identifiers, as seen by the control surface.

use crate::error::CommandError;

/// Number of playable games.
pub const NUM_GAMES: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GameVariant {
    #[default]
    Idle,
    SimonSays,
    WhackAMole,
    MemoryMatch,
    ReactionTest,
    PatternRace,
    LedChase,
}

impl GameVariant {
    /// Playable variants in id order.
    pub const PLAYABLE: [GameVariant; NUM_GAMES] = [
        GameVariant::SimonSays,
        GameVariant::WhackAMole,
        GameVariant::MemoryMatch,
        GameVariant::ReactionTest,
        GameVariant::PatternRace,
        GameVariant::LedChase,
    ];

    /// Resolve a wire id. Anything outside `0..NUM_GAMES` is rejected.
    pub fn from_id(id: i64) -> Result<Self, CommandError> {
        usize::try_from(id)
            .ok()
            .and_then(|i| Self::PLAYABLE.get(i).copied())
            .ok_or(CommandError::InvalidGame(id))
    }

    /// Scoreboard slot; `None` for [`GameVariant::Idle`].
    pub fn id(self) -> Option<usize> {
        match self {
            GameVariant::Idle => None,
            GameVariant::SimonSays => Some(0),
            GameVariant::WhackAMole => Some(1),
            GameVariant::MemoryMatch => Some(2),
            GameVariant::ReactionTest => Some(3),
            GameVariant::PatternRace => Some(4),
            GameVariant::LedChase => Some(5),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            GameVariant::Idle => "None",
            GameVariant::SimonSays => "Simon Says",
            GameVariant::WhackAMole => "Whack-a-Mole",
            GameVariant::MemoryMatch => "Memory Match",
            GameVariant::ReactionTest => "Reaction Test",
            GameVariant::PatternRace => "Pattern Race",
            GameVariant::LedChase => "LED Chase",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            GameVariant::Idle => "No game running",
            GameVariant::SimonSays => "Remember and repeat the LED sequence",
            GameVariant::WhackAMole => "Hit the LED as fast as you can",
            GameVariant::MemoryMatch => "Find matching LED pairs",
            GameVariant::ReactionTest => "Test your reaction speed",
            GameVariant::PatternRace => "Match the LED pattern quickly",
            GameVariant::LedChase => "Catch the moving light",
        }
    }
}

impl std::fmt::Display for GameVariant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
