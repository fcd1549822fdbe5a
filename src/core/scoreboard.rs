use crate::variant::{GameVariant, NUM_GAMES};

/// Per-game score, live for that game's most recent session.
///
/// Scores are never negative: penalties saturate at zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Scoreboard {
    scores: [u32; NUM_GAMES],
}

impl Scoreboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, variant: GameVariant) -> u32 {
        variant.id().map(|i| self.scores[i]).unwrap_or(0)
    }

    /// Zero the entry for `variant`. Other games keep their last score.
    pub fn reset(&mut self, variant: GameVariant) {
        if let Some(i) = variant.id() {
            self.scores[i] = 0;
        }
    }

    pub(crate) fn entry_mut(&mut self, variant: GameVariant) -> Option<&mut u32> {
        variant.id().map(|i| &mut self.scores[i])
    }

    pub fn as_array(&self) -> [u32; NUM_GAMES] {
        self.scores
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reset_only_touches_one_entry() {
        let mut board = Scoreboard::new();
        *board.entry_mut(GameVariant::SimonSays).unwrap() = 4;
        *board.entry_mut(GameVariant::LedChase).unwrap() = 9;

        board.reset(GameVariant::SimonSays);
        assert_eq!(board.as_array(), [0, 0, 0, 0, 0, 9]);
    }

    #[test]
    fn idle_has_no_entry() {
        let mut board = Scoreboard::new();
        assert!(board.entry_mut(GameVariant::Idle).is_none());
        assert_eq!(board.get(GameVariant::Idle), 0);
    }
}
