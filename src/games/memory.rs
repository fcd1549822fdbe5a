//! Memory Match: reveal two LEDs; LEDs `i` and `j` form a pair when
//! `i % 3 == j % 3`. Both go dark after `memory_reveal_ms`.

use std::time::Instant;

use crate::engine::Cx;
use crate::games::Flow;
use crate::hardware::HardwarePort;
use crate::input::ButtonState;
use crate::prng::RandomSource;
use crate::timing::ms;

#[derive(Debug, Clone)]
pub struct MemoryMatch {
    first: Option<usize>,
    second: Option<usize>,
    revealed_at: Instant,
}

pub fn is_pair(a: usize, b: usize) -> bool {
    a != b && a % 3 == b % 3
}

impl MemoryMatch {
    pub(crate) fn new(now: Instant) -> Self {
        Self {
            first: None,
            second: None,
            revealed_at: now,
        }
    }

    pub fn picks(&self) -> (Option<usize>, Option<usize>) {
        (self.first, self.second)
    }

    pub(crate) fn update<P: HardwarePort, R: RandomSource>(
        &mut self,
        now: Instant,
        buttons: &ButtonState,
        cx: &mut Cx<'_, P, R>,
    ) -> Flow {
        if let (Some(a), Some(b)) = (self.first, self.second) {
            let reveal = ms(cx.timing().memory_reveal_ms);
            if now.saturating_duration_since(self.revealed_at) >= reveal {
                cx.set_led(a, false);
                cx.set_led(b, false);
                if is_pair(a, b) {
                    cx.award(1);
                }
                self.first = None;
                self.second = None;
            }
            // Input is ignored while a pair is on show.
            return Flow::Continue;
        }

        let Some(pick) = buttons.first_press_edge() else {
            return Flow::Continue;
        };
        if cx.is_lit(pick) {
            return Flow::Continue;
        }
        match self.first {
            None => {
                self.first = Some(pick);
                cx.set_led(pick, true);
            }
            Some(first) if first != pick => {
                self.second = Some(pick);
                cx.set_led(pick, true);
                self.revealed_at = now;
            }
            Some(_) => {}
        }
        Flow::Continue
    }
}

#[cfg(test)]
mod tests {
    use super::is_pair;
    use std::time::{Duration, Instant};

    use crate::engine::tests::{at, engine, idle, press};
    use crate::variant::GameVariant;

    #[test]
    fn pairs_are_mod_three() {
        assert!(is_pair(0, 3));
        assert!(is_pair(5, 2));
        assert!(!is_pair(1, 2));
        assert!(!is_pair(4, 4));
    }

    #[test]
    fn matching_pair_scores_after_reveal() {
        let t0 = Instant::now();
        let mut e = engine(1);
        e.start(GameVariant::MemoryMatch, t0);

        e.tick(at(t0, 10), press(1));
        e.tick(at(t0, 20), idle());
        e.tick(at(t0, 30), press(4));
        assert_eq!(e.leds().mask(), 0b010010);

        e.tick(at(t0, 500), idle());
        assert_eq!(e.scoreboard().get(GameVariant::MemoryMatch), 0);
        e.tick(at(t0, 1030), idle());
        assert_eq!(e.scoreboard().get(GameVariant::MemoryMatch), 1);
        assert!(!e.leds().any_lit());
    }

    #[test]
    fn mismatch_clears_without_score() {
        let t0 = Instant::now();
        let mut e = engine(1);
        e.start(GameVariant::MemoryMatch, t0);

        e.tick(at(t0, 10), press(0));
        e.tick(at(t0, 20), press(2));
        e.tick(at(t0, 1020), idle());
        assert_eq!(e.scoreboard().get(GameVariant::MemoryMatch), 0);
        assert!(!e.leds().any_lit());
    }

    #[test]
    fn repeated_first_pick_is_ignored() {
        let t0 = Instant::now();
        let mut e = engine(1);
        e.start(GameVariant::MemoryMatch, t0);

        e.tick(at(t0, 10), press(2));
        e.tick(at(t0, 20), idle());
        e.tick(at(t0, 30), press(2));
        assert_eq!(e.leds().mask(), 0b000100);

        // Presses while a pair is showing do nothing.
        e.tick(at(t0, 40), press(5));
        e.tick(at(t0, 50), press(0));
        assert_eq!(e.leds().mask(), 0b100100);
        e.tick(at(t0, 40) + Duration::from_millis(1000), idle());
        assert_eq!(e.scoreboard().get(GameVariant::MemoryMatch), 1);
    }

    #[test]
    fn first_pick_cannot_be_its_own_partner() {
        let t0 = Instant::now();
        let mut e = engine(1);
        e.start(GameVariant::MemoryMatch, t0);

        e.tick(at(t0, 10), press(3));
        e.tick(at(t0, 20), idle());
        // The first pick's LED is switched off from outside.
        e.set_led(3, Some(0)).unwrap();
        e.tick(at(t0, 30), press(3));
        e.tick(at(t0, 40), idle());

        let Some(crate::games::Game::MemoryMatch(game)) = e.session().map(|s| s.game()) else {
            panic!("memory match running");
        };
        assert_eq!(game.picks(), (Some(3), None));
        assert!(!e.leds().any_lit());

        e.tick(at(t0, 50), press(0));
        e.tick(at(t0, 1050), idle());
        assert_eq!(e.scoreboard().get(GameVariant::MemoryMatch), 1);
    }
}
