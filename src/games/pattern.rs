//! Pattern Race: a random non-empty LED pattern appears; holding exactly the
//! matching buttons scores. The next pattern follows `pattern_interval_ms`
//! after a match, and an unmatched pattern is replaced once its
//! `pattern_window_ms` runs out.

use std::time::Instant;

use crate::engine::Cx;
use crate::games::Flow;
use crate::hardware::HardwarePort;
use crate::input::ButtonState;
use crate::prng::RandomSource;
use crate::timing::ms;

#[derive(Debug, Clone)]
pub struct PatternRace {
    target: Option<u8>,
    shown_at: Instant,
}

impl PatternRace {
    pub(crate) fn new(now: Instant) -> Self {
        Self {
            target: None,
            shown_at: now,
        }
    }

    /// Pattern on display, bit `i` for LED `i`.
    pub fn target(&self) -> Option<u8> {
        self.target
    }

    pub fn waiting_for_input(&self) -> bool {
        self.target.is_some()
    }

    fn show<P: HardwarePort, R: RandomSource>(&mut self, now: Instant, cx: &mut Cx<'_, P, R>) {
        let pattern = cx.random_pattern();
        cx.show_mask(pattern);
        self.target = Some(pattern);
        self.shown_at = now;
    }

    pub(crate) fn update<P: HardwarePort, R: RandomSource>(
        &mut self,
        now: Instant,
        buttons: &ButtonState,
        cx: &mut Cx<'_, P, R>,
    ) -> Flow {
        let t = cx.timing();
        let elapsed = now.saturating_duration_since(self.shown_at);
        match self.target {
            None => {
                if elapsed >= ms(t.pattern_interval_ms) {
                    self.show(now, cx);
                }
            }
            Some(target) => {
                let held = buttons.held_mask();
                if held != 0 && held == target {
                    cx.award(1);
                    cx.all_off();
                    self.target = None;
                    self.shown_at = now;
                } else if elapsed >= ms(t.pattern_window_ms) {
                    self.show(now, cx);
                }
            }
        }
        Flow::Continue
    }
}
