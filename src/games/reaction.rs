//! Reaction Test: after a random pause one LED lights up. Pressing it scores
//! by how quickly it was hit. Any press disarms the round; so does letting
//! the response window run out.

use std::time::{Duration, Instant};

use crate::engine::Cx;
use crate::games::Flow;
use crate::hardware::HardwarePort;
use crate::input::ButtonState;
use crate::prng::RandomSource;
use crate::timing::ms;

#[derive(Debug, Clone)]
pub struct ReactionTest {
    armed: Option<usize>,
    armed_at: Instant,
    idle_since: Instant,
    next_delay: Duration,
}

impl ReactionTest {
    pub(crate) fn new<P: HardwarePort, R: RandomSource>(now: Instant, cx: &mut Cx<'_, P, R>) -> Self {
        let t = cx.timing();
        Self {
            armed: None,
            armed_at: now,
            idle_since: now,
            next_delay: cx.random_delay(t.reaction_delay_min_ms, t.reaction_delay_max_ms),
        }
    }

    pub fn armed(&self) -> Option<usize> {
        self.armed
    }

    pub fn waiting_for_input(&self) -> bool {
        self.armed.is_some()
    }

    pub fn armed_at(&self) -> Instant {
        self.armed_at
    }

    pub fn next_delay(&self) -> Duration {
        self.next_delay
    }

    fn disarm<P: HardwarePort, R: RandomSource>(&mut self, now: Instant, cx: &mut Cx<'_, P, R>) {
        let t = cx.timing();
        cx.all_off();
        self.armed = None;
        self.idle_since = now;
        self.next_delay = cx.random_delay(t.reaction_delay_min_ms, t.reaction_delay_max_ms);
    }

    pub(crate) fn update<P: HardwarePort, R: RandomSource>(
        &mut self,
        now: Instant,
        buttons: &ButtonState,
        cx: &mut Cx<'_, P, R>,
    ) -> Flow {
        let t = cx.timing();
        let Some(target) = self.armed else {
            if now.saturating_duration_since(self.idle_since) >= self.next_delay {
                let led = cx.random_led();
                cx.set_led(led, true);
                self.armed = Some(led);
                self.armed_at = now;
            }
            return Flow::Continue;
        };

        let latency = now.saturating_duration_since(self.armed_at);
        if let Some(pressed) = buttons.first_press_edge() {
            if pressed == target {
                cx.award(t.reaction_points(latency));
            }
            self.disarm(now, cx);
        } else if latency >= ms(t.reaction_window_ms) {
            self.disarm(now, cx);
        }
        Flow::Continue
    }
}
