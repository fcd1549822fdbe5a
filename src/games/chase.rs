//! LED Chase: the light steps one LED to the right every `chase_step_ms`,
//! wrapping around. Pressing the lit LED's button scores.

use std::time::Instant;

use crate::engine::Cx;
use crate::games::Flow;
use crate::hardware::{HardwarePort, NUM_LEDS};
use crate::input::ButtonState;
use crate::prng::RandomSource;
use crate::timing::ms;

#[derive(Debug, Clone)]
pub struct LedChase {
    lit: Option<usize>,
    advanced_at: Instant,
}

impl LedChase {
    pub(crate) fn new(now: Instant) -> Self {
        Self {
            lit: None,
            advanced_at: now,
        }
    }

    pub fn lit(&self) -> Option<usize> {
        self.lit
    }

    pub(crate) fn update<P: HardwarePort, R: RandomSource>(
        &mut self,
        now: Instant,
        buttons: &ButtonState,
        cx: &mut Cx<'_, P, R>,
    ) -> Flow {
        let step = ms(cx.timing().chase_step_ms);
        if now.saturating_duration_since(self.advanced_at) >= step {
            let next = self.lit.map(|i| (i + 1) % NUM_LEDS).unwrap_or(0);
            cx.all_off();
            cx.set_led(next, true);
            self.lit = Some(next);
            self.advanced_at = now;
        }

        if let Some(lit) = self.lit {
            if buttons.pressed_edge(lit) {
                cx.award(1);
            }
        }
        Flow::Continue
    }
}
