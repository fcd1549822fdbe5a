//! Whack-a-Mole: a random LED lights every `mole_interval_ms`. Hitting it
//! scores; hitting anything else costs a point (never below zero).

use std::time::Instant;

use crate::engine::Cx;
use crate::games::Flow;
use crate::hardware::HardwarePort;
use crate::input::ButtonState;
use crate::prng::RandomSource;
use crate::timing::ms;

#[derive(Debug, Clone)]
pub struct WhackAMole {
    mole: Option<usize>,
    spawned_at: Instant,
}

impl WhackAMole {
    pub(crate) fn new(now: Instant) -> Self {
        Self {
            mole: None,
            spawned_at: now,
        }
    }

    /// The lit mole, if it has not been hit yet.
    pub fn mole(&self) -> Option<usize> {
        self.mole
    }

    pub fn spawned_at(&self) -> Instant {
        self.spawned_at
    }

    pub(crate) fn update<P: HardwarePort, R: RandomSource>(
        &mut self,
        now: Instant,
        buttons: &ButtonState,
        cx: &mut Cx<'_, P, R>,
    ) -> Flow {
        let interval = ms(cx.timing().mole_interval_ms);
        if now.saturating_duration_since(self.spawned_at) >= interval {
            cx.all_off();
            let mole = cx.random_led();
            cx.set_led(mole, true);
            self.mole = Some(mole);
            self.spawned_at = now;
        }

        if let Some(hit) = buttons.first_press_edge() {
            if self.mole == Some(hit) {
                cx.award(1);
                cx.set_led(hit, false);
                self.mole = None;
            } else {
                cx.penalize(1);
            }
        }
        Flow::Continue
    }
}
