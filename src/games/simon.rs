//! Simon Says: watch the sequence, then repeat it.
//!
//! A round is a lead-in pause, a replay of the whole sequence (each LED on
//! for `simon_on_ms` then off for `simon_off_ms`), then the input phase. A
//! correct press lights that LED for `simon_echo_ms`. Completing the sequence
//! scores a point and grows it by one. A wrong press flashes the whole board
//! and ends the game.

use std::time::Instant;

use tracing::debug;

use crate::engine::Cx;
use crate::games::Flow;
use crate::hardware::HardwarePort;
use crate::input::ButtonState;
use crate::prng::RandomSource;
use crate::timing::ms;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    LeadIn,
    Replay { cursor: usize, lit: bool },
    Input { cursor: usize },
    Failing { flashes: u8, lit: bool },
}

#[derive(Debug, Clone)]
pub struct SimonSays {
    sequence: Vec<usize>,
    phase: Phase,
    last_step: Instant,
    echo: Option<(usize, Instant)>,
}

impl SimonSays {
    pub(crate) fn new<P: HardwarePort, R: RandomSource>(now: Instant, cx: &mut Cx<'_, P, R>) -> Self {
        Self {
            sequence: vec![cx.random_led()],
            phase: Phase::LeadIn,
            last_step: now,
            echo: None,
        }
    }

    pub fn sequence(&self) -> &[usize] {
        &self.sequence
    }

    pub fn waiting_for_input(&self) -> bool {
        matches!(self.phase, Phase::Input { .. })
    }

    /// Position in the replay, while the sequence is being shown.
    pub fn replay_cursor(&self) -> Option<usize> {
        match self.phase {
            Phase::Replay { cursor, .. } => Some(cursor),
            _ => None,
        }
    }

    /// Next expected position, while waiting for input.
    pub fn input_cursor(&self) -> Option<usize> {
        match self.phase {
            Phase::Input { cursor } => Some(cursor),
            _ => None,
        }
    }

    pub fn is_failing(&self) -> bool {
        matches!(self.phase, Phase::Failing { .. })
    }

    pub fn last_step(&self) -> Instant {
        self.last_step
    }

    fn enter(&mut self, phase: Phase, now: Instant) {
        self.phase = phase;
        self.last_step = now;
    }

    pub(crate) fn update<P: HardwarePort, R: RandomSource>(
        &mut self,
        now: Instant,
        buttons: &ButtonState,
        cx: &mut Cx<'_, P, R>,
    ) -> Flow {
        let t = cx.timing();

        if let Some((led, until)) = self.echo {
            if now >= until {
                cx.set_led(led, false);
                self.echo = None;
            }
        }

        let elapsed = now.saturating_duration_since(self.last_step);
        match self.phase {
            Phase::LeadIn => {
                if elapsed >= ms(t.simon_lead_in_ms) {
                    cx.set_led(self.sequence[0], true);
                    self.enter(Phase::Replay { cursor: 0, lit: true }, now);
                }
            }
            Phase::Replay { cursor, lit: true } => {
                if elapsed >= ms(t.simon_on_ms) {
                    cx.set_led(self.sequence[cursor], false);
                    self.enter(Phase::Replay { cursor, lit: false }, now);
                }
            }
            Phase::Replay { cursor, lit: false } => {
                if elapsed >= ms(t.simon_off_ms) {
                    let next = cursor + 1;
                    if next < self.sequence.len() {
                        cx.set_led(self.sequence[next], true);
                        self.enter(Phase::Replay { cursor: next, lit: true }, now);
                    } else {
                        self.enter(Phase::Input { cursor: 0 }, now);
                    }
                }
            }
            Phase::Input { cursor } => {
                let Some(pressed) = buttons.first_press_edge() else {
                    return Flow::Continue;
                };
                if pressed != self.sequence[cursor] {
                    debug!(
                        "Simon: expected {} got {} at step {}",
                        self.sequence[cursor], pressed, cursor
                    );
                    self.echo = None;
                    cx.all_on();
                    self.enter(Phase::Failing { flashes: 0, lit: true }, now);
                    return Flow::Continue;
                }

                if let Some((prev, _)) = self.echo.take() {
                    cx.set_led(prev, false);
                }
                cx.set_led(pressed, true);
                self.echo = Some((pressed, now + ms(t.simon_echo_ms)));

                let next = cursor + 1;
                if next == self.sequence.len() {
                    cx.award(1);
                    let led = cx.random_led();
                    self.sequence.push(led);
                    debug!("Simon: round complete, sequence length {}", self.sequence.len());
                    self.enter(Phase::LeadIn, now);
                } else {
                    self.phase = Phase::Input { cursor: next };
                }
            }
            Phase::Failing { flashes, lit } => {
                if elapsed >= ms(t.error_flash_ms) {
                    if lit {
                        cx.all_off();
                        let flashes = flashes + 1;
                        if flashes >= t.error_flashes {
                            return Flow::GameOver;
                        }
                        self.enter(Phase::Failing { flashes, lit: false }, now);
                    } else {
                        cx.all_on();
                        self.enter(Phase::Failing { flashes, lit: true }, now);
                    }
                }
            }
        }
        Flow::Continue
    }
}
