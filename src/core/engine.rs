//! The game engine: one optional session, one LED bank, one scoreboard.
//!
//! Everything that reaches the LEDs goes through [`Outputs::write`]. Games see
//! the board only through [`Cx`], which borrows the engine's outputs, the
//! active game's score slot, the random source and the timing table for the
//! duration of one update.

use std::time::{Duration, Instant};

use tracing::{debug, info};

use crate::error::{CommandError, ConfigError};
use crate::games::{Flow, Game};
use crate::hardware::{HardwarePort, LedState, NUM_BUTTONS, NUM_LEDS};
use crate::input::ButtonState;
use crate::prng::{Prng, RandomSource};
use crate::scoreboard::Scoreboard;
use crate::timing::{ms, GameTiming};
use crate::variant::{GameVariant, NUM_GAMES};

// ═══════════════════════════════════════════════════════════════════════════
// Outputs
// ═══════════════════════════════════════════════════════════════════════════

#[derive(Debug)]
struct Outputs<P> {
    port: P,
    leds: LedState,
}

impl<P: HardwarePort> Outputs<P> {
    /// The only place LED state changes.
    fn write(&mut self, index: usize, on: bool) {
        self.leds.0[index] = on;
        self.port.write_led(index, on);
    }

    fn fill(&mut self, on: bool) {
        for i in 0..NUM_LEDS {
            self.write(i, on);
        }
    }

    /// Write only the LEDs that differ from `target`.
    fn apply(&mut self, target: LedState) {
        for i in 0..NUM_LEDS {
            if self.leds.get(i) != target.get(i) {
                self.write(i, target.get(i));
            }
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Game context
// ═══════════════════════════════════════════════════════════════════════════

/// What a game may touch during one update.
pub struct Cx<'a, P, R> {
    outputs: &'a mut Outputs<P>,
    score: &'a mut u32,
    rng: &'a mut R,
    timing: &'a GameTiming,
}

impl<'a, P: HardwarePort, R: RandomSource> Cx<'a, P, R> {
    pub fn timing(&self) -> &'a GameTiming {
        self.timing
    }

    pub fn set_led(&mut self, index: usize, on: bool) {
        self.outputs.write(index, on);
    }

    pub fn all_off(&mut self) {
        self.outputs.fill(false);
    }

    pub fn all_on(&mut self) {
        self.outputs.fill(true);
    }

    /// Light exactly the LEDs whose bits are set in `mask`.
    pub fn show_mask(&mut self, mask: u8) {
        for i in 0..NUM_LEDS {
            self.outputs.write(i, mask & (1 << i) != 0);
        }
    }

    pub fn is_lit(&self, index: usize) -> bool {
        self.outputs.leds.get(index)
    }

    pub fn score(&self) -> u32 {
        *self.score
    }

    pub fn award(&mut self, points: u32) {
        *self.score = self.score.saturating_add(points);
    }

    /// Subtract `points`, stopping at zero.
    pub fn penalize(&mut self, points: u32) {
        *self.score = self.score.saturating_sub(points);
    }

    pub fn random_led(&mut self) -> usize {
        self.rng.gen_range_usize(0, NUM_LEDS)
    }

    /// Random non-empty 6-bit LED pattern.
    pub fn random_pattern(&mut self) -> u8 {
        self.rng.gen_range_usize(1, 1 << NUM_LEDS) as u8
    }

    pub fn random_delay(&mut self, min_ms: u64, max_ms: u64) -> Duration {
        ms(self.rng.gen_range_u64(min_ms, max_ms))
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Sessions
// ═══════════════════════════════════════════════════════════════════════════

/// One run of one game.
#[derive(Debug)]
pub struct GameSession {
    started_at: Instant,
    game: Game,
}

impl GameSession {
    pub fn variant(&self) -> GameVariant {
        self.game.variant()
    }

    pub fn started_at(&self) -> Instant {
        self.started_at
    }

    pub fn game(&self) -> &Game {
        &self.game
    }
}

/// Boot animation: LEDs come on one by one, hold, then go off one by one.
#[derive(Debug, Clone, Copy)]
struct Intro {
    started_at: Instant,
}

impl Intro {
    /// LED frame at `now`, or `None` once the animation has finished.
    fn frame(&self, now: Instant, timing: &GameTiming) -> Option<LedState> {
        let step = timing.intro_step_ms;
        let t = now.saturating_duration_since(self.started_at).as_millis() as u64;
        let lit_until = NUM_LEDS as u64 * step;
        let off_from = lit_until + timing.intro_hold_ms;
        let done_at = off_from + NUM_LEDS as u64 * step;

        let mut leds = LedState::default();
        if t < lit_until {
            let count = (t / step + 1) as usize;
            leds.0[..count].fill(true);
        } else if t < off_from {
            leds.0.fill(true);
        } else if t < done_at {
            let off = ((t - off_from) / step + 1) as usize;
            leds.0[off.min(NUM_LEDS)..].fill(true);
        } else {
            return None;
        }
        Some(leds)
    }
}

/// Consistent view of the whole console at one instant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Status {
    pub leds: [bool; NUM_LEDS],
    pub buttons: [bool; NUM_BUTTONS],
    pub scores: [u32; NUM_GAMES],
    pub active: GameVariant,
}

impl Status {
    pub fn game_active(&self) -> bool {
        self.active != GameVariant::Idle
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Engine
// ═══════════════════════════════════════════════════════════════════════════

#[derive(Debug)]
pub struct GameEngine<P, R = Prng> {
    outputs: Outputs<P>,
    buttons: ButtonState,
    scoreboard: Scoreboard,
    session: Option<GameSession>,
    intro: Option<Intro>,
    rng: R,
    timing: GameTiming,
}

impl<P: HardwarePort, R: RandomSource> GameEngine<P, R> {
    /// Engine with the default timing table. LEDs are driven dark immediately.
    pub fn new(port: P, rng: R) -> Self {
        let mut engine = Self {
            outputs: Outputs {
                port,
                leds: LedState::default(),
            },
            buttons: ButtonState::default(),
            scoreboard: Scoreboard::new(),
            session: None,
            intro: None,
            rng,
            timing: GameTiming::default(),
        };
        engine.outputs.fill(false);
        engine
    }

    pub fn with_timing(port: P, rng: R, timing: GameTiming) -> Result<Self, ConfigError> {
        timing.validate()?;
        let mut engine = Self::new(port, rng);
        engine.timing = timing;
        Ok(engine)
    }

    pub fn timing(&self) -> &GameTiming {
        &self.timing
    }

    pub fn leds(&self) -> LedState {
        self.outputs.leds
    }

    pub fn buttons(&self) -> ButtonState {
        self.buttons
    }

    pub fn scoreboard(&self) -> &Scoreboard {
        &self.scoreboard
    }

    pub fn session(&self) -> Option<&GameSession> {
        self.session.as_ref()
    }

    pub fn active_variant(&self) -> GameVariant {
        self.session
            .as_ref()
            .map(GameSession::variant)
            .unwrap_or(GameVariant::Idle)
    }

    pub fn is_active(&self) -> bool {
        self.session.is_some()
    }

    pub fn port(&self) -> &P {
        &self.outputs.port
    }

    pub(crate) fn port_mut(&mut self) -> &mut P {
        &mut self.outputs.port
    }

    /// Begin the boot animation. It runs on idle ticks until it finishes or
    /// any command touches the LEDs.
    pub fn play_intro(&mut self, now: Instant) {
        self.intro = Some(Intro { started_at: now });
    }

    pub fn intro_running(&self) -> bool {
        self.intro.is_some()
    }

    /// Start `variant`, replacing whatever was running.
    ///
    /// Starting [`GameVariant::Idle`] is the same as [`GameEngine::stop`].
    pub fn start(&mut self, variant: GameVariant, now: Instant) {
        self.stop();
        self.scoreboard.reset(variant);
        let Some(score) = self.scoreboard.entry_mut(variant) else {
            return;
        };

        let mut cx = Cx {
            outputs: &mut self.outputs,
            score,
            rng: &mut self.rng,
            timing: &self.timing,
        };
        let Some(game) = Game::new(variant, now, &mut cx) else {
            return;
        };
        info!("Game started: {}", variant);
        self.session = Some(GameSession {
            started_at: now,
            game,
        });
    }

    /// Validate a wire game id and start it. Nothing changes on error.
    pub fn start_id(&mut self, id: i64, now: Instant) -> Result<GameVariant, CommandError> {
        let variant = GameVariant::from_id(id)?;
        self.start(variant, now);
        Ok(variant)
    }

    /// End the session (if any) and turn every LED off. Idempotent.
    pub fn stop(&mut self) {
        self.intro = None;
        if let Some(session) = self.session.take() {
            let variant = session.variant();
            info!(
                "Game stopped: {} (score {})",
                variant,
                self.scoreboard.get(variant)
            );
        }
        self.outputs.fill(false);
    }

    /// Set LED `index` from the control surface. `None` toggles.
    ///
    /// A running boot animation is cancelled and its frame blanked first, so
    /// the command applies to a dark board. Returns the LED's new state.
    /// Nothing changes on error.
    pub fn set_led(&mut self, index: i64, state: Option<i64>) -> Result<bool, CommandError> {
        let i = usize::try_from(index)
            .ok()
            .filter(|&i| i < NUM_LEDS)
            .ok_or(CommandError::InvalidLed(index))?;
        if let Some(other) = state.filter(|s| !matches!(s, 0 | 1)) {
            return Err(CommandError::InvalidLedState(other));
        }
        if self.intro.take().is_some() {
            self.outputs.fill(false);
        }
        let on = match state {
            Some(s) => s == 1,
            None => !self.outputs.leds.get(i),
        };
        self.outputs.write(i, on);
        Ok(on)
    }

    /// Advance the engine to `now` with this tick's button sample.
    pub fn tick(&mut self, now: Instant, buttons: ButtonState) {
        self.buttons = buttons;

        let Some(session) = self.session.as_mut() else {
            self.tick_intro(now);
            return;
        };
        let variant = session.game.variant();
        let Some(score) = self.scoreboard.entry_mut(variant) else {
            return;
        };

        let mut cx = Cx {
            outputs: &mut self.outputs,
            score,
            rng: &mut self.rng,
            timing: &self.timing,
        };
        let flow = session.game.update(now, &buttons, &mut cx);
        if flow == Flow::GameOver {
            debug!("{} ended itself", variant);
            self.stop();
        }
    }

    fn tick_intro(&mut self, now: Instant) {
        let Some(intro) = self.intro else {
            return;
        };
        match intro.frame(now, &self.timing) {
            Some(frame) => self.outputs.apply(frame),
            None => {
                self.intro = None;
                self.outputs.apply(LedState::default());
            }
        }
    }

    pub fn status(&self) -> Status {
        Status {
            leds: self.outputs.leds.as_array(),
            buttons: self.buttons.current,
            scores: self.scoreboard.as_array(),
            active: self.active_variant(),
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::hardware::MemoryPort;

    pub(crate) fn engine(seed: u64) -> GameEngine<MemoryPort> {
        GameEngine::new(MemoryPort::new(), Prng::new(seed))
    }

    pub(crate) fn idle() -> ButtonState {
        ButtonState::default()
    }

    /// Button `i` pressed this tick, nothing held before.
    pub(crate) fn press(i: usize) -> ButtonState {
        let mut current = [false; NUM_BUTTONS];
        current[i] = true;
        ButtonState::new(current, [false; NUM_BUTTONS])
    }

    pub(crate) fn at(t0: Instant, millis: u64) -> Instant {
        t0 + Duration::from_millis(millis)
    }

    #[test]
    fn toggle_twice_restores_every_led() {
        let mut e = engine(1);
        e.set_led(3, Some(1)).unwrap();
        for i in 0..NUM_LEDS as i64 {
            let before = e.leds();
            e.set_led(i, None).unwrap();
            assert_ne!(e.leds(), before);
            e.set_led(i, None).unwrap();
            assert_eq!(e.leds(), before);
        }
    }

    #[test]
    fn led_writes_reach_the_port() {
        let mut e = engine(1);
        e.set_led(4, Some(1)).unwrap();
        assert!(e.port().leds[4]);
        e.set_led(4, Some(0)).unwrap();
        assert!(!e.port().leds[4]);
    }

    #[test]
    fn bad_led_commands_change_nothing() {
        let mut e = engine(1);
        e.set_led(2, Some(1)).unwrap();
        let before = e.status();
        assert_eq!(e.set_led(6, None), Err(CommandError::InvalidLed(6)));
        assert_eq!(e.set_led(-1, Some(1)), Err(CommandError::InvalidLed(-1)));
        assert_eq!(e.set_led(0, Some(2)), Err(CommandError::InvalidLedState(2)));
        assert_eq!(e.status(), before);
    }

    #[test]
    fn start_resets_only_its_own_score() {
        let t0 = Instant::now();
        let mut e = engine(9);
        for v in GameVariant::PLAYABLE {
            *e.scoreboard.entry_mut(v).unwrap() = 7;
        }
        for v in GameVariant::PLAYABLE {
            e.start(v, t0);
            let status = e.status();
            assert!(status.game_active());
            assert_eq!(status.active, v);
            assert_eq!(e.scoreboard().get(v), 0);
        }
        assert_eq!(e.scoreboard().as_array(), [0; NUM_GAMES]);
    }

    #[test]
    fn start_replaces_running_game() {
        let t0 = Instant::now();
        let mut e = engine(2);
        e.start(GameVariant::LedChase, t0);
        e.tick(at(t0, 400), idle());
        assert!(e.leds().any_lit());

        e.start(GameVariant::MemoryMatch, at(t0, 401));
        assert_eq!(e.active_variant(), GameVariant::MemoryMatch);
        assert!(!e.leds().any_lit());
    }

    #[test]
    fn invalid_start_leaves_state_alone() {
        let t0 = Instant::now();
        let mut e = engine(3);
        e.start(GameVariant::WhackAMole, t0);
        e.tick(at(t0, 1600), idle());
        let before = e.status();

        assert_eq!(e.start_id(6, at(t0, 1601)), Err(CommandError::InvalidGame(6)));
        assert_eq!(e.start_id(-1, at(t0, 1602)), Err(CommandError::InvalidGame(-1)));
        assert_eq!(e.status(), before);
    }

    #[test]
    fn stop_is_idempotent() {
        let t0 = Instant::now();
        let mut e = engine(4);
        e.start(GameVariant::PatternRace, t0);
        e.tick(at(t0, 2100), idle());
        e.stop();
        let once = e.status();
        e.stop();
        assert_eq!(e.status(), once);
        assert!(!once.game_active());
        assert_eq!(once.leds, [false; NUM_LEDS]);
    }

    #[test]
    fn idle_tick_records_buttons_only() {
        let t0 = Instant::now();
        let mut e = engine(5);
        e.tick(t0, press(1));
        let status = e.status();
        assert_eq!(status.buttons, [false, true, false, false, false, false]);
        assert_eq!(status.leds, [false; NUM_LEDS]);
        assert_eq!(status.active, GameVariant::Idle);
    }

    #[test]
    fn intro_sweeps_on_then_off() {
        let t0 = Instant::now();
        let mut e = engine(6);
        e.play_intro(t0);

        e.tick(at(t0, 0), idle());
        assert_eq!(e.leds().mask(), 0b000001);
        e.tick(at(t0, 250), idle());
        assert_eq!(e.leds().mask(), 0b000111);
        e.tick(at(t0, 700), idle());
        assert_eq!(e.leds().mask(), 0b111111);
        // Off phase starts at 600 + 200 ms.
        e.tick(at(t0, 850), idle());
        assert_eq!(e.leds().mask(), 0b111110);
        e.tick(at(t0, 1450), idle());
        assert_eq!(e.leds().mask(), 0);
        assert!(!e.intro_running());
    }

    #[test]
    fn starting_a_game_cancels_intro() {
        let t0 = Instant::now();
        let mut e = engine(6);
        e.play_intro(t0);
        e.tick(at(t0, 300), idle());
        e.start(GameVariant::MemoryMatch, at(t0, 310));
        assert!(!e.intro_running());
        assert!(!e.leds().any_lit());
    }

    #[test]
    fn led_command_cancels_intro_on_a_dark_board() {
        let t0 = Instant::now();
        let mut e = engine(6);
        e.play_intro(t0);
        e.tick(at(t0, 250), idle());
        assert_eq!(e.leds().mask(), 0b000111);

        assert_eq!(e.set_led(4, Some(1)), Ok(true));
        assert!(!e.intro_running());
        assert_eq!(e.leds().mask(), 0b010000);
        assert_eq!(e.port().leds, [false, false, false, false, true, false]);

        e.tick(at(t0, 700), idle());
        assert_eq!(e.leds().mask(), 0b010000);
    }

    #[test]
    fn toggle_during_intro_starts_from_dark() {
        let t0 = Instant::now();
        let mut e = engine(6);
        e.play_intro(t0);
        e.tick(at(t0, 700), idle());
        assert_eq!(e.leds().mask(), 0b111111);

        // LED 0 was lit by the sweep; after cancelling it toggles on from dark.
        assert_eq!(e.set_led(0, None), Ok(true));
        assert_eq!(e.leds().mask(), 0b000001);
    }

    #[test]
    fn bad_led_command_leaves_intro_running() {
        let t0 = Instant::now();
        let mut e = engine(6);
        e.play_intro(t0);
        e.tick(at(t0, 250), idle());
        assert!(e.set_led(0, Some(5)).is_err());
        assert!(e.intro_running());
        assert_eq!(e.leds().mask(), 0b000111);
    }

    #[test]
    fn invalid_timing_rejected() {
        let timing = GameTiming {
            reaction_delay_min_ms: 6000,
            ..GameTiming::default()
        };
        assert!(GameEngine::with_timing(MemoryPort::new(), Prng::new(1), timing).is_err());
    }
}
