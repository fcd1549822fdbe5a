//! The driving loop, one iteration at a time.
//!
//! An iteration samples the buttons, advances the engine, then services at
//! most one pending control request. Nothing here blocks, so the caller
//! decides the pacing (a tokio interval in the daemon, a plain loop in
//! tests and benchmarks).

use std::time::Instant;

use crate::control::handle_request;
use crate::engine::GameEngine;
use crate::hardware::HardwarePort;
use crate::input::InputSampler;
use crate::prng::{Prng, RandomSource};
use crate::protocol::{Request, Response};

#[derive(Debug)]
pub struct Scheduler<P, R = Prng> {
    engine: GameEngine<P, R>,
    sampler: InputSampler,
    iterations: u64,
}

impl<P: HardwarePort, R: RandomSource> Scheduler<P, R> {
    pub fn new(engine: GameEngine<P, R>) -> Self {
        Self {
            engine,
            sampler: InputSampler::new(),
            iterations: 0,
        }
    }

    pub fn engine(&self) -> &GameEngine<P, R> {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut GameEngine<P, R> {
        &mut self.engine
    }

    pub fn iterations(&self) -> u64 {
        self.iterations
    }

    pub fn step(&mut self, now: Instant, pending: Option<Request>) -> Option<Response> {
        let buttons = self.sampler.sample(self.engine.port_mut());
        self.engine.tick(now, buttons);
        self.iterations += 1;
        pending.map(|request| handle_request(&mut self.engine, now, request))
    }

    /// Stop any game and hand back the engine.
    pub fn shutdown(mut self) -> GameEngine<P, R> {
        self.engine.stop();
        self.engine
    }
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use super::*;
    use crate::games::Game;
    use crate::hardware::MemoryPort;
    use crate::protocol::StatusSnapshot;
    use crate::variant::GameVariant;

    fn scheduler(seed: u64) -> Scheduler<MemoryPort> {
        Scheduler::new(GameEngine::new(MemoryPort::new(), Prng::new(seed)))
    }

    fn status(s: &mut Scheduler<MemoryPort>, now: Instant) -> StatusSnapshot {
        match s.step(now, Some(Request::GetStatus)) {
            Some(Response::Status(snap)) => snap,
            other => panic!("expected status, got {other:?}"),
        }
    }

    #[test]
    fn step_without_request_has_no_reply() {
        let mut s = scheduler(1);
        assert_eq!(s.step(Instant::now(), None), None);
        assert_eq!(s.iterations(), 1);
    }

    #[test]
    fn pattern_race_through_the_port() {
        let t0 = Instant::now();
        let mut s = scheduler(77);
        s.step(t0, Some(Request::StartGame { game: 4 }));

        s.step(t0 + Duration::from_millis(2000), None);
        let pattern = match s.engine().session().map(|x| x.game()) {
            Some(Game::PatternRace(g)) => g.target().expect("pattern shown"),
            other => panic!("expected Pattern Race, got {other:?}"),
        };
        assert_eq!(s.engine().leds().mask(), pattern);

        s.engine_mut().port_mut().hold_mask(pattern);
        let snap = status(&mut s, t0 + Duration::from_millis(2050));
        assert_eq!(snap.scores[4], 1);
        assert_eq!(snap.leds, [false; 6]);
        assert!(snap.game_active);
    }

    #[test]
    fn simon_through_the_port() {
        let mut now = Instant::now();
        let mut s = scheduler(5);
        s.step(now, Some(Request::StartGame { game: 0 }));

        let simon = |s: &Scheduler<MemoryPort>| match s.engine().session().map(|x| x.game()) {
            Some(Game::SimonSays(g)) => (g.waiting_for_input(), g.sequence().to_vec()),
            other => panic!("expected Simon Says, got {other:?}"),
        };
        while !simon(&s).0 {
            now += Duration::from_millis(20);
            s.step(now, None);
        }
        let (_, sequence) = simon(&s);
        assert_eq!(sequence.len(), 1);

        s.engine_mut().port_mut().set_button(sequence[0], true);
        now += Duration::from_millis(20);
        s.step(now, None);
        s.engine_mut().port_mut().release_all();
        now += Duration::from_millis(20);
        let snap = status(&mut s, now);

        assert_eq!(snap.scores[0], 1);
        assert_eq!(simon(&s).1.len(), 2);
    }

    #[test]
    fn stop_clears_in_the_same_iteration() {
        let t0 = Instant::now();
        let mut s = scheduler(3);
        s.step(t0, Some(Request::StartGame { game: 5 }));
        s.step(t0 + Duration::from_millis(300), None);
        assert!(s.engine().leds().any_lit());

        s.step(t0 + Duration::from_millis(310), Some(Request::StopGame));
        assert_eq!(s.engine().active_variant(), GameVariant::Idle);
        assert!(!s.engine().port().leds.iter().any(|&on| on));
    }

    #[test]
    fn shutdown_leaves_board_dark() {
        let t0 = Instant::now();
        let mut s = scheduler(3);
        s.step(t0, Some(Request::SetLed { led: 2, state: Some(1) }));
        let engine = s.shutdown();
        assert!(!engine.leds().any_lit());
    }
}
