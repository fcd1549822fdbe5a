use criterion::{black_box, criterion_group, criterion_main, Criterion};
use gamehub::protocol::Request;
use gamehub::{GameEngine, GameVariant, MemoryPort, Prng, Scheduler};
use std::time::{Duration, Instant};

fn bench_ticks(c: &mut Criterion) {
    for variant in GameVariant::PLAYABLE {
        c.bench_function(&format!("tick_1000_{}", variant.name()), |b| {
            b.iter(|| {
                let t0 = Instant::now();
                let mut engine = GameEngine::new(MemoryPort::new(), Prng::new(42));
                engine.start(variant, t0);
                let mut s = Scheduler::new(engine);
                for i in 0..1000u64 {
                    let now = t0 + Duration::from_millis(i * 10);
                    black_box(s.step(now, None));
                }
            })
        });
    }
}

fn bench_status(c: &mut Criterion) {
    let t0 = Instant::now();
    let mut s = Scheduler::new(GameEngine::new(MemoryPort::new(), Prng::new(1)));
    s.step(t0, Some(Request::StartGame { game: 1 }));
    c.bench_function("status_request", |b| {
        b.iter(|| black_box(s.step(t0, Some(Request::GetStatus))))
    });
}

criterion_group!(benches, bench_ticks, bench_status);
criterion_main!(benches);
