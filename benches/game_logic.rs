use criterion::{black_box, criterion_group, criterion_main, Criterion};
use cupstack::core::{advance, find_next_cup, level_and_position, GameSession, RoundGenerator};
use cupstack::types::{Phase, SessionAction, SINGLE_STACK_ROUND};

fn bench_generate_round(c: &mut Criterion) {
    let mut generator = RoundGenerator::new(12345);

    c.bench_function("generate_round", |b| {
        b.iter(|| generator.generate(black_box(1)))
    });
}

fn bench_level_and_position(c: &mut Criterion) {
    c.bench_function("level_and_position_15", |b| {
        b.iter(|| {
            for i in 0..15 {
                black_box(level_and_position(black_box(15), i));
            }
        })
    });
}

fn bench_find_next_cup(c: &mut Criterion) {
    let cups = RoundGenerator::new(12345).generate(SINGLE_STACK_ROUND);

    c.bench_function("find_next_cup", |b| {
        b.iter(|| find_next_cup(black_box(&cups), Phase::StackLeft))
    });
    c.bench_function("advance_phase", |b| {
        b.iter(|| advance(black_box(&cups), Phase::StackLeft))
    });
}

fn bench_key_press(c: &mut Criterion) {
    c.bench_function("key_press_and_advance", |b| {
        b.iter_with_setup(
            || {
                let mut session = GameSession::new(12345);
                session.apply(SessionAction::Start);
                session.apply(SessionAction::Play);
                session
            },
            |mut session| {
                let letter = session.active_cup().map(|c| c.letter).unwrap_or('A');
                session.key_press(letter);
                let generation = session.generation();
                session.fire(cupstack::core::Deferred::AdvancePhase, generation);
                black_box(session.take_commands());
            },
        )
    });
}

criterion_group!(
    benches,
    bench_generate_round,
    bench_level_and_position,
    bench_find_next_cup,
    bench_key_press
);
criterion_main!(benches);
