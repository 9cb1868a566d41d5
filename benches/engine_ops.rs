use criterion::{criterion_group, criterion_main, BatchSize, Criterion};
use grid_2048::config::EngineConfig;
use grid_2048::engine::{GridEngine, Move};
use grid_2048::line;
use std::hint::black_box;

fn corpus() -> Vec<GridEngine> {
    let mut games = Vec::new();
    // Derive a variety of densities deterministically
    let mut game = GridEngine::seeded(EngineConfig::default(), 42).unwrap();
    games.push(game.clone());
    for i in 0..60 {
        game.make_move(Move::ALL[i % 4]);
        games.push(game.clone());
    }
    games
}

fn bench_line(c: &mut Criterion) {
    let lines: [[u32; 4]; 6] = [
        [0, 2, 0, 2],
        [2, 0, 2, 4],
        [2, 2, 2, 2],
        [2, 4, 8, 16],
        [0, 0, 0, 0],
        [16, 16, 8, 8],
    ];
    c.bench_function("line/slide", |bch| {
        bch.iter(|| {
            let mut acc = 0u64;
            for l in &lines {
                let mut l = *l;
                acc += line::slide(black_box(&mut l)).gained;
            }
            black_box(acc)
        })
    });
}

fn bench_shift(c: &mut Criterion) {
    for dir in Move::ALL {
        c.bench_function(&format!("shift/{dir:?}").to_lowercase(), |bch| {
            bch.iter_batched(
                corpus,
                |mut games| {
                    let mut acc = 0u64;
                    for g in games.iter_mut() { acc ^= g.shift(dir).gained; }
                    black_box(acc)
                },
                BatchSize::SmallInput,
            )
        });
    }
}

fn bench_make_move_and_insert(c: &mut Criterion) {
    c.bench_function("engine/begin_game", |bch| {
        bch.iter_batched(
            || GridEngine::seeded(EngineConfig::default(), 7).unwrap(),
            |mut g| {
                for _ in 0..16 { g.begin_game(); }
                black_box(g.score())
            },
            BatchSize::SmallInput,
        )
    });
    c.bench_function("engine/make_move_cycle", |bch| {
        bch.iter_batched(
            || GridEngine::seeded(EngineConfig::default(), 9).unwrap(),
            |mut g| {
                for i in 0..64 { g.make_move(Move::ALL[i % 4]); }
                black_box(g.score())
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_terminal_checks(c: &mut Criterion) {
    let games = corpus();
    c.bench_function("query/is_lost", |bch| {
        bch.iter(|| {
            let mut acc = 0u32;
            for g in &games { acc += g.is_lost() as u32; }
            black_box(acc)
        })
    });
    c.bench_function("query/is_win", |bch| {
        bch.iter(|| {
            let mut acc = 0u32;
            for g in &games { acc += g.is_win() as u32; }
            black_box(acc)
        })
    });
}

criterion_group!(engine_ops, bench_line, bench_shift, bench_make_move_and_insert, bench_terminal_checks);
criterion_main!(engine_ops);
