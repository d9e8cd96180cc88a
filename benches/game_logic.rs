use criterion::{black_box, criterion_group, criterion_main, Criterion};
use mahjong_solitaire::core::{generate, layout_count, solve, GameSnapshot, GameState, SimpleRng};

fn bench_pick_at(c: &mut Criterion) {
    let game = GameState::new(12345);
    let board = game.board();

    c.bench_function("pick_at_center", |b| {
        b.iter(|| board.pick_at(black_box(150), black_box(160)))
    });
}

fn bench_available_moves(c: &mut Criterion) {
    let game = GameState::new(12345);
    let board = game.board();

    c.bench_function("has_available_moves", |b| {
        b.iter(|| black_box(board).has_available_moves())
    });
}

fn bench_template_deal(c: &mut Criterion) {
    let mut rng = SimpleRng::new(12345);

    c.bench_function("deal_template", |b| b.iter(|| generate(black_box(0), &mut rng)));
}

fn bench_winnable_deal(c: &mut Criterion) {
    let mut rng = SimpleRng::new(12345);
    let index = layout_count() - 1;

    c.bench_function("deal_winnable", |b| {
        b.iter(|| generate(black_box(index), &mut rng))
    });
}

fn bench_solve(c: &mut Criterion) {
    let game = GameState::new(777);
    let board = game.board();

    c.bench_function("solve_template_deal", |b| b.iter(|| solve(black_box(board))));
}

fn bench_snapshot(c: &mut Criterion) {
    let game = GameState::new(12345);
    let mut snap = GameSnapshot::default();

    c.bench_function("snapshot_into", |b| {
        b.iter(|| {
            game.snapshot_into(&mut snap);
            black_box(&snap);
        })
    });
}

criterion_group!(
    benches,
    bench_pick_at,
    bench_available_moves,
    bench_template_deal,
    bench_winnable_deal,
    bench_solve,
    bench_snapshot
);
criterion_main!(benches);
