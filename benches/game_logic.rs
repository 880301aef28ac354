use criterion::{black_box, criterion_group, criterion_main, Criterion};
use memo_match::app::App;
use memo_match::core::{calculate_score, shuffled_deck, GameSnapshot, GameState, SimpleRng};
use memo_match::ledger::Address;
use memo_match::term::{FrameBuffer, GameView, Viewport};
use memo_match::types::{DECK_SIZE, TICK_MS};

fn bench_tick(c: &mut Criterion) {
    let mut state = GameState::new(12345);
    state.new_game();

    c.bench_function("game_tick_16ms", |b| {
        b.iter(|| {
            state.tick(black_box(TICK_MS));
        })
    });
}

fn bench_shuffle(c: &mut Criterion) {
    let mut rng = SimpleRng::new(12345);
    c.bench_function("shuffle_deck", |b| {
        b.iter(|| black_box(shuffled_deck(&mut rng)))
    });
}

fn bench_full_game(c: &mut Criterion) {
    let mut state = GameState::new(12345);

    c.bench_function("perfect_game", |b| {
        b.iter(|| {
            state.new_game();
            for i in 0..DECK_SIZE {
                if let Some(twin) = state.board().twin_of(i) {
                    if twin > i {
                        state.flip(i);
                        state.flip(twin);
                    }
                }
            }
            black_box(state.final_score())
        })
    });
}

fn bench_score(c: &mut Criterion) {
    c.bench_function("calculate_score", |b| {
        b.iter(|| calculate_score(black_box(37), black_box(95)))
    });
}

fn bench_snapshot(c: &mut Criterion) {
    let mut state = GameState::new(12345);
    state.new_game();
    let mut snap = GameSnapshot::default();

    c.bench_function("snapshot_into", |b| {
        b.iter(|| {
            state.snapshot_into(&mut snap);
            black_box(&snap);
        })
    });
}

fn bench_render(c: &mut Criterion) {
    let app = App::new(12345, Address::ZERO);
    let view = GameView::default();
    let snap = app.snapshot();
    let mut fb = FrameBuffer::new(120, 40);

    c.bench_function("render_into_120x40", |b| {
        b.iter(|| {
            view.render_into(&app, &snap, Viewport::new(120, 40), &mut fb);
            black_box(&fb);
        })
    });
}

criterion_group!(
    benches,
    bench_tick,
    bench_shuffle,
    bench_full_game,
    bench_score,
    bench_snapshot,
    bench_render
);
criterion_main!(benches);
