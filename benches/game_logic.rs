use criterion::{black_box, criterion_group, criterion_main, Criterion};
use blockfall::core::{rotate, Board, GameSnapshot, GameState};
use blockfall::term::{FrameBuffer, GameView, HudState, Viewport};
use blockfall::types::{PieceKind, RotateDir};

fn bench_update(c: &mut Criterion) {
    let mut state = GameState::new(12345);
    state.start(0.0);

    c.bench_function("update_16ms", |b| {
        b.iter(|| {
            state.update(black_box(16.0));
            if state.is_game_over() {
                state.reset();
            }
        })
    });
}

fn bench_line_clear(c: &mut Criterion) {
    c.bench_function("clear_4_lines", |b| {
        b.iter(|| {
            let mut board = Board::new();
            for y in 16..20 {
                board.fill_row(y, PieceKind::I);
            }
            black_box(board.clear_full_rows())
        })
    });
}

fn bench_spawn_piece(c: &mut Criterion) {
    let mut state = GameState::new(12345);
    state.start(0.0);

    c.bench_function("spawn_piece", |b| {
        b.iter(|| {
            state.spawn_piece();
        })
    });
}

fn bench_move_horizontal(c: &mut Criterion) {
    let mut state = GameState::new(12345);
    state.start(0.0);
    let mut dir = 1;

    c.bench_function("move_horizontal", |b| {
        b.iter(|| {
            if !state.move_horizontal(dir) {
                dir = -dir;
            }
        })
    });
}

fn bench_rotate(c: &mut Criterion) {
    let mut state = GameState::new(12345);
    state.start(0.0);

    c.bench_function("rotate_with_kicks", |b| {
        b.iter(|| {
            state.rotate(RotateDir::Clockwise);
        })
    });

    let t = blockfall::core::get_shape(PieceKind::T);
    c.bench_function("rotate_matrix", |b| {
        b.iter(|| black_box(rotate(black_box(&t), RotateDir::CounterClockwise)))
    });
}

fn bench_hard_drop_cycle(c: &mut Criterion) {
    let mut state = GameState::new(12345);
    state.start(0.0);

    c.bench_function("hard_drop_and_lock", |b| {
        b.iter(|| {
            state.hard_drop();
            state.update(1001.0);
            if state.is_game_over() {
                state.reset();
            }
        })
    });
}

fn bench_render(c: &mut Criterion) {
    let mut state = GameState::new(12345);
    state.start(0.0);
    let view = GameView::default();
    let viewport = Viewport::new(80, 24);
    let mut fb = FrameBuffer::new(viewport.width, viewport.height);
    let mut snap = GameSnapshot::default();
    let hud = HudState::default();

    c.bench_function("snapshot_and_render", |b| {
        b.iter(|| {
            state.snapshot_into(&mut snap);
            view.render_into(&snap, &hud, viewport, &mut fb);
        })
    });
}

criterion_group!(
    benches,
    bench_update,
    bench_line_clear,
    bench_spawn_piece,
    bench_move_horizontal,
    bench_rotate,
    bench_hard_drop_cycle,
    bench_render
);
criterion_main!(benches);
