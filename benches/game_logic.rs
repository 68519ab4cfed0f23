use std::time::Duration;

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use blockfall::core::{collides, template, Board, GameState, ScriptedPieces, TickScheduler};
use blockfall::leaderboard::{LeaderboardEntry, ScoreTable};
use blockfall::term::{GameView, HudView, Viewport};
use blockfall::types::{Color, PieceKind};

fn bench_tick(c: &mut Criterion) {
    let mut state = GameState::new(12345);
    let mut ticks = TickScheduler::default();

    c.bench_function("tick_16ms", |b| {
        b.iter(|| {
            ticks.run_due(&mut state, black_box(Duration::from_millis(16)));
            if state.is_over() {
                state.restart();
            }
        })
    });
}

fn bench_line_clear(c: &mut Criterion) {
    c.bench_function("clear_4_lines", |b| {
        b.iter(|| {
            let mut board = Board::default();
            for row in 16..20 {
                for col in 0..10 {
                    board.fill(row, col, Color::GREEN);
                }
            }
            let mut state = GameState::with_source(board, ScriptedPieces::repeat(PieceKind::I));
            black_box(state.clear_lines())
        })
    });
}

fn bench_collides(c: &mut Criterion) {
    let board = Board::from_ascii(&["#.#.#.#.#."; 20], Color::RED);
    let shape = template(PieceKind::T);

    c.bench_function("collides", |b| {
        b.iter(|| collides(black_box(&board), black_box(&shape), 3, 5))
    });
}

fn bench_move_and_rotate(c: &mut Criterion) {
    let mut state = GameState::new(12345);

    c.bench_function("move_rotate", |b| {
        b.iter(|| {
            state.move_piece(1, 0);
            state.rotate();
            state.move_piece(-1, 0);
        })
    });
}

fn bench_render(c: &mut Criterion) {
    let state = GameState::new(12345);
    let view = GameView::default();
    let top: Vec<(String, u32)> = (0..10).map(|i| (format!("player{i}"), 100 - i)).collect();
    let hud = HudView {
        player: "bench",
        leaderboard: &top,
        message: None,
    };
    let mut fb = view.render(&state.snapshot(), &hud, Viewport::new(80, 24));

    c.bench_function("render_80x24", |b| {
        b.iter(|| view.render_into(&state.snapshot(), &hud, Viewport::new(80, 24), &mut fb))
    });
}

fn bench_leaderboard_top(c: &mut Criterion) {
    let table = ScoreTable::from_entries((0..1000).map(|i| LeaderboardEntry::new(format!("p{i}"), i * 7 % 997)));

    c.bench_function("leaderboard_top_10", |b| b.iter(|| black_box(table.top(10))));
}

criterion_group!(
    benches,
    bench_tick,
    bench_line_clear,
    bench_collides,
    bench_move_and_rotate,
    bench_render,
    bench_leaderboard_top
);
criterion_main!(benches);
