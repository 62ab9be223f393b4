use criterion::{black_box, criterion_group, criterion_main, Criterion};

use pixfont::game::{shapes, Board, Falling, Game};
use pixfont::types::{BOARD_HEIGHT, BOARD_WIDTH};

fn bench_tick(c: &mut Criterion) {
    let mut game = Game::new(5, 12345);

    c.bench_function("game_tick", |b| {
        b.iter(|| {
            if game.is_over() {
                game = Game::new(5, 12345);
            }
            game.tick();
        })
    });
}

fn bench_hard_drop_cycle(c: &mut Criterion) {
    c.bench_function("hard_drop_and_lock", |b| {
        let mut game = Game::new(9, 777);
        b.iter(|| {
            if game.is_over() {
                game = Game::new(9, 777);
            }
            game.hard_drop();
            game.tick();
        })
    });
}

fn bench_collides(c: &mut Criterion) {
    let board = Board::new();
    let piece = Falling {
        shape: &shapes()[1],
        color: 1,
        view: 0,
        x: 4,
        y: 10,
    };

    c.bench_function("collides_mid_board", |b| {
        b.iter(|| board.collides(black_box(&piece)))
    });
}

fn bench_clear_four_rows(c: &mut Criterion) {
    c.bench_function("blank_and_collapse_4_rows", |b| {
        b.iter(|| {
            let mut board = Board::new();
            for y in BOARD_HEIGHT - 4..BOARD_HEIGHT {
                for x in 0..BOARD_WIDTH {
                    board.set(x, y, 1);
                }
            }
            let rows = board.blank_full_rows();
            board.collapse(&rows);
            board
        })
    });
}

criterion_group!(
    benches,
    bench_tick,
    bench_hard_drop_cycle,
    bench_collides,
    bench_clear_four_rows
);
criterion_main!(benches);
