use std::time::Duration;

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use primerook::*;

fn all_squares() -> impl Iterator<Item = Square> {
    (0..8).flat_map(|row| (0..8).map(move |col| Square::new(row, col)))
}

fn movegen_benchmark(c: &mut Criterion) {
    let board = Board::starting_position();

    c.bench_function("Startpos movegen", |b| {
        b.iter(|| {
            let board = black_box(&board);
            let total: usize = all_squares()
                .map(|from| moves_for(board, from, None).len())
                .sum();
            black_box(total)
        });
    });

    c.bench_function("Startpos attack scan", |b| {
        b.iter(|| {
            let board = black_box(&board);
            let attacked = all_squares()
                .filter(|&square| is_square_attacked(board, square, Color::White))
                .count();
            black_box(attacked)
        });
    });

    // Full session path: validation, execution, bookkeeping, and the
    // checkmate sweep on the final move.
    let line = [
        ((6, 4), (4, 4)),
        ((1, 4), (3, 4)),
        ((7, 5), (4, 2)),
        ((0, 1), (2, 2)),
        ((7, 3), (3, 7)),
        ((0, 6), (2, 5)),
        ((3, 7), (1, 5)),
    ];
    c.bench_function("Scholar's mate replay", |b| {
        b.iter(|| {
            let mut game = Game::new();
            for &((fr, fc), (tr, tc)) in black_box(&line) {
                game.submit_move(Square::new(fr, fc), Square::new(tr, tc))
                    .unwrap();
            }
            black_box(game.result())
        });
    });
}

criterion_group! {
    name = benches;
    config = Criterion::default().sample_size(100).measurement_time(Duration::from_secs(10));
    targets = movegen_benchmark
}
criterion_main!(benches);
