use criterion::{black_box, criterion_group, criterion_main, Criterion};
use blockfall::core::{Bag, Board, Piece, Round};
use blockfall::types::{Command, PieceKind};

fn bench_line_clear(c: &mut Criterion) {
    let full = Board::from_rows(&[
        "IIIIIIIIII",
        "JJJJJJJJJJ",
        "LLLLL.LLLL",
        "OOOOOOOOOO",
        "SSSSSSSSSS",
    ])
    .expect("valid layout");

    c.bench_function("clear_4_of_5_rows", |b| {
        b.iter(|| {
            let mut board = full.clone();
            black_box(board.clear_full_rows());
        })
    });
}

fn bench_try_move(c: &mut Criterion) {
    let board = Board::new();
    let mut piece = Piece::spawn(PieceKind::T);
    let mut dir = 1;

    c.bench_function("try_move", |b| {
        b.iter(|| {
            if !piece.try_move(0, black_box(dir), &board) {
                dir = -dir;
            }
        })
    });
}

fn bench_try_rotate(c: &mut Criterion) {
    // Against the wall so most rotations walk the kick list.
    let board = Board::new();
    let mut piece = Piece::spawn(PieceKind::I);
    while piece.try_move(0, -1, &board) {}

    c.bench_function("try_rotate", |b| {
        b.iter(|| {
            black_box(piece.try_rotate(black_box(true), &board));
        })
    });
}

fn bench_hard_drop(c: &mut Criterion) {
    let mut round = Round::with_seed(12345);
    round.start_round();

    c.bench_function("hard_drop", |b| {
        b.iter(|| {
            if round.is_game_over() {
                round.restart_round_with_seed(12345);
            }
            black_box(round.command(Command::HardDrop));
        })
    });
}

fn bench_bag_draw(c: &mut Criterion) {
    let mut bag = Bag::new(12345);

    c.bench_function("bag_draw", |b| b.iter(|| black_box(bag.draw())));
}

criterion_group!(
    benches,
    bench_line_clear,
    bench_try_move,
    bench_try_rotate,
    bench_hard_drop,
    bench_bag_draw
);
criterion_main!(benches);
