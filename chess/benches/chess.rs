use criterion::{black_box, criterion_group, criterion_main, Criterion};
use fourchess::{attack, Board, Cell, Color, GameState, Piece, Point};

fn opening() -> GameState {
    let mut state = GameState::new();
    for (src, dst) in [
        ((7, 12), (7, 10)),
        ((1, 6), (3, 6)),
        ((6, 1), (6, 3)),
        ((12, 7), (10, 7)),
        ((8, 13), (4, 9)),
        ((0, 9), (2, 8)),
    ] {
        let src = Point::new(src.0, src.1);
        let dst = Point::new(dst.0, dst.1);
        assert!(state.move_piece(src, dst, true));
        state.advance_turn();
    }
    state
}

fn queens() -> GameState {
    let mut b = Board::empty();
    for c in Color::iter() {
        b.put(fourchess::geometry::king_start(c), Cell::from_parts(c, Piece::King));
    }
    for (x, y, c) in [
        (5, 5, Color::Red),
        (8, 8, Color::Red),
        (5, 8, Color::Blue),
        (8, 5, Color::Yellow),
        (6, 10, Color::Green),
    ] {
        b.put(Point::new(x, y), Cell::from_parts(c, Piece::Queen));
    }
    GameState::from_board(b, Color::Red).unwrap()
}

fn states() -> impl Iterator<Item = (&'static str, GameState)> {
    [
        ("initial", GameState::new()),
        ("opening", opening()),
        ("queens", queens()),
    ]
    .into_iter()
}

fn bench_gen_moves(c: &mut Criterion) {
    let mut group = c.benchmark_group("gen_moves");
    for (name, state) in states() {
        group.bench_function(name, |b| {
            b.iter(|| black_box(state.all_legal_moves(state.current_player()).len()))
        });
    }
}

fn bench_gen_pseudo(c: &mut Criterion) {
    let mut group = c.benchmark_group("gen_pseudo");
    for (name, state) in states() {
        group.bench_function(name, |b| {
            b.iter(|| {
                for (p, color, _) in state.board().pieces() {
                    black_box(state.legal_moves(p, color, false).len());
                }
            })
        });
    }
}

fn bench_make_move(c: &mut Criterion) {
    let mut group = c.benchmark_group("make_move");
    for (name, state) in states() {
        let moves = state.all_legal_moves(state.current_player());
        group.bench_function(name, |b| {
            b.iter(|| {
                for &(src, dst) in &moves {
                    let mut copy = state.clone();
                    black_box(copy.make_move(src, dst, true).is_ok());
                }
            })
        });
    }
}

fn bench_is_attacked(c: &mut Criterion) {
    let mut group = c.benchmark_group("is_attacked");
    for (name, state) in states() {
        group.bench_function(name, |b| {
            b.iter(|| {
                for color in Color::iter() {
                    for p in Point::iter() {
                        black_box(attack::is_attacked(&state, p, color));
                    }
                }
            })
        });
    }
}

fn bench_king_attack(c: &mut Criterion) {
    let mut group = c.benchmark_group("king_attack");
    for (name, state) in states() {
        group.bench_function(name, |b| {
            b.iter(|| {
                for color in Color::iter() {
                    black_box(state.is_check(color));
                }
            })
        });
    }
}

fn bench_advance_turn(c: &mut Criterion) {
    let mut group = c.benchmark_group("advance_turn");
    for (name, state) in states() {
        group.bench_function(name, |b| {
            b.iter(|| {
                let mut copy = state.clone();
                copy.advance_turn();
                black_box(copy.current_player())
            })
        });
    }
}

criterion_group!(
    chess,
    bench_gen_moves,
    bench_gen_pseudo,
    bench_make_move,
    bench_is_attacked,
    bench_king_attack,
    bench_advance_turn,
);

criterion_main!(chess);
