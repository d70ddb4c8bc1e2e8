//! Pseudo-legal move generators
//!
//! Generators produce destination squares for a single piece. With enforcement requested, the
//! result is narrowed by [`legal::filter()`]; without it, the raw destinations are returned,
//! which is what the attack oracle needs.

use crate::legal;
use crate::state::GameState;
use crate::types::{CastlingSide, Cell, Color, Piece, Point};
use crate::{attack, geometry};

use std::ops::{Deref, DerefMut};
use std::slice;

use arrayvec::ArrayVec;

const ROOK_DIRS: [Point; 4] = [
    Point::new(1, 0),
    Point::new(-1, 0),
    Point::new(0, 1),
    Point::new(0, -1),
];

const BISHOP_DIRS: [Point; 4] = [
    Point::new(1, 1),
    Point::new(1, -1),
    Point::new(-1, 1),
    Point::new(-1, -1),
];

const KING_DELTAS: [Point; 8] = [
    Point::new(1, 0),
    Point::new(-1, 0),
    Point::new(0, 1),
    Point::new(0, -1),
    Point::new(1, 1),
    Point::new(1, -1),
    Point::new(-1, 1),
    Point::new(-1, -1),
];

const KNIGHT_DELTAS: [Point; 8] = [
    Point::new(1, 2),
    Point::new(2, 1),
    Point::new(2, -1),
    Point::new(1, -2),
    Point::new(-1, -2),
    Point::new(-2, -1),
    Point::new(-2, 1),
    Point::new(-1, 2),
];

/// List of destination squares for one piece
///
/// No piece on the board has more than 64 destinations, so the list lives on the stack.
#[derive(Default, Debug, Clone, Eq, PartialEq)]
pub struct MoveList(ArrayVec<Point, 64>);

impl Deref for MoveList {
    type Target = ArrayVec<Point, 64>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for MoveList {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl<'a> IntoIterator for &'a MoveList {
    type Item = &'a Point;
    type IntoIter = slice::Iter<'a, Point>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl IntoIterator for MoveList {
    type Item = Point;
    type IntoIter = arrayvec::IntoIter<Point, 64>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl FromIterator<Point> for MoveList {
    fn from_iter<I: IntoIterator<Item = Point>>(iter: I) -> Self {
        MoveList(iter.into_iter().collect())
    }
}

impl MoveList {
    pub fn new() -> MoveList {
        MoveList(ArrayVec::new())
    }
}

/// Sink for generated destinations
pub trait MovePush {
    fn push(&mut self, dst: Point);
}

impl MovePush for MoveList {
    fn push(&mut self, dst: Point) {
        self.0.push(dst);
    }
}

impl MovePush for Vec<Point> {
    fn push(&mut self, dst: Point) {
        self.push(dst);
    }
}

struct MoveGen<'a, P> {
    state: &'a GameState,
    src: Point,
    color: Color,
    dst: &'a mut P,
}

impl<'a, P: MovePush> MoveGen<'a, P> {
    fn new(state: &'a GameState, src: Point, color: Color, dst: &'a mut P) -> Self {
        MoveGen {
            state,
            src,
            color,
            dst,
        }
    }

    #[inline]
    fn cell(&self, p: Point) -> Cell {
        self.state.board.cell(p)
    }

    /// Pushes `p` if it's playable and doesn't hold a piece of our color
    #[inline]
    fn add_leap(&mut self, p: Point) {
        if p.is_valid() && !self.cell(p).has_color(self.color) {
            self.dst.push(p);
        }
    }

    fn slide(&mut self, dir: Point) {
        let mut p = self.src;
        while let Some(next) = p.shift(dir) {
            p = next;
            match self.cell(p) {
                Cell::Empty => self.dst.push(p),
                Cell::Occupied(c, _) => {
                    if c != self.color {
                        self.dst.push(p);
                    }
                    break;
                }
            }
        }
    }

    fn gen_rook(&mut self) {
        for dir in ROOK_DIRS {
            self.slide(dir);
        }
    }

    fn gen_bishop(&mut self) {
        for dir in BISHOP_DIRS {
            self.slide(dir);
        }
    }

    fn gen_queen(&mut self) {
        self.gen_rook();
        self.gen_bishop();
    }

    fn gen_knight(&mut self) {
        for delta in KNIGHT_DELTAS {
            self.add_leap(self.src + delta);
        }
    }

    fn gen_king_lite(&mut self) {
        for delta in KING_DELTAS {
            self.add_leap(self.src + delta);
        }
    }

    fn is_enemy_pawn_jumped(&self, p: Point) -> bool {
        let sq = self.state.board.get(p);
        sq.just_double_jumped
            && sq.piece() == Some(Piece::Pawn)
            && sq.color().map_or(false, |c| c != self.color)
    }

    fn gen_pawn(&mut self) {
        let fwd = geometry::pawn_forward(self.color);
        if let Some(one) = self.src.shift(fwd) {
            if self.cell(one).is_empty() {
                self.dst.push(one);
                if geometry::is_pawn_start(self.color, self.src) {
                    if let Some(two) = one.shift(fwd) {
                        if self.cell(two).is_empty() {
                            self.dst.push(two);
                        }
                    }
                }
            }
        }

        for side in geometry::pawn_sides(self.color) {
            let onward = match self.src.shift(fwd + side) {
                Some(p) => p,
                None => continue,
            };
            match self.cell(onward) {
                Cell::Occupied(c, _) if c != self.color => self.dst.push(onward),
                Cell::Occupied(_, _) => {}
                Cell::Empty => {
                    let beside = self.src + side;
                    if beside.is_valid() && self.is_enemy_pawn_jumped(beside) {
                        self.dst.push(onward);
                    }
                }
            }
        }
    }

    fn can_castle(&self, s: CastlingSide) -> bool {
        let king = geometry::king_start(self.color);
        let rook = geometry::castling_rook_src(self.color, s);
        if !self.state.castling.has(self.color, s)
            || self.src != king
            || self.cell(rook) != Cell::from_parts(self.color, Piece::Rook)
        {
            return false;
        }
        let dir = geometry::castling_dir(self.color, s);
        let mut p = king + dir;
        while p != rook {
            if self.cell(p).is_occupied() {
                return false;
            }
            p += dir;
        }
        true
    }

    /// Full king moves: the neighbouring squares plus castling
    fn gen_king(&mut self, with_castling: bool) {
        self.gen_king_lite();
        if !with_castling || attack::is_attacked(self.state, self.src, self.color) {
            return;
        }
        for s in CastlingSide::ALL {
            if self.can_castle(s) {
                self.dst.push(geometry::castling_king_dst(self.color, s));
            }
        }
    }

    fn gen(&mut self, piece: Piece, with_castling: bool) {
        match piece {
            Piece::Queen => self.gen_queen(),
            Piece::Rook => self.gen_rook(),
            Piece::Bishop => self.gen_bishop(),
            Piece::Knight => self.gen_knight(),
            Piece::King => self.gen_king(with_castling),
            Piece::Pawn => self.gen_pawn(),
        }
    }
}

/// Pushes the raw destinations of the piece on `src` into `dst`
///
/// Kings get only their neighbouring squares here, no castling. Nothing is pushed unless
/// `src` holds a piece of color `c`.
pub(crate) fn gen_pseudo<P: MovePush>(state: &GameState, src: Point, c: Color, dst: &mut P) {
    if let Some(piece) = piece_of(state, src, c) {
        MoveGen::new(state, src, c, dst).gen(piece, false);
    }
}

fn piece_of(state: &GameState, src: Point, c: Color) -> Option<Piece> {
    match state.board.try_get(src)?.cell {
        Cell::Occupied(pc, piece) if pc == c => Some(piece),
        _ => None,
    }
}

/// Generates the moves of the piece on `src`, which must be of color `c`
///
/// With `enforce` set, every candidate is checked for king safety. Without it, the result is
/// pseudo-legal. Kings are always checked and always get their castling destinations, whatever
/// `enforce` says.
pub fn gen_piece(state: &GameState, src: Point, c: Color, enforce: bool) -> MoveList {
    let mut res = MoveList::new();
    let piece = match piece_of(state, src, c) {
        Some(piece) => piece,
        None => return res,
    };
    let enforce = enforce || piece == Piece::King;
    MoveGen::new(state, src, c, &mut res).gen(piece, enforce);
    legal::filter(state, src, c, res, enforce)
}
