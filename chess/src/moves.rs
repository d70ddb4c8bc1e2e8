//! Move executor

use crate::geometry;
use crate::state::GameState;
use crate::types::{Axis, CastlingSide, Cell, Color, Piece, Point};

use std::fmt;

use thiserror::Error;
use tracing::debug;

/// Move kind, as found out when the move is applied
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum MoveKind {
    /// Any move or capture not listed below
    Simple,
    /// Double pawn move
    PawnDouble,
    /// Enpassant
    Enpassant,
    /// Castling to the given side; the destination is the king's one
    Castling(CastlingSide),
}

/// Report about the move which was applied
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct AppliedMove {
    pub kind: MoveKind,
    pub src: Point,
    pub dst: Point,
    /// Previous occupant of the destination square
    ///
    /// Pawns taken en passant are not listed here, as they stand elsewhere.
    pub captured: Cell,
}

impl fmt::Display for AppliedMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        write!(f, "{}{}", self.src, self.dst)
    }
}

/// Error indicating that move is rejected
#[derive(Debug, Clone, Error, Eq, PartialEq)]
pub enum MoveError {
    #[error("source square {0} is not playable")]
    InvalidOrigin(Point),
    #[error("destination square {0} is not playable")]
    InvalidDestination(Point),
    #[error("no piece on source square {0}")]
    EmptyOrigin(Point),
    #[error("move from {src} to {dst} is not legal")]
    NotLegal { src: Point, dst: Point },
}

/// Square of the pawn taken en passant by the pawn of color `c` going from `src` to `dst`
fn enpassant_victim(c: Color, src: Point, dst: Point) -> Point {
    match geometry::capture_axis(c) {
        Axis::X => Point::new(dst.x, src.y),
        Axis::Y => Point::new(src.x, dst.y),
    }
}

impl GameState {
    fn update_castling(&mut self, color: Color, piece: Piece, src: Point, dst: Point) {
        if piece == Piece::King {
            self.castling.unset_color(color);
        }
        for c in Color::iter() {
            if dst == geometry::king_start(c) {
                self.castling.unset_color(c);
            }
            for s in CastlingSide::ALL {
                let rook = geometry::castling_rook_src(c, s);
                if src == rook || dst == rook {
                    self.castling.unset(c, s);
                }
            }
        }
    }

    fn relocate_castling_rook(&mut self, c: Color, s: CastlingSide) {
        let src = geometry::castling_rook_src(c, s);
        let dst = geometry::castling_rook_dst(c, s);
        let rook = self.board.cell(src);
        if rook != Cell::from_parts(c, Piece::Rook) {
            return;
        }
        self.board.clear(src);
        self.board.put(dst, rook);
        self.board.get_mut(dst).has_moved = true;
    }

    /// Applies the move without any checks
    ///
    /// The source square must hold a piece. This is also how the king-safety filter plays
    /// candidate moves on a copy of the state.
    pub(crate) fn apply_unchecked(&mut self, src: Point, dst: Point) -> AppliedMove {
        let (color, piece) = match self.board.cell(src) {
            Cell::Occupied(c, p) => (c, p),
            Cell::Empty => unreachable!("no piece to move on {}", src),
        };
        let captured = self.board.cell(dst);

        self.board.put(dst, Cell::from_parts(color, piece));
        self.board.get_mut(dst).has_moved = true;
        self.board.clear(src);

        let delta = dst - src;
        let mut kind = MoveKind::Simple;
        match piece {
            Piece::Pawn => {
                if delta.x.abs() == 2 || delta.y.abs() == 2 {
                    self.board.get_mut(dst).just_double_jumped = true;
                    kind = MoveKind::PawnDouble;
                } else if delta.x != 0 && delta.y != 0 && captured.is_empty() {
                    let victim = enpassant_victim(color, src, dst);
                    if let Cell::Occupied(c, Piece::Pawn) = self.board.cell(victim) {
                        if c != color {
                            self.board.clear(victim);
                            kind = MoveKind::Enpassant;
                        }
                    }
                }
            }
            Piece::King => {
                if src == geometry::king_start(color) {
                    for s in CastlingSide::ALL {
                        if dst == geometry::castling_king_dst(color, s) {
                            self.relocate_castling_rook(color, s);
                            kind = MoveKind::Castling(s);
                        }
                    }
                }
                self.kings[color.index()] = dst;
            }
            _ => {}
        }

        self.update_castling(color, piece, src, dst);

        AppliedMove {
            kind,
            src,
            dst,
            captured,
        }
    }

    /// Moves the piece from `src` to `dst`
    ///
    /// The move must be present in [`GameState::legal_moves()`] for the piece on `src`, with
    /// the same `enforce_check` flag. The moving piece's color is used, whoever the current
    /// player is. If the move is rejected, the state is left untouched.
    ///
    /// This function neither promotes pawns nor passes the turn; see
    /// [`GameState::may_promote()`] and [`GameState::advance_turn()`] for that.
    pub fn make_move(
        &mut self,
        src: Point,
        dst: Point,
        enforce_check: bool,
    ) -> Result<AppliedMove, MoveError> {
        if !src.is_valid() {
            return Err(MoveError::InvalidOrigin(src));
        }
        if !dst.is_valid() {
            return Err(MoveError::InvalidDestination(dst));
        }
        let color = self
            .board
            .cell(src)
            .color()
            .ok_or(MoveError::EmptyOrigin(src))?;
        if !self.legal_moves(src, color, enforce_check).contains(&dst) {
            return Err(MoveError::NotLegal { src, dst });
        }

        let mv = self.apply_unchecked(src, dst);
        debug!(
            color = %color,
            mv = %mv,
            kind = ?mv.kind,
            captured = %mv.captured,
            "applied move"
        );
        match mv.kind {
            MoveKind::Enpassant => {
                debug!(taken = %enpassant_victim(color, src, dst), "pawn taken en passant");
            }
            MoveKind::Castling(s) => {
                debug!(
                    rook_src = %geometry::castling_rook_src(color, s),
                    rook_dst = %geometry::castling_rook_dst(color, s),
                    "castling rook relocated"
                );
            }
            MoveKind::Simple | MoveKind::PawnDouble => {}
        }
        self.selftest();
        Ok(mv)
    }

    /// Moves the piece from `src` to `dst`, returning `false` if the move is rejected
    ///
    /// See [`GameState::make_move()`] for details.
    #[inline]
    pub fn move_piece(&mut self, src: Point, dst: Point, enforce_check: bool) -> bool {
        self.make_move(src, dst, enforce_check).is_ok()
    }
}
