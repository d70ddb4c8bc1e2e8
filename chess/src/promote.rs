//! Pawn promotion

use crate::geometry;
use crate::state::GameState;
use crate::types::{Cell, Color, Piece, Point, PromotePiece};

use thiserror::Error;
use tracing::debug;

#[derive(Debug, Clone, Error, Eq, PartialEq)]
pub enum PromoteError {
    #[error("no pawn eligible for promotion on {0}")]
    NotEligible(Point),
}

impl GameState {
    /// Returns `true` if `p` holds a pawn of color `c` standing on the far edge for that color
    pub fn may_promote(&self, p: Point, c: Color) -> bool {
        self.board.try_get(p).map_or(false, |sq| {
            sq.cell == Cell::from_parts(c, Piece::Pawn) && geometry::is_promote_edge(c, p)
        })
    }

    /// Replaces the pawn on `p` with `piece` of the same color
    ///
    /// The square flags are kept, so the new piece is marked as moved.
    pub fn promote(&mut self, p: Point, piece: PromotePiece) -> Result<(), PromoteError> {
        let color = match self.board.try_get(p).and_then(|sq| sq.color()) {
            Some(c) if self.may_promote(p, c) => c,
            _ => return Err(PromoteError::NotEligible(p)),
        };
        let sq = self.board.get_mut(p);
        sq.cell = Cell::from_parts(color, piece.into());
        sq.just_double_jumped = false;
        debug!(square = %p, cell = %sq.cell, "pawn promoted");
        self.selftest();
        Ok(())
    }
}
