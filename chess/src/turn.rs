//! Turn rotation and player elimination

use crate::state::{GameState, Players};
use crate::types::{Cell, Color, Piece, Point};

use tracing::info;

impl GameState {
    /// Returns `true` if any piece of color `c` has a legal move
    pub fn has_legal_moves(&self, c: Color) -> bool {
        self.board
            .pieces()
            .filter(|&(_, pc, _)| pc == c)
            .any(|(src, _, _)| !self.legal_moves(src, c, true).is_empty())
    }

    /// Returns `true` if color `c` is out of the game
    ///
    /// This happens when its king was taken, or when it has no legal moves, whether in check
    /// or not.
    pub fn is_checkmated(&self, c: Color) -> bool {
        !self.has_king(c) || !self.has_legal_moves(c)
    }

    /// Returns the surviving color which moves after `c`, which must be surviving too
    fn next_player(&self, c: Color) -> Color {
        let i = self.players.iter().position(|&p| p == c).unwrap_or(0);
        self.players[(i + 1) % self.players.len()]
    }

    fn clear_double_jumps(&mut self, c: Color) {
        let pawn = Cell::from_parts(c, Piece::Pawn);
        for p in Point::iter() {
            let sq = self.board.get_mut(p);
            if sq.cell == pawn {
                sq.just_double_jumped = false;
            }
        }
    }

    /// Passes the turn to the next surviving color and removes the eliminated ones
    ///
    /// Double move flags of the pawns of the color to move are cleared, so a pawn may be taken
    /// en passant until its owner moves again. Then all the colors which are out of the game
    /// (see [`GameState::is_checkmated()`]) are removed at once. If the color to move is among
    /// them, the turn goes further to the next color which stays in the game. If nobody would
    /// stay, the color which made the last move is kept as the winner.
    pub fn advance_turn(&mut self) {
        let last = self.side;
        self.side = self.next_player(last);
        self.clear_double_jumps(self.side);

        let mut eliminated: Players = self
            .players
            .iter()
            .copied()
            .filter(|&c| self.is_checkmated(c))
            .collect();
        if eliminated.len() == self.players.len() {
            eliminated.retain(|c| *c != last);
        }

        if eliminated.contains(&self.side) {
            let mut next = self.side;
            while eliminated.contains(&next) {
                next = self.next_player(next);
            }
            self.side = next;
            self.clear_double_jumps(next);
        }

        for &c in &eliminated {
            info!(color = %c, king = self.has_king(c), "player eliminated");
        }
        self.players.retain(|c| !eliminated.contains(c));
        if !eliminated.is_empty() {
            if let Some(winner) = self.winner() {
                info!(color = %winner, "single player left");
            }
        }
        self.selftest();
    }
}
