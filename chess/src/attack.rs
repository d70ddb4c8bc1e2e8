//! Attack oracle
//!
//! Attacks are recomputed from scratch on each query by running the pseudo-legal generators
//! for every opposing piece. Kings only step to their neighbouring squares here, which keeps
//! the generators from recursing into the oracle again.

use crate::movegen::{self, MovePush};
use crate::state::GameState;
use crate::types::{Color, Point};

/// Remembers whether a generated destination hits the target
struct Probe {
    target: Point,
    hit: bool,
}

impl MovePush for Probe {
    #[inline]
    fn push(&mut self, dst: Point) {
        self.hit |= dst == self.target;
    }
}

fn attacks(state: &GameState, src: Point, c: Color, target: Point) -> bool {
    let mut probe = Probe { target, hit: false };
    movegen::gen_pseudo(state, src, c, &mut probe);
    probe.hit
}

/// Returns the square of some piece which attacks `target`
///
/// Only pieces of surviving colors other than `defender` are considered. Pawn advances never
/// land on an occupied square, so the result is exact for a square which holds a piece, such
/// as a king.
pub fn attacker(state: &GameState, target: Point, defender: Color) -> Option<Point> {
    state
        .board
        .pieces()
        .filter(|&(_, c, _)| c != defender && state.is_surviving(c))
        .find(|&(src, c, _)| attacks(state, src, c, target))
        .map(|(src, _, _)| src)
}

/// Returns all the squares holding pieces which attack `target`
pub fn attackers(state: &GameState, target: Point, defender: Color) -> Vec<Point> {
    state
        .board
        .pieces()
        .filter(|&(src, c, _)| {
            c != defender && state.is_surviving(c) && attacks(state, src, c, target)
        })
        .map(|(src, _, _)| src)
        .collect()
}

#[inline]
pub fn is_attacked(state: &GameState, target: Point, defender: Color) -> bool {
    attacker(state, target, defender).is_some()
}

impl GameState {
    /// Returns the square of some piece attacking `target` on behalf of the opponents of
    /// `defender`
    #[inline]
    pub fn attacker(&self, target: Point, defender: Color) -> Option<Point> {
        attacker(self, target, defender)
    }

    /// Returns `true` if the king of color `c` is under attack
    ///
    /// A color whose king was already taken is not in check.
    pub fn is_check(&self, c: Color) -> bool {
        self.has_king(c) && is_attacked(self, self.king_pos(c), c)
    }
}
