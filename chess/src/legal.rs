//! King-safety filter

use crate::attack;
use crate::movegen::MoveList;
use crate::state::GameState;
use crate::types::{Color, Point};

use tracing::trace;

/// Checks whether moving the piece from `src` to `dst` keeps the king of color `c` safe
///
/// The move is applied in full, with castling rook relocation and en passant removal, on a
/// copy of the state, and the king is looked up in the copy, so king moves are handled the
/// same way as all the other ones. Returns `false` if `src` doesn't hold a piece of color `c`
/// or `dst` is not playable.
pub fn is_safe(state: &GameState, src: Point, dst: Point, c: Color) -> bool {
    let owner = state.board.try_get(src).and_then(|sq| sq.color());
    if owner != Some(c) || !dst.is_valid() || !state.has_king(c) {
        return false;
    }
    let mut sim = state.clone();
    sim.apply_unchecked(src, dst);
    let king = sim.king_pos(c);
    match attack::attacker(&sim, king, c) {
        Some(by) => {
            trace!(%src, %dst, %king, %by, "move leaves king under attack");
            false
        }
        None => true,
    }
}

/// Narrows pseudo-legal destinations of the piece on `src` to the legal ones
///
/// With `enforce` unset, `moves` is returned unchanged. A color which has already lost its
/// king has no legal moves.
pub fn filter(state: &GameState, src: Point, c: Color, moves: MoveList, enforce: bool) -> MoveList {
    if !enforce {
        return moves;
    }
    moves
        .into_iter()
        .filter(|&dst| is_safe(state, src, dst, c))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Board;
    use crate::types::{Cell, Piece};

    fn put(b: &mut Board, x: i8, y: i8, c: Color, p: Piece) {
        b.put(Point::new(x, y), Cell::from_parts(c, p));
    }

    #[test]
    fn test_pinned() {
        let mut b = Board::empty();
        put(&mut b, 7, 13, Color::Red, Piece::King);
        put(&mut b, 7, 10, Color::Red, Piece::Rook);
        put(&mut b, 8, 11, Color::Red, Piece::Knight);
        put(&mut b, 7, 4, Color::Yellow, Piece::Queen);
        put(&mut b, 6, 0, Color::Yellow, Piece::King);
        let s = GameState::from_board(b, Color::Red).unwrap();

        // The rook may only slide along the pin line
        let moves = s.legal_moves(Point::new(7, 10), Color::Red, true);
        assert_eq!(moves.len(), 2 + 6);
        assert!(moves.iter().all(|p| p.x == 7));
        assert!(moves.contains(&Point::new(7, 4)));
        assert!(s
            .legal_moves(Point::new(7, 10), Color::Red, false)
            .contains(&Point::new(3, 10)));

        // The knight is not pinned
        assert_eq!(s.legal_moves(Point::new(8, 11), Color::Red, true).len(), 7);
    }

    #[test]
    fn test_check_evasion() {
        let mut b = Board::empty();
        put(&mut b, 7, 13, Color::Red, Piece::King);
        put(&mut b, 5, 11, Color::Red, Piece::Bishop);
        put(&mut b, 7, 5, Color::Yellow, Piece::Rook);
        put(&mut b, 6, 0, Color::Yellow, Piece::King);
        let s = GameState::from_board(b, Color::Red).unwrap();
        assert!(s.is_check(Color::Red));

        // Only blocking the file helps
        assert_eq!(
            s.legal_moves(Point::new(5, 11), Color::Red, true).to_vec(),
            vec![Point::new(7, 9)]
        );

        let mut king = s.legal_moves(Point::new(7, 13), Color::Red, true);
        king.sort();
        assert_eq!(
            king.to_vec(),
            vec![
                Point::new(6, 12),
                Point::new(6, 13),
                Point::new(8, 12),
                Point::new(8, 13)
            ]
        );
    }

    #[test]
    fn test_king_cannot_step_into_attack() {
        let mut b = Board::empty();
        put(&mut b, 7, 7, Color::Red, Piece::King);
        put(&mut b, 9, 9, Color::Green, Piece::King);
        put(&mut b, 6, 0, Color::Blue, Piece::Rook);
        put(&mut b, 0, 6, Color::Blue, Piece::King);
        let s = GameState::from_board(b, Color::Red).unwrap();

        let king = s.legal_moves(Point::new(7, 7), Color::Red, true);
        assert!(!king.contains(&Point::new(8, 8)));
        assert!(!king.contains(&Point::new(6, 6)));
        assert!(!king.contains(&Point::new(6, 7)));
        assert!(king.contains(&Point::new(7, 6)));
        assert_eq!(king.len(), 4);

        // Kings are checked even without enforcement
        assert_eq!(s.legal_moves(Point::new(7, 7), Color::Red, false), king);
        assert!(!s.clone().move_piece(Point::new(7, 7), Point::new(8, 8), false));
    }

    #[test]
    fn test_no_king() {
        let mut s = GameState::new();
        s.board_mut().clear(Point::new(7, 13));
        assert!(s.legal_moves(Point::new(7, 12), Color::Red, true).is_empty());
        assert_eq!(s.legal_moves(Point::new(7, 12), Color::Red, false).len(), 2);
        assert!(!is_safe(&s, Point::new(7, 12), Point::new(7, 11), Color::Red));
    }

    #[test]
    fn test_is_safe_bad_input() {
        let s = GameState::new();
        assert!(is_safe(&s, Point::new(7, 12), Point::new(7, 11), Color::Red));
        assert!(!is_safe(&s, Point::new(5, 5), Point::new(5, 6), Color::Red));
        assert!(!is_safe(&s, Point::new(7, 12), Point::new(7, 11), Color::Blue));
        assert!(!is_safe(&s, Point::new(0, 0), Point::new(0, 1), Color::Red));
        assert!(!is_safe(&s, Point::new(7, 12), Point::new(-1, 11), Color::Red));
    }
}
