//! Game state: board, turn order, surviving players and castling rights

use crate::board::{Board, Pretty, PrettyStyle};
use crate::geometry;
use crate::movegen::{self, MoveList};
use crate::types::{CastlingRights, CastlingSide, Cell, Color, Piece, Point};

use arrayvec::ArrayVec;
use thiserror::Error;

/// Position validation error
#[derive(Debug, Clone, Error, Eq, PartialEq)]
pub enum ValidateError {
    /// A piece stands on one of the unplayable corner squares
    #[error("piece on corner square {0:?}")]
    PieceOnCorner(Point),
    /// Too many pieces of given color
    ///
    /// No more than 16 pieces of each color is allowed.
    #[error("too many pieces of color {0:?}")]
    TooManyPieces(Color),
    /// A color has pieces on the board but no king while still in the game
    #[error("no king of color {0:?}")]
    NoKing(Color),
    /// A color has more than one king
    #[error("more than one king of color {0:?}")]
    TooManyKings(Color),
    /// Double move flag is set on something other than a pawn
    #[error("invalid enpassant flag at {0}")]
    BadEnpassant(Point),
    /// Nobody is left in the game
    #[error("no players")]
    NoPlayers,
    /// The side to move is not among the surviving players
    #[error("side to move {0:?} is not in the game")]
    SideEliminated(Color),
    /// The cached king position doesn't match the king on the board
    #[error("king position of color {0:?} is out of sync")]
    KingOutOfSync(Color),
    /// Castling rights are set, but the king or the rook has left its home square
    #[error("bad castling rights for color {0:?}")]
    BadCastling(Color),
}

pub(crate) type Players = ArrayVec<Color, { Color::COUNT }>;

/// Full state of a four-player game
///
/// The state owns the board, the side to move, the ordered list of surviving colors, the
/// cached king positions and the castling rights.
///
/// Cloning the state gives a fully independent snapshot, which is how speculative moves are
/// tested for legality.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    pub(crate) board: Board,
    pub(crate) side: Color,
    pub(crate) players: Players,
    pub(crate) kings: [Point; Color::COUNT],
    pub(crate) castling: CastlingRights,
}

/// Finds the king of every color and checks the board contents
fn scan_board(board: &Board) -> Result<[Option<Point>; Color::COUNT], ValidateError> {
    for idx in 0..Point::COUNT {
        let p = Point::from_index(idx);
        if !p.is_valid() && board.get(p).cell.is_occupied() {
            return Err(ValidateError::PieceOnCorner(p));
        }
    }

    let mut counts = [0_usize; Color::COUNT];
    let mut kings = [None; Color::COUNT];
    for (p, sq) in board.iter() {
        if sq.just_double_jumped && sq.piece() != Some(Piece::Pawn) {
            return Err(ValidateError::BadEnpassant(p));
        }
        let (color, piece) = match sq.cell {
            Cell::Occupied(c, piece) => (c, piece),
            Cell::Empty => continue,
        };
        counts[color.index()] += 1;
        if counts[color.index()] > 16 {
            return Err(ValidateError::TooManyPieces(color));
        }
        if piece == Piece::King {
            if kings[color.index()].is_some() {
                return Err(ValidateError::TooManyKings(color));
            }
            kings[color.index()] = Some(p);
        }
    }
    Ok(kings)
}

fn has_castling_pieces(board: &Board, c: Color, s: CastlingSide) -> bool {
    let king = board.get(geometry::king_start(c));
    let rook = board.get(geometry::castling_rook_src(c, s));
    king.cell == Cell::from_parts(c, Piece::King)
        && !king.has_moved
        && rook.cell == Cell::from_parts(c, Piece::Rook)
        && !rook.has_moved
}

impl GameState {
    /// Returns the state of a new game
    pub fn new() -> GameState {
        let mut res = GameState {
            board: Board::empty(),
            side: Color::Red,
            players: Players::new(),
            kings: [Point::default(); Color::COUNT],
            castling: CastlingRights::EMPTY,
        };
        res.reset();
        res
    }

    /// Puts all the pieces to their initial squares and brings all the four players back
    pub fn reset(&mut self) {
        self.board = Board::initial();
        self.side = Color::Red;
        self.players = Color::iter().collect();
        for c in Color::iter() {
            self.kings[c.index()] = geometry::king_start(c);
        }
        self.castling = CastlingRights::FULL;
    }

    /// Creates the state from an arbitrary board
    ///
    /// Colors which have a king on the board are considered to be in the game. Colors without
    /// any pieces are considered eliminated, and a color with pieces but without a king is an
    /// error. Castling rights are granted where the king and the rook stand on their home
    /// squares and are not marked as moved.
    ///
    /// # Example
    ///
    /// ```
    /// # use fourchess::{Board, Cell, Color, GameState, Piece, Point};
    /// #
    /// let mut board = Board::empty();
    /// board.put(Point::new(7, 13), Cell::from_parts(Color::Red, Piece::King));
    /// board.put(Point::new(13, 7), Cell::from_parts(Color::Green, Piece::King));
    ///
    /// let state = GameState::from_board(board, Color::Red).unwrap();
    /// assert_eq!(state.surviving_players(), &[Color::Red, Color::Green]);
    /// ```
    pub fn from_board(board: Board, side: Color) -> Result<GameState, ValidateError> {
        let kings = scan_board(&board)?;
        let mut players = Players::new();
        let mut king_pos = [Point::default(); Color::COUNT];
        for c in Color::iter() {
            match kings[c.index()] {
                Some(p) => {
                    players.push(c);
                    king_pos[c.index()] = p;
                }
                None => {
                    if board.pieces().any(|(_, pc, _)| pc == c) {
                        return Err(ValidateError::NoKing(c));
                    }
                    king_pos[c.index()] = geometry::king_start(c);
                }
            }
        }
        if players.is_empty() {
            return Err(ValidateError::NoPlayers);
        }
        if !players.contains(&side) {
            return Err(ValidateError::SideEliminated(side));
        }

        let mut castling = CastlingRights::EMPTY;
        for &c in &players {
            for s in CastlingSide::ALL {
                if has_castling_pieces(&board, c, s) {
                    castling.set(c, s);
                }
            }
        }

        Ok(GameState {
            board,
            side,
            players,
            kings: king_pos,
            castling,
        })
    }

    /// Checks that the state is consistent
    ///
    /// A king missing from its cached square is allowed here: it means that the king was
    /// just taken and the color will be eliminated on the next [`GameState::advance_turn()`].
    pub fn validate(&self) -> Result<(), ValidateError> {
        let kings = scan_board(&self.board)?;
        if self.players.is_empty() {
            return Err(ValidateError::NoPlayers);
        }
        if !self.players.contains(&self.side) {
            return Err(ValidateError::SideEliminated(self.side));
        }
        for &c in &self.players {
            if let Some(p) = kings[c.index()] {
                if p != self.kings[c.index()] {
                    return Err(ValidateError::KingOutOfSync(c));
                }
            }
        }
        for c in Color::iter() {
            for s in CastlingSide::ALL {
                if self.castling.has(c, s) && !has_castling_pieces(&self.board, c, s) {
                    return Err(ValidateError::BadCastling(c));
                }
            }
        }
        Ok(())
    }

    #[cfg(feature = "selftest")]
    pub(crate) fn selftest(&self) {
        if let Err(e) = self.validate() {
            panic!("self-test failed: {}", e);
        }
    }

    #[cfg(not(feature = "selftest"))]
    #[inline]
    pub(crate) fn selftest(&self) {}

    /// Returns the board
    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the board for direct modification
    ///
    /// This is meant for completing a promotion by hand; see also [`GameState::promote()`].
    /// Moving kings around this way leaves the king cache out of sync.
    #[inline]
    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    /// Returns the color to move
    #[inline]
    pub fn current_player(&self) -> Color {
        self.side
    }

    /// Returns the colors still in the game, in order of turns
    #[inline]
    pub fn surviving_players(&self) -> &[Color] {
        &self.players
    }

    #[inline]
    pub fn is_surviving(&self, c: Color) -> bool {
        self.players.contains(&c)
    }

    /// Returns the cached king position of color `c`
    ///
    /// The king may be already absent there if it was just taken.
    #[inline]
    pub fn king_pos(&self, c: Color) -> Point {
        self.kings[c.index()]
    }

    /// Returns `true` if the king of color `c` is still on its cached square
    #[inline]
    pub fn has_king(&self, c: Color) -> bool {
        self.board.cell(self.king_pos(c)) == Cell::from_parts(c, Piece::King)
    }

    #[inline]
    pub fn castling_rights(&self) -> CastlingRights {
        self.castling
    }

    /// Returns the winner if only one player is left
    pub fn winner(&self) -> Option<Color> {
        match self.players.as_slice() {
            [c] => Some(*c),
            _ => None,
        }
    }

    #[inline]
    pub fn is_finished(&self) -> bool {
        self.winner().is_some()
    }

    /// Returns the destinations for the piece on `p`, which must be of color `c`
    ///
    /// With `enforce_check` set, only the moves which don't leave the king of color `c` under
    /// attack are returned. King moves are always checked this way and include castling. The result is empty if `p` is not playable, doesn't hold a piece
    /// of color `c`, or the piece cannot move.
    pub fn legal_moves(&self, p: Point, c: Color, enforce_check: bool) -> MoveList {
        movegen::gen_piece(self, p, c, enforce_check)
    }

    /// Returns all the legal moves of color `c` as `(source, destination)` pairs
    pub fn all_legal_moves(&self, c: Color) -> Vec<(Point, Point)> {
        self.board
            .pieces()
            .filter(|&(_, pc, _)| pc == c)
            .flat_map(|(src, _, _)| {
                self.legal_moves(src, c, true)
                    .into_iter()
                    .map(move |dst| (src, dst))
            })
            .collect()
    }

    /// Wraps the board to allow pretty-printing; see [`Board::pretty()`]
    #[inline]
    pub fn pretty(&self, style: PrettyStyle) -> Pretty<'_> {
        self.board.pretty(style)
    }
}

impl Default for GameState {
    fn default() -> Self {
        GameState::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reset() {
        let s = GameState::new();
        assert_eq!(s.current_player(), Color::Red);
        assert_eq!(s.surviving_players(), &Color::ALL);
        assert_eq!(s.castling_rights(), CastlingRights::FULL);
        assert_eq!(s.king_pos(Color::Red), Point::new(7, 13));
        assert_eq!(s.king_pos(Color::Blue), Point::new(0, 6));
        assert_eq!(s.king_pos(Color::Yellow), Point::new(6, 0));
        assert_eq!(s.king_pos(Color::Green), Point::new(13, 7));
        for c in Color::iter() {
            assert!(s.has_king(c));
            assert!(s.is_surviving(c));
            assert_eq!(s.board().pieces().filter(|&(_, pc, _)| pc == c).count(), 16);
        }
        assert_eq!(s.winner(), None);
        assert_eq!(s.validate(), Ok(()));
        assert_eq!(GameState::from_board(Board::initial(), Color::Red), Ok(s));
    }

    #[test]
    fn test_from_board() {
        let mut b = Board::empty();
        b.put(Point::new(7, 13), Cell::from_parts(Color::Red, Piece::King));
        b.put(Point::new(10, 13), Cell::from_parts(Color::Red, Piece::Rook));
        b.put(Point::new(3, 13), Cell::from_parts(Color::Red, Piece::Rook));
        b.get_mut(Point::new(3, 13)).has_moved = true;
        b.put(Point::new(5, 5), Cell::from_parts(Color::Yellow, Piece::King));

        let s = GameState::from_board(b, Color::Yellow).unwrap();
        assert_eq!(s.surviving_players(), &[Color::Red, Color::Yellow]);
        assert_eq!(s.current_player(), Color::Yellow);
        assert_eq!(s.king_pos(Color::Yellow), Point::new(5, 5));
        assert_eq!(
            s.castling_rights(),
            CastlingRights::EMPTY.with(Color::Red, CastlingSide::King)
        );
        assert_eq!(s.validate(), Ok(()));

        assert_eq!(
            GameState::from_board(b, Color::Blue),
            Err(ValidateError::SideEliminated(Color::Blue))
        );

        let mut bad = b;
        bad.put(Point::new(4, 4), Cell::from_parts(Color::Green, Piece::Pawn));
        assert_eq!(
            GameState::from_board(bad, Color::Red),
            Err(ValidateError::NoKing(Color::Green))
        );

        let mut bad = b;
        bad.put(Point::new(6, 6), Cell::from_parts(Color::Yellow, Piece::King));
        assert_eq!(
            GameState::from_board(bad, Color::Red),
            Err(ValidateError::TooManyKings(Color::Yellow))
        );

        let mut bad = b;
        bad.put(Point::new(0, 0), Cell::from_parts(Color::Red, Piece::Pawn));
        assert_eq!(
            GameState::from_board(bad, Color::Red),
            Err(ValidateError::PieceOnCorner(Point::new(0, 0)))
        );

        let mut bad = b;
        bad.get_mut(Point::new(10, 13)).just_double_jumped = true;
        assert_eq!(
            GameState::from_board(bad, Color::Red),
            Err(ValidateError::BadEnpassant(Point::new(10, 13)))
        );

        assert_eq!(
            GameState::from_board(Board::empty(), Color::Red),
            Err(ValidateError::NoPlayers)
        );
    }

    #[test]
    fn test_validate() {
        let mut s = GameState::new();
        s.kings[Color::Blue.index()] = Point::new(0, 5);
        assert_eq!(s.validate(), Err(ValidateError::KingOutOfSync(Color::Blue)));

        let mut s = GameState::new();
        s.board_mut().clear(Point::new(13, 10));
        assert_eq!(s.validate(), Err(ValidateError::BadCastling(Color::Green)));

        let mut s = GameState::new();
        s.players.retain(|c| *c != Color::Red);
        assert_eq!(s.validate(), Err(ValidateError::SideEliminated(Color::Red)));
    }

    #[test]
    fn test_all_legal_moves() {
        let s = GameState::new();
        // 16 pawn moves and 4 knight moves
        for c in Color::iter() {
            assert_eq!(s.all_legal_moves(c).len(), 20);
        }
    }
}
