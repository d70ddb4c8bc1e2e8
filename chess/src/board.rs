//! Board and related things

use crate::geometry;
use crate::types::{Cell, Color, Piece, Point, Square};

use std::fmt;

/// Board contents
///
/// Board holds the 14×14 grid of squares, including the four unplayable corner blocks.
/// Corner squares are always empty. It contains no information about whose turn it is or
/// which players are still in the game; see [`GameState`](crate::state::GameState) for that.
///
/// Board is a plain value, so copying it gives a fully independent snapshot.
///
/// # Example
///
/// ```
/// # use fourchess::{Board, Cell, Color, Piece, Point};
/// #
/// let mut board = Board::empty();
/// board.put(Point::new(5, 5), Cell::from_parts(Color::Blue, Piece::Knight));
/// assert_eq!(board.get(Point::new(5, 5)).piece(), Some(Piece::Knight));
/// assert!(board.get(Point::new(5, 6)).is_empty());
/// ```
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Board {
    squares: [Square; Point::COUNT],
}

impl Board {
    /// Returns a board without any pieces
    ///
    /// Does the same as [`Board::default()`], except that this function is `const`.
    #[inline]
    pub const fn empty() -> Board {
        Board {
            squares: [Square::EMPTY; Point::COUNT],
        }
    }

    /// Returns a board with the initial position
    ///
    /// Each color gets its eight back-rank pieces on its home edge and eight pawns right in
    /// front of them.
    pub fn initial() -> Board {
        let mut res = Board::empty();
        for color in Color::iter() {
            for (i, &piece) in geometry::back_rank(color).iter().enumerate() {
                res.put(
                    geometry::home_square(color, i),
                    Cell::from_parts(color, piece),
                );
                res.put(
                    geometry::pawn_square(color, i),
                    Cell::from_parts(color, Piece::Pawn),
                );
            }
        }
        res
    }

    /// Returns the square at `p`
    ///
    /// # Panics
    ///
    /// Panics if `p` lies outside the 14×14 grid. Corner squares are always empty.
    #[inline]
    pub fn get(&self, p: Point) -> &Square {
        &self.squares[p.index()]
    }

    /// Returns the square at `p`, or `None` if `p` is not playable
    #[inline]
    pub fn try_get(&self, p: Point) -> Option<&Square> {
        p.is_valid().then(|| self.get(p))
    }

    /// Returns the occupant of the square at `p`
    #[inline]
    pub fn cell(&self, p: Point) -> Cell {
        self.get(p).cell
    }

    /// Returns a mutable reference to the square at `p`
    ///
    /// The caller is responsible for leaving the board consistent. In particular, it's a
    /// logic error to put something on a corner square.
    #[inline]
    pub fn get_mut(&mut self, p: Point) -> &mut Square {
        &mut self.squares[p.index()]
    }

    /// Puts `cell` to the square `p`, resetting the square flags
    #[inline]
    pub fn put(&mut self, p: Point, cell: Cell) {
        *self.get_mut(p) = Square::new(cell);
    }

    /// Empties the square `p`
    #[inline]
    pub fn clear(&mut self, p: Point) {
        *self.get_mut(p) = Square::EMPTY;
    }

    /// Returns `true` if `p` is playable and holds a piece of color `c`
    #[inline]
    pub fn is_color(&self, p: Point, c: Color) -> bool {
        self.try_get(p).map_or(false, |sq| sq.cell.has_color(c))
    }

    /// Iterates over all the playable squares
    pub fn iter(&self) -> impl Iterator<Item = (Point, &Square)> + '_ {
        Point::iter().map(move |p| (p, self.get(p)))
    }

    /// Iterates over all the occupied squares
    pub fn pieces(&self) -> impl Iterator<Item = (Point, Color, Piece)> + '_ {
        self.iter().filter_map(|(p, sq)| match sq.cell {
            Cell::Occupied(c, piece) => Some((p, c, piece)),
            Cell::Empty => None,
        })
    }

    /// Wraps the board to allow pretty-printing with the given style `Style`
    ///
    /// The resulting wrapper implements [`fmt::Display`], so can be used with
    /// `write!()`, `println!()`, or `ToString::to_string`.
    ///
    /// Each square takes two characters: color (`r`, `b`, `y`, `g`) and piece. Rank 1 is
    /// Red's home edge, file `a` is Blue's one.
    #[inline]
    pub fn pretty(&self, style: PrettyStyle) -> Pretty<'_> {
        Pretty { board: self, style }
    }
}

impl Default for Board {
    #[inline]
    fn default() -> Board {
        Board::empty()
    }
}

/// Style for [`Board::pretty()`]
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum PrettyStyle {
    /// Print pieces and frames as ASCII characters
    Ascii,
    /// Print pieces and frames as fancy Unicode characters
    Utf8,
}

/// Wrapper to pretty-print the board
///
/// See docs for [`Board::pretty()`] for more details.
pub struct Pretty<'a> {
    board: &'a Board,
    style: PrettyStyle,
}

trait StyleTable {
    const HORZ_FRAME: char;
    const VERT_FRAME: char;
    const ANGLE_FRAME: char;
    const EMPTY: char;

    fn piece(p: Piece) -> char;

    fn fmt(b: &Board, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        for y in 0..geometry::BOARD_SIZE {
            let mut row = format!("{:>2}{}", geometry::BOARD_SIZE - y, Self::VERT_FRAME);
            for x in 0..geometry::BOARD_SIZE {
                let p = Point::new(x, y);
                if !p.is_valid() {
                    row.push_str("  ");
                    continue;
                }
                match b.cell(p) {
                    Cell::Empty => {
                        row.push(Self::EMPTY);
                        row.push(Self::EMPTY);
                    }
                    Cell::Occupied(c, piece) => {
                        row.push(c.as_char());
                        row.push(Self::piece(piece));
                    }
                }
            }
            writeln!(f, "{}", row.trim_end())?;
        }
        write!(f, "{}{}{}", Self::HORZ_FRAME, Self::HORZ_FRAME, Self::ANGLE_FRAME)?;
        for _ in 0..geometry::BOARD_SIZE {
            write!(f, "{}{}", Self::HORZ_FRAME, Self::HORZ_FRAME)?;
        }
        writeln!(f)?;
        let files: Vec<String> = (0..geometry::BOARD_SIZE)
            .map(|x| ((b'a' + x as u8) as char).to_string())
            .collect();
        writeln!(f, "  {}{}", Self::VERT_FRAME, files.join(" "))?;
        Ok(())
    }
}

struct AsciiStyleTable;
struct Utf8StyleTable;

impl StyleTable for AsciiStyleTable {
    const HORZ_FRAME: char = '-';
    const VERT_FRAME: char = '|';
    const ANGLE_FRAME: char = '+';
    const EMPTY: char = '.';

    fn piece(p: Piece) -> char {
        p.as_char()
    }
}

impl StyleTable for Utf8StyleTable {
    const HORZ_FRAME: char = '─';
    const VERT_FRAME: char = '│';
    const ANGLE_FRAME: char = '┼';
    const EMPTY: char = '·';

    fn piece(p: Piece) -> char {
        p.as_utf8_char()
    }
}

impl<'a> fmt::Display for Pretty<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        match self.style {
            PrettyStyle::Ascii => AsciiStyleTable::fmt(self.board, f),
            PrettyStyle::Utf8 => Utf8StyleTable::fmt(self.board, f),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial() {
        let b = Board::initial();
        for color in Color::iter() {
            assert_eq!(b.pieces().filter(|&(_, c, _)| c == color).count(), 16);
            assert_eq!(
                b.pieces()
                    .filter(|&(_, c, p)| c == color && p == Piece::Pawn)
                    .count(),
                8
            );
            assert_eq!(
                b.cell(geometry::king_start(color)),
                Cell::from_parts(color, Piece::King)
            );
        }
        assert_eq!(b.pieces().count(), 64);
        assert!(b.iter().all(|(_, sq)| !sq.has_moved && !sq.just_double_jumped));
        assert_eq!(
            b.cell(Point::new(6, 13)),
            Cell::from_parts(Color::Red, Piece::Queen)
        );
        assert_eq!(
            b.cell(Point::new(0, 7)),
            Cell::from_parts(Color::Blue, Piece::Queen)
        );
        assert_eq!(
            b.cell(Point::new(7, 0)),
            Cell::from_parts(Color::Yellow, Piece::Queen)
        );
        assert_eq!(
            b.cell(Point::new(13, 6)),
            Cell::from_parts(Color::Green, Piece::Queen)
        );
    }

    #[test]
    fn test_access() {
        let mut b = Board::empty();
        let p = Point::new(4, 4);
        b.put(p, Cell::from_parts(Color::Green, Piece::Rook));
        b.get_mut(p).has_moved = true;
        assert!(b.is_color(p, Color::Green));
        assert!(!b.is_color(p, Color::Red));
        assert!(b.get(p).has_moved);

        b.put(p, Cell::from_parts(Color::Red, Piece::Rook));
        assert!(!b.get(p).has_moved);

        b.clear(p);
        assert_eq!(*b.get(p), Square::EMPTY);
        assert_eq!(b.try_get(Point::new(1, 1)), None);
        assert_eq!(b.try_get(Point::new(-1, 5)), None);
        assert!(!b.is_color(Point::new(14, 5), Color::Red));
        assert_eq!(b, Board::default());
    }

    #[test]
    fn test_pretty() {
        let b = Board::initial();

        let res = r#"
14|      yRyNyByKyQyByNyR
13|      yPyPyPyPyPyPyPyP
12|      ................
11|bRbP....................gPgR
10|bNbP....................gPgN
 9|bBbP....................gPgB
 8|bKbP....................gPgQ
 7|bQbP....................gPgK
 6|bBbP....................gPgB
 5|bNbP....................gPgN
 4|bRbP....................gPgR
 3|      ................
 2|      rPrPrPrPrPrPrPrP
 1|      rRrNrBrQrKrBrNrR
--+----------------------------
  |a b c d e f g h i j k l m n
"#;
        assert_eq!(
            b.pretty(PrettyStyle::Ascii).to_string().trim_end(),
            res.trim_start_matches('\n').trim_end()
        );
    }
}
