use crate::geometry;

use derive_more::{Add, AddAssign, Mul, Neg, Sub};
use std::fmt::{self, Display};
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum PointParseError {
    #[error("unexpected file char {0:?}")]
    UnexpectedFileChar(char),
    #[error("unexpected rank")]
    UnexpectedRank,
    #[error("point {0} is not playable")]
    NotPlayable(Point),
    #[error("invalid string length")]
    BadLength,
}

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum CellParseError {
    #[error("unexpected cell char {0:?}")]
    UnexpectedChar(char),
    #[error("invalid string length")]
    BadLength,
}

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum ColorParseError {
    #[error("unexpected color char {0:?}")]
    UnexpectedChar(char),
    #[error("invalid string length")]
    BadLength,
}

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum CastlingRightsParseError {
    #[error("unexpected char {0:?}")]
    UnexpectedChar(char),
    #[error("duplicate char {0:?}")]
    DuplicateChar(char),
    #[error("side char {0:?} without color")]
    NoColor(char),
    #[error("unexpected empty string")]
    EmptyString,
}

/// Square coordinate
///
/// `x` grows from Blue's home edge (`x = 0`) to Green's one (`x = 13`), and `y` grows from
/// Yellow's home edge (`y = 0`) to Red's one (`y = 13`). A point may lie outside of the
/// board, which is handy for offsets; use [`Point::is_valid()`] to check whether it's playable.
#[derive(
    Debug, Default, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Add, AddAssign, Sub, Neg, Mul,
)]
pub struct Point {
    pub x: i8,
    pub y: i8,
}

impl Point {
    /// Number of cells in the full 14×14 grid, corners included
    pub const COUNT: usize = (geometry::BOARD_SIZE as usize) * (geometry::BOARD_SIZE as usize);

    pub const fn new(x: i8, y: i8) -> Point {
        Point { x, y }
    }

    /// Returns `true` if the point is a playable square
    pub const fn is_valid(&self) -> bool {
        geometry::is_valid(self.x as i32, self.y as i32)
    }

    /// Returns `true` if the point lies inside the 14×14 grid (corner blocks included)
    pub const fn in_grid(&self) -> bool {
        self.x >= 0 && self.y >= 0 && self.x < geometry::BOARD_SIZE && self.y < geometry::BOARD_SIZE
    }

    pub const fn index(&self) -> usize {
        assert!(self.in_grid(), "point must lie inside the grid");
        (self.y as usize) * (geometry::BOARD_SIZE as usize) + self.x as usize
    }

    pub const fn from_index(val: usize) -> Point {
        assert!(val < Self::COUNT, "index must be less than 196");
        let size = geometry::BOARD_SIZE as usize;
        Point::new((val % size) as i8, (val / size) as i8)
    }

    /// Returns `self + delta` if it's a playable square
    pub fn shift(self, delta: Point) -> Option<Point> {
        let res = self + delta;
        res.is_valid().then_some(res)
    }

    /// Iterates over all the playable squares, row by row
    pub fn iter() -> impl Iterator<Item = Self> {
        (0..Self::COUNT)
            .map(Point::from_index)
            .filter(Point::is_valid)
    }
}

impl Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        if !self.in_grid() {
            return write!(f, "({}, {})", self.x, self.y);
        }
        write!(
            f,
            "{}{}",
            (b'a' + self.x as u8) as char,
            geometry::BOARD_SIZE - self.y
        )
    }
}

impl FromStr for Point {
    type Err = PointParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if !(2..=3).contains(&s.len()) || !s.is_ascii() {
            return Err(PointParseError::BadLength);
        }
        let file = s.as_bytes()[0];
        if !(b'a'..b'a' + geometry::BOARD_SIZE as u8).contains(&file) {
            return Err(PointParseError::UnexpectedFileChar(file as char));
        }
        let rank = match u8::from_str(&s[1..]) {
            Ok(r @ 1..=14) => r as i8,
            _ => return Err(PointParseError::UnexpectedRank),
        };
        let p = Point::new((file - b'a') as i8, geometry::BOARD_SIZE - rank);
        if !p.is_valid() {
            return Err(PointParseError::NotPlayable(p));
        }
        Ok(p)
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
}

/// Player color, in order of turns
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum Color {
    Red = 0,
    Blue = 1,
    Yellow = 2,
    Green = 3,
}

impl Color {
    pub const COUNT: usize = 4;
    pub const ALL: [Color; Self::COUNT] = [Color::Red, Color::Blue, Color::Yellow, Color::Green];

    pub const fn index(&self) -> usize {
        *self as u8 as usize
    }

    pub const fn from_index(val: usize) -> Color {
        assert!(val < Self::COUNT, "color index must be between 0 and 3");
        Self::ALL[val]
    }

    /// Returns the color which moves after this one if nobody is eliminated
    pub const fn next(&self) -> Color {
        Self::from_index((self.index() + 1) % Self::COUNT)
    }

    pub fn iter() -> impl Iterator<Item = Self> {
        Self::ALL.into_iter()
    }

    pub fn as_char(&self) -> char {
        match *self {
            Color::Red => 'r',
            Color::Blue => 'b',
            Color::Yellow => 'y',
            Color::Green => 'g',
        }
    }

    pub fn from_char(c: char) -> Option<Color> {
        match c {
            'r' => Some(Color::Red),
            'b' => Some(Color::Blue),
            'y' => Some(Color::Yellow),
            'g' => Some(Color::Green),
            _ => None,
        }
    }
}

impl Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        write!(f, "{}", self.as_char())
    }
}

impl FromStr for Color {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(ch), None) => Color::from_char(ch).ok_or(ColorParseError::UnexpectedChar(ch)),
            _ => Err(ColorParseError::BadLength),
        }
    }
}

/// Piece kind
///
/// The first four kinds are the promotion choices, in the order they are offered.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Piece {
    Queen = 0,
    Rook = 1,
    Bishop = 2,
    Knight = 3,
    King = 4,
    Pawn = 5,
}

impl Piece {
    pub const COUNT: usize = 6;

    pub const fn index(&self) -> usize {
        *self as u8 as usize
    }

    pub fn as_char(&self) -> char {
        b"QRBNKP"[self.index()] as char
    }

    pub fn as_utf8_char(&self) -> char {
        ['♕', '♖', '♗', '♘', '♔', '♙'][self.index()]
    }

    pub fn from_char(c: char) -> Option<Piece> {
        match c {
            'Q' => Some(Piece::Queen),
            'R' => Some(Piece::Rook),
            'B' => Some(Piece::Bishop),
            'N' => Some(Piece::Knight),
            'K' => Some(Piece::King),
            'P' => Some(Piece::Pawn),
            _ => None,
        }
    }
}

/// Target piece for promotion
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum PromotePiece {
    Queen = 0,
    Rook = 1,
    Bishop = 2,
    Knight = 3,
}

impl From<PromotePiece> for Piece {
    #[inline]
    fn from(p: PromotePiece) -> Self {
        match p {
            PromotePiece::Queen => Piece::Queen,
            PromotePiece::Rook => Piece::Rook,
            PromotePiece::Bishop => Piece::Bishop,
            PromotePiece::Knight => Piece::Knight,
        }
    }
}

impl TryFrom<Piece> for PromotePiece {
    type Error = ();

    #[inline]
    fn try_from(p: Piece) -> Result<Self, Self::Error> {
        match p {
            Piece::Queen => Ok(PromotePiece::Queen),
            Piece::Rook => Ok(PromotePiece::Rook),
            Piece::Bishop => Ok(PromotePiece::Bishop),
            Piece::Knight => Ok(PromotePiece::Knight),
            Piece::King | Piece::Pawn => Err(()),
        }
    }
}

/// Occupancy of a single square
///
/// A square is either empty or holds a piece of some color; the two never come apart.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Cell {
    #[default]
    Empty,
    Occupied(Color, Piece),
}

impl Cell {
    pub const EMPTY: Cell = Cell::Empty;

    pub const fn from_parts(c: Color, p: Piece) -> Cell {
        Cell::Occupied(c, p)
    }

    pub const fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }

    pub const fn is_occupied(&self) -> bool {
        !self.is_empty()
    }

    pub const fn color(&self) -> Option<Color> {
        match *self {
            Cell::Empty => None,
            Cell::Occupied(c, _) => Some(c),
        }
    }

    pub const fn piece(&self) -> Option<Piece> {
        match *self {
            Cell::Empty => None,
            Cell::Occupied(_, p) => Some(p),
        }
    }

    pub fn has_color(&self, c: Color) -> bool {
        self.color() == Some(c)
    }
}

impl Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        match *self {
            Cell::Empty => write!(f, ".."),
            Cell::Occupied(c, p) => write!(f, "{}{}", c.as_char(), p.as_char()),
        }
    }
}

impl FromStr for Cell {
    type Err = CellParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let chars: Vec<char> = s.chars().collect();
        if chars.len() != 2 {
            return Err(CellParseError::BadLength);
        }
        if chars == ['.', '.'] {
            return Ok(Cell::EMPTY);
        }
        let color = Color::from_char(chars[0]).ok_or(CellParseError::UnexpectedChar(chars[0]))?;
        let piece = Piece::from_char(chars[1]).ok_or(CellParseError::UnexpectedChar(chars[1]))?;
        Ok(Cell::from_parts(color, piece))
    }
}

/// Board square: its occupant plus transient per-square flags
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Square {
    pub cell: Cell,
    /// The pawn here has just made a double move and may be taken en passant
    pub just_double_jumped: bool,
    /// The occupant has arrived here by a move
    pub has_moved: bool,
}

impl Square {
    pub const EMPTY: Square = Square {
        cell: Cell::EMPTY,
        just_double_jumped: false,
        has_moved: false,
    };

    pub const fn new(cell: Cell) -> Square {
        Square {
            cell,
            just_double_jumped: false,
            has_moved: false,
        }
    }

    pub const fn is_empty(&self) -> bool {
        self.cell.is_empty()
    }

    pub const fn color(&self) -> Option<Color> {
        self.cell.color()
    }

    pub const fn piece(&self) -> Option<Piece> {
        self.cell.piece()
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum CastlingSide {
    Queen = 0,
    King = 1,
}

impl CastlingSide {
    pub const ALL: [CastlingSide; 2] = [CastlingSide::Queen, CastlingSide::King];

    pub fn as_char(&self) -> char {
        match *self {
            CastlingSide::Queen => 'Q',
            CastlingSide::King => 'K',
        }
    }
}

/// Castling rights of all the four colors
#[derive(Default, Copy, Clone, PartialEq, Eq, Hash)]
pub struct CastlingRights(u8);

impl CastlingRights {
    const fn to_index(c: Color, s: CastlingSide) -> u8 {
        ((c as u8) << 1) | s as u8
    }

    pub const EMPTY: CastlingRights = CastlingRights(0);
    pub const FULL: CastlingRights = CastlingRights(0xff);

    pub const fn has(&self, c: Color, s: CastlingSide) -> bool {
        ((self.0 >> Self::to_index(c, s)) & 1) != 0
    }

    pub fn flip(&mut self, c: Color, s: CastlingSide) {
        self.0 ^= 1_u8 << Self::to_index(c, s)
    }

    pub const fn with(self, c: Color, s: CastlingSide) -> CastlingRights {
        CastlingRights(self.0 | (1_u8 << Self::to_index(c, s)))
    }

    pub fn set(&mut self, c: Color, s: CastlingSide) {
        *self = self.with(c, s)
    }

    pub fn unset(&mut self, c: Color, s: CastlingSide) {
        self.0 &= !(1_u8 << Self::to_index(c, s))
    }

    pub fn unset_color(&mut self, c: Color) {
        self.unset(c, CastlingSide::King);
        self.unset(c, CastlingSide::Queen);
    }

    pub const fn from_raw(val: u8) -> CastlingRights {
        CastlingRights(val)
    }

    pub const fn as_raw(&self) -> u8 {
        self.0
    }
}

impl fmt::Debug for CastlingRights {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        write!(f, "CastlingRights({})", self)
    }
}

impl Display for CastlingRights {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        if *self == Self::EMPTY {
            return write!(f, "-");
        }
        for c in Color::iter() {
            if !self.has(c, CastlingSide::King) && !self.has(c, CastlingSide::Queen) {
                continue;
            }
            write!(f, "{}", c)?;
            for s in [CastlingSide::King, CastlingSide::Queen] {
                if self.has(c, s) {
                    write!(f, "{}", s.as_char())?;
                }
            }
        }
        Ok(())
    }
}

impl FromStr for CastlingRights {
    type Err = CastlingRightsParseError;

    fn from_str(s: &str) -> Result<CastlingRights, Self::Err> {
        type Error = CastlingRightsParseError;
        if s == "-" {
            return Ok(CastlingRights::EMPTY);
        }
        if s.is_empty() {
            return Err(Error::EmptyString);
        }
        let mut res = CastlingRights::EMPTY;
        let mut color = None;
        for ch in s.chars() {
            let side = match ch {
                'K' => CastlingSide::King,
                'Q' => CastlingSide::Queen,
                _ => {
                    color = Some(Color::from_char(ch).ok_or(Error::UnexpectedChar(ch))?);
                    continue;
                }
            };
            let c = color.ok_or(Error::NoColor(ch))?;
            if res.has(c, side) {
                return Err(Error::DuplicateChar(ch));
            }
            res.set(c, side);
        }
        Ok(res)
    }
}
