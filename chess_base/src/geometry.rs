use crate::types::{Axis, CastlingSide, Color, Piece, Point};

/// Side of the square grid
pub const BOARD_SIZE: i8 = 14;

/// Side of each unplayable corner block
pub const CORNER_SIZE: i8 = 3;

/// Returns `true` if `(x, y)` is a playable square, i.e. lies inside the 14×14 grid and
/// outside of all four 3×3 corner blocks
pub const fn is_valid(x: i32, y: i32) -> bool {
    let size = BOARD_SIZE as i32;
    let corner = CORNER_SIZE as i32;
    if x < 0 || y < 0 || x >= size || y >= size {
        return false;
    }
    let x_edge = x < corner || x >= size - corner;
    let y_edge = y < corner || y >= size - corner;
    !(x_edge && y_edge)
}

pub const fn pawn_forward(c: Color) -> Point {
    match c {
        Color::Red => Point::new(0, -1),
        Color::Blue => Point::new(1, 0),
        Color::Yellow => Point::new(0, 1),
        Color::Green => Point::new(-1, 0),
    }
}

/// Axis along which pawns of color `c` step sideways when capturing
pub const fn capture_axis(c: Color) -> Axis {
    match c {
        Color::Red | Color::Yellow => Axis::X,
        Color::Blue | Color::Green => Axis::Y,
    }
}

/// Unit offsets to both sides of a pawn along its capture axis
pub const fn pawn_sides(c: Color) -> [Point; 2] {
    match capture_axis(c) {
        Axis::X => [Point::new(-1, 0), Point::new(1, 0)],
        Axis::Y => [Point::new(0, -1), Point::new(0, 1)],
    }
}

/// Returns `true` if a pawn of color `c` standing on `p` may make a double move
pub const fn is_pawn_start(c: Color, p: Point) -> bool {
    match c {
        Color::Red => p.y == BOARD_SIZE - 2,
        Color::Blue => p.x == 1,
        Color::Yellow => p.y == 1,
        Color::Green => p.x == BOARD_SIZE - 2,
    }
}

/// Returns `true` if `p` lies on the far edge where pawns of color `c` promote
pub const fn is_promote_edge(c: Color, p: Point) -> bool {
    match c {
        Color::Red => p.y == 0,
        Color::Blue => p.x == BOARD_SIZE - 1,
        Color::Yellow => p.y == BOARD_SIZE - 1,
        Color::Green => p.x == 0,
    }
}

/// Pieces on the home edge of color `c`, in order of growing coordinate
pub const fn back_rank(c: Color) -> [Piece; 8] {
    use Piece::*;
    match c {
        Color::Red | Color::Green => [Rook, Knight, Bishop, Queen, King, Bishop, Knight, Rook],
        Color::Blue | Color::Yellow => [Rook, Knight, Bishop, King, Queen, Bishop, Knight, Rook],
    }
}

/// `i`-th square of the home edge of color `c`
pub const fn home_square(c: Color, i: usize) -> Point {
    assert!(i < 8, "home square index must be between 0 and 7");
    let i = CORNER_SIZE + i as i8;
    match c {
        Color::Red => Point::new(i, BOARD_SIZE - 1),
        Color::Blue => Point::new(0, i),
        Color::Yellow => Point::new(i, 0),
        Color::Green => Point::new(BOARD_SIZE - 1, i),
    }
}

/// `i`-th square of the initial pawn line of color `c`
pub const fn pawn_square(c: Color, i: usize) -> Point {
    let home = home_square(c, i);
    let fwd = pawn_forward(c);
    Point::new(home.x + fwd.x, home.y + fwd.y)
}

pub const fn king_start(c: Color) -> Point {
    match c {
        Color::Red => Point::new(7, 13),
        Color::Blue => Point::new(0, 6),
        Color::Yellow => Point::new(6, 0),
        Color::Green => Point::new(13, 7),
    }
}

/// Initial square of the rook which takes part in castling of color `c` to side `s`
///
/// The queenside is the side where the queen of the same color starts.
pub const fn castling_rook_src(c: Color, s: CastlingSide) -> Point {
    match (c, s) {
        (Color::Red, CastlingSide::Queen) => Point::new(3, 13),
        (Color::Red, CastlingSide::King) => Point::new(10, 13),
        (Color::Blue, CastlingSide::Queen) => Point::new(0, 10),
        (Color::Blue, CastlingSide::King) => Point::new(0, 3),
        (Color::Yellow, CastlingSide::Queen) => Point::new(10, 0),
        (Color::Yellow, CastlingSide::King) => Point::new(3, 0),
        (Color::Green, CastlingSide::Queen) => Point::new(13, 3),
        (Color::Green, CastlingSide::King) => Point::new(13, 10),
    }
}

/// Unit step from the king towards the castling rook
pub const fn castling_dir(c: Color, s: CastlingSide) -> Point {
    let king = king_start(c);
    let rook = castling_rook_src(c, s);
    Point::new((rook.x - king.x).signum(), (rook.y - king.y).signum())
}

pub const fn castling_king_dst(c: Color, s: CastlingSide) -> Point {
    let king = king_start(c);
    let dir = castling_dir(c, s);
    Point::new(king.x + 2 * dir.x, king.y + 2 * dir.y)
}

pub const fn castling_rook_dst(c: Color, s: CastlingSide) -> Point {
    let king = king_start(c);
    let dir = castling_dir(c, s);
    Point::new(king.x + dir.x, king.y + dir.y)
}
