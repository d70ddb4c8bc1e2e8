//! Rule engine for four-player chess
//!
//! The game is played by Red, Blue, Yellow and Green on a 14×14 board with 3×3 corners cut
//! off. The engine tells which moves are legal, applies them with castling and en passant,
//! checks promotion eligibility and rotates turns, removing players who are checkmated,
//! stalemated or have lost their king.
//!
//! # Example
//!
//! ```
//! use fourchess::{Color, GameState, Point};
//!
//! let mut state = GameState::new();
//! let pawn = Point::new(7, 12);
//! assert_eq!(state.legal_moves(pawn, Color::Red, true).len(), 2);
//!
//! assert!(state.move_piece(pawn, Point::new(7, 10), true));
//! state.advance_turn();
//! assert_eq!(state.current_player(), Color::Blue);
//! ```

pub mod attack;
pub mod board;
pub mod legal;
pub mod movegen;
pub mod moves;
pub mod promote;
pub mod state;
mod turn;

pub use fourchess_base::{geometry, types};

pub use board::{Board, PrettyStyle};
pub use movegen::MoveList;
pub use moves::{AppliedMove, MoveError, MoveKind};
pub use promote::PromoteError;
pub use state::{GameState, ValidateError};
pub use types::{
    Axis, CastlingRights, CastlingSide, Cell, Color, Piece, Point, PromotePiece, Square,
};
