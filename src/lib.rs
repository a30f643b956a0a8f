//! Chess position reconstruction from algebraic-notation move records.
//!
//! Given a starting position and a sequence of already-tokenized moves
//! (`"Nbd7"`, `"O-O"`, `"exd6"`, `"e8=Q"`, ...), the engine replays each
//! move against a 64-square board, resolving which exact piece moved
//! (including pin-aware disambiguation) and maintaining the derived state
//! (king locations, castling rights, side to move) needed to do so. The
//! resulting position is exposed as a FEN-style string and as a text
//! diagram.
//!
//! The engine trusts that each supplied move is legal; it only
//! disambiguates. PGN tag parsing, filter queries and all I/O belong to
//! the surrounding collaborators, not here.
//!
//! ```
//! use pgn_replay::{Board, Color, ThreatTable};
//!
//! let table = ThreatTable::new();
//! let mut board = Board::new();
//! board.play_san(&table, Color::White, "e4")?;
//! board.play_san(&table, Color::Black, "e5")?;
//! board.play_san(&table, Color::White, "Nf3")?;
//! assert_eq!(
//!     board.to_fen(),
//!     "rnbqkbnr/pppp1ppp/8/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R b KQkq"
//! );
//! # Ok::<(), pgn_replay::ReplayError>(())
//! ```
//!
//! The [`ThreatTable`] is pure board geometry: build it once and share
//! it by reference across any number of boards, including from multiple
//! threads. Each [`Board`] is mutated only by its owning call sequence.

pub mod board;
pub mod error;
pub mod notation;
pub mod piece;
pub mod replay;
pub mod square;
pub mod threats;

pub use board::{Board, CastlingRights};
pub use error::ReplayError;
pub use notation::{CastleSide, Qualifier, San, parse_san};
pub use piece::{Color, Piece, PieceKind};
pub use replay::{MoveRecord, apply_record, replay};
pub use square::Square;
pub use threats::{Ray, ThreatTable};
