//! Core types for chess.
//!
//! This crate provides the fundamental value types shared by the engine and
//! its callers:
//! - [`Piece`], [`PieceKind`] and [`Color`] for piece representation
//! - [`Square`] for `(rank, file)` board coordinates
//! - [`Move`] for move requests
//! - FEN parsing and serialization

mod color;
mod fen;
mod mov;
mod piece;
mod square;

pub use color::Color;
pub use fen::{FenError, FenParser};
pub use mov::Move;
pub use piece::{Piece, PieceKind};
pub use square::Square;
