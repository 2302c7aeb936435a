//! Chess rules engine with a minimax searcher.
//!
//! This crate provides:
//! - [`Board`] - 8x8 mailbox of pieces
//! - [`Position`] - Full game state with make/undo history
//! - Legal move generation, check, checkmate and stalemate detection
//! - FEN import and export
//! - Material evaluation and an alpha-beta [`Searcher`]
//!
//! # Example
//!
//! ```
//! use chess_core::{Color, Move};
//! use chess_engine::{best_move, Position};
//!
//! let mut position = Position::startpos();
//! let moves = position.all_legal_moves(Color::White);
//! assert_eq!(moves.len(), 20);
//!
//! assert!(position.make_move(Move::from_uci("e2e4").unwrap()));
//! assert_eq!(
//!     position.to_fen(),
//!     "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1"
//! );
//!
//! let reply = best_move(&position, 2);
//! assert!(reply.is_some());
//! ```

mod board;
mod evaluation;
pub mod movegen;
mod position;
mod rules;
pub mod search;

pub use board::Board;
pub use evaluation::{
    piece_value, BISHOP_VALUE, KNIGHT_VALUE, PAWN_VALUE, QUEEN_VALUE, ROOK_VALUE,
};
pub use movegen::perft::{perft, perft_divide};
pub use movegen::{generate_moves, is_king_attacked, is_square_attacked, MoveList};
pub use position::{CastlingRights, Position, Snapshot};
pub use rules::{DrawReason, GameResult};
pub use search::{best_move, minimax, SearchResult, Searcher, MATE_SCORE};
