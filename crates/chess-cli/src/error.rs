use chess_core::FenError;
use thiserror::Error;

/// Errors from positions and moves supplied on the command line.
#[derive(Error, Debug)]
pub enum CliError {
    /// The start position could not be parsed.
    #[error("Invalid FEN: {0}")]
    Fen(#[from] FenError),
    /// Text that is not a move in long algebraic notation.
    #[error("Invalid move notation: {0}")]
    InvalidMove(String),
    /// A well-formed move that is not legal in the current position.
    #[error("Illegal move {mv} in position {fen}")]
    IllegalMove { mv: String, fen: String },
}
