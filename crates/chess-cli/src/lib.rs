//! Command-line driver for the chess engine.
//!
//! The binary wraps the engine in three commands: a best-move query, perft
//! counting and engine self-play. This library holds the pieces the binary
//! is built from so they can be tested without spawning a process.

pub mod config;
mod error;
pub mod report;

pub use config::{ChessConfig, ConfigError};
pub use error::CliError;
pub use report::{GameReport, SearchReport};

use chess_core::Move;
use chess_engine::{Position, Searcher};

/// Builds the start position from an optional FEN, defaulting to the
/// standard initial position.
pub fn start_position(fen: Option<&str>) -> Result<Position, CliError> {
    match fen {
        Some(fen) => Ok(Position::from_fen(fen)?),
        None => Ok(Position::startpos()),
    }
}

/// Plays a sequence of moves given in long algebraic notation.
///
/// Each move is matched against the legal moves of the position it is played
/// in; a missing promotion letter means a queen.
pub fn apply_moves<S: AsRef<str>>(position: &mut Position, moves: &[S]) -> Result<(), CliError> {
    for text in moves {
        let text = text.as_ref();
        let requested =
            Move::from_uci(text).ok_or_else(|| CliError::InvalidMove(text.to_string()))?;
        let legal = position
            .all_legal_moves(position.side_to_move)
            .iter()
            .copied()
            .find(|m| m.matches(requested))
            .ok_or_else(|| CliError::IllegalMove {
                mv: text.to_string(),
                fen: position.to_fen(),
            })?;
        let played = position.make_move(legal);
        debug_assert!(played, "generated move {} has no piece to move", legal);
    }
    Ok(())
}

/// Lets the engine play both sides from `position` until the game ends or
/// `max_plies` moves have been played.
pub fn self_play(mut position: Position, depth: u32, max_plies: u32) -> GameReport {
    let start_fen = position.to_fen();
    let mut moves = Vec::new();

    while (moves.len() as u32) < max_plies {
        let result = Searcher::new().search(&position, depth);
        let Some(mv) = result.best_move else {
            break;
        };
        tracing::debug!(
            ply = moves.len() + 1,
            mv = %mv,
            score = result.score,
            nodes = result.nodes,
            "engine move"
        );
        let played = position.make_move(mv);
        debug_assert!(played, "searched move {} has no piece to move", mv);
        moves.push(mv.to_uci());
    }

    let result = position.game_result().map(|r| r.to_string());
    match &result {
        Some(result) => tracing::info!(plies = moves.len(), %result, "game over"),
        None => tracing::info!(plies = moves.len(), "ply limit reached"),
    }

    GameReport {
        start_fen,
        moves,
        result,
        final_fen: position.to_fen(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chess_core::{Color, PieceKind, Square};

    #[test]
    fn start_position_defaults_to_initial() {
        assert_eq!(start_position(None).unwrap(), Position::startpos());
    }

    #[test]
    fn start_position_rejects_bad_fen() {
        let err = start_position(Some("not a fen")).unwrap_err();
        assert!(matches!(err, CliError::Fen(_)));
    }

    #[test]
    fn apply_moves_plays_legal_moves() {
        let mut position = Position::startpos();
        apply_moves(&mut position, &["e2e4", "e7e5", "g1f3"]).unwrap();
        assert_eq!(position.side_to_move, Color::Black);
        assert_eq!(position.history().len(), 3);
    }

    #[test]
    fn apply_moves_rejects_illegal_move() {
        let mut position = Position::startpos();
        let err = apply_moves(&mut position, &["e2e5"]).unwrap_err();
        assert!(matches!(err, CliError::IllegalMove { .. }));
        assert_eq!(position, Position::startpos());
    }

    #[test]
    fn apply_moves_rejects_bad_notation() {
        let mut position = Position::startpos();
        let err = apply_moves(&mut position, &["e2"]).unwrap_err();
        assert!(matches!(err, CliError::InvalidMove(_)));
    }

    #[test]
    fn apply_moves_promotes_to_queen_by_default() {
        let mut position = start_position(Some("8/P6k/8/8/8/8/8/4K3 w - - 0 1")).unwrap();
        apply_moves(&mut position, &["a7a8"]).unwrap();
        let promoted = position.piece_at(Square::A8).unwrap();
        assert_eq!(promoted.kind, PieceKind::Queen);
    }

    #[test]
    fn self_play_stops_at_ply_limit() {
        let report = self_play(Position::startpos(), 1, 4);
        assert_eq!(report.moves.len(), 4);
        assert_eq!(report.result, None);
    }

    #[test]
    fn self_play_finishes_mate_in_one() {
        let position = start_position(Some("6k1/5ppp/8/8/8/8/8/R5K1 w - - 0 1")).unwrap();
        let report = self_play(position, 2, 10);
        assert_eq!(report.moves, vec!["a1a8".to_string()]);
        assert_eq!(report.result.as_deref(), Some("1-0"));
    }
}
