//! JSON-serializable summaries of searches and self-play games.

use chess_engine::{Position, SearchResult};
use serde::Serialize;

/// Outcome of a single best-move query.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct SearchReport {
    /// Position that was searched.
    pub fen: String,
    /// Depth in plies.
    pub depth: u32,
    /// Best move in long algebraic notation, absent when the game is over.
    pub best_move: Option<String>,
    /// Score in centipawns from white's point of view.
    pub score: i32,
    /// Nodes visited.
    pub nodes: u64,
}

impl SearchReport {
    pub fn new(position: &Position, depth: u32, result: &SearchResult) -> Self {
        SearchReport {
            fen: position.to_fen(),
            depth,
            best_move: result.best_move.map(|m| m.to_uci()),
            score: result.score,
            nodes: result.nodes,
        }
    }
}

/// A finished (or abandoned) self-play game.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct GameReport {
    /// Position the game started from.
    pub start_fen: String,
    /// Moves played, in long algebraic notation.
    pub moves: Vec<String>,
    /// "1-0", "0-1" or "1/2-1/2"; absent if the ply limit was reached first.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<String>,
    /// Position after the last move.
    pub final_fen: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chess_core::Move;

    #[test]
    fn search_report_serializes_move_as_uci() {
        let position = Position::startpos();
        let result = SearchResult {
            best_move: Move::from_uci("e2e4"),
            score: 0,
            nodes: 21,
            aborted: false,
        };
        let report = SearchReport::new(&position, 1, &result);
        let json = serde_json::to_value(&report).unwrap();

        assert_eq!(json["best_move"], "e2e4");
        assert_eq!(json["depth"], 1);
        assert_eq!(json["nodes"], 21);
        assert_eq!(json["fen"], position.to_fen());
    }

    #[test]
    fn unfinished_game_omits_result() {
        let report = GameReport {
            start_fen: Position::startpos().to_fen(),
            moves: vec!["e2e4".to_string()],
            result: None,
            final_fen: String::new(),
        };
        let json = serde_json::to_string(&report).unwrap();
        assert!(!json.contains("result"));
    }
}
