//! Minimax search with alpha-beta pruning.
//!
//! White maximizes and black minimizes the material score from
//! [`Position::evaluate`]. Every ply works on its own detached copy of the
//! position, so the caller's position is never touched.
//!
//! Search cost grows exponentially with depth. Beyond depth 3–4 a call can
//! take long enough to be noticeable; callers that must stay responsive
//! should run it off their main loop and use [`Searcher::with_stop_flag`].

use crate::Position;
use chess_core::{Color, Move};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Score bonus for delivering checkmate, before the remaining-depth bonus.
pub const MATE_SCORE: i32 = 99_999;

/// Bound used for the initial alpha-beta window.
pub const INFINITY: i32 = i32::MAX;

/// Nodes between two polls of the stop flag.
const STOP_CHECK_INTERVAL: u64 = 4096;

/// Outcome of a root search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchResult {
    /// Best move found, or `None` if the side to move has no legal move
    /// (or the search was stopped before any move was scored).
    pub best_move: Option<Move>,
    /// Score of the best move from white's point of view.
    pub score: i32,
    /// Nodes visited.
    pub nodes: u64,
    /// True if the stop flag cut the search short.
    pub aborted: bool,
}

/// Search state
#[derive(Debug, Default)]
pub struct Searcher {
    nodes: u64,
    stop: Option<Arc<AtomicBool>>,
    stopped: bool,
}

impl Searcher {
    /// Creates a searcher that always runs to completion.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a searcher that gives up once `flag` is set.
    ///
    /// The flag is polled before each root move and every few thousand nodes.
    pub fn with_stop_flag(flag: Arc<AtomicBool>) -> Self {
        Searcher {
            stop: Some(flag),
            ..Self::default()
        }
    }

    /// Returns the number of nodes visited by the current or last search.
    pub fn nodes(&self) -> u64 {
        self.nodes
    }

    fn poll_stop(&mut self) {
        if let Some(flag) = &self.stop {
            if flag.load(Ordering::Relaxed) {
                self.stopped = true;
            }
        }
    }

    /// Searches `depth` plies and returns the best move for the side to move.
    ///
    /// Root moves are tried in canonical generation order and only a
    /// strictly better score replaces the current best, so ties go to the
    /// move generated first. A depth of 0 is treated as 1.
    ///
    /// Node counts start from zero on every call. If the stop flag cuts the
    /// search short before any root move is scored, the result has no move
    /// and the static evaluation as its score.
    pub fn search(&mut self, position: &Position, depth: u32) -> SearchResult {
        self.nodes = 0;
        self.stopped = false;

        let depth = depth.max(1);
        let side = position.side_to_move;
        let maximizing = side == Color::White;
        let moves = position.all_legal_moves(side);

        if moves.is_empty() {
            tracing::debug!(fen = %position.to_fen(), "no legal moves at the root");
            return SearchResult {
                best_move: None,
                score: terminal_score(position, side, depth),
                nodes: self.nodes,
                aborted: false,
            };
        }

        let mut best_move = None;
        let mut best_score = if maximizing { -INFINITY } else { INFINITY };
        let mut alpha = -INFINITY;
        let mut beta = INFINITY;

        for &mv in &moves {
            self.poll_stop();
            if self.stopped {
                break;
            }
            let Some(child) = position.try_move(mv) else {
                continue;
            };

            let score = self.minimax(&child, depth - 1, alpha, beta, !maximizing);
            if self.stopped {
                break;
            }
            tracing::trace!(mv = %mv, score, "root move scored");

            let improves = if maximizing {
                score > best_score
            } else {
                score < best_score
            };
            if improves || best_move.is_none() {
                best_move = Some(mv);
                best_score = score;
            }

            // Narrowing the root window only ever lowers scores that could
            // not have replaced the current best.
            if maximizing {
                alpha = alpha.max(score);
            } else {
                beta = beta.min(score);
            }
        }

        // Stopped before any root move was scored.
        if best_move.is_none() {
            best_score = position.evaluate();
        }

        tracing::debug!(
            depth,
            nodes = self.nodes,
            score = best_score,
            best = ?best_move,
            aborted = self.stopped,
            "search finished"
        );

        SearchResult {
            best_move,
            score: best_score,
            nodes: self.nodes,
            aborted: self.stopped,
        }
    }

    /// Alpha-beta minimax over the subtree rooted at `position`.
    ///
    /// Returns the score from white's point of view. Leaves are depth 0 and
    /// positions where the side to move has no legal move; a checkmated side
    /// is scored [`MATE_SCORE`] plus the remaining depth against it, so
    /// quicker mates are preferred. A stopped search returns 0.
    pub fn minimax(
        &mut self,
        position: &Position,
        depth: u32,
        mut alpha: i32,
        mut beta: i32,
        maximizing: bool,
    ) -> i32 {
        self.nodes += 1;
        if self.nodes % STOP_CHECK_INTERVAL == 0 {
            self.poll_stop();
        }
        if self.stopped {
            return 0;
        }

        if depth == 0 {
            return leaf_score(position);
        }

        let side = position.side_to_move;
        let moves = position.all_legal_moves(side);
        if moves.is_empty() {
            return terminal_score(position, side, depth);
        }

        let children = moves.iter().filter_map(|&mv| position.try_move(mv));

        if maximizing {
            let mut value = -INFINITY;
            for child in children {
                value = value.max(self.minimax(&child, depth - 1, alpha, beta, false));
                alpha = alpha.max(value);
                if alpha >= beta {
                    break;
                }
            }
            value
        } else {
            let mut value = INFINITY;
            for child in children {
                value = value.min(self.minimax(&child, depth - 1, alpha, beta, true));
                beta = beta.min(value);
                if alpha >= beta {
                    break;
                }
            }
            value
        }
    }
}

/// Scores a depth-0 node: material, or a mate score if the side to move is
/// checkmated.
fn leaf_score(position: &Position) -> i32 {
    let side = position.side_to_move;
    if position.is_in_check(side) && !position.has_legal_move(side) {
        terminal_score(position, side, 0)
    } else {
        position.evaluate()
    }
}

/// Scores a node where `side` has no legal move.
///
/// Stalemate is scored as plain material.
fn terminal_score(position: &Position, side: Color, depth: u32) -> i32 {
    let material = position.evaluate();
    if !position.is_in_check(side) {
        return material;
    }
    let mate = MATE_SCORE + depth as i32;
    match side {
        Color::White => material - mate,
        Color::Black => material + mate,
    }
}

/// Returns the best move for the side to move at the given depth.
///
/// Returns `None` when the side to move is checkmated or stalemated.
pub fn best_move(position: &Position, depth: u32) -> Option<Move> {
    Searcher::new().search(position, depth).best_move
}

/// Runs a complete alpha-beta minimax from `position`.
///
/// Equivalent to [`Searcher::minimax`] on a fresh searcher.
pub fn minimax(position: &Position, depth: u32, alpha: i32, beta: i32, maximizing: bool) -> i32 {
    Searcher::new().minimax(position, depth, alpha, beta, maximizing)
}
