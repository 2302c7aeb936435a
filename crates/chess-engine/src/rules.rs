//! Check, checkmate and stalemate detection.
//!
//! Only conditions visible in a single position are reported. The halfmove
//! clock is tracked but never ends a game, and repetition is not detected.

use crate::movegen::is_king_attacked;
use crate::Position;
use chess_core::Color;

/// Result of a finished game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameResult {
    /// White wins by checkmate.
    WhiteWins,
    /// Black wins by checkmate.
    BlackWins,
    /// Draw with a specific reason.
    Draw(DrawReason),
}

/// Reason for a draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawReason {
    /// Stalemate - no legal moves but not in check.
    Stalemate,
}

impl GameResult {
    /// Returns the result of `loser` being checkmated.
    pub const fn checkmated(loser: Color) -> Self {
        match loser {
            Color::White => GameResult::BlackWins,
            Color::Black => GameResult::WhiteWins,
        }
    }
}

impl std::fmt::Display for GameResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GameResult::WhiteWins => write!(f, "1-0"),
            GameResult::BlackWins => write!(f, "0-1"),
            GameResult::Draw(_) => write!(f, "1/2-1/2"),
        }
    }
}

impl Position {
    /// Returns true if `color`'s king is attacked.
    ///
    /// Returns false when that color has no king on the board.
    pub fn is_in_check(&self, color: Color) -> bool {
        is_king_attacked(self, color)
    }

    /// Returns true if `color` is in check and has no legal move.
    pub fn is_checkmate(&self, color: Color) -> bool {
        self.is_in_check(color) && !self.has_legal_move(color)
    }

    /// Returns true if `color` is not in check and has no legal move.
    pub fn is_stalemate(&self, color: Color) -> bool {
        !self.is_in_check(color) && !self.has_legal_move(color)
    }

    /// Returns the game result if the side to move has no legal move.
    pub fn game_result(&self) -> Option<GameResult> {
        let us = self.side_to_move;
        if self.has_legal_move(us) {
            None
        } else if self.is_in_check(us) {
            Some(GameResult::checkmated(us))
        } else {
            Some(GameResult::Draw(DrawReason::Stalemate))
        }
    }
}
