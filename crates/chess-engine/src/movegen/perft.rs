//! Leaf counting over the legal move tree.
//!
//! Comparing counts against published values is the quickest way to catch
//! move generation bugs; [`perft_divide`] narrows a mismatch down to a root
//! move.

use super::generate_moves;
use crate::Position;

/// Counts the positions reachable in exactly `depth` legal moves.
pub fn perft(position: &Position, depth: u32) -> u64 {
    if depth == 0 {
        return 1;
    }

    let moves = generate_moves(position);
    if depth == 1 {
        return moves.len() as u64;
    }

    moves
        .iter()
        .filter_map(|&m| position.try_move(m))
        .map(|next| perft(&next, depth - 1))
        .sum()
}

/// Splits [`perft`] by root move, sorted by move text.
pub fn perft_divide(position: &Position, depth: u32) -> Vec<(String, u64)> {
    let mut counts: Vec<(String, u64)> = generate_moves(position)
        .iter()
        .filter_map(|&m| {
            let next = position.try_move(m)?;
            Some((m.to_uci(), perft(&next, depth.saturating_sub(1))))
        })
        .collect();
    counts.sort();
    counts
}
