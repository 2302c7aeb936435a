//! Board square representation.

use std::fmt;

/// A square on the chess board as zero-based `(rank, file)` coordinates.
///
/// Rank 0 is black's back rank (algebraic rank 8) and rank 7 is white's
/// (algebraic rank 1). File 0 is the a-file. So `e2` is `(rank 6, file 4)`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Square {
    rank: u8,
    file: u8,
}

impl Square {
    /// Creates a square, returning `None` if either coordinate is off the board.
    #[inline]
    pub const fn new(rank: u8, file: u8) -> Option<Self> {
        if rank < 8 && file < 8 {
            Some(Square { rank, file })
        } else {
            None
        }
    }

    /// Creates a square without bounds checking.
    ///
    /// Out-of-range coordinates are a logic error; they are caught in debug
    /// builds only.
    #[inline]
    pub const fn new_unchecked(rank: u8, file: u8) -> Self {
        debug_assert!(rank < 8 && file < 8);
        Square { rank, file }
    }

    /// Creates a square from index (0-63), scanning rank 0 first.
    #[inline]
    pub const fn from_index(index: u8) -> Option<Self> {
        if index < 64 {
            Some(Square {
                rank: index / 8,
                file: index % 8,
            })
        } else {
            None
        }
    }

    /// Parses a square from algebraic notation (e.g., "e4").
    pub const fn from_algebraic(s: &str) -> Option<Self> {
        let bytes = s.as_bytes();
        if bytes.len() != 2 {
            return None;
        }
        let file = bytes[0].to_ascii_lowercase();
        let rank = bytes[1];
        if file < b'a' || file > b'h' || rank < b'1' || rank > b'8' {
            return None;
        }
        Some(Square {
            rank: b'8' - rank,
            file: file - b'a',
        })
    }

    /// Returns the rank coordinate (0 = algebraic rank 8).
    #[inline]
    pub const fn rank(self) -> u8 {
        self.rank
    }

    /// Returns the file coordinate (0 = a-file).
    #[inline]
    pub const fn file(self) -> u8 {
        self.file
    }

    /// Returns the scan index (0-63), a8 = 0 and h1 = 63.
    #[inline]
    pub const fn index(self) -> usize {
        (self.rank * 8 + self.file) as usize
    }

    /// Returns the square displaced by the given deltas, if still on the board.
    #[inline]
    pub const fn offset(self, rank_delta: i8, file_delta: i8) -> Option<Self> {
        let rank = self.rank as i8 + rank_delta;
        let file = self.file as i8 + file_delta;
        if rank < 0 || rank > 7 || file < 0 || file > 7 {
            None
        } else {
            Some(Square {
                rank: rank as u8,
                file: file as u8,
            })
        }
    }

    /// Returns the algebraic notation for this square.
    pub fn to_algebraic(self) -> String {
        format!("{}", self)
    }

    /// Iterates every square in scan order (rank 0 first, then by file).
    pub fn all() -> impl Iterator<Item = Square> {
        (0..64u8).map(|i| Square {
            rank: i / 8,
            file: i % 8,
        })
    }

    // Common squares
    pub const A1: Square = Square::new_unchecked(7, 0);
    pub const B1: Square = Square::new_unchecked(7, 1);
    pub const C1: Square = Square::new_unchecked(7, 2);
    pub const D1: Square = Square::new_unchecked(7, 3);
    pub const E1: Square = Square::new_unchecked(7, 4);
    pub const F1: Square = Square::new_unchecked(7, 5);
    pub const G1: Square = Square::new_unchecked(7, 6);
    pub const H1: Square = Square::new_unchecked(7, 7);
    pub const A8: Square = Square::new_unchecked(0, 0);
    pub const B8: Square = Square::new_unchecked(0, 1);
    pub const C8: Square = Square::new_unchecked(0, 2);
    pub const D8: Square = Square::new_unchecked(0, 3);
    pub const E8: Square = Square::new_unchecked(0, 4);
    pub const F8: Square = Square::new_unchecked(0, 5);
    pub const G8: Square = Square::new_unchecked(0, 6);
    pub const H8: Square = Square::new_unchecked(0, 7);
}

impl fmt::Debug for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Square({})", self)
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}",
            (b'a' + self.file) as char,
            (b'8' - self.rank) as char
        )
    }
}
