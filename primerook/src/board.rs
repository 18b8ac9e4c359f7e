/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::fmt;
use std::ops::Index;

use primerook_types::{Color, Piece, PieceKind, Square};

/// Back-rank piece kinds, from the `a` file to the `h` file.
const BACK_RANK: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

/// Represents all pieces and their locations on a chess board.
///
/// Has no knowledge of whose turn it is, en passant, or move counters. If you
/// need those, see [`Game`](crate::Game).
///
/// Internally a mailbox of 64 optional [`Piece`]s, indexed by [`Square`].
/// A `Board` is a plain value: cloning it yields a fully independent copy,
/// which is what the legality filter and castling probes rely on.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Board {
    squares: [Option<Piece>; Square::COUNT],
}

impl Board {
    /// Creates a new, empty [`Board`] containing no pieces.
    #[inline(always)]
    pub const fn new() -> Self {
        Self {
            squares: [None; Square::COUNT],
        }
    }

    /// Creates a [`Board`] with the standard initial chess layout.
    ///
    /// # Example
    /// ```
    /// # use primerook::{Board, Color, PieceKind, Square};
    /// let board = Board::starting_position();
    /// let king = board.piece_at(Square::new(7, 4)).unwrap();
    /// assert_eq!(king.kind(), PieceKind::King);
    /// assert_eq!(king.color(), Color::White);
    /// ```
    pub fn starting_position() -> Self {
        let mut board = Self::new();
        for col in 0..8 {
            board.place(Piece::new(Color::Black, BACK_RANK[col as usize]), Square::new(0, col));
            board.place(Piece::new(Color::Black, PieceKind::Pawn), Square::new(1, col));
            board.place(Piece::new(Color::White, PieceKind::Pawn), Square::new(6, col));
            board.place(Piece::new(Color::White, BACK_RANK[col as usize]), Square::new(7, col));
        }
        board
    }

    /// Returns `true` if there is a piece at the given [`Square`], else `false`.
    #[inline(always)]
    pub const fn has(&self, square: Square) -> bool {
        self.squares[square.index()].is_some()
    }

    /// Places the provided [`Piece`] at the supplied [`Square`].
    ///
    /// Any piece previously on that square is replaced.
    #[inline(always)]
    pub fn place(&mut self, piece: Piece, square: Square) {
        self.squares[square.index()] = Some(piece);
    }

    /// Clears the supplied [`Square`] of any piece.
    #[inline(always)]
    pub fn clear(&mut self, square: Square) {
        self.squares[square.index()] = None;
    }

    /// Takes the [`Piece`] from a given [`Square`], if there is one present.
    ///
    /// # Example
    /// ```
    /// # use primerook::{Board, PieceKind, Square};
    /// let mut board = Board::starting_position();
    /// let taken = board.take(Square::new(7, 1)).unwrap();
    /// assert_eq!(taken.kind(), PieceKind::Knight);
    /// assert!(!board.has(Square::new(7, 1)));
    /// ```
    #[inline(always)]
    pub fn take(&mut self, square: Square) -> Option<Piece> {
        self.squares[square.index()].take()
    }

    /// Fetches the [`Piece`] at the provided [`Square`], if there is one.
    #[inline(always)]
    pub const fn piece_at(&self, square: Square) -> Option<Piece> {
        self.squares[square.index()]
    }

    /// Fetches the [`Color`] of the piece at the provided [`Square`], if there is one.
    #[inline(always)]
    pub fn color_at(&self, square: Square) -> Option<Color> {
        self.squares[square.index()].map(|piece| piece.color())
    }

    /// Fetches the [`PieceKind`] of the piece at the provided [`Square`], if there is one.
    #[inline(always)]
    pub fn kind_at(&self, square: Square) -> Option<PieceKind> {
        self.squares[square.index()].map(|piece| piece.kind())
    }

    /// Locates the king of `color`, if one is on the board.
    ///
    /// During normal play there is exactly one king of each color; callers
    /// treat `None` as a failed legality check, never as a panic.
    pub fn find_king(&self, color: Color) -> Option<Square> {
        self.iter()
            .find(|(_, piece)| piece.is_king() && piece.color() == color)
            .map(|(square, _)| square)
    }

    /// Returns an iterator over all occupied squares, yielding `(Square, Piece)` pairs.
    #[inline(always)]
    pub fn iter(&self) -> BoardIter<'_> {
        BoardIter {
            board: self,
            index: 0,
        }
    }

    /// Produces a deterministic encoding of the board's occupancy, used for
    /// threefold-repetition detection.
    ///
    /// One char per square (piece char or `.`), rank by rank from Black's
    /// side, ranks separated by `/`. Two boards with identical piece
    /// placement always fingerprint identically, regardless of how they were
    /// reached; the per-piece `has_moved` flag is deliberately excluded.
    ///
    /// # Example
    /// ```
    /// # use primerook::Board;
    /// let fingerprint = Board::starting_position().fingerprint();
    /// assert_eq!(
    ///     fingerprint,
    ///     "rnbqkbnr/pppppppp/......../......../......../......../PPPPPPPP/RNBQKBNR"
    /// );
    /// ```
    pub fn fingerprint(&self) -> String {
        let mut encoded = String::with_capacity(Square::COUNT + 7);
        for row in 0..8 {
            if row > 0 {
                encoded.push('/');
            }
            for col in 0..8 {
                match self.piece_at(Square::new(row, col)) {
                    Some(piece) => encoded.push(piece.char()),
                    None => encoded.push('.'),
                }
            }
        }
        encoded
    }
}

impl Default for Board {
    #[inline(always)]
    fn default() -> Self {
        Self::starting_position()
    }
}

impl Index<Square> for Board {
    type Output = Option<Piece>;
    #[inline(always)]
    fn index(&self, square: Square) -> &Self::Output {
        &self.squares[square.index()]
    }
}

impl fmt::Display for Board {
    /// Renders the board as an ASCII grid, with White at the bottom.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..8 {
            write!(f, "{}|", 8 - row)?;
            for col in 0..8 {
                let piece_char = self
                    .piece_at(Square::new(row, col))
                    .map(|p| p.char())
                    .unwrap_or('.');
                write!(f, " {piece_char}")?;
            }
            writeln!(f)?;
        }
        write!(f, " +")?;
        for _ in 0..8 {
            write!(f, "--")?;
        }
        write!(f, "\n  ")?;
        for col in 0..8u8 {
            write!(f, " {}", (b'a' + col) as char)?;
        }
        Ok(())
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self}")
    }
}

/// An iterator over the occupied squares of a [`Board`].
pub struct BoardIter<'a> {
    board: &'a Board,
    index: usize,
}

impl Iterator for BoardIter<'_> {
    type Item = (Square, Piece);

    fn next(&mut self) -> Option<Self::Item> {
        while self.index < Square::COUNT {
            let index = self.index;
            self.index += 1;
            if let Some(piece) = self.board.squares[index] {
                let square = Square::new(index as u8 / 8, index as u8 % 8);
                return Some((square, piece));
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starting_position_layout() {
        let board = Board::starting_position();
        assert_eq!(board.iter().count(), 32);

        for col in 0..8 {
            assert_eq!(board.kind_at(Square::new(1, col)), Some(PieceKind::Pawn));
            assert_eq!(board.color_at(Square::new(1, col)), Some(Color::Black));
            assert_eq!(board.kind_at(Square::new(6, col)), Some(PieceKind::Pawn));
            assert_eq!(board.color_at(Square::new(6, col)), Some(Color::White));
        }

        assert_eq!(board.find_king(Color::White), Some(Square::new(7, 4)));
        assert_eq!(board.find_king(Color::Black), Some(Square::new(0, 4)));

        // No piece has moved at game start
        assert!(board.iter().all(|(_, piece)| !piece.has_moved()));
    }

    #[test]
    fn test_clone_is_deeply_independent() {
        let original = Board::starting_position();
        let mut copy = original;

        // Mutating the copy's occupancy leaves the original untouched
        copy.clear(Square::new(6, 4));
        assert!(original.has(Square::new(6, 4)));
        assert!(!copy.has(Square::new(6, 4)));

        // Mutating a piece's flag in the copy leaves the original untouched
        let mut knight = copy.take(Square::new(7, 1)).unwrap();
        knight.mark_moved();
        copy.place(knight, Square::new(5, 2));
        assert!(!original.piece_at(Square::new(7, 1)).unwrap().has_moved());
    }

    #[test]
    fn test_fingerprint_ignores_history() {
        let mut board = Board::starting_position();
        let initial = board.fingerprint();

        // Move a knight out and back; placement is identical, so the
        // fingerprint must match even though the piece is now marked moved.
        let mut knight = board.take(Square::new(7, 1)).unwrap();
        knight.mark_moved();
        board.place(knight, Square::new(5, 2));
        assert_ne!(board.fingerprint(), initial);

        let knight = board.take(Square::new(5, 2)).unwrap();
        board.place(knight, Square::new(7, 1));
        assert_eq!(board.fingerprint(), initial);
    }

    #[test]
    fn test_fingerprint_distinguishes_kind_and_color() {
        let mut a = Board::new();
        let mut b = Board::new();
        a.place(Piece::new(Color::White, PieceKind::Rook), Square::new(4, 4));
        b.place(Piece::new(Color::Black, PieceKind::Rook), Square::new(4, 4));
        assert_ne!(a.fingerprint(), b.fingerprint());

        let mut c = Board::new();
        c.place(Piece::new(Color::White, PieceKind::Queen), Square::new(4, 4));
        assert_ne!(a.fingerprint(), c.fingerprint());
    }

    #[test]
    fn test_find_king_on_empty_board() {
        let board = Board::new();
        assert_eq!(board.find_king(Color::White), None);
        assert_eq!(board.find_king(Color::Black), None);
    }
}
