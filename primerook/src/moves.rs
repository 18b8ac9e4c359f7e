/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::fmt;

use primerook_types::{Piece, PieceKind, Square};

/// The different ways a [`Move`] can alter the board beyond a simple relocation.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum MoveKind {
    /// A move or capture with no side effects.
    Quiet,

    /// A pawn advancing two squares from its starting rank,
    /// exposing it to en passant for exactly one reply.
    PawnDoublePush,

    /// A pawn capturing onto the en passant square;
    /// the captured pawn is one rank behind the destination.
    EnPassantCapture,

    /// Castling on the kingside.
    ShortCastle,

    /// Castling on the queenside.
    LongCastle,

    /// A pawn reaching its last rank and becoming the chosen kind.
    Promotion(PieceKind),
}

/// Represents a single move on the board.
///
/// A `Move` is a request or a record, not something the board owns: it
/// carries its origin, destination, a snapshot of the moving piece as it was
/// *before* the move, and a [`MoveKind`] describing any side effects.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Move {
    from: Square,
    to: Square,
    piece: Piece,
    kind: MoveKind,
}

impl Move {
    /// Creates a new [`Move`] from `from` to `to` with the provided [`MoveKind`].
    #[inline(always)]
    pub const fn new(from: Square, to: Square, piece: Piece, kind: MoveKind) -> Self {
        Self {
            from,
            to,
            piece,
            kind,
        }
    }

    /// The [`Square`] this move originates from.
    #[inline(always)]
    pub const fn from(&self) -> Square {
        self.from
    }

    /// The [`Square`] this move lands on.
    #[inline(always)]
    pub const fn to(&self) -> Square {
        self.to
    }

    /// A snapshot of the moving [`Piece`], as it was before the move.
    #[inline(always)]
    pub const fn piece(&self) -> Piece {
        self.piece
    }

    /// The [`MoveKind`] of this move.
    #[inline(always)]
    pub const fn kind(&self) -> MoveKind {
        self.kind
    }

    /// Internal helper for unpacking a move all at once.
    #[inline(always)]
    pub const fn parts(&self) -> (Square, Square, MoveKind) {
        (self.from, self.to, self.kind)
    }

    /// Returns `true` if this move is a short (kingside) castle.
    #[inline(always)]
    pub const fn is_short_castle(&self) -> bool {
        matches!(self.kind, MoveKind::ShortCastle)
    }

    /// Returns `true` if this move is a long (queenside) castle.
    #[inline(always)]
    pub const fn is_long_castle(&self) -> bool {
        matches!(self.kind, MoveKind::LongCastle)
    }

    /// Returns `true` if this move is a castle of either side.
    #[inline(always)]
    pub const fn is_castle(&self) -> bool {
        matches!(self.kind, MoveKind::ShortCastle | MoveKind::LongCastle)
    }

    /// Returns `true` if this move is an en passant capture.
    #[inline(always)]
    pub const fn is_en_passant(&self) -> bool {
        matches!(self.kind, MoveKind::EnPassantCapture)
    }

    /// Returns `true` if this move is a two-square pawn advance.
    #[inline(always)]
    pub const fn is_pawn_double_push(&self) -> bool {
        matches!(self.kind, MoveKind::PawnDoublePush)
    }

    /// If this move is a resolved promotion, returns the chosen [`PieceKind`].
    #[inline(always)]
    pub const fn promotion(&self) -> Option<PieceKind> {
        match self.kind {
            MoveKind::Promotion(kind) => Some(kind),
            _ => None,
        }
    }
}

impl fmt::Display for Move {
    /// Renders this move in long algebraic notation, like `e2e4` or `a7a8q`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(kind) = self.promotion() {
            write!(f, "{}{}{}", self.from, self.to, kind.char())
        } else {
            write!(f, "{}{}", self.from, self.to)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use primerook_types::Color;

    #[test]
    fn test_kind_predicates() {
        let pawn = Piece::new(Color::White, PieceKind::Pawn);
        let push = Move::new(
            Square::new(6, 4),
            Square::new(4, 4),
            pawn,
            MoveKind::PawnDoublePush,
        );
        assert!(push.is_pawn_double_push());
        assert!(!push.is_castle());
        assert!(!push.is_en_passant());
        assert_eq!(push.promotion(), None);

        let king = Piece::new(Color::White, PieceKind::King);
        let castle = Move::new(
            Square::new(7, 4),
            Square::new(7, 6),
            king,
            MoveKind::ShortCastle,
        );
        assert!(castle.is_castle());
        assert!(castle.is_short_castle());
        assert!(!castle.is_long_castle());
    }

    #[test]
    fn test_display_long_algebraic() {
        let pawn = Piece::new(Color::White, PieceKind::Pawn);
        let mv = Move::new(Square::new(6, 4), Square::new(4, 4), pawn, MoveKind::Quiet);
        assert_eq!(mv.to_string(), "e2e4");

        let promote = Move::new(
            Square::new(1, 0),
            Square::new(0, 0),
            pawn,
            MoveKind::Promotion(PieceKind::Queen),
        );
        assert_eq!(promote.to_string(), "a7a8q");
    }
}
