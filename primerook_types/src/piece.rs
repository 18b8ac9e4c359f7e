/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::fmt;

/// The color of a player or piece.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Color {
    White,
    Black,
}

impl Color {
    /// Number of colors.
    pub const COUNT: usize = 2;

    /// Returns the opposite of this [`Color`].
    ///
    /// # Example
    /// ```
    /// # use primerook_types::Color;
    /// assert_eq!(Color::White.opponent(), Color::Black);
    /// assert_eq!(Color::Black.opponent(), Color::White);
    /// ```
    #[inline(always)]
    pub const fn opponent(&self) -> Self {
        match self {
            Self::White => Self::Black,
            Self::Black => Self::White,
        }
    }

    /// Creates a `usize` for indexing into lists of 2 elements.
    #[inline(always)]
    pub const fn index(&self) -> usize {
        *self as usize
    }

    /// The row this color's back rank occupies: `7` for White, `0` for Black.
    #[inline(always)]
    pub const fn back_row(&self) -> u8 {
        match self {
            Self::White => 7,
            Self::Black => 0,
        }
    }

    /// The row this color's pawns start on: `6` for White, `1` for Black.
    #[inline(always)]
    pub const fn pawn_row(&self) -> u8 {
        match self {
            Self::White => 6,
            Self::Black => 1,
        }
    }

    /// The row on which this color's pawns promote: `0` for White, `7` for Black.
    #[inline(always)]
    pub const fn promotion_row(&self) -> u8 {
        self.opponent().back_row()
    }

    /// The row delta of a forward move for this color: `-1` for White, `1` for Black.
    #[inline(always)]
    pub const fn forward_direction(&self) -> i8 {
        match self {
            Self::White => -1,
            Self::Black => 1,
        }
    }

    /// A lowercase name, suitable for display.
    #[inline(always)]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::White => "white",
            Self::Black => "black",
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// The kind of a chess piece, without color or position.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    /// Number of piece kinds.
    pub const COUNT: usize = 6;

    /// The kinds a pawn may promote to, strongest first.
    pub const PROMOTIONS: [Self; 4] = [Self::Queen, Self::Rook, Self::Bishop, Self::Knight];

    /// Whether this kind is a valid pawn-promotion choice.
    ///
    /// # Example
    /// ```
    /// # use primerook_types::PieceKind;
    /// assert!(PieceKind::Queen.is_promotion_choice());
    /// assert!(PieceKind::Knight.is_promotion_choice());
    /// assert!(!PieceKind::Pawn.is_promotion_choice());
    /// assert!(!PieceKind::King.is_promotion_choice());
    /// ```
    #[inline(always)]
    pub const fn is_promotion_choice(&self) -> bool {
        !matches!(self, Self::Pawn | Self::King)
    }

    /// A lowercase char for this kind: `p`, `n`, `b`, `r`, `q`, or `k`.
    #[inline(always)]
    pub const fn char(&self) -> char {
        match self {
            Self::Pawn => 'p',
            Self::Knight => 'n',
            Self::Bishop => 'b',
            Self::Rook => 'r',
            Self::Queen => 'q',
            Self::King => 'k',
        }
    }

    /// A lowercase name, suitable for display.
    #[inline(always)]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Pawn => "pawn",
            Self::Knight => "knight",
            Self::Bishop => "bishop",
            Self::Rook => "rook",
            Self::Queen => "queen",
            Self::King => "king",
        }
    }
}

impl fmt::Display for PieceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A chess piece: a [`PieceKind`], a [`Color`], and whether it has moved.
///
/// The `has_moved` flag is set once, when the piece completes its first move
/// (castling sets it on both the king and the rook), and is never reset. It
/// drives castling eligibility and nothing else.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Piece {
    color: Color,
    kind: PieceKind,
    has_moved: bool,
}

impl Piece {
    /// Creates a new [`Piece`] that has not yet moved.
    ///
    /// # Example
    /// ```
    /// # use primerook_types::{Color, Piece, PieceKind};
    /// let rook = Piece::new(Color::White, PieceKind::Rook);
    /// assert!(!rook.has_moved());
    /// ```
    #[inline(always)]
    pub const fn new(color: Color, kind: PieceKind) -> Self {
        Self {
            color,
            kind,
            has_moved: false,
        }
    }

    /// The [`Color`] of this piece.
    #[inline(always)]
    pub const fn color(&self) -> Color {
        self.color
    }

    /// The [`PieceKind`] of this piece.
    #[inline(always)]
    pub const fn kind(&self) -> PieceKind {
        self.kind
    }

    /// Whether this piece has completed a move.
    #[inline(always)]
    pub const fn has_moved(&self) -> bool {
        self.has_moved
    }

    /// Records that this piece has completed a move.
    #[inline(always)]
    pub fn mark_moved(&mut self) {
        self.has_moved = true;
    }

    /// Returns `true` if this piece is a pawn.
    #[inline(always)]
    pub const fn is_pawn(&self) -> bool {
        matches!(self.kind, PieceKind::Pawn)
    }

    /// Returns `true` if this piece is a rook.
    #[inline(always)]
    pub const fn is_rook(&self) -> bool {
        matches!(self.kind, PieceKind::Rook)
    }

    /// Returns `true` if this piece is a king.
    #[inline(always)]
    pub const fn is_king(&self) -> bool {
        matches!(self.kind, PieceKind::King)
    }

    /// A char for this piece: uppercase for White, lowercase for Black.
    ///
    /// # Example
    /// ```
    /// # use primerook_types::{Color, Piece, PieceKind};
    /// assert_eq!(Piece::new(Color::White, PieceKind::Knight).char(), 'N');
    /// assert_eq!(Piece::new(Color::Black, PieceKind::Queen).char(), 'q');
    /// ```
    #[inline(always)]
    pub const fn char(&self) -> char {
        match self.color {
            Color::White => self.kind.char().to_ascii_uppercase(),
            Color::Black => self.kind.char(),
        }
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.char())
    }
}
