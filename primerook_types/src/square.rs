/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::{fmt, str::FromStr};

use anyhow::{bail, Result};

use crate::Color;

/// A single square on an 8x8 chessboard.
///
/// Addressed by zero-based `(row, col)` coordinates, where row `0` is Black's
/// back rank and row `7` is White's back rank. In algebraic terms, `(7, 0)`
/// is `a1` and `(0, 7)` is `h8`.
///
/// Construction is checked, so a `Square` held by the engine is always on the
/// board.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Square {
    row: u8,
    col: u8,
}

impl Square {
    /// Number of squares on the board.
    pub const COUNT: usize = 64;

    /// Creates a new [`Square`] from the provided coordinates.
    ///
    /// # Panics
    ///
    /// If either coordinate is greater than `7`.
    ///
    /// # Example
    /// ```
    /// # use primerook_types::Square;
    /// let e1 = Square::new(7, 4);
    /// assert_eq!(e1.to_string(), "e1");
    /// ```
    #[inline(always)]
    pub const fn new(row: u8, col: u8) -> Self {
        assert!(row < 8 && col < 8, "coordinates must be in 0..8");
        Self { row, col }
    }

    /// Creates a new [`Square`], returning `None` if either coordinate is off
    /// the board.
    ///
    /// Accepts signed coordinates so that offset arithmetic can be checked in
    /// one place.
    ///
    /// # Example
    /// ```
    /// # use primerook_types::Square;
    /// assert!(Square::try_new(3, 3).is_some());
    /// assert!(Square::try_new(-1, 3).is_none());
    /// assert!(Square::try_new(4, 8).is_none());
    /// ```
    #[inline(always)]
    pub const fn try_new(row: i8, col: i8) -> Option<Self> {
        if row >= 0 && row < 8 && col >= 0 && col < 8 {
            Some(Self {
                row: row as u8,
                col: col as u8,
            })
        } else {
            None
        }
    }

    /// The row of this square, `0..8`, increasing from Black's side of the board.
    #[inline(always)]
    pub const fn row(&self) -> u8 {
        self.row
    }

    /// The column of this square, `0..8`, increasing from the `a` file.
    #[inline(always)]
    pub const fn col(&self) -> u8 {
        self.col
    }

    /// Flattened index of this square, `0..64`, suitable for mailbox lookups.
    #[inline(always)]
    pub const fn index(&self) -> usize {
        self.row as usize * 8 + self.col as usize
    }

    /// Returns the square `dr` rows and `dc` columns away, if it is on the board.
    ///
    /// # Example
    /// ```
    /// # use primerook_types::Square;
    /// let d4 = Square::new(4, 3);
    /// assert_eq!(d4.offset(-2, 1), Some(Square::new(2, 4)));
    /// assert_eq!(d4.offset(4, 0), None);
    /// ```
    #[inline(always)]
    pub const fn offset(&self, dr: i8, dc: i8) -> Option<Self> {
        Self::try_new(self.row as i8 + dr, self.col as i8 + dc)
    }

    /// Returns the square `n` ranks ahead of this one, from `color`'s point of
    /// view, if it is on the board.
    ///
    /// White moves toward row `0`, Black toward row `7`.
    #[inline(always)]
    pub const fn forward_by(&self, color: Color, n: u8) -> Option<Self> {
        self.offset(color.forward_direction() * n as i8, 0)
    }

    /// Returns the square `n` ranks behind this one, from `color`'s point of
    /// view, if it is on the board.
    #[inline(always)]
    pub const fn backward_by(&self, color: Color, n: u8) -> Option<Self> {
        self.offset(-color.forward_direction() * n as i8, 0)
    }

    /// Whether this square lies on the promotion rank for `color` (the rank
    /// furthest from that color's starting side).
    ///
    /// # Example
    /// ```
    /// # use primerook_types::{Color, Square};
    /// assert!(Square::new(0, 3).is_promotion_rank(Color::White));
    /// assert!(!Square::new(0, 3).is_promotion_rank(Color::Black));
    /// ```
    #[inline(always)]
    pub const fn is_promotion_rank(&self, color: Color) -> bool {
        self.row == color.promotion_row()
    }

    /// Parses a [`Square`] from algebraic notation like `e4`.
    ///
    /// # Example
    /// ```
    /// # use primerook_types::Square;
    /// assert_eq!(Square::from_uci("e1").unwrap(), Square::new(7, 4));
    /// assert!(Square::from_uci("j9").is_err());
    /// ```
    pub fn from_uci(notation: &str) -> Result<Self> {
        let mut chars = notation.chars();
        let (Some(file), Some(rank), None) = (chars.next(), chars.next(), chars.next()) else {
            bail!("Invalid square notation {notation:?}: must be 2 characters");
        };

        if !('a'..='h').contains(&file) {
            bail!("Invalid file {file:?} in {notation:?}: must be a-h");
        }
        if !('1'..='8').contains(&rank) {
            bail!("Invalid rank {rank:?} in {notation:?}: must be 1-8");
        }

        let col = file as u8 - b'a';
        let row = 7 - (rank as u8 - b'1');
        Ok(Self::new(row, col))
    }

    /// Converts this [`Square`] to algebraic notation like `e4`.
    pub fn to_uci(self) -> String {
        self.to_string()
    }
}

impl FromStr for Square {
    type Err = anyhow::Error;
    fn from_str(s: &str) -> Result<Self> {
        Self::from_uci(s)
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let file = (b'a' + self.col) as char;
        let rank = (b'1' + (7 - self.row)) as char;
        write!(f, "{file}{rank}")
    }
}

impl fmt::Debug for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self} ({}, {})", self.row, self.col)
    }
}
