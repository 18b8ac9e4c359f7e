/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

#![doc = include_str!("../README.md")]

pub use primerook_types::*;

/// A chessboard: an 8x8 mailbox of pieces, with lookup, iteration, and fingerprinting.
mod board;
/// High-level game session: turn order, move execution, history, and terminal states.
mod game;
/// All code related to generating moves, detecting attacks, and filtering for legality.
mod movegen;
/// Enums and structs for modeling the movement of a piece on the board.
mod moves;

pub use board::*;
pub use game::*;
pub use movegen::*;
pub use moves::*;

/// Re-exports all the things you'll need.
pub mod prelude {
    pub use crate::board::*;
    pub use crate::game::*;
    pub use crate::movegen::*;
    pub use crate::moves::*;
    pub use primerook_types::*;
}
