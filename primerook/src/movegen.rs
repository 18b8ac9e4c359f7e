/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use log::debug;

use primerook_types::{is_prime, Color, Piece, PieceKind, Square, MAX_NUM_MOVES};

use super::{Board, Move, MoveKind};

/// An alias for an [`arrayvec::ArrayVec`] containing at most [`MAX_NUM_MOVES`] moves.
pub type MoveList = arrayvec::ArrayVec<Move, MAX_NUM_MOVES>;

/// The four orthogonal directions, as `(row, col)` deltas.
const ORTHOGONALS: [(i8, i8); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

/// The four diagonal directions, as `(row, col)` deltas.
const DIAGONALS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];

/// The eight knight jumps.
const KNIGHT_JUMPS: [(i8, i8); 8] = [
    (-2, -1),
    (-2, 1),
    (-1, -2),
    (-1, 2),
    (1, -2),
    (1, 2),
    (2, -1),
    (2, 1),
];

/// The eight king steps.
const KING_STEPS: [(i8, i8); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Which side of the board castling occurs on.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum CastleSide {
    /// Kingside, toward the `h` file.
    Short,
    /// Queenside, toward the `a` file.
    Long,
}

/// Generates all pseudo-legal moves for the piece at `from`.
///
/// Pseudo-legal means consistent with the piece's movement pattern and the
/// board's occupancy, without checking whether the mover's king is left in
/// check — that is [`is_legal_move`]'s job. Returns an empty list if `from`
/// is unoccupied.
///
/// This is the variant-aware generator: a rook here moves only a prime
/// number of squares (2, 3, 5, or 7). `ep_square` is the current en passant
/// target, if any.
///
/// # Example
/// ```
/// # use primerook::{moves_for, Board, Square};
/// let board = Board::starting_position();
/// // A pawn on its starting square with an open path has exactly two moves
/// assert_eq!(moves_for(&board, Square::new(6, 4), None).len(), 2);
/// // A rook boxed in by its own pieces has none
/// assert_eq!(moves_for(&board, Square::new(7, 0), None).len(), 0);
/// ```
pub fn moves_for(board: &Board, from: Square, ep_square: Option<Square>) -> MoveList {
    let mut moves = MoveList::new();
    let Some(piece) = board.piece_at(from) else {
        return moves;
    };

    match piece.kind() {
        PieceKind::Pawn => pawn_moves(board, from, piece, ep_square, &mut moves),
        PieceKind::Rook => prime_rook_moves(board, from, piece, &mut moves),
        PieceKind::Knight => step_moves(board, from, piece, &KNIGHT_JUMPS, &mut moves),
        PieceKind::Bishop => sliding_moves(board, from, piece, &DIAGONALS, &mut moves),
        PieceKind::Queen => {
            // The queen keeps her full reach; the prime restriction is the rook's alone
            sliding_moves(board, from, piece, &ORTHOGONALS, &mut moves);
            sliding_moves(board, from, piece, &DIAGONALS, &mut moves);
        }
        PieceKind::King => {
            step_moves(board, from, piece, &KING_STEPS, &mut moves);
            castling_moves(board, from, piece, &mut moves);
        }
    }

    moves
}

/// Generates the squares the piece at `from` bears on, for attack detection.
///
/// Differs from [`moves_for`] in two ways: a rook's attack reach ignores the
/// prime restriction (pins, checks, and defended squares use the full
/// sliding pattern), and a king contributes only its eight adjacent steps —
/// castling destinations are not attacks, and generating them here would
/// recurse through the safety probe.
pub fn attacks_from(board: &Board, from: Square) -> MoveList {
    let Some(piece) = board.piece_at(from) else {
        return MoveList::new();
    };

    match piece.kind() {
        PieceKind::Rook => {
            let mut moves = MoveList::new();
            sliding_moves(board, from, piece, &ORTHOGONALS, &mut moves);
            moves
        }
        PieceKind::King => {
            let mut moves = MoveList::new();
            step_moves(board, from, piece, &KING_STEPS, &mut moves);
            moves
        }
        _ => moves_for(board, from, None),
    }
}

/// Returns `true` if any piece of `attacker` color bears on `square`.
pub fn is_square_attacked(board: &Board, square: Square, attacker: Color) -> bool {
    for (from, piece) in board.iter() {
        if piece.color() != attacker {
            continue;
        }
        if attacks_from(board, from).iter().any(|mv| mv.to() == square) {
            return true;
        }
    }
    false
}

/// Checks whether `color` may castle on `side`.
///
/// Requires an unmoved king on its home square, an unmoved rook of the same
/// color on the corresponding corner, empty squares strictly between them,
/// and that the king's current square and every square it passes through or
/// lands on is safe from the opponent. Any failure yields `false`; nothing
/// here is an error.
pub fn can_castle(board: &Board, king_square: Square, color: Color, side: CastleSide) -> bool {
    let row = color.back_row();
    if king_square != Square::new(row, 4) {
        return false;
    }

    match board.piece_at(king_square) {
        Some(king) if king.is_king() && king.color() == color && !king.has_moved() => {}
        _ => return false,
    }

    let (rook_col, between, path): (u8, &[u8], &[u8]) = match side {
        CastleSide::Short => (7, &[5, 6], &[4, 5, 6]),
        CastleSide::Long => (0, &[1, 2, 3], &[4, 3, 2]),
    };

    match board.piece_at(Square::new(row, rook_col)) {
        Some(rook) if rook.is_rook() && rook.color() == color && !rook.has_moved() => {}
        _ => return false,
    }

    if between.iter().any(|&col| board.has(Square::new(row, col))) {
        return false;
    }

    path.iter()
        .all(|&col| is_safe_for_king(board, Square::new(row, col), color))
}

/// Probes whether a king of `color` standing on `square` would be attacked.
///
/// Works on a clone with a hypothetical king placed on the probed square;
/// the substitution never reaches the real board.
fn is_safe_for_king(board: &Board, square: Square, color: Color) -> bool {
    let mut probe = *board;
    let mut king = Piece::new(color, PieceKind::King);
    king.mark_moved();
    probe.place(king, square);
    !is_square_attacked(&probe, square, color.opponent())
}

/// Checks whether `mv` is fully legal for `color` on `board`.
///
/// The destination must appear among the pseudo-legal moves for the piece at
/// `mv.from()`. The move is then applied to a clone as a simple relocation —
/// castling's rook shuffle and en passant's pawn removal are the executor's
/// concern and cannot affect king safety — and rejected if `color`'s king is
/// missing or attacked afterwards.
pub fn is_legal_move(board: &Board, mv: Move, color: Color, ep_square: Option<Square>) -> bool {
    if !moves_for(board, mv.from(), ep_square)
        .iter()
        .any(|candidate| candidate.to() == mv.to())
    {
        return false;
    }

    let mut after = *board;
    if let Some(piece) = after.take(mv.from()) {
        after.place(piece, mv.to());
    }

    let Some(king_square) = after.find_king(color) else {
        debug!("no {color} king on the board after {mv}; rejecting");
        return false;
    };

    !is_square_attacked(&after, king_square, color.opponent())
}

/// Returns `true` if `color` has at least one legal move on `board`.
///
/// Early-exits on the first legal candidate, so checkmate and stalemate
/// detection never materialize the full move set.
pub fn has_legal_move(board: &Board, color: Color, ep_square: Option<Square>) -> bool {
    for (from, piece) in board.iter() {
        if piece.color() != color {
            continue;
        }
        for mv in moves_for(board, from, ep_square) {
            if is_legal_move(board, mv, color, ep_square) {
                return true;
            }
        }
    }
    false
}

fn pawn_moves(
    board: &Board,
    from: Square,
    piece: Piece,
    ep_square: Option<Square>,
    moves: &mut MoveList,
) {
    let dir = piece.color().forward_direction();

    if let Some(ahead) = from.offset(dir, 0) {
        if !board.has(ahead) {
            moves.push(Move::new(from, ahead, piece, MoveKind::Quiet));

            // The double step needs the starting rank and both squares open
            if from.row() == piece.color().pawn_row() {
                if let Some(double) = from.offset(2 * dir, 0) {
                    if !board.has(double) {
                        moves.push(Move::new(from, double, piece, MoveKind::PawnDoublePush));
                    }
                }
            }
        }
    }

    for dc in [-1, 1] {
        let Some(target) = from.offset(dir, dc) else {
            continue;
        };
        match board.piece_at(target) {
            Some(other) if other.color() != piece.color() => {
                moves.push(Move::new(from, target, piece, MoveKind::Quiet));
            }
            None if ep_square == Some(target) => {
                moves.push(Move::new(from, target, piece, MoveKind::EnPassantCapture));
            }
            _ => {}
        }
    }
}

/// The variant rule: a rook slides orthogonally, but only squares at a prime
/// step count (2, 3, 5, or 7) are destinations. A piece standing on a
/// non-prime square blocks further travel without ever producing a move
/// there; a piece on a prime square is captured (enemy) or blocks (friend).
fn prime_rook_moves(board: &Board, from: Square, piece: Piece, moves: &mut MoveList) {
    for (dr, dc) in ORTHOGONALS {
        let mut square = from;
        let mut steps = 0u8;
        loop {
            let Some(next) = square.offset(dr, dc) else {
                break;
            };
            square = next;
            steps += 1;

            if is_prime(steps) {
                match board.piece_at(square) {
                    None => moves.push(Move::new(from, square, piece, MoveKind::Quiet)),
                    Some(other) => {
                        if other.color() != piece.color() {
                            moves.push(Move::new(from, square, piece, MoveKind::Quiet));
                        }
                        break;
                    }
                }
            } else if board.has(square) {
                break;
            }
        }
    }
}

/// Unrestricted sliding along `directions`, stopping at the first occupied
/// square (capture if enemy). Serves bishops, queens, and rook attack reach.
fn sliding_moves(
    board: &Board,
    from: Square,
    piece: Piece,
    directions: &[(i8, i8)],
    moves: &mut MoveList,
) {
    for &(dr, dc) in directions {
        let mut square = from;
        while let Some(next) = square.offset(dr, dc) {
            square = next;
            match board.piece_at(square) {
                None => moves.push(Move::new(from, square, piece, MoveKind::Quiet)),
                Some(other) => {
                    if other.color() != piece.color() {
                        moves.push(Move::new(from, square, piece, MoveKind::Quiet));
                    }
                    break;
                }
            }
        }
    }
}

/// Fixed-offset movement for knights and kings: in-bounds squares not
/// occupied by a friendly piece.
fn step_moves(
    board: &Board,
    from: Square,
    piece: Piece,
    offsets: &[(i8, i8)],
    moves: &mut MoveList,
) {
    for &(dr, dc) in offsets {
        let Some(target) = from.offset(dr, dc) else {
            continue;
        };
        if board.color_at(target) != Some(piece.color()) {
            moves.push(Move::new(from, target, piece, MoveKind::Quiet));
        }
    }
}

fn castling_moves(board: &Board, from: Square, king: Piece, moves: &mut MoveList) {
    if king.has_moved() {
        return;
    }
    if can_castle(board, from, king.color(), CastleSide::Short) {
        let to = Square::new(from.row(), from.col() + 2);
        moves.push(Move::new(from, to, king, MoveKind::ShortCastle));
    }
    if can_castle(board, from, king.color(), CastleSide::Long) {
        let to = Square::new(from.row(), from.col() - 2);
        moves.push(Move::new(from, to, king, MoveKind::LongCastle));
    }
}
