/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::collections::HashMap;
use std::fmt;

use anyhow::{bail, Result};
use log::{debug, info};

use primerook_types::{Color, Piece, PieceKind, Square};

use super::{has_legal_move, is_legal_move, is_square_attacked, moves_for, Board, Move, MoveKind};

/// How a finished game ended.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum GameResult {
    /// The player to move is in check with no legal reply.
    Checkmate { winner: Color },
    /// The player to move is not in check but has no legal move.
    Stalemate,
    /// The same piece placement has occurred three times.
    ThreefoldRepetition,
    /// Fifty consecutive half-moves without a capture or pawn move.
    FiftyMoveRule,
}

impl fmt::Display for GameResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Checkmate { winner } => write!(f, "checkmate, {} wins", winner.name()),
            Self::Stalemate => write!(f, "draw by stalemate"),
            Self::ThreefoldRepetition => write!(f, "draw by threefold repetition"),
            Self::FiftyMoveRule => write!(f, "draw by the fifty-move rule"),
        }
    }
}

/// Why a submission was turned away.
///
/// Rejections are ordinary outcomes, not errors: the session is unchanged and
/// the caller may simply try something else.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum RejectReason {
    /// The game has already ended.
    GameOver,
    /// A promotion is waiting to be resolved; no other move may be submitted.
    PromotionPending,
    /// [`Game::resolve_promotion`] was called with no promotion waiting.
    NoPromotionPending,
    /// The chosen promotion kind is not one a pawn may become.
    InvalidPromotionChoice,
    /// The source square holds no piece.
    EmptySource,
    /// The source square holds a piece of the wrong color.
    NotYourTurn,
    /// The move violates the piece's movement rules or leaves the king in check.
    IllegalMove,
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            Self::GameOver => "the game is over",
            Self::PromotionPending => "a promotion must be resolved first",
            Self::NoPromotionPending => "no promotion is pending",
            Self::InvalidPromotionChoice => "a pawn cannot become that",
            Self::EmptySource => "no piece on the source square",
            Self::NotYourTurn => "that piece belongs to the opponent",
            Self::IllegalMove => "illegal move",
        };
        write!(f, "{reason}")
    }
}

/// The session's verdict on a submission.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum MoveOutcome {
    /// The move was executed. If it ended the game, `terminal` says how.
    Applied { terminal: Option<GameResult> },
    /// A pawn reached its last rank; the board is untouched until
    /// [`Game::resolve_promotion`] supplies the replacement kind.
    AwaitingPromotion,
    /// The submission was refused and the session is unchanged.
    Rejected(RejectReason),
}

impl MoveOutcome {
    /// Returns `true` if the move was executed.
    #[inline(always)]
    pub const fn applied(&self) -> bool {
        matches!(self, Self::Applied { .. })
    }

    /// Returns `true` if the session is now waiting on a promotion choice.
    #[inline(always)]
    pub const fn pending_promotion(&self) -> bool {
        matches!(self, Self::AwaitingPromotion)
    }

    /// If the submission was refused, returns the reason.
    #[inline(always)]
    pub const fn rejection(&self) -> Option<RejectReason> {
        match self {
            Self::Rejected(reason) => Some(*reason),
            _ => None,
        }
    }

    /// If this move ended the game, returns how.
    #[inline(always)]
    pub const fn terminal(&self) -> Option<GameResult> {
        match self {
            Self::Applied { terminal } => *terminal,
            _ => None,
        }
    }
}

impl fmt::Display for MoveOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Applied {
                terminal: Some(result),
            } => write!(f, "applied; {result}"),
            Self::Applied { terminal: None } => write!(f, "applied"),
            Self::AwaitingPromotion => write!(f, "awaiting promotion choice"),
            Self::Rejected(reason) => write!(f, "rejected: {reason}"),
        }
    }
}

/// A validated pawn move onto the last rank, held until the caller picks the
/// replacement piece.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct PendingPromotion {
    /// The pawn's current square.
    pub from: Square,
    /// The promotion square. May hold an enemy piece until resolution.
    pub to: Square,
    /// The pawn, as it stands on the board.
    pub piece: Piece,
}

/// A read-only view of the session, borrowed from a [`Game`].
#[derive(Clone, Copy, Debug)]
pub struct Snapshot<'a> {
    /// The live board.
    pub board: &'a Board,
    /// Whose turn it is.
    pub side_to_move: Color,
    /// Every executed move, in order.
    pub move_history: &'a [Move],
    /// A position fingerprint per reached position, the initial one included.
    pub board_history: &'a [String],
    /// Half-moves since the last capture or pawn move.
    pub fifty_move_clock: u32,
    /// The square a pawn may capture onto en passant, if any.
    pub en_passant: Option<Square>,
    /// The unresolved promotion, if one is waiting.
    pub awaiting_promotion: Option<PendingPromotion>,
    /// How the game ended, if it has.
    pub result: Option<GameResult>,
}

/// A complete game session.
///
/// Owns the [`Board`] plus everything the board alone cannot know: whose turn
/// it is, the en passant target, the fifty-move clock, move and position
/// history, any promotion awaiting resolution, and the final result once one
/// exists.
///
/// Moves enter through [`submit_move`](Self::submit_move); everything it can
/// sensibly refuse comes back as [`MoveOutcome::Rejected`], while an `Err`
/// signals a corrupt session (a board with no king for the side to move).
pub struct Game {
    board: Board,
    side_to_move: Color,
    en_passant: Option<Square>,
    fifty_move_clock: u32,
    move_history: Vec<Move>,
    board_history: Vec<String>,
    pending: Option<PendingPromotion>,
    result: Option<GameResult>,
}

impl Game {
    /// Creates a new [`Game`] from the standard starting position, White to move.
    pub fn new() -> Self {
        Self::from_position(Board::starting_position(), Color::White)
    }

    /// Creates a [`Game`] from an arbitrary position.
    ///
    /// The position counts as the first entry in the repetition history.
    pub fn from_position(board: Board, side_to_move: Color) -> Self {
        Self {
            board,
            side_to_move,
            en_passant: None,
            fifty_move_clock: 0,
            move_history: Vec::new(),
            board_history: vec![board.fingerprint()],
            pending: None,
            result: None,
        }
    }

    /// The current [`Board`].
    #[inline(always)]
    pub const fn board(&self) -> &Board {
        &self.board
    }

    /// The [`Color`] whose turn it is.
    #[inline(always)]
    pub const fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    /// The en passant target square, if the last move was a double pawn push.
    #[inline(always)]
    pub const fn en_passant(&self) -> Option<Square> {
        self.en_passant
    }

    /// How the game ended, if it has.
    #[inline(always)]
    pub const fn result(&self) -> Option<GameResult> {
        self.result
    }

    /// Returns `true` if the game has reached a terminal state.
    #[inline(always)]
    pub const fn is_game_over(&self) -> bool {
        self.result.is_some()
    }

    /// The promotion awaiting resolution, if any.
    #[inline(always)]
    pub const fn awaiting_promotion(&self) -> Option<PendingPromotion> {
        self.pending
    }

    /// Every move executed so far, in order.
    #[inline(always)]
    pub fn move_history(&self) -> &[Move] {
        &self.move_history
    }

    /// Returns `true` if `color`'s king is currently attacked.
    ///
    /// A board with no such king reports `false`.
    pub fn is_in_check(&self, color: Color) -> bool {
        match self.board.find_king(color) {
            Some(king) => is_square_attacked(&self.board, king, color.opponent()),
            None => false,
        }
    }

    /// Borrows a read-only [`Snapshot`] of the whole session.
    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            board: &self.board,
            side_to_move: self.side_to_move,
            move_history: &self.move_history,
            board_history: &self.board_history,
            fifty_move_clock: self.fifty_move_clock,
            en_passant: self.en_passant,
            awaiting_promotion: self.pending,
            result: self.result,
        }
    }

    /// Discards all state and starts a fresh game from the standard position.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Submits a move from `from` to `to` for the side to move.
    ///
    /// Validates the submission, executes it if legal, and reports the
    /// outcome. A pawn landing on its last rank is *not* executed: the
    /// session parks it as a [`PendingPromotion`] and answers
    /// [`MoveOutcome::AwaitingPromotion`]; until
    /// [`resolve_promotion`](Self::resolve_promotion) is called, every other
    /// submission is rejected.
    ///
    /// # Errors
    ///
    /// Fails only if the side to move has no king on the board, which means
    /// the session was constructed from a broken position.
    ///
    /// # Example
    /// ```
    /// # use primerook::{Game, Square};
    /// let mut game = Game::new();
    /// let outcome = game.submit_move(Square::new(6, 3), Square::new(4, 3)).unwrap();
    /// assert!(outcome.applied());
    /// ```
    pub fn submit_move(&mut self, from: Square, to: Square) -> Result<MoveOutcome> {
        if self.is_game_over() {
            return Ok(Self::refuse(from, to, RejectReason::GameOver));
        }
        if self.pending.is_some() {
            return Ok(Self::refuse(from, to, RejectReason::PromotionPending));
        }

        let Some(piece) = self.board.piece_at(from) else {
            return Ok(Self::refuse(from, to, RejectReason::EmptySource));
        };
        if piece.color() != self.side_to_move {
            return Ok(Self::refuse(from, to, RejectReason::NotYourTurn));
        }

        if self.board.find_king(self.side_to_move).is_none() {
            bail!(
                "no {} king on the board; the session is unplayable",
                self.side_to_move.name()
            );
        }

        let Some(mv) = moves_for(&self.board, from, self.en_passant)
            .into_iter()
            .find(|candidate| candidate.to() == to)
        else {
            return Ok(Self::refuse(from, to, RejectReason::IllegalMove));
        };

        if !is_legal_move(&self.board, mv, self.side_to_move, self.en_passant) {
            return Ok(Self::refuse(from, to, RejectReason::IllegalMove));
        }

        if piece.is_pawn() && to.is_promotion_rank(piece.color()) {
            self.pending = Some(PendingPromotion { from, to, piece });
            return Ok(MoveOutcome::AwaitingPromotion);
        }

        let resets_clock = self.apply(mv);
        Ok(self.finish_move(mv, resets_clock))
    }

    /// Resolves a pending promotion by naming the pawn's replacement.
    ///
    /// Only then does the board change: the pawn's square is vacated and the
    /// chosen piece appears on the promotion square, capturing whatever stood
    /// there. `kind` must be a queen, rook, bishop, or knight.
    pub fn resolve_promotion(&mut self, kind: PieceKind) -> Result<MoveOutcome> {
        if self.is_game_over() {
            return Ok(MoveOutcome::Rejected(RejectReason::GameOver));
        }
        let Some(pending) = self.pending else {
            return Ok(MoveOutcome::Rejected(RejectReason::NoPromotionPending));
        };
        if !kind.is_promotion_choice() {
            return Ok(MoveOutcome::Rejected(RejectReason::InvalidPromotionChoice));
        }

        self.pending = None;
        self.board.clear(pending.from);
        let mut promoted = Piece::new(pending.piece.color(), kind);
        promoted.mark_moved();
        self.board.place(promoted, pending.to);

        let mv = Move::new(
            pending.from,
            pending.to,
            pending.piece,
            MoveKind::Promotion(kind),
        );
        Ok(self.finish_move(mv, true))
    }

    /// Builds a rejection outcome, leaving a trace of what was refused.
    fn refuse(from: Square, to: Square, reason: RejectReason) -> MoveOutcome {
        debug!("refused {from}{to}: {reason}");
        MoveOutcome::Rejected(reason)
    }

    /// Executes a validated move on the board, returning `true` if it resets
    /// the fifty-move clock (a capture or a pawn move).
    fn apply(&mut self, mv: Move) -> bool {
        let (from, to, kind) = mv.parts();
        let color = mv.piece().color();

        match kind {
            MoveKind::ShortCastle | MoveKind::LongCastle => {
                let row = from.row();
                let (rook_from, rook_to) = if mv.is_short_castle() {
                    (Square::new(row, 7), Square::new(row, 5))
                } else {
                    (Square::new(row, 0), Square::new(row, 3))
                };
                self.relocate(from, to);
                self.relocate(rook_from, rook_to);
                false
            }
            MoveKind::EnPassantCapture => {
                self.relocate(from, to);
                if let Some(captured) = to.backward_by(color, 1) {
                    self.board.clear(captured);
                }
                true
            }
            _ => {
                let captures = self.board.has(to);
                self.relocate(from, to);
                captures || mv.piece().is_pawn()
            }
        }
    }

    /// Moves the piece on `from` to `to`, marking it as having moved.
    fn relocate(&mut self, from: Square, to: Square) {
        if let Some(mut piece) = self.board.take(from) {
            piece.mark_moved();
            self.board.place(piece, to);
        }
    }

    /// Post-move bookkeeping shared by the normal and promotion paths:
    /// en passant target, fifty-move clock, histories, turn hand-off, and
    /// terminal evaluation for the player now to move.
    fn finish_move(&mut self, mv: Move, resets_clock: bool) -> MoveOutcome {
        let color = mv.piece().color();

        self.en_passant = if mv.is_pawn_double_push() {
            mv.from().forward_by(color, 1)
        } else {
            None
        };

        if resets_clock {
            self.fifty_move_clock = 0;
        } else {
            self.fifty_move_clock += 1;
        }

        self.move_history.push(mv);
        self.board_history.push(self.board.fingerprint());
        self.side_to_move = color.opponent();

        let terminal = self.evaluate_terminal();
        if let Some(result) = terminal {
            info!("game over after {mv}: {result}");
            self.result = Some(result);
        }

        MoveOutcome::Applied { terminal }
    }

    /// Decides whether the game just ended, from the perspective of the
    /// player now to move. Checkmate and stalemate outrank the draw clocks.
    fn evaluate_terminal(&self) -> Option<GameResult> {
        let to_move = self.side_to_move;
        if !has_legal_move(&self.board, to_move, self.en_passant) {
            return if self.is_in_check(to_move) {
                Some(GameResult::Checkmate {
                    winner: to_move.opponent(),
                })
            } else {
                Some(GameResult::Stalemate)
            };
        }

        let mut seen: HashMap<&str, u32> = HashMap::new();
        for fingerprint in &self.board_history {
            *seen.entry(fingerprint.as_str()).or_insert(0) += 1;
        }
        if seen.values().any(|&count| count >= 3) {
            return Some(GameResult::ThreefoldRepetition);
        }

        if self.fifty_move_clock >= 50 {
            return Some(GameResult::FiftyMoveRule);
        }

        None
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Game {
    /// Renders the board followed by a one-line status.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.board)?;
        match self.result {
            Some(result) => write!(f, "{result}"),
            None => write!(f, "{} to move", self.side_to_move.name()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn play(game: &mut Game, from: (u8, u8), to: (u8, u8)) -> MoveOutcome {
        game.submit_move(Square::new(from.0, from.1), Square::new(to.0, to.1))
            .unwrap()
    }

    fn assert_applied(game: &mut Game, from: (u8, u8), to: (u8, u8)) {
        let outcome = play(game, from, to);
        assert!(outcome.applied(), "{from:?} -> {to:?} was {outcome}");
    }

    #[test]
    fn test_new_game_state() {
        let game = Game::new();
        assert_eq!(game.side_to_move(), Color::White);
        assert!(!game.is_game_over());
        assert!(game.awaiting_promotion().is_none());
        assert!(game.move_history().is_empty());

        // The starting position itself is the first repetition entry
        let snapshot = game.snapshot();
        assert_eq!(snapshot.board_history.len(), 1);
        assert_eq!(snapshot.fifty_move_clock, 0);
    }

    #[test]
    fn test_simple_move_updates_session() {
        let mut game = Game::new();
        assert_applied(&mut game, (6, 4), (4, 4));

        assert_eq!(game.side_to_move(), Color::Black);
        assert!(game.board().has(Square::new(4, 4)));
        assert!(!game.board().has(Square::new(6, 4)));
        assert!(game.board().piece_at(Square::new(4, 4)).unwrap().has_moved());
        assert_eq!(game.move_history().len(), 1);
        assert_eq!(game.snapshot().board_history.len(), 2);
    }

    #[test]
    fn test_submission_rejections() {
        let mut game = Game::new();

        let empty = play(&mut game, (4, 4), (3, 4));
        assert_eq!(empty.rejection(), Some(RejectReason::EmptySource));

        let wrong_color = play(&mut game, (1, 4), (3, 4));
        assert_eq!(wrong_color.rejection(), Some(RejectReason::NotYourTurn));

        // A pawn cannot advance three squares
        let illegal = play(&mut game, (6, 4), (3, 4));
        assert_eq!(illegal.rejection(), Some(RejectReason::IllegalMove));

        // A rook cannot travel a non-prime distance, even on an open file
        assert_applied(&mut game, (6, 0), (4, 0));
        assert_applied(&mut game, (1, 4), (3, 4));
        let non_prime = play(&mut game, (7, 0), (6, 0));
        assert_eq!(non_prime.rejection(), Some(RejectReason::IllegalMove));
        // ...but a prime distance on that same file is fine
        let prime = play(&mut game, (7, 0), (5, 0));
        assert!(prime.applied());

        // Rejections leave the session untouched
        assert_eq!(game.move_history().len(), 3);
    }

    #[test]
    fn test_missing_king_is_an_error() {
        let mut board = Board::new();
        board.place(Piece::new(Color::White, PieceKind::Pawn), Square::new(6, 0));
        board.place(Piece::new(Color::Black, PieceKind::King), Square::new(0, 4));

        let mut game = Game::from_position(board, Color::White);
        assert!(game
            .submit_move(Square::new(6, 0), Square::new(5, 0))
            .is_err());
    }

    #[test]
    fn test_en_passant_capture_and_expiry() {
        let mut game = Game::new();
        assert_applied(&mut game, (6, 4), (4, 4)); // e4
        assert_applied(&mut game, (1, 3), (3, 3)); // d5
        assert_eq!(game.en_passant(), Some(Square::new(2, 3)));

        assert_applied(&mut game, (4, 4), (3, 4)); // e5
        // The target expired after one reply; white did not use it
        assert_eq!(game.en_passant(), None);

        assert_applied(&mut game, (1, 5), (3, 5)); // f5
        assert_eq!(game.en_passant(), Some(Square::new(2, 5)));

        // exf6, en passant: the captured pawn is behind the destination
        assert_applied(&mut game, (3, 4), (2, 5));
        assert!(!game.board().has(Square::new(3, 5)));
        assert_eq!(
            game.board().kind_at(Square::new(2, 5)),
            Some(PieceKind::Pawn)
        );
        assert!(game.move_history().last().unwrap().is_en_passant());
    }

    #[test]
    fn test_castling_moves_both_pieces() {
        let mut board = Board::new();
        board.place(Piece::new(Color::White, PieceKind::King), Square::new(7, 4));
        board.place(Piece::new(Color::White, PieceKind::Rook), Square::new(7, 7));
        board.place(Piece::new(Color::Black, PieceKind::King), Square::new(0, 4));

        let mut game = Game::from_position(board, Color::White);
        assert_applied(&mut game, (7, 4), (7, 6));

        let king = game.board().piece_at(Square::new(7, 6)).unwrap();
        let rook = game.board().piece_at(Square::new(7, 5)).unwrap();
        assert!(king.is_king() && king.has_moved());
        assert!(rook.is_rook() && rook.has_moved());
        assert!(!game.board().has(Square::new(7, 4)));
        assert!(!game.board().has(Square::new(7, 7)));
        assert!(game.move_history().last().unwrap().is_short_castle());
    }

    #[test]
    fn test_promotion_is_deferred_until_resolved() {
        let mut board = Board::new();
        board.place(Piece::new(Color::White, PieceKind::Pawn), Square::new(1, 0));
        board.place(Piece::new(Color::White, PieceKind::King), Square::new(7, 4));
        board.place(Piece::new(Color::Black, PieceKind::King), Square::new(2, 7));
        let mut game = Game::from_position(board, Color::White);

        let outcome = play(&mut game, (1, 0), (0, 0));
        assert!(outcome.pending_promotion());

        // Nothing has happened yet: pawn in place, turn unchanged
        assert_eq!(
            game.board().kind_at(Square::new(1, 0)),
            Some(PieceKind::Pawn)
        );
        assert!(!game.board().has(Square::new(0, 0)));
        assert_eq!(game.side_to_move(), Color::White);
        assert!(game.move_history().is_empty());

        // Every other submission is refused while the choice is open
        let blocked = play(&mut game, (7, 4), (7, 5));
        assert_eq!(blocked.rejection(), Some(RejectReason::PromotionPending));

        // Pawns and kings are not valid replacements
        for bad in [PieceKind::Pawn, PieceKind::King] {
            let refused = game.resolve_promotion(bad).unwrap();
            assert_eq!(
                refused.rejection(),
                Some(RejectReason::InvalidPromotionChoice)
            );
            assert!(game.awaiting_promotion().is_some());
        }

        let resolved = game.resolve_promotion(PieceKind::Queen).unwrap();
        assert!(resolved.applied());
        let queen = game.board().piece_at(Square::new(0, 0)).unwrap();
        assert_eq!(queen.kind(), PieceKind::Queen);
        assert!(queen.has_moved());
        assert!(!game.board().has(Square::new(1, 0)));
        assert_eq!(game.side_to_move(), Color::Black);
        assert_eq!(
            game.move_history().last().unwrap().promotion(),
            Some(PieceKind::Queen)
        );

        // Resolving twice is refused
        let again = game.resolve_promotion(PieceKind::Queen).unwrap();
        assert_eq!(again.rejection(), Some(RejectReason::NoPromotionPending));
    }

    #[test]
    fn test_promotion_capture_replaces_defender() {
        let mut board = Board::new();
        board.place(Piece::new(Color::White, PieceKind::Pawn), Square::new(1, 0));
        board.place(Piece::new(Color::Black, PieceKind::Knight), Square::new(0, 1));
        board.place(Piece::new(Color::White, PieceKind::King), Square::new(7, 4));
        board.place(Piece::new(Color::Black, PieceKind::King), Square::new(2, 7));
        let mut game = Game::from_position(board, Color::White);

        let outcome = play(&mut game, (1, 0), (0, 1));
        assert!(outcome.pending_promotion());
        // The knight survives until the choice lands
        assert_eq!(
            game.board().kind_at(Square::new(0, 1)),
            Some(PieceKind::Knight)
        );

        game.resolve_promotion(PieceKind::Rook).unwrap();
        let rook = game.board().piece_at(Square::new(0, 1)).unwrap();
        assert_eq!(rook.kind(), PieceKind::Rook);
        assert_eq!(rook.color(), Color::White);
    }

    #[test]
    fn test_scholars_mate_ends_the_game() {
        let mut game = Game::new();
        assert_applied(&mut game, (6, 4), (4, 4)); // e4
        assert_applied(&mut game, (1, 4), (3, 4)); // e5
        assert_applied(&mut game, (7, 5), (4, 2)); // Bc4
        assert_applied(&mut game, (0, 1), (2, 2)); // Nc6
        assert_applied(&mut game, (7, 3), (3, 7)); // Qh5
        assert_applied(&mut game, (0, 6), (2, 5)); // Nf6

        let outcome = play(&mut game, (3, 7), (1, 5)); // Qxf7#
        assert_eq!(
            outcome.terminal(),
            Some(GameResult::Checkmate {
                winner: Color::White
            })
        );
        assert!(game.is_game_over());
        assert!(game.is_in_check(Color::Black));

        // Once the game has ended, everything is refused
        let refused = play(&mut game, (0, 4), (1, 5));
        assert_eq!(refused.rejection(), Some(RejectReason::GameOver));
        let refused = game.resolve_promotion(PieceKind::Queen).unwrap();
        assert_eq!(refused.rejection(), Some(RejectReason::GameOver));
    }

    #[test]
    fn test_back_rank_mate_with_supported_queen() {
        let mut board = Board::new();
        board.place(Piece::new(Color::White, PieceKind::King), Square::new(7, 4));
        board.place(Piece::new(Color::Black, PieceKind::Queen), Square::new(6, 1));
        board.place(Piece::new(Color::Black, PieceKind::Knight), Square::new(4, 3));
        board.place(Piece::new(Color::Black, PieceKind::King), Square::new(0, 4));
        let mut game = Game::from_position(board, Color::Black);

        // Qe2: adjacent to the king and defended by the knight on d4
        let outcome = play(&mut game, (6, 1), (6, 4));
        assert_eq!(
            outcome.terminal(),
            Some(GameResult::Checkmate {
                winner: Color::Black
            })
        );
    }

    #[test]
    fn test_undefended_adjacent_queen_is_not_mate() {
        // Lone king on e1 facing a queen on d2 and a rook on f1. The queen
        // gives check but nothing defends her, and the rook bears on neither
        // d2 nor a defending line, so Kxd2 is a legal reply and the position
        // is not checkmate.
        let mut board = Board::new();
        board.place(Piece::new(Color::White, PieceKind::King), Square::new(7, 4));
        board.place(Piece::new(Color::Black, PieceKind::Queen), Square::new(6, 3));
        board.place(Piece::new(Color::Black, PieceKind::Rook), Square::new(7, 5));
        board.place(Piece::new(Color::Black, PieceKind::King), Square::new(0, 4));
        let mut game = Game::from_position(board, Color::White);

        assert!(game.is_in_check(Color::White));
        assert!(!game.is_game_over());

        let outcome = play(&mut game, (7, 4), (6, 3)); // Kxd2
        assert!(outcome.applied());
        assert_eq!(outcome.terminal(), None);
        assert_eq!(
            game.board().kind_at(Square::new(6, 3)),
            Some(PieceKind::King)
        );
    }

    #[test]
    fn test_stalemate_when_no_move_and_no_check() {
        let mut board = Board::new();
        board.place(Piece::new(Color::Black, PieceKind::King), Square::new(0, 0));
        board.place(Piece::new(Color::White, PieceKind::Queen), Square::new(2, 7));
        board.place(Piece::new(Color::White, PieceKind::King), Square::new(7, 7));
        let mut game = Game::from_position(board, Color::White);

        // Qb6 boxes the cornered king without checking it
        let outcome = play(&mut game, (2, 7), (2, 1));
        assert_eq!(outcome.terminal(), Some(GameResult::Stalemate));
        assert!(!game.is_in_check(Color::Black));
    }

    #[test]
    fn test_threefold_repetition() {
        let mut game = Game::new();
        // Two full knight shuttles recreate the starting placement twice over
        for _ in 0..2 {
            assert_applied(&mut game, (7, 6), (5, 5)); // Nf3
            assert_applied(&mut game, (0, 6), (2, 5)); // Nf6
            assert_applied(&mut game, (5, 5), (7, 6)); // Ng1
            assert_applied(&mut game, (2, 5), (0, 6)); // Ng8
        }
        assert_eq!(game.result(), Some(GameResult::ThreefoldRepetition));
    }

    #[test]
    fn test_fifty_move_clock_counts_and_resets() {
        let mut game = Game::new();
        assert_applied(&mut game, (7, 6), (5, 5)); // Nf3
        assert_eq!(game.snapshot().fifty_move_clock, 1);
        assert_applied(&mut game, (0, 1), (2, 2)); // Nc6
        assert_eq!(game.snapshot().fifty_move_clock, 2);

        // A pawn move resets the clock
        assert_applied(&mut game, (6, 4), (4, 4)); // e4
        assert_eq!(game.snapshot().fifty_move_clock, 0);
    }

    #[test]
    fn test_fifty_move_rule_ends_the_game() {
        let mut game = Game::new();
        game.fifty_move_clock = 49;

        let outcome = play(&mut game, (7, 6), (5, 5)); // a quiet knight move
        assert_eq!(outcome.terminal(), Some(GameResult::FiftyMoveRule));
        assert!(game.is_game_over());
    }

    #[test]
    fn test_capture_resets_fifty_move_clock() {
        let mut game = Game::new();
        assert_applied(&mut game, (6, 4), (4, 4)); // e4
        assert_applied(&mut game, (1, 3), (3, 3)); // d5
        assert_applied(&mut game, (7, 6), (5, 5)); // Nf3
        assert_applied(&mut game, (3, 3), (4, 4)); // dxe4
        assert_applied(&mut game, (5, 5), (4, 3)); // Nd4
        assert_eq!(game.snapshot().fifty_move_clock, 1);
        assert_applied(&mut game, (0, 1), (2, 2)); // Nc6
        assert_eq!(game.snapshot().fifty_move_clock, 2);

        // Nxc6: a capture by a non-pawn resets the clock
        assert_applied(&mut game, (4, 3), (2, 2));
        let last = *game.move_history().last().unwrap();
        assert_eq!(last.piece().kind(), PieceKind::Knight);
        assert_eq!(game.snapshot().fifty_move_clock, 0);
        assert!(!game.is_game_over());
    }

    #[test]
    fn test_reset_restores_initial_state() {
        let mut game = Game::new();
        assert_applied(&mut game, (6, 4), (4, 4));
        assert_applied(&mut game, (1, 4), (3, 4));

        game.reset();
        assert_eq!(game.side_to_move(), Color::White);
        assert!(game.move_history().is_empty());
        assert_eq!(game.snapshot().board_history.len(), 1);
        assert_eq!(*game.board(), Board::starting_position());
    }

    #[test]
    fn test_cannot_leave_own_king_in_check() {
        let mut game = Game::new();
        assert_applied(&mut game, (6, 4), (4, 4)); // e4
        assert_applied(&mut game, (1, 4), (3, 4)); // e5
        assert_applied(&mut game, (7, 3), (3, 7)); // Qh5, eyeing e8 through f7
        // f6?? would open the diagonal to the black king
        let pinned = play(&mut game, (1, 5), (2, 5));
        assert_eq!(pinned.rejection(), Some(RejectReason::IllegalMove));
    }
}
