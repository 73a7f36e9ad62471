//! The engine boundary: an owning [`Game`] value that applies validated
//! moves, runs the two-phase promotion flow and reports the game status.

use crate::attack;
use crate::board::Board;
use crate::moves::Move;
use crate::rules::{self, MoveList};
use crate::status::{self, GameStatus};
use lynxchess_base::geometry;
use lynxchess_base::types::{Color, File, Piece, PieceKind, Promotion, Square};

use thiserror::Error;

/// Error returned by the mutating entry points.
///
/// Every rejection leaves the game state exactly as it was.
#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum MoveError {
    /// The proposed move does not pass [`rules::is_valid_move`].
    #[error("illegal move {0}")]
    Illegal(Move),
    /// A promotion is pending; resolve or cancel it first.
    #[error("promotion is pending")]
    PromotionPending,
    /// `resolve_promotion`/`cancel_promotion` called with nothing pending.
    #[error("no promotion is pending")]
    NoPendingPromotion,
}

/// Outcome of a successfully accepted move.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum MoveOutcome {
    /// The move has been fully applied and the turn has passed.
    Completed,
    /// A pawn reached its promotion rank; the game is suspended until the
    /// caller picks a piece or cancels. See [`Game::resolve_promotion`].
    PromotionPending,
}

/// A pawn waiting on the caller's promotion choice.
///
/// While pending, the pawn stands on no square: the origin is already
/// vacated and the destination still holds whatever occupied it before (the
/// capture happens at the moment of confirmation).
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct PendingPromotion {
    /// The pawn as it stood on `from`, `has_moved` included.
    pub piece: Piece,
    pub from: Square,
    pub to: Square,
}

/// A single chess game: the board plus the promotion state machine.
///
/// All mutation goes through [`Game::try_move`], which re-validates
/// internally; an unvalidated or illegal proposal is rejected and the state
/// stays untouched.
#[derive(Debug, Clone)]
pub struct Game {
    board: Board,
    pending: Option<PendingPromotion>,
}

impl Game {
    /// Starts a new game: standard initial position, White to move.
    pub fn new() -> Game {
        Game {
            board: Board::initial(),
            pending: None,
        }
    }

    /// Wraps an arbitrary position, e.g. one built with [`Board::put2`].
    pub fn from_board(board: Board) -> Game {
        Game {
            board,
            pending: None,
        }
    }

    /// Abandons the current game and starts over from the initial position.
    pub fn reset(&mut self) {
        *self = Game::new();
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[inline]
    pub fn side_to_move(&self) -> Color {
        self.board.side()
    }

    #[inline]
    pub fn pending_promotion(&self) -> Option<&PendingPromotion> {
        self.pending.as_ref()
    }

    /// Returns `true` if the proposed move would be accepted right now.
    ///
    /// Always `false` while a promotion is pending.
    pub fn is_valid_move(&self, from: Square, to: Square) -> bool {
        self.pending.is_none() && rules::is_valid_move(&self.board, from, to)
    }

    /// Every legal move of the side to move; empty while a promotion is
    /// pending.
    pub fn legal_moves(&self) -> MoveList {
        match self.pending {
            Some(_) => MoveList::new(),
            None => rules::legal_moves(&self.board),
        }
    }

    /// Every legal move of the piece on `from`; empty while a promotion is
    /// pending.
    pub fn legal_moves_from(&self, from: Square) -> MoveList {
        match self.pending {
            Some(_) => MoveList::new(),
            None => rules::legal_moves_from(&self.board, from),
        }
    }

    pub fn king_in_check(&self, color: Color) -> bool {
        attack::king_in_check(&self.board, color)
    }

    /// Classifies the position for the side to move. While a promotion is
    /// pending the game is suspended and reported as ongoing.
    pub fn status(&self) -> GameStatus {
        match self.pending {
            Some(_) => GameStatus::Ongoing,
            None => status::evaluate(&self.board),
        }
    }

    /// Validates and applies a move for the side to move.
    ///
    /// On `Ok(MoveOutcome::Completed)` the turn has passed to the opponent.
    /// On `Ok(MoveOutcome::PromotionPending)` the game is suspended until
    /// [`Game::resolve_promotion`] or [`Game::cancel_promotion`] is called;
    /// the turn does not advance in the meantime.
    pub fn try_move(&mut self, from: Square, to: Square) -> Result<MoveOutcome, MoveError> {
        if self.pending.is_some() {
            return Err(MoveError::PromotionPending);
        }
        if !rules::is_valid_move(&self.board, from, to) {
            return Err(MoveError::Illegal(Move::new(from, to)));
        }
        let piece = match self.board.get(from) {
            Some(p) => p,
            None => return Err(MoveError::Illegal(Move::new(from, to))),
        };

        self.board.put(from, None);

        // a pawn reaching the far rank suspends the move; placement, any
        // capture and the turn switch all wait for the caller's choice
        if piece.kind == PieceKind::Pawn && to.rank() == geometry::promotion_rank(piece.color) {
            self.pending = Some(PendingPromotion { piece, from, to });
            return Ok(MoveOutcome::PromotionPending);
        }

        let (df, dr) = rules::deltas(from, to);

        // castling drags the rook along and marks it as moved
        if piece.kind == PieceKind::King && df.abs() == 2 {
            let (rook_from, rook_to) = if df > 0 {
                (File::H, File::F)
            } else {
                (File::A, File::D)
            };
            let rook_from = Square::from_parts(rook_from, from.rank());
            let rook_to = Square::from_parts(rook_to, from.rank());
            if let Some(rook) = self.board.get(rook_from) {
                self.board.put(rook_from, None);
                self.board.put(
                    rook_to,
                    Some(Piece {
                        has_moved: true,
                        ..rook
                    }),
                );
            }
        }

        // en passant: the victim sits on the square the capturer passed
        // over, one rank behind the destination
        if piece.kind == PieceKind::Pawn && self.board.ep_target() == Some(to) {
            let victim = Square::from_parts(to.file(), geometry::ep_victim_rank(piece.color));
            self.board.put(victim, None);
        }

        // recompute the en-passant window, exactly once per move
        self.board.set_ep_target(if piece.kind == PieceKind::Pawn && dr.abs() == 2 {
            Some(Square::from_parts(
                from.file(),
                geometry::ep_target_rank(piece.color),
            ))
        } else {
            None
        });

        // capture by replacement, then mark the mover as moved
        self.board.put(
            to,
            Some(Piece {
                has_moved: true,
                ..piece
            }),
        );
        self.board.set_side(piece.color.opposite());
        Ok(MoveOutcome::Completed)
    }

    /// Confirms a pending promotion: a piece of the chosen kind and the
    /// pawn's color lands on the destination (capturing any occupant) and
    /// the turn passes to the opponent.
    pub fn resolve_promotion(&mut self, choice: Promotion) -> Result<(), MoveError> {
        let pending = match self.pending.take() {
            Some(p) => p,
            None => return Err(MoveError::NoPendingPromotion),
        };
        let color = pending.piece.color;
        self.board.put(
            pending.to,
            Some(Piece {
                color,
                kind: choice.kind(),
                has_moved: true,
            }),
        );
        // a promotion push is never a double step
        self.board.set_ep_target(None);
        self.board.set_side(color.opposite());
        Ok(())
    }

    /// Abandons a pending promotion: the pawn returns to its origin exactly
    /// as it was and the turn does not pass. The move never happened.
    pub fn cancel_promotion(&mut self) -> Result<(), MoveError> {
        let pending = match self.pending.take() {
            Some(p) => p,
            None => return Err(MoveError::NoPendingPromotion),
        };
        self.board.put(pending.from, Some(pending.piece));
        Ok(())
    }
}

impl Default for Game {
    fn default() -> Game {
        Game::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(s: &str) -> Square {
        s.parse().unwrap()
    }

    fn put(b: &mut Board, s: &str, color: Color, kind: PieceKind) {
        b.put(sq(s), Some(Piece::new(color, kind)));
    }

    fn mv(game: &mut Game, m: &str) {
        let m: Move = m.parse().unwrap();
        assert_eq!(game.try_move(m.from, m.to), Ok(MoveOutcome::Completed), "{}", m);
    }

    #[test]
    fn test_simple_moves_pass_the_turn() {
        let mut game = Game::new();
        assert_eq!(game.side_to_move(), Color::White);
        mv(&mut game, "e2e4");
        assert_eq!(game.side_to_move(), Color::Black);
        assert_eq!(game.board().get(sq("e2")), None);
        let pawn = game.board().get(sq("e4")).unwrap();
        assert!(pawn.has_moved);
        mv(&mut game, "e7e5");
        assert_eq!(game.side_to_move(), Color::White);
    }

    #[test]
    fn test_illegal_move_leaves_state_unchanged() {
        let mut game = Game::new();
        let before = game.board().clone();
        for _ in 0..3 {
            assert_eq!(
                game.try_move(sq("e2"), sq("e5")),
                Err(MoveError::Illegal(Move::new(sq("e2"), sq("e5"))))
            );
        }
        assert_eq!(game.board(), &before);
        assert_eq!(game.side_to_move(), Color::White);
    }

    #[test]
    fn test_double_step_opens_ep_window() {
        let mut game = Game::new();
        mv(&mut game, "e2e4");
        assert_eq!(game.board().ep_target(), Some(sq("e3")));
        mv(&mut game, "d7d5");
        assert_eq!(game.board().ep_target(), Some(sq("d6")));
        // a single step closes it
        mv(&mut game, "g1f3");
        assert_eq!(game.board().ep_target(), None);
    }

    #[test]
    fn test_en_passant_canonical_scenario() {
        // e2-e4, black elsewhere, e4-e5, d7-d5, e5xd6 removes the d5 pawn
        let mut game = Game::new();
        mv(&mut game, "e2e4");
        mv(&mut game, "g8f6");
        mv(&mut game, "e4e5");
        mv(&mut game, "d7d5");
        assert_eq!(game.board().ep_target(), Some(sq("d6")));
        mv(&mut game, "e5d6");
        assert_eq!(game.board().get(sq("d5")), None);
        let pawn = game.board().get(sq("d6")).unwrap();
        assert_eq!(pawn.color, Color::White);
        assert_eq!(pawn.kind, PieceKind::Pawn);
        assert_eq!(game.board().ep_target(), None);
    }

    #[test]
    fn test_ep_window_lasts_one_move() {
        let mut game = Game::new();
        mv(&mut game, "e2e4");
        mv(&mut game, "g8f6");
        mv(&mut game, "e4e5");
        mv(&mut game, "d7d5");
        // white declines the capture; the window is gone for good
        mv(&mut game, "b1c3");
        mv(&mut game, "f6g8");
        assert_eq!(game.board().ep_target(), None);
        assert!(!game.is_valid_move(sq("e5"), sq("d6")));
    }

    #[test]
    fn test_en_passant_by_black() {
        let mut b = Board::empty();
        put(&mut b, "e1", Color::White, PieceKind::King);
        put(&mut b, "e8", Color::Black, PieceKind::King);
        put(&mut b, "d2", Color::White, PieceKind::Pawn);
        put(&mut b, "e4", Color::Black, PieceKind::Pawn);
        let mut game = Game::from_board(b);
        mv(&mut game, "d2d4");
        assert_eq!(game.board().ep_target(), Some(sq("d3")));
        mv(&mut game, "e4d3");
        // the victim stood on the passed-over square's file, rank 4
        assert_eq!(game.board().get(sq("d4")), None);
        assert_eq!(
            game.board().get(sq("d3")).map(|p| (p.color, p.kind)),
            Some((Color::Black, PieceKind::Pawn))
        );
    }

    #[test]
    fn test_kingside_castling_moves_both_pieces() {
        let mut game = Game::new();
        mv(&mut game, "g1f3");
        mv(&mut game, "g8f6");
        mv(&mut game, "e2e3");
        mv(&mut game, "e7e6");
        mv(&mut game, "f1e2");
        mv(&mut game, "f8e7");
        mv(&mut game, "e1g1");
        let king = game.board().get(sq("g1")).unwrap();
        let rook = game.board().get(sq("f1")).unwrap();
        assert_eq!(king.kind, PieceKind::King);
        assert!(king.has_moved);
        assert_eq!(rook.kind, PieceKind::Rook);
        assert!(rook.has_moved);
        assert_eq!(game.board().get(sq("e1")), None);
        assert_eq!(game.board().get(sq("h1")), None);
        // black can still castle too
        assert!(game.is_valid_move(sq("e8"), sq("g8")));
    }

    #[test]
    fn test_queenside_castling() {
        let mut b = Board::empty();
        put(&mut b, "e1", Color::White, PieceKind::King);
        put(&mut b, "a1", Color::White, PieceKind::Rook);
        put(&mut b, "e8", Color::Black, PieceKind::King);
        let mut game = Game::from_board(b);
        mv(&mut game, "e1c1");
        assert_eq!(game.board().get(sq("c1")).unwrap().kind, PieceKind::King);
        assert_eq!(game.board().get(sq("d1")).unwrap().kind, PieceKind::Rook);
        assert_eq!(game.board().get(sq("a1")), None);
    }

    #[test]
    fn test_castling_rights_die_with_the_rook_move() {
        let mut game = Game::new();
        mv(&mut game, "g1f3");
        mv(&mut game, "g8f6");
        mv(&mut game, "e2e3");
        mv(&mut game, "e7e6");
        mv(&mut game, "f1e2");
        mv(&mut game, "f8e7");
        mv(&mut game, "h1g1");
        mv(&mut game, "a7a6");
        mv(&mut game, "g1h1");
        mv(&mut game, "a6a5");
        // the rook is back home but has_moved sticks
        assert!(!game.is_valid_move(sq("e1"), sq("g1")));
    }

    #[test]
    fn test_promotion_confirm() {
        let mut b = Board::empty();
        put(&mut b, "e1", Color::White, PieceKind::King);
        put(&mut b, "e8", Color::Black, PieceKind::King);
        put(&mut b, "a7", Color::White, PieceKind::Pawn);
        let mut game = Game::from_board(b);
        assert_eq!(
            game.try_move(sq("a7"), sq("a8")),
            Ok(MoveOutcome::PromotionPending)
        );
        // suspended: pawn is off the board, turn has not passed
        assert_eq!(game.board().get(sq("a7")), None);
        assert_eq!(game.board().get(sq("a8")), None);
        assert_eq!(game.side_to_move(), Color::White);
        assert_eq!(game.status(), GameStatus::Ongoing);
        let pending = game.pending_promotion().unwrap();
        assert_eq!((pending.from, pending.to), (sq("a7"), sq("a8")));

        assert_eq!(game.resolve_promotion(Promotion::Queen), Ok(()));
        let queen = game.board().get(sq("a8")).unwrap();
        assert_eq!(queen.kind, PieceKind::Queen);
        assert_eq!(queen.color, Color::White);
        assert!(queen.has_moved);
        assert_eq!(game.side_to_move(), Color::Black);
        assert_eq!(game.pending_promotion(), None);
    }

    #[test]
    fn test_promotion_cancel_restores_the_pawn() {
        let mut b = Board::empty();
        put(&mut b, "e1", Color::White, PieceKind::King);
        put(&mut b, "e8", Color::Black, PieceKind::King);
        put(&mut b, "a7", Color::White, PieceKind::Pawn);
        let mut game = Game::from_board(b);
        let before = game.board().clone();
        assert_eq!(
            game.try_move(sq("a7"), sq("a8")),
            Ok(MoveOutcome::PromotionPending)
        );
        assert_eq!(game.cancel_promotion(), Ok(()));
        assert_eq!(game.board(), &before);
        assert_eq!(game.side_to_move(), Color::White);
        // the pawn never moved, so has_moved is still false
        assert!(!game.board().get(sq("a7")).unwrap().has_moved);
    }

    #[test]
    fn test_capture_promotion_defers_the_capture() {
        let mut b = Board::empty();
        put(&mut b, "e1", Color::White, PieceKind::King);
        put(&mut b, "e8", Color::Black, PieceKind::King);
        put(&mut b, "b7", Color::White, PieceKind::Pawn);
        put(&mut b, "a8", Color::Black, PieceKind::Rook);
        let mut game = Game::from_board(b);
        assert_eq!(
            game.try_move(sq("b7"), sq("a8")),
            Ok(MoveOutcome::PromotionPending)
        );
        // the rook is captured only once the choice is made
        assert_eq!(game.board().get(sq("a8")).unwrap().kind, PieceKind::Rook);
        assert_eq!(game.resolve_promotion(Promotion::Knight), Ok(()));
        assert_eq!(game.board().get(sq("a8")).unwrap().kind, PieceKind::Knight);
    }

    #[test]
    fn test_no_moves_while_promotion_pending() {
        let mut b = Board::empty();
        put(&mut b, "e1", Color::White, PieceKind::King);
        put(&mut b, "e8", Color::Black, PieceKind::King);
        put(&mut b, "a7", Color::White, PieceKind::Pawn);
        let mut game = Game::from_board(b);
        game.try_move(sq("a7"), sq("a8")).unwrap();
        assert!(!game.is_valid_move(sq("e1"), sq("e2")));
        assert!(game.legal_moves().is_empty());
        assert_eq!(
            game.try_move(sq("e1"), sq("e2")),
            Err(MoveError::PromotionPending)
        );
    }

    #[test]
    fn test_promotion_resolution_needs_a_pending_one() {
        let mut game = Game::new();
        assert_eq!(
            game.resolve_promotion(Promotion::Queen),
            Err(MoveError::NoPendingPromotion)
        );
        assert_eq!(game.cancel_promotion(), Err(MoveError::NoPendingPromotion));
    }

    #[test]
    fn test_fools_mate() {
        let mut game = Game::new();
        mv(&mut game, "f2f3");
        mv(&mut game, "e7e5");
        mv(&mut game, "g2g4");
        mv(&mut game, "d8h4");
        assert!(game.king_in_check(Color::White));
        assert_eq!(
            game.status(),
            GameStatus::Checkmate {
                winner: Color::Black
            }
        );
        // no move is accepted in a finished position
        assert!(game.legal_moves().is_empty());
        assert_eq!(
            game.try_move(sq("e2"), sq("e3")),
            Err(MoveError::Illegal(Move::new(sq("e2"), sq("e3"))))
        );
    }

    #[test]
    fn test_reset() {
        let mut game = Game::new();
        mv(&mut game, "e2e4");
        mv(&mut game, "e7e5");
        game.reset();
        assert_eq!(game.board(), &Board::initial());
        assert_eq!(game.side_to_move(), Color::White);
    }

    #[test]
    fn test_random_walk_never_leaves_king_exposed() {
        use rand::rngs::StdRng;
        use rand::{Rng, SeedableRng};

        let mut rng = StdRng::seed_from_u64(0x11ce);
        let mut game = Game::new();
        for _ in 0..120 {
            if game.status() != GameStatus::Ongoing {
                break;
            }
            let moves = game.legal_moves();
            assert!(!moves.is_empty());
            let m = moves[rng.gen_range(0..moves.len())];
            let mover = game.side_to_move();
            match game.try_move(m.from, m.to).unwrap() {
                MoveOutcome::Completed => {}
                MoveOutcome::PromotionPending => {
                    let choice = Promotion::ALL[rng.gen_range(0..4)];
                    game.resolve_promotion(choice).unwrap();
                }
            }
            // the absolute invariant: a completed move never leaves the
            // mover's own king in check
            assert!(!game.king_in_check(mover));
            if let Some(ep) = game.board().ep_target() {
                assert_eq!(ep.rank(), geometry::ep_target_rank(mover));
            }
        }
    }
}
