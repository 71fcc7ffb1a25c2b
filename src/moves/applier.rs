//! The Move Applier (§4.5): deterministically advances a `Position`
//! given a `ResolvedMove`. Never mutates its input — this follows a
//! "return a new value" pattern at the `Position` level rather than the
//! whole-tree clone-per-candidate approach some reference engines use
//! (§9's design note).

use super::expander::expand;
use super::generator::generate;
use super::resolved_move::{PortalChoice, ResolvedMove};
use crate::boards::CastleSide;
use crate::error::CoreError;
use crate::pieces::{Color, PieceKind};
use crate::portal::PortalNetworkKind;
use crate::position::Position;
use crate::square::Square;

fn rook_home_right(square: Square) -> Option<(Color, CastleSide)> {
    match (square.file(), square.rank()) {
        (0, 0) => Some((Color::White, CastleSide::Queen)),
        (7, 0) => Some((Color::White, CastleSide::King)),
        (0, 7) => Some((Color::Black, CastleSide::Queen)),
        (7, 7) => Some((Color::Black, CastleSide::King)),
        _ => None,
    }
}

/// Validates `resolved` against the legal-outcome set the generator and
/// expander produce from `resolved.from()`, then advances `position`.
/// Returns `CoreError::UnmatchableMove` if no such outcome exists (§7).
pub fn apply(position: &Position, resolved: ResolvedMove) -> Result<Position, CoreError> {
    let origin = resolved.from();
    let matches = generate(position, origin)
        .into_iter()
        .flat_map(|base| expand(position, base))
        .any(|candidate| candidate == resolved);
    if !matches {
        return Err(CoreError::UnmatchableMove);
    }

    Ok(apply_unchecked(position, resolved))
}

fn apply_unchecked(position: &Position, resolved: ResolvedMove) -> Position {
    let mut next = position.clone();
    let mover_color = position.side_to_move;
    next.en_passant_target = None;

    let origin = resolved.from();
    let mut reset_halfmove = false;

    match resolved.kind() {
        super::base_move::BaseMoveKind::Castle => {
            let side = resolved.castle_side().expect("castle move carries a side");
            let rank = origin.rank();
            let king_to = resolved.to_final;
            next.board.clear_square(origin);
            next.board.place(mover_color, PieceKind::King, king_to);
            let (rook_from, rook_to) = match side {
                CastleSide::King => (Square::new(7, rank), Square::new(5, rank)),
                CastleSide::Queen => (Square::new(0, rank), Square::new(3, rank)),
            };
            next.board.clear_square(rook_from);
            next.board.place(mover_color, PieceKind::Rook, rook_to);
            next.castle_rights.clear_color(mover_color);
        }
        super::base_move::BaseMoveKind::Promotion => {
            let promo = resolved.promotion_kind().expect("promotion move carries a kind");
            clear_captured_rook_right(&mut next, resolved.to_final);
            next.board.clear_square(origin);
            next.board.place(mover_color, promo, resolved.to_final);
            reset_halfmove = true;
        }
        _ => {
            let is_capture = position.board.color_at(resolved.to_final) == Some(mover_color.opposite());
            if is_capture {
                clear_captured_rook_right(&mut next, resolved.to_final);
                next.board.clear_square(resolved.to_final);
                reset_halfmove = true;
            }
            next.board.clear_square(origin);

            match resolved.via_portal {
                Some(via) if via.swapped => {
                    next.board.place(mover_color, moved_piece_kind(position, origin), resolved.to_final);
                    next.board.place(mover_color.opposite(), captured_kind_before_swap(position, resolved.to_final), via.entry);
                }
                _ => {
                    next.board.place(mover_color, moved_piece_kind(position, origin), resolved.to_final);
                }
            }
        }
    }

    if moved_piece_kind(position, origin) == PieceKind::Pawn {
        reset_halfmove = true;
    }

    if moved_piece_kind(position, origin) == PieceKind::King {
        next.castle_rights.clear_color(mover_color);
    }
    if let Some((color, side)) = rook_home_right(origin) {
        next.castle_rights.clear_side(color, side);
    }

    if let Some(via) = resolved.via_portal {
        if via.swapped && via.network == PortalNetworkKind::Neutral {
            next.neutral_swap_cooldowns.set(mover_color.opposite(), true);
        }
        if via.network == PortalNetworkKind::Exclusive && via.choice != PortalChoice::Stay {
            next.pending_personal_no_return
                .insert(mover_color, resolved.to_final, via.entry);
        }
    }

    next.neutral_swap_cooldowns.set(mover_color, false);
    next.personal_no_return.clear(mover_color);

    next.side_to_move = mover_color.opposite();
    if next.side_to_move == Color::White {
        next.move_number += 1;
    }
    next.history.push(resolved);

    if reset_halfmove {
        next.halfmove_clock = 0;
    } else {
        next.halfmove_clock += 1;
    }

    let new_side = next.side_to_move;
    if !next.pending_personal_no_return.is_empty_for(new_side) {
        let mut pending = next.pending_personal_no_return.clone();
        next.personal_no_return.promote_from(new_side, &mut pending);
        next.pending_personal_no_return = pending;
    }

    next
}

fn clear_captured_rook_right(position: &mut Position, captured_square: Square) {
    if let Some((color, side)) = rook_home_right(captured_square) {
        position.castle_rights.clear_side(color, side);
    }
}

fn moved_piece_kind(position: &Position, origin: Square) -> PieceKind {
    position
        .board
        .piece_at(origin)
        .map(|p| p.kind)
        .expect("origin holds the mover before it is cleared")
}

fn captured_kind_before_swap(position: &Position, square: Square) -> PieceKind {
    position
        .board
        .piece_at(square)
        .map(|p| p.kind)
        .expect("swap destination holds the displaced piece before it is cleared")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::moves::base_move::BaseMove;
    use crate::moves::resolved_move::ResolvedMove;

    #[test]
    fn s1_applying_e2e4_switches_turn() {
        let position = Position::initial();
        let e2 = Square::parse("E2").unwrap();
        let e4 = Square::parse("E4").unwrap();
        let resolved = ResolvedMove {
            base: BaseMove::new(e2, e4, super::super::base_move::BaseMoveKind::Move),
            to_final: e4,
            via_portal: None,
        };
        let next = apply(&position, resolved).unwrap();
        assert_eq!(next.side_to_move, Color::Black);
        assert!(next.board.piece_at(e4).is_some());
        assert!(next.board.piece_at(e2).is_none());
    }

    #[test]
    fn unmatchable_move_is_rejected() {
        let position = Position::initial();
        let a2 = Square::parse("A2").unwrap();
        let a5 = Square::parse("A5").unwrap();
        let bogus = ResolvedMove {
            base: BaseMove::new(a2, a5, super::super::base_move::BaseMoveKind::Move),
            to_final: a5,
            via_portal: None,
        };
        assert!(apply(&position, bogus).is_err());
    }
}
