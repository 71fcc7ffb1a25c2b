//! The Check-Legality Filter (§4.4): keeps only resolved outcomes that
//! do not leave the mover in check. `in_check` is deliberately defined
//! via the full generator + expander, unlike the Attack Oracle, and is
//! used only here — never for castling path tests (§9).

use super::applier::apply;
use super::expander::expand;
use super::generator::generate;
use super::resolved_move::ResolvedMove;
use crate::pieces::Color;
use crate::position::Position;
use crate::square::Square;

/// True iff any opposing piece has some resolved move landing on `color`'s
/// king square.
pub fn in_check(position: &Position, color: Color) -> bool {
    let Some(king_square) = king_square(position, color) else {
        return false;
    };

    let opponent = color.opposite();
    for (origin, _) in position.board.side(opponent).individual_pieces() {
        for base in generate(&with_side_to_move(position, opponent), origin) {
            for resolved in expand(&with_side_to_move(position, opponent), base) {
                if resolved.to_final == king_square {
                    return true;
                }
            }
        }
    }
    false
}

fn king_square(position: &Position, color: Color) -> Option<Square> {
    let king_bit = position.board.side(color).king;
    if king_bit == 0 {
        None
    } else {
        Some(Square::from_index(king_bit.trailing_zeros() as u8))
    }
}

/// `generate`/`expand` both require `side_to_move` to match the piece's
/// owner; `in_check` has to probe the opponent mid-turn, so it operates
/// on a shallow copy with `side_to_move` swapped rather than mutating the
/// caller's `Position`.
fn with_side_to_move(position: &Position, color: Color) -> Position {
    let mut probe = position.clone();
    probe.side_to_move = color;
    probe
}

/// Generates every legal `ResolvedMove` for the piece at `origin`,
/// filtering out any outcome whose resulting Position leaves the mover
/// in check (§4.4).
pub fn legal_moves_from(position: &Position, origin: Square) -> Vec<ResolvedMove> {
    let Some(piece) = position.board.piece_at(origin) else {
        return Vec::new();
    };
    let mover_color = piece.color;

    generate(position, origin)
        .into_iter()
        .flat_map(|base| expand(position, base))
        .filter(|resolved| {
            apply(position, *resolved)
                .map(|next| !in_check(&next, mover_color))
                .unwrap_or(false)
        })
        .collect()
}

/// All legal resolved moves for the side to move, across every piece it
/// owns.
pub fn all_legal_moves(position: &Position) -> Vec<ResolvedMove> {
    let color = position.side_to_move;
    position
        .board
        .side(color)
        .individual_pieces()
        .into_iter()
        .flat_map(|(origin, _)| legal_moves_from(position, origin))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pieces::Color;

    #[test]
    fn starting_position_has_twenty_legal_moves_per_side() {
        let position = Position::initial();
        assert_eq!(all_legal_moves(&position).len(), 20);
    }

    #[test]
    fn starting_position_not_in_check() {
        let position = Position::initial();
        assert!(!in_check(&position, Color::White));
        assert!(!in_check(&position, Color::Black));
    }
}
