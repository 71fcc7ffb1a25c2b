//! The Portal Outcome Expander (§4.2): turns one pseudo-legal `BaseMove`
//! into the non-empty set of fully-disambiguated `ResolvedMove`s a player
//! could choose between.

use super::base_move::{BaseMove, BaseMoveKind};
use super::resolved_move::{PortalChoice, ResolvedMove, ViaPortal};
use crate::pieces::Color;
use crate::portal::PortalNetworkKind;
use crate::position::Position;
use crate::square::Square;

/// Expands `mv` (generated from the side to move in `position`) into its
/// resolved outcomes. Never empty for a `BaseMove` the generator actually
/// produced.
pub fn expand(position: &Position, mv: BaseMove) -> Vec<ResolvedMove> {
    match mv.kind {
        BaseMoveKind::Promotion => vec![plain_outcome(mv, mv.to)],
        BaseMoveKind::PortalActivation => portal_activation_outcome(position, mv)
            .into_iter()
            .collect(),
        BaseMoveKind::Capture => vec![plain_outcome(mv, mv.to)],
        BaseMoveKind::Castle => vec![plain_outcome(mv, mv.to)],
        BaseMoveKind::Move => move_outcomes(position, mv),
    }
}

fn plain_outcome(base: BaseMove, to_final: Square) -> ResolvedMove {
    ResolvedMove {
        base,
        to_final,
        via_portal: None,
    }
}

fn portal_activation_outcome(position: &Position, mv: BaseMove) -> Option<ResolvedMove> {
    let mover_color = position.side_to_move;
    let (network, _) = position.portal_config.network_at(mv.from, mover_color)?;
    if position.board.color_at(mv.to) == Some(mover_color) {
        return None;
    }
    let swapped = position.board.color_at(mv.to) == Some(mover_color.opposite());
    Some(ResolvedMove {
        base: mv,
        to_final: mv.to,
        via_portal: Some(ViaPortal {
            entry: mv.from,
            network,
            choice: PortalChoice::Square(mv.to),
            swapped,
        }),
    })
}

/// §4.2's non-capture `move` branch: STAY plus one outcome per reachable
/// network destination when `mv.to` is a portal square; a single plain
/// outcome otherwise.
fn move_outcomes(position: &Position, mv: BaseMove) -> Vec<ResolvedMove> {
    let mover_color = position.side_to_move;
    let landing = mv.to;

    let Some((network, destinations)) = position.portal_config.network_at(landing, mover_color) else {
        return vec![plain_outcome(mv, landing)];
    };

    let mut outcomes = vec![ResolvedMove {
        base: mv,
        to_final: landing,
        via_portal: Some(ViaPortal {
            entry: landing,
            network,
            choice: PortalChoice::Stay,
            swapped: false,
        }),
    }];

    if network == PortalNetworkKind::Neutral && position.neutral_swap_cooldowns.get(mover_color) {
        return outcomes;
    }

    let forbidden = position.personal_no_return.forbidden_origin(mover_color, landing);

    for dest in destinations {
        if network == PortalNetworkKind::Exclusive && Some(dest) == forbidden {
            continue;
        }
        if position.board.color_at(dest) == Some(mover_color) {
            continue;
        }
        let swapped = opponent_occupies(position, dest, mover_color);
        outcomes.push(ResolvedMove {
            base: mv,
            to_final: dest,
            via_portal: Some(ViaPortal {
                entry: landing,
                network,
                choice: PortalChoice::Square(dest),
                swapped,
            }),
        });
    }

    outcomes
}

fn opponent_occupies(position: &Position, square: Square, mover_color: Color) -> bool {
    position.board.color_at(square) == Some(mover_color.opposite())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::moves::base_move::BaseMove;

    #[test]
    fn promotion_never_branches() {
        let position = Position::initial();
        let mv = BaseMove::promotion(
            Square::parse("D7").unwrap(),
            Square::parse("D8").unwrap(),
            crate::pieces::PieceKind::Queen,
        );
        assert_eq!(expand(&position, mv).len(), 1);
    }

    #[test]
    fn capture_onto_portal_square_does_not_activate() {
        let mut position = Position::initial();
        // Clear the board noise and put a white queen able to capture on D5.
        for sq in 0u8..64 {
            position.board.clear_square(Square::from_index(sq));
        }
        position.board.place(Color::White, crate::pieces::PieceKind::Queen, Square::parse("D1").unwrap());
        position.board.place(Color::Black, crate::pieces::PieceKind::Pawn, Square::parse("D5").unwrap());
        let mv = BaseMove::new(Square::parse("D1").unwrap(), Square::parse("D5").unwrap(), BaseMoveKind::Capture);
        let outcomes = expand(&position, mv);
        assert_eq!(outcomes.len(), 1);
        assert!(outcomes[0].via_portal.is_none());
        assert_eq!(outcomes[0].to_final, Square::parse("D5").unwrap());
    }

    #[test]
    fn move_onto_exclusive_portal_emits_stay_first() {
        let mut position = Position::initial();
        for sq in 0u8..64 {
            position.board.clear_square(Square::from_index(sq));
        }
        position.board.place(Color::White, crate::pieces::PieceKind::Rook, Square::parse("D1").unwrap());
        let mv = BaseMove::new(Square::parse("D1").unwrap(), Square::parse("D5").unwrap(), BaseMoveKind::Move);
        let outcomes = expand(&position, mv);
        assert!(outcomes[0].via_portal.unwrap().choice == PortalChoice::Stay);
        assert_eq!(outcomes.len(), 4); // STAY + 3 other exclusive members
    }
}
