//! Property tests for §8's testable properties, exercised over random
//! walks of legal moves from the initial position (SPEC_FULL.md's Test
//! Tooling section: `proptest`, adopted from `menezesd-ChessEngine`'s
//! dev-dependencies).

use portal_chess::prelude::*;
use proptest::prelude::*;

/// Plays up to `steps` legal moves from the initial position, picking
/// each one deterministically from `indices`. Stops early if the side to
/// move has no legal moves (checkmate/stalemate) or `indices` runs out.
fn random_walk(indices: &[u8]) -> Vec<Position> {
    let mut trail = vec![Position::initial()];
    for &index in indices {
        let current = trail.last().unwrap();
        let legal = all_legal_moves(current);
        if legal.is_empty() {
            break;
        }
        let chosen = legal[index as usize % legal.len()];
        let next = apply(current, chosen).expect("a legal move always matches an outcome");
        trail.push(next);
    }
    trail
}

proptest! {
    /// Property 1: generator purity.
    #[test]
    fn generator_purity(indices in prop::collection::vec(0u8..32, 0..8), square_index in 0u8..64) {
        let trail = random_walk(&indices);
        let position = trail.last().unwrap();
        let square = Square::from_index(square_index);
        let first = generate(position, square);
        let second = generate(position, square);
        prop_assert_eq!(first, second);
    }

    /// Property 2: applier purity.
    #[test]
    fn applier_purity(indices in prop::collection::vec(0u8..32, 0..8)) {
        let trail = random_walk(&indices);
        let position = trail.last().unwrap();
        let legal = all_legal_moves(position);
        prop_assume!(!legal.is_empty());
        let mv = legal[0];
        let once = apply(position, mv).unwrap();
        let twice = apply(position, mv).unwrap();
        prop_assert_eq!(once, twice);
    }

    /// Property 6: every resolved move the filter keeps leaves the mover
    /// out of check after applying it.
    #[test]
    fn check_legality_holds(indices in prop::collection::vec(0u8..32, 0..10)) {
        let trail = random_walk(&indices);
        let position = trail.last().unwrap();
        let mover = position.side_to_move;
        for mv in all_legal_moves(position) {
            let next = apply(position, mv).unwrap();
            prop_assert!(!in_check(&next, mover));
        }
    }

    /// Property 9: result correctness tracks the filter's emptiness and
    /// whether the side to move is in check.
    #[test]
    fn result_matches_filter_and_check_state(indices in prop::collection::vec(0u8..32, 0..10)) {
        let trail = random_walk(&indices);
        let position = trail.last().unwrap();
        let result = game_result(position);
        let legal_is_empty = all_legal_moves(position).is_empty();
        let mover_in_check = in_check(position, position.side_to_move);

        match result.outcome {
            GameOutcome::Ongoing => prop_assert!(!legal_is_empty),
            GameOutcome::Checkmate => {
                prop_assert!(legal_is_empty);
                prop_assert!(mover_in_check);
                prop_assert_eq!(result.winner, Some(position.side_to_move.opposite()));
            }
            GameOutcome::Stalemate => {
                prop_assert!(legal_is_empty);
                prop_assert!(!mover_in_check);
                prop_assert_eq!(result.winner, None);
            }
        }
    }

    /// Property 3: a non-capture move onto a portal always emits STAY
    /// first.
    #[test]
    fn stay_outcome_always_leads_when_present(indices in prop::collection::vec(0u8..32, 0..8)) {
        let trail = random_walk(&indices);
        let position = trail.last().unwrap();
        for (origin, _) in position.board.side(position.side_to_move).individual_pieces() {
            for base in generate(position, origin) {
                let outcomes = expand(position, base);
                if outcomes.len() > 1 {
                    if let Some(first) = outcomes.first() {
                        if let Some(via) = first.via_portal {
                            prop_assert_eq!(via.choice, PortalChoice::Stay);
                        }
                    }
                }
            }
        }
    }
}

#[test]
fn promotion_never_branches_across_reachable_positions() {
    let trail = random_walk(&[3, 7, 1, 9, 2, 5]);
    for position in &trail {
        for (origin, _) in position.board.side(position.side_to_move).individual_pieces() {
            for base in generate(position, origin) {
                if base.kind == BaseMoveKind::Promotion {
                    assert_eq!(expand(position, base).len(), 1);
                }
            }
        }
    }
}
