//! The Game Result Evaluator (§4.6).

use super::legality::{all_legal_moves, in_check};
use crate::pieces::Color;
use crate::position::Position;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameOutcome {
    Ongoing,
    Checkmate,
    Stalemate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameResult {
    pub outcome: GameOutcome,
    pub winner: Option<Color>,
}

/// `gameResult(position)` (§4.6): checkmate/stalemate iff the side to
/// move has no legal resolved outcome, distinguished by whether it is in
/// check.
pub fn game_result(position: &Position) -> GameResult {
    let side = position.side_to_move;
    if !all_legal_moves(position).is_empty() {
        return GameResult {
            outcome: GameOutcome::Ongoing,
            winner: None,
        };
    }

    if in_check(position, side) {
        GameResult {
            outcome: GameOutcome::Checkmate,
            winner: Some(side.opposite()),
        }
    } else {
        GameResult {
            outcome: GameOutcome::Stalemate,
            winner: None,
        }
    }
}
