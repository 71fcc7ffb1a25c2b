//! `Position`: the immutable-style value type at the center of the core
//! (§3 `Position`). Every component in `moves::` takes a `&Position` and
//! returns new data without mutating it — the "deep structural clone for
//! purity" pattern (§9): the applier takes a `&Position` and returns a
//! brand new one rather than mutating in place.

use crate::boards::{Board, CastleRights};
use crate::moves::resolved_move::ResolvedMove;
use crate::pieces::Color;
use crate::portal::{NeutralSwapCooldowns, PersonalNoReturn, PortalConfig};
use crate::square::Square;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    pub board: Board,
    pub side_to_move: Color,
    pub move_number: u32,
    pub castle_rights: CastleRights,
    pub portal_config: PortalConfig,
    pub neutral_swap_cooldowns: NeutralSwapCooldowns,
    pub personal_no_return: PersonalNoReturn,
    pub pending_personal_no_return: PersonalNoReturn,
    /// Reserved for forward compatibility (§3 `EnPassantTarget`); the
    /// generator never produces en passant, so this stays `None` forever
    /// in the current rule set.
    pub en_passant_target: Option<Square>,
    pub halfmove_clock: u32,
    pub history: Vec<ResolvedMove>,
}

impl Position {
    /// `initialState()` (§3): the standard starting position under a
    /// given portal configuration.
    pub fn initial_with_portals(portal_config: PortalConfig) -> Self {
        Position {
            board: Board::new(),
            side_to_move: Color::White,
            move_number: 1,
            castle_rights: CastleRights::all(),
            portal_config,
            neutral_swap_cooldowns: NeutralSwapCooldowns::default(),
            personal_no_return: PersonalNoReturn::default(),
            pending_personal_no_return: PersonalNoReturn::default(),
            en_passant_target: None,
            halfmove_clock: 0,
            history: Vec::new(),
        }
    }

    /// The reference portal configuration from §3.
    pub fn initial() -> Self {
        Position::initial_with_portals(PortalConfig::reference())
    }

    pub fn opponent(&self) -> Color {
        self.side_to_move.opposite()
    }
}
