use crate::boards::CastleSide;
use crate::pieces::PieceKind;
use crate::square::Square;
use serde::{Deserialize, Serialize};

/// The discriminant of a `BaseMove` (§3): a tagged union rather than the
/// teacher's separate `NormalMove`/`CastlingMove`/`PromotionMove` structs,
/// because the expander (§4.2) needs to pattern-match on it uniformly
/// across all five variants the generator can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BaseMoveKind {
    Move,
    Capture,
    PortalActivation,
    Castle,
    Promotion,
}

/// Per-variant payload carried alongside a `BaseMoveKind` (§9: "This maps
/// to a tagged union with per-variant payloads").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoveMeta {
    None,
    Castle(CastleSide),
    Promotion(PieceKind),
}

/// Output of the pseudo-legal generator (§4.1): a move before any portal
/// outcome has been chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaseMove {
    pub from: Square,
    pub to: Square,
    pub kind: BaseMoveKind,
    pub meta: MoveMeta,
}

impl BaseMove {
    pub fn new(from: Square, to: Square, kind: BaseMoveKind) -> Self {
        BaseMove {
            from,
            to,
            kind,
            meta: MoveMeta::None,
        }
    }

    pub fn castle(from: Square, to: Square, side: CastleSide) -> Self {
        BaseMove {
            from,
            to,
            kind: BaseMoveKind::Castle,
            meta: MoveMeta::Castle(side),
        }
    }

    pub fn promotion(from: Square, to: Square, promo: PieceKind) -> Self {
        BaseMove {
            from,
            to,
            kind: BaseMoveKind::Promotion,
            meta: MoveMeta::Promotion(promo),
        }
    }
}
