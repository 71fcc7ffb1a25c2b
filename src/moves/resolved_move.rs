use super::base_move::{BaseMove, BaseMoveKind, MoveMeta};
use crate::boards::CastleSide;
use crate::pieces::PieceKind;
use crate::portal::PortalNetworkKind;
use crate::square::Square;
use serde::{Deserialize, Serialize};

/// A portal activation's destination choice: either remain on the portal
/// square (STAY, §4.2) or teleport to a specific member of the network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PortalChoice {
    Stay,
    Square(Square),
}

/// Fully describes a portal decision attached to a `ResolvedMove` (§3
/// `viaPortal`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViaPortal {
    pub entry: Square,
    pub network: PortalNetworkKind,
    pub choice: PortalChoice,
    pub swapped: bool,
}

/// Output of the Portal Outcome Expander (§4.2) and input to the Move
/// Applier (§4.5): a `BaseMove` fully disambiguated with its final
/// landing square and any portal decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedMove {
    pub base: BaseMove,
    pub to_final: Square,
    pub via_portal: Option<ViaPortal>,
}

impl ResolvedMove {
    pub fn from(&self) -> Square {
        self.base.from
    }

    pub fn kind(&self) -> BaseMoveKind {
        self.base.kind
    }

    pub fn castle_side(&self) -> Option<CastleSide> {
        match self.base.meta {
            MoveMeta::Castle(side) => Some(side),
            _ => None,
        }
    }

    pub fn promotion_kind(&self) -> Option<PieceKind> {
        match self.base.meta {
            MoveMeta::Promotion(kind) => Some(kind),
            _ => None,
        }
    }

    /// The client-trusted identity tuple used by the server to match a
    /// submitted move against the authoritative legal-outcome set (§4.7,
    /// §9: "the server trusts only the tuple (toFinal, kind, promo,
    /// viaPortal.choice) for matching").
    pub fn identity(&self) -> (Square, BaseMoveKind, Option<PieceKind>, Option<PortalChoice>) {
        (
            self.to_final,
            self.base.kind,
            self.promotion_kind(),
            self.via_portal.map(|vp| vp.choice),
        )
    }

    pub fn matches_identity(&self, from: Square, other: &Self) -> bool {
        self.from() == from && self.identity() == other.identity()
    }
}
