use super::Color;
use serde::{Deserialize, Serialize};

/// The six standard chess roles a piece can take, per §3.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

pub const ALL_KINDS: [PieceKind; 6] = [
    PieceKind::Pawn,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Rook,
    PieceKind::Queen,
    PieceKind::King,
];

/// The four pieces a pawn may promote into, in the order the generator
/// emits them (§4.1: "four BaseMoves of kind `promotion`").
pub const PROMOTION_KINDS: [PieceKind; 4] = [
    PieceKind::Queen,
    PieceKind::Rook,
    PieceKind::Bishop,
    PieceKind::Knight,
];

/// A piece as observed on the board: kind, owner, and whether it has ever
/// been relocated (§3 `Piece`). `has_moved` is derived from the board's
/// per-square "moved" bitboard rather than stored directly — see
/// `boards::color_board::ColorBoard` for why that's equivalent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Piece {
    pub kind: PieceKind,
    pub color: Color,
    pub has_moved: bool,
}
