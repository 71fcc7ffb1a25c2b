use crate::pieces::Color;
use serde::{Deserialize, Serialize};

/// Kingside or queenside, per §3 `CastleRights`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CastleSide {
    King,
    Queen,
}

/// The four independent castling booleans of §3. Kept as four flat bools
/// rather than two bools per color board because the invariant in §3
/// ("if a rook on its original square
/// has moved or been captured, the matching right is false") has to react
/// to the *opponent* capturing a rook too, which reads more directly off a
/// single flat struct than two independent per-color ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CastleRights {
    pub white_king_side: bool,
    pub white_queen_side: bool,
    pub black_king_side: bool,
    pub black_queen_side: bool,
}

impl CastleRights {
    pub fn all() -> Self {
        CastleRights {
            white_king_side: true,
            white_queen_side: true,
            black_king_side: true,
            black_queen_side: true,
        }
    }

    pub fn is_available(&self, color: Color, side: CastleSide) -> bool {
        match (color, side) {
            (Color::White, CastleSide::King) => self.white_king_side,
            (Color::White, CastleSide::Queen) => self.white_queen_side,
            (Color::Black, CastleSide::King) => self.black_king_side,
            (Color::Black, CastleSide::Queen) => self.black_queen_side,
        }
    }

    pub fn clear_side(&mut self, color: Color, side: CastleSide) {
        match (color, side) {
            (Color::White, CastleSide::King) => self.white_king_side = false,
            (Color::White, CastleSide::Queen) => self.white_queen_side = false,
            (Color::Black, CastleSide::King) => self.black_king_side = false,
            (Color::Black, CastleSide::Queen) => self.black_queen_side = false,
        }
    }

    pub fn clear_color(&mut self, color: Color) {
        self.clear_side(color, CastleSide::King);
        self.clear_side(color, CastleSide::Queen);
    }
}
