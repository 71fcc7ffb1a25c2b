pub mod color;
pub mod piece;
pub mod tables;

pub use color::Color;
pub use piece::{Piece, PieceKind, ALL_KINDS, PROMOTION_KINDS};
