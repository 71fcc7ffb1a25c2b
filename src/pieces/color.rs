use serde::{Deserialize, Serialize};

/// The side owning a piece, portal network, or clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    White,
    Black,
}

impl Color {
    pub const fn opposite(self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// Index into the two-element per-color arrays used throughout `boards`.
    pub const fn index(self) -> usize {
        match self {
            Color::White => 0,
            Color::Black => 1,
        }
    }

    /// Wire-format single-letter code used by the protocol (`w`/`b`, §6).
    pub fn wire_code(self) -> &'static str {
        match self {
            Color::White => "w",
            Color::Black => "b",
        }
    }
}
