//! Square identifiers and the wire label format ("A1".."H8").

use std::fmt;

/// One of the 64 squares, stored as the canonical `file + 8 * rank` index
/// (file A = 0, rank 1 = 0).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Square(u8);

impl Square {
    pub const COUNT: usize = 64;

    /// Builds a `Square` from a 0..64 index. Panics outside that range;
    /// every caller in this crate derives indices from bitboard scans or
    /// parsed labels, both already bounded to 0..64.
    pub const fn from_index(index: u8) -> Self {
        assert!((index as usize) < Self::COUNT, "square index out of range");
        Square(index)
    }

    pub const fn new(file: u8, rank: u8) -> Self {
        assert!(file < 8 && rank < 8, "file/rank out of range");
        Square(file + 8 * rank)
    }

    pub const fn index(self) -> u8 {
        self.0
    }

    pub const fn file(self) -> u8 {
        self.0 % 8
    }

    pub const fn rank(self) -> u8 {
        self.0 / 8
    }

    pub const fn bit(self) -> u64 {
        1u64 << self.0
    }

    /// Parses a wire-format label, normalizing case first per §6 ("Case in
    /// incoming payloads MUST be normalized to uppercase before comparison").
    pub fn parse(label: &str) -> Option<Square> {
        let upper = label.to_ascii_uppercase();
        let bytes = upper.as_bytes();
        if bytes.len() != 2 {
            return None;
        }
        let file = bytes[0].checked_sub(b'A')?;
        let rank = bytes[1].checked_sub(b'1')?;
        if file > 7 || rank > 7 {
            return None;
        }
        Some(Square::new(file, rank))
    }

    pub fn label(self) -> String {
        let file = (b'A' + self.file()) as char;
        let rank = (b'1' + self.rank()) as char;
        format!("{file}{rank}")
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl serde::Serialize for Square {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.label())
    }
}

impl<'de> serde::Deserialize<'de> for Square {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Square::parse(&raw).ok_or_else(|| serde::de::Error::custom(format!("bad square label: {raw}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_labels() {
        for rank in 0..8 {
            for file in 0..8 {
                let sq = Square::new(file, rank);
                assert_eq!(Square::parse(&sq.label()), Some(sq));
            }
        }
    }

    #[test]
    fn normalizes_case() {
        assert_eq!(Square::parse("a1"), Square::parse("A1"));
        assert_eq!(Square::parse("e4").unwrap().index(), 4 + 8 * 3);
    }

    #[test]
    fn rejects_malformed_labels() {
        assert_eq!(Square::parse("I1"), None);
        assert_eq!(Square::parse("A9"), None);
        assert_eq!(Square::parse("A"), None);
        assert_eq!(Square::parse("A11"), None);
    }
}
