//! The portal network mechanism (§3 `PortalConfig`, `PortalNetworkKind`,
//! `NeutralSwapCooldown`, `PersonalNoReturn`, `PendingPersonalNoReturn`).
//!
//! Shaped as small lookup tables addressed by `Square`, parameterizing the
//! engine instead of living as a hidden global — the same style as the
//! module-level constant tables used for move geometry (`pieces::tables`),
//! generalized per §9's design note: "parameterize the engine by a
//! PortalConfig passed into `initialState`, avoiding hidden global state."

use crate::pieces::Color;
use crate::square::Square;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PortalNetworkKind {
    Exclusive,
    Neutral,
}

/// Three disjoint portal networks: one exclusive to each color, and a
/// neutral pair either side may use. §3 describes the reference
/// configuration; this struct models it as per-`Position` data rather
/// than a module-wide constant, per the design note above.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortalConfig {
    pub white_exclusive: Vec<Square>,
    pub black_exclusive: Vec<Square>,
    pub neutral_pairs: Vec<(Square, Square)>,
}

impl PortalConfig {
    /// The reference configuration from §3: white-exclusive
    /// {D5, F5, E3, B3}, black-exclusive {C4, E4, D6, G6}, one neutral
    /// pair {B5, G4}.
    pub fn reference() -> Self {
        let sq = |label: &str| Square::parse(label).expect("valid reference label");
        PortalConfig {
            white_exclusive: vec![sq("D5"), sq("F5"), sq("E3"), sq("B3")],
            black_exclusive: vec![sq("C4"), sq("E4"), sq("D6"), sq("G6")],
            neutral_pairs: vec![(sq("B5"), sq("G4"))],
        }
    }

    fn exclusive_network_for(&self, color: Color) -> &[Square] {
        match color {
            Color::White => &self.white_exclusive,
            Color::Black => &self.black_exclusive,
        }
    }

    /// Returns the network kind and every *other* member square a piece
    /// of `color` standing on `square` could teleport to, or `None` if
    /// `square` is not a portal usable by `color`.
    pub fn network_at(&self, square: Square, color: Color) -> Option<(PortalNetworkKind, Vec<Square>)> {
        let exclusive = self.exclusive_network_for(color);
        if exclusive.contains(&square) {
            let others = exclusive.iter().copied().filter(|&s| s != square).collect();
            return Some((PortalNetworkKind::Exclusive, others));
        }
        for &(a, b) in &self.neutral_pairs {
            if a == square {
                return Some((PortalNetworkKind::Neutral, vec![b]));
            }
            if b == square {
                return Some((PortalNetworkKind::Neutral, vec![a]));
            }
        }
        None
    }

    /// Every portal square `color` may use: its own exclusive network
    /// plus both members of the neutral pair.
    pub fn squares_usable_by(&self, color: Color) -> Vec<Square> {
        let mut squares = self.exclusive_network_for(color).to_vec();
        for &(a, b) in &self.neutral_pairs {
            squares.push(a);
            squares.push(b);
        }
        squares
    }

    /// True if `square` belongs to any network at all (used by the
    /// expander to decide whether a plain move onto it should branch).
    pub fn is_portal_square(&self, square: Square) -> bool {
        self.white_exclusive.contains(&square)
            || self.black_exclusive.contains(&square)
            || self
                .neutral_pairs
                .iter()
                .any(|&(a, b)| a == square || b == square)
    }
}

/// Per-color one-turn prohibition on initiating a neutral-portal
/// activation, imposed on a swap's victim (§3 `NeutralSwapCooldown`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NeutralSwapCooldowns {
    pub white: bool,
    pub black: bool,
}

impl NeutralSwapCooldowns {
    pub fn get(&self, color: Color) -> bool {
        match color {
            Color::White => self.white,
            Color::Black => self.black,
        }
    }

    pub fn set(&mut self, color: Color, value: bool) {
        match color {
            Color::White => self.white = value,
            Color::Black => self.black = value,
        }
    }
}

/// Per-color mapping `landingSquare -> originSquare` forbidding an
/// immediate return jump (§3 `PersonalNoReturn` / `PendingPersonalNoReturn`).
/// Networks are at most four squares, so a small `Vec` beats a `HashMap`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonalNoReturn {
    white: Vec<(Square, Square)>,
    black: Vec<(Square, Square)>,
}

impl PersonalNoReturn {
    fn side(&self, color: Color) -> &[(Square, Square)] {
        match color {
            Color::White => &self.white,
            Color::Black => &self.black,
        }
    }

    fn side_mut(&mut self, color: Color) -> &mut Vec<(Square, Square)> {
        match color {
            Color::White => &mut self.white,
            Color::Black => &mut self.black,
        }
    }

    /// The forbidden origin for a jump from `landing`, if any.
    pub fn forbidden_origin(&self, color: Color, landing: Square) -> Option<Square> {
        self.side(color)
            .iter()
            .find(|&&(l, _)| l == landing)
            .map(|&(_, o)| o)
    }

    pub fn insert(&mut self, color: Color, landing: Square, origin: Square) {
        let side = self.side_mut(color);
        side.retain(|&(l, _)| l != landing);
        side.push((landing, origin));
    }

    pub fn clear(&mut self, color: Color) {
        self.side_mut(color).clear();
    }

    pub fn is_empty_for(&self, color: Color) -> bool {
        self.side(color).is_empty()
    }

    /// Replaces the active restriction for `color` with `pending` and
    /// empties `pending`, modelling §4.5's "promote pending to active".
    pub fn promote_from(&mut self, color: Color, pending: &mut PersonalNoReturn) {
        *self.side_mut(color) = std::mem::take(pending.side_mut(color));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_networks_are_disjoint() {
        let cfg = PortalConfig::reference();
        for sq in &cfg.white_exclusive {
            assert!(!cfg.black_exclusive.contains(sq));
        }
    }

    #[test]
    fn exclusive_network_lists_every_other_member() {
        let cfg = PortalConfig::reference();
        let d5 = Square::parse("D5").unwrap();
        let (kind, others) = cfg.network_at(d5, Color::White).unwrap();
        assert_eq!(kind, PortalNetworkKind::Exclusive);
        assert_eq!(others.len(), 3);
        assert!(!others.contains(&d5));
    }

    #[test]
    fn neutral_pair_usable_by_either_color() {
        let cfg = PortalConfig::reference();
        let b5 = Square::parse("B5").unwrap();
        let g4 = Square::parse("G4").unwrap();
        assert_eq!(cfg.network_at(b5, Color::White).unwrap().1, vec![g4]);
        assert_eq!(cfg.network_at(b5, Color::Black).unwrap().1, vec![g4]);
    }

    #[test]
    fn exclusive_network_not_usable_by_opposite_color() {
        let cfg = PortalConfig::reference();
        let d5 = Square::parse("D5").unwrap();
        assert!(cfg.network_at(d5, Color::Black).is_none());
    }
}
