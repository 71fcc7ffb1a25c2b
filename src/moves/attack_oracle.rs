//! The Attack Oracle (§4.3): `is_square_attacked`, used by castling
//! legality. Deliberately distinct from the check filter in
//! `legality.rs` — it never recurses through the generator (only the
//! expander, for its synthetic portal-scan moves), and it excludes enemy
//! kings from its portal scan so the two functions can disagree without
//! that being a bug (§9's explicit instruction not to collapse them into
//! one).

use super::base_move::{BaseMove, BaseMoveKind};
use super::expander::expand;
use super::geometry::{
    piece_destinations, square_attacked_by_king, square_attacked_by_knight,
    square_attacked_by_pawn, square_attacked_by_slider,
};
use crate::pieces::{Color, Piece, PieceKind};
use crate::portal::PortalNetworkKind;
use crate::position::Position;
use crate::square::Square;

/// True if `square` is attacked by `attacker_color`, accounting for both
/// direct geometry and a single layer of portal activation by non-king
/// pieces of that color (§4.3).
pub fn is_square_attacked(position: &Position, square: Square, attacker_color: Color) -> bool {
    let board = &position.board;

    if square_attacked_by_pawn(board, square, attacker_color)
        || square_attacked_by_knight(board, square, attacker_color)
        || square_attacked_by_king(board, square, attacker_color)
        || square_attacked_by_slider(board, square, attacker_color, PieceKind::Bishop)
        || square_attacked_by_slider(board, square, attacker_color, PieceKind::Rook)
        || square_attacked_by_slider(board, square, attacker_color, PieceKind::Queen)
    {
        return true;
    }

    portal_scan_attacks(position, square, attacker_color)
}

/// §4.3's two-step portal scan: for every non-king piece of
/// `attacker_color`, test both (1) a portal it already stands on and (2)
/// every portal square it could ordinarily reach in one move. Kings are
/// excluded so portal-induced "attacks" can never themselves depend on
/// castling (which is the only consumer of this function).
fn portal_scan_attacks(position: &Position, square: Square, attacker_color: Color) -> bool {
    let board = &position.board;
    let side = board.side(attacker_color);
    let portal_squares = position.portal_config.squares_usable_by(attacker_color);

    for (origin, kind) in side.individual_pieces() {
        if kind == PieceKind::King {
            continue;
        }

        if standing_on_portal_attacks(position, origin, kind, attacker_color, square) {
            return true;
        }

        if reachable_portal_attacks(position, origin, kind, attacker_color, square, &portal_squares) {
            return true;
        }
    }

    false
}

/// §4.3 step 1: the piece already stands on a portal of a network it may
/// use — enumerate its activation destinations directly, the same
/// reachability primitive the generator/expander would derive for a
/// `PortalActivation` outcome.
fn standing_on_portal_attacks(
    position: &Position,
    origin: Square,
    kind: PieceKind,
    attacker_color: Color,
    square: Square,
) -> bool {
    let board = &position.board;
    let Some((net_kind, destinations)) = position.portal_config.network_at(origin, attacker_color) else {
        return false;
    };
    if net_kind == PortalNetworkKind::Neutral && position.neutral_swap_cooldowns.get(attacker_color) {
        return false;
    }
    let forbidden = position.personal_no_return.forbidden_origin(attacker_color, origin);

    for dest in destinations {
        if net_kind == PortalNetworkKind::Exclusive && Some(dest) == forbidden {
            continue;
        }
        if board.color_at(dest) == Some(attacker_color) {
            continue;
        }
        if attacks_from(board, dest, kind, attacker_color, square) {
            return true;
        }
    }
    false
}

/// §4.3 step 2: for every portal square the piece could ordinarily reach
/// in one move (direct geometry only, never the generator), construct a
/// synthetic `Move`/`Capture` `BaseMove` onto that square and ask the
/// expander whether any of its outcomes lands on `square`.
fn reachable_portal_attacks(
    position: &Position,
    origin: Square,
    kind: PieceKind,
    attacker_color: Color,
    square: Square,
    portal_squares: &[Square],
) -> bool {
    let piece = Piece { color: attacker_color, kind };
    let destinations = piece_destinations(&position.board, origin, piece);
    if destinations == 0 {
        return false;
    }

    let probe = with_side_to_move(position, attacker_color);
    for &portal_square in portal_squares {
        if destinations & portal_square.bit() == 0 {
            continue;
        }
        let base_kind = if position.board.color_at(portal_square).is_some() {
            BaseMoveKind::Capture
        } else {
            BaseMoveKind::Move
        };
        let synthetic = BaseMove::new(origin, portal_square, base_kind);
        if expand(&probe, synthetic).into_iter().any(|resolved| resolved.to_final == square) {
            return true;
        }
    }
    false
}

/// `generate`/`expand` both require `side_to_move` to match the piece's
/// owner; the portal scan has to probe pieces belonging to either side
/// depending on who is being tested for castling legality, so it operates
/// on a shallow copy with `side_to_move` swapped rather than mutating the
/// caller's `Position`. Kept local rather than shared with
/// `legality.rs`'s identical-looking helper — the two modules are
/// deliberately independent (§9).
fn with_side_to_move(position: &Position, color: Color) -> Position {
    let mut probe = position.clone();
    probe.side_to_move = color;
    probe
}

fn attacks_from(
    board: &crate::boards::Board,
    from: Square,
    kind: PieceKind,
    attacker_color: Color,
    square: Square,
) -> bool {
    match kind {
        PieceKind::Pawn => {
            crate::pieces::tables::pawn_attacks(from.bit(), attacker_color) & square.bit() != 0
        }
        PieceKind::Knight => crate::pieces::tables::KNIGHT_MOVES[from.index() as usize] & square.bit() != 0,
        PieceKind::Bishop | PieceKind::Rook | PieceKind::Queen => {
            let same_color = board.side(attacker_color).bitboard();
            let other_color = board.side(attacker_color.opposite()).bitboard();
            let from_bit = from.bit();
            let reach = match kind {
                PieceKind::Bishop => crate::pieces::tables::bishop_attacks(from_bit, same_color, other_color),
                PieceKind::Rook => crate::pieces::tables::rook_attacks(from_bit, same_color, other_color),
                PieceKind::Queen => crate::pieces::tables::queen_attacks(from_bit, same_color, other_color),
                _ => unreachable!(),
            };
            reach & square.bit() != 0
        }
        PieceKind::King => false,
    }
}
