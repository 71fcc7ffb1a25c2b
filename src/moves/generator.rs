//! The Pseudo-legal Generator (§4.1).

use super::base_move::{BaseMove, BaseMoveKind};
use super::geometry::piece_destinations;
use crate::boards::CastleSide;
use crate::pieces::{Color, PieceKind, PROMOTION_KINDS};
use crate::position::Position;
use crate::square::Square;

use super::attack_oracle::is_square_attacked;

fn promotion_rank(color: Color) -> u8 {
    match color {
        Color::White => 7,
        Color::Black => 0,
    }
}

fn home_squares(color: Color) -> (Square, Square, Square) {
    // (king, kingside rook, queenside rook)
    match color {
        Color::White => (Square::new(4, 0), Square::new(7, 0), Square::new(0, 0)),
        Color::Black => (Square::new(4, 7), Square::new(7, 7), Square::new(0, 7)),
    }
}

/// Generates every `BaseMove` for the piece at `origin`, or an empty
/// sequence if that square holds no piece or a piece not owned by the
/// side to move (§4.1).
pub fn generate(position: &Position, origin: Square) -> Vec<BaseMove> {
    let Some(piece) = position.board.piece_at(origin) else {
        return Vec::new();
    };
    if piece.color != position.side_to_move {
        return Vec::new();
    }

    let mut moves = Vec::new();
    let destinations = piece_destinations(&position.board, origin, piece);
    let mut remaining = destinations;
    while remaining != 0 {
        let index = remaining.trailing_zeros() as u8;
        remaining &= remaining - 1;
        let to = Square::from_index(index);
        let is_capture = position.board.color_at(to).is_some();

        if piece.kind == PieceKind::Pawn && to.rank() == promotion_rank(piece.color) {
            for promo in PROMOTION_KINDS {
                moves.push(BaseMove::promotion(origin, to, promo));
            }
            continue;
        }

        let kind = if is_capture {
            BaseMoveKind::Capture
        } else {
            BaseMoveKind::Move
        };
        moves.push(BaseMove::new(origin, to, kind));
    }

    if piece.kind == PieceKind::King {
        moves.extend(castling_moves(position, origin, piece.color));
    }

    moves.extend(portal_activation_moves(position, origin, piece.color));

    moves
}

fn castling_moves(position: &Position, king_square: Square, color: Color) -> Vec<BaseMove> {
    let (home_king, kingside_rook, queenside_rook) = home_squares(color);
    if king_square != home_king {
        return Vec::new();
    }

    let occupied = position.board.bitboard();
    let opponent = color.opposite();
    let mut moves = Vec::new();

    if position.castle_rights.is_available(color, CastleSide::King)
        && position.board.piece_at(kingside_rook).map(|p| p.kind) == Some(PieceKind::Rook)
    {
        let pass_through = Square::new(5, king_square.rank());
        let destination = Square::new(6, king_square.rank());
        let empty_mask = pass_through.bit() | destination.bit();
        if occupied & empty_mask == 0
            && !is_square_attacked(position, king_square, opponent)
            && !is_square_attacked(position, pass_through, opponent)
            && !is_square_attacked(position, destination, opponent)
        {
            moves.push(BaseMove::castle(king_square, destination, CastleSide::King));
        }
    }

    if position.castle_rights.is_available(color, CastleSide::Queen)
        && position.board.piece_at(queenside_rook).map(|p| p.kind) == Some(PieceKind::Rook)
    {
        let knight_square = Square::new(1, king_square.rank());
        let pass_through = Square::new(3, king_square.rank());
        let destination = Square::new(2, king_square.rank());
        let empty_mask = knight_square.bit() | pass_through.bit() | destination.bit();
        if occupied & empty_mask == 0
            && !is_square_attacked(position, king_square, opponent)
            && !is_square_attacked(position, pass_through, opponent)
            && !is_square_attacked(position, destination, opponent)
        {
            moves.push(BaseMove::castle(king_square, destination, CastleSide::Queen));
        }
    }

    moves
}

fn portal_activation_moves(position: &Position, origin: Square, color: Color) -> Vec<BaseMove> {
    use crate::portal::PortalNetworkKind;

    let Some((kind, destinations)) = position.portal_config.network_at(origin, color) else {
        return Vec::new();
    };

    match kind {
        PortalNetworkKind::Exclusive => {
            let forbidden = position.personal_no_return.forbidden_origin(color, origin);
            destinations
                .into_iter()
                .filter(|&dest| position.board.color_at(dest) != Some(color))
                .filter(|&dest| Some(dest) != forbidden)
                .map(|dest| BaseMove::new(origin, dest, BaseMoveKind::PortalActivation))
                .collect()
        }
        PortalNetworkKind::Neutral => {
            if position.neutral_swap_cooldowns.get(color) {
                return Vec::new();
            }
            destinations
                .into_iter()
                .filter(|&dest| position.board.color_at(dest) != Some(color))
                .map(|dest| BaseMove::new(origin, dest, BaseMoveKind::PortalActivation))
                .collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::moves::base_move::BaseMoveKind;

    #[test]
    fn s1_pawn_two_step_from_start() {
        let position = Position::initial();
        let e2 = Square::parse("E2").unwrap();
        let e4 = Square::parse("E4").unwrap();
        let moves = generate(&position, e2);
        assert!(moves.iter().any(|m| m.to == e4 && m.kind == BaseMoveKind::Move));
    }

    #[test]
    fn generates_nothing_for_empty_square() {
        let position = Position::initial();
        let e4 = Square::parse("E4").unwrap();
        assert!(generate(&position, e4).is_empty());
    }

    #[test]
    fn generates_nothing_for_opponent_piece() {
        let position = Position::initial();
        let e7 = Square::parse("E7").unwrap();
        assert!(generate(&position, e7).is_empty());
    }

    #[test]
    fn purity_two_calls_agree() {
        let position = Position::initial();
        let e2 = Square::parse("E2").unwrap();
        assert_eq!(generate(&position, e2), generate(&position, e2));
    }
}
