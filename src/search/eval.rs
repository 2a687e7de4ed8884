use cozy_chess::{Board, Color, Piece, Square};

use crate::board::cozy::Position;
use crate::board::Rules;

const PAWN: i32 = 100;
const KNIGHT: i32 = 320;
const BISHOP: i32 = 330;
const ROOK: i32 = 500;
const QUEEN: i32 = 900;

// Mate scoring helpers
pub const MATE_SCORE: i32 = 9_999;
pub const DRAW_SCORE: i32 = 0;

/// Static scorer for terminal and cutoff positions.
///
/// Scores are absolute: positive favours the maximizing side regardless of
/// who is to move. Confirmed checkmates must score `±MATE_SCORE` and
/// confirmed draws `DRAW_SCORE`.
pub trait Evaluator<P> {
    fn evaluate(&self, pos: &P) -> i32;
}

fn count_piece(board: &Board, color: Color, piece: Piece) -> i32 {
    let bb = board.colors(color) & board.pieces(piece);
    bb.into_iter().count() as i32
}

// Side-agnostic material in centipawns: positive means White has more material.
pub fn material_eval_cp_side_agnostic(board: &Board) -> i32 {
    let w = Color::White;
    let b = Color::Black;
    (count_piece(board, w, Piece::Pawn) - count_piece(board, b, Piece::Pawn)) * PAWN
        + (count_piece(board, w, Piece::Knight) - count_piece(board, b, Piece::Knight)) * KNIGHT
        + (count_piece(board, w, Piece::Bishop) - count_piece(board, b, Piece::Bishop)) * BISHOP
        + (count_piece(board, w, Piece::Rook) - count_piece(board, b, Piece::Rook)) * ROOK
        + (count_piece(board, w, Piece::Queen) - count_piece(board, b, Piece::Queen)) * QUEEN
}

/// Mate and draw scores, or `None` while the game is still running.
pub fn terminal_score(pos: &Position) -> Option<i32> {
    if pos.is_checkmate() {
        let white_mated = pos.board().side_to_move() == Color::White;
        return Some(if white_mated { -MATE_SCORE } else { MATE_SCORE });
    }
    if pos.is_game_over() { return Some(DRAW_SCORE); }
    None
}

/// Material only.
#[derive(Clone, Copy, Debug, Default)]
pub struct Material;

impl Evaluator<Position> for Material {
    fn evaluate(&self, pos: &Position) -> i32 {
        terminal_score(pos).unwrap_or_else(|| material_eval_cp_side_agnostic(pos.board()))
    }
}

/// Material plus a handful of positional terms: advanced pawns, central
/// occupation, centralised knights, and a king stuck at home without
/// castling rights.
#[derive(Clone, Copy, Debug, Default)]
pub struct Heuristic;

const CENTER: [Square; 4] = [Square::D4, Square::E4, Square::D5, Square::E5];

fn king_distance(a: Square, b: Square) -> i32 {
    let df = (a.file() as i32 - b.file() as i32).abs();
    let dr = (a.rank() as i32 - b.rank() as i32).abs();
    df.max(dr)
}

fn sign(color: Color) -> i32 { if color == Color::White { 1 } else { -1 } }

impl Evaluator<Position> for Heuristic {
    fn evaluate(&self, pos: &Position) -> i32 {
        if let Some(score) = terminal_score(pos) { return score; }
        let board = pos.board();
        let mut score = material_eval_cp_side_agnostic(board);

        for &color in &[Color::White, Color::Black] {
            let s = sign(color);
            let pawns = board.colors(color) & board.pieces(Piece::Pawn);
            for sq in pawns {
                let rank = sq.rank() as i32;
                let advanced = if color == Color::White { rank >= 4 } else { rank <= 3 };
                if advanced { score += 10 * s; }
            }

            let knights = board.colors(color) & board.pieces(Piece::Knight);
            let hub = if color == Color::White { Square::E4 } else { Square::E5 };
            for sq in knights {
                if king_distance(sq, hub) <= 2 { score += 10 * s; }
            }

            let home = if color == Color::White { Square::E1 } else { Square::E8 };
            let rights = board.castle_rights(color);
            if board.king(color) == home && rights.short.is_none() && rights.long.is_none() {
                score -= 50 * s;
            }
        }

        for &sq in &CENTER {
            if let Some(color) = board.color_on(sq) { score += 20 * sign(color); }
        }
        score
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn startpos_is_balanced() {
        let pos = Position::startpos();
        assert_eq!(Material.evaluate(&pos), 0);
        assert_eq!(Heuristic.evaluate(&pos), 0);
    }

    #[test]
    fn mate_sign_follows_the_mated_side() {
        let black_mated = Position::from_fen("7k/6Q1/5K2/8/8/8/8/8 b - - 0 1").unwrap();
        assert_eq!(Heuristic.evaluate(&black_mated), MATE_SCORE);
        let white_mated = Position::from_fen("7K/6q1/5k2/8/8/8/8/8 w - - 0 1").unwrap();
        assert_eq!(Heuristic.evaluate(&white_mated), -MATE_SCORE);
    }

    #[test]
    fn draws_score_zero_even_with_material() {
        let stale = Position::from_fen("k7/2K5/1Q6/8/8/8/8/8 b - - 0 1").unwrap();
        assert_eq!(Heuristic.evaluate(&stale), DRAW_SCORE);
    }

    #[test]
    fn central_pawn_earns_center_and_advance_bonus() {
        let pos = Position::from_fen("4k3/8/8/4P3/8/8/8/4K3 b - - 0 1").unwrap();
        // pawn 100 + advanced 10 + center 20; both kings home without rights cancel
        assert_eq!(Heuristic.evaluate(&pos), 130);
    }
}
