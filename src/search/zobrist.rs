//! Position signatures: Zobrist hashing over everything that constrains
//! future play (placement, side to move, castling rights, en-passant file).
//! Move counters are not part of the signature.

use cozy_chess::{Board, Color, Piece};
use std::sync::OnceLock;

const PIECE_KEYS: usize = 12 * 64;
// [white short, white long, black short, black long]
const CASTLE_KEYS: usize = 4;
const EP_KEYS: usize = 8;

struct Keys {
    pieces: [u64; PIECE_KEYS],
    castle: [u64; CASTLE_KEYS],
    ep: [u64; EP_KEYS],
    side: u64,
}

fn piece_index(color: Color, piece: Piece) -> usize {
    let p = match piece {
        Piece::Pawn => 0,
        Piece::Knight => 1,
        Piece::Bishop => 2,
        Piece::Rook => 3,
        Piece::Queen => 4,
        Piece::King => 5,
    };
    let c = if color == Color::White { 0 } else { 1 };
    c * 6 + p
}

fn splitmix64(mut x: u64) -> u64 {
    x = x.wrapping_add(0x9E3779B97F4A7C15);
    let mut z = x;
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58476D1CE4E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D049BB133111EB);
    z ^ (z >> 31)
}

static KEYS: OnceLock<Keys> = OnceLock::new();

fn keys() -> &'static Keys {
    KEYS.get_or_init(|| {
        let mut seed = 0xF00D_F00D_DEAD_BEEF_u64;
        let mut next = || { seed = splitmix64(seed); seed };
        let mut k = Keys {
            pieces: [0; PIECE_KEYS],
            castle: [0; CASTLE_KEYS],
            ep: [0; EP_KEYS],
            side: 0,
        };
        for v in k.pieces.iter_mut() { *v = next(); }
        for v in k.castle.iter_mut() { *v = next(); }
        for v in k.ep.iter_mut() { *v = next(); }
        k.side = next();
        k
    })
}

pub fn compute(board: &Board) -> u64 {
    let k = keys();
    let mut key = 0u64;
    for &color in &[Color::White, Color::Black] {
        for &piece in &Piece::ALL {
            let bb = board.colors(color) & board.pieces(piece);
            let pi = piece_index(color, piece);
            for sq in bb {
                key ^= k.pieces[pi * 64 + sq as usize];
            }
        }
        let rights = board.castle_rights(color);
        let base = if color == Color::White { 0 } else { 2 };
        if rights.short.is_some() { key ^= k.castle[base]; }
        if rights.long.is_some() { key ^= k.castle[base + 1]; }
    }
    if let Some(file) = board.en_passant() { key ^= k.ep[file as usize]; }
    if board.side_to_move() == Color::Black { key ^= k.side; }
    key
}
