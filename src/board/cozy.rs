use cozy_chess::{Board as CozyBoard, Color, File, Move, Piece, Square};

use crate::board::{Rules, RulesError, Side};
use crate::search::zobrist;

/// Chess position backed by `cozy-chess`.
///
/// cozy-chess boards are copy-make, so undo is an explicit stack of the
/// boards that preceded each applied move.
#[derive(Clone, Debug)]
pub struct Position {
    board: CozyBoard,
    undo: Vec<CozyBoard>,
}

fn opponent(color: Color) -> Color {
    if color == Color::White { Color::Black } else { Color::White }
}

impl Position {
    pub fn startpos() -> Self {
        Self { board: CozyBoard::default(), undo: Vec::new() }
    }

    pub fn from_fen(fen: &str) -> Result<Self, RulesError> {
        CozyBoard::from_fen(fen, false)
            .map(|b| Self { board: b, undo: Vec::new() })
            .map_err(|e| RulesError::InvalidFen(format!("{e:?}")))
    }

    pub fn board(&self) -> &CozyBoard { &self.board }

    pub fn fen(&self) -> String { format!("{}", self.board) }

    /// Number of moves currently applied on top of the starting board.
    pub fn ply(&self) -> usize { self.undo.len() }

    /// UCI text for `mv`, with castling written as the king's two-square step.
    pub fn uci(&self, mv: Move) -> String {
        let stm = self.board.side_to_move();
        let castles = self.board.piece_on(mv.from) == Some(Piece::King)
            && self.board.color_on(mv.to) == Some(stm);
        if castles {
            let kingside = (mv.to.file() as usize) > (mv.from.file() as usize);
            let file = if kingside { File::G } else { File::C };
            return format!("{}{}", mv.from, Square::new(file, mv.from.rank()));
        }
        format!("{}", mv)
    }

    /// Resolve UCI text against the legal moves. Accepts both `e1g1` and
    /// cozy-chess's king-takes-rook `e1h1` for castling.
    pub fn parse_move(&self, mv_uci: &str) -> Result<Move, RulesError> {
        self.legal_moves()
            .into_iter()
            .find(|&m| self.uci(m) == mv_uci || format!("{}", m) == mv_uci)
            .ok_or_else(|| RulesError::IllegalMove(mv_uci.to_string()))
    }

    pub fn make_move_uci(&mut self, mv_uci: &str) -> Result<(), RulesError> {
        let mv = self.parse_move(mv_uci)?;
        self.apply(mv)
    }

    pub fn set_from_start_and_moves(moves: &[String]) -> Result<Self, RulesError> {
        let mut pos = Self::startpos();
        for m in moves { pos.make_move_uci(m)?; }
        Ok(pos)
    }

    pub fn in_check(&self) -> bool { !self.board.checkers().is_empty() }

    /// Occurrences of the current position since the last capture or pawn
    /// move, counting this one.
    pub fn repetitions(&self) -> usize {
        let window = usize::from(self.board.halfmove_clock()).min(self.undo.len());
        let key = zobrist::compute(&self.board);
        let earlier = self
            .undo
            .iter()
            .rev()
            .take(window)
            .skip(1)
            .step_by(2)
            .filter(|b| zobrist::compute(b) == key)
            .count();
        1 + earlier
    }

    /// Fivefold repetition; needs at least 16 reversible plies.
    pub fn is_fivefold_repetition(&self) -> bool {
        self.board.halfmove_clock() >= 16 && self.repetitions() >= 5
    }

    fn has_legal_move(&self) -> bool {
        let mut any = false;
        self.board.generate_moves(|_| { any = true; true });
        any
    }

    /// Eight-line text diagram, rank 8 first, White in upper case.
    pub fn diagram(&self) -> String {
        let mut out = String::with_capacity(8 * 18);
        for rank in (0..8).rev() {
            out.push_str(&format!("{} ", rank + 1));
            for file in 0..8 {
                let sq = Square::ALL[rank * 8 + file];
                let ch = match (self.board.color_on(sq), self.board.piece_on(sq)) {
                    (Some(color), Some(piece)) => {
                        let c = match piece {
                            Piece::Pawn => 'p',
                            Piece::Knight => 'n',
                            Piece::Bishop => 'b',
                            Piece::Rook => 'r',
                            Piece::Queen => 'q',
                            Piece::King => 'k',
                        };
                        if color == Color::White { c.to_ascii_uppercase() } else { c }
                    }
                    _ => '.',
                };
                out.push(ch);
                out.push(' ');
            }
            out.push('\n');
        }
        out.push_str("  a b c d e f g h\n");
        out
    }
}

impl Rules for Position {
    type Move = Move;

    fn legal_moves(&self) -> Vec<Move> {
        let mut moves = Vec::with_capacity(64);
        self.board.generate_moves(|ml| { moves.extend(ml); false });
        moves
    }

    fn apply(&mut self, mv: Move) -> Result<(), RulesError> {
        if !self.board.is_legal(mv) {
            return Err(RulesError::IllegalMove(format!("{}", mv)));
        }
        self.undo.push(self.board.clone());
        self.board.play(mv);
        Ok(())
    }

    fn undo(&mut self) -> Result<(), RulesError> {
        self.board = self.undo.pop().ok_or(RulesError::EmptyUndo)?;
        Ok(())
    }

    fn is_capture(&self, mv: Move) -> bool {
        let opp = opponent(self.board.side_to_move());
        if self.board.color_on(mv.to) == Some(opp) { return true; }
        // en passant: a pawn changing file onto an empty square
        self.board.piece_on(mv.from) == Some(Piece::Pawn)
            && mv.from.file() != mv.to.file()
            && self.board.piece_on(mv.to).is_none()
    }

    fn gives_check(&self, mv: Move) -> bool {
        let mut child = self.board.clone();
        child.play(mv);
        !child.checkers().is_empty()
    }

    fn is_checkmate(&self) -> bool { self.in_check() && !self.has_legal_move() }

    fn is_stalemate(&self) -> bool { !self.in_check() && !self.has_legal_move() }

    fn is_insufficient_material(&self) -> bool {
        let b = &self.board;
        let heavy = b.pieces(Piece::Pawn) | b.pieces(Piece::Rook) | b.pieces(Piece::Queen);
        if !heavy.is_empty() { return false; }
        let knights = b.pieces(Piece::Knight).into_iter().count();
        let bishops: Vec<Square> = b.pieces(Piece::Bishop).into_iter().collect();
        if knights + bishops.len() <= 1 { return true; }
        if knights > 0 { return false; }
        let shade = |sq: Square| (sq as usize / 8 + sq as usize % 8) % 2;
        bishops.iter().all(|&sq| shade(sq) == shade(bishops[0]))
    }

    fn is_game_over(&self) -> bool {
        !self.has_legal_move()
            || self.is_insufficient_material()
            || self.board.halfmove_clock() >= 100
            || self.is_fivefold_repetition()
    }

    fn signature(&self) -> u64 { zobrist::compute(&self.board) }

    fn side_to_move(&self) -> Side {
        if self.board.side_to_move() == Color::White { Side::Maximizing } else { Side::Minimizing }
    }
}
