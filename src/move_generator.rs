//! SpeedChess - Move Generator Module
//!
//! Generates pseudo-legal moves per piece kind from compass-direction
//! offsets, optionally filtered down to legal moves by a
//! make / check-test / unmake round trip. Moves onto friendly pieces are kept as
//! defending pseudo-moves for the evaluator.

use crate::bitboard::{bishop_attacks, rook_attacks, KING_ATTACKS, KNIGHT_ATTACKS, PAWN_ATTACKS};
use crate::board::Board;
use crate::chess_move::{Move, Moveset};
use crate::types::*;

/// Direction offsets for sliding pieces and the king
const ROOK_DIRECTIONS: [i32; 4] = [
    Direction::NORTH,
    Direction::SOUTH,
    Direction::EAST,
    Direction::WEST,
];
const BISHOP_DIRECTIONS: [i32; 4] = [
    Direction::NORTH_EAST,
    Direction::SOUTH_EAST,
    Direction::SOUTH_WEST,
    Direction::NORTH_WEST,
];
const ALL_DIRECTIONS: [i32; 8] = [
    Direction::NORTH,
    Direction::NORTH_EAST,
    Direction::EAST,
    Direction::SOUTH_EAST,
    Direction::SOUTH,
    Direction::SOUTH_WEST,
    Direction::WEST,
    Direction::NORTH_WEST,
];
const KNIGHT_OFFSETS: [i32; 8] = [17, 10, -6, -15, -17, -10, 6, 15];

/// Movement rule of a piece kind
enum Movement {
    Pawn,
    Slide(&'static [i32]),
    Step(&'static [i32]),
    Jump(&'static [i32]),
}

impl Movement {
    const fn of(kind: PieceKind) -> Movement {
        match kind {
            PieceKind::Pawn => Movement::Pawn,
            PieceKind::Rook => Movement::Slide(&ROOK_DIRECTIONS),
            PieceKind::Bishop => Movement::Slide(&BISHOP_DIRECTIONS),
            PieceKind::Queen => Movement::Slide(&ALL_DIRECTIONS),
            PieceKind::Knight => Movement::Jump(&KNIGHT_OFFSETS),
            PieceKind::King => Movement::Step(&ALL_DIRECTIONS),
        }
    }
}

/// Move generator for chess positions
pub struct MoveGenerator;

impl MoveGenerator {
    /// Generate every move for `side`. With `legal_only`, playable moves that
    /// leave `side` in check are dropped; defending moves are never filtered.
    pub fn generate_moves(board: &mut Board, side: Side, legal_only: bool) -> Moveset {
        let mut gen = Generation {
            side,
            legal_only,
            moves: Moveset::new(),
        };

        for kind in PieceKind::ALL {
            let mover = Piece::new(kind, side);
            for sq in board.bitboard(mover).squares() {
                match Movement::of(kind) {
                    Movement::Pawn => gen.pawn_moves(board, sq),
                    Movement::Slide(dirs) => gen.sliding_moves(board, mover, sq, dirs),
                    Movement::Step(dirs) => gen.step_moves(board, mover, sq, dirs),
                    Movement::Jump(offsets) => gen.jump_moves(board, mover, sq, offsets),
                }
            }
            if kind == PieceKind::King {
                gen.castling_moves(board);
            }
        }

        gen.moves
    }

    /// Check if a square is attacked by any piece of `by`
    pub fn is_square_attacked(board: &Board, sq: usize, by: Side) -> bool {
        let bb = |kind| board.bitboard(Piece::new(kind, by)).0;
        let occupied = board.occupied().0;

        // A pawn of `by` attacks sq if sq's opposite-colour pawn pattern hits it
        if PAWN_ATTACKS[by.opponent().index()][sq] & bb(PieceKind::Pawn) != 0 {
            return true;
        }
        if KNIGHT_ATTACKS[sq] & bb(PieceKind::Knight) != 0 {
            return true;
        }
        if KING_ATTACKS[sq] & bb(PieceKind::King) != 0 {
            return true;
        }

        let queens = bb(PieceKind::Queen);
        if bishop_attacks(sq, occupied) & (bb(PieceKind::Bishop) | queens) != 0 {
            return true;
        }
        rook_attacks(sq, occupied) & (bb(PieceKind::Rook) | queens) != 0
    }

    /// Count leaf nodes of the legal move tree to `depth` plies
    pub fn perft(board: &mut Board, side: Side, depth: u32) -> u64 {
        if depth == 0 {
            return 1;
        }

        let moves = MoveGenerator::generate_moves(board, side, true);
        if depth == 1 {
            return moves.len() as u64;
        }

        let mut nodes = 0;
        for mv in moves.moves() {
            board.make_move(mv);
            nodes += MoveGenerator::perft(board, side.opponent(), depth - 1);
            board.unmake_move();
        }
        nodes
    }
}

/// One step along `dir` from `sq`, or None when it would leave the board or
/// wrap around a file edge
#[inline]
fn step(sq: usize, dir: i32) -> Option<usize> {
    let file = file_of(sq);
    let wraps = match dir {
        Direction::EAST | Direction::NORTH_EAST | Direction::SOUTH_EAST => file == 7,
        Direction::WEST | Direction::NORTH_WEST | Direction::SOUTH_WEST => file == 0,
        _ => false,
    };
    if wraps {
        return None;
    }

    let dest = sq as i32 + dir;
    (0..64).contains(&dest).then_some(dest as usize)
}

/// Per-call generation state
struct Generation {
    side: Side,
    legal_only: bool,
    moves: Moveset,
}

impl Generation {
    /// Record a move, probing legality when requested
    fn add(&mut self, board: &mut Board, mv: Move) {
        if self.legal_only && !mv.is_defending_own_piece {
            board.make_move(&mv);
            let exposed = board.in_check(self.side);
            board.unmake_move();
            if exposed {
                return;
            }
        }
        self.moves.push(mv);
    }

    /// Quiet move, capture or defense depending on the destination
    fn add_to(&mut self, board: &mut Board, mover: Piece, from: usize, to: usize) {
        let mv = match board.piece_at(to) {
            Some(occupant) => Move::onto(mover, from, to, occupant),
            None => Move::new(mover, from, to),
        };
        let mv = self.with_castle_rights(board, mv);
        self.add(board, mv);
    }

    /// Flag the castling rights a king or corner-rook move gives up
    fn with_castle_rights(&self, board: &Board, mut mv: Move) -> Move {
        if mv.is_defending_own_piece {
            return mv;
        }
        let base = self.side.back_rank() * 8;
        let kingside = board.can_castle_kingside(self.side);
        let queenside = board.can_castle_queenside(self.side);

        match mv.mover.kind {
            PieceKind::King => {
                mv.disables_kingside_castle = kingside;
                mv.disables_queenside_castle = queenside;
            }
            PieceKind::Rook if mv.from == base + 7 => mv.disables_kingside_castle = kingside,
            PieceKind::Rook if mv.from == base => mv.disables_queenside_castle = queenside,
            _ => {}
        }
        mv
    }

    fn pawn_moves(&mut self, board: &mut Board, sq: usize) {
        let pawn = Piece::new(PieceKind::Pawn, self.side);
        let (forward, start_rank, promo_rank) = match self.side {
            Side::White => (Direction::NORTH, 1, 7),
            Side::Black => (Direction::SOUTH, 6, 0),
        };
        let promote = |mut mv: Move| {
            if rank_of(mv.to) == promo_rank && !mv.is_defending_own_piece {
                mv.promotes_to = Some(PieceKind::Queen);
            }
            mv
        };

        // Pushes
        if let Some(one) = step(sq, forward) {
            if board.piece_at(one).is_none() {
                self.add(board, promote(Move::new(pawn, sq, one)));

                if rank_of(sq) == start_rank {
                    if let Some(two) = step(one, forward) {
                        if board.piece_at(two).is_none() {
                            self.add(board, Move::new(pawn, sq, two));
                        }
                    }
                }
            }
        }

        // Diagonals: captures onto enemies, defenses onto friends
        for lateral in [Direction::WEST, Direction::EAST] {
            let Some(target) = step(sq, lateral).and_then(|s| step(s, forward)) else {
                continue;
            };
            if let Some(occupant) = board.piece_at(target) {
                self.add(board, promote(Move::onto(pawn, sq, target, occupant)));
            }
        }
    }

    fn sliding_moves(&mut self, board: &mut Board, mover: Piece, sq: usize, dirs: &[i32]) {
        for &dir in dirs {
            let mut current = sq;
            while let Some(next) = step(current, dir) {
                let blocked = board.piece_at(next).is_some();
                self.add_to(board, mover, sq, next);
                if blocked {
                    break;
                }
                current = next;
            }
        }
    }

    fn step_moves(&mut self, board: &mut Board, mover: Piece, sq: usize, dirs: &[i32]) {
        for &dir in dirs {
            if let Some(next) = step(sq, dir) {
                self.add_to(board, mover, sq, next);
            }
        }
    }

    fn jump_moves(&mut self, board: &mut Board, mover: Piece, sq: usize, offsets: &[i32]) {
        let file = file_of(sq) as i32;
        let rank = rank_of(sq) as i32;

        for &offset in offsets {
            let dest = sq as i32 + offset;
            if !(0..64).contains(&dest) {
                continue;
            }
            let dest = dest as usize;

            // Reject jumps that wrapped around a board edge
            if (file_of(dest) as i32 - file).abs() > 2 || (rank_of(dest) as i32 - rank).abs() > 2 {
                continue;
            }
            self.add_to(board, mover, sq, dest);
        }
    }

    /// King two squares towards a home-square rook over empty squares
    fn castling_moves(&mut self, board: &mut Board) {
        let side = self.side;
        let base = side.back_rank() * 8;
        let king = Piece::new(PieceKind::King, side);
        let rook = Piece::new(PieceKind::Rook, side);

        if !board.bitboard(king).get(base + 4) {
            return;
        }
        let kingside = board.can_castle_kingside(side);
        let queenside = board.can_castle_queenside(side);
        if !kingside && !queenside {
            return;
        }
        if self.legal_only && board.in_check(side) {
            return;
        }

        // The destination square is covered by the legality check in `add`
        let empty = board.empty_squares();
        let short_ok = kingside
            && board.bitboard(rook).get(base + 7)
            && empty.get(base + 5)
            && empty.get(base + 6);
        let long_ok = queenside
            && board.bitboard(rook).get(base)
            && empty.get(base + 1)
            && empty.get(base + 2)
            && empty.get(base + 3);

        let castle = Move {
            disables_kingside_castle: kingside,
            disables_queenside_castle: queenside,
            ..Move::new(king, base + 4, base + 4)
        };

        if short_ok {
            let mv = Move {
                to: base + 6,
                is_kingside_castle: true,
                ..castle
            };
            self.add(board, mv);
        }

        if long_ok {
            let mv = Move {
                to: base + 2,
                is_queenside_castle: true,
                ..castle
            };
            self.add(board, mv);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(fen: &str) -> Board {
        Board::from_fen(fen).unwrap()
    }

    fn destinations(set: &Moveset, from: usize) -> Vec<usize> {
        let mut to: Vec<usize> = set
            .moves()
            .iter()
            .filter(|m| m.from == from)
            .map(|m| m.to)
            .collect();
        to.sort();
        to
    }

    #[test]
    fn steps_do_not_wrap() {
        assert_eq!(step(7, Direction::EAST), None);
        assert_eq!(step(8, Direction::WEST), None);
        assert_eq!(step(15, Direction::NORTH_EAST), None);
        assert_eq!(step(56, Direction::NORTH), None);
        assert_eq!(step(3, Direction::SOUTH_WEST), None);
        assert_eq!(step(9, Direction::SOUTH_WEST), Some(0));
    }

    #[test]
    fn starting_position_has_twenty_moves() {
        let mut b = Board::new();
        assert_eq!(MoveGenerator::generate_moves(&mut b, Side::White, true).len(), 20);
        assert_eq!(MoveGenerator::generate_moves(&mut b, Side::Black, true).len(), 20);
        assert_eq!(MoveGenerator::generate_moves(&mut b, Side::White, false).len(), 20);
    }

    #[test]
    fn rook_on_edge_stays_on_board() {
        let mut b = board("4k3/8/8/8/8/8/8/K6R w - - 0 1");
        let set = MoveGenerator::generate_moves(&mut b, Side::White, false);
        // h1 rook: h2..h8 plus g1..b1
        assert_eq!(destinations(&set, 7), vec![1, 2, 3, 4, 5, 6, 15, 23, 31, 39, 47, 55, 63]);
    }

    #[test]
    fn knight_in_corner() {
        let mut b = board("4k3/8/8/8/8/8/8/N3K3 w - - 0 1");
        let set = MoveGenerator::generate_moves(&mut b, Side::White, false);
        assert_eq!(destinations(&set, 0), vec![10, 17]);
    }

    #[test]
    fn sliders_stop_at_blockers() {
        // bishop c1 blocked by own pawn d2 and enemy pawn a3 (via b2)
        let mut b = board("4k3/8/8/8/8/p7/3P4/2B1K3 w - - 0 1");
        let set = MoveGenerator::generate_moves(&mut b, Side::White, false);
        assert_eq!(destinations(&set, 2), vec![9, 16]);

        let capture = set.find(2, 16).unwrap();
        assert!(capture.is_capture());
        assert_eq!(set.moves()[0], capture);

        let defense = set.defenses().iter().find(|m| m.from == 2).unwrap();
        assert_eq!(defense.to, 11);
        assert_eq!(defense.captured, Some(Piece::new(PieceKind::Pawn, Side::White)));
    }

    #[test]
    fn pawn_pushes_and_captures() {
        let mut b = board("4k3/8/8/8/8/3n1n2/4P3/K7 w - - 0 1");
        let set = MoveGenerator::generate_moves(&mut b, Side::White, true);
        assert_eq!(destinations(&set, 12), vec![19, 20, 21, 28]);

        // double push blocked by a piece directly in front
        let mut b = board("4k3/8/8/8/8/4n3/4P3/K7 w - - 0 1");
        let set = MoveGenerator::generate_moves(&mut b, Side::White, false);
        assert!(destinations(&set, 12).is_empty());
    }

    #[test]
    fn pawns_defend_diagonally() {
        let mut b = board("4k3/8/8/8/8/3N4/4P3/4K3 w - - 0 1");
        let set = MoveGenerator::generate_moves(&mut b, Side::White, true);
        assert!(set.defenses().iter().any(|m| m.from == 12 && m.to == 19));
        assert!(set.find(12, 19).is_none());
    }

    #[test]
    fn black_pawns_move_down() {
        let mut b = board("4k3/3p4/8/8/8/8/8/4K3 b - - 0 1");
        let set = MoveGenerator::generate_moves(&mut b, Side::Black, true);
        assert_eq!(destinations(&set, 51), vec![35, 43]);
    }

    #[test]
    fn pinned_piece_cannot_move() {
        // white knight e2 pinned by rook e8
        let mut b = board("4r2k/8/8/8/8/8/4N3/4K3 w - - 0 1");
        let legal = MoveGenerator::generate_moves(&mut b, Side::White, true);
        assert!(destinations(&legal, 12).is_empty());
        let pseudo = MoveGenerator::generate_moves(&mut b, Side::White, false);
        assert_eq!(destinations(&pseudo, 12).len(), 6);
    }

    #[test]
    fn castling_generated_with_rights() {
        let mut b = board("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1");
        let set = MoveGenerator::generate_moves(&mut b, Side::White, true);
        let short = set.find(4, 6).unwrap();
        assert!(short.is_kingside_castle);
        assert!(short.disables_kingside_castle && short.disables_queenside_castle);
        let long = set.find(4, 2).unwrap();
        assert!(long.is_queenside_castle);

        let mut b = board("r3k2r/8/8/8/8/8/8/R3K2R w - - 0 1");
        let set = MoveGenerator::generate_moves(&mut b, Side::White, true);
        assert!(set.find(4, 6).is_none());
        assert!(set.find(4, 2).is_none());
    }

    #[test]
    fn castling_blocked_or_in_check() {
        // knight on g1 blocks the short side
        let mut b = board("4k3/8/8/8/8/8/8/R3K1NR w KQ - 0 1");
        let set = MoveGenerator::generate_moves(&mut b, Side::White, true);
        assert!(set.find(4, 6).is_none());
        assert!(set.find(4, 2).is_some());

        // rook on e8 gives check
        let mut b = board("4r2k/8/8/8/8/8/8/R3K2R w KQ - 0 1");
        let set = MoveGenerator::generate_moves(&mut b, Side::White, true);
        assert!(set.find(4, 6).is_none());
        assert!(set.find(4, 2).is_none());
    }

    #[test]
    fn castling_ignores_attacked_transit() {
        // the f2 rook eyes f1, which the king only passes over
        let mut b = board("4k3/8/8/8/8/8/5r2/4K2R w K - 0 1");
        let set = MoveGenerator::generate_moves(&mut b, Side::White, true);
        assert!(set.find(4, 6).is_some_and(|mv| mv.is_kingside_castle));
    }

    #[test]
    fn king_and_rook_moves_flag_rights() {
        let mut b = board("4k3/8/8/8/8/8/8/R3K2R w KQ - 0 1");
        let set = MoveGenerator::generate_moves(&mut b, Side::White, true);

        let king_step = set.find(4, 12).unwrap();
        assert!(king_step.disables_kingside_castle && king_step.disables_queenside_castle);

        let rook_h = set.find(7, 15).unwrap();
        assert!(rook_h.disables_kingside_castle && !rook_h.disables_queenside_castle);

        let rook_a = set.find(0, 8).unwrap();
        assert!(rook_a.disables_queenside_castle && !rook_a.disables_kingside_castle);
    }

    #[test]
    fn attack_detection() {
        let b = board("4k3/8/8/8/8/8/3p4/4K3 w - - 0 1");
        assert!(MoveGenerator::is_square_attacked(&b, 4, Side::Black));
        assert!(b.in_check(Side::White));
        assert!(!MoveGenerator::is_square_attacked(&b, 3, Side::Black));

        let b = board("4k3/8/8/8/8/8/8/q3K3 w - - 0 1");
        assert!(b.in_check(Side::White));
        let b = board("4k3/8/8/8/8/8/8/q2NK3 w - - 0 1");
        assert!(!b.in_check(Side::White));
    }

    #[test]
    fn perft_shallow() {
        let mut b = Board::new();
        assert_eq!(MoveGenerator::perft(&mut b, Side::White, 1), 20);
        assert_eq!(MoveGenerator::perft(&mut b, Side::White, 2), 400);
        assert_eq!(b, Board::new());
    }
}
