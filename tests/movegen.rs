use speed_chess::board::{Board, STARTING_FEN};
use speed_chess::move_generator::MoveGenerator;
use speed_chess::types::{PieceKind, Side};

struct PerftCase {
    name: &'static str,
    fen: &'static str,
    expected_nodes: &'static [u64],
}

// Depths chosen so that no en passant or under-promotion occurs in the tree
const CASES: &[PerftCase] = &[
    PerftCase {
        name: "start",
        fen: STARTING_FEN,
        expected_nodes: &[20, 400, 8902],
    },
    PerftCase {
        name: "kiwipete",
        fen: "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
        expected_nodes: &[48],
    },
    PerftCase {
        name: "rook_endgame",
        fen: "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
        expected_nodes: &[14, 191],
    },
];

#[test]
fn perft_counts() {
    for case in CASES {
        let mut board = Board::from_fen(case.fen).unwrap();
        let side = board.side_to_move();
        for (i, &expected) in case.expected_nodes.iter().enumerate() {
            let depth = i as u32 + 1;
            assert_eq!(
                MoveGenerator::perft(&mut board, side, depth),
                expected,
                "{} at depth {}",
                case.name,
                depth
            );
        }
        assert_eq!(board, Board::from_fen(case.fen).unwrap(), "{} board restored", case.name);
    }
}

#[test]
fn start_position_both_sides() {
    let mut board = Board::new();
    for side in Side::BOTH {
        let moves = board.legal_moves(side);
        assert_eq!(moves.len(), 20);
        assert!(moves.moves().iter().all(|mv| !mv.is_capture()));
        assert!(moves.moves().iter().all(|mv| mv.mover.side == side));
    }
}

#[test]
fn captures_come_first() {
    let mut board = Board::from_fen("4k3/8/8/3p4/4P3/8/8/R3K3 w - - 0 1").unwrap();
    let moves = board.legal_moves(Side::White);
    let first_quiet = moves
        .moves()
        .iter()
        .position(|mv| !mv.is_capture())
        .unwrap();
    assert!(first_quiet > 0);
    assert!(moves.moves()[first_quiet..].iter().all(|mv| !mv.is_capture()));
}

#[test]
fn defenses_are_never_playable() {
    let mut board = Board::new();
    let pseudo = MoveGenerator::generate_moves(&mut board, Side::White, false);
    assert!(!pseudo.defenses().is_empty());
    for mv in pseudo.defenses() {
        assert!(mv.is_defending_own_piece);
        let target = mv.captured.unwrap();
        assert_eq!(target.side, Side::White);
    }
    assert!(pseudo.moves().iter().all(|mv| !mv.is_defending_own_piece));
}

#[test]
fn pinned_piece_stays_put() {
    // the e2 knight is pinned against the king by the e8 rook
    let mut board = Board::from_fen("4r2k/8/8/8/8/8/4N3/4K3 w - - 0 1").unwrap();
    let legal = board.legal_moves(Side::White);
    assert!(legal.moves().iter().all(|mv| mv.mover.kind != PieceKind::Knight));

    let pseudo = MoveGenerator::generate_moves(&mut board, Side::White, false);
    assert!(pseudo.moves().iter().any(|mv| mv.mover.kind == PieceKind::Knight));
}

#[test]
fn only_queen_promotions() {
    let mut board = Board::from_fen("1n5k/P7/8/8/8/8/8/K7 w - - 0 1").unwrap();
    let promotions: Vec<_> = board
        .legal_moves(Side::White)
        .moves()
        .iter()
        .filter(|mv| mv.mover.kind == PieceKind::Pawn)
        .copied()
        .collect();
    // a8 push and the b8 capture
    assert_eq!(promotions.len(), 2);
    assert!(promotions.iter().all(|mv| mv.promotes_to == Some(PieceKind::Queen)));
}
