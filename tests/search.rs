use speed_chess::board::Board;
use speed_chess::config::EngineConfig;
use speed_chess::evaluation::MATE_SCORE;
use speed_chess::search::SearchEngine;
use speed_chess::types::{PieceKind, Side};

fn engine(depth: f64) -> SearchEngine {
    SearchEngine::new(EngineConfig {
        depth,
        ..EngineConfig::default()
    })
    .unwrap()
}

#[test]
fn black_finds_back_rank_mate() {
    let mut board = Board::from_fen("r5k1/8/8/8/8/8/5PPP/6K1 b - - 0 1").unwrap();
    let result = engine(2.0).search(&mut board, Side::Black).unwrap();
    assert_eq!((result.best_move.from, result.best_move.to), (56, 0));
    assert_eq!(result.score, MATE_SCORE);
}

#[test]
fn fractional_depth_still_moves() {
    let mut board = Board::new();
    let result = engine(0.5).search(&mut board, Side::White).unwrap();
    assert!(board.legal_moves(Side::White).moves().contains(&result.best_move));
}

#[test]
fn prefers_winning_material() {
    // the knight can take an undefended rook
    let mut board = Board::from_fen("4k3/8/8/3r4/8/4N3/8/4K3 w - - 0 1").unwrap();
    let result = engine(2.0).search(&mut board, Side::White).unwrap();
    assert_eq!(result.best_move.captured.map(|p| p.kind), Some(PieceKind::Rook));
    assert_eq!(result.best_move.to, 35);
}

#[test]
fn stalemated_side_has_no_move() {
    let mut board = Board::from_fen("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1").unwrap();
    assert!(engine(2.0).search(&mut board, Side::Black).is_none());
}

#[test]
fn repeated_searches_reuse_the_cache() {
    let fen = "r1bqkbnr/pppp1ppp/2n5/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R w KQkq - 2 3";
    let mut board = Board::from_fen(fen).unwrap();
    let before = board.clone();
    let mut engine = engine(2.0);

    let first = engine.search(&mut board, Side::White).unwrap();
    let hits = engine.evaluator().cache().hits;
    let second = engine.search(&mut board, Side::White).unwrap();

    assert_eq!(first.best_move, second.best_move);
    assert_eq!(first.score, second.score);
    assert!(engine.evaluator().cache().hits > hits);
    assert_eq!(board, before);
}
