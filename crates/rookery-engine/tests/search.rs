//! Integration tests for move selection.
//!
//! Verifies correctness (legal moves, mate detection, strategy agreement)
//! and the apply/revert contract across whole searches.

use rookery_core::{CastleRights, Position, Snapshot, generate_legal_moves};
use rookery_engine::{CHECKMATE, SearchConfig, SearchResult, Searcher, Strategy, choose_move};

const SCHOLARS_MATE: &str = "r1bqkb1r/pppp1ppp/2n2n2/4p2Q/2B1P3/8/PPPP1PPP/RNB1K1NR w";

const SICILIAN: &str = "rnbqkbnr/pp1ppppp/8/2p5/4P3/8/PPPP1PPP/RNBQKBNR w";

const RUY_LOPEZ: &str = "r1bqkbnr/pppp1ppp/2n5/1B2p3/4P3/5N2/PPPP1PPP/RNBQK2R b";

const ENDGAME: &str = "8/8/8/3k4/8/3K4/4P3/8 w";

fn position(placement: &str) -> Position {
    placement
        .parse::<Snapshot>()
        .unwrap_or_else(|e| panic!("invalid placement {placement}: {e}"))
        .into_position()
        .unwrap()
}

/// Helper: search `position` with a fixed move order.
fn search_fixed(position: &mut Position, strategy: Strategy, depth: u8) -> SearchResult {
    let config = SearchConfig {
        depth,
        strategy,
        shuffle: false,
        ..SearchConfig::default()
    };
    Searcher::new(config).search(position).unwrap()
}

// ── Basic correctness ─────────────────────────────────────────────────────────

#[test]
fn returns_legal_move_from_start() {
    let mut pos = Position::new_game();
    let mv = choose_move(&mut pos, &SearchConfig::default()).unwrap().unwrap();
    assert!(generate_legal_moves(&mut pos).contains(&mv));
    assert_eq!(pos, Position::new_game(), "search must hand the position back untouched");
}

#[test]
fn every_strategy_finds_mate_in_one() {
    for strategy in [Strategy::Minimax, Strategy::AlphaBeta, Strategy::Shallow] {
        let mut pos = position(SCHOLARS_MATE);
        let config = SearchConfig {
            strategy,
            seed: Some(42),
            ..SearchConfig::default()
        };
        let result = Searcher::new(config).search(&mut pos).unwrap();
        assert_eq!(
            result.best_move.map(|mv| mv.to_coordinate()).as_deref(),
            Some("h5f7"),
            "{strategy} should find Qxf7#"
        );
        assert_eq!(result.score, CHECKMATE);
    }
}

#[test]
fn black_prefers_negative_scores() {
    // Black to move wins the loose white queen.
    let mut pos = position("3rk3/8/8/8/3Q4/8/8/7K b");
    let result = search_fixed(&mut pos, Strategy::AlphaBeta, 2);
    let best = result.best_move.unwrap();
    assert_eq!(best.to_coordinate(), "d8d4");
    assert!(result.score < 0);
}

#[test]
fn various_positions_return_moves() {
    for (name, placement) in [
        ("Sicilian Defence", SICILIAN),
        ("Ruy Lopez", RUY_LOPEZ),
        ("King+pawn endgame", ENDGAME),
    ] {
        let mut pos = position(placement);
        let before = pos.clone();
        let result = search_fixed(&mut pos, Strategy::AlphaBeta, 3);
        assert!(result.best_move.is_some(), "{name} returned no move");
        assert_eq!(pos, before, "{name} left the position modified");
    }
}

// ── Strategy agreement ────────────────────────────────────────────────────────

#[test]
fn alpha_beta_matches_minimax_with_fewer_nodes() {
    let mut pos = position("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w")
        .with_castling(CastleRights::ALL);
    let full = search_fixed(&mut pos, Strategy::Minimax, 2);
    let pruned = search_fixed(&mut pos, Strategy::AlphaBeta, 2);
    assert_eq!(full.score, pruned.score);
    assert_eq!(full.best_move, pruned.best_move);
    assert!(pruned.nodes < full.nodes, "{} !< {}", pruned.nodes, full.nodes);
}

#[test]
fn shallow_searches_one_ply() {
    let mut pos = Position::new_game();
    let result = search_fixed(&mut pos, Strategy::Shallow, 4);
    assert_eq!(result.depth, 1);
    // Root plus its 20 children.
    assert_eq!(result.nodes, 21);
}

// ── Terminal roots ────────────────────────────────────────────────────────────

#[test]
fn checkmated_root_has_no_move() {
    let mut pos = position("7k/8/8/7R/8/8/8/4K1R1 b");
    let result = search_fixed(&mut pos, Strategy::AlphaBeta, 2);
    assert_eq!(result.best_move, None);
    assert_eq!(result.score, CHECKMATE);
}

#[test]
fn stalemated_root_scores_zero() {
    let mut pos = position("8/8/8/8/8/1q6/2k5/K7 w");
    let result = search_fixed(&mut pos, Strategy::Minimax, 2);
    assert_eq!(result.best_move, None);
    assert_eq!(result.score, 0);
}

// ── Seeding ───────────────────────────────────────────────────────────────────

#[test]
fn same_seed_same_game() {
    let config = SearchConfig {
        seed: Some(1234),
        ..SearchConfig::default()
    };
    let play = || {
        let mut pos = Position::new_game();
        let mut moves = Vec::new();
        for _ in 0..6 {
            let mv = choose_move(&mut pos, &config).unwrap().unwrap();
            pos.apply_move(mv).unwrap();
            moves.push(mv);
        }
        moves
    };
    assert_eq!(play(), play());
}

// ── Independent copies per worker ─────────────────────────────────────────────

#[test]
fn cloned_positions_search_independently() {
    let base = position(SICILIAN);
    let results: Vec<SearchResult> = std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let mut own = base.clone();
                scope.spawn(move || search_fixed(&mut own, Strategy::AlphaBeta, 2))
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });
    for result in &results {
        assert_eq!(result.score, results[0].score);
        assert_eq!(result.best_move, results[0].best_move);
    }
}
