use kingside::game_state::position::Position;
use kingside::game_state::position_tree::PositionTree;
use kingside::move_generation::legal_move_generator::{legal_moves, LegalMoveGenerator};
use kingside::move_generation::perft::perft_nodes;

const KIWIPETE: &str = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";
const ROOK_ENDGAME: &str = "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1";
const PROMOTIONS: &str = "r2q1rk1/pP1p2pp/Q4n2/bbp1p3/Np6/1B3NBn/pPPP1PPP/R3K2R b KQ - 0 1";
const MIDDLEGAME: &str = "rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R w KQ - 1 8";

fn assert_perft(fen: &str, expected: &[u64]) {
    let position = Position::from_fen(fen).expect("valid fen");
    for (index, &nodes) in expected.iter().enumerate() {
        let depth = index as u8 + 1;
        assert_eq!(
            perft_nodes(&LegalMoveGenerator, &position, depth),
            nodes,
            "{fen} at depth {depth}"
        );
    }
}

#[test]
fn start_position() {
    assert_perft(
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
        &[20, 400, 8902],
    );
}

#[test]
fn kiwipete() {
    assert_perft(KIWIPETE, &[48, 2039]);
}

#[test]
fn rook_endgame_with_en_passant_pins() {
    assert_perft(ROOK_ENDGAME, &[14, 191, 2812]);
}

#[test]
fn promotions_and_castling_rights() {
    assert_perft(PROMOTIONS, &[6, 264, 9467]);
}

#[test]
fn middlegame_with_checks() {
    assert_perft(MIDDLEGAME, &[44, 1486]);
}

/// Plays every legal move two plies deep and checks that the hashes after
/// undo match both the stored frame and a from-scratch recomputation.
fn assert_hashes_restored(fen: &str) {
    let mut tree = PositionTree::new(Position::from_fen(fen).expect("valid fen"));
    for first in legal_moves(tree.current()) {
        let before = *tree.current();
        tree.make_move(first);

        let child = *tree.current();
        assert_eq!(
            (child.zobrist_key, child.pawn_zobrist_key),
            child.compute_hashes(),
            "incremental hash after {first}"
        );
        for second in legal_moves(&child) {
            tree.make_move(second);
            assert_eq!(
                tree.current().zobrist_key,
                tree.current().compute_hashes().0,
                "incremental hash after {first} {second}"
            );
            tree.undo_move();
            assert_eq!(*tree.current(), child);
        }

        tree.undo_move();
        assert_eq!(*tree.current(), before);
        assert_eq!(before.compute_hashes(), (before.zobrist_key, before.pawn_zobrist_key));
    }
}

#[test]
fn hashes_survive_make_and_undo() {
    for fen in [KIWIPETE, ROOK_ENDGAME, PROMOTIONS, MIDDLEGAME] {
        assert_hashes_restored(fen);
    }
}

#[test]
fn fen_round_trip_preserves_everything() {
    for fen in [KIWIPETE, ROOK_ENDGAME, PROMOTIONS, MIDDLEGAME] {
        let position = Position::from_fen(fen).expect("valid fen");
        assert_eq!(position.to_fen(), fen);
        let reparsed = Position::from_fen(&position.to_fen()).expect("round trip");
        assert_eq!(reparsed, position);
    }
}
