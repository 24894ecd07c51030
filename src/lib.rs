//! Crate root module declarations for the Kingside chess engine.
//!
//! Exposes the attack tables, board model, move generation, search, engine
//! and front-end layers under stable module paths for the binary, the
//! integration tests and the benches.

pub mod chess_errors;

pub mod tables {
    pub mod attack_tables;
    pub mod bitboard;
    pub mod geometry;
    pub mod magic;
}

pub mod game_state {
    pub mod chess_rules;
    pub mod chess_types;
    pub mod position;
    pub mod position_tree;
    pub mod zobrist;
}

pub mod moves {
    pub mod bishop_moves;
    pub mod king_moves;
    pub mod knight_moves;
    pub mod move_descriptions;
    pub mod pawn_moves;
    pub mod queen_moves;
    pub mod rook_moves;
}

pub mod move_generation {
    pub mod evasions;
    pub mod legal_move_checks;
    pub mod legal_move_generator;
    pub mod legal_moves_king;
    pub mod legal_moves_pawn;
    pub mod move_list;
    pub mod perft;
}

pub mod search {
    pub mod board_scoring;
    pub mod game_status;
    pub mod iterative_deepening;
    pub mod search_context;
}

pub mod engines {
    pub mod engine_iterative;
    pub mod engine_trait;
    pub mod game;
    pub mod time_management;
}

pub mod uci {
    pub mod uci_top;
}

pub mod repl {
    pub mod repl_top;
}

pub mod utils {
    pub mod algebraic;
    pub mod dcf;
    pub mod fen_generator;
    pub mod fen_parser;
    pub mod long_algebraic;
    pub mod render_game_state;
}
