//! Terminal board diagrams for the REPL and debugging.
//!
//! Pieces print as FEN letters, or as Unicode glyphs in fancy mode. Empty
//! squares print as `⋅`. A side in check gets a banner next to the file legend.

use crate::game_state::{chess_types::*, position::Position};
use crate::move_generation::legal_move_checks::is_in_check;

pub fn render_position(position: &Position, fancy: bool) -> String {
    let mut out = String::from("  a b c d e f g h");
    if is_in_check(position, position.side_to_move) {
        out.push_str(&format!("  Check to {}", position.side_to_move));
    }
    out.push('\n');

    for rank in (0..8u8).rev() {
        out.push(char::from(b'1' + rank));
        for file in 0..8u8 {
            let piece = position.piece_at(make_square(rank, file));
            let symbol = if fancy { piece.glyph() } else { piece.fen_char() };
            out.push(' ');
            out.push(symbol.unwrap_or('⋅'));
        }
        out.push('\n');
    }

    out
}

#[cfg(test)]
mod tests {
    use super::render_position;
    use crate::game_state::position::Position;

    #[test]
    fn start_position_diagram() {
        let text = render_position(&Position::new_game(), false);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "  a b c d e f g h");
        assert_eq!(lines[1], "8 r n b q k b n r");
        assert_eq!(lines[5], "4 ⋅ ⋅ ⋅ ⋅ ⋅ ⋅ ⋅ ⋅");
        assert_eq!(lines[8], "1 R N B Q K B N R");
    }

    #[test]
    fn fancy_mode_uses_glyphs_and_check_banner() {
        let position =
            Position::from_fen("4k3/8/8/8/8/8/8/4R1K1 b - - 0 1").expect("valid fen");
        let text = render_position(&position, true);
        assert!(text.starts_with("  a b c d e f g h  Check to black\n"));
        assert!(text.contains('♚'));
        assert!(text.contains('♖'));
    }
}
