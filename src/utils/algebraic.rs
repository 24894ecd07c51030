//! Square coordinates (`e4`) to and from square indices.

use crate::game_state::chess_types::{file_of, rank_of, Square};

/// Parse a coordinate such as `"e4"`; case-insensitive on the file letter.
#[inline]
pub fn algebraic_to_square(square: &str) -> Option<Square> {
    let bytes = square.as_bytes();
    if bytes.len() != 2 {
        return None;
    }

    let file = bytes[0].to_ascii_lowercase();
    let rank = bytes[1];
    if !(b'a'..=b'h').contains(&file) || !(b'1'..=b'8').contains(&rank) {
        return None;
    }

    Some((rank - b'1') * 8 + (file - b'a'))
}

/// Coordinate of a square index in `0..=63`.
#[inline]
pub fn square_to_algebraic(square: Square) -> String {
    debug_assert!(square < 64);
    let file_char = char::from(b'a' + file_of(square));
    let rank_char = char::from(b'1' + rank_of(square));
    format!("{file_char}{rank_char}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corners_and_centre() {
        assert_eq!(algebraic_to_square("a1"), Some(0));
        assert_eq!(algebraic_to_square("h8"), Some(63));
        assert_eq!(algebraic_to_square("E4"), Some(28));
        assert_eq!(square_to_algebraic(28), "e4");
    }

    #[test]
    fn rejects_off_board_coordinates() {
        assert_eq!(algebraic_to_square("i1"), None);
        assert_eq!(algebraic_to_square("a9"), None);
        assert_eq!(algebraic_to_square("a10"), None);
        assert_eq!(algebraic_to_square(""), None);
    }
}
