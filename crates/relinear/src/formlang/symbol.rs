//! Symbol types for automata transitions.

/// A symbol identifier. Real symbols are the digits of the binary alphabet.
/// The special value `EPSILON` represents a silent (empty) transition.
pub type SymbolId = u8;

/// Special symbol ID representing epsilon (silent) transitions.
/// We use u8::MAX as the epsilon marker.
pub const EPSILON: SymbolId = u8::MAX;

/// The real input alphabet, in canonical order.
pub const ALPHABET: [SymbolId; 2] = [0, 1];

/// Check if a symbol is an epsilon transition.
#[inline]
pub fn is_epsilon(symbol: SymbolId) -> bool {
    symbol == EPSILON
}

/// Map an input character to its symbol, if it belongs to the alphabet.
pub fn symbol_from_char(c: char) -> Option<SymbolId> {
    match c {
        '0' => Some(0),
        '1' => Some(1),
        _ => None,
    }
}

/// The character a real symbol is written as.
pub fn symbol_to_char(symbol: SymbolId) -> char {
    debug_assert!(!is_epsilon(symbol), "epsilon has no spelling");
    char::from(b'0' + symbol)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_epsilon() {
        assert!(is_epsilon(EPSILON));
        assert!(!is_epsilon(0));
        assert!(!is_epsilon(1));
        assert!(!ALPHABET.contains(&EPSILON));
    }

    #[test]
    fn test_char_mapping() {
        assert_eq!(symbol_from_char('0'), Some(0));
        assert_eq!(symbol_from_char('1'), Some(1));
        assert_eq!(symbol_from_char('2'), None);
        assert_eq!(symbol_from_char('+'), None);
        for symbol in ALPHABET {
            assert_eq!(symbol_from_char(symbol_to_char(symbol)), Some(symbol));
        }
    }
}
