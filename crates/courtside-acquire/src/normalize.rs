use unicode_normalization::UnicodeNormalization;

/// Normalize a scraped text node to NFC form.
///
/// Keeps composed and decomposed spellings of accented names
/// (Dončić, Jokić) comparable once they reach the output table.
/// Whitespace is left untouched: the per-attribute parse rules decide
/// what counts as a separator.
pub fn normalize_text(input: &str) -> String {
    input.nfc().collect()
}

/// Take at most `n` characters (not bytes) from the front of `s`.
pub fn take_chars(s: &str, n: usize) -> &str {
    match s.char_indices().nth(n) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_nfc() {
        // c + combining caron -> č (precomposed)
        let decomposed = "Don\u{0063}\u{030C}i\u{0107}";
        assert_eq!(normalize_text(decomposed), "Dončić");
    }

    #[test]
    fn test_normalize_keeps_whitespace() {
        assert_eq!(normalize_text(" 6'8\" "), " 6'8\" ");
    }

    #[test]
    fn test_take_chars() {
        assert_eq!(take_chars("84.50 inches", 5), "84.50");
        assert_eq!(take_chars("84", 5), "84");
        assert_eq!(take_chars("é1234567", 5), "é1234");
        assert_eq!(take_chars("", 5), "");
    }
}
