//! Text helpers shared by the gate heuristics.

/// Check if a character is CJK (Han, Hiragana, Katakana or Hangul syllables).
#[must_use]
pub const fn is_cjk(ch: char) -> bool {
    matches!(
        ch,
        '\u{4E00}'..='\u{9FFF}'     // CJK Unified Ideographs
            | '\u{3040}'..='\u{309F}' // Hiragana
            | '\u{30A0}'..='\u{30FF}' // Katakana
            | '\u{AC00}'..='\u{D7AF}' // Hangul Syllables
    )
}

/// Whether any character of `text` is CJK.
#[must_use]
pub fn contains_cjk(text: &str) -> bool {
    text.chars().any(is_cjk)
}

/// Whether `text` carries an ASCII or full-width question mark.
#[must_use]
pub fn has_question_mark(text: &str) -> bool {
    text.contains(['?', '？'])
}

/// Length in UTF-16 code units; an astral-plane emoji counts as 2.
#[must_use]
pub fn utf16_len(text: &str) -> usize {
    text.encode_utf16().count()
}

/// Strip surrounding whitespace, including a stray byte-order mark.
#[must_use]
pub fn trim_query(query: &str) -> &str {
    query.trim_matches(|c: char| c.is_whitespace() || c == '\u{FEFF}')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_cjk() {
        assert!(is_cjk('记'));
        assert!(is_cjk('か'));
        assert!(is_cjk('カ'));
        assert!(is_cjk('한'));
        assert!(!is_cjk('a'));
        assert!(!is_cjk('？'));
    }

    #[test]
    fn test_contains_cjk() {
        assert!(contains_cjk("hello 世界"));
        assert!(!contains_cjk("hello world"));
        assert!(!contains_cjk(""));
    }

    #[test]
    fn test_has_question_mark() {
        assert!(has_question_mark("why?"));
        assert!(has_question_mark("为什么？"));
        assert!(!has_question_mark("because."));
    }

    #[test]
    fn test_utf16_len_counts_code_units() {
        assert_eq!(utf16_len("你记得吗"), 4);
        assert_eq!(utf16_len("abc"), 3);
        assert_eq!(utf16_len(""), 0);
        assert_eq!(utf16_len("😀😀?"), 5);
        assert_eq!(utf16_len("谢谢你🎉🎉"), 7);
    }

    #[test]
    fn test_trim_query() {
        assert_eq!(trim_query("  hi \n"), "hi");
        assert_eq!(trim_query("\u{FEFF}hello\u{3000}"), "hello");
        assert_eq!(trim_query(" \t "), "");
    }
}
