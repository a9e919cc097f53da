/// Returns the prefix of `s` holding at most `max_chars` characters.
///
/// Counts Unicode scalar values rather than bytes, so multi-byte text is
/// never split inside a character.
#[must_use]
pub fn truncate_chars(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shorter_input_is_unchanged() {
        assert_eq!(truncate_chars("abc", 10), "abc");
        assert_eq!(truncate_chars("", 3), "");
    }

    #[test]
    fn truncates_at_exact_char_count() {
        assert_eq!(truncate_chars("abcdef", 4), "abcd");
        assert_eq!(truncate_chars("abcd", 4), "abcd");
        assert_eq!(truncate_chars("abc", 0), "");
    }

    #[test]
    fn counts_multibyte_chars_once() {
        let s = "héllo wörld 世界";
        assert_eq!(truncate_chars(s, 2), "hé");
        assert_eq!(truncate_chars(s, 14).chars().count(), 14);
        assert_eq!(truncate_chars(s, 13), "héllo wörld 世");
    }
}
