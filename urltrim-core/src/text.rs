//! Char-counting helpers shared by the shortener.

/// Number of Unicode characters in `s`.
pub fn char_len(s: &str) -> usize {
    s.chars().count()
}

/// Borrow the longest prefix of `s` holding at most `max_chars` characters.
///
/// Slices on a char boundary, so multi-byte input never panics. Returns `s`
/// itself when it already fits.
pub fn take_chars(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}
