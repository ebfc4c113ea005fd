//! String utilities for the domain layer.

/// Truncate a string to a maximum length with ellipsis (UTF-8 safe)
///
/// Uses byte length for max_len but ensures truncation occurs at valid
/// UTF-8 character boundaries.
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.len() <= max_len {
        s.to_string()
    } else {
        let target = max_len.saturating_sub(3);
        let mut end = target.min(s.len());
        while end > 0 && !s.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...", &s[..end])
    }
}

/// Take at most `max_chars` characters from the front of a string.
///
/// Unlike [`truncate`], no ellipsis is added and the limit counts
/// characters, not bytes.
pub fn excerpt(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_ascii() {
        assert_eq!(truncate("hello", 10), "hello");
        assert_eq!(truncate("hello world", 8), "hello...");
    }

    #[test]
    fn test_truncate_multibyte() {
        // "é" is 2 bytes; max_len=6 -> target=3 -> back to boundary at 2
        assert_eq!(truncate("éééé", 6), "é...");
        assert_eq!(truncate("éé", 10), "éé");
    }

    #[test]
    fn test_excerpt_counts_chars() {
        assert_eq!(excerpt("hello world", 5), "hello");
        assert_eq!(excerpt("short", 100), "short");
        assert_eq!(excerpt("ééé", 2), "éé");
        assert_eq!(excerpt("", 3), "");
    }
}
