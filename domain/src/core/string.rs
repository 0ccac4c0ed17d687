//! String utilities for the domain layer.

/// Truncate a string to at most `max_chars` characters, appending an ellipsis
/// when anything was cut.
///
/// Counts characters rather than bytes: Telegram poll limits and diagnostic
/// prefixes are both expressed in characters.
pub fn truncate(s: &str, max_chars: usize) -> String {
    match s.char_indices().nth(max_chars) {
        None => s.to_string(),
        Some(_) => {
            let keep = max_chars.saturating_sub(1);
            let end = s.char_indices().nth(keep).map_or(s.len(), |(i, _)| i);
            format!("{}…", &s[..end])
        }
    }
}

/// Bounded prefix of raw model output for logs and diagnostics.
///
/// Unlike [`truncate`], the result may be shorter than the input without any
/// marker; callers append their own `...`.
pub fn prefix(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        None => s,
        Some((i, _)) => &s[..i],
    }
}
