//! Helpers for putting user-supplied text (titles, search queries, usernames) into logs.
//! Output is always a single line and bounded in length.

/// Longest user string written to a log line, in characters.
pub const MAX_LOGGED_CHARS: usize = 120;

/// Single-line, length-capped form of `s` for log output.
pub fn escape_log(s: &str) -> String {
    preview(s, MAX_LOGGED_CHARS)
}

/// Escape backslashes and control characters (`\n`, `\t`, `\u{7}`, ...) and cut `s` after
/// `max_chars` characters, marking the cut with an ellipsis.
pub fn preview(s: &str, max_chars: usize) -> String {
    let mut out = String::with_capacity(s.len().min(max_chars) + 4);
    let mut chars = s.chars();
    for ch in chars.by_ref().take(max_chars) {
        match ch {
            '\\' => out.push_str("\\\\"),
            c if c.is_control() => out.extend(c.escape_default()),
            c => out.push(c),
        }
    }
    if chars.next().is_some() {
        out.push('…');
    }
    out
}
