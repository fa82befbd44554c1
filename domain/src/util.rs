//! Small string helpers shared by the gateway, logs and terminal output.

/// Longest prefix of `s` that fits in `max_bytes` and ends on a character
/// boundary.
pub fn truncate_str(s: &str, max_bytes: usize) -> &str {
    if s.len() <= max_bytes {
        return s;
    }
    let end = (0..=max_bytes)
        .rev()
        .find(|&i| s.is_char_boundary(i))
        .unwrap_or(0);
    &s[..end]
}

/// Single-line preview of `s` for logs and status lines.
///
/// Whitespace runs (including newlines) collapse to one space; output longer
/// than `max_bytes` is cut and marked with `...`.
pub fn preview(s: &str, max_bytes: usize) -> String {
    let flat = s.split_whitespace().collect::<Vec<_>>().join(" ");
    if flat.len() <= max_bytes {
        return flat;
    }
    format!("{}...", truncate_str(&flat, max_bytes).trim_end())
}
