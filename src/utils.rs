//! Shared utility functions used across modules.

use unicode_width::UnicodeWidthChar;
use unicode_width::UnicodeWidthStr;

use crate::constants::{ELLIPSIS, SPINNER_CHARS};

/// Cut `s` to `budget` characters and append "..." if it was longer.
///
/// The budget counts characters, not bytes, and excludes the marker.
pub fn ellipsise(s: &str, budget: usize) -> String {
    match s.char_indices().nth(budget) {
        None => s.to_string(),
        Some((cut, _)) => format!("{}{}", &s[..cut], ELLIPSIS),
    }
}

/// Fit `s` into `max_cols` terminal columns, marker included.
///
/// When there is no room for the marker the text is hard-cut instead.
pub fn ellipsise_width(s: &str, max_cols: usize) -> String {
    if s.width() <= max_cols {
        return s.to_string();
    }
    let marker_cols = ELLIPSIS.width();
    let (limit, marker) = if max_cols > marker_cols {
        (max_cols - marker_cols, ELLIPSIS)
    } else {
        (max_cols, "")
    };

    let mut out = String::new();
    let mut used = 0;
    for c in s.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > limit {
            break;
        }
        used += w;
        out.push(c);
    }
    out.push_str(marker);
    out
}

/// Get the spinner character for the current tick.
pub fn spinner_char(tick: u64) -> &'static str {
    SPINNER_CHARS[(tick % SPINNER_CHARS.len() as u64) as usize]
}

/// Get animated loading dots for the current tick.
pub fn loading_dots(tick: u64) -> &'static str {
    match tick % 4 {
        0 => "",
        1 => ".",
        2 => "..",
        _ => "...",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── ellipsise ─────────────────────────────────────────────────

    #[test]
    fn ellipsise_short_string_unchanged() {
        assert_eq!(ellipsise("hello", 10), "hello");
    }

    #[test]
    fn ellipsise_exact_length_unchanged() {
        assert_eq!(ellipsise("hello", 5), "hello");
    }

    #[test]
    fn ellipsise_keeps_full_budget_before_marker() {
        assert_eq!(ellipsise("hello world", 5), "hello...");
    }

    #[test]
    fn ellipsise_counts_chars_not_bytes() {
        // Each 'é' is two bytes; a byte slice at 3 would split a char
        assert_eq!(ellipsise("éééééé", 3), "ééé...");
        assert_eq!(ellipsise("日本語", 3), "日本語");
    }

    #[test]
    fn ellipsise_zero_budget() {
        assert_eq!(ellipsise("abc", 0), "...");
        assert_eq!(ellipsise("", 0), "");
    }

    // ── ellipsise_width ───────────────────────────────────────────

    #[test]
    fn ellipsise_width_fits() {
        assert_eq!(ellipsise_width("nightly", 7), "nightly");
    }

    #[test]
    fn ellipsise_width_includes_marker() {
        let out = ellipsise_width("nightly-backup", 10);
        assert_eq!(out, "nightly...");
        assert_eq!(out.width(), 10);
    }

    #[test]
    fn ellipsise_width_double_width_chars() {
        // 日 and 本 are two columns each; 5 columns leave room for one plus the marker
        let out = ellipsise_width("日本語ポリシー", 5);
        assert_eq!(out, "日...");
        assert!(out.width() <= 5);
    }

    #[test]
    fn ellipsise_width_no_room_for_marker() {
        assert_eq!(ellipsise_width("abcdef", 3), "abc");
        assert_eq!(ellipsise_width("abcdef", 0), "");
    }

    // ── spinner_char ──────────────────────────────────────────────

    #[test]
    fn spinner_char_cycles() {
        assert_eq!(spinner_char(0), "◐");
        assert_eq!(spinner_char(3), "◒");
        assert_eq!(spinner_char(4), "◐");
    }

    // ── loading_dots ──────────────────────────────────────────────

    #[test]
    fn loading_dots_cycles() {
        assert_eq!(loading_dots(0), "");
        assert_eq!(loading_dots(1), ".");
        assert_eq!(loading_dots(2), "..");
        assert_eq!(loading_dots(3), "...");
        assert_eq!(loading_dots(7), "...");
    }
}
