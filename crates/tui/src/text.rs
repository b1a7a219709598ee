//! Width-aware text helpers for card and column content.
//!
//! All widths are terminal display widths (via `unicode-width`), so CJK and
//! emoji titles line up the same way the terminal draws them.

use std::time::Duration;

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const ELLIPSIS: &str = "...";

/// The narrowest width [`truncate`] will cut to.
const MIN_TRUNCATE_WIDTH: usize = 4;

/// Display width of `s`.
#[must_use]
pub fn display_width(s: &str) -> usize {
    UnicodeWidthStr::width(s)
}

/// Shortens `s` to at most `max` columns, ending in `...` when cut.
///
/// `max` is raised to 4 so there is always room for one character plus the
/// ellipsis.
///
/// # Examples
///
/// ```
/// use taskwatch_tui::text::truncate;
///
/// assert_eq!(truncate("short", 10), "short");
/// assert_eq!(truncate("a long title", 8), "a lon...");
/// assert_eq!(truncate("abcdef", 1), "a...");
/// ```
#[must_use]
pub fn truncate(s: &str, max: usize) -> String {
    let max = max.max(MIN_TRUNCATE_WIDTH);
    if display_width(s) <= max {
        return s.to_string();
    }

    let budget = max - ELLIPSIS.len();
    let mut used = 0;
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > budget {
            break;
        }
        used += w;
        out.push(ch);
    }
    out.push_str(ELLIPSIS);
    out
}

/// Word-wraps `text` into at most `max_lines` lines of `max_width` columns.
///
/// Whitespace runs (newlines included) collapse to single spaces. The last
/// line receives every remaining word and is truncated with `...` when it
/// overflows. A single word wider than `max_width` is truncated on its own
/// line.
///
/// # Examples
///
/// ```
/// use taskwatch_tui::text::wrap_text;
///
/// assert_eq!(wrap_text("Refactor I/O layer", 10, 2), ["Refactor", "I/O layer"]);
/// assert_eq!(wrap_text("fits", 10, 3), ["fits"]);
/// ```
#[must_use]
pub fn wrap_text(text: &str, max_width: usize, max_lines: usize) -> Vec<String> {
    let max_lines = max_lines.max(1);
    let words: Vec<&str> = text.split_whitespace().collect();
    let flat = words.join(" ");

    if max_lines == 1 || display_width(&flat) <= max_width {
        return vec![truncate(&flat, max_width)];
    }

    let mut lines = Vec::with_capacity(max_lines);
    let mut current = String::new();
    for (i, word) in words.iter().enumerate() {
        if current.is_empty() {
            current.push_str(word);
            continue;
        }
        if display_width(&current) + 1 + display_width(word) <= max_width {
            current.push(' ');
            current.push_str(word);
            continue;
        }

        lines.push(truncate(&current, max_width));
        current.clear();
        current.push_str(word);
        if lines.len() == max_lines - 1 {
            for rest in &words[i + 1..] {
                current.push(' ');
                current.push_str(rest);
            }
            break;
        }
    }
    if !current.is_empty() {
        lines.push(truncate(&current, max_width));
    }
    lines
}

/// Expands the escape sequences agents write into single-line bodies.
///
/// `\n` becomes a newline, `\t` a tab, `\r` is dropped and `\\` becomes a
/// single backslash. Other backslashes are kept as they are.
///
/// # Examples
///
/// ```
/// use taskwatch_tui::text::unescape_body;
///
/// assert_eq!(unescape_body(r"line one\nline two"), "line one\nline two");
/// assert_eq!(unescape_body(r"C:\\temp\r"), r"C:\temp");
/// ```
#[must_use]
pub fn unescape_body(body: &str) -> String {
    let mut out = String::with_capacity(body.len());
    let mut chars = body.chars().peekable();
    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }
        match chars.peek() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('r') => {}
            Some('\\') => out.push('\\'),
            _ => {
                out.push('\\');
                continue;
            }
        }
        chars.next();
    }
    out
}

/// Compact age label: `<1m`, `5m`, `3h`, `2d`, `1w`, `4mo`, `2y`.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use taskwatch_tui::text::human_duration;
///
/// assert_eq!(human_duration(Duration::from_secs(30)), "<1m");
/// assert_eq!(human_duration(Duration::from_secs(3 * 3600)), "3h");
/// ```
#[must_use]
pub fn human_duration(d: Duration) -> String {
    const MINUTE: u64 = 60;
    const HOUR: u64 = 60 * MINUTE;
    const DAY: u64 = 24 * HOUR;
    const WEEK: u64 = 7 * DAY;
    const MONTH: u64 = 30 * DAY;
    const YEAR: u64 = 365 * DAY;

    let secs = d.as_secs();
    match secs {
        s if s < MINUTE => "<1m".to_string(),
        s if s < HOUR => format!("{}m", s / MINUTE),
        s if s < DAY => format!("{}h", s / HOUR),
        s if s < WEEK => format!("{}d", s / DAY),
        s if s < MONTH => format!("{}w", s / WEEK),
        s if s < YEAR => format!("{}mo", s / MONTH),
        s => format!("{}y", s / YEAR),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn truncate_counts_display_width() {
        // Each CJK character is two columns wide.
        assert_eq!(truncate("日本語のタイトル", 8), "日本...");
        assert_eq!(truncate("日本", 4), "日本");
    }

    #[test]
    fn truncate_exact_fit_is_unchanged() {
        assert_eq!(truncate("abcd", 4), "abcd");
        assert_eq!(truncate("abcde", 4), "a...");
    }

    #[test]
    fn wrap_puts_remaining_words_on_last_line() {
        let lines = wrap_text("one two three four five six", 9, 2);
        assert_eq!(lines, ["one two", "three ..."]);
    }

    #[test]
    fn wrap_single_line_truncates() {
        assert_eq!(wrap_text("a very long line", 8, 1), ["a ver..."]);
    }

    #[test]
    fn wrap_collapses_newlines() {
        assert_eq!(wrap_text("first\nsecond", 20, 4), ["first second"]);
        assert_eq!(
            wrap_text("first line\n\nsecond line", 12, 4),
            ["first line", "second line"]
        );
    }

    #[test]
    fn wrap_truncates_overlong_word() {
        assert_eq!(
            wrap_text("supercalifragilistic is long", 10, 3),
            ["superca...", "is long"]
        );
    }

    #[test]
    fn wrap_empty_text_is_one_empty_line() {
        assert_eq!(wrap_text("", 10, 4), [""]);
    }

    #[test]
    fn unescape_keeps_unknown_sequences() {
        assert_eq!(unescape_body(r"a\qb"), r"a\qb");
        assert_eq!(unescape_body("trailing\\"), "trailing\\");
        assert_eq!(unescape_body(r"tab\there"), "tab\there");
    }

    #[test]
    fn human_duration_units() {
        let cases = [
            (59, "<1m"),
            (60, "1m"),
            (59 * 60, "59m"),
            (3600, "1h"),
            (86_400, "1d"),
            (6 * 86_400, "6d"),
            (7 * 86_400, "1w"),
            (29 * 86_400, "4w"),
            (30 * 86_400, "1mo"),
            (364 * 86_400, "12mo"),
            (365 * 86_400, "1y"),
            (800 * 86_400, "2y"),
        ];
        for (secs, expected) in cases {
            assert_eq!(human_duration(Duration::from_secs(secs)), expected, "{secs}s");
        }
    }

    proptest! {
        #[test]
        fn truncate_never_exceeds_width(s in "[a-zA-Z0-9 日本語한국]{0,40}", max in 0usize..30) {
            let out = truncate(&s, max);
            prop_assert!(display_width(&out) <= max.max(MIN_TRUNCATE_WIDTH));
        }

        #[test]
        fn wrap_respects_limits(words in prop::collection::vec("[a-z]{1,12}", 0..20), width in 4usize..30, lines in 1usize..5) {
            let text = words.join(" ");
            let wrapped = wrap_text(&text, width, lines);
            prop_assert!(!wrapped.is_empty());
            prop_assert!(wrapped.len() <= lines);
            for line in &wrapped {
                prop_assert!(display_width(line) <= width);
            }
        }
    }
}
