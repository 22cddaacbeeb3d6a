//! Blank-line normalization around reordered declarations.

use std::sync::OnceLock;

use regex::Regex;

use super::{Classification, Entry};

fn blank_run_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\n\s*\n").expect("blank run pattern is valid"))
}

/// Collapse every run of blank lines in `s` to a single line break.
///
/// Indentation after the run is kept: `"\n\n\n\t"` becomes `"\n\t"`.
pub fn collapse_blank_runs(s: &str) -> String {
    blank_run_pattern().replace_all(s, "\n").into_owned()
}

/// Whether `s` already contains a blank line.
pub fn has_blank_line(s: &str) -> bool {
    blank_run_pattern().is_match(s)
}

/// Make sure `s` contains exactly one blank line.
///
/// A string that already has a blank line is returned unchanged. A string
/// without any line break is single-line formatting and is left alone too.
/// The first line break is doubled as written, so `"\r\n"` stays CRLF.
pub fn ensure_one_blank_line(s: &str) -> String {
    if has_blank_line(s) {
        return s.to_string();
    }
    let Some(newline) = s.find('\n') else {
        return s.to_string();
    };

    let ending = if s[..newline].ends_with('\r') { "\r\n" } else { "\n" };
    let (head, tail) = s.split_at(newline + 1);
    [head, ending, tail].concat()
}

/// Strip extra blank lines before every entry, and after the last one.
pub(crate) fn strip_blank_lines(entries: &mut [Entry], after: &mut String) {
    for entry in entries.iter_mut() {
        entry.node.before = collapse_blank_runs(&entry.node.before);
    }

    if !entries.is_empty() {
        *after = collapse_blank_runs(after);
    }
}

/// Start a new line after every `//` comment.
///
/// Sorting can move a node written on a single line (`a: 1; b: 2;`) right
/// behind a `//` comment, which would then swallow it. Returns the number of
/// nodes that needed a line break.
pub(crate) fn break_after_line_comments(entries: &mut [Entry]) -> usize {
    let mut broken = 0;

    for i in 1..entries.len() {
        if !entries[i - 1].node.is_line_comment() {
            continue;
        }
        let next = &mut entries[i].node;
        if !next.before.starts_with(['\n', '\r', '\x0C']) {
            next.before.insert(0, '\n');
            broken += 1;
        }
    }

    broken
}

/// Put one blank line between the last variable and whatever follows it.
///
/// Returns `true` if the whitespace was changed.
pub(crate) fn separate_variables(entries: &mut [Entry]) -> bool {
    let Some(last) = entries
        .iter()
        .rposition(|entry| entry.class == Classification::Variable)
    else {
        return false;
    };

    let Some(next) = entries.get_mut(last + 1) else {
        return false;
    };

    let before = ensure_one_blank_line(&next.node.before);
    if before == next.node.before {
        return false;
    }

    next.node.before = before;
    true
}
