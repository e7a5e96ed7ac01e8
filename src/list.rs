//! List body formatting.
//!
//! The renderer receives a list as a flat block of `* item` lines (one per
//! `listitem` call).  These helpers tidy that block into its final shape:
//! dropping blank lines, guaranteeing exactly one leading and one trailing
//! newline, and for ordered lists replacing each bullet with an
//! incrementing `N.` counter.

use once_cell::sync::Lazy;
use regex::Regex;

static BULLET_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s\*\s").unwrap());

/// Tidy an unordered list body.
pub fn format_unordered(body: &str) -> String {
    rebuild(body, |line, _| line.to_string())
}

/// Tidy an ordered list body, renumbering bullets `1.`, `2.`, …
///
/// The counter advances once per line containing a spaced `*`, which also
/// counts nested unordered bullets; long-standing behaviour kept as is.
pub fn change_to_ordered(body: &str) -> String {
    rebuild(body, |line, n| line.replacen('*', &format!("{}.", n), 1))
}

fn rebuild(body: &str, number: impl Fn(&str, usize) -> String) -> String {
    let mut counter = 0usize;
    let lines: Vec<String> = body
        .split('\n')
        .filter(|line| !line.trim().is_empty())
        .map(|line| {
            if BULLET_RE.is_match(line) {
                counter += 1;
                number(line, counter)
            } else {
                line.to_string()
            }
        })
        .collect();
    format!("\n{}\n", lines.join("\n").trim_end())
}
