//! Width-aware text utilities.
//!
//! Everything here operates on plain `&str` and is independent of the
//! renderer: measuring text width while ignoring ANSI escapes, greedy
//! word-wrapping, truncation, emoji shortcode substitution and HTML entity
//! unescaping.

use std::borrow::Cow;

use once_cell::sync::Lazy;
use regex::Regex;
use unicode_width::UnicodeWidthStr;

static SGR_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\x1b\[[0-9;]*m").unwrap());

static EMOJI_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r":([A-Za-z0-9_+\-]+):").unwrap());

static ENTITY_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"&(?:amp|lt|gt|quot|#39);").unwrap());

/// Remove ANSI SGR escape sequences (`ESC [ params m`) from `text`.
pub fn strip_ansi(text: &str) -> Cow<'_, str> {
    SGR_RE.replace_all(text, "")
}

/// The width of `text` in terminal cells, ignoring ANSI SGR escapes.
///
/// Wide glyphs (CJK, most emoji) count as two cells, combining marks as
/// zero, matching what a terminal will actually draw.
pub fn visible_width(text: &str) -> usize {
    UnicodeWidthStr::width(strip_ansi(text).as_ref())
}

/// Greedily wrap `text` to `width` columns.
///
/// The text is first split on hard-break markers (`\r`, plus `<br />` when
/// `gfm` is set) into sections which wrap independently and are rejoined
/// with `\n`.  Within a section, whitespace-separated words are packed onto
/// lines; a word is pushed to the next line when appending it (plus a
/// separating space) would take the line's visible width over `width`.
///
/// A single word wider than `width` is left unsplit and overflows its line.
pub fn wordwrap(text: &str, width: usize, gfm: bool) -> String {
    let normalized;
    let text = if gfm {
        normalized = text.replace("<br />", "\r");
        normalized.as_str()
    } else {
        text
    };

    text.split('\r')
        .map(|section| wrap_section(section, width))
        .collect::<Vec<_>>()
        .join("\n")
}

fn wrap_section(section: &str, width: usize) -> String {
    let mut out = String::with_capacity(section.len());
    let mut line_len = 0usize;
    for word in section.split_whitespace() {
        let word_len = visible_width(word);
        if line_len > 0 {
            if line_len + 1 + word_len > width {
                out.push('\n');
                line_len = 0;
            } else {
                out.push(' ');
                line_len += 1;
            }
        }
        out.push_str(word);
        line_len += word_len;
    }
    out
}

/// Shorten `text` to at most `max_len` characters, replacing the removed
/// tail with `"..."`.  Text already within the limit is returned unchanged.
pub fn truncate(text: &str, max_len: usize) -> String {
    if text.chars().count() <= max_len {
        return text.to_string();
    }
    let mut out: String = text.chars().take(max_len.saturating_sub(3)).collect();
    out.push_str("...");
    out
}

/// Uppercase the first character of `text`, leaving the rest unchanged.
pub fn capitalize_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        None => String::new(),
        Some(c) => c.to_uppercase().chain(chars).collect(),
    }
}

/// Backslash-escape regular expression metacharacters in `text`.
pub fn escape_regexp(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(
            c,
            '-' | '[' | ']' | '/' | '{' | '}' | '(' | ')' | '*' | '+' | '?' | '.' | '\\' | '^'
                | '$' | '|'
        ) {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// Replace `:name:` emoji shortcodes with their glyph followed by a space.
///
/// Shortcodes with no matching glyph are left untouched, colons included.
pub fn emojify(text: &str) -> String {
    EMOJI_RE
        .replace_all(text, |caps: &regex::Captures<'_>| {
            match emojis::get_by_shortcode(&caps[1]) {
                Some(emoji) => format!("{} ", emoji),
                None => caps[0].to_string(),
            }
        })
        .into_owned()
}

/// Undo the five entity escapes an HTML-producing Markdown engine emits.
///
/// Decoding happens in a single pass, so an escaped ampersand never has its
/// decoded form re-decoded (`&amp;lt;` yields `&lt;`, not `<`).  This is
/// deliberately not a general entity decoder.
pub fn unescape_entities(text: &str) -> String {
    ENTITY_RE
        .replace_all(text, |caps: &regex::Captures<'_>| match &caps[0] {
            "&amp;" => "&",
            "&lt;" => "<",
            "&gt;" => ">",
            "&quot;" => "\"",
            _ => "'",
        })
        .into_owned()
}

/// Prefix every line of `text` with `n` spaces.
pub fn indent_lines(text: &str, n: usize) -> String {
    let pad = " ".repeat(n);
    text.split('\n')
        .map(|line| format!("{}{}", pad, line))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Normalize hard-break markers in `text`.
///
/// While word-wrapping is on, `\r` is the in-band hard-break marker the wrap
/// algorithm understands, so `\r\n` collapses to `\r`.  With wrapping off no
/// later pass will translate the marker, so both forms become `\n`.
pub fn normalize_hardbreaks(text: &str, wordwrap: bool) -> String {
    if wordwrap {
        text.replace("\r\n", "\r")
    } else {
        text.replace("\r\n", "\n").replace('\r', "\n")
    }
}
