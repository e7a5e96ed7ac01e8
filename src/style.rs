//! Terminal styles.
//!
//! A [`Style`] is a pure `&str -> String` transformation representing "apply
//! visual styling"; the built-in variants wrap the text in SGR escape
//! sequences, and `Custom` lets a caller substitute any other inline markup
//! (useful for tests, or for terminals with unusual capabilities).

/// A text style.
///
/// `Plain` is the identity fallback: it returns its input unchanged.  `Sgr`
/// holds the parameter portion of an ANSI SGR sequence (for example `"1;35"`
/// for bold magenta) and wraps styled text in `ESC[{params}m … ESC[0m`.
#[derive(Clone, Copy, Debug, Default)]
pub enum Style {
    /// No styling; text passes through unchanged.
    #[default]
    Plain,
    /// Wrap text in the SGR sequence with these parameters.
    Sgr(&'static str),
    /// An arbitrary styling function.
    Custom(fn(&str) -> String),
}

impl Style {
    /// Apply this style to `text`, returning the decorated string.
    pub fn apply(&self, text: &str) -> String {
        match self {
            Style::Plain => text.to_string(),
            Style::Sgr(params) => format!("\x1b[{}m{}\x1b[0m", params, text),
            Style::Custom(f) => f(text),
        }
    }
}

/// One style per Markdown node type.
///
/// Every field defaults to something readable on a dark terminal; any field
/// left as [`Style::Plain`] renders that node type without decoration.
#[derive(Clone, Copy, Debug)]
pub struct StyleSheet {
    /// Ordinary paragraph text.
    pub paragraph: Style,
    /// Headings below level 1.
    pub heading: Style,
    /// The level-1 heading.
    pub first_heading: Style,
    /// Fenced/indented code blocks.
    pub code: Style,
    /// Inline code spans.
    pub codespan: Style,
    /// Block quotes.
    pub blockquote: Style,
    /// Raw HTML passed through.
    pub html: Style,
    /// List bodies.
    pub list_item: Style,
    /// Rendered tables.
    pub table: Style,
    /// The whole link assembly (label and target).
    pub link: Style,
    /// The URL inside a link.
    pub href: Style,
    /// Emphasis.
    pub em: Style,
    /// Strong emphasis.
    pub strong: Style,
    /// Strikethrough.
    pub del: Style,
    /// Horizontal rules.
    pub hr: Style,
    /// Plain text nodes.
    pub text: Style,
}

impl Default for StyleSheet {
    fn default() -> StyleSheet {
        StyleSheet {
            paragraph: Style::Plain,
            heading: Style::Sgr("1;35"),
            first_heading: Style::Sgr("1;4;35"),
            code: Style::Sgr("33"),
            codespan: Style::Sgr("33"),
            blockquote: Style::Sgr("2;3"),
            html: Style::Sgr("2"),
            list_item: Style::Plain,
            table: Style::Plain,
            link: Style::Sgr("34"),
            href: Style::Sgr("4;34"),
            em: Style::Sgr("3"),
            strong: Style::Sgr("1"),
            del: Style::Sgr("2;9"),
            hr: Style::Sgr("2"),
            text: Style::Plain,
        }
    }
}
