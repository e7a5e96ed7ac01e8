//! Error-report decoration.
//!
//! [`ErrorFormatter`] turns an externally supplied property bag
//! ([`ErrorProps`]) into a fixed-order sequence of sections — header,
//! message, explanation, hints, stack trace, footer — each delimited by
//! styled dividers and wrapped to the configured width.  Free-form sections
//! can be rendered as Markdown by delegating to the engine; the formatter
//! itself only builds chrome.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::engine::render_markdown;
use crate::render::{NodeRenderer, RenderOptions};
use crate::style::Style;
use crate::text::{capitalize_first, visible_width, wordwrap};
use crate::Error;

/// Strips a leading `Error:` marker and/or an upper-case error-code token
/// (`ENOENT:`, `E_FAIL:`, …) from the front of a message.
static MSG_PREFIX_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*(?:Error:\s+)?(?:[A-Z][A-Z0-9_]*:\s+)?").unwrap());

/// An error described as plain data.
///
/// Supplied by the caller (authored directly, or derived from a runtime
/// error elsewhere); the formatter only reads it.
#[derive(Clone, Debug, Default)]
pub struct ErrorProps {
    /// Machine error code (`ENOENT`, `E404`, …).
    pub code: Option<String>,
    /// OS errno, when the error came from a syscall.
    pub errno: Option<i32>,
    /// Machine-readable error name.
    pub name: String,
    /// Human-readable name shown in the header.
    pub readable_name: Option<String>,
    /// The one-line message.
    pub message: String,
    /// Longer explanation; Markdown when markdown mode is on.
    pub explain: Option<String>,
    /// Remediation hints; Markdown when markdown mode is on.
    pub hints: Option<String>,
    /// Path the error relates to, shown in the footer.
    pub path: Option<String>,
    /// Raw stack trace, never re-wrapped.
    pub stack: Option<String>,
}

/// Formatter configuration: section titles, divider geometry, section
/// styles, and the render options handed to the underlying [`NodeRenderer`].
#[derive(Clone, Debug)]
pub struct ErrorFormatOptions {
    /// Options for the renderer used for wrapping and Markdown sections.
    pub render: RenderOptions,
    /// Header divider title; a trailing `:` is dropped when no readable
    /// name follows it.
    pub header_title: String,
    /// Hints divider title.
    pub hints_title: String,
    /// Trace divider title.
    pub trace_title: String,
    /// Character dividers are drawn with.
    pub divider_char: char,
    /// Columns left free at the right edge of dividers.
    pub margin_right: usize,
    /// Render `explain`/`hints` as Markdown instead of wrapped plain text.
    pub markdown: bool,
    /// Header section style.
    pub header: Style,
    /// Message section style.
    pub message: Style,
    /// Explanation style (plain-text mode only).
    pub explain: Style,
    /// Hints body style (plain-text mode only).
    pub hints: Style,
    /// Footer style.
    pub footer: Style,
    /// Divider style.
    pub divider: Style,
}

impl Default for ErrorFormatOptions {
    fn default() -> ErrorFormatOptions {
        ErrorFormatOptions {
            render: RenderOptions::default(),
            header_title: "ERROR:".to_string(),
            hints_title: "HINTS".to_string(),
            trace_title: "STACK TRACE".to_string(),
            divider_char: '=',
            margin_right: 0,
            markdown: true,
            header: Style::Sgr("1;31"),
            message: Style::Sgr("1"),
            explain: Style::Plain,
            hints: Style::Plain,
            footer: Style::Sgr("2"),
            divider: Style::Sgr("2"),
        }
    }
}

impl ErrorFormatOptions {
    /// Replace the underlying render options.
    pub fn render(mut self, render: RenderOptions) -> Self {
        self.render = render;
        self
    }

    /// Set the header title.
    pub fn header_title(mut self, title: impl Into<String>) -> Self {
        self.header_title = title.into();
        self
    }

    /// Set the hints title.
    pub fn hints_title(mut self, title: impl Into<String>) -> Self {
        self.hints_title = title.into();
        self
    }

    /// Set the trace title.
    pub fn trace_title(mut self, title: impl Into<String>) -> Self {
        self.trace_title = title.into();
        self
    }

    /// Set the divider character.
    pub fn divider_char(mut self, c: char) -> Self {
        self.divider_char = c;
        self
    }

    /// Set the right margin dividers leave free.
    pub fn margin_right(mut self, margin: usize) -> Self {
        self.margin_right = margin;
        self
    }

    /// Render free-form sections as Markdown or as wrapped plain text.
    pub fn markdown(mut self, on: bool) -> Self {
        self.markdown = on;
        self
    }
}

/// Formats [`ErrorProps`] into a decorated, column-wrapped report.
pub struct ErrorFormatter {
    opts: ErrorFormatOptions,
    renderer: NodeRenderer,
}

impl ErrorFormatter {
    /// Create a formatter; fails if the render options are unusable.
    pub fn new(opts: ErrorFormatOptions) -> Result<ErrorFormatter, Error> {
        let renderer = NodeRenderer::new(opts.render.clone())?;
        Ok(ErrorFormatter { opts, renderer })
    }

    /// Render a full report: header, message, then whichever of
    /// explanation, hints, trace and footer the props supply.
    pub fn render(&self, props: &ErrorProps) -> String {
        let mut out = String::new();
        out.push_str(&self.header(props.readable_name.as_deref()));
        out.push_str(&self.message(&props.message));
        if let Some(explain) = &props.explain {
            out.push_str(&self.explain(explain));
        }
        if let Some(hints) = &props.hints {
            out.push_str(&self.hints(hints));
        }
        if let Some(stack) = &props.stack {
            out.push_str(&self.trace(stack));
        }
        out.push_str(&self.footer(props.code.as_deref(), props.path.as_deref()));
        out
    }

    /// The header divider, titled with the configured title plus the
    /// readable name when one is given.
    pub fn header(&self, readable_name: Option<&str>) -> String {
        let title = match readable_name {
            Some(name) => format!("{} {}", self.opts.header_title, name),
            // No name after the title, so don't leave a dangling colon.
            None => self
                .opts
                .header_title
                .strip_suffix(':')
                .unwrap_or(&self.opts.header_title)
                .to_string(),
        };
        let divider = self.divider(Some(&title));
        format!("\n{}\n", self.paint(self.opts.header, &divider))
    }

    /// The message line: any leading `Error:`/code prefix stripped, the
    /// remainder capitalized, wrapped and styled.
    pub fn message(&self, text: &str) -> String {
        let stripped = MSG_PREFIX_RE.replace(text, "");
        let mut msg = capitalize_first(&stripped);
        if self.renderer.options().wordwrap {
            msg = wordwrap(&msg, self.wrap_width(), self.renderer.options().gfm);
        }
        format!("\n{}\n", self.paint(self.opts.message, &msg))
    }

    /// The explanation body: Markdown-rendered in markdown mode, otherwise
    /// wrapped plain text with a single leading newline.
    pub fn explain(&self, text: &str) -> String {
        if self.opts.markdown {
            return render_markdown(text, &self.renderer);
        }
        format!("\n{}", self.paint(self.opts.explain, &self.wrap(text)))
    }

    /// The hints section: its own titled divider followed by the body.
    pub fn hints(&self, text: &str) -> String {
        let divider = self.paint(self.opts.divider, &self.divider(Some(&self.opts.hints_title)));
        let body = if self.opts.markdown {
            render_markdown(text, &self.renderer)
        } else {
            format!("\n{}", self.paint(self.opts.hints, &self.wrap(text)))
        };
        format!("\n{}\n{}", divider, body)
    }

    /// The stack trace section.  The stack itself is reproduced verbatim;
    /// re-wrapping a trace destroys it.
    pub fn trace(&self, stack: &str) -> String {
        let divider = self.paint(self.opts.divider, &self.divider(Some(&self.opts.trace_title)));
        format!("\n{}\n\n{}", divider, stack)
    }

    /// The footer: code and path lines between two untitled dividers, or
    /// nothing at all when neither is present.
    pub fn footer(&self, code: Option<&str>, path: Option<&str>) -> String {
        if code.is_none() && path.is_none() {
            return String::new();
        }
        let divider = self.divider(None);
        let mut body = String::new();
        if let Some(code) = code {
            body.push_str("Code: ");
            body.push_str(code);
        }
        if code.is_some() && path.is_some() {
            body.push('\n');
        }
        if let Some(path) = path {
            body.push_str("Path: ");
            body.push_str(path);
        }
        let block = format!("{}\n{}\n{}", divider, body, divider);
        format!("\n{}\n", self.paint(self.opts.footer, &block))
    }

    /// Build a divider: four divider characters, the optional title with a
    /// space either side, then padding with further divider characters out
    /// to `columns − margin_right` (or the full width when untitled).
    pub fn divider(&self, title: Option<&str>) -> String {
        let columns = self.renderer.options().columns;
        let target = match title {
            Some(_) => columns.saturating_sub(self.opts.margin_right),
            None => columns,
        };
        let ch = self.opts.divider_char;
        let mut out: String = std::iter::repeat(ch).take(4).collect();
        if let Some(title) = title {
            out.push(' ');
            out.push_str(title);
            out.push(' ');
        }
        while visible_width(&out) < target {
            out.push(ch);
        }
        out
    }

    fn wrap(&self, text: &str) -> String {
        if self.renderer.options().wordwrap {
            wordwrap(text, self.wrap_width(), self.renderer.options().gfm)
        } else {
            text.to_string()
        }
    }

    fn wrap_width(&self) -> usize {
        self.renderer
            .options()
            .columns
            .saturating_sub(self.opts.margin_right)
    }

    fn paint(&self, style: Style, text: &str) -> String {
        if self.renderer.options().colors {
            style.apply(text)
        } else {
            text.to_string()
        }
    }
}
