//! The per-node renderer.
//!
//! [`NodeRenderer`] has one method per Markdown node type; the engine
//! adapter in [`crate::engine`] calls them during its walk over the parsed
//! document and concatenates the returned fragments verbatim.  Every method
//! is a pure function of its arguments and the renderer's current options,
//! so output is deterministic and byte-for-byte testable.

use crate::list;
use crate::style::{Style, StyleSheet};
use crate::table::{self, TableSettings, COLON_STANDIN};
use crate::text::{
    emojify, indent_lines, normalize_hardbreaks, unescape_entities, wordwrap,
};
use crate::{link, Error};

/// A pluggable syntax highlighter: code in, decorated code out.
///
/// Failures are recovered by falling back to the plain `code` style, so the
/// error payload is only ever inspected by trace logging.
pub type HighlightFn = fn(&str) -> Result<String, Box<dyn std::error::Error + Send + Sync>>;

/// Renderer configuration.
///
/// Constructed with [`Default`] and adjusted through the builder methods;
/// replaced wholesale via [`NodeRenderer::set_options`], never partially
/// mutated.
#[derive(Clone, Debug)]
pub struct RenderOptions {
    /// Wrap width in terminal columns.
    pub columns: usize,
    /// Word-wrap block content to `columns`.
    pub wordwrap: bool,
    /// GitHub-flavoured hard breaks (`<br />` counts as a hard return).
    pub gfm: bool,
    /// Render GFM tables (otherwise table syntax passes through as text).
    pub tables: bool,
    /// Substitute `:name:` emoji shortcodes.
    pub emojis: bool,
    /// Emit ANSI styling.  When off every style is the identity.
    pub colors: bool,
    /// Per-node styles.
    pub styles: StyleSheet,
    /// Pass-through settings for the table box drawer.
    pub table_settings: TableSettings,
    /// Optional syntax highlighter for `javascript`/`js` fences.
    pub highlight: Option<HighlightFn>,
}

impl Default for RenderOptions {
    fn default() -> RenderOptions {
        RenderOptions {
            columns: 80,
            wordwrap: true,
            gfm: true,
            tables: true,
            emojis: true,
            colors: true,
            styles: StyleSheet::default(),
            table_settings: TableSettings::default(),
            highlight: None,
        }
    }
}

impl RenderOptions {
    /// Set the wrap width.
    pub fn columns(mut self, columns: usize) -> Self {
        self.columns = columns;
        self
    }

    /// Enable or disable word-wrapping.
    pub fn wordwrap(mut self, on: bool) -> Self {
        self.wordwrap = on;
        self
    }

    /// Enable or disable GFM hard breaks.
    pub fn gfm(mut self, on: bool) -> Self {
        self.gfm = on;
        self
    }

    /// Enable or disable table rendering.
    pub fn tables(mut self, on: bool) -> Self {
        self.tables = on;
        self
    }

    /// Enable or disable emoji substitution.
    pub fn emojis(mut self, on: bool) -> Self {
        self.emojis = on;
        self
    }

    /// Enable or disable ANSI styling.
    pub fn colors(mut self, on: bool) -> Self {
        self.colors = on;
        self
    }

    /// Replace the style sheet.
    pub fn styles(mut self, styles: StyleSheet) -> Self {
        self.styles = styles;
        self
    }

    /// Replace the table settings.
    pub fn table_settings(mut self, settings: TableSettings) -> Self {
        self.table_settings = settings;
        self
    }

    /// Install a syntax highlighter.
    pub fn highlight(mut self, f: HighlightFn) -> Self {
        self.highlight = Some(f);
        self
    }
}

/// Renders individual Markdown nodes as ANSI-styled text fragments.
pub struct NodeRenderer {
    opts: RenderOptions,
}

impl NodeRenderer {
    /// Create a renderer, rejecting an unusable wrap width.
    pub fn new(opts: RenderOptions) -> Result<NodeRenderer, Error> {
        if opts.columns == 0 {
            return Err(Error::TooNarrow);
        }
        Ok(NodeRenderer { opts })
    }

    /// The current options.
    pub fn options(&self) -> &RenderOptions {
        &self.opts
    }

    /// Replace the options wholesale.  Fails on an unusable wrap width,
    /// leaving the previous options untouched.
    pub fn set_options(&mut self, opts: RenderOptions) -> Result<(), Error> {
        if opts.columns == 0 {
            return Err(Error::TooNarrow);
        }
        self.opts = opts;
        Ok(())
    }

    fn paint(&self, style: Style, text: &str) -> String {
        if self.opts.colors {
            style.apply(text)
        } else {
            text.to_string()
        }
    }

    /// The per-text transform chain, run in a fixed order: emoji
    /// substitution first, then entity unescaping, then colon stand-in
    /// restoration last so colons produced by the earlier steps are not
    /// themselves re-replaced.
    pub fn transform(&self, text: &str) -> String {
        let t = if self.opts.emojis {
            emojify(text)
        } else {
            text.to_string()
        };
        unescape_entities(&t).replace(COLON_STANDIN, ":")
    }

    /// A text node passes through unchanged.
    pub fn text(&self, text: &str) -> String {
        text.to_string()
    }

    /// A paragraph: transformed, wrapped, styled, surrounded by blank lines.
    pub fn paragraph(&self, text: &str) -> String {
        let t = self.transform(text);
        let t = if self.opts.wordwrap {
            wordwrap(&t, self.opts.columns, self.opts.gfm)
        } else {
            t
        };
        section(&self.paint(self.opts.styles.paragraph, &t))
    }

    /// A heading: `#` markers, wrapped, with level 1 styled separately.
    pub fn heading(&self, text: &str, level: usize) -> String {
        let mut out = format!("{} {}", "#".repeat(level), self.transform(text));
        if self.opts.wordwrap {
            out = wordwrap(&out, self.opts.columns, self.opts.gfm);
        }
        let style = if level == 1 {
            self.opts.styles.first_heading
        } else {
            self.opts.styles.heading
        };
        section(&self.paint(style, &out))
    }

    /// A hard line break.
    ///
    /// With wrapping on this returns the `\r` marker so the break survives
    /// the wrap pass as a section boundary; otherwise a plain newline.
    pub fn br(&self) -> String {
        if self.opts.wordwrap {
            "\r".to_string()
        } else {
            "\n".to_string()
        }
    }

    /// A horizontal rule spanning the configured width.
    pub fn hr(&self) -> String {
        let line = "-".repeat(self.opts.columns.saturating_sub(1));
        section(&self.paint(self.opts.styles.hr, &line))
    }

    /// Raw HTML, styled but otherwise untouched.
    pub fn html(&self, text: &str) -> String {
        self.paint(self.opts.styles.html, text)
    }

    /// A block quote: trimmed, indented four spaces, styled.
    pub fn blockquote(&self, text: &str) -> String {
        section(&self.paint(self.opts.styles.blockquote, &indent_lines(text.trim(), 4)))
    }

    /// A code block: highlighted then indented four spaces.
    pub fn code(&self, code: &str, lang: &str) -> String {
        section(&indent_lines(&self.highlight(code, lang), 4))
    }

    /// Highlight `code`, falling back to the plain `code` style whenever
    /// the external highlighter is missing, inapplicable or failing.
    pub fn highlight(&self, code: &str, lang: &str) -> String {
        if !self.opts.colors {
            return code.to_string();
        }
        let code = normalize_hardbreaks(code, self.opts.wordwrap);
        if !matches!(lang, "javascript" | "js") {
            return self.paint(self.opts.styles.code, &code);
        }
        match self.opts.highlight {
            Some(f) => match f(&code) {
                Ok(decorated) => decorated,
                Err(e) => {
                    md_trace!("highlighter failed, using plain code style: {}", e);
                    self.paint(self.opts.styles.code, &code)
                }
            },
            None => self.paint(self.opts.styles.code, &code),
        }
    }

    /// An inline code span.  Literal colons are swapped for a stand-in so
    /// the emoji and entity passes cannot corrupt the content; the
    /// transform chain restores them at the very end.
    pub fn codespan(&self, text: &str) -> String {
        let t = normalize_hardbreaks(text, self.opts.wordwrap).replace(':', COLON_STANDIN);
        self.paint(self.opts.styles.codespan, &t)
    }

    /// Strikethrough text.
    pub fn del(&self, text: &str) -> String {
        self.paint(self.opts.styles.del, text)
    }

    /// Emphasised text.
    pub fn em(&self, text: &str) -> String {
        let t = normalize_hardbreaks(text, self.opts.wordwrap);
        self.paint(self.opts.styles.em, &t)
    }

    /// Strong text.
    pub fn strong(&self, text: &str) -> String {
        self.paint(self.opts.styles.strong, text)
    }

    /// An image placeholder: `![alt – title](href)` styled as a link.
    pub fn image(&self, href: &str, title: &str, alt: &str) -> String {
        let mut out = format!("![{}", alt);
        if !title.is_empty() {
            out.push_str(&format!(" – {}", title));
        }
        out.push_str(&format!("]({})", href));
        section(&self.paint(self.opts.styles.link, &out))
    }

    /// A link: sanitized, with the label (when distinct from the target)
    /// shown before the parenthesised target.  Unsafe targets render to
    /// nothing.
    pub fn link(&self, href: &str, _title: &str, text: &str) -> String {
        if !link::is_safe(href) {
            return String::new();
        }
        let has_label = !text.is_empty() && text != href;
        let mut out = String::new();
        if has_label {
            let label = if self.opts.emojis {
                emojify(text)
            } else {
                text.to_string()
            };
            out.push_str(&label);
            out.push_str(" (");
        }
        out.push_str(&self.paint(self.opts.styles.href, href));
        if has_label {
            out.push(')');
        }
        self.paint(self.opts.styles.link, &out)
    }

    /// A whole list: the styled body is indented four spaces, then tidied
    /// (and renumbered when `ordered`).
    pub fn list(&self, body: &str, ordered: bool) -> String {
        let indented = indent_lines(&self.paint(self.opts.styles.list_item, body), 4);
        if ordered {
            list::change_to_ordered(&indented)
        } else {
            list::format_unordered(&indented)
        }
    }

    /// One list item, bulleted with `*`; nested content is trimmed first.
    pub fn listitem(&self, text: &str) -> String {
        let text = if text.contains('\n') {
            text.trim()
        } else {
            text
        };
        format!("\n * {}", self.transform(text))
    }

    /// A complete table from its sentinel-encoded header and body blobs.
    pub fn table(&self, header: &str, body: &str) -> String {
        let head = table::parse_rows(header, str::to_string)
            .into_iter()
            .next()
            .unwrap_or_default();
        let rows = table::parse_rows(body, |blob| self.transform(blob));
        let drawn = table::draw_box_table(&head, &rows, &self.opts.table_settings);
        section(&self.paint(self.opts.styles.table, &drawn))
    }

    /// Encode one table row.
    pub fn tablerow(&self, content: &str) -> String {
        table::tablerow(content)
    }

    /// Encode one table cell.
    pub fn tablecell(&self, content: &str) -> String {
        table::tablecell(content)
    }
}

/// Surround a block with single blank lines.
fn section(text: &str) -> String {
    format!("\n{}\n", text)
}
