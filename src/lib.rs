//! Render Markdown as ANSI-styled terminal text.
//!
//! This crate converts Markdown-flavoured documents (and structured error
//! descriptions) into column-wrapped plain text decorated with ANSI escape
//! sequences, suitable for writing straight to a console.  Parsing is done
//! by `pulldown-cmark`; this crate supplies the per-node rendering: styled
//! headings, wrapped paragraphs, indented quotes and code, boxed tables,
//! numbered lists, emoji shortcode substitution and `javascript:` link
//! rejection.
//!
//! # Examples
//!
//! ```rust
//! use md2term::{render_markdown, RenderOptions};
//!
//! let opts = RenderOptions::default().colors(false);
//! let out = render_markdown("# Title\n\nHello *world*.", opts).unwrap();
//! assert_eq!(out, "\n# Title\n\nHello world.\n");
//! ```
//!
//! Error reports are the second entry point: an [`ErrorProps`] bag renders
//! to a header/message/hints/footer report through the same renderer.
//!
//! ```rust
//! use md2term::{render_error, ErrorFormatOptions, ErrorProps, RenderOptions};
//!
//! let props = ErrorProps {
//!     readable_name: Some("File Not Found".into()),
//!     message: "Error: ENOENT: no such file or directory".into(),
//!     code: Some("ENOENT".into()),
//!     ..ErrorProps::default()
//! };
//! let opts = ErrorFormatOptions::default().render(RenderOptions::default().colors(false));
//! let report = render_error(&props, opts).unwrap();
//! assert!(report.contains("ERROR: File Not Found"));
//! assert!(report.contains("No such file or directory"));
//! assert!(report.contains("Code: ENOENT"));
//! ```

#![deny(missing_docs)]

#[macro_use]
mod macros;

mod engine;
mod error_fmt;
mod link;
mod list;
mod render;
mod style;
mod table;
mod text;

pub use error_fmt::{ErrorFormatOptions, ErrorFormatter, ErrorProps};
pub use render::{HighlightFn, NodeRenderer, RenderOptions};
pub use style::{Style, StyleSheet};
pub use table::TableSettings;

pub mod util {
    //! Re-exported text utilities, useful for building custom chrome
    //! (measuring styled strings, wrapping text outside the renderer).

    pub use crate::text::{
        capitalize_first, emojify, escape_regexp, indent_lines, strip_ansi, truncate,
        unescape_entities, visible_width, wordwrap,
    };
}

/// Errors from configuring a renderer.
///
/// Rendering itself is infallible: unsafe links render to nothing,
/// highlighter failures fall back to plain styling.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// The configured wrap width leaves no room to render into.
    #[error("configured width is too narrow to render into")]
    TooNarrow,
}

/// Render a Markdown document to terminal text with the given options.
pub fn render_markdown(text: &str, options: RenderOptions) -> Result<String, Error> {
    let renderer = NodeRenderer::new(options)?;
    Ok(engine::render_markdown(text, &renderer))
}

/// Render an error report with the given options.
pub fn render_error(props: &ErrorProps, options: ErrorFormatOptions) -> Result<String, Error> {
    let formatter = ErrorFormatter::new(options)?;
    Ok(formatter.render(props))
}

#[cfg(test)]
mod tests;
