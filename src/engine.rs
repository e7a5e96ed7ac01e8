//! Adapter between `pulldown-cmark` and the per-node renderer.
//!
//! The parser emits a flat event stream; this walker keeps a stack of open
//! nodes, buffering each node's rendered children until its `End` event
//! arrives, at which point the matching [`NodeRenderer`] method turns the
//! buffer into a finished fragment appended to the parent's buffer.  The
//! engine itself never styles or wraps anything.

use pulldown_cmark::{CodeBlockKind, Event, Options, Parser, Tag};

use crate::render::NodeRenderer;

/// Render a whole Markdown document through `renderer`.
pub fn render_markdown(text: &str, renderer: &NodeRenderer) -> String {
    let mut opts = Options::empty();
    if renderer.options().tables {
        opts.insert(Options::ENABLE_TABLES);
    }
    if renderer.options().gfm {
        opts.insert(Options::ENABLE_STRIKETHROUGH);
    }

    let mut out = String::new();
    let mut stack: Vec<(Tag<'_>, String)> = Vec::new();
    // GFM tables cannot nest, so one slot suffices for the pending head row.
    let mut table_head: Option<String> = None;

    for event in Parser::new_ext(text, opts) {
        match event {
            Event::Start(tag) => stack.push((tag, String::new())),
            Event::End(_) => {
                let (tag, buf) = match stack.pop() {
                    Some(frame) => frame,
                    None => continue,
                };
                md_trace!("closing node: {:?}", tag);
                match tag {
                    Tag::TableHead => {
                        table_head = Some(renderer.tablerow(&buf));
                    }
                    tag => {
                        let rendered = render_node(renderer, tag, buf, &mut table_head);
                        push(&mut stack, &mut out, &rendered);
                    }
                }
            }
            Event::Text(t) => push(&mut stack, &mut out, &renderer.text(&t)),
            Event::Code(t) => push(&mut stack, &mut out, &renderer.codespan(&t)),
            Event::InlineHtml(t) => push(&mut stack, &mut out, &renderer.html(&t)),
            // Block-level raw HTML accumulates inside its HtmlBlock frame
            // and is styled once, when the frame closes.
            Event::Html(t) => push(&mut stack, &mut out, &t),
            Event::SoftBreak => push(&mut stack, &mut out, "\n"),
            Event::HardBreak => push(&mut stack, &mut out, &renderer.br()),
            Event::Rule => push(&mut stack, &mut out, &renderer.hr()),
            _ => {}
        }
    }
    out
}

fn render_node(
    renderer: &NodeRenderer,
    tag: Tag<'_>,
    buf: String,
    table_head: &mut Option<String>,
) -> String {
    match tag {
        Tag::Paragraph => renderer.paragraph(&buf),
        Tag::Heading { level, .. } => renderer.heading(&buf, level as usize),
        Tag::BlockQuote(_) => renderer.blockquote(&buf),
        Tag::CodeBlock(kind) => {
            let lang = match &kind {
                CodeBlockKind::Fenced(info) => info.split(' ').next().unwrap_or(""),
                CodeBlockKind::Indented => "",
            };
            renderer.code(buf.trim_end_matches('\n'), lang)
        }
        Tag::HtmlBlock => renderer.html(&buf),
        Tag::List(start) => renderer.list(&buf, start.is_some()),
        Tag::Item => renderer.listitem(&buf),
        Tag::Table(_) => renderer.table(&table_head.take().unwrap_or_default(), &buf),
        Tag::TableRow => renderer.tablerow(&buf),
        Tag::TableCell => renderer.tablecell(&buf),
        Tag::Emphasis => renderer.em(&buf),
        Tag::Strong => renderer.strong(&buf),
        Tag::Strikethrough => renderer.del(&buf),
        Tag::Link {
            dest_url, title, ..
        } => renderer.link(&dest_url, &title, &buf),
        Tag::Image {
            dest_url, title, ..
        } => renderer.image(&dest_url, &title, &buf),
        // Constructs we have no callback for pass their content through.
        _ => buf,
    }
}

fn push(stack: &mut Vec<(Tag<'_>, String)>, out: &mut String, fragment: &str) {
    match stack.last_mut() {
        Some((_, buf)) => buf.push_str(fragment),
        None => out.push_str(fragment),
    }
}
