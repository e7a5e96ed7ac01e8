use crate::table;
use crate::util::*;
use crate::{
    link, render_error, render_markdown, Error, ErrorFormatOptions, ErrorFormatter, ErrorProps,
    NodeRenderer, RenderOptions, Style, TableSettings,
};

/// Like assert_eq!(), but prints out the results normally as well
macro_rules! assert_eq_str {
    ($a:expr, $b:expr) => {
        if $a != $b {
            println!("<<<\n{}===\n{}>>>", $a, $b);
            assert_eq!($a, $b);
        }
    };
}

fn plain_opts() -> RenderOptions {
    RenderOptions::default().colors(false)
}

fn plain_renderer() -> NodeRenderer {
    NodeRenderer::new(plain_opts()).unwrap()
}

#[track_caller]
fn test_md(input: &str, expected: &str) {
    let output = render_markdown(input, plain_opts()).unwrap();
    assert_eq_str!(output, expected);
}

#[track_caller]
fn test_md_conf<F>(input: &str, expected: &str, conf: F)
where
    F: Fn(RenderOptions) -> RenderOptions,
{
    let output = render_markdown(input, conf(plain_opts())).unwrap();
    assert_eq_str!(output, expected);
}

fn marker_style(s: &str) -> String {
    format!("<s>{}</s>", s)
}

/* ---------- text utilities ---------- */

#[test]
fn test_wordwrap_width_invariant() {
    let samples = [
        "The quick brown fox jumps over the lazy dog",
        "one two three four five six seven eight nine ten",
        "word",
        "a b c d e f g h i j k l m n o p",
        "internationalization considerations notwithstanding",
    ];
    for text in samples {
        for width in 1..30 {
            let wrapped = wordwrap(text, width, false);
            for line in wrapped.split('\n') {
                let ok = visible_width(line) <= width || !line.contains(' ');
                assert!(ok, "line {:?} too wide for width {}", line, width);
            }
        }
    }
}

#[test]
fn test_wordwrap_deterministic() {
    let text = "some text that will be wrapped at a modest width, twice";
    assert_eq_str!(wordwrap(text, 12, true), wordwrap(text, 12, true));
}

#[test]
fn test_wordwrap_packs_greedily() {
    assert_eq_str!(
        wordwrap("aa bb cc dd", 5, false),
        wordwrap("aa  bb\tcc\ndd", 5, false)
    );
    assert_eq_str!(wordwrap("aa bb cc dd", 5, false), "aa bb\ncc dd");
}

#[test]
fn test_wordwrap_hard_breaks() {
    // \r marks a hard break; each side wraps independently.
    assert_eq_str!(wordwrap("aa bb\rcc", 20, false), "aa bb\ncc");
    // <br /> only counts in gfm mode.
    assert_eq_str!(wordwrap("aa<br />bb", 20, true), "aa\nbb");
    assert_eq_str!(wordwrap("aa<br />bb", 20, false), "aa<br />bb");
}

#[test]
fn test_wordwrap_long_word_not_split() {
    assert_eq_str!(wordwrap("antidisestablishmentarianism", 5, false),
                   "antidisestablishmentarianism");
    // An oversized word still goes onto its own line.
    assert_eq_str!(wordwrap("hi antidisestablishmentarianism hi", 5, false),
                   "hi\nantidisestablishmentarianism\nhi");
}

#[test]
fn test_truncate() {
    assert_eq_str!(truncate("hello world", 8), "hello...");
    assert_eq!(truncate("hello world", 8).chars().count(), 8);
    assert!(truncate("hello world", 8).ends_with("..."));
    assert_eq_str!(truncate("hello", 8), "hello");
    assert_eq_str!(truncate("hello", 5), "hello");
    assert_eq_str!(truncate("hello", 3), "...");
}

#[test]
fn test_capitalize_first() {
    assert_eq_str!(capitalize_first("hello"), "Hello");
    assert_eq_str!(capitalize_first("Hello"), "Hello");
    assert_eq_str!(capitalize_first("x"), "X");
    assert_eq_str!(capitalize_first(""), "");
    assert_eq_str!(capitalize_first("éclair"), "Éclair");
}

#[test]
fn test_escape_regexp() {
    assert_eq_str!(escape_regexp("a.b*c"), "a\\.b\\*c");
    assert_eq_str!(escape_regexp("[x](y)"), "\\[x\\]\\(y\\)");
    assert_eq_str!(escape_regexp("1+1?"), "1\\+1\\?");
    assert_eq_str!(escape_regexp("plain"), "plain");
}

#[test]
fn test_visible_width_ignores_ansi() {
    let styled = Style::Sgr("1;31").apply("hello");
    assert_ne!(styled.len(), 5);
    assert_eq!(visible_width(&styled), 5);
    assert_eq!(visible_width("\x1b[0m"), 0);
    assert_eq!(visible_width("plain"), 5);
}

#[test]
fn test_strip_ansi() {
    assert_eq_str!(strip_ansi("\x1b[1;4;35mtitle\x1b[0m"), "title");
    assert_eq_str!(strip_ansi("no escapes"), "no escapes");
}

#[test]
fn test_unescape_entities() {
    assert_eq_str!(
        unescape_entities("&lt;a&gt; &amp; &quot;b&quot; &#39;c&#39;"),
        "<a> & \"b\" 'c'"
    );
    // Decoding is a single pass: an escaped ampersand's decoded form is
    // never itself re-decoded.
    assert_eq_str!(unescape_entities("&amp;lt;"), "&lt;");
    assert_eq_str!(unescape_entities("&amp;amp;"), "&amp;");
}

#[test]
fn test_emoji_substitution() {
    let out = emojify(":heart:");
    assert!(out.contains('\u{2764}'), "no heart glyph in {:?}", out);
    assert!(out.ends_with(' '), "no trailing space in {:?}", out);
    // Unknown shortcodes keep their colons.
    assert_eq_str!(emojify(":notareal:"), ":notareal:");
    let out = emojify("I :heart: terminals");
    assert!(out.starts_with("I \u{2764}"));
    assert!(out.ends_with("terminals"));
}

#[test]
fn test_indent_lines() {
    assert_eq_str!(indent_lines("a\nb", 4), "    a\n    b");
    assert_eq_str!(indent_lines("a", 2), "  a");
}

/* ---------- link sanitization ---------- */

#[test]
fn test_link_sanitizer() {
    assert!(link::is_safe("https://example.com/page"));
    assert!(link::is_safe("mailto:someone@example.com"));
    assert!(!link::is_safe("javascript:alert(1)"));
    assert!(!link::is_safe("JaVaScRiPt:alert(1)"));
    // Percent-encoded obfuscation decodes to the forbidden scheme.
    assert!(!link::is_safe("java%73cript:alert(1)"));
    // Embedded whitespace is stripped before the check.
    assert!(!link::is_safe("java\tscript:alert(1)"));
    // Undecodable percent-encoding is rejected, not propagated.
    assert!(!link::is_safe("%FF%FE:whatever"));
}

#[test]
fn test_link_rendering() {
    let r = plain_renderer();
    assert_eq_str!(r.link("javascript:alert(1)", "", "click"), "");
    assert_eq_str!(
        r.link("https://example.com", "", "Example"),
        "Example (https://example.com)"
    );
    // Label identical to the target collapses to the bare target.
    assert_eq_str!(
        r.link("https://example.com", "", "https://example.com"),
        "https://example.com"
    );
}

#[test]
fn test_link_styles() {
    let mut styles = crate::StyleSheet::default();
    styles.link = Style::Custom(marker_style);
    styles.href = Style::Plain;
    let r = NodeRenderer::new(RenderOptions::default().styles(styles)).unwrap();
    assert_eq_str!(
        r.link("https://example.com", "", "Example"),
        "<s>Example (https://example.com)</s>"
    );
}

/* ---------- lists ---------- */

#[test]
fn test_ordered_list_numbering() {
    let r = plain_renderer();
    let body = " * First\n * Second\n * Third";
    let out = r.list(body, true);
    assert_eq_str!(out, "\n     1. First\n     2. Second\n     3. Third\n");
    for line in out.trim_matches('\n').split('\n') {
        assert!(line.starts_with("    "), "line {:?} not indented", line);
    }
}

#[test]
fn test_unordered_list() {
    test_md("* one\n* two", "\n     * one\n     * two\n");
}

#[test]
fn test_ordered_list_through_engine() {
    test_md("1. one\n2. two", "\n     1. one\n     2. two\n");
}

/* ---------- tables ---------- */

#[test]
fn test_table_sentinel_round_trip() {
    let row = table::tablerow(&format!("{}{}", table::tablecell("a"), table::tablecell("b")));
    let rows = table::parse_rows(&row, str::to_string);
    assert_eq!(rows, vec![vec!["a".to_string(), "b".to_string()]]);
    assert_eq!(table::parse_rows("", str::to_string), Vec::<Vec<String>>::new());
}

#[test]
fn test_table_round_trip() {
    let input = "\
| command | description |
| ------- | ----------- |
| ls -l   | List all files |
";
    let out = render_markdown(input, plain_opts()).unwrap();
    let out = strip_ansi(&out).into_owned();
    let head_line = out
        .lines()
        .find(|l| l.contains("command"))
        .expect("no header row");
    assert!(head_line.contains("description"));
    let body_line = out
        .lines()
        .find(|l| l.contains("ls -l"))
        .expect("no body row");
    assert!(body_line.contains("List all files"));
    // Box chrome present.
    assert!(out.contains('┌') && out.contains('┘') && out.contains('│'));
}

#[test]
fn test_table_ragged_rows_tolerated() {
    let head = vec!["a".to_string(), "b".to_string()];
    let rows = vec![vec!["only".to_string()]];
    let drawn = table::draw_box_table(&head, &rows, &TableSettings::default());
    assert!(drawn.lines().all(|l| visible_width(l) == visible_width(drawn.lines().next().unwrap())));
}

#[test]
fn test_table_padding_setting() {
    let head = vec!["h".to_string()];
    let narrow = table::draw_box_table(&head, &[], &TableSettings { padding: 1 });
    let wide = table::draw_box_table(&head, &[], &TableSettings { padding: 3 });
    assert!(visible_width(wide.lines().next().unwrap())
        > visible_width(narrow.lines().next().unwrap()));
}

#[test]
fn test_tables_disabled() {
    let out = render_markdown("| a | b |", plain_opts().tables(false)).unwrap();
    assert!(!out.contains('┌'));
    assert!(out.contains("| a | b |"));
}

/* ---------- node rendering through the engine ---------- */

#[test]
fn test_heading_and_paragraph() {
    test_md("# Title\n\nHello world.", "\n# Title\n\nHello world.\n");
    test_md("## Sub", "\n## Sub\n");
}

#[test]
fn test_first_heading_style_differs() {
    let mut styles = crate::StyleSheet::default();
    styles.first_heading = Style::Custom(marker_style);
    styles.heading = Style::Plain;
    let opts = RenderOptions::default().styles(styles);
    let out = render_markdown("# One\n\n## Two", opts).unwrap();
    assert!(out.contains("<s># One</s>"));
    assert!(out.contains("\n## Two\n"));
}

#[test]
fn test_paragraph_wraps_at_columns() {
    let out = render_markdown(
        "one two three four five six seven eight nine ten",
        plain_opts().columns(12),
    )
    .unwrap();
    for line in out.trim_matches('\n').split('\n') {
        assert!(visible_width(line) <= 12, "line {:?} too wide", line);
    }
}

#[test]
fn test_blockquote() {
    test_md("> quoted text", "\n    quoted text\n");
}

#[test]
fn test_code_block_indented() {
    test_md("```\nlet x = 1;\nlet y = 2;\n```", "\n    let x = 1;\n    let y = 2;\n");
}

#[test]
fn test_hard_break() {
    // Trailing double space forces a hard break that survives wrapping.
    test_md("alpha  \nbeta", "\nalpha\nbeta\n");
}

#[test]
fn test_hr() {
    test_md_conf("---", "\n---------\n", |o| o.columns(10));
}

#[test]
fn test_html_passthrough() {
    let out = render_markdown("<div>raw</div>\n", plain_opts()).unwrap();
    assert!(out.contains("<div>raw</div>"));
}

#[test]
fn test_image() {
    test_md(
        "![alt text](https://example.com/a.png \"The Title\")",
        "\n![alt text – The Title](https://example.com/a.png)\n",
    );
    test_md(
        "![alt text](https://example.com/a.png)",
        "\n![alt text](https://example.com/a.png)\n",
    );
}

#[test]
fn test_codespan_colon_protected() {
    // The colon inside the code span must survive the emoji pass while
    // the shortcode outside it is still substituted.
    let out = render_markdown("`std::fmt` and :heart:", plain_opts()).unwrap();
    assert!(out.contains("std::fmt"), "colons corrupted: {:?}", out);
    assert!(out.contains('\u{2764}'));
}

#[test]
fn test_emoji_disabled() {
    let out = render_markdown("I :heart: x", plain_opts().emojis(false)).unwrap();
    assert!(out.contains(":heart:"));
}

#[test]
fn test_entities_unescaped() {
    // pulldown passes literal text through, so feed the escapes directly.
    let r = plain_renderer();
    assert_eq_str!(r.paragraph("a &amp; b"), "\na & b\n");
}

#[test]
fn test_strikethrough_and_emphasis() {
    let mut styles = crate::StyleSheet::default();
    styles.del = Style::Custom(marker_style);
    let opts = RenderOptions::default().styles(styles);
    let out = render_markdown("~~gone~~", opts).unwrap();
    assert!(out.contains("<s>gone</s>"));

    test_md("*em* **strong**", "\nem strong\n");
}

#[test]
fn test_highlight_fallback() {
    fn failing(_code: &str) -> Result<String, Box<dyn std::error::Error + Send + Sync>> {
        Err("boom".into())
    }
    let mut styles = crate::StyleSheet::default();
    styles.code = Style::Custom(marker_style);
    let opts = RenderOptions::default().styles(styles).highlight(failing);
    let r = NodeRenderer::new(opts).unwrap();
    // Highlighter failure falls back to the plain code style.
    assert_eq_str!(r.highlight("var x;", "js"), "<s>var x;</s>");
    // Non-JS languages never reach the highlighter.
    assert_eq_str!(r.highlight("fn x() {}", "rust"), "<s>fn x() {}</s>");
    // Colors off returns the code untouched.
    assert_eq_str!(plain_renderer().highlight("var x;", "js"), "var x;");
}

#[test]
fn test_highlight_success() {
    fn shouting(code: &str) -> Result<String, Box<dyn std::error::Error + Send + Sync>> {
        Ok(code.to_uppercase())
    }
    let r = NodeRenderer::new(RenderOptions::default().highlight(shouting)).unwrap();
    assert_eq_str!(r.highlight("var x;", "javascript"), "VAR X;");
}

/* ---------- configuration ---------- */

#[test]
fn test_zero_width_rejected() {
    assert!(matches!(
        render_markdown("hi", plain_opts().columns(0)),
        Err(Error::TooNarrow)
    ));
}

#[test]
fn test_set_options_rejects_bad_update() {
    let mut r = plain_renderer();
    assert!(r.set_options(plain_opts().columns(0)).is_err());
    // The previous configuration survives a rejected update.
    assert_eq!(r.options().columns, 80);
    assert!(r.set_options(plain_opts().columns(40)).is_ok());
    assert_eq!(r.options().columns, 40);
}

/* ---------- error formatting ---------- */

fn plain_fmt() -> ErrorFormatOptions {
    ErrorFormatOptions::default().render(plain_opts())
}

fn fmt(opts: ErrorFormatOptions) -> ErrorFormatter {
    ErrorFormatter::new(opts).unwrap()
}

#[test]
fn test_header_scenario() {
    let f = fmt(plain_fmt().render(plain_opts().columns(21)));
    let out = f.header(Some("Test"));
    assert_eq_str!(out, "\n==== ERROR: Test ====\n");
    assert_eq!(visible_width(out.trim_matches('\n')), 21);
}

#[test]
fn test_header_without_name_drops_colon() {
    let f = fmt(plain_fmt().render(plain_opts().columns(20)));
    let out = f.header(None);
    assert!(out.contains("==== ERROR ="), "dangling colon in {:?}", out);
    assert!(!out.contains("ERROR:"));
}

#[test]
fn test_header_drops_only_one_trailing_colon() {
    let f = fmt(plain_fmt()
        .render(plain_opts().columns(20))
        .header_title("WARN::"));
    let out = f.header(None);
    assert!(out.contains("==== WARN: ="), "colon run over-stripped: {:?}", out);
}

#[test]
fn test_divider_length_invariant() {
    for columns in 10..40 {
        for margin in [0usize, 2] {
            let f = fmt(plain_fmt()
                .render(plain_opts().columns(columns))
                .margin_right(margin));
            let d = f.divider(Some("T"));
            assert_eq!(
                visible_width(&d),
                columns - margin,
                "columns={} margin={}",
                columns,
                margin
            );
        }
    }
}

#[test]
fn test_untitled_divider_spans_full_width() {
    let f = fmt(plain_fmt().render(plain_opts().columns(30)).margin_right(4));
    assert_eq!(visible_width(&f.divider(None)), 30);
}

#[test]
fn test_message_prefix_stripped_and_capitalized() {
    let f = fmt(plain_fmt());
    let out = f.message("Error: ENOENT: no such file or directory");
    assert_eq_str!(out, "\nNo such file or directory\n");
    let out = f.message("plain message");
    assert_eq_str!(out, "\nPlain message\n");
}

#[test]
fn test_footer_emptiness() {
    let f = fmt(plain_fmt());
    assert_eq_str!(f.footer(None, None), "");

    let out = f.footer(Some("E42"), None);
    assert!(out.contains("Code: E42"));
    assert!(!out.contains("Path:"));

    let out = f.footer(None, Some("/tmp/x"));
    assert!(out.contains("Path: /tmp/x"));
    assert!(!out.contains("Code:"));

    let out = f.footer(Some("E42"), Some("/tmp/x"));
    assert!(out.contains("Code: E42\nPath: /tmp/x"));
}

#[test]
fn test_trace_verbatim() {
    let f = fmt(plain_fmt());
    let stack = "at foo (a.rs:1)\n        at bar (b.rs:2)";
    let out = f.trace(stack);
    assert!(out.contains("STACK TRACE"));
    assert!(out.ends_with(stack), "stack was modified: {:?}", out);
}

#[test]
fn test_explain_modes() {
    let f = fmt(plain_fmt());
    // Markdown mode delegates to the engine (paragraph chrome appears).
    assert_eq_str!(f.explain("some *markdown* text"), "\nsome markdown text\n");

    let f = fmt(plain_fmt().markdown(false));
    let out = f.explain("plain explanation");
    assert_eq_str!(out, "\nplain explanation");
}

#[test]
fn test_hints_section() {
    let f = fmt(plain_fmt());
    let out = f.hints("try `--help`");
    assert!(out.contains("==== HINTS"));
    assert!(out.contains("try --help"));
}

#[test]
fn test_error_report_section_order() {
    let props = ErrorProps {
        code: Some("ENOENT".into()),
        name: "FileNotFound".into(),
        readable_name: Some("File Not Found".into()),
        message: "Error: ENOENT: no such file or directory".into(),
        explain: Some("The file was removed.".into()),
        hints: Some("Check the path.".into()),
        path: Some("/etc/missing".into()),
        stack: Some("at main (main.rs:3)".into()),
        ..ErrorProps::default()
    };
    let out = render_error(&props, plain_fmt()).unwrap();

    let pos = |needle: &str| out.find(needle).unwrap_or_else(|| panic!("missing {:?}", needle));
    let header = pos("ERROR: File Not Found");
    let message = pos("No such file or directory");
    let explain = pos("The file was removed.");
    let hints = pos("Check the path.");
    let trace = pos("at main (main.rs:3)");
    let footer = pos("Code: ENOENT");
    assert!(header < message && message < explain && explain < hints);
    assert!(hints < trace && trace < footer);
    assert!(out.contains("Path: /etc/missing"));
}

#[test]
fn test_error_report_minimal() {
    let props = ErrorProps {
        name: "Oops".into(),
        message: "something broke".into(),
        ..ErrorProps::default()
    };
    let out = render_error(&props, plain_fmt()).unwrap();
    assert!(out.contains("Something broke"));
    // No footer without code or path.
    assert!(!out.contains("Code:") && !out.contains("Path:"));
}

#[test]
fn test_error_report_styled() {
    let mut opts = ErrorFormatOptions::default();
    opts.header = Style::Custom(marker_style);
    opts = opts.render(RenderOptions::default().columns(21));
    let f = ErrorFormatter::new(opts).unwrap();
    assert_eq_str!(f.header(Some("Test")), "\n<s>==== ERROR: Test ====</s>\n");
}
