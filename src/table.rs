//! Table accumulation and box drawing.
//!
//! The Markdown engine hands the renderer one cell at a time, but the boxed
//! table can only be drawn once every cell is known.  Cells and rows are
//! therefore encoded into a flat string using sentinel delimiters as they
//! arrive, and decoded back into a grid when the table node closes.
//!
//! The sentinels are deliberately improbable byte sequences; they are
//! stripped during parsing and never appear in output.

use crate::text::visible_width;

/// Appended to each cell's content.
pub const CELL_SPLIT: &str = "^*||*^";

/// Wrapped around each row's content.
pub const ROW_WRAP: &str = "*|*|*|*";

/// Stand-in for a literal `:` inside inline code, restored after the
/// emoji/entity passes so they cannot corrupt code content.
pub const COLON_STANDIN: &str = "*#COLON|*";

/// Encode one cell.
pub fn tablecell(content: &str) -> String {
    format!("{}{}", content, CELL_SPLIT)
}

/// Encode one row of already-encoded cells.
pub fn tablerow(content: &str) -> String {
    format!("{}{}{}\n", ROW_WRAP, content, ROW_WRAP)
}

/// Decode a sentinel-delimited blob back into rows of cell strings.
///
/// `transform` is applied to the whole blob before splitting; empty input
/// yields no rows.  The trailing empty fragment each [`CELL_SPLIT`]
/// terminator produces is dropped.
pub fn parse_rows(blob: &str, transform: impl Fn(&str) -> String) -> Vec<Vec<String>> {
    if blob.is_empty() {
        return Vec::new();
    }
    let mut rows = Vec::new();
    for line in transform(blob).split('\n') {
        if line.is_empty() {
            continue;
        }
        let mut cells: Vec<String> = line
            .replace(ROW_WRAP, "")
            .split(CELL_SPLIT)
            .map(str::to_string)
            .collect();
        cells.pop();
        rows.push(cells);
    }
    rows
}

/// Knobs for the box drawer.  Passed through opaquely by the renderer.
#[derive(Clone, Copy, Debug)]
pub struct TableSettings {
    /// Spaces either side of cell content.
    pub padding: usize,
}

impl Default for TableSettings {
    fn default() -> TableSettings {
        TableSettings { padding: 1 }
    }
}

/// Draw a Unicode box table from a head row and data rows.
///
/// Column widths come from the widest cell in each column, measured with
/// [`visible_width`] so styled cells line up.  Rows shorter than the table
/// are padded with empty cells rather than rejected.
pub fn draw_box_table(head: &[String], rows: &[Vec<String>], settings: &TableSettings) -> String {
    let ncols = rows
        .iter()
        .map(Vec::len)
        .chain(std::iter::once(head.len()))
        .max()
        .unwrap_or(0);
    if ncols == 0 {
        return String::new();
    }
    md_trace!("draw_box_table: {} columns, {} rows", ncols, rows.len());

    let mut widths = vec![0usize; ncols];
    for row in std::iter::once(head).chain(rows.iter().map(Vec::as_slice)) {
        for (i, cell) in row.iter().enumerate() {
            widths[i] = widths[i].max(visible_width(cell));
        }
    }

    let mut out = String::new();
    out.push_str(&border_line(&widths, settings, '┌', '┬', '┐'));
    out.push('\n');
    if !head.is_empty() {
        out.push_str(&content_line(head, &widths, settings));
        out.push('\n');
        out.push_str(&border_line(&widths, settings, '├', '┼', '┤'));
        out.push('\n');
    }
    for row in rows {
        out.push_str(&content_line(row, &widths, settings));
        out.push('\n');
    }
    out.push_str(&border_line(&widths, settings, '└', '┴', '┘'));
    out
}

fn border_line(
    widths: &[usize],
    settings: &TableSettings,
    left: char,
    mid: char,
    right: char,
) -> String {
    let mut line = String::new();
    line.push(left);
    for (i, w) in widths.iter().enumerate() {
        if i > 0 {
            line.push(mid);
        }
        line.push_str(&"─".repeat(w + 2 * settings.padding));
    }
    line.push(right);
    line
}

fn content_line(row: &[String], widths: &[usize], settings: &TableSettings) -> String {
    let empty = String::new();
    let pad = " ".repeat(settings.padding);
    let mut line = String::new();
    line.push('│');
    for (i, w) in widths.iter().enumerate() {
        let cell = row.get(i).unwrap_or(&empty);
        let fill = " ".repeat(w - visible_width(cell));
        line.push_str(&pad);
        line.push_str(cell);
        line.push_str(&fill);
        line.push_str(&pad);
        line.push('│');
    }
    line
}
