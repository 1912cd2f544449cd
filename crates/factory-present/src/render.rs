//! Fixed-width text rendering.
//!
//! ```text
//! id | name
//! ---+----------
//! 0  | Ana
//! 10 | Bob Stone
//! ```

use comfy_table::{ContentArrangement, Table as TextTable};
use factory_core::{Row, Value};
use std::sync::Arc;

/// No outer borders, `|` between columns, a `-` header rule crossed by `+`.
const PLAIN_PRESET: &str = "      - + |        ";

fn clean_cell(value: Option<&Value>) -> String {
    value
        .map(|v| v.to_string().replace('\r', "").replace('\n', " "))
        .unwrap_or_default()
}

fn build(columns: &[String], rows: &[Arc<Row>]) -> TextTable {
    let mut table = TextTable::new();
    table.load_preset(PLAIN_PRESET).set_header(columns.iter());
    for row in rows {
        table.add_row(columns.iter().map(|col| clean_cell(row.get(col))));
    }

    let last = columns.len().saturating_sub(1);
    for (i, column) in table.column_iter_mut().enumerate() {
        let left = if i == 0 { 0 } else { 1 };
        let right = if i == last { 0 } else { 1 };
        column.set_padding((left, right));
    }
    table
}

/// Render rows as a column-aligned text table.
///
/// Each column is as wide as its header or its longest cell, whichever is
/// longer. Cells are left-aligned, columns are joined by `" | "` and the
/// header is underlined with a `"-+-"` rule.
pub fn render_table(columns: &[String], rows: &[Arc<Row>]) -> String {
    if columns.is_empty() {
        return String::new();
    }
    build(columns, rows).to_string()
}

/// Like [`render_table`], word-wrapping cells so no line exceeds `width`.
pub fn render_table_wrapped(columns: &[String], rows: &[Arc<Row>], width: u16) -> String {
    if columns.is_empty() {
        return String::new();
    }
    let mut table = build(columns, rows);
    table
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(width);
    table.to_string()
}
