//! CSV, JSON and HTML export.
//!
//! Every export is written to a temporary file next to the target and then
//! persisted over `path.<extension>` in one rename, so a failed export never
//! leaves a truncated file behind.

use crate::error::ExportError;
use crate::path::validate_path;
use factory_core::{Row, Table, Value};
use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};
use std::fmt;
use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Arc;
use tempfile::NamedTempFile;
use tracing::{debug, info};

/// Supported export formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// `;`-delimited with a header row
    Csv,
    /// Array of objects, 4-space indented
    Json,
    /// Minimal styled HTML table
    Html,
}

impl ExportFormat {
    /// File extension, also the format name.
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Json => "json",
            Self::Html => "html",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for ExportFormat {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            "html" => Ok(Self::Html),
            other => Err(ExportError::UnsupportedFormat(other.to_string())),
        }
    }
}

/// Export a whole table.
pub fn export_table(
    table: &Table,
    format: ExportFormat,
    path: &str,
) -> Result<PathBuf, ExportError> {
    export(table.columns(), table.rows(), format, path)
}

/// Write `rows` to `path.<format>` and return the written file's path.
///
/// `path` is given without extension and is checked with
/// [`validate_path`] before anything is written.
pub fn export(
    columns: &[String],
    rows: &[Arc<Row>],
    format: ExportFormat,
    path: &str,
) -> Result<PathBuf, ExportError> {
    let base = validate_path(path)?;
    let mut target = base.into_os_string();
    target.push(".");
    target.push(format.extension());
    let target = PathBuf::from(target);

    let dir = match target.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
        _ => PathBuf::from("."),
    };
    let tmp = NamedTempFile::new_in(&dir)?;
    debug!("Writing {} export to {}", format, tmp.path().display());

    {
        let mut writer = BufWriter::new(tmp.as_file());
        match format {
            ExportFormat::Csv => write_csv(&mut writer, columns, rows)?,
            ExportFormat::Json => write_json(&mut writer, columns, rows)?,
            ExportFormat::Html => write_html(&mut writer, columns, rows)?,
        }
        writer.flush()?;
    }
    tmp.as_file().sync_all()?;
    tmp.persist(&target).map_err(|e| e.error)?;

    info!(
        "Exported {} rows to '{}' ({} bytes)",
        rows.len(),
        target.display(),
        file_size(&target)
    );
    Ok(target)
}

fn file_size(path: &Path) -> u64 {
    fs::metadata(path).map(|m| m.len()).unwrap_or(0)
}

// ===== CSV =====

fn write_csv<W: Write>(
    writer: W,
    columns: &[String],
    rows: &[Arc<Row>],
) -> Result<(), ExportError> {
    let mut csv = csv::WriterBuilder::new().delimiter(b';').from_writer(writer);
    csv.write_record(columns)?;
    for row in rows {
        csv.write_record(
            columns
                .iter()
                .map(|col| row.get(col).map(Value::to_string).unwrap_or_default()),
        )?;
    }
    csv.flush()?;
    Ok(())
}

// ===== JSON =====

/// One row serialized as an object with keys in column order.
struct OrderedRow<'a> {
    columns: &'a [String],
    row: &'a Row,
}

impl Serialize for OrderedRow<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.columns.len()))?;
        for col in self.columns {
            map.serialize_entry(col, self.row.get(col).unwrap_or(&Value::Null))?;
        }
        map.end()
    }
}

struct OrderedRows<'a> {
    columns: &'a [String],
    rows: &'a [Arc<Row>],
}

impl Serialize for OrderedRows<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.rows.len()))?;
        for row in self.rows {
            seq.serialize_element(&OrderedRow {
                columns: self.columns,
                row,
            })?;
        }
        seq.end()
    }
}

fn write_json<W: Write>(
    writer: W,
    columns: &[String],
    rows: &[Arc<Row>],
) -> Result<(), ExportError> {
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(writer, formatter);
    OrderedRows { columns, rows }.serialize(&mut ser)?;
    Ok(())
}

// ===== HTML =====

const HTML_HEAD: &str = r#"<html>
<head>
    <meta charset="UTF-8">
    <style>
        table {
            font-family: "Courier New", Courier, monospace;
            border-collapse: collapse;
            width: 100%;
        }
        td, th {
            border: 1px solid #dddddd;
            text-align: left;
            padding: 8px;
        }
        tr:nth-child(even) {
            background-color: #dddddd;
        }
    </style>
</head>
<body>
    <table>
"#;

const HTML_TAIL: &str = "    </table>\n</body>\n</html>\n";

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn write_html<W: Write>(
    mut writer: W,
    columns: &[String],
    rows: &[Arc<Row>],
) -> Result<(), ExportError> {
    writer.write_all(HTML_HEAD.as_bytes())?;

    writeln!(writer, "        <thead>\n            <tr>")?;
    for col in columns {
        writeln!(writer, "                <th>{}</th>", escape_html(col))?;
    }
    writeln!(writer, "            </tr>\n        </thead>\n        <tbody>")?;

    for row in rows {
        writeln!(writer, "            <tr>")?;
        for col in columns {
            let cell = row.get(col).map(Value::to_string).unwrap_or_default();
            writeln!(writer, "                <td>{}</td>", escape_html(&cell))?;
        }
        writeln!(writer, "            </tr>")?;
    }

    writeln!(writer, "        </tbody>")?;
    writer.write_all(HTML_TAIL.as_bytes())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn table() -> Table {
        let columns = vec![
            "id".to_string(),
            "name".to_string(),
            "price".to_string(),
            "date".to_string(),
        ];
        let rows = (0..3)
            .map(|i| {
                Row::from([
                    ("id".to_string(), Value::Int(i)),
                    ("name".to_string(), Value::from(format!("Jos\u{e9} <{i}>; x"))),
                    ("price".to_string(), Value::Float(i as f64 + 0.5)),
                    (
                        "date".to_string(),
                        Value::Date(NaiveDate::from_ymd_opt(2024, 1, 1 + i as u32).unwrap()),
                    ),
                ])
            })
            .collect();
        Table::from_rows(columns, rows)
    }

    fn base(dir: &TempDir, name: &str) -> String {
        dir.path().join(name).to_str().unwrap().to_string()
    }

    #[test]
    fn test_format_from_str() {
        assert_eq!("json".parse::<ExportFormat>().unwrap(), ExportFormat::Json);
        assert!(matches!(
            "xlsx".parse::<ExportFormat>(),
            Err(ExportError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_csv_round_trip() {
        let dir = TempDir::new().unwrap();
        let table = table();
        let path = export_table(&table, ExportFormat::Csv, &base(&dir, "out")).unwrap();
        assert_eq!(path.extension().unwrap(), "csv");

        let mut reader = csv::ReaderBuilder::new()
            .delimiter(b';')
            .from_path(&path)
            .unwrap();
        let headers: Vec<String> = reader.headers().unwrap().iter().map(String::from).collect();
        assert_eq!(headers, table.columns());

        let records: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
        assert_eq!(records.len(), table.len());
        for (record, row) in records.iter().zip(table.rows()) {
            for (field, col) in record.iter().zip(table.columns()) {
                assert_eq!(field, row[col].to_string());
            }
        }
        assert_eq!(&records[1][3], "2024-01-02");
    }

    #[test]
    fn test_json_round_trip_keeps_column_order() {
        let dir = TempDir::new().unwrap();
        let table = table();
        let path = export_table(&table, ExportFormat::Json, &base(&dir, "out")).unwrap();
        let text = fs::read_to_string(&path).unwrap();

        assert!(text.starts_with("[\n    {\n        \"id\": 0,"));
        let id_at = text.find("\"id\"").unwrap();
        let date_at = text.find("\"date\"").unwrap();
        assert!(id_at < date_at);

        let parsed: Vec<serde_json::Map<String, serde_json::Value>> =
            serde_json::from_str(&text).unwrap();
        assert_eq!(parsed.len(), table.len());
        assert_eq!(parsed[2]["date"], "2024-01-03");
        assert_eq!(parsed[0]["name"], "Jos\u{e9} <0>; x");
        assert_eq!(parsed[1]["price"], 1.5);
    }

    #[test]
    fn test_html_escapes_cells() {
        let dir = TempDir::new().unwrap();
        let path = export_table(&table(), ExportFormat::Html, &base(&dir, "page")).unwrap();
        let html = fs::read_to_string(path).unwrap();
        assert!(html.contains("<th>name</th>"));
        assert!(html.contains("<td>Jos\u{e9} &lt;1&gt;; x</td>"));
        assert_eq!(html.matches("<tr>").count(), 4);
    }

    #[test]
    fn test_escape_html_entities() {
        assert_eq!(
            escape_html(r#"Tom & "Jerry" <b>'s</b>"#),
            "Tom &amp; &quot;Jerry&quot; &lt;b&gt;&#39;s&lt;/b&gt;"
        );
        assert_eq!(escape_html("&amp;"), "&amp;amp;");
        assert_eq!(escape_html("Jos\u{e9}"), "Jos\u{e9}");
    }

    #[test]
    fn test_invalid_path_writes_nothing() {
        let dir = TempDir::new().unwrap();
        let err = export_table(&table(), ExportFormat::Csv, &base(&dir, "bad|name")).unwrap_err();
        assert!(matches!(err, ExportError::InvalidPath(_)));
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_export_replaces_existing_file() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("out.csv");
        fs::write(&target, "stale").unwrap();

        export_table(&table(), ExportFormat::Csv, &base(&dir, "out")).unwrap();
        let text = fs::read_to_string(&target).unwrap();
        assert!(text.starts_with("id;name;price;date"));
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
    }
}
