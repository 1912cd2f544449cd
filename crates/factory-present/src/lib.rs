//! Presentation layer for ffactory tables.
//!
//! Everything here consumes only `(columns, rows)`:
//!
//! - [`render_table`] - fixed-width text with `" | "` separators
//! - [`render_table_wrapped`] - the same, word-wrapped to a maximum width
//! - [`export`] - CSV (`;` delimited), JSON or HTML file, written atomically
//!
//! # Example
//!
//! ```rust
//! use factory_core::{Row, Table, Value};
//! use factory_present::render_table;
//!
//! let row = Row::from([("id".to_string(), Value::Int(7))]);
//! let table = Table::from_rows(vec!["id".to_string()], vec![row]);
//! assert_eq!(render_table(table.columns(), table.rows()), "id\n--\n7 ");
//! ```

pub mod error;
pub mod export;
pub mod path;
pub mod render;

// Re-exports for convenience
pub use error::ExportError;
pub use export::{export, export_table, ExportFormat};
pub use path::{validate_path, INVALID_FILENAME_CHARS};
pub use render::{render_table, render_table_wrapped};
