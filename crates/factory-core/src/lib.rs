//! Core types for the ffactory framework.
//!
//! This crate provides the foundational types shared by the generator,
//! sampler and presentation crates:
//!
//! - [`Value`] - A single generated cell value
//! - [`Row`] / [`Table`] - Materialized rows keyed by column name
//! - [`ColumnKind`] / [`Locale`] - The closed set of column kinds per locale
//! - [`Schema`] - Ordered, collision-aware column declarations
//! - [`SchemaFile`] - Declarative schema loaded from YAML
//!
//! # Architecture
//!
//! ```text
//! factory-core (this crate)
//!    │
//!    ├─── factory-generator  (resolves a Schema into a Table)
//!    ├─── factory-sampler    (Table -> smaller Table)
//!    └─── factory-present    (Table -> text / csv / json / html)
//! ```
//!
//! # Example
//!
//! ```rust
//! use factory_core::{ColumnDecl, Locale, Schema};
//!
//! let mut schema = Schema::new(Locale::EnUs);
//! schema.add_column("price", &Default::default()).unwrap();
//! schema.add_column("price", &Default::default()).unwrap();
//! assert_eq!(schema.column_names(), vec!["price", "price2"]);
//!
//! let decls = vec![ColumnDecl::from("id"), ColumnDecl::from("name")];
//! schema.add_columns(&decls).unwrap();
//! ```

pub mod error;
pub mod kinds;
pub mod schema;
pub mod table;
pub mod values;

// Re-exports for convenience
pub use error::ErrorCategory;
pub use kinds::{Bounds, ColumnKind, Locale, Params, REPETITIVE_KINDS};
pub use schema::{ColumnDecl, ColumnSpec, Schema, SchemaError, SchemaFile};
pub use table::{ColumnRename, Table};
pub use values::{Row, Value};
