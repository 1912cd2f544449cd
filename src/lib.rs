//! ffactory library
//!
//! Reproducible synthetic tabular data: declare columns, generate a table,
//! re-sample it, render or export it.
//!
//! # Crates
//!
//! - `factory_core` - values, tables, column kinds and the column schema
//! - `factory_generator` - the [`DataFactory`] row generator and field providers
//! - `factory_sampler` - the [`TableSampler`] sampling algorithms
//! - `factory_present` - text rendering and CSV/JSON/HTML export
//!
//! # Example
//!
//! ```rust
//! use ffactory::{ColumnDecl, DataFactory, Locale, TableSampler};
//!
//! let mut factory: DataFactory = DataFactory::new(Locale::PtBr, 20);
//! factory
//!     .add_columns(&[ColumnDecl::from("id"), ColumnDecl::from("name"), ColumnDecl::from("cpf")])
//!     .unwrap();
//! let table = factory.generate_table(50, true).unwrap();
//!
//! let sample = TableSampler::new(table, 7).systematic_sampling(5, 10).unwrap();
//! println!("{}", ffactory::render_table(sample.columns(), sample.rows()));
//! ```
//!
//! # CLI Usage
//!
//! ```bash
//! # Print 20 rows described by a schema file
//! ffactory generate --schema people.yaml --rows 20
//!
//! # Export to people.csv
//! ffactory generate --schema people.yaml --format csv --output people
//!
//! # Stratified sample of 10 rows over the `boolean` column
//! ffactory sample --schema people.yaml --rows 100 stratified -n 10 --column boolean
//! ```

pub mod cli;

pub use factory_core::{
    Bounds, ColumnDecl, ColumnKind, ColumnRename, ColumnSpec, ErrorCategory, Locale, Params, Row,
    Schema, SchemaError, SchemaFile, Table, Value, REPETITIVE_KINDS,
};
pub use factory_generator::{CatalogProvider, DataFactory, FieldProvider, GeneratorError};
pub use factory_present::{export, export_table, render_table, ExportError, ExportFormat};
pub use factory_sampler::{SamplingError, TableSampler};
