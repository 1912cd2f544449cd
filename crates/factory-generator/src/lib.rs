//! Synthetic row generator for the ffactory framework.
//!
//! This crate provides the [`DataFactory`] which resolves a column
//! [`Schema`](factory_core::Schema) into rows. Every column owns its own
//! seeded random source (`base_seed + slot`), and a locale-wide source
//! (`base_seed`) drives the ranged numeric and date columns, so the same seed
//! and the same sequence of column declarations always produce the same
//! table.
//!
//! # Architecture
//!
//! ```text
//! Schema (columns + slots)
//!        │
//!        ▼
//! ┌──────────────────────┐
//! │     DataFactory      │
//! │                      │
//! │  - context provider  │──▶ age / price / date
//! │  - slot -> provider  │──▶ email / phone / boolean / primitives
//! └──────────┬───────────┘
//!            │
//!            ▼
//!     Table { columns, rows }
//! ```
//!
//! # Example
//!
//! ```rust
//! use factory_core::{ColumnDecl, Locale};
//! use factory_generator::DataFactory;
//!
//! let mut factory: DataFactory = DataFactory::new(Locale::EnUs, 42);
//! factory
//!     .add_columns(&[ColumnDecl::from("name"), ColumnDecl::from("id"), ColumnDecl::from("email")])
//!     .unwrap();
//! let table = factory.generate_table(5, true).unwrap();
//! assert_eq!(table.columns(), &["id", "name", "email"]);
//! assert_eq!(table.len(), 5);
//! ```
//!
//! # Column kinds
//!
//! - `id` - Row ordinal, 0-based
//! - `name` - Person name from the provider
//! - `email` - Derived from the row's name (see [`generators::email`])
//! - `age` - Integer in `[min, max]`, or a magnitude-tiered default
//! - `price` - Float in `[min, max]` rounded to 2 decimals, default `[0, 1]`
//! - `date` - Date in `[min, max]`, default the last 10 years
//! - `boolean` - `0`/`1` with a configurable true chance
//! - `phoneNumber` - Locale-specific phone format
//! - anything else - The provider primitive of the same name

pub mod generator;
pub mod generators;
pub mod provider;

// Re-exports for convenience
pub use generator::{DataFactory, GeneratorError};
pub use provider::{CatalogProvider, FieldProvider};
