//! Sampling over materialized ffactory tables.
//!
//! [`TableSampler`] borrows a [`Table`](factory_core::Table) and returns new
//! tables holding a subset (or multiset) of its rows. Rows are shared with
//! the source through `Arc`, so sampling never copies row data and never
//! touches the source table.
//!
//! # Algorithms
//!
//! - [`random_sampling`](TableSampler::random_sampling) - `n` uniform draws,
//!   with or without replacement
//! - [`stratified_sampling`](TableSampler::stratified_sampling) - proportional
//!   allocation over the distinct values of a column
//! - [`systematic_sampling`](TableSampler::systematic_sampling) - every
//!   `interval`-th row, skipping rows already taken
//! - [`cluster_sampling`](TableSampler::cluster_sampling) - whole groups of
//!   rows sharing a value
//!
//! # Example
//!
//! ```rust
//! use factory_core::{Row, Table, Value};
//! use factory_sampler::TableSampler;
//!
//! let rows = (0..10)
//!     .map(|i| Row::from([("id".to_string(), Value::Int(i))]))
//!     .collect();
//! let table = Table::from_rows(vec!["id".to_string()], rows);
//!
//! let sample = TableSampler::new(&table, 42).random_sampling(3, false).unwrap();
//! assert_eq!(sample.len(), 3);
//! ```

pub mod error;
pub mod sampler;
pub mod strata;

// Re-exports for convenience
pub use error::SamplingError;
pub use sampler::TableSampler;
pub use strata::{allocate_proportionally, group_rows, Group};
