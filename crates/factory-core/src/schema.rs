//! Column schema definitions.
//!
//! This module defines the ordered, collision-aware list of column
//! declarations that drives row generation, plus the declarative YAML
//! schema file.
//!
//! ## Naming
//!
//! Every column has an *effective name* that is unique within the schema.
//! Kinds in [`REPETITIVE_KINDS`] may be declared more than once; later
//! declarations get the smallest unused numeric suffix (`price`, `price2`,
//! `price3`, ...). Any other kind may appear at most once.
//!
//! ## Seed slots
//!
//! Each declaration is assigned a monotonically increasing *slot* (the number
//! of columns added before it). The slot is the column's identity for random
//! source derivation; removing a column never frees its slot.

use crate::error::ErrorCategory;
use crate::kinds::{ColumnKind, Locale, Params, REPETITIVE_KINDS};
use crate::table::ColumnRename;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::debug;

// ============================================================================
// Error Types
// ============================================================================

/// Error type for schema operations.
#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    /// Error reading schema file
    #[error("Failed to read schema file: {0}")]
    IoError(#[from] std::io::Error),

    /// Error parsing YAML
    #[error("Failed to parse YAML: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// Locale is not one of the supported locales
    #[error("Invalid locale: {0}. Choose one of pt_BR or en_US")]
    UnsupportedLocale(String),

    /// Kind is not available for the active locale
    #[error("Column {kind} is not available for locale {locale}")]
    UnsupportedColumnKind { kind: String, locale: Locale },

    /// Parameter has the wrong type
    #[error("Parameter '{param}' of column {kind} must be {expected}")]
    InvalidParameterType {
        kind: String,
        param: String,
        expected: String,
    },

    /// Parameter is outside its permitted range
    #[error("Parameter '{param}' of column {kind} is out of range: {value}")]
    InvalidParameterRange {
        kind: String,
        param: String,
        value: String,
    },

    /// Date bound is not a `YYYY-MM-DD` date
    #[error("Invalid date or format (expected YYYY-MM-DD): {0}")]
    InvalidDateFormat(String),

    /// Parameter is not understood by the column kind
    #[error("Column {kind} does not accept parameter '{param}'")]
    UnknownParameter { kind: String, param: String },

    /// Requested row count is not a positive integer
    #[error("Row count must be a positive integer, got {0}")]
    InvalidRowCount(usize),

    /// Non-repetitive kind declared twice
    #[error("Column {0} already added and does not support repetition")]
    DuplicateColumn(String),

    /// Column not found in schema
    #[error("Column '{0}' does not exist")]
    ColumnNotFound(String),

    /// Rename target collides with another column
    #[error("Cannot rename '{from}' to '{to}': name already exists")]
    InvalidRenameTarget { from: String, to: String },

    /// Full rename list has the wrong length
    #[error("New column list must have {expected} names, got {actual}")]
    RenameLengthMismatch { expected: usize, actual: usize },

    /// Two tables cannot be combined
    #[error("Cannot concatenate: {0}")]
    SchemaMismatch(String),
}

impl SchemaError {
    /// Category of this error.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::DuplicateColumn(_)
            | Self::ColumnNotFound(_)
            | Self::InvalidRenameTarget { .. }
            | Self::RenameLengthMismatch { .. }
            | Self::SchemaMismatch(_) => ErrorCategory::SchemaConsistency,
            _ => ErrorCategory::Validation,
        }
    }
}

// ============================================================================
// Column declarations
// ============================================================================

/// A registered column.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnSpec {
    /// Effective (unique) column name
    pub name: String,

    /// Kind with validated parameters
    pub kind: ColumnKind,

    /// Seed slot, the column's stable identity
    pub slot: u64,
}

/// One entry of a batch column declaration: a bare kind or a kind with
/// parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ColumnDecl {
    /// Kind token without parameters
    Bare(String),

    /// Kind token with parameters
    WithParams {
        /// Kind token
        kind: String,
        /// Raw parameters
        #[serde(default)]
        params: Params,
    },
}

impl ColumnDecl {
    /// Declaration with parameters.
    pub fn with_params(kind: impl Into<String>, params: Params) -> Self {
        Self::WithParams {
            kind: kind.into(),
            params,
        }
    }

    /// Kind token of this declaration.
    pub fn kind(&self) -> &str {
        match self {
            Self::Bare(kind) => kind,
            Self::WithParams { kind, .. } => kind,
        }
    }
}

impl From<&str> for ColumnDecl {
    fn from(kind: &str) -> Self {
        Self::Bare(kind.to_string())
    }
}

// ============================================================================
// Schema
// ============================================================================

/// Ordered list of column declarations for one locale.
#[derive(Debug, Clone)]
pub struct Schema {
    locale: Locale,
    columns: Vec<ColumnSpec>,
    /// Names as originally declared, in declaration order
    declared: Vec<String>,
    /// Number of columns ever added (next seed slot)
    added: u64,
}

impl Schema {
    /// Create an empty schema for `locale`.
    pub fn new(locale: Locale) -> Self {
        Self {
            locale,
            columns: Vec::new(),
            declared: Vec::new(),
            added: 0,
        }
    }

    /// Active locale.
    pub fn locale(&self) -> Locale {
        self.locale
    }

    /// Registered columns in current order.
    pub fn columns(&self) -> &[ColumnSpec] {
        &self.columns
    }

    /// Effective column names in current order.
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    /// Column names as originally declared, ignoring later removals and
    /// renames.
    pub fn declared_names(&self) -> &[String] {
        &self.declared
    }

    /// Get a column by effective name.
    pub fn get_column(&self, name: &str) -> Option<&ColumnSpec> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Number of registered columns.
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Whether no column is registered.
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Validate and register a column of kind `token`.
    ///
    /// Repetitive kinds that are already present get the smallest unused
    /// integer suffix starting at 2.
    pub fn add_column(&mut self, token: &str, params: &Params) -> Result<&ColumnSpec, SchemaError> {
        if !self.locale.supports(token) {
            return Err(SchemaError::UnsupportedColumnKind {
                kind: token.to_string(),
                locale: self.locale,
            });
        }

        let kind = ColumnKind::from_token(token, params)?;
        let name = self.effective_name(token)?;

        let slot = self.added;
        self.added += 1;

        debug!("Registered column '{}' ({}) in slot {}", name, token, slot);

        self.declared.push(name.clone());
        self.columns.push(ColumnSpec { name, kind, slot });
        let idx = self.columns.len() - 1;
        Ok(&self.columns[idx])
    }

    fn effective_name(&self, token: &str) -> Result<String, SchemaError> {
        if self.get_column(token).is_none() {
            return Ok(token.to_string());
        }
        if !REPETITIVE_KINDS.contains(&token) {
            return Err(SchemaError::DuplicateColumn(token.to_string()));
        }

        let mut suffix = 2u32;
        loop {
            let candidate = format!("{token}{suffix}");
            if self.get_column(&candidate).is_none() {
                return Ok(candidate);
            }
            suffix += 1;
        }
    }

    /// Register several columns in order.
    ///
    /// The batch is not atomic: when an entry fails, every entry before it
    /// stays registered.
    pub fn add_columns(&mut self, decls: &[ColumnDecl]) -> Result<(), SchemaError> {
        let empty = Params::new();
        for decl in decls {
            match decl {
                ColumnDecl::Bare(kind) => self.add_column(kind, &empty)?,
                ColumnDecl::WithParams { kind, params } => self.add_column(kind, params)?,
            };
        }
        Ok(())
    }

    /// Remove a column by effective name and return its declaration.
    pub fn remove_column(&mut self, name: &str) -> Result<ColumnSpec, SchemaError> {
        let idx = self
            .columns
            .iter()
            .position(|c| c.name == name)
            .ok_or_else(|| SchemaError::ColumnNotFound(name.to_string()))?;
        debug!("Removed column '{}'", name);
        Ok(self.columns.remove(idx))
    }

    /// Rename columns and return the `(old, new)` pairs that changed.
    pub fn rename_columns(
        &mut self,
        rename: &ColumnRename,
    ) -> Result<Vec<(String, String)>, SchemaError> {
        let current: Vec<String> = self.columns.iter().map(|c| c.name.clone()).collect();
        let renamed = rename.resolve(&current)?;

        let mut changed = Vec::new();
        for (column, new_name) in self.columns.iter_mut().zip(renamed) {
            if column.name != new_name {
                changed.push((std::mem::replace(&mut column.name, new_name.clone()), new_name));
            }
        }
        debug!("Renamed {} column(s)", changed.len());
        Ok(changed)
    }

    /// Move the ordinal column to the front, followed by the name column.
    ///
    /// Stable and idempotent: the relative order of all other columns is
    /// preserved, and calling it again changes nothing.
    pub fn prioritize(&mut self) {
        fn rank(kind: &ColumnKind) -> u8 {
            match kind {
                ColumnKind::Id => 0,
                ColumnKind::Name => 1,
                _ => 2,
            }
        }
        self.columns.sort_by_key(|c| rank(&c.kind));
    }
}

// ============================================================================
// Schema file
// ============================================================================

fn default_seed() -> u64 {
    20
}

fn default_rows() -> usize {
    10
}

/// Declarative schema loaded from YAML.
///
/// ```yaml
/// locale: en_US
/// seed: 42
/// rows: 100
/// columns:
///   - id
///   - name
///   - kind: price
///     params: { min: 10, max: 20 }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchemaFile {
    /// Locale of every generated value
    pub locale: Locale,

    /// Base seed
    #[serde(default = "default_seed")]
    pub seed: u64,

    /// Number of rows to generate
    #[serde(default = "default_rows")]
    pub rows: usize,

    /// Pins "today" for default date ranges
    #[serde(default)]
    pub reference_date: Option<NaiveDate>,

    /// Column declarations, in order
    pub columns: Vec<ColumnDecl>,
}

impl SchemaFile {
    /// Load schema from a YAML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, SchemaError> {
        let content = fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse schema from YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self, SchemaError> {
        Ok(serde_yaml::from_str(yaml)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kinds::Bounds;
    use serde_json::json;
    use std::collections::BTreeMap;

    fn params(value: serde_json::Value) -> Params {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_repetitive_kind_gets_suffix() {
        let mut schema = Schema::new(Locale::PtBr);
        schema.add_column("price", &Params::new()).unwrap();
        schema.add_column("price", &Params::new()).unwrap();
        schema.add_column("price", &Params::new()).unwrap();
        assert_eq!(schema.column_names(), vec!["price", "price2", "price3"]);
    }

    #[test]
    fn test_suffix_reuses_smallest_free_number() {
        let mut schema = Schema::new(Locale::PtBr);
        for _ in 0..3 {
            schema.add_column("date", &Params::new()).unwrap();
        }
        schema.remove_column("date2").unwrap();
        let spec = schema.add_column("date", &Params::new()).unwrap();
        assert_eq!(spec.name, "date2");
        // slot is never reclaimed
        assert_eq!(spec.slot, 3);
    }

    #[test]
    fn test_duplicate_non_repetitive_fails() {
        let mut schema = Schema::new(Locale::EnUs);
        schema.add_column("name", &Params::new()).unwrap();
        let err = schema.add_column("name", &Params::new()).unwrap_err();
        assert!(matches!(err, SchemaError::DuplicateColumn(ref n) if n == "name"));
        assert_eq!(err.category(), ErrorCategory::SchemaConsistency);
    }

    #[test]
    fn test_locale_restricts_kinds() {
        let mut schema = Schema::new(Locale::EnUs);
        let err = schema.add_column("cpf", &Params::new()).unwrap_err();
        assert!(matches!(err, SchemaError::UnsupportedColumnKind { .. }));
        assert_eq!(err.category(), ErrorCategory::Validation);
        assert!(schema.is_empty());
    }

    #[test]
    fn test_slots_are_monotonic() {
        let mut schema = Schema::new(Locale::EnUs);
        schema.add_column("id", &Params::new()).unwrap();
        schema.add_column("job", &Params::new()).unwrap();
        schema.remove_column("id").unwrap();
        let spec = schema.add_column("email", &Params::new()).unwrap();
        assert_eq!(spec.slot, 2);
    }

    #[test]
    fn test_add_columns_is_not_atomic() {
        let mut schema = Schema::new(Locale::PtBr);
        let decls = vec![
            ColumnDecl::from("id"),
            ColumnDecl::with_params("age", params(json!({"min": 20, "max": 30}))),
            ColumnDecl::from("ssn"),
            ColumnDecl::from("job"),
        ];

        let err = schema.add_columns(&decls).unwrap_err();
        assert!(matches!(err, SchemaError::UnsupportedColumnKind { .. }));
        // entries before the failing one stay registered, later ones are skipped
        assert_eq!(schema.column_names(), vec!["id", "age"]);
        assert_eq!(
            schema.get_column("age").unwrap().kind,
            ColumnKind::Age(Bounds::new(Some(20), Some(30)))
        );
    }

    #[test]
    fn test_remove_unknown_column() {
        let mut schema = Schema::new(Locale::PtBr);
        let err = schema.remove_column("nope").unwrap_err();
        assert!(matches!(err, SchemaError::ColumnNotFound(_)));
    }

    #[test]
    fn test_rename_keeps_kind_and_slot() {
        let mut schema = Schema::new(Locale::EnUs);
        schema.add_column("name", &Params::new()).unwrap();
        schema.add_column("job", &Params::new()).unwrap();

        let mut mapping = BTreeMap::new();
        mapping.insert("name".to_string(), "full_name".to_string());
        let changed = schema
            .rename_columns(&ColumnRename::Partial(mapping))
            .unwrap();

        assert_eq!(
            changed,
            vec![("name".to_string(), "full_name".to_string())]
        );
        let spec = schema.get_column("full_name").unwrap();
        assert_eq!(spec.kind, ColumnKind::Name);
        assert_eq!(spec.slot, 0);
        // declared names are untouched by renames
        assert_eq!(schema.declared_names(), &["name", "job"]);
    }

    #[test]
    fn test_prioritize_is_idempotent() {
        let mut schema = Schema::new(Locale::EnUs);
        schema
            .add_columns(&[
                ColumnDecl::from("job"),
                ColumnDecl::from("name"),
                ColumnDecl::from("email"),
                ColumnDecl::from("id"),
            ])
            .unwrap();

        schema.prioritize();
        assert_eq!(schema.column_names(), vec!["id", "name", "job", "email"]);
        schema.prioritize();
        assert_eq!(schema.column_names(), vec!["id", "name", "job", "email"]);
    }

    #[test]
    fn test_schema_file_from_yaml() {
        let yaml = r#"
locale: pt_BR
seed: 7
reference_date: 2024-06-01
columns:
  - id
  - name
  - kind: price
    params:
      min: 10
      max: 99.5
  - kind: boolean
    params: { true_chance: 70 }
"#;
        let file = SchemaFile::from_yaml(yaml).unwrap();
        assert_eq!(file.locale, Locale::PtBr);
        assert_eq!(file.seed, 7);
        assert_eq!(file.rows, 10);
        assert_eq!(file.reference_date, NaiveDate::from_ymd_opt(2024, 6, 1));
        assert_eq!(file.columns.len(), 4);
        assert_eq!(file.columns[0], ColumnDecl::from("id"));
        assert_eq!(file.columns[2].kind(), "price");

        let mut schema = Schema::new(file.locale);
        schema.add_columns(&file.columns).unwrap();
        assert_eq!(
            schema.get_column("price").unwrap().kind,
            ColumnKind::Price(Bounds::new(Some(10.0), Some(99.5)))
        );
    }

    #[test]
    fn test_schema_file_rejects_unknown_locale() {
        let yaml = "locale: fr_FR\ncolumns: [id]\n";
        assert!(matches!(
            SchemaFile::from_yaml(yaml),
            Err(SchemaError::YamlError(_))
        ));
    }

    #[test]
    fn test_schema_file_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("schema.yaml");
        fs::write(&path, "locale: en_US\nrows: 3\ncolumns: [id, ssn]\n").unwrap();

        let file = SchemaFile::from_file(&path).unwrap();
        assert_eq!(file.rows, 3);
        assert_eq!(file.seed, 20);
    }
}
