//! Materialized tables.

use crate::schema::SchemaError;
use crate::values::{Row, Value};
use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;

/// Column renaming request.
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnRename {
    /// New names for every column, in current column order
    Full(Vec<String>),
    /// Old name -> new name for a subset of columns
    Partial(BTreeMap<String, String>),
}

impl ColumnRename {
    /// Compute the renamed column list for `columns`.
    ///
    /// A target may not collide with a retained column at a different
    /// position, and two columns may not end up with the same name.
    pub fn resolve(&self, columns: &[String]) -> Result<Vec<String>, SchemaError> {
        let renamed: Vec<String> = match self {
            Self::Full(names) => {
                if names.len() != columns.len() {
                    return Err(SchemaError::RenameLengthMismatch {
                        expected: columns.len(),
                        actual: names.len(),
                    });
                }
                for (new, old) in names.iter().zip(columns) {
                    if new != old && columns.contains(new) {
                        return Err(SchemaError::InvalidRenameTarget {
                            from: old.clone(),
                            to: new.clone(),
                        });
                    }
                }
                names.clone()
            }
            Self::Partial(mapping) => {
                if let Some(missing) = mapping.keys().find(|old| !columns.contains(old)) {
                    return Err(SchemaError::ColumnNotFound(missing.clone()));
                }
                for (old, new) in mapping {
                    if new != old && columns.contains(new) {
                        return Err(SchemaError::InvalidRenameTarget {
                            from: old.clone(),
                            to: new.clone(),
                        });
                    }
                }
                columns
                    .iter()
                    .map(|c| mapping.get(c).unwrap_or(c).clone())
                    .collect()
            }
        };

        let mut seen = HashSet::new();
        for (new, old) in renamed.iter().zip(columns) {
            if !seen.insert(new) {
                return Err(SchemaError::InvalidRenameTarget {
                    from: old.clone(),
                    to: new.clone(),
                });
            }
        }
        Ok(renamed)
    }
}

/// Generated rows plus their ordered column list.
///
/// Rows are shared (`Arc`) so that samples reference the same row records
/// as their source table instead of copying them. Mutating a shared row
/// through this table copies it first, leaving other holders untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Arc<Row>>,
}

impl Table {
    /// Create a table from columns and shared rows.
    pub fn new(columns: Vec<String>, rows: Vec<Arc<Row>>) -> Self {
        Self { columns, rows }
    }

    /// Create a table from owned rows.
    pub fn from_rows(columns: Vec<String>, rows: Vec<Row>) -> Self {
        Self::new(columns, rows.into_iter().map(Arc::new).collect())
    }

    /// Column names in order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Rows in order.
    pub fn rows(&self) -> &[Arc<Row>] {
        &self.rows
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Whether `name` is a column of this table.
    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c == name)
    }

    /// Value of `column` in row `index`.
    pub fn value(&self, index: usize, column: &str) -> Option<&Value> {
        self.rows.get(index).and_then(|row| row.get(column))
    }

    /// Append a row.
    pub fn push(&mut self, row: Row) {
        self.rows.push(Arc::new(row));
    }

    /// Append an already shared row.
    pub fn push_shared(&mut self, row: Arc<Row>) {
        self.rows.push(row);
    }

    /// Drop every row, keeping the columns.
    pub fn clear_rows(&mut self) {
        self.rows.clear();
    }

    /// Replace the column list without touching rows.
    pub fn set_columns(&mut self, columns: Vec<String>) {
        self.columns = columns;
    }

    /// Append the rows of `other`, sharing them.
    pub fn extend_from(&mut self, other: &Table) {
        self.rows.extend(other.rows.iter().cloned());
    }

    /// Remove `name` from the column list and from every row.
    pub fn remove_column(&mut self, name: &str) -> Result<(), SchemaError> {
        let idx = self
            .columns
            .iter()
            .position(|c| c == name)
            .ok_or_else(|| SchemaError::ColumnNotFound(name.to_string()))?;
        self.columns.remove(idx);
        self.strip_key(name);
        Ok(())
    }

    /// Set `name` to `value` in every row that lacks it.
    pub fn fill_key(&mut self, name: &str, value: &Value) {
        for row in &mut self.rows {
            if !row.contains_key(name) {
                Arc::make_mut(row).insert(name.to_string(), value.clone());
            }
        }
    }

    /// Remove `name` from every row only.
    pub fn strip_key(&mut self, name: &str) {
        for row in &mut self.rows {
            if row.contains_key(name) {
                Arc::make_mut(row).remove(name);
            }
        }
    }

    /// Rename columns and rewrite every row's keys.
    pub fn rename_columns(&mut self, rename: &ColumnRename) -> Result<(), SchemaError> {
        let renamed = rename.resolve(&self.columns)?;
        let pairs: Vec<(String, String)> = self
            .columns
            .iter()
            .cloned()
            .zip(renamed.iter().cloned())
            .filter(|(old, new)| old != new)
            .collect();
        self.rename_keys(&pairs);
        self.columns = renamed;
        Ok(())
    }

    /// Rewrite row keys for already validated `(old, new)` pairs.
    ///
    /// All old keys are detached before any new key is inserted.
    pub fn rename_keys(&mut self, pairs: &[(String, String)]) {
        if pairs.is_empty() {
            return;
        }
        for row in &mut self.rows {
            let row = Arc::make_mut(row);
            let detached: Vec<(String, Option<Value>)> = pairs
                .iter()
                .map(|(old, new)| (new.clone(), row.remove(old)))
                .collect();
            for (new, value) in detached {
                if let Some(value) = value {
                    row.insert(new, value);
                }
            }
        }
    }
}
