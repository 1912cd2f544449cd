//! Row generator resolving a column schema into a table.

use crate::generators::date::generate_date;
use crate::generators::email::synthesize_email;
use crate::generators::numeric::{generate_float, generate_int};
use crate::provider::{CatalogProvider, FieldProvider};
use chrono::{NaiveDate, Utc};
use factory_core::{
    ColumnDecl, ColumnKind, ColumnRename, ColumnSpec, ErrorCategory, Locale, Params, Row, Schema,
    SchemaError, SchemaFile, Table, Value, REPETITIVE_KINDS,
};
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info};

/// Error type for generator operations.
#[derive(Debug, thiserror::Error)]
pub enum GeneratorError {
    /// Schema error
    #[error("Schema error: {0}")]
    SchemaError(#[from] SchemaError),

    /// The provider has no primitive for a column kind
    #[error("Field provider for {locale} has no primitive '{primitive}'")]
    UnknownFieldPrimitive { primitive: String, locale: Locale },
}

impl GeneratorError {
    /// Category of this error.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::SchemaError(e) => e.category(),
            Self::UnknownFieldPrimitive { .. } => ErrorCategory::Validation,
        }
    }
}

/// Schema-driven generator of reproducible synthetic tables.
///
/// Each column added gets its own provider seeded with `base_seed + slot`,
/// where `slot` counts the columns added before it. A separate context
/// provider seeded with `base_seed` draws every age, price and date value.
pub struct DataFactory<P: FieldProvider = CatalogProvider> {
    /// Column declarations
    schema: Schema,
    /// Generated rows
    table: Table,
    /// Base seed
    base_seed: u64,
    /// Locale-wide provider
    context: P,
    /// Per-column providers, keyed by seed slot
    sources: HashMap<u64, P>,
    /// End of the default date window
    reference_date: NaiveDate,
}

impl<P: FieldProvider> DataFactory<P> {
    /// Create an empty factory for `locale` with base seed `seed`.
    pub fn new(locale: Locale, seed: u64) -> Self {
        Self {
            schema: Schema::new(locale),
            table: Table::default(),
            base_seed: seed,
            context: P::seeded(locale, seed),
            sources: HashMap::new(),
            reference_date: Utc::now().date_naive(),
        }
    }

    /// Create a factory from a schema file and register its columns.
    pub fn from_schema_file(file: &SchemaFile) -> Result<Self, GeneratorError> {
        let mut factory = Self::new(file.locale, file.seed);
        if let Some(date) = file.reference_date {
            factory = factory.with_reference_date(date);
        }
        factory.add_columns(&file.columns)?;
        Ok(factory)
    }

    /// Pin the end of the default date window.
    pub fn with_reference_date(mut self, date: NaiveDate) -> Self {
        self.reference_date = date;
        self
    }

    /// Active locale.
    pub fn locale(&self) -> Locale {
        self.schema.locale()
    }

    /// Base seed.
    pub fn seed(&self) -> u64 {
        self.base_seed
    }

    /// End of the default date window.
    pub fn reference_date(&self) -> NaiveDate {
        self.reference_date
    }

    /// Column declarations.
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Generated table.
    pub fn table(&self) -> &Table {
        &self.table
    }

    /// Current column names.
    pub fn columns(&self) -> &[String] {
        self.table.columns()
    }

    /// Generated rows.
    pub fn rows(&self) -> &[Arc<Row>] {
        self.table.rows()
    }

    // ===== Schema mutation =====

    /// Add one column and return its effective name.
    ///
    /// Rows generated before the column existed get a null value for it.
    pub fn add_column(&mut self, kind: &str, params: &Params) -> Result<String, GeneratorError> {
        let spec = self.schema.add_column(kind, params)?;
        let (name, slot) = (spec.name.clone(), spec.slot);

        let seed = self.base_seed.wrapping_add(slot);
        self.sources.insert(slot, P::seeded(self.locale(), seed));
        self.table.fill_key(&name, &Value::Null);
        self.sync_columns();
        Ok(name)
    }

    /// Add several columns in order.
    ///
    /// Not atomic: columns before a failing entry stay registered.
    pub fn add_columns(&mut self, decls: &[ColumnDecl]) -> Result<(), GeneratorError> {
        let empty = Params::new();
        for decl in decls {
            match decl {
                ColumnDecl::Bare(kind) => self.add_column(kind, &empty)?,
                ColumnDecl::WithParams { kind, params } => self.add_column(kind, params)?,
            };
        }
        Ok(())
    }

    /// Remove a column and strip it from every generated row.
    pub fn remove_column(&mut self, name: &str) -> Result<(), GeneratorError> {
        let spec = self.schema.remove_column(name)?;
        self.sources.remove(&spec.slot);
        self.table.strip_key(name);
        self.sync_columns();
        Ok(())
    }

    /// Rename columns and rewrite every generated row.
    pub fn rename_columns(&mut self, rename: &ColumnRename) -> Result<(), GeneratorError> {
        let changed = self.schema.rename_columns(rename)?;
        self.table.rename_keys(&changed);
        self.sync_columns();
        Ok(())
    }

    fn sync_columns(&mut self) {
        let names = self
            .schema
            .column_names()
            .into_iter()
            .map(String::from)
            .collect();
        self.table.set_columns(names);
    }

    // ===== Generation =====

    /// Generate and append a single row.
    pub fn generate_row(&mut self) -> Result<Arc<Row>, GeneratorError> {
        self.schema.prioritize();
        self.sync_columns();

        let row = Arc::new(self.resolve_row(self.table.len())?);
        self.table.push_shared(Arc::clone(&row));
        Ok(row)
    }

    /// Generate `row_count` rows, optionally discarding earlier ones first.
    ///
    /// The ordinal and name columns are moved to the front before generating.
    /// Existing rows are only cleared, and new rows only appended, once all
    /// of them were resolved; on error the table is left as it was.
    pub fn generate_table(
        &mut self,
        row_count: usize,
        clear_existing: bool,
    ) -> Result<&Table, GeneratorError> {
        if row_count == 0 {
            return Err(SchemaError::InvalidRowCount(row_count).into());
        }

        let start = Instant::now();
        self.schema.prioritize();
        self.sync_columns();

        let first_ordinal = if clear_existing { 0 } else { self.table.len() };
        let mut rows = Vec::with_capacity(row_count);
        for offset in 0..row_count {
            rows.push(self.resolve_row(first_ordinal + offset)?);
        }

        if clear_existing {
            self.table.clear_rows();
        }
        for row in rows {
            self.table.push(row);
        }

        info!(
            "Generated {} rows with {} columns in {:?}",
            row_count,
            self.schema.len(),
            start.elapsed()
        );
        Ok(&self.table)
    }

    fn resolve_row(&mut self, ordinal: usize) -> Result<Row, GeneratorError> {
        let locale = self.schema.locale();
        let mut row = Row::with_capacity(self.schema.len());
        let mut name: Option<String> = None;

        for spec in self.schema.columns() {
            let value = match &spec.kind {
                ColumnKind::Id => Value::Int(ordinal as i64),
                ColumnKind::Age(bounds) => generate_int(&mut self.context, bounds),
                ColumnKind::Price(bounds) => generate_float(&mut self.context, bounds),
                ColumnKind::Date(bounds) => {
                    generate_date(&mut self.context, bounds, self.reference_date)
                }
                _ => {
                    let seed = self.base_seed.wrapping_add(spec.slot);
                    let source = self
                        .sources
                        .entry(spec.slot)
                        .or_insert_with(|| P::seeded(locale, seed));
                    resolve_from_source(spec, source, name.as_deref())?
                }
            };

            if spec.kind == ColumnKind::Name {
                if let Value::Text(text) = &value {
                    name = Some(text.clone());
                }
            }
            row.insert(spec.name.clone(), value);
        }

        debug!("Resolved row {}", ordinal);
        Ok(row)
    }

    // ===== Table operations =====

    /// Append the rows of another factory.
    ///
    /// Both factories must share the declared column sequence and the current
    /// column list.
    pub fn concatenate(&mut self, other: &DataFactory<P>) -> Result<(), GeneratorError> {
        if self.schema.declared_names() != other.schema.declared_names() {
            return Err(SchemaError::SchemaMismatch(
                "declared column schemas do not match".to_string(),
            )
            .into());
        }
        if self.columns() != other.columns() {
            return Err(SchemaError::SchemaMismatch(
                "current column names or order do not match".to_string(),
            )
            .into());
        }

        self.table.extend_from(&other.table);
        debug!("Concatenated {} rows", other.table.len());
        Ok(())
    }

    /// Textual summary of the locale, table size and columns.
    pub fn info(&self) -> String {
        Summary(self).to_string()
    }
}

/// Display adapter behind [`DataFactory::info`].
struct Summary<'a, P: FieldProvider>(&'a DataFactory<P>);

impl<P: FieldProvider> fmt::Display for Summary<'_, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let factory = self.0;
        writeln!(f, "DataFactory Summary")?;
        writeln!(f, "{}", "-".repeat(40))?;
        writeln!(f, "Locale: {}", factory.locale())?;
        writeln!(f, "Base seed: {}", factory.base_seed)?;
        writeln!(f, "Number of rows: {}", factory.table.len())?;
        writeln!(f, "Number of columns: {}", factory.schema.len())?;

        writeln!(f, "\nColumns:")?;
        if factory.schema.is_empty() {
            writeln!(f, "  (No columns added yet)")?;
        }
        for spec in factory.schema.columns() {
            let params = spec.kind.describe_params();
            if params.is_empty() {
                writeln!(f, "  - {}", spec.name)?;
            } else {
                writeln!(f, "  - {} ({})", spec.name, params)?;
            }
        }

        writeln!(f, "\nRepetitive kinds: {}", REPETITIVE_KINDS.join(", "))?;
        write!(
            f,
            "Available kinds: {}",
            factory.locale().allowed_kinds().join(", ")
        )
    }
}

/// Resolve a column drawing from its own provider.
fn resolve_from_source<P: FieldProvider>(
    spec: &ColumnSpec,
    source: &mut P,
    name: Option<&str>,
) -> Result<Value, GeneratorError> {
    let primitive = match &spec.kind {
        ColumnKind::Email => {
            let email = match name {
                Some(name) => synthesize_email(name, source),
                None => source.email(),
            };
            return Ok(Value::Text(email));
        }
        ColumnKind::Boolean { true_chance } => {
            return Ok(Value::Int(i64::from(source.boolean(*true_chance))));
        }
        ColumnKind::Name => "name",
        ColumnKind::PhoneNumber => match source.locale() {
            Locale::PtBr => "cellphone_number",
            Locale::EnUs => "phone_number",
        },
        ColumnKind::Primitive(token) => token.as_str(),
        other => other.token(),
    };

    source
        .generate(primitive)
        .ok_or_else(|| GeneratorError::UnknownFieldPrimitive {
            primitive: primitive.to_string(),
            locale: source.locale(),
        })
}

impl<P: FieldProvider> PartialEq for DataFactory<P> {
    /// Factories are equal when they declared the same set of column names.
    fn eq(&self, other: &Self) -> bool {
        let mine: HashSet<&String> = self.schema.declared_names().iter().collect();
        let theirs: HashSet<&String> = other.schema.declared_names().iter().collect();
        mine == theirs
    }
}
