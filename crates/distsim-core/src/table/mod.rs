//! # Dimension Tables
//!
//! Generators build loosely-typed rows (`Row`, an ordered column → value
//! map). `Table::from_rows` turns them into columnar storage with one
//! `SemanticType` per column, inferred from the first non-null value. The
//! conformance pass in [`conform`] then coerces each column to the type its
//! `SchemaSpec` declares.
//!
//! Downstream generators read their inputs through [`RowRef`], whose typed
//! accessors fail with `MissingColumn` / `ColumnType` instead of panicking.

pub mod conform;
pub mod schema;
pub mod value;

use indexmap::IndexMap;

use self::schema::{SchemaSpec, SemanticType};
use self::value::Value;
use crate::error::{DistSimError, Result};

/// One loosely-typed row as produced by a generator.
pub type Row = IndexMap<&'static str, Value>;

/// A typed column.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub dtype: SemanticType,
    pub values: Vec<Value>,
}

/// An immutable, named, columnar table.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    name: String,
    columns: IndexMap<String, Column>,
    rows: usize,
}

impl Table {
    /// Empty table with no columns.
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            columns: IndexMap::new(),
            rows: 0,
        }
    }

    /// Build a table from generator rows.
    ///
    /// Columns appear in first-seen order. A row that lacks a column gets a
    /// null in it. Columns that are null throughout default to text.
    pub fn from_rows(name: &str, rows: Vec<Row>) -> Self {
        let mut order: IndexMap<&'static str, Option<SemanticType>> = IndexMap::new();
        for row in &rows {
            for (col, value) in row {
                let slot = order.entry(*col).or_insert(None);
                if slot.is_none() {
                    *slot = value.natural_type();
                }
            }
        }

        let row_count = rows.len();
        let mut columns: IndexMap<String, Column> = order
            .iter()
            .map(|(col, dtype)| {
                (
                    col.to_string(),
                    Column {
                        dtype: dtype.unwrap_or(SemanticType::Text),
                        values: Vec::with_capacity(row_count),
                    },
                )
            })
            .collect();

        for mut row in rows {
            for (col, column) in columns.iter_mut() {
                let value = row.swap_remove(col.as_str()).unwrap_or(Value::Null);
                column.values.push(value);
            }
        }

        Self {
            name: name.to_string(),
            columns,
            rows: row_count,
        }
    }

    /// Assemble a table from already-typed columns. All columns must have
    /// the same length.
    pub fn from_columns(name: &str, columns: IndexMap<String, Column>) -> Result<Self> {
        let rows = columns.values().next().map(|c| c.values.len()).unwrap_or(0);
        if let Some((col, _)) = columns.iter().find(|(_, c)| c.values.len() != rows) {
            return Err(DistSimError::Other(format!(
                "column {}.{} has a different length than the rest of the table",
                name, col
            )));
        }
        Ok(Self {
            name: name.to_string(),
            columns,
            rows,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn num_rows(&self) -> usize {
        self.rows
    }

    pub fn num_columns(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows == 0
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.keys().map(|k| k.as_str()).collect()
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.get(name)
    }

    pub fn columns(&self) -> impl Iterator<Item = (&str, &Column)> {
        self.columns.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub(crate) fn into_columns(self) -> IndexMap<String, Column> {
        self.columns
    }

    pub fn dtype(&self, name: &str) -> Option<SemanticType> {
        self.columns.get(name).map(|c| c.dtype)
    }

    /// True iff the table has exactly the schema's columns, in order, with the
    /// declared types.
    pub fn conforms_to(&self, spec: &SchemaSpec) -> bool {
        self.columns.len() == spec.len()
            && self
                .columns
                .iter()
                .zip(spec.iter())
                .all(|((name, col), (spec_name, spec_ty))| {
                    name == spec_name && col.dtype == spec_ty
                })
    }

    pub fn row(&self, index: usize) -> Option<RowRef<'_>> {
        (index < self.rows).then_some(RowRef { table: self, index })
    }

    pub fn rows(&self) -> impl Iterator<Item = RowRef<'_>> {
        (0..self.rows).map(move |index| RowRef { table: self, index })
    }

    /// Fail unless every named column exists.
    pub fn require_columns(&self, names: &[&str]) -> Result<()> {
        for name in names {
            if !self.columns.contains_key(*name) {
                return Err(self.missing(name));
            }
        }
        Ok(())
    }

    fn missing(&self, column: &str) -> DistSimError {
        DistSimError::MissingColumn {
            table: self.name.clone(),
            column: column.to_string(),
        }
    }
}

/// Borrowed view of one table row with typed accessors.
#[derive(Clone, Copy)]
pub struct RowRef<'a> {
    table: &'a Table,
    index: usize,
}

impl<'a> RowRef<'a> {
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn get(&self, column: &str) -> Result<&'a Value> {
        self.table
            .columns
            .get(column)
            .map(|c| &c.values[self.index])
            .ok_or_else(|| self.table.missing(column))
    }

    pub fn str(&self, column: &str) -> Result<&'a str> {
        let value = self.get(column)?;
        value.as_str().ok_or_else(|| self.type_error(column, "text", value))
    }

    /// Text value, or `None` for a null cell.
    pub fn opt_str(&self, column: &str) -> Result<Option<&'a str>> {
        match self.get(column)? {
            Value::Null => Ok(None),
            value => value
                .as_str()
                .map(Some)
                .ok_or_else(|| self.type_error(column, "text", value)),
        }
    }

    pub fn int(&self, column: &str) -> Result<i64> {
        let value = self.get(column)?;
        value.as_int().ok_or_else(|| self.type_error(column, "int", value))
    }

    /// Integer value, or `None` for a null cell.
    pub fn opt_int(&self, column: &str) -> Result<Option<i64>> {
        match self.get(column)? {
            Value::Null => Ok(None),
            value => value
                .as_int()
                .map(Some)
                .ok_or_else(|| self.type_error(column, "int", value)),
        }
    }

    pub fn float(&self, column: &str) -> Result<f64> {
        let value = self.get(column)?;
        value.as_float().ok_or_else(|| self.type_error(column, "float", value))
    }

    pub fn bool(&self, column: &str) -> Result<bool> {
        let value = self.get(column)?;
        value.as_bool().ok_or_else(|| self.type_error(column, "bool", value))
    }

    pub fn date(&self, column: &str) -> Result<chrono::NaiveDate> {
        let value = self.get(column)?;
        value.as_date().ok_or_else(|| self.type_error(column, "date", value))
    }

    fn type_error(&self, column: &str, expected: &str, found: &Value) -> DistSimError {
        DistSimError::ColumnType {
            table: self.table.name.clone(),
            column: column.to_string(),
            expected: expected.to_string(),
            found: found.kind().to_string(),
        }
    }
}

/// Build a `Row` from `column => value` pairs.
#[macro_export]
macro_rules! row {
    ($($col:expr => $val:expr),* $(,)?) => {{
        let mut row = $crate::table::Row::new();
        $( row.insert($col, $crate::table::value::Value::from($val)); )*
        row
    }};
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::row;

    fn sample() -> Table {
        Table::from_rows(
            "DimTest",
            vec![
                row! { "id" => "A-1", "qty" => 3i64, "price" => 1.5 },
                row! { "id" => "A-2", "qty" => Value::Null, "price" => 2.5, "note" => "x" },
            ],
        )
    }

    #[test]
    fn test_from_rows_infers_types_and_fills_nulls() {
        let t = sample();
        assert_eq!(t.num_rows(), 2);
        assert_eq!(t.column_names(), vec!["id", "qty", "price", "note"]);
        assert_eq!(t.dtype("qty"), Some(SemanticType::Int64));
        assert_eq!(t.dtype("price"), Some(SemanticType::Float64));
        assert_eq!(t.column("note").unwrap().values[0], Value::Null);
    }

    #[test]
    fn test_all_null_column_defaults_to_text() {
        let t = Table::from_rows("T", vec![row! { "manager" => Value::Null }]);
        assert_eq!(t.dtype("manager"), Some(SemanticType::Text));
    }

    #[test]
    fn test_typed_accessors() {
        let t = sample();
        let r = t.row(0).unwrap();
        assert_eq!(r.str("id").unwrap(), "A-1");
        assert_eq!(r.int("qty").unwrap(), 3);
        assert_eq!(r.float("qty").unwrap(), 3.0);
        assert!(t.row(1).unwrap().opt_int("qty").unwrap().is_none());
        assert!(t.row(2).is_none());
    }

    #[test]
    fn test_accessor_errors_name_table_and_column() {
        let t = sample();
        let r = t.row(0).unwrap();
        let err = r.str("missing").unwrap_err().to_string();
        assert!(err.contains("DimTest.missing"));
        let err = r.bool("id").unwrap_err().to_string();
        assert!(err.contains("expected bool"));
    }

    #[test]
    fn test_from_columns_rejects_ragged() {
        let mut cols = IndexMap::new();
        cols.insert(
            "a".to_string(),
            Column { dtype: SemanticType::Int64, values: vec![Value::Int(1)] },
        );
        cols.insert("b".to_string(), Column { dtype: SemanticType::Int64, values: vec![] });
        assert!(Table::from_columns("T", cols).is_err());
    }
}
