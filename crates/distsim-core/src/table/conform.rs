//! Schema conformance.
//!
//! `enforce` reshapes a generator's output into the exact column set, order
//! and types of its `SchemaSpec`. Missing columns are synthesized, mismatched
//! ones coerced value by value, extra ones dropped. Coercion failures are
//! recoverable: the column is kept as produced and a warning is logged.

use chrono::NaiveDate;
use indexmap::IndexMap;
use tracing::{debug, warn};

use super::schema::{SchemaSpec, SemanticType};
use super::value::Value;
use super::{Column, Table};

/// Per-column fill values that override the type defaults.
pub type Defaults = IndexMap<String, Value>;

/// Conform `table` to `spec`. Idempotent.
pub fn enforce(table: Table, spec: &SchemaSpec, defaults: &Defaults) -> Table {
    if table.conforms_to(spec) {
        return table;
    }

    let name = table.name().to_string();
    let rows = table.num_rows();
    let mut columns = table.into_columns();

    for extra in columns.keys().filter(|k| spec.get(k.as_str()).is_none()) {
        debug!(table = %name, column = %extra, "dropping column absent from schema");
    }

    let mut out: IndexMap<String, Column> = IndexMap::with_capacity(spec.len());
    for (col_name, target) in spec.iter() {
        let column = match columns.swap_remove(col_name) {
            Some(column) if column.dtype == target => column,
            Some(column) => coerce_column(&name, col_name, column, target),
            None => {
                warn!(table = %name, column = %col_name, "column missing from generator output, filling default");
                let fill = defaults
                    .get(col_name)
                    .cloned()
                    .unwrap_or_else(|| target.default_value());
                Column {
                    dtype: target,
                    values: vec![fill; rows],
                }
            }
        };
        out.insert(col_name.to_string(), column);
    }

    Table {
        name,
        columns: out,
        rows,
    }
}

fn coerce_column(table: &str, name: &str, column: Column, target: SemanticType) -> Column {
    let mut converted = Vec::with_capacity(column.values.len());
    for value in &column.values {
        match coerce_value(value, target) {
            Some(v) => converted.push(v),
            None => {
                warn!(
                    table = %table,
                    column = %name,
                    from = %column.dtype,
                    to = %target,
                    value = %value,
                    "could not coerce column, leaving it unchanged"
                );
                return column;
            }
        }
    }
    Column {
        dtype: target,
        values: converted,
    }
}

/// Convert one cell to `target`. `None` means the value cannot be
/// represented. Nulls always survive.
pub fn coerce_value(value: &Value, target: SemanticType) -> Option<Value> {
    if value.is_null() {
        return Some(Value::Null);
    }
    match target {
        SemanticType::Text | SemanticType::Categorical => Some(match value {
            Value::Text(s) => Value::Text(s.clone()),
            other => Value::owned(other.to_string()),
        }),
        t if t.is_integer() => {
            let (lo, hi) = t.int_range()?;
            let n = match value {
                Value::Int(i) => *i,
                Value::Float(f) if f.is_finite() => f.trunc() as i64,
                Value::Bool(b) => *b as i64,
                Value::Text(s) => s.trim().parse::<i64>().ok()?,
                _ => return None,
            };
            (lo..=hi).contains(&n).then_some(Value::Int(n))
        }
        SemanticType::Float32 => {
            let f = to_float(value)?;
            Some(Value::Float(f as f32 as f64))
        }
        SemanticType::Float64 => to_float(value).map(Value::Float),
        SemanticType::Date => match value {
            Value::Date(d) => Some(Value::Date(*d)),
            Value::Text(s) => NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
                .ok()
                .map(Value::Date),
            _ => None,
        },
        SemanticType::Boolean => match value {
            Value::Bool(b) => Some(Value::Bool(*b)),
            Value::Int(0) => Some(Value::Bool(false)),
            Value::Int(1) => Some(Value::Bool(true)),
            Value::Text(s) => match s.trim().to_ascii_lowercase().as_str() {
                "true" => Some(Value::Bool(true)),
                "false" => Some(Value::Bool(false)),
                _ => None,
            },
            _ => None,
        },
        _ => None,
    }
}

fn to_float(value: &Value) -> Option<f64> {
    match value {
        Value::Float(f) => Some(*f),
        Value::Int(i) => Some(*i as f64),
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        Value::Text(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}
