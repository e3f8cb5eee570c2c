use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::table::value::Value;

/// Physical type of a dimension column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SemanticType {
    Text,
    Categorical,
    Int8,
    Int16,
    Int32,
    Int64,
    Float32,
    Float64,
    Date,
    Boolean,
}

impl SemanticType {
    pub fn is_integer(self) -> bool {
        matches!(
            self,
            SemanticType::Int8 | SemanticType::Int16 | SemanticType::Int32 | SemanticType::Int64
        )
    }

    pub fn is_float(self) -> bool {
        matches!(self, SemanticType::Float32 | SemanticType::Float64)
    }

    pub fn is_textual(self) -> bool {
        matches!(self, SemanticType::Text | SemanticType::Categorical)
    }

    /// Inclusive value range for integer types.
    pub fn int_range(self) -> Option<(i64, i64)> {
        match self {
            SemanticType::Int8 => Some((i8::MIN as i64, i8::MAX as i64)),
            SemanticType::Int16 => Some((i16::MIN as i64, i16::MAX as i64)),
            SemanticType::Int32 => Some((i32::MIN as i64, i32::MAX as i64)),
            SemanticType::Int64 => Some((i64::MIN, i64::MAX)),
            _ => None,
        }
    }

    /// Fill value for a column synthesized because the generator left it out.
    pub fn default_value(self) -> Value {
        match self {
            SemanticType::Text | SemanticType::Categorical => Value::label(""),
            SemanticType::Int8 | SemanticType::Int16 | SemanticType::Int32 | SemanticType::Int64 => {
                Value::Int(0)
            }
            SemanticType::Float32 | SemanticType::Float64 => Value::Float(0.0),
            SemanticType::Date => Value::Date(sentinel_date()),
            SemanticType::Boolean => Value::Bool(false),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SemanticType::Text => "text",
            SemanticType::Categorical => "categorical",
            SemanticType::Int8 => "int8",
            SemanticType::Int16 => "int16",
            SemanticType::Int32 => "int32",
            SemanticType::Int64 => "int64",
            SemanticType::Float32 => "float32",
            SemanticType::Float64 => "float64",
            SemanticType::Date => "date",
            SemanticType::Boolean => "boolean",
        }
    }
}

impl std::fmt::Display for SemanticType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Placeholder date for missing date columns.
pub fn sentinel_date() -> chrono::NaiveDate {
    chrono::NaiveDate::from_ymd_opt(1900, 1, 1).unwrap_or_default()
}

/// Ordered column name → type mapping that a table must match exactly.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SchemaSpec {
    columns: IndexMap<String, SemanticType>,
}

impl SchemaSpec {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a column. Re-declaring a column keeps its original position
    /// and replaces the type.
    pub fn column(mut self, name: &str, ty: SemanticType) -> Self {
        self.columns.insert(name.to_string(), ty);
        self
    }

    pub fn get(&self, name: &str) -> Option<SemanticType> {
        self.columns.get(name).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, SemanticType)> {
        self.columns.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.keys().map(|k| k.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_preserves_order() {
        let spec = SchemaSpec::new()
            .column("b", SemanticType::Int16)
            .column("a", SemanticType::Text)
            .column("c", SemanticType::Date);
        assert_eq!(spec.column_names(), vec!["b", "a", "c"]);
        assert_eq!(spec.get("a"), Some(SemanticType::Text));
        assert_eq!(spec.get("z"), None);
    }

    #[test]
    fn test_defaults_by_type() {
        assert_eq!(SemanticType::Categorical.default_value(), Value::label(""));
        assert_eq!(SemanticType::Int8.default_value(), Value::Int(0));
        assert_eq!(SemanticType::Float32.default_value(), Value::Float(0.0));
        assert_eq!(SemanticType::Boolean.default_value(), Value::Bool(false));
        assert_eq!(
            SemanticType::Date.default_value(),
            Value::Date(chrono::NaiveDate::from_ymd_opt(1900, 1, 1).unwrap())
        );
    }

    #[test]
    fn test_int_ranges() {
        assert_eq!(SemanticType::Int8.int_range(), Some((-128, 127)));
        assert_eq!(SemanticType::Text.int_range(), None);
    }
}
