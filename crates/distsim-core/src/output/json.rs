use std::io::Write;

use super::{io_error, stored_float, FloatRepr};
use crate::error::{DistSimError, Result};
use crate::table::schema::SemanticType;
use crate::table::value::Value;
use crate::table::Table;

/// Write a table as a JSON array of row objects.
///
/// Rows are streamed one at a time; the table is never materialized as a
/// `serde_json::Value` tree.
pub fn write_json<W: Write>(writer: &mut W, table: &Table) -> Result<()> {
    let name = table.name();
    let keys = table
        .column_names()
        .into_iter()
        .map(json_key)
        .collect::<Result<Vec<_>>>()?;
    let columns: Vec<_> = table.columns().map(|(_, col)| col).collect();
    let rows = table.num_rows();

    write_str(writer, name, "[\n")?;
    for index in 0..rows {
        write_str(writer, name, "  {")?;
        for (col_idx, (key, col)) in keys.iter().zip(&columns).enumerate() {
            let value = json_value(&col.values[index], col.dtype)?;
            let sep = if col_idx + 1 < columns.len() { "," } else { "" };
            write_str(writer, name, &format!("\n    {}: {}{}", key, value, sep))?;
        }
        write_str(writer, name, "\n  }")?;
        if index + 1 < rows {
            write_str(writer, name, ",")?;
        }
        write_str(writer, name, "\n")?;
    }
    write_str(writer, name, "]\n")
}

fn write_str<W: Write>(writer: &mut W, table: &str, s: &str) -> Result<()> {
    writer
        .write_all(s.as_bytes())
        .map_err(|e| io_error(format!("writing JSON for {}", table), e))
}

/// Encode a column name as a JSON string literal.
fn json_key(key: &str) -> Result<String> {
    serde_json::to_string(key).map_err(encode_error)
}

/// Encode a cell as a JSON literal. Dates become `YYYY-MM-DD` strings.
fn json_value(value: &Value, dtype: SemanticType) -> Result<String> {
    let encoded = match value {
        Value::Null => Ok("null".to_string()),
        Value::Bool(b) => serde_json::to_string(b),
        Value::Int(i) => serde_json::to_string(i),
        Value::Float(f) => match stored_float(*f, dtype) {
            FloatRepr::Single(v) => serde_json::to_string(&v),
            FloatRepr::Double(v) => serde_json::to_string(&v),
        },
        Value::Text(s) => serde_json::to_string(s.as_ref()),
        Value::Date(d) => serde_json::to_string(&d.format("%Y-%m-%d").to_string()),
    };
    encoded.map_err(encode_error)
}

fn encode_error(e: serde_json::Error) -> DistSimError {
    DistSimError::Other(format!("JSON encoding failed: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::row;
    use chrono::NaiveDate;

    #[test]
    fn test_write_json_rows() {
        let table = Table::from_rows(
            "DimCanal",
            vec![
                row! { "Canal_ID" => "CAN-01", "Peso" => 0.5, "Activo" => true },
                row! { "Canal_ID" => "CAN-02", "Peso" => Value::Null, "Activo" => false },
            ],
        );
        let mut out = Vec::new();
        write_json(&mut out, &table).unwrap();

        let parsed: serde_json::Value = serde_json::from_slice(&out).unwrap();
        let rows = parsed.as_array().unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0]["Canal_ID"], "CAN-01");
        assert_eq!(rows[0]["Peso"], 0.5);
        assert!(rows[1]["Peso"].is_null());
        assert_eq!(rows[1]["Activo"], false);
    }

    #[test]
    fn test_json_dates_and_escaping() {
        let date = NaiveDate::from_ymd_opt(2021, 12, 25).unwrap();
        assert_eq!(
            json_value(&Value::Date(date), SemanticType::Date).unwrap(),
            "\"2021-12-25\""
        );
        assert_eq!(
            json_value(&Value::label("Ruta \"Norte\""), SemanticType::Text).unwrap(),
            "\"Ruta \\\"Norte\\\"\""
        );
        assert_eq!(
            json_value(&Value::Float(0.1f32 as f64), SemanticType::Float32).unwrap(),
            "0.1"
        );
    }

    #[test]
    fn test_column_order_preserved() {
        let table = Table::from_rows(
            "DimPrueba",
            vec![row! { "zeta" => 1i64, "alfa" => 2i64, "medio" => 3i64 }],
        );
        let mut out = Vec::new();
        write_json(&mut out, &table).unwrap();
        let text = String::from_utf8(out).unwrap();
        let z = text.find("\"zeta\"").unwrap();
        let a = text.find("\"alfa\"").unwrap();
        let m = text.find("\"medio\"").unwrap();
        assert!(z < a && a < m);
    }

    #[test]
    fn test_empty_table_is_empty_array() {
        let mut out = Vec::new();
        write_json(&mut out, &Table::from_rows("DimRuta", vec![])).unwrap();
        let parsed: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(parsed, serde_json::json!([]));
    }
}
