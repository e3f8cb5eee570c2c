//! # Table Output
//!
//! Every dimension is written to its own file named after the table
//! (`DimCliente.csv`, `DimRuta.json`, ...). Columns keep schema order.
//! Float32 columns render through single precision so the files show the
//! value the schema actually stores.

pub mod csv;
pub mod json;

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::OutputFormat;
use crate::error::{DistSimError, Result};
use crate::table::schema::SemanticType;
use crate::table::value::Value;
use crate::table::Table;

/// Path of a table's output file inside `dir`.
pub fn table_path(dir: &Path, table: &str, format: OutputFormat) -> PathBuf {
    dir.join(format!("{}.{}", table, format.extension()))
}

/// Write one table to `dir` in `format`, creating the directory if needed.
pub fn write_table(dir: &Path, table: &Table, format: OutputFormat) -> Result<PathBuf> {
    std::fs::create_dir_all(dir).map_err(|e| io_error(format!("creating {}", dir.display()), e))?;

    let path = table_path(dir, table.name(), format);
    let file = File::create(&path).map_err(|e| io_error(format!("creating {}", path.display()), e))?;
    let mut writer = BufWriter::new(file);

    match format {
        OutputFormat::Csv => csv::write_csv(&mut writer, table)?,
        OutputFormat::Json => json::write_json(&mut writer, table)?,
    }
    writer
        .flush()
        .map_err(|e| io_error(format!("flushing {}", path.display()), e))?;

    debug!(table = table.name(), path = %path.display(), rows = table.num_rows(), "table written");
    Ok(path)
}

/// Writes each table it is handed into one directory. Used as the
/// orchestrator's sink so tables hit disk as soon as they are built.
#[derive(Debug)]
pub struct TableWriter {
    dir: PathBuf,
    format: OutputFormat,
    written: Vec<PathBuf>,
}

impl TableWriter {
    pub fn new(dir: impl Into<PathBuf>, format: OutputFormat) -> Self {
        Self {
            dir: dir.into(),
            format,
            written: Vec::new(),
        }
    }

    pub fn write(&mut self, table: &Table) -> Result<()> {
        let path = write_table(&self.dir, table, self.format)?;
        self.written.push(path);
        Ok(())
    }

    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }
}

/// A float as the column type stores it.
pub(crate) fn stored_float(value: f64, dtype: SemanticType) -> FloatRepr {
    if dtype == SemanticType::Float32 {
        FloatRepr::Single(value as f32)
    } else {
        FloatRepr::Double(value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum FloatRepr {
    Single(f32),
    Double(f64),
}

impl std::fmt::Display for FloatRepr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FloatRepr::Single(v) => write!(f, "{}", v),
            FloatRepr::Double(v) => write!(f, "{}", v),
        }
    }
}

/// Render a cell as text for CSV output.
pub(crate) fn cell_text(value: &Value, dtype: SemanticType) -> String {
    match value {
        Value::Float(f) => stored_float(*f, dtype).to_string(),
        other => other.to_csv_string(),
    }
}

pub(crate) fn io_error(message: String, source: std::io::Error) -> DistSimError {
    DistSimError::Output { message, source }
}
