use std::io::Write;

use super::{cell_text, io_error};
use crate::error::Result;
use crate::table::Table;

/// Write a table as CSV: one header line, then one line per row.
pub fn write_csv<W: Write>(writer: &mut W, table: &Table) -> Result<()> {
    let name = table.name();
    let header = table
        .column_names()
        .iter()
        .map(|c| csv_escape(c))
        .collect::<Vec<_>>()
        .join(",");
    writeln!(writer, "{}", header)
        .map_err(|e| io_error(format!("writing CSV columns for {}", name), e))?;

    let columns: Vec<_> = table.columns().map(|(_, col)| col).collect();
    let mut line = Vec::with_capacity(columns.len());
    for index in 0..table.num_rows() {
        line.clear();
        for col in &columns {
            line.push(csv_escape(&cell_text(&col.values[index], col.dtype)));
        }
        writeln!(writer, "{}", line.join(","))
            .map_err(|e| io_error(format!("writing CSV row for {}", name), e))?;
    }

    Ok(())
}

/// Escape a string for CSV: quote if it contains comma, quote, or newline.
pub fn csv_escape(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') || s.contains('\r') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}
