use std::path::Path;

use anyhow::{bail, Result};
use comfy_table::Table as ComfyTable;

use distsim_core::table::Table;
use distsim_core::{GenContext, Orchestrator};

use super::{table_progress, RunSetup};
use crate::args::PreviewArgs;

const MAX_CELL_CHARS: usize = 40;

pub fn run(config_dir: &Path, args: &PreviewArgs) -> Result<()> {
    let setup = RunSetup::resolve(config_dir, args.seed, None)?;
    let orchestrator = Orchestrator::standard();

    for wanted in &args.tables {
        if orchestrator.spec(wanted).is_none() {
            bail!("Unknown table '{}'. Run `distsim graph` to list tables.", wanted);
        }
    }

    let pb = table_progress(orchestrator.generators().len(), "preview")?;
    let ctx = GenContext {
        config: &setup.config,
        master: &setup.master,
    };
    let registry = orchestrator.run_with(
        &ctx,
        setup.seed,
        |table, index, _| {
            pb.set_position(index as u64);
            pb.set_message(table.to_string());
        },
        |_| Ok(()),
    )?;
    pb.finish_and_clear();

    for table in registry.tables() {
        if !args.tables.is_empty() && !args.tables.iter().any(|t| t == table.name()) {
            continue;
        }
        println!("━━━ {} ({} rows) ━━━", table.name(), table.num_rows());
        println!("{}\n", render(table, args.rows));
    }

    Ok(())
}

/// First `limit` rows of a table as a terminal table.
fn render(table: &Table, limit: usize) -> ComfyTable {
    let mut t = ComfyTable::new();
    t.set_header(table.column_names());
    for row in table.rows().take(limit) {
        let values: Vec<String> = table
            .columns()
            .map(|(_, col)| {
                let value = &col.values[row.index()];
                if value.is_null() {
                    return "NULL".to_string();
                }
                truncate(&value.to_string())
            })
            .collect();
        t.add_row(values);
    }
    t
}

fn truncate(s: &str) -> String {
    if s.chars().count() > MAX_CELL_CHARS {
        let head: String = s.chars().take(MAX_CELL_CHARS - 3).collect();
        format!("{}...", head)
    } else {
        s.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_respects_char_boundaries() {
        let long = "Distribuidora Peñasco del Río Grande y Asociados";
        let cut = truncate(long);
        assert_eq!(cut.chars().count(), MAX_CELL_CHARS);
        assert!(cut.ends_with("..."));
        assert_eq!(truncate("CEDI-01"), "CEDI-01");
    }
}
