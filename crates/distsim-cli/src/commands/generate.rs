use std::path::Path;

use anyhow::{bail, Context, Result};
use comfy_table::{Cell, CellAlignment, Table as ComfyTable};
use indicatif::{ProgressBar, ProgressStyle};

use distsim_core::lock;
use distsim_core::lock::types::RunLock;
use distsim_core::output::TableWriter;
use distsim_core::{GenContext, Orchestrator};

use super::{table_progress, RunSetup};
use crate::args::GenerateArgs;

pub fn run(config_dir: &Path, args: &GenerateArgs) -> Result<()> {
    // Phase 1: resolve config, seed and master data
    let restored = if args.from_lock {
        if !args.lock.exists() {
            bail!(
                "--from-lock given but {} does not exist. Run `distsim generate` first.",
                args.lock.display()
            );
        }
        Some(lock::read_lock_file(&args.lock)?)
    } else {
        None
    };

    let RunSetup {
        mut config,
        master,
        seed,
    } = RunSetup::resolve(config_dir, args.seed, restored.as_ref())?;
    if let Some(dir) = &args.out_dir {
        config.output.dir = dir.clone();
    }
    if let Some(format) = args.format {
        config.output.format = format.into();
    }
    eprintln!("Seed: {}", seed);

    // Phase 2: build and write every table
    let orchestrator = Orchestrator::standard();
    let total = orchestrator.generators().len();
    let pb = table_progress(total, "1/2")?;
    let mut writer = TableWriter::new(&config.output.dir, config.output.format);

    let ctx = GenContext {
        config: &config,
        master: &master,
    };
    let registry = orchestrator
        .run_with(
            &ctx,
            seed,
            |table, index, _| {
                pb.set_position(index as u64);
                pb.set_message(table.to_string());
            },
            |table| writer.write(table),
        )
        .with_context(|| format!("Generation failed (seed {})", seed))?;
    pb.finish_with_message("done");

    // Phase 3: lock file
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::default_spinner().template("{spinner:.cyan} [2/2] {msg}")?);
    spinner.set_message(format!("Writing {}...", args.lock.display()));

    let snapshot = lock::config_snapshot(&config);
    let config_hash = lock::config_hash(&snapshot)?;
    let digests = lock::digest_registry(&registry);
    let run_lock = RunLock::new(seed, snapshot, config_hash, digests);
    lock::write_lock_file(&run_lock, &args.lock)?;
    spinner.finish_with_message(format!("Lock file written to {}", args.lock.display()));

    // Summary
    let mut summary = ComfyTable::new();
    summary.set_header(vec!["Table", "Rows", "File"]);
    let mut total_rows = 0;
    for (table, path) in registry.tables().zip(writer.written()) {
        total_rows += table.num_rows();
        summary.add_row(vec![
            Cell::new(table.name()),
            Cell::new(table.num_rows()).set_alignment(CellAlignment::Right),
            Cell::new(path.display()),
        ]);
    }
    println!("{}", summary);
    eprintln!(
        "\n✓ Generated {} rows across {} tables → {}",
        total_rows,
        registry.len(),
        config.output.dir.display()
    );

    Ok(())
}
