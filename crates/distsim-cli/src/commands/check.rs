use std::path::Path;
use std::process;

use anyhow::{bail, Context, Result};

use distsim_core::lock;
use distsim_core::lock::types::RunLock;
use distsim_core::{GenContext, Orchestrator};

use super::{table_progress, RunSetup};
use crate::args::{CheckArgs, CheckFormat};

pub fn run(config_dir: &Path, args: &CheckArgs) -> Result<()> {
    if !args.lock.exists() {
        bail!(
            "No lock file found at {}. Run `distsim generate` first.",
            args.lock.display()
        );
    }
    let run_lock = lock::read_lock_file(&args.lock)?;
    let setup = RunSetup::resolve(config_dir, None, Some(&run_lock))?;

    let config_hash = lock::config_hash(&setup.config)?;
    if config_hash != run_lock.config_hash {
        bail!(
            "Config snapshot in {} does not match its recorded hash; the lock was edited by hand",
            args.lock.display()
        );
    }

    let orchestrator = Orchestrator::standard();
    let pb = table_progress(orchestrator.generators().len(), "check")?;
    let ctx = GenContext {
        config: &setup.config,
        master: &setup.master,
    };
    let registry = orchestrator
        .run_with(
            &ctx,
            setup.seed,
            |table, index, _| {
                pb.set_position(index as u64);
                pb.set_message(table.to_string());
            },
            |_| Ok(()),
        )
        .with_context(|| format!("Regeneration failed (seed {})", setup.seed))?;
    pb.finish_and_clear();

    let drift = run_lock.compare(&lock::digest_registry(&registry));

    match args.format {
        CheckFormat::Json => {
            let report = serde_json::json!({
                "seed": run_lock.seed,
                "locked_version": run_lock.distsim_version,
                "reproducible": drift.is_empty(),
                "drift": drift.iter().map(|d| d.to_string()).collect::<Vec<_>>(),
            });
            let json =
                serde_json::to_string_pretty(&report).context("Failed to serialize check report")?;
            println!("{}", json);
        }
        CheckFormat::Text => println!("{}", summary(&run_lock, &drift)),
    }

    if !drift.is_empty() {
        process::exit(1);
    }

    Ok(())
}

fn summary(run_lock: &RunLock, drift: &[lock::types::Drift]) -> String {
    if drift.is_empty() {
        return format!(
            "✓ All {} tables reproduce exactly (seed {})",
            run_lock.tables.len(),
            run_lock.seed
        );
    }
    let mut out = format!("✗ {} table(s) differ from the lock:", drift.len());
    for d in drift {
        out.push_str(&format!("\n  - {}", d));
    }
    if run_lock.distsim_version != env!("CARGO_PKG_VERSION") {
        out.push_str(&format!(
            "\n  (lock written by distsim {}, this is {})",
            run_lock.distsim_version,
            env!("CARGO_PKG_VERSION")
        ));
    }
    out
}
