pub mod check;
pub mod generate;
pub mod graph;
pub mod preview;

use std::path::Path;

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

use distsim_core::config::{read_config, SimConfig};
use distsim_core::lock::types::RunLock;
use distsim_core::MasterData;

/// Config, master data and seed for one run.
pub struct RunSetup {
    pub config: SimConfig,
    pub master: MasterData,
    pub seed: u64,
}

impl RunSetup {
    /// Resolve a run from the config directory, an optional lock, and an
    /// optional CLI seed.
    ///
    /// With a lock, its config snapshot replaces distsim.toml. The seed comes
    /// from the first of: CLI, lock, config, wall clock.
    pub fn resolve(config_dir: &Path, cli_seed: Option<u64>, lock: Option<&RunLock>) -> Result<Self> {
        let config = match lock {
            Some(lock) => {
                lock.config.validate().context("Lock file holds an invalid config")?;
                lock.config.clone()
            }
            None => read_config(config_dir)?.unwrap_or_default(),
        };
        let seed = pick_seed(cli_seed, lock.map(|l| l.seed), config.run.seed, clock_seed);

        let master_path = config.master_data_path();
        let master = MasterData::load(master_path.as_deref()).with_context(|| match &master_path {
            Some(path) => format!("Failed to load master data from {}", path.display()),
            None => "Failed to load built-in master data".to_string(),
        })?;

        info!(seed, "run resolved");
        Ok(Self {
            config,
            master,
            seed,
        })
    }
}

/// Progress bar ticking once per generated table.
pub fn table_progress(total: usize, phase: &str) -> Result<ProgressBar> {
    let pb = ProgressBar::new(total as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.cyan} [{prefix}] {bar:30.cyan/dim} {pos}/{len} {msg}")?
            .progress_chars("█▓░"),
    );
    pb.set_prefix(phase.to_string());
    Ok(pb)
}

fn pick_seed(
    cli: Option<u64>,
    lock: Option<u64>,
    config: Option<u64>,
    clock: impl FnOnce() -> u64,
) -> u64 {
    cli.or(lock).or(config).unwrap_or_else(clock)
}

fn clock_seed() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_priority() {
        assert_eq!(pick_seed(Some(1), Some(2), Some(3), || 4), 1);
        assert_eq!(pick_seed(None, Some(2), Some(3), || 4), 2);
        assert_eq!(pick_seed(None, None, Some(3), || 4), 3);
        assert_eq!(pick_seed(None, None, None, || 4), 4);
    }

    #[test]
    fn test_resolve_without_config_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let setup = RunSetup::resolve(dir.path(), Some(9), None).unwrap();
        assert_eq!(setup.seed, 9);
        assert_eq!(setup.config.run.fiscal_year_start_month, 7);
    }

    #[test]
    fn test_resolve_reads_config_seed() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("distsim.toml"), "[run]\nseed = 77\n").unwrap();
        let setup = RunSetup::resolve(dir.path(), None, None).unwrap();
        assert_eq!(setup.seed, 77);
    }
}
