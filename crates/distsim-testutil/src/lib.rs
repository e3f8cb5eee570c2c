//! Fixtures shared by distsim's integration tests and benches.

use chrono::NaiveDate;
use distsim_core::config::{SimConfig, YearTarget};
use distsim_core::{GenContext, MasterData, Orchestrator, Registry};

const SMALL_MASTER: &str = include_str!("../data/small.toml");

/// Five provinces, a principal and two regional centers, three
/// departments. Barahona's center has no recorded capacity.
pub fn small_master() -> MasterData {
    MasterData::from_toml_str(SMALL_MASTER, "small test master").expect("small master is valid")
}

/// Two simulated years with a few hundred customers.
pub fn small_config() -> SimConfig {
    let mut config = SimConfig::default();
    config.run.start_date = date(2021, 1, 1);
    config.run.end_date = date(2022, 12, 31);
    config.customers.targets = vec![
        YearTarget {
            year: 2021,
            active: 300,
        },
        YearTarget {
            year: 2022,
            active: 330,
        },
    ];
    config.validate().expect("small config is valid");
    config
}

/// Build every standard table in memory.
pub fn generate(config: &SimConfig, master: &MasterData, seed: u64) -> Registry {
    let ctx = GenContext { config, master };
    Orchestrator::standard()
        .run(&ctx, seed)
        .expect("standard run succeeds")
}

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}
