//! # Configuration File Parser
//!
//! Reads and parses `distsim.toml`, the optional run configuration. Every
//! section and key is optional; omitted values fall back to the reference
//! scenario (five years, 2021 through 2025, about 71k active customers at the
//! end).
//!
//! - `[run]`: seed, date range, fiscal calendar, weight tolerance, master data
//! - `[customers]`: churn, naming mix, cluster split, territory box, targets
//! - `[routes]`: route-count rule, road factor, classification and frequency
//! - `[output]`: output directory and format
//!
//! Example `distsim.toml`:
//!
//! ```toml
//! [run]
//! seed = 42
//! start_date = "2021-01-01"
//! end_date = "2023-12-31"
//!
//! [customers]
//! churn_rate = 0.08
//!
//! [[customers.targets]]
//! year = 2021
//! active = 5000
//!
//! [[customers.targets]]
//! year = 2022
//! active = 5400
//!
//! [routes]
//! fan_out = 3
//!
//! [output]
//! dir = "out"
//! format = "json"
//! ```

use std::path::{Path, PathBuf};

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{DistSimError, Result};

/// Default config file name.
pub const CONFIG_FILE_NAME: &str = "distsim.toml";

/// Top-level distsim.toml structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub run: RunConfig,
    pub customers: CustomerConfig,
    pub routes: RouteConfig,
    pub output: OutputConfig,

    /// Absolute path to the directory containing distsim.toml.
    ///
    /// Populated by `read_config()` so that a relative `master_data` path
    /// resolves against the config file's location, not the CWD.
    #[serde(skip)]
    pub config_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    /// Fixed random seed. A CLI seed or lock file seed wins over this.
    pub seed: Option<u64>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    /// Calendar month (1..=12) in which the fiscal year starts.
    pub fiscal_year_start_month: u32,
    /// Accepted deviation of a weight total from 1.0 before warning.
    pub weight_tolerance: f64,
    /// Replacement master data file.
    pub master_data: Option<PathBuf>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            seed: None,
            start_date: NaiveDate::from_ymd_opt(2021, 1, 1).unwrap_or_default(),
            end_date: NaiveDate::from_ymd_opt(2025, 12, 31).unwrap_or_default(),
            fiscal_year_start_month: 7,
            weight_tolerance: crate::weights::NORMALIZE_TOLERANCE,
            master_data: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CustomerConfig {
    /// Annual probability that an existing active customer churns.
    pub churn_rate: f64,
    /// Probability that a new customer is named like a company.
    pub company_name_share: f64,
    /// Split between the two highest-priority clusters for A/B customers.
    pub high_cluster_split: [f64; 2],
    /// Split between the two lowest-priority clusters for everyone else.
    pub low_cluster_split: [f64; 2],
    pub bounds: TerritoryBounds,
    /// Minimum active customers at the end of each year.
    pub targets: Vec<YearTarget>,
}

impl Default for CustomerConfig {
    fn default() -> Self {
        Self {
            churn_rate: 0.05,
            company_name_share: 0.7,
            high_cluster_split: [0.6, 0.4],
            low_cluster_split: [0.7, 0.3],
            bounds: TerritoryBounds::default(),
            targets: vec![
                YearTarget { year: 2021, active: 61_500 },
                YearTarget { year: 2022, active: 63_000 },
                YearTarget { year: 2023, active: 65_000 },
                YearTarget { year: 2024, active: 67_800 },
                YearTarget { year: 2025, active: 71_000 },
            ],
        }
    }
}

/// Bounding box new customers are placed in.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct TerritoryBounds {
    pub lat_min: f64,
    pub lat_max: f64,
    pub lon_min: f64,
    pub lon_max: f64,
}

impl Default for TerritoryBounds {
    fn default() -> Self {
        Self {
            lat_min: 18.0,
            lat_max: 19.8,
            lon_min: -71.5,
            lon_max: -68.5,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearTarget {
    pub year: i32,
    pub active: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RouteConfig {
    /// Routes per operational vehicle.
    pub fan_out: u32,
    /// Center capacity consumed by one route.
    pub pallets_per_route: u32,
    /// Minimum routes per served center.
    pub min_routes: u32,
    /// Route ceiling for centers without a known capacity.
    pub unknown_capacity_ceiling: u32,
    /// Road distance = geodesic distance × uniform(road_factor_min, road_factor_max).
    pub road_factor_min: f64,
    pub road_factor_max: f64,
    pub min_distance_km: f64,
    /// Regions where short routes count as dense urban.
    pub dense_regions: Vec<String>,
    /// Destinations sampled when a center's region has no geographies.
    pub fallback_sample: usize,
    /// Daily, every-other-day, weekly.
    pub frequency_weights: [f64; 3],
}

impl Default for RouteConfig {
    fn default() -> Self {
        Self {
            fan_out: 2,
            pallets_per_route: 50,
            min_routes: 10,
            unknown_capacity_ceiling: 10_000,
            road_factor_min: 1.3,
            road_factor_max: 1.6,
            min_distance_km: 5.0,
            dense_regions: vec!["Ozama".to_string(), "Cibao Central".to_string()],
            fallback_sample: 3,
            frequency_weights: [0.3, 0.5, 0.2],
        }
    }
}

/// Output file format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Csv,
    Json,
}

impl OutputFormat {
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Csv => "csv",
            OutputFormat::Json => "json",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub dir: PathBuf,
    pub format: OutputFormat,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("output"),
            format: OutputFormat::Csv,
        }
    }
}

/// Read and parse a distsim.toml file from the given directory.
///
/// Returns `None` if the file doesn't exist (config is optional).
/// Returns an error if the file exists but can't be parsed or is invalid.
pub fn read_config(dir: &Path) -> Result<Option<SimConfig>> {
    let path = dir.join(CONFIG_FILE_NAME);
    if !path.exists() {
        return Ok(None);
    }

    let content = std::fs::read_to_string(&path).map_err(|e| DistSimError::Config {
        message: format!("Failed to read {}: {}", path.display(), e),
    })?;

    let mut config: SimConfig = toml::from_str(&content).map_err(|e| DistSimError::Config {
        message: format!("Failed to parse {}: {}", path.display(), e),
    })?;

    config.config_dir = Some(std::fs::canonicalize(dir).unwrap_or_else(|_| dir.to_path_buf()));
    config.validate()?;

    Ok(Some(config))
}

impl SimConfig {
    /// Reject values that would make a run meaningless.
    pub fn validate(&self) -> Result<()> {
        let run = &self.run;
        if run.start_date > run.end_date {
            return Err(config_error(format!(
                "run.start_date {} is after run.end_date {}",
                run.start_date, run.end_date
            )));
        }
        if !(1..=12).contains(&run.fiscal_year_start_month) {
            return Err(config_error(format!(
                "run.fiscal_year_start_month must be 1..=12, got {}",
                run.fiscal_year_start_month
            )));
        }
        if !(run.weight_tolerance.is_finite() && run.weight_tolerance >= 0.0) {
            return Err(config_error("run.weight_tolerance must be a non-negative number"));
        }

        let customers = &self.customers;
        if !(0.0..=1.0).contains(&customers.churn_rate) {
            return Err(config_error(format!(
                "customers.churn_rate must be within [0, 1], got {}",
                customers.churn_rate
            )));
        }
        if !(0.0..=1.0).contains(&customers.company_name_share) {
            return Err(config_error(format!(
                "customers.company_name_share must be within [0, 1], got {}",
                customers.company_name_share
            )));
        }
        let b = &customers.bounds;
        if b.lat_min >= b.lat_max || b.lon_min >= b.lon_max {
            return Err(config_error("customers.bounds minimums must be below maximums"));
        }
        let (first, last) = (run.start_date.year(), run.end_date.year());
        for target in &customers.targets {
            if target.year < first || target.year > last {
                return Err(config_error(format!(
                    "customers.targets has year {} outside the simulated range {}..={}",
                    target.year, first, last
                )));
            }
        }

        let routes = &self.routes;
        if routes.fan_out == 0 {
            return Err(config_error("routes.fan_out must be at least 1"));
        }
        if routes.pallets_per_route == 0 {
            return Err(config_error("routes.pallets_per_route must be at least 1"));
        }
        if !(routes.road_factor_min > 0.0 && routes.road_factor_min < routes.road_factor_max) {
            return Err(config_error(format!(
                "routes.road_factor_min ({}) must be positive and below road_factor_max ({})",
                routes.road_factor_min, routes.road_factor_max
            )));
        }

        Ok(())
    }

    /// Calendar years covered by the run.
    pub fn years(&self) -> std::ops::RangeInclusive<i32> {
        self.run.start_date.year()..=self.run.end_date.year()
    }

    /// Active-customer target for `year`.
    ///
    /// A year without an explicit target keeps the latest earlier target;
    /// years before the first target have none.
    pub fn target_for(&self, year: i32) -> u64 {
        self.customers
            .targets
            .iter()
            .filter(|t| t.year <= year)
            .max_by_key(|t| t.year)
            .map(|t| t.active)
            .unwrap_or(0)
    }

    /// Master data override, resolved against the config directory.
    pub fn master_data_path(&self) -> Option<PathBuf> {
        let path = self.run.master_data.as_ref()?;
        if path.is_absolute() {
            return Some(path.clone());
        }
        Some(match &self.config_dir {
            Some(dir) => dir.join(path),
            None => path.clone(),
        })
    }
}

fn config_error(message: impl Into<String>) -> DistSimError {
    DistSimError::Config {
        message: message.into(),
    }
}
