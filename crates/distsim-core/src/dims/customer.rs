//! DimCliente: a year-by-year simulation of the customer base.
//!
//! Each simulated year first churns existing customers (every year but the
//! first), then creates exactly enough new customers to reach that year's
//! active target. Customers are never removed: churn only clears their
//! active flag, so the table only ever grows.
//!
//! State lives in an arena (`Vec<Customer>`) with a parallel active-flag
//! vector indexed by the same position.

use chrono::NaiveDate;
use rand::rngs::StdRng;
use rand::Rng;
use tracing::info;

use crate::columns::{canal, cliente as col, cluster, geografia, tables};
use crate::config::SimConfig;
use crate::error::{DistSimError, Result};
use crate::fakes;
use crate::master::{MasterData, Segment};
use crate::orchestrate::{GenContext, GeneratorSpec, Inputs};
use crate::row;
use crate::table::conform::Defaults;
use crate::table::schema::{SchemaSpec, SemanticType::*};
use crate::table::{Row, Table};
use crate::weights::WeightedSampler;

pub const SPEC: GeneratorSpec = GeneratorSpec {
    table: tables::CLIENTE,
    depends_on: &[tables::GEOGRAFIA, tables::CANAL, tables::CLUSTER],
    schema,
    defaults: Defaults::new,
    generate,
};

pub fn schema() -> SchemaSpec {
    SchemaSpec::new()
        .column(col::ID, Text)
        .column(col::NOMBRE, Text)
        .column(col::PROVINCIA_ID, Text)
        .column(col::CANAL_ID, Text)
        .column(col::SEGMENTO, Categorical)
        .column(col::CLUSTER_ID, Int8)
        .column(col::FECHA_ALTA, Date)
        .column(col::ACTIVO, Boolean)
        .column(col::LATITUD, Float64)
        .column(col::LONGITUD, Float64)
        .column(col::ANIO_CREACION, Int16)
}

/// One simulated customer. Geography and channel are positions in the
/// pools the customer was drawn from.
#[derive(Debug, Clone, PartialEq)]
pub struct Customer {
    pub name: String,
    pub geography: usize,
    pub channel: usize,
    pub segment: Segment,
    pub cluster: i64,
    pub created: NaiveDate,
    pub lat: f64,
    pub lon: f64,
    pub creation_year: i32,
}

/// What happened to the population in one simulated year.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearSummary {
    pub year: i32,
    /// Active customers created before this year.
    pub eligible: usize,
    pub churned: usize,
    pub created: usize,
    /// Active customers at year end.
    pub active: usize,
}

/// Sampling inputs for new customers.
pub struct CustomerPools {
    geography_ids: Vec<String>,
    geography: WeightedSampler<usize>,
    channel_ids: Vec<String>,
    channel: WeightedSampler<usize>,
    /// Segment mix per channel, parallel to `channel_ids`.
    segments: Vec<WeightedSampler<Segment>>,
    high_clusters: WeightedSampler<i64>,
    low_clusters: WeightedSampler<i64>,
}

impl CustomerPools {
    /// Build the pools from the geography, channel and cluster tables. A
    /// channel's segment mix is looked up in master data by channel name.
    pub fn from_tables(
        geography: &Table,
        channels: &Table,
        clusters: &Table,
        master: &MasterData,
        config: &SimConfig,
    ) -> Result<Self> {
        let mut geography_ids = Vec::with_capacity(geography.num_rows());
        let mut geography_weights = Vec::with_capacity(geography.num_rows());
        for (i, row) in geography.rows().enumerate() {
            geography_ids.push(row.str(geografia::ID)?.to_string());
            geography_weights.push((i, row.float(geografia::PESO)?));
        }
        if geography_weights.is_empty() {
            return Err(empty_pool("geographies"));
        }

        let mut channel_ids = Vec::with_capacity(channels.num_rows());
        let mut channel_weights = Vec::with_capacity(channels.num_rows());
        let mut segments = Vec::with_capacity(channels.num_rows());
        for (i, row) in channels.rows().enumerate() {
            let name = row.str(canal::NOMBRE)?;
            let mix: Vec<(Segment, f64)> = master
                .channels
                .iter()
                .find(|c| c.name == name)
                .map(|c| c.segment_weights.iter().map(|w| (w.segment, w.weight)).collect())
                .unwrap_or_default();
            if mix.is_empty() {
                return Err(empty_pool(&format!("segment weights of channel '{}'", name)));
            }
            segments.push(WeightedSampler::new(&format!("segments of {}", name), mix)?);
            channel_ids.push(row.str(canal::ID)?.to_string());
            channel_weights.push((i, row.float(canal::PESO_NORMALIZADO)?));
        }
        if channel_weights.is_empty() {
            return Err(empty_pool("channels"));
        }

        let mut ranked = Vec::with_capacity(clusters.num_rows());
        for row in clusters.rows() {
            ranked.push((row.int(cluster::PRIORIDAD)?, row.int(cluster::ID)?));
        }
        if ranked.len() < 2 {
            return Err(empty_pool("clusters (at least two required)"));
        }
        ranked.sort();
        let n = ranked.len();
        let [high_a, high_b] = config.customers.high_cluster_split;
        let [low_a, low_b] = config.customers.low_cluster_split;

        Ok(Self {
            geography_ids,
            geography: WeightedSampler::new("customer geographies", geography_weights)?,
            channel_ids,
            channel: WeightedSampler::new("customer channels", channel_weights)?,
            segments,
            high_clusters: WeightedSampler::new(
                "high-priority clusters",
                vec![(ranked[0].1, high_a), (ranked[1].1, high_b)],
            )?,
            low_clusters: WeightedSampler::new(
                "low-priority clusters",
                vec![(ranked[n - 2].1, low_a), (ranked[n - 1].1, low_b)],
            )?,
        })
    }

    fn cluster_for<R: Rng + ?Sized>(&self, rng: &mut R, segment: Segment) -> i64 {
        if segment.is_premium() {
            *self.high_clusters.sample(rng)
        } else {
            *self.low_clusters.sample(rng)
        }
    }
}

fn empty_pool(pool: &str) -> DistSimError {
    DistSimError::EmptyPool {
        table: tables::CLIENTE.to_string(),
        pool: pool.to_string(),
    }
}

/// The simulated customer base.
#[derive(Debug, Default)]
pub struct Population {
    customers: Vec<Customer>,
    active: Vec<bool>,
    summaries: Vec<YearSummary>,
}

impl Population {
    pub fn len(&self) -> usize {
        self.customers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.customers.is_empty()
    }

    pub fn active_count(&self) -> usize {
        self.active.iter().filter(|a| **a).count()
    }

    pub fn customers(&self) -> &[Customer] {
        &self.customers
    }

    pub fn is_active(&self, index: usize) -> bool {
        self.active.get(index).copied().unwrap_or(false)
    }

    pub fn summaries(&self) -> &[YearSummary] {
        &self.summaries
    }

    fn churn<R: Rng + ?Sized>(&mut self, rng: &mut R, year: i32, rate: f64) -> (usize, usize) {
        let mut eligible = 0;
        let mut churned = 0;
        for (customer, active) in self.customers.iter().zip(self.active.iter_mut()) {
            if !*active || customer.creation_year >= year {
                continue;
            }
            eligible += 1;
            if rng.random_bool(rate) {
                *active = false;
                churned += 1;
            }
        }
        (eligible, churned)
    }

    fn create<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        pools: &CustomerPools,
        config: &SimConfig,
        year: i32,
    ) -> Result<()> {
        let cfg = &config.customers;
        let geography = *pools.geography.sample(rng);
        let channel = *pools.channel.sample(rng);
        let segment = *pools.segments[channel].sample(rng);
        let cluster = pools.cluster_for(rng, segment);

        let month = rng.random_range(1..=12);
        let day = rng.random_range(1..=28);
        let created = NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| {
            DistSimError::Other(format!("invalid customer creation date {}-{}-{}", year, month, day))
        })?;

        let b = &cfg.bounds;
        let lat = rng.random_range(b.lat_min..b.lat_max);
        let lon = rng.random_range(b.lon_min..b.lon_max);

        let name = if rng.random_bool(cfg.company_name_share) {
            fakes::company_name(rng)
        } else {
            fakes::person_name(rng)
        };

        self.customers.push(Customer {
            name,
            geography,
            channel,
            segment,
            cluster,
            created,
            lat,
            lon,
            creation_year: year,
        });
        self.active.push(true);
        Ok(())
    }

    /// Render the population as table rows.
    pub fn to_rows(&self, pools: &CustomerPools) -> Vec<Row> {
        self.customers
            .iter()
            .zip(&self.active)
            .enumerate()
            .map(|(i, (c, active))| {
                row! {
                    col::ID => format!("CLI-{:06}", i + 1),
                    col::NOMBRE => c.name.clone(),
                    col::PROVINCIA_ID => pools.geography_ids[c.geography].clone(),
                    col::CANAL_ID => pools.channel_ids[c.channel].clone(),
                    col::SEGMENTO => c.segment.label(),
                    col::CLUSTER_ID => c.cluster,
                    col::FECHA_ALTA => c.created,
                    col::ACTIVO => *active,
                    col::LATITUD => c.lat,
                    col::LONGITUD => c.lon,
                    col::ANIO_CREACION => c.creation_year,
                }
            })
            .collect()
    }
}

/// Run the lifecycle over every configured year.
pub fn simulate<R: Rng + ?Sized>(rng: &mut R, pools: &CustomerPools, config: &SimConfig) -> Result<Population> {
    let mut population = Population::default();
    let churn_rate = config.customers.churn_rate;

    for (i, year) in config.years().enumerate() {
        let (eligible, churned) = if i == 0 {
            (0, 0)
        } else {
            population.churn(rng, year, churn_rate)
        };

        let target = config.target_for(year);
        let shortfall = target.saturating_sub(population.active_count() as u64) as usize;
        for _ in 0..shortfall {
            population.create(rng, pools, config, year)?;
        }

        let summary = YearSummary {
            year,
            eligible,
            churned,
            created: shortfall,
            active: population.active_count(),
        };
        info!(
            year,
            eligible,
            churned,
            created = shortfall,
            active = summary.active,
            target,
            "customer year simulated"
        );
        population.summaries.push(summary);
    }

    Ok(population)
}

fn generate(ctx: &GenContext<'_>, inputs: &Inputs<'_>, rng: &mut StdRng) -> Result<Table> {
    let pools = CustomerPools::from_tables(
        inputs.get(tables::GEOGRAFIA)?,
        inputs.get(tables::CANAL)?,
        inputs.get(tables::CLUSTER)?,
        ctx.master,
        ctx.config,
    )?;
    let population = simulate(rng, &pools, ctx.config)?;
    Ok(Table::from_rows(tables::CLIENTE, population.to_rows(&pools)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::YearTarget;
    use crate::dims::testing::{build_until, rng, small_config};
    use crate::orchestrate::Registry;

    fn build_pools(registry: &Registry, master: &MasterData, config: &SimConfig) -> Result<CustomerPools> {
        CustomerPools::from_tables(
            registry.get(tables::GEOGRAFIA).unwrap(),
            registry.get(tables::CANAL).unwrap(),
            registry.get(tables::CLUSTER).unwrap(),
            master,
            config,
        )
    }

    #[test]
    fn test_active_meets_target_and_table_never_shrinks() {
        let config = small_config();
        let master = MasterData::reference().unwrap();
        let registry = build_until(&config, &master, tables::CLUSTER, 11);
        let pools = build_pools(&registry, &master, &config).unwrap();
        let population = simulate(&mut rng(21), &pools, &config).unwrap();

        let mut total = 0;
        for summary in population.summaries() {
            assert!(summary.active as u64 >= config.target_for(summary.year));
            total += summary.created;
        }
        assert_eq!(total, population.len());
        assert_eq!(population.summaries()[0].churned, 0);
        assert_eq!(population.summaries().len(), 3);
    }

    #[test]
    fn test_churn_is_deterministic() {
        let mut config = small_config();
        config.run.end_date = NaiveDate::from_ymd_opt(2022, 12, 31).unwrap();
        config.customers.targets = vec![
            YearTarget { year: 2021, active: 1000 },
            YearTarget { year: 2022, active: 0 },
        ];
        let master = MasterData::reference().unwrap();
        let registry = build_until(&config, &master, tables::CLUSTER, 11);
        let pools = build_pools(&registry, &master, &config).unwrap();

        let run = |seed| simulate(&mut rng(seed), &pools, &config).unwrap();
        let a = run(5);
        let b = run(5);
        let year = a.summaries()[1];
        assert_eq!(year, b.summaries()[1]);
        assert_eq!(year.eligible, 1000);
        assert_eq!(year.created, 0);
        assert!(year.churned > 10 && year.churned < 100, "churned {}", year.churned);
        assert_eq!(year.active, 1000 - year.churned);
        assert_eq!(a.customers(), b.customers());
    }

    #[test]
    fn test_new_customers_respect_bounds_and_year() {
        let config = small_config();
        let master = MasterData::reference().unwrap();
        let registry = build_until(&config, &master, tables::CLUSTER, 11);
        let pools = build_pools(&registry, &master, &config).unwrap();
        let population = simulate(&mut rng(8), &pools, &config).unwrap();
        let b = &config.customers.bounds;
        for c in population.customers() {
            assert!(c.lat >= b.lat_min && c.lat < b.lat_max);
            assert!(c.lon >= b.lon_min && c.lon < b.lon_max);
            assert_eq!(chrono::Datelike::year(&c.created), c.creation_year);
            assert!(chrono::Datelike::day(&c.created) <= 28);
        }
    }

    #[test]
    fn test_premium_segments_use_high_priority_clusters() {
        let config = small_config();
        let master = MasterData::reference().unwrap();
        let registry = build_until(&config, &master, tables::CLUSTER, 11);
        let pools = build_pools(&registry, &master, &config).unwrap();
        let population = simulate(&mut rng(13), &pools, &config).unwrap();

        let mut ranked: Vec<(i64, i64)> = master.clusters.iter().map(|c| (c.priority, c.id)).collect();
        ranked.sort();
        let high = [ranked[0].1, ranked[1].1];
        for c in population.customers() {
            assert_eq!(high.contains(&c.cluster), c.segment.is_premium());
        }
    }

    #[test]
    fn test_channel_without_segment_weights_fails() {
        let config = small_config();
        let mut master = MasterData::reference().unwrap();
        let registry = build_until(&config, &master, tables::CLUSTER, 1);
        master.channels[2].segment_weights.clear();
        let err = build_pools(&registry, &master, &config).err().unwrap();
        assert!(matches!(err, DistSimError::EmptyPool { .. }));
    }

    #[test]
    fn test_fewer_than_two_clusters_fails() {
        let config = small_config();
        let mut master = MasterData::reference().unwrap();
        master.clusters.truncate(1);
        let registry = build_until(&config, &master, tables::CLUSTER, 1);
        let err = build_pools(&registry, &master, &config).err().unwrap();
        assert!(matches!(err, DistSimError::EmptyPool { .. }));
    }

    #[test]
    fn test_table_rows() {
        let config = small_config();
        let master = MasterData::reference().unwrap();
        let registry = build_until(&config, &master, tables::CLIENTE, 2);
        let customers = registry.get(tables::CLIENTE).unwrap();
        assert!(customers.conforms_to(&schema()));
        assert_eq!(customers.row(0).unwrap().str(col::ID).unwrap(), "CLI-000001");
        let active = customers.rows().filter(|r| r.bool(col::ACTIVO).unwrap()).count();
        assert!(active as u64 >= config.target_for(2023));
    }
}
