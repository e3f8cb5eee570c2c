//! DimRuta: delivery routes out of each distribution center.
//!
//! For every center the engine gathers its destinations (geographies in the
//! center's region), its operational vehicles and its active agents, sizes
//! the route set from fleet size and warehouse capacity, then draws each
//! route's destination, vehicle and agent uniformly with replacement.
//! Distance is the haversine distance inflated by a road factor; the
//! resulting distance and the center's operating region decide the route
//! class and therefore the travel speed.

use rand::rngs::StdRng;
use rand::seq::index;
use rand::Rng;
use tracing::{debug, warn};

use crate::columns::{cedis, geografia, ruta as col, status, tables, vehiculo, vendedor};
use crate::config::RouteConfig;
use crate::dims::pick;
use crate::error::Result;
use crate::fakes;
use crate::geo::{round_to, GeoPoint};
use crate::orchestrate::{GenContext, GeneratorSpec, Inputs};
use crate::row;
use crate::table::conform::Defaults;
use crate::table::schema::{SchemaSpec, SemanticType::*};
use crate::table::{Row, RowRef, Table};
use crate::weights::WeightedSampler;

pub const SPEC: GeneratorSpec = GeneratorSpec {
    table: tables::RUTA,
    depends_on: &[tables::CEDIS, tables::GEOGRAFIA, tables::VEHICULO, tables::VENDEDOR],
    schema,
    defaults: Defaults::new,
    generate,
};

const DAILY_PATTERN: &str = "L-M-M-J-V-S";
const ALTERNATE_PATTERNS: [&str; 3] = ["L-M-V", "M-J-S", "L-X-V"];
const WEEKLY_DAYS: [&str; 5] = ["Lunes", "Martes", "Miércoles", "Jueves", "Viernes"];
const TOLLS: [(f64, f64); 5] = [(0.0, 0.4), (0.0, 0.2), (50.0, 0.2), (100.0, 0.1), (200.0, 0.1)];

pub fn schema() -> SchemaSpec {
    SchemaSpec::new()
        .column(col::ID, Text)
        .column(col::NOMBRE, Text)
        .column(col::CEDI_ID, Text)
        .column(col::CEDI_NOMBRE, Text)
        .column(col::PROVINCIA_ID, Text)
        .column(col::PROVINCIA_NOMBRE, Text)
        .column(col::ZONA, Text)
        .column(col::VEHICULO_ID, Text)
        .column(col::VEHICULO_MODELO, Text)
        .column(col::VENDEDOR_ID, Text)
        .column(col::VENDEDOR_NOMBRE, Text)
        .column(col::VENDEDOR_TIPO, Categorical)
        .column(col::DISTANCIA, Float32)
        .column(col::TIEMPO, Float32)
        .column(col::PEAJE, Float32)
        .column(col::FRECUENCIA, Categorical)
        .column(col::DIAS, Text)
        .column(col::TIPO_GEOGRAFICO, Categorical)
        .column(col::ESTADO, Categorical)
}

/// Geographic class of a route, which fixes its average speed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteClass {
    DenseUrban,
    Urban,
    Interurban,
    Highway,
}

impl RouteClass {
    /// Classify by road distance and whether the origin center operates in a
    /// dense region.
    pub fn classify(distance_km: f64, dense_region: bool) -> Self {
        if distance_km < 25.0 && dense_region {
            RouteClass::DenseUrban
        } else if distance_km < 50.0 {
            RouteClass::Urban
        } else if distance_km < 150.0 {
            RouteClass::Interurban
        } else {
            RouteClass::Highway
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            RouteClass::DenseUrban => "Urbana Densa",
            RouteClass::Urban => "Urbana Estándar",
            RouteClass::Interurban => "Interurbana Regular",
            RouteClass::Highway => "Autopista",
        }
    }

    /// Average speed in km/h.
    pub fn speed_kmh(self) -> f64 {
        match self {
            RouteClass::DenseUrban => 20.0,
            RouteClass::Urban => 30.0,
            RouteClass::Interurban => 50.0,
            RouteClass::Highway => 70.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Frequency {
    Daily,
    Alternate,
    Weekly,
}

impl Frequency {
    pub fn label(self) -> &'static str {
        match self {
            Frequency::Daily => "Diaria (L-S)",
            Frequency::Alternate => "Interdiaria (L-M-X)",
            Frequency::Weekly => "Semanal (1 día)",
        }
    }

    /// Operating-day pattern for one route.
    pub fn days<R: Rng + ?Sized>(self, rng: &mut R) -> &'static str {
        match self {
            Frequency::Daily => DAILY_PATTERN,
            Frequency::Alternate => *pick(rng, &ALTERNATE_PATTERNS),
            Frequency::Weekly => *pick(rng, &WEEKLY_DAYS),
        }
    }
}

/// Number of routes for a center with `vehicles` operational vehicles and
/// the given pallet capacity.
pub fn route_count(vehicles: usize, capacity: Option<i64>, cfg: &RouteConfig) -> usize {
    let floor = cfg.min_routes as usize;
    let ceiling = match capacity {
        Some(pallets) => {
            let per_route = cfg.pallets_per_route.max(1) as i64;
            ((pallets.max(0) / per_route) as usize).max(floor)
        }
        None => cfg.unknown_capacity_ceiling as usize,
    };
    (vehicles * cfg.fan_out as usize).min(ceiling).max(floor)
}

/// Road distance between two points: geodesic distance times a random road
/// factor, floored and rounded to two decimals.
pub fn road_distance<R: Rng + ?Sized>(rng: &mut R, from: &GeoPoint, to: &GeoPoint, cfg: &RouteConfig) -> f64 {
    let factor = if cfg.road_factor_max > cfg.road_factor_min {
        rng.random_range(cfg.road_factor_min..cfg.road_factor_max)
    } else {
        cfg.road_factor_min
    };
    round_to((from.distance_km(to) * factor).max(cfg.min_distance_km), 2)
}

struct Destination<'a> {
    id: &'a str,
    name: &'a str,
    point: GeoPoint,
}

struct Vehicle<'a> {
    id: &'a str,
    model: &'a str,
}

struct Agent<'a> {
    id: &'a str,
    name: &'a str,
    kind: &'a str,
}

/// Input tables of the route engine.
pub struct RouteInputs<'a> {
    pub centers: &'a Table,
    pub geography: &'a Table,
    pub vehicles: &'a Table,
    pub agents: &'a Table,
}

/// Shared samplers for frequency and toll draws.
struct Draws {
    frequency: WeightedSampler<Frequency>,
    toll: WeightedSampler<f64>,
}

impl Draws {
    fn new(cfg: &RouteConfig) -> Result<Self> {
        let [daily, alternate, weekly] = cfg.frequency_weights;
        Ok(Self {
            frequency: WeightedSampler::new(
                "route frequency",
                vec![
                    (Frequency::Daily, daily),
                    (Frequency::Alternate, alternate),
                    (Frequency::Weekly, weekly),
                ],
            )?,
            toll: WeightedSampler::new("route toll", TOLLS.to_vec())?,
        })
    }
}

/// Build every route row, center by center in table order.
pub fn plan_routes<R: Rng + ?Sized>(rng: &mut R, inputs: &RouteInputs<'_>, cfg: &RouteConfig) -> Result<Vec<Row>> {
    let mut geographies = Vec::with_capacity(inputs.geography.num_rows());
    for row in inputs.geography.rows() {
        geographies.push((
            row.str(geografia::REGION)?,
            Destination {
                id: row.str(geografia::ID)?,
                name: row.str(geografia::NOMBRE)?,
                point: GeoPoint::new(row.float(geografia::LATITUD)?, row.float(geografia::LONGITUD)?),
            },
        ));
    }
    let draws = Draws::new(cfg)?;

    let mut rows = Vec::new();
    for center in inputs.centers.rows() {
        let center_id = center.str(cedis::ID)?;
        let region = center.str(cedis::REGION)?;
        let dense = cfg.dense_regions.iter().any(|r| r == region);

        let destinations = destinations_for(rng, &geographies, center_id, region, cfg);
        if destinations.is_empty() {
            warn!(center = center_id, "no destinations available, skipping center");
            continue;
        }

        let vehicles = vehicle_pool(inputs.vehicles, center_id)?;
        let agents = agent_pool(inputs.agents, center_id)?;
        if vehicles.is_empty() || agents.is_empty() {
            warn!(
                center = center_id,
                vehicles = vehicles.len(),
                agents = agents.len(),
                "no operational vehicles or active agents, skipping center"
            );
            continue;
        }

        let capacity = center.opt_int(cedis::CAPACIDAD_PALLETS)?;
        let count = route_count(vehicles.len(), capacity, cfg);
        debug!(center = center_id, routes = count, vehicles = vehicles.len(), agents = agents.len(), "planning routes");

        let origin = GeoPoint::new(center.float(cedis::LATITUD)?, center.float(cedis::LONGITUD)?);
        let prefix: String = region.chars().take(3).collect::<String>().to_uppercase();
        let center_name = center.str(cedis::NOMBRE)?;

        for _ in 0..count {
            let number = rows.len() + 1;
            let dest = *pick(rng, &destinations);
            let vehicle = pick(rng, &vehicles);
            let agent = pick(rng, &agents);

            let distance = road_distance(rng, &origin, &dest.point, cfg);
            let class = RouteClass::classify(distance, dense);
            let frequency = *draws.frequency.sample(rng);
            let days = frequency.days(rng);
            let toll = *draws.toll.sample(rng);

            rows.push(row! {
                col::ID => format!("RUT-{:05}", number),
                col::NOMBRE => format!("Ruta {}-{:04}-{}", prefix, number, dest.name),
                col::CEDI_ID => center_id.to_string(),
                col::CEDI_NOMBRE => center_name.to_string(),
                col::PROVINCIA_ID => dest.id.to_string(),
                col::PROVINCIA_NOMBRE => dest.name.to_string(),
                col::ZONA => fakes::zone(rng),
                col::VEHICULO_ID => vehicle.id.to_string(),
                col::VEHICULO_MODELO => vehicle.model.to_string(),
                col::VENDEDOR_ID => agent.id.to_string(),
                col::VENDEDOR_NOMBRE => agent.name.to_string(),
                col::VENDEDOR_TIPO => agent.kind.to_string(),
                col::DISTANCIA => distance,
                col::TIEMPO => round_to(distance / class.speed_kmh(), 2),
                col::PEAJE => toll,
                col::FRECUENCIA => frequency.label(),
                col::DIAS => days,
                col::TIPO_GEOGRAFICO => class.label(),
                col::ESTADO => status::RUTA_ACTIVA,
            });
        }
    }
    Ok(rows)
}

/// Geographies in the center's region, or a small random sample of all
/// geographies when the region has none.
fn destinations_for<'g, 'a, R: Rng + ?Sized>(
    rng: &mut R,
    geographies: &'g [(&'a str, Destination<'a>)],
    center: &str,
    region: &str,
    cfg: &RouteConfig,
) -> Vec<&'g Destination<'a>> {
    let local: Vec<_> = geographies
        .iter()
        .filter(|(r, _)| *r == region)
        .map(|(_, d)| d)
        .collect();
    if !local.is_empty() {
        return local;
    }

    let amount = cfg.fallback_sample.min(geographies.len());
    warn!(center, region, sampled = amount, "no geographies in center region, sampling destinations");
    index::sample(rng, geographies.len(), amount)
        .into_iter()
        .map(|i| &geographies[i].1)
        .collect()
}

fn vehicle_pool<'a>(vehicles: &'a Table, center: &str) -> Result<Vec<Vehicle<'a>>> {
    let mut pool = Vec::new();
    for row in vehicles.rows() {
        if row.str(vehiculo::CEDI_ID)? == center && row.str(vehiculo::ESTADO)? == status::OPERATIVO {
            pool.push(Vehicle {
                id: row.str(vehiculo::ID)?,
                model: row.str(vehiculo::MODELO)?,
            });
        }
    }
    Ok(pool)
}

fn agent_pool<'a>(agents: &'a Table, center: &str) -> Result<Vec<Agent<'a>>> {
    let mut pool = Vec::new();
    for row in agents.rows() {
        if agent_serves(&row, center)? {
            pool.push(Agent {
                id: row.str(vendedor::ID)?,
                name: row.str(vendedor::NOMBRE)?,
                kind: row.str(vendedor::TIPO)?,
            });
        }
    }
    Ok(pool)
}

fn agent_serves(row: &RowRef<'_>, center: &str) -> Result<bool> {
    Ok(row.str(vendedor::CEDI_ID)? == center && row.str(vendedor::ESTADO)? == status::ACTIVO)
}

fn generate(ctx: &GenContext<'_>, inputs: &Inputs<'_>, rng: &mut StdRng) -> Result<Table> {
    let route_inputs = RouteInputs {
        centers: inputs.get(tables::CEDIS)?,
        geography: inputs.get(tables::GEOGRAFIA)?,
        vehicles: inputs.get(tables::VEHICULO)?,
        agents: inputs.get(tables::VENDEDOR)?,
    };
    let rows = plan_routes(rng, &route_inputs, &ctx.config.routes)?;
    Ok(Table::from_rows(tables::RUTA, rows))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dims::testing::{build_until, count_warnings, rng, small_config};
    use crate::master::MasterData;
    use std::collections::{HashMap, HashSet};

    fn center(id: &'static str, region: &'static str, lat: f64, lon: f64) -> Row {
        row! {
            cedis::ID => id,
            cedis::NOMBRE => format!("CEDI {id}"),
            cedis::REGION => region,
            cedis::LATITUD => lat,
            cedis::LONGITUD => lon,
            cedis::CAPACIDAD_PALLETS => 600i64,
        }
    }

    fn province(id: &'static str, region: &'static str, lat: f64, lon: f64) -> Row {
        row! {
            geografia::ID => id,
            geografia::NOMBRE => format!("Provincia {id}"),
            geografia::REGION => region,
            geografia::LATITUD => lat,
            geografia::LONGITUD => lon,
        }
    }

    fn truck(id: &'static str, center: &'static str, state: &'static str) -> Row {
        row! {
            vehiculo::ID => id,
            vehiculo::CEDI_ID => center,
            vehiculo::ESTADO => state,
            vehiculo::MODELO => "Isuzu NPR",
        }
    }

    fn seller(id: &'static str, center: &'static str, state: &'static str) -> Row {
        row! {
            vendedor::ID => id,
            vendedor::NOMBRE => format!("Vendedor {id}"),
            vendedor::TIPO => "Preventista",
            vendedor::CEDI_ID => center,
            vendedor::ESTADO => state,
        }
    }

    struct Fixture {
        centers: Table,
        geography: Table,
        vehicles: Table,
        agents: Table,
    }

    impl Fixture {
        fn new(centers: Vec<Row>, geography: Vec<Row>, vehicles: Vec<Row>, agents: Vec<Row>) -> Self {
            Self {
                centers: Table::from_rows(tables::CEDIS, centers),
                geography: Table::from_rows(tables::GEOGRAFIA, geography),
                vehicles: Table::from_rows(tables::VEHICULO, vehicles),
                agents: Table::from_rows(tables::VENDEDOR, agents),
            }
        }

        fn plan(&self, seed: u64, cfg: &RouteConfig) -> (Table, usize) {
            let inputs = RouteInputs {
                centers: &self.centers,
                geography: &self.geography,
                vehicles: &self.vehicles,
                agents: &self.agents,
            };
            let mut rng = rng(seed);
            let (rows, warnings) = count_warnings(|| plan_routes(&mut rng, &inputs, cfg).unwrap());
            (Table::from_rows(tables::RUTA, rows), warnings)
        }
    }

    fn classes(routes: &Table) -> HashSet<&str> {
        routes.rows().map(|r| r.str(col::TIPO_GEOGRAFICO).unwrap()).collect()
    }

    #[test]
    fn test_route_count_bounds() {
        let cfg = RouteConfig::default();
        // 10 vehicles, fan-out 2: never more than 20, never fewer than 10.
        for capacity in [None, Some(0), Some(100), Some(600), Some(2_000), Some(45_000)] {
            let n = route_count(10, capacity, &cfg);
            assert!((10..=20).contains(&n), "capacity {capacity:?}: {n}");
        }
        assert_eq!(route_count(10, Some(2_000), &cfg), 20);
        assert_eq!(route_count(10, Some(600), &cfg), 12);
        assert_eq!(route_count(1, None, &cfg), 10);
    }

    #[test]
    fn test_unknown_capacity_uses_ceiling() {
        let cfg = RouteConfig {
            unknown_capacity_ceiling: 15,
            ..RouteConfig::default()
        };
        assert_eq!(route_count(40, None, &cfg), 15);
    }

    #[test]
    fn test_classification() {
        assert_eq!(RouteClass::classify(10.0, true), RouteClass::DenseUrban);
        assert_eq!(RouteClass::classify(10.0, false), RouteClass::Urban);
        assert_eq!(RouteClass::classify(30.0, true), RouteClass::Urban);
        assert_eq!(RouteClass::classify(149.99, false), RouteClass::Interurban);
        assert_eq!(RouteClass::classify(150.0, true), RouteClass::Highway);
    }

    #[test]
    fn test_long_non_dense_route_never_dense_urban() {
        let cfg = RouteConfig::default();
        let mut rng = rng(3);
        let from = GeoPoint::new(18.48, -69.94);
        // Roughly 27 km east.
        let to = GeoPoint::new(18.48, -69.68);
        assert!(from.distance_km(&to) > 25.0);
        for _ in 0..100 {
            let distance = road_distance(&mut rng, &from, &to, &cfg);
            assert_ne!(RouteClass::classify(distance, false), RouteClass::DenseUrban);
        }
    }

    #[test]
    fn test_road_distance_floor_and_factor() {
        let cfg = RouteConfig::default();
        let mut rng = rng(4);
        let p = GeoPoint::new(18.48, -69.94);
        assert_eq!(road_distance(&mut rng, &p, &p, &cfg), 5.0);

        let q = GeoPoint::new(19.45, -70.69);
        let geodesic = p.distance_km(&q);
        for _ in 0..50 {
            let d = road_distance(&mut rng, &p, &q, &cfg);
            assert!(d >= geodesic * 1.3 - 0.01 && d <= geodesic * 1.6 + 0.01);
        }
    }

    #[test]
    fn test_routes_use_origin_center_resources() {
        let master = MasterData::reference().unwrap();
        let registry = build_until(&small_config(), &master, tables::RUTA, 7);
        let routes = registry.get(tables::RUTA).unwrap();
        assert!(routes.conforms_to(&schema()));
        assert!(routes.num_rows() > 0);

        let vehicle_home: HashMap<&str, (&str, &str)> = registry
            .get(tables::VEHICULO)
            .unwrap()
            .rows()
            .map(|r| {
                (
                    r.str(vehiculo::ID).unwrap(),
                    (r.str(vehiculo::CEDI_ID).unwrap(), r.str(vehiculo::ESTADO).unwrap()),
                )
            })
            .collect();
        let agent_home: HashMap<&str, &str> = registry
            .get(tables::VENDEDOR)
            .unwrap()
            .rows()
            .map(|r| (r.str(vendedor::ID).unwrap(), r.str(vendedor::CEDI_ID).unwrap()))
            .collect();

        for route in routes.rows() {
            let origin = route.str(col::CEDI_ID).unwrap();
            let (home, state) = vehicle_home[route.str(col::VEHICULO_ID).unwrap()];
            assert_eq!(home, origin);
            assert_eq!(state, status::OPERATIVO);
            assert_eq!(agent_home[route.str(col::VENDEDOR_ID).unwrap()], origin);
        }
    }

    #[test]
    fn test_route_fields() {
        let master = MasterData::reference().unwrap();
        let registry = build_until(&small_config(), &master, tables::RUTA, 8);
        let routes = registry.get(tables::RUTA).unwrap();
        let first = routes.row(0).unwrap();
        assert_eq!(first.str(col::ID).unwrap(), "RUT-00001");
        assert!(first.str(col::NOMBRE).unwrap().starts_with("Ruta "));

        for route in routes.rows() {
            let distance = route.float(col::DISTANCIA).unwrap();
            assert!(distance >= 5.0 - 1e-4);
            let toll = route.float(col::PEAJE).unwrap();
            assert!([0.0, 50.0, 100.0, 200.0].contains(&toll));
            let days = route.str(col::DIAS).unwrap();
            match route.str(col::FRECUENCIA).unwrap() {
                "Diaria (L-S)" => assert_eq!(days, DAILY_PATTERN),
                "Interdiaria (L-M-X)" => assert!(ALTERNATE_PATTERNS.contains(&days)),
                "Semanal (1 día)" => assert!(WEEKLY_DAYS.contains(&days)),
                other => panic!("unexpected frequency {other}"),
            }
        }
    }

    #[test]
    fn test_dense_class_follows_center_region() {
        // The only province is in another region about 2.5 km away, so every
        // route takes the fallback destination and the distance floor.
        let fixture = Fixture::new(
            vec![center("CEDI-01", "Ozama", 18.48, -69.94)],
            vec![province("P-01", "Yuma", 18.50, -69.95)],
            vec![truck("VEH-0001", "CEDI-01", status::OPERATIVO)],
            vec![seller("VEN-0001", "CEDI-01", status::ACTIVO)],
        );
        let (routes, _) = fixture.plan(11, &RouteConfig::default());
        assert_eq!(routes.num_rows(), 10);
        assert_eq!(classes(&routes), HashSet::from(["Urbana Densa"]));
        for route in routes.rows() {
            assert_eq!(route.float(col::DISTANCIA).unwrap(), 5.0);
            assert_eq!(route.float(col::TIEMPO).unwrap(), 0.25);
        }
    }

    #[test]
    fn test_dense_destination_does_not_make_route_dense() {
        let fixture = Fixture::new(
            vec![center("CEDI-02", "Yuma", 18.48, -69.94)],
            vec![province("P-01", "Ozama", 18.50, -69.95)],
            vec![truck("VEH-0001", "CEDI-02", status::OPERATIVO)],
            vec![seller("VEN-0001", "CEDI-02", status::ACTIVO)],
        );
        let (routes, _) = fixture.plan(12, &RouteConfig::default());
        assert_eq!(classes(&routes), HashSet::from(["Urbana Estándar"]));
    }

    #[test]
    fn test_fallback_samples_distinct_destinations() {
        let rows = [
            ("P-01", 18.1),
            ("P-02", 18.2),
            ("P-03", 18.3),
            ("P-04", 18.4),
            ("P-05", 18.5),
        ];
        let geographies: Vec<(&str, Destination<'_>)> = rows
            .iter()
            .map(|&(id, lat)| {
                (
                    "Enriquillo",
                    Destination {
                        id,
                        name: id,
                        point: GeoPoint::new(lat, -71.0),
                    },
                )
            })
            .collect();

        let cases = [(3, 3), (5, 5), (9, 5)];
        for (seed, (sample, expected)) in cases.into_iter().enumerate() {
            let cfg = RouteConfig {
                fallback_sample: sample,
                ..RouteConfig::default()
            };
            let mut rng = rng(seed as u64);
            let (picked, warnings) =
                count_warnings(|| destinations_for(&mut rng, &geographies, "CEDI-09", "Norte", &cfg));
            let ids: HashSet<&str> = picked.iter().map(|d| d.id).collect();
            assert_eq!(picked.len(), expected, "fallback_sample {sample}");
            assert_eq!(ids.len(), expected, "fallback_sample {sample}");
            assert!(ids.iter().all(|id| rows.iter().any(|(r, _)| r == id)));
            assert_eq!(warnings, 1);
        }

        let mut rng = rng(9);
        let (local, warnings) = count_warnings(|| {
            destinations_for(&mut rng, &geographies, "CEDI-09", "Enriquillo", &RouteConfig::default())
        });
        assert_eq!(local.len(), 5);
        assert_eq!(warnings, 0);
    }

    #[test]
    fn test_center_without_resources_is_skipped() {
        let fixture = Fixture::new(
            vec![
                center("CEDI-A", "Ozama", 18.48, -69.94),
                center("CEDI-B", "Ozama", 18.47, -69.90),
                center("CEDI-C", "Ozama", 18.46, -69.88),
            ],
            vec![
                province("P-01", "Ozama", 18.50, -69.95),
                province("P-02", "Ozama", 18.55, -69.80),
            ],
            vec![
                truck("VEH-0001", "CEDI-A", status::EN_TALLER),
                truck("VEH-0002", "CEDI-B", status::OPERATIVO),
                truck("VEH-0003", "CEDI-C", status::OPERATIVO),
            ],
            vec![
                seller("VEN-0001", "CEDI-A", status::ACTIVO),
                seller("VEN-0002", "CEDI-B", status::ACTIVO),
                seller("VEN-0003", "CEDI-C", "Inactivo"),
            ],
        );
        let (routes, warnings) = fixture.plan(13, &RouteConfig::default());
        assert_eq!(warnings, 2);
        assert_eq!(routes.num_rows(), 10);
        assert!(routes.rows().all(|r| r.str(col::CEDI_ID).unwrap() == "CEDI-B"));
        assert_eq!(routes.row(0).unwrap().str(col::ID).unwrap(), "RUT-00001");
    }
}
