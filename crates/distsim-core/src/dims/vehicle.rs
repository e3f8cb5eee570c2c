//! DimVehiculo: the delivery fleet, sized and mixed per center type.

use chrono::Datelike;
use rand::rngs::StdRng;
use rand::Rng;

use crate::columns::{cedis, status, tables, vehiculo as col};
use crate::dims::facilities::is_principal;
use crate::dims::pick;
use crate::error::Result;
use crate::geo::round_to;
use crate::master::VehicleModel;
use crate::orchestrate::{GenContext, GeneratorSpec, Inputs};
use crate::row;
use crate::table::conform::Defaults;
use crate::table::schema::{SchemaSpec, SemanticType::*};
use crate::table::Table;
use crate::weights::WeightedSampler;

pub const SPEC: GeneratorSpec = GeneratorSpec {
    table: tables::VEHICULO,
    depends_on: &[tables::CEDIS],
    schema,
    defaults: Defaults::new,
    generate,
};

const PLATE_LETTERS: [char; 5] = ['A', 'B', 'C', 'D', 'L'];
const KM_PER_YEAR: i64 = 20_000;

pub fn schema() -> SchemaSpec {
    SchemaSpec::new()
        .column(col::ID, Text)
        .column(col::CEDI_ID, Text)
        .column(col::PLACA, Text)
        .column(col::MODELO, Text)
        .column(col::TIPO, Categorical)
        .column(col::CAPACIDAD_TON, Float32)
        .column(col::CAPACIDAD_M3, Float32)
        .column(col::RENDIMIENTO, Float32)
        .column(col::COSTO_DIARIO, Float64)
        .column(col::USO, Categorical)
        .column(col::ANIO, Int16)
        .column(col::KILOMETRAJE, Int32)
        .column(col::ESTADO, Categorical)
        .column(col::GPS, Boolean)
        .column(col::VALOR, Float64)
        .column(col::DEPRECIACION, Float32)
}

/// Fleet size for one center.
pub fn fleet_size<R: Rng + ?Sized>(rng: &mut R, principal: bool) -> usize {
    if principal {
        rng.random_range(30..=45)
    } else {
        rng.random_range(15..=20)
    }
}

/// Odometer reading for a vehicle built in `year`, seen from `as_of_year`.
pub fn mileage<R: Rng + ?Sized>(rng: &mut R, year: i32, as_of_year: i32) -> i64 {
    let base = (as_of_year - year) as i64 * KM_PER_YEAR;
    let lo = (base - 10_000).max(1_000);
    let hi = (base + 30_000).max(lo + 1);
    rng.random_range(lo..hi)
}

fn generate(ctx: &GenContext<'_>, inputs: &Inputs<'_>, rng: &mut StdRng) -> Result<Table> {
    let centers = inputs.get(tables::CEDIS)?;
    let models = &ctx.master.vehicle_models;

    let principal_mix = WeightedSampler::new(
        "principal fleet mix",
        models.iter().map(|m| (m, m.principal_weight)).collect(),
    )?;
    let regional_mix = WeightedSampler::new(
        "regional fleet mix",
        models.iter().map(|m| (m, m.regional_weight)).collect(),
    )?;
    let statuses = WeightedSampler::new(
        "vehicle status",
        vec![
            (status::OPERATIVO, 0.85),
            (status::EN_TALLER, 0.12),
            (status::BAJA, 0.03),
        ],
    )?;
    let as_of_year = ctx.config.run.end_date.year();

    let mut rows = Vec::new();
    for center in centers.rows() {
        let center_id = center.str(cedis::ID)?;
        let principal = is_principal(center_id, center.str(cedis::TIPO)?);
        let mix = if principal { &principal_mix } else { &regional_mix };

        for _ in 0..fleet_size(rng, principal) {
            let model: &VehicleModel = mix.sample(rng);
            let year = rng.random_range(2015..2023);
            let letter = *pick(rng, &PLATE_LETTERS);
            let plate = format!("{}{}", letter, rng.random_range(100_000..999_999));
            let value = round_to(
                rng.random_range(model.daily_cost * 100.0..model.daily_cost * 300.0),
                2,
            );
            let id = format!("VEH-{:04}", rows.len() + 1);

            rows.push(row! {
                col::ID => id,
                col::CEDI_ID => center_id.to_string(),
                col::PLACA => plate,
                col::MODELO => model.model.clone(),
                col::TIPO => model.kind.clone(),
                col::CAPACIDAD_TON => model.capacity_ton,
                col::CAPACIDAD_M3 => model.volume_m3,
                col::RENDIMIENTO => model.km_per_liter,
                col::COSTO_DIARIO => model.daily_cost,
                col::USO => model.usage.clone(),
                col::ANIO => year,
                col::KILOMETRAJE => mileage(rng, year, as_of_year),
                col::ESTADO => *statuses.sample(rng),
                col::GPS => rng.random_bool(2.0 / 3.0),
                col::VALOR => value,
                col::DEPRECIACION => model.depreciation,
            });
        }
    }

    Ok(Table::from_rows(tables::VEHICULO, rows))
}
