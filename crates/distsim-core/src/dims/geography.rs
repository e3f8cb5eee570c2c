//! DimGeografia: provinces with normalized commercial weight, density and a
//! sampled socioeconomic level.

use indexmap::IndexMap;
use rand::rngs::StdRng;

use crate::columns::{geografia as col, tables};
use crate::error::{DistSimError, Result};
use crate::geo::round_to;
use crate::master::MasterData;
use crate::orchestrate::{GenContext, GeneratorSpec, Inputs};
use crate::row;
use crate::table::conform::Defaults;
use crate::table::schema::{SchemaSpec, SemanticType::*};
use crate::table::Table;
use crate::weights::{normalize, validate, WeightedSampler, VALIDATE_TOLERANCE};

pub const SPEC: GeneratorSpec = GeneratorSpec {
    table: tables::GEOGRAFIA,
    depends_on: &[],
    schema,
    defaults: Defaults::new,
    generate,
};

pub fn schema() -> SchemaSpec {
    SchemaSpec::new()
        .column(col::ID, Text)
        .column(col::NOMBRE, Text)
        .column(col::REGION, Categorical)
        .column(col::POBLACION, Int32)
        .column(col::DENSIDAD, Float32)
        .column(col::LATITUD, Float64)
        .column(col::LONGITUD, Float64)
        .column(col::PESO, Float64)
        .column(col::NIVEL_SOCIOECONOMICO, Categorical)
        .column(col::ACTIVO, Boolean)
}

/// One socioeconomic sampler per region, plus the fallback region's key.
fn socioeconomic_samplers(
    master: &MasterData,
) -> Result<(IndexMap<&str, WeightedSampler<String>>, &str)> {
    let socio = &master.socioeconomic;
    let mut samplers = IndexMap::new();
    for (region, weights) in &socio.regions {
        let pairs = weights
            .iter()
            .map(|(level, weight)| (level.clone(), *weight))
            .collect();
        let entity = format!("socioeconomic levels of {}", region);
        samplers.insert(region.as_str(), WeightedSampler::new(&entity, pairs)?);
    }
    Ok((samplers, socio.fallback_region.as_str()))
}

fn generate(ctx: &GenContext<'_>, _inputs: &Inputs<'_>, rng: &mut StdRng) -> Result<Table> {
    let provinces = &ctx.master.provinces;
    let raw: Vec<f64> = provinces.iter().map(|p| p.weight).collect();
    let normalized = normalize("provinces", &raw, ctx.config.run.weight_tolerance)?;
    validate("provinces", &normalized, VALIDATE_TOLERANCE);
    let (samplers, fallback) = socioeconomic_samplers(ctx.master)?;

    let rows = provinces
        .iter()
        .zip(normalized)
        .map(|(province, weight)| {
            let sampler = samplers
                .get(province.region.as_str())
                .or_else(|| samplers.get(fallback))
                .ok_or_else(|| DistSimError::MasterData {
                    message: format!("no socioeconomic weights for region '{}'", province.region),
                })?;
            Ok(row! {
                col::ID => province.id.clone(),
                col::NOMBRE => province.name.clone(),
                col::REGION => province.region.clone(),
                col::POBLACION => province.population,
                col::DENSIDAD => round_to(province.population as f64 / province.area_km2, 1),
                col::LATITUD => province.lat,
                col::LONGITUD => province.lon,
                col::PESO => weight,
                col::NIVEL_SOCIOECONOMICO => sampler.sample(rng).clone(),
                col::ACTIVO => true,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(Table::from_rows(tables::GEOGRAFIA, rows))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dims::testing::{build_until, small_config};

    #[test]
    fn test_geography_weights_sum_to_one() {
        let master = MasterData::reference().unwrap();
        let registry = build_until(&small_config(), &master, tables::GEOGRAFIA, 3);
        let table = registry.get(tables::GEOGRAFIA).unwrap();

        assert_eq!(table.num_rows(), master.provinces.len());
        assert!(table.conforms_to(&schema()));
        let total: f64 = table.rows().map(|r| r.float(col::PESO).unwrap()).sum();
        assert!((total - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_levels_come_from_region_table() {
        let master = MasterData::reference().unwrap();
        let registry = build_until(&small_config(), &master, tables::GEOGRAFIA, 5);
        let table = registry.get(tables::GEOGRAFIA).unwrap();
        for row in table.rows() {
            let level = row.str(col::NIVEL_SOCIOECONOMICO).unwrap();
            assert!(master.socioeconomic.levels.iter().any(|l| l == level), "{level}");
            assert!(row.bool(col::ACTIVO).unwrap());
        }
    }

    #[test]
    fn test_density_rounded_to_one_decimal() {
        let master = MasterData::reference().unwrap();
        let registry = build_until(&small_config(), &master, tables::GEOGRAFIA, 1);
        let first = registry.get(tables::GEOGRAFIA).unwrap().row(0).unwrap();
        let p = &master.provinces[0];
        let expected = round_to(p.population as f64 / p.area_km2, 1) as f32 as f64;
        assert_eq!(first.float(col::DENSIDAD).unwrap(), expected);
    }

    #[test]
    fn test_zero_province_weights_fail() {
        let mut master = MasterData::reference().unwrap();
        for p in &mut master.provinces {
            p.weight = 0.0;
        }
        let config = small_config();
        let ctx = GenContext { config: &config, master: &master };
        let registry = crate::orchestrate::Registry::new();
        let inputs = Inputs::new(tables::GEOGRAFIA, &[], &registry);
        let err = generate(&ctx, &inputs, &mut crate::dims::testing::rng(1)).unwrap_err();
        assert!(matches!(err, DistSimError::ZeroWeightSum { .. }));
    }

    #[test]
    fn test_off_scale_weights_warn_once_and_validate() {
        let mut master = MasterData::reference().unwrap();
        for p in &mut master.provinces {
            p.weight *= 2.0;
        }
        let config = small_config();
        let ctx = GenContext { config: &config, master: &master };
        let registry = crate::orchestrate::Registry::new();
        let inputs = Inputs::new(tables::GEOGRAFIA, &[], &registry);
        let mut rng = crate::dims::testing::rng(2);
        let (table, warnings) =
            crate::dims::testing::count_warnings(|| generate(&ctx, &inputs, &mut rng).unwrap());
        // One warning from renormalizing; the normalized weights validate cleanly.
        assert_eq!(warnings, 1);
        let weights: Vec<f64> = table.rows().map(|r| r.float(col::PESO).unwrap()).collect();
        assert!(validate("provinces", &weights, VALIDATE_TOLERANCE));
    }
}
