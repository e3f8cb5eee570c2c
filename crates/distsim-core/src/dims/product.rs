//! DimProducto: the SKU catalogue with normalized sales weight, reporting
//! category, excise flags and a per-category seasonality factor.

use rand::rngs::StdRng;
use tracing::debug;

use crate::columns::{producto as col, tables};
use crate::error::Result;
use crate::master::MasterData;
use crate::orchestrate::{GenContext, GeneratorSpec, Inputs};
use crate::row;
use crate::table::conform::Defaults;
use crate::table::schema::{SchemaSpec, SemanticType::*};
use crate::table::Table;
use crate::weights::{normalize, validate, VALIDATE_TOLERANCE};

pub const SPEC: GeneratorSpec = GeneratorSpec {
    table: tables::PRODUCTO,
    depends_on: &[],
    schema,
    defaults: Defaults::new,
    generate,
};

/// Reporting category of products whose category has no mapping.
pub const OTHER_CATEGORY: &str = "Otros";

pub fn schema() -> SchemaSpec {
    SchemaSpec::new()
        .column(col::ID, Text)
        .column(col::NOMBRE, Text)
        .column(col::MARCA, Categorical)
        .column(col::SABOR, Text)
        .column(col::CATEGORIA, Categorical)
        .column(col::CATEGORIA_GLOBAL, Categorical)
        .column(col::VOLUMEN, Float32)
        .column(col::ENVASE, Categorical)
        .column(col::UNIDADES_CAJA, Int16)
        .column(col::PRECIO, Float32)
        .column(col::COSTO, Float32)
        .column(col::PESO, Float32)
        .column(col::APLICA_ISC, Boolean)
        .column(col::TASA_ISC, Float32)
        .column(col::FACTOR_ESTACIONALIDAD, Float32)
        .column(col::ACTIVO, Boolean)
        .column(col::PESO_NORMALIZADO, Float64)
}

/// Reporting category, excise rate and seasonality factor of one product.
#[derive(Debug, Clone, PartialEq)]
pub struct Classification<'a> {
    pub global: &'a str,
    pub excise: Option<f64>,
    pub seasonality: f64,
}

pub fn classify<'a>(master: &'a MasterData, category: &str, brand: &str) -> Classification<'a> {
    match master.product_categories.get(category) {
        Some(mapping) => Classification {
            global: mapping.global.as_str(),
            excise: master.excise_rate(brand, &mapping.tax_class),
            seasonality: mapping.seasonality,
        },
        None => {
            debug!(category, "product category has no mapping");
            Classification {
                global: OTHER_CATEGORY,
                excise: None,
                seasonality: 1.0,
            }
        }
    }
}

fn generate(ctx: &GenContext<'_>, _inputs: &Inputs<'_>, _rng: &mut StdRng) -> Result<Table> {
    let products = &ctx.master.products;
    let raw: Vec<f64> = products.iter().map(|p| p.sales_weight).collect();
    let normalized = normalize("products", &raw, ctx.config.run.weight_tolerance)?;
    validate("products", &normalized, VALIDATE_TOLERANCE);

    let rows = products
        .iter()
        .zip(normalized)
        .map(|(product, weight)| {
            let class = classify(ctx.master, &product.category, &product.brand);
            row! {
                col::ID => product.sku.clone(),
                col::NOMBRE => product.name.clone(),
                col::MARCA => product.brand.to_uppercase(),
                col::SABOR => product.flavor.clone(),
                col::CATEGORIA => product.category.clone(),
                col::CATEGORIA_GLOBAL => class.global.to_string(),
                col::VOLUMEN => product.liters,
                col::ENVASE => product.package.clone(),
                col::UNIDADES_CAJA => product.units_per_case,
                col::PRECIO => product.list_price,
                col::COSTO => product.unit_cost,
                col::PESO => product.sales_weight,
                col::APLICA_ISC => class.excise.is_some(),
                col::TASA_ISC => class.excise.unwrap_or(0.0),
                col::FACTOR_ESTACIONALIDAD => class.seasonality,
                col::ACTIVO => true,
                col::PESO_NORMALIZADO => weight,
            }
        })
        .collect();
    Ok(Table::from_rows(tables::PRODUCTO, rows))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dims::testing::{build_until, small_config};
    use crate::error::DistSimError;
    use crate::orchestrate::Registry;

    fn products(master: &MasterData) -> Table {
        build_until(&small_config(), master, tables::PRODUCTO, 1)
            .get(tables::PRODUCTO)
            .unwrap()
            .clone()
    }

    fn by_sku<'a>(table: &'a Table, sku: &str) -> crate::table::RowRef<'a> {
        table
            .rows()
            .find(|r| r.str(col::ID).unwrap() == sku)
            .unwrap()
    }

    #[test]
    fn test_catalogue_rows_and_weights() {
        let master = MasterData::reference().unwrap();
        let table = products(&master);
        assert!(table.conforms_to(&schema()));
        assert_eq!(table.num_rows(), master.products.len());

        let total: f64 = table.rows().map(|r| r.float(col::PESO_NORMALIZADO).unwrap()).sum();
        assert!((total - 1.0).abs() < 1e-9);
        assert!(table.rows().all(|r| r.bool(col::ACTIVO).unwrap()));
    }

    #[test]
    fn test_excise_and_category_mapping() {
        let master = MasterData::reference().unwrap();
        let table = products(&master);

        let coke = by_sku(&table, "REF-CC-001");
        assert_eq!(coke.str(col::MARCA).unwrap(), "COCA-COLA");
        assert_eq!(coke.str(col::CATEGORIA_GLOBAL).unwrap(), "CSD (Gaseosas)");
        assert!(coke.bool(col::APLICA_ISC).unwrap());
        assert_eq!(coke.float(col::TASA_ISC).unwrap(), 0.10f32 as f64);
        assert_eq!(coke.float(col::FACTOR_ESTACIONALIDAD).unwrap(), 1.10f32 as f64);

        // No excise entry for water brands; falls back to false / 0.
        let water = by_sku(&table, "AGU-DS-001");
        assert!(!water.bool(col::APLICA_ISC).unwrap());
        assert_eq!(water.float(col::TASA_ISC).unwrap(), 0.0);
        assert_eq!(water.str(col::CATEGORIA_GLOBAL).unwrap(), "Agua Purificada");

        let malt = by_sku(&table, "MAL-MM-001");
        assert_eq!(malt.float(col::FACTOR_ESTACIONALIDAD).unwrap(), 1.0);
    }

    #[test]
    fn test_unmapped_category_is_other() {
        let master = MasterData::reference().unwrap();
        let class = classify(&master, "Snacks", "Coca-Cola");
        assert_eq!(
            class,
            Classification {
                global: OTHER_CATEGORY,
                excise: None,
                seasonality: 1.0,
            }
        );
    }

    #[test]
    fn test_zero_sales_weights_fail() {
        let mut master = MasterData::reference().unwrap();
        for p in &mut master.products {
            p.sales_weight = 0.0;
        }
        let config = small_config();
        let ctx = GenContext { config: &config, master: &master };
        let registry = Registry::new();
        let inputs = Inputs::new(tables::PRODUCTO, &[], &registry);
        let err = generate(&ctx, &inputs, &mut crate::dims::testing::rng(1)).unwrap_err();
        assert!(matches!(err, DistSimError::ZeroWeightSum { .. }));
    }
}
