//! Physical network: the bottling plant, its warehouse and the distribution
//! centers (one principal center attached to the plant plus the regional
//! ones listed in master data).

use rand::rngs::StdRng;
use tracing::warn;

use crate::columns::{almacen, cedis, geografia, planta, status, tables};
use crate::error::{DistSimError, Result};
use crate::orchestrate::{GenContext, GeneratorSpec, Inputs};
use crate::row;
use crate::table::conform::Defaults;
use crate::table::schema::{SchemaSpec, SemanticType::*};
use crate::table::value::Value;
use crate::table::{RowRef, Table};

pub const PLANT: GeneratorSpec = GeneratorSpec {
    table: tables::PLANTA,
    depends_on: &[],
    schema: plant_schema,
    defaults: Defaults::new,
    generate: generate_plant,
};

pub const WAREHOUSE: GeneratorSpec = GeneratorSpec {
    table: tables::ALMACEN,
    depends_on: &[tables::PLANTA],
    schema: warehouse_schema,
    defaults: Defaults::new,
    generate: generate_warehouse,
};

pub const CENTERS: GeneratorSpec = GeneratorSpec {
    table: tables::CEDIS,
    depends_on: &[tables::GEOGRAFIA, tables::PLANTA],
    schema: center_schema,
    defaults: Defaults::new,
    generate: generate_centers,
};

pub const PRINCIPAL_KIND: &str = "Principal";

/// Geography row used when a center's province is not found.
const FALLBACK_PROVINCE: usize = 0;

pub fn plant_schema() -> SchemaSpec {
    SchemaSpec::new()
        .column(planta::ID, Text)
        .column(planta::NOMBRE, Text)
        .column(planta::TIPO, Categorical)
        .column(planta::MUNICIPIO, Text)
        .column(planta::PROVINCIA, Text)
        .column(planta::LATITUD, Float64)
        .column(planta::LONGITUD, Float64)
        .column(planta::CAPACIDAD, Int32)
        .column(planta::FECHA_INICIO, Date)
        .column(planta::ESTADO, Categorical)
        .column(planta::CERTIFICACIONES, Text)
}

pub fn warehouse_schema() -> SchemaSpec {
    SchemaSpec::new()
        .column(almacen::ID, Text)
        .column(almacen::PLANTA_ID, Text)
        .column(almacen::NOMBRE, Text)
        .column(almacen::TIPO, Categorical)
        .column(almacen::CAPACIDAD_M3, Int32)
        .column(almacen::CAPACIDAD_PALLETS, Int32)
        .column(almacen::REFRIGERACION, Boolean)
        .column(almacen::LATITUD, Float64)
        .column(almacen::LONGITUD, Float64)
        .column(almacen::ESTADO, Categorical)
}

pub fn center_schema() -> SchemaSpec {
    SchemaSpec::new()
        .column(cedis::ID, Text)
        .column(cedis::NOMBRE, Text)
        .column(cedis::TIPO, Categorical)
        .column(cedis::REGION, Categorical)
        .column(cedis::PROVINCIA_ID, Text)
        .column(cedis::PLANTA_ID, Text)
        .column(cedis::LATITUD, Float64)
        .column(cedis::LONGITUD, Float64)
        .column(cedis::CAPACIDAD_PALLETS, Int32)
        .column(cedis::ESTADO, Categorical)
}

fn generate_plant(ctx: &GenContext<'_>, _inputs: &Inputs<'_>, _rng: &mut StdRng) -> Result<Table> {
    let p = &ctx.master.plant;
    let row = row! {
        planta::ID => p.id.clone(),
        planta::NOMBRE => p.name.clone(),
        planta::TIPO => p.kind.clone(),
        planta::MUNICIPIO => p.municipality.clone(),
        planta::PROVINCIA => p.province.clone(),
        planta::LATITUD => p.lat,
        planta::LONGITUD => p.lon,
        planta::CAPACIDAD => p.capacity_liters_day,
        planta::FECHA_INICIO => p.opened,
        planta::ESTADO => p.status.clone(),
        planta::CERTIFICACIONES => p.certifications.clone(),
    };
    Ok(Table::from_rows(tables::PLANTA, vec![row]))
}

/// The single plant row every facility hangs off.
fn plant_row<'a>(inputs: &Inputs<'a>) -> Result<RowRef<'a>> {
    let plants = inputs.get(tables::PLANTA)?;
    plants.row(0).ok_or_else(|| DistSimError::EmptyPool {
        table: inputs.target().to_string(),
        pool: "plants".to_string(),
    })
}

fn generate_warehouse(ctx: &GenContext<'_>, inputs: &Inputs<'_>, _rng: &mut StdRng) -> Result<Table> {
    let plant = plant_row(inputs)?;
    let w = &ctx.master.warehouse;
    let row = row! {
        almacen::ID => w.id.clone(),
        almacen::PLANTA_ID => plant.str(planta::ID)?.to_string(),
        almacen::NOMBRE => format!("Almacén Central - {}", plant.str(planta::NOMBRE)?),
        almacen::TIPO => w.kind.clone(),
        almacen::CAPACIDAD_M3 => w.capacity_m3,
        almacen::CAPACIDAD_PALLETS => w.capacity_pallets,
        almacen::REFRIGERACION => w.refrigerated,
        almacen::LATITUD => plant.float(planta::LATITUD)?,
        almacen::LONGITUD => plant.float(planta::LONGITUD)?,
        almacen::ESTADO => w.status.clone(),
    };
    Ok(Table::from_rows(tables::ALMACEN, vec![row]))
}

/// Resolve a province name to its geography row, falling back to the first
/// geography with a warning.
fn resolve_province<'a>(geography: &'a Table, center: &str, province: &str) -> Result<RowRef<'a>> {
    for row in geography.rows() {
        if row.str(geografia::NOMBRE)? == province {
            return Ok(row);
        }
    }
    warn!(center, province, "center province not found, using first geography");
    geography
        .row(FALLBACK_PROVINCE)
        .ok_or_else(|| DistSimError::EmptyPool {
            table: tables::CEDIS.to_string(),
            pool: "geographies".to_string(),
        })
}

fn generate_centers(ctx: &GenContext<'_>, inputs: &Inputs<'_>, _rng: &mut StdRng) -> Result<Table> {
    let geography = inputs.get(tables::GEOGRAFIA)?;
    let plant = plant_row(inputs)?;
    let principal = &ctx.master.principal_center;

    let mut rows = Vec::with_capacity(ctx.master.centers.len() + 1);

    let home = resolve_province(geography, &principal.id, &principal.province)?;
    rows.push(row! {
        cedis::ID => principal.id.clone(),
        cedis::NOMBRE => format!("CEDI Principal - {}", plant.str(planta::NOMBRE)?),
        cedis::TIPO => PRINCIPAL_KIND,
        cedis::REGION => home.str(geografia::REGION)?.to_string(),
        cedis::PROVINCIA_ID => home.str(geografia::ID)?.to_string(),
        cedis::PLANTA_ID => plant.str(planta::ID)?.to_string(),
        cedis::LATITUD => plant.float(planta::LATITUD)?,
        cedis::LONGITUD => plant.float(planta::LONGITUD)?,
        cedis::CAPACIDAD_PALLETS => principal.capacity_pallets,
        cedis::ESTADO => status::ACTIVO,
    });

    for center in &ctx.master.centers {
        let province = resolve_province(geography, &center.id, &center.province)?;
        rows.push(row! {
            cedis::ID => center.id.clone(),
            cedis::NOMBRE => center.name.clone(),
            cedis::TIPO => capitalize(&center.kind),
            cedis::REGION => province.str(geografia::REGION)?.to_string(),
            cedis::PROVINCIA_ID => province.str(geografia::ID)?.to_string(),
            cedis::PLANTA_ID => Value::Null,
            cedis::LATITUD => center.lat,
            cedis::LONGITUD => center.lon,
            cedis::CAPACIDAD_PALLETS => center.capacity_pallets,
            cedis::ESTADO => center.status.clone(),
        });
    }

    Ok(Table::from_rows(tables::CEDIS, rows))
}

/// A center counts as principal when its type says so or its id carries the
/// `PRIN` marker.
pub fn is_principal(center_id: &str, kind: &str) -> bool {
    kind.to_uppercase().contains("PRINCIPAL") || center_id.contains("PRIN")
}

fn capitalize(s: &str) -> String {
    let lower = s.to_lowercase();
    let mut chars = lower.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
