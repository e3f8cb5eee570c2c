//! Org chart: departments, job titles and the employee roster.
//!
//! Departments and roles come straight from master data. Employees are
//! created per role headcount (executive roles capped at two people), live
//! in a province drawn by commercial weight and work at a distribution
//! center in their home region.

use std::collections::HashMap;

use chrono::{Datelike, Months, NaiveDate};
use rand::rngs::StdRng;
use rand::Rng;

use crate::columns::{cedis, departamento, empleado, geografia, puesto, status, tables};
use crate::dims::{pick, random_date};
use crate::error::{DistSimError, Result};
use crate::fakes;
use crate::geo::round_to;
use crate::master::{DepartmentKind, Role, RoleLevel};
use crate::orchestrate::{GenContext, GeneratorSpec, Inputs};
use crate::row;
use crate::table::conform::Defaults;
use crate::table::schema::{SchemaSpec, SemanticType::*};
use crate::table::value::Value;
use crate::table::{Row, Table};
use crate::weights::WeightedSampler;

pub const DEPARTMENTS: GeneratorSpec = GeneratorSpec {
    table: tables::DEPARTAMENTO,
    depends_on: &[],
    schema: department_schema,
    defaults: Defaults::new,
    generate: generate_departments,
};

pub const JOB_TITLES: GeneratorSpec = GeneratorSpec {
    table: tables::PUESTO,
    depends_on: &[tables::DEPARTAMENTO],
    schema: job_title_schema,
    defaults: Defaults::new,
    generate: generate_job_titles,
};

pub const EMPLOYEES: GeneratorSpec = GeneratorSpec {
    table: tables::EMPLEADO,
    depends_on: &[tables::GEOGRAFIA, tables::PUESTO, tables::CEDIS],
    schema: employee_schema,
    defaults: employee_defaults,
    generate: generate_employees,
};

/// Most people any executive-level role may have.
pub const EXECUTIVE_CAP: u32 = 2;

const OBJECTIVES: [&str; 5] = [
    "Eficiencia Operativa",
    "Crecimiento Ventas",
    "Reducción Costos",
    "Satisfacción Cliente",
    "Innovación",
];
const GENDERS: [&str; 3] = ["Masculino", "Femenino", "Otro"];
const CONTRACTS: [&str; 2] = ["Indefinido", "Temporal"];

const EARLIEST_HIRE: (i32, u32, u32) = (2010, 1, 1);
const MIN_AGE_YEARS: u32 = 20;
const MAX_AGE_YEARS: u32 = 60;

pub fn department_schema() -> SchemaSpec {
    SchemaSpec::new()
        .column(departamento::ID, Text)
        .column(departamento::NOMBRE, Text)
        .column(departamento::TIPO, Categorical)
        .column(departamento::NIVEL, Categorical)
        .column(departamento::PRESUPUESTO, Float64)
        .column(departamento::EMPLEADOS, Int16)
        .column(departamento::OBJETIVO, Categorical)
}

pub fn job_title_schema() -> SchemaSpec {
    SchemaSpec::new()
        .column(puesto::ID, Text)
        .column(puesto::DEPARTAMENTO_ID, Text)
        .column(puesto::NOMBRE, Text)
        .column(puesto::CLAVE, Text)
        .column(puesto::NIVEL, Categorical)
        .column(puesto::SALARIO_MIN, Float64)
        .column(puesto::SALARIO_MAX, Float64)
        .column(puesto::SALARIO, Float64)
        .column(puesto::ES_COMERCIAL, Boolean)
}

pub fn employee_schema() -> SchemaSpec {
    SchemaSpec::new()
        .column(empleado::ID, Text)
        .column(empleado::NOMBRE, Text)
        .column(empleado::DEPARTAMENTO_ID, Text)
        .column(empleado::PUESTO_ID, Text)
        .column(empleado::CEDI_ID, Text)
        .column(empleado::PROVINCIA_RESIDENCIA, Text)
        .column(empleado::FECHA_CONTRATACION, Date)
        .column(empleado::SALARIO, Float64)
        .column(empleado::ESTATUS, Categorical)
        .column(empleado::EMAIL, Text)
        .column(empleado::TELEFONO, Text)
        .column(empleado::FECHA_NACIMIENTO, Date)
        .column(empleado::GENERO, Categorical)
        .column(empleado::EXPERIENCIA, Float32)
        .column(empleado::TIPO_CONTRATO, Categorical)
}

fn employee_defaults() -> Defaults {
    let mut defaults = Defaults::new();
    defaults.insert(empleado::ESTATUS.to_string(), Value::label(status::ACTIVO));
    defaults
}

fn generate_departments(ctx: &GenContext<'_>, _inputs: &Inputs<'_>, rng: &mut StdRng) -> Result<Table> {
    let rows = ctx
        .master
        .departments
        .iter()
        .enumerate()
        .map(|(i, dept)| {
            row! {
                departamento::ID => format!("DEP-{:02}", i + 1),
                departamento::NOMBRE => dept.name.clone(),
                departamento::TIPO => dept.kind.label(),
                departamento::NIVEL => dept.tier.label(),
                departamento::PRESUPUESTO => rng.random_range(5_000_000..=80_000_000) as f64,
                departamento::EMPLEADOS => rng.random_range(5..=200) as i64,
                departamento::OBJETIVO => *pick(rng, &OBJECTIVES),
            }
        })
        .collect();
    Ok(Table::from_rows(tables::DEPARTAMENTO, rows))
}

fn generate_job_titles(ctx: &GenContext<'_>, inputs: &Inputs<'_>, _rng: &mut StdRng) -> Result<Table> {
    let departments = inputs.get(tables::DEPARTAMENTO)?;
    let mut ids: HashMap<&str, &str> = HashMap::new();
    for row in departments.rows() {
        ids.insert(row.str(departamento::NOMBRE)?, row.str(departamento::ID)?);
    }

    let rows = ctx
        .master
        .roles()
        .enumerate()
        .map(|(i, (dept, role))| {
            let dept_id = ids.get(dept.name.as_str()).ok_or_else(|| DistSimError::MasterData {
                message: format!("department '{}' missing from {}", dept.name, tables::DEPARTAMENTO),
            })?;
            Ok(row! {
                puesto::ID => format!("PUE-{:03}", i + 1),
                puesto::DEPARTAMENTO_ID => dept_id.to_string(),
                puesto::NOMBRE => role.title.clone(),
                puesto::CLAVE => role.key.clone(),
                puesto::NIVEL => role.level.label(),
                puesto::SALARIO_MIN => role.salary_min,
                puesto::SALARIO_MAX => role.salary_max,
                puesto::SALARIO => (role.salary_min + role.salary_max) / 2.0,
                puesto::ES_COMERCIAL => dept.kind == DepartmentKind::Commercial,
            })
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(Table::from_rows(tables::PUESTO, rows))
}

/// Number of people hired into a role.
pub fn staffed_headcount(role: &Role) -> u32 {
    if role.level == RoleLevel::Executive {
        role.headcount.min(EXECUTIVE_CAP)
    } else {
        role.headcount
    }
}

fn generate_employees(ctx: &GenContext<'_>, inputs: &Inputs<'_>, rng: &mut StdRng) -> Result<Table> {
    let geography = inputs.get(tables::GEOGRAFIA)?;
    let titles = inputs.get(tables::PUESTO)?;
    let centers = inputs.get(tables::CEDIS)?;

    let mut residences = Vec::with_capacity(geography.num_rows());
    for row in geography.rows() {
        residences.push((
            (row.str(geografia::ID)?, row.str(geografia::REGION)?),
            row.float(geografia::PESO)?,
        ));
    }
    let residence = WeightedSampler::new("employee residence", residences)?;

    let mut centers_by_region: HashMap<&str, Vec<&str>> = HashMap::new();
    for row in centers.rows() {
        centers_by_region
            .entry(row.str(cedis::REGION)?)
            .or_default()
            .push(row.str(cedis::ID)?);
    }
    let fallback_center = ctx.master.principal_center.id.as_str();

    let roles: HashMap<&str, &Role> = ctx
        .master
        .roles()
        .map(|(_, role)| (role.key.as_str(), role))
        .collect();

    let end = ctx.config.run.end_date;
    let earliest_hire = NaiveDate::from_ymd_opt(EARLIEST_HIRE.0, EARLIEST_HIRE.1, EARLIEST_HIRE.2)
        .unwrap_or(ctx.config.run.start_date);
    let oldest = end
        .checked_sub_months(Months::new(MAX_AGE_YEARS * 12))
        .unwrap_or(end);
    let youngest = end
        .checked_sub_months(Months::new(MIN_AGE_YEARS * 12))
        .unwrap_or(end);

    let mut rows: Vec<Row> = Vec::new();
    for title in titles.rows() {
        let key = title.str(puesto::CLAVE)?;
        let role = roles.get(key).ok_or_else(|| DistSimError::MasterData {
            message: format!("job title key '{}' has no role in master data", key),
        })?;

        for _ in 0..staffed_headcount(role) {
            let index = rows.len() + 1;
            let (province, region) = *residence.sample(rng);
            let center = centers_by_region
                .get(region)
                .map(|ids| *pick(rng, ids))
                .unwrap_or(fallback_center);
            let hired = random_date(rng, earliest_hire, end);
            let born = random_date(rng, oldest, youngest);
            let salary = round_to(rng.random_range(role.salary_min..=role.salary_max), 2);

            rows.push(row! {
                empleado::ID => format!("EMP-{:05}", index),
                empleado::NOMBRE => fakes::person_name(rng),
                empleado::DEPARTAMENTO_ID => title.str(puesto::DEPARTAMENTO_ID)?.to_string(),
                empleado::PUESTO_ID => title.str(puesto::ID)?.to_string(),
                empleado::CEDI_ID => center.to_string(),
                empleado::PROVINCIA_RESIDENCIA => province.to_string(),
                empleado::FECHA_CONTRATACION => hired,
                empleado::SALARIO => salary,
                empleado::ESTATUS => status::ACTIVO,
                empleado::EMAIL => fakes::email(rng, index),
                empleado::TELEFONO => fakes::phone(rng),
                empleado::FECHA_NACIMIENTO => born,
                empleado::GENERO => *pick(rng, &GENDERS),
                empleado::EXPERIENCIA => round_to((end - hired).num_days() as f64 / 365.0, 1),
                empleado::TIPO_CONTRATO => *pick(rng, &CONTRACTS),
            });
        }
    }

    Ok(Table::from_rows(tables::EMPLEADO, rows))
}

/// Age in whole years on `at`.
pub fn age_on(born: NaiveDate, at: NaiveDate) -> i32 {
    let mut age = at.year() - born.year();
    if (at.month(), at.day()) < (born.month(), born.day()) {
        age -= 1;
    }
    age
}
