//! DimTiempo: one row per day with calendar, fiscal and seasonality columns.
//!
//! The seasonality factor of a day is its month's base factor times a
//! holiday impact: the holiday itself is damped, the day before gets a
//! shopping bump and the day after a dip. Adjacent adjustments are skipped
//! when the neighbour is itself a holiday, and adjustments from holidays two
//! days apart stack multiplicatively on the day between them.

use std::collections::HashMap;

use chrono::{Datelike, NaiveDate};
use rand::rngs::StdRng;

use crate::columns::{tables, tiempo as col};
use crate::error::Result;
use crate::master::HolidayImpact;
use crate::orchestrate::{GenContext, GeneratorSpec, Inputs};
use crate::row;
use crate::table::conform::Defaults;
use crate::table::schema::{SchemaSpec, SemanticType::*};
use crate::table::value::Value;
use crate::table::{Row, Table};

pub const SPEC: GeneratorSpec = GeneratorSpec {
    table: tables::TIEMPO,
    depends_on: &[],
    schema,
    defaults,
    generate,
};

pub const NO_HOLIDAY: &str = "No Feriado";

const WEEKDAY_NAMES: [&str; 7] = [
    "Lunes",
    "Martes",
    "Miércoles",
    "Jueves",
    "Viernes",
    "Sábado",
    "Domingo",
];

pub fn schema() -> SchemaSpec {
    SchemaSpec::new()
        .column(col::ID, Int32)
        .column(col::FECHA, Date)
        .column(col::ANIO, Int16)
        .column(col::MES, Int8)
        .column(col::DIA, Int8)
        .column(col::DIA_SEMANA, Int8)
        .column(col::NOMBRE_DIA_SEMANA, Text)
        .column(col::DIA_ANIO, Int16)
        .column(col::SEMANA_ISO, Int8)
        .column(col::DIA_SEMANA_ISO, Int8)
        .column(col::TRIMESTRE, Int8)
        .column(col::ANIO_FISCAL, Int16)
        .column(col::MES_FISCAL, Int8)
        .column(col::TRIMESTRE_FISCAL, Int8)
        .column(col::ES_FIN_SEMANA, Boolean)
        .column(col::ES_FERIADO, Boolean)
        .column(col::NOMBRE_FERIADO, Text)
        .column(col::ES_QUINCENA, Boolean)
        .column(col::FACTOR_GENERAL, Float32)
        .column(col::FACTOR_MENSUAL, Float32)
        .column(col::FACTOR_FERIADO, Float32)
}

fn defaults() -> Defaults {
    let mut defaults = Defaults::new();
    defaults.insert(col::NOMBRE_FERIADO.to_string(), Value::label(NO_HOLIDAY));
    defaults
}

/// Fiscal `(year, month, quarter)` for a date, with the fiscal year starting
/// in `start_month` and labelled by the calendar year it starts in.
pub fn fiscal_period(date: NaiveDate, start_month: u32) -> (i32, u32, u32) {
    let month = date.month();
    let year = if month >= start_month {
        date.year()
    } else {
        date.year() - 1
    };
    let fiscal_month = (month + 12 - start_month) % 12 + 1;
    (year, fiscal_month, (fiscal_month - 1) / 3 + 1)
}

/// `YYYYMMDD` surrogate key.
pub fn date_key(date: NaiveDate) -> i64 {
    date.year() as i64 * 10_000 + date.month() as i64 * 100 + date.day() as i64
}

/// Per-day holiday impact factors for a run of consecutive days.
pub fn holiday_impacts(is_holiday: &[bool], impact: &HolidayImpact) -> Vec<f64> {
    let n = is_holiday.len();
    let mut factors = vec![1.0; n];
    for i in 0..n {
        if !is_holiday[i] {
            continue;
        }
        factors[i] *= impact.on;
        if i > 0 && !is_holiday[i - 1] {
            factors[i - 1] *= impact.before;
        }
        if i + 1 < n && !is_holiday[i + 1] {
            factors[i + 1] *= impact.after;
        }
    }
    factors
}

fn generate(ctx: &GenContext<'_>, _inputs: &Inputs<'_>, _rng: &mut StdRng) -> Result<Table> {
    let run = &ctx.config.run;
    let holidays: HashMap<NaiveDate, &str> = ctx
        .master
        .holidays
        .iter()
        .map(|h| (h.date, h.name.as_str()))
        .collect();

    let days: Vec<NaiveDate> = run
        .start_date
        .iter_days()
        .take_while(|d| *d <= run.end_date)
        .collect();
    let is_holiday: Vec<bool> = days.iter().map(|d| holidays.contains_key(d)).collect();
    let impacts = holiday_impacts(&is_holiday, &ctx.master.seasonality.holiday_impact);

    let rows: Vec<Row> = days
        .iter()
        .zip(&impacts)
        .map(|(&date, &impact)| {
            let iso_weekday = date.weekday().number_from_monday();
            let (fiscal_year, fiscal_month, fiscal_quarter) =
                fiscal_period(date, run.fiscal_year_start_month);
            let monthly = ctx.master.monthly_factor(date.month());
            let holiday = holidays.get(&date).copied();

            row! {
                col::ID => date_key(date),
                col::FECHA => date,
                col::ANIO => date.year(),
                col::MES => date.month(),
                col::DIA => date.day(),
                col::DIA_SEMANA => iso_weekday,
                col::NOMBRE_DIA_SEMANA => WEEKDAY_NAMES[iso_weekday as usize - 1],
                col::DIA_ANIO => date.ordinal(),
                col::SEMANA_ISO => date.iso_week().week(),
                col::DIA_SEMANA_ISO => iso_weekday,
                col::TRIMESTRE => (date.month() - 1) / 3 + 1,
                col::ANIO_FISCAL => fiscal_year,
                col::MES_FISCAL => fiscal_month,
                col::TRIMESTRE_FISCAL => fiscal_quarter,
                col::ES_FIN_SEMANA => is_weekend(iso_weekday),
                col::ES_FERIADO => holiday.is_some(),
                col::NOMBRE_FERIADO => Value::owned(holiday.unwrap_or(NO_HOLIDAY).to_string()),
                col::ES_QUINCENA => matches!(date.day(), 15 | 28 | 29 | 30 | 31),
                col::FACTOR_GENERAL => monthly * impact,
                col::FACTOR_MENSUAL => monthly,
                col::FACTOR_FERIADO => impact,
            }
        })
        .collect();

    Ok(Table::from_rows(tables::TIEMPO, rows))
}

/// Saturday and Sunday (ISO 6 and 7). Friday is a working day.
pub fn is_weekend(iso_weekday: u32) -> bool {
    iso_weekday >= 6
}
