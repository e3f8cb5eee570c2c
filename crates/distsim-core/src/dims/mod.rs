//! # Dimension Generators
//!
//! One module per group of related dimensions. Each exposes a
//! `GeneratorSpec` per table; [`generators`] lists them in registration
//! order, which is also the build order the orchestrator settles on.

pub mod calendar;
pub mod commercial;
pub mod customer;
pub mod facilities;
pub mod geography;
pub mod organization;
pub mod product;
pub mod route;
pub mod sales_agent;
pub mod vehicle;

use chrono::{Days, NaiveDate};
use rand::Rng;

use crate::orchestrate::GeneratorSpec;

/// Every dimension generator, in registration order.
pub fn generators() -> Vec<GeneratorSpec> {
    vec![
        calendar::SPEC,
        geography::SPEC,
        facilities::PLANT,
        facilities::WAREHOUSE,
        organization::DEPARTMENTS,
        organization::JOB_TITLES,
        commercial::CHANNELS,
        commercial::CLUSTERS,
        commercial::PROMOTIONS,
        facilities::CENTERS,
        product::SPEC,
        organization::EMPLOYEES,
        sales_agent::SPEC,
        vehicle::SPEC,
        route::SPEC,
        customer::SPEC,
    ]
}

/// Uniform pick from a non-empty slice.
pub(crate) fn pick<'a, T, R: Rng + ?Sized>(rng: &mut R, items: &'a [T]) -> &'a T {
    &items[rng.random_range(0..items.len())]
}

/// Uniform date in `[start, end]`. Returns `start` when the range is empty.
pub(crate) fn random_date<R: Rng + ?Sized>(rng: &mut R, start: NaiveDate, end: NaiveDate) -> NaiveDate {
    let span = (end - start).num_days();
    if span <= 0 {
        return start;
    }
    let offset = rng.random_range(0..=span) as u64;
    start.checked_add_days(Days::new(offset)).unwrap_or(end)
}
