//! # Dependency Orchestrator
//!
//! Runs the dimension generators in dependency order. Each generator is a
//! [`GeneratorSpec`]: its target table, the tables it reads, its schema and a
//! plain function that builds the table. The orchestrator
//!
//! 1. orders generators with a stable topological sort (ties broken by
//!    registration order),
//! 2. hands each generator a read-only [`Inputs`] bundle holding only the
//!    tables it declared, plus its own `StdRng` derived from the run seed and
//!    the table name,
//! 3. conforms the output to the generator's schema,
//! 4. registers it (insert-once), passes it to the optional sink and reports
//!    progress.
//!
//! The first failing generator aborts the run with `GeneratorFailed`.

pub mod registry;

use rand::rngs::StdRng;
use rand::SeedableRng;
use sha2::{Digest, Sha256};
use tracing::{debug, info};

pub use self::registry::{Inputs, Registry};
use crate::config::SimConfig;
use crate::error::{DistSimError, Result};
use crate::graph::{build_order, DependencyGraph};
use crate::master::MasterData;
use crate::table::conform::{enforce, Defaults};
use crate::table::schema::SchemaSpec;
use crate::table::Table;

/// Everything a generator may read besides its input tables.
#[derive(Clone, Copy)]
pub struct GenContext<'a> {
    pub config: &'a SimConfig,
    pub master: &'a MasterData,
}

pub type GenerateFn = fn(&GenContext<'_>, &Inputs<'_>, &mut StdRng) -> Result<Table>;

/// Declaration of one dimension generator.
#[derive(Clone, Copy)]
pub struct GeneratorSpec {
    pub table: &'static str,
    pub depends_on: &'static [&'static str],
    pub schema: fn() -> SchemaSpec,
    /// Fill values for columns the generator leaves out.
    pub defaults: fn() -> Defaults,
    pub generate: GenerateFn,
}

impl std::fmt::Debug for GeneratorSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeneratorSpec")
            .field("table", &self.table)
            .field("depends_on", &self.depends_on)
            .finish()
    }
}

/// A set of registered generators.
#[derive(Debug, Default)]
pub struct Orchestrator {
    generators: Vec<GeneratorSpec>,
}

impl Orchestrator {
    pub fn new() -> Self {
        Self::default()
    }

    /// The full star schema: all sixteen dimension generators.
    pub fn standard() -> Self {
        Self {
            generators: crate::dims::generators(),
        }
    }

    /// Register a generator. Table names are unique.
    pub fn register(&mut self, spec: GeneratorSpec) -> Result<()> {
        if self.generators.iter().any(|g| g.table == spec.table) {
            return Err(DistSimError::DuplicateTable {
                table: spec.table.to_string(),
            });
        }
        self.generators.push(spec);
        Ok(())
    }

    pub fn generators(&self) -> &[GeneratorSpec] {
        &self.generators
    }

    pub fn spec(&self, table: &str) -> Option<&GeneratorSpec> {
        self.generators.iter().find(|g| g.table == table)
    }

    /// Dependency graph of the registered generators.
    pub fn graph(&self) -> Result<DependencyGraph> {
        DependencyGraph::from_declarations(
            self.generators.iter().map(|g| (g.table, g.depends_on)),
        )
    }

    /// Generators in build order.
    pub fn plan(&self) -> Result<Vec<&GeneratorSpec>> {
        let order = build_order(&self.graph()?)?;
        Ok(order
            .iter()
            .filter_map(|table| self.spec(table))
            .collect())
    }

    /// Build every table.
    pub fn run(&self, ctx: &GenContext<'_>, seed: u64) -> Result<Registry> {
        self.run_with(ctx, seed, |_, _, _| {}, |_| Ok(()))
    }

    /// Build every table, calling `on_progress(table, index, total)` after
    /// each registration and `sink(table)` before any dependent runs.
    pub fn run_with<P, S>(
        &self,
        ctx: &GenContext<'_>,
        seed: u64,
        mut on_progress: P,
        mut sink: S,
    ) -> Result<Registry>
    where
        P: FnMut(&str, usize, usize),
        S: FnMut(&Table) -> Result<()>,
    {
        let plan = self.plan()?;
        let total = plan.len();
        let mut registry = Registry::new();

        for (index, spec) in plan.into_iter().enumerate() {
            for dependency in spec.depends_on {
                if !registry.contains(dependency) {
                    return Err(DistSimError::MissingDependency {
                        table: spec.table.to_string(),
                        dependency: dependency.to_string(),
                    });
                }
            }

            debug!(table = spec.table, index, total, "running generator");
            let mut rng = table_rng(seed, spec.table);
            let inputs = Inputs::new(spec.table, spec.depends_on, &registry);
            let raw = (spec.generate)(ctx, &inputs, &mut rng)
                .map_err(|e| e.in_generator(spec.table))?;

            let table = enforce(raw, &(spec.schema)(), &(spec.defaults)());
            info!(table = spec.table, rows = table.num_rows(), "table built");

            sink(&table)?;
            registry.insert(table)?;
            on_progress(spec.table, index + 1, total);
        }

        Ok(registry)
    }
}

/// RNG for one generator: seeded from `sha256(seed ‖ table)`, so every draw
/// depends only on the run seed and the table name.
pub fn table_rng(seed: u64, table: &str) -> StdRng {
    let mut hasher = Sha256::new();
    hasher.update(seed.to_le_bytes());
    hasher.update(table.as_bytes());
    let digest = hasher.finalize();

    let mut bytes = [0u8; 32];
    bytes.copy_from_slice(&digest);
    StdRng::from_seed(bytes)
}
