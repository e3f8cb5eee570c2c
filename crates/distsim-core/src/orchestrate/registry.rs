use indexmap::IndexMap;

use crate::error::{DistSimError, Result};
use crate::table::Table;

/// Built tables by name, in build order. Insert-once.
#[derive(Debug, Default)]
pub struct Registry {
    tables: IndexMap<String, Table>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a finished table. A second insert under the same name is an
    /// error; registered tables are never replaced.
    pub fn insert(&mut self, table: Table) -> Result<()> {
        if self.tables.contains_key(table.name()) {
            return Err(DistSimError::DuplicateTable {
                table: table.name().to_string(),
            });
        }
        self.tables.insert(table.name().to_string(), table);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&Table> {
        self.tables.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.tables.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.tables.keys().map(|k| k.as_str())
    }

    pub fn tables(&self) -> impl Iterator<Item = &Table> {
        self.tables.values()
    }

    pub fn into_tables(self) -> IndexMap<String, Table> {
        self.tables
    }
}

/// Read-only view of the registry handed to one generator.
///
/// Only the tables the generator declared can be fetched.
pub struct Inputs<'a> {
    table: &'a str,
    declared: &'a [&'a str],
    registry: &'a Registry,
}

impl<'a> Inputs<'a> {
    pub fn new(table: &'a str, declared: &'a [&'a str], registry: &'a Registry) -> Self {
        Self {
            table,
            declared,
            registry,
        }
    }

    /// Fetch a declared, already-built input table.
    pub fn get(&self, name: &str) -> Result<&'a Table> {
        if !self.declared.contains(&name) {
            return Err(DistSimError::UndeclaredDependency {
                table: self.table.to_string(),
                dependency: name.to_string(),
            });
        }
        self.registry
            .get(name)
            .ok_or_else(|| DistSimError::MissingDependency {
                table: self.table.to_string(),
                dependency: name.to_string(),
            })
    }

    /// The table being generated.
    pub fn target(&self) -> &str {
        self.table
    }
}
