//! # Error Types
//!
//! Defines `DistSimError`, the unified error enum for every failure mode in
//! the generation pipeline. Variants carry the table, column or entity name
//! involved so a failed run points straight at the generator that broke.

use thiserror::Error;

/// All errors that can occur while generating dimensions.
#[derive(Error, Debug)]
pub enum DistSimError {
    #[error("Cannot normalize weights for '{entity}': the weights sum to zero")]
    ZeroWeightSum { entity: String },

    #[error("Invalid weight {weight} at position {index} for '{entity}': weights must be finite and non-negative")]
    InvalidWeight {
        entity: String,
        index: usize,
        weight: f64,
    },

    #[error("Sampling pool '{pool}' is empty while generating {table}")]
    EmptyPool { table: String, pool: String },

    #[error("Generator for {table} depends on {dependency}, which has not been built")]
    MissingDependency { table: String, dependency: String },

    #[error("Generator for {table} requested undeclared input {dependency}\n  Declare it in the generator's dependency list")]
    UndeclaredDependency { table: String, dependency: String },

    #[error("Table {table} was already registered; tables are insert-once")]
    DuplicateTable { table: String },

    #[error("Circular dependency detected involving generator: {table}")]
    CircularDependency { table: String },

    #[error("Generator for {table} failed: {source}")]
    GeneratorFailed {
        table: String,
        #[source]
        source: Box<DistSimError>,
    },

    #[error("Column {table}.{column} not found")]
    MissingColumn { table: String, column: String },

    #[error("Column {table}.{column} holds {found}, expected {expected}")]
    ColumnType {
        table: String,
        column: String,
        expected: String,
        found: String,
    },

    #[error("Master data error: {message}")]
    MasterData { message: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Lock file error: {message}")]
    LockFile { message: String },

    #[error("Output error: {message}: {source}")]
    Output {
        message: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{0}")]
    Other(String),
}

impl DistSimError {
    /// Wrap an error with the name of the table whose generator raised it.
    pub fn in_generator(self, table: &str) -> Self {
        match self {
            already @ DistSimError::GeneratorFailed { .. } => already,
            other => DistSimError::GeneratorFailed {
                table: table.to_string(),
                source: Box::new(other),
            },
        }
    }
}

pub type Result<T> = std::result::Result<T, DistSimError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generator_context_in_message() {
        let err = DistSimError::ZeroWeightSum {
            entity: "DimGeografia.Peso".to_string(),
        }
        .in_generator("DimGeografia");

        let msg = err.to_string();
        assert!(msg.contains("DimGeografia failed"));
        assert!(msg.contains("sum to zero"));
    }

    #[test]
    fn test_in_generator_does_not_double_wrap() {
        let err = DistSimError::Other("boom".to_string())
            .in_generator("DimRuta")
            .in_generator("DimCliente");

        match err {
            DistSimError::GeneratorFailed { table, .. } => assert_eq!(table, "DimRuta"),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
