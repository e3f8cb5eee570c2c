use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::config::SimConfig;

/// The distsim.lock file: everything needed to rebuild a run bit for bit,
/// plus a digest of every table it produced.
///
/// `distsim generate --from-lock` reuses the seed and config snapshot;
/// `distsim check` regenerates and compares the table digests.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunLock {
    /// Random seed the run used.
    pub seed: u64,
    /// distsim version that wrote the lock.
    pub distsim_version: String,
    /// SHA-256 of the serialized config snapshot.
    pub config_hash: String,
    /// Config as the run saw it, with `master_data` resolved to an
    /// absolute path.
    pub config: SimConfig,
    /// Per-table row counts and content digests. BTreeMap for stable JSON
    /// key order.
    pub tables: BTreeMap<String, TableDigest>,
    /// When the lock was written (RFC 3339).
    pub created_at: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableDigest {
    pub rows: usize,
    /// Hex SHA-256 over the table's columns, types and cells.
    pub digest: String,
}

/// One table whose rebuilt contents differ from the lock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Drift {
    Missing { table: String },
    Unexpected { table: String },
    Changed {
        table: String,
        locked_rows: usize,
        rebuilt_rows: usize,
    },
}

impl std::fmt::Display for Drift {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Drift::Missing { table } => write!(f, "{} is in the lock but was not rebuilt", table),
            Drift::Unexpected { table } => write!(f, "{} was rebuilt but is not in the lock", table),
            Drift::Changed {
                table,
                locked_rows,
                rebuilt_rows,
            } => write!(
                f,
                "{} differs from the lock ({} rows locked, {} rebuilt)",
                table, locked_rows, rebuilt_rows
            ),
        }
    }
}

impl RunLock {
    pub fn new(
        seed: u64,
        config: SimConfig,
        config_hash: String,
        tables: BTreeMap<String, TableDigest>,
    ) -> Self {
        Self {
            seed,
            distsim_version: env!("CARGO_PKG_VERSION").to_string(),
            config_hash,
            config,
            tables,
            created_at: chrono::Utc::now().to_rfc3339(),
        }
    }

    /// Compare rebuilt digests against the locked ones.
    pub fn compare(&self, rebuilt: &BTreeMap<String, TableDigest>) -> Vec<Drift> {
        let mut drift = Vec::new();
        for (table, locked) in &self.tables {
            match rebuilt.get(table) {
                None => drift.push(Drift::Missing {
                    table: table.clone(),
                }),
                Some(now) if now != locked => drift.push(Drift::Changed {
                    table: table.clone(),
                    locked_rows: locked.rows,
                    rebuilt_rows: now.rows,
                }),
                Some(_) => {}
            }
        }
        for table in rebuilt.keys() {
            if !self.tables.contains_key(table) {
                drift.push(Drift::Unexpected {
                    table: table.clone(),
                });
            }
        }
        drift
    }
}
