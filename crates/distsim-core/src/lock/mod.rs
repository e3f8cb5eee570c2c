//! # Run Lock
//!
//! `distsim.lock` records the seed, the config snapshot and a SHA-256 digest
//! of every generated table, so a run can be reproduced with
//! `distsim generate --from-lock` and verified with `distsim check`.
//!
//! The lock is a machine-written artifact. On a merge conflict, take either
//! side and run `distsim generate` again rather than editing the JSON.

pub mod types;

use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::Path;

use sha2::{Digest, Sha256};

use self::types::{RunLock, TableDigest};
use crate::config::SimConfig;
use crate::error::{DistSimError, Result};
use crate::orchestrate::Registry;
use crate::output::cell_text;
use crate::table::Table;

/// Default lock file name.
pub const LOCK_FILE_NAME: &str = "distsim.lock";

const TMP_LOCK_FILE_NAME: &str = ".distsim.lock.tmp";

/// Write a lock file atomically: temp file in the same directory, fsync,
/// then rename over the target.
pub fn write_lock_file(lock: &RunLock, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(lock).map_err(|e| DistSimError::LockFile {
        message: format!("Failed to serialize lock file: {}", e),
    })?;

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let tmp_path = dir.join(TMP_LOCK_FILE_NAME);

    let mut file = fs::File::create(&tmp_path).map_err(|e| DistSimError::Output {
        message: format!("Failed to create temp lock file at {}", tmp_path.display()),
        source: e,
    })?;
    file.write_all(json.as_bytes())
        .map_err(|e| DistSimError::Output {
            message: format!("Failed to write temp lock file at {}", tmp_path.display()),
            source: e,
        })?;
    file.sync_all().map_err(|e| DistSimError::Output {
        message: "Failed to sync lock file to disk".to_string(),
        source: e,
    })?;

    fs::rename(&tmp_path, path).map_err(|e| DistSimError::Output {
        message: format!("Failed to rename {} to {}", tmp_path.display(), path.display()),
        source: e,
    })?;

    Ok(())
}

/// Read a lock file from disk.
pub fn read_lock_file(path: &Path) -> Result<RunLock> {
    let content = fs::read_to_string(path).map_err(|e| DistSimError::Output {
        message: format!("Failed to read lock file from {}", path.display()),
        source: e,
    })?;
    serde_json::from_str(&content).map_err(|e| DistSimError::LockFile {
        message: format!("Failed to parse lock file: {}", e),
    })
}

/// Config as it goes into the lock: master data path made absolute so the
/// lock still works from another directory.
pub fn config_snapshot(config: &SimConfig) -> SimConfig {
    let mut snapshot = config.clone();
    snapshot.run.master_data = config.master_data_path();
    snapshot.config_dir = None;
    snapshot
}

/// SHA-256 of the config's JSON form.
pub fn config_hash(config: &SimConfig) -> Result<String> {
    let json = serde_json::to_string(config).map_err(|e| DistSimError::LockFile {
        message: format!("Failed to serialize config: {}", e),
    })?;
    Ok(hex(&Sha256::digest(json.as_bytes())))
}

/// Row count and content digest of one table.
///
/// The digest covers the table name, each column's name and type, and every
/// cell rendered the way the CSV writer renders it, so two tables share a
/// digest exactly when they would produce the same output file.
pub fn digest_table(table: &Table) -> TableDigest {
    let mut hasher = Sha256::new();
    hasher.update(table.name().as_bytes());
    hasher.update([0u8]);
    for (name, column) in table.columns() {
        hasher.update(name.as_bytes());
        hasher.update([0x1f]);
        hasher.update(column.dtype.as_str().as_bytes());
        hasher.update([0u8]);
    }
    let columns: Vec<_> = table.columns().map(|(_, col)| col).collect();
    for index in 0..table.num_rows() {
        for col in &columns {
            let value = &col.values[index];
            // Null and empty text render the same; keep them apart.
            hasher.update([u8::from(value.is_null())]);
            hasher.update(cell_text(value, col.dtype).as_bytes());
            hasher.update([0x1f]);
        }
        hasher.update([0x1e]);
    }

    TableDigest {
        rows: table.num_rows(),
        digest: hex(&hasher.finalize()),
    }
}

/// Digests for every table in a finished run.
pub fn digest_registry(registry: &Registry) -> BTreeMap<String, TableDigest> {
    registry
        .tables()
        .map(|table| (table.name().to_string(), digest_table(table)))
        .collect()
}

fn hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}
