//! JSON-lines site store
//!
//! Reads a dump of the crawled `domains` collection, one JSON document per
//! line (the format `mongoexport` produces).

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::info;

use crate::error::{Result, SitelistsError};

use super::{MemoryStore, Query, SiteStore};

/// Site store loaded from a `.jsonl` dump
#[derive(Debug, Clone)]
pub struct JsonLinesStore {
    path: PathBuf,
    inner: MemoryStore,
}

impl JsonLinesStore {
    /// Load every record from `path`. Blank lines are ignored.
    pub fn open(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(SitelistsError::StoreNotFound {
                path: path.to_path_buf(),
            });
        }

        let reader = BufReader::new(File::open(path)?);
        let mut records = Vec::new();
        for (idx, line) in reader.lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            let record: Value =
                serde_json::from_str(&line).map_err(|e| SitelistsError::StoreParse {
                    path: path.to_path_buf(),
                    line: idx + 1,
                    message: e.to_string(),
                })?;
            records.push(record);
        }

        info!("Loaded {} site records from {}", records.len(), path.display());
        Ok(Self {
            path: path.to_path_buf(),
            inner: MemoryStore::new(records),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

impl SiteStore for JsonLinesStore {
    fn find(&self, query: &Query) -> Result<Vec<Value>> {
        self.inner.find(query)
    }
}
