use serde_json::Value;

use crate::error::Result;

use super::{Query, SiteStore};

/// Site store backed by records held in memory
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    records: Vec<Value>,
}

impl MemoryStore {
    pub fn new(records: Vec<Value>) -> Self {
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl SiteStore for MemoryStore {
    fn find(&self, query: &Query) -> Result<Vec<Value>> {
        Ok(self.records.iter().filter_map(|r| query.apply(r)).collect())
    }
}
