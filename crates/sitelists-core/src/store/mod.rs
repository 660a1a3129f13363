//! # Site Store
//!
//! Read-only access to crawled site records.
//!
//! The pipeline only ever needs one capability from the store: "find records
//! where a field exists, returning a projection". That capability is the
//! [`SiteStore`] trait, so the matchers run equally against a JSON-lines dump
//! of the crawled collection or an in-memory fixture.
//!
//! ```rust
//! use serde_json::json;
//! use sitelists_core::store::{MemoryStore, Query, SiteStore};
//!
//! let store = MemoryStore::new(vec![
//!     json!({"domain": "foo#com", "alexa": {"rank": 10}}),
//!     json!({"domain": "bar#com"}),
//! ]);
//!
//! let query = Query::exists("alexa.rank").project(["domain"]);
//! let records = store.find(&query).unwrap();
//! assert_eq!(records, vec![json!({"domain": "foo#com"})]);
//! ```

mod jsonl;
mod memory;

use serde_json::{Map, Value};

use crate::error::Result;

pub use jsonl::JsonLinesStore;
pub use memory::MemoryStore;

/// Field-existence filter plus projection, both as dotted field paths.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    /// Only records where this path resolves are returned
    pub exists: Option<String>,
    /// Paths copied into each returned record (empty = whole record)
    pub projection: Vec<String>,
}

impl Query {
    /// Match every record
    pub fn all() -> Self {
        Self::default()
    }

    /// Match records where `path` resolves to a value
    pub fn exists(path: impl Into<String>) -> Self {
        Self {
            exists: Some(path.into()),
            projection: Vec::new(),
        }
    }

    /// Restrict returned records to the given paths
    pub fn project<I, S>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.projection = paths.into_iter().map(Into::into).collect();
        self
    }

    /// Apply this query to a single record
    pub fn apply(&self, record: &Value) -> Option<Value> {
        if let Some(path) = &self.exists {
            lookup(record, path)?;
        }
        if self.projection.is_empty() {
            return Some(record.clone());
        }
        Some(project(record, &self.projection))
    }
}

/// Read-only query interface over site records
pub trait SiteStore {
    /// Return every record matching `query`, projected
    fn find(&self, query: &Query) -> Result<Vec<Value>>;
}

/// Resolve a dotted path (`alexa.DMOZ.SITE`) inside a record.
///
/// Explicit `null` counts as absent.
pub fn lookup<'a>(record: &'a Value, path: &str) -> Option<&'a Value> {
    let mut current = record;
    for key in path.split('.') {
        current = current.as_object()?.get(key)?;
    }
    if current.is_null() {
        None
    } else {
        Some(current)
    }
}

/// Copy only the listed paths of `record` into a new object, keeping nesting.
fn project(record: &Value, paths: &[String]) -> Value {
    let mut out = Map::new();
    'paths: for path in paths {
        let Some(value) = lookup(record, path) else {
            continue;
        };
        let mut keys: Vec<&str> = path.split('.').collect();
        let Some(last) = keys.pop() else {
            continue;
        };

        let mut target = &mut out;
        for key in keys {
            let entry = target
                .entry(key.to_string())
                .or_insert_with(|| Value::Object(Map::new()));
            match entry {
                Value::Object(map) => target = map,
                // an earlier, shorter path already copied a scalar here
                _ => continue 'paths,
            }
        }
        target.insert(last.to_string(), value.clone());
    }
    Value::Object(out)
}
