//! Category-Tree Matcher
//!
//! Selects domains from the site store by the DMOZ-style category paths the
//! crawler attached to them (`Top/Adult/Movies`).
//!
//! The category container has no stable shape upstream: it is a single
//! mapping, a list of mappings, or an empty mapping. [`CategoryContainer`]
//! absorbs that at the boundary so matching only ever sees a list of paths.

use std::collections::BTreeSet;

use serde_json::Value;
use tracing::debug;

use crate::config::StoreConfig;
use crate::domain::decode_placeholder;
use crate::error::Result;
use crate::store::{lookup, Query, SiteStore};

/// Raw shape of a record's category field
#[derive(Debug, Clone, Copy)]
pub enum CategoryContainer<'a> {
    /// `{}`
    Empty,
    /// `{"@ID": "Top/..."}`
    Single(&'a Value),
    /// `[{"@ID": "Top/..."}, ...]`
    List(&'a [Value]),
}

impl<'a> CategoryContainer<'a> {
    /// Classify a raw field value. `None` for shapes that are neither
    /// mapping nor list.
    pub fn from_value(value: &'a Value) -> Option<Self> {
        match value {
            Value::Object(map) if map.is_empty() => Some(Self::Empty),
            Value::Object(_) => Some(Self::Single(value)),
            Value::Array(items) => Some(Self::List(items)),
            _ => None,
        }
    }

    /// Collapse to category path strings.
    ///
    /// `None` when any entry lacks a string under `id_key`.
    pub fn paths(self, id_key: &str) -> Option<Vec<String>> {
        let entry_path = |entry: &Value| entry.get(id_key)?.as_str().map(str::to_string);
        match self {
            Self::Empty => Some(Vec::new()),
            Self::Single(entry) => entry_path(entry).map(|p| vec![p]),
            Self::List(entries) => entries.iter().map(entry_path).collect(),
        }
    }
}

/// Include/exclude token sets for category paths
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryMatcher {
    includes: BTreeSet<String>,
    excludes: BTreeSet<String>,
}

impl CategoryMatcher {
    pub fn new<I, S>(includes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            includes: includes.into_iter().map(Into::into).collect(),
            excludes: BTreeSet::new(),
        }
    }

    pub fn excluding<I, S>(mut self, excludes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.excludes = excludes.into_iter().map(Into::into).collect();
        self
    }

    pub fn includes(&self) -> &BTreeSet<String> {
        &self.includes
    }

    pub fn excludes(&self) -> &BTreeSet<String> {
        &self.excludes
    }

    /// Any segment of any path is included, and no segment of any path is
    /// excluded.
    pub fn matches<S: AsRef<str>>(&self, paths: &[S]) -> bool {
        let segments = || paths.iter().flat_map(|p| p.as_ref().split('/'));

        if !self.excludes.is_empty() && segments().any(|s| self.excludes.contains(s)) {
            return false;
        }
        segments().any(|s| self.includes.contains(s))
    }
}

/// Runs [`CategoryMatcher`]s against a site store
pub struct CategoryTreeMatcher<'a> {
    store: &'a dyn SiteStore,
    fields: &'a StoreConfig,
}

impl<'a> CategoryTreeMatcher<'a> {
    pub fn new(store: &'a dyn SiteStore, fields: &'a StoreConfig) -> Self {
        Self { store, fields }
    }

    /// Decoded domains of every record whose categories satisfy `matcher`.
    ///
    /// Unordered, one entry per matching record.
    pub fn matching_domains(&self, matcher: &CategoryMatcher) -> Result<Vec<String>> {
        let query = Query::exists(&self.fields.category_field).project([
            self.fields.domain_field.as_str(),
            self.fields.category_field.as_str(),
        ]);

        let mut domains = Vec::new();
        for record in self.store.find(&query)? {
            let Some(paths) = self.record_paths(&record) else {
                debug!("Skipping record with malformed categories: {}", record);
                continue;
            };
            if !matcher.matches(&paths) {
                continue;
            }
            match lookup(&record, &self.fields.domain_field).and_then(Value::as_str) {
                Some(domain) => domains.push(decode_placeholder(domain)),
                None => debug!("Skipping matching record without domain: {}", record),
            }
        }

        Ok(domains)
    }

    fn record_paths(&self, record: &Value) -> Option<Vec<String>> {
        let raw = lookup(record, &self.fields.category_field)?;
        CategoryContainer::from_value(raw)?.paths(&self.fields.category_id_key)
    }
}
