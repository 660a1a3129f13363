use serde_json::Value;

use crate::config::StoreConfig;
use crate::domain::decode_placeholder;
use crate::error::Result;
use crate::store::{lookup, Query, SiteStore};

/// Selects store domains by suffix (e.g. the `.xxx` TLD)
pub struct TldMatcher<'a> {
    store: &'a dyn SiteStore,
    fields: &'a StoreConfig,
}

impl<'a> TldMatcher<'a> {
    pub fn new(store: &'a dyn SiteStore, fields: &'a StoreConfig) -> Self {
        Self { store, fields }
    }

    /// Decoded domains ending with `suffix`
    pub fn domains_with_suffix(&self, suffix: &str) -> Result<Vec<String>> {
        let query = Query::all().project([self.fields.domain_field.as_str()]);
        let domains = self
            .store
            .find(&query)?
            .iter()
            .filter_map(|record| lookup(record, &self.fields.domain_field).and_then(Value::as_str))
            .map(decode_placeholder)
            .filter(|domain| domain.ends_with(suffix))
            .collect();
        Ok(domains)
    }
}
