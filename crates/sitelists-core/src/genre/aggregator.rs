//! Genre Aggregator
//!
//! Runs every source of a genre recipe, unions the results and drops the
//! recipe's known false positives.

use std::collections::BTreeSet;

use tracing::{debug, info};

use crate::config::{Paths, StoreConfig};
use crate::error::Result;
use crate::sources::{
    read_domain_list, CategoryMatcher, CategoryTreeMatcher, HandClassifiedTable, TldMatcher,
    VendorNormalizer,
};
use crate::store::SiteStore;

use super::builtin::{GenreDef, SourceDef};
use super::result::GenreResult;

/// Everything a source recipe can read from
#[derive(Clone, Copy)]
pub struct SourceContext<'a> {
    pub store: &'a dyn SiteStore,
    pub fields: &'a StoreConfig,
    /// Already resolved against the base directory
    pub paths: &'a Paths,
}

/// Builds one [`GenreResult`] per genre recipe
pub struct GenreAggregator<'a> {
    ctx: SourceContext<'a>,
}

impl<'a> GenreAggregator<'a> {
    pub fn new(ctx: SourceContext<'a>) -> Self {
        Self { ctx }
    }

    /// Union of all sources minus false positives, sorted
    pub fn aggregate(&self, genre: &GenreDef) -> Result<GenreResult> {
        let mut domains = BTreeSet::new();
        for source in &genre.sources {
            let found = self.collect(source)?;
            debug!("{}: {} domains from {}", genre.name, found.len(), source.label());
            domains.extend(found);
        }

        for fp in &genre.false_positives {
            if domains.remove(fp) {
                debug!("{}: removed false positive {}", genre.name, fp);
            }
        }

        info!("{}: {} domains", genre.name, domains.len());
        Ok(GenreResult {
            name: genre.name.clone(),
            domains: domains.into_iter().collect(),
        })
    }

    /// Raw output of a single source
    pub fn collect(&self, source: &SourceDef) -> Result<Vec<String>> {
        let SourceContext {
            store,
            fields,
            paths,
        } = self.ctx;

        match source {
            SourceDef::CategoryTree { includes, excludes } => {
                let matcher = CategoryMatcher::new(includes).excluding(excludes);
                CategoryTreeMatcher::new(store, fields).matching_domains(&matcher)
            }
            SourceDef::HandClassified { code } => {
                HandClassifiedTable::open(&paths.hand_classified)?.domains_with_code(code)
            }
            SourceDef::Tld { suffix } => TldMatcher::new(store, fields).domains_with_suffix(suffix),
            SourceDef::VendorCache { category } => {
                read_domain_list(&VendorNormalizer::cache_path(&paths.vendor_dir, category))
            }
            SourceDef::Suggested { file } => read_domain_list(&paths.suggested_dir.join(file)),
        }
    }
}
