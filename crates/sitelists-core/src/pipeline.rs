//! Orchestrator
//!
//! One run: load the reference list, clean the vendor dumps, aggregate every
//! genre, write the plaintext mapping and the three encoded blacklists.
//! Files are written as soon as they are ready; a failure part way through
//! leaves the earlier outputs on disk.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::Serialize;
use tracing::info;

use crate::config::{Config, Paths};
use crate::encode::{Encoder, Encoding};
use crate::error::{Result, SitelistsError};
use crate::genre::{GenreAggregator, GenreResults, GenreStore, SourceContext};
use crate::sources::{
    ExternalChecker, ExternalReport, PublicSuffixParser, ReferenceList, VendorNormalizer,
    VendorReport,
};
use crate::store::SiteStore;

/// Plaintext output, keyed by genre
pub const PLAIN_FILE: &str = "sites.json";
/// Base64 output
pub const BASE64_FILE: &str = "sitesb64.json";

/// Summary of a full run
#[derive(Debug, Clone)]
pub struct RunReport {
    pub vendor: Vec<VendorReport>,
    /// Genre name and domain count, in run order
    pub genres: Vec<(String, usize)>,
    /// Output files in the order they were written
    pub outputs: Vec<PathBuf>,
}

/// Parse a `YYYY-MM-DD` date for the reference list
pub fn parse_date(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| SitelistsError::InvalidDate {
        value: value.to_string(),
    })
}

/// Output file name for an encoding
pub fn output_file_name(encoding: Encoding, encoder: &Encoder) -> String {
    let hash = encoder.algorithm().as_str();
    match encoding {
        Encoding::Plain => PLAIN_FILE.to_string(),
        Encoding::Base64 => BASE64_FILE.to_string(),
        Encoding::Hash => format!("{}.json", hash),
        Encoding::HashBase64 => format!("{}_b64.json", hash),
    }
}

/// Clean every vendor dump against the reference list for `date`
pub fn prepare_vendor_lists(paths: &Paths, date: NaiveDate) -> Result<Vec<VendorReport>> {
    let reference = ReferenceList::load_dated(&paths.reference_dir, date)?;
    VendorNormalizer::new(&paths.vendor_dir, &reference).prepare_all()
}

/// Check the external payload against the reference list for `date`
pub fn check_external(paths: &Paths, date: NaiveDate) -> Result<ExternalReport> {
    let reference = ReferenceList::load_dated(&paths.reference_dir, date)?;
    ExternalChecker::new(&reference, PublicSuffixParser::new())
        .check(&paths.external_payload, &paths.external_results)
}

/// Full blacklist build
pub struct Pipeline<'a> {
    config: &'a Config,
    paths: Paths,
    genres: GenreStore,
    store: &'a dyn SiteStore,
}

impl<'a> Pipeline<'a> {
    pub fn new(config: &'a Config, base_dir: &Path, store: &'a dyn SiteStore) -> Self {
        Self {
            config,
            paths: config.paths.resolve(base_dir),
            genres: GenreStore::builtin().with_config(&config.genres),
            store,
        }
    }

    /// Resolved input/output locations
    pub fn paths(&self) -> &Paths {
        &self.paths
    }

    pub fn genres(&self) -> &GenreStore {
        &self.genres
    }

    /// Aggregate every genre in run order
    pub fn aggregate(&self) -> Result<GenreResults> {
        let aggregator = GenreAggregator::new(SourceContext {
            store: self.store,
            fields: &self.config.store,
            paths: &self.paths,
        });

        let mut results = GenreResults::new();
        for genre in self.genres.all() {
            info!("Processing {} sites", genre.name);
            results.insert(aggregator.aggregate(genre)?);
        }
        Ok(results)
    }

    /// Run everything, using the reference list dated `date`
    pub fn run(&self, date: NaiveDate) -> Result<RunReport> {
        let vendor = prepare_vendor_lists(&self.paths, date)?;
        let results = self.aggregate()?;
        let outputs = self.write_outputs(&results)?;

        Ok(RunReport {
            vendor,
            genres: results
                .iter()
                .map(|g| (g.name.clone(), g.domains.len()))
                .collect(),
            outputs,
        })
    }

    /// Write the three encoded blacklists, then the plaintext mapping
    pub fn write_outputs(&self, results: &GenreResults) -> Result<Vec<PathBuf>> {
        let dir = &self.paths.output_dir;
        fs::create_dir_all(dir)?;

        let encoder =
            Encoder::new(self.config.output.hash).with_sentinel(&self.config.output.sentinel);
        let mut written = Vec::new();

        for encoding in [Encoding::Base64, Encoding::Hash, Encoding::HashBase64] {
            let path = dir.join(output_file_name(encoding, &encoder));
            write_json(&path, &encoder.blacklist(results, encoding))?;
            info!("Wrote {}", path.display());
            written.push(path);
        }

        let path = dir.join(output_file_name(Encoding::Plain, &encoder));
        write_json(&path, results)?;
        info!("Wrote {}", path.display());
        written.push(path);

        Ok(written)
    }
}

/// Pretty-printed JSON with four-space indentation
fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut serializer)?;
    fs::write(path, buf)?;
    Ok(())
}
