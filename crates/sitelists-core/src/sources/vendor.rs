//! Vendor List Normalizer
//!
//! Vendor category dumps (`adult.txt`, ...) are noisy: mixed case, wildcard
//! markers, free text. Each one is cleaned, cut down to domains that also
//! appear in the reference list, and cached next to the source as
//! `<category>.dump`. Genre recipes read the cache, so the reference list is
//! loaded once per run no matter how many genres consume vendor data.

use std::collections::BTreeSet;
use std::fs::{self, File};
use std::io::BufReader;
use std::path::{Path, PathBuf};

use tracing::info;
use walkdir::WalkDir;

use crate::domain::{lossy_lines, MIN_LINE_LEN};
use crate::error::{Result, SitelistsError};

use super::reference::ReferenceList;

const CACHE_SUFFIX: &str = "dump";

/// Outcome of normalizing one vendor file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VendorReport {
    pub category: String,
    /// Distinct well-formed domains in the raw file
    pub candidates: usize,
    /// Domains that survived the reference check
    pub written: usize,
    pub cache_path: PathBuf,
}

/// Cleans vendor dumps against the reference list
pub struct VendorNormalizer<'a> {
    dir: PathBuf,
    reference: &'a ReferenceList,
}

impl<'a> VendorNormalizer<'a> {
    pub fn new(dir: &Path, reference: &'a ReferenceList) -> Self {
        Self {
            dir: dir.to_path_buf(),
            reference,
        }
    }

    /// Cache file for `category` inside `dir`
    pub fn cache_path(dir: &Path, category: &str) -> PathBuf {
        dir.join(format!("{}.{}", category, CACHE_SUFFIX))
    }

    /// Clean a single raw line. `None` when the line is not a usable domain.
    pub fn normalize_line(line: &str) -> Option<String> {
        let line = line.to_lowercase();
        let line = line.trim();
        if line.len() <= MIN_LINE_LEN {
            return None;
        }
        let line = line.strip_suffix('*').unwrap_or(line);
        if line.is_empty() || line.chars().any(char::is_whitespace) {
            return None;
        }
        Some(line.to_string())
    }

    /// Normalize every raw file in the directory, skipping previous caches
    pub fn prepare_all(&self) -> Result<Vec<VendorReport>> {
        if !self.dir.is_dir() {
            return Err(SitelistsError::SourceDirNotFound {
                path: self.dir.clone(),
            });
        }

        let mut reports = Vec::new();
        for entry in WalkDir::new(&self.dir)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
        {
            let entry = entry.map_err(std::io::Error::from)?;
            if !entry.file_type().is_file() {
                continue;
            }
            let name = entry.file_name().to_string_lossy();
            if name.ends_with(CACHE_SUFFIX) {
                continue;
            }
            reports.push(self.prepare_file(entry.path())?);
        }

        Ok(reports)
    }

    /// Normalize one raw vendor file and write its cache
    pub fn prepare_file(&self, path: &Path) -> Result<VendorReport> {
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let category = file_name.split('.').next().unwrap_or_default().to_string();
        info!("Working on {}", file_name);

        let reader = BufReader::new(File::open(path)?);
        let mut candidates = BTreeSet::new();
        for line in lossy_lines(reader) {
            if let Some(domain) = Self::normalize_line(&line?) {
                candidates.insert(domain);
            }
        }

        info!("Checking against reference list");
        let mut content = String::new();
        let mut written = 0;
        for domain in candidates.iter().filter(|d| self.reference.contains(d)) {
            content.push_str(domain);
            content.push('\n');
            written += 1;
        }

        let cache_path = Self::cache_path(&self.dir, &category);
        fs::write(&cache_path, content)?;
        info!("Wrote {} domains to {}", written, cache_path.display());

        Ok(VendorReport {
            category,
            candidates: candidates.len(),
            written,
            cache_path,
        })
    }
}
