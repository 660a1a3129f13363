//! Hand-Classified Table Reader
//!
//! The DomainAnalysis spreadsheet: roughly a thousand domains classified by
//! hand, exported as `domain<TAB>codes<TAB>...`.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use crate::domain::{lossy_lines, strip_line_end};
use crate::error::{Result, SitelistsError};

/// Reader over the hand classified TSV
#[derive(Debug, Clone)]
pub struct HandClassifiedTable {
    path: PathBuf,
}

impl HandClassifiedTable {
    pub fn open(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(SitelistsError::SourceFileNotFound {
                path: path.to_path_buf(),
            });
        }
        Ok(Self {
            path: path.to_path_buf(),
        })
    }

    /// Domains whose code column contains `code`.
    ///
    /// Containment, not equality: code "18" also selects rows coded "118".
    pub fn domains_with_code(&self, code: &str) -> Result<Vec<String>> {
        let reader = BufReader::new(File::open(&self.path)?);
        let mut domains = Vec::new();

        for line in lossy_lines(reader) {
            let line = line?;
            let mut columns = strip_line_end(&line).split('\t');
            let (Some(domain), Some(codes)) = (columns.next(), columns.next()) else {
                continue;
            };
            if codes.contains(code) {
                domains.push(domain.to_string());
            }
        }

        Ok(domains)
    }
}
