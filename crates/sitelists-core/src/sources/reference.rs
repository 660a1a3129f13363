//! Reference List Loader
//!
//! The dated "top 1m" ranking (`<YYYY-MM-DD>top-1m.csv`, `rank,domain` rows).
//! The operator downloads it before a run; it is never fetched here.

use std::collections::HashSet;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use tracing::{info, warn};

use crate::domain::{clean_list_line, lossy_lines};
use crate::error::{Result, SitelistsError};

const FILE_SUFFIX: &str = "top-1m.csv";

/// Set of popular domains used to validate noisy candidates
#[derive(Debug, Clone, Default)]
pub struct ReferenceList {
    domains: HashSet<String>,
}

impl ReferenceList {
    /// Path of the ranking file for `date` inside `dir`
    pub fn dated_path(dir: &Path, date: NaiveDate) -> PathBuf {
        dir.join(format!("{}{}", date.format("%Y-%m-%d"), FILE_SUFFIX))
    }

    /// Load the ranking file for `date`
    pub fn load_dated(dir: &Path, date: NaiveDate) -> Result<Self> {
        Self::load(&Self::dated_path(dir, date))
    }

    /// Load a `rank,domain` file
    pub fn load(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(SitelistsError::ReferenceListNotFound {
                path: path.to_path_buf(),
            });
        }

        let reader = BufReader::new(File::open(path)?);
        let mut domains = HashSet::new();
        for (idx, line) in lossy_lines(reader).enumerate() {
            let line = line?;
            let Some(row) = clean_list_line(&line) else {
                continue;
            };
            match row.split(',').nth(1) {
                Some(domain) => {
                    domains.insert(domain.to_lowercase());
                }
                None => warn!("{}:{}: row without domain column", path.display(), idx + 1),
            }
        }

        info!("Loaded {} reference domains from {}", domains.len(), path.display());
        Ok(Self { domains })
    }

    pub fn contains(&self, domain: &str) -> bool {
        self.domains.contains(domain)
    }

    pub fn len(&self) -> usize {
        self.domains.len()
    }

    pub fn is_empty(&self) -> bool {
        self.domains.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for ReferenceList {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            domains: iter.into_iter().map(Into::into).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_dated_path_format() {
        let date = NaiveDate::from_ymd_opt(2015, 4, 22).unwrap();
        let path = ReferenceList::dated_path(Path::new("ranking_files"), date);
        assert_eq!(path, PathBuf::from("ranking_files/2015-04-22top-1m.csv"));
    }

    #[test]
    fn test_load_case_folds_domains() {
        let temp = TempDir::new().unwrap();
        let date = NaiveDate::from_ymd_opt(2015, 4, 22).unwrap();
        fs::write(
            ReferenceList::dated_path(temp.path(), date),
            "1,Google.com\n2,facebook.com\r\n3\n\n4,Example.ORG\n",
        )
        .unwrap();

        let reference = ReferenceList::load_dated(temp.path(), date).unwrap();
        assert_eq!(reference.len(), 3);
        assert!(reference.contains("google.com"));
        assert!(reference.contains("facebook.com"));
        assert!(reference.contains("example.org"));
        assert!(!reference.contains("Google.com"));
    }

    #[test]
    fn test_missing_file_fails_loudly() {
        let temp = TempDir::new().unwrap();
        let date = NaiveDate::from_ymd_opt(2015, 4, 22).unwrap();
        match ReferenceList::load_dated(temp.path(), date) {
            Err(SitelistsError::ReferenceListNotFound { path }) => {
                assert!(path.ends_with("2015-04-22top-1m.csv"));
            }
            other => panic!("expected ReferenceListNotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_non_utf8_row_does_not_abort() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("top-1m.csv");
        fs::write(&path, b"1,google.com\n2,caf\xe9.fr\n3,example.org\n").unwrap();

        let reference = ReferenceList::load(&path).unwrap();
        assert_eq!(reference.len(), 3);
        assert!(reference.contains("google.com"));
        assert!(reference.contains("example.org"));
    }
}
