//! External Blacklist Checker
//!
//! Cross-references a third-party blacklist payload (the Toulouse
//! university list: <http://dsi.ut-capitole.fr/blacklists/index_en.php>)
//! against the reference list. Only apex entries count: a payload line with
//! a subdomain never produces a match, even when its registrable domain is
//! popular.

use std::fs::{self, File};
use std::io::BufReader;
use std::path::{Path, PathBuf};

use tldextract::{TldExtractor, TldOption};
use tracing::{debug, info};

use crate::domain::{clean_list_line, lossy_lines};
use crate::error::{Result, SitelistsError};

use super::reference::ReferenceList;

/// A host split at the public suffix boundary
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HostParts {
    pub subdomain: String,
    pub domain: String,
    pub suffix: String,
}

impl HostParts {
    /// `domain.suffix`, when both parts are present
    pub fn registrable(&self) -> Option<String> {
        if self.domain.is_empty() || self.suffix.is_empty() {
            return None;
        }
        Some(format!("{}.{}", self.domain, self.suffix))
    }
}

/// Splits hosts or URLs into subdomain / domain / suffix
pub trait SuffixParser {
    fn split(&self, input: &str) -> Option<HostParts>;
}

/// Public Suffix List aware parser backed by `tldextract`
pub struct PublicSuffixParser {
    extractor: TldExtractor,
}

impl PublicSuffixParser {
    pub fn new() -> Self {
        Self {
            extractor: TldOption::default().build(),
        }
    }
}

impl Default for PublicSuffixParser {
    fn default() -> Self {
        Self::new()
    }
}

impl SuffixParser for PublicSuffixParser {
    fn split(&self, input: &str) -> Option<HostParts> {
        let url = if input.contains("://") {
            input.to_string()
        } else {
            format!("http://{}", input)
        };
        let result = self.extractor.extract(&url).ok()?;
        Some(HostParts {
            subdomain: result.subdomain.unwrap_or_default(),
            domain: result.domain.unwrap_or_default(),
            suffix: result.suffix.unwrap_or_default(),
        })
    }
}

/// Outcome of a payload check
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExternalReport {
    /// Payload lines long enough to be considered
    pub scanned: usize,
    /// Apex domains found in the reference list
    pub matched: usize,
    pub results_path: PathBuf,
}

/// Checks a third-party payload against the reference list
pub struct ExternalChecker<'a, P: SuffixParser> {
    reference: &'a ReferenceList,
    parser: P,
}

impl<'a, P: SuffixParser> ExternalChecker<'a, P> {
    pub fn new(reference: &'a ReferenceList, parser: P) -> Self {
        Self { reference, parser }
    }

    /// Registrable domain of `line` if it is an apex entry in the reference list
    pub fn check_line(&self, line: &str) -> Option<String> {
        let Some(parts) = self.parser.split(line) else {
            debug!("Unparseable payload line: {}", line);
            return None;
        };
        if !parts.subdomain.is_empty() {
            return None;
        }
        parts
            .registrable()
            .filter(|domain| self.reference.contains(domain))
    }

    /// Scan `payload` and write matches to `results`, one per line, in payload order
    pub fn check(&self, payload: &Path, results: &Path) -> Result<ExternalReport> {
        if !payload.is_file() {
            return Err(SitelistsError::SourceFileNotFound {
                path: payload.to_path_buf(),
            });
        }

        info!("Importing external payload {}", payload.display());
        let reader = BufReader::new(File::open(payload)?);
        let mut content = String::new();
        let mut scanned = 0;
        let mut matched = 0;

        for line in lossy_lines(reader) {
            let line = line?;
            let Some(line) = clean_list_line(&line) else {
                continue;
            };
            scanned += 1;
            if let Some(domain) = self.check_line(line) {
                content.push_str(&domain);
                content.push('\n');
                matched += 1;
            }
        }

        if let Some(parent) = results.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(results, content)?;
        info!(
            "{} found in reference list. Written to {}",
            matched,
            results.display()
        );

        Ok(ExternalReport {
            scanned,
            matched,
            results_path: results.to_path_buf(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    /// Treats the last label as the suffix, except for a couple of known
    /// two-label suffixes.
    struct NaiveParser;

    impl SuffixParser for NaiveParser {
        fn split(&self, input: &str) -> Option<HostParts> {
            let host = input
                .split("://")
                .last()?
                .split('/')
                .next()?
                .to_lowercase();
            let labels: Vec<&str> = host.split('.').collect();
            if labels.len() < 2 {
                return None;
            }
            let suffix_len = if host.ends_with(".co.uk") { 2 } else { 1 };
            let (rest, suffix) = labels.split_at(labels.len() - suffix_len);
            let (domain, subdomain) = rest.split_last()?;
            Some(HostParts {
                subdomain: subdomain.join("."),
                domain: domain.to_string(),
                suffix: suffix.join("."),
            })
        }
    }

    fn reference() -> ReferenceList {
        ["pornhub.com", "xhamster.com", "adult.co.uk"].into_iter().collect()
    }

    #[test]
    fn test_registrable_requires_both_parts() {
        let parts = HostParts {
            subdomain: String::new(),
            domain: "example".to_string(),
            suffix: "com".to_string(),
        };
        assert_eq!(parts.registrable(), Some("example.com".to_string()));
        assert_eq!(HostParts::default().registrable(), None);
    }

    #[test]
    fn test_apex_lines_in_reference_match() {
        let reference = reference();
        let checker = ExternalChecker::new(&reference, NaiveParser);
        assert_eq!(checker.check_line("pornhub.com"), Some("pornhub.com".to_string()));
        assert_eq!(checker.check_line("adult.co.uk"), Some("adult.co.uk".to_string()));
        assert_eq!(checker.check_line("unknown.com"), None);
    }

    #[test]
    fn test_subdomain_lines_never_match() {
        let reference = reference();
        let checker = ExternalChecker::new(&reference, NaiveParser);
        assert_eq!(checker.check_line("www.pornhub.com"), None);
        assert_eq!(checker.check_line("videos.adult.co.uk"), None);
    }

    #[test]
    fn test_check_writes_results_in_payload_order() {
        let temp = TempDir::new().unwrap();
        let payload = temp.path().join("domain");
        let results = temp.path().join("out").join("toulouse_check.dump");
        std::fs::write(
            &payload,
            "xhamster.com\nwww.pornhub.com\nabc\nunknown.org\npornhub.com/some/path\n",
        )
        .unwrap();

        let reference = reference();
        let report = ExternalChecker::new(&reference, NaiveParser)
            .check(&payload, &results)
            .unwrap();

        assert_eq!(report.scanned, 4);
        assert_eq!(report.matched, 2);
        assert_eq!(
            std::fs::read_to_string(&results).unwrap(),
            "xhamster.com\npornhub.com\n"
        );
    }

    #[test]
    fn test_missing_payload_is_precondition_error() {
        let temp = TempDir::new().unwrap();
        let reference = reference();
        let err = ExternalChecker::new(&reference, NaiveParser)
            .check(&temp.path().join("domain"), &temp.path().join("out.dump"))
            .unwrap_err();
        assert!(matches!(err, SitelistsError::SourceFileNotFound { .. }));
    }

    #[test]
    fn test_non_utf8_payload_line_is_skipped() {
        let temp = TempDir::new().unwrap();
        let payload = temp.path().join("domain");
        let results = temp.path().join("toulouse_check.dump");
        std::fs::write(&payload, b"xhamster.com\nsex\xe9shop.com\npornhub.com\n").unwrap();

        let reference = reference();
        let report = ExternalChecker::new(&reference, NaiveParser)
            .check(&payload, &results)
            .unwrap();

        assert_eq!(report.scanned, 3);
        assert_eq!(
            std::fs::read_to_string(&results).unwrap(),
            "xhamster.com\npornhub.com\n"
        );
    }

    #[test]
    fn test_public_suffix_parser_splits_at_psl_boundary() {
        let parser = PublicSuffixParser::new();

        let parts = parser.split("example.co.uk").unwrap();
        assert_eq!(parts.subdomain, "");
        assert_eq!(parts.domain, "example");
        assert_eq!(parts.suffix, "co.uk");

        let parts = parser.split("www.example.co.uk").unwrap();
        assert_eq!(parts.subdomain, "www");
        assert_eq!(parts.registrable(), Some("example.co.uk".to_string()));

        assert!(parser
            .split("localhost")
            .and_then(|parts| parts.registrable())
            .is_none());
    }

    #[test]
    fn test_checker_with_public_suffix_parser() {
        let reference: ReferenceList = ["example.co.uk", "pornhub.com"].into_iter().collect();
        let checker = ExternalChecker::new(&reference, PublicSuffixParser::new());

        assert_eq!(
            checker.check_line("example.co.uk"),
            Some("example.co.uk".to_string())
        );
        assert_eq!(checker.check_line("www.example.co.uk"), None);
        assert_eq!(
            checker.check_line("pornhub.com/some/path"),
            Some("pornhub.com".to_string())
        );
        assert_eq!(checker.check_line("localhost"), None);
    }
}
