use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::domain::{clean_list_line, lossy_lines};
use crate::error::{Result, SitelistsError};

/// Read a one-domain-per-line file (suggestion lists, vendor caches).
pub fn read_domain_list(path: &Path) -> Result<Vec<String>> {
    if !path.is_file() {
        return Err(SitelistsError::SourceFileNotFound {
            path: path.to_path_buf(),
        });
    }

    let reader = BufReader::new(File::open(path)?);
    let mut domains = Vec::new();
    for line in lossy_lines(reader) {
        let line = line?;
        if let Some(domain) = clean_list_line(&line) {
            domains.push(domain.to_string());
        }
    }
    Ok(domains)
}
