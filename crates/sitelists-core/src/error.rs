use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SitelistsError {
    #[error("Reference list not found: {path} (download it before running)")]
    ReferenceListNotFound { path: PathBuf },

    #[error("Source directory does not exist: {path}")]
    SourceDirNotFound { path: PathBuf },

    #[error("Source file does not exist: {path}")]
    SourceFileNotFound { path: PathBuf },

    #[error("Site store not found: {path}")]
    StoreNotFound { path: PathBuf },

    #[error("Failed to parse site store {path} at line {line}: {message}")]
    StoreParse {
        path: PathBuf,
        line: usize,
        message: String,
    },

    #[error("Failed to parse config {path}: {message}")]
    ConfigParse { path: PathBuf, message: String },

    #[error("Genre not found: {name}")]
    GenreNotFound { name: String },

    #[error("Invalid date '{value}' - expected YYYY-MM-DD")]
    InvalidDate { value: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML serialization error: {0}")]
    TomlSer(#[from] toml::ser::Error),
}

pub type Result<T> = std::result::Result<T, SitelistsError>;

impl SitelistsError {
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ReferenceListNotFound { .. } => 2,
            Self::SourceDirNotFound { .. } | Self::SourceFileNotFound { .. } => 3,
            Self::StoreNotFound { .. } => 4,
            Self::ConfigParse { .. } | Self::InvalidDate { .. } => 5,
            _ => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_precondition_errors_have_distinct_exit_codes() {
        let reference = SitelistsError::ReferenceListNotFound {
            path: PathBuf::from("ranking_files/2015-04-22top-1m.csv"),
        };
        let dir = SitelistsError::SourceDirNotFound {
            path: PathBuf::from("sources/comscore"),
        };
        let other = SitelistsError::GenreNotFound {
            name: "weapons".to_string(),
        };

        assert_eq!(reference.exit_code(), 2);
        assert_eq!(dir.exit_code(), 3);
        assert_eq!(other.exit_code(), 1);
        assert!(reference.to_string().contains("2015-04-22top-1m.csv"));
    }
}
