use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::encode::HashAlgorithm;
use crate::error::{Result, SitelistsError};
use crate::genre::GenresConfig;

const CONFIG_FILE: &str = "sitelists.toml";

/// Default config template with rich comments
const DEFAULT_CONFIG_TEMPLATE: &str = r#"# sitelists configuration file
# Relative paths are resolved against the base directory.

[paths]
# JSON-lines dump of the crawled domains collection
store = "data/domains.jsonl"
# Hand classified spreadsheet (domain<TAB>codes<TAB>...)
hand_classified = "sources/hand_classified/domain_analysis.tsv"
# Vendor category dumps (adult.txt, ...). Cleaned <category>.dump files are written here too
vendor_dir = "sources/comscore"
# Directory holding <YYYY-MM-DD>top-1m.csv
reference_dir = "ranking_files"
# Curated suggestion lists (drugs.txt, ...)
suggested_dir = "sources/suggested"
# Third-party blacklist payload checked by `sitelists check-external`
external_payload = "sources/toulouse/adult/domain"
external_results = "toulouse_check.dump"
# Where sites.json, sitesb64.json, md5.json and md5_b64.json are written
output_dir = "."

[store]
domain_field = "domain"
category_field = "alexa.DMOZ.SITE.CATS.CAT"
category_id_key = "@ID"

[output]
# md5 (default) or sha256
hash = "md5"
sentinel = "example.com"

# Extra genres are appended after the builtin ones (adult, gambling, drugs, alcohol).
# A builtin name here replaces its recipe.
#
# [genres.weapons]
# false_positives = []
# [[genres.weapons.sources]]
# kind = "category_tree"
# includes = ["Weapons"]
# excludes = []
"#;

/// Global configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub paths: Paths,

    #[serde(default)]
    pub store: StoreConfig,

    #[serde(default)]
    pub output: OutputConfig,

    #[serde(default, skip_serializing_if = "GenresConfig::is_empty")]
    pub genres: GenresConfig,
}

/// Input and output locations
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Paths {
    pub store: PathBuf,
    pub hand_classified: PathBuf,
    pub vendor_dir: PathBuf,
    pub reference_dir: PathBuf,
    pub suggested_dir: PathBuf,
    pub external_payload: PathBuf,
    pub external_results: PathBuf,
    pub output_dir: PathBuf,
}

impl Default for Paths {
    fn default() -> Self {
        Self {
            store: PathBuf::from("data/domains.jsonl"),
            hand_classified: PathBuf::from("sources/hand_classified/domain_analysis.tsv"),
            vendor_dir: PathBuf::from("sources/comscore"),
            reference_dir: PathBuf::from("ranking_files"),
            suggested_dir: PathBuf::from("sources/suggested"),
            external_payload: PathBuf::from("sources/toulouse/adult/domain"),
            external_results: PathBuf::from("toulouse_check.dump"),
            output_dir: PathBuf::from("."),
        }
    }
}

impl Paths {
    /// Make every relative path absolute against `base_dir`
    pub fn resolve(&self, base_dir: &Path) -> Self {
        let join = |p: &PathBuf| {
            if p.is_absolute() {
                p.clone()
            } else {
                base_dir.join(p)
            }
        };
        Self {
            store: join(&self.store),
            hand_classified: join(&self.hand_classified),
            vendor_dir: join(&self.vendor_dir),
            reference_dir: join(&self.reference_dir),
            suggested_dir: join(&self.suggested_dir),
            external_payload: join(&self.external_payload),
            external_results: join(&self.external_results),
            output_dir: join(&self.output_dir),
        }
    }
}

/// Field layout of site records
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Field holding the placeholder-encoded domain
    pub domain_field: String,
    /// Dotted path to the category container
    pub category_field: String,
    /// Key carrying the category path inside each container entry
    pub category_id_key: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            domain_field: "domain".to_string(),
            category_field: "alexa.DMOZ.SITE.CATS.CAT".to_string(),
            category_id_key: "@ID".to_string(),
        }
    }
}

/// Output encoding settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub hash: HashAlgorithm,
    /// Entry appended to every flat blacklist
    pub sentinel: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            hash: HashAlgorithm::default(),
            sentinel: "example.com".to_string(),
        }
    }
}

impl Config {
    /// Load config from base directory (defaults when absent)
    pub fn load(base_dir: &Path) -> Result<Self> {
        let path = base_dir.join(CONFIG_FILE);
        if !path.exists() {
            return Ok(Self::default());
        }
        Self::load_from(&path)
    }

    /// Load config from an explicit file
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content).map_err(|e| SitelistsError::ConfigParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Ok(config)
    }

    /// Save config to base directory
    pub fn save(&self, base_dir: &Path) -> Result<()> {
        let path = base_dir.join(CONFIG_FILE);
        fs::create_dir_all(base_dir)?;
        fs::write(&path, self.to_toml()?)?;
        Ok(())
    }

    /// Effective configuration as TOML
    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Get config file path
    pub fn path(base_dir: &Path) -> PathBuf {
        base_dir.join(CONFIG_FILE)
    }

    /// Initialize config with default template (rich comments)
    pub fn init(base_dir: &Path) -> Result<PathBuf> {
        let path = base_dir.join(CONFIG_FILE);
        fs::create_dir_all(base_dir)?;

        if !path.exists() {
            fs::write(&path, DEFAULT_CONFIG_TEMPLATE)?;
        }

        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::genre::SourceDef;
    use tempfile::TempDir;

    #[test]
    fn test_missing_config_is_default() {
        let temp = TempDir::new().unwrap();
        let config = Config::load(temp.path()).unwrap();
        assert_eq!(config.paths, Paths::default());
        assert_eq!(config.output.sentinel, "example.com");
        assert_eq!(config.output.hash, HashAlgorithm::Md5);
    }

    #[test]
    fn test_template_parses_to_defaults() {
        let temp = TempDir::new().unwrap();
        let path = Config::init(temp.path()).unwrap();
        assert_eq!(path, Config::path(temp.path()));

        let config = Config::load(temp.path()).unwrap();
        assert_eq!(config.paths, Paths::default());
        assert_eq!(config.store, StoreConfig::default());
        assert!(config.genres.is_empty());
    }

    #[test]
    fn test_partial_config_keeps_other_defaults() {
        let temp = TempDir::new().unwrap();
        fs::write(
            Config::path(temp.path()),
            r#"
[paths]
vendor_dir = "vendor"

[output]
hash = "sha256"

[genres.weapons]
[[genres.weapons.sources]]
kind = "category_tree"
includes = ["Weapons"]
"#,
        )
        .unwrap();

        let config = Config::load(temp.path()).unwrap();
        assert_eq!(config.paths.vendor_dir, PathBuf::from("vendor"));
        assert_eq!(config.paths.store, Paths::default().store);
        assert_eq!(config.output.hash, HashAlgorithm::Sha256);
        assert_eq!(config.output.sentinel, "example.com");

        let weapons = &config.genres.genres["weapons"];
        assert!(weapons.false_positives.is_empty());
        assert_eq!(
            weapons.sources,
            vec![SourceDef::CategoryTree {
                includes: vec!["Weapons".to_string()],
                excludes: Vec::new(),
            }]
        );
    }

    #[test]
    fn test_invalid_config_is_parse_error() {
        let temp = TempDir::new().unwrap();
        fs::write(Config::path(temp.path()), "[output]\nhash = \"crc32\"\n").unwrap();
        let err = Config::load(temp.path()).unwrap_err();
        assert!(matches!(err, SitelistsError::ConfigParse { .. }));
    }

    #[test]
    fn test_save_load_roundtrip() {
        let temp = TempDir::new().unwrap();
        let mut config = Config::default();
        config.paths.output_dir = PathBuf::from("out");
        config.save(temp.path()).unwrap();

        let loaded = Config::load(temp.path()).unwrap();
        assert_eq!(loaded.paths.output_dir, PathBuf::from("out"));
    }

    #[test]
    fn test_resolve_joins_relative_paths_only() {
        let mut paths = Paths::default();
        paths.output_dir = PathBuf::from("/srv/lists");
        let resolved = paths.resolve(Path::new("/data/run"));
        assert_eq!(resolved.vendor_dir, PathBuf::from("/data/run/sources/comscore"));
        assert_eq!(resolved.output_dir, PathBuf::from("/srv/lists"));
    }
}
