//! Genre Store
//!
//! Runtime set of genre recipes: builtins merged with the `[genres]`
//! section of `sitelists.toml`.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SitelistsError};

use super::builtin::{GenreDef, SourceDef, BUILTIN_GENRES};

/// Ordered genre recipes
#[derive(Debug, Clone)]
pub struct GenreStore {
    genres: Vec<GenreDef>,
}

impl GenreStore {
    /// Builtin genres only
    pub fn builtin() -> Self {
        Self {
            genres: BUILTIN_GENRES.iter().map(GenreDef::from).collect(),
        }
    }

    /// Apply config entries
    ///
    /// - same name replaces the recipe in place
    /// - new names are appended in name order
    pub fn with_config(mut self, config: &GenresConfig) -> Self {
        for (name, entry) in &config.genres {
            let def = GenreDef {
                name: name.clone(),
                description: entry.description.clone(),
                sources: entry.sources.clone(),
                false_positives: entry.false_positives.clone(),
            };
            match self.genres.iter_mut().find(|g| &g.name == name) {
                Some(existing) => *existing = def,
                None => self.genres.push(def),
            }
        }
        self
    }

    pub fn get(&self, name: &str) -> Option<&GenreDef> {
        self.genres.iter().find(|g| g.name == name)
    }

    /// Like [`get`](Self::get), as an error for CLI lookups
    pub fn require(&self, name: &str) -> Result<&GenreDef> {
        self.get(name).ok_or_else(|| SitelistsError::GenreNotFound {
            name: name.to_string(),
        })
    }

    /// All genres in run order
    pub fn all(&self) -> &[GenreDef] {
        &self.genres
    }

    pub fn names(&self) -> Vec<&str> {
        self.genres.iter().map(|g| g.name.as_str()).collect()
    }
}

impl Default for GenreStore {
    fn default() -> Self {
        Self::builtin()
    }
}

/// `[genres]` section of `sitelists.toml`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GenresConfig {
    #[serde(flatten)]
    pub genres: BTreeMap<String, GenreConfigEntry>,
}

impl GenresConfig {
    pub fn is_empty(&self) -> bool {
        self.genres.is_empty()
    }
}

/// A single genre recipe from config
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GenreConfigEntry {
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub sources: Vec<SourceDef>,
    #[serde(default)]
    pub false_positives: Vec<String>,
}
