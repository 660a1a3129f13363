//! Builtin Genre Definitions
//!
//! The genres every run produces, with the source recipe for each.
//! The config file can replace a recipe or add new genres.

use serde::{Deserialize, Serialize};

/// Builtin genres, in output order
pub const BUILTIN_GENRES: &[BuiltinGenre] = &[
    BuiltinGenre {
        name: "adult",
        description: "Adult / pornographic sites.",
        sources: &[
            BuiltinSource::CategoryTree {
                includes: &["Adult"],
                excludes: &[],
            },
            BuiltinSource::HandClassified { code: "18" },
            BuiltinSource::Tld { suffix: "xxx" },
            BuiltinSource::VendorCache { category: "adult" },
        ],
        false_positives: &[],
    },
    BuiltinGenre {
        name: "gambling",
        description: "Casinos, betting and card game sites.",
        sources: &[BuiltinSource::CategoryTree {
            includes: &["Poker", "Gambling", "Blackjack"],
            excludes: &[],
        }],
        false_positives: &[],
    },
    BuiltinGenre {
        name: "drugs",
        description: "Recreational drug sites.",
        sources: &[
            BuiltinSource::CategoryTree {
                includes: &["Drugs"],
                excludes: &[],
            },
            BuiltinSource::Suggested { file: "drugs.txt" },
        ],
        // mushroom retailer, shares vocabulary with psychedelics
        false_positives: &["fungi.com"],
    },
    BuiltinGenre {
        name: "alcohol",
        description: "Wine, beer and liquor sites.",
        sources: &[BuiltinSource::CategoryTree {
            includes: &["Wine", "Beer", "Liquor"],
            // "Wine" is also the Windows compatibility layer
            excludes: &["DOS_and_Windows"],
        }],
        false_positives: &[],
    },
];

/// Static genre definition
#[derive(Debug, Clone)]
pub struct BuiltinGenre {
    pub name: &'static str,
    pub description: &'static str,
    pub sources: &'static [BuiltinSource],
    pub false_positives: &'static [&'static str],
}

/// Static source recipe
#[derive(Debug, Clone)]
pub enum BuiltinSource {
    CategoryTree {
        includes: &'static [&'static str],
        excludes: &'static [&'static str],
    },
    HandClassified {
        code: &'static str,
    },
    Tld {
        suffix: &'static str,
    },
    VendorCache {
        category: &'static str,
    },
    Suggested {
        file: &'static str,
    },
}

/// Runtime source recipe
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SourceDef {
    /// Site store records whose category paths match
    CategoryTree {
        includes: Vec<String>,
        #[serde(default)]
        excludes: Vec<String>,
    },
    /// Hand classified rows whose code column contains `code`
    HandClassified { code: String },
    /// Site store domains ending with `suffix`
    Tld { suffix: String },
    /// Cleaned vendor list `<category>.dump`
    VendorCache { category: String },
    /// Curated list in the suggestion directory
    Suggested { file: String },
}

impl SourceDef {
    /// Short label for logs
    pub fn label(&self) -> String {
        match self {
            Self::CategoryTree { includes, .. } => format!("category tree {:?}", includes),
            Self::HandClassified { code } => format!("hand classified '{}'", code),
            Self::Tld { suffix } => format!("suffix '{}'", suffix),
            Self::VendorCache { category } => format!("vendor list '{}'", category),
            Self::Suggested { file } => format!("suggestions '{}'", file),
        }
    }
}

impl From<&BuiltinSource> for SourceDef {
    fn from(builtin: &BuiltinSource) -> Self {
        match builtin {
            BuiltinSource::CategoryTree { includes, excludes } => Self::CategoryTree {
                includes: owned(includes),
                excludes: owned(excludes),
            },
            BuiltinSource::HandClassified { code } => Self::HandClassified {
                code: code.to_string(),
            },
            BuiltinSource::Tld { suffix } => Self::Tld {
                suffix: suffix.to_string(),
            },
            BuiltinSource::VendorCache { category } => Self::VendorCache {
                category: category.to_string(),
            },
            BuiltinSource::Suggested { file } => Self::Suggested {
                file: file.to_string(),
            },
        }
    }
}

fn owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Runtime genre definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenreDef {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub sources: Vec<SourceDef>,
    #[serde(default)]
    pub false_positives: Vec<String>,
}

impl From<&BuiltinGenre> for GenreDef {
    fn from(builtin: &BuiltinGenre) -> Self {
        Self {
            name: builtin.name.to_string(),
            description: builtin.description.to_string(),
            sources: builtin.sources.iter().map(SourceDef::from).collect(),
            false_positives: owned(builtin.false_positives),
        }
    }
}
