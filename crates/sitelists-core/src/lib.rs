pub mod config;
pub mod domain;
pub mod encode;
pub mod error;
pub mod genre;
pub mod pipeline;
pub mod sources;
pub mod store;

pub use config::{Config, OutputConfig, Paths, StoreConfig};
pub use encode::{Blacklist, Encoder, Encoding, HashAlgorithm, DEFAULT_SENTINEL};
pub use error::{Result, SitelistsError};
pub use pipeline::{
    check_external, output_file_name, parse_date, prepare_vendor_lists, Pipeline, RunReport,
    BASE64_FILE, PLAIN_FILE,
};
pub use store::{JsonLinesStore, MemoryStore, Query, SiteStore};

// Sources and genres
pub use genre::{
    BuiltinGenre, BuiltinSource, GenreAggregator, GenreConfigEntry, GenreDef, GenreResult,
    GenreResults, GenreStore, GenresConfig, SourceContext, SourceDef, BUILTIN_GENRES,
};
pub use sources::{
    read_domain_list, CategoryContainer, CategoryMatcher, CategoryTreeMatcher, ExternalChecker,
    ExternalReport, HandClassifiedTable, HostParts, PublicSuffixParser, ReferenceList,
    SuffixParser, TldMatcher, VendorNormalizer, VendorReport,
};
