//! # Source Adapters
//!
//! One adapter per kind of input. Each returns plain domain lists; merging,
//! deduplication and false-positive removal happen in the genre aggregator.
//!
//! - `category_tree`: DMOZ category paths in the site store
//! - `hand_classified`: DomainAnalysis spreadsheet
//! - `tld`: store domains by suffix
//! - `text_list`: suggestion lists and vendor caches
//! - `reference`: the dated top-1m list used as a filter
//! - `vendor`: vendor dump normalizer (writes the caches)
//! - `external`: third-party blacklist checker

mod category_tree;
mod external;
mod hand_classified;
mod reference;
mod text_list;
mod tld;
mod vendor;

pub use category_tree::{CategoryContainer, CategoryMatcher, CategoryTreeMatcher};
pub use external::{ExternalChecker, ExternalReport, HostParts, PublicSuffixParser, SuffixParser};
pub use hand_classified::HandClassifiedTable;
pub use reference::ReferenceList;
pub use text_list::read_domain_list;
pub use tld::TldMatcher;
pub use vendor::{VendorNormalizer, VendorReport};
