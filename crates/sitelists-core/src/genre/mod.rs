//! # Genre Module
//!
//! A genre (adult, gambling, drugs, alcohol, ...) is one key of the output
//! mapping. Each genre has a recipe: the sources to union and the false
//! positives to drop afterwards.
//!
//! - `builtin`: the four builtin recipes
//! - `store`: builtins merged with config-defined recipes
//! - `aggregator`: runs a recipe against the sources
//! - `result`: per-genre results in run order
//!
//! ```rust
//! use sitelists_core::genre::{GenreStore, SourceDef};
//!
//! let store = GenreStore::builtin();
//! let alcohol = store.get("alcohol").unwrap();
//! assert!(matches!(
//!     &alcohol.sources[0],
//!     SourceDef::CategoryTree { excludes, .. } if excludes == &["DOS_and_Windows"]
//! ));
//! ```

mod aggregator;
mod builtin;
mod result;
mod store;

pub use aggregator::{GenreAggregator, SourceContext};
pub use builtin::{BuiltinGenre, BuiltinSource, GenreDef, SourceDef, BUILTIN_GENRES};
pub use result::{GenreResult, GenreResults};
pub use store::{GenreConfigEntry, GenreStore, GenresConfig};
