//! Search - filtered catalog queries with pagination
//!
//! Builds parameterized SQL per view mode (signs / blocks / graphemes),
//! ANDs the active predicates, and pages with LIMIT/OFFSET alongside a
//! separate COUNT query. No ranking; free text matches via SQL LIKE.

pub mod engine;
pub mod filters;
pub mod query;

pub use engine::{SearchEngine, SearchResults};
pub use filters::{Page, SearchFilters, SortBy, ViewMode, DEFAULT_PAGE_SIZE};
pub use query::{blocks_query, graphemes_query, signs_query, SearchQuery};
