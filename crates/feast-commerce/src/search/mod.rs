//! Search module.
//!
//! Contains restaurant filters and the search query.

mod filter;
mod query;

pub use filter::Filter;
pub use query::{SearchQuery, SortOption};
