//! Application search across the two registration stores.
//!
//! Childminder applications live in the local Postgres store, Nanny
//! applications behind the record gateway. A search runs a fixed pipeline:
//!
//! 1. **combine** - query the sources selected by [`SearchScope`],
//!    Childminder rows first
//! 2. **normalize** - convert every record into a canonical result
//! 3. **format** - add the status label and page links
//! 4. **order** - most recently accessed first, never-accessed last
//!
//! # Architecture
//!
//! - `ChildminderSearchRepository` - local store, queried with an `Expr` tree
//! - `NannySearchSource` - record gateway, queried with the raw criteria
//! - [`ApplicationSearch`] - the inbound port implemented by [`SearchService`]
//!
//! # Date of birth
//!
//! Caseworkers often only know part of a date of birth. See
//! `DateFragments` for how `"14"`, `"14-12"` or `"14/12/13"` are matched.

mod date_fragments;
mod formatter;
mod normalizer;
mod orderer;
mod query;
pub mod repository;
mod service;
pub mod source;
mod traits;
pub mod types;

pub use service::SearchService;
pub use traits::{ApplicationSearch, SearchError};
pub use types::{ApplicationSummary, FormattedSearchResult, SearchCriteria, SearchScope};
