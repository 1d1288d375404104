//! Final display ordering of search results.

use std::cmp::{Ordering, Reverse};

use time::{macros::format_description, Date};

use super::types::FormattedSearchResult;

/// Order results by when they were last accessed, most recent first, with
/// never-accessed results last. The sort is stable, so results accessed on the
/// same day keep their relative order.
pub fn order_results(mut results: Vec<FormattedSearchResult>) -> Vec<FormattedSearchResult> {
    results.sort_by(compare_accessed);
    results
}

fn compare_accessed(a: &FormattedSearchResult, b: &FormattedSearchResult) -> Ordering {
    access_key(a.date_accessed.as_deref()).cmp(&access_key(b.date_accessed.as_deref()))
}

#[derive(Debug, PartialEq, Eq, PartialOrd, Ord)]
enum AccessKey<'a> {
    Dated(Reverse<Date>),
    /// Non-empty but not a `dd/mm/yyyy` date.
    Undated(Reverse<&'a str>),
    Never,
}

fn access_key(date_accessed: Option<&str>) -> AccessKey<'_> {
    let Some(value) = date_accessed.map(str::trim).filter(|v| !v.is_empty()) else {
        return AccessKey::Never;
    };

    match Date::parse(value, format_description!("[day]/[month]/[year]")) {
        Ok(date) => AccessKey::Dated(Reverse(date)),
        Err(_) => AccessKey::Undated(Reverse(value)),
    }
}
