//! Parser for partial dates of birth typed into the search form.
//!
//! Caseworkers enter anything from a bare year to a full date, with whatever
//! separators they like. The parsed fragments are interpreted loosely: a lone
//! component may be a day, a month or a year, and two-digit years match both
//! the 1900s and the 2000s.

use regex::Regex;
use std::sync::LazyLock;

use super::traits::{Result, SearchError};

static SEPARATOR_PATTERN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\D+").unwrap());

/// Longest numeric component accepted in a date of birth.
const MAX_COMPONENT_DIGITS: usize = 4;

/// Components of a (possibly partial) date of birth.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateFragments {
    /// A single component that may be a day, a month or a year.
    Ambiguous(String),
    /// A day followed by a component that may be a month or a year.
    DayThen { day: String, month_or_year: String },
    /// A complete date.
    Full {
        day: String,
        month: String,
        year: String,
    },
}

impl DateFragments {
    /// Parse a date of birth. Returns `Ok(None)` for empty input, in which case
    /// no date filtering should happen at all.
    ///
    /// # Examples
    ///
    /// ```ignore
    /// let full = DateFragments::parse("14/12/2013")?.unwrap();
    /// assert_eq!(full.year(), Some("2013"));
    ///
    /// let iso = DateFragments::parse("2013-12-14")?.unwrap();
    /// assert_eq!(iso.day(), Some("14"));
    /// ```
    pub fn parse(input: &str) -> Result<Option<Self>> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Ok(None);
        }

        let tokens: Vec<&str> = SEPARATOR_PATTERN
            .split(trimmed)
            .filter(|token| !token.is_empty())
            .collect();

        if tokens.iter().any(|token| token.len() > MAX_COMPONENT_DIGITS) {
            return Err(SearchError::malformed_date(input));
        }

        let fragments = match tokens.as_slice() {
            [value] => Self::Ambiguous(value.to_string()),
            [day, month_or_year] => Self::DayThen {
                day: day.to_string(),
                month_or_year: month_or_year.to_string(),
            },
            // yyyy-mm-dd
            [year, month, day] if year.len() == 4 => Self::Full {
                day: day.to_string(),
                month: month.to_string(),
                year: year.to_string(),
            },
            [day, month, year] => Self::Full {
                day: day.to_string(),
                month: month.to_string(),
                year: year.to_string(),
            },
            _ => return Err(SearchError::malformed_date(input)),
        };

        Ok(Some(fragments))
    }

    #[cfg(test)]
    pub fn day(&self) -> Option<&str> {
        match self {
            Self::Ambiguous(value) => Some(value),
            Self::DayThen { day, .. } | Self::Full { day, .. } => Some(day),
        }
    }

    #[cfg(test)]
    pub fn month(&self) -> Option<&str> {
        match self {
            Self::Ambiguous(value) => Some(value),
            Self::DayThen { month_or_year, .. } => Some(month_or_year),
            Self::Full { month, .. } => Some(month),
        }
    }

    #[cfg(test)]
    pub fn year(&self) -> Option<&str> {
        match self {
            Self::Ambiguous(value) => Some(value),
            Self::DayThen { month_or_year, .. } => Some(month_or_year),
            Self::Full { year, .. } => Some(year),
        }
    }
}

/// Candidate years for a year component: two-digit years expand to both
/// centuries, anything else is taken as written.
pub fn year_candidates(year: &str) -> Vec<String> {
    if year.len() == 2 {
        vec![format!("19{}", year), format!("20{}", year)]
    } else {
        vec![year.to_string()]
    }
}
