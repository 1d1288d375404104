//! Query construction for the local Childminder store.
//!
//! Searches are built as an explicit [`Expr`] tree. The Postgres repository
//! translates the tree into SQL; the in-memory test repository evaluates it
//! with `Expr::matches`.

use std::fmt;

use super::date_fragments::{year_candidates, DateFragments};
use super::traits::{Result, SearchError};
use super::types::SearchCriteria;

/// Which of an applicant's addresses a postcode predicate looks at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AddressScope {
    /// Addresses that are not the childcare location.
    Home,
    /// Any address on the application.
    Any,
    /// The childcare location.
    Childcare,
}

/// A searchable attribute of a Childminder application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Reference,
    FirstName,
    LastName,
    BirthDay,
    BirthMonth,
    BirthYear,
    Postcode(AddressScope),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchOp {
    /// Case-insensitive substring match.
    Contains,
    /// Exact equality.
    Equals,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchValue {
    Text(String),
    Number(i32),
}

impl fmt::Display for MatchValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => f.write_str(text),
            Self::Number(number) => write!(f, "{}", number),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldMatch {
    pub field: Field,
    pub op: MatchOp,
    pub value: MatchValue,
}

/// Boolean query over Childminder applications.
///
/// An empty `And` matches everything, an empty `Or` matches nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    And(Vec<Expr>),
    Or(Vec<Expr>),
    Match(FieldMatch),
}

impl Expr {
    pub fn contains(field: Field, text: impl Into<String>) -> Self {
        Self::Match(FieldMatch {
            field,
            op: MatchOp::Contains,
            value: MatchValue::Text(text.into()),
        })
    }

    pub fn equals(field: Field, number: i32) -> Self {
        Self::Match(FieldMatch {
            field,
            op: MatchOp::Equals,
            value: MatchValue::Number(number),
        })
    }

    /// Evaluate the expression against an in-memory record.
    ///
    /// A predicate holds when any of the record's values for the field
    /// satisfies it, so a field with no values never matches.
    #[cfg(test)]
    pub fn matches(&self, record: &impl FieldSource) -> bool {
        match self {
            Self::And(items) => items.iter().all(|item| item.matches(record)),
            Self::Or(items) => items.iter().any(|item| item.matches(record)),
            Self::Match(m) => record
                .field_values(m.field)
                .iter()
                .any(|candidate| value_matches(m, candidate)),
        }
    }
}

#[cfg(test)]
fn value_matches(m: &FieldMatch, candidate: &str) -> bool {
    match (&m.op, &m.value) {
        (MatchOp::Contains, value) => candidate
            .to_lowercase()
            .contains(&value.to_string().to_lowercase()),
        (MatchOp::Equals, MatchValue::Number(number)) => {
            candidate.trim().parse::<i32>().ok() == Some(*number)
        }
        (MatchOp::Equals, MatchValue::Text(text)) => candidate == text,
    }
}

/// Something a query can be evaluated against in memory.
#[cfg(test)]
pub trait FieldSource {
    fn field_values(&self, field: Field) -> Vec<String>;
}

/// Build the Childminder query for the given criteria.
///
/// The result is the conjunction of:
/// - reference substring (skipped when empty)
/// - first-name or last-name substring (always applied)
/// - date-of-birth fragments (skipped when empty)
/// - the address clause, see [`address_clause`]
pub fn childminder_query(criteria: &SearchCriteria) -> Result<Expr> {
    let mut clauses = Vec::new();

    let reference = criteria.reference.trim();
    if !reference.is_empty() {
        clauses.push(Expr::contains(Field::Reference, reference));
    }

    let name = criteria.name.trim();
    clauses.push(Expr::Or(vec![
        Expr::contains(Field::FirstName, name),
        Expr::contains(Field::LastName, name),
    ]));

    if let Some(fragments) = DateFragments::parse(&criteria.date_of_birth)? {
        clauses.push(date_of_birth_clause(&fragments, &criteria.date_of_birth)?);
    }

    clauses.push(address_clause(
        criteria.home_postcode.trim(),
        criteria.care_location_postcode.trim(),
    ));

    Ok(Expr::And(clauses))
}

/// Home postcode is relaxed to match any address; the childcare postcode must
/// match the childcare address itself.
pub fn address_clause(home_postcode: &str, care_location_postcode: &str) -> Expr {
    Expr::And(vec![
        Expr::Or(vec![
            Expr::contains(Field::Postcode(AddressScope::Home), home_postcode),
            Expr::contains(Field::Postcode(AddressScope::Any), home_postcode),
        ]),
        Expr::contains(
            Field::Postcode(AddressScope::Childcare),
            care_location_postcode,
        ),
    ])
}

/// Translate date fragments into birth-date predicates.
///
/// The day is pinned whenever more than one component was given; months and
/// years stay disjunctive among their candidates.
pub fn date_of_birth_clause(fragments: &DateFragments, input: &str) -> Result<Expr> {
    let number = |token: &str| {
        token
            .parse::<i32>()
            .map_err(|_| SearchError::malformed_date(input))
    };
    let years = |token: &str| -> Result<Vec<Expr>> {
        year_candidates(token)
            .iter()
            .map(|year| Ok(Expr::equals(Field::BirthYear, number(year)?)))
            .collect()
    };

    let clause = match fragments {
        DateFragments::Ambiguous(value) => {
            let mut candidates = vec![
                Expr::equals(Field::BirthDay, number(value)?),
                Expr::equals(Field::BirthMonth, number(value)?),
            ];
            candidates.extend(years(value)?);
            Expr::Or(candidates)
        }
        DateFragments::DayThen { day, month_or_year } => {
            let mut candidates = vec![Expr::equals(Field::BirthMonth, number(month_or_year)?)];
            candidates.extend(years(month_or_year)?);
            Expr::And(vec![
                Expr::equals(Field::BirthDay, number(day)?),
                Expr::Or(candidates),
            ])
        }
        DateFragments::Full { day, month, year } => Expr::And(vec![
            Expr::equals(Field::BirthDay, number(day)?),
            Expr::equals(Field::BirthMonth, number(month)?),
            Expr::Or(years(year)?),
        ]),
    };

    Ok(clause)
}
