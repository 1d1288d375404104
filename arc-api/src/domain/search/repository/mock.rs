//! Mock repository implementation for testing.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};
use uuid::Uuid;

use crate::domain::search::query::{AddressScope, Expr, Field, FieldSource};
use crate::domain::search::traits::{ChildminderSearchRepository, Result, SearchError};
use crate::domain::search::types::{ApplicantName, ChildminderRow};

/// An application held by [`MockChildminderRepository`].
#[derive(Debug, Clone)]
pub struct MockChildminderApplication {
    pub row: ChildminderRow,
    pub date_of_birth: Option<(i32, i32, i32)>,
    /// `(postcode, is_childcare_address)`
    pub addresses: Vec<(String, bool)>,
}

impl MockChildminderApplication {
    pub fn new(row: ChildminderRow) -> Self {
        Self {
            row,
            date_of_birth: None,
            addresses: Vec::new(),
        }
    }

    pub fn born(mut self, day: i32, month: i32, year: i32) -> Self {
        self.date_of_birth = Some((day, month, year));
        self
    }

    pub fn with_address(mut self, postcode: &str, childcare: bool) -> Self {
        self.addresses.push((postcode.to_string(), childcare));
        self
    }
}

struct ApplicationView<'a> {
    application: &'a MockChildminderApplication,
    name: Option<&'a ApplicantName>,
}

impl FieldSource for ApplicationView<'_> {
    fn field_values(&self, field: Field) -> Vec<String> {
        let postcodes = |scope: AddressScope| -> Vec<String> {
            self.application
                .addresses
                .iter()
                .filter(|(_, childcare)| match scope {
                    AddressScope::Home => !childcare,
                    AddressScope::Any => true,
                    AddressScope::Childcare => *childcare,
                })
                .map(|(postcode, _)| postcode.clone())
                .collect()
        };
        let dob = |pick: fn((i32, i32, i32)) -> i32| -> Vec<String> {
            self.application
                .date_of_birth
                .map(|d| vec![pick(d).to_string()])
                .unwrap_or_default()
        };

        match field {
            Field::Reference => self
                .application
                .row
                .application_reference
                .iter()
                .cloned()
                .collect(),
            Field::FirstName => self.name.map(|n| n.first_name.clone()).into_iter().collect(),
            Field::LastName => self.name.map(|n| n.last_name.clone()).into_iter().collect(),
            Field::BirthDay => dob(|d| d.0),
            Field::BirthMonth => dob(|d| d.1),
            Field::BirthYear => dob(|d| d.2),
            Field::Postcode(scope) => postcodes(scope),
        }
    }
}

/// Mock Childminder repository that evaluates queries in memory.
///
/// Applications are returned in insertion order.
#[derive(Clone, Default)]
pub struct MockChildminderRepository {
    applications: Arc<RwLock<Vec<MockChildminderApplication>>>,
    names: Arc<RwLock<HashMap<Uuid, ApplicantName>>>,
    search_calls: Arc<AtomicUsize>,
    name_lookups: Arc<AtomicUsize>,
    fail_searches: bool,
}

#[allow(dead_code)]
impl MockChildminderRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// A repository whose searches fail with a database error.
    pub fn failing() -> Self {
        Self {
            fail_searches: true,
            ..Self::default()
        }
    }

    pub fn with_applications(self, applications: Vec<MockChildminderApplication>) -> Self {
        self.applications.write().unwrap().extend(applications);
        self
    }

    pub fn with_name(self, application_id: Uuid, name: ApplicantName) -> Self {
        self.names.write().unwrap().insert(application_id, name);
        self
    }

    /// Number of times `search` was called.
    pub fn search_calls(&self) -> usize {
        self.search_calls.load(Ordering::SeqCst)
    }

    /// Number of times `applicant_name` was called.
    pub fn name_lookups(&self) -> usize {
        self.name_lookups.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ChildminderSearchRepository for MockChildminderRepository {
    async fn search(&self, query: &Expr) -> Result<Vec<ChildminderRow>> {
        self.search_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_searches {
            return Err(SearchError::Database(sqlx::Error::PoolTimedOut));
        }

        let applications = self.applications.read().unwrap();
        let names = self.names.read().unwrap();

        Ok(applications
            .iter()
            .filter(|application| {
                query.matches(&ApplicationView {
                    application,
                    name: names.get(&application.row.application_id),
                })
            })
            .map(|application| application.row.clone())
            .collect())
    }

    async fn applicant_name(&self, application_id: Uuid) -> Result<Option<ApplicantName>> {
        self.name_lookups.fetch_add(1, Ordering::SeqCst);
        Ok(self.names.read().unwrap().get(&application_id).cloned())
    }

    async fn find_application(&self, application_id: Uuid) -> Result<Option<ChildminderRow>> {
        Ok(self
            .applications
            .read()
            .unwrap()
            .iter()
            .find(|application| application.row.application_id == application_id)
            .map(|application| application.row.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::search::query::childminder_query;
    use crate::domain::search::types::{SearchCriteria, SearchScope};

    fn row(reference: &str) -> ChildminderRow {
        ChildminderRow {
            application_id: Uuid::new_v4(),
            application_reference: Some(reference.to_string()),
            application_status: "SUBMITTED".to_string(),
            date_submitted: None,
            date_accessed: None,
        }
    }

    #[tokio::test]
    async fn search_filters_with_query() {
        let jane = MockChildminderApplication::new(row("CM1")).with_address("WA14 2BQ", true);
        let john = MockChildminderApplication::new(row("CM2")).with_address("SW1A 1AA", true);
        let jane_id = jane.row.application_id;
        let john_id = john.row.application_id;

        let repo = MockChildminderRepository::new()
            .with_applications(vec![jane, john])
            .with_name(
                jane_id,
                ApplicantName {
                    first_name: "Jane".to_string(),
                    last_name: "Doe".to_string(),
                },
            )
            .with_name(
                john_id,
                ApplicantName {
                    first_name: "John".to_string(),
                    last_name: "Smith".to_string(),
                },
            );

        let mut criteria = SearchCriteria::new(SearchScope::Childminder);
        criteria.name = "smith".to_string();
        let rows = repo
            .search(&childminder_query(&criteria).unwrap())
            .await
            .unwrap();

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].application_id, john_id);
        assert_eq!(repo.search_calls(), 1);
    }

    #[tokio::test]
    async fn failing_repository_returns_database_error() {
        let repo = MockChildminderRepository::failing();
        let result = repo.search(&Expr::And(vec![])).await;
        assert!(matches!(result, Err(SearchError::Database(_))));
    }

    #[tokio::test]
    async fn find_application_by_id() {
        let application = MockChildminderApplication::new(row("CM1"));
        let id = application.row.application_id;
        let repo = MockChildminderRepository::new().with_applications(vec![application]);

        assert!(repo.find_application(id).await.unwrap().is_some());
        assert!(repo.find_application(Uuid::new_v4()).await.unwrap().is_none());
    }
}
