//! PostgreSQL repository for Childminder applications.
//!
//! Queries run against the tables owned by the Childminder registration
//! service:
//! - `application` (one row per application)
//! - `applicant_names`, `applicant_personal_details`, `applicant_home_address`
//!   (keyed by `application_id`)

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::domain::search::query::{AddressScope, Expr, Field, FieldMatch, MatchOp, MatchValue};
use crate::domain::search::traits::{ChildminderSearchRepository, Result};
use crate::domain::search::types::{ApplicantName, ChildminderRow};

const SELECT_APPLICATIONS: &str = r#"
SELECT
    a.application_id,
    a.application_reference,
    a.application_status,
    a.date_submitted,
    a.date_accessed
FROM application a
WHERE "#;

#[derive(Clone)]
pub struct PgChildminderRepository {
    pool: PgPool,
}

impl PgChildminderRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ChildminderSearchRepository for PgChildminderRepository {
    async fn search(&self, query: &Expr) -> Result<Vec<ChildminderRow>> {
        let mut builder = QueryBuilder::<Postgres>::new(SELECT_APPLICATIONS);
        push_expr(&mut builder, query);
        builder.push(" ORDER BY a.date_submitted DESC NULLS LAST, a.application_id");

        let rows = builder
            .build_query_as::<ChildminderRow>()
            .fetch_all(&self.pool)
            .await?;

        Ok(rows)
    }

    async fn applicant_name(&self, application_id: Uuid) -> Result<Option<ApplicantName>> {
        let name = sqlx::query_as::<_, ApplicantName>(
            r#"
            SELECT first_name, last_name
            FROM applicant_names
            WHERE application_id = $1
            LIMIT 1
            "#,
        )
        .bind(application_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(name)
    }

    async fn find_application(&self, application_id: Uuid) -> Result<Option<ChildminderRow>> {
        let mut builder = QueryBuilder::<Postgres>::new(SELECT_APPLICATIONS);
        builder.push("a.application_id = ");
        builder.push_bind(application_id);

        let row = builder
            .build_query_as::<ChildminderRow>()
            .fetch_optional(&self.pool)
            .await?;

        Ok(row)
    }
}

/// Where a field lives relative to the `application a` row.
enum Column {
    Application(&'static str),
    Related {
        table: &'static str,
        column: &'static str,
        condition: Option<&'static str>,
    },
}

fn column_for(field: Field) -> Column {
    let address = |condition| Column::Related {
        table: "applicant_home_address",
        column: "postcode",
        condition,
    };

    match field {
        Field::Reference => Column::Application("a.application_reference"),
        Field::FirstName => Column::Related {
            table: "applicant_names",
            column: "first_name",
            condition: None,
        },
        Field::LastName => Column::Related {
            table: "applicant_names",
            column: "last_name",
            condition: None,
        },
        Field::BirthDay => Column::Related {
            table: "applicant_personal_details",
            column: "birth_day",
            condition: None,
        },
        Field::BirthMonth => Column::Related {
            table: "applicant_personal_details",
            column: "birth_month",
            condition: None,
        },
        Field::BirthYear => Column::Related {
            table: "applicant_personal_details",
            column: "birth_year",
            condition: None,
        },
        Field::Postcode(AddressScope::Home) => address(Some("r.childcare_address = FALSE")),
        Field::Postcode(AddressScope::Any) => address(None),
        Field::Postcode(AddressScope::Childcare) => address(Some("r.childcare_address = TRUE")),
    }
}

fn push_expr(builder: &mut QueryBuilder<'_, Postgres>, expr: &Expr) {
    match expr {
        Expr::And(items) => push_group(builder, items, " AND ", "TRUE"),
        Expr::Or(items) => push_group(builder, items, " OR ", "FALSE"),
        Expr::Match(m) => push_match(builder, m),
    }
}

fn push_group(
    builder: &mut QueryBuilder<'_, Postgres>,
    items: &[Expr],
    separator: &str,
    identity: &str,
) {
    if items.is_empty() {
        builder.push(identity);
        return;
    }

    builder.push("(");
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            builder.push(separator);
        }
        push_expr(builder, item);
    }
    builder.push(")");
}

fn push_match(builder: &mut QueryBuilder<'_, Postgres>, m: &FieldMatch) {
    match column_for(m.field) {
        Column::Application(column) => {
            builder.push(column);
            push_comparison(builder, m);
        }
        Column::Related {
            table,
            column,
            condition,
        } => {
            builder.push("EXISTS (SELECT 1 FROM ");
            builder.push(table);
            builder.push(" r WHERE r.application_id = a.application_id");
            if let Some(condition) = condition {
                builder.push(" AND ");
                builder.push(condition);
            }
            builder.push(" AND r.");
            builder.push(column);
            push_comparison(builder, m);
            builder.push(")");
        }
    }
}

fn push_comparison(builder: &mut QueryBuilder<'_, Postgres>, m: &FieldMatch) {
    match (&m.op, &m.value) {
        (MatchOp::Contains, value) => {
            builder.push(" ILIKE ");
            builder.push_bind(like_pattern(&value.to_string()));
        }
        (MatchOp::Equals, MatchValue::Number(number)) => {
            builder.push(" = ");
            builder.push_bind(*number);
        }
        (MatchOp::Equals, MatchValue::Text(text)) => {
            builder.push(" = ");
            builder.push_bind(text.clone());
        }
    }
}

/// `%text%` with LIKE wildcards in `text` escaped.
fn like_pattern(text: &str) -> String {
    let mut pattern = String::with_capacity(text.len() + 2);
    pattern.push('%');
    for c in text.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}
