//! Paper catalog service: filtered listing and registration.
//!
//! DESIGN
//! ======
//! Listing composes optional filters (text search, category overlap, year)
//! into one query via `QueryBuilder`, with a separate COUNT for the page
//! total. Filter parameters arrive pre-parsed from the route layer; nothing
//! here validates beyond what the SQL itself needs.
//!
//! Registration inserts the row first; the analysis request is published
//! afterwards by the caller and is best-effort only.

use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

pub const DEFAULT_PAGE_SIZE: i64 = 20;
pub const MAX_PAGE_SIZE: i64 = 100;

#[derive(Debug, thiserror::Error)]
pub enum PaperError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

// =============================================================================
// FILTER
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaperSort {
    Newest,
    Oldest,
    Title,
}

impl PaperSort {
    /// Parse a sort parameter; anything unrecognized falls back to newest.
    #[must_use]
    pub(crate) fn parse(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            Some("oldest") => Self::Oldest,
            Some("title") => Self::Title,
            _ => Self::Newest,
        }
    }

    fn order_clause(self) -> &'static str {
        match self {
            Self::Newest => "created_at DESC",
            Self::Oldest => "created_at ASC",
            Self::Title => "title ASC",
        }
    }
}

#[derive(Debug, Clone)]
pub struct PaperFilter {
    pub page: i64,
    pub limit: i64,
    pub search: Option<String>,
    pub categories: Vec<String>,
    pub year: Option<i32>,
    pub sort: PaperSort,
}

impl Default for PaperFilter {
    fn default() -> Self {
        Self {
            page: 1,
            limit: DEFAULT_PAGE_SIZE,
            search: None,
            categories: Vec::new(),
            year: None,
            sort: PaperSort::Newest,
        }
    }
}

#[must_use]
pub(crate) fn clamp_page(raw: Option<i64>) -> i64 {
    raw.unwrap_or(1).max(1)
}

#[must_use]
pub(crate) fn clamp_limit(raw: Option<i64>) -> i64 {
    raw.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE)
}

#[must_use]
pub(crate) fn total_pages(total: i64, limit: i64) -> i64 {
    if total <= 0 || limit <= 0 {
        return 0;
    }
    (total + limit - 1) / limit
}

// =============================================================================
// LISTING
// =============================================================================

#[derive(Debug, Clone, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaperRow {
    pub id: Uuid,
    pub title: String,
    #[serde(rename = "abstract")]
    pub abstract_text: String,
    pub authors: Vec<String>,
    pub categories: Vec<String>,
    pub year: Option<i32>,
    pub url: String,
}

#[derive(Debug, Clone)]
pub struct PaperPage {
    pub papers: Vec<PaperRow>,
    pub total_pages: i64,
}

fn push_filters(builder: &mut QueryBuilder<'_, Postgres>, filter: &PaperFilter) {
    let mut prefix = " WHERE ";

    if let Some(search) = &filter.search {
        let pattern = format!("%{search}%");
        builder.push(prefix).push("(title ILIKE ");
        builder.push_bind(pattern.clone());
        builder.push(" OR abstract_text ILIKE ");
        builder.push_bind(pattern);
        builder.push(")");
        prefix = " AND ";
    }

    if !filter.categories.is_empty() {
        builder.push(prefix).push("categories && ");
        builder.push_bind(filter.categories.clone());
        prefix = " AND ";
    }

    if let Some(year) = filter.year {
        builder.push(prefix).push("year = ");
        builder.push_bind(year);
    }
}

/// List papers matching the filter, paginated.
///
/// # Errors
///
/// Returns a database error if either the count or the page query fails.
pub async fn list_papers(pool: &PgPool, filter: &PaperFilter) -> Result<PaperPage, sqlx::Error> {
    let mut count_builder = QueryBuilder::new("SELECT COUNT(*) FROM papers");
    push_filters(&mut count_builder, filter);
    let total: i64 = count_builder.build_query_scalar().fetch_one(pool).await?;

    let mut builder =
        QueryBuilder::new("SELECT id, title, abstract_text, authors, categories, year, url FROM papers");
    push_filters(&mut builder, filter);
    builder.push(" ORDER BY ");
    builder.push(filter.sort.order_clause());
    builder.push(" LIMIT ");
    builder.push_bind(filter.limit);
    builder.push(" OFFSET ");
    builder.push_bind((filter.page - 1) * filter.limit);

    let rows = builder
        .build_query_as::<(Uuid, String, String, Vec<String>, Vec<String>, Option<i32>, String)>()
        .fetch_all(pool)
        .await?;

    let papers = rows
        .into_iter()
        .map(|(id, title, abstract_text, authors, categories, year, url)| PaperRow {
            id,
            title,
            abstract_text,
            authors,
            categories,
            year,
            url,
        })
        .collect();

    Ok(PaperPage { papers, total_pages: total_pages(total, filter.limit) })
}

// =============================================================================
// REGISTRATION
// =============================================================================

#[derive(Debug, Clone)]
pub struct NewPaper {
    pub title: String,
    pub abstract_text: String,
    pub authors: Vec<String>,
    pub categories: Vec<String>,
    pub year: Option<i32>,
    pub url: String,
}

/// Insert a paper registered by a user, returning its id. The caller is
/// responsible for publishing the analysis request afterwards.
///
/// # Errors
///
/// Returns a database error if the insert fails.
pub async fn register_paper(pool: &PgPool, registered_by: Uuid, input: &NewPaper) -> Result<Uuid, PaperError> {
    let id = Uuid::new_v4();
    sqlx::query(
        "INSERT INTO papers (id, title, abstract_text, authors, categories, year, url, registered_by)
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8)",
    )
    .bind(id)
    .bind(&input.title)
    .bind(&input.abstract_text)
    .bind(&input.authors)
    .bind(&input.categories)
    .bind(input.year)
    .bind(&input.url)
    .bind(registered_by)
    .execute(pool)
    .await?;

    Ok(id)
}

#[cfg(test)]
#[path = "paper_test.rs"]
mod tests;
