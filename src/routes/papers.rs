//! Paper catalog routes: filtered listing and registration.

use axum::extract::{Query, State};
use axum::response::Json;
use axum_extra::extract::cookie::PrivateCookieJar;
use serde::{Deserialize, Serialize};

use crate::messages;
use crate::routes::ActionOutcome;
use crate::routes::auth::require_approved;
use crate::services::feed::normalize_http_url;
use crate::services::paper::{self, NewPaper, PaperFilter, PaperRow, PaperSort};
use crate::services::publish::PAPER_ANALYSIS_CHANNEL;
use crate::state::AppState;

// =============================================================================
// LISTING
// =============================================================================

/// Raw query parameters. Everything arrives as optional strings; integers
/// are parsed leniently and anything unparseable falls back to defaults.
#[derive(Debug, Default, Deserialize)]
pub struct PaperListQuery {
    pub page: Option<String>,
    pub limit: Option<String>,
    pub search: Option<String>,
    pub categories: Option<String>,
    pub year: Option<String>,
    pub sort: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaperListResponse {
    pub papers: Vec<PaperRow>,
    pub total_pages: i64,
}

pub(crate) fn split_csv(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(str::to_owned)
        .collect()
}

pub(crate) fn filter_from_query(query: &PaperListQuery) -> PaperFilter {
    PaperFilter {
        page: paper::clamp_page(query.page.as_deref().and_then(|v| v.trim().parse().ok())),
        limit: paper::clamp_limit(query.limit.as_deref().and_then(|v| v.trim().parse().ok())),
        search: query
            .search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_owned),
        categories: query.categories.as_deref().map(split_csv).unwrap_or_default(),
        year: query.year.as_deref().and_then(|v| v.trim().parse().ok()),
        sort: PaperSort::parse(query.sort.as_deref()),
    }
}

/// `GET /api/papers`: public listing. An infrastructure failure degrades to
/// an empty page rather than an error response.
pub async fn list_papers(
    State(state): State<AppState>,
    Query(query): Query<PaperListQuery>,
) -> Json<PaperListResponse> {
    let filter = filter_from_query(&query);
    match paper::list_papers(&state.pool, &filter).await {
        Ok(page) => Json(PaperListResponse { papers: page.papers, total_pages: page.total_pages }),
        Err(e) => {
            tracing::error!(error = %e, "paper listing failed; returning empty page");
            Json(PaperListResponse { papers: Vec::new(), total_pages: 0 })
        }
    }
}

// =============================================================================
// REGISTRATION
// =============================================================================

#[derive(Debug, Default, Deserialize)]
pub struct RegisterPaperForm {
    pub title: Option<String>,
    pub url: Option<String>,
    #[serde(rename = "abstract")]
    pub abstract_text: Option<String>,
    pub authors: Option<String>,
    pub categories: Option<String>,
    pub year: Option<String>,
}

pub(crate) fn validate_register(form: &RegisterPaperForm) -> Result<NewPaper, &'static str> {
    let title = form.title.as_deref().unwrap_or_default().trim();
    if title.is_empty() {
        return Err(messages::TITLE_REQUIRED);
    }

    let url = normalize_http_url(form.url.as_deref().unwrap_or_default()).ok_or(messages::URL_INVALID)?;

    Ok(NewPaper {
        title: title.to_owned(),
        abstract_text: form.abstract_text.as_deref().unwrap_or_default().trim().to_owned(),
        authors: form.authors.as_deref().map(split_csv).unwrap_or_default(),
        categories: form.categories.as_deref().map(split_csv).unwrap_or_default(),
        year: form.year.as_deref().and_then(|v| v.trim().parse().ok()),
        url,
    })
}

/// `POST /api/papers`: register a paper for analysis. The analysis request
/// is published after the insert commits; a publish failure does not undo
/// the registration.
pub async fn register_paper(
    State(state): State<AppState>,
    jar: PrivateCookieJar,
    axum::extract::Form(form): axum::extract::Form<RegisterPaperForm>,
) -> (PrivateCookieJar, ActionOutcome) {
    let user = match require_approved(&state, &jar).await {
        Ok(user) => user,
        Err(outcome) => return (jar, outcome),
    };

    let input = match validate_register(&form) {
        Ok(input) => input,
        Err(message) => return (jar, ActionOutcome::failure(message)),
    };

    match paper::register_paper(&state.pool, user.id, &input).await {
        Ok(paper_id) => {
            state
                .publish_best_effort(
                    PAPER_ANALYSIS_CHANNEL,
                    serde_json::json!({ "paperId": paper_id, "url": input.url }),
                )
                .await;
            (jar, ActionOutcome::success_with(messages::PAPER_REGISTERED))
        }
        Err(e) => {
            tracing::error!(error = %e, "paper registration failed");
            (jar, ActionOutcome::failure(messages::INTERNAL))
        }
    }
}

#[cfg(test)]
#[path = "papers_test.rs"]
mod tests;
