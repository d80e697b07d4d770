use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use chrono::Local;
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::domain::{BloodGroup, DonationDate, SearchParams};
use super::eligibility::{SubmissionDecision, SubmissionForm};
use super::projection::{DonorSummary, SUMMARY_COLUMNS};
use super::provider::DonorSearchProvider;
use super::service::{DonorSearchError, DonorSearchService};

/// Body accepted by the submission check. `today` defaults to the server's local date.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionRequest {
    #[serde(flatten)]
    pub form: SubmissionForm,
    #[serde(default)]
    pub today: Option<DonationDate>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SubmissionResponse {
    pub allowed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl From<SubmissionDecision> for SubmissionResponse {
    fn from(decision: SubmissionDecision) -> Self {
        match decision {
            SubmissionDecision::Allow => Self {
                allowed: true,
                title: None,
                message: None,
            },
            SubmissionDecision::Deny { title, message } => Self {
                allowed: false,
                title: Some(title),
                message: Some(message),
            },
        }
    }
}

/// Rendered search page: echoed criteria, count message, and the donor table.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    pub blood_group: Option<String>,
    pub cutoff_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub columns: Option<[&'static str; 4]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub donors: Option<Vec<DonorSummary>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub empty_state: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct BloodGroupOption {
    pub code: &'static str,
    pub label: &'static str,
}

/// Router builder exposing the donor search endpoints.
///
/// The search route takes `bloodGroup` as a code (`o_pos`) or a percent-encoded label
/// (`O%2B`); a bare `+` in a query string decodes to a space.
pub fn donor_router<P>(service: Arc<DonorSearchService<P>>) -> Router
where
    P: DonorSearchProvider + 'static,
{
    Router::new()
        .route("/api/v1/donors/search", get(search_handler::<P>))
        .route("/api/v1/donors/submission", post(submission_handler::<P>))
        .route("/api/v1/blood-groups", get(blood_groups_handler))
        .with_state(service)
}

pub(crate) async fn search_handler<P>(
    State(service): State<Arc<DonorSearchService<P>>>,
    Query(params): Query<SearchParams>,
) -> Response
where
    P: DonorSearchProvider + 'static,
{
    match service.search(params) {
        Ok(page) => {
            let message = page.message();
            let (columns, donors, empty_state) = match page.outcome {
                Some(outcome) if outcome.is_empty() => (None, None, outcome.empty_state),
                Some(outcome) => (Some(SUMMARY_COLUMNS), Some(outcome.donors), None),
                None => (None, None, None),
            };
            let body = SearchResponse {
                blood_group: page.params.blood_group,
                cutoff_date: page.params.cutoff_date,
                message,
                columns,
                donors,
                empty_state,
            };
            (StatusCode::OK, axum::Json(body)).into_response()
        }
        Err(DonorSearchError::Query(error)) => {
            let payload = json!({
                "error": error.to_string(),
            });
            (StatusCode::BAD_REQUEST, axum::Json(payload)).into_response()
        }
    }
}

pub(crate) async fn submission_handler<P>(
    State(service): State<Arc<DonorSearchService<P>>>,
    axum::Json(request): axum::Json<SubmissionRequest>,
) -> Response
where
    P: DonorSearchProvider + 'static,
{
    let today = request
        .today
        .unwrap_or_else(|| DonationDate::new(Local::now().date_naive()));
    let decision = service.check_submission(&request.form, today);
    let body = SubmissionResponse::from(decision);
    (StatusCode::OK, axum::Json(body)).into_response()
}

pub(crate) async fn blood_groups_handler() -> axum::Json<Vec<BloodGroupOption>> {
    let options = BloodGroup::ALL
        .iter()
        .map(|group| BloodGroupOption {
            code: group.code(),
            label: group.label(),
        })
        .collect();
    axum::Json(options)
}
