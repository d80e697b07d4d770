use std::sync::Arc;

use serde::Serialize;
use tracing::{error, info};

use super::domain::{DonationDate, SearchParams};
use super::eligibility::{gate_submission, EligibilityPolicy, SubmissionDecision, SubmissionForm};
use super::projection::{project, SearchOutcome};
use super::provider::DonorSearchProvider;
use super::query::{build_donor_filter, QueryError};

/// Search form state plus, when criteria were submitted, the outcome to display.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchPage {
    pub params: SearchParams,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outcome: Option<SearchOutcome>,
}

impl SearchPage {
    fn form_only(params: SearchParams) -> Self {
        Self {
            params,
            outcome: None,
        }
    }

    pub fn message(&self) -> Option<String> {
        self.outcome.as_ref().map(SearchOutcome::count_message)
    }
}

/// Facade wiring the submission gate, query builder, provider, and projector.
pub struct DonorSearchService<P> {
    provider: Arc<P>,
    policy: EligibilityPolicy,
}

impl<P> DonorSearchService<P>
where
    P: DonorSearchProvider + 'static,
{
    pub fn new(provider: Arc<P>, policy: EligibilityPolicy) -> Self {
        Self { provider, policy }
    }

    /// Decide whether a filled-in form may be submitted.
    pub fn check_submission(&self, form: &SubmissionForm, today: DonationDate) -> SubmissionDecision {
        gate_submission(form, today, &self.policy)
    }

    /// Run a search when both parameters are present; otherwise return the bare form.
    ///
    /// Provider failures are logged and degrade to a page without an outcome.
    pub fn search(&self, params: SearchParams) -> Result<SearchPage, DonorSearchError> {
        if !params.is_complete() {
            return Ok(SearchPage::form_only(params));
        }

        let filter = build_donor_filter(&params)?;
        let rows = match self.provider.run(&filter) {
            Ok(rows) => rows,
            Err(err) => {
                error!(error = %err, "donor search failed");
                return Ok(SearchPage::form_only(params));
            }
        };

        let outcome = project(rows);
        info!(total_found = outcome.total_found, "donor search completed");

        Ok(SearchPage {
            params,
            outcome: Some(outcome),
        })
    }
}

/// Error raised by the donor search service.
#[derive(Debug, thiserror::Error)]
pub enum DonorSearchError {
    #[error(transparent)]
    Query(#[from] QueryError),
}
