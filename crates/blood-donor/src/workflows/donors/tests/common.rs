use std::sync::{Arc, Mutex};

use axum::http::StatusCode;
use axum::response::Response;
use serde_json::Value;

use crate::workflows::donors::domain::{BloodGroup, DonationDate, DonorRecord};
use crate::workflows::donors::provider::{DonorRow, DonorSearchProvider, ProviderError};
use crate::workflows::donors::query::FilterSpec;
use crate::workflows::donors::{
    donor_router, DonorDirectory, DonorSearchService, EligibilityPolicy,
};

pub(super) fn today() -> DonationDate {
    DonationDate::from_ymd(2025, 10, 23).expect("valid date")
}

pub(super) fn donor(first: &str, last: &str, group: BloodGroup, days_ago: i64) -> DonorRecord {
    DonorRecord {
        first_name: first.to_string(),
        last_name: last.to_string(),
        phone: format!("98470{days_ago:05}"),
        blood_group: group,
        last_donation: today().days_before(days_ago),
    }
}

pub(super) fn directory() -> DonorDirectory {
    DonorDirectory::new(vec![
        donor("Anu", "K", BloodGroup::APositive, 150),
        donor("Rahul", "M", BloodGroup::BPositive, 10),
        donor("Meera", "Nair", BloodGroup::APositive, 95),
        donor("Joel", "T", BloodGroup::APositive, 30),
    ])
}

pub(super) fn build_service() -> Arc<DonorSearchService<DonorDirectory>> {
    Arc::new(DonorSearchService::new(
        Arc::new(directory()),
        EligibilityPolicy::default(),
    ))
}

pub(super) fn router_with_service(
    service: Arc<DonorSearchService<DonorDirectory>>,
) -> axum::Router {
    donor_router(service)
}

/// Provider that always fails, recording how many times it was asked.
#[derive(Default)]
pub(super) struct UnavailableProvider {
    pub(super) calls: Mutex<usize>,
}

impl DonorSearchProvider for UnavailableProvider {
    fn run(&self, _filter: &FilterSpec) -> Result<Vec<DonorRow>, ProviderError> {
        *self.calls.lock().expect("calls mutex poisoned") += 1;
        Err(ProviderError::Unavailable("connection reset".to_string()))
    }
}

/// Provider that captures the filter it receives and replays fixed rows.
#[derive(Default)]
pub(super) struct RecordingProvider {
    pub(super) filters: Mutex<Vec<FilterSpec>>,
    pub(super) rows: Vec<DonorRow>,
}

impl DonorSearchProvider for RecordingProvider {
    fn run(&self, filter: &FilterSpec) -> Result<Vec<DonorRow>, ProviderError> {
        self.filters
            .lock()
            .expect("filters mutex poisoned")
            .push(filter.clone());
        Ok(self.rows.clone())
    }
}

pub(super) async fn json_body(response: Response) -> (StatusCode, Value) {
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body readable");
    let value = serde_json::from_slice(&bytes).expect("json body");
    (status, value)
}
