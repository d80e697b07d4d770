use super::common::*;
use std::sync::Arc;

use crate::workflows::donors::domain::{BloodGroup, SearchParams};
use crate::workflows::donors::provider::DonorRow;
use crate::workflows::donors::query::FilterPredicate;
use crate::workflows::donors::{
    DonorSearchError, DonorSearchService, EligibilityPolicy, QueryError, SubmissionForm,
    NO_RESULTS_MESSAGE,
};

#[test]
fn search_without_params_returns_form_only() {
    let service = build_service();
    let page = service.search(SearchParams::default()).expect("page renders");
    assert!(page.outcome.is_none());
    assert!(page.message().is_none());
}

#[test]
fn search_with_partial_params_skips_the_provider() {
    let provider = Arc::new(UnavailableProvider::default());
    let service = DonorSearchService::new(provider.clone(), EligibilityPolicy::default());

    let page = service
        .search(SearchParams {
            blood_group: Some("A+".to_string()),
            cutoff_date: None,
        })
        .expect("page renders");

    assert!(page.outcome.is_none());
    assert_eq!(*provider.calls.lock().expect("calls mutex poisoned"), 0);
}

#[test]
fn search_returns_eligible_donors_in_provider_order() {
    let service = build_service();
    let cutoff = today().days_before(90).to_string();

    let page = service
        .search(SearchParams::new("A+", cutoff))
        .expect("page renders");
    let outcome = page.outcome.expect("outcome present");

    let names: Vec<&str> = outcome.donors.iter().map(|d| d.name.as_str()).collect();
    assert_eq!(names, vec!["Anu K", "Meera Nair"]);
    assert_eq!(outcome.total_found, 2);
    assert!(outcome.donors.iter().all(|d| d.blood_group_display == "A+"));
}

#[test]
fn search_with_no_matches_reports_empty_state() {
    let service = build_service();
    let page = service
        .search(SearchParams::new("O-", "2025-01-01"))
        .expect("page renders");

    let outcome = page.outcome.expect("outcome present");
    assert_eq!(outcome.total_found, 0);
    assert_eq!(outcome.empty_state.as_deref(), Some(NO_RESULTS_MESSAGE));
    assert_eq!(page.params.blood_group.as_deref(), Some("O-"));
}

#[test]
fn provider_failure_degrades_to_form_after_one_attempt() {
    let provider = Arc::new(UnavailableProvider::default());
    let service = DonorSearchService::new(provider.clone(), EligibilityPolicy::default());

    let page = service
        .search(SearchParams::new("A+", "2025-01-01"))
        .expect("provider errors are not surfaced");

    assert!(page.outcome.is_none());
    assert_eq!(*provider.calls.lock().expect("calls mutex poisoned"), 1);
}

#[test]
fn malformed_criteria_are_a_contract_error() {
    let service = build_service();
    let result = service.search(SearchParams::new("A+", "23-10-2025"));
    assert!(matches!(
        result,
        Err(DonorSearchError::Query(QueryError::InvalidCriteria(_)))
    ));
}

#[test]
fn provider_receives_normalized_filter() {
    let provider = Arc::new(RecordingProvider {
        rows: vec![DonorRow::from(&donor("Anu", "K", BloodGroup::OPositive, 120))],
        ..RecordingProvider::default()
    });
    let service = DonorSearchService::new(provider.clone(), EligibilityPolicy::default());

    let page = service
        .search(SearchParams::new("o_pos", "2025-01-01"))
        .expect("page renders");
    assert_eq!(page.outcome.expect("outcome").total_found, 1);

    let filters = provider.filters.lock().expect("filters mutex poisoned");
    assert_eq!(filters.len(), 1);
    assert!(matches!(
        filters[0].predicates(),
        [
            FilterPredicate::BloodGroupAnyOf { groups },
            FilterPredicate::LastDonationOnOrBefore { .. },
        ] if groups == &vec![BloodGroup::OPositive]
    ));
}

#[test]
fn submission_check_uses_configured_policy() {
    let service = DonorSearchService::new(Arc::new(directory()), EligibilityPolicy::new(56));
    let form = SubmissionForm {
        blood_group: Some("A+".to_string()),
        last_donation_date: Some(today().days_before(60).to_string()),
    };

    assert!(service.check_submission(&form, today()).is_allowed());
    assert!(!build_service().check_submission(&form, today()).is_allowed());
}

#[test]
fn whitespace_only_params_render_form_without_searching() {
    let provider = Arc::new(UnavailableProvider::default());
    let service = DonorSearchService::new(provider.clone(), EligibilityPolicy::default());

    let page = service
        .search(SearchParams::new("   ", "2025-01-01"))
        .expect("page renders");

    assert!(page.outcome.is_none());
    assert_eq!(*provider.calls.lock().expect("calls mutex poisoned"), 0);
}
