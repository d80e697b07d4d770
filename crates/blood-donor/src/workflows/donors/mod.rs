//! Donor eligibility search: date validation, search criteria, filter construction, and
//! projection of provider matches into display rows.

pub mod directory;
pub mod domain;
pub mod eligibility;
pub mod projection;
pub mod provider;
pub mod query;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use directory::{DirectoryImportError, DonorDirectory};
pub use domain::{
    BloodGroup, BloodGroupValue, CriteriaError, DateParseError, DonationDate, DonorRecord,
    SearchCriteria, SearchParams, UnknownBloodGroup,
};
pub use eligibility::{
    check_required_fields, gate_submission, validate_donation_date, EligibilityPolicy,
    EligibilityResult, RequiredField, SubmissionDecision, SubmissionForm,
    DEFAULT_MINIMUM_INTERVAL_DAYS,
};
pub use projection::{
    project, DonorSummary, SearchOutcome, NO_RESULTS_MESSAGE, SUMMARY_COLUMNS,
};
pub use provider::{DonorRow, DonorSearchProvider, ProviderError};
pub use query::{
    build_donor_filter, DonorColumn, FilterPredicate, FilterSpec, QueryError, DONOR_COLUMNS,
};
pub use router::donor_router;
pub use service::{DonorSearchError, DonorSearchService, SearchPage};
