mod gate;
mod policy;

pub use gate::{gate_submission, SubmissionDecision, SubmissionForm};
pub use policy::{EligibilityPolicy, DEFAULT_MINIMUM_INTERVAL_DAYS};

use serde::{Deserialize, Serialize};
use std::fmt;

use super::domain::DonationDate;

/// Outcome of checking one candidate donation date. Used for feedback only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EligibilityResult {
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub days_since_donation: Option<i64>,
}

impl EligibilityResult {
    pub(crate) fn valid(days_since_donation: i64) -> Self {
        Self {
            valid: true,
            reason: None,
            days_since_donation: Some(days_since_donation),
        }
    }

    pub(crate) fn invalid(reason: String, days_since_donation: Option<i64>) -> Self {
        Self {
            valid: false,
            reason: Some(reason),
            days_since_donation,
        }
    }
}

/// Checks a donation date against the default 90-day floor.
pub fn validate_donation_date(candidate: DonationDate, today: DonationDate) -> EligibilityResult {
    EligibilityPolicy::default().validate(candidate, today)
}

/// Form fields that must be filled before a search can be submitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RequiredField {
    #[serde(rename = "Blood Group")]
    BloodGroup,
    #[serde(rename = "Last Donation Date")]
    LastDonationDate,
}

impl RequiredField {
    pub fn label(&self) -> &'static str {
        match self {
            RequiredField::BloodGroup => "Blood Group",
            RequiredField::LastDonationDate => "Last Donation Date",
        }
    }
}

impl fmt::Display for RequiredField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Collects every missing field, blood group first.
pub fn check_required_fields(
    blood_group: Option<&str>,
    cutoff_date: Option<DonationDate>,
) -> Vec<RequiredField> {
    let mut missing = Vec::new();

    if blood_group.map_or(true, |value| value.trim().is_empty()) {
        missing.push(RequiredField::BloodGroup);
    }
    if cutoff_date.is_none() {
        missing.push(RequiredField::LastDonationDate);
    }

    missing
}
