use serde::{Deserialize, Serialize};

use super::{check_required_fields, EligibilityPolicy};
use crate::workflows::donors::domain::{BloodGroup, DonationDate};

const MISSING_FIELDS_TITLE: &str = "Missing Information";
const VALIDATION_TITLE: &str = "Validation Error";

/// Values captured by the search form when the operator presses submit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionForm {
    #[serde(default)]
    pub blood_group: Option<String>,
    #[serde(default)]
    pub last_donation_date: Option<String>,
}

/// Whether the form may be submitted, and the dialog to show if not.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "decision", rename_all = "snake_case")]
pub enum SubmissionDecision {
    Allow,
    Deny { title: String, message: String },
}

impl SubmissionDecision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, SubmissionDecision::Allow)
    }

    fn deny(title: &str, message: String) -> Self {
        SubmissionDecision::Deny {
            title: title.to_string(),
            message,
        }
    }
}

/// Missing fields are reported first, then an unknown blood group, then the date rules.
pub fn gate_submission(
    form: &SubmissionForm,
    today: DonationDate,
    policy: &EligibilityPolicy,
) -> SubmissionDecision {
    // An unparseable date is indistinguishable from an empty date field.
    let donation_date = form
        .last_donation_date
        .as_deref()
        .and_then(|raw| DonationDate::parse(raw).ok());

    let missing = check_required_fields(form.blood_group.as_deref(), donation_date);
    let Some(donation_date) = donation_date.filter(|_| missing.is_empty()) else {
        let labels: Vec<&str> = missing.iter().map(|field| field.label()).collect();
        return SubmissionDecision::deny(
            MISSING_FIELDS_TITLE,
            format!("Please enter: {}", labels.join(" and ")),
        );
    };

    if let Some(Err(err)) = form.blood_group.as_deref().map(str::parse::<BloodGroup>) {
        return SubmissionDecision::deny(VALIDATION_TITLE, err.to_string());
    }

    let result = policy.validate(donation_date, today);
    if result.valid {
        SubmissionDecision::Allow
    } else {
        SubmissionDecision::deny(VALIDATION_TITLE, result.reason.unwrap_or_default())
    }
}
