use serde::Serialize;

use super::domain::DonationDate;
use super::provider::DonorRow;

pub const NO_RESULTS_MESSAGE: &str = "No eligible donors found for selected criteria";

/// Table headings for the eligible donor list, in display order.
pub const SUMMARY_COLUMNS: [&str; 4] = ["Name", "Phone Number", "Blood Group", "Last Donation Date"];

/// Display row for one matching donor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DonorSummary {
    pub name: String,
    pub phone: String,
    pub blood_group_display: String,
    pub last_donation: DonationDate,
}

impl From<DonorRow> for DonorSummary {
    fn from(row: DonorRow) -> Self {
        Self {
            name: format!("{} {}", row.first_name, row.last_name),
            phone: row.phone,
            blood_group_display: row.blood_group.text,
            last_donation: row.last_donation,
        }
    }
}

/// Display-ready result of a single search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchOutcome {
    pub total_found: usize,
    pub donors: Vec<DonorSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub empty_state: Option<String>,
}

impl SearchOutcome {
    pub fn is_empty(&self) -> bool {
        self.total_found == 0
    }

    pub fn count_message(&self) -> String {
        format!("Found {} eligible donor(s)", self.total_found)
    }
}

/// Maps provider rows to summaries, keeping the provider's order.
pub fn project<I>(rows: I) -> SearchOutcome
where
    I: IntoIterator<Item = DonorRow>,
{
    let donors: Vec<DonorSummary> = rows.into_iter().map(DonorSummary::from).collect();
    let total_found = donors.len();
    let empty_state = (total_found == 0).then(|| NO_RESULTS_MESSAGE.to_string());

    SearchOutcome {
        total_found,
        donors,
        empty_state,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::donors::domain::BloodGroupValue;

    fn row(first: &str, last: &str, text: &str, date: DonationDate) -> DonorRow {
        DonorRow {
            first_name: first.to_string(),
            last_name: last.to_string(),
            phone: "123".to_string(),
            blood_group: BloodGroupValue {
                code: "b_pos".to_string(),
                text: text.to_string(),
            },
            last_donation: date,
        }
    }

    fn date() -> DonationDate {
        DonationDate::from_ymd(2025, 4, 2).expect("valid date")
    }

    #[test]
    fn empty_result_carries_no_results_message() {
        let outcome = project(Vec::new());
        assert_eq!(outcome.total_found, 0);
        assert!(outcome.donors.is_empty());
        assert_eq!(outcome.empty_state.as_deref(), Some(NO_RESULTS_MESSAGE));
        assert_eq!(outcome.count_message(), "Found 0 eligible donor(s)");
    }

    #[test]
    fn joins_names_and_uses_display_text() {
        let outcome = project(vec![row("Anu", "K", "B+", date())]);
        assert_eq!(outcome.total_found, 1);
        assert!(outcome.empty_state.is_none());
        assert_eq!(
            outcome.donors,
            vec![DonorSummary {
                name: "Anu K".to_string(),
                phone: "123".to_string(),
                blood_group_display: "B+".to_string(),
                last_donation: date(),
            }]
        );
    }

    #[test]
    fn empty_name_parts_keep_the_separator() {
        let outcome = project(vec![row("Anu", "", "B+", date()), row("", "K", "B+", date())]);
        assert_eq!(outcome.donors[0].name, "Anu ");
        assert_eq!(outcome.donors[1].name, " K");
    }

    #[test]
    fn preserves_provider_order_and_duplicates() {
        let outcome = project(vec![
            row("Zara", "A", "B+", date()),
            row("Anu", "K", "B+", date()),
            row("Zara", "A", "B+", date()),
        ]);
        let names: Vec<&str> = outcome.donors.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["Zara A", "Anu K", "Zara A"]);
        assert_eq!(outcome.count_message(), "Found 3 eligible donor(s)");
    }
}
