use blood_donor::error::AppError;
use blood_donor::workflows::donors::{BloodGroup, DonationDate, DonorDirectory, DonorRecord};
use chrono::NaiveDate;
use metrics_exporter_prometheus::PrometheusHandle;
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Loads the configured CSV export, or the built-in sample donors when none is set.
pub(crate) fn load_directory(csv_path: Option<&Path>) -> Result<DonorDirectory, AppError> {
    match csv_path {
        Some(path) => {
            let directory = DonorDirectory::from_path(path)?;
            info!(path = %path.display(), donors = directory.len(), "loaded donor directory");
            Ok(directory)
        }
        None => {
            warn!("DONOR_DIRECTORY_CSV not set; serving sample donor directory");
            Ok(sample_directory())
        }
    }
}

pub(crate) fn sample_directory() -> DonorDirectory {
    let donors = [
        ("Anu", "K", "9847012345", BloodGroup::APositive, (2025, 3, 18)),
        ("Rahul", "Menon", "9847023456", BloodGroup::BPositive, (2025, 9, 30)),
        ("Meera", "Nair", "9847034567", BloodGroup::OPositive, (2024, 12, 2)),
        ("Joel", "Thomas", "9847045678", BloodGroup::ONegative, (2025, 6, 11)),
        ("Fathima", "Rasheed", "9847056789", BloodGroup::AbPositive, (2025, 1, 27)),
        ("Arjun", "Das", "9847067890", BloodGroup::APositive, (2025, 8, 5)),
    ];

    let records = donors
        .into_iter()
        .filter_map(|(first, last, phone, blood_group, (year, month, day))| {
            Some(DonorRecord {
                first_name: first.to_string(),
                last_name: last.to_string(),
                phone: phone.to_string(),
                blood_group,
                last_donation: DonationDate::from_ymd(year, month, day)?,
            })
        })
        .collect();

    DonorDirectory::new(records)
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_directory_has_every_donor() {
        assert_eq!(sample_directory().len(), 6);
    }

    #[test]
    fn parse_date_reports_bad_input() {
        let err = parse_date("2025/01/01").expect_err("slashes rejected");
        assert!(err.starts_with("failed to parse '2025/01/01'"));
        assert_eq!(
            parse_date(" 2025-01-01 "),
            Ok(NaiveDate::from_ymd_opt(2025, 1, 1).expect("valid"))
        );
    }
}
