use crate::infra::load_directory;
use blood_donor::config::AppConfig;
use blood_donor::error::AppError;
use blood_donor::workflows::donors::{
    gate_submission, DonationDate, DonorSearchService, EligibilityPolicy, SearchOutcome, SearchParams,
    SubmissionDecision, SubmissionForm, SUMMARY_COLUMNS,
};
use chrono::{Local, NaiveDate};
use clap::Args;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Args, Debug)]
pub(crate) struct SearchArgs {
    /// Blood group to match (label such as "O+" or code such as "o_pos")
    #[arg(long)]
    pub(crate) blood_group: String,
    /// Only donors whose last donation is on or before this date (YYYY-MM-DD)
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) cutoff: NaiveDate,
    /// Donor CSV export to search (defaults to DONOR_DIRECTORY_CSV or the sample directory)
    #[arg(long)]
    pub(crate) directory_csv: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub(crate) struct CheckArgs {
    /// Blood group entered on the search form
    #[arg(long)]
    pub(crate) blood_group: Option<String>,
    /// Last donation date entered on the search form (YYYY-MM-DD)
    #[arg(long)]
    pub(crate) date: Option<String>,
    /// Evaluation date (defaults to today)
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) today: Option<NaiveDate>,
}

pub(crate) fn run_search(args: SearchArgs) -> Result<(), AppError> {
    let SearchArgs {
        blood_group,
        cutoff,
        directory_csv,
    } = args;

    let config = AppConfig::load()?;
    let csv_path = directory_csv.or(config.donors.directory_csv.clone());
    let directory = load_directory(csv_path.as_deref())?;
    let service = DonorSearchService::new(Arc::new(directory), config.donors.policy());

    let params = SearchParams::new(blood_group, DonationDate::new(cutoff).to_string());
    let page = service.search(params)?;

    match page.outcome {
        Some(outcome) => {
            for line in render_outcome(&outcome) {
                println!("{line}");
            }
        }
        None => println!("Search could not be completed; no donors to show"),
    }

    Ok(())
}

pub(crate) fn run_check(args: CheckArgs) -> Result<(), AppError> {
    let CheckArgs {
        blood_group,
        date,
        today,
    } = args;

    let config = AppConfig::load()?;
    let today = DonationDate::new(today.unwrap_or_else(|| Local::now().date_naive()));
    let form = SubmissionForm {
        blood_group,
        last_donation_date: date,
    };

    println!("{}", render_decision(&form, today, &config.donors.policy()));
    Ok(())
}

fn render_decision(
    form: &SubmissionForm,
    today: DonationDate,
    policy: &EligibilityPolicy,
) -> String {
    match gate_submission(form, today, policy) {
        SubmissionDecision::Allow => format!(
            "Eligible: last donation passes the {}-day rule",
            policy.minimum_interval_days()
        ),
        SubmissionDecision::Deny { title, message } => format!("{title}: {message}"),
    }
}

fn render_outcome(outcome: &SearchOutcome) -> Vec<String> {
    let mut lines = vec![outcome.count_message()];

    if let Some(empty_state) = &outcome.empty_state {
        lines.push(empty_state.clone());
        return lines;
    }

    lines.push(format!(
        "{:<28} {:<16} {:<12} {}",
        SUMMARY_COLUMNS[0], SUMMARY_COLUMNS[1], SUMMARY_COLUMNS[2], SUMMARY_COLUMNS[3]
    ));
    for donor in &outcome.donors {
        lines.push(format!(
            "{:<28} {:<16} {:<12} {}",
            donor.name, donor.phone, donor.blood_group_display, donor.last_donation
        ));
    }
    lines
}
