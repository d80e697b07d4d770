use serde::{Deserialize, Serialize};

use super::domain::{BloodGroupValue, DonationDate, DonorRecord};
use super::query::FilterSpec;

/// One provider result, carrying exactly the columns the filter selected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DonorRow {
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub blood_group: BloodGroupValue,
    pub last_donation: DonationDate,
}

impl From<&DonorRecord> for DonorRow {
    fn from(record: &DonorRecord) -> Self {
        Self {
            first_name: record.first_name.clone(),
            last_name: record.last_name.clone(),
            phone: record.phone.clone(),
            blood_group: record.blood_group.value(),
            last_donation: record.last_donation,
        }
    }
}

/// Record-search engine the workflow delegates retrieval to.
///
/// Implementations apply every predicate of the filter and return rows in their own order.
pub trait DonorSearchProvider: Send + Sync {
    fn run(&self, filter: &FilterSpec) -> Result<Vec<DonorRow>, ProviderError>;
}

/// Failure raised while executing a search.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("search provider unavailable: {0}")]
    Unavailable(String),
}
