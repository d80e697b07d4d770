use super::domain::{BloodGroup, DonationDate, DonorRecord};
use super::provider::{DonorRow, DonorSearchProvider, ProviderError};
use super::query::FilterSpec;
use serde::Deserialize;
use std::io::Read;
use std::path::Path;

#[derive(Debug)]
pub enum DirectoryImportError {
    Io(std::io::Error),
    Csv(csv::Error),
    Row { line: u64, reason: String },
}

impl std::fmt::Display for DirectoryImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DirectoryImportError::Io(err) => write!(f, "failed to read donor export: {}", err),
            DirectoryImportError::Csv(err) => write!(f, "invalid donor CSV data: {}", err),
            DirectoryImportError::Row { line, reason } => {
                write!(f, "donor export line {}: {}", line, reason)
            }
        }
    }
}

impl std::error::Error for DirectoryImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DirectoryImportError::Io(err) => Some(err),
            DirectoryImportError::Csv(err) => Some(err),
            DirectoryImportError::Row { .. } => None,
        }
    }
}

impl From<std::io::Error> for DirectoryImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for DirectoryImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

/// Read-only donor records held in memory and searched by filter evaluation.
#[derive(Debug, Clone, Default)]
pub struct DonorDirectory {
    records: Vec<DonorRecord>,
}

impl DonorDirectory {
    pub fn new(records: Vec<DonorRecord>) -> Self {
        Self { records }
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, DirectoryImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    /// Loads an export with `First Name,Last Name,Phone Number,Blood Group,Last Donation Date` headers.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, DirectoryImportError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let headers = csv_reader.headers()?.clone();
        let mut records = Vec::new();

        for result in csv_reader.records() {
            let raw = result?;
            let line = raw.position().map_or(0, |position| position.line());
            let row: DonorExportRow = raw.deserialize(Some(&headers))?;
            records.push(row.into_record(line)?);
        }

        Ok(Self { records })
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl DonorSearchProvider for DonorDirectory {
    fn run(&self, filter: &FilterSpec) -> Result<Vec<DonorRow>, ProviderError> {
        Ok(self
            .records
            .iter()
            .filter(|record| filter.matches(record))
            .map(DonorRow::from)
            .collect())
    }
}

#[derive(Debug, Deserialize)]
struct DonorExportRow {
    #[serde(rename = "First Name")]
    first_name: String,
    #[serde(rename = "Last Name", default)]
    last_name: String,
    #[serde(rename = "Phone Number", default)]
    phone: String,
    #[serde(rename = "Blood Group")]
    blood_group: String,
    #[serde(rename = "Last Donation Date")]
    last_donation: String,
}

impl DonorExportRow {
    fn into_record(self, line: u64) -> Result<DonorRecord, DirectoryImportError> {
        let blood_group = self
            .blood_group
            .parse::<BloodGroup>()
            .map_err(|err| DirectoryImportError::Row {
                line,
                reason: err.to_string(),
            })?;
        let last_donation =
            DonationDate::parse(&self.last_donation).map_err(|err| DirectoryImportError::Row {
                line,
                reason: err.to_string(),
            })?;

        Ok(DonorRecord {
            first_name: self.first_name,
            last_name: self.last_name,
            phone: self.phone,
            blood_group,
            last_donation,
        })
    }
}
