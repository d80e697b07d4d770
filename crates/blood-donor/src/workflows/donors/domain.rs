use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Calendar date of a donation. Time-of-day never participates in comparisons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DonationDate(NaiveDate);

impl DonationDate {
    pub fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(Self)
    }

    /// Truncates a timestamp to its calendar day.
    pub fn from_datetime(timestamp: NaiveDateTime) -> Self {
        Self(timestamp.date())
    }

    pub fn parse(raw: &str) -> Result<Self, DateParseError> {
        let trimmed = raw.trim();
        NaiveDate::parse_from_str(trimmed, DATE_FORMAT)
            .map(Self)
            .map_err(|_| DateParseError {
                value: trimmed.to_string(),
            })
    }

    pub fn date(&self) -> NaiveDate {
        self.0
    }

    /// Whole days elapsed from `self` until `later`; negative when `self` is after `later`.
    pub fn days_until(&self, later: DonationDate) -> i64 {
        later.0.signed_duration_since(self.0).num_days()
    }

    pub fn days_before(&self, days: i64) -> Self {
        Self(self.0 - chrono::Duration::days(days))
    }
}

impl From<NaiveDate> for DonationDate {
    fn from(value: NaiveDate) -> Self {
        Self(value)
    }
}

impl fmt::Display for DonationDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(DATE_FORMAT))
    }
}

impl Serialize for DonationDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for DonationDate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        DonationDate::parse(&raw).map_err(serde::de::Error::custom)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("'{value}' is not a YYYY-MM-DD date")]
pub struct DateParseError {
    pub value: String,
}

/// Blood groups offered by the search form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BloodGroup {
    APositive,
    ANegative,
    BPositive,
    BNegative,
    AbPositive,
    AbNegative,
    OPositive,
    ONegative,
}

impl BloodGroup {
    pub const ALL: [BloodGroup; 8] = [
        BloodGroup::APositive,
        BloodGroup::ANegative,
        BloodGroup::BPositive,
        BloodGroup::BNegative,
        BloodGroup::AbPositive,
        BloodGroup::AbNegative,
        BloodGroup::OPositive,
        BloodGroup::ONegative,
    ];

    /// Identifier stored on donor records.
    pub fn code(&self) -> &'static str {
        match self {
            BloodGroup::APositive => "a_pos",
            BloodGroup::ANegative => "a_neg",
            BloodGroup::BPositive => "b_pos",
            BloodGroup::BNegative => "b_neg",
            BloodGroup::AbPositive => "ab_pos",
            BloodGroup::AbNegative => "ab_neg",
            BloodGroup::OPositive => "o_pos",
            BloodGroup::ONegative => "o_neg",
        }
    }

    /// Human-readable label shown to operators.
    pub fn label(&self) -> &'static str {
        match self {
            BloodGroup::APositive => "A+",
            BloodGroup::ANegative => "A-",
            BloodGroup::BPositive => "B+",
            BloodGroup::BNegative => "B-",
            BloodGroup::AbPositive => "AB+",
            BloodGroup::AbNegative => "AB-",
            BloodGroup::OPositive => "O+",
            BloodGroup::ONegative => "O-",
        }
    }

    /// Every accepted spelling, label and code, for error messages.
    pub fn accepted_values() -> String {
        BloodGroup::ALL
            .iter()
            .map(|group| format!("{} ({})", group.label(), group.code()))
            .collect::<Vec<_>>()
            .join(", ")
    }

    pub fn value(&self) -> BloodGroupValue {
        BloodGroupValue {
            code: self.code().to_string(),
            text: self.label().to_string(),
        }
    }
}

impl FromStr for BloodGroup {
    type Err = UnknownBloodGroup;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let candidate = raw.trim();
        BloodGroup::ALL
            .into_iter()
            .find(|group| {
                group.code().eq_ignore_ascii_case(candidate)
                    || group.label().eq_ignore_ascii_case(candidate)
            })
            .ok_or_else(|| UnknownBloodGroup {
                value: candidate.to_string(),
            })
    }
}

impl fmt::Display for BloodGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for BloodGroup {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.code())
    }
}

impl<'de> Deserialize<'de> for BloodGroup {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error(
    "unknown blood group '{value}'; expected one of {}",
    BloodGroup::accepted_values()
)]
pub struct UnknownBloodGroup {
    pub value: String,
}

/// Select-field value: the stored code together with its display text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BloodGroupValue {
    pub code: String,
    pub text: String,
}

/// Stored donor entity. Read-only from the search workflow's point of view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DonorRecord {
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub blood_group: BloodGroup,
    pub last_donation: DonationDate,
}

/// Raw search parameters as they arrive from the form, before any checks.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchParams {
    #[serde(default)]
    pub blood_group: Option<String>,
    #[serde(default)]
    pub cutoff_date: Option<String>,
}

impl SearchParams {
    pub fn new(blood_group: impl Into<String>, cutoff_date: impl Into<String>) -> Self {
        Self {
            blood_group: Some(blood_group.into()),
            cutoff_date: Some(cutoff_date.into()),
        }
    }

    /// Both fields carry a non-blank value.
    pub fn is_complete(&self) -> bool {
        present(&self.blood_group).is_some() && present(&self.cutoff_date).is_some()
    }
}

fn present(value: &Option<String>) -> Option<&str> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|value| !value.is_empty())
}

/// Validated search criteria. Only constructed from complete, well-formed input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchCriteria {
    blood_group: BloodGroup,
    cutoff_date: DonationDate,
}

impl SearchCriteria {
    pub fn new(blood_group: BloodGroup, cutoff_date: DonationDate) -> Self {
        Self {
            blood_group,
            cutoff_date,
        }
    }

    pub fn blood_group(&self) -> BloodGroup {
        self.blood_group
    }

    pub fn cutoff_date(&self) -> DonationDate {
        self.cutoff_date
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CriteriaError {
    #[error("search criteria missing {0}")]
    Missing(&'static str),
    #[error(transparent)]
    BloodGroup(#[from] UnknownBloodGroup),
    #[error("invalid cutoff date: {0}")]
    CutoffDate(#[from] DateParseError),
}

impl TryFrom<&SearchParams> for SearchCriteria {
    type Error = CriteriaError;

    fn try_from(params: &SearchParams) -> Result<Self, Self::Error> {
        let blood_group = present(&params.blood_group)
            .ok_or(CriteriaError::Missing("blood group"))?
            .parse::<BloodGroup>()?;
        let cutoff_date = DonationDate::parse(
            present(&params.cutoff_date).ok_or(CriteriaError::Missing("cutoff date"))?,
        )?;
        Ok(Self::new(blood_group, cutoff_date))
    }
}
