use serde::Serialize;
use serde_json::{json, Value};

use super::domain::{
    BloodGroup, CriteriaError, DonationDate, DonorRecord, SearchCriteria, SearchParams,
};

/// Columns requested from the search provider. The projector relies on exactly this set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DonorColumn {
    FirstName,
    LastName,
    PhoneNumber,
    /// Returned as both the stored code and its display text.
    BloodGroup,
    LastDonationDate,
}

impl DonorColumn {
    pub fn field(&self) -> &'static str {
        match self {
            DonorColumn::FirstName => "first_name",
            DonorColumn::LastName => "last_name",
            DonorColumn::PhoneNumber => "phone_number",
            DonorColumn::BloodGroup => "blood_group",
            DonorColumn::LastDonationDate => "last_donation_date",
        }
    }
}

pub const DONOR_COLUMNS: [DonorColumn; 5] = [
    DonorColumn::FirstName,
    DonorColumn::LastName,
    DonorColumn::PhoneNumber,
    DonorColumn::BloodGroup,
    DonorColumn::LastDonationDate,
];

/// Single filter term. A `FilterSpec` joins its predicates with AND.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "operator", rename_all = "snake_case")]
pub enum FilterPredicate {
    BloodGroupAnyOf { groups: Vec<BloodGroup> },
    LastDonationOnOrBefore { date: DonationDate },
}

impl FilterPredicate {
    pub fn matches(&self, record: &DonorRecord) -> bool {
        match self {
            FilterPredicate::BloodGroupAnyOf { groups } => groups.contains(&record.blood_group),
            FilterPredicate::LastDonationOnOrBefore { date } => record.last_donation <= *date,
        }
    }

    fn expression(&self) -> Value {
        match self {
            FilterPredicate::BloodGroupAnyOf { groups } => {
                let codes: Vec<&str> = groups.iter().map(BloodGroup::code).collect();
                json!([DonorColumn::BloodGroup.field(), "anyof", codes])
            }
            FilterPredicate::LastDonationOnOrBefore { date } => {
                json!([
                    DonorColumn::LastDonationDate.field(),
                    "onorbefore",
                    date.to_string()
                ])
            }
        }
    }
}

/// Provider-neutral search specification. Building one never executes a search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterSpec {
    predicates: Vec<FilterPredicate>,
    columns: Vec<DonorColumn>,
}

impl FilterSpec {
    pub fn for_criteria(criteria: &SearchCriteria) -> Self {
        Self {
            predicates: vec![
                FilterPredicate::BloodGroupAnyOf {
                    groups: vec![criteria.blood_group()],
                },
                FilterPredicate::LastDonationOnOrBefore {
                    date: criteria.cutoff_date(),
                },
            ],
            columns: DONOR_COLUMNS.to_vec(),
        }
    }

    pub fn predicates(&self) -> &[FilterPredicate] {
        &self.predicates
    }

    pub fn columns(&self) -> &[DonorColumn] {
        &self.columns
    }

    pub fn matches(&self, record: &DonorRecord) -> bool {
        self.predicates
            .iter()
            .all(|predicate| predicate.matches(record))
    }

    /// Nested-array filter expression, predicates separated by `"AND"`.
    pub fn to_expression(&self) -> Value {
        let mut terms = Vec::with_capacity(self.predicates.len() * 2);
        for (index, predicate) in self.predicates.iter().enumerate() {
            if index > 0 {
                terms.push(Value::String("AND".to_string()));
            }
            terms.push(predicate.expression());
        }
        Value::Array(terms)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum QueryError {
    #[error("invalid search criteria: {0}")]
    InvalidCriteria(#[from] CriteriaError),
}

/// Turns complete search parameters into a filter specification.
///
/// Callers are expected to gate on [`SearchParams::is_complete`] first; incomplete or
/// malformed parameters reaching this point are a contract violation.
pub fn build_donor_filter(params: &SearchParams) -> Result<FilterSpec, QueryError> {
    let criteria = SearchCriteria::try_from(params)?;
    Ok(FilterSpec::for_criteria(&criteria))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(group: BloodGroup, last_donation: DonationDate) -> DonorRecord {
        DonorRecord {
            first_name: "Meera".to_string(),
            last_name: "Nair".to_string(),
            phone: "9847000000".to_string(),
            blood_group: group,
            last_donation,
        }
    }

    #[test]
    fn builds_exactly_two_predicates() {
        let spec = build_donor_filter(&SearchParams::new("O+", "2025-01-01")).expect("filter");
        let cutoff = DonationDate::from_ymd(2025, 1, 1).expect("valid");

        assert_eq!(
            spec.predicates(),
            &[
                FilterPredicate::BloodGroupAnyOf {
                    groups: vec![BloodGroup::OPositive],
                },
                FilterPredicate::LastDonationOnOrBefore { date: cutoff },
            ]
        );
        assert_eq!(spec.columns(), &DONOR_COLUMNS);
    }

    #[test]
    fn rejects_partial_criteria() {
        let params = SearchParams {
            blood_group: Some("O+".to_string()),
            cutoff_date: None,
        };
        assert!(matches!(
            build_donor_filter(&params),
            Err(QueryError::InvalidCriteria(CriteriaError::Missing(_)))
        ));
    }

    #[test]
    fn cutoff_is_inclusive() {
        let cutoff = DonationDate::from_ymd(2025, 1, 1).expect("valid");
        let spec = FilterSpec::for_criteria(&SearchCriteria::new(BloodGroup::BNegative, cutoff));

        assert!(spec.matches(&record(BloodGroup::BNegative, cutoff)));
        assert!(!spec.matches(&record(BloodGroup::BNegative, cutoff.days_before(-1))));
        assert!(!spec.matches(&record(BloodGroup::BPositive, cutoff.days_before(30))));
    }

    #[test]
    fn renders_filter_expression() {
        let spec = build_donor_filter(&SearchParams::new("o_pos", "2025-01-01")).expect("filter");
        assert_eq!(
            spec.to_expression(),
            json!([
                ["blood_group", "anyof", ["o_pos"]],
                "AND",
                ["last_donation_date", "onorbefore", "2025-01-01"]
            ])
        );
    }
}
