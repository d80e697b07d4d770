use super::EligibilityResult;
use crate::workflows::donors::domain::DonationDate;

/// Minimum gap, in days, between two donations.
pub const DEFAULT_MINIMUM_INTERVAL_DAYS: u32 = 90;

pub(crate) const FUTURE_DATE_REASON: &str = "Date cannot be in the future.";

/// Recency floor applied to a candidate donation date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EligibilityPolicy {
    minimum_interval_days: u32,
}

impl EligibilityPolicy {
    pub fn new(minimum_interval_days: u32) -> Self {
        let sanitized = if minimum_interval_days == 0 {
            DEFAULT_MINIMUM_INTERVAL_DAYS
        } else {
            minimum_interval_days
        };

        Self {
            minimum_interval_days: sanitized,
        }
    }

    pub fn minimum_interval_days(&self) -> u32 {
        self.minimum_interval_days
    }

    pub fn validate(&self, candidate: DonationDate, today: DonationDate) -> EligibilityResult {
        if candidate > today {
            return EligibilityResult::invalid(FUTURE_DATE_REASON.to_string(), None);
        }

        let days_since = candidate.days_until(today);
        if days_since < i64::from(self.minimum_interval_days) {
            let reason = format!(
                "Date must be at least {} days ago.\nDays entered: {} days",
                self.minimum_interval_days, days_since
            );
            return EligibilityResult::invalid(reason, Some(days_since));
        }

        EligibilityResult::valid(days_since)
    }
}

impl Default for EligibilityPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_MINIMUM_INTERVAL_DAYS)
    }
}
