//! MonitoredDomain entity - a domain registered for periodic block checks

use chrono::{DateTime, Duration, Utc};

use crate::value_objects::{CheckInterval, Snowflake};

/// Credits charged for a single check
pub const DEFAULT_CREDITS_PER_CHECK: i64 = 1;

/// A domain monitored on behalf of one user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonitoredDomain {
    pub id: Snowflake,
    pub user_id: Snowflake,
    pub domain: String,
    /// Blocked flag from the last completed check; None until first checked
    pub status: Option<bool>,
    pub check_interval: CheckInterval,
    pub credits_per_check: i64,
    pub last_checked: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl MonitoredDomain {
    /// Create a new MonitoredDomain that has never been checked
    pub fn new(
        id: Snowflake,
        user_id: Snowflake,
        domain: String,
        check_interval: CheckInterval,
    ) -> Self {
        Self {
            id,
            user_id,
            domain,
            status: None,
            check_interval,
            credits_per_check: DEFAULT_CREDITS_PER_CHECK,
            last_checked: None,
            created_at: Utc::now(),
        }
    }

    /// Whether the interval has elapsed since the last check
    ///
    /// A never-checked domain is always due. Owner credit sufficiency is a
    /// separate eligibility condition enforced by the repository query.
    pub fn is_due(&self, now: DateTime<Utc>) -> bool {
        match self.last_checked {
            None => true,
            Some(checked) => now - checked >= Duration::seconds(i64::from(self.check_interval.seconds())),
        }
    }

    /// Earliest moment the next automatic check may run
    pub fn next_check_at(&self) -> Option<DateTime<Utc>> {
        self.last_checked
            .map(|checked| checked + Duration::seconds(i64::from(self.check_interval.seconds())))
    }
}
