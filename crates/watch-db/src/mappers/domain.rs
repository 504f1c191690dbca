//! Monitored domain entity <-> model mapper

use watch_core::entities::MonitoredDomain;
use watch_core::traits::DueDomain;
use watch_core::value_objects::{CheckInterval, Snowflake};

use crate::models::{DomainModel, DueDomainModel};

/// Convert DomainModel to MonitoredDomain entity
impl From<DomainModel> for MonitoredDomain {
    fn from(model: DomainModel) -> Self {
        MonitoredDomain {
            id: Snowflake::new(model.id),
            user_id: Snowflake::new(model.user_id),
            domain: model.domain,
            status: model.status,
            check_interval: CheckInterval::from_seconds(model.check_interval),
            credits_per_check: model.credits_per_check,
            last_checked: model.last_checked,
            created_at: model.created_at,
        }
    }
}

/// Convert the eligibility join row to a DueDomain
impl From<DueDomainModel> for DueDomain {
    fn from(model: DueDomainModel) -> Self {
        DueDomain {
            owner_credits: model.owner_credits,
            domain: MonitoredDomain::from(model.domain),
        }
    }
}
