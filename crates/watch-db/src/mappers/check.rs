//! Check history entity <-> model mapper

use watch_core::entities::CheckHistoryEntry;
use watch_core::value_objects::Snowflake;

use crate::models::CheckRecordModel;

/// Convert CheckRecordModel to CheckHistoryEntry entity
impl From<CheckRecordModel> for CheckHistoryEntry {
    fn from(model: CheckRecordModel) -> Self {
        CheckHistoryEntry {
            id: Snowflake::new(model.id),
            domain_id: Snowflake::new(model.domain_id),
            status: model.status,
            credits_used: model.credits_used,
            checked_at: model.checked_at,
        }
    }
}
