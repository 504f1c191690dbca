//! Credit transaction entity <-> model mapper

use watch_core::entities::{CreditTransaction, TransactionKind};
use watch_core::value_objects::Snowflake;

use crate::models::TransactionModel;

/// Convert TransactionModel to CreditTransaction entity
impl From<TransactionModel> for CreditTransaction {
    fn from(model: TransactionModel) -> Self {
        CreditTransaction {
            id: Snowflake::new(model.id),
            user_id: Snowflake::new(model.user_id),
            amount: model.amount,
            kind: parse_kind(&model.transaction_type),
            reason: model.description,
            created_at: model.created_at,
        }
    }
}

/// Parse the stored transaction_type column; unknown values read as additions
fn parse_kind(s: &str) -> TransactionKind {
    match s {
        "subtract" => TransactionKind::Subtract,
        _ => TransactionKind::Add,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_kind() {
        assert_eq!(parse_kind("add"), TransactionKind::Add);
        assert_eq!(parse_kind("subtract"), TransactionKind::Subtract);
        assert_eq!(parse_kind("unknown"), TransactionKind::Add);
    }
}
