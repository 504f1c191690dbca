//! Entity -> response DTO conversions

use watch_core::{CheckHistoryEntry, CheckInterval, CreditTransaction, MonitoredDomain, User};

use super::responses::{
    AccountResponse, CheckHistoryResponse, CurrentUserResponse, DomainResponse, IntervalOption,
    TransactionResponse, UserInfo, UserSummary,
};

impl From<&User> for CurrentUserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.to_string(),
            username: user.username.clone(),
            email: user.email.clone(),
            role: user.role,
            credits: user.credits,
            api_calls_limit: user.api_calls_limit,
            api_calls_count: user.api_calls_count,
            api_token: user.api_token.clone(),
            is_active: user.is_active,
            created_at: user.created_at,
        }
    }
}

impl From<&User> for UserInfo {
    fn from(user: &User) -> Self {
        Self {
            credits: user.credits,
            api_calls_count: user.api_calls_count,
            api_calls_limit: user.api_calls_limit,
            api_token: user.api_token.clone(),
        }
    }
}

impl From<&User> for AccountResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.to_string(),
            username: user.username.clone(),
            email: user.email.clone(),
            role: user.role,
            credits: user.credits,
            api_calls_limit: user.api_calls_limit,
            api_calls_count: user.api_calls_count,
            is_active: user.is_active,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

impl From<&User> for UserSummary {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.to_string(),
            username: user.username.clone(),
            credits: user.credits,
        }
    }
}

impl From<&MonitoredDomain> for DomainResponse {
    fn from(domain: &MonitoredDomain) -> Self {
        Self {
            id: domain.id.to_string(),
            domain: domain.domain.clone(),
            status: domain.status,
            check_interval: domain.check_interval.seconds(),
            interval_label: domain.check_interval.label(),
            credits_per_check: domain.credits_per_check,
            last_checked: domain.last_checked,
            created_at: domain.created_at,
        }
    }
}

impl From<&CheckHistoryEntry> for CheckHistoryResponse {
    fn from(entry: &CheckHistoryEntry) -> Self {
        Self {
            id: entry.id.to_string(),
            status: entry.status,
            credits_used: entry.credits_used,
            checked_at: entry.checked_at,
        }
    }
}

impl From<&CreditTransaction> for TransactionResponse {
    fn from(transaction: &CreditTransaction) -> Self {
        Self {
            id: transaction.id.to_string(),
            amount: transaction.amount,
            kind: transaction.kind,
            reason: transaction.reason.clone(),
            created_at: transaction.created_at,
        }
    }
}

impl IntervalOption {
    /// The full interval table sent alongside domain listings
    #[must_use]
    pub fn table() -> Vec<IntervalOption> {
        CheckInterval::ALL
            .into_iter()
            .map(|interval| IntervalOption {
                label: interval.label(),
                value: interval.seconds(),
            })
            .collect()
    }
}
