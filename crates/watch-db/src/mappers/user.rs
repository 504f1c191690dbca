//! User entity <-> model mapper

use watch_core::entities::User;
use watch_core::value_objects::{Role, Snowflake};

use crate::models::UserModel;

/// Convert UserModel to User entity
impl From<UserModel> for User {
    fn from(model: UserModel) -> Self {
        User {
            id: Snowflake::new(model.id),
            username: model.username,
            email: model.email,
            role: Role::from_str_lossy(&model.role),
            credits: model.credits,
            api_calls_limit: model.api_calls_limit,
            api_calls_count: model.api_calls_count,
            api_calls_reset_at: model.api_calls_reset_at,
            api_token: model.api_token,
            is_active: model.is_active,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_role_string_mapping() {
        let now = Utc::now();
        let model = UserModel {
            id: 1,
            username: "root".to_string(),
            email: "root@example.com".to_string(),
            password_hash: "$argon2id$...".to_string(),
            role: "admin".to_string(),
            credits: 999_999,
            api_calls_limit: 999_999,
            api_calls_count: 0,
            api_calls_reset_at: None,
            api_token: None,
            is_active: true,
            created_at: now,
            updated_at: now,
        };

        let user = User::from(model);
        assert_eq!(user.role, Role::Admin);
        assert!(user.is_admin());
    }
}
