//! User profile service.

use sea_orm::Set;
use serde::Deserialize;
use validator::Validate;
use wayfare_common::AppResult;
use wayfare_db::repositories::UserRepository;

use super::auth::UserResponse;

/// Input for updating the caller's profile.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateProfileInput {
    #[validate(length(min = 1, max = 256))]
    pub full_name: Option<String>,

    #[validate(length(max = 32))]
    pub phone_number: Option<String>,

    #[validate(url)]
    pub avatar_url: Option<String>,
}

/// User profile service.
#[derive(Clone)]
pub struct UserService {
    user_repo: UserRepository,
}

impl UserService {
    /// Create a new user service.
    #[must_use]
    pub const fn new(user_repo: UserRepository) -> Self {
        Self { user_repo }
    }

    /// Get a user profile by ID.
    pub async fn get(&self, id: &str) -> AppResult<UserResponse> {
        let user = self.user_repo.get_by_id(id).await?;
        Ok(user.into())
    }

    /// Update the caller's profile.
    pub async fn update_profile(
        &self,
        user_id: &str,
        input: UpdateProfileInput,
    ) -> AppResult<UserResponse> {
        input.validate()?;

        let user = self.user_repo.get_by_id(user_id).await?;
        let mut active: wayfare_db::entities::user::ActiveModel = user.into();

        if let Some(full_name) = input.full_name {
            active.full_name = Set(full_name);
        }
        if let Some(phone_number) = input.phone_number {
            active.phone_number = Set(Some(phone_number));
        }
        if let Some(avatar_url) = input.avatar_url {
            active.avatar_url = Set(Some(avatar_url));
        }

        active.updated_at = Set(Some(chrono::Utc::now().into()));

        let updated = self.user_repo.update(active).await?;
        Ok(updated.into())
    }

    /// List users (admin only at the API layer).
    pub async fn list(&self, limit: u64, offset: u64) -> AppResult<Vec<UserResponse>> {
        let users = self.user_repo.find_with_pagination(limit, offset).await?;
        Ok(users.into_iter().map(Into::into).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_profile_input_validation() {
        let input = UpdateProfileInput {
            full_name: Some(String::new()),
            phone_number: None,
            avatar_url: None,
        };
        assert!(input.validate().is_err());

        let input = UpdateProfileInput {
            full_name: Some("New Name".to_string()),
            phone_number: Some("+84 123 456 789".to_string()),
            avatar_url: Some("https://cdn.example.com/a.png".to_string()),
        };
        assert!(input.validate().is_ok());
    }
}
