//! # User API Module
//!
//! User registration and profile lookups. Authentication itself is handled
//! outside this service.

use crate::{api::ApiError, consts, metric, models, repo, utils};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Request body to register a new user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewUserRequest {
    pub username: String,
    pub email: String,
    pub phone: String,
    pub password: String,
    #[serde(default)]
    pub full_name: String,
}

impl NewUserRequest {
    /// Validates and normalizes the request fields.
    ///
    /// Username and email are lowercased so uniqueness checks are case
    /// insensitive.
    fn into_user(self) -> anyhow::Result<models::user_app::User> {
        let username =
            super::required_text("username", &self.username, consts::MAX_TEXT_FIELD_LEN)?
                .to_lowercase();
        let email =
            super::required_text("email", &self.email, consts::MAX_TEXT_FIELD_LEN)?.to_lowercase();
        if !email.contains('@') {
            return Err(ApiError::invalid_input("email", "must be a valid email address").into());
        }
        let phone = super::required_text("phone", &self.phone, consts::MAX_TEXT_FIELD_LEN)?;

        if self.password.chars().count() < consts::MIN_PASSWORD_LEN {
            return Err(ApiError::invalid_input(
                "password",
                format!("must be at least {} characters", consts::MIN_PASSWORD_LEN),
            )
            .into());
        }

        Ok(models::user_app::User::new(
            username,
            email,
            phone,
            utils::hash_password(&self.password)?,
            ammonia::clean(self.full_name.trim()),
        ))
    }
}

/// User with the ids of the pets they own
#[derive(Debug, Serialize)]
pub struct UserProfile {
    #[serde(flatten)]
    pub user: models::user_app::User,
    pub pets: Vec<Uuid>,
}

/// Registers a new user.
///
/// # Errors
/// - [ApiError::InvalidInput] when a field is blank or malformed
/// - [ApiError::Conflict] when username, email or phone is taken
#[tracing::instrument(skip_all)]
pub async fn create_user(
    request: NewUserRequest,
    repo: &repo::ImplAppRepo,
) -> anyhow::Result<models::user_app::User> {
    let user = request.into_user()?;
    repo.insert_user_app(&user).await?;

    metric::incr_user_action_statds("create_user");
    Ok(user)
}

/// Fetches a user, failing with [ApiError::NotFound] when missing
pub async fn get_existing_user(
    user_id: Uuid,
    repo: &repo::ImplAppRepo,
) -> anyhow::Result<models::user_app::User> {
    repo.get_user_app_by_id(user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("user").into())
}

pub async fn get_user_profile(
    user_id: Uuid,
    repo: &repo::ImplAppRepo,
) -> anyhow::Result<UserProfile> {
    let user = get_existing_user(user_id, repo).await?;
    let pets = repo
        .get_all_pets_user_id(user_id)
        .await?
        .into_iter()
        .map(|pet| pet.id)
        .collect();

    Ok(UserProfile { user, pets })
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::repo::MockAppRepo;
    use mockall::predicate::*;

    pub(crate) fn create_test_user(username: &str) -> models::user_app::User {
        models::user_app::User::new(
            username.to_string(),
            format!("{username}@example.com"),
            format!("555-{username}"),
            "hash".to_string(),
            String::new(),
        )
    }

    fn new_user_request() -> NewUserRequest {
        NewUserRequest {
            username: " Ana ".into(),
            email: "Ana@Example.com".into(),
            phone: "555-0101".into(),
            password: "long-enough".into(),
            full_name: "Ana<script>alert(1)</script>".into(),
        }
    }

    #[ntex::test]
    async fn test_create_user_normalizes_and_hashes() {
        let mut mock_repo = MockAppRepo::new();
        mock_repo
            .expect_insert_user_app()
            .withf(|user| {
                user.username == "ana"
                    && user.email == "ana@example.com"
                    && user.password_hash != "long-enough"
            })
            .times(1)
            .returning(|_| Box::pin(async move { Ok(()) }));
        let mock_repo: Box<dyn repo::AppRepo> = Box::new(mock_repo);

        let result = create_user(new_user_request(), &mock_repo).await;

        assert!(
            result.is_ok_and(|user| user.username == "ana" && !user.full_name.contains("script"))
        );
    }

    #[ntex::test]
    async fn test_create_user_rejects_short_password() {
        let mut mock_repo = MockAppRepo::new();
        mock_repo.expect_insert_user_app().times(0);
        let mock_repo: Box<dyn repo::AppRepo> = Box::new(mock_repo);

        let request = NewUserRequest {
            password: "short".into(),
            ..new_user_request()
        };
        let err = create_user(request, &mock_repo).await.unwrap_err();

        assert!(matches!(
            crate::api::as_api_error(&err),
            Some(ApiError::InvalidInput {
                field: "password",
                ..
            })
        ));
    }

    #[ntex::test]
    async fn test_create_user_rejects_invalid_email() {
        let mock_repo: Box<dyn repo::AppRepo> = Box::new(MockAppRepo::new());

        let request = NewUserRequest {
            email: "not-an-email".into(),
            ..new_user_request()
        };
        let err = create_user(request, &mock_repo).await.unwrap_err();

        assert!(err.to_string().starts_with("email:"));
    }

    #[ntex::test]
    async fn test_get_user_profile_lists_pet_ids() {
        let user = create_test_user("ana");
        let user_id = user.id;
        let pet = models::pet::Pet {
            id: Uuid::new_v4(),
            user_app_id: user_id,
            ..Default::default()
        };
        let pet_id = pet.id;

        let mut mock_repo = MockAppRepo::new();
        mock_repo
            .expect_get_user_app_by_id()
            .with(eq(user_id))
            .times(1)
            .returning(move |_| {
                let user = user.clone();
                Box::pin(async move { Ok(Some(user)) })
            });
        mock_repo
            .expect_get_all_pets_user_id()
            .with(eq(user_id))
            .times(1)
            .returning(move |_| {
                let pet = pet.clone();
                Box::pin(async move { Ok(vec![pet]) })
            });
        let mock_repo: Box<dyn repo::AppRepo> = Box::new(mock_repo);

        let result = get_user_profile(user_id, &mock_repo).await;

        assert!(result.is_ok_and(|profile| profile.pets == vec![pet_id]));
    }

    #[ntex::test]
    async fn test_get_user_profile_not_found() {
        let mut mock_repo = MockAppRepo::new();
        mock_repo
            .expect_get_user_app_by_id()
            .times(1)
            .returning(|_| Box::pin(async move { Ok(None) }));
        let mock_repo: Box<dyn repo::AppRepo> = Box::new(mock_repo);

        let err = get_user_profile(Uuid::new_v4(), &mock_repo)
            .await
            .unwrap_err();

        assert_eq!(
            crate::api::as_api_error(&err),
            Some(&ApiError::NotFound("user"))
        );
    }
}
