use ntex::{util::Bytes, web};

use crate::{
    api,
    rest::{AppState, errors, utils},
};

/// Registers a user
#[web::post("")]
async fn create_user(
    body: Bytes,
    app_state: web::types::State<AppState>,
) -> Result<impl web::Responder, web::Error> {
    let request: api::user::NewUserRequest = utils::parse_json_body(&body)?;

    let user = api::user::create_user(request, &app_state.repo)
        .await
        .map_err(|e| errors::from_api_error(e, "at create_user"))?;

    Ok(web::HttpResponse::Created().json(&user))
}

/// User profile with the ids of the pets they own
#[web::get("/{user_id}")]
async fn get_user_profile(
    path: web::types::Path<(String,)>,
    app_state: web::types::State<AppState>,
) -> Result<impl web::Responder, web::Error> {
    let user_id = utils::parse_path_id("userId", &path.0)?;

    let profile = api::user::get_user_profile(user_id, &app_state.repo)
        .await
        .map_err(|e| errors::from_api_error(e, "at get_user_profile"))?;

    Ok(web::HttpResponse::Ok().json(&profile))
}

#[cfg(test)]
mod tests {
    use crate::repo::MockAppRepo;
    use crate::rest::{routes, tests::test_app_state};
    use ntex::http::StatusCode;
    use ntex::web::{self, test};

    #[ntex::test]
    async fn test_create_user_hides_password_hash() {
        let mut mock_repo = MockAppRepo::new();
        mock_repo
            .expect_insert_user_app()
            .times(1)
            .returning(|_| Box::pin(async move { Ok(()) }));

        let app = test::init_service(
            web::App::new()
                .state(test_app_state(mock_repo))
                .configure(routes::users),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/users")
            .set_payload(
                r#"{"username": "ana", "email": "ana@example.com", "phone": "555-0101", "password": "long-enough"}"#,
            )
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);

        let body: serde_json::Value =
            serde_json::from_slice(&test::read_body(resp).await).unwrap();
        assert_eq!(body["username"], "ana");
        assert!(body.get("password_hash").is_none());
    }

    #[ntex::test]
    async fn test_create_user_duplicate_is_conflict() {
        let mut mock_repo = MockAppRepo::new();
        mock_repo.expect_insert_user_app().returning(|_| {
            Box::pin(async move {
                Err(anyhow::Error::from(crate::api::ApiError::Conflict(
                    "username is already taken".into(),
                )))
            })
        });

        let app = test::init_service(
            web::App::new()
                .state(test_app_state(mock_repo))
                .configure(routes::users),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/users")
            .set_payload(
                r#"{"username": "ana", "email": "ana@example.com", "phone": "555-0101", "password": "long-enough"}"#,
            )
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::CONFLICT);
    }
}
