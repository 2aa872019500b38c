//! Breeding flow endpoints under `/api/petmate`

use ntex::{util::Bytes, web};

use crate::{
    api, models,
    rest::{AppState, errors, forms, utils},
};

/// Creates a pending breeding request from `reqPetId` to `resPetId`
#[web::post("/{req_pet_id}/requestBreeding/{res_pet_id}")]
async fn request_breeding(
    path: web::types::Path<(String, String)>,
    app_state: web::types::State<AppState>,
) -> Result<impl web::Responder, web::Error> {
    let (req_pet_id, res_pet_id) = path.into_inner();
    let requester_pet_id = utils::parse_path_id("reqPetId", &req_pet_id)?;
    let requested_pet_id = utils::parse_path_id("resPetId", &res_pet_id)?;

    let request =
        api::breeding::request_breeding(requester_pet_id, requested_pet_id, &app_state.repo)
            .await
            .map_err(|e| errors::from_api_error(e, "at requestBreeding"))?;

    Ok(web::HttpResponse::Ok().json(&request))
}

/// Accepts or rejects a breeding request.
///
/// Answers with the new match on `Accept` and with the rejected request on
/// `Reject`.
#[web::post("/{breeding_status_id}/matchPets")]
async fn match_pets(
    path: web::types::Path<(String,)>,
    body: Bytes,
    app_state: web::types::State<AppState>,
) -> Result<impl web::Responder, web::Error> {
    let request_id = utils::parse_path_id("breedingStatusId", &path.0)?;
    let form: forms::MatchDecisionForm = utils::parse_json_body(&body)?;
    let decision = form
        .status
        .parse::<models::breeding::MatchDecision>()
        .map_err(|e| errors::UserError::InvalidField {
            field: "status",
            msg: e.to_string(),
        })?;

    let outcome = api::breeding::resolve_breeding_request(request_id, decision, &app_state.repo)
        .await
        .map_err(|e| errors::from_api_error(e, "at matchPets"))?;

    Ok(web::HttpResponse::Ok().json(&outcome))
}

#[web::get("/{user_id}/getPetMates")]
async fn get_pet_mates(
    path: web::types::Path<(String,)>,
    app_state: web::types::State<AppState>,
) -> Result<impl web::Responder, web::Error> {
    let user_id = utils::parse_path_id("userId", &path.0)?;

    let pets = api::breeding::get_pet_mates(user_id, &app_state.repo)
        .await
        .map_err(|e| errors::from_api_error(e, "at getPetMates"))?;

    Ok(web::HttpResponse::Ok().json(&pets))
}

#[web::get("/{user_id}/pendingRequest")]
async fn get_pending_requests(
    path: web::types::Path<(String,)>,
    app_state: web::types::State<AppState>,
) -> Result<impl web::Responder, web::Error> {
    let user_id = utils::parse_path_id("userId", &path.0)?;

    let requests = api::breeding::get_breeding_requests(user_id, &app_state.repo)
        .await
        .map_err(|e| errors::from_api_error(e, "at pendingRequest"))?;

    Ok(web::HttpResponse::Ok().json(&requests))
}

#[web::get("/{user_id}/matches")]
async fn get_matches(
    path: web::types::Path<(String,)>,
    app_state: web::types::State<AppState>,
) -> Result<impl web::Responder, web::Error> {
    let user_id = utils::parse_path_id("userId", &path.0)?;

    let matches = api::breeding::get_user_matches(user_id, &app_state.repo)
        .await
        .map_err(|e| errors::from_api_error(e, "at matches"))?;

    Ok(web::HttpResponse::Ok().json(&matches))
}

#[cfg(test)]
mod tests {
    use crate::api::{pet::tests::create_test_pet, user::tests::create_test_user};
    use crate::models::breeding::{BreedingRequest, PetMatch};
    use crate::repo::MockAppRepo;
    use crate::rest::{routes, tests::test_app_state};
    use chrono::Utc;
    use mockall::predicate::*;
    use ntex::http::StatusCode;
    use ntex::web::{self, test};
    use uuid::Uuid;

    #[ntex::test]
    async fn test_request_breeding_between_two_owners() {
        let p1 = create_test_pet(Uuid::new_v4(), true);
        let p2 = create_test_pet(Uuid::new_v4(), true);
        let (p1_id, p2_id) = (p1.id, p2.id);

        let mut mock_repo = MockAppRepo::new();
        mock_repo.expect_get_pet_by_id().returning(move |pet_id| {
            let pet = [p1.clone(), p2.clone()].into_iter().find(|p| p.id == pet_id);
            Box::pin(async move { Ok(pet) })
        });
        mock_repo
            .expect_has_pending_breeding_request()
            .returning(|_, _| Box::pin(async move { Ok(false) }));
        mock_repo
            .expect_are_pets_matched()
            .returning(|_, _| Box::pin(async move { Ok(false) }));
        mock_repo
            .expect_insert_breeding_request()
            .times(1)
            .returning(|_| Box::pin(async move { Ok(()) }));

        let app = test::init_service(
            web::App::new()
                .state(test_app_state(mock_repo))
                .configure(routes::petmate),
        )
        .await;

        let req = test::TestRequest::post()
            .uri(&format!("/api/petmate/{p1_id}/requestBreeding/{p2_id}"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body: serde_json::Value =
            serde_json::from_slice(&test::read_body(resp).await).unwrap();
        assert_eq!(body["status"], "pending");
        assert_eq!(body["requester_pet_id"], p1_id.to_string());
        assert_eq!(body["requested_pet_id"], p2_id.to_string());
    }

    #[ntex::test]
    async fn test_request_breeding_malformed_id() {
        let mut mock_repo = MockAppRepo::new();
        mock_repo.expect_get_pet_by_id().times(0);

        let app = test::init_service(
            web::App::new()
                .state(test_app_state(mock_repo))
                .configure(routes::petmate),
        )
        .await;

        let req = test::TestRequest::post()
            .uri(&format!(
                "/api/petmate/not-a-pet/requestBreeding/{}",
                Uuid::new_v4()
            ))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let body: serde_json::Value =
            serde_json::from_slice(&test::read_body(resp).await).unwrap();
        assert_eq!(body["error"], "invalid_input");
        assert_eq!(body["field"], "reqPetId");
    }

    #[ntex::test]
    async fn test_match_pets_accept_creates_match() {
        let request_id = Uuid::new_v4();
        let pet_match = PetMatch {
            id: Uuid::new_v4(),
            pet1_id: Uuid::new_v4(),
            pet2_id: Uuid::new_v4(),
            user_of_pet1_id: Uuid::new_v4(),
            user_of_pet2_id: Uuid::new_v4(),
            created_at: Utc::now(),
        };
        let match_id = pet_match.id;

        let mut mock_repo = MockAppRepo::new();
        mock_repo
            .expect_accept_breeding_request()
            .with(eq(request_id))
            .times(1)
            .returning(move |_| {
                let pet_match = pet_match.clone();
                Box::pin(async move { Ok(Some(pet_match)) })
            });

        let app = test::init_service(
            web::App::new()
                .state(test_app_state(mock_repo))
                .configure(routes::petmate),
        )
        .await;

        let req = test::TestRequest::post()
            .uri(&format!("/api/petmate/{request_id}/matchPets"))
            .set_payload(r#"{"status": "Accept"}"#)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body: serde_json::Value =
            serde_json::from_slice(&test::read_body(resp).await).unwrap();
        assert_eq!(body["id"], match_id.to_string());
    }

    #[ntex::test]
    async fn test_match_pets_unknown_decision() {
        let mut mock_repo = MockAppRepo::new();
        mock_repo.expect_accept_breeding_request().times(0);
        mock_repo.expect_reject_breeding_request().times(0);

        let app = test::init_service(
            web::App::new()
                .state(test_app_state(mock_repo))
                .configure(routes::petmate),
        )
        .await;

        let req = test::TestRequest::post()
            .uri(&format!("/api/petmate/{}/matchPets", Uuid::new_v4()))
            .set_payload(r#"{"status": "Maybe"}"#)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let body: serde_json::Value =
            serde_json::from_slice(&test::read_body(resp).await).unwrap();
        assert_eq!(body["field"], "status");
    }

    #[ntex::test]
    async fn test_match_pets_already_rejected() {
        let mut request = BreedingRequest::new_pending(Uuid::new_v4(), Uuid::new_v4());
        request.status = crate::models::breeding::BreedingStatus::Rejected;
        let request_id = request.id;

        let mut mock_repo = MockAppRepo::new();
        mock_repo
            .expect_reject_breeding_request()
            .returning(|_| Box::pin(async move { Ok(None) }));
        mock_repo.expect_get_breeding_request().returning(move |_| {
            let request = request.clone();
            Box::pin(async move { Ok(Some(request)) })
        });

        let app = test::init_service(
            web::App::new()
                .state(test_app_state(mock_repo))
                .configure(routes::petmate),
        )
        .await;

        let req = test::TestRequest::post()
            .uri(&format!("/api/petmate/{request_id}/matchPets"))
            .set_payload(r#"{"status": "Reject"}"#)
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::CONFLICT);
    }

    #[ntex::test]
    async fn test_get_pet_mates_empty_is_ok() {
        let user = create_test_user("ana");
        let user_id = user.id;

        let mut mock_repo = MockAppRepo::new();
        mock_repo.expect_get_user_app_by_id().returning(move |_| {
            let user = user.clone();
            Box::pin(async move { Ok(Some(user)) })
        });
        mock_repo
            .expect_get_breeding_candidates()
            .returning(|_| Box::pin(async move { Ok(vec![]) }));

        let app = test::init_service(
            web::App::new()
                .state(test_app_state(mock_repo))
                .configure(routes::petmate),
        )
        .await;

        let req = test::TestRequest::get()
            .uri(&format!("/api/petmate/{user_id}/getPetMates"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body = test::read_body(resp).await;
        assert_eq!(&body[..], b"[]");
    }

    #[ntex::test]
    async fn test_pending_requests_unknown_user() {
        let mut mock_repo = MockAppRepo::new();
        mock_repo
            .expect_get_user_app_by_id()
            .returning(|_| Box::pin(async move { Ok(None) }));

        let app = test::init_service(
            web::App::new()
                .state(test_app_state(mock_repo))
                .configure(routes::petmate),
        )
        .await;

        let req = test::TestRequest::get()
            .uri(&format!("/api/petmate/{}/pendingRequest", Uuid::new_v4()))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[ntex::test]
    async fn test_repo_failure_is_internal_error() {
        let mut mock_repo = MockAppRepo::new();
        mock_repo
            .expect_get_user_app_by_id()
            .returning(|_| Box::pin(async move { Err(anyhow::anyhow!("database is locked")) }));

        let app = test::init_service(
            web::App::new()
                .state(test_app_state(mock_repo))
                .configure(routes::petmate),
        )
        .await;

        let req = test::TestRequest::get()
            .uri(&format!("/api/petmate/{}/matches", Uuid::new_v4()))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = test::read_body(resp).await;
        assert!(!String::from_utf8_lossy(&body).contains("database is locked"));
    }
}
