//! Pet registry endpoints. Pets owned by a user live under
//! `/api/users/{user_id}/pets`, a single pet can be read from `/api/pets`.

use ntex::{util::Bytes, web};

use crate::{
    api,
    rest::{AppState, errors, forms, utils},
};

#[web::get("/{user_id}/pets")]
async fn get_user_pets(
    path: web::types::Path<(String,)>,
    app_state: web::types::State<AppState>,
) -> Result<impl web::Responder, web::Error> {
    let user_id = utils::parse_path_id("userId", &path.0)?;

    let pets = api::pet::get_user_pets(user_id, &app_state.repo)
        .await
        .map_err(|e| errors::from_api_error(e, "at get_user_pets"))?;

    Ok(web::HttpResponse::Ok().json(&pets))
}

#[web::post("/{user_id}/pets")]
async fn register_pet(
    path: web::types::Path<(String,)>,
    body: Bytes,
    app_state: web::types::State<AppState>,
) -> Result<impl web::Responder, web::Error> {
    let user_id = utils::parse_path_id("userId", &path.0)?;
    let form: api::pet::PetForm = utils::parse_json_body(&body)?;

    let pet = api::pet::register_pet(user_id, form, &app_state.repo)
        .await
        .map_err(|e| errors::from_api_error(e, "at register_pet"))?;

    Ok(web::HttpResponse::Created().json(&pet))
}

#[web::put("/{user_id}/pets/{pet_id}")]
async fn edit_pet(
    path: web::types::Path<(String, String)>,
    body: Bytes,
    app_state: web::types::State<AppState>,
) -> Result<impl web::Responder, web::Error> {
    let (user_id, pet_id) = path.into_inner();
    let user_id = utils::parse_path_id("userId", &user_id)?;
    let pet_id = utils::parse_path_id("petId", &pet_id)?;
    let form: api::pet::PetForm = utils::parse_json_body(&body)?;

    let pet = api::pet::edit_pet(user_id, pet_id, form, &app_state.repo)
        .await
        .map_err(|e| errors::from_api_error(e, "at edit_pet"))?;

    Ok(web::HttpResponse::Ok().json(&pet))
}

/// Opts a pet in or out of breeding
#[web::patch("/{user_id}/pets/{pet_id}/breeding")]
async fn set_breeding_availability(
    path: web::types::Path<(String, String)>,
    body: Bytes,
    app_state: web::types::State<AppState>,
) -> Result<impl web::Responder, web::Error> {
    let (user_id, pet_id) = path.into_inner();
    let user_id = utils::parse_path_id("userId", &user_id)?;
    let pet_id = utils::parse_path_id("petId", &pet_id)?;
    let form: forms::BreedingAvailabilityForm = utils::parse_json_body(&body)?;

    let pet = api::pet::set_breeding_availability(
        user_id,
        pet_id,
        form.is_available,
        &app_state.repo,
    )
    .await
    .map_err(|e| errors::from_api_error(e, "at set_breeding_availability"))?;

    Ok(web::HttpResponse::Ok().json(&pet))
}

/// Deletes the pet with its medical records, breeding requests and matches
#[web::delete("/{user_id}/pets/{pet_id}")]
async fn delete_pet(
    path: web::types::Path<(String, String)>,
    app_state: web::types::State<AppState>,
) -> Result<impl web::Responder, web::Error> {
    let (user_id, pet_id) = path.into_inner();
    let user_id = utils::parse_path_id("userId", &user_id)?;
    let pet_id = utils::parse_path_id("petId", &pet_id)?;

    api::pet::delete_pet(user_id, pet_id, &app_state.repo)
        .await
        .map_err(|e| errors::from_api_error(e, "at delete_pet"))?;

    Ok(web::HttpResponse::NoContent().finish())
}

#[web::get("/{pet_id}")]
async fn get_pet(
    path: web::types::Path<(String,)>,
    app_state: web::types::State<AppState>,
) -> Result<impl web::Responder, web::Error> {
    let pet_id = utils::parse_path_id("petId", &path.0)?;

    let pet = api::pet::get_pet(pet_id, &app_state.repo)
        .await
        .map_err(|e| errors::from_api_error(e, "at get_pet"))?;

    Ok(web::HttpResponse::Ok().json(&pet))
}
