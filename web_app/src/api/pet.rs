//! # Pet API Module
//!
//! Pet registry: registration, edition, breeding availability and deletion.
//! Only the owner of a pet may change it.

use crate::{api::ApiError, consts, metric, models, repo};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Request body to register or edit a pet.
///
/// `species` and `gender` stay as text so a bad value is reported with its
/// field name instead of a generic json error.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PetForm {
    pub pet_name: String,
    pub species: String,
    pub breed: String,
    pub age: i64,
    pub weight: f64,
    pub gender: String,
    #[serde(default)]
    pub pic: Option<String>,
    #[serde(default)]
    pub is_available_for_breeding: bool,
}

/// Validated fields of a [PetForm]
struct PetFields {
    pet_name: String,
    species: models::pet::Species,
    breed: String,
    age: u8,
    weight: f64,
    gender: models::pet::Gender,
    pic: Option<String>,
}

impl PetForm {
    fn validate(&self) -> Result<PetFields, ApiError> {
        let pet_name = super::required_text(
            "pet_name",
            &ammonia::clean(&self.pet_name),
            consts::MAX_TEXT_FIELD_LEN,
        )?;
        let breed = super::required_text(
            "breed",
            &ammonia::clean(&self.breed),
            consts::MAX_TEXT_FIELD_LEN,
        )?;

        let species = self
            .species
            .parse::<models::pet::Species>()
            .map_err(|e| ApiError::invalid_input("species", e.to_string()))?;
        let gender = self
            .gender
            .parse::<models::pet::Gender>()
            .map_err(|e| ApiError::invalid_input("gender", e.to_string()))?;

        let age = u8::try_from(self.age)
            .ok()
            .filter(|age| *age <= consts::MAX_PET_AGE)
            .ok_or_else(|| {
                ApiError::invalid_input(
                    "age",
                    format!("must be between 0 and {}", consts::MAX_PET_AGE),
                )
            })?;

        if !(self.weight > 0.0 && self.weight <= consts::MAX_PET_WEIGHT_KG) {
            return Err(ApiError::invalid_input(
                "weight",
                format!("must be greater than 0 and at most {}", consts::MAX_PET_WEIGHT_KG),
            ));
        }

        let pic = match self.pic.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(url) => Some(validate_pic_url("pic", url)?),
        };

        Ok(PetFields {
            pet_name,
            species,
            breed,
            age,
            weight: self.weight,
            gender,
            pic,
        })
    }
}

/// Images live on a third party media host, only its url is stored
pub(crate) fn validate_pic_url(field: &'static str, url: &str) -> Result<String, ApiError> {
    let url = url.trim();
    let has_host = consts::ACCEPTED_URL_SCHEMES
        .iter()
        .any(|scheme| url.len() > scheme.len() && url.to_lowercase().starts_with(scheme));

    if !has_host || url.chars().any(char::is_whitespace) {
        return Err(ApiError::invalid_input(field, "must be an http(s) url"));
    }

    Ok(url.to_string())
}

/// Fetches a pet, failing with [ApiError::NotFound] when missing
pub async fn get_pet(pet_id: Uuid, repo: &repo::ImplAppRepo) -> anyhow::Result<models::pet::Pet> {
    repo.get_pet_by_id(pet_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("pet").into())
}

/// Registers a pet for an existing user
#[tracing::instrument(skip(form, repo))]
pub async fn register_pet(
    user_id: Uuid,
    form: PetForm,
    repo: &repo::ImplAppRepo,
) -> anyhow::Result<models::pet::Pet> {
    let fields = form.validate()?;
    super::user::get_existing_user(user_id, repo).await?;

    let now = Utc::now();
    let pet = models::pet::Pet {
        id: Uuid::new_v4(),
        user_app_id: user_id,
        pet_name: fields.pet_name,
        species: fields.species,
        breed: fields.breed,
        age: fields.age,
        weight: fields.weight,
        gender: fields.gender,
        pic: fields.pic,
        is_available_for_breeding: form.is_available_for_breeding,
        created_at: now,
        updated_at: now,
    };
    repo.insert_pet(&pet).await?;

    metric::incr_pet_action_statds("register_pet");
    Ok(pet)
}

/// Lists the pets of an existing user, newest first
pub async fn get_user_pets(
    user_id: Uuid,
    repo: &repo::ImplAppRepo,
) -> anyhow::Result<Vec<models::pet::Pet>> {
    super::user::get_existing_user(user_id, repo).await?;

    repo.get_all_pets_user_id(user_id).await
}

/// Replaces the editable fields of a pet owned by `user_id`
#[tracing::instrument(skip(form, repo))]
pub async fn edit_pet(
    user_id: Uuid,
    pet_id: Uuid,
    form: PetForm,
    repo: &repo::ImplAppRepo,
) -> anyhow::Result<models::pet::Pet> {
    let fields = form.validate()?;
    let current = get_pet(pet_id, repo).await?;
    if !current.is_owned_by(user_id) {
        return Err(ApiError::NotFound("pet").into());
    }

    let pet = models::pet::Pet {
        pet_name: fields.pet_name,
        species: fields.species,
        breed: fields.breed,
        age: fields.age,
        weight: fields.weight,
        gender: fields.gender,
        pic: fields.pic,
        is_available_for_breeding: form.is_available_for_breeding,
        updated_at: Utc::now(),
        ..current
    };

    if !repo.update_pet(&pet).await? {
        return Err(ApiError::NotFound("pet").into());
    }

    metric::incr_pet_action_statds("edit_pet");
    Ok(pet)
}

/// Opts a pet in or out of the breeding candidate listings
pub async fn set_breeding_availability(
    user_id: Uuid,
    pet_id: Uuid,
    is_available: bool,
    repo: &repo::ImplAppRepo,
) -> anyhow::Result<models::pet::Pet> {
    if !repo
        .set_pet_breeding_availability(pet_id, user_id, is_available)
        .await?
    {
        return Err(ApiError::NotFound("pet").into());
    }

    metric::incr_pet_action_statds(if is_available {
        "breeding_opt_in"
    } else {
        "breeding_opt_out"
    });
    get_pet(pet_id, repo).await
}

/// Deletes a pet owned by `user_id` and everything that references it
#[tracing::instrument(skip(repo))]
pub async fn delete_pet(
    user_id: Uuid,
    pet_id: Uuid,
    repo: &repo::ImplAppRepo,
) -> anyhow::Result<()> {
    if !repo.delete_pet(pet_id, user_id).await? {
        return Err(ApiError::NotFound("pet").into());
    }

    metric::incr_pet_action_statds("delete_pet");
    Ok(())
}
