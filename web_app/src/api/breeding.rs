//! # Breeding API Module
//!
//! Breeding flow between two pets of different owners:
//!
//! 1. The owner of the requester pet asks for a match with a requested pet,
//!    a `pending` [BreedingRequest](models::breeding::BreedingRequest) is stored.
//! 2. The owner of the requested pet answers with a
//!    [MatchDecision](models::breeding::MatchDecision).
//!    - `Accept`: the request turns into a [PetMatch](models::breeding::PetMatch)
//!      and is deleted, all in one transaction.
//!    - `Reject`: the request is kept with the terminal `rejected` status.

use crate::{api::ApiError, metric, models, repo};
use serde::Serialize;
use std::collections::HashMap;
use uuid::Uuid;

/// Result of answering a breeding request
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(untagged)]
pub enum MatchOutcome {
    Matched(models::breeding::PetMatch),
    Rejected(models::breeding::BreedingRequest),
}

/// Creates a pending breeding request from `requester_pet_id` to `requested_pet_id`.
///
/// Every precondition is checked before writing:
/// - the pets are different, and owned by different users
/// - both pets exist
/// - there is no pending request between them in any direction
/// - they are not matched already
#[tracing::instrument(skip(repo))]
pub async fn request_breeding(
    requester_pet_id: Uuid,
    requested_pet_id: Uuid,
    repo: &repo::ImplAppRepo,
) -> anyhow::Result<models::breeding::BreedingRequest> {
    if requester_pet_id == requested_pet_id {
        return Err(ApiError::invalid_input(
            "resPetId",
            "a pet can't be matched with itself",
        )
        .into());
    }

    let requester_pet = super::pet::get_pet(requester_pet_id, repo).await?;
    let requested_pet = super::pet::get_pet(requested_pet_id, repo).await?;

    if requester_pet.user_app_id == requested_pet.user_app_id {
        return Err(ApiError::invalid_input(
            "resPetId",
            "both pets belong to the same owner",
        )
        .into());
    }

    if repo
        .has_pending_breeding_request(requester_pet_id, requested_pet_id)
        .await?
    {
        return Err(
            ApiError::Conflict("a pending breeding request already exists".into()).into(),
        );
    }

    if repo
        .are_pets_matched(requester_pet_id, requested_pet_id)
        .await?
    {
        return Err(ApiError::Conflict("pets are already matched".into()).into());
    }

    let request =
        models::breeding::BreedingRequest::new_pending(requester_pet_id, requested_pet_id);
    repo.insert_breeding_request(&request).await?;

    metric::incr_breeding_action_statds("request_breeding");
    Ok(request)
}

/// Answers a pending breeding request.
///
/// # Errors
/// - [ApiError::NotFound] when the request doesn't exist, this includes a
///   request already accepted since accepting deletes it
/// - [ApiError::Conflict] when the request was already rejected
#[tracing::instrument(skip(repo))]
pub async fn resolve_breeding_request(
    request_id: Uuid,
    decision: models::breeding::MatchDecision,
    repo: &repo::ImplAppRepo,
) -> anyhow::Result<MatchOutcome> {
    let outcome = match decision {
        models::breeding::MatchDecision::Accept => repo
            .accept_breeding_request(request_id)
            .await?
            .map(MatchOutcome::Matched),
        models::breeding::MatchDecision::Reject => repo
            .reject_breeding_request(request_id)
            .await?
            .map(MatchOutcome::Rejected),
    };

    match outcome {
        Some(outcome) => {
            metric::incr_breeding_action_statds(match outcome {
                MatchOutcome::Matched(_) => "accept_breeding",
                MatchOutcome::Rejected(_) => "reject_breeding",
            });
            Ok(outcome)
        }
        None => match repo.get_breeding_request(request_id).await? {
            Some(request) => Err(ApiError::Conflict(format!(
                "breeding request is already {}",
                request.status
            ))
            .into()),
            None => Err(ApiError::NotFound("breeding request").into()),
        },
    }
}

/// Pets available for breeding that don't belong to `user_id`, newest first
pub async fn get_pet_mates(
    user_id: Uuid,
    repo: &repo::ImplAppRepo,
) -> anyhow::Result<Vec<models::pet::Pet>> {
    super::user::get_existing_user(user_id, repo).await?;

    repo.get_breeding_candidates(user_id).await
}

/// Every breeding request involving a pet of `user_id`, with both pets embedded
pub async fn get_breeding_requests(
    user_id: Uuid,
    repo: &repo::ImplAppRepo,
) -> anyhow::Result<Vec<models::breeding::BreedingRequestDetails>> {
    super::user::get_existing_user(user_id, repo).await?;

    let requests = repo.get_user_breeding_requests(user_id).await?;
    if requests.is_empty() {
        return Ok(vec![]);
    }

    let mut pet_ids: Vec<Uuid> = requests
        .iter()
        .flat_map(|r| [r.requester_pet_id, r.requested_pet_id])
        .collect();
    pet_ids.sort_unstable();
    pet_ids.dedup();

    let pets: HashMap<Uuid, models::pet::Pet> = repo
        .get_pets_by_ids(pet_ids)
        .await?
        .into_iter()
        .map(|pet| (pet.id, pet))
        .collect();

    Ok(requests
        .into_iter()
        .filter_map(|request| {
            let (Some(requester_pet), Some(requested_pet)) = (
                pets.get(&request.requester_pet_id),
                pets.get(&request.requested_pet_id),
            ) else {
                log::warn!("breeding request {} references a missing pet", request.id);
                return None;
            };

            Some(models::breeding::BreedingRequestDetails {
                id: request.id,
                status: request.status,
                requester_pet: requester_pet.clone(),
                requested_pet: requested_pet.clone(),
                created_at: request.created_at,
                updated_at: request.updated_at,
            })
        })
        .collect())
}

/// Matches where `user_id` owns one of the pets
pub async fn get_user_matches(
    user_id: Uuid,
    repo: &repo::ImplAppRepo,
) -> anyhow::Result<Vec<models::breeding::PetMatch>> {
    super::user::get_existing_user(user_id, repo).await?;

    repo.get_user_matches(user_id).await
}
