use chrono::{DateTime, Utc};
use derive_more::Display;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;

use super::pet::Pet;

/// Lifecycle of a breeding request.
///
/// `Approved` only lives inside the transaction that turns the request into a
/// [PetMatch], the row is deleted before commit.
#[derive(Debug, Display, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum BreedingStatus {
    #[default]
    #[display("pending")]
    Pending,
    #[display("approved")]
    Approved,
    #[display("rejected")]
    Rejected,
}

impl FromStr for BreedingStatus {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(BreedingStatus::Pending),
            "approved" => Ok(BreedingStatus::Approved),
            "rejected" => Ok(BreedingStatus::Rejected),
            other => anyhow::bail!("unknown breeding status: {other}"),
        }
    }
}

/// Answer of the owner of the requested pet.
#[derive(Debug, Display, Clone, Copy, Deserialize, Serialize, PartialEq, Eq)]
pub enum MatchDecision {
    #[display("Accept")]
    Accept,
    #[display("Reject")]
    Reject,
}

impl FromStr for MatchDecision {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Accept" => Ok(MatchDecision::Accept),
            "Reject" => Ok(MatchDecision::Reject),
            other => anyhow::bail!("decision must be Accept or Reject, got: {other}"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BreedingRequest {
    pub id: Uuid,
    pub requester_pet_id: Uuid,
    pub requested_pet_id: Uuid,
    pub status: BreedingStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl BreedingRequest {
    pub fn new_pending(requester_pet_id: Uuid, requested_pet_id: Uuid) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            requester_pet_id,
            requested_pet_id,
            status: BreedingStatus::Pending,
            created_at: now,
            updated_at: now,
        }
    }
}

/// A breeding request with both pets embedded.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct BreedingRequestDetails {
    pub id: Uuid,
    pub status: BreedingStatus,
    pub requester_pet: Pet,
    pub requested_pet: Pet,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Accepted breeding request. Immutable once stored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PetMatch {
    pub id: Uuid,
    pub pet1_id: Uuid,
    pub pet2_id: Uuid,
    pub user_of_pet1_id: Uuid,
    pub user_of_pet2_id: Uuid,
    pub created_at: DateTime<Utc>,
}
