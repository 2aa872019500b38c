use serde::{Deserialize, Serialize};

/// Body of `matchPets`. The decision stays as text so an unknown value is
/// reported as a bad `status` field.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchDecisionForm {
    pub status: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BreedingAvailabilityForm {
    pub is_available: bool,
}
