use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Picture of a prescription or lab result. Always linked to its pet.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MedicalRecord {
    pub id: Uuid,
    pub pet_id: Uuid,
    pub pic: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
}
