pub mod sqlite;
pub mod sqlite_queries;

use crate::models;
use async_trait::async_trait;
use uuid::Uuid;

#[async_trait]
#[cfg_attr(test, mockall::automock)]
pub trait AppRepo {
    async fn insert_user_app(&self, app_user: &models::user_app::User) -> anyhow::Result<()>;

    async fn get_user_app_by_id(
        &self,
        user_id: Uuid,
    ) -> anyhow::Result<Option<models::user_app::User>>;

    async fn insert_pet(&self, pet: &models::pet::Pet) -> anyhow::Result<()>;

    /// Returns `false` when no pet with that id is owned by `pet.user_app_id`
    async fn update_pet(&self, pet: &models::pet::Pet) -> anyhow::Result<bool>;

    async fn set_pet_breeding_availability(
        &self,
        pet_id: Uuid,
        user_id: Uuid,
        is_available: bool,
    ) -> anyhow::Result<bool>;

    /// Deletes the pet together with its medical records, breeding requests
    /// and matches in one transaction
    async fn delete_pet(&self, pet_id: Uuid, user_id: Uuid) -> anyhow::Result<bool>;

    async fn get_pet_by_id(&self, pet_id: Uuid) -> anyhow::Result<Option<models::pet::Pet>>;

    async fn get_pets_by_ids(&self, pet_ids: Vec<Uuid>) -> anyhow::Result<Vec<models::pet::Pet>>;

    async fn get_all_pets_user_id(&self, user_id: Uuid) -> anyhow::Result<Vec<models::pet::Pet>>;

    /// Pets available for breeding that are not owned by `user_id`
    async fn get_breeding_candidates(
        &self,
        user_id: Uuid,
    ) -> anyhow::Result<Vec<models::pet::Pet>>;

    async fn insert_medical_record(
        &self,
        record: &models::medical_record::MedicalRecord,
    ) -> anyhow::Result<()>;

    async fn get_pet_medical_records(
        &self,
        pet_id: Uuid,
    ) -> anyhow::Result<Vec<models::medical_record::MedicalRecord>>;

    async fn delete_medical_record(&self, pet_id: Uuid, record_id: Uuid) -> anyhow::Result<bool>;

    async fn insert_breeding_request(
        &self,
        request: &models::breeding::BreedingRequest,
    ) -> anyhow::Result<()>;

    async fn get_breeding_request(
        &self,
        request_id: Uuid,
    ) -> anyhow::Result<Option<models::breeding::BreedingRequest>>;

    /// Checks both directions of the pair
    async fn has_pending_breeding_request(
        &self,
        pet_a_id: Uuid,
        pet_b_id: Uuid,
    ) -> anyhow::Result<bool>;

    /// Checks both directions of the pair
    async fn are_pets_matched(&self, pet_a_id: Uuid, pet_b_id: Uuid) -> anyhow::Result<bool>;

    /// Every stored request where at least one pet belongs to `user_id`
    async fn get_user_breeding_requests(
        &self,
        user_id: Uuid,
    ) -> anyhow::Result<Vec<models::breeding::BreedingRequest>>;

    /// Atomically moves a pending request to a [PetMatch](models::breeding::PetMatch)
    /// and deletes the request. `None` when the request is not pending anymore
    /// or does not exist.
    async fn accept_breeding_request(
        &self,
        request_id: Uuid,
    ) -> anyhow::Result<Option<models::breeding::PetMatch>>;

    /// `None` when the request is not pending anymore or does not exist
    async fn reject_breeding_request(
        &self,
        request_id: Uuid,
    ) -> anyhow::Result<Option<models::breeding::BreedingRequest>>;

    async fn get_user_matches(
        &self,
        user_id: Uuid,
    ) -> anyhow::Result<Vec<models::breeding::PetMatch>>;
}

pub type ImplAppRepo = Box<dyn AppRepo>;
