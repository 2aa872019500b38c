use crate::{api, models};
use async_trait::async_trait;
use chrono::Utc;
use sqlx::{FromRow, Row, SqlitePool, sqlite::SqliteRow};
use std::str::FromStr;
use uuid::Uuid;

use super::{AppRepo, sqlite_queries};

#[derive(Clone)]
pub struct SqlxSqliteRepo {
    pub db_pool: SqlitePool,
}

fn try_get_uuid(row: &SqliteRow, column: &str) -> sqlx::Result<Uuid> {
    let value: uuid::fmt::Hyphenated = row.try_get(column)?;
    Ok(value.into())
}

/// Decodes a text column into one of the model enums
fn try_get_parsed<T>(row: &SqliteRow, column: &str) -> sqlx::Result<T>
where
    T: FromStr<Err = anyhow::Error>,
{
    row.try_get::<String, &str>(column)?
        .parse::<T>()
        .map_err(|e| sqlx::Error::Decode(e.into()))
}

/// Turns a unique constraint violation into an [api::ApiError::Conflict]
fn map_unique_violation(err: sqlx::Error, msg: &str) -> anyhow::Error {
    match &err {
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
            api::ApiError::Conflict(msg.to_string()).into()
        }
        _ => err.into(),
    }
}

impl FromRow<'_, SqliteRow> for models::user_app::User {
    fn from_row(row: &SqliteRow) -> sqlx::Result<Self> {
        Ok(Self {
            id: try_get_uuid(row, "id")?,
            username: row.try_get("username")?,
            email: row.try_get("email")?,
            phone: row.try_get("phone")?,
            password_hash: row.try_get("password_hash")?,
            full_name: row.try_get("full_name")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }
}

impl FromRow<'_, SqliteRow> for models::pet::Pet {
    fn from_row(row: &SqliteRow) -> sqlx::Result<Self> {
        Ok(Self {
            id: try_get_uuid(row, "id")?,
            user_app_id: try_get_uuid(row, "user_app_id")?,
            pet_name: row.try_get("pet_name")?,
            species: try_get_parsed(row, "species")?,
            breed: row.try_get("breed")?,
            age: row.try_get("age")?,
            weight: row.try_get("weight")?,
            gender: try_get_parsed(row, "gender")?,
            pic: row.try_get("pic")?,
            is_available_for_breeding: row.try_get("is_available_for_breeding")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }
}

impl FromRow<'_, SqliteRow> for models::medical_record::MedicalRecord {
    fn from_row(row: &SqliteRow) -> sqlx::Result<Self> {
        Ok(Self {
            id: try_get_uuid(row, "id")?,
            pet_id: try_get_uuid(row, "pet_id")?,
            pic: row.try_get("pic")?,
            description: row.try_get("description")?,
            created_at: row.try_get("created_at")?,
        })
    }
}

impl FromRow<'_, SqliteRow> for models::breeding::BreedingRequest {
    fn from_row(row: &SqliteRow) -> sqlx::Result<Self> {
        Ok(Self {
            id: try_get_uuid(row, "id")?,
            requester_pet_id: try_get_uuid(row, "requester_pet_id")?,
            requested_pet_id: try_get_uuid(row, "requested_pet_id")?,
            status: try_get_parsed(row, "status")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }
}

impl FromRow<'_, SqliteRow> for models::breeding::PetMatch {
    fn from_row(row: &SqliteRow) -> sqlx::Result<Self> {
        Ok(Self {
            id: try_get_uuid(row, "id")?,
            pet1_id: try_get_uuid(row, "pet1_id")?,
            pet2_id: try_get_uuid(row, "pet2_id")?,
            user_of_pet1_id: try_get_uuid(row, "user_of_pet1_id")?,
            user_of_pet2_id: try_get_uuid(row, "user_of_pet2_id")?,
            created_at: row.try_get("created_at")?,
        })
    }
}

#[async_trait]
impl AppRepo for SqlxSqliteRepo {
    async fn insert_user_app(&self, app_user: &models::user_app::User) -> anyhow::Result<()> {
        sqlx::query(sqlite_queries::QUERY_INSERT_USER_APP)
            .bind(app_user.id.to_string())
            .bind(&app_user.username)
            .bind(&app_user.email)
            .bind(&app_user.phone)
            .bind(&app_user.password_hash)
            .bind(&app_user.full_name)
            .bind(app_user.created_at)
            .bind(app_user.updated_at)
            .execute(&self.db_pool)
            .await
            .map_err(|e| map_unique_violation(e, "username, email or phone already registered"))?;

        Ok(())
    }

    async fn get_user_app_by_id(
        &self,
        user_id: Uuid,
    ) -> anyhow::Result<Option<models::user_app::User>> {
        Ok(
            sqlx::query_as::<_, models::user_app::User>(sqlite_queries::QUERY_GET_USER_APP_BY_ID)
                .bind(user_id.to_string())
                .fetch_optional(&self.db_pool)
                .await?,
        )
    }

    async fn insert_pet(&self, pet: &models::pet::Pet) -> anyhow::Result<()> {
        sqlx::query(sqlite_queries::QUERY_INSERT_PET)
            .bind(pet.id.to_string())
            .bind(pet.user_app_id.to_string())
            .bind(&pet.pet_name)
            .bind(pet.species.to_string())
            .bind(&pet.breed)
            .bind(pet.age)
            .bind(pet.weight)
            .bind(pet.gender.to_string())
            .bind(&pet.pic)
            .bind(pet.is_available_for_breeding)
            .bind(pet.created_at)
            .bind(pet.updated_at)
            .execute(&self.db_pool)
            .await?;

        Ok(())
    }

    async fn update_pet(&self, pet: &models::pet::Pet) -> anyhow::Result<bool> {
        Ok(sqlx::query(sqlite_queries::QUERY_UPDATE_PET)
            .bind(pet.id.to_string())
            .bind(pet.user_app_id.to_string())
            .bind(&pet.pet_name)
            .bind(pet.species.to_string())
            .bind(&pet.breed)
            .bind(pet.age)
            .bind(pet.weight)
            .bind(pet.gender.to_string())
            .bind(&pet.pic)
            .bind(pet.is_available_for_breeding)
            .bind(Utc::now())
            .execute(&self.db_pool)
            .await?
            .rows_affected()
            > 0)
    }

    async fn set_pet_breeding_availability(
        &self,
        pet_id: Uuid,
        user_id: Uuid,
        is_available: bool,
    ) -> anyhow::Result<bool> {
        Ok(
            sqlx::query(sqlite_queries::QUERY_SET_PET_BREEDING_AVAILABILITY)
                .bind(pet_id.to_string())
                .bind(user_id.to_string())
                .bind(is_available)
                .bind(Utc::now())
                .execute(&self.db_pool)
                .await?
                .rows_affected()
                > 0,
        )
    }

    async fn delete_pet(&self, pet_id: Uuid, user_id: Uuid) -> anyhow::Result<bool> {
        let pet_id = pet_id.to_string();
        let mut transaction = self.db_pool.begin().await?;

        let is_owned = sqlx::query_scalar::<_, i64>(sqlite_queries::QUERY_IS_PET_OWNED_BY)
            .bind(&pet_id)
            .bind(user_id.to_string())
            .fetch_one(&mut *transaction)
            .await?
            > 0;

        if !is_owned {
            return Ok(false);
        }

        for query in [
            sqlite_queries::QUERY_DELETE_PET_MEDICAL_RECORDS,
            sqlite_queries::QUERY_DELETE_PET_BREEDING_REQUESTS,
            sqlite_queries::QUERY_DELETE_PET_MATCHES,
        ] {
            sqlx::query(query)
                .bind(&pet_id)
                .execute(&mut *transaction)
                .await?;
        }

        sqlx::query(sqlite_queries::QUERY_DELETE_PET)
            .bind(&pet_id)
            .bind(user_id.to_string())
            .execute(&mut *transaction)
            .await?;

        transaction.commit().await?;

        Ok(true)
    }

    async fn get_pet_by_id(&self, pet_id: Uuid) -> anyhow::Result<Option<models::pet::Pet>> {
        Ok(
            sqlx::query_as::<_, models::pet::Pet>(sqlite_queries::QUERY_GET_PET_BY_ID)
                .bind(pet_id.to_string())
                .fetch_optional(&self.db_pool)
                .await?,
        )
    }

    async fn get_pets_by_ids(&self, pet_ids: Vec<Uuid>) -> anyhow::Result<Vec<models::pet::Pet>> {
        if pet_ids.is_empty() {
            return Ok(vec![]);
        }

        let mut query_builder =
            sqlx::QueryBuilder::<sqlx::Sqlite>::new(sqlite_queries::QUERY_GET_PETS_BY_IDS_PREFIX);
        query_builder.push("(");
        let mut separated = query_builder.separated(",");
        for pet_id in pet_ids {
            separated.push_bind(pet_id.to_string());
        }
        separated.push_unseparated(");");

        Ok(query_builder
            .build_query_as::<models::pet::Pet>()
            .fetch_all(&self.db_pool)
            .await?)
    }

    async fn get_all_pets_user_id(&self, user_id: Uuid) -> anyhow::Result<Vec<models::pet::Pet>> {
        Ok(
            sqlx::query_as::<_, models::pet::Pet>(sqlite_queries::QUERY_GET_ALL_PETS_USER_ID)
                .bind(user_id.to_string())
                .fetch_all(&self.db_pool)
                .await?,
        )
    }

    async fn get_breeding_candidates(
        &self,
        user_id: Uuid,
    ) -> anyhow::Result<Vec<models::pet::Pet>> {
        Ok(
            sqlx::query_as::<_, models::pet::Pet>(sqlite_queries::QUERY_GET_BREEDING_CANDIDATES)
                .bind(user_id.to_string())
                .fetch_all(&self.db_pool)
                .await?,
        )
    }

    async fn insert_medical_record(
        &self,
        record: &models::medical_record::MedicalRecord,
    ) -> anyhow::Result<()> {
        sqlx::query(sqlite_queries::QUERY_INSERT_MEDICAL_RECORD)
            .bind(record.id.to_string())
            .bind(record.pet_id.to_string())
            .bind(&record.pic)
            .bind(&record.description)
            .bind(record.created_at)
            .execute(&self.db_pool)
            .await?;

        Ok(())
    }

    async fn get_pet_medical_records(
        &self,
        pet_id: Uuid,
    ) -> anyhow::Result<Vec<models::medical_record::MedicalRecord>> {
        Ok(sqlx::query_as::<_, models::medical_record::MedicalRecord>(
            sqlite_queries::QUERY_GET_PET_MEDICAL_RECORDS,
        )
        .bind(pet_id.to_string())
        .fetch_all(&self.db_pool)
        .await?)
    }

    async fn delete_medical_record(&self, pet_id: Uuid, record_id: Uuid) -> anyhow::Result<bool> {
        Ok(sqlx::query(sqlite_queries::QUERY_DELETE_MEDICAL_RECORD)
            .bind(record_id.to_string())
            .bind(pet_id.to_string())
            .execute(&self.db_pool)
            .await?
            .rows_affected()
            > 0)
    }

    async fn insert_breeding_request(
        &self,
        request: &models::breeding::BreedingRequest,
    ) -> anyhow::Result<()> {
        sqlx::query(sqlite_queries::QUERY_INSERT_BREEDING_REQUEST)
            .bind(request.id.to_string())
            .bind(request.requester_pet_id.to_string())
            .bind(request.requested_pet_id.to_string())
            .bind(request.status.to_string())
            .bind(request.created_at)
            .bind(request.updated_at)
            .execute(&self.db_pool)
            .await
            .map_err(|e| {
                map_unique_violation(e, "a pending request between these pets already exists")
            })?;

        Ok(())
    }

    async fn get_breeding_request(
        &self,
        request_id: Uuid,
    ) -> anyhow::Result<Option<models::breeding::BreedingRequest>> {
        Ok(sqlx::query_as::<_, models::breeding::BreedingRequest>(
            sqlite_queries::QUERY_GET_BREEDING_REQUEST,
        )
        .bind(request_id.to_string())
        .fetch_optional(&self.db_pool)
        .await?)
    }

    async fn has_pending_breeding_request(
        &self,
        pet_a_id: Uuid,
        pet_b_id: Uuid,
    ) -> anyhow::Result<bool> {
        Ok(
            sqlx::query_scalar::<_, i64>(sqlite_queries::QUERY_HAS_PENDING_BREEDING_REQUEST)
                .bind(pet_a_id.to_string())
                .bind(pet_b_id.to_string())
                .fetch_one(&self.db_pool)
                .await?
                > 0,
        )
    }

    async fn are_pets_matched(&self, pet_a_id: Uuid, pet_b_id: Uuid) -> anyhow::Result<bool> {
        Ok(
            sqlx::query_scalar::<_, i64>(sqlite_queries::QUERY_ARE_PETS_MATCHED)
                .bind(pet_a_id.to_string())
                .bind(pet_b_id.to_string())
                .fetch_one(&self.db_pool)
                .await?
                > 0,
        )
    }

    async fn get_user_breeding_requests(
        &self,
        user_id: Uuid,
    ) -> anyhow::Result<Vec<models::breeding::BreedingRequest>> {
        Ok(sqlx::query_as::<_, models::breeding::BreedingRequest>(
            sqlite_queries::QUERY_GET_USER_BREEDING_REQUESTS,
        )
        .bind(user_id.to_string())
        .fetch_all(&self.db_pool)
        .await?)
    }

    async fn accept_breeding_request(
        &self,
        request_id: Uuid,
    ) -> anyhow::Result<Option<models::breeding::PetMatch>> {
        let now = Utc::now();
        let mut transaction = self.db_pool.begin().await?;

        // dropping the transaction without commit rolls it back
        let Some(request) = sqlx::query_as::<_, models::breeding::BreedingRequest>(
            sqlite_queries::QUERY_RESOLVE_PENDING_BREEDING_REQUEST,
        )
        .bind(request_id.to_string())
        .bind(models::breeding::BreedingStatus::Approved.to_string())
        .bind(now)
        .fetch_optional(&mut *transaction)
        .await?
        else {
            return Ok(None);
        };

        let mut owners = Vec::with_capacity(2);
        for pet_id in [request.requester_pet_id, request.requested_pet_id] {
            let owner_id =
                sqlx::query_scalar::<_, uuid::fmt::Hyphenated>(sqlite_queries::QUERY_GET_PET_OWNER_ID)
                    .bind(pet_id.to_string())
                    .fetch_one(&mut *transaction)
                    .await?;
            owners.push(Uuid::from(owner_id));
        }

        let pet_match = models::breeding::PetMatch {
            id: Uuid::new_v4(),
            pet1_id: request.requester_pet_id,
            pet2_id: request.requested_pet_id,
            user_of_pet1_id: owners[0],
            user_of_pet2_id: owners[1],
            created_at: now,
        };

        sqlx::query(sqlite_queries::QUERY_INSERT_PET_MATCH)
            .bind(pet_match.id.to_string())
            .bind(pet_match.pet1_id.to_string())
            .bind(pet_match.pet2_id.to_string())
            .bind(pet_match.user_of_pet1_id.to_string())
            .bind(pet_match.user_of_pet2_id.to_string())
            .bind(pet_match.created_at)
            .execute(&mut *transaction)
            .await
            .map_err(|e| map_unique_violation(e, "pets are already matched"))?;

        sqlx::query(sqlite_queries::QUERY_DELETE_BREEDING_REQUEST)
            .bind(request.id.to_string())
            .execute(&mut *transaction)
            .await?;

        transaction.commit().await?;

        Ok(Some(pet_match))
    }

    async fn reject_breeding_request(
        &self,
        request_id: Uuid,
    ) -> anyhow::Result<Option<models::breeding::BreedingRequest>> {
        Ok(sqlx::query_as::<_, models::breeding::BreedingRequest>(
            sqlite_queries::QUERY_RESOLVE_PENDING_BREEDING_REQUEST,
        )
        .bind(request_id.to_string())
        .bind(models::breeding::BreedingStatus::Rejected.to_string())
        .bind(Utc::now())
        .fetch_optional(&self.db_pool)
        .await?)
    }

    async fn get_user_matches(
        &self,
        user_id: Uuid,
    ) -> anyhow::Result<Vec<models::breeding::PetMatch>> {
        Ok(
            sqlx::query_as::<_, models::breeding::PetMatch>(sqlite_queries::QUERY_GET_USER_MATCHES)
                .bind(user_id.to_string())
                .fetch_all(&self.db_pool)
                .await?,
        )
    }
}
