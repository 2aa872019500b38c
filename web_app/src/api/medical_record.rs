//! Medical records of a pet. Each record points back to its pet.

use crate::{api::ApiError, consts, models, repo};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MedicalRecordForm {
    pub pic: String,
    #[serde(default)]
    pub description: String,
}

pub async fn add_medical_record(
    pet_id: Uuid,
    form: MedicalRecordForm,
    repo: &repo::ImplAppRepo,
) -> anyhow::Result<models::medical_record::MedicalRecord> {
    let pic = super::pet::validate_pic_url("pic", &form.pic)?;
    let description = ammonia::clean(form.description.trim());
    if description.chars().count() > consts::MAX_DESCRIPTION_LEN {
        return Err(ApiError::invalid_input(
            "description",
            format!("must be at most {} characters", consts::MAX_DESCRIPTION_LEN),
        )
        .into());
    }

    super::pet::get_pet(pet_id, repo).await?;

    let record = models::medical_record::MedicalRecord {
        id: Uuid::new_v4(),
        pet_id,
        pic,
        description,
        created_at: Utc::now(),
    };
    repo.insert_medical_record(&record).await?;

    Ok(record)
}

pub async fn get_medical_records(
    pet_id: Uuid,
    repo: &repo::ImplAppRepo,
) -> anyhow::Result<Vec<models::medical_record::MedicalRecord>> {
    super::pet::get_pet(pet_id, repo).await?;

    repo.get_pet_medical_records(pet_id).await
}

pub async fn delete_medical_record(
    pet_id: Uuid,
    record_id: Uuid,
    repo: &repo::ImplAppRepo,
) -> anyhow::Result<()> {
    if !repo.delete_medical_record(pet_id, record_id).await? {
        return Err(ApiError::NotFound("medical record").into());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{as_api_error, pet::tests::create_test_pet};
    use crate::repo::MockAppRepo;
    use mockall::predicate::*;

    #[ntex::test]
    async fn test_add_medical_record_links_pet() {
        let pet = create_test_pet(Uuid::new_v4(), false);
        let pet_id = pet.id;

        let mut mock_repo = MockAppRepo::new();
        mock_repo
            .expect_get_pet_by_id()
            .with(eq(pet_id))
            .times(1)
            .returning(move |_| {
                let pet = pet.clone();
                Box::pin(async move { Ok(Some(pet)) })
            });
        mock_repo
            .expect_insert_medical_record()
            .withf(move |record| record.pet_id == pet_id)
            .times(1)
            .returning(|_| Box::pin(async move { Ok(()) }));
        let mock_repo: Box<dyn repo::AppRepo> = Box::new(mock_repo);

        let form = MedicalRecordForm {
            pic: "https://media.example.com/rx/1.jpg".into(),
            description: "rabies vaccine".into(),
        };
        let result = add_medical_record(pet_id, form, &mock_repo).await;

        assert!(result.is_ok_and(|record| record.pet_id == pet_id));
    }

    #[ntex::test]
    async fn test_add_medical_record_unknown_pet() {
        let mut mock_repo = MockAppRepo::new();
        mock_repo
            .expect_get_pet_by_id()
            .times(1)
            .returning(|_| Box::pin(async move { Ok(None) }));
        mock_repo.expect_insert_medical_record().times(0);
        let mock_repo: Box<dyn repo::AppRepo> = Box::new(mock_repo);

        let form = MedicalRecordForm {
            pic: "https://media.example.com/rx/1.jpg".into(),
            description: String::new(),
        };
        let err = add_medical_record(Uuid::new_v4(), form, &mock_repo)
            .await
            .unwrap_err();

        assert_eq!(as_api_error(&err), Some(&ApiError::NotFound("pet")));
    }

    #[ntex::test]
    async fn test_add_medical_record_requires_url() {
        let mock_repo: Box<dyn repo::AppRepo> = Box::new(MockAppRepo::new());

        let form = MedicalRecordForm {
            pic: "rx.jpg".into(),
            description: String::new(),
        };
        let err = add_medical_record(Uuid::new_v4(), form, &mock_repo)
            .await
            .unwrap_err();

        assert!(err.to_string().starts_with("pic:"));
    }

    #[ntex::test]
    async fn test_delete_missing_medical_record() {
        let mut mock_repo = MockAppRepo::new();
        mock_repo
            .expect_delete_medical_record()
            .times(1)
            .returning(|_, _| Box::pin(async move { Ok(false) }));
        let mock_repo: Box<dyn repo::AppRepo> = Box::new(mock_repo);

        let err = delete_medical_record(Uuid::new_v4(), Uuid::new_v4(), &mock_repo)
            .await
            .unwrap_err();

        assert_eq!(
            as_api_error(&err),
            Some(&ApiError::NotFound("medical record"))
        );
    }
}
