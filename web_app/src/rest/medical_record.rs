use ntex::{util::Bytes, web};

use crate::{
    api,
    rest::{AppState, errors, utils},
};

#[web::get("/{pet_id}/medical-records")]
async fn get_medical_records(
    path: web::types::Path<(String,)>,
    app_state: web::types::State<AppState>,
) -> Result<impl web::Responder, web::Error> {
    let pet_id = utils::parse_path_id("petId", &path.0)?;

    let records = api::medical_record::get_medical_records(pet_id, &app_state.repo)
        .await
        .map_err(|e| errors::from_api_error(e, "at get_medical_records"))?;

    Ok(web::HttpResponse::Ok().json(&records))
}

#[web::post("/{pet_id}/medical-records")]
async fn add_medical_record(
    path: web::types::Path<(String,)>,
    body: Bytes,
    app_state: web::types::State<AppState>,
) -> Result<impl web::Responder, web::Error> {
    let pet_id = utils::parse_path_id("petId", &path.0)?;
    let form: api::medical_record::MedicalRecordForm = utils::parse_json_body(&body)?;

    let record = api::medical_record::add_medical_record(pet_id, form, &app_state.repo)
        .await
        .map_err(|e| errors::from_api_error(e, "at add_medical_record"))?;

    Ok(web::HttpResponse::Created().json(&record))
}

#[web::delete("/{pet_id}/medical-records/{record_id}")]
async fn delete_medical_record(
    path: web::types::Path<(String, String)>,
    app_state: web::types::State<AppState>,
) -> Result<impl web::Responder, web::Error> {
    let (pet_id, record_id) = path.into_inner();
    let pet_id = utils::parse_path_id("petId", &pet_id)?;
    let record_id = utils::parse_path_id("recordId", &record_id)?;

    api::medical_record::delete_medical_record(pet_id, record_id, &app_state.repo)
        .await
        .map_err(|e| errors::from_api_error(e, "at delete_medical_record"))?;

    Ok(web::HttpResponse::NoContent().finish())
}
