//! Route configuration.
//!
//! Routes are grouped by resource into scopes under `/api`.

use super::{medical_record, pet, petmate, user};
use ntex::web;

/// Configures the breeding flow routes.
///
/// # Routes
/// - `POST /api/petmate/{reqPetId}/requestBreeding/{resPetId}` - Ask for a match
/// - `POST /api/petmate/{breedingStatusId}/matchPets` - Accept or reject a request
/// - `GET /api/petmate/{userId}/getPetMates` - Breeding candidates for a user
/// - `GET /api/petmate/{userId}/pendingRequest` - Requests involving the user's pets
/// - `GET /api/petmate/{userId}/matches` - Matches of the user's pets
pub fn petmate(cfg: &mut web::ServiceConfig) {
    cfg.service(web::scope("/api/petmate").service((
        petmate::request_breeding,
        petmate::match_pets,
        petmate::get_pet_mates,
        petmate::get_pending_requests,
        petmate::get_matches,
    )));
}

/// Configures the user registry and the pets owned by each user.
///
/// # Routes
/// - `POST /api/users` - Register a user
/// - `GET /api/users/{userId}` - User profile
/// - `GET /api/users/{userId}/pets` - Pets of the user
/// - `POST /api/users/{userId}/pets` - Register a pet
/// - `PUT /api/users/{userId}/pets/{petId}` - Edit a pet
/// - `DELETE /api/users/{userId}/pets/{petId}` - Delete a pet
/// - `PATCH /api/users/{userId}/pets/{petId}/breeding` - Toggle breeding availability
pub fn users(cfg: &mut web::ServiceConfig) {
    cfg.service(web::scope("/api/users").service((
        user::create_user,
        user::get_user_profile,
        pet::get_user_pets,
        pet::register_pet,
        pet::edit_pet,
        pet::delete_pet,
        pet::set_breeding_availability,
    )));
}

/// Configures the routes of a single pet.
///
/// # Routes
/// - `GET /api/pets/{petId}` - Pet details
/// - `GET /api/pets/{petId}/medical-records` - Medical records of the pet
/// - `POST /api/pets/{petId}/medical-records` - Add a medical record
/// - `DELETE /api/pets/{petId}/medical-records/{recordId}` - Delete a medical record
pub fn pets(cfg: &mut web::ServiceConfig) {
    cfg.service(web::scope("/api/pets").service((
        pet::get_pet,
        medical_record::get_medical_records,
        medical_record::add_medical_record,
        medical_record::delete_medical_record,
    )));
}
