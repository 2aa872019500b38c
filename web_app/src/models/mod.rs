pub mod breeding;
pub mod medical_record;
pub mod pet;
pub mod user_app;
