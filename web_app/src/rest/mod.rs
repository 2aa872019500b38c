//! # REST Module
//!
//! Json over http surface of the service. Handlers parse ids and bodies,
//! call [`crate::api`] and shape the response; errors are rendered by
//! [`errors`].

pub mod errors;
pub mod forms;
pub mod medical_record;
pub mod pet;
pub mod petmate;
pub mod routes;
pub mod server;
pub mod user;
pub mod utils;

use crate::repo;

pub struct AppState {
    pub repo: repo::ImplAppRepo,
}
