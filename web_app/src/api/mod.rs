//! # API Module
//!
//! Business logic for the petmate service. Handlers in [`crate::rest`] only
//! parse input and shape responses; every rule lives here.
//!
//! ## Modules
//!
//! - [`breeding`] - Breeding requests, match resolution and candidate listing
//! - [`medical_record`] - Medical records attached to a pet
//! - [`pet`] - Pet registry and breeding availability
//! - [`user`] - User registry and profiles

pub mod breeding;
pub mod medical_record;
pub mod pet;
pub mod user;

use derive_more::{Display, Error};

/// Failures the caller can act on. Everything else is an internal error.
///
/// Raised through `anyhow` and recovered at the http edge with
/// [`anyhow::Error::downcast_ref`].
#[derive(Debug, Display, Error, PartialEq)]
pub enum ApiError {
    #[display("{field}: {msg}")]
    InvalidInput {
        field: &'static str,
        #[error(not(source))]
        msg: String,
    },
    #[display("{_0} not found")]
    NotFound(#[error(not(source))] &'static str),
    #[display("{_0}")]
    Conflict(#[error(not(source))] String),
}

impl ApiError {
    pub fn invalid_input(field: &'static str, msg: impl Into<String>) -> Self {
        ApiError::InvalidInput {
            field,
            msg: msg.into(),
        }
    }
}

/// Extracts the [ApiError] carried by `err`, if any
pub fn as_api_error(err: &anyhow::Error) -> Option<&ApiError> {
    err.downcast_ref::<ApiError>()
}

/// Trims the value and rejects blank or oversized text
pub(crate) fn required_text(
    field: &'static str,
    value: &str,
    max_len: usize,
) -> Result<String, ApiError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ApiError::invalid_input(field, "must not be empty"));
    }
    if value.chars().count() > max_len {
        return Err(ApiError::invalid_input(
            field,
            format!("must be at most {max_len} characters"),
        ));
    }

    Ok(value.to_string())
}
