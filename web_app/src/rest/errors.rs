use derive_more::{Display, Error};
use log::{error, warn};
use ntex::{http, web};
use serde_json::json;

use crate::api;

#[derive(Debug, Display, Error, PartialEq)]
pub enum UserError {
    #[display("resource not found")]
    UrlNotFound,
    #[display("{field}: {msg}")]
    InvalidField {
        field: &'static str,
        #[error(not(source))]
        msg: String,
    },
    #[display("{_0} not found")]
    NotFound(#[error(not(source))] &'static str),
    #[display("{_0}")]
    Conflict(#[error(not(source))] String),
}

impl UserError {
    fn kind(&self) -> &'static str {
        match self {
            UserError::UrlNotFound | UserError::NotFound(_) => "not_found",
            UserError::InvalidField { .. } => "invalid_input",
            UserError::Conflict(_) => "conflict",
        }
    }
}

impl web::error::WebResponseError for UserError {
    fn error_response(&self, _: &web::HttpRequest) -> web::HttpResponse {
        warn!("{:#?}", self);

        let body = match self {
            UserError::InvalidField { field, msg } => json!({
                "error": self.kind(),
                "message": msg,
                "field": field,
            }),
            _ => json!({
                "error": self.kind(),
                "message": self.to_string(),
            }),
        };

        web::HttpResponse::build(self.status_code()).json(&body)
    }

    fn status_code(&self) -> http::StatusCode {
        match *self {
            UserError::UrlNotFound | UserError::NotFound(_) => http::StatusCode::NOT_FOUND,
            UserError::InvalidField { .. } => http::StatusCode::BAD_REQUEST,
            UserError::Conflict(_) => http::StatusCode::CONFLICT,
        }
    }
}

#[derive(Debug, Display, Error)]
pub enum ServerError {
    InternalServerError(#[error(not(source))] String),
}

impl web::error::WebResponseError for ServerError {
    fn error_response(&self, _: &web::HttpRequest) -> web::HttpResponse {
        match self {
            ServerError::InternalServerError(msg) => error!("[InternalServerError] {msg}"),
        }

        web::HttpResponse::build(self.status_code()).json(&json!({
            "error": "internal",
            "message": "internal server error",
        }))
    }

    fn status_code(&self) -> http::StatusCode {
        http::StatusCode::INTERNAL_SERVER_ERROR
    }
}

/// Maps an error coming from [api] to its http response.
///
/// Errors that are not an [api::ApiError] become a 500, `context` is only
/// logged.
pub fn from_api_error(err: anyhow::Error, context: &str) -> web::Error {
    match api::as_api_error(&err) {
        Some(api::ApiError::InvalidInput { field, msg }) => UserError::InvalidField {
            field: *field,
            msg: msg.clone(),
        }
        .into(),
        Some(api::ApiError::NotFound(what)) => UserError::NotFound(*what).into(),
        Some(api::ApiError::Conflict(msg)) => UserError::Conflict(msg.clone()).into(),
        None => ServerError::InternalServerError(format!("{context}: {err:#}")).into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ntex::web::WebResponseError;

    #[test]
    fn test_user_error_status_codes() {
        assert_eq!(
            UserError::UrlNotFound.status_code(),
            http::StatusCode::NOT_FOUND
        );
        assert_eq!(
            UserError::Conflict("taken".into()).status_code(),
            http::StatusCode::CONFLICT
        );
        assert_eq!(
            UserError::InvalidField {
                field: "age",
                msg: "too old".into()
            }
            .status_code(),
            http::StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_api_error_kinds_are_kept() {
        let err: anyhow::Error = api::ApiError::Conflict("pets are already matched".into()).into();
        assert_eq!(
            from_api_error(err, "test").to_string(),
            "pets are already matched"
        );

        let err: anyhow::Error = api::ApiError::NotFound("pet").into();
        assert_eq!(from_api_error(err, "test").to_string(), "pet not found");
    }
}
