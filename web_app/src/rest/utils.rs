use ntex::{util::Bytes, web};
use serde::de::DeserializeOwned;
use uuid::Uuid;

use super::errors::UserError;

/// Parses an id taken from the url, `field` names the path segment
pub fn parse_path_id(field: &'static str, value: &str) -> Result<Uuid, web::Error> {
    Uuid::parse_str(value.trim()).map_err(|_| {
        UserError::InvalidField {
            field,
            msg: format!("'{value}' is not a valid id"),
        }
        .into()
    })
}

/// Deserializes a json request body.
///
/// Done by hand instead of with `web::types::Json` so a malformed body is
/// answered with the same json error shape as every other client error.
pub fn parse_json_body<T: DeserializeOwned>(body: &Bytes) -> Result<T, web::Error> {
    serde_json::from_slice(body).map_err(|e| {
        UserError::InvalidField {
            field: "body",
            msg: e.to_string(),
        }
        .into()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Sample {
        status: String,
    }

    #[test]
    fn test_parse_path_id() {
        let id = Uuid::new_v4();

        assert_eq!(parse_path_id("petId", &id.to_string()).unwrap(), id);
        assert_eq!(
            parse_path_id("petId", "not-an-id").unwrap_err().to_string(),
            "petId: 'not-an-id' is not a valid id"
        );
    }

    #[test]
    fn test_parse_json_body() {
        let body = Bytes::from_static(br#"{"status": "Accept"}"#);
        let sample: Sample = parse_json_body(&body).unwrap();
        assert_eq!(sample.status, "Accept");

        let body = Bytes::from_static(b"{status");
        assert!(
            parse_json_body::<Sample>(&body)
                .unwrap_err()
                .to_string()
                .starts_with("body:")
        );
    }
}
