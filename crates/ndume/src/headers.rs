//! Header selection

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};

use crate::credential::Credential;
use crate::error::HttpError;

/// Select request headers
///
/// | credential | json | headers                         |
/// |------------|------|---------------------------------|
/// | yes        | yes  | `Authorization`, `Content-Type` |
/// | no         | yes  | `Content-Type`                  |
/// | yes        | no   | `Authorization`                 |
/// | no         | no   | none                            |
pub fn select_headers(credential: Option<&Credential>, json: bool) -> Result<HeaderMap, HttpError> {
    let mut headers = HeaderMap::new();

    if let Some(credential) = credential {
        let mut value = HeaderValue::from_str(&credential.header_value())
            .map_err(|e| HttpError::Build(format!("Invalid authorization header: {}", e)))?;
        value.set_sensitive(true);
        headers.insert(AUTHORIZATION, value);
    }

    if json {
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    }

    tracing::trace!(
        authorization = credential.is_some(),
        json,
        "Selected request headers"
    );

    Ok(headers)
}
