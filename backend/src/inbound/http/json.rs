//! JSON body extraction settings.
//!
//! Any body that cannot be turned into the handler's payload type (bad
//! syntax, wrong field types, missing fields, wrong content type, oversize)
//! becomes a `MalformedRequest` domain error.

use actix_web::{HttpRequest, error::JsonPayloadError, web};
use serde_json::json;
use tracing::warn;

use crate::domain::Error;

/// Largest accepted request body.
pub const MAX_BODY_BYTES: usize = 16 * 1024;

fn payload_kind(err: &JsonPayloadError) -> &'static str {
    match err {
        JsonPayloadError::ContentType => "content_type",
        JsonPayloadError::Deserialize(_) => "deserialize",
        JsonPayloadError::Overflow { .. } | JsonPayloadError::OverflowKnownLength { .. } => {
            "overflow"
        }
        _ => "payload",
    }
}

/// Map an extractor failure to a domain error.
pub fn malformed_body(err: JsonPayloadError, req: &HttpRequest) -> Error {
    let kind = payload_kind(&err);
    warn!(path = %req.path(), method = %req.method(), kind, error = %err, "malformed JSON body");
    Error::malformed_request(err.to_string()).with_details(json!({ "kind": kind }))
}

/// Extractor configuration shared by every JSON-accepting handler.
#[must_use]
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(MAX_BODY_BYTES)
        .error_handler(|err, req| malformed_body(err, req).into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;
    use rstest::rstest;

    #[rstest]
    fn content_type_errors_are_tagged() {
        let req = TestRequest::post().uri("/api/users").to_http_request();
        let error = malformed_body(JsonPayloadError::ContentType, &req);
        assert_eq!(error.code(), crate::domain::ErrorCode::MalformedRequest);
        assert_eq!(error.details(), Some(&json!({"kind": "content_type"})));
    }

    #[rstest]
    fn deserialise_errors_keep_serde_message() {
        let serde_err =
            serde_json::from_str::<crate::domain::NewUser>("{").expect_err("truncated body");
        let serde_message = serde_err.to_string();
        let req = TestRequest::post().uri("/api/users").to_http_request();
        let error = malformed_body(JsonPayloadError::Deserialize(serde_err), &req);
        assert!(error.message().contains(&serde_message));
    }
}
