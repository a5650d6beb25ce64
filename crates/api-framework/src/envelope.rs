//! # API Response Envelope
//!
//! Every endpoint answers with the same JSON wrapper:
//!
//! ```json
//! {
//!   "data": { ... },
//!   "pagination": { "page": 1, "limit": 20, "totalCount": 3, "filteredCount": 3 },
//!   "error": { "message": "not found", "code": "404" },
//!   "details": { "traceID": "abc", "currentHouseholdID": "h1" }
//! }
//! ```
//!
//! A well-formed response carries either a usable `data` or an `error`, never
//! both. [`decode`] turns a raw HTTP response into an [`ApiResponse`], and
//! [`ApiResponse::into_checked`] enforces the error side of that rule.

use std::fmt;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::FrameworkError;
use crate::transport::RawResponse;

/// Error block of a failed response.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub message: String,
    #[serde(default, deserialize_with = "code_as_string")]
    pub code: String,
}

impl ApiErrorBody {
    pub fn new(message: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            code: code.into(),
        }
    }
}

impl fmt::Display for ApiErrorBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

// Some handlers emit numeric codes, others strings.
fn code_as_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Code {
        Text(String),
        Number(i64),
        Missing(()),
    }

    Ok(match Code::deserialize(deserializer)? {
        Code::Text(s) => s,
        Code::Number(n) => n.to_string(),
        Code::Missing(()) => String::new(),
    })
}

/// Pagination block attached to list responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    #[serde(default)]
    pub page: u32,
    #[serde(default)]
    pub limit: u32,
    #[serde(default)]
    pub total_count: u64,
    /// Rows matching the filter; `None` when the server omitted it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filtered_count: Option<u64>,
}

/// Request-scoped metadata echoed by the server.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ResponseDetails {
    #[serde(rename = "traceID", default)]
    pub trace_id: String,
    #[serde(rename = "currentHouseholdID", default)]
    pub current_household_id: String,
}

/// The decoded response wrapper.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    #[serde(default = "Option::default", skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pagination: Option<Pagination>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ApiErrorBody>,
    #[serde(default)]
    pub details: ResponseDetails,
}

impl<T> Default for ApiResponse<T> {
    fn default() -> Self {
        Self {
            data: None,
            pagination: None,
            error: None,
            details: ResponseDetails::default(),
        }
    }
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            data: Some(data),
            ..Self::default()
        }
    }

    pub fn failure(error: ApiErrorBody) -> Self {
        Self {
            error: Some(error),
            ..Self::default()
        }
    }

    pub fn with_pagination(mut self, pagination: Pagination) -> Self {
        self.pagination = Some(pagination);
        self
    }

    pub fn with_details(mut self, details: ResponseDetails) -> Self {
        self.details = details;
        self
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }

    /// Fails with [`FrameworkError::Api`] when the envelope carries an error.
    pub fn into_checked(self) -> Result<Self, FrameworkError> {
        match self.error {
            Some(error) => Err(FrameworkError::Api(error)),
            None => Ok(self),
        }
    }

    /// Checked payload; a missing payload is [`FrameworkError::EmptyPayload`].
    pub fn into_data(self) -> Result<T, FrameworkError> {
        self.into_checked()?.data.ok_or(FrameworkError::EmptyPayload)
    }
}

/// Decodes a raw response into an envelope without judging its `error` field.
///
/// - 2xx with an empty body yields an empty envelope.
/// - non-2xx whose body is an envelope with an error fails with that error.
/// - any other non-2xx fails with [`FrameworkError::Status`].
pub fn decode<T: DeserializeOwned>(response: RawResponse) -> Result<ApiResponse<T>, FrameworkError> {
    if !response.is_success() {
        let error = serde_json::from_slice::<ApiResponse<serde_json::Value>>(&response.body)
            .ok()
            .and_then(|envelope| envelope.error);
        return Err(match error {
            Some(error) => FrameworkError::Api(error),
            None => FrameworkError::Status {
                status: response.status,
                body: response.text(),
            },
        });
    }

    if response.body.iter().all(u8::is_ascii_whitespace) {
        return Ok(ApiResponse::default());
    }

    Ok(serde_json::from_slice(&response.body)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn raw(status: u16, body: serde_json::Value) -> RawResponse {
        RawResponse::new(status, body.to_string().into_bytes())
    }

    #[test]
    fn decodes_full_envelope() {
        let envelope: ApiResponse<Vec<String>> = decode(raw(
            200,
            json!({
                "data": ["a", "b"],
                "pagination": {"page": 2, "limit": 2, "totalCount": 5, "filteredCount": 4},
                "details": {"traceID": "t-1", "currentHouseholdID": "h-9"}
            }),
        ))
        .unwrap();

        assert_eq!(envelope.data.as_deref(), Some(&["a".to_string(), "b".to_string()][..]));
        assert_eq!(
            envelope.pagination,
            Some(Pagination {
                page: 2,
                limit: 2,
                total_count: 5,
                filtered_count: Some(4)
            })
        );
        assert_eq!(envelope.details.trace_id, "t-1");
        assert_eq!(envelope.details.current_household_id, "h-9");
    }

    #[test]
    fn error_envelope_fails_with_server_message() {
        let envelope: ApiResponse<serde_json::Value> = decode(raw(
            200,
            json!({"error": {"message": "not found", "code": "404"}}),
        ))
        .unwrap();

        let err = envelope.into_data().unwrap_err();
        assert_eq!(err.to_string(), "not found");
        assert_eq!(err.api_error().map(|e| e.code.as_str()), Some("404"));
    }

    #[test]
    fn numeric_error_code_is_accepted() {
        let envelope: ApiResponse<()> =
            decode(raw(200, json!({"error": {"message": "nope", "code": 403}}))).unwrap();
        assert_eq!(envelope.error, Some(ApiErrorBody::new("nope", "403")));
    }

    #[test]
    fn non_success_with_envelope_uses_its_error() {
        let err = decode::<()>(raw(404, json!({"error": {"message": "no such recipe"}}))).unwrap_err();
        assert_eq!(err, FrameworkError::Api(ApiErrorBody::new("no such recipe", "")));
    }

    #[test]
    fn non_success_without_envelope_is_a_status_error() {
        let err = decode::<()>(RawResponse::new(502, b"bad gateway".to_vec())).unwrap_err();
        assert_eq!(
            err,
            FrameworkError::Status {
                status: 502,
                body: "bad gateway".into()
            }
        );
    }

    #[test]
    fn empty_success_body_is_an_empty_envelope() {
        let envelope = decode::<serde_json::Value>(RawResponse::new(204, Vec::new())).unwrap();
        assert!(envelope.data.is_none());
        assert!(!envelope.is_error());
        assert_eq!(envelope.into_data(), Err(FrameworkError::EmptyPayload));
    }

    #[test]
    fn garbage_body_is_a_decode_error() {
        let err = decode::<()>(RawResponse::new(200, b"<html>".to_vec())).unwrap_err();
        assert!(matches!(err, FrameworkError::Decode(_)));
    }
}
