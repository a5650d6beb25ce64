//! # Requests
//!
//! [`ApiRequest`] is the transport-neutral description of one REST call: verb,
//! interpolated path, flat query pairs and an optional JSON body. Transports turn
//! it into an actual HTTP request; the mock transport records it for assertions.

use std::fmt;

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::Serialize;
use serde_json::Value;
use url::form_urlencoded;

use crate::error::FrameworkError;
use crate::query::QueryFilter;

/// HTTP verbs used by the REST API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Patch => "PATCH",
            Method::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Patch => reqwest::Method::PATCH,
            Method::Delete => reqwest::Method::DELETE,
        }
    }
}

/// One REST call, ready to be handed to an [`HttpTransport`](crate::HttpTransport).
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: Option<serde_json::Value>,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: None,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::Get, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::Post, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::Put, path)
    }

    pub fn patch(path: impl Into<String>) -> Self {
        Self::new(Method::Patch, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::Delete, path)
    }

    /// Appends query pairs, keeping any already present.
    pub fn with_query<K, V>(mut self, pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.query
            .extend(pairs.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    /// Appends the parameters the filter actually sets.
    pub fn with_filter(self, filter: &QueryFilter) -> Self {
        self.with_query(filter.as_record())
    }

    /// Serializes `body` as the JSON request body.
    pub fn with_body<B: Serialize + ?Sized>(mut self, body: &B) -> Result<Self, FrameworkError> {
        self.body = Some(serde_json::to_value(body)?);
        Ok(self)
    }

    /// Value of the first query pair named `key`.
    pub fn query_value(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Renders the request as an equivalent `curl` command line.
    pub fn to_curl(&self, base_url: &str, headers: &[(String, String)]) -> String {
        let mut url = format!("{}{}", base_url.trim_end_matches('/'), self.path);
        if !self.query.is_empty() {
            let query: String = form_urlencoded::Serializer::new(String::new())
                .extend_pairs(self.query.iter())
                .finish();
            url.push('?');
            url.push_str(&query);
        }

        let mut command = format!("curl -X {} \"{}\"", self.method, url);
        for (name, value) in headers {
            let value = if is_sensitive_header(name) { REDACTED } else { value.as_str() };
            command.push_str(&format!(" -H \"{name}: {value}\""));
        }
        if let Some(body) = &self.body {
            command.push_str(&format!(" -d '{}'", redact_body(body)));
        }
        command
    }
}

const REDACTED: &str = "<redacted>";

fn is_sensitive_header(name: &str) -> bool {
    name.eq_ignore_ascii_case("authorization") || name.eq_ignore_ascii_case("cookie")
}

fn is_sensitive_field(key: &str) -> bool {
    let key = key.to_ascii_lowercase();
    ["password", "token", "secret"].iter().any(|word| key.contains(word))
}

/// Copy of `body` with credential-like fields masked, at any depth.
fn redact_body(body: &Value) -> Value {
    match body {
        Value::Object(fields) => Value::Object(
            fields
                .iter()
                .map(|(key, value)| {
                    let value = if is_sensitive_field(key) {
                        Value::String(REDACTED.to_string())
                    } else {
                        redact_body(value)
                    };
                    (key.clone(), value)
                })
                .collect(),
        ),
        Value::Array(items) => Value::Array(items.iter().map(redact_body).collect()),
        other => other.clone(),
    }
}

/// Everything but RFC 3986 unreserved characters is escaped.
const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC.remove(b'-').remove(b'.').remove(b'_').remove(b'~');

/// Fills `{name}` placeholders in a path template with percent-encoded values.
///
/// Fails with [`FrameworkError::MissingParameter`] when a placeholder has no
/// value or its value is blank, so no request is ever sent to a malformed path.
pub fn interpolate(template: &str, params: &[(&str, &str)]) -> Result<String, FrameworkError> {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let after = &rest[start + 1..];
        let end = after
            .find('}')
            .ok_or_else(|| FrameworkError::MissingParameter(format!("unterminated `{{` in {template}")))?;
        let name = &after[..end];
        let value = params
            .iter()
            .find(|(k, _)| *k == name)
            .map(|(_, v)| *v)
            .ok_or_else(|| FrameworkError::MissingParameter(name.to_string()))?;
        out.push_str(&path_segment(name, value)?);
        rest = &after[end + 1..];
    }
    out.push_str(rest);

    Ok(out)
}

/// Validates and percent-encodes one path segment.
pub fn path_segment(name: &str, value: &str) -> Result<String, FrameworkError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(FrameworkError::MissingParameter(name.to_string()));
    }
    Ok(encode_component(value))
}

fn encode_component(value: &str) -> String {
    utf8_percent_encode(value, PATH_SEGMENT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn interpolates_nested_path_parameters() {
        let path = interpolate(
            "/api/v1/recipes/{id}/steps/{stepId}",
            &[("id", "r1"), ("stepId", "s 2")],
        )
        .unwrap();
        assert_eq!(path, "/api/v1/recipes/r1/steps/s%202");
    }

    #[test]
    fn blank_path_parameter_is_rejected() {
        let err = interpolate("/api/v1/recipes/{id}", &[("id", "  ")]).unwrap_err();
        assert_eq!(err, FrameworkError::MissingParameter("id".into()));
    }

    #[test]
    fn unknown_placeholder_is_rejected() {
        let err = interpolate("/api/v1/meal_plans/{mealPlanID}", &[]).unwrap_err();
        assert_eq!(err, FrameworkError::MissingParameter("mealPlanID".into()));
    }

    #[test]
    fn curl_rendering_includes_query_headers_and_body() {
        let request = ApiRequest::post("/api/v1/recipes")
            .with_query([("page", "2")])
            .with_body(&json!({"name": "pasta"}))
            .unwrap();
        let curl = request.to_curl(
            "https://api.example.com/",
            &[("X-Request-Source".to_string(), "webapp".to_string())],
        );
        assert_eq!(
            curl,
            "curl -X POST \"https://api.example.com/api/v1/recipes?page=2\" \
             -H \"X-Request-Source: webapp\" -d '{\"name\":\"pasta\"}'"
        );
    }

    #[test]
    fn curl_rendering_masks_credentials() {
        let request = ApiRequest::post("/users/login/jwt")
            .with_body(&json!({"username": "alice", "password": "hunter2", "totpToken": "123456"}))
            .unwrap();
        let curl = request.to_curl(
            "https://api.example.com",
            &[
                ("authorization".to_string(), "Bearer SECRET-TOKEN".to_string()),
                ("x-service-client".to_string(), "DDB-Service-Client".to_string()),
            ],
        );

        assert!(!curl.contains("SECRET-TOKEN"), "{curl}");
        assert!(!curl.contains("hunter2"), "{curl}");
        assert!(!curl.contains("123456"), "{curl}");
        assert!(curl.contains("authorization: <redacted>"));
        assert!(curl.contains("x-service-client: DDB-Service-Client"));
        assert!(curl.contains("\"username\":\"alice\""));
    }

    #[test]
    fn curl_rendering_masks_nested_secrets() {
        let request = ApiRequest::put("/api/v1/users/u1")
            .with_body(&json!({"profile": {"newPassword": "pw2"}, "items": [{"twoFactorSecret": "s"}]}))
            .unwrap();
        let curl = request.to_curl("https://api.example.com", &[]);
        assert!(!curl.contains("pw2"));
        assert!(!curl.contains("\"s\""));
    }

    #[test]
    fn path_segments_escape_reserved_characters() {
        assert_eq!(path_segment("id", "a/b c?é").unwrap(), "a%2Fb%20c%3F%C3%A9");
        assert_eq!(path_segment("id", "A-z_0.9~").unwrap(), "A-z_0.9~");
    }

    #[test]
    fn query_value_finds_first_pair() {
        let request = ApiRequest::get("/x").with_query([("q", "soup"), ("q", "stew")]);
        assert_eq!(request.query_value("q"), Some("soup"));
        assert_eq!(request.query_value("page"), None);
    }
}
