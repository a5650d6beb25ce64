//! # Session Gate
//!
//! Decides whether a page request may proceed based on the presence of the
//! API session cookie. No HTTP framework is involved: callers hand in the
//! request path and its cookies and act on the returned [`GateDecision`].
//!
//! ```rust
//! use mealplan_client::session::{GateDecision, SessionGate};
//!
//! let gate = SessionGate::new("ddb_api_cookie");
//! let cookies = SessionGate::parse_cookie_header("theme=dark");
//!
//! assert_eq!(
//!     gate.decide("/meal_plans/42", &cookies),
//!     GateDecision::Redirect {
//!         location: "/login?dest=%2Fmeal_plans%2F42".into(),
//!         temporary: true,
//!     }
//! );
//! ```

use std::collections::BTreeMap;

use tracing::debug;
use url::form_urlencoded;

pub const DEFAULT_SESSION_COOKIE: &str = "ddb_api_cookie";
pub const LOGIN_PATH: &str = "/login";

/// Pages reachable without a session.
const PUBLIC_PATHS: &[&str] = &[
    "/login",
    "/register",
    "/passwords/forgotten",
    "/passwords/reset",
    "/accept_invitation",
    "/favicon.ico",
    "/robots.txt",
];

/// Static asset trees, matched by prefix.
const PUBLIC_PREFIXES: &[&str] = &["/_next/", "/public/", "/static/", "/images/"];

/// What to do with a page request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateDecision {
    Proceed,
    Redirect { location: String, temporary: bool },
}

impl GateDecision {
    pub fn is_redirect(&self) -> bool {
        matches!(self, GateDecision::Redirect { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionGate {
    cookie_name: String,
}

impl Default for SessionGate {
    fn default() -> Self {
        Self::new(DEFAULT_SESSION_COOKIE)
    }
}

impl SessionGate {
    pub fn new(cookie_name: impl Into<String>) -> Self {
        Self {
            cookie_name: cookie_name.into(),
        }
    }

    pub fn cookie_name(&self) -> &str {
        &self.cookie_name
    }

    /// True when the session cookie is present with a non-blank value.
    pub fn has_session(&self, cookies: &BTreeMap<String, String>) -> bool {
        cookies
            .get(&self.cookie_name)
            .is_some_and(|value| !value.trim().is_empty())
    }

    pub fn is_public_path(path: &str) -> bool {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        PUBLIC_PATHS
            .iter()
            .any(|public| path == *public || path.strip_prefix(public).is_some_and(|rest| rest.starts_with('/')))
            || PUBLIC_PREFIXES.iter().any(|prefix| path.starts_with(prefix))
    }

    pub fn decide(&self, path: &str, cookies: &BTreeMap<String, String>) -> GateDecision {
        if Self::is_public_path(path) || self.has_session(cookies) {
            return GateDecision::Proceed;
        }
        debug!(path, cookie = %self.cookie_name, "No session, redirecting to login");
        GateDecision::Redirect {
            location: login_redirect(path),
            temporary: true,
        }
    }

    /// Splits a `Cookie` header into name/value pairs; the first occurrence of a name wins.
    pub fn parse_cookie_header(header: &str) -> BTreeMap<String, String> {
        let mut cookies = BTreeMap::new();
        for pair in header.split(';') {
            let Some((name, value)) = pair.split_once('=') else {
                continue;
            };
            let name = name.trim();
            if name.is_empty() {
                continue;
            }
            let value = value.trim().trim_matches('"');
            cookies
                .entry(name.to_string())
                .or_insert_with(|| value.to_string());
        }
        cookies
    }
}

/// `/login?dest=<path>` with the original path percent-encoded.
pub fn login_redirect(path: &str) -> String {
    let dest: String = form_urlencoded::byte_serialize(path.as_bytes()).collect();
    format!("{LOGIN_PATH}?dest={dest}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cookies(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn session_requires_non_empty_cookie() {
        let gate = SessionGate::default();
        assert!(gate.has_session(&cookies(&[("ddb_api_cookie", "abc")])));
        assert!(!gate.has_session(&cookies(&[("ddb_api_cookie", "  ")])));
        assert!(!gate.has_session(&cookies(&[("other", "abc")])));
    }

    #[test]
    fn public_pages_always_proceed() {
        let gate = SessionGate::default();
        let none = BTreeMap::new();
        for path in ["/login", "/register", "/passwords/reset", "/_next/static/app.js", "/favicon.ico", "/login?dest=%2F"] {
            assert_eq!(gate.decide(path, &none), GateDecision::Proceed, "{path}");
        }
    }

    #[test]
    fn lookalike_paths_are_not_public() {
        assert!(!SessionGate::is_public_path("/loginx"));
        assert!(!SessionGate::is_public_path("/registered_users"));
        assert!(SessionGate::is_public_path("/register/confirm"));
    }

    #[test]
    fn private_page_without_session_redirects_with_dest() {
        let gate = SessionGate::default();
        let decision = gate.decide("/recipes/new?x=1", &BTreeMap::new());
        assert_eq!(
            decision,
            GateDecision::Redirect {
                location: "/login?dest=%2Frecipes%2Fnew%3Fx%3D1".into(),
                temporary: true,
            }
        );
        assert!(decision.is_redirect());
    }

    #[test]
    fn private_page_with_session_proceeds() {
        let gate = SessionGate::new("sid");
        assert_eq!(gate.decide("/meal_plans", &cookies(&[("sid", "1")])), GateDecision::Proceed);
    }

    #[test]
    fn parses_cookie_header() {
        let parsed = SessionGate::parse_cookie_header("a=1; ddb_api_cookie=\"tok\";  junk ; a=2; =x");
        assert_eq!(parsed.get("a").map(String::as_str), Some("1"));
        assert_eq!(parsed.get("ddb_api_cookie").map(String::as_str), Some("tok"));
        assert_eq!(parsed.len(), 2);
    }
}
