//! The `liana_t` tracking cookie
//!
//! A first-touch random identifier stored in the visitor's browser. The
//! client reads it through a [`CookieAccessor`] and forwards it as the
//! `token` identity; [`TrackingCookie`] issues it when missing.

use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use uuid::Uuid;

/// Cookie name.
pub const TRACKING_COOKIE: &str = "liana_t";

/// Cookie lifetime in seconds (about ten years).
pub const TRACKING_COOKIE_MAX_AGE: i64 = 315_569_260;

/// Read access to the current request's cookies.
pub trait CookieAccessor: Send + Sync {
    fn get(&self, name: &str) -> Option<String>;
}

impl CookieAccessor for HashMap<String, String> {
    fn get(&self, name: &str) -> Option<String> {
        HashMap::get(self, name).cloned()
    }
}

/// A request without cookies.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoCookies;

impl CookieAccessor for NoCookies {
    fn get(&self, _name: &str) -> Option<String> {
        None
    }
}

/// Cookies parsed from a raw `Cookie` request header.
#[derive(Debug, Clone, Default)]
pub struct RequestCookies {
    cookies: HashMap<String, String>,
}

impl RequestCookies {
    /// Parse `name=value; other=value`. Malformed pairs are skipped; the
    /// first occurrence of a name wins.
    pub fn parse(header: &str) -> Self {
        let mut cookies = HashMap::new();
        for pair in header.split(';') {
            if let Some((name, value)) = pair.split_once('=') {
                let name = name.trim();
                if name.is_empty() {
                    continue;
                }
                cookies
                    .entry(name.to_string())
                    .or_insert_with(|| value.trim().trim_matches('"').to_string());
            }
        }
        Self { cookies }
    }
}

impl CookieAccessor for RequestCookies {
    fn get(&self, name: &str) -> Option<String> {
        self.cookies.get(name).cloned()
    }
}

/// Lowercase and keep only `[a-z0-9_-]`.
pub fn sanitize_key(raw: &str) -> String {
    raw.chars()
        .map(|c| c.to_ascii_lowercase())
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || *c == '_' || *c == '-')
        .collect()
}

/// The sanitized tracking token of the current request, if any.
pub fn tracking_token(cookies: &dyn CookieAccessor) -> Option<String> {
    cookies
        .get(TRACKING_COOKIE)
        .map(|raw| sanitize_key(&raw))
        .filter(|token| !token.is_empty())
}

/// Outcome of [`TrackingCookie::ensure`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackingToken {
    pub value: String,
    /// `Set-Cookie` value to send when the token was just issued.
    pub set_cookie: Option<String>,
}

impl TrackingToken {
    pub fn is_new(&self) -> bool {
        self.set_cookie.is_some()
    }
}

/// Issues the tracking cookie on first visit.
#[derive(Debug, Clone)]
pub struct TrackingCookie {
    path: String,
    domain: Option<String>,
}

impl Default for TrackingCookie {
    fn default() -> Self {
        Self {
            path: "/".to_string(),
            domain: None,
        }
    }
}

impl TrackingCookie {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = path.into();
        self
    }

    pub fn with_domain(mut self, domain: impl Into<String>) -> Self {
        self.domain = Some(domain.into());
        self
    }

    /// Return the visitor's existing token, or issue a new one.
    pub fn ensure(&self, cookies: &dyn CookieAccessor) -> TrackingToken {
        if let Some(value) = tracking_token(cookies) {
            return TrackingToken {
                value,
                set_cookie: None,
            };
        }

        let value = Self::generate();
        let set_cookie = self.set_cookie_header(&value, Utc::now());
        TrackingToken {
            value,
            set_cookie: Some(set_cookie),
        }
    }

    /// A fresh random token; already in sanitized form.
    pub fn generate() -> String {
        Uuid::new_v4().simple().to_string()
    }

    /// `Set-Cookie` header value for `value`, issued at `now`.
    pub fn set_cookie_header(&self, value: &str, now: DateTime<Utc>) -> String {
        let expires = now + Duration::seconds(TRACKING_COOKIE_MAX_AGE);
        let mut header = format!(
            "{}={}; Expires={}; Max-Age={}; Path={}",
            TRACKING_COOKIE,
            value,
            expires.format("%a, %d %b %Y %H:%M:%S GMT"),
            TRACKING_COOKIE_MAX_AGE,
            self.path
        );
        if let Some(ref domain) = self.domain {
            header.push_str("; Domain=");
            header.push_str(domain);
        }
        header
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_sanitize_key() {
        assert_eq!(sanitize_key("5F1b2c3d4e5f6.12345678"), "5f1b2c3d4e5f612345678");
        assert_eq!(sanitize_key("a b<script>"), "abscript");
        assert_eq!(sanitize_key("ok_key-1"), "ok_key-1");
        assert_eq!(sanitize_key("äö"), "");
    }

    #[test]
    fn test_tracking_token() {
        let mut cookies: HashMap<String, String> = HashMap::new();
        assert_eq!(tracking_token(&cookies), None);

        cookies.insert(TRACKING_COOKIE.to_string(), "...".to_string());
        assert_eq!(tracking_token(&cookies), None);

        cookies.insert(TRACKING_COOKIE.to_string(), "AbC.123".to_string());
        assert_eq!(tracking_token(&cookies), Some("abc123".to_string()));

        assert_eq!(tracking_token(&NoCookies), None);
    }

    #[test]
    fn test_request_cookies_parse() {
        let cookies = RequestCookies::parse("theme=dark; liana_t=\"abc123\" ; =broken; flag");
        assert_eq!(cookies.get("liana_t"), Some("abc123".to_string()));
        assert_eq!(cookies.get("theme"), Some("dark".to_string()));
        assert_eq!(cookies.get("flag"), None);
    }

    #[test]
    fn test_ensure_keeps_existing() {
        let cookies = RequestCookies::parse("liana_t=existing1");
        let token = TrackingCookie::new().ensure(&cookies);
        assert_eq!(token.value, "existing1");
        assert!(!token.is_new());
    }

    #[test]
    fn test_ensure_issues_new() {
        let token = TrackingCookie::new().ensure(&NoCookies);
        assert!(token.is_new());
        assert_eq!(token.value.len(), 32);
        assert_eq!(sanitize_key(&token.value), token.value);
        assert!(token.set_cookie.unwrap().starts_with("liana_t="));
    }

    #[test]
    fn test_set_cookie_header() {
        let now = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let header = TrackingCookie::new()
            .with_path("/site/")
            .with_domain("example.com")
            .set_cookie_header("abc", now);

        assert!(header.starts_with("liana_t=abc; Expires="));
        assert!(header.contains("Max-Age=315569260"));
        assert!(header.contains("; Path=/site/"));
        assert!(header.ends_with("; Domain=example.com"));
        assert!(header.contains("Dec 2033 "));
    }
}
