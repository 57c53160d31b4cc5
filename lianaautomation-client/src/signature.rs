//! Request signing for the LianaAutomation REST API
//!
//! Every request carries an `Authorization` header of the form
//! `"{realm} {user}:{signature}"`, where the signature is a hex HMAC-SHA256
//! over a newline-joined canonical string:
//!
//! ```text
//! POST
//! <md5 hex of body>
//! application/json
//! <date>
//! <body>
//! /rest/<path>
//! ```
//!
//! The body, its MD5 and the date must be the exact values that go on the
//! wire.

use chrono::{DateTime, SecondsFormat, Utc};
use hmac::{Hmac, Mac};
use lianaautomation_config::Credentials;
use md5::{Digest, Md5};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Base path of every API endpoint.
pub const BASE_PATH: &str = "rest";

/// Content type of every request body.
pub const CONTENT_TYPE: &str = "application/json";

/// Header names sent with a signed request
pub mod headers {
    pub const AUTHORIZATION: &str = "Authorization";

    pub const DATE: &str = "Date";

    /// Spelled as the API documents it.
    pub const CONTENT_MD5: &str = "Content-md5";

    pub const CONTENT_TYPE: &str = "Content-Type";
}

/// A request body together with everything derived from it for signing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedRequest {
    /// Uppercase HTTP method
    pub method: String,
    /// API-relative path, e.g. `v1/import`
    pub path: String,
    /// Serialized JSON body, sent as-is
    pub body: String,
    /// Date used in both the signature and the `Date` header
    pub date: String,
    /// Lowercase hex MD5 of `body`
    pub content_md5: String,
    /// Lowercase hex HMAC-SHA256 of the canonical string
    pub signature: String,
    /// `Authorization` header value
    pub authorization: String,
}

impl SignedRequest {
    /// The four headers the API checks, in the order they are sent.
    pub fn headers(&self) -> [(&'static str, &str); 4] {
        [
            (headers::AUTHORIZATION, self.authorization.as_str()),
            (headers::DATE, self.date.as_str()),
            (headers::CONTENT_MD5, self.content_md5.as_str()),
            (headers::CONTENT_TYPE, CONTENT_TYPE),
        ]
    }
}

/// Signs request bodies for one realm/user pair.
#[derive(Clone)]
pub struct SignedRequestBuilder {
    realm: String,
    user: String,
    secret_key: String,
}

impl SignedRequestBuilder {
    pub fn new(
        realm: impl Into<String>,
        user: impl Into<String>,
        secret_key: impl Into<String>,
    ) -> Self {
        Self {
            realm: realm.into(),
            user: user.into(),
            secret_key: secret_key.into(),
        }
    }

    pub fn from_credentials(credentials: &Credentials) -> Self {
        Self::new(
            credentials.realm(),
            credentials.user(),
            credentials.secret_key(),
        )
    }

    /// Current UTC time as `YYYY-MM-DDTHH:MM:SS+00:00`.
    ///
    /// Generate once per request and pass the same string to [`sign`](Self::sign).
    pub fn current_date() -> String {
        Self::format_date(Utc::now())
    }

    /// Format a timestamp the way the API expects in `Date`.
    pub fn format_date(date: DateTime<Utc>) -> String {
        date.to_rfc3339_opts(SecondsFormat::Secs, false)
    }

    /// Lowercase hex MD5 digest of the body.
    pub fn content_md5(body: &str) -> String {
        hex::encode(Md5::digest(body.as_bytes()))
    }

    /// `/rest/{path}`
    pub fn absolute_path(path: &str) -> String {
        format!("/{}/{}", BASE_PATH, path)
    }

    /// The string the signature is computed over.
    pub fn canonical_string(
        method: &str,
        content_md5: &str,
        date: &str,
        body: &str,
        path: &str,
    ) -> String {
        [
            method.to_uppercase().as_str(),
            content_md5,
            CONTENT_TYPE,
            date,
            body,
            Self::absolute_path(path).as_str(),
        ]
        .join("\n")
    }

    /// Sign `body` for `method` and `path` at `date`.
    pub fn sign(&self, method: &str, path: &str, body: String, date: String) -> SignedRequest {
        let content_md5 = Self::content_md5(&body);
        let canonical = Self::canonical_string(method, &content_md5, &date, &body, path);
        let signature = self.compute_hmac_sha256(canonical.as_bytes());
        let authorization = self.authorization(&signature);

        SignedRequest {
            method: method.to_uppercase(),
            path: path.to_string(),
            body,
            date,
            content_md5,
            signature,
            authorization,
        }
    }

    /// `"{realm} {user}:{signature}"`, no escaping.
    pub fn authorization(&self, signature: &str) -> String {
        format!("{} {}:{}", self.realm, self.user, signature)
    }

    fn compute_hmac_sha256(&self, data: &[u8]) -> String {
        let mut mac = HmacSha256::new_from_slice(self.secret_key.as_bytes())
            .expect("HMAC can take any size key");
        mac.update(data);
        hex::encode(mac.finalize().into_bytes())
    }
}

impl std::fmt::Debug for SignedRequestBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignedRequestBuilder")
            .field("realm", &self.realm)
            .field("user", &self.user)
            .finish_non_exhaustive()
    }
}
