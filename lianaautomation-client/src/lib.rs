//! Signed request client for the LianaAutomation API
//!
//! Forwards form submissions to a LianaAutomation installation and checks
//! that the configured credentials work.
//!
//! # Features
//!
//! - **Request Signing**: MD5 content digest and HMAC-SHA256 signature over a
//!   canonical request string
//! - **Connectivity Probe**: `v1/pingpong` check for the admin status indicator
//! - **Form Events**: `v1/import` submission of a `formsend` event
//! - **Tracking Cookie**: reading and issuing the `liana_t` visitor token
//!
//! Operations never return errors or panic across their boundary: the
//! calling page or form hook cannot recover from a failed send, so results
//! come back as [`ConnectionStatus`] and [`SubmitResult`].
//!
//! # Example
//!
//! ```rust,no_run
//! use lianaautomation_client::{AutomationClient, FormField, RequestCookies};
//! use lianaautomation_config::Settings;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let settings = Settings::from_env()?;
//!     let client = AutomationClient::new(settings)?;
//!
//!     println!("Connection: {}", client.probe().await.indicator());
//!
//!     let fields = vec![FormField::new("Email", "email", "visitor@example.com")];
//!     let cookies = RequestCookies::parse("liana_t=abc123");
//!     let result = client
//!         .submit_form_event(&fields, "Contact us", "12", &cookies)
//!         .await;
//!     println!("Submission {}", result);
//!     Ok(())
//! }
//! ```

mod client;
mod config;
mod error;
mod payload;
mod signature;
mod status;
mod tracking;

pub use client::{AutomationClient, IMPORT_PATH, PINGPONG_PATH};
pub use config::{ClientConfig, ClientConfigBuilder};
pub use error::ClientError;
pub use payload::{
    EMAIL_FIELD_TYPE, Event, FORM_SEND_VERB, FormField, Identity, ImportPayload, ImportRecord,
    PingPayload, find_email, form_items,
};
pub use signature::{BASE_PATH, CONTENT_TYPE, SignedRequest, SignedRequestBuilder, headers};
pub use status::{ConnectionStatus, FailureReason, SkipReason, SubmitResult};
pub use tracking::{
    CookieAccessor, NoCookies, RequestCookies, TRACKING_COOKIE, TRACKING_COOKIE_MAX_AGE,
    TrackingCookie, TrackingToken, sanitize_key, tracking_token,
};

/// Result type for client internals
pub type Result<T> = std::result::Result<T, ClientError>;
