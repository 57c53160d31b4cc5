//! Automation client for the pingpong and import operations

use crate::payload::{ImportPayload, PingPayload};
use crate::signature::{BASE_PATH, SignedRequestBuilder};
use crate::tracking::tracking_token;
use crate::{
    ClientConfig, ClientError, ConnectionStatus, CookieAccessor, FailureReason, FormField,
    Identity, Result, SkipReason, SubmitResult, find_email, form_items,
};
use lianaautomation_config::{ConfigStore, Credentials, Settings};
use reqwest::Client;
use serde_json::Value;
use tracing::{debug, warn};
use url::Url;

/// Path of the connectivity probe.
pub const PINGPONG_PATH: &str = "v1/pingpong";

/// Path of the event import.
pub const IMPORT_PATH: &str = "v1/import";

const METHOD: &str = "POST";

/// Client for the LianaAutomation REST API
///
/// Each operation validates the injected settings, signs one request, sends
/// it and folds every failure into its return value.
#[derive(Debug, Clone)]
pub struct AutomationClient {
    config: ClientConfig,
    settings: Settings,
    http_client: Client,
}

impl AutomationClient {
    /// Create a client with the default transport configuration
    pub fn new(settings: Settings) -> Result<Self> {
        Self::with_config(settings, ClientConfig::default())
    }

    /// Create a client with a custom transport configuration
    pub fn with_config(settings: Settings, config: ClientConfig) -> Result<Self> {
        let mut builder = Client::builder()
            .user_agent(&config.user_agent)
            .danger_accept_invalid_certs(!config.verify_ssl);

        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(timeout) = config.connect_timeout {
            builder = builder.connect_timeout(timeout);
        }

        Ok(Self {
            config,
            settings,
            http_client: builder.build()?,
        })
    }

    /// Create a client from settings held in a host config store
    pub fn from_store(store: &dyn ConfigStore, config: ClientConfig) -> Result<Self> {
        Self::with_config(Settings::from_store(store)?, config)
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Check connectivity and credentials against `v1/pingpong`.
    ///
    /// `Ok` only when the API answers with a non-empty `pong` field.
    pub async fn probe(&self) -> ConnectionStatus {
        match self.try_probe().await {
            Ok(()) => ConnectionStatus::Ok,
            Err(err) => {
                self.log_failure(PINGPONG_PATH, &err);
                ConnectionStatus::Fail
            }
        }
    }

    async fn try_probe(&self) -> Result<()> {
        let credentials = self.settings.credentials()?;
        let body = PingPayload::default().to_json()?;

        let response = self
            .post(&credentials, PINGPONG_PATH, body)
            .await?
            .ok_or_else(|| ClientError::Response("body is not JSON".to_string()))?;

        match response.get("pong") {
            Some(pong) if !is_empty_value(pong) => Ok(()),
            _ => Err(ClientError::Response("missing pong".to_string())),
        }
    }

    /// Forward a submitted form to `v1/import` as a `formsend` event.
    ///
    /// The contact is identified by the first non-empty email field and, when
    /// present, the `liana_t` tracking cookie. The response body is not
    /// inspected: any 2xx answer counts as sent.
    pub async fn submit_form_event(
        &self,
        fields: &[FormField],
        form_title: &str,
        form_id: &str,
        cookies: &dyn CookieAccessor,
    ) -> SubmitResult {
        match self.try_submit(fields, form_title, form_id, cookies).await {
            Ok(result) => result,
            Err(err) => {
                self.log_failure(IMPORT_PATH, &err);
                if err.is_configuration() {
                    SubmitResult::Failed(FailureReason::MissingCredentials)
                } else {
                    SubmitResult::Failed(FailureReason::ConnectionError)
                }
            }
        }
    }

    async fn try_submit(
        &self,
        fields: &[FormField],
        form_title: &str,
        form_id: &str,
        cookies: &dyn CookieAccessor,
    ) -> Result<SubmitResult> {
        let token = tracking_token(cookies);

        let Some(email) = find_email(fields) else {
            if self.config.debug_enabled() {
                debug!(form_id, "No email found on form data, skipping");
            }
            return Ok(SubmitResult::Skipped(SkipReason::NoEmail));
        };

        let items = form_items(fields, form_title, form_id);
        let credentials = self.settings.credentials()?;

        let identity = Identity::new(Some(email.to_string()), token);
        if identity.is_empty() {
            return Ok(SubmitResult::Skipped(SkipReason::NoIdentity));
        }

        let body = ImportPayload::form_send(credentials.channel_id(), identity, items).to_json()?;
        self.post(&credentials, IMPORT_PATH, body).await?;

        Ok(SubmitResult::Sent)
    }

    /// Sign and send one request. Returns the decoded JSON body, or `None`
    /// when the body is unreadable or not JSON.
    async fn post(
        &self,
        credentials: &Credentials,
        path: &str,
        body: String,
    ) -> Result<Option<Value>> {
        let signer = SignedRequestBuilder::from_credentials(credentials);
        let signed = signer.sign(METHOD, path, body, SignedRequestBuilder::current_date());
        let url = Url::parse(&format!(
            "{}/{}/{}",
            credentials.base_url(),
            BASE_PATH,
            path
        ))?;

        debug!(%url, date = %signed.date, "Sending signed request");

        let mut request = self.http_client.post(url);
        for (name, value) in signed.headers() {
            request = request.header(name, value);
        }

        let response = request.body(signed.body).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::HttpStatus(status.as_u16()));
        }

        let decoded = match response.text().await {
            Ok(text) => serde_json::from_str::<Value>(&text).ok(),
            Err(err) => {
                if self.config.debug_enabled() {
                    debug!(path, error = %err, "Failed to read response body");
                }
                None
            }
        };

        if self.config.debug_enabled() {
            debug!(path, status = status.as_u16(), response = ?decoded, "Response received");
        }

        Ok(decoded)
    }

    fn log_failure(&self, path: &str, err: &ClientError) {
        if self.config.debug_enabled() {
            warn!(path, error = %err, "LianaAutomation request not completed");
        }
    }
}

/// Emptiness as the API's reference clients judge it: null, false, zero,
/// `""`, `"0"` and empty collections.
fn is_empty_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty() || s == "0",
        Value::Array(a) => a.is_empty(),
        Value::Object(o) => o.is_empty(),
    }
}
