//! Configuration for the automation client

use std::time::Duration;

/// Transport settings for [`AutomationClient`](crate::AutomationClient).
///
/// Timeouts default to `None`, leaving the transport's own defaults in
/// place. Hosts that call the client inline from a page request should set
/// one.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Total request timeout
    pub timeout: Option<Duration>,

    /// Connection establishment timeout
    pub connect_timeout: Option<Duration>,

    /// User-Agent header for outgoing requests
    pub user_agent: String,

    /// Whether to verify TLS certificates
    pub verify_ssl: bool,

    /// Force diagnostic logging on or off; `None` follows `LIANAAUTOMATION_DEBUG`
    pub debug: Option<bool>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout: None,
            connect_timeout: None,
            user_agent: format!("lianaautomation-client/{}", env!("CARGO_PKG_VERSION")),
            verify_ssl: true,
            debug: None,
        }
    }
}

impl ClientConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::new()
    }

    /// Whether failures and raw responses should be logged.
    pub fn debug_enabled(&self) -> bool {
        self.debug
            .unwrap_or_else(lianaautomation_log::is_debug_enabled)
    }
}

/// Builder for ClientConfig
#[derive(Debug, Clone, Default)]
pub struct ClientConfigBuilder {
    config: ClientConfig,
}

impl ClientConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: ClientConfig::default(),
        }
    }

    /// Set the total request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = Some(timeout);
        self
    }

    /// Set the total request timeout in seconds
    pub fn timeout_secs(mut self, secs: u64) -> Self {
        self.config.timeout = Some(Duration::from_secs(secs));
        self
    }

    /// Set the connection timeout
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.config.connect_timeout = Some(timeout);
        self
    }

    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.config.user_agent = user_agent.into();
        self
    }

    pub fn verify_ssl(mut self, verify: bool) -> Self {
        self.config.verify_ssl = verify;
        self
    }

    pub fn debug(mut self, enabled: bool) -> Self {
        self.config.debug = Some(enabled);
        self
    }

    pub fn build(self) -> ClientConfig {
        self.config
    }
}
