// LianaAutomation - forward website form submissions to LianaAutomation
//
// This library signs REST requests with the installation's realm, user and
// secret, probes the connection for admin status pages and sends form
// submissions as `formsend` events.

// Re-export the client
pub use lianaautomation_client::*;

// Re-export member crates
pub use lianaautomation_client;
pub use lianaautomation_config;
pub use lianaautomation_log;

pub use lianaautomation_config::{
    ConfigError, ConfigStore, Credentials, MemoryConfigStore, OPTIONS_KEY, Settings, SettingsField,
};

// Prelude for common imports
pub mod prelude {
    pub use crate::{
        AutomationClient,
        ClientConfig,
        ConfigStore,
        ConnectionStatus,
        CookieAccessor,
        FailureReason,
        FormField,
        MemoryConfigStore,
        NoCookies,
        RequestCookies,
        Settings,
        SkipReason,
        SubmitResult,
        // Tracking cookie
        TRACKING_COOKIE,
        TrackingCookie,
    };
}
