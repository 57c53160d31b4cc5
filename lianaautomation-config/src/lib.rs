//! Settings and credentials for the LianaAutomation client
//!
//! The host owns the settings (five text fields entered in its admin UI) and
//! hands them to the client as a [`Settings`] value. [`Settings::credentials`]
//! turns them into [`Credentials`], refusing to proceed if any field is
//! missing.
//!
//! Settings can come from a host [`ConfigStore`], from `LIANAAUTOMATION_*`
//! environment variables, or from a JSON/TOML file.
//!
//! ```rust
//! use lianaautomation_config::{MemoryConfigStore, Settings};
//!
//! let settings = Settings::new()
//!     .with_url("https://api.example.com")
//!     .with_realm("ACME")
//!     .with_user("1")
//!     .with_key("secret")
//!     .with_channel("42");
//!
//! let store = MemoryConfigStore::new().with_settings(&settings);
//! let loaded = Settings::from_store(&store).unwrap();
//! assert!(loaded.credentials().is_ok());
//! ```

pub mod env;
pub mod error;
pub mod loader;
pub mod settings;
pub mod store;
pub mod validation;

pub use env::{ENV_PREFIX, EnvLoader};
pub use error::{ConfigError, Result};
pub use loader::{ConfigLoader, FileFormat};
pub use settings::{Credentials, OPTIONS_KEY, Settings, SettingsField};
pub use store::{ConfigStore, MemoryConfigStore};
pub use validation::ConfigValidator;
