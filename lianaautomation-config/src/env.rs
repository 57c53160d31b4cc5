// Environment variable loading

use crate::{ConfigError, Result, Settings, SettingsField};
use std::env;
use std::path::Path;

/// Prefix for every settings variable.
pub const ENV_PREFIX: &str = "LIANAAUTOMATION";

/// Environment variable loader
pub struct EnvLoader {
    prefix: Option<String>,
}

impl EnvLoader {
    /// Create a new environment loader
    pub fn new(prefix: Option<String>) -> Self {
        Self { prefix }
    }

    /// Full variable name for `key`
    pub fn var_name(&self, key: &str) -> String {
        match self.prefix {
            Some(ref prefix) => format!("{}_{}", prefix, key.to_uppercase()),
            None => key.to_uppercase(),
        }
    }

    /// Load a specific environment variable
    pub fn load_var(&self, key: &str) -> Result<String> {
        env::var(self.var_name(key)).map_err(ConfigError::EnvError)
    }

    /// Load a variable, treating "not present" as `None`
    pub fn load_optional(&self, key: &str) -> Result<Option<String>> {
        match self.load_var(key) {
            Ok(value) => Ok(Some(value)),
            Err(ConfigError::EnvError(env::VarError::NotPresent)) => Ok(None),
            Err(e) => Err(e),
        }
    }
}

impl Default for EnvLoader {
    fn default() -> Self {
        Self::new(Some(ENV_PREFIX.to_string()))
    }
}

impl Settings {
    /// Read `LIANAAUTOMATION_URL`, `_REALM`, `_USER`, `_KEY` and `_CHANNEL`.
    pub fn from_env() -> Result<Self> {
        Self::from_env_with(&EnvLoader::default())
    }

    /// Read settings through a specific loader.
    pub fn from_env_with(loader: &EnvLoader) -> Result<Self> {
        let mut settings = Settings::default();
        for field in SettingsField::ALL {
            settings.set(field, loader.load_optional(field.env_key())?);
        }
        Ok(settings.sanitize())
    }

    /// Load a `.env` file into the process environment, then read it like
    /// [`Settings::from_env`]. Without a path, a missing `.env` is ignored.
    pub fn from_dotenv(path: Option<&Path>) -> Result<Self> {
        if let Some(path) = path {
            dotenvy::from_path(path).map_err(|e| ConfigError::LoadError(e.to_string()))?;
        } else {
            dotenvy::dotenv().ok();
        }
        Self::from_env()
    }
}
