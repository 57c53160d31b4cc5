// Settings value object and validated credentials

use crate::{ConfigError, ConfigValidator, Result};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Key under which the host stores the option mapping.
pub const OPTIONS_KEY: &str = "lianaautomation_wpf_options";

/// One of the five admin settings fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SettingsField {
    Url,
    Realm,
    User,
    Key,
    Channel,
}

impl SettingsField {
    /// All fields, in admin form order.
    pub const ALL: [SettingsField; 5] = [
        SettingsField::Url,
        SettingsField::Realm,
        SettingsField::User,
        SettingsField::Key,
        SettingsField::Channel,
    ];

    /// Key inside the option mapping.
    pub fn option_key(&self) -> &'static str {
        match self {
            Self::Url => "lianaautomation_url",
            Self::Realm => "lianaautomation_realm",
            Self::User => "lianaautomation_user",
            Self::Key => "lianaautomation_key",
            Self::Channel => "lianaautomation_channel",
        }
    }

    /// Suffix of the environment variable (`LIANAAUTOMATION_<suffix>`).
    pub fn env_key(&self) -> &'static str {
        match self {
            Self::Url => "URL",
            Self::Realm => "REALM",
            Self::User => "USER",
            Self::Key => "KEY",
            Self::Channel => "CHANNEL",
        }
    }

    /// Label shown next to the input in the admin form.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Url => "Automation API URL",
            Self::Realm => "Automation Realm",
            Self::User => "Automation User",
            Self::Key => "Automation Secret Key",
            Self::Channel => "Automation Channel ID",
        }
    }
}

/// Raw settings as stored by the host. Any field may be absent.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(
        rename = "lianaautomation_url",
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub url: Option<String>,

    #[serde(
        rename = "lianaautomation_realm",
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub realm: Option<String>,

    #[serde(
        rename = "lianaautomation_user",
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub user: Option<String>,

    #[serde(
        rename = "lianaautomation_key",
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub key: Option<String>,

    #[serde(
        rename = "lianaautomation_channel",
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub channel: Option<String>,
}

impl Settings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    pub fn with_realm(mut self, realm: impl Into<String>) -> Self {
        self.realm = Some(realm.into());
        self
    }

    pub fn with_user(mut self, user: impl Into<String>) -> Self {
        self.user = Some(user.into());
        self
    }

    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    pub fn with_channel(mut self, channel: impl Into<String>) -> Self {
        self.channel = Some(channel.into());
        self
    }

    /// Value of a single field.
    pub fn get(&self, field: SettingsField) -> Option<&str> {
        match field {
            SettingsField::Url => self.url.as_deref(),
            SettingsField::Realm => self.realm.as_deref(),
            SettingsField::User => self.user.as_deref(),
            SettingsField::Key => self.key.as_deref(),
            SettingsField::Channel => self.channel.as_deref(),
        }
    }

    fn slot_mut(&mut self, field: SettingsField) -> &mut Option<String> {
        match field {
            SettingsField::Url => &mut self.url,
            SettingsField::Realm => &mut self.realm,
            SettingsField::User => &mut self.user,
            SettingsField::Key => &mut self.key,
            SettingsField::Channel => &mut self.channel,
        }
    }

    /// Set a single field.
    pub fn set(&mut self, field: SettingsField, value: Option<String>) {
        *self.slot_mut(field) = value;
    }

    /// Clean every field the way submitted admin text is cleaned: control
    /// characters dropped, whitespace runs collapsed, ends trimmed. Fields
    /// that end up empty become absent.
    pub fn sanitize(mut self) -> Self {
        for field in SettingsField::ALL {
            let slot = self.slot_mut(field);
            *slot = slot
                .take()
                .map(|v| sanitize_text(&v))
                .filter(|v| !v.is_empty());
        }
        self
    }

    /// Validate into credentials. Fails on the first absent or empty field.
    pub fn credentials(&self) -> Result<Credentials> {
        Credentials::new(
            ConfigValidator::required(self.url.as_deref(), SettingsField::Url)?,
            ConfigValidator::required(self.realm.as_deref(), SettingsField::Realm)?,
            ConfigValidator::required(self.user.as_deref(), SettingsField::User)?,
            ConfigValidator::required(self.key.as_deref(), SettingsField::Key)?,
            ConfigValidator::required(self.channel.as_deref(), SettingsField::Channel)?,
        )
    }

    /// Whether every field is present and non-empty.
    pub fn is_complete(&self) -> bool {
        SettingsField::ALL
            .iter()
            .all(|f| self.get(*f).is_some_and(|v| !v.is_empty()))
    }

    /// Build from a JSON value holding either the option mapping itself or
    /// an object with the mapping under [`OPTIONS_KEY`].
    pub fn from_value(value: serde_json::Value) -> Result<Self> {
        let value = match value {
            serde_json::Value::Object(mut map) if map.contains_key(OPTIONS_KEY) => map
                .remove(OPTIONS_KEY)
                .unwrap_or(serde_json::Value::Null),
            other => other,
        };

        if value.is_null() {
            return Ok(Self::default());
        }

        serde_json::from_value(value).map_err(|e| ConfigError::DeserializationError(e.to_string()))
    }
}

impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settings")
            .field("url", &self.url)
            .field("realm", &self.realm)
            .field("user", &self.user)
            .field("key", &self.key.as_ref().map(|_| "<redacted>"))
            .field("channel", &self.channel)
            .finish()
    }
}

/// Complete, validated API credentials.
///
/// Every field is guaranteed non-empty. The base URL carries no trailing
/// slash.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    base_url: String,
    realm: String,
    user: String,
    secret_key: String,
    channel_id: String,
}

impl Credentials {
    pub fn new(
        base_url: impl Into<String>,
        realm: impl Into<String>,
        user: impl Into<String>,
        secret_key: impl Into<String>,
        channel_id: impl Into<String>,
    ) -> Result<Self> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        let credentials = Self {
            base_url,
            realm: realm.into(),
            user: user.into(),
            secret_key: secret_key.into(),
            channel_id: channel_id.into(),
        };

        ConfigValidator::required(Some(&credentials.base_url), SettingsField::Url)?;
        ConfigValidator::required(Some(&credentials.realm), SettingsField::Realm)?;
        ConfigValidator::required(Some(&credentials.user), SettingsField::User)?;
        ConfigValidator::required(Some(&credentials.secret_key), SettingsField::Key)?;
        ConfigValidator::required(Some(&credentials.channel_id), SettingsField::Channel)?;

        Ok(credentials)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn realm(&self) -> &str {
        &self.realm
    }

    pub fn user(&self) -> &str {
        &self.user
    }

    pub fn secret_key(&self) -> &str {
        &self.secret_key
    }

    pub fn channel_id(&self) -> &str {
        &self.channel_id
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("base_url", &self.base_url)
            .field("realm", &self.realm)
            .field("user", &self.user)
            .field("secret_key", &"<redacted>")
            .field("channel_id", &self.channel_id)
            .finish()
    }
}

fn sanitize_text(raw: &str) -> String {
    raw.split(|c: char| c.is_whitespace() || c.is_control())
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

// Stored options are loosely typed; numeric user or channel ids are common.
// `false` is an unset option, `true` reads as "1".
fn lenient_string<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;
    use serde_json::Value;

    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(Value::Bool(false)) => Ok(None),
        Some(Value::Bool(true)) => Ok(Some("1".to_string())),
        Some(other) => Err(D::Error::custom(format!(
            "expected a string setting, found {}",
            other
        ))),
    }
}
