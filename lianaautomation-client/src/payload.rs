//! Request bodies for the pingpong and import endpoints

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Verb recorded for a submitted form.
pub const FORM_SEND_VERB: &str = "formsend";

/// Field type that carries the contact's email address.
pub const EMAIL_FIELD_TYPE: &str = "email";

/// One submitted form field, as handed over by the form library.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormField {
    pub name: String,

    #[serde(rename = "type")]
    pub field_type: String,

    pub value: String,
}

impl FormField {
    pub fn new(
        name: impl Into<String>,
        field_type: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            field_type: field_type.into(),
            value: value.into(),
        }
    }

    pub fn is_email(&self) -> bool {
        self.field_type == EMAIL_FIELD_TYPE
    }
}

/// Value of the first email-typed field that is not empty.
pub fn find_email(fields: &[FormField]) -> Option<&str> {
    fields
        .iter()
        .filter(|f| f.is_email())
        .map(|f| f.value.as_str())
        .find(|v| !v.is_empty())
}

/// Every field's `name -> value`, plus `formtitle` and `formid`.
///
/// Later fields overwrite earlier ones with the same name; the two form
/// keys are written last.
pub fn form_items(fields: &[FormField], form_title: &str, form_id: &str) -> BTreeMap<String, String> {
    let mut items: BTreeMap<String, String> = fields
        .iter()
        .map(|f| (f.name.clone(), f.value.clone()))
        .collect();
    items.insert("formtitle".to_string(), form_title.to_string());
    items.insert("formid".to_string(), form_id.to_string());
    items
}

/// Attributes used to match an event to a contact. Absent keys are left out
/// of the JSON entirely.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

impl Identity {
    pub fn new(email: Option<String>, token: Option<String>) -> Self {
        Self {
            email: email.filter(|v| !v.is_empty()),
            token: token.filter(|v| !v.is_empty()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.email.is_none() && self.token.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub verb: String,
    pub items: BTreeMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportRecord {
    pub identity: Identity,
    pub events: Vec<Event>,
}

/// Body of `POST /rest/v1/import`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportPayload {
    pub channel: String,
    pub no_duplicates: bool,
    pub data: Vec<ImportRecord>,
}

impl ImportPayload {
    /// A single `formsend` event for one identity.
    pub fn form_send(
        channel: impl Into<String>,
        identity: Identity,
        items: BTreeMap<String, String>,
    ) -> Self {
        Self {
            channel: channel.into(),
            no_duplicates: false,
            data: vec![ImportRecord {
                identity,
                events: vec![Event {
                    verb: FORM_SEND_VERB.to_string(),
                    items,
                }],
            }],
        }
    }

    /// Compact JSON, the exact bytes that get signed and sent.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// Body of `POST /rest/v1/pingpong`: `{"ping":"pong"}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PingPayload {
    ping: &'static str,
}

impl Default for PingPayload {
    fn default() -> Self {
        Self { ping: "pong" }
    }
}

impl PingPayload {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
