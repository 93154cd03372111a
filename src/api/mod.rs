pub mod appointment;
pub mod doctor;
pub mod patient;

use std::fmt::Display;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value as JsonValue;

pub const DOCTOR_PATH: &str = "/doctor";
pub const DOCTOR_FILTER_PATH: &str = "/doctor/filter";
pub const DOCTOR_LOGIN_PATH: &str = "/doctor/login";
pub const ADMIN_LOGIN_PATH: &str = "/admin";
pub const PATIENT_SIGNUP_PATH: &str = "/patient/signup";
pub const PATIENT_LOGIN_PATH: &str = "/patient/login";
pub const PATIENT_ME_PATH: &str = "/patient/me";
pub const APPOINTMENT_FILTER_PATH: &str = "/patient/appointments/filter";

pub const HEADER_AUTHORIZATION: &str = "Authorization";
pub const HEADER_CONTENT_TYPE: &str = "Content-Type";
pub const MIME_JSON: &str = "application/json";

pub struct RequestField {
    pub name: &'static str,
    pub value: String,
}

/// Query parameters of a filter request. Only fields carrying a value are
/// emitted, an omitted field and an empty filter are different things to the
/// backend.
pub trait QueryFields {
    fn fields(&self) -> Vec<RequestField>;
}

/// Blank input (after trimming) counts as "no filter".
pub(crate) fn non_blank(value: &str) -> Option<String> {
    let value = value.trim();
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

/// The backend writes unset fields as `null`, read them like missing ones.
pub(crate) fn null_as_default<'de, D, T>(d: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(d)?.unwrap_or_default())
}

pub(crate) fn push_field(fields: &mut Vec<RequestField>, name: &'static str, value: &Option<String>) {
    if let Some(value) = value {
        fields.push(RequestField {
            name,
            value: value.clone(),
        });
    }
}

/// Uniform outcome of every mutating call: save, delete, signup and the logins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiResult {
    pub success: bool,

    pub message: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

impl ApiResult {
    pub fn ok(message: impl ToString) -> Self {
        Self {
            success: true,
            message: message.to_string(),
            token: None,
        }
    }

    pub fn with_token(message: impl ToString, token: String) -> Self {
        Self {
            success: true,
            message: message.to_string(),
            token: Some(token),
        }
    }

    pub fn failed(message: impl ToString) -> Self {
        Self {
            success: false,
            message: message.to_string(),
            token: None,
        }
    }
}

impl Display for ApiResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

/// Body of the backend's plain replies. Successful replies use `message`,
/// rejections may use `error` instead.
#[derive(Debug, Default, Deserialize)]
pub struct MessageBody {
    #[serde(default)]
    pub message: Option<String>,

    #[serde(default)]
    pub error: Option<String>,

    #[serde(default)]
    pub token: Option<String>,
}

impl MessageBody {
    pub fn from_json(body: &JsonValue) -> Self {
        serde_json::from_value(body.clone()).unwrap_or_default()
    }

    pub fn text(&self) -> Option<String> {
        [&self.message, &self.error]
            .into_iter()
            .flatten()
            .find(|s| !s.is_empty())
            .cloned()
    }
}

/// Lists come back either bare or wrapped in an object under `key`
/// (`{"doctors": [...]}`). `null` is an empty list.
pub fn extract_list<T: DeserializeOwned>(
    body: JsonValue,
    key: &str,
) -> Result<Vec<T>, serde_json::Error> {
    match body {
        JsonValue::Null => Ok(Vec::new()),
        JsonValue::Object(mut obj) => match obj.remove(key) {
            Some(JsonValue::Null) | None => Ok(Vec::new()),
            Some(list) => serde_json::from_value(list),
        },
        list => serde_json::from_value(list),
    }
}

/// Single records may also be wrapped (`{"patient": {...}}`).
pub fn extract_object<T: DeserializeOwned>(
    body: JsonValue,
    key: &str,
) -> Result<T, serde_json::Error> {
    match body {
        JsonValue::Object(mut obj) if obj.get(key).is_some_and(JsonValue::is_object) => {
            serde_json::from_value(obj.remove(key).unwrap_or_default())
        }
        body => serde_json::from_value(body),
    }
}
