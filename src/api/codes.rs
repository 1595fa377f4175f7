//! Backend response codes and envelope decoding.
//!
//! The backend answers every request with a JSON object carrying a `code`
//! whose meaning depends on the operation. Codes arrive either as numbers or
//! as numeric strings. [`Envelope::expect`] turns a code into either the
//! payload or a named [`ApiError`].

use serde::de::{self, Deserializer};
use serde::Deserialize;
use serde_json::Value;

use super::ApiError;

pub const LOGIN_OK: i64 = 1;
pub const OTP_SENT: i64 = 8;
pub const OTP_UNKNOWN_EMAIL: i64 = 9;
pub const OTP_MAIL_FAILED: i64 = 10;
pub const PASSWORD_ADDED: i64 = 11;
pub const PASSWORDS_LISTED: i64 = 130;
pub const PASSWORD_UPDATED: i64 = 150;
pub const PASSWORD_DELETED: i64 = 160;
pub const IMPORT_OK: i64 = 172;
pub const PASSWORD_GENERATED: i64 = 180;
pub const SESSION_VALID: i64 = 200;
pub const SESSION_EXPIRED: i64 = 401;

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrString {
    Number(i64),
    Text(String),
}

/// Accepts `42` as well as `"42"`.
pub fn flexible_i64<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
    match NumberOrString::deserialize(deserializer)? {
        NumberOrString::Number(n) => Ok(n),
        NumberOrString::Text(s) => s
            .trim()
            .parse()
            .map_err(|_| de::Error::custom(format!("expected a numeric value, got '{}'", s))),
    }
}

pub fn flexible_u64<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
    let n = flexible_i64(deserializer)?;
    u64::try_from(n).map_err(|_| de::Error::custom(format!("expected a non-negative value, got {}", n)))
}

pub fn flexible_u8<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u8, D::Error> {
    let n = flexible_i64(deserializer)?;
    u8::try_from(n).map_err(|_| de::Error::custom(format!("value {} does not fit a score", n)))
}

/// The common shape of every JSON response.
#[derive(Debug, Deserialize)]
pub struct Envelope {
    #[serde(deserialize_with = "flexible_i64")]
    pub code: i64,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub data: Value,
    #[serde(default)]
    pub errors: Vec<Value>,
}

impl Envelope {
    pub fn from_value(value: Value) -> Result<Self, ApiError> {
        Ok(serde_json::from_value(value)?)
    }

    /// Returns the payload if `code` matches, otherwise the matching failure.
    pub fn expect(self, code: i64) -> Result<Value, ApiError> {
        if self.code == code {
            return Ok(self.data);
        }
        Err(self.into_error())
    }

    pub fn into_error(self) -> ApiError {
        if self.code == SESSION_EXPIRED {
            return ApiError::SessionExpired;
        }
        ApiError::Rejected {
            code: self.code,
            message: self.message.unwrap_or_else(|| "no message".to_string()),
        }
    }

    /// The `errors` list rendered as text.
    pub fn error_lines(&self) -> Vec<String> {
        self.errors
            .iter()
            .map(|e| match e {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            })
            .collect()
    }
}

/// Decodes a payload into `T`, reporting what was expected on failure.
pub fn decode<T: for<'de> Deserialize<'de>>(data: Value, what: &str) -> Result<T, ApiError> {
    serde_json::from_value(data)
        .map_err(|e| ApiError::UnexpectedPayload(format!("{}: {}", what, e)))
}
