//! Client for the LockBox backend endpoint.
//!
//! Every call is a `POST` to one URL with a JSON body that carries the API key
//! and a boolean selector naming the operation. Responses are translated into
//! typed results here so that raw response codes never leave this module.

pub mod codes;
pub mod transport;

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use thiserror::Error;

use crate::credentials::PasswordRecord;
use crate::generator::GeneratedPassword;
use crate::session::User;
use codes::{Envelope, decode, flexible_u8, flexible_u64};
pub use transport::{HttpTransport, Transport};

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Session expired. Please login again.")]
    SessionExpired,

    #[error("Not logged in")]
    NotAuthenticated,

    #[error("Invalid email address")]
    InvalidEmail,

    #[error("Failed to send email. Please try again later.")]
    MailDelivery,

    #[error("Request rejected by the server (code {code}): {message}")]
    Rejected { code: i64, message: String },

    #[error("Import failed: {message}")]
    ImportFailed { message: String, errors: Vec<String> },

    #[error("Invalid backend URL {0}")]
    InvalidUrl(String),

    #[error("Unexpected response payload: {0}")]
    UnexpectedPayload(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Malformed JSON: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Deserialize)]
struct LoginData {
    #[serde(deserialize_with = "flexible_u64")]
    id: u64,
    email: String,
    name: String,
}

#[derive(Deserialize)]
struct SessionData {
    #[serde(deserialize_with = "flexible_u64")]
    user_id: u64,
    email: String,
    name: String,
}

#[derive(Deserialize)]
struct AddedData {
    #[serde(deserialize_with = "flexible_u64")]
    id: u64,
}

#[derive(Deserialize)]
struct ImportData {
    #[serde(deserialize_with = "flexible_u64")]
    imported: u64,
}

#[derive(Deserialize)]
struct SuggestionData {
    password: String,
    #[serde(deserialize_with = "flexible_u8")]
    strength: u8,
}

#[derive(Deserialize)]
struct WireRecord {
    #[serde(deserialize_with = "flexible_u64")]
    id: u64,
    name: String,
    #[serde(default)]
    email: Option<String>,
    password: String,
    #[serde(default)]
    created_at: Option<String>,
}

impl From<WireRecord> for PasswordRecord {
    fn from(w: WireRecord) -> Self {
        PasswordRecord {
            id: w.id,
            platform: w.name,
            email: w.email.unwrap_or_default(),
            password: w.password,
            created_at: w.created_at,
        }
    }
}

#[derive(Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
    validate: bool,
}

#[derive(Serialize)]
struct RegisterRequest<'a> {
    add_user: bool,
    name: &'a str,
    email: &'a str,
    mobile: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
struct AddPasswordRequest<'a> {
    add_pass: bool,
    user_id: u64,
    pass: &'a str,
    name: &'a str,
    email: &'a str,
}

#[derive(Serialize)]
struct UpdatePasswordRequest<'a> {
    id: u64,
    name: &'a str,
    password: &'a str,
    update_password: bool,
}

#[derive(Serialize)]
struct ImportRequest<'a> {
    import_passwords: bool,
    email: &'a str,
    csv_data: &'a str,
}

/// Typed front for the backend.
pub struct ApiClient {
    transport: Box<dyn Transport>,
    api_key: String,
}

impl ApiClient {
    pub fn new(transport: Box<dyn Transport>, api_key: impl Into<String>) -> Self {
        Self {
            transport,
            api_key: api_key.into(),
        }
    }

    /// The backend's session cookies, for storing alongside the profile.
    pub fn session_cookies(&self) -> Option<String> {
        self.transport.session_cookies()
    }

    pub fn restore_cookies(&self, header: &str) {
        self.transport.restore_cookies(header);
    }

    fn call<B: Serialize>(&self, operation: &str, body: B) -> Result<Envelope, ApiError> {
        let mut body = serde_json::to_value(body)?;
        if let Value::Object(map) = &mut body {
            map.insert("api_key".to_string(), Value::String(self.api_key.clone()));
        }

        log::debug!("Calling backend operation '{}'", operation);
        let start = std::time::Instant::now();
        let response = self.transport.post_json(&body);
        log::debug!("Operation '{}' took {:?}", operation, start.elapsed());

        let envelope = Envelope::from_value(response?)?;
        log::debug!("Operation '{}' returned code {}", operation, envelope.code);
        Ok(envelope)
    }

    pub fn login(&self, email: &str, password: &str) -> Result<User, ApiError> {
        let envelope = self.call(
            "login",
            LoginRequest {
                email,
                password,
                validate: true,
            },
        )?;
        let data: LoginData = decode(envelope.expect(codes::LOGIN_OK)?, "login data")?;
        Ok(User {
            id: data.id,
            email: data.email,
            name: data.name,
        })
    }

    /// Creates an account and returns the backend's message. The backend
    /// reports the outcome only in that message, so no code is checked
    /// apart from an expired session.
    pub fn register(
        &self,
        name: &str,
        email: &str,
        mobile: &str,
        password: &str,
    ) -> Result<String, ApiError> {
        let envelope = self.call(
            "register",
            RegisterRequest {
                add_user: true,
                name,
                email,
                mobile,
                password,
            },
        )?;
        if envelope.code == codes::SESSION_EXPIRED {
            return Err(ApiError::SessionExpired);
        }
        Ok(envelope
            .message
            .unwrap_or_else(|| "Registration submitted.".to_string()))
    }

    /// Asks the backend to mail a one-time password for resetting the account.
    pub fn forgot_password(&self, email: &str) -> Result<(), ApiError> {
        let envelope = self.call(
            "forgot_password",
            json!({ "email": email, "send_mail_otp": true }),
        )?;
        match envelope.code {
            codes::OTP_SENT => Ok(()),
            codes::OTP_UNKNOWN_EMAIL => Err(ApiError::InvalidEmail),
            codes::OTP_MAIL_FAILED => Err(ApiError::MailDelivery),
            _ => Err(envelope.into_error()),
        }
    }

    /// Returns the signed-in user if the backend still holds a valid session.
    pub fn check_session(&self) -> Result<Option<User>, ApiError> {
        let envelope = self.call("check_session", json!({ "check_session": true }))?;
        if envelope.code != codes::SESSION_VALID {
            return Ok(None);
        }
        let data: SessionData = decode(envelope.data, "session data")?;
        Ok(Some(User {
            id: data.user_id,
            email: data.email,
            name: data.name,
        }))
    }

    pub fn logout(&self) -> Result<(), ApiError> {
        self.call("logout", json!({ "logout": true }))?;
        Ok(())
    }

    /// Stores a new password and returns its id.
    pub fn add_password(
        &self,
        user: &User,
        platform: &str,
        email: &str,
        password: &str,
    ) -> Result<u64, ApiError> {
        let envelope = self.call(
            "add_password",
            AddPasswordRequest {
                add_pass: true,
                user_id: user.id,
                pass: password,
                name: platform,
                email,
            },
        )?;
        let data: AddedData = decode(envelope.expect(codes::PASSWORD_ADDED)?, "added password")?;
        Ok(data.id)
    }

    pub fn list_passwords(&self, user: &User) -> Result<Vec<PasswordRecord>, ApiError> {
        let envelope = self.call(
            "get_passwords",
            json!({ "email": user.email, "get_pass": true }),
        )?;
        let data = envelope.expect(codes::PASSWORDS_LISTED)?;
        if data.is_null() {
            return Ok(Vec::new());
        }
        let records: Vec<WireRecord> = decode(data, "password list")?;
        Ok(records.into_iter().map(PasswordRecord::from).collect())
    }

    pub fn update_password(&self, id: u64, platform: &str, password: &str) -> Result<(), ApiError> {
        let envelope = self.call(
            "update_password",
            UpdatePasswordRequest {
                id,
                name: platform,
                password,
                update_password: true,
            },
        )?;
        envelope.expect(codes::PASSWORD_UPDATED)?;
        Ok(())
    }

    pub fn delete_password(&self, id: u64) -> Result<(), ApiError> {
        let envelope = self.call(
            "delete_password",
            json!({ "delete_password": true, "id": id }),
        )?;
        envelope.expect(codes::PASSWORD_DELETED)?;
        Ok(())
    }

    /// Uploads raw CSV text. Returns the number of imported rows.
    pub fn import_csv(&self, user: &User, csv_data: &str) -> Result<u64, ApiError> {
        let envelope = self.call(
            "import_passwords",
            ImportRequest {
                import_passwords: true,
                email: &user.email,
                csv_data,
            },
        )?;
        match envelope.code {
            codes::IMPORT_OK => {
                let data: ImportData = decode(envelope.data, "import result")?;
                Ok(data.imported)
            }
            codes::SESSION_EXPIRED => Err(ApiError::SessionExpired),
            _ => {
                let errors = envelope.error_lines();
                Err(ApiError::ImportFailed {
                    message: envelope
                        .message
                        .unwrap_or_else(|| "Failed to import passwords".to_string()),
                    errors,
                })
            }
        }
    }

    /// Downloads the export file. The backend answers this call with a file, not JSON.
    pub fn export_csv(&self, user: &User) -> Result<Vec<u8>, ApiError> {
        let payload = json!({
            "api_key": self.api_key,
            "export_passwords": true,
            "email": user.email,
            "format": "excel",
        });
        log::debug!("Calling backend operation 'export_passwords'");
        let bytes = self.transport.post_form(&[("json", payload.to_string())])?;

        // A JSON envelope instead of a file means the export was refused.
        if let Ok(envelope) = serde_json::from_slice::<Envelope>(&bytes) {
            return Err(envelope.into_error());
        }
        Ok(bytes)
    }

    /// Asks the backend for a password and its server-side score.
    pub fn suggest_password(&self) -> Result<GeneratedPassword, ApiError> {
        let envelope = self.call("generate_password", json!({ "generate_password": true }))?;
        let data: SuggestionData =
            decode(envelope.expect(codes::PASSWORD_GENERATED)?, "generated password")?;
        Ok(GeneratedPassword {
            value: data.password,
            strength: data.strength.min(100),
        })
    }
}
