//! The seam between [`ApiClient`](super::ApiClient) and the network.

use reqwest::Url;
use reqwest::blocking::Client;
use reqwest::cookie::{CookieStore, Jar};
use serde_json::Value;
use std::rc::Rc;
use std::sync::Arc;
use std::time::Duration;

use super::ApiError;

/// Sends requests to the single backend endpoint.
pub trait Transport {
    /// Posts a JSON body and returns the decoded JSON response.
    fn post_json(&self, body: &Value) -> Result<Value, ApiError>;

    /// Posts url-encoded form fields and returns the raw response body.
    fn post_form(&self, fields: &[(&str, String)]) -> Result<Vec<u8>, ApiError>;

    /// Cookies the backend has set, as a `Cookie` header value.
    fn session_cookies(&self) -> Option<String> {
        None
    }

    /// Puts back cookies returned earlier by [`session_cookies`](Self::session_cookies).
    fn restore_cookies(&self, _header: &str) {}
}

impl<T: Transport + ?Sized> Transport for Rc<T> {
    fn post_json(&self, body: &Value) -> Result<Value, ApiError> {
        (**self).post_json(body)
    }

    fn post_form(&self, fields: &[(&str, String)]) -> Result<Vec<u8>, ApiError> {
        (**self).post_form(fields)
    }

    fn session_cookies(&self) -> Option<String> {
        (**self).session_cookies()
    }

    fn restore_cookies(&self, header: &str) {
        (**self).restore_cookies(header)
    }
}

/// Blocking HTTP transport. Keeps the backend's session cookie between calls.
pub struct HttpTransport {
    client: Client,
    jar: Arc<Jar>,
    url: Url,
}

impl HttpTransport {
    pub fn new(url: &str, timeout: Duration) -> Result<Self, ApiError> {
        let url = Url::parse(url).map_err(|e| ApiError::InvalidUrl(format!("{}: {}", url, e)))?;
        let jar = Arc::new(Jar::default());
        let client = Client::builder()
            .cookie_provider(Arc::clone(&jar))
            .timeout(timeout)
            .build()?;
        Ok(Self { client, jar, url })
    }

    pub fn url(&self) -> &str {
        self.url.as_str()
    }
}

impl Transport for HttpTransport {
    fn post_json(&self, body: &Value) -> Result<Value, ApiError> {
        let response = self
            .client
            .post(self.url.clone())
            .json(body)
            .send()?
            .error_for_status()?;
        log::trace!("Backend answered with status {}", response.status());
        Ok(response.json()?)
    }

    fn post_form(&self, fields: &[(&str, String)]) -> Result<Vec<u8>, ApiError> {
        let response = self
            .client
            .post(self.url.clone())
            .form(fields)
            .send()?
            .error_for_status()?;
        Ok(response.bytes()?.to_vec())
    }

    fn session_cookies(&self) -> Option<String> {
        let header = self.jar.cookies(&self.url)?;
        header.to_str().ok().map(str::to_string)
    }

    fn restore_cookies(&self, header: &str) {
        for pair in header.split(';').map(str::trim).filter(|p| !p.is_empty()) {
            self.jar.add_cookie_str(pair, &self.url);
        }
    }
}
