//! Blocking HTTP implementation of the remote store.

use crate::config::Config;
use crate::errors::{AppResult, RemoteError};
use crate::models::attendance::AttendanceRecord;
use crate::remote::RemoteStore;
use serde_json::Value;
use std::time::Duration;

pub struct HttpRemote {
    client: reqwest::blocking::Client,
    base_url: String,
    api_token: String,
}

/// Classify an HTTP status for retry behavior: request timeouts, rate
/// limits and server errors are transient; other client errors mean the
/// payload itself was rejected.
fn classify_status(status: u16, body: String) -> RemoteError {
    match status {
        408 | 425 | 429 | 500..=599 => {
            RemoteError::Transient(format!("HTTP {}: {}", status, body))
        }
        _ => RemoteError::Validation(format!("HTTP {}: {}", status, body)),
    }
}

fn transport_error(e: reqwest::Error) -> RemoteError {
    RemoteError::Transient(e.to_string())
}

impl HttpRemote {
    pub fn from_config(cfg: &Config) -> AppResult<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(cfg.request_timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: cfg.remote_url.trim_end_matches('/').to_string(),
            api_token: cfg.api_token.clone(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    fn read_body(resp: reqwest::blocking::Response) -> Result<Value, RemoteError> {
        let status = resp.status();
        let text = resp.text().map_err(transport_error)?;

        if !status.is_success() {
            return Err(classify_status(status.as_u16(), text));
        }
        if text.is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_str(&text)
            .map_err(|e| RemoteError::Validation(format!("malformed response body: {}", e)))
    }
}

impl RemoteStore for HttpRemote {
    fn create(&self, collection: &str, fields: &Value) -> Result<String, RemoteError> {
        let resp = self
            .client
            .post(self.url(collection))
            .bearer_auth(&self.api_token)
            .json(fields)
            .send()
            .map_err(transport_error)?;

        let body = Self::read_body(resp)?;
        body.get("id")
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| RemoteError::Validation("create response missing 'id'".into()))
    }

    fn update(&self, collection: &str, id: &str, fields: &Value) -> Result<(), RemoteError> {
        let resp = self
            .client
            .patch(self.url(&format!("{}/{}", collection, id)))
            .bearer_auth(&self.api_token)
            .json(fields)
            .send()
            .map_err(transport_error)?;

        Self::read_body(resp).map(|_| ())
    }

    fn fetch(&self, collection: &str, id: &str) -> Result<Value, RemoteError> {
        let resp = self
            .client
            .get(self.url(&format!("{}/{}", collection, id)))
            .bearer_auth(&self.api_token)
            .send()
            .map_err(transport_error)?;

        Self::read_body(resp)
    }

    fn delete_children(
        &self,
        collection: &str,
        parent_field: &str,
        parent_id: &str,
    ) -> Result<(), RemoteError> {
        let resp = self
            .client
            .delete(self.url(&format!(
                "{}?{}={}",
                collection, parent_field, parent_id
            )))
            .bearer_auth(&self.api_token)
            .send()
            .map_err(transport_error)?;

        Self::read_body(resp).map(|_| ())
    }

    fn query_open_attendance(
        &self,
        owner_id: &str,
    ) -> Result<Option<AttendanceRecord>, RemoteError> {
        let resp = self
            .client
            .get(self.url(&format!("attendance/open/{}", owner_id)))
            .bearer_auth(&self.api_token)
            .send()
            .map_err(transport_error)?;

        if resp.status().as_u16() == 404 {
            return Ok(None);
        }

        let body = Self::read_body(resp)?;
        if body.is_null() {
            return Ok(None);
        }
        serde_json::from_value(body)
            .map(Some)
            .map_err(|e| RemoteError::Validation(format!("malformed attendance record: {}", e)))
    }
}
