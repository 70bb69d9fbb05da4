//! Employee backend client: `POST /api/employees`.
//!
//! The backend owns the employee record. This client sends one request per
//! submission and classifies the reply; it never retries. Pure parsing in
//! `parse_reply` for testability.

use std::time::Duration;

use serde::Serialize;

use crate::config::ApiTimeouts;

const EMPLOYEES_PATH: &str = "/api/employees";

// =============================================================================
// WIRE TYPES
// =============================================================================

/// Validated employee payload, serialized with the backend's camelCase keys.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewEmployee {
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub email: String,
    pub date_of_joining: String,
    pub dob: String,
}

impl NewEmployee {
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Classified backend reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CreateEmployeeReply {
    /// 2xx with the server-issued initial password.
    Created { password: String },
    /// Non-2xx. `message` is the server's non-empty `message` field, if any.
    Rejected { status: u16, message: Option<String> },
}

#[derive(Debug, thiserror::Error)]
pub enum EmployeeApiError {
    #[error("employee API request failed: {0}")]
    Request(String),
    #[error("employee API response parse failed (status {status}): {reason}")]
    Parse { status: u16, reason: String },
    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),
}

#[async_trait::async_trait]
pub trait EmployeeApi: Send + Sync {
    async fn create_employee(&self, employee: &NewEmployee) -> Result<CreateEmployeeReply, EmployeeApiError>;
}

// =============================================================================
// CLIENT
// =============================================================================

pub struct HttpEmployeeApi {
    http: reqwest::Client,
    endpoint: String,
}

impl HttpEmployeeApi {
    /// `base_url` is the backend origin without a trailing slash.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new(base_url: &str, timeouts: ApiTimeouts) -> Result<Self, EmployeeApiError> {
        let http = reqwest::Client::builder()
            .timeout(timeouts.request())
            .connect_timeout(timeouts.connect())
            .build()
            .map_err(|e| EmployeeApiError::HttpClientBuild(e.to_string()))?;
        Ok(Self { http, endpoint: format!("{}{EMPLOYEES_PATH}", base_url.trim_end_matches('/')) })
    }

    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait::async_trait]
impl EmployeeApi for HttpEmployeeApi {
    async fn create_employee(&self, employee: &NewEmployee) -> Result<CreateEmployeeReply, EmployeeApiError> {
        let started = std::time::Instant::now();
        let response = self
            .http
            .post(&self.endpoint)
            .json(employee)
            .send()
            .await
            .map_err(|e| EmployeeApiError::Request(e.to_string()))?;

        let status = response.status().as_u16();
        let text = response
            .text()
            .await
            .map_err(|e| EmployeeApiError::Request(e.to_string()))?;

        tracing::debug!(status, elapsed_ms = elapsed_ms(started.elapsed()), "employee API replied");
        parse_reply(status, &text)
    }
}

fn elapsed_ms(elapsed: Duration) -> u64 {
    u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX)
}

// =============================================================================
// PARSING
// =============================================================================

/// Classify a backend reply. The body must be JSON whatever the status.
///
/// # Errors
///
/// Returns [`EmployeeApiError::Parse`] when the body is not JSON, or when a
/// 2xx body lacks a string `password`.
pub fn parse_reply(status: u16, body: &str) -> Result<CreateEmployeeReply, EmployeeApiError> {
    let json: serde_json::Value =
        serde_json::from_str(body).map_err(|e| EmployeeApiError::Parse { status, reason: e.to_string() })?;

    if (200..300).contains(&status) {
        let password = json
            .get("password")
            .and_then(serde_json::Value::as_str)
            .ok_or_else(|| EmployeeApiError::Parse { status, reason: "missing `password` field".into() })?;
        return Ok(CreateEmployeeReply::Created { password: password.to_owned() });
    }

    let message = json
        .get("message")
        .and_then(serde_json::Value::as_str)
        .filter(|m| !m.is_empty())
        .map(str::to_owned);
    Ok(CreateEmployeeReply::Rejected { status, message })
}

#[cfg(test)]
#[path = "employees_test.rs"]
mod tests;
