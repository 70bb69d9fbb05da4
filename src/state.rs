//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor.
//! It is built once at startup from collaborators that must all be
//! supplied: a session store (which itself requires an authenticator) and
//! an employee backend client.

use std::sync::Arc;

use crate::config::AppConfig;
use crate::services::auth::{Authenticator, PendingAuthenticator};
use crate::services::employees::{EmployeeApi, EmployeeApiError, HttpEmployeeApi};
use crate::services::session::SessionStore;

/// Shared application state, injected into Axum handlers via State extractor.
/// Clone is required by Axum; all inner fields are Arc-wrapped or Clone.
#[derive(Clone)]
pub struct AppState {
    pub sessions: SessionStore,
    pub employees: Arc<dyn EmployeeApi>,
    /// Mark the session cookie `Secure`.
    pub cookie_secure: bool,
}

impl AppState {
    #[must_use]
    pub fn new(sessions: SessionStore, employees: Arc<dyn EmployeeApi>) -> Self {
        Self { sessions, employees, cookie_secure: false }
    }

    #[must_use]
    pub fn with_cookie_secure(mut self, secure: bool) -> Self {
        self.cookie_secure = secure;
        self
    }

    /// Production wiring: HTTP employee client plus the given authenticator.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn from_config(config: &AppConfig, authenticator: Arc<dyn Authenticator>) -> Result<Self, EmployeeApiError> {
        let employees = HttpEmployeeApi::new(&config.employee_api_base_url, config.api_timeouts)?;
        let sessions = SessionStore::new(authenticator, config.session_idle_timeout)
            .with_toast_limit(config.toast_limit)
            .with_max_sessions(config.max_sessions);
        Ok(Self::new(sessions, Arc::new(employees)).with_cookie_secure(config.cookie_secure))
    }

    /// [`AppState::from_config`] with the sign-in integration left pending.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn from_config_pending_auth(config: &AppConfig) -> Result<Self, EmployeeApiError> {
        Self::from_config(config, Arc::new(PendingAuthenticator))
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================
