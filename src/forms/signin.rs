//! Sign-in form.

use serde::{Deserialize, Deserializer};

use super::Submission;
use crate::config::parse_bool;
use crate::services::auth::Credentials;
use crate::services::session::AuthSession;
use crate::toast::Toast;
use crate::validation::{FieldErrors, is_email, min_chars, non_empty};

pub const SUCCESS_TITLE: &str = "Signed in";
pub const FAILURE_TITLE: &str = "Sign-in failed";

#[derive(Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SigninForm {
    pub email: String,
    pub password: String,
    #[serde(deserialize_with = "checkbox")]
    pub remember: bool,
}

impl std::fmt::Debug for SigninForm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SigninForm")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("remember", &self.remember)
            .finish()
    }
}

/// HTML checkboxes post `on` when ticked and nothing when not.
fn checkbox<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    Ok(parse_bool(&raw).unwrap_or(false))
}

impl SigninForm {
    /// # Errors
    ///
    /// Returns one error per failing field.
    pub fn validate(&self) -> Result<Credentials, FieldErrors> {
        let mut errors = FieldErrors::new();
        if !non_empty(&self.email) {
            errors.push("email", "Email is required");
        } else if !is_email(&self.email) {
            errors.push("email", "Invalid email address");
        }
        if !non_empty(&self.password) {
            errors.push("password", "Password is required");
        } else if !min_chars(&self.password, 6) {
            errors.push("password", "Password must be at least 6 characters");
        }

        errors.into_result(|| Credentials {
            email: self.email.clone(),
            password: self.password.clone(),
            remember: self.remember,
        })
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Validate and sign the session in, reporting through the session toaster.
pub async fn submit(session: &AuthSession, form: &mut SigninForm) -> Submission {
    let credentials = match form.validate() {
        Ok(credentials) => credentials,
        Err(errors) => return Submission::Blocked(errors),
    };

    match session.login(&credentials).await {
        Ok(user) => {
            session
                .toaster()
                .push(Toast::new(SUCCESS_TITLE, format!("Welcome back, {}.", user.name)));
            form.reset();
            Submission::Accepted
        }
        Err(e) => {
            tracing::warn!(email = %credentials.email, error = %e, "sign-in refused");
            session
                .toaster()
                .push(Toast::destructive(FAILURE_TITLE, e.to_string()));
            Submission::Rejected
        }
    }
}

#[cfg(test)]
#[path = "signin_test.rs"]
mod tests;
