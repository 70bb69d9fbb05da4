//! Auth routes: session provider, `use_auth` accessor, sign-in pages.

use axum::extract::{FromRequestParts, Request, State};
use axum::http::request::Parts;
use axum::http::{Extensions, StatusCode};
use axum::middleware::Next;
use axum::response::{Html, IntoResponse, Json, Redirect, Response};
use axum::Form;
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use time::Duration;

use super::{HOME_PATH, SIGNIN_PATH, render};
use crate::forms::Submission;
use crate::forms::signin::{self, SigninForm};
use crate::services::auth::{AuthError, CurrentUser};
use crate::services::session::AuthSession;
use crate::state::AppState;
use crate::toast::Toast;
use crate::validation::FieldErrors;

pub const COOKIE_NAME: &str = "staffdesk_session";

/// Session cookie. Without `max_age` it lasts for the browser session;
/// a remembered sign-in gets a persistent cookie.
pub(crate) fn session_cookie(token: String, secure: bool, max_age: Option<Duration>) -> Cookie<'static> {
    let mut cookie = Cookie::build((COOKIE_NAME, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(secure);
    if let Some(max_age) = max_age {
        cookie = cookie.max_age(max_age);
    }
    cookie.build()
}

// =============================================================================
// PROVIDER
// =============================================================================

/// Middleware that resolves the caller's session and exposes it to every
/// handler below it.
///
/// The cookie is sent when a fresh session is committed because the request
/// left state in it, and re-sent when the remember-me choice changes.
pub async fn provide_auth(State(state): State<AppState>, jar: CookieJar, mut request: Request, next: Next) -> Response {
    let opened = state
        .sessions
        .open(jar.get(COOKIE_NAME).map(Cookie::value))
        .await;
    let session = opened.session.clone();
    let remembered = session.is_remembered();
    request.extensions_mut().insert(opened.session);

    let response = next.run(request).await;
    let issue = if opened.stored {
        session.is_remembered() != remembered
    } else {
        state.sessions.commit(&session).await
    };
    if !issue {
        return response;
    }

    let max_age = if session.is_remembered() {
        Duration::try_from(state.sessions.idle_ttl()).ok()
    } else {
        None
    };
    let cookie = session_cookie(session.token().to_owned(), state.cookie_secure, max_age);
    (jar.add(cookie), response).into_response()
}

/// Read the session the provider attached.
///
/// # Errors
///
/// Returns [`AuthError::MissingProvider`] when no provider ran for this
/// request. There is no fallback session.
pub fn use_auth(extensions: &Extensions) -> Result<AuthSession, AuthError> {
    extensions
        .get::<AuthSession>()
        .cloned()
        .ok_or(AuthError::MissingProvider)
}

impl<S> FromRequestParts<S> for AuthSession
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        use_auth(&parts.extensions)
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::MissingProvider => {
                tracing::error!(error = %self, "route mounted outside the auth provider");
                StatusCode::INTERNAL_SERVER_ERROR
            }
            Self::NotConfigured => StatusCode::SERVICE_UNAVAILABLE,
            Self::InvalidCredentials => StatusCode::UNAUTHORIZED,
            Self::Backend(_) => StatusCode::BAD_GATEWAY,
        };
        (status, self.to_string()).into_response()
    }
}

// =============================================================================
// HANDLERS
// =============================================================================

/// `GET /auth/signin`
pub async fn signin_page(auth: AuthSession) -> Html<String> {
    let user = auth.current_user().await;
    let toasts = auth.toaster().drain();
    Html(render::signin_page(user.as_ref(), &SigninForm::default(), &FieldErrors::new(), &toasts))
}

/// `POST /auth/signin` — validate, sign in, redirect home on success.
pub async fn submit_signin(auth: AuthSession, Form(mut form): Form<SigninForm>) -> Response {
    let outcome = signin::submit(&auth, &mut form).await;
    let status = match &outcome {
        Submission::Accepted => return Redirect::to(HOME_PATH).into_response(),
        Submission::Blocked(_) => StatusCode::UNPROCESSABLE_ENTITY,
        Submission::Rejected | Submission::Failed => StatusCode::UNAUTHORIZED,
    };

    let errors = outcome.field_errors().cloned().unwrap_or_default();
    let user = auth.current_user().await;
    let toasts = auth.toaster().drain();
    (status, Html(render::signin_page(user.as_ref(), &form, &errors, &toasts))).into_response()
}

/// `POST /auth/signout` — clear the identity, back to the sign-in page.
pub async fn signout(auth: AuthSession) -> Redirect {
    auth.logout().await;
    auth.toaster()
        .push(Toast::new("Signed out", "You have been signed out."));
    Redirect::to(SIGNIN_PATH)
}

/// `GET /api/auth/me` — return current user.
pub async fn me(auth: AuthSession) -> Result<Json<CurrentUser>, StatusCode> {
    auth.current_user()
        .await
        .map(Json)
        .ok_or(StatusCode::UNAUTHORIZED)
}

#[cfg(test)]
#[path = "auth_test.rs"]
mod tests;
