//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! Page and API routes sit behind the auth provider middleware, which
//! attaches the caller's `AuthSession` to every request. `/healthz` is
//! mounted outside the provider so health checks never touch the session
//! store.

pub mod auth;
pub mod employees;
pub mod render;

use axum::Router;
use axum::http::StatusCode;
use axum::middleware;
use axum::response::Redirect;
use axum::routing::{get, post};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

pub const HOME_PATH: &str = "/admin/add-employee";
pub const SIGNIN_PATH: &str = "/auth/signin";

pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/", get(redirect_home))
        .route(HOME_PATH, get(employees::add_employee_page).post(employees::submit_add_employee))
        .route(SIGNIN_PATH, get(auth::signin_page).post(auth::submit_signin))
        .route("/auth/signout", post(auth::signout))
        .route("/api/auth/me", get(auth::me))
        .layer(middleware::from_fn_with_state(state.clone(), auth::provide_auth))
        .route("/healthz", get(healthz))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn redirect_home() -> Redirect {
    Redirect::temporary(HOME_PATH)
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}
