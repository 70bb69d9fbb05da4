//! Add Employee page.

use axum::Form;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};

use super::render;
use crate::forms::Submission;
use crate::forms::employee::{self, EmployeeForm};
use crate::services::session::AuthSession;
use crate::state::AppState;
use crate::validation::FieldErrors;

/// `GET /admin/add-employee`
pub async fn add_employee_page(auth: AuthSession) -> Html<String> {
    let user = auth.current_user().await;
    let toasts = auth.toaster().drain();
    Html(render::add_employee_page(user.as_ref(), &EmployeeForm::default(), &FieldErrors::new(), &toasts))
}

/// `POST /admin/add-employee` — validate, forward to the backend, re-render.
///
/// Blocked submissions answer 422 with inline errors. Every other outcome
/// answers 200 with its toast; the form is blank only after a success.
pub async fn submit_add_employee(
    State(state): State<AppState>,
    auth: AuthSession,
    Form(mut form): Form<EmployeeForm>,
) -> Response {
    let outcome = employee::submit(state.employees.as_ref(), auth.toaster(), &mut form).await;
    let status = match &outcome {
        Submission::Blocked(_) => StatusCode::UNPROCESSABLE_ENTITY,
        _ => StatusCode::OK,
    };

    let errors = outcome.field_errors().cloned().unwrap_or_default();
    let user = auth.current_user().await;
    let toasts = auth.toaster().drain();
    (status, Html(render::add_employee_page(user.as_ref(), &form, &errors, &toasts))).into_response()
}

#[cfg(test)]
#[path = "employees_test.rs"]
mod tests;
