//! Server-rendered pages for the form routes.
//!
//! Pages are Leptos components rendered to an HTML string per request.
//! Leptos escapes every attribute value and text node it writes.

use leptos::prelude::*;

use crate::forms::employee::EmployeeForm;
use crate::forms::signin::SigninForm;
use crate::services::auth::CurrentUser;
use crate::toast::{Toast, ToastVariant};
use crate::validation::FieldErrors;

const STYLE: &str = "body{font-family:system-ui,sans-serif;margin:0;background:#f4f6f8;color:#111}\
header{display:flex;justify-content:space-between;align-items:center;padding:1rem 2rem;background:#fff;border-bottom:1px solid #e2e8f0}\
main{max-width:48rem;margin:2rem auto;padding:0 1rem}\
.card{background:#fff;border:1px solid #e2e8f0;border-radius:.5rem;padding:1.5rem}\
.grid{display:grid;grid-template-columns:1fr 1fr;gap:1rem;margin-bottom:1rem}\
label{display:block;font-weight:600;margin-bottom:.25rem}\
input[type=text],input[type=email],input[type=password],input[type=tel],input[type=date]{width:100%;padding:.5rem;border:1px solid #cbd5e1;border-radius:.375rem;box-sizing:border-box}\
.field-error{color:#dc2626;font-size:.875rem;margin:.25rem 0 0}\
.toast{border-radius:.5rem;padding:.75rem 1rem;margin-bottom:1rem;border:1px solid #e2e8f0;background:#fff}\
.toast.destructive{background:#dc2626;color:#fff;border-color:#dc2626}\
button{padding:.5rem 1rem;border:0;border-radius:.375rem;background:#5750f1;color:#fff;margin-right:1rem}\
button[disabled]{opacity:.5}";

fn render(view: impl FnOnce() -> AnyView) -> String {
    let owner = Owner::new();
    owner.with(|| view().to_html())
}

// =============================================================================
// SHELL
// =============================================================================

/// Document shell: header with the account slot, pending toasts, then the page body.
#[component]
fn Layout(title: &'static str, user: Option<CurrentUser>, toasts: Vec<Toast>, children: Children) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <title>{format!("{title} | staffdesk")}</title>
                <style>{STYLE}</style>
            </head>
            <body>
                <header>
                    <strong>"staffdesk"</strong>
                    <Account user/>
                </header>
                <main>
                    <ToastList toasts/>
                    {children()}
                </main>
            </body>
        </html>
    }
}

#[component]
fn Account(user: Option<CurrentUser>) -> impl IntoView {
    match user {
        Some(user) => view! {
            <form method="post" action="/auth/signout">
                <span>{user.name}</span>
                <button type="submit">"Sign out"</button>
            </form>
        }
        .into_any(),
        None => view! { <a href="/auth/signin">"Sign in"</a> }.into_any(),
    }
}

#[component]
fn ToastList(toasts: Vec<Toast>) -> impl IntoView {
    toasts
        .into_iter()
        .map(|toast| {
            let class = match toast.variant {
                ToastVariant::Default => "toast",
                ToastVariant::Destructive => "toast destructive",
            };
            view! {
                <div class=class role="status">
                    <strong>{toast.title}</strong>
                    <div>{toast.description}</div>
                </div>
            }
        })
        .collect_view()
}

/// Labelled input with its inline error. `value` is omitted for fields that
/// must never be echoed back.
#[component]
fn Field(
    name: &'static str,
    label: &'static str,
    kind: &'static str,
    error: Option<&'static str>,
    #[prop(optional)] value: Option<String>,
    #[prop(optional)] placeholder: Option<&'static str>,
) -> impl IntoView {
    view! {
        <div>
            <label for=name>{label}</label>
            <input id=name name=name type=kind value=value placeholder=placeholder/>
            {error.map(|message| view! { <p class="field-error">{message}</p> })}
        </div>
    }
}

// =============================================================================
// PAGES
// =============================================================================

#[component]
fn EmployeeCard(form: EmployeeForm, errors: FieldErrors) -> impl IntoView {
    view! {
        <h2>"Add Employee"</h2>
        <div class="card">
            <h3>"Employee Information"</h3>
            <p>"Enter the details of the new employee to add them to the system."</p>
            <form method="post" action="/admin/add-employee" novalidate=true>
                <div class="grid">
                    <Field name="firstName" label="First Name" kind="text" value=form.first_name placeholder="John" error=errors.get("firstName")/>
                    <Field name="lastName" label="Last Name" kind="text" value=form.last_name placeholder="Doe" error=errors.get("lastName")/>
                </div>
                <div class="grid">
                    <Field name="phone" label="Phone Number" kind="tel" value=form.phone placeholder="9876543210" error=errors.get("phone")/>
                    <Field name="email" label="Email" kind="email" value=form.email placeholder="john.doe@example.com" error=errors.get("email")/>
                </div>
                <div class="grid">
                    <Field name="dateOfJoining" label="Date of Joining" kind="date" value=form.date_of_joining error=errors.get("dateOfJoining")/>
                    <Field name="dob" label="Date of Birth" kind="date" value=form.dob error=errors.get("dob")/>
                </div>
                <div>
                    <button type="submit">"Add Employee"</button>
                    <button type="submit" disabled=true>"Update Employee"</button>
                </div>
            </form>
        </div>
    }
}

#[component]
fn SigninCard(email: String, remember: bool, errors: FieldErrors) -> impl IntoView {
    view! {
        <h1>"Sign in with Email"</h1>
        <div class="card">
            <form method="post" action="/auth/signin" novalidate=true>
                <Field name="email" label="Email" kind="email" value=email placeholder="Enter your email" error=errors.get("email")/>
                <Field name="password" label="Password" kind="password" placeholder="Enter your password" error=errors.get("password")/>
                <p>
                    <label>
                        <input type="checkbox" name="remember" checked=remember/>
                        " Remember me"
                    </label>
                </p>
                <button type="submit">"Sign In"</button>
            </form>
        </div>
    }
}

#[must_use]
pub fn add_employee_page(
    user: Option<&CurrentUser>,
    form: &EmployeeForm,
    errors: &FieldErrors,
    toasts: &[Toast],
) -> String {
    let (user, form, errors, toasts) = (user.cloned(), form.clone(), errors.clone(), toasts.to_vec());
    render(move || {
        view! {
            <Layout title="Add Employee" user toasts>
                <EmployeeCard form errors/>
            </Layout>
        }
        .into_any()
    })
}

/// The password field is always rendered without a value.
#[must_use]
pub fn signin_page(user: Option<&CurrentUser>, form: &SigninForm, errors: &FieldErrors, toasts: &[Toast]) -> String {
    let (user, email, remember, errors, toasts) =
        (user.cloned(), form.email.clone(), form.remember, errors.clone(), toasts.to_vec());
    render(move || {
        view! {
            <Layout title="Sign in" user toasts>
                <SigninCard email remember errors/>
            </Layout>
        }
        .into_any()
    })
}

#[cfg(test)]
#[path = "render_test.rs"]
mod tests;
