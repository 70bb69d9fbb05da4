//! Add Employee form.

use serde::{Deserialize, Serialize};

use super::Submission;
use crate::services::employees::{CreateEmployeeReply, EmployeeApi, NewEmployee};
use crate::toast::{Toast, Toaster};
use crate::validation::{FieldErrors, is_email, min_chars, non_empty};

pub const SUCCESS_TITLE: &str = "Employee added successfully";
pub const ERROR_TITLE: &str = "Error";
pub const REJECTED_FALLBACK: &str = "Something went wrong while adding the employee.";
pub const FAILURE_MESSAGE: &str = "Failed to add employee. Please try again.";

/// Raw field values as typed. Missing fields deserialize as empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EmployeeForm {
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub email: String,
    pub date_of_joining: String,
    pub dob: String,
}

impl EmployeeForm {
    /// Check every field and build the backend payload.
    ///
    /// # Errors
    ///
    /// Returns one error per failing field, in form order.
    pub fn validate(&self) -> Result<NewEmployee, FieldErrors> {
        let mut errors = FieldErrors::new();
        errors.require("firstName", min_chars(&self.first_name, 2), "First name must be at least 2 characters.");
        errors.require("lastName", min_chars(&self.last_name, 2), "Last name must be at least 2 characters.");
        errors.require("phone", min_chars(&self.phone, 10), "Phone number must be at least 10 digits.");
        errors.require("email", is_email(&self.email), "Please enter a valid email address.");
        errors.require("dateOfJoining", non_empty(&self.date_of_joining), "Date of joining is required.");
        errors.require("dob", non_empty(&self.dob), "Date of birth is required.");

        errors.into_result(|| NewEmployee {
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            phone: self.phone.clone(),
            email: self.email.clone(),
            date_of_joining: self.date_of_joining.clone(),
            dob: self.dob.clone(),
        })
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Validate, create the employee, report through `toaster`.
///
/// Sends nothing when validation fails. Clears `form` only when the
/// backend accepted the record.
pub async fn submit(api: &dyn EmployeeApi, toaster: &Toaster, form: &mut EmployeeForm) -> Submission {
    let employee = match form.validate() {
        Ok(employee) => employee,
        Err(errors) => return Submission::Blocked(errors),
    };

    match api.create_employee(&employee).await {
        Ok(CreateEmployeeReply::Created { password }) => {
            tracing::info!(email = %employee.email, "employee added");
            toaster.push(Toast::new(
                SUCCESS_TITLE,
                format!("Added {} to the system. Password: {password}", employee.full_name()),
            ));
            form.reset();
            Submission::Accepted
        }
        Ok(CreateEmployeeReply::Rejected { status, message }) => {
            tracing::warn!(status, message = message.as_deref().unwrap_or(""), "employee rejected by backend");
            let description = message.unwrap_or_else(|| REJECTED_FALLBACK.to_owned());
            toaster.push(Toast::destructive(ERROR_TITLE, description));
            Submission::Rejected
        }
        Err(e) => {
            tracing::error!(error = %e, "error adding employee");
            toaster.push(Toast::destructive(ERROR_TITLE, FAILURE_MESSAGE));
            Submission::Failed
        }
    }
}

#[cfg(test)]
#[path = "employee_test.rs"]
mod tests;
