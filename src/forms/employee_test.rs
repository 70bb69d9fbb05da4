use super::*;
use crate::services::employees::EmployeeApiError;
use crate::toast::ToastVariant;
use std::io;
use std::sync::{Arc, Mutex};
use tracing_subscriber::fmt::MakeWriter;

enum Scripted {
    Reply(CreateEmployeeReply),
    Fail,
}

struct MockApi {
    script: Scripted,
    calls: Mutex<Vec<NewEmployee>>,
}

impl MockApi {
    fn new(script: Scripted) -> Self {
        Self { script, calls: Mutex::new(Vec::new()) }
    }

    fn call_count(&self) -> usize {
        self.calls.lock().expect("mock mutex should lock").len()
    }
}

#[async_trait::async_trait]
impl EmployeeApi for MockApi {
    async fn create_employee(&self, employee: &NewEmployee) -> Result<CreateEmployeeReply, EmployeeApiError> {
        self.calls
            .lock()
            .expect("mock mutex should lock")
            .push(employee.clone());
        match &self.script {
            Scripted::Reply(reply) => Ok(reply.clone()),
            Scripted::Fail => Err(EmployeeApiError::Request("connection refused".into())),
        }
    }
}

/// Log sink shared between a test and the subscriber it installs.
#[derive(Clone, Default)]
struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

struct BufferWriter(Arc<Mutex<Vec<u8>>>);

impl<'a> MakeWriter<'a> for SharedBuffer {
    type Writer = BufferWriter;

    fn make_writer(&'a self) -> Self::Writer {
        BufferWriter(Arc::clone(&self.0))
    }
}

impl io::Write for BufferWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut guard = self
            .0
            .lock()
            .map_err(|_| io::Error::other("lock poisoned"))?;
        guard.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl SharedBuffer {
    fn contents(&self) -> String {
        String::from_utf8(self.0.lock().expect("log buffer should lock").clone()).expect("utf8 log output")
    }
}

fn john() -> EmployeeForm {
    EmployeeForm {
        first_name: "John".into(),
        last_name: "Doe".into(),
        phone: "9876543210".into(),
        email: "john@x.com".into(),
        date_of_joining: "2024-01-01".into(),
        dob: "1990-01-01".into(),
    }
}

// =============================================================================
// validate
// =============================================================================

#[test]
fn valid_form_builds_payload() {
    let employee = john().validate().unwrap();
    assert_eq!(employee.first_name, "John");
    assert_eq!(employee.date_of_joining, "2024-01-01");
}

#[test]
fn empty_form_reports_every_field_in_order() {
    let errors = EmployeeForm::default().validate().unwrap_err();
    let fields: Vec<&str> = errors.iter().map(|e| e.field).collect();
    assert_eq!(fields, vec!["firstName", "lastName", "phone", "email", "dateOfJoining", "dob"]);
}

#[test]
fn each_rule_reports_its_message() {
    let cases: Vec<(&str, Box<dyn Fn(&mut EmployeeForm)>, &str)> = vec![
        ("firstName", Box::new(|f: &mut EmployeeForm| f.first_name = "J".into()), "First name must be at least 2 characters."),
        ("lastName", Box::new(|f: &mut EmployeeForm| f.last_name = "D".into()), "Last name must be at least 2 characters."),
        ("phone", Box::new(|f: &mut EmployeeForm| f.phone = "987654321".into()), "Phone number must be at least 10 digits."),
        ("email", Box::new(|f: &mut EmployeeForm| f.email = "john@".into()), "Please enter a valid email address."),
        ("dateOfJoining", Box::new(|f: &mut EmployeeForm| f.date_of_joining.clear()), "Date of joining is required."),
        ("dob", Box::new(|f: &mut EmployeeForm| f.dob.clear()), "Date of birth is required."),
    ];
    for (field, mutate, message) in cases {
        let mut form = john();
        mutate(&mut form);
        let errors = form.validate().unwrap_err();
        assert_eq!(errors.len(), 1, "only {field} should fail");
        assert_eq!(errors.get(field), Some(message));
    }
}

#[test]
fn boundary_lengths_pass() {
    let mut form = john();
    form.first_name = "Jo".into();
    form.last_name = "Li".into();
    form.phone = "0123456789".into();
    assert!(form.validate().is_ok());
}

#[test]
fn reset_clears_all_fields() {
    let mut form = john();
    form.reset();
    assert_eq!(form, EmployeeForm::default());
}

#[test]
fn form_deserializes_camel_case_and_defaults_missing() {
    let form: EmployeeForm = serde_json::from_value(serde_json::json!({
        "firstName": "John",
        "dateOfJoining": "2024-01-01"
    }))
    .unwrap();
    assert_eq!(form.first_name, "John");
    assert_eq!(form.date_of_joining, "2024-01-01");
    assert!(form.dob.is_empty());
}

// =============================================================================
// submit
// =============================================================================

#[tokio::test]
async fn invalid_input_is_blocked_without_network_call() {
    let api = MockApi::new(Scripted::Reply(CreateEmployeeReply::Created { password: "x".into() }));
    let toaster = Toaster::new();
    let mut form = john();
    form.phone = "123".into();

    let outcome = submit(&api, &toaster, &mut form).await;

    assert_eq!(
        outcome.field_errors().and_then(|e| e.get("phone")),
        Some("Phone number must be at least 10 digits.")
    );
    assert_eq!(api.call_count(), 0);
    assert_eq!(toaster.pending(), 0);
    assert_eq!(form.phone, "123");
}

#[tokio::test]
async fn success_resets_form_and_reports_password() {
    let api = MockApi::new(Scripted::Reply(CreateEmployeeReply::Created { password: "abc123".into() }));
    let toaster = Toaster::new();
    let mut form = john();

    let outcome = submit(&api, &toaster, &mut form).await;

    assert!(outcome.is_accepted());
    assert_eq!(api.call_count(), 1);
    assert_eq!(form, EmployeeForm::default());
    let toasts = toaster.drain();
    assert_eq!(toasts.len(), 1);
    assert_eq!(toasts[0].title, SUCCESS_TITLE);
    assert_eq!(toasts[0].variant, ToastVariant::Default);
    assert!(toasts[0].description.contains("John Doe"));
    assert!(toasts[0].description.contains("abc123"));
}

#[tokio::test]
async fn rejection_shows_server_message_and_keeps_values() {
    let api = MockApi::new(Scripted::Reply(CreateEmployeeReply::Rejected {
        status: 409,
        message: Some("Email already exists".into()),
    }));
    let toaster = Toaster::new();
    let mut form = john();

    let outcome = submit(&api, &toaster, &mut form).await;

    assert_eq!(outcome, Submission::Rejected);
    assert_eq!(form, john());
    let toasts = toaster.drain();
    assert_eq!(toasts[0].variant, ToastVariant::Destructive);
    assert_eq!(toasts[0].description, "Email already exists");
}

#[tokio::test]
async fn rejection_without_message_uses_fallback() {
    let api = MockApi::new(Scripted::Reply(CreateEmployeeReply::Rejected { status: 500, message: None }));
    let toaster = Toaster::new();
    let mut form = john();

    submit(&api, &toaster, &mut form).await;

    assert_eq!(toaster.drain()[0].description, REJECTED_FALLBACK);
}

#[tokio::test]
async fn transport_failure_shows_generic_message_and_keeps_values() {
    let api = MockApi::new(Scripted::Fail);
    let toaster = Toaster::new();
    let mut form = john();

    let outcome = submit(&api, &toaster, &mut form).await;

    assert_eq!(outcome, Submission::Failed);
    assert_eq!(form, john());
    let toasts = toaster.drain();
    assert_eq!(toasts[0].title, ERROR_TITLE);
    assert_eq!(toasts[0].description, FAILURE_MESSAGE);
    assert!(toasts[0].is_destructive());
}

#[tokio::test]
async fn transport_failure_is_logged_as_error() {
    let sink = SharedBuffer::default();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(sink.clone())
        .with_ansi(false)
        .with_max_level(tracing::Level::INFO)
        .finish();
    let _guard = tracing::subscriber::set_default(subscriber);

    let api = MockApi::new(Scripted::Fail);
    let outcome = submit(&api, &Toaster::new(), &mut john()).await;
    assert_eq!(outcome, Submission::Failed);

    let logs = sink.contents();
    let line = logs
        .lines()
        .find(|l| l.contains("error adding employee"))
        .expect("failure should be logged");
    assert!(line.contains("ERROR"), "got {line}");
    assert!(line.contains("connection refused"), "got {line}");
}

#[tokio::test]
async fn backend_rejection_is_not_logged_as_error() {
    let sink = SharedBuffer::default();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(sink.clone())
        .with_ansi(false)
        .finish();
    let _guard = tracing::subscriber::set_default(subscriber);

    let api = MockApi::new(Scripted::Reply(CreateEmployeeReply::Rejected { status: 409, message: None }));
    let outcome = submit(&api, &Toaster::new(), &mut john()).await;
    assert_eq!(outcome, Submission::Rejected);

    let logs = sink.contents();
    assert!(logs.contains("employee rejected by backend"));
    assert!(!logs.contains("ERROR"));
}
