use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use clap::{Args, Parser, Subcommand};
use staffdesk::config::{ApiTimeouts, ConfigError, DEFAULT_EMPLOYEE_API_BASE_URL, normalize_base_url};
use staffdesk::forms::Submission;
use staffdesk::forms::employee::{self, EmployeeForm};
use staffdesk::forms::signin::{self, SigninForm};
use staffdesk::services::auth::PendingAuthenticator;
use staffdesk::services::employees::{EmployeeApiError, HttpEmployeeApi};
use staffdesk::services::session::SessionStore;
use staffdesk::toast::{Toast, Toaster};
use staffdesk::validation::FieldErrors;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Api(#[from] EmployeeApiError),
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("health check failed: HTTP {0}")]
    Unhealthy(u16),
    #[error("submission was not accepted")]
    NotAccepted,
}

#[derive(Parser, Debug)]
#[command(name = "staffdesk-cli", about = "staffdesk employee administration CLI")]
struct Cli {
    #[arg(long, env = "STAFFDESK_API_BASE_URL", default_value = DEFAULT_EMPLOYEE_API_BASE_URL)]
    api_base_url: String,

    #[arg(long, env = "STAFFDESK_SERVER_URL", default_value = "http://127.0.0.1:3000")]
    server_url: String,

    #[arg(long, env = "STAFFDESK_TIMEOUT_SECS", default_value_t = 30)]
    timeout_secs: u64,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Check that the staffdesk server is up.
    Ping,
    Employee(EmployeeCommand),
    /// Validate credentials and attempt a sign-in.
    Signin(SigninArgs),
}

#[derive(Args, Debug)]
struct EmployeeCommand {
    #[command(subcommand)]
    command: EmployeeSubcommand,
}

#[derive(Subcommand, Debug)]
enum EmployeeSubcommand {
    /// Add an employee through the backend API.
    Add(AddEmployeeArgs),
}

#[derive(Args, Debug)]
struct AddEmployeeArgs {
    #[arg(long, default_value = "")]
    first_name: String,
    #[arg(long, default_value = "")]
    last_name: String,
    #[arg(long, default_value = "")]
    phone: String,
    #[arg(long, default_value = "")]
    email: String,
    #[arg(long, default_value = "", help = "YYYY-MM-DD")]
    date_of_joining: String,
    #[arg(long, default_value = "", help = "YYYY-MM-DD")]
    dob: String,
}

impl From<AddEmployeeArgs> for EmployeeForm {
    fn from(args: AddEmployeeArgs) -> Self {
        Self {
            first_name: args.first_name,
            last_name: args.last_name,
            phone: args.phone,
            email: args.email,
            date_of_joining: args.date_of_joining,
            dob: args.dob,
        }
    }
}

#[derive(Args, Debug)]
struct SigninArgs {
    #[arg(long, default_value = "")]
    email: String,
    #[arg(long, env = "STAFFDESK_PASSWORD", default_value = "", hide_env_values = true)]
    password: String,
    #[arg(long, default_value_t = false)]
    remember: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(CliError::NotAccepted) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let timeouts = ApiTimeouts { request_secs: cli.timeout_secs, ..ApiTimeouts::default() };
    match cli.command {
        Command::Ping => run_ping(&cli.server_url).await,
        Command::Employee(employee) => match employee.command {
            EmployeeSubcommand::Add(args) => run_employee_add(&cli.api_base_url, timeouts, args).await,
        },
        Command::Signin(args) => run_signin(args).await,
    }
}

async fn run_ping(server_url: &str) -> Result<(), CliError> {
    let url = format!("{}/healthz", normalize_base_url(server_url)?);
    let response = reqwest::Client::new().get(url).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(CliError::Unhealthy(status.as_u16()));
    }
    println!("ok");
    Ok(())
}

async fn run_employee_add(base_url: &str, timeouts: ApiTimeouts, args: AddEmployeeArgs) -> Result<(), CliError> {
    let api = HttpEmployeeApi::new(&normalize_base_url(base_url)?, timeouts)?;
    let toaster = Toaster::new();
    let mut form = EmployeeForm::from(args);

    let outcome = employee::submit(&api, &toaster, &mut form).await;
    report(&outcome, &toaster.drain())
}

async fn run_signin(args: SigninArgs) -> Result<(), CliError> {
    let store = SessionStore::new(Arc::new(PendingAuthenticator), Duration::from_secs(60));
    let session = store.open(None).await.session;
    let mut form = SigninForm { email: args.email, password: args.password, remember: args.remember };

    let outcome = signin::submit(&session, &mut form).await;
    report(&outcome, &session.toaster().drain())
}

fn report(outcome: &Submission, toasts: &[Toast]) -> Result<(), CliError> {
    if let Some(errors) = outcome.field_errors() {
        print_field_errors(errors);
    }
    for toast in toasts {
        let marker = if toast.is_destructive() { "!" } else { "*" };
        println!("{marker} {}: {}", toast.title, toast.description);
    }
    if outcome.is_accepted() { Ok(()) } else { Err(CliError::NotAccepted) }
}

fn print_field_errors(errors: &FieldErrors) {
    for error in errors.iter() {
        eprintln!("{}: {}", error.field, error.message);
    }
}

#[cfg(test)]
#[path = "main_test.rs"]
mod tests;
