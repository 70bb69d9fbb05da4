use staffdesk::config::AppConfig;
use staffdesk::routes;
use staffdesk::state::AppState;

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt::init();

    let config = AppConfig::from_env().expect("invalid configuration");
    let state = AppState::from_config_pending_auth(&config).expect("employee API client init failed");
    tracing::info!(employee_api = %config.employee_api_base_url, "employee API configured");
    tracing::warn!("sign-in backend not configured; sign-in attempts will be refused");

    let app = routes::app(state);
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", config.port))
        .await
        .expect("failed to bind");

    tracing::info!(port = config.port, "staffdesk listening");
    axum::serve(listener, app).await.expect("server failed");
}
