//src/main.rs

use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use property_portal::{app, config::AppState};

#[tokio::main]
async fn main() {
    // Loaded before the logger so RUST_LOG from .env applies.
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .compact()
        .init();

    // If configuration fails, the application must not start.
    let app_state = AppState::new()
        .await
        .expect("Failed to initialize application state");

    let addr = format!("0.0.0.0:{}", app_state.config.port);
    let app = app(app_state);

    let listener = TcpListener::bind(&addr)
        .await
        .expect("Failed to bind TCP listener");
    tracing::info!("🚀 Server listening on {}", addr);
    tracing::info!("📚 API docs at http://{}/swagger-ui", addr);

    axum::serve(listener, app)
        .await
        .expect("Axum server error");
}
