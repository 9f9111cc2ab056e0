//! IronHaus Quote Checkout Server
//!
//! Axum-based server for the vehicle-insurance quote page: validates
//! submissions, opens Stripe hosted checkout sessions, and appends a
//! tracking row to a Google Sheet off the response path.

mod config;
mod error;
mod handlers;
mod state;

use std::sync::Arc;

use axum::{
    Router,
    http::{HeaderValue, Method, header},
    routing::{get, post},
};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use quote_payments::{PaymentGateway, StripeGateway};
use quote_sheets::{DisabledSink, RecordSink, SheetsAppender, SheetsConfig};

use crate::config::ServerConfig;
use crate::handlers::{client_config, create_checkout_session, health_check, test_sheets};
use crate::state::AppState;

/// Browser origins allowed to call the API.
const ALLOWED_ORIGINS: [&str; 2] = [
    "https://ironhaus-insurance-1.onrender.com",
    "http://localhost:4242",
];

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,tower_http=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Arc::new(ServerConfig::from_env());

    // Payment gateway
    let gateway: Option<Arc<dyn PaymentGateway>> = match StripeGateway::from_env() {
        Ok(gateway) => {
            tracing::info!("✓ Stripe configured");
            Some(Arc::new(gateway))
        }
        Err(e) => {
            tracing::warn!("⚠ Stripe not configured - checkout requests will fail: {}", e);
            tracing::warn!("  Set STRIPE_SECRET_KEY in .env");
            None
        }
    };

    // Side-record sink
    let recorder: Arc<dyn RecordSink> = match SheetsConfig::from_env() {
        Some(sheets) => match SheetsAppender::new(sheets) {
            Ok(appender) => {
                tracing::info!("✓ Sheet logging enabled ({})", appender.sheet_id());
                Arc::new(appender)
            }
            Err(e) => {
                tracing::warn!("⚠ Sheet credentials rejected - sheet logging disabled: {}", e);
                Arc::new(DisabledSink)
            }
        },
        None => {
            tracing::warn!(
                "⚠ Sheet logging disabled - set GOOGLE_CLIENT_EMAIL, GOOGLE_PRIVATE_KEY, GOOGLE_SHEET_ID"
            );
            Arc::new(DisabledSink)
        }
    };

    // Build application state
    let state = AppState {
        config: config.clone(),
        gateway,
        recorder,
    };

    let app = build_router(state);

    // Start server
    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("✅ Server running on http://localhost:{}", config.port);
    tracing::info!("");
    tracing::info!("Endpoints:");
    tracing::info!("  GET  /health                  - Health check");
    tracing::info!("  GET  /config                  - Browser configuration");
    tracing::info!("  POST /test-sheets             - Append a sheet test row");
    tracing::info!("  POST /create-checkout-session - Start a hosted checkout");
    tracing::info!("");

    axum::serve(listener, app).await?;

    Ok(())
}

/// Builds the application router: API routes, CORS allow-list, request
/// tracing, and the static quote pages at the root.
fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::list(
            ALLOWED_ORIGINS.map(HeaderValue::from_static),
        ))
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE]);

    Router::new()
        // Health & browser config
        .route("/health", get(health_check))
        .route("/config", get(client_config))
        // Checkout
        .route("/create-checkout-session", post(create_checkout_session))
        // Diagnostics
        .route("/test-sheets", post(test_sheets))
        // Static pages (quote form, success/cancel)
        .fallback_service(ServeDir::new("public"))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
