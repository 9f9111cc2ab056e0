//! HTTP Handlers
//!
//! The submission pipeline lives here: validate the form, open a hosted
//! checkout session, answer with the session id, then append the tracking
//! row on a detached task so the redirect is never blocked.

use std::sync::Arc;

use axum::{Json, extract::State, http::StatusCode};
use serde::Serialize;

use quote_core::{QuoteSubmission, SubmissionForm, extract_region, generate_policy_id};
use quote_payments::GatewayError;
use quote_sheets::{RecordSink, test_row};

use crate::config::EnvPresence;
use crate::error::ApiError;
use crate::state::AppState;

// ============================================================================
// Response Types
// ============================================================================

#[derive(Serialize)]
pub struct HealthResponse {
    pub ok: bool,
    pub envs: EnvPresence,
}

#[derive(Serialize)]
pub struct ClientConfigResponse {
    #[serde(rename = "publishableKey")]
    pub publishable_key: String,
}

#[derive(Serialize)]
pub struct CheckoutResponse {
    pub id: String,
}

#[derive(Serialize)]
pub struct SheetsTestResponse {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

// ============================================================================
// Handlers
// ============================================================================

/// Health check endpoint
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        ok: true,
        envs: state.config.env_presence,
    })
}

/// Browser-side configuration
pub async fn client_config(State(state): State<AppState>) -> Json<ClientConfigResponse> {
    Json(ClientConfigResponse {
        publishable_key: state.config.publishable_key.clone(),
    })
}

/// Append the fixed test row to the sheet
pub async fn test_sheets(State(state): State<AppState>) -> (StatusCode, Json<SheetsTestResponse>) {
    match state.recorder.append_record(test_row()).await {
        Ok(()) => (
            StatusCode::OK,
            Json(SheetsTestResponse {
                ok: true,
                error: None,
            }),
        ),
        Err(e) => {
            tracing::error!("❌ /test-sheets failed: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(SheetsTestResponse {
                    ok: false,
                    error: Some(e.to_string()),
                }),
            )
        }
    }
}

/// Create a hosted checkout session for a quote submission
pub async fn create_checkout_session(
    State(state): State<AppState>,
    Json(form): Json<SubmissionForm>,
) -> Result<Json<CheckoutResponse>, ApiError> {
    let quote = form.validate()?;

    let Some(gateway) = state.gateway.as_ref() else {
        tracing::error!("checkout requested without a configured payment gateway");
        return Err(GatewayError::Config("STRIPE_SECRET_KEY not set".into()).into());
    };

    let session = gateway.create_session(&quote).await.map_err(|e| {
        tracing::error!("🔥 checkout error via {}: {:?}", gateway.name(), e);
        e
    })?;

    // Respond first so the redirect isn't blocked; the side record follows
    // on its own task.
    tokio::spawn(record_submission(state.recorder.clone(), quote));

    Ok(Json(CheckoutResponse { id: session.id }))
}

/// Detached side-record continuation. Every outcome ends here, logged;
/// nothing reaches the already-sent response.
async fn record_submission(recorder: Arc<dyn RecordSink>, quote: QuoteSubmission) {
    let region = extract_region(&quote.address);
    let policy_id = generate_policy_id(&region);
    let row = quote.side_record_row(&policy_id);

    match recorder.append_record(row).await {
        Ok(()) => tracing::info!("✓ sheet append ok ({})", policy_id),
        Err(e) => tracing::error!("❌ sheet append failed: {}", e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use axum::Router;
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, header};
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use quote_payments::{MockGateway, PaymentGateway};
    use quote_sheets::MemorySink;

    use crate::config::ServerConfig;

    fn test_config() -> ServerConfig {
        ServerConfig {
            port: 4242,
            publishable_key: "pk_test_123".to_string(),
            env_presence: EnvPresence {
                stripe_secret_key: true,
                stripe_publishable_key: true,
                google_sheet_id: false,
                google_client_email: false,
            },
        }
    }

    struct TestApp {
        router: Router,
        gateway: Arc<MockGateway>,
        recorder: Arc<MemorySink>,
    }

    fn test_app(gateway: MockGateway, recorder: MemorySink) -> TestApp {
        let gateway = Arc::new(gateway);
        let recorder = Arc::new(recorder);
        let state = AppState {
            config: Arc::new(test_config()),
            gateway: Some(gateway.clone() as Arc<dyn PaymentGateway>),
            recorder: recorder.clone(),
        };
        TestApp {
            router: crate::build_router(state),
            gateway,
            recorder,
        }
    }

    fn valid_submission() -> Value {
        json!({
            "fullName": "Jane Driver",
            "makeModel": "Honda Civic",
            "carYear": "2021",
            "vinNumber": "1HGEM21292L047875",
            "address": "123 Test St, NJ 07102",
            "email": "jane@example.com",
            "amount": 7999,
        })
    }

    async fn get_json(router: &Router, uri: &str) -> (StatusCode, Value) {
        let request = Request::builder()
            .method("GET")
            .uri(uri)
            .body(Body::empty())
            .unwrap();
        send(router, request).await
    }

    async fn post_json(router: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        send(router, request).await
    }

    async fn send(router: &Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = serde_json::from_slice(&bytes).unwrap();
        (status, value)
    }

    async fn wait_until(mut check: impl FnMut() -> bool) {
        for _ in 0..200 {
            if check() {
                return;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        panic!("condition not reached in time");
    }

    #[tokio::test]
    async fn health_reports_env_presence() {
        let app = test_app(MockGateway::new(), MemorySink::new());

        let (status, body) = get_json(&app.router, "/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["ok"], true);
        assert_eq!(body["envs"]["STRIPE_SECRET_KEY"], true);
        assert_eq!(body["envs"]["STRIPE_PUBLISHABLE_KEY"], true);
        assert_eq!(body["envs"]["GOOGLE_SHEET_ID"], false);
        assert_eq!(body["envs"]["GOOGLE_CLIENT_EMAIL"], false);
    }

    #[tokio::test]
    async fn config_exposes_the_publishable_key() {
        let app = test_app(MockGateway::new(), MemorySink::new());

        let (status, body) = get_json(&app.router, "/config").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["publishableKey"], "pk_test_123");
    }

    #[tokio::test]
    async fn valid_submission_returns_a_session_id() {
        let app = test_app(MockGateway::new(), MemorySink::new());

        let (status, body) =
            post_json(&app.router, "/create-checkout-session", valid_submission()).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["id"].as_str().unwrap().starts_with("cs_test_mock_"));
        assert_eq!(app.gateway.calls(), 1);
    }

    #[tokio::test]
    async fn missing_fields_are_reported_together() {
        let app = test_app(MockGateway::new(), MemorySink::new());

        let mut submission = valid_submission();
        submission.as_object_mut().unwrap().remove("fullName");
        submission.as_object_mut().unwrap().remove("vinNumber");

        let (status, body) =
            post_json(&app.router, "/create-checkout-session", submission).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "missing_fields");
        assert_eq!(body["fields"], json!(["fullName", "vinNumber"]));
        assert_eq!(app.gateway.calls(), 0);
    }

    #[tokio::test]
    async fn non_numeric_amount_echoes_the_raw_value() {
        let app = test_app(MockGateway::new(), MemorySink::new());

        let mut submission = valid_submission();
        submission["amount"] = json!("abc");

        let (status, body) =
            post_json(&app.router, "/create-checkout-session", submission).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "invalid_amount_type");
        assert_eq!(body["got"], "abc");
        assert_eq!(app.gateway.calls(), 0);
    }

    #[tokio::test]
    async fn blank_amount_coerces_to_zero_and_fails_the_minimum() {
        let app = test_app(MockGateway::new(), MemorySink::new());

        let mut submission = valid_submission();
        submission["amount"] = json!("");

        let (status, body) =
            post_json(&app.router, "/create-checkout-session", submission).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "invalid_amount_min_50");
        assert_eq!(body["got"], 0);
        assert_eq!(app.gateway.calls(), 0);
    }

    #[tokio::test]
    async fn amount_below_minimum_is_rejected_before_the_gateway() {
        let app = test_app(MockGateway::new(), MemorySink::new());

        let mut submission = valid_submission();
        submission["amount"] = json!(49);

        let (status, body) =
            post_json(&app.router, "/create-checkout-session", submission).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "invalid_amount_min_50");
        assert_eq!(body["got"], 49);
        assert_eq!(app.gateway.calls(), 0);
    }

    #[tokio::test]
    async fn amount_at_the_minimum_reaches_the_gateway() {
        let app = test_app(MockGateway::new(), MemorySink::new());

        let mut submission = valid_submission();
        submission["amount"] = json!(50);

        let (status, _body) =
            post_json(&app.router, "/create-checkout-session", submission).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(app.gateway.calls(), 1);
    }

    #[tokio::test]
    async fn side_record_row_follows_a_successful_checkout() {
        let app = test_app(MockGateway::new(), MemorySink::new());

        let (status, _body) =
            post_json(&app.router, "/create-checkout-session", valid_submission()).await;
        assert_eq!(status, StatusCode::OK);

        wait_until(|| !app.recorder.rows().is_empty()).await;
        let rows = app.recorder.rows();
        assert_eq!(rows.len(), 1);

        let row = &rows[0];
        assert_eq!(row[0], "Jane Driver");
        assert_eq!(row[1], "jane@example.com");
        assert_eq!(row[2], "123 Test St, NJ 07102");
        assert_eq!(row[3], "2021");
        assert_eq!(row[4], "Honda Civic");
        assert_eq!(row[5], "1HGEM21292L047875");
        assert_eq!(row[6], "$79.99/mo");
        assert!(row[7].starts_with("IH-"));
        assert!(row[7].contains("-NJ-"));
    }

    #[tokio::test]
    async fn failed_side_record_never_reaches_the_caller() {
        let app = test_app(MockGateway::new(), MemorySink::failing());

        let (status, body) =
            post_json(&app.router, "/create-checkout-session", valid_submission()).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["id"].as_str().is_some());

        // the append runs on its own task, fails, and stays there
        wait_until(|| app.recorder.calls() >= 1).await;
        assert!(app.recorder.rows().is_empty());
    }

    #[tokio::test]
    async fn gateway_failure_answers_500_and_writes_no_side_record() {
        let app = test_app(MockGateway::failing(), MemorySink::new());

        let (status, body) =
            post_json(&app.router, "/create-checkout-session", valid_submission()).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "create_session_failed");
        assert_eq!(body["detail"], "mock gateway rejection");
        assert_eq!(app.gateway.calls(), 1);

        tokio::time::sleep(Duration::from_millis(20)).await;
        assert_eq!(app.recorder.calls(), 0);
    }

    #[tokio::test]
    async fn missing_gateway_fails_checkout_but_not_validation() {
        let state = AppState {
            config: Arc::new(test_config()),
            gateway: None,
            recorder: Arc::new(MemorySink::new()),
        };
        let router = crate::build_router(state);

        let (status, body) =
            post_json(&router, "/create-checkout-session", valid_submission()).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "create_session_failed");

        let (status, body) = post_json(&router, "/create-checkout-session", json!({})).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "missing_fields");
    }

    #[tokio::test]
    async fn test_sheets_appends_the_fixed_row() {
        let app = test_app(MockGateway::new(), MemorySink::new());

        let (status, body) = post_json(&app.router, "/test-sheets", json!({})).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["ok"], true);

        let rows = app.recorder.rows();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0][0], "TEST ROW");
        assert_eq!(rows[0][6], "$99.00/mo");
        assert_eq!(rows[0][7], "IH-TEST-US-ABCDE");
    }

    #[tokio::test]
    async fn test_sheets_surfaces_append_failures() {
        let app = test_app(MockGateway::new(), MemorySink::failing());

        let (status, body) = post_json(&app.router, "/test-sheets", json!({})).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["ok"], false);
        assert!(body["error"].as_str().unwrap().contains("append failed"));
    }

    #[tokio::test]
    async fn cors_allows_the_quote_page_origin() {
        let app = test_app(MockGateway::new(), MemorySink::new());

        let request = Request::builder()
            .method("OPTIONS")
            .uri("/create-checkout-session")
            .header(header::ORIGIN, "https://ironhaus-insurance-1.onrender.com")
            .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
            .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "content-type")
            .body(Body::empty())
            .unwrap();
        let response = app.router.clone().oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response
                .headers()
                .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
                .and_then(|v| v.to_str().ok()),
            Some("https://ironhaus-insurance-1.onrender.com")
        );
    }
}
