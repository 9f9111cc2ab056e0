//! Hosted Checkout Gateway
//!
//! Turns a validated quote submission into a Stripe hosted checkout
//! session and hands the session id back for the browser redirect.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use stripe::{
    CheckoutSession, CheckoutSessionMode, Client, CreateCheckoutSession,
    CreateCheckoutSessionLineItems, CreateCheckoutSessionLineItemsPriceData,
    CreateCheckoutSessionLineItemsPriceDataProductData,
    CreateCheckoutSessionPaymentMethodTypes, Currency,
};

use quote_core::QuoteSubmission;

use crate::error::{GatewayError, Result};

/// Redirect target after a completed payment.
pub const SUCCESS_URL: &str = "https://ironhaus-insurance-1.onrender.com/success.html";

/// Redirect target after an abandoned checkout.
pub const CANCEL_URL: &str = "https://ironhaus-insurance-1.onrender.com/cancel.html";

/// Line-item display name on the hosted page.
pub const PRODUCT_NAME: &str = "Auto Group Payment";

/// Deadline for one session-create round trip.
const SESSION_TIMEOUT: Duration = Duration::from_secs(30);

/// A created hosted-checkout session.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PaymentSession {
    /// Gateway session id; the browser redirects with this.
    pub id: String,
}

/// Payment session gateway.
///
/// One method, one concern. The server holds this behind `Arc<dyn _>` so
/// tests can swap in [`crate::MockGateway`].
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Create a hosted checkout session for a validated submission.
    async fn create_session(&self, quote: &QuoteSubmission) -> Result<PaymentSession>;

    /// Gateway name for logs.
    fn name(&self) -> &str;
}

/// Stripe-backed payment gateway.
pub struct StripeGateway {
    client: Client,
}

impl StripeGateway {
    /// Create a gateway from a secret API key.
    pub fn new(secret_key: &str) -> Self {
        Self {
            client: Client::new(secret_key),
        }
    }

    /// Create from the `STRIPE_SECRET_KEY` environment variable.
    pub fn from_env() -> Result<Self> {
        let secret_key = std::env::var("STRIPE_SECRET_KEY")
            .map_err(|_| GatewayError::Config("STRIPE_SECRET_KEY not set".into()))?;
        Ok(Self::new(&secret_key))
    }
}

#[async_trait]
impl PaymentGateway for StripeGateway {
    async fn create_session(&self, quote: &QuoteSubmission) -> Result<PaymentSession> {
        tracing::debug!(
            amount_cents = quote.amount_cents,
            "creating hosted checkout session"
        );

        let params = build_session_params(quote);
        let session = tokio::time::timeout(
            SESSION_TIMEOUT,
            CheckoutSession::create(&self.client, params),
        )
        .await
        .map_err(|_| GatewayError::Timeout)??;

        Ok(PaymentSession {
            id: session.id.to_string(),
        })
    }

    fn name(&self) -> &str {
        "Stripe"
    }
}

/// Builds the session-create parameters for a validated submission.
///
/// One card line item priced from the submission's cents. Vehicle details
/// ride along as product metadata; the session metadata additionally
/// carries the contact fields.
fn build_session_params(quote: &QuoteSubmission) -> CreateCheckoutSession<'_> {
    let mut vehicle = HashMap::new();
    vehicle.insert("fullName".to_string(), quote.full_name.clone());
    vehicle.insert("carYear".to_string(), quote.car_year.clone());
    vehicle.insert("makeModel".to_string(), quote.make_model.clone());
    vehicle.insert("vinNumber".to_string(), quote.vin_number.clone());

    let mut params = CreateCheckoutSession::new();
    params.mode = Some(CheckoutSessionMode::Payment);
    params.payment_method_types = Some(vec![CreateCheckoutSessionPaymentMethodTypes::Card]);
    params.success_url = Some(SUCCESS_URL);
    params.cancel_url = Some(CANCEL_URL);
    params.customer_email = Some(&quote.email);

    params.line_items = Some(vec![CreateCheckoutSessionLineItems {
        quantity: Some(1),
        price_data: Some(CreateCheckoutSessionLineItemsPriceData {
            currency: Currency::USD,
            unit_amount: Some(quote.amount_cents),
            product_data: Some(CreateCheckoutSessionLineItemsPriceDataProductData {
                name: PRODUCT_NAME.to_string(),
                metadata: Some(vehicle.clone()),
                ..Default::default()
            }),
            ..Default::default()
        }),
        ..Default::default()
    }]);

    let mut session_metadata = vehicle;
    session_metadata.insert("email".to_string(), quote.email.clone());
    session_metadata.insert("address".to_string(), quote.address.clone());
    params.metadata = Some(session_metadata);

    params
}
