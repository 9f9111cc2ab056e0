//! # quote-payments
//!
//! Hosted checkout integration for the quote-checkout service.
//!
//! The service follows the "Stripe Checkout (Hosted)" approach: the quote
//! page posts the form, the server creates a checkout session, and the
//! browser redirects to Stripe's hosted page with the session id. Stripe
//! handles the card form and PCI scope entirely.
//!
//! ```text
//! ┌─────────────┐     ┌─────────────────┐     ┌─────────────┐
//! │ Quote Page  │────▶│  Stripe Hosted  │────▶│ success.html│
//! │ (form POST) │     │  Checkout Page  │     │ cancel.html │
//! └─────────────┘     └─────────────────┘     └─────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use quote_payments::{PaymentGateway, StripeGateway};
//!
//! let gateway = StripeGateway::from_env()?;
//! let session = gateway.create_session(&quote).await?;
//! // Respond with session.id; the browser redirects through Stripe.js.
//! ```
//!
//! [`MockGateway`] stands in for Stripe in tests and credential-less runs.

mod error;
mod gateway;
mod mock;

pub use error::{GatewayError, Result};
pub use gateway::{
    CANCEL_URL, PRODUCT_NAME, PaymentGateway, PaymentSession, SUCCESS_URL, StripeGateway,
};
pub use mock::MockGateway;
