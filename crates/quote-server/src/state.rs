//! Application State

use std::sync::Arc;

use quote_payments::PaymentGateway;
use quote_sheets::RecordSink;

use crate::config::ServerConfig;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Configuration snapshot taken at startup
    pub config: Arc<ServerConfig>,

    /// Payment gateway (None when the secret key is not configured)
    pub gateway: Option<Arc<dyn PaymentGateway>>,

    /// Side-record sink; always present, possibly the disabled one
    pub recorder: Arc<dyn RecordSink>,
}
