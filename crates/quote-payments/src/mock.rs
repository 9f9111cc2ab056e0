//! Mock Payment Gateway
//!
//! For tests and local runs without gateway credentials. Fabricates
//! session ids and counts how many session requests it received.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use quote_core::QuoteSubmission;

use crate::error::{GatewayError, Result};
use crate::gateway::{PaymentGateway, PaymentSession};

/// In-memory gateway that never talks to the network.
pub struct MockGateway {
    calls: AtomicUsize,
    fail: bool,
}

impl Default for MockGateway {
    fn default() -> Self {
        Self::new()
    }
}

impl MockGateway {
    pub fn new() -> Self {
        Self {
            calls: AtomicUsize::new(0),
            fail: false,
        }
    }

    /// A gateway that rejects every session request.
    pub fn failing() -> Self {
        Self {
            calls: AtomicUsize::new(0),
            fail: true,
        }
    }

    /// Number of session requests received so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PaymentGateway for MockGateway {
    async fn create_session(&self, _quote: &QuoteSubmission) -> Result<PaymentSession> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        if self.fail {
            return Err(GatewayError::Rejected {
                message: "mock gateway rejection".to_string(),
                error_type: "Api".to_string(),
                code: None,
                http_status: 500,
            });
        }
        Ok(PaymentSession {
            id: format!("cs_test_mock_{:05}", call),
        })
    }

    fn name(&self) -> &str {
        "MockGateway"
    }
}
