//! Gateway Error Types

use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, GatewayError>;

/// Errors from the hosted-checkout gateway.
#[derive(Error, Debug)]
pub enum GatewayError {
    /// Gateway credentials missing or malformed
    #[error("gateway configuration error: {0}")]
    Config(String),

    /// The gateway answered the session request with an error
    #[error("gateway rejected session request ({error_type}): {message}")]
    Rejected {
        message: String,
        error_type: String,
        code: Option<String>,
        http_status: u16,
    },

    /// Transport-level failure talking to the gateway
    #[error("gateway transport error: {0}")]
    Transport(String),

    /// The gateway did not answer within the deadline
    #[error("gateway request timed out")]
    Timeout,
}

impl GatewayError {
    /// Detail string carried in error response bodies.
    ///
    /// Rejections surface the gateway's own message; everything else falls
    /// back to the display form.
    pub fn detail(&self) -> String {
        match self {
            Self::Rejected { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }
}

impl From<stripe::StripeError> for GatewayError {
    fn from(err: stripe::StripeError) -> Self {
        match err {
            stripe::StripeError::Stripe(req) => Self::Rejected {
                message: req
                    .message
                    .unwrap_or_else(|| "session request rejected".to_string()),
                error_type: format!("{:?}", req.error_type),
                code: req.code.map(|code| format!("{:?}", code)),
                http_status: req.http_status,
            },
            stripe::StripeError::Timeout => Self::Timeout,
            other => Self::Transport(other.to_string()),
        }
    }
}
