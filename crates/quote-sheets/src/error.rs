//! Side-Record Error Types

use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, SideRecordError>;

/// Errors from the spreadsheet side-record writer.
///
/// These are logged and swallowed on the submission path; a failed side
/// record never fails a checkout.
#[derive(Error, Debug)]
pub enum SideRecordError {
    /// Signing the service-account assertion failed
    #[error("assertion signing failed: {0}")]
    Signing(#[from] jsonwebtoken::errors::Error),

    /// The token endpoint answered with an error status
    #[error("token exchange failed with status {status}: {body}")]
    TokenExchange { status: u16, body: String },

    /// The append endpoint answered with an error status
    #[error("append failed with status {status}: {body}")]
    Append { status: u16, body: String },

    /// Transport-level HTTP failure
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
}
