//! # quote-sheets
//!
//! Spreadsheet side records for the quote-checkout service.
//!
//! After every checkout session is created, one tracking row goes to a
//! Google Sheet. The write is strictly best-effort: the service decides at
//! startup whether credentials exist, and a failed append is logged and
//! forgotten, never surfaced to the submitter.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use quote_sheets::{RecordSink, SheetsAppender, SheetsConfig};
//!
//! let sink = match SheetsConfig::from_env() {
//!     Some(config) => SheetsAppender::new(config)?,
//!     None => /* fall back to DisabledSink */,
//! };
//! sink.append_record(row).await?;
//! ```
//!
//! [`MemorySink`] stands in for the live sheet in tests.

mod credentials;
mod error;
mod sheets;
mod sink;

pub use credentials::{DEFAULT_TOKEN_URI, SheetsConfig, unescape_private_key};
pub use error::{Result, SideRecordError};
pub use sheets::SheetsAppender;
pub use sink::{DisabledSink, MemorySink, RecordSink, SheetRow, test_row};
