//! # quote-core
//!
//! Domain logic for the quote checkout service: submission validation,
//! address region inference, policy identifier generation, and money
//! formatting.
//!
//! Everything in this crate is a pure function or a plain type: no I/O,
//! no async. The adapters (`quote-payments`, `quote-sheets`) and the server
//! build on top of it.

pub mod error;
pub mod policy;
pub mod region;
pub mod submission;

pub use error::ValidationError;
pub use policy::generate_policy_id;
pub use region::extract_region;
pub use submission::{MIN_AMOUNT_CENTS, QuoteSubmission, SubmissionForm, format_monthly_amount};
