//! Record Sink
//!
//! The append target for side-record rows. The server holds one sink for
//! its lifetime behind `Arc<dyn RecordSink>`; which implementation it gets
//! is decided once at startup from the available credentials.

use std::sync::RwLock;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use crate::error::{Result, SideRecordError};

/// One tracking row: name, email, address, year, make/model, VIN,
/// formatted amount, policy id.
pub type SheetRow = [String; 8];

/// Fixed row appended by the sheet connectivity check endpoint.
pub fn test_row() -> SheetRow {
    [
        "TEST ROW".to_string(),
        "test@example.com".to_string(),
        "123 Test St, NJ 07102".to_string(),
        "2025".to_string(),
        "Test Car".to_string(),
        "TESTVIN1234567890".to_string(),
        "$99.00/mo".to_string(),
        "IH-TEST-US-ABCDE".to_string(),
    ]
}

/// Destination for side-record rows.
#[async_trait]
pub trait RecordSink: Send + Sync {
    /// Append one row. Callers treat failure as loggable, never fatal.
    async fn append_record(&self, row: SheetRow) -> Result<()>;

    /// Sink name for logs.
    fn name(&self) -> &str;
}

/// Sink used when spreadsheet credentials are absent. Accepts and drops
/// every row.
pub struct DisabledSink;

#[async_trait]
impl RecordSink for DisabledSink {
    async fn append_record(&self, _row: SheetRow) -> Result<()> {
        tracing::debug!("side-record sink disabled, row dropped");
        Ok(())
    }

    fn name(&self) -> &str {
        "Disabled"
    }
}

/// In-memory sink (for development and tests).
pub struct MemorySink {
    rows: RwLock<Vec<SheetRow>>,
    calls: AtomicUsize,
    fail: bool,
}

impl Default for MemorySink {
    fn default() -> Self {
        Self::new()
    }
}

impl MemorySink {
    pub fn new() -> Self {
        Self {
            rows: RwLock::new(Vec::new()),
            calls: AtomicUsize::new(0),
            fail: false,
        }
    }

    /// A sink whose every append fails, for exercising the soft-failure
    /// path.
    pub fn failing() -> Self {
        Self {
            rows: RwLock::new(Vec::new()),
            calls: AtomicUsize::new(0),
            fail: true,
        }
    }

    /// Rows appended so far.
    pub fn rows(&self) -> Vec<SheetRow> {
        self.rows.read().unwrap().clone()
    }

    /// Number of append calls received, including failed ones.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RecordSink for MemorySink {
    async fn append_record(&self, row: SheetRow) -> Result<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(SideRecordError::Append {
                status: 500,
                body: "memory sink configured to fail".to_string(),
            });
        }
        self.rows.write().unwrap().push(row);
        Ok(())
    }

    fn name(&self) -> &str {
        "Memory"
    }
}
