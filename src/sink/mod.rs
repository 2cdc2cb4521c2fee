//! Report sinks: where completed problem reports end up.
//!
//! - `sheets`: appends rows to a Google spreadsheet
//! - `memory`: keeps reports in memory or only logs them
//! - `resilient`: timeout, bounded retries and circuit breaker around another sink

pub mod memory;
pub mod resilient;
pub mod sheets;

use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

use crate::config::BotConfig;
use crate::report::ReportRecord;

pub use memory::{InMemorySink, LogSink};
pub use resilient::ResilientSink;
pub use sheets::SheetsSink;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SinkError {
    #[error("Report sink timed out after {0}s")]
    Timeout(u64),
    #[error("Transport error: {0}")]
    Transport(String),
    #[error("Report sink rejected the row with status {status}: {body}")]
    Rejected { status: u16, body: String },
    #[error("Report sink refused the credentials (status {0}), refresh SHEETS_ACCESS_TOKEN")]
    Unauthorized(u16),
    #[error("Circuit breaker open, report sink temporarily disabled")]
    CircuitOpen,
    #[error("Report sink unavailable: {0}")]
    Unavailable(String),
}

impl SinkError {
    /// Whether retrying the same call may succeed
    pub fn is_transient(&self) -> bool {
        match self {
            SinkError::Timeout(_) | SinkError::Transport(_) | SinkError::Unavailable(_) => true,
            SinkError::Rejected { status, .. } => *status == 429 || *status >= 500,
            SinkError::Unauthorized(_) | SinkError::CircuitOpen => false,
        }
    }
}

/// Append-only destination for completed reports
#[async_trait]
pub trait ReportSink: Send + Sync {
    async fn append(&self, record: &ReportRecord) -> Result<(), SinkError>;

    fn name(&self) -> &'static str;
}

/// Pick the sink described by the configuration
pub fn build_sink(config: &BotConfig) -> Result<Arc<dyn ReportSink>, SinkError> {
    match &config.sheets {
        Some(sheets) => {
            info!(
                spreadsheet_id = %sheets.spreadsheet_id,
                range = %sheets.range,
                "Reports will be appended to Google Sheets"
            );
            let sink = SheetsSink::new(sheets.clone())?;
            Ok(Arc::new(ResilientSink::new(sink, config.recovery.clone())))
        }
        None => {
            warn!("SHEETS_SPREADSHEET_ID not set, reports will only be logged");
            Ok(Arc::new(LogSink))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transient_errors() {
        assert!(SinkError::Timeout(10).is_transient());
        assert!(SinkError::Transport("reset".into()).is_transient());
        assert!(SinkError::Rejected { status: 503, body: String::new() }.is_transient());
        assert!(SinkError::Rejected { status: 429, body: String::new() }.is_transient());
        assert!(!SinkError::Rejected { status: 403, body: String::new() }.is_transient());
        assert!(!SinkError::Unauthorized(401).is_transient());
        assert!(!SinkError::CircuitOpen.is_transient());
    }
}
