use async_trait::async_trait;
use std::sync::{Mutex, PoisonError};
use tracing::info;

use super::{ReportSink, SinkError};
use crate::report::ReportRecord;

/// Keeps every appended report in memory
#[derive(Debug, Default)]
pub struct InMemorySink {
    records: Mutex<Vec<ReportRecord>>,
}

impl InMemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reports appended so far, oldest first
    pub fn records(&self) -> Vec<ReportRecord> {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl ReportSink for InMemorySink {
    async fn append(&self, record: &ReportRecord) -> Result<(), SinkError> {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(record.clone());
        Ok(())
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}

/// Writes reports to the log only
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

#[async_trait]
impl ReportSink for LogSink {
    async fn append(&self, record: &ReportRecord) -> Result<(), SinkError> {
        info!(
            location = %record.location,
            sub_location = record.sub_location.as_str(),
            reporter = %record.reporter.display(),
            row = ?record.row(),
            "Problem report received"
        );
        Ok(())
    }

    fn name(&self) -> &'static str {
        "log"
    }
}
