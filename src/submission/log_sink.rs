//! Diagnostic sink that records submissions in the log

use super::SubmissionSink;
use crate::state::PatientRecord;
use anyhow::Result;
use async_trait::async_trait;
use uuid::Uuid;

/// Default sink: assigns a submission id and emits the serialized payload
/// as a structured log line. Stands in for a real transport.
#[derive(Debug, Default)]
pub struct LogSink;

#[async_trait]
impl SubmissionSink for LogSink {
    async fn submit(&mut self, record: &PatientRecord) -> Result<String> {
        let id = Uuid::new_v4().to_string();
        let payload = serde_json::to_string(record)?;
        tracing::info!(id = %id, %payload, "patient record submitted");
        Ok(id)
    }
}
