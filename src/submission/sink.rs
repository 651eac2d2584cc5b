//! Trait abstraction for the submission boundary to enable mocking in tests

use crate::state::PatientRecord;
use anyhow::Result;
use async_trait::async_trait;

/// Port that receives a validated patient record.
///
/// The form controller never talks to a transport or store directly;
/// whatever eventually takes the record (an API client, a persistence
/// layer) implements this trait.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SubmissionSink: Send + Sync {
    /// Hand off a validated record, returning the submission id the sink
    /// assigned to it
    async fn submit(&mut self, record: &PatientRecord) -> Result<String>;
}
