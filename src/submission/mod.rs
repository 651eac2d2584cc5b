//! Submission boundary for completed intake forms

mod log_sink;
mod sink;

pub use log_sink::LogSink;
pub use sink::SubmissionSink;

#[cfg(test)]
pub use sink::MockSubmissionSink;
