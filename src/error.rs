// Analysis failures — the single error channel of the pipeline.
//
// Every stage returns `AnalysisError`. The orchestrator stops at the first
// one and hands it to the caller unchanged; the outer layers (CLI, HTTP)
// turn it into an `ErrorEnvelope` for display or serialization.

use std::time::Duration;

use serde::Serialize;
use thiserror::Error;

/// Everything that can stop an analysis run.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// The table has no column named text/comment/body/message.
    #[error("no valid text column found (expected one of: text, comment, body, message)")]
    NoTextColumnFound,

    /// Nothing left to weight after tokenisation and stop-word removal.
    #[error("empty vocabulary; the records may contain only stop words")]
    EmptyCorpus,

    /// The byte stream could not be read as a CSV table.
    #[error("malformed input: {0}")]
    MalformedInput(String),

    /// An image could not be encoded.
    #[error("rendering failed: {0}")]
    RenderingFailure(String),

    /// The per-invocation deadline expired while `stage` was running.
    #[error("deadline of {limit:?} exceeded during {stage}")]
    DeadlineExceeded { stage: &'static str, limit: Duration },
}

impl AnalysisError {
    /// Stable machine-readable name of the failure kind.
    pub fn kind(&self) -> &'static str {
        match self {
            AnalysisError::NoTextColumnFound => "NoTextColumnFound",
            AnalysisError::EmptyCorpus => "EmptyCorpus",
            AnalysisError::MalformedInput(_) => "MalformedInput",
            AnalysisError::RenderingFailure(_) => "RenderingFailure",
            AnalysisError::DeadlineExceeded { .. } => "DeadlineExceeded",
        }
    }

    /// Whether the failure was caused by the caller's data rather than the run itself.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            AnalysisError::NoTextColumnFound
                | AnalysisError::EmptyCorpus
                | AnalysisError::MalformedInput(_)
        )
    }
}

impl From<csv::Error> for AnalysisError {
    fn from(e: csv::Error) -> Self {
        AnalysisError::MalformedInput(e.to_string())
    }
}

impl From<image::ImageError> for AnalysisError {
    fn from(e: image::ImageError) -> Self {
        AnalysisError::RenderingFailure(e.to_string())
    }
}

/// The error object surfaced to callers: one kind, one message, nothing partial.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorEnvelope {
    pub kind: String,
    #[serde(rename = "error")]
    pub message: String,
}

impl From<&AnalysisError> for ErrorEnvelope {
    fn from(e: &AnalysisError) -> Self {
        Self {
            kind: e.kind().to_string(),
            message: e.to_string(),
        }
    }
}
