// Murmur: comment corpus analytics
//
// This is the library root. Each module corresponds to one stage of the
// analysis pipeline, plus the plumbing (config, errors, deadline) the
// stages share.

pub mod config;
pub mod deadline;
pub mod error;
pub mod graph;
pub mod output;
pub mod pipeline;
pub mod records;
pub mod render;
pub mod sentiment;
pub mod topics;

#[cfg(feature = "web")]
pub mod web;

pub use config::AnalysisConfig;
pub use error::{AnalysisError, ErrorEnvelope};
pub use pipeline::{analyze, analyze_records, AnalysisResult, Analyzer};
