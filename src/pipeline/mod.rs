// Analysis pipeline — stage sequencing and the result it produces.

pub mod analyze;
pub mod result;

pub use analyze::{analyze, analyze_records, Analyzer};
pub use result::AnalysisResult;
