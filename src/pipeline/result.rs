// The aggregate output of one analysis run.
//
// Only plain numbers and strings live here, so the whole thing serializes
// straight to the JSON body callers expect.

use serde::{Deserialize, Serialize};

use crate::graph::NetworkData;
use crate::sentiment::SentimentSummary;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Polarity per record, in record order
    pub sentiments: Vec<f64>,
    pub sentiment_summary: SentimentSummary,
    /// Top terms per topic, ascending weight within each topic
    pub topics: Vec<Vec<String>>,
    /// (term, aggregate TF-IDF weight), highest first
    pub tfidf: Vec<(String, f64)>,
    pub network: NetworkData,
    /// (token, degree centrality), highest first
    pub centralities: Vec<(String, f64)>,
    /// Base64 PNG
    pub wordcloud: String,
    /// Base64 PNG
    pub cooccurrence_img: String,
}
