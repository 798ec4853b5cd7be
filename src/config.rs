use std::env;
use std::time::Duration;

use anyhow::{Context, Result};

/// Tunables for one analysis run.
///
/// Passed explicitly into the pipeline; nothing in the library reads the
/// environment. The defaults give five topics of ten terms, a 1000-term
/// vocabulary, a 100-node graph and a 120 s deadline.
#[derive(Debug, Clone)]
pub struct AnalysisConfig {
    /// Upper bound on the TF-IDF vocabulary
    pub max_vocabulary: usize,
    /// How many (term, score) pairs to report from TF-IDF
    pub top_terms: usize,
    /// Number of LDA components
    pub topic_count: usize,
    /// Terms reported per topic
    pub terms_per_topic: usize,
    /// Batch EM iterations for LDA
    pub topic_iterations: usize,
    /// Seed for the LDA initialisation
    pub topic_seed: u64,
    /// Size of the co-occurrence node set (most frequent tokens)
    pub graph_nodes: usize,
    /// How many nodes to report in the centrality ranking
    pub top_centralities: usize,
    /// Optional cap on distinct node tokens considered per record.
    /// `None` keeps every token, so edge weights are exact record counts.
    pub max_tokens_per_record: Option<usize>,
    /// Seed for the spring layout and word-cloud placement
    pub layout_seed: u64,
    /// Spring layout iterations
    pub layout_iterations: usize,
    pub wordcloud_width: u32,
    pub wordcloud_height: u32,
    /// Distinct words drawn in the word cloud
    pub wordcloud_max_words: usize,
    pub graph_image_width: u32,
    pub graph_image_height: u32,
    /// Wall-clock budget for a whole invocation
    pub deadline: Duration,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            max_vocabulary: 1000,
            top_terms: 20,
            topic_count: 5,
            terms_per_topic: 10,
            topic_iterations: 10,
            topic_seed: 42,
            graph_nodes: 100,
            top_centralities: 10,
            max_tokens_per_record: None,
            layout_seed: 42,
            layout_iterations: 50,
            wordcloud_width: 800,
            wordcloud_height: 400,
            wordcloud_max_words: 200,
            graph_image_width: 1000,
            graph_image_height: 800,
            deadline: Duration::from_secs(120),
        }
    }
}

/// Process-level configuration loaded from environment variables.
///
/// The .env file is loaded automatically at startup via dotenvy.
pub struct Config {
    /// Per-invocation deadline in seconds (MURMUR_DEADLINE_SECS)
    pub deadline_secs: u64,
    /// Optional per-record token cap for the graph builder (MURMUR_MAX_TOKENS_PER_RECORD)
    pub max_tokens_per_record: Option<usize>,
    /// Address the web server binds to (MURMUR_BIND)
    pub bind: String,
    /// Port for the web server (PORT)
    pub port: u16,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Every value has a default; only malformed numbers are an error.
    pub fn load() -> Result<Self> {
        let deadline_secs = match env::var("MURMUR_DEADLINE_SECS") {
            Ok(v) => v
                .parse()
                .with_context(|| format!("MURMUR_DEADLINE_SECS is not a number: {v}"))?,
            Err(_) => AnalysisConfig::default().deadline.as_secs(),
        };

        let max_tokens_per_record = match env::var("MURMUR_MAX_TOKENS_PER_RECORD") {
            Ok(v) if !v.is_empty() => Some(v.parse().with_context(|| {
                format!("MURMUR_MAX_TOKENS_PER_RECORD is not a number: {v}")
            })?),
            _ => None,
        };

        let port = match env::var("PORT") {
            Ok(v) => v
                .parse()
                .with_context(|| format!("PORT is not a valid port: {v}"))?,
            Err(_) => 10000,
        };

        Ok(Self {
            deadline_secs,
            max_tokens_per_record,
            bind: env::var("MURMUR_BIND").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port,
        })
    }

    /// Build the per-run analysis settings from this configuration.
    pub fn analysis(&self) -> AnalysisConfig {
        AnalysisConfig {
            deadline: Duration::from_secs(self.deadline_secs),
            max_tokens_per_record: self.max_tokens_per_record,
            ..AnalysisConfig::default()
        }
    }
}
