// The analysis pipeline: CSV bytes in, one AnalysisResult out.
//
// Stages run strictly in order, each consuming the previous one's output:
//   load -> sentiment -> TF-IDF -> topics -> co-occurrence graph -> images
// The first failing stage ends the run and its error is returned as-is;
// nothing partial escapes. Every run builds its own models, RNGs and
// buffers, so concurrent runs share no state.

use std::time::Instant;

use tracing::{info, info_span};

use crate::config::AnalysisConfig;
use crate::deadline::Deadline;
use crate::error::AnalysisError;
use crate::graph::centrality::{degree_centrality, rank};
use crate::graph::cooccurrence::alphabetic_tokens;
use crate::graph::layout::SpringLayout;
use crate::graph::CooccurrenceGraph;
use crate::records::load_records;
use crate::render::network::NetworkImage;
use crate::render::to_base64_png;
use crate::render::wordcloud::WordCloud;
use crate::sentiment::lexicon::LexiconPolarity;
use crate::sentiment::score_records;
use crate::sentiment::traits::PolarityEstimator;
use crate::topics::lda::{LatentDirichletAllocation, LdaParams};
use crate::topics::tfidf::TfIdfExtractor;

use super::result::AnalysisResult;

/// Runs the pipeline with a fixed configuration and polarity estimator.
pub struct Analyzer {
    config: AnalysisConfig,
    estimator: Box<dyn PolarityEstimator>,
}

impl Analyzer {
    /// Analyzer with the built-in lexicon polarity estimator.
    pub fn new(config: AnalysisConfig) -> Self {
        Self::with_estimator(config, Box::new(LexiconPolarity::default()))
    }

    pub fn with_estimator(config: AnalysisConfig, estimator: Box<dyn PolarityEstimator>) -> Self {
        Self { config, estimator }
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Parse a CSV byte stream and analyze its text column.
    pub fn analyze(&self, bytes: &[u8]) -> Result<AnalysisResult, AnalysisError> {
        let deadline = Deadline::start(self.config.deadline);
        let records = load_records(bytes)?;
        self.run(&records, &deadline)
    }

    /// Analyze records that were already extracted.
    pub fn analyze_records(&self, records: &[String]) -> Result<AnalysisResult, AnalysisError> {
        self.run(records, &Deadline::start(self.config.deadline))
    }

    fn run(&self, records: &[String], deadline: &Deadline) -> Result<AnalysisResult, AnalysisError> {
        let cfg = &self.config;
        let span = info_span!("analysis", records = records.len());
        let _guard = span.enter();

        deadline.check("sentiment")?;
        let sentiment = score_records(self.estimator.as_ref(), records);

        deadline.check("tf-idf")?;
        let matrix = TfIdfExtractor::new(cfg.max_vocabulary).fit_transform(records)?;
        let tfidf = matrix.top_terms(cfg.top_terms);

        deadline.check("topic model")?;
        let params = LdaParams {
            n_components: cfg.topic_count,
            max_iter: cfg.topic_iterations,
            seed: cfg.topic_seed,
            ..LdaParams::default()
        };
        let lda = LatentDirichletAllocation::fit(&params, &matrix, deadline)?;
        let topics = lda.top_terms(&matrix.vocabulary, cfg.terms_per_topic);

        deadline.check("co-occurrence graph")?;
        let token_lists: Vec<Vec<String>> = records.iter().map(|r| alphabetic_tokens(r)).collect();
        let graph = CooccurrenceGraph::from_token_lists(
            &token_lists,
            cfg.graph_nodes,
            cfg.max_tokens_per_record,
            deadline,
        )?;
        let centralities = rank(degree_centrality(&graph), cfg.top_centralities);

        deadline.check("word cloud")?;
        let started = Instant::now();
        let all_tokens: Vec<String> = token_lists.into_iter().flatten().collect();
        let cloud = WordCloud::new(
            cfg.wordcloud_width,
            cfg.wordcloud_height,
            cfg.wordcloud_max_words,
            cfg.layout_seed,
        );
        let wordcloud = to_base64_png(&cloud.render(&all_tokens))?;
        info!(
            tokens = all_tokens.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Rendered word cloud"
        );

        deadline.check("graph image")?;
        let started = Instant::now();
        let painter = NetworkImage {
            width: cfg.graph_image_width,
            height: cfg.graph_image_height,
            layout: SpringLayout {
                iterations: cfg.layout_iterations,
                seed: cfg.layout_seed,
                ..SpringLayout::default()
            },
            ..NetworkImage::default()
        };
        let cooccurrence_img = to_base64_png(&painter.render(&graph))?;
        info!(
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Rendered co-occurrence image"
        );

        info!(
            elapsed_ms = deadline.elapsed().as_millis() as u64,
            vocabulary = matrix.vocabulary.len(),
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            "Analysis complete"
        );

        Ok(AnalysisResult {
            sentiments: sentiment.scores,
            sentiment_summary: sentiment.summary,
            topics,
            tfidf,
            network: graph.network_data(),
            centralities,
            wordcloud,
            cooccurrence_img,
        })
    }
}

/// Analyze a CSV byte stream with `config` and the default estimator.
pub fn analyze(bytes: &[u8], config: &AnalysisConfig) -> Result<AnalysisResult, AnalysisError> {
    Analyzer::new(config.clone()).analyze(bytes)
}

/// Analyze already extracted records with `config` and the default estimator.
pub fn analyze_records(
    records: &[String],
    config: &AnalysisConfig,
) -> Result<AnalysisResult, AnalysisError> {
    Analyzer::new(config.clone()).analyze_records(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct AlwaysNegative;

    impl PolarityEstimator for AlwaysNegative {
        fn polarity(&self, _text: &str) -> f64 {
            -0.9
        }
    }

    #[test]
    fn test_custom_estimator_is_used() {
        let analyzer =
            Analyzer::with_estimator(AnalysisConfig::default(), Box::new(AlwaysNegative));
        let records = vec!["sunny meadow".to_string(), "quiet river".to_string()];
        let result = analyzer.analyze_records(&records).unwrap();
        assert_eq!(result.sentiments, vec![-0.9, -0.9]);
        assert_eq!(result.sentiment_summary.negative, 2);
    }

    #[test]
    fn test_load_failure_short_circuits() {
        let err = analyze(b"author\nbob\n", &AnalysisConfig::default()).unwrap_err();
        assert!(matches!(err, AnalysisError::NoTextColumnFound));
    }

    #[test]
    fn test_expired_deadline_aborts() {
        let config = AnalysisConfig {
            deadline: std::time::Duration::ZERO,
            ..AnalysisConfig::default()
        };
        let err = analyze(b"text\nhello world\n", &config).unwrap_err();
        assert!(matches!(err, AnalysisError::DeadlineExceeded { .. }));
    }
}
