// Sentiment scoring — per-record polarity and the three-way label summary.
//
// The PolarityEstimator trait defines the interface; LexiconPolarity is the
// built-in implementation. Labels are a fixed bucketing of the score.

pub mod lexicon;
pub mod traits;

use serde::{Deserialize, Serialize};
use tracing::info;

use self::traits::PolarityEstimator;

/// Scores strictly above this are positive, strictly below its negation negative.
pub const NEUTRAL_BAND: f64 = 0.05;

/// Three-way sentiment bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SentimentLabel {
    Positive,
    Negative,
    Neutral,
}

impl SentimentLabel {
    /// Bucket a polarity score. The band edges themselves are neutral.
    pub fn from_score(score: f64) -> Self {
        match score {
            s if s > NEUTRAL_BAND => SentimentLabel::Positive,
            s if s < -NEUTRAL_BAND => SentimentLabel::Negative,
            _ => SentimentLabel::Neutral,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SentimentLabel::Positive => "positive",
            SentimentLabel::Negative => "negative",
            SentimentLabel::Neutral => "neutral",
        }
    }
}

impl std::fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Label counts. All three labels are always present.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentimentSummary {
    pub positive: usize,
    pub negative: usize,
    pub neutral: usize,
}

impl SentimentSummary {
    pub fn record(&mut self, label: SentimentLabel) {
        match label {
            SentimentLabel::Positive => self.positive += 1,
            SentimentLabel::Negative => self.negative += 1,
            SentimentLabel::Neutral => self.neutral += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.positive + self.negative + self.neutral
    }
}

/// Output of the sentiment stage.
#[derive(Debug, Clone, Default)]
pub struct SentimentReport {
    /// One score per record, in record order
    pub scores: Vec<f64>,
    pub summary: SentimentSummary,
}

/// Score every record and count the labels.
pub fn score_records(estimator: &dyn PolarityEstimator, records: &[String]) -> SentimentReport {
    let scores = estimator.polarity_batch(records);

    let mut summary = SentimentSummary::default();
    for &score in &scores {
        summary.record(SentimentLabel::from_score(score));
    }

    info!(
        records = scores.len(),
        positive = summary.positive,
        negative = summary.negative,
        neutral = summary.neutral,
        "Scored sentiment"
    );

    SentimentReport { scores, summary }
}
