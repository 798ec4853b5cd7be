// Polarity estimator trait — the swap-ready abstraction.
//
// The default implementation is a lexicon/pattern estimator that needs no
// training data. Anything that maps a text to a valence in [-1, 1]
// deterministically can stand in for it.

/// Trait for estimating the sentiment polarity of a single text.
pub trait PolarityEstimator: Send + Sync {
    /// Polarity of `text` in the closed range [-1.0, 1.0].
    fn polarity(&self, text: &str) -> f64;

    /// Score several texts, returning results in the same order.
    fn polarity_batch(&self, texts: &[String]) -> Vec<f64> {
        texts.iter().map(|t| self.polarity(t)).collect()
    }
}
