// Latent Dirichlet allocation, batch variational Bayes.
//
// Fits a fixed number of topics over the TF-IDF matrix (the weights stand in
// for counts). Each EM iteration runs a per-record variational update of the
// record's topic mixture, accumulates sufficient statistics, then replaces
// the topic-word parameters with prior + statistics.
//
// All initial values come from Gamma(100, 0.01) draws on a seeded ChaCha
// generator, so identical input always gives identical topics.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rand_distr::{Distribution, Gamma};
use tracing::{debug, info};

use super::tfidf::{TfIdfMatrix, Vocabulary};
use crate::deadline::Deadline;
use crate::error::AnalysisError;

/// Added to normalisers to keep divisions finite.
const EPS: f64 = f64::EPSILON;

/// Fitting parameters. Priors default to 1 / n_components.
#[derive(Debug, Clone)]
pub struct LdaParams {
    pub n_components: usize,
    pub doc_topic_prior: Option<f64>,
    pub topic_word_prior: Option<f64>,
    pub max_iter: usize,
    pub max_doc_update_iter: usize,
    pub mean_change_tol: f64,
    pub seed: u64,
}

impl Default for LdaParams {
    fn default() -> Self {
        Self {
            n_components: 5,
            doc_topic_prior: None,
            topic_word_prior: None,
            max_iter: 10,
            max_doc_update_iter: 100,
            mean_change_tol: 1e-3,
            seed: 42,
        }
    }
}

/// A fitted topic model: one unnormalised weight per (topic, term).
#[derive(Debug, Clone)]
pub struct LatentDirichletAllocation {
    /// n_components x vocabulary
    components: Vec<Vec<f64>>,
}

impl LatentDirichletAllocation {
    /// Fit the model over `matrix`.
    ///
    /// Refuses an empty vocabulary with `EmptyCorpus`, so the error from the
    /// TF-IDF stage reaches the caller unchanged.
    pub fn fit(
        params: &LdaParams,
        matrix: &TfIdfMatrix,
        deadline: &Deadline,
    ) -> Result<Self, AnalysisError> {
        let k = params.n_components;
        let v = matrix.vocabulary.len();
        if v == 0 || k == 0 {
            return Err(AnalysisError::EmptyCorpus);
        }

        let alpha = params.doc_topic_prior.unwrap_or(1.0 / k as f64);
        let eta = params.topic_word_prior.unwrap_or(1.0 / k as f64);

        let mut rng = ChaCha8Rng::seed_from_u64(params.seed);
        let init = Gamma::new(100.0, 0.01).expect("constant gamma parameters are valid");

        let mut components: Vec<Vec<f64>> = (0..k)
            .map(|_| (0..v).map(|_| init.sample(&mut rng)).collect())
            .collect();
        let mut exp_topic_word = exp_dirichlet_expectation_rows(&components);

        let rows = matrix.rows();
        for iteration in 0..params.max_iter {
            deadline.check("topic model")?;

            // Fresh random start for every record's topic mixture
            let doc_init: Vec<Vec<f64>> = (0..rows.len())
                .map(|_| (0..k).map(|_| init.sample(&mut rng)).collect())
                .collect();

            let mut sstats = vec![vec![0.0; v]; k];
            let mut inner_total = 0usize;

            for (row, start) in rows.iter().zip(doc_init) {
                if row.is_empty() {
                    continue;
                }
                let ids: Vec<usize> = row.iter().map(|&(i, _)| i).collect();
                let cnts: Vec<f64> = row.iter().map(|&(_, w)| w).collect();
                let topic_word_d: Vec<Vec<f64>> = exp_topic_word
                    .iter()
                    .map(|t| ids.iter().map(|&i| t[i]).collect())
                    .collect();

                let mut doc_topic = start;
                let mut exp_doc_topic = exp_dirichlet_expectation(&doc_topic);

                for _ in 0..params.max_doc_update_iter {
                    inner_total += 1;
                    let last = doc_topic.clone();
                    let ratio = count_ratio(&cnts, &exp_doc_topic, &topic_word_d);

                    for t in 0..k {
                        let dot: f64 = ratio
                            .iter()
                            .zip(&topic_word_d[t])
                            .map(|(r, w)| r * w)
                            .sum();
                        doc_topic[t] = exp_doc_topic[t] * dot + alpha;
                    }
                    exp_doc_topic = exp_dirichlet_expectation(&doc_topic);

                    if mean_change(&last, &doc_topic) < params.mean_change_tol {
                        break;
                    }
                }

                let ratio = count_ratio(&cnts, &exp_doc_topic, &topic_word_d);
                for t in 0..k {
                    for (j, &id) in ids.iter().enumerate() {
                        sstats[t][id] += exp_doc_topic[t] * ratio[j];
                    }
                }
            }

            // M-step
            for t in 0..k {
                for w in 0..v {
                    components[t][w] = eta + sstats[t][w] * exp_topic_word[t][w];
                }
            }
            exp_topic_word = exp_dirichlet_expectation_rows(&components);

            debug!(iteration, inner_updates = inner_total, "LDA EM iteration");
        }

        info!(
            topics = k,
            vocabulary = v,
            records = rows.len(),
            iterations = params.max_iter,
            "Fitted topic model"
        );

        Ok(Self { components })
    }

    /// Topic-word weights, one row per topic.
    pub fn components(&self) -> &[Vec<f64>] {
        &self.components
    }

    /// The `n` heaviest terms of each topic.
    ///
    /// Terms come out in ascending weight order (the dominant term is last):
    /// the tail of an ascending sort, not reversed. Ties fall back to
    /// vocabulary index.
    pub fn top_terms(&self, vocabulary: &Vocabulary, n: usize) -> Vec<Vec<String>> {
        self.components
            .iter()
            .map(|weights| {
                let mut order: Vec<usize> = (0..weights.len()).collect();
                order.sort_by(|&a, &b| weights[a].total_cmp(&weights[b]).then(a.cmp(&b)));
                let start = order.len().saturating_sub(n);
                order[start..]
                    .iter()
                    .map(|&i| vocabulary.term(i).to_string())
                    .collect()
            })
            .collect()
    }
}

/// cnts[j] / (sum_t exp_doc_topic[t] * topic_word_d[t][j] + EPS)
fn count_ratio(cnts: &[f64], exp_doc_topic: &[f64], topic_word_d: &[Vec<f64>]) -> Vec<f64> {
    cnts.iter()
        .enumerate()
        .map(|(j, c)| {
            let norm: f64 = exp_doc_topic
                .iter()
                .zip(topic_word_d)
                .map(|(e, tw)| e * tw[j])
                .sum();
            c / (norm + EPS)
        })
        .collect()
}

fn mean_change(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| (x - y).abs()).sum::<f64>() / a.len() as f64
}

/// exp(E[log x]) for x ~ Dirichlet(alpha).
fn exp_dirichlet_expectation(alpha: &[f64]) -> Vec<f64> {
    let total = digamma(alpha.iter().sum());
    alpha.iter().map(|&a| (digamma(a) - total).exp()).collect()
}

fn exp_dirichlet_expectation_rows(rows: &[Vec<f64>]) -> Vec<Vec<f64>> {
    rows.iter().map(|r| exp_dirichlet_expectation(r)).collect()
}

/// Digamma for positive arguments: recurrence up to 6, then the asymptotic series.
fn digamma(mut x: f64) -> f64 {
    let mut result = 0.0;
    while x < 6.0 {
        result -= 1.0 / x;
        x += 1.0;
    }
    let f = 1.0 / (x * x);
    result + x.ln()
        - 0.5 / x
        - f * (1.0 / 12.0 - f * (1.0 / 120.0 - f * (1.0 / 252.0 - f * (1.0 / 240.0 - f / 132.0))))
}
