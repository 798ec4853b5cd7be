// Lexicon-based polarity estimation.
//
// Each polar word carries a fixed valence. Intensifiers ("very", "really")
// scale the next polar word, negations flip and damp it, and clause
// punctuation resets both. A text's polarity is the mean of its assessments.
// No training, no model files: the same text always gets the same score.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex_lite::Regex;

use super::traits::PolarityEstimator;

static TOKEN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[a-z]+(?:'[a-z]+)?|[.,;:!?]").expect("valid token pattern"));

/// Negated assessments are flipped and scaled by this factor.
const NEGATION_FACTOR: f64 = -0.5;

const POLAR_WORDS: &[(&str, f64)] = &[
    // positive
    ("love", 0.5),
    ("loved", 0.7),
    ("loving", 0.6),
    ("lovely", 0.5),
    ("like", 0.1),
    ("liked", 0.6),
    ("good", 0.7),
    ("great", 0.8),
    ("best", 1.0),
    ("better", 0.5),
    ("nice", 0.6),
    ("fine", 0.4167),
    ("ok", 0.5),
    ("okay", 0.5),
    ("awesome", 1.0),
    ("amazing", 0.6),
    ("excellent", 1.0),
    ("fantastic", 0.4),
    ("wonderful", 1.0),
    ("brilliant", 0.9),
    ("perfect", 1.0),
    ("beautiful", 0.85),
    ("happy", 0.8),
    ("glad", 0.5),
    ("fun", 0.3),
    ("funny", 0.25),
    ("cool", 0.35),
    ("interesting", 0.5),
    ("helpful", 0.6),
    ("useful", 0.3),
    ("impressive", 1.0),
    ("incredible", 0.9),
    ("enjoy", 0.4),
    ("enjoyed", 0.5),
    ("favorite", 0.5),
    ("favourite", 0.5),
    ("thanks", 0.2),
    ("thank", 0.2),
    ("recommend", 0.4),
    ("clear", 0.1),
    ("easy", 0.43),
    ("fast", 0.2),
    ("smart", 0.21),
    ("right", 0.29),
    ("correct", 0.4),
    ("true", 0.35),
    ("agree", 0.3),
    ("support", 0.2),
    ("win", 0.8),
    ("wins", 0.8),
    ("success", 0.3),
    ("successful", 0.75),
    ("hope", 0.2),
    ("excited", 0.4),
    ("exciting", 0.3),
    ("inspiring", 0.5),
    ("valuable", 0.5),
    ("worth", 0.3),
    ("solid", 0.2),
    ("fair", 0.7),
    ("safe", 0.5),
    ("strong", 0.43),
    ("positive", 0.23),
    ("wow", 0.1),
    ("yay", 0.5),
    // negative
    ("hate", -0.8),
    ("hated", -0.9),
    ("hates", -0.8),
    ("bad", -0.7),
    ("worse", -0.4),
    ("worst", -1.0),
    ("terrible", -1.0),
    ("awful", -1.0),
    ("horrible", -1.0),
    ("disgusting", -1.0),
    ("poor", -0.4),
    ("sad", -0.5),
    ("angry", -0.5),
    ("annoying", -0.8),
    ("boring", -1.0),
    ("stupid", -0.8),
    ("dumb", -0.375),
    ("ugly", -0.7),
    ("wrong", -0.5),
    ("false", -0.4),
    ("fake", -0.5),
    ("useless", -0.5),
    ("broken", -0.4),
    ("fail", -0.5),
    ("failed", -0.5),
    ("failure", -0.32),
    ("disappointed", -0.75),
    ("disappointing", -0.6),
    ("sucks", -0.3),
    ("sick", -0.71),
    ("scary", -0.5),
    ("afraid", -0.6),
    ("hard", -0.29),
    ("difficult", -0.5),
    ("slow", -0.3),
    ("expensive", -0.5),
    ("problem", -0.2),
    ("problems", -0.2),
    ("issue", -0.1),
    ("mess", -0.4),
    ("ridiculous", -0.33),
    ("crazy", -0.6),
    ("evil", -1.0),
    ("dangerous", -0.6),
    ("unfair", -0.5),
    ("weak", -0.375),
    ("negative", -0.3),
    ("lie", -0.5),
    ("lies", -0.5),
    ("liar", -0.8),
    ("trash", -0.6),
    ("garbage", -0.6),
    ("pathetic", -1.0),
    ("waste", -0.2),
    ("sorry", -0.5),
    ("unfortunately", -0.5),
    ("lose", -0.3),
    ("lost", -0.2),
];

const INTENSIFIERS: &[(&str, f64)] = &[
    ("very", 1.3),
    ("really", 1.2),
    ("so", 1.2),
    ("too", 1.2),
    ("extremely", 1.5),
    ("incredibly", 1.4),
    ("absolutely", 1.4),
    ("totally", 1.3),
    ("super", 1.3),
    ("quite", 1.1),
    ("pretty", 1.1),
    ("most", 1.2),
    ("highly", 1.3),
    ("slightly", 0.6),
    ("somewhat", 0.7),
    ("barely", 0.5),
];

const NEGATIONS: &[&str] = &["not", "no", "never", "nor", "cannot", "nothing", "neither"];

/// Deterministic lexicon/pattern polarity estimator.
pub struct LexiconPolarity {
    polar: HashMap<&'static str, f64>,
    intensifiers: HashMap<&'static str, f64>,
}

impl Default for LexiconPolarity {
    fn default() -> Self {
        Self {
            polar: POLAR_WORDS.iter().copied().collect(),
            intensifiers: INTENSIFIERS.iter().copied().collect(),
        }
    }
}

fn is_negation(token: &str) -> bool {
    NEGATIONS.contains(&token) || token.ends_with("n't")
}

fn is_clause_boundary(token: &str) -> bool {
    matches!(token, "." | "," | ";" | ":" | "!" | "?")
}

impl PolarityEstimator for LexiconPolarity {
    fn polarity(&self, text: &str) -> f64 {
        let lower = text.to_lowercase().replace('\u{2019}', "'");

        let mut assessments: Vec<f64> = Vec::new();
        let mut intensity = 1.0;
        let mut negated = false;

        for m in TOKEN_RE.find_iter(&lower) {
            let token = m.as_str();

            if is_clause_boundary(token) {
                intensity = 1.0;
                negated = false;
                continue;
            }
            if is_negation(token) {
                negated = true;
                continue;
            }
            if let Some(factor) = self.intensifiers.get(token) {
                intensity *= factor;
                continue;
            }

            match self.polar.get(token) {
                Some(&valence) => {
                    let mut score = valence * intensity;
                    if negated {
                        score *= NEGATION_FACTOR;
                    }
                    assessments.push(score.clamp(-1.0, 1.0));
                    intensity = 1.0;
                    negated = false;
                }
                // Negation survives filler words ("not a good idea"), intensity doesn't
                None => intensity = 1.0,
            }
        }

        if assessments.is_empty() {
            return 0.0;
        }
        let mean = assessments.iter().sum::<f64>() / assessments.len() as f64;
        mean.clamp(-1.0, 1.0)
    }
}
